pub mod health;
pub mod resumes;
pub mod transfer;

use axum::{
    routing::{get, post},
    Router,
};

use crate::state::AppState;

pub fn build_router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(health::health_handler))
        // Records
        .route(
            "/api/v1/resumes",
            get(resumes::handle_list_resumes).post(resumes::handle_create_resume),
        )
        .route(
            "/api/v1/resumes/:id",
            get(resumes::handle_get_resume)
                .put(resumes::handle_save_resume)
                .delete(resumes::handle_delete_resume),
        )
        .route(
            "/api/v1/resumes/:id/actions",
            post(resumes::handle_apply_action),
        )
        .route(
            "/api/v1/resumes/:id/import-text",
            post(resumes::handle_import_text),
        )
        // Layout and rendering
        .route("/api/v1/resumes/:id/plan", get(resumes::handle_get_plan))
        .route("/api/v1/resumes/:id/preview", get(resumes::handle_preview))
        // Bulk transfer and the active pointer
        .route("/api/v1/export", get(transfer::handle_export))
        .route("/api/v1/import", post(transfer::handle_import))
        .route("/api/v1/active", get(transfer::handle_get_active))
        .route("/api/v1/active/switch", post(transfer::handle_switch_active))
        .with_state(state)
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use axum::{
        body::{to_bytes, Body},
        http::{header, Method, Request, StatusCode},
    };
    use serde_json::{json, Value};
    use tower::ServiceExt;

    use super::*;
    use crate::config::Config;
    use crate::store::MemoryStore;

    async fn test_app(config: Config) -> Router {
        let state = AppState::new(Arc::new(MemoryStore::new()), config);
        state.library.ensure_seeded().await.unwrap();
        build_router(state)
    }

    async fn send(app: &Router, method: Method, uri: &str, body: Option<Value>) -> (StatusCode, Value) {
        let mut req = Request::builder().method(method).uri(uri);
        let body = match body {
            Some(v) => {
                req = req.header(header::CONTENT_TYPE, "application/json");
                Body::from(v.to_string())
            }
            None => Body::empty(),
        };
        send_request(app, req.body(body).unwrap()).await
    }

    async fn send_request(app: &Router, req: Request<Body>) -> (StatusCode, Value) {
        let res = app.clone().oneshot(req).await.unwrap();
        let status = res.status();
        let bytes = to_bytes(res.into_body(), usize::MAX).await.unwrap();
        let value = if bytes.is_empty() {
            Value::Null
        } else {
            serde_json::from_slice(&bytes).unwrap()
        };
        (status, value)
    }

    fn raw_text(uri: &str, text: &str) -> Request<Body> {
        Request::builder()
            .method(Method::POST)
            .uri(uri)
            .header(header::CONTENT_TYPE, "text/plain; charset=utf-8")
            .body(Body::from(text.to_string()))
            .unwrap()
    }

    #[tokio::test]
    async fn test_health() {
        let app = test_app(Config::default()).await;
        let (status, body) = send(&app, Method::GET, "/health", None).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["store"], "ok");
    }

    #[tokio::test]
    async fn test_seeded_store_lists_one_resume() {
        let app = test_app(Config::default()).await;
        let (status, body) = send(&app, Method::GET, "/api/v1/resumes", None).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body.as_array().unwrap().len(), 1);
        assert_eq!(body[0]["name"], "Mi CV");
    }

    #[tokio::test]
    async fn test_create_then_fetch() {
        let app = test_app(Config::default()).await;
        let (status, created) =
            send(&app, Method::POST, "/api/v1/resumes", Some(json!({"name": "Backend"}))).await;
        assert_eq!(status, StatusCode::CREATED);
        let id = created["id"].as_str().unwrap().to_string();

        let (status, fetched) = send(&app, Method::GET, &format!("/api/v1/resumes/{id}"), None).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(fetched["name"], "Backend");

        let (_, active) = send(&app, Method::GET, "/api/v1/active", None).await;
        assert_eq!(active["id"], created["id"]);
    }

    #[tokio::test]
    async fn test_unknown_resume_is_404() {
        let app = test_app(Config::default()).await;
        let uri = format!("/api/v1/resumes/{}", uuid::Uuid::new_v4());
        let (status, body) = send(&app, Method::GET, &uri, None).await;
        assert_eq!(status, StatusCode::NOT_FOUND);
        assert_eq!(body["error"]["code"], "NOT_FOUND");
    }

    #[tokio::test]
    async fn test_last_resume_cannot_be_deleted() {
        let app = test_app(Config::default()).await;
        let (_, list) = send(&app, Method::GET, "/api/v1/resumes", None).await;
        let id = list[0]["id"].as_str().unwrap().to_string();
        let (status, body) =
            send(&app, Method::DELETE, &format!("/api/v1/resumes/{id}"), None).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body["error"]["code"], "VALIDATION_ERROR");
    }

    #[tokio::test]
    async fn test_action_is_applied_and_saved() {
        let app = test_app(Config::default()).await;
        let (_, active) = send(&app, Method::GET, "/api/v1/active", None).await;
        let id = active["id"].as_str().unwrap().to_string();

        let action = json!({
            "action": "toggleSectionVisibility",
            "section": "interests"
        });
        let uri = format!("/api/v1/resumes/{id}/actions");
        let (status, updated) = send(&app, Method::POST, &uri, Some(action)).await;
        assert_eq!(status, StatusCode::OK);
        assert!(updated["data"]["hiddenSections"]
            .as_array()
            .unwrap()
            .contains(&json!("interests")));

        let (_, plan) = send(&app, Method::GET, &format!("/api/v1/resumes/{id}/plan"), None).await;
        assert!(!plan.to_string().contains("interests"));
    }

    #[tokio::test]
    async fn test_import_text_replaces_header() {
        let app = test_app(Config::default()).await;
        let (_, active) = send(&app, Method::GET, "/api/v1/active", None).await;
        let id = active["id"].as_str().unwrap().to_string();

        let text = "Jane Doe\nSoftware Engineer\njane@example.com\n";
        let req = raw_text(&format!("/api/v1/resumes/{id}/import-text"), text);
        let (status, updated) = send_request(&app, req).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(updated["data"]["contact"]["email"], "jane@example.com");
    }

    #[tokio::test]
    async fn test_blank_import_text_leaves_document_unchanged() {
        let app = test_app(Config::default()).await;
        let (_, active) = send(&app, Method::GET, "/api/v1/active", None).await;
        let id = active["id"].as_str().unwrap().to_string();

        let req = raw_text(&format!("/api/v1/resumes/{id}/import-text"), "   \n\t\n");
        let (status, updated) = send_request(&app, req).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(updated["data"], active["data"]);
    }

    #[tokio::test]
    async fn test_oversized_import_text_is_rejected() {
        let config = Config {
            max_import_bytes: 16,
            ..Config::default()
        };
        let app = test_app(config).await;
        let (_, active) = send(&app, Method::GET, "/api/v1/active", None).await;
        let id = active["id"].as_str().unwrap().to_string();

        let req = raw_text(
            &format!("/api/v1/resumes/{id}/import-text"),
            "a line that is clearly longer than sixteen bytes",
        );
        let (status, body) = send_request(&app, req).await;
        assert_eq!(status, StatusCode::PAYLOAD_TOO_LARGE);
        assert_eq!(body["error"]["code"], "PAYLOAD_TOO_LARGE");
    }

    #[tokio::test]
    async fn test_preview_uses_query_theme_and_paper() {
        let app = test_app(Config::default()).await;
        let (_, active) = send(&app, Method::GET, "/api/v1/active", None).await;
        let id = active["id"].as_str().unwrap().to_string();

        let uri = format!("/api/v1/resumes/{id}/preview?primary=%23112233&paper=a4");
        let (status, page) = send(&app, Method::GET, &uri, None).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(page["paper"], "a4");
        assert_eq!(page["theme"]["primary"], "#112233");
        assert_eq!(page["theme"]["accent"], "#b3b3b3");

        let uri = format!("/api/v1/resumes/{id}/preview?paper=legal");
        let (status, _) = send(&app, Method::GET, &uri, None).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
    }

    #[tokio::test]
    async fn test_export_then_import_into_fresh_store() {
        let source = test_app(Config::default()).await;
        let (_, envelope) = send(&source, Method::GET, "/api/v1/export", None).await;
        assert_eq!(envelope["resumes"].as_array().unwrap().len(), 1);

        let target = test_app(Config::default()).await;
        let (status, report) =
            send(&target, Method::POST, "/api/v1/import", Some(envelope.clone())).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(report["imported"], 1);

        let (_, list) = send(&target, Method::GET, "/api/v1/resumes", None).await;
        assert_eq!(list.as_array().unwrap().len(), 2);
    }

    #[tokio::test]
    async fn test_import_rejects_garbage() {
        let app = test_app(Config::default()).await;
        let (status, body) =
            send(&app, Method::POST, "/api/v1/import", Some(json!({"hello": "world"}))).await;
        assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
        assert_eq!(body["error"]["code"], "UNPROCESSABLE_ENTITY");
    }

    #[tokio::test]
    async fn test_switch_saves_outgoing_document() {
        let app = test_app(Config::default()).await;
        let (_, first) = send(&app, Method::GET, "/api/v1/active", None).await;
        let (_, second) = send(&app, Method::POST, "/api/v1/resumes", None).await;

        let mut data = first["data"].clone();
        data["name"] = json!([{"text": "Edited Name"}]);
        let req = json!({
            "outgoing": {"id": first["id"], "data": data},
            "incoming": second["id"],
        });
        let (status, switched) =
            send(&app, Method::POST, "/api/v1/active/switch", Some(req)).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(switched["id"], second["id"]);

        let uri = format!("/api/v1/resumes/{}", first["id"].as_str().unwrap());
        let (_, saved) = send(&app, Method::GET, &uri, None).await;
        assert_eq!(saved["data"]["name"][0]["text"], "Edited Name");
    }
}
