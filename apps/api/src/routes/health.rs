use axum::{extract::State, Json};
use serde_json::{json, Value};

use crate::state::AppState;

/// GET /health
/// Returns service status plus whether the record store answers.
pub async fn health_handler(State(state): State<AppState>) -> Json<Value> {
    let store = match state.store.count().await {
        Ok(_) => "ok",
        Err(e) => {
            tracing::warn!("Health check: store unavailable: {e}");
            "unavailable"
        }
    };
    Json(json!({
        "status": "ok",
        "version": env!("CARGO_PKG_VERSION"),
        "service": "cv-builder-api",
        "store": store
    }))
}
