use axum::{extract::State, Json};
use bytes::Bytes;
use serde::Deserialize;
use uuid::Uuid;

use crate::errors::AppError;
use crate::models::{Document, ExportEnvelope, ResumeRecord};
use crate::state::AppState;
use crate::store::ImportReport;

#[derive(Debug, Deserialize)]
pub struct OutgoingResume {
    pub id: Uuid,
    pub data: Document,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SwitchRequest {
    /// The document currently open in the editor, saved before switching.
    #[serde(default)]
    pub outgoing: Option<OutgoingResume>,
    pub incoming: Uuid,
}

/// GET /api/v1/export
pub async fn handle_export(
    State(state): State<AppState>,
) -> Result<Json<ExportEnvelope>, AppError> {
    Ok(Json(state.library.export_all().await?))
}

/// POST /api/v1/import
pub async fn handle_import(
    State(state): State<AppState>,
    body: Bytes,
) -> Result<Json<ImportReport>, AppError> {
    let limit = state.config.max_import_bytes;
    if body.len() > limit {
        return Err(AppError::PayloadTooLarge(format!(
            "Import file is {} bytes; the limit is {limit}",
            body.len()
        )));
    }
    Ok(Json(state.library.import_envelope(&body).await?))
}

/// GET /api/v1/active
pub async fn handle_get_active(
    State(state): State<AppState>,
) -> Result<Json<ResumeRecord>, AppError> {
    Ok(Json(state.library.active().await?))
}

/// POST /api/v1/active/switch
pub async fn handle_switch_active(
    State(state): State<AppState>,
    Json(req): Json<SwitchRequest>,
) -> Result<Json<ResumeRecord>, AppError> {
    let outgoing = req.outgoing.map(|o| (o.id, o.data));
    Ok(Json(state.library.switch_active(outgoing, req.incoming).await?))
}
