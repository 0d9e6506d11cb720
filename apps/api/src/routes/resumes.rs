use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    Json,
};
use serde::Deserialize;
use uuid::Uuid;

use crate::editor::EditAction;
use crate::errors::AppError;
use crate::layout::{plan_for, Paper, RenderPlan};
use crate::models::{Document, ResumeRecord, ResumeSummary};
use crate::render::{render_page, RenderedPage, Theme};
use crate::state::AppState;

#[derive(Debug, Default, Deserialize)]
pub struct CreateResumeRequest {
    #[serde(default)]
    pub name: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct SaveResumeRequest {
    #[serde(default)]
    pub name: Option<String>,
    pub data: Document,
}

/// Theme colours fall back to the defaults individually.
#[derive(Debug, Default, Deserialize)]
pub struct PreviewQuery {
    pub primary: Option<String>,
    pub accent: Option<String>,
    pub text: Option<String>,
    pub paper: Option<String>,
}

impl PreviewQuery {
    fn theme(&self) -> Theme {
        let pick = |value: &Option<String>, fallback: String| {
            value
                .as_deref()
                .map(str::trim)
                .filter(|v| !v.is_empty())
                .map(str::to_string)
                .unwrap_or(fallback)
        };
        let defaults = Theme::default();
        Theme {
            primary: pick(&self.primary, defaults.primary),
            accent: pick(&self.accent, defaults.accent),
            text: pick(&self.text, defaults.text),
        }
    }

    fn paper(&self, fallback: Paper) -> Result<Paper, AppError> {
        match self.paper.as_deref() {
            Some(p) if !p.trim().is_empty() => p.parse::<Paper>().map_err(AppError::Validation),
            _ => Ok(fallback),
        }
    }
}

/// GET /api/v1/resumes
pub async fn handle_list_resumes(
    State(state): State<AppState>,
) -> Result<Json<Vec<ResumeSummary>>, AppError> {
    Ok(Json(state.library.list().await?))
}

/// POST /api/v1/resumes
pub async fn handle_create_resume(
    State(state): State<AppState>,
    body: Option<Json<CreateResumeRequest>>,
) -> Result<(StatusCode, Json<ResumeRecord>), AppError> {
    let req = body.map(|Json(req)| req).unwrap_or_default();
    let record = state.library.create_resume(req.name).await?;
    Ok((StatusCode::CREATED, Json(record)))
}

/// GET /api/v1/resumes/:id
pub async fn handle_get_resume(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<Json<ResumeRecord>, AppError> {
    Ok(Json(state.library.get(id).await?))
}

/// PUT /api/v1/resumes/:id
pub async fn handle_save_resume(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
    Json(req): Json<SaveResumeRequest>,
) -> Result<Json<ResumeRecord>, AppError> {
    let record = state.library.save_resume(id, req.name, req.data).await?;
    Ok(Json(record))
}

/// DELETE /api/v1/resumes/:id
pub async fn handle_delete_resume(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<StatusCode, AppError> {
    state.library.delete_resume(id).await?;
    Ok(StatusCode::NO_CONTENT)
}

/// POST /api/v1/resumes/:id/actions
pub async fn handle_apply_action(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
    Json(action): Json<EditAction>,
) -> Result<Json<ResumeRecord>, AppError> {
    Ok(Json(state.library.edit_resume(id, action).await?))
}

/// POST /api/v1/resumes/:id/import-text
/// Body is the raw pasted text; the parsed document replaces the record's data.
pub async fn handle_import_text(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
    text: String,
) -> Result<Json<ResumeRecord>, AppError> {
    let limit = state.config.max_import_bytes;
    if text.len() > limit {
        return Err(AppError::PayloadTooLarge(format!(
            "Pasted text is {} bytes; the limit is {limit}",
            text.len()
        )));
    }
    let record = state
        .library
        .edit_resume(id, EditAction::ImportText { text })
        .await?;
    Ok(Json(record))
}

/// GET /api/v1/resumes/:id/plan
pub async fn handle_get_plan(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<Json<RenderPlan>, AppError> {
    let record = state.library.get(id).await?;
    Ok(Json(plan_for(&record.data)))
}

/// GET /api/v1/resumes/:id/preview
pub async fn handle_preview(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
    Query(query): Query<PreviewQuery>,
) -> Result<Json<RenderedPage>, AppError> {
    let paper = query.paper(state.config.default_paper)?;
    let record = state.library.get(id).await?;
    Ok(Json(render_page(&record.data, query.theme(), paper)))
}
