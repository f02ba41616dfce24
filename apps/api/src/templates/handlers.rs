//! Axum route handlers for the template API.

use std::collections::HashMap;

use axum::{
    extract::{Path, State},
    Json,
};
use serde::{Deserialize, Serialize};

use crate::errors::AppError;
use crate::state::AppState;

#[derive(Debug, Deserialize)]
pub struct PutTemplateRequest {
    pub body: String,
}

#[derive(Debug, Serialize)]
pub struct TemplateListResponse {
    pub templates: Vec<String>,
}

#[derive(Debug, Deserialize)]
pub struct RenderRequest {
    #[serde(default)]
    pub values: HashMap<String, String>,
}

#[derive(Debug, Serialize)]
pub struct RenderResponse {
    pub rendered: String,
}

/// PUT /api/template/:name
pub async fn handle_put_template(
    State(state): State<AppState>,
    Path(name): Path<String>,
    Json(request): Json<PutTemplateRequest>,
) -> Result<Json<TemplateListResponse>, AppError> {
    if name.trim().is_empty() {
        return Err(AppError::Validation("template name must not be empty".to_string()));
    }
    state.templates.upsert(name.trim(), request.body);
    Ok(Json(TemplateListResponse {
        templates: state.templates.names(),
    }))
}

/// GET /api/templates
pub async fn handle_list_templates(State(state): State<AppState>) -> Json<TemplateListResponse> {
    Json(TemplateListResponse {
        templates: state.templates.names(),
    })
}

/// POST /api/template/:name/render
pub async fn handle_render_template(
    State(state): State<AppState>,
    Path(name): Path<String>,
    Json(request): Json<RenderRequest>,
) -> Result<Json<RenderResponse>, AppError> {
    let rendered = state
        .templates
        .render(&name, &request.values)
        .ok_or(AppError::TemplateNotFound(name))?;
    Ok(Json(RenderResponse { rendered }))
}
