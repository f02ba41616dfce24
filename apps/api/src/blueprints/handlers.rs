//! Axum route handlers for the Blueprint API.

use axum::{
    extract::{Path, State},
    http::StatusCode,
    Json,
};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::errors::AppError;
use crate::models::blueprint::Blueprint;
use crate::state::AppState;

#[derive(Debug, Deserialize)]
pub struct CreateBlueprintRequest {
    pub name: String,
    pub custom_instructions: Option<String>,
}

/// Listing entry: the full record minus the example texts, which can be
/// large (whole parsed complaints).
#[derive(Debug, Serialize)]
pub struct BlueprintSummary {
    pub id: String,
    pub name: String,
    pub created_date: DateTime<Utc>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub custom_instructions: Option<String>,
    pub example_count: usize,
    pub examples: Vec<String>,
    pub usage_count: u64,
}

impl From<Blueprint> for BlueprintSummary {
    fn from(blueprint: Blueprint) -> Self {
        Self {
            id: blueprint.id,
            name: blueprint.name,
            created_date: blueprint.created_date,
            custom_instructions: blueprint.custom_instructions,
            example_count: blueprint.examples.len(),
            examples: blueprint
                .examples
                .into_iter()
                .map(|d| d.filename)
                .collect(),
            usage_count: blueprint.usage_count,
        }
    }
}

#[derive(Debug, Serialize)]
pub struct BlueprintListResponse {
    pub blueprints: Vec<BlueprintSummary>,
}

/// POST /api/create-blueprint
///
/// Promotes the current example batch into a new persisted blueprint.
pub async fn handle_create_blueprint(
    State(state): State<AppState>,
    Json(request): Json<CreateBlueprintRequest>,
) -> Result<(StatusCode, Json<Blueprint>), AppError> {
    if request.name.trim().is_empty() {
        return Err(AppError::Validation("name must not be empty".to_string()));
    }

    let examples = state.uploads.examples();
    let blueprint = state
        .blueprints
        .create(request.name.trim(), request.custom_instructions, examples)
        .await?;

    tracing::info!(
        "Created blueprint '{}' ({}, {} example(s))",
        blueprint.name,
        blueprint.id,
        blueprint.examples.len()
    );
    Ok((StatusCode::CREATED, Json(blueprint)))
}

/// GET /api/blueprints
pub async fn handle_list_blueprints(
    State(state): State<AppState>,
) -> Result<Json<BlueprintListResponse>, AppError> {
    let blueprints = state
        .blueprints
        .list()
        .await?
        .into_iter()
        .map(BlueprintSummary::from)
        .collect();
    Ok(Json(BlueprintListResponse { blueprints }))
}

/// GET /api/blueprint/:id
pub async fn handle_get_blueprint(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<Blueprint>, AppError> {
    Ok(Json(state.blueprints.get(&id).await?))
}

/// DELETE /api/blueprint/:id
pub async fn handle_delete_blueprint(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<StatusCode, AppError> {
    state.blueprints.delete(&id).await?;
    tracing::info!("Deleted blueprint {id}");
    Ok(StatusCode::NO_CONTENT)
}
