//! Axum route handlers for complaint generation.
//!
//! Preconditions are checked in a fixed order before any API call is made:
//! credential, then examples (or blueprint), then case data. A failed check
//! never reaches the model.

use axum::{extract::State, Json};
use serde::{Deserialize, Serialize};
use tracing::{info, warn};

use crate::errors::AppError;
use crate::generation::builder::assemble_prompt;
use crate::generation::prompts::DRAFTER_SYSTEM;
use crate::state::AppState;

#[derive(Debug, Serialize)]
pub struct GenerateResponse {
    pub complaint: String,
}

#[derive(Debug, Deserialize)]
pub struct GenerateWithBlueprintRequest {
    pub blueprint_id: String,
}

/// POST /api/generate-complaint
///
/// Drafts from the ad-hoc upload batches currently in the store.
pub async fn handle_generate_complaint(
    State(state): State<AppState>,
) -> Result<Json<GenerateResponse>, AppError> {
    let api_key = state.uploads.api_key().ok_or(AppError::MissingCredential)?;

    let examples = state.uploads.examples();
    if examples.is_empty() {
        return Err(AppError::MissingExamples);
    }
    let case_data = state.uploads.case_data();
    if case_data.is_empty() {
        return Err(AppError::MissingCaseData);
    }

    let prompt = assemble_prompt(&examples, &case_data, None);
    let complaint = run_draft(&state, &api_key, &prompt).await?;
    info!(
        "Generated complaint from {} example(s) and {} case file(s)",
        examples.len(),
        case_data.len()
    );
    Ok(Json(GenerateResponse { complaint }))
}

/// POST /api/generate-with-blueprint
///
/// Drafts from a persisted blueprint's examples and instructions, combined
/// with the current case-data batch. On success the blueprint's usage count
/// is bumped; a bookkeeping failure is logged but never discards a draft the
/// API call already paid for.
pub async fn handle_generate_with_blueprint(
    State(state): State<AppState>,
    Json(request): Json<GenerateWithBlueprintRequest>,
) -> Result<Json<GenerateResponse>, AppError> {
    let api_key = state.uploads.api_key().ok_or(AppError::MissingCredential)?;

    let blueprint = state.blueprints.get(&request.blueprint_id).await?;
    if blueprint.examples.is_empty() {
        return Err(AppError::MissingExamples);
    }
    let case_data = state.uploads.case_data();
    if case_data.is_empty() {
        return Err(AppError::MissingCaseData);
    }

    let prompt = assemble_prompt(
        &blueprint.examples,
        &case_data,
        blueprint.custom_instructions.as_deref(),
    );
    let complaint = run_draft(&state, &api_key, &prompt).await?;

    match state.blueprints.record_usage(&blueprint.id).await {
        Ok(updated) => info!(
            "Generated complaint with blueprint '{}' (usage_count now {})",
            updated.name, updated.usage_count
        ),
        Err(e) => warn!(
            "Failed to record usage for blueprint {}: {e}",
            blueprint.id
        ),
    }

    Ok(Json(GenerateResponse { complaint }))
}

async fn run_draft(state: &AppState, api_key: &str, prompt: &str) -> Result<String, AppError> {
    state
        .draft_model
        .draft(api_key, DRAFTER_SYSTEM, prompt)
        .await
        .map_err(|e| AppError::Generation(format!("Error generating complaint: {e}")))
}
