use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;
use thiserror::Error;

use crate::blueprints::BlueprintStoreError;

/// Application-level error type.
/// Implements `IntoResponse` so Axum handlers can return `Result<T, AppError>`.
///
/// Every generation precondition gets its own variant so the handler can
/// short-circuit in a fixed order: credential, then examples (or blueprint),
/// then case data.
#[derive(Debug, Error)]
pub enum AppError {
    #[error("OpenAI API key not set")]
    MissingCredential,

    #[error("No complaint examples uploaded")]
    MissingExamples,

    #[error("No case data uploaded")]
    MissingCaseData,

    #[error("Blueprint not found: {0}")]
    BlueprintNotFound(String),

    #[error("Template not found: {0}")]
    TemplateNotFound(String),

    #[error("Validation error: {0}")]
    Validation(String),

    #[error("{0}")]
    Generation(String),

    #[error("Storage error: {0}")]
    Storage(String),

    #[error("Internal server error: {0}")]
    Internal(#[from] anyhow::Error),
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, code, message) = match &self {
            AppError::MissingCredential => (
                StatusCode::BAD_REQUEST,
                "MISSING_API_KEY",
                self.to_string(),
            ),
            AppError::MissingExamples => (
                StatusCode::BAD_REQUEST,
                "MISSING_EXAMPLES",
                self.to_string(),
            ),
            AppError::MissingCaseData => (
                StatusCode::BAD_REQUEST,
                "MISSING_CASE_DATA",
                self.to_string(),
            ),
            AppError::BlueprintNotFound(_) | AppError::TemplateNotFound(_) => {
                (StatusCode::NOT_FOUND, "NOT_FOUND", self.to_string())
            }
            AppError::Validation(msg) => (StatusCode::BAD_REQUEST, "VALIDATION_ERROR", msg.clone()),
            AppError::Generation(msg) => {
                // Generation failures surface the underlying API error text;
                // the caller needs it to distinguish auth, quota, and network.
                tracing::error!("Generation error: {msg}");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "GENERATION_ERROR",
                    msg.clone(),
                )
            }
            AppError::Storage(msg) => {
                tracing::error!("Storage error: {msg}");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "STORAGE_ERROR",
                    "A storage error occurred".to_string(),
                )
            }
            AppError::Internal(e) => {
                tracing::error!("Internal error: {e:?}");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "INTERNAL_ERROR",
                    "An internal server error occurred".to_string(),
                )
            }
        };

        let body = Json(json!({
            "error": {
                "code": code,
                "message": message
            }
        }));

        (status, body).into_response()
    }
}

impl From<BlueprintStoreError> for AppError {
    fn from(err: BlueprintStoreError) -> Self {
        match err {
            BlueprintStoreError::NotFound { id } => AppError::BlueprintNotFound(id),
            BlueprintStoreError::EmptyExamples => AppError::MissingExamples,
            other => AppError::Storage(other.to_string()),
        }
    }
}
