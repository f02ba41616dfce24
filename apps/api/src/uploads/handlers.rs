//! Axum route handlers for credential and upload endpoints.

use axum::{
    extract::{Multipart, State},
    Json,
};
use serde::{Deserialize, Serialize};

use crate::errors::AppError;
use crate::models::document::ParsedDocument;
use crate::parsing::{self, ParseError};
use crate::state::AppState;

// ────────────────────────────────────────────────────────────────────────────
// Request / Response types
// ────────────────────────────────────────────────────────────────────────────

#[derive(Debug, Deserialize)]
pub struct SetApiKeyRequest {
    pub api_key: String,
}

#[derive(Debug, Serialize)]
pub struct ActionResponse {
    pub status: &'static str,
    pub message: String,
}

/// Per-file outcome of an upload. Unsupported files are reported here but
/// never stored; parse failures are stored fail-soft with the error text.
#[derive(Debug, Serialize)]
pub struct UploadedFile {
    pub filename: String,
    pub status: &'static str, // "parsed" | "parse_error" | "unsupported"
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

#[derive(Debug, Serialize)]
pub struct UploadResponse {
    pub message: String,
    pub files: Vec<UploadedFile>,
}

#[derive(Debug, Serialize)]
pub struct StatusResponse {
    pub api_key_set: bool,
    pub examples_count: usize,
    pub examples: Vec<String>,
    pub case_files_count: usize,
    pub case_files: Vec<String>,
}

// ────────────────────────────────────────────────────────────────────────────
// Handlers
// ────────────────────────────────────────────────────────────────────────────

/// POST /api/set-api-key
pub async fn handle_set_api_key(
    State(state): State<AppState>,
    Json(request): Json<SetApiKeyRequest>,
) -> Result<Json<ActionResponse>, AppError> {
    let api_key = request.api_key.trim();
    if api_key.is_empty() {
        return Err(AppError::Validation("api_key must not be empty".to_string()));
    }

    state.uploads.set_api_key(api_key.to_string());
    Ok(Json(ActionResponse {
        status: "success",
        message: "API key set".to_string(),
    }))
}

/// POST /api/upload-examples
///
/// Parses the multipart files and replaces the current example batch.
pub async fn handle_upload_examples(
    State(state): State<AppState>,
    multipart: Multipart,
) -> Result<Json<UploadResponse>, AppError> {
    let (batch, files) = collect_batch(multipart).await?;
    let message = format!("{} example(s) uploaded", batch.len());
    state.uploads.set_examples(batch);
    Ok(Json(UploadResponse { message, files }))
}

/// POST /api/upload-case-data
///
/// Parses the multipart files and replaces the current case-data batch.
pub async fn handle_upload_case_data(
    State(state): State<AppState>,
    multipart: Multipart,
) -> Result<Json<UploadResponse>, AppError> {
    let (batch, files) = collect_batch(multipart).await?;
    let message = format!("{} file(s) uploaded", batch.len());
    state.uploads.set_case_data(batch);
    Ok(Json(UploadResponse { message, files }))
}

/// GET /api/status
pub async fn handle_status(State(state): State<AppState>) -> Json<StatusResponse> {
    let examples = state.uploads.example_filenames();
    let case_files = state.uploads.case_filenames();
    Json(StatusResponse {
        api_key_set: state.uploads.api_key().is_some(),
        examples_count: examples.len(),
        examples,
        case_files_count: case_files.len(),
        case_files,
    })
}

// ────────────────────────────────────────────────────────────────────────────
// Multipart ingestion
// ────────────────────────────────────────────────────────────────────────────

/// Reads every file field, extracts text, and returns the documents to store
/// plus the per-file report.
///
/// Fail-soft policy: unsupported extensions are reported and dropped; parse
/// failures are stored with the error text embedded so the rest of the batch
/// still works. An upload with no file fields at all is a client error.
async fn collect_batch(
    mut multipart: Multipart,
) -> Result<(Vec<ParsedDocument>, Vec<UploadedFile>), AppError> {
    let mut documents = Vec::new();
    let mut files = Vec::new();
    let mut saw_file = false;

    while let Some(field) = multipart
        .next_field()
        .await
        .map_err(|e| AppError::Validation(format!("Multipart read error: {e}")))?
    {
        // Skip non-file fields (e.g. stray form values).
        let Some(raw_name) = field.file_name().map(str::to_string) else {
            continue;
        };
        saw_file = true;
        let filename = sanitize_filename(&raw_name);

        let data = field
            .bytes()
            .await
            .map_err(|e| AppError::Validation(format!("Failed to read upload body: {e}")))?;

        if !parsing::is_allowed(&filename) {
            files.push(UploadedFile {
                filename,
                status: "unsupported",
                error: Some(ParseError::Unsupported {
                    extension: parsing::extension(&raw_name).unwrap_or_default(),
                }
                .to_string()),
            });
            continue;
        }

        // Text extraction can be CPU-heavy (PDFs), so it runs off the async
        // worker threads.
        let parse_name = filename.clone();
        let parsed = tokio::task::spawn_blocking(move || extract_from_bytes(&parse_name, &data))
            .await
            .map_err(|e| AppError::Internal(anyhow::anyhow!("parse task failed: {e}")))?;

        match parsed {
            Ok(text) => {
                files.push(UploadedFile {
                    filename: filename.clone(),
                    status: "parsed",
                    error: None,
                });
                documents.push(ParsedDocument::new(filename, text));
            }
            Err(err) => {
                let message = err.to_string();
                files.push(UploadedFile {
                    filename: filename.clone(),
                    status: "parse_error",
                    error: Some(message.clone()),
                });
                tracing::warn!("Failed to parse upload '{filename}': {message}");
                documents.push(ParsedDocument::failed(filename, message));
            }
        }
    }

    if !saw_file {
        return Err(AppError::Validation("No files provided".to_string()));
    }

    Ok((documents, files))
}

/// Spools uploaded bytes to a scoped temp file and extracts text from it.
/// The temp file is removed when the handle drops, parse success or failure.
fn extract_from_bytes(filename: &str, data: &[u8]) -> Result<String, ParseError> {
    use std::io::Write;

    let mut tmp = tempfile::NamedTempFile::new()?;
    tmp.write_all(data)?;
    parsing::parse_file(tmp.path(), filename)
}

/// Basename only, restricted to a small allow-set of characters, so a crafted
/// filename header cannot traverse paths or inject separator text.
fn sanitize_filename(raw: &str) -> String {
    let base = raw
        .rsplit(['/', '\\'])
        .next()
        .unwrap_or(raw)
        .chars()
        .filter(|c| c.is_alphanumeric() || matches!(c, '.' | '-' | '_' | ' '))
        .collect::<String>();
    let trimmed = base.trim();
    if trimmed.is_empty() {
        "document.txt".to_string()
    } else {
        trimmed.to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_sanitize_filename_strips_path_components() {
        assert_eq!(sanitize_filename("../../etc/passwd.txt"), "passwd.txt");
        assert_eq!(sanitize_filename(r"C:\evil\complaint.docx"), "complaint.docx");
    }

    #[test]
    fn test_sanitize_filename_collapses_empty_to_default() {
        assert_eq!(sanitize_filename("///"), "document.txt");
        assert_eq!(sanitize_filename("   "), "document.txt");
    }

    #[test]
    fn test_sanitize_filename_keeps_ordinary_names() {
        assert_eq!(sanitize_filename("smith v jones_2024.pdf"), "smith v jones_2024.pdf");
    }

    #[test]
    fn test_extract_from_bytes_cleans_up_and_parses_txt() {
        let text = extract_from_bytes("facts.txt", b"Rear-end collision, I-80.").unwrap();
        assert_eq!(text, "Rear-end collision, I-80.");
    }

    #[test]
    fn test_extract_from_bytes_reports_parse_failure() {
        let err = extract_from_bytes("broken.json", b"{oops").unwrap_err();
        assert!(err.to_string().starts_with("Error parsing JSON:"));
    }
}
