//! Upload Store — transient, process-wide holder of the current example and
//! case-data batches plus the API credential.
//!
//! Each setter replaces its entire collection; consumers always operate on
//! "the current batch" and there is no per-item addressing. State lives for
//! the lifetime of the process only.
//!
//! Concurrency: last write wins. Two clients uploading at the same time race
//! and one batch silently replaces the other. That is an accepted limitation
//! of the single-tenant design, documented here rather than locked around.

pub mod handlers;

use std::sync::RwLock;

use crate::models::document::ParsedDocument;

#[derive(Debug, Default)]
struct UploadState {
    api_key: Option<String>,
    examples: Vec<ParsedDocument>,
    case_data: Vec<ParsedDocument>,
}

pub struct UploadStore {
    state: RwLock<UploadState>,
}

impl UploadStore {
    /// `seed_key` lets configuration pre-populate the credential so a
    /// deployment with OPENAI_API_KEY set skips the set-api-key call.
    pub fn new(seed_key: Option<String>) -> Self {
        Self {
            state: RwLock::new(UploadState {
                api_key: seed_key,
                ..UploadState::default()
            }),
        }
    }

    pub fn set_api_key(&self, api_key: String) {
        self.write().api_key = Some(api_key);
    }

    pub fn api_key(&self) -> Option<String> {
        self.read().api_key.clone()
    }

    /// Replaces the whole example batch. No partial overwrite.
    pub fn set_examples(&self, examples: Vec<ParsedDocument>) {
        self.write().examples = examples;
    }

    /// Replaces the whole case-data batch. No partial overwrite.
    pub fn set_case_data(&self, case_data: Vec<ParsedDocument>) {
        self.write().case_data = case_data;
    }

    pub fn examples(&self) -> Vec<ParsedDocument> {
        self.read().examples.clone()
    }

    pub fn case_data(&self) -> Vec<ParsedDocument> {
        self.read().case_data.clone()
    }

    pub fn example_filenames(&self) -> Vec<String> {
        self.read()
            .examples
            .iter()
            .map(|d| d.filename.clone())
            .collect()
    }

    pub fn case_filenames(&self) -> Vec<String> {
        self.read()
            .case_data
            .iter()
            .map(|d| d.filename.clone())
            .collect()
    }

    fn read(&self) -> std::sync::RwLockReadGuard<'_, UploadState> {
        self.state.read().expect("upload store lock poisoned")
    }

    fn write(&self) -> std::sync::RwLockWriteGuard<'_, UploadState> {
        self.state.write().expect("upload store lock poisoned")
    }
}
