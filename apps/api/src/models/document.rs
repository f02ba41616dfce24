use serde::{Deserialize, Serialize};

/// A single uploaded file after text extraction.
///
/// Parsing is fail-soft: when extraction fails, `text` carries the error
/// message (so prompt assembly keeps working on the rest of the batch) and
/// `parse_error` tags the document so downstream code can tell real content
/// from an embedded error string.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct ParsedDocument {
    pub filename: String,
    pub text: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub parse_error: Option<String>,
}

impl ParsedDocument {
    pub fn new(filename: impl Into<String>, text: impl Into<String>) -> Self {
        Self {
            filename: filename.into(),
            text: text.into(),
            parse_error: None,
        }
    }

    /// A document whose extraction failed. The error text doubles as the
    /// document body, matching the upload contract: one bad file never
    /// aborts the batch.
    pub fn failed(filename: impl Into<String>, error: impl Into<String>) -> Self {
        let error = error.into();
        Self {
            filename: filename.into(),
            text: error.clone(),
            parse_error: Some(error),
        }
    }
}
