//! LLM Client — the single point of entry for all OpenAI API calls in
//! Draftsmith.
//!
//! ARCHITECTURAL RULE: no other module may call the text-generation API
//! directly. Handlers depend on the `DraftModel` trait so tests can swap in
//! a stub, and production wires in `OpenAiClient`.

use async_trait::async_trait;
use reqwest::Client;
use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::debug;

const OPENAI_API_URL: &str = "https://api.openai.com/v1/chat/completions";
/// Fixed sampling temperature for complaint drafting.
const TEMPERATURE: f64 = 0.7;
/// Output-length ceiling per generation call.
const MAX_TOKENS: u32 = 4000;

#[derive(Debug, Error)]
pub enum LlmError {
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("API error (status {status}): {message}")]
    Api { status: u16, message: String },

    #[error("LLM returned empty content")]
    EmptyContent,
}

/// The draft generator seam. One blocking round-trip per call, no retries:
/// a failure is surfaced to the caller as-is, never partially returned.
#[async_trait]
pub trait DraftModel: Send + Sync {
    async fn draft(&self, api_key: &str, system: &str, prompt: &str)
        -> Result<String, LlmError>;
}

#[derive(Debug, Serialize)]
struct ChatRequest<'a> {
    model: &'a str,
    temperature: f64,
    max_tokens: u32,
    messages: Vec<ChatMessage<'a>>,
}

#[derive(Debug, Serialize)]
struct ChatMessage<'a> {
    role: &'a str,
    content: &'a str,
}

#[derive(Debug, Deserialize)]
struct ChatResponse {
    choices: Vec<Choice>,
    #[serde(default)]
    usage: Option<Usage>,
}

#[derive(Debug, Deserialize)]
struct Choice {
    message: ChoiceMessage,
}

#[derive(Debug, Deserialize)]
struct ChoiceMessage {
    content: Option<String>,
}

#[derive(Debug, Deserialize)]
struct Usage {
    prompt_tokens: u32,
    completion_tokens: u32,
}

impl ChatResponse {
    /// The generated text from the first choice, if any.
    fn text(&self) -> Option<&str> {
        self.choices
            .first()
            .and_then(|c| c.message.content.as_deref())
            .filter(|t| !t.is_empty())
    }
}

#[derive(Debug, Deserialize)]
struct OpenAiError {
    error: OpenAiErrorBody,
}

#[derive(Debug, Deserialize)]
struct OpenAiErrorBody {
    message: String,
}

/// Chat-completions client. The credential is passed per call because it is
/// set at runtime through the API, not fixed at startup.
#[derive(Clone)]
pub struct OpenAiClient {
    client: Client,
    model: String,
}

impl OpenAiClient {
    pub fn new(model: impl Into<String>) -> Self {
        Self {
            // Default client settings: this service configures no timeout of
            // its own and there is no cancellation path once a call is out.
            client: Client::new(),
            model: model.into(),
        }
    }
}

#[async_trait]
impl DraftModel for OpenAiClient {
    async fn draft(
        &self,
        api_key: &str,
        system: &str,
        prompt: &str,
    ) -> Result<String, LlmError> {
        let request_body = ChatRequest {
            model: &self.model,
            temperature: TEMPERATURE,
            max_tokens: MAX_TOKENS,
            messages: vec![
                ChatMessage {
                    role: "system",
                    content: system,
                },
                ChatMessage {
                    role: "user",
                    content: prompt,
                },
            ],
        };

        let response = self
            .client
            .post(OPENAI_API_URL)
            .bearer_auth(api_key)
            .json(&request_body)
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            let message = serde_json::from_str::<OpenAiError>(&body)
                .map(|e| e.error.message)
                .unwrap_or(body);
            return Err(LlmError::Api {
                status: status.as_u16(),
                message,
            });
        }

        let chat_response: ChatResponse = response.json().await?;

        if let Some(usage) = &chat_response.usage {
            debug!(
                "Draft call succeeded: prompt_tokens={}, completion_tokens={}",
                usage.prompt_tokens, usage.completion_tokens
            );
        }

        chat_response
            .text()
            .map(str::to_string)
            .ok_or(LlmError::EmptyContent)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_request_carries_fixed_sampling_parameters() {
        let request = ChatRequest {
            model: "gpt-4",
            temperature: TEMPERATURE,
            max_tokens: MAX_TOKENS,
            messages: vec![ChatMessage {
                role: "user",
                content: "draft it",
            }],
        };
        let json = serde_json::to_value(&request).unwrap();
        assert_eq!(json["temperature"], 0.7);
        assert_eq!(json["max_tokens"], 4000);
        assert_eq!(json["model"], "gpt-4");
    }

    #[test]
    fn test_response_text_reads_first_choice() {
        let response: ChatResponse = serde_json::from_str(
            r#"{
                "choices": [{"message": {"role": "assistant", "content": "COMPLAINT"}}],
                "usage": {"prompt_tokens": 100, "completion_tokens": 50}
            }"#,
        )
        .unwrap();
        assert_eq!(response.text(), Some("COMPLAINT"));
    }

    #[test]
    fn test_empty_choices_yield_no_text() {
        let response: ChatResponse = serde_json::from_str(r#"{"choices": []}"#).unwrap();
        assert_eq!(response.text(), None);
    }

    #[test]
    fn test_empty_content_string_yields_no_text() {
        let response: ChatResponse = serde_json::from_str(
            r#"{"choices": [{"message": {"content": ""}}]}"#,
        )
        .unwrap();
        assert_eq!(response.text(), None);
    }

    #[test]
    fn test_api_error_body_parses_nested_message() {
        let parsed: OpenAiError = serde_json::from_str(
            r#"{"error": {"message": "Incorrect API key provided", "type": "invalid_request_error"}}"#,
        )
        .unwrap();
        assert_eq!(parsed.error.message, "Incorrect API key provided");
    }
}
