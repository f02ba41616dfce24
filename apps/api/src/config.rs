use std::path::PathBuf;

use anyhow::{Context, Result};

/// Application configuration loaded from environment variables.
/// Everything has a sensible default for local single-tenant use; the only
/// secret (the OpenAI key) may be seeded here or supplied at runtime via
/// `POST /api/set-api-key`.
#[derive(Debug, Clone)]
pub struct Config {
    pub port: u16,
    pub rust_log: String,
    /// Optional seed for the API credential. When absent, the credential
    /// must be set through the API before any generation call.
    pub openai_api_key: Option<String>,
    /// Model identifier passed to the chat completions endpoint.
    pub openai_model: String,
    /// Directory holding one JSON file per blueprint record.
    pub blueprint_dir: PathBuf,
}

/// The model used when OPENAI_MODEL is not set.
pub const DEFAULT_MODEL: &str = "gpt-4";

impl Config {
    pub fn from_env() -> Result<Self> {
        dotenvy::dotenv().ok(); // load .env if present; ignore if missing

        Ok(Config {
            port: std::env::var("PORT")
                .unwrap_or_else(|_| "8080".to_string())
                .parse::<u16>()
                .context("PORT must be a valid port number")?,
            rust_log: std::env::var("RUST_LOG").unwrap_or_else(|_| "info".to_string()),
            openai_api_key: std::env::var("OPENAI_API_KEY")
                .ok()
                .filter(|key| !key.trim().is_empty()),
            openai_model: std::env::var("OPENAI_MODEL")
                .unwrap_or_else(|_| DEFAULT_MODEL.to_string()),
            blueprint_dir: PathBuf::from(
                std::env::var("BLUEPRINT_DIR").unwrap_or_else(|_| "data/blueprints".to_string()),
            ),
        })
    }
}
