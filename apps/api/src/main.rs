mod blueprints;
mod config;
mod errors;
mod generation;
mod llm_client;
mod models;
mod parsing;
mod routes;
mod state;
mod templates;
mod uploads;

use anyhow::Result;
use std::net::SocketAddr;
use std::sync::Arc;
use tower_http::{cors::CorsLayer, trace::TraceLayer};
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use crate::blueprints::BlueprintStore;
use crate::config::Config;
use crate::llm_client::OpenAiClient;
use crate::routes::build_router;
use crate::state::AppState;
use crate::templates::TemplateStore;
use crate::uploads::UploadStore;

#[tokio::main]
async fn main() -> Result<()> {
    // Load configuration first (fails fast on malformed env vars)
    let config = Config::from_env()?;

    // Initialize structured logging
    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| {
            EnvFilter::new(format!("{}={}", env!("CARGO_PKG_NAME"), &config.rust_log))
        }))
        .with(tracing_subscriber::fmt::layer())
        .init();

    info!("Starting Draftsmith API v{}", env!("CARGO_PKG_VERSION"));

    // Upload store holds the current example/case-data batches and the API
    // credential. Single-writer semantics: concurrent writers race and the
    // last write wins, accepted for this single-tenant tool.
    let uploads = Arc::new(UploadStore::new(config.openai_api_key.clone()));
    if config.openai_api_key.is_some() {
        info!("API credential seeded from environment");
    }

    // Blueprint store persists one JSON record per file.
    tokio::fs::create_dir_all(&config.blueprint_dir).await?;
    let blueprints = BlueprintStore::new(&config.blueprint_dir);
    info!("Blueprint store at {}", config.blueprint_dir.display());

    // LLM client
    let draft_model = Arc::new(OpenAiClient::new(config.openai_model.clone()));
    info!("LLM client initialized (model: {})", config.openai_model);

    let state = AppState {
        uploads,
        blueprints,
        templates: Arc::new(TemplateStore::new()),
        draft_model,
        config: config.clone(),
    };

    let app = build_router(state)
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive()); // single-tenant local tool; no origin restrictions

    let addr: SocketAddr = format!("0.0.0.0:{}", config.port).parse()?;
    info!("Listening on {addr}");

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
