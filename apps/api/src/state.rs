use std::sync::Arc;

use crate::blueprints::BlueprintStore;
use crate::config::Config;
use crate::llm_client::DraftModel;
use crate::templates::TemplateStore;
use crate::uploads::UploadStore;

/// Shared application state injected into all route handlers via Axum extractors.
///
/// The upload store and template store are process-wide mutable state with
/// last-write-wins semantics; see their module docs for the documented races.
#[derive(Clone)]
pub struct AppState {
    /// Current example/case-data batches plus the API credential.
    pub uploads: Arc<UploadStore>,
    /// File-per-record blueprint persistence.
    pub blueprints: BlueprintStore,
    /// Toy `{{key}}` template engine (no AI integration).
    pub templates: Arc<TemplateStore>,
    /// Pluggable draft generator. Production: `OpenAiClient`. Tests swap in a stub.
    pub draft_model: Arc<dyn DraftModel>,
    pub config: Config,
}
