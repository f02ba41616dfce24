pub mod health;

use axum::{
    extract::DefaultBodyLimit,
    routing::{get, post, put},
    Router,
};

use crate::state::AppState;
use crate::{blueprints, generation, templates, uploads};

/// Maximum multipart request body, matching the upload size cap advertised to
/// clients (50 MB).
const MAX_UPLOAD_BYTES: usize = 50 * 1024 * 1024;

pub fn build_router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(health::health_handler))
        .route("/api/set-api-key", post(uploads::handlers::handle_set_api_key))
        .route(
            "/api/upload-examples",
            post(uploads::handlers::handle_upload_examples)
                .layer(DefaultBodyLimit::max(MAX_UPLOAD_BYTES)),
        )
        .route(
            "/api/upload-case-data",
            post(uploads::handlers::handle_upload_case_data)
                .layer(DefaultBodyLimit::max(MAX_UPLOAD_BYTES)),
        )
        .route("/api/status", get(uploads::handlers::handle_status))
        .route(
            "/api/create-blueprint",
            post(blueprints::handlers::handle_create_blueprint),
        )
        .route("/api/blueprints", get(blueprints::handlers::handle_list_blueprints))
        .route(
            "/api/blueprint/:id",
            get(blueprints::handlers::handle_get_blueprint)
                .delete(blueprints::handlers::handle_delete_blueprint),
        )
        .route(
            "/api/generate-complaint",
            post(generation::handlers::handle_generate_complaint),
        )
        .route(
            "/api/generate-with-blueprint",
            post(generation::handlers::handle_generate_with_blueprint),
        )
        .route("/api/template/:name", put(templates::handlers::handle_put_template))
        .route("/api/templates", get(templates::handlers::handle_list_templates))
        .route(
            "/api/template/:name/render",
            post(templates::handlers::handle_render_template),
        )
        .with_state(state)
}
