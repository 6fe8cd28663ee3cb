//! Route and middleware assembly

use crate::constants::{FORM_PATH, HEALTH_PATH, UPLOAD_PATH};
use crate::handlers;
use crate::state::AppState;
use axum::extract::DefaultBodyLimit;
use axum::routing::{get, post};
use axum::Router;
use filedrop_core::Config;
use std::path::Path;
use std::sync::Arc;
use tower_http::limit::RequestBodyLimitLayer;
use tower_http::services::ServeDir;
use tower_http::trace::TraceLayer;

pub fn setup_routes(config: &Config, state: Arc<AppState>) -> Router {
    tracing::info!(
        public_dir = %config.public_dir(),
        max_upload_mb = config.max_upload_size_bytes() / 1024 / 1024,
        "Mounting routes"
    );
    build_router(
        state,
        Path::new(config.public_dir()),
        config.max_upload_size_bytes(),
    )
}

/// Form, upload and health routes; anything else is looked up in `public_dir`.
pub fn build_router(state: Arc<AppState>, public_dir: &Path, max_body_bytes: usize) -> Router {
    Router::new()
        .route(FORM_PATH, get(handlers::upload_form::upload_form))
        .route(UPLOAD_PATH, post(handlers::upload::upload_file))
        .route(HEALTH_PATH, get(handlers::health::liveness_check))
        .fallback_service(ServeDir::new(public_dir))
        .layer(RequestBodyLimitLayer::new(max_body_bytes))
        .layer(DefaultBodyLimit::disable())
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}
