//! Health check endpoint

use axum::{http::StatusCode, response::IntoResponse, Json};
use serde_json::json;

/// Liveness check: process is up and serving. No dependency checks.
pub async fn liveness_check() -> impl IntoResponse {
    (StatusCode::OK, Json(json!({ "status": "alive" })))
}
