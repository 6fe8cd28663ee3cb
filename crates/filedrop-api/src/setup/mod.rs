//! Application setup and initialization
//!
//! Startup order: validate configuration, install telemetry, build service clients, mount
//! routes.

pub mod routes;
pub mod server;
pub mod services;
pub mod validation;

use crate::state::AppState;
use anyhow::{Context, Result};
use filedrop_core::Config;
use std::sync::Arc;

/// Initialize the entire application
pub async fn initialize_app(config: Config) -> Result<(Arc<AppState>, axum::Router)> {
    // Validate configuration first - fail fast on misconfiguration
    validation::validate_config(&config).context("Configuration validation failed")?;

    crate::telemetry::init_telemetry(config.log_format())
        .map_err(|e| anyhow::anyhow!("Failed to initialize telemetry: {}", e))?;

    tracing::info!(
        environment = %config.environment(),
        storage_backend = %config.storage_backend(),
        "Configuration loaded and validated successfully"
    );

    let state = services::initialize_services(&config).await?;

    let router = routes::setup_routes(&config, state.clone());

    Ok((state, router))
}
