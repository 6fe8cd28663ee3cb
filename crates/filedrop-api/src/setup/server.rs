//! Server startup and graceful shutdown

use anyhow::Result;
use axum::Router;
use filedrop_core::Config;
use filedrop_worker::FollowUpRunner;
use std::time::Duration;

/// Serve until a shutdown signal, then give in-flight follow-ups a bounded window.
pub async fn start_server(config: &Config, app: Router, follow_ups: &FollowUpRunner) -> Result<()> {
    let addr = format!("0.0.0.0:{}", config.server_port());
    tracing::info!(addr = %addr, "Starting server");

    let listener = tokio::net::TcpListener::bind(&addr).await?;

    tracing::info!(
        max_upload_mb = config.max_upload_size_bytes() / 1024 / 1024,
        storage_backend = %config.storage_backend(),
        dynamo_table = %config.dynamo_table(),
        lambda_name = %config.lambda_name(),
        follow_up_max_retries = config.follow_up_max_retries(),
        "Server ready and accepting connections"
    );

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    let grace = Duration::from_secs(config.shutdown_grace_secs());
    tracing::info!(
        in_flight = follow_ups.in_flight(),
        grace_secs = grace.as_secs(),
        "Draining follow-ups"
    );
    if follow_ups.drain(grace).await {
        tracing::info!("All follow-ups completed");
    }

    Ok(())
}

/// Resolves on Ctrl+C (SIGINT) or SIGTERM.
async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = tokio::signal::ctrl_c().await {
            tracing::error!(error = %e, "Failed to install Ctrl+C handler");
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate()) {
            Ok(mut signal) => {
                signal.recv().await;
            }
            Err(e) => {
                tracing::error!(error = %e, "Failed to install SIGTERM handler");
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {
            tracing::info!("Received Ctrl+C signal");
        },
        _ = terminate => {
            tracing::info!("Received terminate signal");
        },
    }

    tracing::info!("Shutting down gracefully...");
}
