//! Service client construction

use crate::state::{AppState, UploadSettings};
use anyhow::{Context, Result};
use filedrop_core::Config;
use filedrop_services::{
    create_storage, load_sdk_config, DynamoRecordStore, LambdaNotifier,
};
use filedrop_worker::{FollowUpConfig, FollowUpRunner};
use std::path::PathBuf;
use std::sync::Arc;

/// Build every client the handlers need. Clients are created once and shared.
pub async fn initialize_services(config: &Config) -> Result<Arc<AppState>> {
    let storage = create_storage(config)
        .await
        .context("Failed to initialize storage backend")?;
    tracing::info!(backend = %storage.backend_type(), "Storage initialized");

    let sdk_config = load_sdk_config(config).await;

    let records = DynamoRecordStore::new(&sdk_config, config.dynamo_table());
    tracing::info!(table = %records.table(), "Record store initialized");

    let notifier = LambdaNotifier::new(&sdk_config, config.lambda_name());
    tracing::info!(function = %notifier.function_name(), "Notifier initialized");

    let follow_ups = FollowUpRunner::new(FollowUpConfig {
        max_retries: config.follow_up_max_retries(),
        ..FollowUpConfig::default()
    });

    let tmp_dir = PathBuf::from(config.upload_tmp_dir());
    tokio::fs::create_dir_all(&tmp_dir)
        .await
        .with_context(|| format!("Failed to create upload directory {}", tmp_dir.display()))?;

    Ok(Arc::new(AppState {
        storage,
        records: Arc::new(records),
        notifier: Arc::new(notifier),
        follow_ups,
        uploads: UploadSettings { tmp_dir },
    }))
}
