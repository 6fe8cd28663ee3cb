//! Startup configuration checks beyond what parsing already enforces.

use anyhow::{bail, Result};
use filedrop_core::{Config, StorageBackend};

pub fn validate_config(config: &Config) -> Result<()> {
    if config.max_upload_size_bytes() == 0 {
        bail!("MAX_UPLOAD_SIZE_MB must be greater than 0");
    }

    if config.is_production() && config.storage_backend() == StorageBackend::Local {
        tracing::warn!("Local storage backend in production; files are not shared between instances");
    }

    if config.shutdown_grace_secs() == 0 {
        tracing::warn!("SHUTDOWN_GRACE_SECS is 0; pending follow-ups are dropped on shutdown");
    }

    Ok(())
}
