//! Shared key validation for storage backends.

use crate::traits::{StorageError, StorageResult};

/// Reject keys that could address something outside the bucket or storage root.
pub fn validate_storage_key(storage_key: &str) -> StorageResult<()> {
    if storage_key.is_empty() || storage_key.starts_with('/') || storage_key.contains('\\') {
        return Err(StorageError::InvalidKey(storage_key.to_string()));
    }

    if storage_key
        .split('/')
        .any(|segment| segment.is_empty() || segment == "." || segment == "..")
    {
        return Err(StorageError::InvalidKey(storage_key.to_string()));
    }

    Ok(())
}
