use crate::keys::validate_storage_key;
use crate::traits::{Storage, StorageError, StorageResult};
use crate::StorageBackend;
use async_trait::async_trait;
use std::path::PathBuf;
use tokio::fs;
use tokio::io::AsyncWriteExt;

/// Local filesystem storage implementation
#[derive(Clone)]
pub struct LocalStorage {
    base_path: PathBuf,
    base_url: String,
}

impl LocalStorage {
    /// Create a new LocalStorage instance
    ///
    /// # Arguments
    /// * `base_path` - Root directory for file storage (e.g., "/var/lib/filedrop/objects")
    /// * `base_url` - Base URL the objects are served from (e.g., "http://localhost:3000/files")
    pub async fn new(base_path: impl Into<PathBuf>, base_url: String) -> StorageResult<Self> {
        let base_path = base_path.into();

        fs::create_dir_all(&base_path).await.map_err(|e| {
            StorageError::ConfigError(format!(
                "Failed to create storage directory {}: {}",
                base_path.display(),
                e
            ))
        })?;

        Ok(LocalStorage {
            base_path,
            base_url,
        })
    }

    fn key_to_path(&self, storage_key: &str) -> StorageResult<PathBuf> {
        validate_storage_key(storage_key)?;
        Ok(self.base_path.join(storage_key))
    }

    /// Generate public URL for file
    fn generate_url(&self, key: &str) -> String {
        format!("{}/{}", self.base_url.trim_end_matches('/'), key)
    }
}

#[async_trait]
impl Storage for LocalStorage {
    async fn upload(
        &self,
        storage_key: &str,
        data: Vec<u8>,
        _content_type: &str,
    ) -> StorageResult<String> {
        let path = self.key_to_path(storage_key)?;
        let size = data.len();
        let start = std::time::Instant::now();

        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).await?;
        }

        let mut file = fs::File::create(&path).await.map_err(|e| {
            StorageError::UploadFailed(format!("Failed to create file {}: {}", path.display(), e))
        })?;

        file.write_all(&data).await.map_err(|e| {
            StorageError::UploadFailed(format!("Failed to write file {}: {}", path.display(), e))
        })?;

        file.sync_all().await.map_err(|e| {
            StorageError::UploadFailed(format!("Failed to sync file {}: {}", path.display(), e))
        })?;

        let url = self.generate_url(storage_key);

        tracing::info!(
            path = %path.display(),
            key = %storage_key,
            size_bytes = size,
            duration_ms = start.elapsed().as_secs_f64() * 1000.0,
            "Local storage upload successful"
        );

        Ok(url)
    }

    fn backend_type(&self) -> StorageBackend {
        StorageBackend::Local
    }
}

#[cfg(all(test, feature = "storage-local"))]
mod tests {
    use super::*;
    use tempfile::tempdir;

    async fn storage_in(dir: &std::path::Path) -> LocalStorage {
        LocalStorage::new(dir, "http://localhost:3000/files".to_string())
            .await
            .unwrap()
    }

    #[tokio::test]
    async fn test_local_storage_upload_returns_url() {
        let dir = tempdir().unwrap();
        let storage = storage_in(dir.path()).await;

        let url = storage
            .upload("abc_test.txt", b"test data".to_vec(), "text/plain")
            .await
            .unwrap();

        assert_eq!(url, "http://localhost:3000/files/abc_test.txt");
        let on_disk = tokio::fs::read(dir.path().join("abc_test.txt")).await.unwrap();
        assert_eq!(on_disk, b"test data");
    }

    #[tokio::test]
    async fn test_path_traversal_rejected() {
        let dir = tempdir().unwrap();
        let storage = storage_in(dir.path()).await;

        let result = storage.upload("../escape.txt", vec![1], "text/plain").await;
        assert!(matches!(result, Err(StorageError::InvalidKey(_))));

        let result = storage.upload("/etc/passwd", vec![1], "text/plain").await;
        assert!(matches!(result, Err(StorageError::InvalidKey(_))));
    }

    #[tokio::test]
    async fn test_local_storage_overwrites_same_key() {
        let dir = tempdir().unwrap();
        let storage = storage_in(dir.path()).await;

        storage
            .upload("nested/same.txt", b"first".to_vec(), "text/plain")
            .await
            .unwrap();
        storage
            .upload("nested/same.txt", b"second".to_vec(), "text/plain")
            .await
            .unwrap();

        let on_disk = tokio::fs::read(dir.path().join("nested/same.txt")).await.unwrap();
        assert_eq!(on_disk, b"second");
    }
}
