//! In-memory stand-ins for the object store, record store and downstream function.

use async_trait::async_trait;
use filedrop_core::models::{NotificationPayload, UploadRecord};
use filedrop_core::AppError;
use filedrop_services::{Notifier, RecordStore, Storage, StorageBackend, StorageError, StorageResult};
use std::collections::HashMap;
use std::sync::atomic::{AtomicU32, Ordering};
use std::sync::Mutex;

#[derive(Debug, Clone)]
pub struct StoredObject {
    pub data: Vec<u8>,
    pub content_type: String,
}

/// Object store fake. Keys are recorded in upload order.
///
/// The first `failures` uploads fail; a stalled store never completes an upload.
#[derive(Default)]
pub struct MemoryStorage {
    objects: Mutex<HashMap<String, StoredObject>>,
    keys: Mutex<Vec<String>>,
    uploads_attempted: AtomicU32,
    failures: u32,
    stalled: bool,
}

impl MemoryStorage {
    pub fn failing() -> Self {
        Self::failing_first(u32::MAX)
    }

    pub fn failing_first(failures: u32) -> Self {
        Self {
            failures,
            ..Self::default()
        }
    }

    pub fn stalled() -> Self {
        Self {
            stalled: true,
            ..Self::default()
        }
    }

    pub fn url_for(key: &str) -> String {
        format!("https://test-bucket.s3.amazonaws.com/{}", key)
    }

    pub fn keys(&self) -> Vec<String> {
        self.keys.lock().unwrap().clone()
    }

    pub fn object(&self, key: &str) -> Option<StoredObject> {
        self.objects.lock().unwrap().get(key).cloned()
    }

    pub fn uploads_attempted(&self) -> u32 {
        self.uploads_attempted.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl Storage for MemoryStorage {
    async fn upload(
        &self,
        storage_key: &str,
        data: Vec<u8>,
        content_type: &str,
    ) -> StorageResult<String> {
        let attempt = self.uploads_attempted.fetch_add(1, Ordering::SeqCst) + 1;
        if self.stalled {
            std::future::pending::<()>().await;
        }
        if attempt <= self.failures {
            return Err(StorageError::UploadFailed(
                "AccessDenied: bucket policy rejects PutObject".to_string(),
            ));
        }
        self.objects.lock().unwrap().insert(
            storage_key.to_string(),
            StoredObject {
                data,
                content_type: content_type.to_string(),
            },
        );
        self.keys.lock().unwrap().push(storage_key.to_string());
        Ok(Self::url_for(storage_key))
    }

    fn backend_type(&self) -> StorageBackend {
        StorageBackend::S3
    }
}

/// Record store fake. The first `failures` attempts fail.
#[derive(Default)]
pub struct RecordingRecordStore {
    records: Mutex<Vec<UploadRecord>>,
    attempts: AtomicU32,
    failures: u32,
}

impl RecordingRecordStore {
    pub fn failing_first(failures: u32) -> Self {
        Self {
            failures,
            ..Self::default()
        }
    }

    pub fn records(&self) -> Vec<UploadRecord> {
        self.records.lock().unwrap().clone()
    }

    pub fn attempts(&self) -> u32 {
        self.attempts.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl RecordStore for RecordingRecordStore {
    async fn put_upload_record(&self, record: &UploadRecord) -> Result<(), AppError> {
        let attempt = self.attempts.fetch_add(1, Ordering::SeqCst) + 1;
        if attempt <= self.failures {
            return Err(AppError::RecordStore(
                "ProvisionedThroughputExceededException".to_string(),
            ));
        }
        self.records.lock().unwrap().push(record.clone());
        Ok(())
    }
}

/// Downstream function fake. The first `failures` invocations fail.
#[derive(Default)]
pub struct RecordingNotifier {
    payloads: Mutex<Vec<NotificationPayload>>,
    attempts: AtomicU32,
    failures: u32,
}

impl RecordingNotifier {
    pub fn failing_first(failures: u32) -> Self {
        Self {
            failures,
            ..Self::default()
        }
    }

    pub fn payloads(&self) -> Vec<NotificationPayload> {
        self.payloads.lock().unwrap().clone()
    }

    pub fn attempts(&self) -> u32 {
        self.attempts.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl Notifier for RecordingNotifier {
    async fn notify_upload(&self, payload: &NotificationPayload) -> Result<(), AppError> {
        let attempt = self.attempts.fetch_add(1, Ordering::SeqCst) + 1;
        if attempt <= self.failures {
            return Err(AppError::Notification(
                "ResourceNotFoundException: function not found".to_string(),
            ));
        }
        self.payloads.lock().unwrap().push(payload.clone());
        Ok(())
    }
}
