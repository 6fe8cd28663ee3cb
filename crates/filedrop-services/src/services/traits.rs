use async_trait::async_trait;
use filedrop_core::models::{NotificationPayload, UploadRecord};
use filedrop_core::AppError;

/// Document store holding one record per stored upload.
#[async_trait]
pub trait RecordStore: Send + Sync {
    /// Upsert the record keyed by its `fileID`.
    async fn put_upload_record(&self, record: &UploadRecord) -> Result<(), AppError>;
}

/// Asynchronous trigger for the downstream function that processes an upload.
#[async_trait]
pub trait Notifier: Send + Sync {
    /// Dispatch the payload without waiting for the function to run.
    async fn notify_upload(&self, payload: &NotificationPayload) -> Result<(), AppError>;
}
