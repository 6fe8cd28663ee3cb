//! Upload orchestration: store the spooled file, then schedule the follow-ups.

use crate::state::AppState;
use crate::utils::temp_file::SpooledFile;
use crate::utils::upload::UploadForm;
use filedrop_core::models::{NotificationPayload, UploadRecord};
use filedrop_core::{generate_file_id, AppError, FileId};
use std::sync::Arc;

/// Outcome of a stored upload.
#[derive(Debug, Clone)]
pub struct StoredUpload {
    pub file_id: FileId,
    pub file_url: String,
}

pub struct UploadService {
    state: Arc<AppState>,
}

impl UploadService {
    pub fn new(state: &Arc<AppState>) -> Self {
        Self {
            state: state.clone(),
        }
    }

    /// Store the file under a fresh key.
    ///
    /// Returns once the object is stored. The record write, the downstream invocation and the
    /// temp-file release run afterwards and never change the outcome. If this future is
    /// dropped before then, the spooled file is removed with it.
    #[tracing::instrument(skip(self, form), fields(original_filename = ?form.file.original_filename()))]
    pub async fn process(&self, form: UploadForm) -> Result<StoredUpload, AppError> {
        let UploadForm { file, emails } = form;

        let data = match tokio::fs::read(file.path()).await {
            Ok(data) => data,
            Err(e) => {
                file.release().await;
                return Err(AppError::InternalWithSource {
                    message: "Failed to read spooled upload".to_string(),
                    source: e.into(),
                });
            }
        };

        let file_id = generate_file_id(file.original_filename());

        let file_url = match self
            .state
            .storage
            .upload(file_id.as_str(), data, file.content_type())
            .await
        {
            Ok(url) => url,
            Err(e) => {
                tracing::error!(
                    error = %e,
                    file_id = %file_id,
                    backend = %self.state.storage.backend_type(),
                    "Failed to store upload"
                );
                file.release().await;
                return Err(e.into());
            }
        };

        tracing::info!(
            file_id = %file_id,
            file_url = %file_url,
            size = file.size(),
            recipients = emails.len(),
            "Upload stored"
        );

        self.schedule_follow_ups(&file_id, emails, &file_url);
        self.schedule_release(file);

        Ok(StoredUpload { file_id, file_url })
    }

    fn schedule_follow_ups(&self, file_id: &FileId, emails: Vec<String>, file_url: &str) {
        let follow_ups = &self.state.follow_ups;

        let records = self.state.records.clone();
        let record = UploadRecord::new(file_id.clone(), emails.clone(), file_url.to_string());
        follow_ups.spawn_with_retry("record_upload", file_id.clone(), move || {
            let records = records.clone();
            let record = record.clone();
            async move { records.put_upload_record(&record).await }
        });

        let notifier = self.state.notifier.clone();
        let payload = NotificationPayload::new(file_id.clone(), emails, file_url.to_string());
        // Event invocations are not retried: a failed call may still have queued the event.
        follow_ups.spawn_once("notify_upload", file_id.clone(), move || {
            let notifier = notifier.clone();
            let payload = payload.clone();
            async move { notifier.notify_upload(&payload).await }
        });
    }

    fn schedule_release(&self, file: SpooledFile) {
        self.state.follow_ups.spawn(file.release());
    }
}
