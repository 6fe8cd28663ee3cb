//! Domain models for the upload pipeline.

pub mod upload;

pub use upload::{collect_emails, NotificationPayload, UploadRecord, EMAIL_FIELD_COUNT};
