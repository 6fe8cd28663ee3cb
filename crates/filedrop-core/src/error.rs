//! Error types module
//!
//! All failures that can reach the HTTP boundary or the follow-up runner are unified
//! under [`AppError`]. Each variant describes its own HTTP presentation through
//! [`ErrorMetadata`].

use std::io;

/// Log level for error reporting
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LogLevel {
    /// Debug level - for expected errors like validation failures
    Debug,
    /// Warning level - for recoverable issues like resource limits
    Warn,
    /// Error level - for unexpected failures
    Error,
}

/// Metadata for error responses - defines how an error should be presented
pub trait ErrorMetadata {
    /// HTTP status code to return
    fn http_status_code(&self) -> u16;

    /// Client-facing message (may differ from internal error message)
    fn client_message(&self) -> String;

    /// Log level for this error
    fn log_level(&self) -> LogLevel;
}

/// Message shown to the uploader whenever the object storage write fails.
pub const UPLOAD_FAILED_MESSAGE: &str = "Error uploading file";

#[derive(Debug, thiserror::Error)]
pub enum AppError {
    #[error("Invalid input: {0}")]
    InvalidInput(String),

    #[error("File too large: {0}")]
    PayloadTooLarge(String),

    #[error("Storage error: {0}")]
    Storage(String),

    #[error("Record store error: {0}")]
    RecordStore(String),

    #[error("Notification error: {0}")]
    Notification(String),

    #[error("Internal error: {0}")]
    Internal(String),

    #[error("Internal error with source")]
    InternalWithSource {
        message: String,
        #[source]
        source: anyhow::Error,
    },
}

impl From<anyhow::Error> for AppError {
    fn from(err: anyhow::Error) -> Self {
        AppError::InternalWithSource {
            message: err.to_string(),
            source: err,
        }
    }
}

impl From<io::Error> for AppError {
    fn from(err: io::Error) -> Self {
        AppError::Internal(format!("IO error: {}", err))
    }
}

/// Static metadata for each variant: (http_status, log_level).
fn app_error_static_metadata(err: &AppError) -> (u16, LogLevel) {
    match err {
        AppError::InvalidInput(_) => (400, LogLevel::Debug),
        AppError::PayloadTooLarge(_) => (413, LogLevel::Debug),
        AppError::Storage(_)
        | AppError::RecordStore(_)
        | AppError::Notification(_)
        | AppError::Internal(_)
        | AppError::InternalWithSource { .. } => (500, LogLevel::Error),
    }
}

impl AppError {
    /// Get the error type name for log fields
    pub fn error_type(&self) -> &str {
        match self {
            AppError::InvalidInput(_) => "InvalidInput",
            AppError::PayloadTooLarge(_) => "PayloadTooLarge",
            AppError::Storage(_) => "Storage",
            AppError::RecordStore(_) => "RecordStore",
            AppError::Notification(_) => "Notification",
            AppError::Internal(_) => "Internal",
            AppError::InternalWithSource { .. } => "Internal",
        }
    }

    /// Get detailed error information including error chain
    pub fn detailed_message(&self) -> String {
        use std::error::Error;

        let mut details = self.to_string();

        let mut source = self.source();
        let mut depth = 0;
        while let Some(err) = source {
            depth += 1;
            if depth > 5 {
                details.push_str("\n  ... (truncated)");
                break;
            }
            details.push_str(&format!("\n  Caused by: {}", err));
            source = err.source();
        }

        details
    }
}

impl ErrorMetadata for AppError {
    fn http_status_code(&self) -> u16 {
        app_error_static_metadata(self).0
    }

    fn log_level(&self) -> LogLevel {
        app_error_static_metadata(self).1
    }

    fn client_message(&self) -> String {
        match self {
            AppError::InvalidInput(ref msg) => msg.clone(),
            AppError::PayloadTooLarge(ref msg) => msg.clone(),
            // Uploaders get one generic string, whatever the backend said.
            AppError::Storage(_) => UPLOAD_FAILED_MESSAGE.to_string(),
            AppError::RecordStore(_)
            | AppError::Notification(_)
            | AppError::Internal(_)
            | AppError::InternalWithSource { .. } => "Internal server error".to_string(),
        }
    }
}
