//! Spooled temporary files.
//!
//! A [`SpooledFile`] owns its [`TempPath`]: the file is removed when the value is dropped,
//! including when the request future is cancelled mid-upload.

use std::io;
use std::path::Path;
use tempfile::TempPath;

/// A multipart file part written to the upload temp directory.
#[derive(Debug)]
pub struct SpooledFile {
    temp_path: TempPath,
    original_filename: Option<String>,
    content_type: String,
    size: u64,
}

impl SpooledFile {
    pub fn new(
        temp_path: TempPath,
        original_filename: Option<String>,
        content_type: String,
        size: u64,
    ) -> Self {
        Self {
            temp_path,
            original_filename,
            content_type,
            size,
        }
    }

    pub fn path(&self) -> &Path {
        &self.temp_path
    }

    /// Filename as sent by the browser, if any.
    pub fn original_filename(&self) -> Option<&str> {
        self.original_filename.as_deref()
    }

    pub fn content_type(&self) -> &str {
        &self.content_type
    }

    pub fn size(&self) -> u64 {
        self.size
    }

    /// True for the part a browser sends when no file was selected.
    pub fn is_empty_selection(&self) -> bool {
        self.size == 0
            && self
                .original_filename
                .as_deref()
                .map_or(true, |name| name.trim().is_empty())
    }

    /// Remove the spooled file now, off the runtime threads, logging any failure.
    pub async fn release(self) {
        release_logged(self.temp_path).await;
    }
}

/// Remove the file behind `temp_path` if it still exists. Returns whether a file was removed.
pub async fn release_if_present(temp_path: TempPath) -> io::Result<bool> {
    let closed = tokio::task::spawn_blocking(move || temp_path.close())
        .await
        .map_err(io::Error::other)?;

    match closed {
        Ok(()) => Ok(true),
        Err(e) if e.kind() == io::ErrorKind::NotFound => Ok(false),
        Err(e) => Err(e),
    }
}

/// [`release_if_present`], logging instead of failing.
async fn release_logged(temp_path: TempPath) {
    let path = temp_path.to_path_buf();
    match release_if_present(temp_path).await {
        Ok(true) => tracing::debug!(path = %path.display(), "Temporary upload released"),
        Ok(false) => {}
        Err(e) => {
            tracing::warn!(error = %e, path = %path.display(), "Failed to release temporary upload")
        }
    }
}
