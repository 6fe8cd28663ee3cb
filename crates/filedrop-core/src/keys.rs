//! Storage key generation.
//!
//! Key format: `{uuid}_{filename}`, where `filename` is the client-supplied name reduced to
//! a safe character set. The same value is the object key, the record key and the
//! `filename` sent downstream, so it is wrapped in [`FileId`] and never rebuilt.

use serde::{Deserialize, Serialize};
use std::fmt::{Display, Formatter, Result as FmtResult};
use uuid::Uuid;

const MAX_FILENAME_LENGTH: usize = 255;
const FALLBACK_FILENAME: &str = "file";

/// Unique identifier of one upload.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct FileId(String);

impl FileId {
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl Display for FileId {
    fn fmt(&self, f: &mut Formatter<'_>) -> FmtResult {
        f.write_str(&self.0)
    }
}

impl AsRef<str> for FileId {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

/// Generate a fresh file id for the given client filename.
pub fn generate_file_id(original_filename: Option<&str>) -> FileId {
    let filename = sanitize_filename(original_filename.unwrap_or(""));
    FileId(format!("{}_{}", Uuid::new_v4(), filename))
}

/// Reduce an untrusted filename to its last path component over `[A-Za-z0-9._-]`.
///
/// Other characters become `_`. Empty or dot-only results fall back to `"file"`.
pub fn sanitize_filename(filename: &str) -> String {
    let last_component = filename
        .rsplit(['/', '\\'])
        .next()
        .unwrap_or(filename);

    let sanitized: String = last_component
        .chars()
        .take(MAX_FILENAME_LENGTH)
        .map(|c| {
            if c.is_ascii_alphanumeric() || c == '.' || c == '-' || c == '_' {
                c
            } else {
                '_'
            }
        })
        .collect();

    if sanitized.chars().all(|c| c == '.') {
        FALLBACK_FILENAME.to_string()
    } else {
        sanitized
    }
}
