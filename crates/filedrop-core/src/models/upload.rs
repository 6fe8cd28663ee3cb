use chrono::{DateTime, SecondsFormat, Utc};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use crate::keys::FileId;

/// Number of optional `emailN` form fields (`email1` ..= `email5`).
pub const EMAIL_FIELD_COUNT: usize = 5;

/// Metadata persisted once per successful upload.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct UploadRecord {
    #[serde(rename = "fileID")]
    pub file_id: FileId,
    pub emails: Vec<String>,
    #[serde(rename = "fileURL")]
    pub file_url: String,
    /// ISO-8601 UTC timestamp with millisecond precision.
    #[serde(rename = "uploadedAt")]
    pub uploaded_at: String,
    /// Reserved for the downstream system; always empty here.
    pub clicks: Map<String, Value>,
}

impl UploadRecord {
    pub fn new(file_id: FileId, emails: Vec<String>, file_url: String) -> Self {
        Self::at(file_id, emails, file_url, Utc::now())
    }

    pub fn at(
        file_id: FileId,
        emails: Vec<String>,
        file_url: String,
        uploaded_at: DateTime<Utc>,
    ) -> Self {
        Self {
            file_id,
            emails,
            file_url,
            uploaded_at: uploaded_at.to_rfc3339_opts(SecondsFormat::Millis, true),
            clicks: Map::new(),
        }
    }
}

/// Body of the asynchronous downstream invocation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NotificationPayload {
    pub filename: FileId,
    pub emails: Vec<String>,
    #[serde(rename = "fileURL")]
    pub file_url: String,
}

impl NotificationPayload {
    pub fn new(filename: FileId, emails: Vec<String>, file_url: String) -> Self {
        Self {
            filename,
            emails,
            file_url,
        }
    }
}

/// Collect `email1` ..= `email5` in field order, skipping absent or blank values.
///
/// `field` looks up a form value by name. Surrounding whitespace is stripped from every
/// value, so a whitespace-only field counts as empty and `" a@x.com "` is stored as
/// `"a@x.com"`. This is stricter than a plain non-empty check, which would keep both
/// unchanged. Addresses are not validated.
pub fn collect_emails<'a, F>(field: F) -> Vec<String>
where
    F: Fn(&str) -> Option<&'a str>,
{
    (1..=EMAIL_FIELD_COUNT)
        .filter_map(|i| field(&format!("email{}", i)))
        .map(str::trim)
        .filter(|email| !email.is_empty())
        .map(String::from)
        .collect()
}
