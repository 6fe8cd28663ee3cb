use crate::constants::{EMAIL_FIELD_PREFIX, FILE_FIELD};
use crate::utils::temp_file::SpooledFile;
use axum::extract::multipart::{Field, MultipartError};
use axum::extract::Multipart;
use axum::http::StatusCode;
use filedrop_core::models::collect_emails;
use filedrop_core::AppError;
use std::collections::HashMap;
use std::path::Path;
use tokio::io::AsyncWriteExt;

/// A parsed upload submission: the spooled file plus the non-blank recipient addresses.
#[derive(Debug)]
pub struct UploadForm {
    pub file: SpooledFile,
    pub emails: Vec<String>,
}

fn multipart_error(err: MultipartError) -> AppError {
    if err.status() == StatusCode::PAYLOAD_TOO_LARGE {
        AppError::PayloadTooLarge(err.body_text())
    } else {
        AppError::InvalidInput(format!("Failed to read multipart: {}", err.body_text()))
    }
}

/// Read the multipart body, spooling the `file` part to `tmp_dir`.
///
/// Nothing is left behind in `tmp_dir` when this returns an error or is cancelled.
pub async fn extract_upload_form(
    mut multipart: Multipart,
    tmp_dir: &Path,
) -> Result<UploadForm, AppError> {
    let mut spooled: Option<SpooledFile> = None;
    let mut text_fields: HashMap<String, String> = HashMap::new();

    read_parts(&mut multipart, tmp_dir, &mut spooled, &mut text_fields).await?;

    let file = spooled.ok_or_else(|| AppError::InvalidInput("No file provided".to_string()))?;
    let emails = collect_emails(|name| text_fields.get(name).map(String::as_str));

    tracing::debug!(
        original_filename = ?file.original_filename(),
        content_type = %file.content_type(),
        size = file.size(),
        email_count = emails.len(),
        "Upload form extracted"
    );

    Ok(UploadForm { file, emails })
}

async fn read_parts(
    multipart: &mut Multipart,
    tmp_dir: &Path,
    spooled: &mut Option<SpooledFile>,
    text_fields: &mut HashMap<String, String>,
) -> Result<(), AppError> {
    while let Some(field) = multipart.next_field().await.map_err(multipart_error)? {
        let name = field.name().unwrap_or_default().to_string();

        if name == FILE_FIELD {
            let file = spool_field(field, tmp_dir).await?;
            if file.is_empty_selection() {
                file.release().await;
                continue;
            }
            if spooled.is_some() {
                file.release().await;
                return Err(AppError::InvalidInput(
                    "Only one file may be uploaded".to_string(),
                ));
            }
            *spooled = Some(file);
        } else if name.starts_with(EMAIL_FIELD_PREFIX) {
            let value = field.text().await.map_err(multipart_error)?;
            text_fields.insert(name, value);
        } else {
            tracing::debug!(field = %name, "Ignoring unexpected form field");
        }
    }
    Ok(())
}

/// Stream a file part to a fresh temp file in `tmp_dir`.
async fn spool_field(mut field: Field<'_>, tmp_dir: &Path) -> Result<SpooledFile, AppError> {
    let original_filename = field.file_name().map(|s| s.to_string());
    let content_type = field
        .content_type()
        .map(|s| s.to_string())
        .unwrap_or_else(|| "application/octet-stream".to_string());

    let dir = tmp_dir.to_path_buf();
    let named = tokio::task::spawn_blocking(move || {
        tempfile::Builder::new().prefix("upload-").tempfile_in(dir)
    })
    .await
    .map_err(|e| AppError::Internal(format!("Failed to create temp file: {}", e)))??;

    // The path guard is held from here on, so an error or cancellation removes the file.
    let (file, temp_path) = named.into_parts();
    let mut out = tokio::fs::File::from_std(file);
    let mut size: u64 = 0;

    while let Some(chunk) = field.chunk().await.map_err(multipart_error)? {
        size += chunk.len() as u64;
        out.write_all(&chunk).await?;
    }
    out.flush().await?;

    Ok(SpooledFile::new(temp_path, original_filename, content_type, size))
}
