use crate::error::HttpAppError;
use crate::services::upload::UploadService;
use crate::state::AppState;
use crate::utils::upload::extract_upload_form;
use crate::views;
use axum::extract::{Multipart, State};
use axum::response::Html;
use std::sync::Arc;

#[tracing::instrument(skip(state, multipart))]
pub async fn upload_file(
    State(state): State<Arc<AppState>>,
    multipart: Multipart,
) -> Result<Html<String>, HttpAppError> {
    let form = extract_upload_form(multipart, &state.uploads.tmp_dir).await?;

    let stored = UploadService::new(&state).process(form).await?;
    tracing::debug!(file_id = %stored.file_id, file_url = %stored.file_url, "Upload accepted");

    Ok(Html(views::upload_success(&stored).into_string()))
}
