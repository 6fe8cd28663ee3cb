use crate::views;
use axum::response::Html;

pub async fn upload_form() -> Html<String> {
    Html(views::upload_form().into_string())
}
