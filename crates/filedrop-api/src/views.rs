//! Server-rendered pages.

use crate::constants::{EMAIL_FIELD_PREFIX, FILE_FIELD, FORM_PATH, UPLOAD_PATH};
use crate::services::upload::StoredUpload;
use filedrop_core::models::EMAIL_FIELD_COUNT;
use maud::{html, Markup, DOCTYPE};

fn layout(title: &str, content: Markup) -> Markup {
    html! {
        (DOCTYPE)
        html lang="en" {
            head {
                meta charset="utf-8";
                meta name="viewport" content="width=device-width, initial-scale=1";
                title { (title) }
                link rel="stylesheet" href="/style.css";
            }
            body {
                main { (content) }
            }
        }
    }
}

/// One file input and the optional recipient inputs, posting to the upload route.
pub fn upload_form() -> Markup {
    layout(
        "Upload a file",
        html! {
            h1 { "Upload a file" }
            form method="post" action=(UPLOAD_PATH) enctype="multipart/form-data" {
                div class="field" {
                    label for=(FILE_FIELD) { "File" }
                    input type="file" id=(FILE_FIELD) name=(FILE_FIELD) required;
                }
                @for i in 1..=EMAIL_FIELD_COUNT {
                    @let name = format!("{}{}", EMAIL_FIELD_PREFIX, i);
                    div class="field" {
                        label for=(name) { "Email " (i) }
                        input type="email" id=(name) name=(name) placeholder="someone@example.com";
                    }
                }
                button type="submit" { "Upload" }
            }
        },
    )
}

pub fn upload_success(upload: &StoredUpload) -> Markup {
    layout(
        "Upload complete",
        html! {
            h1 { "Upload complete" }
            p { "Your file was stored as " code { (upload.file_id) } "." }
            p { a href=(FORM_PATH) { "Upload another file" } }
        },
    )
}
