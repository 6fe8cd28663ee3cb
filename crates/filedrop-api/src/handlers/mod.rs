pub mod health;
pub mod upload;
pub mod upload_form;
