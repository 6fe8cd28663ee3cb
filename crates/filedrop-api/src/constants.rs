/// Route that serves the upload form.
pub const FORM_PATH: &str = "/";

/// Route that accepts the multipart submission.
pub const UPLOAD_PATH: &str = "/upload";

/// Liveness check route.
pub const HEALTH_PATH: &str = "/health";

/// Multipart field carrying the file.
pub const FILE_FIELD: &str = "file";

/// Prefix of the optional recipient fields (`email1` ..= `email5`).
pub const EMAIL_FIELD_PREFIX: &str = "email";
