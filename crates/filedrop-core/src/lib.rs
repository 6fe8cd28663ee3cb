//! Filedrop Core Library
//!
//! This crate provides the domain models, error types, configuration and storage key
//! generation shared by all filedrop components.

pub mod config;
pub mod error;
pub mod keys;
pub mod models;
pub mod storage_types;

// Re-export commonly used types
pub use config::{BaseConfig, Config, UploadServiceConfig};
pub use error::{AppError, ErrorMetadata, LogLevel};
pub use keys::{generate_file_id, sanitize_filename, FileId};
pub use storage_types::StorageBackend;
