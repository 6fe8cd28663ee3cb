//! Filedrop API Library
//!
//! This crate provides the HTTP handlers, HTML views and application setup for the upload
//! service.

// Module declarations
pub mod constants;
mod handlers;
mod services;
pub mod setup;
mod telemetry;
mod utils;
mod views;

// Public modules
pub mod error;
pub mod state;

// Re-exports
pub use error::HttpAppError;
pub use state::{AppState, UploadSettings};
