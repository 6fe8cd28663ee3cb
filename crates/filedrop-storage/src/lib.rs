//! Filedrop Storage Library
//!
//! This crate provides the object storage abstraction used by the upload handler, with an
//! S3 implementation for production and a local filesystem implementation for development
//! and tests.
//!
//! # Storage key format
//!
//! Keys are flat `{uuid}_{filename}` strings produced by `filedrop_core::keys`. Backends
//! reject keys with a leading `/`, empty segments, or `.`/`..` segments (see [`keys`]).

pub mod factory;
pub(crate) mod keys;
#[cfg(feature = "storage-local")]
pub mod local;
#[cfg(feature = "storage-s3")]
pub mod s3;
pub mod traits;

// Re-export commonly used types
pub use factory::create_storage;
pub use filedrop_core::StorageBackend;
#[cfg(feature = "storage-local")]
pub use local::LocalStorage;
#[cfg(feature = "storage-s3")]
pub use s3::S3Storage;
pub use traits::{Storage, StorageError, StorageResult};
