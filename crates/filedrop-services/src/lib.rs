//! Filedrop Services Layer
//!
//! Clients for the managed services an upload fans out to after it is stored: the record
//! store (DynamoDB) and the downstream function (Lambda). Both sit behind traits so the API
//! crate can be exercised with in-memory fakes. Storage types are re-exported so the API
//! crate depends on a single service facade.

pub mod services;

pub use filedrop_storage::{
    create_storage, Storage, StorageBackend, StorageError, StorageResult,
};
#[cfg(feature = "storage-local")]
pub use filedrop_storage::LocalStorage;
#[cfg(feature = "storage-s3")]
pub use filedrop_storage::S3Storage;
#[cfg(any(feature = "dynamodb", feature = "lambda"))]
pub use services::aws::load_sdk_config;
#[cfg(feature = "dynamodb")]
pub use services::dynamodb::DynamoRecordStore;
#[cfg(feature = "lambda")]
pub use services::lambda::LambdaNotifier;
pub use services::traits::{Notifier, RecordStore};
