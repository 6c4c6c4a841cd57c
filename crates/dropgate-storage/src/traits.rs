//! Storage abstraction trait
//!
//! This module defines the Storage trait that all storage backends must implement.

use async_trait::async_trait;
use bytes::Bytes;
use dropgate_core::StorageBackend;
use thiserror::Error;

/// Storage operation errors
#[derive(Debug, Error)]
pub enum StorageError {
    #[error("Upload failed: {0}")]
    UploadFailed(String),

    #[error("Invalid storage key: {0}")]
    InvalidKey(String),

    #[error("Storage backend error: {0}")]
    BackendError(String),

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("Configuration error: {0}")]
    ConfigError(String),
}

/// Result type for storage operations
pub type StorageResult<T> = Result<T, StorageError>;

/// HTTP-facing metadata attached to a stored object.
///
/// The download path is served straight from the backend, so whatever is set
/// here is what clients eventually see as response headers.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ObjectMetadata {
    pub cache_control: String,
    pub content_disposition: Option<String>,
}

/// Storage abstraction trait
///
/// All storage backends (S3-compatible, local filesystem) must implement this
/// trait. Object expiry is delegated to the backend's own lifecycle mechanism
/// keyed on the key's TTL prefix; there is deliberately no delete operation.
#[async_trait]
pub trait Storage: Send + Sync {
    /// Commit an object under `object_key` with the given metadata.
    async fn put(
        &self,
        object_key: &str,
        data: Bytes,
        metadata: &ObjectMetadata,
    ) -> StorageResult<()>;

    /// Get the storage backend type
    fn backend_type(&self) -> StorageBackend;
}
