//! Dropgate Storage Library
//!
//! This crate provides the storage abstraction and backend implementations
//! for uploaded objects. It includes the `Storage` trait plus S3-compatible
//! and local filesystem backends.
//!
//! # Object key format
//!
//! Keys are `{ttl_days}{token}` where the token is 64 bytes of CSPRNG output
//! in URL-safe base64 without padding. The leading TTL digit lets a lifecycle
//! rule on the bucket expire objects without a metadata lookup; the gateway
//! itself never deletes anything. Key generation is centralized in the `keys`
//! module so all backends stay consistent.

pub mod factory;
pub mod keys;
#[cfg(feature = "storage-local")]
pub mod local;
#[cfg(feature = "storage-s3")]
pub mod s3;
pub mod traits;

// Re-export commonly used types
pub use dropgate_core::StorageBackend;
pub use factory::create_storage;
pub use keys::generate_object_key;
#[cfg(feature = "storage-local")]
pub use local::LocalStorage;
#[cfg(feature = "storage-s3")]
pub use s3::S3Storage;
pub use traits::{ObjectMetadata, Storage, StorageError, StorageResult};
