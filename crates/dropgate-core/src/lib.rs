//! Dropgate Core Library
//!
//! This crate provides the domain models, error types, configuration, and
//! expiry arithmetic shared across all dropgate components.

pub mod config;
pub mod constants;
pub mod error;
pub mod expiry;
pub mod models;
pub mod storage_types;

// Re-export commonly used types
pub use config::Config;
pub use error::AppError;
pub use models::{AuthorizationOutcome, ProjectRef, ProjectSelector, UploadDataPoint, UploadRecord};
pub use storage_types::StorageBackend;
