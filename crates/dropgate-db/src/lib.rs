//! Dropgate Database Library
//!
//! Postgres repositories for the metadata and accounting sinks. Both sinks
//! are trait-abstracted so the API crate can swap in in-memory doubles for
//! tests; each trait has exactly one production implementation backed by a
//! `PgPool`.

pub mod telemetry;
pub mod uploads;

// Re-export commonly used types
pub use telemetry::{TelemetryRepository, TelemetrySink};
pub use uploads::{UploadRepository, UploadStore};
