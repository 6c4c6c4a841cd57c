//! Dropgate API Library
//!
//! This crate provides the HTTP handlers, authorization gate, and application
//! setup for the file-drop gateway.

pub mod auth;
pub mod constants;
pub mod handlers;
pub mod response;
pub mod setup;
pub mod state;
pub mod telemetry;

// Re-exports
pub use response::{ApiError, ApiResponse};
pub use state::AppState;
