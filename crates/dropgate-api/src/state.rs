//! Application state shared by the handlers.

use crate::auth::AuthorizationGate;
use dropgate_core::Config;
use dropgate_db::{TelemetrySink, UploadStore};
use dropgate_storage::Storage;
use std::sync::Arc;

/// Main application state.
///
/// Collaborators are held as trait objects so tests can substitute in-memory
/// doubles for the storage backend and both database sinks.
#[derive(Clone)]
pub struct AppState {
    pub config: Config,
    pub storage: Arc<dyn Storage>,
    pub uploads: Arc<dyn UploadStore>,
    pub telemetry: Arc<dyn TelemetrySink>,
    pub authz: AuthorizationGate,
}

fn _assert_app_state_send_sync() {
    fn assert_send<T: Send>() {}
    fn assert_sync<T: Sync>() {}
    assert_send::<AppState>();
    assert_sync::<AppState>();
}
