//! Application bootstrap: database pool, storage backend, authorization gate,
//! and router wiring.

pub mod database;
pub mod routes;
pub mod server;

use crate::auth::{AuthApiClient, AuthCache, AuthorizationGate};
use crate::state::AppState;
use anyhow::Result;
use axum::Router;
use dropgate_core::Config;
use dropgate_db::{TelemetryRepository, TelemetrySink, UploadRepository, UploadStore};
use dropgate_storage::create_storage;
use std::sync::Arc;
use std::time::Duration;

/// Initialize all services and build the router.
pub async fn initialize_app(config: Config) -> Result<(Arc<AppState>, Router)> {
    let pool = database::setup_database(&config).await?;

    let storage = create_storage(&config).await?;
    tracing::info!(backend = %storage.backend_type(), "Storage backend ready");

    let uploads: Arc<dyn UploadStore> = Arc::new(UploadRepository::new(pool.clone()));
    let telemetry: Arc<dyn TelemetrySink> = Arc::new(TelemetryRepository::new(pool));

    if config.auth_allow_anonymous {
        tracing::warn!("Anonymous uploads enabled; requests without a credential are trusted");
    }
    let authz = AuthorizationGate::new(
        AuthApiClient::new(&config.auth_api_url),
        AuthCache::new(Duration::from_secs(config.auth_cache_ttl_secs)),
        config.auth_allow_anonymous,
    );

    let state = Arc::new(AppState {
        config: config.clone(),
        storage,
        uploads,
        telemetry,
        authz,
    });

    let router = routes::setup_routes(&config, state.clone());
    Ok((state, router))
}
