//! Test helpers: build AppState and router with in-memory collaborators.
//!
//! Run from workspace root: `cargo test -p dropgate-api --test upload_test` or
//! `cargo test -p dropgate-api`. No external services are required; storage
//! and both database sinks are trait doubles, and the authorization API is a
//! local axum server spawned per test (see `auth_api`).

pub mod auth_api;

use async_trait::async_trait;
use axum_test::TestServer;
use bytes::Bytes;
use dropgate_api::auth::{AuthApiClient, AuthCache, AuthorizationGate};
use dropgate_api::setup::routes;
use dropgate_api::state::AppState;
use dropgate_core::models::{UploadDataPoint, UploadRecord};
use dropgate_core::{AppError, Config, StorageBackend};
use dropgate_db::{TelemetrySink, UploadStore};
use dropgate_storage::{ObjectMetadata, Storage, StorageError, StorageResult};
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, Mutex};
use std::time::Duration;

pub const TEST_BASE_URL: &str = "http://localhost:3000/";

/// Test application: server plus handles to the mock collaborators.
pub struct TestApp {
    pub server: TestServer,
    pub storage: Arc<MockStorage>,
    pub uploads: Arc<MemoryUploadStore>,
    pub telemetry: Arc<MemoryTelemetry>,
}

pub struct TestAppOptions {
    pub allow_anonymous: bool,
    pub auth_api_url: String,
    pub auth_cache_ttl: Duration,
}

impl Default for TestAppOptions {
    fn default() -> Self {
        Self {
            allow_anonymous: true,
            // Unroutable; tests that exercise the remote RPC spawn their own
            // mock server and override this.
            auth_api_url: "http://127.0.0.1:1".to_string(),
            auth_cache_ttl: Duration::from_secs(30),
        }
    }
}

/// Setup a test app with anonymous uploads enabled and no upstream auth API.
pub async fn setup_test_app() -> TestApp {
    setup_test_app_with(TestAppOptions::default()).await
}

pub async fn setup_test_app_with(options: TestAppOptions) -> TestApp {
    let storage = Arc::new(MockStorage::default());
    let uploads = Arc::new(MemoryUploadStore::default());
    let telemetry = Arc::new(MemoryTelemetry::default());

    let config = test_config();
    let authz = AuthorizationGate::new(
        AuthApiClient::new(&options.auth_api_url),
        AuthCache::new(options.auth_cache_ttl),
        options.allow_anonymous,
    );

    let state = Arc::new(AppState {
        config: config.clone(),
        storage: storage.clone(),
        uploads: uploads.clone(),
        telemetry: telemetry.clone(),
        authz,
    });

    let app = routes::setup_routes(&config, state);
    let server = TestServer::new(app.into_make_service()).expect("Failed to create test server");

    TestApp {
        server,
        storage,
        uploads,
        telemetry,
    }
}

fn test_config() -> Config {
    Config {
        server_port: 3000,
        public_base_url: TEST_BASE_URL.to_string(),
        database_url: "postgresql://localhost/dropgate-test".to_string(),
        db_max_connections: 5,
        db_timeout_seconds: 30,
        auth_api_url: "http://127.0.0.1:1".to_string(),
        auth_cache_ttl_secs: 30,
        auth_allow_anonymous: true,
        storage_backend: StorageBackend::Local,
        s3_bucket: None,
        s3_region: None,
        s3_endpoint: None,
        local_storage_path: "./data".to_string(),
        max_upload_bytes: 10 * 1024 * 1024,
        environment: "test".to_string(),
    }
}

/// Poll until `condition` holds; panics after ~1s. Needed because record and
/// telemetry writes are detached from the response path.
pub async fn wait_until(condition: impl Fn() -> bool) {
    for _ in 0..100 {
        if condition() {
            return;
        }
        tokio::time::sleep(Duration::from_millis(10)).await;
    }
    panic!("condition not met within timeout");
}

// ----- Mock collaborators -----

#[derive(Clone, Debug)]
pub struct RecordedPut {
    pub object_key: String,
    pub data: Vec<u8>,
    pub metadata: ObjectMetadata,
}

/// Storage double that records puts and can be switched to fail.
#[derive(Default)]
pub struct MockStorage {
    pub puts: Mutex<Vec<RecordedPut>>,
    pub fail: AtomicBool,
}

#[async_trait]
impl Storage for MockStorage {
    async fn put(
        &self,
        object_key: &str,
        data: Bytes,
        metadata: &ObjectMetadata,
    ) -> StorageResult<()> {
        if self.fail.load(Ordering::SeqCst) {
            return Err(StorageError::UploadFailed("mock backend down".to_string()));
        }
        self.puts.lock().unwrap().push(RecordedPut {
            object_key: object_key.to_string(),
            data: data.to_vec(),
            metadata: metadata.clone(),
        });
        Ok(())
    }

    fn backend_type(&self) -> StorageBackend {
        StorageBackend::Local
    }
}

#[derive(Default)]
pub struct MemoryUploadStore {
    pub records: Mutex<Vec<UploadRecord>>,
    pub fail: AtomicBool,
}

#[async_trait]
impl UploadStore for MemoryUploadStore {
    async fn insert_upload(&self, record: &UploadRecord) -> Result<(), AppError> {
        if self.fail.load(Ordering::SeqCst) {
            return Err(AppError::Internal("record store down".to_string()));
        }
        self.records.lock().unwrap().push(record.clone());
        Ok(())
    }
}

#[derive(Default)]
pub struct MemoryTelemetry {
    pub points: Mutex<Vec<UploadDataPoint>>,
    pub fail: AtomicBool,
}

#[async_trait]
impl TelemetrySink for MemoryTelemetry {
    async fn write_data_point(&self, point: &UploadDataPoint) -> Result<(), AppError> {
        if self.fail.load(Ordering::SeqCst) {
            return Err(AppError::Internal("telemetry sink down".to_string()));
        }
        self.points.lock().unwrap().push(point.clone());
        Ok(())
    }
}
