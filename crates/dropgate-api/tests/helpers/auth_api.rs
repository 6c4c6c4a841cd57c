//! Mock authorization API for integration tests.
//!
//! Spawns a real axum server on an ephemeral port so the gate's reqwest
//! client exercises the actual wire path.

use axum::http::{header, HeaderMap, StatusCode};
use axum::routing::post;
use axum::{Json, Router};
use serde_json::Value;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};

pub struct MockAuthApi {
    pub base_url: String,
    pub hits: Arc<AtomicUsize>,
    pub last_body: Arc<Mutex<Option<Value>>>,
    pub last_authorization: Arc<Mutex<Option<String>>>,
}

impl MockAuthApi {
    pub fn hit_count(&self) -> usize {
        self.hits.load(Ordering::SeqCst)
    }
}

/// Spawn a mock that answers every `me.authorized` call with a JSON value.
pub async fn spawn_auth_api(status: StatusCode, response: Value) -> MockAuthApi {
    spawn(status, response.to_string(), "application/json").await
}

/// Spawn a mock that answers with a raw (possibly non-JSON) body.
pub async fn spawn_auth_api_raw(status: StatusCode, response: &str) -> MockAuthApi {
    spawn(status, response.to_string(), "text/plain").await
}

async fn spawn(status: StatusCode, response: String, content_type: &'static str) -> MockAuthApi {
    let hits = Arc::new(AtomicUsize::new(0));
    let last_body = Arc::new(Mutex::new(None));
    let last_authorization = Arc::new(Mutex::new(None));

    let handler_hits = hits.clone();
    let handler_body = last_body.clone();
    let handler_authorization = last_authorization.clone();

    let app = Router::new().route(
        "/me.authorized",
        post(move |headers: HeaderMap, Json(request): Json<Value>| {
            let hits = handler_hits.clone();
            let last_body = handler_body.clone();
            let last_authorization = handler_authorization.clone();
            let response = response.clone();
            async move {
                hits.fetch_add(1, Ordering::SeqCst);
                *last_body.lock().unwrap() = Some(request);
                *last_authorization.lock().unwrap() = headers
                    .get(header::AUTHORIZATION)
                    .and_then(|v| v.to_str().ok())
                    .map(str::to_string);
                (status, [(header::CONTENT_TYPE, content_type)], response)
            }
        }),
    );

    let listener = tokio::net::TcpListener::bind("127.0.0.1:0")
        .await
        .expect("Failed to bind mock auth API");
    let addr = listener.local_addr().expect("Mock auth API address");
    tokio::spawn(async move {
        axum::serve(listener, app).await.expect("Mock auth API died");
    });

    MockAuthApi {
        base_url: format!("http://{}", addr),
        hits,
        last_body,
        last_authorization,
    }
}

/// Response body granting access to `project` with an active billing account.
pub fn grant_response(project_id: &str, project_name: &str) -> Value {
    serde_json::json!({
        "ok": true,
        "result": {
            "authorized": true,
            "project": {
                "id": project_id,
                "project": project_name,
                "billingAccount": {"active": true}
            }
        }
    })
}
