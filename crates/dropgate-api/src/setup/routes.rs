//! Route configuration and setup

use crate::constants::SERVICE_BANNER;
use crate::handlers;
use crate::state::AppState;
use axum::extract::DefaultBodyLimit;
use axum::http::{Method, StatusCode};
use axum::response::{IntoResponse, Response};
use axum::routing::post;
use axum::Router;
use dropgate_core::Config;
use std::sync::Arc;
use tower_http::limit::RequestBodyLimitLayer;
use tower_http::trace::TraceLayer;

/// Setup the application routes.
///
/// The gateway exposes a single operation: `POST /` uploads. Any non-POST
/// request answers with the plain-text banner so load balancers have a
/// liveness probe; a POST to any other path is a plain 404.
pub fn setup_routes(config: &Config, state: Arc<AppState>) -> Router {
    Router::new()
        .route("/", post(handlers::upload).fallback(service_banner))
        .fallback(fallback)
        .layer(RequestBodyLimitLayer::new(config.max_upload_bytes))
        .layer(DefaultBodyLimit::disable())
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

async fn service_banner() -> &'static str {
    SERVICE_BANNER
}

async fn fallback(method: Method) -> Response {
    if method == Method::POST {
        (StatusCode::NOT_FOUND, "error: not found").into_response()
    } else {
        service_banner().await.into_response()
    }
}
