//! Upload pipeline: parameter derivation, authorization, storage commit,
//! and best-effort accounting for a single POST.

use std::sync::Arc;

use axum::extract::{Query, State};
use axum::http::{header, HeaderMap, StatusCode};
use axum::response::{IntoResponse, Response};
use bytes::Bytes;
use chrono::Utc;
use serde::{Deserialize, Serialize};

use crate::response::ApiResponse;
use crate::state::AppState;
use dropgate_core::constants::{DEFAULT_TTL_DAYS, MAX_TTL_DAYS, OBJECT_CACHE_CONTROL};
use dropgate_core::expiry;
use dropgate_core::models::{ProjectSelector, UploadDataPoint, UploadRecord};
use dropgate_storage::{generate_object_key, ObjectMetadata};

#[derive(Debug, Deserialize)]
pub struct UploadQuery {
    ttl: Option<String>,
    filename: Option<String>,
    project: Option<String>,
    #[serde(rename = "projectId")]
    project_id: Option<String>,
}

/// Success payload: where to fetch the object and when it stops existing.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct UploadResult {
    pub download_url: String,
    pub expires_at: String,
}

/// Upload handler for `POST /`.
///
/// Parameter precedence is query over header throughout. Authorization is
/// checked before the body, so an unauthorized caller learns nothing about
/// what the gateway thought of their payload. Only a storage commit failure
/// changes the HTTP status; every caller-attributable failure is signaled in
/// the envelope body with status 200.
#[tracing::instrument(skip(state, headers, body), fields(size_bytes = body.len()))]
pub async fn upload(
    State(state): State<Arc<AppState>>,
    Query(query): Query<UploadQuery>,
    headers: HeaderMap,
    body: Bytes,
) -> Response {
    let ttl_days = resolve_ttl(query.ttl.as_deref(), header_str(&headers, "param-ttl"));
    let filename = resolve_filename(
        query.filename.as_deref(),
        header_str(&headers, "param-filename"),
    );

    let credential = header_str(&headers, "authorization");
    let selector = ProjectSelector {
        name: query
            .project
            .clone()
            .or_else(|| header_str(&headers, "param-project").map(str::to_string)),
        id: query
            .project_id
            .clone()
            .or_else(|| header_str(&headers, "param-project-id").map(str::to_string)),
    };

    let outcome = state.authz.authorize(credential, &selector).await;
    let Some(project) = outcome.project().cloned() else {
        return ApiResponse::<UploadResult>::error("api: unauthorized").into_response();
    };

    let declared_len = header_str(&headers, header::CONTENT_LENGTH.as_str())
        .and_then(|v| v.parse::<u64>().ok());
    if body.is_empty() || declared_len == Some(0) {
        return ApiResponse::<UploadResult>::error("body empty").into_response();
    }

    let now = Utc::now();
    let expires = expiry::expires_at(now, ttl_days);
    let object_key = generate_object_key(ttl_days);
    let size_bytes = body.len() as i64;

    let metadata = ObjectMetadata {
        cache_control: OBJECT_CACHE_CONTROL.to_string(),
        content_disposition: filename
            .as_deref()
            .map(|f| format!("attachment; filename=\"{}\"", f)),
    };

    if let Err(error) = state.storage.put(&object_key, body, &metadata).await {
        tracing::error!(error = %error, key = %object_key, "Upload commit failed");
        return (
            StatusCode::INTERNAL_SERVER_ERROR,
            ApiResponse::<UploadResult>::error("failed to upload"),
        )
            .into_response();
    }

    // Accounting is detached from the response path; failures are logged and
    // never surfaced or retried.
    let point = UploadDataPoint {
        project_id: project.id.clone(),
        colo: origin_colo(&headers),
        country: origin_country(&headers),
        ttl_days: ttl_days as i32,
        size_bytes,
    };
    let telemetry = state.telemetry.clone();
    tokio::spawn(async move {
        if let Err(error) = telemetry.write_data_point(&point).await {
            tracing::warn!(error = %error, "Failed to write upload data point");
        }
    });

    let record = UploadRecord {
        object_key: object_key.clone(),
        project_id: project.id,
        size_bytes,
        filename,
        ttl_days: ttl_days as i32,
        created_at: now,
    };
    let uploads = state.uploads.clone();
    tokio::spawn(async move {
        if let Err(error) = uploads.insert_upload(&record).await {
            tracing::warn!(
                error = %error,
                key = %record.object_key,
                "Failed to persist upload record"
            );
        }
    });

    ApiResponse::ok(UploadResult {
        download_url: state.config.download_url(&object_key),
        expires_at: expiry::format_expiry(expires),
    })
    .into_response()
}

fn header_str<'a>(headers: &'a HeaderMap, name: &str) -> Option<&'a str> {
    headers.get(name).and_then(|v| v.to_str().ok())
}

/// Effective TTL in days: query over header, clamped to the default on any
/// missing, unparsable, or out-of-range value. A bad TTL must never block an
/// otherwise valid upload.
fn resolve_ttl(query: Option<&str>, header: Option<&str>) -> u32 {
    let raw = query.or(header);
    match raw.and_then(|v| v.trim().parse::<i64>().ok()) {
        Some(days) if (1..=i64::from(MAX_TTL_DAYS)).contains(&days) => days as u32,
        _ => DEFAULT_TTL_DAYS,
    }
}

/// Optional download filename: query over header, double quotes stripped.
///
/// The value is only ever interpolated into a quoted content-disposition
/// parameter, so stripping `"` is the entire sanitization surface.
fn resolve_filename(query: Option<&str>, header: Option<&str>) -> Option<String> {
    query
        .or(header)
        .map(|raw| raw.replace('"', ""))
        .filter(|name| !name.is_empty())
}

/// Edge location that handled the request, from the `cf-ray` trailer.
fn origin_colo(headers: &HeaderMap) -> Option<String> {
    header_str(headers, "cf-ray")
        .and_then(|ray| ray.rsplit_once('-'))
        .map(|(_, colo)| colo.to_string())
}

fn origin_country(headers: &HeaderMap) -> Option<String> {
    header_str(headers, "cf-ipcountry").map(str::to_string)
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::http::HeaderValue;

    #[test]
    fn test_resolve_ttl_accepts_valid_range() {
        for days in 1u32..=7 {
            let value = days.to_string();
            assert_eq!(resolve_ttl(Some(&value), None), days);
        }
    }

    #[test]
    fn test_resolve_ttl_falls_back_to_default() {
        for bad in [None, Some("0"), Some("-3"), Some("8"), Some("soon"), Some("")] {
            assert_eq!(resolve_ttl(bad, None), DEFAULT_TTL_DAYS, "{:?}", bad);
        }
    }

    #[test]
    fn test_resolve_ttl_query_wins_over_header() {
        assert_eq!(resolve_ttl(Some("3"), Some("5")), 3);
        assert_eq!(resolve_ttl(None, Some("5")), 5);
    }

    #[test]
    fn test_resolve_filename_strips_quotes() {
        assert_eq!(
            resolve_filename(Some(r#"re"port".pdf"#), None),
            Some("report.pdf".to_string())
        );
    }

    #[test]
    fn test_resolve_filename_empty_after_sanitize_is_none() {
        assert_eq!(resolve_filename(Some(r#""""#), None), None);
        assert_eq!(resolve_filename(None, None), None);
    }

    #[test]
    fn test_resolve_filename_query_wins_over_header() {
        assert_eq!(
            resolve_filename(Some("a.txt"), Some("b.txt")),
            Some("a.txt".to_string())
        );
    }

    #[test]
    fn test_origin_colo_from_cf_ray() {
        let mut headers = HeaderMap::new();
        headers.insert("cf-ray", HeaderValue::from_static("8f1d2e3a4b5c6d7e-SIN"));
        assert_eq!(origin_colo(&headers), Some("SIN".to_string()));
        assert_eq!(origin_colo(&HeaderMap::new()), None);
    }
}
