//! Uniform response envelope.
//!
//! Every JSON reply is `{ok, result?, error?}`: success carries exactly
//! `result`, failure exactly `error.message`, never both. Callers key off the
//! `ok` field, so caller-attributable failures ship with HTTP 200; only a
//! storage commit failure escalates the status code (see the upload handler).

use axum::response::{IntoResponse, Response};
use axum::Json;
use serde::Serialize;

#[derive(Debug, Serialize)]
pub struct ApiError {
    pub message: String,
}

#[derive(Debug, Serialize)]
pub struct ApiResponse<T> {
    pub ok: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub result: Option<T>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<ApiError>,
}

impl<T> ApiResponse<T> {
    pub fn ok(result: T) -> Self {
        Self {
            ok: true,
            result: Some(result),
            error: None,
        }
    }

    pub fn error(message: impl Into<String>) -> Self {
        Self {
            ok: false,
            result: None,
            error: Some(ApiError {
                message: message.into(),
            }),
        }
    }
}

impl<T: Serialize> IntoResponse for ApiResponse<T> {
    fn into_response(self) -> Response {
        Json(self).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_success_envelope_has_no_error_key() {
        let response = ApiResponse::ok(serde_json::json!({"value": 1}));
        let json = serde_json::to_value(&response).unwrap();
        assert_eq!(json["ok"], serde_json::json!(true));
        assert_eq!(json["result"]["value"], serde_json::json!(1));
        assert!(json.get("error").is_none());
    }

    #[test]
    fn test_error_envelope_has_no_result_key() {
        let response = ApiResponse::<()>::error("body empty");
        let json = serde_json::to_value(&response).unwrap();
        assert_eq!(json["ok"], serde_json::json!(false));
        assert_eq!(json["error"]["message"], serde_json::json!("body empty"));
        assert!(json.get("result").is_none());
    }
}
