//! JSON response envelope and the bad-request helper.
//!
//! Bodies take the shape `{ "error"?: ..., "data"?: ... }`; absent parts are
//! omitted.

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::Serialize;
use serde_json::{json, Value};

/// Default message for [`bad_request`].
pub const BAD_REQUEST_MESSAGE: &str = "bad request";

/// Envelope for JSON API bodies.
#[derive(Debug, Clone, Serialize)]
pub struct ApiResponse<T: Serialize = Value> {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<Value>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub data: Option<T>,
}

impl<T: Serialize> ApiResponse<T> {
    pub fn success(data: T) -> Self {
        Self {
            error: None,
            data: Some(data),
        }
    }
}

impl ApiResponse<Value> {
    pub fn failure(error: Value) -> Self {
        Self {
            error: Some(error),
            data: None,
        }
    }
}

impl<T: Serialize> IntoResponse for ApiResponse<T> {
    fn into_response(self) -> Response {
        let status = if self.error.is_some() {
            StatusCode::BAD_REQUEST
        } else {
            StatusCode::OK
        };
        (status, Json(self)).into_response()
    }
}

/// A 400 response with a JSON error body.
///
/// A `detail` value replaces the whole `error` object; it is not merged with
/// the message. Empty details (`null`, `false`, `0`, `""`) are ignored.
#[derive(Debug, Clone, Default)]
pub struct BadRequest {
    message: Option<String>,
    detail: Option<Value>,
}

impl BadRequest {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn message(mut self, message: impl Into<String>) -> Self {
        self.message = Some(message.into());
        self
    }

    pub fn detail(mut self, detail: Value) -> Self {
        self.detail = Some(detail);
        self
    }

    pub fn body(&self) -> ApiResponse {
        let error = match self.detail.as_ref().filter(|d| is_present(d)) {
            Some(detail) => detail.clone(),
            None => json!({
                "message": self.message.as_deref().unwrap_or(BAD_REQUEST_MESSAGE),
            }),
        };
        ApiResponse::failure(error)
    }
}

/// Whether a detail value counts as supplied. Arrays and objects always do,
/// even when empty.
fn is_present(detail: &Value) -> bool {
    match detail {
        Value::Null => false,
        Value::Bool(b) => *b,
        Value::Number(n) => n.as_f64().is_some_and(|n| n != 0.0),
        Value::String(s) => !s.is_empty(),
        Value::Array(_) | Value::Object(_) => true,
    }
}

impl IntoResponse for BadRequest {
    fn into_response(self) -> Response {
        (StatusCode::BAD_REQUEST, Json(self.body())).into_response()
    }
}

/// Build a 400 response: `{ "error": { "message": message or "bad request" } }`,
/// or `{ "error": detail }` when a non-empty detail value is given.
pub fn bad_request(message: Option<&str>, detail: Option<Value>) -> Response {
    let mut response = BadRequest::new();
    if let Some(message) = message {
        response = response.message(message);
    }
    if let Some(detail) = detail {
        response = response.detail(detail);
    }
    response.into_response()
}
