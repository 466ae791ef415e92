//! Per-request spans for `TraceLayer`.

use axum::{body::Body, http::Request};
use tower_http::request_id::RequestId;
use tracing::Span;

use crate::http::request::request_id_str;

/// Span carrying method, path and request ID for one HTTP request.
pub fn make_request_span(request: &Request<Body>) -> Span {
    let request_id = request_id_str(request.extensions().get::<RequestId>());

    tracing::info_span!(
        "request",
        method = %request.method(),
        path = %request.uri().path(),
        request_id = %request_id,
    )
}
