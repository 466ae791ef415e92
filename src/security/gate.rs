//! Per-request authorization gate.
//!
//! # Responsibilities
//! - Decide whether a secured route's handler may run
//! - Pick the denial style: browser redirect or 401 for AJAX callers
//!
//! # Design Decisions
//! - `authorize` is a pure function of (policy, headers, validator)
//! - A missing or malformed cookie is denied the same way as an invalid one
//! - The middleware never looks at the handler's response

use std::sync::Arc;

use axum::{
    extract::{Request, State},
    http::{header, HeaderMap, StatusCode},
    middleware::Next,
    response::{IntoResponse, Redirect, Response},
};

use crate::security::cookie::CookieValidator;

/// Body sent with 401 responses to AJAX callers.
pub const NOT_AUTHORIZED: &str = "not authorized";

/// Default redirect target for denied browser requests.
pub const DEFAULT_LOGIN_PATH: &str = "/login";

/// Authorization settings of a single route.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct RoutePolicy {
    pub secure: bool,
    /// Only meaningful when `secure` is set.
    pub ajax: bool,
}

/// Outcome of the gate for one request.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GateDecision {
    Allowed,
    /// Denied; send the browser to the login page.
    Redirect,
    /// Denied; answer 401.
    Unauthorized,
}

/// Evaluate the gate for a request.
pub fn authorize(
    policy: RoutePolicy,
    headers: &HeaderMap,
    validator: &dyn CookieValidator,
) -> GateDecision {
    if !policy.secure {
        return GateDecision::Allowed;
    }

    let cookie = cookie_header(headers);
    if validator.validate_cookie(&cookie) {
        GateDecision::Allowed
    } else if policy.ajax {
        GateDecision::Unauthorized
    } else {
        GateDecision::Redirect
    }
}

/// The request's `Cookie` header, or an empty string when there is none.
///
/// Split header lines are joined with `"; "`; lines that aren't valid
/// visible ASCII are dropped.
pub fn cookie_header(headers: &HeaderMap) -> String {
    headers
        .get_all(header::COOKIE)
        .iter()
        .filter_map(|value| value.to_str().ok())
        .collect::<Vec<_>>()
        .join("; ")
}

/// State handed to [`require_authorization`] for one route.
#[derive(Clone)]
pub struct GateState {
    pub policy: RoutePolicy,
    pub validator: Arc<dyn CookieValidator>,
    pub login_path: Arc<str>,
}

/// Middleware applying the gate in front of a route's handler.
pub async fn require_authorization(
    State(gate): State<GateState>,
    request: Request,
    next: Next,
) -> Response {
    match authorize(gate.policy, request.headers(), gate.validator.as_ref()) {
        GateDecision::Allowed => next.run(request).await,
        GateDecision::Redirect => {
            tracing::debug!(
                path = %request.uri().path(),
                login_path = %gate.login_path,
                "Unauthorized request redirected to login"
            );
            Redirect::to(&gate.login_path).into_response()
        }
        GateDecision::Unauthorized => {
            tracing::debug!(path = %request.uri().path(), "Unauthorized AJAX request rejected");
            (StatusCode::UNAUTHORIZED, NOT_AUTHORIZED).into_response()
        }
    }
}
