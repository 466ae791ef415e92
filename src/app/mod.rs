//! Demonstration route table served by the `route-gate` binary.
//!
//! | path           | method | secure | ajax |
//! |----------------|--------|--------|------|
//! | `/`            | GET    | no     | no   |
//! | `/health`      | GET    | no     | no   |
//! | `/login`       | GET    | no     | no   |
//! | `/dashboard`   | GET    | yes    | no   |
//! | `/api/profile` | GET    | yes    | yes  |
//! | `/api/notes`   | POST   | yes    | yes  |

pub mod handlers;

use std::sync::Arc;

use axum::Router;

use crate::config::GateConfig;
use crate::routing::{HttpMethod, Route, RouteBuilder, RouteError, RouteRegistrar};
use crate::security::CookieValidator;
use self::handlers::*;

/// The demonstration routes, in registration order.
pub fn routes(config: &GateConfig) -> Result<Vec<Route>, RouteError> {
    [
        RouteBuilder::new("/", index),
        RouteBuilder::new("/health", health),
        RouteBuilder::new(config.auth.login_path.clone(), login_page),
        RouteBuilder::new("/dashboard", dashboard).with_secure(true),
        RouteBuilder::new("/api/profile", profile)
            .with_secure(true)
            .with_ajax(true),
        RouteBuilder::new("/api/notes", create_note)
            .with_method(HttpMethod::Post)
            .with_secure(true)
            .with_ajax(true),
    ]
    .into_iter()
    .map(RouteBuilder::build)
    .collect()
}

/// Register the demonstration routes behind the gate.
pub fn build_router(
    config: &GateConfig,
    validator: Arc<dyn CookieValidator>,
) -> Result<Router, RouteError> {
    let mut registrar = RouteRegistrar::from_config(&config.routing, &config.auth, validator);
    let installed = registrar.register_all(routes(config)?);
    tracing::info!(installed, "Route table registered");
    Ok(registrar.into_router())
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::{
        body::Body,
        http::{header, Request, StatusCode},
    };
    use serde_json::{json, Value};
    use tower::ServiceExt;

    fn router() -> Router {
        let validator: Arc<dyn CookieValidator> = Arc::new(|cookie: &str| cookie == "session=ok");
        build_router(&GateConfig::default(), validator).unwrap()
    }

    async fn json_body(response: axum::response::Response) -> Value {
        let bytes = axum::body::to_bytes(response.into_body(), 1024 * 1024).await.unwrap();
        serde_json::from_slice(&bytes).unwrap()
    }

    #[test]
    fn test_route_table_order_and_policies() {
        let routes = routes(&GateConfig::default()).unwrap();
        let summary: Vec<_> = routes
            .iter()
            .map(|r| (r.path(), r.method(), r.is_secure(), r.is_ajax()))
            .collect();

        assert_eq!(
            summary,
            vec![
                ("/", HttpMethod::Get, false, false),
                ("/health", HttpMethod::Get, false, false),
                ("/login", HttpMethod::Get, false, false),
                ("/dashboard", HttpMethod::Get, true, false),
                ("/api/profile", HttpMethod::Get, true, true),
                ("/api/notes", HttpMethod::Post, true, true),
            ]
        );
    }

    #[tokio::test]
    async fn test_empty_note_is_bad_request() {
        let req = Request::builder()
            .method("POST")
            .uri("/api/notes")
            .header(header::COOKIE, "session=ok")
            .body(Body::from("   "))
            .unwrap();
        let res = router().oneshot(req).await.unwrap();

        assert_eq!(res.status(), StatusCode::BAD_REQUEST);
        assert_eq!(json_body(res).await, json!({ "error": { "message": "note must not be empty" } }));
    }

    #[tokio::test]
    async fn test_note_created() {
        let req = Request::builder()
            .method("POST")
            .uri("/api/notes")
            .header(header::COOKIE, "session=ok")
            .body(Body::from("buy milk"))
            .unwrap();
        let res = router().oneshot(req).await.unwrap();

        assert_eq!(res.status(), StatusCode::OK);
        assert_eq!(json_body(res).await, json!({ "data": { "note": "buy milk" } }));
    }

    #[tokio::test]
    async fn test_login_page_is_public() {
        let req = Request::builder().uri("/login").body(Body::empty()).unwrap();
        let res = router().oneshot(req).await.unwrap();
        assert_eq!(res.status(), StatusCode::OK);
    }
}
