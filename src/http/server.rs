//! HTTP server setup and configuration.
//!
//! # Responsibilities
//! - Wrap the registered route table with the shared middleware
//!   (tracing, request ID, timeout, body limit)
//! - Bind server to listener
//! - Stop gracefully when the shutdown signal fires

use std::time::Duration;

use axum::Router;
use tokio::net::TcpListener;
use tokio::sync::broadcast;
use tower_http::{limit::RequestBodyLimitLayer, timeout::TimeoutLayer, trace::TraceLayer};

use crate::config::GateConfig;
use crate::http::request::{propagate_request_id_layer, set_request_id_layer};
use crate::observability::spans::make_request_span;

/// HTTP server for a registered route table.
pub struct HttpServer {
    router: Router,
}

impl HttpServer {
    /// Create a server from config and the router produced by a
    /// [`RouteRegistrar`](crate::routing::RouteRegistrar).
    pub fn new(config: &GateConfig, routes: Router) -> Self {
        Self {
            router: Self::build_router(config, routes),
        }
    }

    /// Apply middleware layers (outermost last).
    #[allow(deprecated)]
    fn build_router(config: &GateConfig, routes: Router) -> Router {
        routes
            .layer(RequestBodyLimitLayer::new(config.security.max_body_size))
            .layer(TimeoutLayer::new(Duration::from_secs(config.timeouts.request_secs)))
            .layer(propagate_request_id_layer())
            .layer(TraceLayer::new_for_http().make_span_with(make_request_span))
            .layer(set_request_id_layer())
    }

    /// The fully layered router, for driving the server in-process.
    pub fn router(&self) -> Router {
        self.router.clone()
    }

    /// Run the server, accepting connections on the given listener until
    /// `shutdown` fires.
    pub async fn run(
        self,
        listener: TcpListener,
        mut shutdown: broadcast::Receiver<()>,
    ) -> Result<(), std::io::Error> {
        let addr = listener.local_addr()?;
        tracing::info!(
            address = %addr,
            "HTTP server starting"
        );

        axum::serve(listener, self.router)
            .with_graceful_shutdown(async move {
                let _ = shutdown.recv().await;
                tracing::info!("Shutdown signal received");
            })
            .await?;

        tracing::info!("HTTP server stopped");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::{
        body::Body,
        http::{Request, StatusCode},
        routing::{get, post},
    };
    use tower::ServiceExt;

    #[tokio::test]
    async fn test_request_id_added_to_response() {
        let server = HttpServer::new(&GateConfig::default(), Router::new().route("/", get(|| async { "hi" })));

        let res = server
            .router()
            .oneshot(Request::builder().uri("/").body(Body::empty()).unwrap())
            .await
            .unwrap();

        assert_eq!(res.status(), StatusCode::OK);
        assert!(res.headers().contains_key("x-request-id"));
    }

    #[tokio::test]
    async fn test_client_request_id_kept() {
        let server = HttpServer::new(&GateConfig::default(), Router::new().route("/", get(|| async { "hi" })));

        let res = server
            .router()
            .oneshot(
                Request::builder()
                    .uri("/")
                    .header("x-request-id", "abc-123")
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();

        assert_eq!(res.headers()["x-request-id"], "abc-123");
    }

    #[tokio::test]
    async fn test_body_limit_enforced() {
        let mut config = GateConfig::default();
        config.security.max_body_size = 4;
        let routes = Router::new().route("/", post(|body: String| async move { body }));
        let server = HttpServer::new(&config, routes);

        let res = server
            .router()
            .oneshot(
                Request::builder()
                    .method("POST")
                    .uri("/")
                    .header("content-length", "11")
                    .body(Body::from("hello world"))
                    .unwrap(),
            )
            .await
            .unwrap();

        assert_eq!(res.status(), StatusCode::PAYLOAD_TOO_LARGE);
    }
}
