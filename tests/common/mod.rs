//! Shared utilities for integration testing.

use std::net::SocketAddr;
use std::sync::Arc;
use std::time::Duration;

use route_gate::config::GateConfig;
use route_gate::{app, HttpServer, SessionTokenValidator, Shutdown};

/// Session token accepted by servers started with [`start_gate_server`].
pub const VALID_TOKEN: &str = "integration-token";

/// Start the demonstration server on `addr`. Trigger the returned
/// [`Shutdown`] to stop it.
pub async fn start_gate_server(addr: SocketAddr) -> Shutdown {
    let mut config = GateConfig::default();
    config.listener.bind_address = addr.to_string();
    config.auth.session_tokens = vec![VALID_TOKEN.to_string()];

    let validator = SessionTokenValidator::from_config(&config.auth).unwrap();
    let routes = app::build_router(&config, Arc::new(validator)).unwrap();

    let shutdown = Shutdown::new();
    let server_shutdown = shutdown.subscribe();
    let listener = tokio::net::TcpListener::bind(addr).await.unwrap();
    let server = HttpServer::new(&config, routes);

    tokio::spawn(async move {
        let _ = server.run(listener, server_shutdown).await;
    });

    tokio::time::sleep(Duration::from_millis(100)).await;
    shutdown
}

/// Client that reports redirects instead of following them.
pub fn client() -> reqwest::Client {
    reqwest::Client::builder()
        .redirect(reqwest::redirect::Policy::none())
        .pool_max_idle_per_host(0)
        .no_proxy()
        .build()
        .unwrap()
}
