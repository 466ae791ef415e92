//! route-gate server.
//!
//! # Architecture Overview
//!
//! ```text
//!   Client Request
//!   ──────────────▶ listener ──▶ http::server layers ──▶ axum dispatch
//!                                (trace, request id,     │
//!                                 timeout, body limit)   ▼
//!                                                 security::gate
//!                                                  │            │
//!                                        ALLOWED   ▼            ▼  DENIED
//!                                          route handler    redirect /login
//!                                                           or 401
//! ```

use std::path::PathBuf;
use std::sync::Arc;

use clap::Parser;
use tokio::net::TcpListener;

use route_gate::config::{load_config, GateConfig};
use route_gate::lifecycle::{signals, Shutdown};
use route_gate::observability::logging;
use route_gate::{app, HttpServer, SessionTokenValidator};

#[derive(Parser)]
#[command(name = "route-gate")]
#[command(about = "Serve a route table behind a cookie authorization gate", long_about = None)]
struct Cli {
    /// Path to a TOML config file. Defaults are used when omitted.
    #[arg(short, long)]
    config: Option<PathBuf>,
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();

    let config = match &cli.config {
        Some(path) => load_config(path)?,
        None => GateConfig::default(),
    };

    logging::init(&config.observability)?;

    tracing::info!("route-gate v{} starting", env!("CARGO_PKG_VERSION"));
    tracing::info!(
        bind_address = %config.listener.bind_address,
        login_path = %config.auth.login_path,
        methods = ?config.routing.methods,
        "Configuration loaded"
    );

    let validator = SessionTokenValidator::from_config(&config.auth)?;
    tracing::info!(tokens = validator.token_count(), "Session validator ready");

    let routes = app::build_router(&config, Arc::new(validator))?;

    let listener = TcpListener::bind(&config.listener.bind_address).await?;
    tracing::info!(address = %listener.local_addr()?, "Listening for connections");

    let shutdown = Arc::new(Shutdown::new());
    let server_shutdown = shutdown.subscribe();
    signals::forward_signals(shutdown.clone());

    let server = HttpServer::new(&config, routes);
    server.run(listener, server_shutdown).await?;

    tracing::info!("Shutdown complete");
    Ok(())
}
