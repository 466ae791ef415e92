//! Declarative route registration with a cookie authorization gate, on top
//! of axum.

pub mod app;
pub mod config;
pub mod http;
pub mod lifecycle;
pub mod observability;
pub mod routing;
pub mod security;
pub mod util;

pub use config::GateConfig;
pub use http::{bad_request, HttpServer};
pub use lifecycle::Shutdown;
pub use routing::{HttpMethod, Route, RouteBuilder, RouteRegistrar};
pub use security::{CookieValidator, SessionTokenValidator};
pub use util::read_lines;
