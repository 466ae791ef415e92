//! Routing subsystem.
//!
//! # Data Flow
//! ```text
//! Route table definition (at startup):
//!     RouteBuilder (path, handler, method?, secure?, ajax?)
//!     → route.rs (apply defaults, freeze as Route)
//!     → registrar.rs (look up verb, wrap with gate, install in axum::Router)
//!
//! Incoming request:
//!     axum dispatch → security::gate (ALLOWED / DENIED) → handler
//! ```
//!
//! # Design Decisions
//! - Routes compiled at startup, immutable at runtime
//! - Registration order is preserved exactly
//! - A route the registrar can't install is skipped, never fatal

pub mod method;
pub mod registrar;
pub mod route;

pub use method::{HttpMethod, UnknownMethod};
pub use registrar::RouteRegistrar;
pub use route::{Route, RouteBuilder, RouteError};
