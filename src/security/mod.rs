//! Security subsystem.
//!
//! # Data Flow
//! ```text
//! Request headers
//!     → gate.rs (route policy: secure? ajax?)
//!     → cookie.rs (validate raw Cookie header)
//!     → ALLOWED → handler
//!     → DENIED  → redirect to login / 401 "not authorized"
//! ```

pub mod cookie;
pub mod gate;

pub use cookie::{CookieValidator, SessionTokenValidator};
pub use gate::{authorize, require_authorization, GateDecision, GateState, RoutePolicy};
