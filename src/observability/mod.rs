//! Observability subsystem.
//!
//! # Data Flow
//! ```text
//! All subsystems produce:
//!     → logging.rs (structured log events)
//!     → spans.rs (per-request spans with request IDs)
//!
//! Consumers:
//!     → stdout, pretty or JSON
//! ```
//!
//! # Design Decisions
//! - Structured logging (JSON) for machine parsing
//! - Request ID flows through every request span

pub mod logging;
pub mod spans;
