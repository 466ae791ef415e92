//! HTTP protocol handling subsystem.
//!
//! # Data Flow
//! ```text
//! TCP connection
//!     → server.rs (Axum setup, shared middleware)
//!     → request.rs (add request ID)
//!     → [routing registrar's table + authorization gate]
//!     → response.rs (JSON envelope, 400 helper)
//!     → Send to client
//! ```

pub mod request;
pub mod response;
pub mod server;

pub use request::X_REQUEST_ID;
pub use response::{bad_request, ApiResponse, BadRequest};
pub use server::HttpServer;
