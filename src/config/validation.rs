//! Configuration validation.
//!
//! # Responsibilities
//! - Semantic validation (serde handles syntactic)
//! - Validate value ranges (timeouts > 0, addresses parse)
//! - Check the gate settings are usable
//!
//! # Design Decisions
//! - Returns all validation errors, not just first
//! - Validation is pure function: GateConfig → Result<(), Vec<ValidationError>>

use std::collections::HashSet;
use std::net::SocketAddr;

use crate::config::schema::GateConfig;

/// A single semantic problem in a configuration.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ValidationError {
    #[error("listener.bind_address {0:?} is not a socket address")]
    InvalidBindAddress(String),

    #[error("timeouts.request_secs must be greater than zero")]
    ZeroRequestTimeout,

    #[error("security.max_body_size must be greater than zero")]
    ZeroBodyLimit,

    #[error("auth.login_path {0:?} must start with '/'")]
    InvalidLoginPath(String),

    #[error("auth.cookie_name must not be empty")]
    EmptyCookieName,

    #[error("routing.methods must list at least one method")]
    NoMethods,

    #[error("routing.methods lists {0} more than once")]
    DuplicateMethod(String),
}

pub fn validate_config(config: &GateConfig) -> Result<(), Vec<ValidationError>> {
    let mut errors = Vec::new();

    if config.listener.bind_address.parse::<SocketAddr>().is_err() {
        errors.push(ValidationError::InvalidBindAddress(
            config.listener.bind_address.clone(),
        ));
    }

    if config.timeouts.request_secs == 0 {
        errors.push(ValidationError::ZeroRequestTimeout);
    }

    if config.security.max_body_size == 0 {
        errors.push(ValidationError::ZeroBodyLimit);
    }

    if !config.auth.login_path.starts_with('/') {
        errors.push(ValidationError::InvalidLoginPath(config.auth.login_path.clone()));
    }

    if config.auth.cookie_name.trim().is_empty() {
        errors.push(ValidationError::EmptyCookieName);
    }

    if config.routing.methods.is_empty() {
        errors.push(ValidationError::NoMethods);
    }
    let mut seen = HashSet::new();
    for method in &config.routing.methods {
        if !seen.insert(method) {
            errors.push(ValidationError::DuplicateMethod(method.to_string()));
        }
    }

    if errors.is_empty() {
        Ok(())
    } else {
        Err(errors)
    }
}
