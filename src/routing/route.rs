//! Route descriptors and their builder.
//!
//! # Design Decisions
//! - `RouteBuilder` is the only place defaults are applied
//! - A `Route` is write-once: private fields, accessors only
//! - The handler is erased at construction so routes with different handler
//!   types can share one `Vec<Route<S>>`

use std::fmt;

use axum::handler::Handler;
use axum::routing::{MethodFilter, MethodRouter};

use crate::routing::method::HttpMethod;
use crate::security::gate::RoutePolicy;

/// Turns the erased handler into a method router for the chosen verb.
pub(super) type InstallFn<S> = Box<dyn FnOnce(MethodFilter) -> MethodRouter<S> + Send>;

/// Errors raised when finalizing a [`RouteBuilder`].
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum RouteError {
    #[error("route path must not be empty")]
    EmptyPath,

    #[error("route path {0:?} must start with '/'")]
    MissingLeadingSlash(String),

    /// `:id` / `*rest` segments; axum captures are written `{id}` / `{*rest}`.
    #[error("route path {path:?} uses unsupported capture segment {segment:?}")]
    UnsupportedCapture { path: String, segment: String },
}

/// Accumulates a route's settings before it is frozen into a [`Route`].
pub struct RouteBuilder<S = ()> {
    path: String,
    handler: InstallFn<S>,
    method: Option<HttpMethod>,
    secure: Option<bool>,
    ajax: Option<bool>,
}

impl<S> RouteBuilder<S>
where
    S: Clone + Send + Sync + 'static,
{
    /// Start a route at `path` served by `handler`.
    pub fn new<H, T>(path: impl Into<String>, handler: H) -> Self
    where
        H: Handler<T, S>,
        T: 'static,
    {
        Self {
            path: path.into(),
            handler: Box::new(move |filter| axum::routing::on(filter, handler)),
            method: None,
            secure: None,
            ajax: None,
        }
    }

    pub fn with_method(mut self, method: HttpMethod) -> Self {
        self.method = Some(method);
        self
    }

    /// Require a valid session cookie before the handler runs.
    pub fn with_secure(mut self, secure: bool) -> Self {
        self.secure = Some(secure);
        self
    }

    /// Answer denied requests with 401 instead of a login redirect.
    pub fn with_ajax(mut self, ajax: bool) -> Self {
        self.ajax = Some(ajax);
        self
    }

    /// Finalize the route, filling in GET / not secure / not ajax for
    /// anything left unset.
    pub fn build(self) -> Result<Route<S>, RouteError> {
        if self.path.is_empty() {
            return Err(RouteError::EmptyPath);
        }
        if !self.path.starts_with('/') {
            return Err(RouteError::MissingLeadingSlash(self.path));
        }
        if let Some(segment) = self
            .path
            .split('/')
            .find(|segment| segment.starts_with(':') || segment.starts_with('*'))
        {
            return Err(RouteError::UnsupportedCapture {
                segment: segment.to_string(),
                path: self.path.clone(),
            });
        }

        Ok(Route {
            path: self.path,
            method: self.method.unwrap_or_default(),
            secure: self.secure.unwrap_or(false),
            ajax: self.ajax.unwrap_or(false),
            handler: self.handler,
        })
    }
}

impl<S> TryFrom<RouteBuilder<S>> for Route<S>
where
    S: Clone + Send + Sync + 'static,
{
    type Error = RouteError;

    fn try_from(builder: RouteBuilder<S>) -> Result<Self, Self::Error> {
        builder.build()
    }
}

/// One endpoint: path, verb, handler and authorization policy.
pub struct Route<S = ()> {
    path: String,
    method: HttpMethod,
    secure: bool,
    ajax: bool,
    pub(super) handler: InstallFn<S>,
}

impl<S> Route<S> {
    pub fn path(&self) -> &str {
        &self.path
    }

    pub fn method(&self) -> HttpMethod {
        self.method
    }

    pub fn is_secure(&self) -> bool {
        self.secure
    }

    pub fn is_ajax(&self) -> bool {
        self.ajax
    }

    /// The part of the route the authorization gate looks at.
    pub fn policy(&self) -> RoutePolicy {
        RoutePolicy {
            secure: self.secure,
            ajax: self.ajax,
        }
    }
}

impl<S> fmt::Debug for Route<S> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Route")
            .field("path", &self.path)
            .field("method", &self.method)
            .field("secure", &self.secure)
            .field("ajax", &self.ajax)
            .finish_non_exhaustive()
    }
}
