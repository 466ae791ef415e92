//! Route registration.
//!
//! # Responsibilities
//! - Install each route's handler in an `axum::Router`, in input order
//! - Put the authorization gate in front of every installed handler
//! - Skip (never panic on) routes the method table can't register
//!
//! # Design Decisions
//! - Verb selection is a lookup table built once from config
//! - Each route gets its own gate state carrying its policy
//! - Duplicate (path, method) pairs are skipped since axum would panic
//! - So are paths whose captures are named differently from an already
//!   installed path of the same shape (`/u/{id}` vs `/u/{name}`)

use std::collections::{HashMap, HashSet};
use std::sync::Arc;

use axum::{middleware, routing::MethodFilter, Router};

use crate::config::schema::{AuthConfig, RoutingConfig};
use crate::routing::method::HttpMethod;
use crate::routing::route::Route;
use crate::security::cookie::CookieValidator;
use crate::security::gate::{require_authorization, GateState, DEFAULT_LOGIN_PATH};

/// Binds routes onto a router behind the authorization gate.
pub struct RouteRegistrar<S = ()> {
    router: Router<S>,
    validator: Arc<dyn CookieValidator>,
    login_path: Arc<str>,
    methods: HashMap<HttpMethod, MethodFilter>,
    installed: HashSet<(String, HttpMethod)>,
    /// Capture-normalized shape → first path installed with that shape.
    shapes: HashMap<String, String>,
}

impl<S> RouteRegistrar<S>
where
    S: Clone + Send + Sync + 'static,
{
    /// Registrar with a `/login` redirect and GET/POST enabled.
    pub fn new(validator: Arc<dyn CookieValidator>) -> Self {
        Self::with_settings(
            validator,
            DEFAULT_LOGIN_PATH,
            [HttpMethod::Get, HttpMethod::Post],
        )
    }

    pub fn from_config(
        routing: &RoutingConfig,
        auth: &AuthConfig,
        validator: Arc<dyn CookieValidator>,
    ) -> Self {
        Self::with_settings(validator, &auth.login_path, routing.methods.iter().copied())
    }

    fn with_settings(
        validator: Arc<dyn CookieValidator>,
        login_path: &str,
        methods: impl IntoIterator<Item = HttpMethod>,
    ) -> Self {
        Self {
            router: Router::new(),
            validator,
            login_path: Arc::from(login_path),
            methods: methods.into_iter().map(|m| (m, m.filter())).collect(),
            installed: HashSet::new(),
            shapes: HashMap::new(),
        }
    }

    /// Register every route in order. Returns how many were installed.
    pub fn register_all(&mut self, routes: impl IntoIterator<Item = Route<S>>) -> usize {
        let mut count = 0;
        for route in routes {
            if self.register_one(route) {
                count += 1;
            }
        }
        count
    }

    /// Register a single route. Returns `false` when it was skipped.
    pub fn register_one(&mut self, route: Route<S>) -> bool {
        let Some(filter) = self.methods.get(&route.method()).copied() else {
            tracing::trace!(
                route = ?route,
                "Misconfigured route: method not enabled, skipping"
            );
            return false;
        };

        let key = (route.path().to_string(), route.method());
        if self.installed.contains(&key) {
            tracing::warn!(
                path = %key.0,
                method = %key.1,
                "Route already registered, skipping duplicate"
            );
            return false;
        }

        let shape = path_shape(&key.0);
        if let Some(existing) = self.shapes.get(&shape) {
            if *existing != key.0 {
                tracing::warn!(
                    path = %key.0,
                    method = %key.1,
                    conflicts_with = %existing,
                    "Route captures conflict with a registered path, skipping"
                );
                return false;
            }
        }

        let gate = GateState {
            policy: route.policy(),
            validator: self.validator.clone(),
            login_path: self.login_path.clone(),
        };

        tracing::info!(
            path = %route.path(),
            method = %route.method(),
            secure = route.is_secure(),
            ajax = route.is_ajax(),
            "Registering route"
        );

        let Route { handler, .. } = route;
        let method_router = handler(filter)
            .route_layer(middleware::from_fn_with_state(gate, require_authorization));

        let router = std::mem::take(&mut self.router);
        self.router = router.route(&key.0, method_router);
        self.shapes.entry(shape).or_insert_with(|| key.0.clone());
        self.installed.insert(key);
        true
    }

    /// Number of (path, method) pairs installed so far.
    pub fn len(&self) -> usize {
        self.installed.len()
    }

    pub fn is_empty(&self) -> bool {
        self.installed.is_empty()
    }

    /// Finish registration and hand back the router.
    pub fn into_router(self) -> Router<S> {
        self.router
    }
}

/// Replace capture names so `/u/{id}` and `/u/{name}` compare equal.
fn path_shape(path: &str) -> String {
    path.split('/')
        .map(|segment| {
            if segment.starts_with("{{") || !segment.starts_with('{') || !segment.ends_with('}') {
                segment
            } else if segment.starts_with("{*") {
                "{*}"
            } else {
                "{}"
            }
        })
        .collect::<Vec<_>>()
        .join("/")
}
