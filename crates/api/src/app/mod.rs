//! HTTP application wiring (Axum router + interceptor).
//!
//! Layout mirrors the rest of the workspace:
//! - `routes/`: handlers (auth flows, dashboards, system)
//! - `errors.rs`: consistent JSON error responses
//! - the request interceptor itself lives in `crate::middleware`

use std::sync::Arc;

use axum::{Extension, Router, routing::get};

use therabook_auth::RoutePolicy;
use therabook_gateway::{IdentityGateway, ProfileStore};

use crate::middleware::{InterceptorState, access_interceptor};

pub mod errors;
pub mod routes;

/// Path prefixes that skip the interceptor entirely.
const BYPASS_PREFIXES: &[&str] = &["/health", "/assets", "/favicon.ico"];

/// Shared handles the route handlers pull out of request extensions.
pub struct Services {
    pub identity: Arc<dyn IdentityGateway>,
    pub profiles: Arc<dyn ProfileStore>,
    pub policy: RoutePolicy,
    /// Public origin of the deployment, used for password-reset links.
    pub site_url: String,
}

/// Build the full HTTP router (public entrypoint used by `main.rs`).
pub fn build_app(
    identity: Arc<dyn IdentityGateway>,
    profiles: Arc<dyn ProfileStore>,
    site_url: String,
) -> Router {
    let policy = RoutePolicy::default();

    let state = InterceptorState {
        identity: identity.clone(),
        profiles: profiles.clone(),
        policy: Arc::new(policy.clone()),
        bypass: BYPASS_PREFIXES.iter().map(|p| p.to_string()).collect(),
    };

    let services = Arc::new(Services {
        identity,
        profiles,
        policy,
        site_url,
    });

    Router::new()
        .route("/health", get(routes::system::health))
        .merge(routes::router())
        .layer(Extension(services))
        .layer(axum::middleware::from_fn_with_state(state, access_interceptor))
}
