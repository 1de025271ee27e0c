//! `therabook-gateway` — contracts for the hosted identity/data platform.
//!
//! The identity provider and the profile datastore are external
//! collaborators; this crate defines the traits the access-control layer
//! consumes, plus an HTTP implementation speaking the provider's REST
//! surface. Handles are stateless: session tokens travel with each call
//! rather than living in a process-wide singleton, so callers can be tested
//! against in-memory fakes.

pub mod error;
pub mod http;
pub mod identity;
pub mod profiles;

pub use error::GatewayError;
pub use http::{HttpGatewayConfig, HttpIdentityGateway, HttpProfileStore};
pub use identity::{AuthSession, IdentityGateway, SessionUser};
pub use profiles::ProfileStore;
