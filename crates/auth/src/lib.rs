//! `therabook-auth` — pure authorization boundary.
//!
//! No HTTP, no storage: everything here is a deterministic function over
//! identity/profile state that has already been fetched. This crate is the
//! single source of truth for role-satisfaction and route-protection rules;
//! callers must never re-implement the prefix matching themselves.

pub mod decision;
pub mod guard;
pub mod routes;

pub use decision::{AccessDecision, decide, role_satisfies};
pub use guard::{AuthUser, auth_user, can_access_resource, check_role};
pub use routes::{RouteClass, RoutePolicy};
