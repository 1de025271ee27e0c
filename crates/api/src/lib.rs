//! `therabook-api` — HTTP edge of the access-control layer.
//!
//! The request interceptor in [`middleware`] runs before every page/API
//! handler and acts on the pure decision from `therabook-auth`; the handlers
//! under [`app::routes`] cover the auth flows and the role-home dashboards.

pub mod app;
pub mod context;
pub mod middleware;
