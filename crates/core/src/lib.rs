//! `therabook-core` — domain foundation for the access-control layer.
//!
//! This crate contains **pure domain** types only (no HTTP, no storage):
//! identifiers, roles, profile/identity snapshots and the session token pair.

pub mod id;
pub mod identity;
pub mod profile;
pub mod role;
pub mod session;

pub use id::UserId;
pub use identity::Identity;
pub use profile::{NewProfile, Profile};
pub use role::{Role, RoleParseError};
pub use session::SessionTokens;
