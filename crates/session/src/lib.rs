//! `therabook-session` — client-side session lifecycle.
//!
//! Two independent background tasks, both created once a usable profile is
//! detected on the client and torn down on sign-out:
//!
//! - [`InactivityMonitor`]: signs the user out after a configurable stretch
//!   of inactivity, with a warning callback shortly before.
//! - [`SessionRefresher`]: proactively refreshes the session token on a
//!   fixed cadence so it does not expire mid-use.

pub mod monitor;
pub mod refresher;

#[cfg(test)]
pub(crate) mod tests_support;

pub use monitor::{ActivityKind, InactivityMonitor, MonitorConfig};
pub use refresher::{REFRESH_INTERVAL, SessionRefresher};
