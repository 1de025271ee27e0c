use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::UserId;

/// Snapshot of an authenticated principal as reported by the identity
/// provider.
///
/// Owned and mutated exclusively by the provider; this layer only reads it.
/// Role and lifecycle state live on the companion [`crate::Profile`], never
/// here.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Identity {
    pub id: UserId,
    pub email: String,
    /// Expiry of the current session token, when the provider reports one.
    pub expires_at: Option<DateTime<Utc>>,
}
