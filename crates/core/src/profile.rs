use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::{Role, UserId};

/// The application's own record extending an identity with role and
/// lifecycle status.
///
/// # Invariants
/// - `id` equals the identity provider's id (1:1, created at sign-up).
/// - `role` is immutable after creation in the normal flow.
/// - A profile gates access only while it is **usable**: active and not
///   soft-deleted. An identity without a usable profile counts as
///   unauthenticated for every role-gated purpose.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Profile {
    pub id: UserId,
    pub role: Role,
    pub email: String,
    pub full_name: String,
    pub is_active: bool,
    pub deleted_at: Option<DateTime<Utc>>,
    pub created_at: DateTime<Utc>,
}

impl Profile {
    pub fn is_usable(&self) -> bool {
        self.is_active && self.deleted_at.is_none()
    }
}

/// Insert shape for the 1:1 profile record created at sign-up.
///
/// Lifecycle columns (`is_active`, `deleted_at`, timestamps) are owned by the
/// datastore and administrative tooling, so they are absent here.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NewProfile {
    pub id: UserId,
    pub role: Role,
    pub email: String,
    pub full_name: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn profile(is_active: bool, deleted_at: Option<DateTime<Utc>>) -> Profile {
        Profile {
            id: UserId::new(),
            role: Role::Client,
            email: "casey@example.com".to_string(),
            full_name: "Casey Jones".to_string(),
            is_active,
            deleted_at,
            created_at: Utc::now(),
        }
    }

    #[test]
    fn active_undeleted_profile_is_usable() {
        assert!(profile(true, None).is_usable());
    }

    #[test]
    fn deactivated_profile_is_not_usable() {
        assert!(!profile(false, None).is_usable());
    }

    #[test]
    fn soft_deleted_profile_is_not_usable() {
        assert!(!profile(true, Some(Utc::now())).is_usable());
        // Deactivated *and* deleted is still just unusable.
        assert!(!profile(false, Some(Utc::now())).is_usable());
    }
}
