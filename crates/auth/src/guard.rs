//! Guarded helpers for UI-facing data fetchers.
//!
//! Pages and API handlers consult these instead of comparing role strings
//! themselves; the role-satisfaction rule lives in [`crate::decision`] and
//! nowhere else.

use therabook_core::{Identity, Profile, Role, UserId};

use crate::decision::role_satisfies;

/// An authenticated identity paired with its usable profile.
///
/// The only shape a data fetcher should accept as proof of authentication.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AuthUser {
    pub identity: Identity,
    pub profile: Profile,
}

/// Pair an identity with its profile, filtering out unusable profiles.
///
/// Returns `None` unless both are present and the profile is active and not
/// soft-deleted.
pub fn auth_user(identity: Option<Identity>, profile: Option<Profile>) -> Option<AuthUser> {
    let identity = identity?;
    let profile = profile.filter(Profile::is_usable)?;
    Some(AuthUser { identity, profile })
}

/// Whether the user may act as `role` (admin may act as anyone).
pub fn check_role(user: Option<&AuthUser>, role: Role) -> bool {
    user.is_some_and(|user| role_satisfies(user.profile.role, role))
}

/// Whether the user may touch a resource owned by `owner`.
///
/// Admins can access everything; other users only their own resources.
pub fn can_access_resource(user: Option<&AuthUser>, owner: UserId) -> bool {
    user.is_some_and(|user| user.profile.role == Role::Admin || user.identity.id == owner)
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;

    fn identity(id: UserId) -> Identity {
        Identity {
            id,
            email: "lee@example.com".to_string(),
            expires_at: None,
        }
    }

    fn profile(id: UserId, role: Role, is_active: bool) -> Profile {
        Profile {
            id,
            role,
            email: "lee@example.com".to_string(),
            full_name: "Lee Park".to_string(),
            is_active,
            deleted_at: None,
            created_at: Utc::now(),
        }
    }

    #[test]
    fn pairing_requires_both_halves() {
        let id = UserId::new();
        assert!(auth_user(Some(identity(id)), None).is_none());
        assert!(auth_user(None, Some(profile(id, Role::Client, true))).is_none());
        assert!(auth_user(Some(identity(id)), Some(profile(id, Role::Client, true))).is_some());
    }

    #[test]
    fn unusable_profile_never_pairs() {
        let id = UserId::new();
        assert!(auth_user(Some(identity(id)), Some(profile(id, Role::Client, false))).is_none());

        let deleted = Profile {
            deleted_at: Some(Utc::now()),
            ..profile(id, Role::Client, true)
        };
        assert!(auth_user(Some(identity(id)), Some(deleted)).is_none());
    }

    #[test]
    fn admin_passes_every_role_check() {
        let id = UserId::new();
        let admin = auth_user(Some(identity(id)), Some(profile(id, Role::Admin, true)));
        for role in [Role::Therapist, Role::Client, Role::Admin] {
            assert!(check_role(admin.as_ref(), role));
        }
    }

    #[test]
    fn non_admin_passes_only_its_own_role_check() {
        let id = UserId::new();
        let therapist = auth_user(Some(identity(id)), Some(profile(id, Role::Therapist, true)));
        assert!(check_role(therapist.as_ref(), Role::Therapist));
        assert!(!check_role(therapist.as_ref(), Role::Client));
        assert!(!check_role(therapist.as_ref(), Role::Admin));
        assert!(!check_role(None, Role::Client));
    }

    #[test]
    fn resource_access_is_owner_or_admin() {
        let owner = UserId::new();
        let other = UserId::new();

        let own = auth_user(Some(identity(owner)), Some(profile(owner, Role::Client, true)));
        assert!(can_access_resource(own.as_ref(), owner));
        assert!(!can_access_resource(own.as_ref(), other));

        let admin = auth_user(Some(identity(other)), Some(profile(other, Role::Admin, true)));
        assert!(can_access_resource(admin.as_ref(), owner));

        assert!(!can_access_resource(None, owner));
    }
}
