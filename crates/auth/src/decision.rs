use therabook_core::{Identity, Profile, Role};

use crate::routes::{RouteClass, RoutePolicy};

/// Reason marker carried to the login page on a forced sign-out.
pub const ACCOUNT_DEACTIVATED: &str = "account_deactivated";

/// Outcome of an access check for one request.
///
/// Produced fresh on every request and never cached, since profile state
/// (active/deleted) can change between requests.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AccessDecision {
    /// Pass the request through unchanged.
    Allow,
    /// Unauthenticated access to a protected path; the original path is
    /// preserved for post-login forwarding.
    RedirectToLogin { path: String },
    /// Authenticated, usable profile on the wrong subtree (or on an auth
    /// form). Not an error: silent redirect to the user's own dashboard.
    RedirectToRoleHome(Role),
    /// Present-but-unusable profile: the session must be terminated before
    /// the redirect is issued.
    DenyAndSignOut { reason: &'static str },
}

impl AccessDecision {
    /// Concrete redirect target, or `None` for [`AccessDecision::Allow`].
    pub fn destination(&self, policy: &RoutePolicy) -> Option<String> {
        match self {
            AccessDecision::Allow => None,
            AccessDecision::RedirectToLogin { path } => {
                Some(format!("/login?redirect={}", urlencoding::encode(path)))
            }
            AccessDecision::RedirectToRoleHome(role) => Some(policy.role_home(*role).to_string()),
            AccessDecision::DenyAndSignOut { reason } => Some(format!("/login?error={reason}")),
        }
    }

    /// Whether the caller must invoke the identity gateway's sign-out before
    /// acting on the decision.
    pub fn requires_sign_out(&self) -> bool {
        matches!(self, AccessDecision::DenyAndSignOut { .. })
    }
}

/// Role-satisfaction rule: `admin` satisfies every role-scoped prefix;
/// `therapist` and `client` satisfy only their own.
pub fn role_satisfies(have: Role, required: Role) -> bool {
    have == Role::Admin || have == required
}

/// Decide what to do with a request.
///
/// Pure and total: every input combination maps to exactly one decision,
/// evaluated in rule order. A present-but-unusable profile dominates
/// everything else, including public paths.
///
/// - No IO
/// - No panics
pub fn decide(
    policy: &RoutePolicy,
    path: &str,
    identity: Option<&Identity>,
    profile: Option<&Profile>,
) -> AccessDecision {
    // Rule 1: deactivated or soft-deleted account.
    if let Some(profile) = profile
        && !profile.is_usable()
    {
        return AccessDecision::DenyAndSignOut {
            reason: ACCOUNT_DEACTIVATED,
        };
    }

    // Past rule 1, any present profile is usable.
    match (policy.classify(path), identity, profile) {
        // Rule 2: authenticated users never see the auth forms.
        (Some(RouteClass::Auth), Some(_), Some(profile)) => {
            AccessDecision::RedirectToRoleHome(profile.role)
        }

        // Rule 3: protected path without an authenticated, usable profile.
        (Some(RouteClass::Authenticated | RouteClass::RoleScoped(_)), identity, profile)
            if identity.is_none() || profile.is_none() =>
        {
            AccessDecision::RedirectToLogin {
                path: path.to_string(),
            }
        }

        // Rule 4: wrong role for a role-scoped subtree.
        (Some(RouteClass::RoleScoped(required)), Some(_), Some(profile))
            if !role_satisfies(profile.role, required) =>
        {
            AccessDecision::RedirectToRoleHome(profile.role)
        }

        // Rule 5: everything else passes.
        _ => AccessDecision::Allow,
    }
}
