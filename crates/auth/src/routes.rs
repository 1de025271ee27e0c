use therabook_core::Role;

/// Classification tag for a protected path prefix.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum RouteClass {
    /// Requires any authenticated identity with a usable profile.
    Authenticated,
    /// Requires a specific role; admin satisfies every role-scoped prefix.
    RoleScoped(Role),
    /// Login/signup/reset pages; authenticated users are bounced away.
    Auth,
}

/// Static route classification consulted by the decision engine.
///
/// This is configuration, not computed state: the prefix list is fixed at
/// startup. Matching is segment-aware (`/therapist`, `/therapist/` and
/// `/therapist/anything` all match the `/therapist` prefix, `/therapists`
/// does not) and the longest matching prefix wins.
#[derive(Debug, Clone)]
pub struct RoutePolicy {
    prefixes: Vec<(String, RouteClass)>,
}

impl Default for RoutePolicy {
    fn default() -> Self {
        Self::new(&[
            ("/therapist", RouteClass::RoleScoped(Role::Therapist)),
            ("/client", RouteClass::RoleScoped(Role::Client)),
            ("/admin", RouteClass::RoleScoped(Role::Admin)),
            ("/dashboard", RouteClass::Authenticated),
            ("/api/sessions", RouteClass::Authenticated),
            ("/api/messages", RouteClass::Authenticated),
            ("/login", RouteClass::Auth),
            ("/signup", RouteClass::Auth),
            ("/reset-password", RouteClass::Auth),
        ])
    }
}

impl RoutePolicy {
    pub fn new(prefixes: &[(&str, RouteClass)]) -> Self {
        Self {
            prefixes: prefixes
                .iter()
                .map(|(prefix, class)| (normalize(prefix).to_string(), *class))
                .collect(),
        }
    }

    /// Classify a request path against the configured prefixes.
    ///
    /// Returns `None` for public paths. When prefixes overlap, the most
    /// specific (longest) one wins.
    pub fn classify(&self, path: &str) -> Option<RouteClass> {
        let path = normalize(path);
        self.prefixes
            .iter()
            .filter(|(prefix, _)| prefix_matches(path, prefix))
            .max_by_key(|(prefix, _)| prefix.len())
            .map(|(_, class)| *class)
    }

    pub fn is_auth_route(&self, path: &str) -> bool {
        matches!(self.classify(path), Some(RouteClass::Auth))
    }

    /// Dashboard path for a role.
    ///
    /// Total over the role enum; there is deliberately no fallback arm.
    pub fn role_home(&self, role: Role) -> &'static str {
        match role {
            Role::Therapist => "/therapist",
            Role::Client => "/client",
            Role::Admin => "/admin",
        }
    }
}

/// Strip trailing slashes so `/therapist/` and `/therapist` classify alike.
fn normalize(path: &str) -> &str {
    let trimmed = path.trim_end_matches('/');
    if trimmed.is_empty() { "/" } else { trimmed }
}

fn prefix_matches(path: &str, prefix: &str) -> bool {
    match path.strip_prefix(prefix) {
        Some("") => true,
        Some(rest) => rest.starts_with('/'),
        None => false,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn classifies_role_scoped_subtrees() {
        let policy = RoutePolicy::default();
        assert_eq!(
            policy.classify("/therapist/clients"),
            Some(RouteClass::RoleScoped(Role::Therapist))
        );
        assert_eq!(
            policy.classify("/admin/billing"),
            Some(RouteClass::RoleScoped(Role::Admin))
        );
        assert_eq!(policy.classify("/dashboard"), Some(RouteClass::Authenticated));
    }

    #[test]
    fn trailing_slash_is_irrelevant() {
        let policy = RoutePolicy::default();
        for path in ["/therapist", "/therapist/", "/therapist/anything"] {
            assert_eq!(
                policy.classify(path),
                Some(RouteClass::RoleScoped(Role::Therapist)),
                "path: {path}"
            );
        }
    }

    #[test]
    fn sibling_paths_do_not_match_by_string_prefix() {
        let policy = RoutePolicy::default();
        // `/therapists` is the public directory page, not the dashboard.
        assert_eq!(policy.classify("/therapists"), None);
        assert_eq!(policy.classify("/therapists/abc"), None);
        assert_eq!(policy.classify("/administrivia"), None);
    }

    #[test]
    fn public_paths_are_unclassified() {
        let policy = RoutePolicy::default();
        for path in ["/", "/about", "/contact", "/schedule"] {
            assert_eq!(policy.classify(path), None, "path: {path}");
        }
    }

    #[test]
    fn auth_routes_are_tagged() {
        let policy = RoutePolicy::default();
        assert!(policy.is_auth_route("/login"));
        assert!(policy.is_auth_route("/signup"));
        assert!(policy.is_auth_route("/reset-password"));
        assert!(!policy.is_auth_route("/therapist"));
    }

    #[test]
    fn longest_prefix_wins_on_overlap() {
        let policy = RoutePolicy::new(&[
            ("/admin", RouteClass::RoleScoped(Role::Admin)),
            ("/admin/public", RouteClass::Authenticated),
        ]);
        assert_eq!(
            policy.classify("/admin/public/report"),
            Some(RouteClass::Authenticated)
        );
        assert_eq!(
            policy.classify("/admin/users"),
            Some(RouteClass::RoleScoped(Role::Admin))
        );
    }

    #[test]
    fn role_home_is_the_bare_role_prefix() {
        let policy = RoutePolicy::default();
        assert_eq!(policy.role_home(Role::Therapist), "/therapist");
        assert_eq!(policy.role_home(Role::Client), "/client");
        assert_eq!(policy.role_home(Role::Admin), "/admin");
    }
}
