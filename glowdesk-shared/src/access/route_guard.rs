/// Navigation route guard
///
/// Gates dashboard navigation for a target role: when the principal's role
/// matches and the current path is outside the allowlist, the guard yields a
/// redirect to the fallback path, at most once per guard instance. No
/// decision is made before the principal is known.
///
/// The guard is a pure decision component; the caller re-evaluates whenever
/// the path, the principal, or the allowlist changes.
///
/// # Example
///
/// ```
/// use glowdesk_shared::access::{Principal, Role, RouteGuard};
/// use uuid::Uuid;
///
/// let mut guard = RouteGuard::default();
/// let sales = Principal::new(Uuid::new_v4(), Role::Sales, vec![]);
///
/// // Sales on a disallowed path is sent to the point of sale
/// assert_eq!(
///     guard.evaluate(Some(&sales), "/dashboard/reports"),
///     Some("/dashboard/pos")
/// );
///
/// // The redirect fires only once
/// assert_eq!(guard.evaluate(Some(&sales), "/dashboard/reports"), None);
/// ```

use super::principal::{Principal, Role};

/// Default allowed paths for sales principals: point of sale and inventory.
pub const DEFAULT_ALLOWED_PATHS: [&str; 2] = ["/dashboard/pos", "/dashboard/inventory"];

/// One-shot navigation guard for a target role
#[derive(Debug, Clone)]
pub struct RouteGuard {
    target_role: Role,
    allowed_paths: Vec<String>,
    fallback: String,
    redirected: bool,
}

impl Default for RouteGuard {
    /// Guards sales principals into the point-of-sale and inventory paths,
    /// redirecting to the point of sale.
    fn default() -> Self {
        Self::new(
            Role::Sales,
            DEFAULT_ALLOWED_PATHS.iter().map(|p| p.to_string()).collect(),
        )
    }
}

impl RouteGuard {
    /// Creates a guard for a role and allowlist. The fallback is the first
    /// allowed path; an empty allowlist falls back to the dashboard root.
    pub fn new(target_role: Role, allowed_paths: Vec<String>) -> Self {
        let fallback = allowed_paths
            .first()
            .cloned()
            .unwrap_or_else(|| "/dashboard".to_string());

        Self {
            target_role,
            allowed_paths,
            fallback,
            redirected: false,
        }
    }

    /// Evaluates the guard for the current navigation state.
    ///
    /// Returns the redirect target when the principal's role matches the
    /// target role and the current path is neither an allowed path nor a
    /// `/`-delimited descendant of one. Returns `None` when there is no
    /// principal yet, for non-matching roles, for allowed paths, and after
    /// the guard has already redirected once.
    pub fn evaluate(&mut self, principal: Option<&Principal>, current_path: &str) -> Option<&str> {
        if self.redirected {
            return None;
        }

        // No redirect decision before authentication resolves
        let principal = principal?;

        if principal.role != self.target_role {
            return None;
        }

        if self.is_allowed(current_path) {
            return None;
        }

        self.redirected = true;
        Some(&self.fallback)
    }

    /// True when the path equals an allowed path or is a descendant of one.
    fn is_allowed(&self, path: &str) -> bool {
        self.allowed_paths.iter().any(|allowed| {
            path == allowed
                || path
                    .strip_prefix(allowed.as_str())
                    .is_some_and(|rest| rest.starts_with('/'))
        })
    }

    /// Re-arms the guard, e.g. after the principal changes.
    pub fn reset(&mut self) {
        self.redirected = false;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use uuid::Uuid;

    fn sales() -> Principal {
        Principal::new(Uuid::new_v4(), Role::Sales, vec![])
    }

    #[test]
    fn test_redirects_sales_off_disallowed_paths() {
        let mut guard = RouteGuard::default();
        assert_eq!(
            guard.evaluate(Some(&sales()), "/dashboard/reports"),
            Some("/dashboard/pos")
        );
    }

    #[test]
    fn test_descendant_paths_are_allowed() {
        let mut guard = RouteGuard::default();
        assert_eq!(guard.evaluate(Some(&sales()), "/dashboard/pos/history"), None);
        assert_eq!(guard.evaluate(Some(&sales()), "/dashboard/inventory"), None);
    }

    #[test]
    fn test_prefix_match_requires_separator() {
        let mut guard = RouteGuard::default();
        // "/dashboard/pos-extras" is not a descendant of "/dashboard/pos"
        assert_eq!(
            guard.evaluate(Some(&sales()), "/dashboard/pos-extras"),
            Some("/dashboard/pos")
        );
    }

    #[test]
    fn test_no_principal_no_redirect() {
        let mut guard = RouteGuard::default();
        assert_eq!(guard.evaluate(None, "/dashboard/reports"), None);
    }

    #[test]
    fn test_other_roles_are_not_redirected() {
        let mut guard = RouteGuard::default();
        let admin = Principal::new(Uuid::new_v4(), Role::Admin, vec![]);
        assert_eq!(guard.evaluate(Some(&admin), "/dashboard/reports"), None);
    }

    #[test]
    fn test_redirect_fires_once() {
        let mut guard = RouteGuard::default();
        let p = sales();

        assert!(guard.evaluate(Some(&p), "/dashboard/reports").is_some());
        assert_eq!(guard.evaluate(Some(&p), "/dashboard/reports"), None);

        guard.reset();
        assert!(guard.evaluate(Some(&p), "/dashboard/reports").is_some());
    }

    #[test]
    fn test_custom_allowlist_fallback_is_first_entry() {
        let mut guard = RouteGuard::new(
            Role::Staff,
            vec!["/dashboard/schedule".to_string(), "/dashboard/clients".to_string()],
        );
        let staff = Principal::new(Uuid::new_v4(), Role::Staff, vec![]);

        assert_eq!(
            guard.evaluate(Some(&staff), "/dashboard/reports"),
            Some("/dashboard/schedule")
        );
    }
}
