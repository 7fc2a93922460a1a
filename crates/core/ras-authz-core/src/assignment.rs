//! Role assignments and the scope matching rule.

use serde::{Deserialize, Serialize};

use crate::error::{AuthzError, AuthzResult};
use crate::meta::Kind;
use crate::principal::PrincipalReference;
use crate::role::{ROLE_SCOPE_GLOBAL, Role};

/// The grant of a [`Role`] to a principal, qualified by a scope.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct RoleAssignment {
    pub role: Role,
    pub principal: PrincipalReference,
    /// Opaque qualifier interpreted relative to `role`. Empty means the role
    /// takes no scope; [`ROLE_SCOPE_GLOBAL`] matches every scope.
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub scope: String,
}

impl RoleAssignment {
    pub fn new(role: Role, principal: PrincipalReference, scope: impl Into<String>) -> Self {
        Self {
            role,
            principal,
            scope: scope.into(),
        }
    }

    /// Grants `role` to `principal` for every scope.
    pub fn global(role: Role, principal: PrincipalReference) -> Self {
        Self::new(role, principal, ROLE_SCOPE_GLOBAL)
    }

    pub fn is_global(&self) -> bool {
        self.scope == ROLE_SCOPE_GLOBAL
    }

    /// Returns true if this assignment grants `role` at `scope`.
    ///
    /// Roles must be equal. Scopes must be equal, unless this assignment is
    /// global, in which case any requested scope (including the empty one)
    /// matches. There is no prefix or hierarchical matching.
    pub fn matches(&self, role: &Role, scope: &str) -> bool {
        self.role == *role && (self.scope == scope || self.is_global())
    }
}

impl Kind for RoleAssignment {
    const KIND: &'static str = "RoleAssignment";
}

/// Returns true if any of `assignments` grants `role` at `scope`.
pub fn any_matches<'a, I>(assignments: I, role: &Role, scope: &str) -> bool
where
    I: IntoIterator<Item = &'a RoleAssignment>,
{
    assignments.into_iter().any(|a| a.matches(role, scope))
}

/// Finds the first assignment granting `role` at `scope`.
///
/// # Returns
/// * `Ok(&RoleAssignment)` with the satisfying grant
/// * `Err(AuthzError::PermissionDenied)` if none of the assignments match
pub fn authorize<'a, I>(
    assignments: I,
    role: &Role,
    scope: &str,
) -> AuthzResult<&'a RoleAssignment>
where
    I: IntoIterator<Item = &'a RoleAssignment>,
{
    assignments
        .into_iter()
        .find(|a| a.matches(role, scope))
        .ok_or_else(|| AuthzError::PermissionDenied {
            role: role.clone(),
            scope: scope.to_string(),
        })
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    fn octocat() -> PrincipalReference {
        PrincipalReference::user("octocat")
    }

    #[test]
    fn scoped_assignment_matches_only_its_scope() {
        let assignment = RoleAssignment::new(Role::PROJECT_ADMIN, octocat(), "italian");

        assert!(assignment.matches(&Role::PROJECT_ADMIN, "italian"));
        assert!(!assignment.matches(&Role::PROJECT_ADMIN, "french"));
        assert!(!assignment.matches(&Role::PROJECT_ADMIN, "ital"));
        assert!(!assignment.matches(&Role::PROJECT_ADMIN, ""));
        assert!(!assignment.matches(&Role::PROJECT_ADMIN, ROLE_SCOPE_GLOBAL));
    }

    #[test]
    fn global_assignment_matches_every_scope() {
        let assignment = RoleAssignment::global(Role::PROJECT_ADMIN, octocat());

        assert!(assignment.is_global());
        assert!(assignment.matches(&Role::PROJECT_ADMIN, "italian"));
        assert!(assignment.matches(&Role::PROJECT_ADMIN, ""));
        assert!(assignment.matches(&Role::PROJECT_ADMIN, ROLE_SCOPE_GLOBAL));
    }

    #[test]
    fn unscoped_assignment_matches_empty_scope() {
        let assignment = RoleAssignment::new(Role::READER, octocat(), "");

        assert!(assignment.matches(&Role::READER, ""));
        assert!(!assignment.matches(&Role::READER, "italian"));
    }

    #[test]
    fn assignment_never_matches_another_role() {
        let assignment = RoleAssignment::global(Role::READER, octocat());

        assert!(!assignment.matches(&Role::ADMIN, ""));
        assert!(!assignment.matches(&Role::ADMIN, ROLE_SCOPE_GLOBAL));
    }

    #[test]
    fn authorize_returns_first_matching_grant() {
        let assignments = vec![
            RoleAssignment::new(Role::PROJECT_USER, octocat(), "italian"),
            RoleAssignment::global(Role::PROJECT_DEVELOPER, octocat()),
            RoleAssignment::new(Role::PROJECT_DEVELOPER, octocat(), "french"),
        ];

        let granted = authorize(&assignments, &Role::PROJECT_DEVELOPER, "french").unwrap();
        assert!(granted.is_global());

        assert!(any_matches(&assignments, &Role::PROJECT_USER, "italian"));
        assert!(!any_matches(&assignments, &Role::PROJECT_USER, "french"));
    }

    #[test]
    fn authorize_denies_when_nothing_matches() {
        let assignments = vec![RoleAssignment::new(Role::PROJECT_USER, octocat(), "italian")];

        let err = authorize(&assignments, &Role::PROJECT_ADMIN, "italian").unwrap_err();
        assert_eq!(
            err,
            AuthzError::PermissionDenied {
                role: Role::PROJECT_ADMIN,
                scope: "italian".to_string(),
            }
        );

        let none: Vec<RoleAssignment> = Vec::new();
        assert!(authorize(&none, &Role::READER, "").is_err());
    }

    #[test]
    fn empty_scope_is_omitted_from_json() {
        let assignment = RoleAssignment::new(Role::READER, octocat(), "");
        let json = serde_json::to_value(&assignment).unwrap();
        assert_eq!(
            json,
            serde_json::json!({
                "role": "READER",
                "principal": { "type": "USER", "id": "octocat" }
            })
        );

        let parsed: RoleAssignment = serde_json::from_value(json).unwrap();
        assert_eq!(parsed, assignment);
    }

    fn role_name() -> impl Strategy<Value = String> {
        "[A-Z_]{1,16}"
    }

    proptest! {
        #[test]
        fn global_matches_any_requested_scope(role in role_name(), scope in ".*") {
            let assignment = RoleAssignment::global(Role::new(role.clone()), octocat());
            prop_assert!(assignment.matches(&Role::new(role), &scope));
        }

        #[test]
        fn scoped_matches_exactly_its_scope(
            role in role_name(),
            scope in ".*",
            other in ".*",
        ) {
            prop_assume!(scope != ROLE_SCOPE_GLOBAL);
            let role = Role::new(role);
            let assignment = RoleAssignment::new(role.clone(), octocat(), scope.clone());

            prop_assert!(assignment.matches(&role, &scope));
            prop_assert_eq!(assignment.matches(&role, &other), other == scope);
        }

        #[test]
        fn never_matches_a_different_role(
            granted in role_name(),
            requested in role_name(),
            scope in prop_oneof![Just(ROLE_SCOPE_GLOBAL.to_string()), ".*"],
        ) {
            prop_assume!(granted != requested);
            let assignment = RoleAssignment::new(Role::new(granted), octocat(), scope.clone());
            prop_assert!(!assignment.matches(&Role::new(requested), &scope));
        }
    }
}
