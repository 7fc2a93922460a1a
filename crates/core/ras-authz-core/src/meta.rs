//! Type metadata envelope for API resources.
//!
//! Domain types stay free of wire concerns; the envelope is built at the
//! serialization boundary and flattens the payload next to `apiVersion` and
//! `kind`.

use serde::{Deserialize, Serialize};

use crate::error::{AuthzError, AuthzResult};

/// API version stamped on every typed object this crate emits.
pub const API_VERSION: &str = "ras.dev/v1";

/// Associates a canonical kind string with a resource type.
pub trait Kind {
    const KIND: &'static str;
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TypeMeta {
    pub api_version: String,
    pub kind: String,
}

impl TypeMeta {
    pub fn of<T: Kind>() -> Self {
        Self {
            api_version: API_VERSION.to_string(),
            kind: T::KIND.to_string(),
        }
    }
}

/// A resource together with its type metadata, as it appears on the wire.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TypedObject<T> {
    #[serde(flatten)]
    pub type_meta: TypeMeta,
    #[serde(flatten)]
    pub payload: T,
}

impl<T: Kind> TypedObject<T> {
    pub fn new(payload: T) -> Self {
        Self {
            type_meta: TypeMeta::of::<T>(),
            payload,
        }
    }

    /// Unwraps the payload after checking the envelope describes a `T`.
    pub fn into_inner(self) -> AuthzResult<T> {
        if self.type_meta.api_version != API_VERSION {
            return Err(AuthzError::UnsupportedApiVersion(self.type_meta.api_version));
        }
        if self.type_meta.kind != T::KIND {
            return Err(AuthzError::UnexpectedKind {
                expected: T::KIND.to_string(),
                found: self.type_meta.kind,
            });
        }
        Ok(self.payload)
    }
}

impl<T: Kind> From<T> for TypedObject<T> {
    fn from(payload: T) -> Self {
        Self::new(payload)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{PrincipalReference, Role, RoleAssignment};

    #[test]
    fn role_assignment_envelope_is_flat() {
        let assignment = RoleAssignment::new(
            Role::PROJECT_DEVELOPER,
            PrincipalReference::user("octocat"),
            "italian",
        );

        let json = serde_json::to_value(TypedObject::from(assignment.clone())).unwrap();
        assert_eq!(
            json,
            serde_json::json!({
                "apiVersion": API_VERSION,
                "kind": "RoleAssignment",
                "role": "PROJECT_DEVELOPER",
                "principal": { "type": "USER", "id": "octocat" },
                "scope": "italian"
            })
        );

        let parsed: TypedObject<RoleAssignment> = serde_json::from_value(json).unwrap();
        assert_eq!(parsed.into_inner().unwrap(), assignment);
    }

    #[test]
    fn into_inner_rejects_mismatched_metadata() {
        let body = serde_json::json!({
            "apiVersion": API_VERSION,
            "kind": "ServiceAccount",
            "role": "READER",
            "principal": { "type": "USER", "id": "octocat" }
        });
        let parsed: TypedObject<RoleAssignment> = serde_json::from_value(body).unwrap();
        assert_eq!(
            parsed.into_inner().unwrap_err(),
            AuthzError::UnexpectedKind {
                expected: "RoleAssignment".to_string(),
                found: "ServiceAccount".to_string(),
            }
        );

        let body = serde_json::json!({
            "apiVersion": "ras.dev/v0",
            "kind": "RoleAssignment",
            "role": "READER",
            "principal": { "type": "USER", "id": "octocat" }
        });
        let parsed: TypedObject<RoleAssignment> = serde_json::from_value(body).unwrap();
        assert!(matches!(
            parsed.into_inner(),
            Err(AuthzError::UnsupportedApiVersion(version)) if version == "ras.dev/v0"
        ));
    }
}
