//! Authorization error types.

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::role::Role;

pub type AuthzResult<T> = Result<T, AuthzError>;

#[derive(Debug, Error, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum AuthzError {
    /// No role assignment grants the requested role at the requested scope.
    #[error("Permission denied: role {role} is not granted at scope {scope:?}")]
    PermissionDenied { role: Role, scope: String },

    /// A typed object carried a different kind than the one requested.
    #[error("Unexpected kind: expected {expected}, found {found}")]
    UnexpectedKind { expected: String, found: String },

    #[error("Unsupported API version: {0}")]
    UnsupportedApiVersion(String),
}
