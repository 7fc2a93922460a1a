//! References to the principals roles are granted to.

use serde::{Deserialize, Serialize};
use std::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum PrincipalType {
    /// A human user, typically authenticated through a third-party provider.
    User,
    /// A non-human identity authenticating with a bearer token.
    ServiceAccount,
}

impl PrincipalType {
    pub fn as_str(&self) -> &'static str {
        match self {
            PrincipalType::User => "USER",
            PrincipalType::ServiceAccount => "SERVICE_ACCOUNT",
        }
    }
}

impl fmt::Display for PrincipalType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Identifies the principal a role is assigned to.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct PrincipalReference {
    #[serde(rename = "type")]
    pub principal_type: PrincipalType,
    pub id: String,
}

impl PrincipalReference {
    pub fn new(principal_type: PrincipalType, id: impl Into<String>) -> Self {
        Self {
            principal_type,
            id: id.into(),
        }
    }

    pub fn user(id: impl Into<String>) -> Self {
        Self::new(PrincipalType::User, id)
    }

    pub fn service_account(id: impl Into<String>) -> Self {
        Self::new(PrincipalType::ServiceAccount, id)
    }
}

impl fmt::Display for PrincipalReference {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}", self.principal_type, self.id)
    }
}
