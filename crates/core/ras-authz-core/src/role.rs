//! Role identifiers and the reserved global scope.

use serde::{Deserialize, Serialize};
use std::borrow::Cow;
use std::fmt;

/// Scope value that satisfies any requested scope for a role.
pub const ROLE_SCOPE_GLOBAL: &str = "*";

/// A named permission that can be granted to a principal.
///
/// Roles compare by exact string equality. The associated constants cover the
/// roles the platform ships with; any other name is equally valid.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Role(Cow<'static, str>);

impl Role {
    /// Full control over the platform.
    pub const ADMIN: Role = Role::from_static("ADMIN");
    /// May create events for any project.
    pub const EVENT_CREATOR: Role = Role::from_static("EVENT_CREATOR");
    /// May create new projects.
    pub const PROJECT_CREATOR: Role = Role::from_static("PROJECT_CREATOR");
    /// Read-only access to the platform.
    pub const READER: Role = Role::from_static("READER");
    /// Full control over a single project.
    pub const PROJECT_ADMIN: Role = Role::from_static("PROJECT_ADMIN");
    /// May update a single project.
    pub const PROJECT_DEVELOPER: Role = Role::from_static("PROJECT_DEVELOPER");
    /// May create events for a single project.
    pub const PROJECT_USER: Role = Role::from_static("PROJECT_USER");

    pub fn new(name: impl Into<String>) -> Self {
        Self(Cow::Owned(name.into()))
    }

    pub const fn from_static(name: &'static str) -> Self {
        Self(Cow::Borrowed(name))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for Role {
    fn from(name: &str) -> Self {
        Self::new(name)
    }
}

impl From<String> for Role {
    fn from(name: String) -> Self {
        Self::new(name)
    }
}

impl AsRef<str> for Role {
    fn as_ref(&self) -> &str {
        self.as_str()
    }
}
