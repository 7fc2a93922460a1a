//! Role-based access control primitives.
//!
//! A [`RoleAssignment`] binds a [`Role`] to a [`PrincipalReference`] at a scope.
//! The scope is an opaque string whose meaning is defined by the role, except
//! for [`ROLE_SCOPE_GLOBAL`], which matches every requested scope.
//!
//! Persistence of assignments and the decision of *which* role an operation
//! requires live in the host service; this crate only answers whether a set
//! of grants satisfies a request.

mod assignment;
mod error;
mod meta;
mod principal;
mod role;

pub use assignment::{RoleAssignment, any_matches, authorize};
pub use error::{AuthzError, AuthzResult};
pub use meta::{API_VERSION, Kind, TypeMeta, TypedObject};
pub use principal::{PrincipalReference, PrincipalType};
pub use role::{ROLE_SCOPE_GLOBAL, Role};
