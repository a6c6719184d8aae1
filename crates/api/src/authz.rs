//! API-side authorization guard.
//!
//! Enforces authorization at the handler boundary, keeping the inventory
//! service and store auth-agnostic.

use bookstore_auth::{authorize, AuthzError, Permission, Principal, Role};

use crate::context::PrincipalContext;

/// Check that the request principal holds a permission.
///
/// Intended to be called at the top of every mutating handler.
pub fn require_permission(
    principal: &PrincipalContext,
    required: &Permission,
) -> Result<(), AuthzError> {
    let principal = Principal {
        principal_id: principal.principal_id(),
        permissions: permissions_from_roles(principal.roles()),
    };

    authorize(&principal, required)
}

/// Minimal role→permission mapping stub.
///
/// Convention: "admin" grants all permissions, matching the single
/// admin-user setup this API is deployed with. This stays simple until a
/// real policy source exists.
fn permissions_from_roles(roles: &[Role]) -> Vec<Permission> {
    if roles.iter().any(|r| r.as_str() == "admin") {
        return vec![Permission::new("*")];
    }

    Vec::new()
}
