use std::collections::HashSet;

use thiserror::Error;

use crate::{Permission, PrincipalId};

/// A fully resolved principal for authorization decisions.
///
/// Construction of this object is intentionally decoupled from storage and
/// transport: the API layer derives the permission set from token roles and
/// a policy source.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Principal {
    pub principal_id: PrincipalId,
    pub permissions: Vec<Permission>,
}

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum AuthzError {
    #[error("forbidden: missing permission '{0}'")]
    Forbidden(String),
}

/// Authorize a principal against a required permission.
///
/// - No IO
/// - No panics
/// - No business logic (pure policy check)
pub fn authorize(principal: &Principal, required: &Permission) -> Result<(), AuthzError> {
    let perms: HashSet<&str> = principal.permissions.iter().map(|p| p.as_str()).collect();

    if perms.contains("*") || perms.contains(required.as_str()) {
        Ok(())
    } else {
        Err(AuthzError::Forbidden(required.as_str().to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn principal(perms: &[&'static str]) -> Principal {
        Principal {
            principal_id: PrincipalId::new(),
            permissions: perms.iter().map(|p| Permission::new(*p)).collect(),
        }
    }

    #[test]
    fn grants_exact_permission() {
        let p = principal(&["books.write"]);
        assert!(authorize(&p, &Permission::new("books.write")).is_ok());
    }

    #[test]
    fn wildcard_grants_everything() {
        let p = principal(&["*"]);
        assert!(authorize(&p, &Permission::new("books.write")).is_ok());
    }

    #[test]
    fn missing_permission_is_forbidden() {
        let p = principal(&["books.read"]);
        let err = authorize(&p, &Permission::new("books.write")).unwrap_err();
        assert_eq!(err, AuthzError::Forbidden("books.write".to_string()));
    }
}
