//! The authenticated caller for one request.

use crate::permissions::PermissionSet;
use crate::roles::Role;
use crate::types::DbId;

/// Identity, role, and capability set of the authenticated caller.
///
/// A `Principal` is resolved once per request (from the JWT) and passed
/// explicitly as the first argument to every workflow operation. Nothing in
/// the core reads caller identity from ambient state.
#[derive(Debug, Clone)]
pub struct Principal {
    /// The caller's user id (`users.id`), not their student/lecturer row id.
    pub user_id: DbId,
    pub role: Role,
    pub permissions: PermissionSet,
}

impl Principal {
    pub fn new(user_id: DbId, role: Role, permissions: PermissionSet) -> Self {
        Principal {
            user_id,
            role,
            permissions,
        }
    }

    pub fn is_admin(&self) -> bool {
        self.role == Role::Admin
    }
}
