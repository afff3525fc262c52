//! Capability names and the per-request permission set.
//!
//! Capabilities are granted to roles in the database and embedded into the
//! JWT at login, so authorization decisions never require a round-trip to
//! the permissions tables. The names here must match the seed data in
//! `crates/db/migrations/0001_create_identity_tables.sql`.

use std::collections::HashSet;

use crate::error::CoreError;

pub const PERM_READ_ACHIEVEMENT: &str = "read_achievement";
pub const PERM_CREATE_ACHIEVEMENT: &str = "create_achievement";
pub const PERM_UPDATE_ACHIEVEMENT: &str = "update_achievement";
pub const PERM_DELETE_ACHIEVEMENT: &str = "delete_achievement";
pub const PERM_VERIFY_ACHIEVEMENT: &str = "verify_achievement";
pub const PERM_READ_REPORT: &str = "read_report";

/// Grants every capability. Seeded for the admin role.
pub const PERM_WILDCARD: &str = "*";

/// The set of capability names carried by one authenticated request.
#[derive(Debug, Clone, Default)]
pub struct PermissionSet(HashSet<String>);

impl PermissionSet {
    /// True when the set contains `capability` or the wildcard.
    pub fn allows(&self, capability: &str) -> bool {
        self.0.contains(PERM_WILDCARD) || self.0.contains(capability)
    }

    /// Fail with [`CoreError::Forbidden`] unless `capability` is granted.
    pub fn require(&self, capability: &str) -> Result<(), CoreError> {
        if self.allows(capability) {
            Ok(())
        } else {
            Err(CoreError::Forbidden(format!(
                "Missing permission: {capability}"
            )))
        }
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl<S: Into<String>> FromIterator<S> for PermissionSet {
    fn from_iter<T: IntoIterator<Item = S>>(iter: T) -> Self {
        PermissionSet(iter.into_iter().map(Into::into).collect())
    }
}
