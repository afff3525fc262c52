//! Well-known role names and the typed role enum.
//!
//! The string constants must match the seed data in
//! `crates/db/migrations/0001_create_identity_tables.sql`.

pub const ROLE_ADMIN: &str = "admin";
pub const ROLE_ADVISOR: &str = "advisor";
pub const ROLE_STUDENT: &str = "student";

/// The three roles the platform knows about.
///
/// JWT claims carry the role as a string; [`Role::from_name`] is the single
/// place that string is interpreted.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Role {
    Admin,
    Advisor,
    Student,
}

impl Role {
    pub fn from_name(name: &str) -> Option<Role> {
        match name {
            ROLE_ADMIN => Some(Role::Admin),
            ROLE_ADVISOR => Some(Role::Advisor),
            ROLE_STUDENT => Some(Role::Student),
            _ => None,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Role::Admin => ROLE_ADMIN,
            Role::Advisor => ROLE_ADVISOR,
            Role::Student => ROLE_STUDENT,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_known_roles_resolve() {
        assert_eq!(Role::from_name("admin"), Some(Role::Admin));
        assert_eq!(Role::from_name("advisor"), Some(Role::Advisor));
        assert_eq!(Role::from_name("student"), Some(Role::Student));
    }

    #[test]
    fn test_unknown_role_is_none() {
        assert_eq!(Role::from_name("registrar"), None);
        assert_eq!(Role::from_name(""), None);
        // Role names are case-sensitive, matching the seeded rows.
        assert_eq!(Role::from_name("Admin"), None);
    }

    #[test]
    fn test_name_round_trip() {
        for role in [Role::Admin, Role::Advisor, Role::Student] {
            assert_eq!(Role::from_name(role.as_str()), Some(role));
        }
    }
}
