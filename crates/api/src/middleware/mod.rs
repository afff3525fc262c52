//! Authentication and authorization middleware extractors.
//!
//! - [`auth::AuthUser`] -- Extracts the request [`Principal`] from a JWT Bearer token.
//! - [`rbac::RequireAdmin`] -- Requires the `admin` role.
//! - [`rbac::RequireAdvisor`] -- Requires `advisor` or `admin` role.
//!
//! [`Principal`]: merit_core::principal::Principal

pub mod auth;
pub mod rbac;
