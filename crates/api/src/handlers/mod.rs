//! Request handlers.
//!
//! Handlers parse the request, hand the authenticated [`Principal`] and the
//! payload to the workflow engine or a repository, and shape the response.
//! No authorization logic lives here beyond endpoint-level role extractors.
//!
//! [`Principal`]: merit_core::principal::Principal

pub mod achievement;
pub mod admin;
pub mod auth;
pub mod lecturer;
pub mod report;
pub mod student;
