//! Route definitions.
//!
//! Each submodule builds a `Router<AppState>` for one resource; this module
//! assembles them under `/api/v1`.

pub mod achievement;
pub mod admin;
pub mod auth;
pub mod health;
pub mod lecturer;
pub mod report;
pub mod student;

use axum::Router;

use crate::state::AppState;

/// Build the `/api/v1` route tree.
///
/// ```text
/// /auth/login                        login (public)
/// /auth/refresh                      refresh (public)
/// /auth/logout                       logout
/// /auth/profile                      profile
///
/// /achievements                      create, list
/// /achievements/{id}                 get, update, delete
/// /achievements/{id}/submit          submit (POST)
/// /achievements/{id}/verify          verify (POST)
/// /achievements/{id}/reject          reject (POST)
/// /achievements/{id}/attachments     add attachment (POST)
/// /achievements/{id}/history         lifecycle history
/// /achievements/{id}/student         reassign student (PATCH, admin)
///
/// /admin/users                       list, create (admin only)
/// /admin/users/{id}                  get, update, deactivate
/// /admin/users/{id}/role             change role (PUT)
///
/// /students                          role-scoped list
/// /students/{id}                     get (visibility-checked)
/// /students/{id}/advisor             assign advisor (PUT, admin)
///
/// /lecturers                         list (admin)
/// /lecturers/{id}/advisees           advisee list
///
/// /reports/statistics                platform aggregates
/// /reports/students/{student_id}     per-student counts
/// ```
pub fn api_routes() -> Router<AppState> {
    Router::new()
        .nest("/auth", auth::router())
        .nest("/achievements", achievement::router())
        .nest("/admin/users", admin::router())
        .nest("/students", student::router())
        .nest("/lecturers", lecturer::router())
        .nest("/reports", report::router())
}
