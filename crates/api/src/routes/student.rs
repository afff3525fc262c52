//! Route definitions for the student directory.

use axum::routing::{get, put};
use axum::Router;

use crate::handlers::student;
use crate::state::AppState;

/// Student routes, nested under `/students`.
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", get(student::list_students))
        .route("/{id}", get(student::get_student))
        .route("/{id}/advisor", put(student::update_advisor))
}
