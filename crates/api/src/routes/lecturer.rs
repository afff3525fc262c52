//! Route definitions for the lecturer directory.

use axum::routing::get;
use axum::Router;

use crate::handlers::lecturer;
use crate::state::AppState;

/// Lecturer routes, nested under `/lecturers`.
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", get(lecturer::list_lecturers))
        .route("/{id}/advisees", get(lecturer::list_advisees))
}
