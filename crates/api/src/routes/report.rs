//! Route definitions for aggregate reports.

use axum::routing::get;
use axum::Router;

use crate::handlers::report;
use crate::state::AppState;

/// Report routes, nested under `/reports`.
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/statistics", get(report::statistics))
        .route("/students/{student_id}", get(report::student_report))
}
