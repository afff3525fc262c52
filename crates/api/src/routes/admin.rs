//! Route definitions for admin user management.

use axum::routing::{get, put};
use axum::Router;

use crate::handlers::admin;
use crate::state::AppState;

/// User management routes, nested under `/admin/users`. All admin-only via
/// the [`RequireAdmin`](crate::middleware::rbac::RequireAdmin) extractor.
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", get(admin::list_users).post(admin::create_user))
        .route(
            "/{id}",
            get(admin::get_user)
                .patch(admin::update_user)
                .delete(admin::deactivate_user),
        )
        .route("/{id}/role", put(admin::update_user_role))
}
