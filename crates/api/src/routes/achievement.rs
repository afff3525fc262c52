//! Route definitions for the achievement workflow.

use axum::routing::{get, patch, post};
use axum::Router;

use crate::handlers::achievement;
use crate::state::AppState;

/// Achievement routes, nested under `/achievements`.
///
/// ```text
/// POST   /                    create_achievement
/// GET    /                    list_achievements
/// GET    /{id}                get_achievement
/// PATCH  /{id}                update_achievement
/// DELETE /{id}                delete_achievement
/// POST   /{id}/submit         submit_achievement
/// POST   /{id}/verify         verify_achievement
/// POST   /{id}/reject         reject_achievement
/// POST   /{id}/attachments    add_attachment
/// GET    /{id}/history        get_history
/// PATCH  /{id}/student        reassign_achievement
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route(
            "/",
            post(achievement::create_achievement).get(achievement::list_achievements),
        )
        .route(
            "/{id}",
            get(achievement::get_achievement)
                .patch(achievement::update_achievement)
                .delete(achievement::delete_achievement),
        )
        .route("/{id}/submit", post(achievement::submit_achievement))
        .route("/{id}/verify", post(achievement::verify_achievement))
        .route("/{id}/reject", post(achievement::reject_achievement))
        .route("/{id}/attachments", post(achievement::add_attachment))
        .route("/{id}/history", get(achievement::get_history))
        .route("/{id}/student", patch(achievement::reassign_achievement))
}
