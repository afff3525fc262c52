//! Handlers for the achievement workflow endpoints.
//!
//! Thin wrappers over [`crate::workflow::engine`]; every operation takes the
//! authenticated principal explicitly.

use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::Json;
use merit_core::types::DbId;
use merit_db::models::achievement::{CreateAchievement, NewAttachment, UpdateAchievement};
use serde::Deserialize;

use crate::error::AppResult;
use crate::middleware::auth::AuthUser;
use crate::query::{AchievementFilter, PaginationParams};
use crate::response::{DataResponse, PageResponse};
use crate::state::AppState;
use crate::workflow::engine;

/// Request body for the reject endpoint.
#[derive(Debug, Deserialize)]
pub struct RejectRequest {
    pub reason: String,
}

/// Request body for the admin reassignment endpoint.
#[derive(Debug, Deserialize)]
pub struct ReassignRequest {
    pub student_id: DbId,
}

/// POST /api/v1/achievements
pub async fn create_achievement(
    auth: AuthUser,
    State(state): State<AppState>,
    Json(input): Json<CreateAchievement>,
) -> AppResult<impl IntoResponse> {
    let reference = engine::create(&state.pool, &auth.principal, input).await?;
    Ok((StatusCode::CREATED, Json(DataResponse { data: reference })))
}

/// GET /api/v1/achievements
///
/// Lists the achievements visible to the caller, paginated newest-first.
pub async fn list_achievements(
    auth: AuthUser,
    State(state): State<AppState>,
    Query(filter): Query<AchievementFilter>,
    Query(page): Query<PaginationParams>,
) -> AppResult<impl IntoResponse> {
    let (views, total) = engine::list(&state.pool, &auth.principal, filter, page).await?;
    let (page, page_size) = page.clamp();
    Ok(Json(PageResponse {
        data: views,
        page,
        page_size,
        total,
    }))
}

/// GET /api/v1/achievements/{id}
pub async fn get_achievement(
    auth: AuthUser,
    State(state): State<AppState>,
    Path(id): Path<DbId>,
) -> AppResult<impl IntoResponse> {
    let view = engine::read(&state.pool, &auth.principal, id).await?;
    Ok(Json(DataResponse { data: view }))
}

/// PATCH /api/v1/achievements/{id}
pub async fn update_achievement(
    auth: AuthUser,
    State(state): State<AppState>,
    Path(id): Path<DbId>,
    Json(patch): Json<UpdateAchievement>,
) -> AppResult<impl IntoResponse> {
    engine::update(&state.pool, &auth.principal, id, patch).await?;
    Ok(StatusCode::NO_CONTENT)
}

/// DELETE /api/v1/achievements/{id}
pub async fn delete_achievement(
    auth: AuthUser,
    State(state): State<AppState>,
    Path(id): Path<DbId>,
) -> AppResult<impl IntoResponse> {
    engine::delete(&state.pool, &auth.principal, id).await?;
    Ok(StatusCode::NO_CONTENT)
}

/// POST /api/v1/achievements/{id}/submit
pub async fn submit_achievement(
    auth: AuthUser,
    State(state): State<AppState>,
    Path(id): Path<DbId>,
) -> AppResult<impl IntoResponse> {
    engine::submit(&state.pool, &auth.principal, id).await?;
    Ok(StatusCode::NO_CONTENT)
}

/// POST /api/v1/achievements/{id}/verify
pub async fn verify_achievement(
    auth: AuthUser,
    State(state): State<AppState>,
    Path(id): Path<DbId>,
) -> AppResult<impl IntoResponse> {
    engine::verify(&state.pool, &auth.principal, id).await?;
    Ok(StatusCode::NO_CONTENT)
}

/// POST /api/v1/achievements/{id}/reject
pub async fn reject_achievement(
    auth: AuthUser,
    State(state): State<AppState>,
    Path(id): Path<DbId>,
    Json(input): Json<RejectRequest>,
) -> AppResult<impl IntoResponse> {
    engine::reject(&state.pool, &auth.principal, id, &input.reason).await?;
    Ok(StatusCode::NO_CONTENT)
}

/// POST /api/v1/achievements/{id}/attachments
pub async fn add_attachment(
    auth: AuthUser,
    State(state): State<AppState>,
    Path(id): Path<DbId>,
    Json(input): Json<NewAttachment>,
) -> AppResult<impl IntoResponse> {
    engine::add_attachment(&state.pool, &auth.principal, id, input).await?;
    Ok(StatusCode::NO_CONTENT)
}

/// GET /api/v1/achievements/{id}/history
pub async fn get_history(
    auth: AuthUser,
    State(state): State<AppState>,
    Path(id): Path<DbId>,
) -> AppResult<impl IntoResponse> {
    let events = engine::history(&state.pool, &auth.principal, id).await?;
    Ok(Json(DataResponse { data: events }))
}

/// PATCH /api/v1/achievements/{id}/student
pub async fn reassign_achievement(
    auth: AuthUser,
    State(state): State<AppState>,
    Path(id): Path<DbId>,
    Json(input): Json<ReassignRequest>,
) -> AppResult<impl IntoResponse> {
    engine::reassign_student(&state.pool, &auth.principal, id, input.student_id).await?;
    Ok(StatusCode::NO_CONTENT)
}
