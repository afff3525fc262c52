//! Handlers for the `/lecturers` directory resource.

use axum::extract::{Path, State};
use axum::response::IntoResponse;
use axum::Json;
use merit_core::error::CoreError;
use merit_core::types::DbId;
use merit_db::repositories::{LecturerRepo, StudentRepo};

use crate::error::{AppError, AppResult};
use crate::middleware::rbac::{RequireAdmin, RequireAdvisor};
use crate::response::DataResponse;
use crate::state::AppState;

/// GET /api/v1/lecturers
pub async fn list_lecturers(
    RequireAdmin(_principal): RequireAdmin,
    State(state): State<AppState>,
) -> AppResult<impl IntoResponse> {
    let data = LecturerRepo::list(&state.pool).await?;
    Ok(Json(DataResponse { data }))
}

/// GET /api/v1/lecturers/{id}/advisees
///
/// The lecturer's advisees; visible to the lecturer themselves and admins.
pub async fn list_advisees(
    RequireAdvisor(principal): RequireAdvisor,
    State(state): State<AppState>,
    Path(id): Path<DbId>,
) -> AppResult<impl IntoResponse> {
    let lecturer = LecturerRepo::find_by_id(&state.pool, id)
        .await?
        .ok_or(CoreError::NotFound {
            entity: "Lecturer",
            id,
        })?;

    if !principal.is_admin() && lecturer.user_id != principal.user_id {
        return Err(AppError::Core(CoreError::Forbidden(
            "Advisee list is not visible to you".into(),
        )));
    }

    let data = StudentRepo::list_for_advisor(&state.pool, lecturer.id).await?;
    Ok(Json(DataResponse { data }))
}
