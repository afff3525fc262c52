//! Handlers for the `/students` directory resource.

use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::Json;
use merit_core::error::CoreError;
use merit_core::roles::Role;
use merit_core::types::DbId;
use merit_db::models::student::AssignAdvisor;
use merit_db::repositories::{LecturerRepo, StudentRepo};

use crate::error::{AppError, AppResult};
use crate::middleware::auth::AuthUser;
use crate::middleware::rbac::RequireAdmin;
use crate::response::DataResponse;
use crate::state::AppState;

/// GET /api/v1/students
///
/// Role-scoped listing: admins see everyone, advisors their advisees,
/// students only themselves.
pub async fn list_students(
    auth: AuthUser,
    State(state): State<AppState>,
) -> AppResult<impl IntoResponse> {
    let data = match auth.principal.role {
        Role::Admin => StudentRepo::list(&state.pool).await?,
        Role::Advisor => {
            let lecturer = LecturerRepo::find_by_user_id(&state.pool, auth.principal.user_id)
                .await?
                .ok_or_else(|| {
                    CoreError::Validation("No lecturer record for this account".into())
                })?;
            StudentRepo::list_for_advisor(&state.pool, lecturer.id).await?
        }
        Role::Student => StudentRepo::find_by_user_id(&state.pool, auth.principal.user_id)
            .await?
            .into_iter()
            .collect(),
    };

    Ok(Json(DataResponse { data }))
}

/// GET /api/v1/students/{id}
pub async fn get_student(
    auth: AuthUser,
    State(state): State<AppState>,
    Path(id): Path<DbId>,
) -> AppResult<impl IntoResponse> {
    let student = StudentRepo::find_by_id(&state.pool, id)
        .await?
        .ok_or(CoreError::NotFound {
            entity: "Student",
            id,
        })?;

    let visible = match auth.principal.role {
        Role::Admin => true,
        Role::Student => student.user_id == auth.principal.user_id,
        Role::Advisor => {
            StudentRepo::is_advisee(&state.pool, auth.principal.user_id, student.id).await?
        }
    };
    if !visible {
        return Err(AppError::Core(CoreError::Forbidden(
            "Student record is not visible to you".into(),
        )));
    }

    Ok(Json(DataResponse { data: student }))
}

/// PUT /api/v1/students/{id}/advisor
///
/// Assign or change a student's advisor (admin only).
pub async fn update_advisor(
    RequireAdmin(principal): RequireAdmin,
    State(state): State<AppState>,
    Path(id): Path<DbId>,
    Json(input): Json<AssignAdvisor>,
) -> AppResult<impl IntoResponse> {
    let lecturer = LecturerRepo::find_by_id(&state.pool, input.advisor_id)
        .await?
        .ok_or(CoreError::NotFound {
            entity: "Lecturer",
            id: input.advisor_id,
        })?;

    if !StudentRepo::update_advisor(&state.pool, id, lecturer.id).await? {
        return Err(AppError::Core(CoreError::NotFound {
            entity: "Student",
            id,
        }));
    }

    tracing::info!(student_id = %id, advisor_id = %lecturer.id, admin = %principal.user_id, "advisor assigned");
    Ok(StatusCode::NO_CONTENT)
}
