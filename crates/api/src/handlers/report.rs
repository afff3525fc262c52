//! Handlers for the `/reports` resource (aggregate statistics).

use axum::extract::{Path, State};
use axum::response::IntoResponse;
use axum::Json;
use merit_core::error::CoreError;
use merit_core::permissions::PERM_READ_REPORT;
use merit_core::roles::Role;
use merit_core::types::DbId;
use merit_db::models::report::{StatisticsReport, StudentReport};
use merit_db::repositories::{ReportRepo, StudentRepo};

use crate::error::{AppError, AppResult};
use crate::middleware::auth::AuthUser;
use crate::response::DataResponse;
use crate::state::AppState;

/// GET /api/v1/reports/statistics
///
/// Platform-wide aggregates; requires the report capability.
pub async fn statistics(
    auth: AuthUser,
    State(state): State<AppState>,
) -> AppResult<impl IntoResponse> {
    auth.principal.permissions.require(PERM_READ_REPORT)?;

    let report = StatisticsReport {
        counts: ReportRepo::status_counts(&state.pool).await?,
        by_type: ReportRepo::counts_by_type(&state.pool).await?,
        by_level: ReportRepo::counts_by_level(&state.pool).await?,
        by_period: ReportRepo::counts_by_period(&state.pool).await?,
        top_students: ReportRepo::top_students(&state.pool).await?,
    };

    Ok(Json(DataResponse { data: report }))
}

/// GET /api/v1/reports/students/{student_id}
///
/// Per-student counts. Visible to the student themselves, their advisor,
/// and admins.
pub async fn student_report(
    auth: AuthUser,
    State(state): State<AppState>,
    Path(student_id): Path<DbId>,
) -> AppResult<impl IntoResponse> {
    let student = StudentRepo::find_by_id(&state.pool, student_id)
        .await?
        .ok_or(CoreError::NotFound {
            entity: "Student",
            id: student_id,
        })?;

    let visible = match auth.principal.role {
        Role::Admin => true,
        // A student may always see their own report, without the report capability.
        Role::Student => student.user_id == auth.principal.user_id,
        Role::Advisor => {
            auth.principal.permissions.require(PERM_READ_REPORT)?;
            StudentRepo::is_advisee(&state.pool, auth.principal.user_id, student.id).await?
        }
    };
    if !visible {
        return Err(AppError::Core(CoreError::Forbidden(
            "Report is not visible to you".into(),
        )));
    }

    let report = StudentReport {
        student_id: student.id,
        counts: ReportRepo::status_counts_for_student(&state.pool, student.id).await?,
    };

    Ok(Json(DataResponse { data: report }))
}
