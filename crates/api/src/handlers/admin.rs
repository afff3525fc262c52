//! Handlers for the `/admin/users` resource (admin-only user management).

use std::collections::HashMap;

use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::Json;
use merit_core::error::CoreError;
use merit_core::types::DbId;
use merit_db::models::user::{CreateUser, CreateUserRequest, UpdateUser, UserResponse};
use merit_db::repositories::{RoleRepo, SessionRepo, UserRepo};
use serde::Deserialize;
use validator::Validate;

use crate::auth::password::{ensure_password_strength, hash_password};
use crate::error::{AppError, AppResult};
use crate::middleware::rbac::RequireAdmin;
use crate::response::DataResponse;
use crate::state::AppState;

/// Request body for changing a user's role.
#[derive(Debug, Deserialize)]
pub struct UpdateRoleRequest {
    pub role_id: DbId,
}

/// GET /api/v1/admin/users
pub async fn list_users(
    RequireAdmin(_principal): RequireAdmin,
    State(state): State<AppState>,
) -> AppResult<impl IntoResponse> {
    let users = UserRepo::list(&state.pool).await?;
    let role_names: HashMap<DbId, String> = RoleRepo::list(&state.pool)
        .await?
        .into_iter()
        .map(|r| (r.id, r.name))
        .collect();

    let data: Vec<UserResponse> = users
        .into_iter()
        .map(|u| {
            let role = role_names
                .get(&u.role_id)
                .cloned()
                .unwrap_or_else(|| "unknown".to_string());
            UserResponse::from_user(u, role)
        })
        .collect();

    Ok(Json(DataResponse { data }))
}

/// POST /api/v1/admin/users
pub async fn create_user(
    RequireAdmin(principal): RequireAdmin,
    State(state): State<AppState>,
    Json(input): Json<CreateUserRequest>,
) -> AppResult<impl IntoResponse> {
    input
        .validate()
        .map_err(|e| CoreError::Validation(e.to_string()))?;
    ensure_password_strength(&input.password)?;

    let role = RoleRepo::find_by_id(&state.pool, input.role_id)
        .await?
        .ok_or(CoreError::NotFound {
            entity: "Role",
            id: input.role_id,
        })?;

    let password_hash = hash_password(&input.password)
        .map_err(|e| AppError::InternalError(format!("Password hashing error: {e}")))?;

    let user = UserRepo::create(
        &state.pool,
        &CreateUser {
            username: input.username,
            email: input.email,
            password_hash,
            full_name: input.full_name,
            role_id: role.id,
        },
    )
    .await?;

    tracing::info!(user_id = %user.id, role = %role.name, admin = %principal.user_id, "user created");
    Ok((
        StatusCode::CREATED,
        Json(DataResponse {
            data: UserResponse::from_user(user, role.name),
        }),
    ))
}

/// GET /api/v1/admin/users/{id}
pub async fn get_user(
    RequireAdmin(_principal): RequireAdmin,
    State(state): State<AppState>,
    Path(id): Path<DbId>,
) -> AppResult<impl IntoResponse> {
    let user = UserRepo::find_by_id(&state.pool, id)
        .await?
        .ok_or(CoreError::NotFound { entity: "User", id })?;
    let role = RoleRepo::resolve_name(&state.pool, user.role_id).await?;

    Ok(Json(DataResponse {
        data: UserResponse::from_user(user, role),
    }))
}

/// PATCH /api/v1/admin/users/{id}
pub async fn update_user(
    RequireAdmin(_principal): RequireAdmin,
    State(state): State<AppState>,
    Path(id): Path<DbId>,
    Json(input): Json<UpdateUser>,
) -> AppResult<impl IntoResponse> {
    let user = UserRepo::update(&state.pool, id, &input)
        .await?
        .ok_or(CoreError::NotFound { entity: "User", id })?;
    let role = RoleRepo::resolve_name(&state.pool, user.role_id).await?;

    Ok(Json(DataResponse {
        data: UserResponse::from_user(user, role),
    }))
}

/// DELETE /api/v1/admin/users/{id}
///
/// Deactivates the account and revokes its sessions; rows are never
/// physically removed.
pub async fn deactivate_user(
    RequireAdmin(principal): RequireAdmin,
    State(state): State<AppState>,
    Path(id): Path<DbId>,
) -> AppResult<impl IntoResponse> {
    if !UserRepo::deactivate(&state.pool, id).await? {
        return Err(AppError::Core(CoreError::NotFound { entity: "User", id }));
    }
    SessionRepo::revoke_all_for_user(&state.pool, id).await?;

    tracing::info!(user_id = %id, admin = %principal.user_id, "user deactivated");
    Ok(StatusCode::NO_CONTENT)
}

/// PUT /api/v1/admin/users/{id}/role
///
/// Changes the user's role and revokes their sessions so stale tokens with
/// the old role's capabilities cannot be refreshed.
pub async fn update_user_role(
    RequireAdmin(principal): RequireAdmin,
    State(state): State<AppState>,
    Path(id): Path<DbId>,
    Json(input): Json<UpdateRoleRequest>,
) -> AppResult<impl IntoResponse> {
    let role = RoleRepo::find_by_id(&state.pool, input.role_id)
        .await?
        .ok_or(CoreError::NotFound {
            entity: "Role",
            id: input.role_id,
        })?;

    if !UserRepo::update_role(&state.pool, id, role.id).await? {
        return Err(AppError::Core(CoreError::NotFound { entity: "User", id }));
    }
    SessionRepo::revoke_all_for_user(&state.pool, id).await?;

    tracing::info!(user_id = %id, role = %role.name, admin = %principal.user_id, "user role changed");
    Ok(StatusCode::NO_CONTENT)
}
