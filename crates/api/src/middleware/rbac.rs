//! Role-based access control (RBAC) extractors.
//!
//! Each extractor wraps [`AuthUser`] and rejects requests whose role does not
//! meet the minimum requirement. Use these in route handlers to enforce
//! authorization at the type level. Row-level rules stay in the workflow
//! policy; these only gate whole endpoints.

use axum::extract::FromRequestParts;
use axum::http::request::Parts;
use merit_core::error::CoreError;
use merit_core::principal::Principal;
use merit_core::roles::Role;

use super::auth::AuthUser;
use crate::error::AppError;
use crate::state::AppState;

/// Requires the `admin` role. Rejects with 403 Forbidden otherwise.
///
/// ```ignore
/// async fn admin_only(RequireAdmin(principal): RequireAdmin) -> AppResult<Json<()>> {
///     // principal is guaranteed to be an admin here
///     Ok(Json(()))
/// }
/// ```
pub struct RequireAdmin(pub Principal);

impl FromRequestParts<AppState> for RequireAdmin {
    type Rejection = AppError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        let auth = AuthUser::from_request_parts(parts, state).await?;
        if auth.principal.role != Role::Admin {
            return Err(AppError::Core(CoreError::Forbidden(
                "Admin role required".into(),
            )));
        }
        Ok(RequireAdmin(auth.principal))
    }
}

/// Requires `advisor` or `admin` role. Rejects with 403 Forbidden otherwise.
pub struct RequireAdvisor(pub Principal);

impl FromRequestParts<AppState> for RequireAdvisor {
    type Rejection = AppError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        let auth = AuthUser::from_request_parts(parts, state).await?;
        if auth.principal.role != Role::Admin && auth.principal.role != Role::Advisor {
            return Err(AppError::Core(CoreError::Forbidden(
                "Advisor or Admin role required".into(),
            )));
        }
        Ok(RequireAdvisor(auth.principal))
    }
}
