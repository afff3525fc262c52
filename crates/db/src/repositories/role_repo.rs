//! Repository for the `roles`, `permissions`, and `role_permissions` tables.

use merit_core::types::DbId;
use sqlx::PgPool;

use crate::models::role::{Permission, Role};

/// Column list shared across role queries.
const ROLE_COLUMNS: &str = "id, name, description, created_at, updated_at";

/// Column list shared across permission queries.
const PERMISSION_COLUMNS: &str = "id, name, resource, action, description";

/// Provides read operations for roles and their capability grants.
pub struct RoleRepo;

impl RoleRepo {
    /// Find a role by internal id.
    pub async fn find_by_id(pool: &PgPool, id: DbId) -> Result<Option<Role>, sqlx::Error> {
        let query = format!("SELECT {ROLE_COLUMNS} FROM roles WHERE id = $1");
        sqlx::query_as::<_, Role>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    /// Find a role by name (case-sensitive).
    pub async fn find_by_name(pool: &PgPool, name: &str) -> Result<Option<Role>, sqlx::Error> {
        let query = format!("SELECT {ROLE_COLUMNS} FROM roles WHERE name = $1");
        sqlx::query_as::<_, Role>(&query)
            .bind(name)
            .fetch_optional(pool)
            .await
    }

    /// List all roles ordered by name.
    pub async fn list(pool: &PgPool) -> Result<Vec<Role>, sqlx::Error> {
        let query = format!("SELECT {ROLE_COLUMNS} FROM roles ORDER BY name ASC");
        sqlx::query_as::<_, Role>(&query).fetch_all(pool).await
    }

    /// Resolve a role id to its name, returning `"unknown"` if the id is missing.
    pub async fn resolve_name(pool: &PgPool, role_id: DbId) -> Result<String, sqlx::Error> {
        Ok(Self::find_by_id(pool, role_id)
            .await?
            .map(|r| r.name)
            .unwrap_or_else(|| "unknown".to_string()))
    }

    /// The full permission rows granted to a role.
    pub async fn permissions_for_role(
        pool: &PgPool,
        role_id: DbId,
    ) -> Result<Vec<Permission>, sqlx::Error> {
        let query = format!(
            "SELECT {PERMISSION_COLUMNS}
             FROM permissions p
             JOIN role_permissions rp ON rp.permission_id = p.id
             WHERE rp.role_id = $1
             ORDER BY p.name ASC"
        );
        sqlx::query_as::<_, Permission>(&query)
            .bind(role_id)
            .fetch_all(pool)
            .await
    }

    /// Just the capability names granted to a role; embedded into JWT claims.
    pub async fn permission_names_for_role(
        pool: &PgPool,
        role_id: DbId,
    ) -> Result<Vec<String>, sqlx::Error> {
        sqlx::query_scalar(
            "SELECT p.name
             FROM permissions p
             JOIN role_permissions rp ON rp.permission_id = p.id
             WHERE rp.role_id = $1
             ORDER BY p.name ASC",
        )
        .bind(role_id)
        .fetch_all(pool)
        .await
    }
}
