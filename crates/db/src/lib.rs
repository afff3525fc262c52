//! Persistence layer for the merit achievement platform.
//!
//! Two stores back the achievement workflow:
//!
//! - `achievement_references` -- the relational lifecycle record (status,
//!   audit timestamps). System of record for authorization decisions.
//! - `achievement_documents` -- the free-form payload, held as a JSONB
//!   document per achievement.
//!
//! Plus the identity/directory tables (users, roles, permissions, sessions,
//! students, lecturers) and report queries.

pub mod models;
pub mod repositories;

use sqlx::postgres::PgPoolOptions;

pub type DbPool = sqlx::PgPool;

/// Create a connection pool from a database URL.
pub async fn create_pool(database_url: &str) -> Result<DbPool, sqlx::Error> {
    PgPoolOptions::new()
        .max_connections(20)
        .connect(database_url)
        .await
}

/// Verify the database is reachable with a trivial round-trip query.
pub async fn health_check(pool: &DbPool) -> Result<(), sqlx::Error> {
    sqlx::query("SELECT 1").execute(pool).await?;
    Ok(())
}

/// Apply all embedded migrations.
pub async fn run_migrations(pool: &DbPool) -> Result<(), sqlx::migrate::MigrateError> {
    sqlx::migrate!("./migrations").run(pool).await?;
    tracing::debug!("database migrations applied");
    Ok(())
}
