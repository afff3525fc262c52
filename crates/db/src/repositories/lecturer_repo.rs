//! Repository for the `lecturers` directory table.

use merit_core::types::DbId;
use sqlx::PgPool;

use crate::models::lecturer::{CreateLecturer, Lecturer};

/// Column list shared across queries to avoid repetition.
const COLUMNS: &str = "id, user_id, lecturer_number, department, created_at";

/// Provides directory operations for lecturers.
pub struct LecturerRepo;

impl LecturerRepo {
    /// Insert a new lecturer row, returning the created row.
    pub async fn create(pool: &PgPool, input: &CreateLecturer) -> Result<Lecturer, sqlx::Error> {
        let query = format!(
            "INSERT INTO lecturers (user_id, lecturer_number, department)
             VALUES ($1, $2, $3)
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Lecturer>(&query)
            .bind(input.user_id)
            .bind(&input.lecturer_number)
            .bind(&input.department)
            .fetch_one(pool)
            .await
    }

    /// Find a lecturer by internal id.
    pub async fn find_by_id(pool: &PgPool, id: DbId) -> Result<Option<Lecturer>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM lecturers WHERE id = $1");
        sqlx::query_as::<_, Lecturer>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    /// Resolve the lecturer row belonging to a user account.
    pub async fn find_by_user_id(
        pool: &PgPool,
        user_id: DbId,
    ) -> Result<Option<Lecturer>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM lecturers WHERE user_id = $1");
        sqlx::query_as::<_, Lecturer>(&query)
            .bind(user_id)
            .fetch_optional(pool)
            .await
    }

    /// List all lecturers ordered by lecturer number.
    pub async fn list(pool: &PgPool) -> Result<Vec<Lecturer>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM lecturers ORDER BY lecturer_number ASC");
        sqlx::query_as::<_, Lecturer>(&query).fetch_all(pool).await
    }
}
