//! Repository for the `students` directory table.

use merit_core::types::DbId;
use sqlx::PgPool;

use crate::models::student::{CreateStudent, Student};

/// Column list shared across queries to avoid repetition.
const COLUMNS: &str = "id, user_id, student_number, program_study, academic_year, \
    advisor_id, created_at, updated_at";

/// Provides directory operations for students.
pub struct StudentRepo;

impl StudentRepo {
    /// Insert a new student row, returning the created row.
    pub async fn create(pool: &PgPool, input: &CreateStudent) -> Result<Student, sqlx::Error> {
        let query = format!(
            "INSERT INTO students (user_id, student_number, program_study, academic_year, advisor_id)
             VALUES ($1, $2, $3, $4, $5)
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Student>(&query)
            .bind(input.user_id)
            .bind(&input.student_number)
            .bind(&input.program_study)
            .bind(&input.academic_year)
            .bind(input.advisor_id)
            .fetch_one(pool)
            .await
    }

    /// Find a student by internal id.
    pub async fn find_by_id(pool: &PgPool, id: DbId) -> Result<Option<Student>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM students WHERE id = $1");
        sqlx::query_as::<_, Student>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    /// Resolve the student row belonging to a user account.
    pub async fn find_by_user_id(
        pool: &PgPool,
        user_id: DbId,
    ) -> Result<Option<Student>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM students WHERE user_id = $1");
        sqlx::query_as::<_, Student>(&query)
            .bind(user_id)
            .fetch_optional(pool)
            .await
    }

    /// True when `student_id` is advised by the lecturer whose user account
    /// is `advisor_user_id`.
    pub async fn is_advisee(
        pool: &PgPool,
        advisor_user_id: DbId,
        student_id: DbId,
    ) -> Result<bool, sqlx::Error> {
        sqlx::query_scalar(
            "SELECT EXISTS(
                 SELECT 1
                 FROM students s
                 JOIN lecturers l ON l.id = s.advisor_id
                 WHERE s.id = $2 AND l.user_id = $1
             )",
        )
        .bind(advisor_user_id)
        .bind(student_id)
        .fetch_one(pool)
        .await
    }

    /// List all students ordered by student number.
    pub async fn list(pool: &PgPool) -> Result<Vec<Student>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM students ORDER BY student_number ASC");
        sqlx::query_as::<_, Student>(&query).fetch_all(pool).await
    }

    /// List the advisees of one lecturer.
    pub async fn list_for_advisor(
        pool: &PgPool,
        lecturer_id: DbId,
    ) -> Result<Vec<Student>, sqlx::Error> {
        let query = format!(
            "SELECT {COLUMNS} FROM students
             WHERE advisor_id = $1
             ORDER BY student_number ASC"
        );
        sqlx::query_as::<_, Student>(&query)
            .bind(lecturer_id)
            .fetch_all(pool)
            .await
    }

    /// Assign or change a student's advisor. Returns `true` if the row was updated.
    pub async fn update_advisor(
        pool: &PgPool,
        student_id: DbId,
        advisor_id: DbId,
    ) -> Result<bool, sqlx::Error> {
        let result = sqlx::query(
            "UPDATE students SET advisor_id = $2, updated_at = NOW() WHERE id = $1",
        )
        .bind(student_id)
        .bind(advisor_id)
        .execute(pool)
        .await?;
        Ok(result.rows_affected() > 0)
    }
}
