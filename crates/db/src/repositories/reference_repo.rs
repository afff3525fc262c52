//! Repository for the `achievement_references` lifecycle store.
//!
//! Transitions are compare-and-swap updates: each `mark_*` method is
//! conditioned on the status the caller observed, so of two concurrent
//! conflicting transitions exactly one wins and the loser sees `false`.

use merit_core::status::AchievementStatus;
use merit_core::types::DbId;
use sqlx::PgPool;

use crate::models::reference::AchievementReference;

/// Column list shared across queries to avoid repetition.
const COLUMNS: &str = "id, student_id, content_id, status, submitted_at, \
    verified_at, verified_by, rejection_note, created_at, updated_at";

/// Provides lifecycle operations for achievement references.
pub struct ReferenceRepo;

impl ReferenceRepo {
    /// Insert a new reference in status `draft`, returning the created row.
    pub async fn create(
        pool: &PgPool,
        student_id: DbId,
        content_id: DbId,
    ) -> Result<AchievementReference, sqlx::Error> {
        let query = format!(
            "INSERT INTO achievement_references (student_id, content_id)
             VALUES ($1, $2)
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, AchievementReference>(&query)
            .bind(student_id)
            .bind(content_id)
            .fetch_one(pool)
            .await
    }

    /// Find a reference by id.
    pub async fn find_by_id(
        pool: &PgPool,
        id: DbId,
    ) -> Result<Option<AchievementReference>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM achievement_references WHERE id = $1");
        sqlx::query_as::<_, AchievementReference>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    /// draft -> submitted, stamping `submitted_at`.
    pub async fn mark_submitted(pool: &PgPool, id: DbId) -> Result<bool, sqlx::Error> {
        let result = sqlx::query(
            "UPDATE achievement_references
             SET status = 'submitted', submitted_at = NOW(), updated_at = NOW()
             WHERE id = $1 AND status = 'draft'",
        )
        .bind(id)
        .execute(pool)
        .await?;
        Ok(result.rows_affected() > 0)
    }

    /// `from` -> verified, stamping `verified_at`/`verified_by`.
    ///
    /// `from` is the status the engine observed; normally `submitted`, but
    /// administrators may verify from other non-deleted statuses.
    pub async fn mark_verified(
        pool: &PgPool,
        id: DbId,
        verified_by: DbId,
        from: AchievementStatus,
    ) -> Result<bool, sqlx::Error> {
        let result = sqlx::query(
            "UPDATE achievement_references
             SET status = 'verified', verified_at = NOW(), verified_by = $2,
                 rejection_note = NULL, updated_at = NOW()
             WHERE id = $1 AND status = $3",
        )
        .bind(id)
        .bind(verified_by)
        .bind(from.as_str())
        .execute(pool)
        .await?;
        Ok(result.rows_affected() > 0)
    }

    /// `from` -> rejected, recording the note and the deciding principal.
    pub async fn mark_rejected(
        pool: &PgPool,
        id: DbId,
        rejected_by: DbId,
        note: &str,
        from: AchievementStatus,
    ) -> Result<bool, sqlx::Error> {
        let result = sqlx::query(
            "UPDATE achievement_references
             SET status = 'rejected', rejection_note = $3, verified_by = $2,
                 verified_at = NULL, updated_at = NOW()
             WHERE id = $1 AND status = $4",
        )
        .bind(id)
        .bind(rejected_by)
        .bind(note)
        .bind(from.as_str())
        .execute(pool)
        .await?;
        Ok(result.rows_affected() > 0)
    }

    /// draft -> deleted.
    pub async fn mark_deleted(pool: &PgPool, id: DbId) -> Result<bool, sqlx::Error> {
        let result = sqlx::query(
            "UPDATE achievement_references
             SET status = 'deleted', updated_at = NOW()
             WHERE id = $1 AND status = 'draft'",
        )
        .bind(id)
        .execute(pool)
        .await?;
        Ok(result.rows_affected() > 0)
    }

    /// Refresh `updated_at` after a content-only mutation (update, attach).
    pub async fn touch(pool: &PgPool, id: DbId) -> Result<(), sqlx::Error> {
        sqlx::query("UPDATE achievement_references SET updated_at = NOW() WHERE id = $1")
            .bind(id)
            .execute(pool)
            .await?;
        Ok(())
    }

    /// Move a reference to a different student (admin reassignment only).
    pub async fn reassign_student(
        pool: &PgPool,
        id: DbId,
        student_id: DbId,
    ) -> Result<bool, sqlx::Error> {
        let result = sqlx::query(
            "UPDATE achievement_references
             SET student_id = $2, updated_at = NOW()
             WHERE id = $1",
        )
        .bind(id)
        .bind(student_id)
        .execute(pool)
        .await?;
        Ok(result.rows_affected() > 0)
    }

    // -- Role-scoped listings -----------------------------------------------
    //
    // Visibility filtering happens in SQL so a caller never pays for rows
    // they cannot see. All listings order newest-first and accept an
    // optional status filter.

    /// List every reference (admin scope).
    pub async fn list_all(
        pool: &PgPool,
        status: Option<AchievementStatus>,
        limit: i64,
        offset: i64,
    ) -> Result<Vec<AchievementReference>, sqlx::Error> {
        let query = format!(
            "SELECT {COLUMNS} FROM achievement_references
             WHERE ($1::text IS NULL OR status = $1)
             ORDER BY created_at DESC
             LIMIT $2 OFFSET $3"
        );
        sqlx::query_as::<_, AchievementReference>(&query)
            .bind(status.map(|s| s.as_str()))
            .bind(limit)
            .bind(offset)
            .fetch_all(pool)
            .await
    }

    pub async fn count_all(
        pool: &PgPool,
        status: Option<AchievementStatus>,
    ) -> Result<i64, sqlx::Error> {
        sqlx::query_scalar(
            "SELECT COUNT(*) FROM achievement_references
             WHERE ($1::text IS NULL OR status = $1)",
        )
        .bind(status.map(|s| s.as_str()))
        .fetch_one(pool)
        .await
    }

    /// List the references owned by one student.
    pub async fn list_by_student(
        pool: &PgPool,
        student_id: DbId,
        status: Option<AchievementStatus>,
        limit: i64,
        offset: i64,
    ) -> Result<Vec<AchievementReference>, sqlx::Error> {
        let query = format!(
            "SELECT {COLUMNS} FROM achievement_references
             WHERE student_id = $1
               AND ($2::text IS NULL OR status = $2)
             ORDER BY created_at DESC
             LIMIT $3 OFFSET $4"
        );
        sqlx::query_as::<_, AchievementReference>(&query)
            .bind(student_id)
            .bind(status.map(|s| s.as_str()))
            .bind(limit)
            .bind(offset)
            .fetch_all(pool)
            .await
    }

    pub async fn count_by_student(
        pool: &PgPool,
        student_id: DbId,
        status: Option<AchievementStatus>,
    ) -> Result<i64, sqlx::Error> {
        sqlx::query_scalar(
            "SELECT COUNT(*) FROM achievement_references
             WHERE student_id = $1
               AND ($2::text IS NULL OR status = $2)",
        )
        .bind(student_id)
        .bind(status.map(|s| s.as_str()))
        .fetch_one(pool)
        .await
    }

    /// List the references of every advisee of the given advisor user.
    pub async fn list_for_advisor(
        pool: &PgPool,
        advisor_user_id: DbId,
        status: Option<AchievementStatus>,
        limit: i64,
        offset: i64,
    ) -> Result<Vec<AchievementReference>, sqlx::Error> {
        sqlx::query_as::<_, AchievementReference>(
            "SELECT r.id, r.student_id, r.content_id, r.status, r.submitted_at,
                    r.verified_at, r.verified_by, r.rejection_note, r.created_at, r.updated_at
             FROM achievement_references r
             JOIN students s ON s.id = r.student_id
             JOIN lecturers l ON l.id = s.advisor_id
             WHERE l.user_id = $1
               AND ($2::text IS NULL OR r.status = $2)
             ORDER BY r.created_at DESC
             LIMIT $3 OFFSET $4",
        )
            .bind(advisor_user_id)
            .bind(status.map(|s| s.as_str()))
            .bind(limit)
            .bind(offset)
            .fetch_all(pool)
            .await
    }

    pub async fn count_for_advisor(
        pool: &PgPool,
        advisor_user_id: DbId,
        status: Option<AchievementStatus>,
    ) -> Result<i64, sqlx::Error> {
        sqlx::query_scalar(
            "SELECT COUNT(*)
             FROM achievement_references r
             JOIN students s ON s.id = r.student_id
             JOIN lecturers l ON l.id = s.advisor_id
             WHERE l.user_id = $1
               AND ($2::text IS NULL OR r.status = $2)",
        )
        .bind(advisor_user_id)
        .bind(status.map(|s| s.as_str()))
        .fetch_one(pool)
        .await
    }
}
