//! Repository for the `achievement_documents` store.
//!
//! The document is one JSONB column; partial updates are JSONB merges so a
//! patch only ever touches the fields it carries, and the attachment list is
//! appended in place (no read-modify-write cycle).

use merit_core::types::DbId;
use sqlx::types::Json;
use sqlx::PgPool;

use crate::models::achievement::{
    AchievementContent, AchievementDoc, AttachmentFile, UpdateAchievement,
};

/// Column list shared across queries to avoid repetition.
const COLUMNS: &str = "id, student_id, doc, is_deleted, created_at, updated_at";

/// Provides document operations for achievement content.
pub struct ContentRepo;

impl ContentRepo {
    /// Insert a new document, returning the created row.
    pub async fn create(
        pool: &PgPool,
        student_id: DbId,
        doc: &AchievementDoc,
    ) -> Result<AchievementContent, sqlx::Error> {
        let query = format!(
            "INSERT INTO achievement_documents (student_id, doc)
             VALUES ($1, $2)
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, AchievementContent>(&query)
            .bind(student_id)
            .bind(Json(doc))
            .fetch_one(pool)
            .await
    }

    /// Find a document by id. Soft-deleted rows are still returned; the
    /// workflow engine decides what a deleted achievement exposes.
    pub async fn find_by_id(
        pool: &PgPool,
        id: DbId,
    ) -> Result<Option<AchievementContent>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM achievement_documents WHERE id = $1");
        sqlx::query_as::<_, AchievementContent>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    /// Fetch the documents for a set of ids. Order is not guaranteed.
    pub async fn find_many(
        pool: &PgPool,
        ids: &[DbId],
    ) -> Result<Vec<AchievementContent>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM achievement_documents WHERE id = ANY($1)");
        sqlx::query_as::<_, AchievementContent>(&query)
            .bind(ids)
            .fetch_all(pool)
            .await
    }

    /// Merge a partial patch into the document.
    ///
    /// The patch serializes with absent fields skipped, so `doc || patch`
    /// overwrites exactly the supplied fields. Returns `false` when the row
    /// is missing or already soft-deleted.
    pub async fn merge_doc(
        pool: &PgPool,
        id: DbId,
        patch: &UpdateAchievement,
    ) -> Result<bool, sqlx::Error> {
        let result = sqlx::query(
            "UPDATE achievement_documents
             SET doc = doc || $2, updated_at = NOW()
             WHERE id = $1 AND is_deleted = FALSE",
        )
        .bind(id)
        .bind(Json(patch))
        .execute(pool)
        .await?;
        Ok(result.rows_affected() > 0)
    }

    /// Append one attachment descriptor to the document's attachment list.
    pub async fn append_attachment(
        pool: &PgPool,
        id: DbId,
        file: &AttachmentFile,
    ) -> Result<bool, sqlx::Error> {
        let result = sqlx::query(
            "UPDATE achievement_documents
             SET doc = jsonb_set(
                     doc,
                     '{attachments}',
                     COALESCE(doc->'attachments', '[]'::jsonb) || $2
                 ),
                 updated_at = NOW()
             WHERE id = $1 AND is_deleted = FALSE",
        )
        .bind(id)
        .bind(Json(file))
        .execute(pool)
        .await?;
        Ok(result.rows_affected() > 0)
    }

    /// Set the soft-delete flag. Returns `true` if the row was updated.
    pub async fn soft_delete(pool: &PgPool, id: DbId) -> Result<bool, sqlx::Error> {
        let result = sqlx::query(
            "UPDATE achievement_documents
             SET is_deleted = TRUE, updated_at = NOW()
             WHERE id = $1 AND is_deleted = FALSE",
        )
        .bind(id)
        .execute(pool)
        .await?;
        Ok(result.rows_affected() > 0)
    }

    /// Update the denormalized student id (admin reassignment only).
    pub async fn reassign_student(
        pool: &PgPool,
        id: DbId,
        student_id: DbId,
    ) -> Result<bool, sqlx::Error> {
        let result = sqlx::query(
            "UPDATE achievement_documents
             SET student_id = $2, updated_at = NOW()
             WHERE id = $1",
        )
        .bind(id)
        .bind(student_id)
        .execute(pool)
        .await?;
        Ok(result.rows_affected() > 0)
    }
}
