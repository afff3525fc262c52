//! Aggregate report queries.
//!
//! Plain grouping/counting over the two achievement stores. Soft-deleted
//! achievements are excluded from every aggregate.

use merit_core::types::DbId;
use sqlx::PgPool;

use crate::models::report::{LabelCount, PeriodCount, StatusCounts, TopStudent};

/// How many students the leaderboard returns.
const TOP_STUDENT_LIMIT: i64 = 10;

/// Provides read-only aggregate queries for reports.
pub struct ReportRepo;

impl ReportRepo {
    /// Platform-wide counts per lifecycle status.
    pub async fn status_counts(pool: &PgPool) -> Result<StatusCounts, sqlx::Error> {
        sqlx::query_as::<_, StatusCounts>(
            "SELECT
                COUNT(*) FILTER (WHERE status <> 'deleted') AS total,
                COUNT(*) FILTER (WHERE status = 'draft') AS draft,
                COUNT(*) FILTER (WHERE status = 'submitted') AS submitted,
                COUNT(*) FILTER (WHERE status = 'verified') AS verified,
                COUNT(*) FILTER (WHERE status = 'rejected') AS rejected
             FROM achievement_references",
        )
        .fetch_one(pool)
        .await
    }

    /// Counts per lifecycle status for one student.
    pub async fn status_counts_for_student(
        pool: &PgPool,
        student_id: DbId,
    ) -> Result<StatusCounts, sqlx::Error> {
        sqlx::query_as::<_, StatusCounts>(
            "SELECT
                COUNT(*) FILTER (WHERE status <> 'deleted') AS total,
                COUNT(*) FILTER (WHERE status = 'draft') AS draft,
                COUNT(*) FILTER (WHERE status = 'submitted') AS submitted,
                COUNT(*) FILTER (WHERE status = 'verified') AS verified,
                COUNT(*) FILTER (WHERE status = 'rejected') AS rejected
             FROM achievement_references
             WHERE student_id = $1",
        )
        .bind(student_id)
        .fetch_one(pool)
        .await
    }

    /// Achievement counts grouped by document type.
    pub async fn counts_by_type(pool: &PgPool) -> Result<Vec<LabelCount>, sqlx::Error> {
        sqlx::query_as::<_, LabelCount>(
            "SELECT COALESCE(NULLIF(d.doc->>'achievement_type', ''), 'unspecified') AS label,
                    COUNT(*) AS count
             FROM achievement_references r
             JOIN achievement_documents d ON d.id = r.content_id
             WHERE r.status <> 'deleted'
             GROUP BY 1
             ORDER BY count DESC, label ASC",
        )
        .fetch_all(pool)
        .await
    }

    /// Achievement counts grouped by competition level.
    pub async fn counts_by_level(pool: &PgPool) -> Result<Vec<LabelCount>, sqlx::Error> {
        sqlx::query_as::<_, LabelCount>(
            "SELECT COALESCE(NULLIF(d.doc->'details'->>'competition_level', ''), 'unspecified') AS label,
                    COUNT(*) AS count
             FROM achievement_references r
             JOIN achievement_documents d ON d.id = r.content_id
             WHERE r.status <> 'deleted'
             GROUP BY 1
             ORDER BY count DESC, label ASC",
        )
        .fetch_all(pool)
        .await
    }

    /// Achievement counts grouped by creation month.
    pub async fn counts_by_period(pool: &PgPool) -> Result<Vec<PeriodCount>, sqlx::Error> {
        sqlx::query_as::<_, PeriodCount>(
            "SELECT TO_CHAR(created_at, 'YYYY-MM') AS period, COUNT(*) AS count
             FROM achievement_references
             WHERE status <> 'deleted'
             GROUP BY 1
             ORDER BY period ASC",
        )
        .fetch_all(pool)
        .await
    }

    /// Students ranked by verified achievements, then by accumulated points.
    pub async fn top_students(pool: &PgPool) -> Result<Vec<TopStudent>, sqlx::Error> {
        sqlx::query_as::<_, TopStudent>(
            "SELECT r.student_id,
                    s.student_number,
                    COUNT(*) AS count,
                    COALESCE(SUM((d.doc->>'points')::float8), 0) AS points
             FROM achievement_references r
             JOIN achievement_documents d ON d.id = r.content_id
             JOIN students s ON s.id = r.student_id
             WHERE r.status = 'verified'
             GROUP BY r.student_id, s.student_number
             ORDER BY count DESC, points DESC
             LIMIT $1",
        )
        .bind(TOP_STUDENT_LIMIT)
        .fetch_all(pool)
        .await
    }
}
