//! Aggregate report projections.

use merit_core::types::DbId;
use serde::Serialize;
use sqlx::FromRow;

/// Counts per lifecycle status across all (non-deleted) achievements.
#[derive(Debug, Clone, Default, FromRow, Serialize)]
pub struct StatusCounts {
    pub total: i64,
    pub draft: i64,
    pub submitted: i64,
    pub verified: i64,
    pub rejected: i64,
}

/// Achievement count grouped by a document label (type or level).
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct LabelCount {
    pub label: String,
    pub count: i64,
}

/// Achievement count grouped by calendar month (`YYYY-MM`).
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct PeriodCount {
    pub period: String,
    pub count: i64,
}

/// A student ranked by verified achievements.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct TopStudent {
    pub student_id: DbId,
    pub student_number: String,
    pub count: i64,
    pub points: f64,
}

/// The platform-wide statistics response.
#[derive(Debug, Clone, Serialize)]
pub struct StatisticsReport {
    #[serde(flatten)]
    pub counts: StatusCounts,
    pub by_type: Vec<LabelCount>,
    pub by_level: Vec<LabelCount>,
    pub by_period: Vec<PeriodCount>,
    pub top_students: Vec<TopStudent>,
}

/// Per-student status counts.
#[derive(Debug, Clone, Serialize)]
pub struct StudentReport {
    pub student_id: DbId,
    #[serde(flatten)]
    pub counts: StatusCounts,
}
