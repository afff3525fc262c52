//! Student directory model and DTOs.

use merit_core::types::{DbId, Timestamp};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

/// A row from the `students` table.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct Student {
    pub id: DbId,
    pub user_id: DbId,
    pub student_number: String,
    pub program_study: String,
    pub academic_year: String,
    /// The advising lecturer, if one has been assigned.
    pub advisor_id: Option<DbId>,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

/// DTO for inserting a student row.
#[derive(Debug, Deserialize)]
pub struct CreateStudent {
    pub user_id: DbId,
    pub student_number: String,
    pub program_study: String,
    pub academic_year: String,
    pub advisor_id: Option<DbId>,
}

/// Request body for assigning a student's advisor.
#[derive(Debug, Deserialize)]
pub struct AssignAdvisor {
    pub advisor_id: DbId,
}
