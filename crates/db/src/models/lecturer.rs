//! Lecturer directory model and DTOs.

use merit_core::types::{DbId, Timestamp};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

/// A row from the `lecturers` table.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct Lecturer {
    pub id: DbId,
    pub user_id: DbId,
    pub lecturer_number: String,
    pub department: String,
    pub created_at: Timestamp,
}

/// DTO for inserting a lecturer row.
#[derive(Debug, Deserialize)]
pub struct CreateLecturer {
    pub user_id: DbId,
    pub lecturer_number: String,
    pub department: String,
}
