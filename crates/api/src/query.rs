//! Shared query parameter types for API handlers.

use merit_core::status::AchievementStatus;
use merit_core::types::DbId;
use serde::Deserialize;

/// Largest accepted page size; larger requests are clamped.
pub const MAX_PAGE_SIZE: i64 = 100;

/// Page size applied when the caller does not specify one.
pub const DEFAULT_PAGE_SIZE: i64 = 10;

/// Generic 1-based pagination parameters (`?page=&page_size=`).
#[derive(Debug, Clone, Copy, Deserialize)]
pub struct PaginationParams {
    pub page: Option<i64>,
    pub page_size: Option<i64>,
}

impl PaginationParams {
    /// Clamp to a sane `(page, page_size)` pair: page >= 1, 1 <= size <= max.
    pub fn clamp(self) -> (i64, i64) {
        let page = self.page.unwrap_or(1).max(1);
        let page_size = self
            .page_size
            .unwrap_or(DEFAULT_PAGE_SIZE)
            .clamp(1, MAX_PAGE_SIZE);
        (page, page_size)
    }

    /// The SQL offset for the clamped page.
    pub fn offset(self) -> i64 {
        let (page, page_size) = self.clamp();
        (page - 1) * page_size
    }
}

/// Filter parameters for achievement listings.
#[derive(Debug, Clone, Copy, Default, Deserialize)]
pub struct AchievementFilter {
    /// Restrict to one lifecycle status.
    pub status: Option<AchievementStatus>,
    /// Restrict to one student. Non-admin callers are already scoped to
    /// their own visibility; admins use this to drill into one student.
    pub student_id: Option<DbId>,
}
