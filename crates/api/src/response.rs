//! Shared response envelope types for API handlers.
//!
//! All API responses use a `{ "data": ... }` envelope; paginated listings add
//! page metadata alongside it.

use serde::Serialize;

/// Standard `{ "data": T }` response envelope.
#[derive(Debug, Serialize)]
pub struct DataResponse<T: Serialize> {
    pub data: T,
}

/// Response envelope for paginated listings.
#[derive(Debug, Serialize)]
pub struct PageResponse<T: Serialize> {
    pub data: Vec<T>,
    pub page: i64,
    pub page_size: i64,
    /// Total matching rows before pagination.
    pub total: i64,
}
