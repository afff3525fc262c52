//! The achievement workflow engine.
//!
//! Orchestrates the two achievement stores (lifecycle references and JSONB
//! documents) under the state machine and the role-scoped authorization
//! policy. Handlers stay thin: they parse the request, then call one engine
//! operation with an explicit [`Principal`].
//!
//! [`Principal`]: merit_core::principal::Principal

pub mod engine;

use merit_db::models::achievement::AchievementContent;
use merit_db::models::reference::AchievementReference;
use serde::Serialize;

/// A reference joined with its content document; the read model returned by
/// `read` and `list`.
#[derive(Debug, Serialize)]
pub struct AchievementView {
    #[serde(flatten)]
    pub reference: AchievementReference,
    pub content: AchievementContent,
}
