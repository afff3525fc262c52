//! Achievement lifecycle status and the transition rules between statuses.
//!
//! The status column on an achievement reference only ever holds one of the
//! five values defined here. Transition legality is centralized in the
//! predicate methods so the workflow engine and the tests share one table:
//!
//! ```text
//! draft -----submit----> submitted -----verify----> verified
//!   |                        |
//!   |                        +--------reject------> rejected
//!   +--------delete---> deleted
//! ```
//!
//! `verified`, `rejected`, and `deleted` are terminal. Re-submission after
//! rejection is deliberately not supported.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::CoreError;

/// Lifecycle status of an achievement reference.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AchievementStatus {
    /// Freshly created, still editable by the owning student.
    Draft,
    /// Handed over for advisor review. Content is frozen except attachments.
    Submitted,
    /// Accepted by an advisor or administrator. Terminal.
    Verified,
    /// Declined with a rejection note. Terminal.
    Rejected,
    /// Soft-deleted while still in draft. Terminal.
    Deleted,
}

impl AchievementStatus {
    /// Every status, in lifecycle order.
    pub const ALL: &'static [AchievementStatus] = &[
        AchievementStatus::Draft,
        AchievementStatus::Submitted,
        AchievementStatus::Verified,
        AchievementStatus::Rejected,
        AchievementStatus::Deleted,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            AchievementStatus::Draft => "draft",
            AchievementStatus::Submitted => "submitted",
            AchievementStatus::Verified => "verified",
            AchievementStatus::Rejected => "rejected",
            AchievementStatus::Deleted => "deleted",
        }
    }

    /// Terminal statuses admit no further transitions.
    pub fn is_terminal(self) -> bool {
        matches!(
            self,
            AchievementStatus::Verified | AchievementStatus::Rejected | AchievementStatus::Deleted
        )
    }

    /// Update, Delete, and Submit are only legal while still in draft.
    pub fn is_editable(self) -> bool {
        self == AchievementStatus::Draft
    }

    /// Attachments may be appended until a final decision is made.
    pub fn accepts_attachments(self) -> bool {
        matches!(
            self,
            AchievementStatus::Draft | AchievementStatus::Submitted
        )
    }

    /// The advisor decision window: Verify/Reject require exactly this status
    /// unless the caller is an administrator.
    pub fn is_decidable(self) -> bool {
        self == AchievementStatus::Submitted
    }
}

impl fmt::Display for AchievementStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for AchievementStatus {
    type Err = CoreError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "draft" => Ok(AchievementStatus::Draft),
            "submitted" => Ok(AchievementStatus::Submitted),
            "verified" => Ok(AchievementStatus::Verified),
            "rejected" => Ok(AchievementStatus::Rejected),
            "deleted" => Ok(AchievementStatus::Deleted),
            other => Err(CoreError::Validation(format!(
                "Invalid achievement status '{other}'"
            ))),
        }
    }
}

/// Lets sqlx decode a `TEXT` status column directly into the enum via
/// `#[sqlx(try_from = "String")]`.
impl TryFrom<String> for AchievementStatus {
    type Error = CoreError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}
