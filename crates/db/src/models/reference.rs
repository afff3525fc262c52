//! Achievement reference: the relational lifecycle record.

use merit_core::status::AchievementStatus;
use merit_core::types::{DbId, Timestamp};
use serde::Serialize;
use sqlx::FromRow;

/// A row from the `achievement_references` table.
///
/// System of record for the lifecycle: every authorization and transition
/// decision reads this row, never the document.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct AchievementReference {
    pub id: DbId,
    pub student_id: DbId,
    pub content_id: DbId,
    #[sqlx(try_from = "String")]
    pub status: AchievementStatus,
    pub submitted_at: Option<Timestamp>,
    pub verified_at: Option<Timestamp>,
    pub verified_by: Option<DbId>,
    pub rejection_note: Option<String>,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

/// One lifecycle event, derived from the reference's audit fields.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct HistoryEvent {
    pub status: AchievementStatus,
    pub at: Timestamp,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub by: Option<DbId>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub note: Option<String>,
}

impl AchievementReference {
    /// Project the lifecycle history purely from this row.
    ///
    /// Always starts with the draft event; each later event appears only
    /// when its audit field is set, so the list is chronological by
    /// construction and never contains both a verified and a rejected entry.
    pub fn history(&self) -> Vec<HistoryEvent> {
        let mut events = vec![HistoryEvent {
            status: AchievementStatus::Draft,
            at: self.created_at,
            by: None,
            note: None,
        }];

        if let Some(at) = self.submitted_at {
            events.push(HistoryEvent {
                status: AchievementStatus::Submitted,
                at,
                by: None,
                note: None,
            });
        }

        if let Some(at) = self.verified_at {
            events.push(HistoryEvent {
                status: AchievementStatus::Verified,
                at,
                by: self.verified_by,
                note: None,
            });
        }

        // Reject and delete stamp no dedicated timestamp; the row's
        // updated_at is the decision time because both are terminal.
        if self.status == AchievementStatus::Rejected {
            events.push(HistoryEvent {
                status: AchievementStatus::Rejected,
                at: self.updated_at,
                by: self.verified_by,
                note: self.rejection_note.clone(),
            });
        }

        if self.status == AchievementStatus::Deleted {
            events.push(HistoryEvent {
                status: AchievementStatus::Deleted,
                at: self.updated_at,
                by: None,
                note: None,
            });
        }

        events
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{Duration, Utc};

    fn base_reference() -> AchievementReference {
        let created = Utc::now() - Duration::hours(3);
        AchievementReference {
            id: DbId::new_v4(),
            student_id: DbId::new_v4(),
            content_id: DbId::new_v4(),
            status: AchievementStatus::Draft,
            submitted_at: None,
            verified_at: None,
            verified_by: None,
            rejection_note: None,
            created_at: created,
            updated_at: created,
        }
    }

    #[test]
    fn test_draft_history_is_single_event() {
        let history = base_reference().history();
        assert_eq!(history.len(), 1);
        assert_eq!(history[0].status, AchievementStatus::Draft);
    }

    #[test]
    fn test_verified_history_is_chronological() {
        let mut r = base_reference();
        r.status = AchievementStatus::Verified;
        r.submitted_at = Some(r.created_at + Duration::hours(1));
        r.verified_at = Some(r.created_at + Duration::hours(2));
        r.verified_by = Some(DbId::new_v4());
        r.updated_at = r.verified_at.unwrap();

        let history = r.history();
        let statuses: Vec<_> = history.iter().map(|e| e.status).collect();
        assert_eq!(
            statuses,
            vec![
                AchievementStatus::Draft,
                AchievementStatus::Submitted,
                AchievementStatus::Verified,
            ]
        );
        assert!(history.windows(2).all(|w| w[0].at <= w[1].at));
        assert_eq!(history[2].by, r.verified_by);
    }

    #[test]
    fn test_rejected_history_carries_note_and_never_verified() {
        let mut r = base_reference();
        r.status = AchievementStatus::Rejected;
        r.submitted_at = Some(r.created_at + Duration::hours(1));
        r.verified_by = Some(DbId::new_v4());
        r.rejection_note = Some("Certificate is illegible".into());
        r.updated_at = r.created_at + Duration::hours(2);

        let history = r.history();
        let statuses: Vec<_> = history.iter().map(|e| e.status).collect();
        assert_eq!(
            statuses,
            vec![
                AchievementStatus::Draft,
                AchievementStatus::Submitted,
                AchievementStatus::Rejected,
            ]
        );
        assert_eq!(
            history[2].note.as_deref(),
            Some("Certificate is illegible")
        );
        assert!(!statuses.contains(&AchievementStatus::Verified));
    }

    #[test]
    fn test_deleted_draft_history() {
        let mut r = base_reference();
        r.status = AchievementStatus::Deleted;
        r.updated_at = r.created_at + Duration::minutes(5);

        let history = r.history();
        let statuses: Vec<_> = history.iter().map(|e| e.status).collect();
        assert_eq!(
            statuses,
            vec![AchievementStatus::Draft, AchievementStatus::Deleted]
        );
    }
}
