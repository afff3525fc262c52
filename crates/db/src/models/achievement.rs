//! Achievement content: the JSONB document payload and its DTOs.
//!
//! The document is mutable only while the owning reference is still in
//! draft; attachments are the one exception (append-only until a final
//! decision is made). Update DTO fields are explicit `Option`s so a partial
//! patch only ever touches the fields the caller supplied.

use merit_core::types::{DbId, Timestamp};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use validator::Validate;

/// The free-form payload stored in `achievement_documents.doc`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AchievementDoc {
    pub achievement_type: String,
    pub title: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub details: AchievementDetails,
    #[serde(default)]
    pub tags: Vec<String>,
    #[serde(default)]
    pub points: f64,
    #[serde(default)]
    pub attachments: Vec<AttachmentFile>,
}

/// Structured competition details inside the document.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct AchievementDetails {
    #[serde(default)]
    pub competition_name: String,
    #[serde(default)]
    pub competition_level: String,
    #[serde(default)]
    pub rank: i32,
    #[serde(default)]
    pub medal_type: String,
    #[serde(default)]
    pub event_date: Option<Timestamp>,
    #[serde(default)]
    pub location: String,
    #[serde(default)]
    pub organizer: String,
    #[serde(default)]
    pub custom_fields: Vec<CustomField>,
}

/// A free-form key/value pair the structured details don't cover.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CustomField {
    pub key: String,
    pub value: String,
}

/// One attachment descriptor. The list in the document only ever grows.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AttachmentFile {
    pub file_name: String,
    pub file_url: String,
    pub file_type: String,
    pub uploaded_at: Timestamp,
}

/// A row from the `achievement_documents` table.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct AchievementContent {
    pub id: DbId,
    /// Denormalized copy of the reference's student id.
    pub student_id: DbId,
    #[sqlx(json)]
    pub doc: AchievementDoc,
    pub is_deleted: bool,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

/// Request body for creating an achievement.
///
/// `student_id` is ignored for student callers (their own student record is
/// resolved and force-assigned) and required for everyone else.
#[derive(Debug, Clone, Deserialize, Validate)]
pub struct CreateAchievement {
    pub student_id: Option<DbId>,
    #[validate(length(min = 1, max = 100))]
    pub achievement_type: String,
    #[validate(length(min = 1, max = 300))]
    pub title: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub details: AchievementDetails,
    #[serde(default)]
    pub tags: Vec<String>,
    #[serde(default)]
    #[validate(range(min = 0.0))]
    pub points: f64,
}

impl CreateAchievement {
    /// Build the document to insert. Attachments always start empty; they
    /// are only added through the attachment operation.
    pub fn into_doc(self) -> AchievementDoc {
        AchievementDoc {
            achievement_type: self.achievement_type,
            title: self.title,
            description: self.description,
            details: self.details,
            tags: self.tags,
            points: self.points,
            attachments: Vec::new(),
        }
    }
}

/// Partial update for a draft achievement.
///
/// Serializes with absent fields skipped, so the JSONB merge in the
/// repository overwrites exactly the supplied fields and nothing else.
/// `details` and `tags` are replaced wholesale when present.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct UpdateAchievement {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub achievement_type: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub details: Option<AchievementDetails>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub tags: Option<Vec<String>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub points: Option<f64>,
}

impl UpdateAchievement {
    /// True when no field was supplied; such a patch is a bad request.
    pub fn is_empty(&self) -> bool {
        self.achievement_type.is_none()
            && self.title.is_none()
            && self.description.is_none()
            && self.details.is_none()
            && self.tags.is_none()
            && self.points.is_none()
    }
}

/// Request body for appending an attachment descriptor.
#[derive(Debug, Clone, Deserialize, Validate)]
pub struct NewAttachment {
    #[validate(length(min = 1, max = 255))]
    pub file_name: String,
    #[validate(length(min = 1))]
    pub file_url: String,
    #[serde(default)]
    pub file_type: String,
}
