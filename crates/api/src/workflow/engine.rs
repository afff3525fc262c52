//! Workflow operations on achievements.
//!
//! Every operation follows the same shape:
//!
//! 1. Load the reference (the lifecycle system of record).
//! 2. Resolve the principal's relation to the owning student and run the
//!    authorization policy.
//! 3. Enforce the status gate for the requested transition.
//! 4. Apply the mutation. Transitions are compare-and-swap on the observed
//!    status; a lost race surfaces as `Conflict`, never as silent last-writer-wins.
//!
//! The reference and document stores are written without a shared
//! transaction. The one two-phase write (`create`) compensates by
//! soft-deleting the orphaned document if the reference insert fails.

use chrono::Utc;
use merit_core::error::CoreError;
use merit_core::policy::{authorize, Action, RowScope};
use merit_core::principal::Principal;
use merit_core::roles::Role;
use merit_core::status::AchievementStatus;
use merit_core::types::DbId;
use merit_db::models::achievement::{
    AttachmentFile, CreateAchievement, NewAttachment, UpdateAchievement,
};
use merit_db::models::reference::{AchievementReference, HistoryEvent};
use merit_db::repositories::{ContentRepo, ReferenceRepo, StudentRepo};
use merit_db::DbPool;
use validator::Validate;

use crate::error::{AppError, AppResult};
use crate::query::{AchievementFilter, PaginationParams};
use crate::workflow::AchievementView;

/// Create a new achievement: document first, then the draft reference.
///
/// Students always create for themselves; any client-supplied `student_id`
/// is overridden by their own student record. Other callers must name the
/// target student explicitly.
pub async fn create(
    pool: &DbPool,
    principal: &Principal,
    input: CreateAchievement,
) -> AppResult<AchievementReference> {
    authorize(principal, Action::Create, RowScope::Own)?;
    input
        .validate()
        .map_err(|e| CoreError::Validation(e.to_string()))?;

    let student_id = match principal.role {
        Role::Student => {
            StudentRepo::find_by_user_id(pool, principal.user_id)
                .await?
                .ok_or_else(|| {
                    CoreError::Validation("No student record for this account".into())
                })?
                .id
        }
        _ => {
            let student_id = input.student_id.ok_or_else(|| {
                CoreError::Validation("student_id is required for non-student callers".into())
            })?;
            StudentRepo::find_by_id(pool, student_id)
                .await?
                .ok_or(CoreError::NotFound {
                    entity: "Student",
                    id: student_id,
                })?
                .id
        }
    };

    let doc = input.into_doc();
    let content = ContentRepo::create(pool, student_id, &doc).await?;

    let reference = match ReferenceRepo::create(pool, student_id, content.id).await {
        Ok(reference) => reference,
        Err(err) => {
            // Two-phase write compensation: the document landed but the
            // reference did not. Flag the orphan so it never surfaces.
            if let Err(cleanup_err) = ContentRepo::soft_delete(pool, content.id).await {
                tracing::error!(
                    content_id = %content.id,
                    error = %cleanup_err,
                    "failed to clean up orphaned achievement document"
                );
            }
            return Err(err.into());
        }
    };

    tracing::info!(
        reference_id = %reference.id,
        student_id = %student_id,
        user_id = %principal.user_id,
        "achievement created"
    );
    Ok(reference)
}

/// Read one achievement (reference + content), subject to visibility.
pub async fn read(pool: &DbPool, principal: &Principal, id: DbId) -> AppResult<AchievementView> {
    let reference = find_reference(pool, id).await?;
    let scope = resolve_scope(pool, principal, reference.student_id).await?;
    authorize(principal, Action::Read, scope)?;

    let content = ContentRepo::find_by_id(pool, reference.content_id)
        .await?
        .ok_or(CoreError::NotFound {
            entity: "AchievementContent",
            id: reference.content_id,
        })?;

    Ok(AchievementView { reference, content })
}

/// List the achievements visible to the principal, newest first.
///
/// Visibility filtering happens in SQL per role; content documents are
/// fetched for exactly the returned page. Returns the page and the total
/// count of visible rows.
pub async fn list(
    pool: &DbPool,
    principal: &Principal,
    filter: AchievementFilter,
    page: PaginationParams,
) -> AppResult<(Vec<AchievementView>, i64)> {
    principal.permissions.require(Action::Read.capability())?;

    let (_, page_size) = page.clamp();
    let offset = page.offset();
    let status = filter.status;

    let (references, total) = match principal.role {
        Role::Admin => {
            // Admins may drill into a single student via the filter.
            if let Some(student_id) = filter.student_id {
                (
                    ReferenceRepo::list_by_student(pool, student_id, status, page_size, offset)
                        .await?,
                    ReferenceRepo::count_by_student(pool, student_id, status).await?,
                )
            } else {
                (
                    ReferenceRepo::list_all(pool, status, page_size, offset).await?,
                    ReferenceRepo::count_all(pool, status).await?,
                )
            }
        }
        Role::Student => {
            // The student filter is ignored: students only ever see their own rows.
            let student = StudentRepo::find_by_user_id(pool, principal.user_id)
                .await?
                .ok_or_else(|| {
                    CoreError::Validation("No student record for this account".into())
                })?;
            (
                ReferenceRepo::list_by_student(pool, student.id, status, page_size, offset)
                    .await?,
                ReferenceRepo::count_by_student(pool, student.id, status).await?,
            )
        }
        Role::Advisor => (
            ReferenceRepo::list_for_advisor(pool, principal.user_id, status, page_size, offset)
                .await?,
            ReferenceRepo::count_for_advisor(pool, principal.user_id, status).await?,
        ),
    };

    let views = resolve_contents(pool, references).await?;
    Ok((views, total))
}

/// Merge a partial patch into a draft achievement's content.
pub async fn update(
    pool: &DbPool,
    principal: &Principal,
    id: DbId,
    patch: UpdateAchievement,
) -> AppResult<()> {
    let reference = find_reference(pool, id).await?;
    let scope = resolve_scope(pool, principal, reference.student_id).await?;
    authorize(principal, Action::Update, scope)?;

    if !reference.status.is_editable() {
        return Err(invalid_transition("update", reference.status));
    }
    if patch.is_empty() {
        return Err(CoreError::Validation("No fields to update".into()).into());
    }

    if !ContentRepo::merge_doc(pool, reference.content_id, &patch).await? {
        return Err(AppError::Core(CoreError::NotFound {
            entity: "AchievementContent",
            id: reference.content_id,
        }));
    }
    ReferenceRepo::touch(pool, id).await?;

    tracing::info!(reference_id = %id, user_id = %principal.user_id, "achievement updated");
    Ok(())
}

/// Soft-delete a draft achievement.
pub async fn delete(pool: &DbPool, principal: &Principal, id: DbId) -> AppResult<()> {
    let reference = find_reference(pool, id).await?;
    let scope = resolve_scope(pool, principal, reference.student_id).await?;
    authorize(principal, Action::Delete, scope)?;

    if !reference.status.is_editable() {
        return Err(invalid_transition("delete", reference.status));
    }

    ContentRepo::soft_delete(pool, reference.content_id).await?;
    if !ReferenceRepo::mark_deleted(pool, id).await? {
        return Err(conflict());
    }

    tracing::info!(reference_id = %id, user_id = %principal.user_id, "achievement deleted");
    Ok(())
}

/// Submit a draft for advisor review.
pub async fn submit(pool: &DbPool, principal: &Principal, id: DbId) -> AppResult<()> {
    let reference = find_reference(pool, id).await?;
    let scope = resolve_scope(pool, principal, reference.student_id).await?;
    authorize(principal, Action::Submit, scope)?;

    if !reference.status.is_editable() {
        return Err(invalid_transition("submit", reference.status));
    }
    if !ReferenceRepo::mark_submitted(pool, id).await? {
        return Err(conflict());
    }

    tracing::info!(reference_id = %id, user_id = %principal.user_id, "achievement submitted");
    Ok(())
}

/// Verify a submitted achievement.
///
/// Advisors may only decide on advisees whose reference is currently
/// `submitted`; administrators may verify from any non-deleted status.
pub async fn verify(pool: &DbPool, principal: &Principal, id: DbId) -> AppResult<()> {
    let reference = decision_target(pool, principal, id, Action::Verify).await?;

    if !ReferenceRepo::mark_verified(pool, id, principal.user_id, reference.status).await? {
        return Err(conflict());
    }

    tracing::info!(reference_id = %id, user_id = %principal.user_id, "achievement verified");
    Ok(())
}

/// Reject a submitted achievement with a reason.
///
/// Same role rules as [`verify`]. Rejection is terminal: no resubmission
/// path exists.
pub async fn reject(
    pool: &DbPool,
    principal: &Principal,
    id: DbId,
    reason: &str,
) -> AppResult<()> {
    if reason.trim().is_empty() {
        return Err(CoreError::Validation("A rejection reason is required".into()).into());
    }

    let reference = decision_target(pool, principal, id, Action::Reject).await?;

    if !ReferenceRepo::mark_rejected(pool, id, principal.user_id, reason, reference.status).await? {
        return Err(conflict());
    }

    tracing::info!(reference_id = %id, user_id = %principal.user_id, "achievement rejected");
    Ok(())
}

/// Append an attachment descriptor to an achievement's document.
///
/// Students may attach while the reference is draft or submitted;
/// administrators are blocked only by deletion.
pub async fn add_attachment(
    pool: &DbPool,
    principal: &Principal,
    id: DbId,
    input: NewAttachment,
) -> AppResult<()> {
    input
        .validate()
        .map_err(|e| CoreError::Validation(e.to_string()))?;

    let reference = find_reference(pool, id).await?;
    let scope = resolve_scope(pool, principal, reference.student_id).await?;
    authorize(principal, Action::AddAttachment, scope)?;

    let blocked = match principal.role {
        Role::Admin => reference.status == AchievementStatus::Deleted,
        _ => !reference.status.accepts_attachments(),
    };
    if blocked {
        return Err(invalid_transition("attach a file to", reference.status));
    }

    let file = AttachmentFile {
        file_name: input.file_name,
        file_url: input.file_url,
        file_type: if input.file_type.is_empty() {
            "unknown".to_string()
        } else {
            input.file_type
        },
        uploaded_at: Utc::now(),
    };

    if !ContentRepo::append_attachment(pool, reference.content_id, &file).await? {
        return Err(AppError::Core(CoreError::NotFound {
            entity: "AchievementContent",
            id: reference.content_id,
        }));
    }
    ReferenceRepo::touch(pool, id).await?;

    tracing::info!(
        reference_id = %id,
        user_id = %principal.user_id,
        file_name = %file.file_name,
        "attachment added"
    );
    Ok(())
}

/// The lifecycle history of one achievement, derived from its audit fields.
pub async fn history(
    pool: &DbPool,
    principal: &Principal,
    id: DbId,
) -> AppResult<Vec<HistoryEvent>> {
    let reference = find_reference(pool, id).await?;
    let scope = resolve_scope(pool, principal, reference.student_id).await?;
    authorize(principal, Action::History, scope)?;

    Ok(reference.history())
}

/// Move an achievement to a different student (admin only).
///
/// Updates the reference and the document's denormalized copy together.
pub async fn reassign_student(
    pool: &DbPool,
    principal: &Principal,
    id: DbId,
    new_student_id: DbId,
) -> AppResult<()> {
    let reference = find_reference(pool, id).await?;
    authorize(principal, Action::ReassignStudent, RowScope::Unrelated)?;

    StudentRepo::find_by_id(pool, new_student_id)
        .await?
        .ok_or(CoreError::NotFound {
            entity: "Student",
            id: new_student_id,
        })?;

    ReferenceRepo::reassign_student(pool, id, new_student_id).await?;
    ContentRepo::reassign_student(pool, reference.content_id, new_student_id).await?;

    tracing::info!(
        reference_id = %id,
        student_id = %new_student_id,
        user_id = %principal.user_id,
        "achievement reassigned"
    );
    Ok(())
}

// ---------------------------------------------------------------------------
// Helpers
// ---------------------------------------------------------------------------

async fn find_reference(pool: &DbPool, id: DbId) -> AppResult<AchievementReference> {
    ReferenceRepo::find_by_id(pool, id)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound {
            entity: "Achievement",
            id,
        }))
}

/// The principal's relation to the row's owning student.
async fn resolve_scope(
    pool: &DbPool,
    principal: &Principal,
    student_id: DbId,
) -> AppResult<RowScope> {
    let scope = match principal.role {
        // The policy admits admins on any scope; skip the directory lookups.
        Role::Admin => RowScope::Unrelated,
        Role::Student => {
            let own = StudentRepo::find_by_user_id(pool, principal.user_id).await?;
            match own {
                Some(student) if student.id == student_id => RowScope::Own,
                _ => RowScope::Unrelated,
            }
        }
        Role::Advisor => {
            if StudentRepo::is_advisee(pool, principal.user_id, student_id).await? {
                RowScope::Advisee
            } else {
                RowScope::Unrelated
            }
        }
    };
    Ok(scope)
}

/// Shared authorization and status gate for Verify/Reject.
async fn decision_target(
    pool: &DbPool,
    principal: &Principal,
    id: DbId,
    action: Action,
) -> AppResult<AchievementReference> {
    let reference = find_reference(pool, id).await?;
    let scope = resolve_scope(pool, principal, reference.student_id).await?;
    authorize(principal, action, scope)?;

    // Deleted rows are untouchable for everyone, admins included.
    if reference.status == AchievementStatus::Deleted {
        return Err(invalid_transition(action.as_str(), reference.status));
    }

    // The submitted-only window binds advisors, not admins. Outside it the
    // refusal is role-specific, so it reads as Forbidden rather than as a
    // state-machine violation.
    if principal.role == Role::Advisor && !reference.status.is_decidable() {
        return Err(CoreError::Forbidden("Final decision already made".into()).into());
    }

    Ok(reference)
}

/// Join the page of references with their content documents.
async fn resolve_contents(
    pool: &DbPool,
    references: Vec<AchievementReference>,
) -> AppResult<Vec<AchievementView>> {
    let ids: Vec<DbId> = references.iter().map(|r| r.content_id).collect();
    let mut contents: std::collections::HashMap<DbId, _> = ContentRepo::find_many(pool, &ids)
        .await?
        .into_iter()
        .map(|c| (c.id, c))
        .collect();

    let mut views = Vec::with_capacity(references.len());
    for reference in references {
        match contents.remove(&reference.content_id) {
            Some(content) => views.push(AchievementView { reference, content }),
            None => {
                // A reference without its document is a store inconsistency;
                // skip the row rather than fail the whole listing.
                tracing::warn!(
                    reference_id = %reference.id,
                    content_id = %reference.content_id,
                    "achievement document missing for reference"
                );
            }
        }
    }
    Ok(views)
}

fn invalid_transition(action: &'static str, status: AchievementStatus) -> AppError {
    AppError::Core(CoreError::InvalidTransition { action, status })
}

fn conflict() -> AppError {
    AppError::Core(CoreError::Conflict(
        "Achievement status changed concurrently".into(),
    ))
}
