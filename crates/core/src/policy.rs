//! Row-level authorization policy for achievement operations.
//!
//! Every workflow operation authorizes in two steps, both implemented here:
//!
//! 1. Capability gate -- the principal's permission set must contain the
//!    capability for the action (or the wildcard). Fails `Forbidden` before
//!    any data is touched.
//! 2. Row rule -- given the principal's relation to the target row
//!    ([`RowScope`]), the role decides whether the action is allowed.
//!
//! Status-dependent checks (only drafts are editable, the advisor decision
//! window, ...) are deliberately NOT here; they belong to the state machine
//! and the workflow engine. This module answers exactly one question: may
//! this principal perform this action on a row they relate to like this?

use crate::error::CoreError;
use crate::permissions::{
    PERM_CREATE_ACHIEVEMENT, PERM_DELETE_ACHIEVEMENT, PERM_READ_ACHIEVEMENT,
    PERM_UPDATE_ACHIEVEMENT, PERM_VERIFY_ACHIEVEMENT,
};
use crate::principal::Principal;
use crate::roles::Role;

/// A workflow action on an achievement.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Action {
    Read,
    Create,
    Update,
    Delete,
    Submit,
    Verify,
    Reject,
    AddAttachment,
    History,
    ReassignStudent,
}

impl Action {
    /// The capability that gates this action.
    ///
    /// Submit and AddAttachment ride on the update capability; History rides
    /// on read. ReassignStudent is admin-only and reuses update.
    pub fn capability(self) -> &'static str {
        match self {
            Action::Read | Action::History => PERM_READ_ACHIEVEMENT,
            Action::Create => PERM_CREATE_ACHIEVEMENT,
            Action::Update | Action::Submit | Action::AddAttachment | Action::ReassignStudent => {
                PERM_UPDATE_ACHIEVEMENT
            }
            Action::Delete => PERM_DELETE_ACHIEVEMENT,
            Action::Verify | Action::Reject => PERM_VERIFY_ACHIEVEMENT,
        }
    }

    /// Verb used in error messages and tracing.
    pub fn as_str(self) -> &'static str {
        match self {
            Action::Read => "read",
            Action::Create => "create",
            Action::Update => "update",
            Action::Delete => "delete",
            Action::Submit => "submit",
            Action::Verify => "verify",
            Action::Reject => "reject",
            Action::AddAttachment => "attach a file to",
            Action::History => "view the history of",
            Action::ReassignStudent => "reassign",
        }
    }
}

/// The principal's relation to the row's owning student.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RowScope {
    /// The row belongs to the principal's own student record.
    Own,
    /// The row belongs to one of the principal's advisees.
    Advisee,
    /// Neither of the above.
    Unrelated,
}

/// Authorize `action` on a row the principal relates to as `scope`.
///
/// This is the one implementation site for the role rule table:
///
/// | role    | allowed actions                             | row scope |
/// |---------|---------------------------------------------|-----------|
/// | admin   | all                                         | any       |
/// | student | read/create/update/delete/submit/attach/history | own   |
/// | advisor | read/history/verify/reject                  | advisee   |
pub fn authorize(principal: &Principal, action: Action, scope: RowScope) -> Result<(), CoreError> {
    principal.permissions.require(action.capability())?;

    match principal.role {
        Role::Admin => Ok(()),

        Role::Student => match action {
            Action::Verify | Action::Reject => Err(CoreError::Forbidden(
                "Students may not verify or reject achievements".into(),
            )),
            Action::ReassignStudent => Err(CoreError::Forbidden(
                "Only administrators may reassign an achievement".into(),
            )),
            _ if scope == RowScope::Own => Ok(()),
            _ => Err(CoreError::Forbidden(
                "Achievement belongs to another student".into(),
            )),
        },

        Role::Advisor => match action {
            Action::Read | Action::History | Action::Verify | Action::Reject => {
                if scope == RowScope::Advisee {
                    Ok(())
                } else {
                    Err(CoreError::Forbidden("Student is not your advisee".into()))
                }
            }
            _ => Err(CoreError::Forbidden(
                "Advisors may only read, verify, or reject achievements".into(),
            )),
        },
    }
}
