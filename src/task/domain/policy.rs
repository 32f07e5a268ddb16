//! Authorization policy for task operations.
//!
//! A single policy function replaces per-handler role checks: every service
//! entry point names its [`LifecycleAction`] and asks [`can_perform`] before
//! touching the task.

use super::Task;
use crate::directory::domain::{Actor, Role};
use std::fmt;

/// Operations on tasks subject to authorization.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum LifecycleAction {
    /// Create and assign a task.
    Create,
    /// Read a single task.
    View,
    /// Edit title, description, priority, or deadline.
    Update,
    /// Append a note.
    AddNote,
    /// Remove a task.
    Delete,
    /// First start of work.
    Start,
    /// Pause or resume work.
    TogglePause,
    /// Mark work finished directly.
    Complete,
    /// Reopen a completed task.
    Reopen,
    /// Send the task for supervisor approval.
    RequestCompletion,
    /// Approve a requested completion.
    ApproveCompletion,
}

impl LifecycleAction {
    /// Returns a stable label for error messages.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Create => "create",
            Self::View => "view",
            Self::Update => "update",
            Self::AddNote => "add a note to",
            Self::Delete => "delete",
            Self::Start => "start",
            Self::TogglePause => "pause or resume",
            Self::Complete => "complete",
            Self::Reopen => "reopen",
            Self::RequestCompletion => "request completion of",
            Self::ApproveCompletion => "approve completion of",
        }
    }
}

impl fmt::Display for LifecycleAction {
    fn fmt(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        formatter.write_str(self.as_str())
    }
}

/// Returns whether the actor may perform the action.
///
/// `task` is the target record where one exists; creation and deletion are
/// decided on role alone. Employees act only on tasks assigned to them;
/// supervisory roles are unrestricted except where the action itself is
/// supervisor-only.
#[must_use]
pub fn can_perform(actor: &Actor, action: LifecycleAction, task: Option<&Task>) -> bool {
    match action {
        LifecycleAction::Create | LifecycleAction::Delete | LifecycleAction::ApproveCompletion => {
            actor.role().is_supervisor()
        }
        LifecycleAction::View
        | LifecycleAction::Update
        | LifecycleAction::AddNote
        | LifecycleAction::RequestCompletion => match actor.role() {
            Role::Admin | Role::Manager => true,
            Role::Employee => task.is_some_and(|target| target.assigned_to() == actor.id()),
        },
        LifecycleAction::Start
        | LifecycleAction::TogglePause
        | LifecycleAction::Complete
        | LifecycleAction::Reopen => true,
    }
}
