//! Task aggregate root and related lifecycle types.

use super::{
    LifecycleAction, ParsePriorityError, TaskDomainError, TaskId, TaskStatus, TaskTitle,
    WorkState, elapsed_whole_seconds,
};
use crate::client::domain::ClientId;
use crate::directory::domain::UserId;
use chrono::{DateTime, Utc};
use mockable::Clock;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Task urgency level.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Priority {
    /// Default urgency.
    #[default]
    Low,
    /// Raised urgency.
    Medium,
    /// Highest urgency.
    High,
}

impl Priority {
    /// Returns the canonical storage representation.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Low => "low",
            Self::Medium => "medium",
            Self::High => "high",
        }
    }
}

impl fmt::Display for Priority {
    fn fmt(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        formatter.write_str(self.as_str())
    }
}

impl TryFrom<&str> for Priority {
    type Error = ParsePriorityError;

    fn try_from(value: &str) -> Result<Self, Self::Error> {
        let normalized = value.trim().to_ascii_lowercase();
        match normalized.as_str() {
            "low" => Ok(Self::Low),
            "medium" => Ok(Self::Medium),
            "high" => Ok(Self::High),
            _ => Err(ParsePriorityError(value.to_owned())),
        }
    }
}

/// Timestamped progress note appended to a task.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TaskNote {
    message: String,
    noted_at: DateTime<Utc>,
}

impl TaskNote {
    /// Creates a note stamped with the current clock time.
    #[must_use]
    pub fn new(message: impl Into<String>, clock: &impl Clock) -> Self {
        Self {
            message: message.into(),
            noted_at: clock.utc(),
        }
    }

    /// Returns the note text.
    #[must_use]
    pub fn message(&self) -> &str {
        &self.message
    }

    /// Returns when the note was recorded.
    #[must_use]
    pub const fn noted_at(&self) -> DateTime<Utc> {
        self.noted_at
    }
}

/// Validated input for creating a task.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewTaskData {
    /// Validated title.
    pub title: TaskTitle,
    /// Optional free-form description.
    pub description: Option<String>,
    /// Client the work is performed for.
    pub client: ClientId,
    /// Urgency level.
    pub priority: Priority,
    /// Employee the task is assigned to.
    pub assigned_to: UserId,
    /// Supervisor who created the assignment.
    pub assigned_by: UserId,
    /// Optional deadline; validated against today on construction.
    pub deadline: Option<DateTime<Utc>>,
}

/// Parameter object for reconstructing a persisted task aggregate.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PersistedTaskData {
    /// Persisted task identifier.
    pub id: TaskId,
    /// Persisted title.
    pub title: TaskTitle,
    /// Persisted description.
    pub description: Option<String>,
    /// Persisted client reference.
    pub client: ClientId,
    /// Persisted urgency level.
    pub priority: Priority,
    /// Persisted work state.
    pub work: WorkState,
    /// Persisted assignee reference.
    pub assigned_to: UserId,
    /// Persisted assigner reference.
    pub assigned_by: UserId,
    /// Persisted approver reference, if approved.
    pub approved_by: Option<UserId>,
    /// Persisted approval timestamp, if approved.
    pub approved_at: Option<DateTime<Utc>>,
    /// Persisted deadline.
    pub deadline: Option<DateTime<Utc>>,
    /// Persisted progress notes.
    pub notes: Vec<TaskNote>,
    /// Persisted creation timestamp.
    pub created_at: DateTime<Utc>,
    /// Persisted latest lifecycle timestamp.
    pub updated_at: DateTime<Utc>,
}

/// Task aggregate root.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Task {
    id: TaskId,
    title: TaskTitle,
    description: Option<String>,
    client: ClientId,
    priority: Priority,
    work: WorkState,
    assigned_to: UserId,
    assigned_by: UserId,
    approved_by: Option<UserId>,
    approved_at: Option<DateTime<Utc>>,
    deadline: Option<DateTime<Utc>>,
    notes: Vec<TaskNote>,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
}

impl Task {
    /// Creates a new pending task.
    ///
    /// # Errors
    ///
    /// Returns [`TaskDomainError::DeadlineInPast`] when the supplied deadline
    /// falls before the current date.
    pub fn create(data: NewTaskData, clock: &impl Clock) -> Result<Self, TaskDomainError> {
        if let Some(deadline) = data.deadline {
            validate_deadline(deadline, clock)?;
        }
        let timestamp = clock.utc();
        Ok(Self {
            id: TaskId::new(),
            title: data.title,
            description: data.description,
            client: data.client,
            priority: data.priority,
            work: WorkState::Pending,
            assigned_to: data.assigned_to,
            assigned_by: data.assigned_by,
            approved_by: None,
            approved_at: None,
            deadline: data.deadline,
            notes: Vec::new(),
            created_at: timestamp,
            updated_at: timestamp,
        })
    }

    /// Reconstructs a task from persisted storage.
    #[must_use]
    pub fn from_persisted(data: PersistedTaskData) -> Self {
        Self {
            id: data.id,
            title: data.title,
            description: data.description,
            client: data.client,
            priority: data.priority,
            work: data.work,
            assigned_to: data.assigned_to,
            assigned_by: data.assigned_by,
            approved_by: data.approved_by,
            approved_at: data.approved_at,
            deadline: data.deadline,
            notes: data.notes,
            created_at: data.created_at,
            updated_at: data.updated_at,
        }
    }

    /// Returns the task identifier.
    #[must_use]
    pub const fn id(&self) -> TaskId {
        self.id
    }

    /// Returns the title.
    #[must_use]
    pub const fn title(&self) -> &TaskTitle {
        &self.title
    }

    /// Returns the description, if any.
    #[must_use]
    pub fn description(&self) -> Option<&str> {
        self.description.as_deref()
    }

    /// Returns the client reference.
    #[must_use]
    pub const fn client(&self) -> ClientId {
        self.client
    }

    /// Returns the urgency level.
    #[must_use]
    pub const fn priority(&self) -> Priority {
        self.priority
    }

    /// Returns the work-state payload.
    #[must_use]
    pub const fn work(&self) -> &WorkState {
        &self.work
    }

    /// Returns the observable lifecycle status.
    #[must_use]
    pub const fn status(&self) -> TaskStatus {
        self.work.status()
    }

    /// Returns the assignee reference.
    #[must_use]
    pub const fn assigned_to(&self) -> UserId {
        self.assigned_to
    }

    /// Returns the assigner reference.
    #[must_use]
    pub const fn assigned_by(&self) -> UserId {
        self.assigned_by
    }

    /// Returns the approver reference, if approved.
    #[must_use]
    pub const fn approved_by(&self) -> Option<UserId> {
        self.approved_by
    }

    /// Returns the approval timestamp, if approved.
    #[must_use]
    pub const fn approved_at(&self) -> Option<DateTime<Utc>> {
        self.approved_at
    }

    /// Returns the deadline, if any.
    #[must_use]
    pub const fn deadline(&self) -> Option<DateTime<Utc>> {
        self.deadline
    }

    /// Returns the progress notes in append order.
    #[must_use]
    pub fn notes(&self) -> &[TaskNote] {
        &self.notes
    }

    /// Returns the creation timestamp.
    #[must_use]
    pub const fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }

    /// Returns the latest lifecycle timestamp.
    #[must_use]
    pub const fn updated_at(&self) -> DateTime<Utc> {
        self.updated_at
    }

    /// Returns the total worked seconds across all closed intervals.
    #[must_use]
    pub const fn total_worked_seconds(&self) -> u64 {
        self.work.accrued_seconds()
    }

    /// Returns when work first started, if it ever did.
    #[must_use]
    pub const fn started_at(&self) -> Option<DateTime<Utc>> {
        self.work.started_at()
    }

    /// Returns the completion timestamp, if completed.
    #[must_use]
    pub const fn ended_at(&self) -> Option<DateTime<Utc>> {
        self.work.ended_at()
    }

    /// Returns the start of the currently open worked interval.
    #[must_use]
    pub const fn last_resumed_at(&self) -> Option<DateTime<Utc>> {
        self.work.last_resumed_at()
    }

    /// Returns when accrual last stopped, for paused and waiting states.
    #[must_use]
    pub const fn paused_at(&self) -> Option<DateTime<Utc>> {
        self.work.paused_at()
    }

    /// Returns whether accrual is stopped without the task being done.
    #[must_use]
    pub const fn is_paused(&self) -> bool {
        self.work.is_paused()
    }

    /// Starts work for the first time.
    ///
    /// # Errors
    ///
    /// Returns [`TaskDomainError::InvalidTransition`] unless the task is
    /// pending; a task starts at most once per lifetime.
    pub fn start(&mut self, clock: &impl Clock) -> Result<(), TaskDomainError> {
        let now = clock.utc();
        match self.work {
            WorkState::Pending => {
                self.work = WorkState::Ongoing {
                    started_at: now,
                    accrued_seconds: 0,
                    resumed_at: now,
                };
                self.touch_at(now);
                Ok(())
            }
            _ => Err(self.blocked(LifecycleAction::Start)),
        }
    }

    /// Pauses ongoing work or resumes paused work.
    ///
    /// Pausing closes the open interval into the accrued total; resuming
    /// opens a fresh interval at the current time.
    ///
    /// # Errors
    ///
    /// Returns [`TaskDomainError::InvalidTransition`] unless the task is
    /// ongoing or paused.
    pub fn toggle_pause(&mut self, clock: &impl Clock) -> Result<(), TaskDomainError> {
        let now = clock.utc();
        match self.work {
            WorkState::Ongoing {
                started_at,
                accrued_seconds,
                resumed_at,
            } => {
                self.work = WorkState::Paused {
                    started_at,
                    accrued_seconds: accrued_seconds + elapsed_whole_seconds(resumed_at, now),
                    paused_at: now,
                };
            }
            WorkState::Paused {
                started_at,
                accrued_seconds,
                ..
            } => {
                self.work = WorkState::Ongoing {
                    started_at,
                    accrued_seconds,
                    resumed_at: now,
                };
            }
            _ => return Err(self.blocked(LifecycleAction::TogglePause)),
        }
        self.touch_at(now);
        Ok(())
    }

    /// Completes the task directly, bypassing the approval gate.
    ///
    /// # Errors
    ///
    /// Returns [`TaskDomainError::InvalidTransition`] when the task is
    /// already completed or is waiting for approval; a requested completion
    /// can only be resolved by [`Task::approve_completion`].
    pub fn complete(&mut self, clock: &impl Clock) -> Result<(), TaskDomainError> {
        let now = clock.utc();
        match self.work {
            WorkState::Pending => {
                self.work = WorkState::Completed {
                    started_at: None,
                    accrued_seconds: 0,
                    ended_at: now,
                };
            }
            WorkState::Ongoing {
                started_at,
                accrued_seconds,
                resumed_at,
            } => {
                self.work = WorkState::Completed {
                    started_at: Some(started_at),
                    accrued_seconds: accrued_seconds + elapsed_whole_seconds(resumed_at, now),
                    ended_at: now,
                };
            }
            WorkState::Paused {
                started_at,
                accrued_seconds,
                ..
            } => {
                self.work = WorkState::Completed {
                    started_at: Some(started_at),
                    accrued_seconds,
                    ended_at: now,
                };
            }
            WorkState::WaitingApproval { .. } | WorkState::Completed { .. } => {
                return Err(self.blocked(LifecycleAction::Complete));
            }
        }
        self.touch_at(now);
        Ok(())
    }

    /// Reopens a completed task into active work.
    ///
    /// The accrued total is preserved; the completion timestamp is cleared
    /// and a fresh worked interval opens at the current time.
    ///
    /// # Errors
    ///
    /// Returns [`TaskDomainError::InvalidTransition`] unless the task is
    /// completed.
    pub fn reopen(&mut self, clock: &impl Clock) -> Result<(), TaskDomainError> {
        let now = clock.utc();
        match self.work {
            WorkState::Completed {
                started_at,
                accrued_seconds,
                ..
            } => {
                self.work = WorkState::Ongoing {
                    started_at: started_at.unwrap_or(now),
                    accrued_seconds,
                    resumed_at: now,
                };
                self.touch_at(now);
                Ok(())
            }
            _ => Err(self.blocked(LifecycleAction::Reopen)),
        }
    }

    /// Sends the task to the approval gate, freezing accrual.
    ///
    /// Requesting again while already waiting refreshes the request
    /// timestamp without touching the accrued total.
    ///
    /// # Errors
    ///
    /// Returns [`TaskDomainError::InvalidTransition`] when the task is
    /// already completed.
    pub fn request_completion(&mut self, clock: &impl Clock) -> Result<(), TaskDomainError> {
        let now = clock.utc();
        match self.work {
            WorkState::Pending => {
                self.work = WorkState::WaitingApproval {
                    started_at: None,
                    accrued_seconds: 0,
                    requested_at: now,
                };
            }
            WorkState::Ongoing {
                started_at,
                accrued_seconds,
                resumed_at,
            } => {
                self.work = WorkState::WaitingApproval {
                    started_at: Some(started_at),
                    accrued_seconds: accrued_seconds + elapsed_whole_seconds(resumed_at, now),
                    requested_at: now,
                };
            }
            WorkState::Paused {
                started_at,
                accrued_seconds,
                ..
            } => {
                self.work = WorkState::WaitingApproval {
                    started_at: Some(started_at),
                    accrued_seconds,
                    requested_at: now,
                };
            }
            WorkState::WaitingApproval {
                started_at,
                accrued_seconds,
                ..
            } => {
                self.work = WorkState::WaitingApproval {
                    started_at,
                    accrued_seconds,
                    requested_at: now,
                };
            }
            WorkState::Completed { .. } => {
                return Err(self.blocked(LifecycleAction::RequestCompletion));
            }
        }
        self.touch_at(now);
        Ok(())
    }

    /// Approves a requested completion, recording the approver.
    ///
    /// No work time accrues: the request already froze the open interval.
    ///
    /// # Errors
    ///
    /// Returns [`TaskDomainError::InvalidTransition`] unless the task is
    /// waiting for approval.
    pub fn approve_completion(
        &mut self,
        approver: UserId,
        clock: &impl Clock,
    ) -> Result<(), TaskDomainError> {
        let now = clock.utc();
        match self.work {
            WorkState::WaitingApproval {
                started_at,
                accrued_seconds,
                ..
            } => {
                self.work = WorkState::Completed {
                    started_at,
                    accrued_seconds,
                    ended_at: now,
                };
                self.approved_by = Some(approver);
                self.approved_at = Some(now);
                self.touch_at(now);
                Ok(())
            }
            _ => Err(self.blocked(LifecycleAction::ApproveCompletion)),
        }
    }

    /// Replaces the title.
    pub fn rename(&mut self, title: TaskTitle, clock: &impl Clock) {
        self.title = title;
        self.touch(clock);
    }

    /// Replaces the description.
    pub fn set_description(&mut self, description: Option<String>, clock: &impl Clock) {
        self.description = description;
        self.touch(clock);
    }

    /// Replaces the urgency level.
    pub fn set_priority(&mut self, priority: Priority, clock: &impl Clock) {
        self.priority = priority;
        self.touch(clock);
    }

    /// Replaces the deadline.
    ///
    /// # Errors
    ///
    /// Returns [`TaskDomainError::DeadlineInPast`] when the new deadline
    /// falls before the current date.
    pub fn set_deadline(
        &mut self,
        deadline: DateTime<Utc>,
        clock: &impl Clock,
    ) -> Result<(), TaskDomainError> {
        validate_deadline(deadline, clock)?;
        self.deadline = Some(deadline);
        self.touch(clock);
        Ok(())
    }

    /// Appends a progress note.
    pub fn add_note(&mut self, message: impl Into<String>, clock: &impl Clock) {
        self.notes.push(TaskNote::new(message, clock));
        self.touch(clock);
    }

    fn blocked(&self, action: LifecycleAction) -> TaskDomainError {
        TaskDomainError::InvalidTransition {
            task_id: self.id,
            from: self.work.status(),
            action,
        }
    }

    fn touch(&mut self, clock: &impl Clock) {
        self.updated_at = clock.utc();
    }

    const fn touch_at(&mut self, timestamp: DateTime<Utc>) {
        self.updated_at = timestamp;
    }
}

/// Validates a deadline against the current date.
///
/// Comparison is date-only; the time of day is ignored on both sides, so a
/// deadline of today always passes.
///
/// # Errors
///
/// Returns [`TaskDomainError::DeadlineInPast`] when the deadline date is
/// strictly before today.
pub fn validate_deadline(
    deadline: DateTime<Utc>,
    clock: &impl Clock,
) -> Result<(), TaskDomainError> {
    let today = clock.utc().date_naive();
    let deadline_date = deadline.date_naive();
    if deadline_date < today {
        return Err(TaskDomainError::DeadlineInPast {
            deadline: deadline_date,
            today,
        });
    }
    Ok(())
}
