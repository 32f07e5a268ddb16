//! Error types for task domain validation and parsing.

use super::{LifecycleAction, TaskId, TaskStatus};
use chrono::NaiveDate;
use thiserror::Error;

/// Errors returned while constructing and mutating domain task values.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum TaskDomainError {
    /// The task title is empty after trimming.
    #[error("task title must not be empty")]
    EmptyTitle,

    /// The deadline falls before the current date.
    #[error("deadline {deadline} is before today ({today})")]
    DeadlineInPast {
        /// Rejected deadline date.
        deadline: NaiveDate,
        /// Current date at validation time.
        today: NaiveDate,
    },

    /// The requested lifecycle operation is not valid in the current status.
    #[error("cannot {action} task {task_id} while {from}")]
    InvalidTransition {
        /// Affected task.
        task_id: TaskId,
        /// Status at the time of the attempt.
        from: TaskStatus,
        /// Rejected operation.
        action: LifecycleAction,
    },
}

/// Error returned while parsing task statuses from persistence.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
#[error("unknown task status: {0}")]
pub struct ParseTaskStatusError(pub String);

/// Error returned while parsing priorities from persistence.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
#[error("unknown task priority: {0}")]
pub struct ParsePriorityError(pub String);
