//! Notification events and delivery payloads.

use crate::directory::domain::EmailAddress;
use crate::task::domain::{Priority, TaskId};
use chrono::{DateTime, Duration, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Outbound event emitted by lifecycle services.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum NotificationEvent {
    /// A task was created and assigned.
    TaskAssigned(TaskAssigned),
}

/// Snapshot of a fresh assignment, self-contained for delivery.
///
/// Carrying the rendered names and address here keeps the delivery worker
/// free of directory lookups; the snapshot is what the assignee is told,
/// even if records change before delivery.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TaskAssigned {
    /// Assigned task.
    pub task_id: TaskId,
    /// Task title.
    pub title: String,
    /// Task description, if any.
    pub description: Option<String>,
    /// Task urgency.
    pub priority: Priority,
    /// Task deadline, if any.
    pub deadline: Option<DateTime<Utc>>,
    /// Assignee display name.
    pub assignee_name: String,
    /// Assignee notification address.
    pub assignee_email: EmailAddress,
    /// Display name of the supervisor who assigned the task.
    pub assigned_by_name: String,
}

impl TaskAssigned {
    /// Returns the calendar event mirroring the deadline, if one exists.
    ///
    /// The event spans one hour starting at the deadline.
    #[must_use]
    pub fn deadline_event(&self) -> Option<DeadlineEvent> {
        self.deadline.map(|deadline| DeadlineEvent {
            task_id: self.task_id,
            summary: self.title.clone(),
            description: self.description.clone(),
            starts_at: deadline,
            ends_at: deadline + Duration::hours(1),
        })
    }
}

/// Rendered email ready for the mailer.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EmailMessage {
    /// Recipient address.
    pub to: EmailAddress,
    /// Subject line.
    pub subject: String,
    /// HTML body.
    pub html_body: String,
}

/// Calendar entry mirroring a task deadline.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DeadlineEvent {
    /// Source task.
    pub task_id: TaskId,
    /// Event summary line.
    pub summary: String,
    /// Event description, if any.
    pub description: Option<String>,
    /// Event start (the deadline).
    pub starts_at: DateTime<Utc>,
    /// Event end.
    pub ends_at: DateTime<Utc>,
}

/// Link to an upserted external calendar event.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct EventLink(String);

impl EventLink {
    /// Creates a link from the external calendar's response.
    #[must_use]
    pub fn new(value: impl Into<String>) -> Self {
        Self(value.into())
    }

    /// Returns the link as `str`.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for EventLink {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}
