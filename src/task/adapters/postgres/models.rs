//! Diesel row models for task persistence.

use super::schema::tasks;
use chrono::{DateTime, Utc};
use diesel::prelude::*;

/// Query result row for task records.
#[derive(Debug, Clone, Queryable, Selectable)]
#[diesel(table_name = tasks)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub struct TaskRow {
    /// Task identifier.
    pub id: uuid::Uuid,
    /// Title.
    pub title: String,
    /// Optional description.
    pub description: Option<String>,
    /// Client reference.
    pub client_id: uuid::Uuid,
    /// Urgency level.
    pub priority: String,
    /// Denormalized lifecycle status.
    pub status: String,
    /// Work-state payload.
    pub work: serde_json::Value,
    /// Optional deadline.
    pub deadline: Option<DateTime<Utc>>,
    /// Progress notes.
    pub notes: serde_json::Value,
    /// Assignee reference.
    pub assigned_to: uuid::Uuid,
    /// Assigner reference.
    pub assigned_by: uuid::Uuid,
    /// Approver reference.
    pub approved_by: Option<uuid::Uuid>,
    /// Approval timestamp.
    pub approved_at: Option<DateTime<Utc>>,
    /// Creation timestamp.
    pub created_at: DateTime<Utc>,
    /// Last update timestamp.
    pub updated_at: DateTime<Utc>,
}

/// Insert model for task records.
#[derive(Debug, Clone, Insertable)]
#[diesel(table_name = tasks)]
pub struct NewTaskRow {
    /// Task identifier.
    pub id: uuid::Uuid,
    /// Title.
    pub title: String,
    /// Optional description.
    pub description: Option<String>,
    /// Client reference.
    pub client_id: uuid::Uuid,
    /// Urgency level.
    pub priority: String,
    /// Denormalized lifecycle status.
    pub status: String,
    /// Work-state payload.
    pub work: serde_json::Value,
    /// Optional deadline.
    pub deadline: Option<DateTime<Utc>>,
    /// Progress notes.
    pub notes: serde_json::Value,
    /// Assignee reference.
    pub assigned_to: uuid::Uuid,
    /// Assigner reference.
    pub assigned_by: uuid::Uuid,
    /// Approver reference.
    pub approved_by: Option<uuid::Uuid>,
    /// Approval timestamp.
    pub approved_at: Option<DateTime<Utc>>,
    /// Creation timestamp.
    pub created_at: DateTime<Utc>,
    /// Last update timestamp.
    pub updated_at: DateTime<Utc>,
}

/// Changeset applied when saving an existing task.
///
/// Identifier, assigner, and creation timestamp are immutable after insert.
#[derive(Debug, Clone, AsChangeset)]
#[diesel(table_name = tasks)]
#[diesel(treat_none_as_null = true)]
pub struct TaskChangeset {
    /// Title.
    pub title: String,
    /// Optional description; `None` clears the column.
    pub description: Option<String>,
    /// Urgency level.
    pub priority: String,
    /// Denormalized lifecycle status.
    pub status: String,
    /// Work-state payload.
    pub work: serde_json::Value,
    /// Optional deadline.
    pub deadline: Option<DateTime<Utc>>,
    /// Progress notes.
    pub notes: serde_json::Value,
    /// Assignee reference.
    pub assigned_to: uuid::Uuid,
    /// Approver reference.
    pub approved_by: Option<uuid::Uuid>,
    /// Approval timestamp.
    pub approved_at: Option<DateTime<Utc>>,
    /// Last update timestamp.
    pub updated_at: DateTime<Utc>,
}
