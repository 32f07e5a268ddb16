//! Work-state machine and elapsed-time accounting.
//!
//! One tagged variant per lifecycle state replaces the flag set the feature
//! grew up with (`is_paused`, `paused_at`, `last_resumed_at`, `start_time`,
//! `end_time`): invalid flag combinations are unrepresentable, and the
//! accrued worked-time counter travels with the state that owns it.

use super::ParseTaskStatusError;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Task lifecycle status as observed by callers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TaskStatus {
    /// Created, work not started.
    Pending,
    /// Actively being worked.
    Ongoing,
    /// Work temporarily paused.
    Paused,
    /// Completion requested, awaiting supervisor sign-off.
    WaitingApproval,
    /// Work finished.
    Completed,
}

impl TaskStatus {
    /// Returns the canonical storage representation.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Pending => "pending",
            Self::Ongoing => "ongoing",
            Self::Paused => "paused",
            Self::WaitingApproval => "waiting_approval",
            Self::Completed => "completed",
        }
    }
}

impl fmt::Display for TaskStatus {
    fn fmt(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        formatter.write_str(self.as_str())
    }
}

impl TryFrom<&str> for TaskStatus {
    type Error = ParseTaskStatusError;

    fn try_from(value: &str) -> Result<Self, Self::Error> {
        let normalized = value.trim().to_ascii_lowercase();
        match normalized.as_str() {
            "pending" => Ok(Self::Pending),
            "ongoing" => Ok(Self::Ongoing),
            "paused" => Ok(Self::Paused),
            "waiting_approval" => Ok(Self::WaitingApproval),
            "completed" => Ok(Self::Completed),
            _ => Err(ParseTaskStatusError(value.to_owned())),
        }
    }
}

/// Work-state machine payload.
///
/// Work time accrues only over `[resumed_at, now)` while [`WorkState::Ongoing`];
/// every transition out of `Ongoing` closes that interval into the accrued
/// total first. The accrued counter therefore never decreases.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum WorkState {
    /// Work has not started.
    Pending,
    /// Actively accruing work time.
    Ongoing {
        /// When work first started.
        started_at: DateTime<Utc>,
        /// Whole seconds worked in already-closed intervals.
        accrued_seconds: u64,
        /// Start of the currently open interval.
        resumed_at: DateTime<Utc>,
    },
    /// Paused; the open interval has been closed into the accrued total.
    Paused {
        /// When work first started.
        started_at: DateTime<Utc>,
        /// Whole seconds worked in closed intervals.
        accrued_seconds: u64,
        /// When the pause began.
        paused_at: DateTime<Utc>,
    },
    /// Awaiting supervisor approval; accrual is frozen.
    WaitingApproval {
        /// When work first started, if it ever did.
        started_at: Option<DateTime<Utc>>,
        /// Whole seconds worked in closed intervals.
        accrued_seconds: u64,
        /// When completion was requested.
        requested_at: DateTime<Utc>,
    },
    /// Work finished.
    Completed {
        /// When work first started, if it ever did.
        started_at: Option<DateTime<Utc>>,
        /// Whole seconds worked in closed intervals.
        accrued_seconds: u64,
        /// When the task was completed.
        ended_at: DateTime<Utc>,
    },
}

impl WorkState {
    /// Returns the observable status for this state.
    #[must_use]
    pub const fn status(&self) -> TaskStatus {
        match self {
            Self::Pending => TaskStatus::Pending,
            Self::Ongoing { .. } => TaskStatus::Ongoing,
            Self::Paused { .. } => TaskStatus::Paused,
            Self::WaitingApproval { .. } => TaskStatus::WaitingApproval,
            Self::Completed { .. } => TaskStatus::Completed,
        }
    }

    /// Returns the total worked seconds across all closed intervals.
    #[must_use]
    pub const fn accrued_seconds(&self) -> u64 {
        match self {
            Self::Pending => 0,
            Self::Ongoing {
                accrued_seconds, ..
            }
            | Self::Paused {
                accrued_seconds, ..
            }
            | Self::WaitingApproval {
                accrued_seconds, ..
            }
            | Self::Completed {
                accrued_seconds, ..
            } => *accrued_seconds,
        }
    }

    /// Returns when work first started, if it ever did.
    #[must_use]
    pub const fn started_at(&self) -> Option<DateTime<Utc>> {
        match self {
            Self::Pending => None,
            Self::Ongoing { started_at, .. } | Self::Paused { started_at, .. } => {
                Some(*started_at)
            }
            Self::WaitingApproval { started_at, .. } | Self::Completed { started_at, .. } => {
                *started_at
            }
        }
    }

    /// Returns the start of the currently open worked interval.
    ///
    /// `Some` exactly when the task is accruing work time.
    #[must_use]
    pub const fn last_resumed_at(&self) -> Option<DateTime<Utc>> {
        match self {
            Self::Ongoing { resumed_at, .. } => Some(*resumed_at),
            _ => None,
        }
    }

    /// Returns when accrual last stopped, for paused and waiting states.
    #[must_use]
    pub const fn paused_at(&self) -> Option<DateTime<Utc>> {
        match self {
            Self::Paused { paused_at, .. } => Some(*paused_at),
            Self::WaitingApproval { requested_at, .. } => Some(*requested_at),
            _ => None,
        }
    }

    /// Returns the completion timestamp.
    #[must_use]
    pub const fn ended_at(&self) -> Option<DateTime<Utc>> {
        match self {
            Self::Completed { ended_at, .. } => Some(*ended_at),
            _ => None,
        }
    }

    /// Returns whether accrual is stopped without the task being done.
    #[must_use]
    pub const fn is_paused(&self) -> bool {
        matches!(self, Self::Paused { .. } | Self::WaitingApproval { .. })
    }
}

/// Returns the whole seconds elapsed between two instants.
///
/// Sub-second remainders are dropped and a backwards clock yields zero, so a
/// closed interval can never shrink the accrued total.
#[must_use]
pub fn elapsed_whole_seconds(from: DateTime<Utc>, to: DateTime<Utc>) -> u64 {
    u64::try_from((to - from).num_seconds()).unwrap_or(0)
}
