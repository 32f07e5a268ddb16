//! Shared fixtures for task tests.

use crate::client::domain::ClientId;
use crate::directory::domain::UserId;
use crate::task::domain::{NewTaskData, Priority, Task, TaskTitle};
use chrono::{DateTime, Duration, Local, TimeZone, Utc};
use mockable::Clock;
use std::sync::Mutex;

/// Deterministic clock advanced explicitly by tests.
#[derive(Debug)]
pub(crate) struct ManualClock {
    now: Mutex<DateTime<Utc>>,
}

impl ManualClock {
    /// Creates a clock frozen at the given instant.
    pub(crate) const fn at(start: DateTime<Utc>) -> Self {
        Self {
            now: Mutex::new(start),
        }
    }

    /// Creates a clock frozen at a fixed reference instant.
    pub(crate) fn fixed() -> Self {
        Self::at(reference_instant())
    }

    /// Moves the clock forward.
    pub(crate) fn advance(&self, duration: Duration) {
        let mut now = self.now.lock().expect("clock lock should not be poisoned");
        *now += duration;
    }

    /// Moves the clock to an absolute instant, possibly backwards.
    pub(crate) fn set(&self, instant: DateTime<Utc>) {
        let mut now = self.now.lock().expect("clock lock should not be poisoned");
        *now = instant;
    }
}

impl Clock for ManualClock {
    fn local(&self) -> DateTime<Local> {
        self.utc().with_timezone(&Local)
    }

    fn utc(&self) -> DateTime<Utc> {
        *self.now.lock().expect("clock lock should not be poisoned")
    }
}

/// A fixed instant comfortably in the future of nothing in particular.
pub(crate) fn reference_instant() -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2026, 3, 2, 9, 0, 0)
        .single()
        .expect("reference instant should be valid")
}

/// Builds a pending task assigned by `assigner` to `assignee`.
pub(crate) fn pending_task(assigner: UserId, assignee: UserId, clock: &impl Clock) -> Task {
    let title = TaskTitle::new("Fit kitchen cabinets").expect("title should be valid");
    Task::create(
        NewTaskData {
            title,
            description: Some("Measure twice".to_owned()),
            client: ClientId::new(),
            priority: Priority::Medium,
            assigned_to: assignee,
            assigned_by: assigner,
            deadline: None,
        },
        clock,
    )
    .expect("task creation should succeed")
}
