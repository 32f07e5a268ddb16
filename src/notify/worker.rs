//! Asynchronous delivery worker for notification events.

use super::domain::{NotificationEvent, TaskAssigned};
use super::ports::{CalendarMirror, Mailer};
use super::templates::render_assignment_email;
use std::sync::Arc;
use tokio::sync::mpsc::UnboundedReceiver;
use tracing::{debug, warn};

/// Consumes queued notification events and performs delivery.
///
/// Every delivery is best effort: failures are logged at `warn` and the
/// worker moves on. The state transition that emitted the event has already
/// been persisted and is never rolled back from here.
#[derive(Clone)]
pub struct DeliveryWorker<M, G>
where
    M: Mailer,
    G: CalendarMirror,
{
    mailer: Arc<M>,
    calendar: Arc<G>,
}

impl<M, G> DeliveryWorker<M, G>
where
    M: Mailer,
    G: CalendarMirror,
{
    /// Creates a delivery worker over the given transports.
    #[must_use]
    pub const fn new(mailer: Arc<M>, calendar: Arc<G>) -> Self {
        Self { mailer, calendar }
    }

    /// Drains the queue until the sending side closes.
    pub async fn run(&self, mut receiver: UnboundedReceiver<NotificationEvent>) {
        while let Some(event) = receiver.recv().await {
            self.deliver(event).await;
        }
    }

    /// Delivers a single event.
    pub async fn deliver(&self, event: NotificationEvent) {
        match event {
            NotificationEvent::TaskAssigned(assigned) => {
                self.deliver_assignment(&assigned).await;
            }
        }
    }

    async fn deliver_assignment(&self, assigned: &TaskAssigned) {
        match render_assignment_email(assigned) {
            Ok(message) => {
                if let Err(error) = self.mailer.send(&message).await {
                    warn!(
                        %error,
                        task_id = %assigned.task_id,
                        recipient = %message.to,
                        "assignment email delivery failed",
                    );
                }
            }
            Err(error) => {
                warn!(%error, task_id = %assigned.task_id, "assignment email rendering failed");
            }
        }

        // No deadline, no calendar entry.
        let Some(deadline_event) = assigned.deadline_event() else {
            return;
        };
        match self.calendar.upsert_event(&deadline_event).await {
            Ok(link) => {
                debug!(task_id = %assigned.task_id, %link, "deadline mirrored to calendar");
            }
            Err(error) => {
                warn!(%error, task_id = %assigned.task_id, "calendar mirroring failed");
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::DeliveryWorker;
    use crate::directory::domain::EmailAddress;
    use crate::notify::adapters::{FailingMailer, RecordingCalendarMirror, RecordingMailer};
    use crate::notify::domain::{NotificationEvent, TaskAssigned};
    use crate::task::domain::{Priority, TaskId};
    use chrono::{TimeZone, Utc};
    use std::sync::Arc;

    fn assigned(deadline: Option<chrono::DateTime<Utc>>) -> TaskAssigned {
        TaskAssigned {
            task_id: TaskId::new(),
            title: "Install fixtures".to_owned(),
            description: None,
            priority: Priority::Medium,
            deadline,
            assignee_name: "Ravi".to_owned(),
            assignee_email: EmailAddress::new("ravi@example.com").expect("valid email"),
            assigned_by_name: "Asha".to_owned(),
        }
    }

    #[tokio::test(flavor = "multi_thread")]
    async fn delivers_email_and_skips_calendar_without_deadline() {
        let mailer = Arc::new(RecordingMailer::new());
        let calendar = Arc::new(RecordingCalendarMirror::new());
        let worker = DeliveryWorker::new(mailer.clone(), calendar.clone());

        worker
            .deliver(NotificationEvent::TaskAssigned(assigned(None)))
            .await;

        assert_eq!(mailer.sent().len(), 1);
        assert!(calendar.events().is_empty());
    }

    #[tokio::test(flavor = "multi_thread")]
    async fn mirrors_deadline_to_calendar() {
        let deadline = Utc.with_ymd_and_hms(2026, 10, 1, 9, 0, 0).single();
        let mailer = Arc::new(RecordingMailer::new());
        let calendar = Arc::new(RecordingCalendarMirror::new());
        let worker = DeliveryWorker::new(mailer, calendar.clone());

        worker
            .deliver(NotificationEvent::TaskAssigned(assigned(deadline)))
            .await;

        let events = calendar.events();
        assert_eq!(events.len(), 1);
        let event = events.first().expect("event should exist");
        assert_eq!(Some(event.starts_at), deadline);
        assert_eq!(event.ends_at - event.starts_at, chrono::Duration::hours(1));
    }

    #[tokio::test(flavor = "multi_thread")]
    async fn mailer_failure_does_not_stop_calendar_delivery() {
        let deadline = Utc.with_ymd_and_hms(2026, 10, 1, 9, 0, 0).single();
        let mailer = Arc::new(FailingMailer::new());
        let calendar = Arc::new(RecordingCalendarMirror::new());
        let worker = DeliveryWorker::new(mailer, calendar.clone());

        worker
            .deliver(NotificationEvent::TaskAssigned(assigned(deadline)))
            .await;

        assert_eq!(calendar.events().len(), 1);
    }

    #[tokio::test(flavor = "multi_thread")]
    async fn run_drains_queue_until_closed() {
        let mailer = Arc::new(RecordingMailer::new());
        let calendar = Arc::new(RecordingCalendarMirror::new());
        let worker = DeliveryWorker::new(mailer.clone(), calendar);
        let (sender, receiver) = tokio::sync::mpsc::unbounded_channel();

        sender
            .send(NotificationEvent::TaskAssigned(assigned(None)))
            .expect("send should succeed");
        sender
            .send(NotificationEvent::TaskAssigned(assigned(None)))
            .expect("send should succeed");
        drop(sender);

        worker.run(receiver).await;

        assert_eq!(mailer.sent().len(), 2);
    }
}
