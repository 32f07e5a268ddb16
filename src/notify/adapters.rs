//! Adapter implementations for notification ports.

use super::domain::{DeadlineEvent, EmailMessage, EventLink, NotificationEvent};
use super::ports::{
    CalendarMirror, CalendarMirrorError, CalendarMirrorResult, Mailer, MailerError, MailerResult,
    NotificationOutbox, OutboxError, OutboxResult,
};
use async_trait::async_trait;
use std::sync::{Arc, RwLock};
use tokio::sync::mpsc::{UnboundedReceiver, UnboundedSender, unbounded_channel};

/// Outbox backed by an unbounded channel into the delivery worker.
#[derive(Debug, Clone)]
pub struct ChannelOutbox {
    sender: UnboundedSender<NotificationEvent>,
}

impl ChannelOutbox {
    /// Creates an outbox and the receiver for its delivery worker.
    #[must_use]
    pub fn new() -> (Self, UnboundedReceiver<NotificationEvent>) {
        let (sender, receiver) = unbounded_channel();
        (Self { sender }, receiver)
    }
}

impl NotificationOutbox for ChannelOutbox {
    fn enqueue(&self, event: NotificationEvent) -> OutboxResult<()> {
        self.sender.send(event).map_err(|_| OutboxError::Closed)
    }
}

/// Outbox recording events in memory for assertions.
#[derive(Debug, Clone, Default)]
pub struct RecordingOutbox {
    events: Arc<RwLock<Vec<NotificationEvent>>>,
}

impl RecordingOutbox {
    /// Creates an empty recording outbox.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns a snapshot of the enqueued events.
    ///
    /// Returns an empty list when the lock is poisoned; recording is a
    /// test aid, not a correctness surface.
    #[must_use]
    pub fn events(&self) -> Vec<NotificationEvent> {
        self.events
            .read()
            .map(|events| events.clone())
            .unwrap_or_default()
    }
}

impl NotificationOutbox for RecordingOutbox {
    fn enqueue(&self, event: NotificationEvent) -> OutboxResult<()> {
        let mut events = self.events.write().map_err(|_| OutboxError::Closed)?;
        events.push(event);
        Ok(())
    }
}

/// Outbox that always reports a closed queue.
#[derive(Debug, Clone, Copy, Default)]
pub struct ClosedOutbox;

impl ClosedOutbox {
    /// Creates the failing outbox.
    #[must_use]
    pub const fn new() -> Self {
        Self
    }
}

impl NotificationOutbox for ClosedOutbox {
    fn enqueue(&self, _event: NotificationEvent) -> OutboxResult<()> {
        Err(OutboxError::Closed)
    }
}

/// Mailer recording sent messages in memory.
#[derive(Debug, Clone, Default)]
pub struct RecordingMailer {
    sent: Arc<RwLock<Vec<EmailMessage>>>,
}

impl RecordingMailer {
    /// Creates an empty recording mailer.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns a snapshot of the sent messages.
    #[must_use]
    pub fn sent(&self) -> Vec<EmailMessage> {
        self.sent
            .read()
            .map(|sent| sent.clone())
            .unwrap_or_default()
    }
}

#[async_trait]
impl Mailer for RecordingMailer {
    async fn send(&self, message: &EmailMessage) -> MailerResult<()> {
        let mut sent = self
            .sent
            .write()
            .map_err(|err| MailerError::delivery(std::io::Error::other(err.to_string())))?;
        sent.push(message.clone());
        Ok(())
    }
}

/// Mailer that fails every send, for exercising best-effort paths.
#[derive(Debug, Clone, Copy, Default)]
pub struct FailingMailer;

impl FailingMailer {
    /// Creates the failing mailer.
    #[must_use]
    pub const fn new() -> Self {
        Self
    }
}

#[async_trait]
impl Mailer for FailingMailer {
    async fn send(&self, _message: &EmailMessage) -> MailerResult<()> {
        Err(MailerError::delivery(std::io::Error::other(
            "smtp transport unavailable",
        )))
    }
}

/// Calendar mirror recording upserted events in memory.
#[derive(Debug, Clone, Default)]
pub struct RecordingCalendarMirror {
    events: Arc<RwLock<Vec<DeadlineEvent>>>,
}

impl RecordingCalendarMirror {
    /// Creates an empty recording mirror.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns a snapshot of the upserted events.
    #[must_use]
    pub fn events(&self) -> Vec<DeadlineEvent> {
        self.events
            .read()
            .map(|events| events.clone())
            .unwrap_or_default()
    }
}

#[async_trait]
impl CalendarMirror for RecordingCalendarMirror {
    async fn upsert_event(&self, event: &DeadlineEvent) -> CalendarMirrorResult<EventLink> {
        let mut events = self.events.write().map_err(|err| {
            CalendarMirrorError::delivery(std::io::Error::other(err.to_string()))
        })?;
        events.push(event.clone());
        Ok(EventLink::new(format!(
            "https://calendar.example/events/{}",
            event.task_id
        )))
    }
}
