//! Port contracts for notification delivery.

use super::domain::{DeadlineEvent, EmailMessage, EventLink, NotificationEvent};
use async_trait::async_trait;
use std::sync::Arc;
use thiserror::Error;

/// Result type for outbox operations.
pub type OutboxResult<T> = Result<T, OutboxError>;

/// Hand-off point between lifecycle services and the delivery worker.
///
/// Enqueueing must be cheap and non-blocking; delivery happens elsewhere.
pub trait NotificationOutbox: Send + Sync {
    /// Queues an event for asynchronous delivery.
    ///
    /// # Errors
    ///
    /// Returns [`OutboxError::Closed`] when the delivery side has shut down.
    /// Callers treat this as a best-effort failure to log, never to surface.
    fn enqueue(&self, event: NotificationEvent) -> OutboxResult<()>;
}

/// Errors returned by outbox implementations.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum OutboxError {
    /// The delivery worker is no longer receiving.
    #[error("notification queue is closed")]
    Closed,
}

/// Result type for mailer operations.
pub type MailerResult<T> = Result<T, MailerError>;

/// Email delivery contract.
#[async_trait]
pub trait Mailer: Send + Sync {
    /// Sends one message.
    async fn send(&self, message: &EmailMessage) -> MailerResult<()>;
}

/// Errors returned by mailer adapters.
#[derive(Debug, Clone, Error)]
pub enum MailerError {
    /// Transport-level delivery failure.
    #[error("email delivery error: {0}")]
    Delivery(Arc<dyn std::error::Error + Send + Sync>),
}

impl MailerError {
    /// Wraps a transport error.
    pub fn delivery(err: impl std::error::Error + Send + Sync + 'static) -> Self {
        Self::Delivery(Arc::new(err))
    }
}

/// Result type for calendar mirror operations.
pub type CalendarMirrorResult<T> = Result<T, CalendarMirrorError>;

/// External calendar contract mirroring task deadlines.
#[async_trait]
pub trait CalendarMirror: Send + Sync {
    /// Creates or updates the calendar entry for a deadline.
    ///
    /// Returns a link to the external event.
    async fn upsert_event(&self, event: &DeadlineEvent) -> CalendarMirrorResult<EventLink>;
}

/// Errors returned by calendar mirror adapters.
#[derive(Debug, Clone, Error)]
pub enum CalendarMirrorError {
    /// Transport-level delivery failure.
    #[error("calendar delivery error: {0}")]
    Delivery(Arc<dyn std::error::Error + Send + Sync>),
}

impl CalendarMirrorError {
    /// Wraps a transport error.
    pub fn delivery(err: impl std::error::Error + Send + Sync + 'static) -> Self {
        Self::Delivery(Arc::new(err))
    }
}
