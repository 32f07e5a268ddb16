//! Outbound notifications for Foreman.
//!
//! Lifecycle services emit [`domain::NotificationEvent`] values through the
//! [`ports::NotificationOutbox`]; a [`worker::DeliveryWorker`] consumes the
//! queue and performs email and calendar delivery. Every delivery path is
//! best effort: failures are logged and never surface into the operation
//! that emitted the event.

pub mod adapters;
pub mod domain;
pub mod ports;
pub mod templates;
pub mod worker;
