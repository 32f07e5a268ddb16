//! Outbox-to-delivery round trips: service emits, worker delivers.

use super::helpers::seeded_env;
use chrono::Duration;
use foreman::notify::adapters::{
    ChannelOutbox, RecordingCalendarMirror, RecordingMailer,
};
use foreman::notify::worker::DeliveryWorker;
use foreman::task::domain::Priority;
use foreman::task::services::CreateTaskRequest;
use mockable::Clock;
use std::sync::Arc;

#[tokio::test(flavor = "multi_thread")]
async fn assignment_reaches_mailer_and_calendar() {
    let (outbox, receiver) = ChannelOutbox::new();
    let env = seeded_env(outbox).await;

    let deadline = env.clock.utc() + Duration::days(7);
    let request = CreateTaskRequest::new("Fit smoke alarms", env.client, env.employee.id())
        .with_priority(Priority::High)
        .with_deadline(deadline);
    let task = env
        .service
        .create(&env.manager, request)
        .await
        .expect("creation should succeed");

    // The service holds the only sender; drop it so the worker drains and exits.
    drop(env);

    let mailer = Arc::new(RecordingMailer::new());
    let calendar = Arc::new(RecordingCalendarMirror::new());
    let worker = DeliveryWorker::new(mailer.clone(), calendar.clone());
    worker.run(receiver).await;

    let sent = mailer.sent();
    assert_eq!(sent.len(), 1);
    let message = sent.first().expect("message should exist");
    assert_eq!(message.to.as_str(), "ravi@example.com");
    assert_eq!(message.subject, "New task assigned: Fit smoke alarms");
    assert!(message.html_body.contains("Asha"));

    let events = calendar.events();
    assert_eq!(events.len(), 1);
    let event = events.first().expect("event should exist");
    assert_eq!(event.task_id, task.id());
    assert_eq!(event.starts_at, deadline);
}

#[tokio::test(flavor = "multi_thread")]
async fn assignment_without_deadline_skips_the_calendar() {
    let (outbox, receiver) = ChannelOutbox::new();
    let env = seeded_env(outbox).await;

    let request = CreateTaskRequest::new("Sweep the yard", env.client, env.employee.id());
    env.service
        .create(&env.manager, request)
        .await
        .expect("creation should succeed");
    drop(env);

    let mailer = Arc::new(RecordingMailer::new());
    let calendar = Arc::new(RecordingCalendarMirror::new());
    let worker = DeliveryWorker::new(mailer.clone(), calendar.clone());
    worker.run(receiver).await;

    assert_eq!(mailer.sent().len(), 1);
    assert!(calendar.events().is_empty());
}

#[tokio::test(flavor = "multi_thread")]
async fn lifecycle_transitions_emit_no_events() {
    let (outbox, receiver) = ChannelOutbox::new();
    let env = seeded_env(outbox).await;

    let request = CreateTaskRequest::new("Patch the roof", env.client, env.employee.id());
    let task = env
        .service
        .create(&env.manager, request)
        .await
        .expect("creation should succeed");
    env.service
        .start(&env.employee, task.id())
        .await
        .expect("start should succeed");
    env.service
        .complete(&env.employee, task.id())
        .await
        .expect("complete should succeed");
    drop(env);

    let mailer = Arc::new(RecordingMailer::new());
    let calendar = Arc::new(RecordingCalendarMirror::new());
    let worker = DeliveryWorker::new(mailer.clone(), calendar);
    worker.run(receiver).await;

    // Only the assignment notification; transitions are silent.
    assert_eq!(mailer.sent().len(), 1);
}
