//! End-to-end task lifecycle flows through the service layer.

use super::helpers::{TestEnv, seeded_env};
use chrono::Duration;
use foreman::error::ErrorClass;
use foreman::notify::adapters::RecordingOutbox;
use foreman::task::domain::{Priority, Task, TaskId, TaskStatus};
use foreman::task::services::{CreateTaskRequest, UpdateTaskRequest};
use mockable::Clock;

async fn created_task(env: &TestEnv<RecordingOutbox>) -> Task {
    let request = CreateTaskRequest::new("Replace fuse board", env.client, env.employee.id())
        .with_description("Unit 4, ground floor")
        .with_priority(Priority::High);
    env.service
        .create(&env.manager, request)
        .await
        .expect("creation should succeed")
}

/// Asserts exactly one task is listed with the expected ID.
///
/// # Errors
///
/// Returns an error if the result set does not contain exactly one task
/// matching `expected_id`.
fn assert_single_task(found: &[Task], expected_id: TaskId) -> Result<(), eyre::Report> {
    eyre::ensure!(
        found.len() == 1,
        "expected exactly one task, found {}",
        found.len()
    );
    let task = found
        .first()
        .ok_or_else(|| eyre::eyre!("expected at least one task"))?;
    eyre::ensure!(task.id() == expected_id, "task ID mismatch");
    Ok(())
}

#[tokio::test(flavor = "multi_thread")]
async fn supervised_workflow_accrues_only_worked_time() {
    let env = seeded_env(RecordingOutbox::new()).await;
    let task = created_task(&env).await;

    env.service
        .start(&env.employee, task.id())
        .await
        .expect("start should succeed");
    env.clock.advance(Duration::seconds(10));
    env.service
        .toggle_pause(&env.employee, task.id())
        .await
        .expect("pause should succeed");
    env.clock.advance(Duration::seconds(10));
    env.service
        .toggle_pause(&env.employee, task.id())
        .await
        .expect("resume should succeed");
    env.clock.advance(Duration::seconds(10));
    env.service
        .request_completion(&env.employee, task.id())
        .await
        .expect("request should succeed");

    // Review time is not work time.
    env.clock.advance(Duration::days(1));
    let approved = env
        .service
        .approve_completion(&env.manager, task.id())
        .await
        .expect("approval should succeed");

    assert_eq!(approved.status(), TaskStatus::Completed);
    assert_eq!(approved.total_worked_seconds(), 20);
    assert_eq!(approved.approved_by(), Some(env.manager.id()));
    assert_eq!(approved.approved_at(), Some(env.clock.utc()));
}

#[tokio::test(flavor = "multi_thread")]
async fn direct_completion_reopen_and_second_completion() {
    let env = seeded_env(RecordingOutbox::new()).await;
    let task = created_task(&env).await;

    env.service
        .start(&env.employee, task.id())
        .await
        .expect("start should succeed");
    env.clock.advance(Duration::seconds(30));
    let completed = env
        .service
        .complete(&env.employee, task.id())
        .await
        .expect("complete should succeed");
    assert_eq!(completed.total_worked_seconds(), 30);

    env.clock.advance(Duration::hours(2));
    let reopened = env
        .service
        .reopen(&env.manager, task.id())
        .await
        .expect("reopen should succeed");
    assert_eq!(reopened.status(), TaskStatus::Ongoing);
    assert_eq!(reopened.ended_at(), None);

    env.clock.advance(Duration::seconds(15));
    let finished = env
        .service
        .complete(&env.employee, task.id())
        .await
        .expect("second completion should succeed");
    assert_eq!(finished.total_worked_seconds(), 45);
}

#[tokio::test(flavor = "multi_thread")]
async fn waiting_approval_blocks_direct_completion() {
    let env = seeded_env(RecordingOutbox::new()).await;
    let task = created_task(&env).await;

    env.service
        .start(&env.employee, task.id())
        .await
        .expect("start should succeed");
    env.service
        .request_completion(&env.employee, task.id())
        .await
        .expect("request should succeed");

    let error = env
        .service
        .complete(&env.employee, task.id())
        .await
        .expect_err("direct completion should be refused in the gate");

    assert_eq!(error.class(), ErrorClass::InvalidTransition);
}

#[tokio::test(flavor = "multi_thread")]
async fn listing_reflects_assignment_scope() -> Result<(), eyre::Report> {
    let env = seeded_env(RecordingOutbox::new()).await;
    let task = created_task(&env).await;

    let for_employee = env
        .service
        .list_for(&env.employee)
        .await
        .expect("listing should succeed");
    let for_manager = env
        .service
        .list_for(&env.manager)
        .await
        .expect("listing should succeed");

    assert_single_task(&for_employee, task.id())?;
    assert_single_task(&for_manager, task.id())?;
    Ok(())
}

#[tokio::test(flavor = "multi_thread")]
async fn edits_and_notes_persist_through_the_repository() {
    let env = seeded_env(RecordingOutbox::new()).await;
    let task = created_task(&env).await;

    env.service
        .update(
            &env.employee,
            task.id(),
            UpdateTaskRequest::new()
                .with_description("Unit 4 and unit 5")
                .with_note("Waiting on parts"),
        )
        .await
        .expect("update should succeed");
    env.service
        .add_note(&env.employee, task.id(), "Parts arrived")
        .await
        .expect("note should succeed");

    let fetched = env
        .service
        .get(&env.manager, task.id())
        .await
        .expect("lookup should succeed");

    assert_eq!(fetched.description(), Some("Unit 4 and unit 5"));
    assert_eq!(fetched.notes().len(), 2);
    assert_eq!(
        fetched
            .notes()
            .last()
            .expect("note should exist")
            .message(),
        "Parts arrived"
    );
}

#[tokio::test(flavor = "multi_thread")]
async fn deadline_edit_in_the_past_is_refused() {
    let env = seeded_env(RecordingOutbox::new()).await;
    let task = created_task(&env).await;

    let error = env
        .service
        .update(
            &env.manager,
            task.id(),
            UpdateTaskRequest::new().with_deadline(env.clock.utc() - Duration::days(1)),
        )
        .await
        .expect_err("past deadline should be refused");

    assert_eq!(error.class(), ErrorClass::InvalidDeadline);
}
