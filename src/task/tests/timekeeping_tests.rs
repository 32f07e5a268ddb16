//! Elapsed-time accounting across pause/resume cycles.

use super::support::{ManualClock, pending_task};
use crate::directory::domain::UserId;
use crate::task::domain::elapsed_whole_seconds;
use chrono::Duration;
use mockable::Clock;
use rstest::{fixture, rstest};

#[fixture]
fn clock() -> ManualClock {
    ManualClock::fixed()
}

#[rstest]
fn pause_resume_pause_accrues_only_worked_intervals(clock: ManualClock) {
    let mut task = pending_task(UserId::new(), UserId::new(), &clock);

    // Start at T0, pause at T0+10s, resume at T0+20s, pause at T0+30s.
    task.start(&clock).expect("start should succeed");
    clock.advance(Duration::seconds(10));
    task.toggle_pause(&clock).expect("pause should succeed");
    clock.advance(Duration::seconds(10));
    task.toggle_pause(&clock).expect("resume should succeed");
    clock.advance(Duration::seconds(10));
    task.toggle_pause(&clock).expect("pause should succeed");

    assert_eq!(task.total_worked_seconds(), 20);
}

#[rstest]
fn paused_time_does_not_accrue(clock: ManualClock) {
    let mut task = pending_task(UserId::new(), UserId::new(), &clock);
    task.start(&clock).expect("start should succeed");
    clock.advance(Duration::seconds(30));
    task.toggle_pause(&clock).expect("pause should succeed");

    clock.advance(Duration::hours(8));

    assert_eq!(task.total_worked_seconds(), 30);
}

#[rstest]
fn completing_ongoing_work_closes_the_open_interval(clock: ManualClock) {
    let mut task = pending_task(UserId::new(), UserId::new(), &clock);
    task.start(&clock).expect("start should succeed");
    clock.advance(Duration::seconds(45));

    task.complete(&clock).expect("complete should succeed");

    assert_eq!(task.total_worked_seconds(), 45);
}

#[rstest]
fn completing_paused_work_adds_nothing(clock: ManualClock) {
    let mut task = pending_task(UserId::new(), UserId::new(), &clock);
    task.start(&clock).expect("start should succeed");
    clock.advance(Duration::seconds(15));
    task.toggle_pause(&clock).expect("pause should succeed");
    clock.advance(Duration::minutes(90));

    task.complete(&clock).expect("complete should succeed");

    assert_eq!(task.total_worked_seconds(), 15);
}

#[rstest]
fn completing_a_pending_task_records_zero_work(clock: ManualClock) {
    let mut task = pending_task(UserId::new(), UserId::new(), &clock);

    task.complete(&clock).expect("complete should succeed");

    assert_eq!(task.total_worked_seconds(), 0);
    assert_eq!(task.started_at(), None);
}

#[rstest]
fn requesting_completion_freezes_accrual(clock: ManualClock) {
    let mut task = pending_task(UserId::new(), UserId::new(), &clock);
    task.start(&clock).expect("start should succeed");
    clock.advance(Duration::seconds(25));
    task.request_completion(&clock)
        .expect("request should succeed");

    // Waiting in the approval gate is not work.
    clock.advance(Duration::days(2));
    task.approve_completion(UserId::new(), &clock)
        .expect("approval should succeed");

    assert_eq!(task.total_worked_seconds(), 25);
}

#[rstest]
fn reopening_resumes_accrual_from_the_reopen_instant(clock: ManualClock) {
    let mut task = pending_task(UserId::new(), UserId::new(), &clock);
    task.start(&clock).expect("start should succeed");
    clock.advance(Duration::seconds(40));
    task.complete(&clock).expect("complete should succeed");
    clock.advance(Duration::days(1));

    task.reopen(&clock).expect("reopen should succeed");
    clock.advance(Duration::seconds(20));
    task.toggle_pause(&clock).expect("pause should succeed");

    assert_eq!(task.total_worked_seconds(), 60);
}

#[rstest]
fn accrued_total_never_decreases(clock: ManualClock) {
    let mut task = pending_task(UserId::new(), UserId::new(), &clock);
    task.start(&clock).expect("start should succeed");
    clock.advance(Duration::seconds(10));

    let mut previous = task.total_worked_seconds();
    for _ in 0..4 {
        task.toggle_pause(&clock).expect("toggle should succeed");
        clock.advance(Duration::seconds(7));
        let current = task.total_worked_seconds();
        assert!(current >= previous);
        previous = current;
    }
}

#[rstest]
fn backwards_clock_yields_zero_for_the_open_interval(clock: ManualClock) {
    let mut task = pending_task(UserId::new(), UserId::new(), &clock);
    task.start(&clock).expect("start should succeed");
    clock.advance(Duration::seconds(30));
    task.toggle_pause(&clock).expect("pause should succeed");
    clock.advance(Duration::seconds(5));
    task.toggle_pause(&clock).expect("resume should succeed");

    clock.set(clock.utc() - Duration::minutes(10));
    task.toggle_pause(&clock).expect("pause should succeed");

    assert_eq!(task.total_worked_seconds(), 30);
}

#[rstest]
#[case::exact(10_000, 10)]
#[case::subsecond_dropped(10_999, 10)]
#[case::zero(0, 0)]
fn whole_seconds_are_floored(#[case] millis: i64, #[case] expected: u64) {
    let from = super::support::reference_instant();
    let to = from + Duration::milliseconds(millis);

    assert_eq!(elapsed_whole_seconds(from, to), expected);
}

#[rstest]
fn negative_intervals_clamp_to_zero() {
    let from = super::support::reference_instant();
    let to = from - Duration::seconds(90);

    assert_eq!(elapsed_whole_seconds(from, to), 0);
}
