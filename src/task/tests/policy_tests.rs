//! Authorization policy tests.

use super::support::{ManualClock, pending_task};
use crate::directory::domain::{Actor, Role, UserId};
use crate::task::domain::{LifecycleAction, can_perform};
use rstest::rstest;

#[rstest]
#[case::create(LifecycleAction::Create)]
#[case::delete(LifecycleAction::Delete)]
#[case::approve(LifecycleAction::ApproveCompletion)]
fn supervisor_only_actions(#[case] action: LifecycleAction) {
    let admin = Actor::new(UserId::new(), Role::Admin);
    let manager = Actor::new(UserId::new(), Role::Manager);
    let employee = Actor::new(UserId::new(), Role::Employee);

    assert!(can_perform(&admin, action, None));
    assert!(can_perform(&manager, action, None));
    assert!(!can_perform(&employee, action, None));
}

#[rstest]
#[case::view(LifecycleAction::View)]
#[case::update(LifecycleAction::Update)]
#[case::add_note(LifecycleAction::AddNote)]
#[case::request(LifecycleAction::RequestCompletion)]
fn employees_touch_only_their_own_tasks(#[case] action: LifecycleAction) {
    let clock = ManualClock::fixed();
    let assignee = UserId::new();
    let task = pending_task(UserId::new(), assignee, &clock);

    let owner = Actor::new(assignee, Role::Employee);
    let stranger = Actor::new(UserId::new(), Role::Employee);

    assert!(can_perform(&owner, action, Some(&task)));
    assert!(!can_perform(&stranger, action, Some(&task)));
}

#[rstest]
#[case::view(LifecycleAction::View)]
#[case::update(LifecycleAction::Update)]
#[case::add_note(LifecycleAction::AddNote)]
#[case::request(LifecycleAction::RequestCompletion)]
fn supervisors_touch_any_task(#[case] action: LifecycleAction) {
    let clock = ManualClock::fixed();
    let task = pending_task(UserId::new(), UserId::new(), &clock);

    let admin = Actor::new(UserId::new(), Role::Admin);
    let manager = Actor::new(UserId::new(), Role::Manager);

    assert!(can_perform(&admin, action, Some(&task)));
    assert!(can_perform(&manager, action, Some(&task)));
}

#[rstest]
#[case::start(LifecycleAction::Start)]
#[case::toggle(LifecycleAction::TogglePause)]
#[case::complete(LifecycleAction::Complete)]
#[case::reopen(LifecycleAction::Reopen)]
fn state_transitions_are_open_to_all_roles(#[case] action: LifecycleAction) {
    let clock = ManualClock::fixed();
    let task = pending_task(UserId::new(), UserId::new(), &clock);

    for role in [Role::Admin, Role::Manager, Role::Employee] {
        let actor = Actor::new(UserId::new(), role);
        assert!(can_perform(&actor, action, Some(&task)));
    }
}

#[rstest]
fn employee_without_a_target_task_is_refused_scoped_actions() {
    let employee = Actor::new(UserId::new(), Role::Employee);

    assert!(!can_perform(&employee, LifecycleAction::View, None));
    assert!(!can_perform(&employee, LifecycleAction::Update, None));
}
