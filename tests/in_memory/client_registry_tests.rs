//! Client registry flows through the service layer.

use super::helpers::ManualClock;
use foreman::client::{
    adapters::memory::InMemoryClientRepository, domain::ClientId, services::ClientService,
};
use foreman::directory::domain::{Actor, Role, UserId};
use foreman::error::ErrorClass;
use std::sync::Arc;

fn service() -> ClientService<InMemoryClientRepository, ManualClock> {
    ClientService::new(
        Arc::new(InMemoryClientRepository::new()),
        Arc::new(ManualClock::fixed()),
    )
}

fn manager() -> Actor {
    Actor::new(UserId::new(), Role::Manager)
}

#[tokio::test(flavor = "multi_thread")]
async fn create_list_delete_round_trip() {
    let service = service();
    let actor = manager();

    let client = service
        .create(&actor, "Hollis & Sons")
        .await
        .expect("creation should succeed");
    let listed = service.list().await.expect("listing should succeed");
    assert_eq!(listed.len(), 1);

    service
        .delete(&actor, client.id())
        .await
        .expect("deletion should succeed");
    let remaining = service.list().await.expect("listing should succeed");
    assert!(remaining.is_empty());
}

#[tokio::test(flavor = "multi_thread")]
async fn employee_may_not_manage_clients() {
    let service = service();
    let employee = Actor::new(UserId::new(), Role::Employee);

    let create_error = service
        .create(&employee, "Hollis & Sons")
        .await
        .expect_err("creation should be refused");
    let delete_error = service
        .delete(&employee, ClientId::new())
        .await
        .expect_err("deletion should be refused");

    assert_eq!(create_error.class(), ErrorClass::Forbidden);
    assert_eq!(delete_error.class(), ErrorClass::Forbidden);
}

#[tokio::test(flavor = "multi_thread")]
async fn blank_client_name_is_refused() {
    let service = service();

    let error = service
        .create(&manager(), "   ")
        .await
        .expect_err("creation should be refused");

    assert_eq!(error.class(), ErrorClass::InvalidInput);
}

#[tokio::test(flavor = "multi_thread")]
async fn deleting_a_missing_client_reports_not_found() {
    let service = service();

    let error = service
        .delete(&manager(), ClientId::new())
        .await
        .expect_err("deletion should fail");

    assert_eq!(error.class(), ErrorClass::NotFound);
}

#[tokio::test(flavor = "multi_thread")]
async fn listing_is_ordered_by_name() {
    let service = service();
    let actor = manager();

    service
        .create(&actor, "Zenith Builders")
        .await
        .expect("creation should succeed");
    service
        .create(&actor, "Abbey Road Works")
        .await
        .expect("creation should succeed");

    let listed = service.list().await.expect("listing should succeed");
    let names: Vec<&str> = listed.iter().map(|c| c.name().as_str()).collect();
    assert_eq!(names, vec!["Abbey Road Works", "Zenith Builders"]);
}
