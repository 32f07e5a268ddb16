//! Shared test helpers for in-memory integration tests.

use chrono::{DateTime, Duration, Local, TimeZone, Utc};
use foreman::client::{
    adapters::memory::InMemoryClientRepository,
    domain::{Client, ClientId, ClientName},
    ports::ClientRepository,
};
use foreman::directory::{
    adapters::memory::InMemoryUserDirectory,
    domain::{Actor, EmailAddress, Role, User, UserId},
};
use foreman::notify::ports::NotificationOutbox;
use foreman::task::{adapters::memory::InMemoryTaskRepository, services::TaskLifecycleService};
use mockable::Clock;
use std::sync::{Arc, Mutex};

/// Deterministic clock advanced explicitly by tests.
#[derive(Debug)]
pub struct ManualClock {
    now: Mutex<DateTime<Utc>>,
}

impl ManualClock {
    /// Creates a clock frozen at a fixed reference instant.
    #[must_use]
    pub fn fixed() -> Self {
        let start = Utc
            .with_ymd_and_hms(2026, 3, 2, 9, 0, 0)
            .single()
            .expect("reference instant should be valid");
        Self {
            now: Mutex::new(start),
        }
    }

    /// Moves the clock forward.
    pub fn advance(&self, duration: Duration) {
        let mut now = self.now.lock().expect("clock lock should not be poisoned");
        *now += duration;
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

/// Fully wired in-memory environment for lifecycle tests.
pub struct TestEnv<O: NotificationOutbox> {
    /// Service under test.
    pub service: TaskLifecycleService<
        InMemoryTaskRepository,
        InMemoryUserDirectory,
        InMemoryClientRepository,
        O,
        ManualClock,
    >,
    /// Shared deterministic clock.
    pub clock: Arc<ManualClock>,
    /// Seeded supervisor.
    pub manager: Actor,
    /// Seeded assignee.
    pub employee: Actor,
    /// Seeded client.
    pub client: ClientId,
}

/// Builds an environment seeded with a manager, an employee, and a client.
pub async fn seeded_env<O: NotificationOutbox>(outbox: O) -> TestEnv<O> {
    let tasks = Arc::new(InMemoryTaskRepository::new());
    let directory = Arc::new(InMemoryUserDirectory::new());
    let clients = Arc::new(InMemoryClientRepository::new());
    let clock = Arc::new(ManualClock::fixed());

    let manager_id = UserId::new();
    let employee_id = UserId::new();
    directory
        .insert(User::new(
            manager_id,
            "Asha",
            EmailAddress::new("asha@example.com").expect("valid email"),
            Role::Manager,
        ))
        .expect("seeding should succeed");
    directory
        .insert(User::new(
            employee_id,
            "Ravi",
            EmailAddress::new("ravi@example.com").expect("valid email"),
            Role::Employee,
        ))
        .expect("seeding should succeed");

    let client = Client::new(
        ClientName::new("Hollis & Sons").expect("valid name"),
        &*clock,
    );
    let client_id = client.id();
    clients
        .create(&client)
        .await
        .expect("client seeding should succeed");

    let service = TaskLifecycleService::new(
        tasks,
        directory,
        clients,
        Arc::new(outbox),
        clock.clone(),
    );
    TestEnv {
        service,
        clock,
        manager: Actor::new(manager_id, Role::Manager),
        employee: Actor::new(employee_id, Role::Employee),
        client: client_id,
    }
}
