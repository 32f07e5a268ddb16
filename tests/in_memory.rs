//! In-memory integration tests.
//!
//! Tests are organized into modules by functionality:
//! - `task_workflow_tests`: Full lifecycle flows through the service layer
//! - `client_registry_tests`: Client registration and removal
//! - `notification_tests`: Outbox-to-delivery round trips

#![expect(
    clippy::expect_used,
    reason = "Test code uses expect for assertion clarity"
)]

mod in_memory {
    pub mod helpers;

    mod client_registry_tests;
    mod notification_tests;
    mod task_workflow_tests;
}
