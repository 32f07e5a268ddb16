//! Foreman: task assignment and tracking for field-service teams.
//!
//! This crate provides the core functionality for assigning work to
//! employees, tracking it through a supervised lifecycle with worked-time
//! accounting, and notifying assignees by email and calendar.
//!
//! # Architecture
//!
//! Foreman follows hexagonal architecture principles:
//!
//! - **Domain**: Pure business logic with no infrastructure dependencies
//! - **Ports**: Abstract trait interfaces for external interactions
//! - **Adapters**: Concrete implementations of ports (database, delivery)
//!
//! # Modules
//!
//! - [`task`]: Work-state machine, elapsed-time accounting, and policy
//! - [`client`]: Client registry tasks are performed for
//! - [`directory`]: User records and caller identity
//! - [`notify`]: Outbound email and calendar delivery
//! - [`error`]: Error classification shared by services

pub mod client;
pub mod directory;
pub mod error;
pub mod notify;
pub mod task;
