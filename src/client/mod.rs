//! Client registry for Foreman.
//!
//! Clients are the parties tasks are performed for. The registry is thin
//! CRUD over a repository port: validated names, supervisor-gated create and
//! delete, unrestricted listing. The module follows hexagonal architecture:
//!
//! - Domain types in [`domain`]
//! - Port contracts in [`ports`]
//! - Adapter implementations in [`adapters`]
//! - Orchestration services in [`services`]

pub mod adapters;
pub mod domain;
pub mod ports;
pub mod services;
