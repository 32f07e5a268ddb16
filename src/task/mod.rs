//! Task lifecycle management for Foreman.
//!
//! This module owns the work-state machine: starting, pausing, resuming,
//! completing, reopening, and the approval gate, together with the
//! elapsed-time accounting that keeps `total_worked_seconds` honest across
//! pause/resume cycles. Creation, assignment, and authorization policy live
//! here as well. The module follows hexagonal architecture:
//!
//! - Domain types in [`domain`]
//! - Port contracts in [`ports`]
//! - Adapter implementations in [`adapters`]
//! - Orchestration services in [`services`]

pub mod adapters;
pub mod domain;
pub mod ports;
pub mod services;

#[cfg(test)]
mod tests;
