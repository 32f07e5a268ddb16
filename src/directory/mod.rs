//! User directory for Foreman.
//!
//! Exposes the read side of the user store consumed by task assignment and
//! authorization: validated user records with their roles and contact
//! addresses. Credential storage and token handling live outside this crate.
//! The module follows hexagonal architecture:
//!
//! - Domain types in [`domain`]
//! - Port contracts in [`ports`]
//! - Adapter implementations in [`adapters`]

pub mod adapters;
pub mod domain;
pub mod ports;
