//! Port contracts for the user directory.
//!
//! Ports define infrastructure-agnostic interfaces used by services that
//! resolve user references.

pub mod directory;

pub use directory::{UserDirectory, UserDirectoryError, UserDirectoryResult};
