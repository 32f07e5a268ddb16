//! Error types for client domain validation.

use thiserror::Error;

/// Errors returned while constructing client domain values.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum ClientDomainError {
    /// The client name is empty after trimming.
    #[error("client name must not be empty")]
    EmptyName,
}
