//! Domain model for the client registry.

mod client;
mod error;

pub use client::{Client, ClientId, ClientName};
pub use error::ClientDomainError;
