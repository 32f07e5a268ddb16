//! Port contracts for the client registry.

pub mod repository;

pub use repository::{ClientRepository, ClientRepositoryError, ClientRepositoryResult};
