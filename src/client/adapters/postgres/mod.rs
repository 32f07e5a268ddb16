//! `PostgreSQL` adapter for client persistence.

mod models;
mod repository;
mod schema;

pub use repository::{ClientPgPool, PostgresClientRepository};
