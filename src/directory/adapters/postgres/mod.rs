//! `PostgreSQL` adapter for user directory lookup.

mod models;
mod repository;
mod schema;

pub use repository::{DirectoryPgPool, PostgresUserDirectory};
