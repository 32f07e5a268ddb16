//! `PostgreSQL` persistence adapter for tasks.

mod models;
mod repository;
mod schema;

pub use repository::{PostgresTaskRepository, TaskPgPool};
