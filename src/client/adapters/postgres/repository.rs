//! `PostgreSQL` repository implementation for client storage.

use super::{
    models::{ClientRow, NewClientRow},
    schema::clients,
};
use crate::client::{
    domain::{Client, ClientId, ClientName},
    ports::{ClientRepository, ClientRepositoryError, ClientRepositoryResult},
};
use async_trait::async_trait;
use diesel::pg::PgConnection;
use diesel::prelude::*;
use diesel::r2d2::{ConnectionManager, Pool};
use diesel::result::{DatabaseErrorKind, Error as DieselError};

/// `PostgreSQL` connection pool type used by client adapters.
pub type ClientPgPool = Pool<ConnectionManager<PgConnection>>;

/// `PostgreSQL`-backed client repository.
#[derive(Debug, Clone)]
pub struct PostgresClientRepository {
    pool: ClientPgPool,
}

impl PostgresClientRepository {
    /// Creates a new repository from a `PostgreSQL` connection pool.
    #[must_use]
    pub const fn new(pool: ClientPgPool) -> Self {
        Self { pool }
    }

    async fn run_blocking<F, T>(&self, f: F) -> ClientRepositoryResult<T>
    where
        F: FnOnce(&mut PgConnection) -> ClientRepositoryResult<T> + Send + 'static,
        T: Send + 'static,
    {
        let pool = self.pool.clone();
        tokio::task::spawn_blocking(move || {
            let mut connection = pool.get().map_err(ClientRepositoryError::persistence)?;
            f(&mut connection)
        })
        .await
        .map_err(ClientRepositoryError::persistence)?
    }
}

#[async_trait]
impl ClientRepository for PostgresClientRepository {
    async fn create(&self, client: &Client) -> ClientRepositoryResult<()> {
        let client_id = client.id();
        let new_row = NewClientRow {
            id: client_id.into_inner(),
            name: client.name().as_str().to_owned(),
            created_at: client.created_at(),
        };

        self.run_blocking(move |connection| {
            diesel::insert_into(clients::table)
                .values(&new_row)
                .execute(connection)
                .map_err(|err| match err {
                    DieselError::DatabaseError(DatabaseErrorKind::UniqueViolation, _) => {
                        ClientRepositoryError::DuplicateClient(client_id)
                    }
                    _ => ClientRepositoryError::persistence(err),
                })?;
            Ok(())
        })
        .await
    }

    async fn find_by_id(&self, id: ClientId) -> ClientRepositoryResult<Option<Client>> {
        self.run_blocking(move |connection| {
            let row = clients::table
                .filter(clients::id.eq(id.into_inner()))
                .select(ClientRow::as_select())
                .first::<ClientRow>(connection)
                .optional()
                .map_err(ClientRepositoryError::persistence)?;
            row.map(row_to_client).transpose()
        })
        .await
    }

    async fn list_all(&self) -> ClientRepositoryResult<Vec<Client>> {
        self.run_blocking(move |connection| {
            let rows = clients::table
                .select(ClientRow::as_select())
                .order(clients::name.asc())
                .load::<ClientRow>(connection)
                .map_err(ClientRepositoryError::persistence)?;
            rows.into_iter().map(row_to_client).collect()
        })
        .await
    }

    async fn delete(&self, id: ClientId) -> ClientRepositoryResult<bool> {
        self.run_blocking(move |connection| {
            let deleted = diesel::delete(clients::table.filter(clients::id.eq(id.into_inner())))
                .execute(connection)
                .map_err(ClientRepositoryError::persistence)?;
            Ok(deleted > 0)
        })
        .await
    }
}

fn row_to_client(row: ClientRow) -> ClientRepositoryResult<Client> {
    let name = ClientName::new(row.name).map_err(ClientRepositoryError::persistence)?;
    Ok(Client::from_persisted(
        ClientId::from_uuid(row.id),
        name,
        row.created_at,
    ))
}
