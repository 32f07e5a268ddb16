//! In-memory client repository for tests and embedding.

use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::{Arc, RwLock};

use crate::client::{
    domain::{Client, ClientId},
    ports::{ClientRepository, ClientRepositoryError, ClientRepositoryResult},
};

/// Thread-safe in-memory client repository.
#[derive(Debug, Clone, Default)]
pub struct InMemoryClientRepository {
    clients: Arc<RwLock<HashMap<ClientId, Client>>>,
}

impl InMemoryClientRepository {
    /// Creates an empty repository.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }
}

fn lock_error(err: impl std::fmt::Display) -> ClientRepositoryError {
    ClientRepositoryError::persistence(std::io::Error::other(err.to_string()))
}

#[async_trait]
impl ClientRepository for InMemoryClientRepository {
    async fn create(&self, client: &Client) -> ClientRepositoryResult<()> {
        let mut clients = self.clients.write().map_err(lock_error)?;
        if clients.contains_key(&client.id()) {
            return Err(ClientRepositoryError::DuplicateClient(client.id()));
        }
        clients.insert(client.id(), client.clone());
        Ok(())
    }

    async fn find_by_id(&self, id: ClientId) -> ClientRepositoryResult<Option<Client>> {
        let clients = self.clients.read().map_err(lock_error)?;
        Ok(clients.get(&id).cloned())
    }

    async fn list_all(&self) -> ClientRepositoryResult<Vec<Client>> {
        let clients = self.clients.read().map_err(lock_error)?;
        let mut all: Vec<Client> = clients.values().cloned().collect();
        all.sort_by(|left, right| left.name().as_str().cmp(right.name().as_str()));
        Ok(all)
    }

    async fn delete(&self, id: ClientId) -> ClientRepositoryResult<bool> {
        let mut clients = self.clients.write().map_err(lock_error)?;
        Ok(clients.remove(&id).is_some())
    }
}
