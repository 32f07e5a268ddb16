//! Client registry orchestration service.

use crate::client::{
    domain::{Client, ClientDomainError, ClientId, ClientName},
    ports::{ClientRepository, ClientRepositoryError},
};
use crate::directory::domain::{Actor, UserId};
use crate::error::ErrorClass;
use mockable::Clock;
use std::fmt;
use std::sync::Arc;
use thiserror::Error;

/// Operations on the client registry subject to authorization.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ClientAction {
    /// Register a new client.
    Create,
    /// Remove a client.
    Delete,
}

impl ClientAction {
    /// Returns a stable label for error messages.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Create => "create client",
            Self::Delete => "delete client",
        }
    }
}

impl fmt::Display for ClientAction {
    fn fmt(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        formatter.write_str(self.as_str())
    }
}

/// Service-level errors for client registry operations.
#[derive(Debug, Error)]
pub enum ClientServiceError {
    /// Domain validation failed.
    #[error(transparent)]
    Domain(#[from] ClientDomainError),
    /// Repository operation failed.
    #[error(transparent)]
    Repository(#[from] ClientRepositoryError),
    /// No client exists with the given identifier.
    #[error("client {0} not found")]
    NotFound(ClientId),
    /// The caller is not allowed to perform the operation.
    #[error("user {actor} may not {action}")]
    Forbidden {
        /// Caller identifier.
        actor: UserId,
        /// Attempted operation.
        action: ClientAction,
    },
}

impl ClientServiceError {
    /// Returns the coarse classification for HTTP mapping.
    #[must_use]
    pub const fn class(&self) -> ErrorClass {
        match self {
            Self::Domain(ClientDomainError::EmptyName) => ErrorClass::InvalidInput,
            Self::Repository(_) => ErrorClass::Unexpected,
            Self::NotFound(_) => ErrorClass::NotFound,
            Self::Forbidden { .. } => ErrorClass::Forbidden,
        }
    }
}

/// Result type for client registry service operations.
pub type ClientServiceResult<T> = Result<T, ClientServiceError>;

/// Client registry orchestration service.
#[derive(Clone)]
pub struct ClientService<R, C>
where
    R: ClientRepository,
    C: Clock + Send + Sync,
{
    repository: Arc<R>,
    clock: Arc<C>,
}

impl<R, C> ClientService<R, C>
where
    R: ClientRepository,
    C: Clock + Send + Sync,
{
    /// Creates a new client registry service.
    #[must_use]
    pub const fn new(repository: Arc<R>, clock: Arc<C>) -> Self {
        Self { repository, clock }
    }

    fn ensure_supervisor(actor: &Actor, action: ClientAction) -> ClientServiceResult<()> {
        if actor.role().is_supervisor() {
            Ok(())
        } else {
            Err(ClientServiceError::Forbidden {
                actor: actor.id(),
                action,
            })
        }
    }

    /// Registers a new client.
    ///
    /// # Errors
    ///
    /// Returns [`ClientServiceError::Forbidden`] for non-supervisor callers,
    /// domain errors for invalid names, and repository errors on persistence
    /// failure.
    pub async fn create(&self, actor: &Actor, name: &str) -> ClientServiceResult<Client> {
        Self::ensure_supervisor(actor, ClientAction::Create)?;
        let client_name = ClientName::new(name)?;
        let client = Client::new(client_name, &*self.clock);
        self.repository.create(&client).await?;
        Ok(client)
    }

    /// Lists all clients.
    ///
    /// # Errors
    ///
    /// Returns repository errors on persistence failure.
    pub async fn list(&self) -> ClientServiceResult<Vec<Client>> {
        Ok(self.repository.list_all().await?)
    }

    /// Deletes a client.
    ///
    /// # Errors
    ///
    /// Returns [`ClientServiceError::Forbidden`] for non-supervisor callers
    /// and [`ClientServiceError::NotFound`] when no record exists.
    pub async fn delete(&self, actor: &Actor, id: ClientId) -> ClientServiceResult<()> {
        Self::ensure_supervisor(actor, ClientAction::Delete)?;
        if self.repository.delete(id).await? {
            Ok(())
        } else {
            Err(ClientServiceError::NotFound(id))
        }
    }
}
