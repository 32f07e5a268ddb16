//! Authenticated caller identity.

use super::{Role, UserId};
use serde::{Deserialize, Serialize};

/// Identity and role of the caller performing an operation.
///
/// The surrounding HTTP layer authenticates the request and constructs an
/// actor from the verified token claims; services trust it as given.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Actor {
    id: UserId,
    role: Role,
}

impl Actor {
    /// Creates an actor from an authenticated identity.
    #[must_use]
    pub const fn new(id: UserId, role: Role) -> Self {
        Self { id, role }
    }

    /// Returns the caller's user identifier.
    #[must_use]
    pub const fn id(&self) -> UserId {
        self.id
    }

    /// Returns the caller's role.
    #[must_use]
    pub const fn role(&self) -> Role {
        self.role
    }
}
