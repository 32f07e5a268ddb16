//! Domain model for the user directory.
//!
//! Users are referenced by task records (assignee, assigner, approver) and
//! drive authorization decisions through their role.

mod actor;
mod error;
mod user;

pub use actor::Actor;
pub use error::{DirectoryDomainError, ParseRoleError};
pub use user::{EmailAddress, Role, User, UserId};
