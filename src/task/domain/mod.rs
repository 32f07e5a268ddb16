//! Domain model for task lifecycle management.
//!
//! The task domain models assignment, the work-state machine, worked-time
//! accounting, and the authorization policy while keeping all infrastructure
//! concerns outside of the domain boundary.

mod error;
mod ids;
mod policy;
mod task;
mod work;

pub use error::{ParsePriorityError, ParseTaskStatusError, TaskDomainError};
pub use ids::{TaskId, TaskTitle};
pub use policy::{LifecycleAction, can_perform};
pub use task::{NewTaskData, PersistedTaskData, Priority, Task, TaskNote, validate_deadline};
pub use work::{TaskStatus, WorkState, elapsed_whole_seconds};
