//! Task lifecycle orchestration service.
//!
//! Every operation is a single read-modify-write against one task record:
//! authorize, mutate through the domain, persist, return the updated task.
//! Business-rule violations are detected before any write; notification
//! side effects are emitted after the write and never fail the operation.

use crate::client::{domain::ClientId, ports::ClientRepository};
use crate::directory::{
    domain::{Actor, Role, User, UserId},
    ports::{UserDirectory, UserDirectoryError},
};
use crate::error::ErrorClass;
use crate::notify::{
    domain::{NotificationEvent, TaskAssigned},
    ports::NotificationOutbox,
};
use crate::task::{
    domain::{
        LifecycleAction, NewTaskData, Priority, Task, TaskDomainError, TaskId, TaskTitle,
        can_perform,
    },
    ports::{TaskRepository, TaskRepositoryError},
};
use chrono::{DateTime, Utc};
use mockable::Clock;
use std::sync::Arc;
use thiserror::Error;
use tracing::warn;

/// Request payload for creating a task.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CreateTaskRequest {
    title: String,
    description: Option<String>,
    client: ClientId,
    priority: Priority,
    assigned_to: UserId,
    deadline: Option<DateTime<Utc>>,
}

impl CreateTaskRequest {
    /// Creates a request with required fields.
    #[must_use]
    pub fn new(title: impl Into<String>, client: ClientId, assigned_to: UserId) -> Self {
        Self {
            title: title.into(),
            description: None,
            client,
            priority: Priority::default(),
            assigned_to,
            deadline: None,
        }
    }

    /// Sets the description.
    #[must_use]
    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    /// Sets the urgency level.
    #[must_use]
    pub const fn with_priority(mut self, priority: Priority) -> Self {
        self.priority = priority;
        self
    }

    /// Sets the deadline.
    #[must_use]
    pub const fn with_deadline(mut self, deadline: DateTime<Utc>) -> Self {
        self.deadline = Some(deadline);
        self
    }
}

/// Request payload for editing a task.
///
/// Absent fields are left untouched. Status is deliberately not editable
/// here; lifecycle operations are the only path through the state machine.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct UpdateTaskRequest {
    title: Option<String>,
    description: Option<String>,
    priority: Option<Priority>,
    deadline: Option<DateTime<Utc>>,
    note: Option<String>,
}

impl UpdateTaskRequest {
    /// Creates an empty edit.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Replaces the title.
    #[must_use]
    pub fn with_title(mut self, title: impl Into<String>) -> Self {
        self.title = Some(title.into());
        self
    }

    /// Replaces the description.
    #[must_use]
    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    /// Replaces the urgency level.
    #[must_use]
    pub const fn with_priority(mut self, priority: Priority) -> Self {
        self.priority = Some(priority);
        self
    }

    /// Replaces the deadline.
    #[must_use]
    pub const fn with_deadline(mut self, deadline: DateTime<Utc>) -> Self {
        self.deadline = Some(deadline);
        self
    }

    /// Appends a progress note.
    #[must_use]
    pub fn with_note(mut self, note: impl Into<String>) -> Self {
        self.note = Some(note.into());
        self
    }
}

/// Service-level errors for task lifecycle operations.
#[derive(Debug, Error)]
pub enum TaskServiceError {
    /// Domain validation or transition failed.
    #[error(transparent)]
    Domain(#[from] TaskDomainError),
    /// Task repository operation failed.
    #[error(transparent)]
    Repository(#[from] TaskRepositoryError),
    /// User directory lookup failed.
    #[error(transparent)]
    Directory(#[from] UserDirectoryError),
    /// Client repository lookup failed.
    #[error(transparent)]
    Clients(#[from] crate::client::ports::ClientRepositoryError),
    /// No task exists with the given identifier.
    #[error("task {0} not found")]
    TaskNotFound(TaskId),
    /// The assignee does not exist.
    #[error("assigned user {0} not found")]
    AssigneeNotFound(UserId),
    /// The referenced client does not exist.
    #[error("client {0} does not exist")]
    UnknownClient(ClientId),
    /// The assignee exists but is not an employee.
    #[error("user {user} has role {role}; tasks can only be assigned to employees")]
    NotAnEmployee {
        /// Rejected assignee.
        user: UserId,
        /// The assignee's actual role.
        role: Role,
    },
    /// The caller is not allowed to perform the operation.
    #[error("user {actor} may not {action} this task")]
    Forbidden {
        /// Caller identifier.
        actor: UserId,
        /// Attempted operation.
        action: LifecycleAction,
    },
}

impl TaskServiceError {
    /// Returns the coarse classification for HTTP mapping.
    #[must_use]
    pub const fn class(&self) -> ErrorClass {
        match self {
            Self::Domain(TaskDomainError::EmptyTitle) | Self::UnknownClient(_) => {
                ErrorClass::InvalidInput
            }
            Self::Domain(TaskDomainError::DeadlineInPast { .. }) => ErrorClass::InvalidDeadline,
            Self::Domain(TaskDomainError::InvalidTransition { .. }) => {
                ErrorClass::InvalidTransition
            }
            Self::Repository(TaskRepositoryError::NotFound(_))
            | Self::TaskNotFound(_)
            | Self::AssigneeNotFound(_) => ErrorClass::NotFound,
            Self::Repository(_) | Self::Directory(_) | Self::Clients(_) => ErrorClass::Unexpected,
            Self::NotAnEmployee { .. } => ErrorClass::InvalidAssignee,
            Self::Forbidden { .. } => ErrorClass::Forbidden,
        }
    }
}

/// Result type for task lifecycle service operations.
pub type TaskServiceResult<T> = Result<T, TaskServiceError>;

/// Task lifecycle orchestration service.
#[derive(Clone)]
pub struct TaskLifecycleService<R, D, L, O, C>
where
    R: TaskRepository,
    D: UserDirectory,
    L: ClientRepository,
    O: NotificationOutbox,
    C: Clock + Send + Sync,
{
    tasks: Arc<R>,
    directory: Arc<D>,
    clients: Arc<L>,
    outbox: Arc<O>,
    clock: Arc<C>,
}

impl<R, D, L, O, C> TaskLifecycleService<R, D, L, O, C>
where
    R: TaskRepository,
    D: UserDirectory,
    L: ClientRepository,
    O: NotificationOutbox,
    C: Clock + Send + Sync,
{
    /// Creates a new task lifecycle service.
    #[must_use]
    pub const fn new(
        tasks: Arc<R>,
        directory: Arc<D>,
        clients: Arc<L>,
        outbox: Arc<O>,
        clock: Arc<C>,
    ) -> Self {
        Self {
            tasks,
            directory,
            clients,
            outbox,
            clock,
        }
    }

    async fn find_task_or_error(&self, id: TaskId) -> TaskServiceResult<Task> {
        self.tasks
            .find_by_id(id)
            .await?
            .ok_or(TaskServiceError::TaskNotFound(id))
    }

    fn authorize(
        actor: &Actor,
        action: LifecycleAction,
        task: Option<&Task>,
    ) -> TaskServiceResult<()> {
        if can_perform(actor, action, task) {
            Ok(())
        } else {
            Err(TaskServiceError::Forbidden {
                actor: actor.id(),
                action,
            })
        }
    }

    async fn resolve_assignee(&self, assignee_id: UserId) -> TaskServiceResult<User> {
        let assignee = self
            .directory
            .find_by_id(assignee_id)
            .await?
            .ok_or(TaskServiceError::AssigneeNotFound(assignee_id))?;
        if assignee.role() != Role::Employee {
            return Err(TaskServiceError::NotAnEmployee {
                user: assignee_id,
                role: assignee.role(),
            });
        }
        Ok(assignee)
    }

    /// Creates and assigns a new task.
    ///
    /// The assignee is notified by email, and a deadline (when present) is
    /// mirrored to the calendar; both through the outbox, both best effort.
    ///
    /// # Errors
    ///
    /// Returns [`TaskServiceError::Forbidden`] for non-supervisor callers,
    /// [`TaskServiceError::AssigneeNotFound`] or
    /// [`TaskServiceError::NotAnEmployee`] for bad assignees,
    /// [`TaskServiceError::UnknownClient`] for a missing client, and domain
    /// errors for an empty title or past deadline.
    pub async fn create(
        &self,
        actor: &Actor,
        request: CreateTaskRequest,
    ) -> TaskServiceResult<Task> {
        Self::authorize(actor, LifecycleAction::Create, None)?;

        let title = TaskTitle::new(request.title)?;
        let assignee = self.resolve_assignee(request.assigned_to).await?;
        if self.clients.find_by_id(request.client).await?.is_none() {
            return Err(TaskServiceError::UnknownClient(request.client));
        }

        let task = Task::create(
            NewTaskData {
                title,
                description: request.description,
                client: request.client,
                priority: request.priority,
                assigned_to: request.assigned_to,
                assigned_by: actor.id(),
                deadline: request.deadline,
            },
            &*self.clock,
        )?;
        self.tasks.create(&task).await?;

        self.emit_assignment(actor, &task, &assignee).await;
        Ok(task)
    }

    /// Looks up the assigner's display name for the notification snapshot.
    ///
    /// A missing or unreadable record degrades the greeting, not the
    /// operation.
    async fn assigner_name(&self, actor: &Actor) -> String {
        self.directory
            .find_by_id(actor.id())
            .await
            .ok()
            .flatten()
            .map_or_else(|| "your manager".to_owned(), |user| user.name().to_owned())
    }

    async fn emit_assignment(&self, actor: &Actor, task: &Task, assignee: &User) {
        let assigned_by_name = self.assigner_name(actor).await;
        let event = NotificationEvent::TaskAssigned(TaskAssigned {
            task_id: task.id(),
            title: task.title().as_str().to_owned(),
            description: task.description().map(str::to_owned),
            priority: task.priority(),
            deadline: task.deadline(),
            assignee_name: assignee.name().to_owned(),
            assignee_email: assignee.email().clone(),
            assigned_by_name,
        });
        if let Err(error) = self.outbox.enqueue(event) {
            warn!(%error, task_id = %task.id(), "failed to queue assignment notification");
        }
    }

    /// Retrieves a single task.
    ///
    /// # Errors
    ///
    /// Returns [`TaskServiceError::TaskNotFound`] when no task exists and
    /// [`TaskServiceError::Forbidden`] when an employee reads a task
    /// assigned to someone else.
    pub async fn get(&self, actor: &Actor, id: TaskId) -> TaskServiceResult<Task> {
        let task = self.find_task_or_error(id).await?;
        Self::authorize(actor, LifecycleAction::View, Some(&task))?;
        Ok(task)
    }

    /// Lists tasks visible to the caller, newest first.
    ///
    /// Employees see only tasks assigned to them; supervisors see all.
    ///
    /// # Errors
    ///
    /// Returns repository errors on persistence failure.
    pub async fn list_for(&self, actor: &Actor) -> TaskServiceResult<Vec<Task>> {
        let tasks = match actor.role() {
            Role::Employee => self.tasks.list_by_assignee(actor.id()).await?,
            Role::Admin | Role::Manager => self.tasks.list_all().await?,
        };
        Ok(tasks)
    }

    /// Applies edits to a task.
    ///
    /// # Errors
    ///
    /// Returns [`TaskServiceError::Forbidden`] when an employee edits a task
    /// assigned to someone else, domain errors for invalid values, and
    /// [`TaskServiceError::TaskNotFound`] when no task exists.
    pub async fn update(
        &self,
        actor: &Actor,
        id: TaskId,
        request: UpdateTaskRequest,
    ) -> TaskServiceResult<Task> {
        let mut task = self.find_task_or_error(id).await?;
        Self::authorize(actor, LifecycleAction::Update, Some(&task))?;

        if let Some(raw_title) = request.title {
            let title = TaskTitle::new(raw_title)?;
            task.rename(title, &*self.clock);
        }
        if let Some(description) = request.description {
            task.set_description(Some(description), &*self.clock);
        }
        if let Some(priority) = request.priority {
            task.set_priority(priority, &*self.clock);
        }
        if let Some(deadline) = request.deadline {
            task.set_deadline(deadline, &*self.clock)?;
        }
        if let Some(note) = request.note {
            task.add_note(note, &*self.clock);
        }

        self.tasks.save(&task).await?;
        Ok(task)
    }

    /// Appends a progress note to a task.
    ///
    /// # Errors
    ///
    /// Returns [`TaskServiceError::Forbidden`] when an employee notes a task
    /// assigned to someone else and [`TaskServiceError::TaskNotFound`] when
    /// no task exists.
    pub async fn add_note(
        &self,
        actor: &Actor,
        id: TaskId,
        message: &str,
    ) -> TaskServiceResult<Task> {
        let mut task = self.find_task_or_error(id).await?;
        Self::authorize(actor, LifecycleAction::AddNote, Some(&task))?;
        task.add_note(message, &*self.clock);
        self.tasks.save(&task).await?;
        Ok(task)
    }

    /// Deletes a task.
    ///
    /// # Errors
    ///
    /// Returns [`TaskServiceError::Forbidden`] for non-supervisor callers
    /// and [`TaskServiceError::TaskNotFound`] when no record exists.
    pub async fn delete(&self, actor: &Actor, id: TaskId) -> TaskServiceResult<()> {
        Self::authorize(actor, LifecycleAction::Delete, None)?;
        if self.tasks.delete(id).await? {
            Ok(())
        } else {
            Err(TaskServiceError::TaskNotFound(id))
        }
    }

    async fn transition<F>(
        &self,
        actor: &Actor,
        id: TaskId,
        action: LifecycleAction,
        mutate: F,
    ) -> TaskServiceResult<Task>
    where
        F: FnOnce(&mut Task) -> Result<(), TaskDomainError>,
    {
        let mut task = self.find_task_or_error(id).await?;
        Self::authorize(actor, action, Some(&task))?;
        mutate(&mut task)?;
        self.tasks.save(&task).await?;
        Ok(task)
    }

    /// Starts work on a pending task.
    ///
    /// # Errors
    ///
    /// Returns [`TaskServiceError::TaskNotFound`] when no task exists and
    /// domain errors when the task was already started.
    pub async fn start(&self, actor: &Actor, id: TaskId) -> TaskServiceResult<Task> {
        self.transition(actor, id, LifecycleAction::Start, |task| {
            task.start(&*self.clock)
        })
        .await
    }

    /// Pauses ongoing work or resumes paused work.
    ///
    /// # Errors
    ///
    /// Returns [`TaskServiceError::TaskNotFound`] when no task exists and
    /// domain errors when the task is neither ongoing nor paused.
    pub async fn toggle_pause(&self, actor: &Actor, id: TaskId) -> TaskServiceResult<Task> {
        self.transition(actor, id, LifecycleAction::TogglePause, |task| {
            task.toggle_pause(&*self.clock)
        })
        .await
    }

    /// Completes a task directly, bypassing the approval gate.
    ///
    /// # Errors
    ///
    /// Returns [`TaskServiceError::TaskNotFound`] when no task exists and
    /// domain errors when the task is completed or waiting for approval.
    pub async fn complete(&self, actor: &Actor, id: TaskId) -> TaskServiceResult<Task> {
        self.transition(actor, id, LifecycleAction::Complete, |task| {
            task.complete(&*self.clock)
        })
        .await
    }

    /// Reopens a completed task.
    ///
    /// # Errors
    ///
    /// Returns [`TaskServiceError::TaskNotFound`] when no task exists and
    /// domain errors when the task is not completed.
    pub async fn reopen(&self, actor: &Actor, id: TaskId) -> TaskServiceResult<Task> {
        self.transition(actor, id, LifecycleAction::Reopen, |task| {
            task.reopen(&*self.clock)
        })
        .await
    }

    /// Sends a task to the approval gate.
    ///
    /// # Errors
    ///
    /// Returns [`TaskServiceError::Forbidden`] when an employee requests
    /// completion of a task assigned to someone else,
    /// [`TaskServiceError::TaskNotFound`] when no task exists, and domain
    /// errors when the task is already completed.
    pub async fn request_completion(&self, actor: &Actor, id: TaskId) -> TaskServiceResult<Task> {
        self.transition(actor, id, LifecycleAction::RequestCompletion, |task| {
            task.request_completion(&*self.clock)
        })
        .await
    }

    /// Approves a requested completion.
    ///
    /// # Errors
    ///
    /// Returns [`TaskServiceError::Forbidden`] for non-supervisor callers,
    /// [`TaskServiceError::TaskNotFound`] when no task exists, and domain
    /// errors when the task is not waiting for approval.
    pub async fn approve_completion(&self, actor: &Actor, id: TaskId) -> TaskServiceResult<Task> {
        let approver = actor.id();
        self.transition(actor, id, LifecycleAction::ApproveCompletion, |task| {
            task.approve_completion(approver, &*self.clock)
        })
        .await
    }
}
