//! Use-case errors
//!
//! Every service operation fails with a [`ServiceError`]. The CLI maps the
//! variants onto exit codes and HTTP-style status numbers for JSON output.

use thiserror::Error;

use crate::domain::{GraphError, TodoError, TodoId, TodoStatus, Transition, WorkState};
use crate::storage::StorageError;

fn join_ids(ids: &[TodoId]) -> String {
    ids.iter()
        .map(TodoId::as_str)
        .collect::<Vec<_>>()
        .join(", ")
}

#[derive(Debug, Error)]
pub enum ServiceError {
    #[error("{entity} not found: {id}")]
    NotFound { entity: &'static str, id: String },

    #[error("Todo {0} cannot depend on itself")]
    SelfDependency(TodoId),

    #[error("{todo_id} already depends on {dependency_id}")]
    DependencyExists { todo_id: TodoId, dependency_id: TodoId },

    #[error("{todo_id} does not depend on {dependency_id}")]
    DependencyNotFound { todo_id: TodoId, dependency_id: TodoId },

    #[error("Adding {dependency_id} as a dependency of {todo_id} would create a cycle")]
    DependencyCycle { todo_id: TodoId, dependency_id: TodoId },

    #[error("Cannot {transition} todo {id}: status is {status}, work state is {work_state}")]
    InvalidStateTransition {
        id: TodoId,
        transition: Transition,
        status: TodoStatus,
        work_state: WorkState,
    },

    #[error("Todo {0} is already completed")]
    AlreadyCompleted(TodoId),

    #[error("Todo {0} is not completed")]
    NotCompleted(TodoId),

    #[error("Todo {id} has incomplete dependencies: {}", join_ids(.pending))]
    IncompleteDependencies { id: TodoId, pending: Vec<TodoId> },

    #[error("{entity} '{name}' already exists")]
    AlreadyExists { entity: &'static str, name: String },

    #[error("{0}")]
    Validation(String),

    #[error(transparent)]
    Storage(#[from] StorageError),
}

impl ServiceError {
    pub fn todo_not_found(id: &TodoId) -> Self {
        Self::NotFound {
            entity: "Todo",
            id: id.to_string(),
        }
    }

    /// Stable machine-readable name of the variant
    pub fn kind(&self) -> &'static str {
        match self {
            Self::NotFound { .. } => "not_found",
            Self::SelfDependency(_) => "self_dependency",
            Self::DependencyExists { .. } => "dependency_exists",
            Self::DependencyNotFound { .. } => "dependency_not_found",
            Self::DependencyCycle { .. } => "dependency_cycle",
            Self::InvalidStateTransition { .. } => "invalid_state_transition",
            Self::AlreadyCompleted(_) => "already_completed",
            Self::NotCompleted(_) => "not_completed",
            Self::IncompleteDependencies { .. } => "incomplete_dependencies",
            Self::AlreadyExists { .. } => "already_exists",
            Self::Validation(_) => "validation",
            Self::Storage(_) => "storage",
        }
    }

    /// HTTP-style status for the error
    pub fn http_status(&self) -> u16 {
        match self {
            Self::NotFound { .. } | Self::DependencyNotFound { .. } => 404,
            Self::SelfDependency(_)
            | Self::InvalidStateTransition { .. }
            | Self::AlreadyCompleted(_)
            | Self::NotCompleted(_)
            | Self::Validation(_) => 400,
            Self::DependencyExists { .. }
            | Self::DependencyCycle { .. }
            | Self::IncompleteDependencies { .. }
            | Self::AlreadyExists { .. } => 409,
            Self::Storage(_) => 500,
        }
    }

    /// Process exit code for the error
    pub fn exit_code(&self) -> u8 {
        match self.http_status() {
            400 => 2,
            404 => 3,
            409 => 4,
            _ => 1,
        }
    }
}

impl From<TodoError> for ServiceError {
    fn from(err: TodoError) -> Self {
        match err {
            TodoError::InvalidStateTransition {
                id,
                transition,
                status,
                work_state,
            } => Self::InvalidStateTransition {
                id,
                transition,
                status,
                work_state,
            },
            TodoError::SelfDependency(id) => Self::SelfDependency(id),
            TodoError::EmptyTitle => Self::Validation(err.to_string()),
        }
    }
}

impl From<GraphError> for ServiceError {
    fn from(err: GraphError) -> Self {
        match err {
            GraphError::CycleDetected(todo_id, dependency_id) => Self::DependencyCycle {
                todo_id,
                dependency_id,
            },
            GraphError::TodoNotFound(id) => Self::todo_not_found(&id),
            GraphError::SelfDependency(id) => Self::SelfDependency(id),
            GraphError::CycleThrough(_) => {
                Self::Storage(StorageError::InvalidData(err.to_string()))
            }
        }
    }
}

pub type ServiceResult<T> = Result<T, ServiceError>;
