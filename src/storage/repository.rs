//! Repository contracts
//!
//! One trait per aggregate. Implementations exist for SQLite
//! ([`super::sqlite`]) and for an in-memory store used by tests.
//!
//! Repositories persist what they are given. Existence checks, transition
//! rules and cycle rejection belong to the service layer, which calls the
//! primitives here in the right order.

use chrono::{DateTime, Utc};
use thiserror::Error;

use crate::domain::{
    path_exists, Project, ProjectId, ProjectPatch, Subtask, SubtaskId, Tag, TagId, Todo,
    TodoActivity, TodoFilter, TodoId, TodoPatch,
};

#[derive(Debug, Error)]
pub enum StorageError {
    #[error("SQLite error: {0}")]
    Sqlite(#[from] rusqlite::Error),

    #[error("Invalid stored data: {0}")]
    InvalidData(String),

    #[error("Database schema version {found} is newer than supported version {supported}")]
    UnsupportedSchema { found: i32, supported: i32 },
}

pub type StorageResult<T> = Result<T, StorageError>;

/// Persistence for todos, their dependency edges and tag links
pub trait TodoRepository {
    /// Inserts a todo together with its tag links and dependency edges.
    fn create(&self, todo: &Todo) -> StorageResult<()>;

    /// Runs `f` as one unit: if it returns an error, no write made through
    /// this store while it ran is kept. Nested calls join the outer unit.
    fn atomically<T, E, F>(&self, f: F) -> Result<T, E>
    where
        F: FnOnce() -> Result<T, E>,
        E: From<StorageError>;

    /// Loads a todo with `dependencies`, `dependents` and `tags` populated.
    fn find_by_id(&self, id: &TodoId) -> StorageResult<Option<Todo>>;

    /// Lists todos matching `filter`, in creation order.
    fn find_all(&self, filter: &TodoFilter) -> StorageResult<Vec<Todo>>;

    /// Applies `patch` and returns the updated todo, or `None` if it does not exist.
    fn update(&self, id: &TodoId, patch: &TodoPatch, now: DateTime<Utc>)
        -> StorageResult<Option<Todo>>;

    /// Deletes a todo and everything hanging off it. Returns false if absent.
    fn delete(&self, id: &TodoId) -> StorageResult<bool>;

    /// Records that `todo_id` depends on `dependency_id`.
    fn add_dependency(&self, todo_id: &TodoId, dependency_id: &TodoId) -> StorageResult<()>;

    /// Removes an edge. Returns false if it was not there.
    fn remove_dependency(&self, todo_id: &TodoId, dependency_id: &TodoId) -> StorageResult<bool>;

    fn has_dependency(&self, todo_id: &TodoId, dependency_id: &TodoId) -> StorageResult<bool>;

    /// Ids `todo_id` depends on, in edge insertion order
    fn find_dependencies(&self, todo_id: &TodoId) -> StorageResult<Vec<TodoId>>;

    /// Ids depending on `todo_id`, in edge insertion order
    fn find_dependents(&self, todo_id: &TodoId) -> StorageResult<Vec<TodoId>>;

    /// True if `todo_id` depending on `dependency_id` would close a cycle,
    /// i.e. `todo_id` is reachable from `dependency_id` along dependency edges.
    fn would_create_cycle(&self, todo_id: &TodoId, dependency_id: &TodoId) -> StorageResult<bool> {
        path_exists(dependency_id, todo_id, |id| self.find_dependencies(id))
    }

    /// Links a tag. Returns false if the link already existed.
    fn add_tag(&self, todo_id: &TodoId, tag_id: &TagId) -> StorageResult<bool>;

    /// Unlinks a tag. Returns false if there was no link.
    fn remove_tag(&self, todo_id: &TodoId, tag_id: &TagId) -> StorageResult<bool>;
}

pub trait ProjectRepository {
    fn create(&self, project: &Project) -> StorageResult<()>;

    fn find_by_id(&self, id: &ProjectId) -> StorageResult<Option<Project>>;

    fn find_by_name(&self, name: &str) -> StorageResult<Option<Project>>;

    /// All projects ordered by name
    fn find_all(&self) -> StorageResult<Vec<Project>>;

    fn update(
        &self,
        id: &ProjectId,
        patch: &ProjectPatch,
        now: DateTime<Utc>,
    ) -> StorageResult<Option<Project>>;

    /// Deletes a project and detaches its todos. Returns false if absent.
    fn delete(&self, id: &ProjectId) -> StorageResult<bool>;
}

pub trait TagRepository {
    fn create(&self, tag: &Tag) -> StorageResult<()>;

    fn find_by_id(&self, id: &TagId) -> StorageResult<Option<Tag>>;

    /// Looks up by normalized name
    fn find_by_name(&self, name: &str) -> StorageResult<Option<Tag>>;

    /// All tags ordered by name
    fn find_all(&self) -> StorageResult<Vec<Tag>>;

    /// Deletes a tag and all its links. Returns false if absent.
    fn delete(&self, id: &TagId) -> StorageResult<bool>;
}

pub trait SubtaskRepository {
    fn create(&self, subtask: &Subtask) -> StorageResult<()>;

    fn find_by_id(&self, id: &SubtaskId) -> StorageResult<Option<Subtask>>;

    /// Subtasks of a todo ordered by position
    fn find_by_todo(&self, todo_id: &TodoId) -> StorageResult<Vec<Subtask>>;

    /// Overwrites title, completion and position. Returns false if absent.
    fn save(&self, subtask: &Subtask) -> StorageResult<bool>;

    fn delete(&self, id: &SubtaskId) -> StorageResult<bool>;
}

/// Append-only activity log
pub trait ActivityRepository {
    fn append(&self, activity: &TodoActivity) -> StorageResult<()>;

    /// Activities of a todo, newest first
    fn find_by_todo(&self, todo_id: &TodoId) -> StorageResult<Vec<TodoActivity>>;
}
