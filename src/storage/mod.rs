//! # Storage Layer
//!
//! Persistence for todos and their satellite records.
//!
//! ## Layout
//!
//! | Data | Format | Location |
//! |------|--------|----------|
//! | Todos, edges, projects, tags, subtasks, activity | SQLite | `.todo/todo.db` |
//! | Workspace config | TOML | `.todo/config.toml` |
//! | Global config | TOML | platform config dir |
//!
//! ## Concurrency Safety
//!
//! - The database runs in WAL mode with a busy timeout
//! - Multi-row writes, and each change together with its activity row, run
//!   in one transaction (`TodoRepository::atomically`)
//! - Foreign keys cascade deletes from todos to edges, links, subtasks and
//!   activity rows
//!
//! ## Key Types
//!
//! - [`Workspace`] - Entry point for a `.todo/` directory
//! - [`Database`] - Connection shared by all SQLite repositories
//! - [`TodoRepository`] and friends - Repository contracts
//! - `memory::InMemoryStore` - Fake backing store, compiled for tests only

mod config;
mod database;
#[cfg(test)]
pub(crate) mod memory;
mod repository;
mod sqlite;
mod workspace;

pub use config::{Config, ConfigError, GlobalConfig, OutputFormat, WorkspaceConfig, WORKSPACE_DIR};
pub use database::Database;
#[cfg(test)]
pub(crate) use memory::InMemoryStore;
pub use repository::{
    ActivityRepository, ProjectRepository, StorageError, StorageResult, SubtaskRepository,
    TagRepository, TodoRepository,
};
pub use sqlite::{
    SqliteActivityRepository, SqliteProjectRepository, SqliteSubtaskRepository,
    SqliteTagRepository, SqliteTodoRepository,
};
pub use workspace::{Workspace, WorkspaceError};
