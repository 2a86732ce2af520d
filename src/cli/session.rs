//! Opened workspace plus the services built over its database

use anyhow::Result;
use tracing::debug;

use crate::service::{
    DependencyService, ProjectService, SubtaskService, SystemClock, TagService, TodoService,
};
use crate::storage::{
    Database, SqliteActivityRepository, SqliteProjectRepository, SqliteSubtaskRepository,
    SqliteTagRepository, SqliteTodoRepository, Workspace, WorkspaceConfig,
};

pub type Todos<'db> = TodoService<
    SqliteTodoRepository<'db>,
    SqliteProjectRepository<'db>,
    SqliteTagRepository<'db>,
    SqliteActivityRepository<'db>,
>;
pub type Dependencies<'db> =
    DependencyService<SqliteTodoRepository<'db>, SqliteActivityRepository<'db>>;
pub type Projects<'db> = ProjectService<SqliteProjectRepository<'db>, SqliteTodoRepository<'db>>;
pub type Tags<'db> = TagService<SqliteTagRepository<'db>>;
pub type Subtasks<'db> = SubtaskService<SqliteSubtaskRepository<'db>, SqliteTodoRepository<'db>>;

pub struct Session {
    workspace: Workspace,
    db: Database,
}

impl Session {
    /// Opens the workspace containing the current directory
    pub fn open() -> Result<Self> {
        let workspace = Workspace::open_current()?;
        let db = workspace.open_database()?;
        debug!(root = %workspace.root().display(), "opened workspace");

        Ok(Self { workspace, db })
    }

    pub fn config(&self) -> &WorkspaceConfig {
        &self.workspace.config().workspace
    }

    pub fn todos(&self) -> Todos<'_> {
        TodoService::new(
            SqliteTodoRepository::new(&self.db),
            SqliteProjectRepository::new(&self.db),
            SqliteTagRepository::new(&self.db),
            SqliteActivityRepository::new(&self.db),
            SystemClock,
        )
        .with_dependency_gate(self.config().require_dependencies_complete)
    }

    pub fn dependencies(&self) -> Dependencies<'_> {
        DependencyService::new(
            SqliteTodoRepository::new(&self.db),
            SqliteActivityRepository::new(&self.db),
            SystemClock,
        )
    }

    pub fn projects(&self) -> Projects<'_> {
        ProjectService::new(
            SqliteProjectRepository::new(&self.db),
            SqliteTodoRepository::new(&self.db),
            SystemClock,
        )
    }

    pub fn tags(&self) -> Tags<'_> {
        TagService::new(SqliteTagRepository::new(&self.db), SystemClock)
    }

    pub fn subtasks(&self) -> Subtasks<'_> {
        SubtaskService::new(
            SqliteSubtaskRepository::new(&self.db),
            SqliteTodoRepository::new(&self.db),
            SystemClock,
        )
    }
}
