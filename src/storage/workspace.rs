//! Workspace management
//!
//! Handles workspace initialization and provides access to the database.

use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use thiserror::Error;
use tracing::info;

use super::config::{Config, WORKSPACE_DIR};
use super::database::Database;

const DATABASE_FILE: &str = "todo.db";

#[derive(Debug, Error)]
pub enum WorkspaceError {
    #[error("Not in a todo workspace. Run 'todo init' first.")]
    NotInWorkspace,
}

/// A directory holding a `.todo/` folder
pub struct Workspace {
    root: PathBuf,
    config: Config,
}

impl Workspace {
    /// Opens an existing workspace at the given path
    pub fn open(root: impl Into<PathBuf>) -> Result<Self> {
        let root = root.into();

        if !root.join(WORKSPACE_DIR).is_dir() {
            return Err(WorkspaceError::NotInWorkspace.into());
        }

        let config = Config::for_workspace(&root)?;

        Ok(Self { root, config })
    }

    /// Opens the workspace at the current directory or a parent
    pub fn open_current() -> Result<Self> {
        let root = Config::find_workspace_root().ok_or(WorkspaceError::NotInWorkspace)?;

        Self::open(root)
    }

    /// Initializes a workspace at the given path. Existing files are kept.
    pub fn init(root: impl Into<PathBuf>) -> Result<Self> {
        let root = root.into();
        let todo_dir = root.join(WORKSPACE_DIR);

        fs::create_dir_all(&todo_dir).with_context(|| {
            format!("Failed to create {} directory: {}", WORKSPACE_DIR, todo_dir.display())
        })?;

        let config_path = todo_dir.join("config.toml");
        if !config_path.exists() {
            let default_config = r#"# todo-cli workspace configuration

# Priority for 'todo add' without --priority (low, medium, high)
default_priority = "medium"

# Depth for 'todo dep tree' without --depth
tree_max_depth = 10

# Refuse to complete a todo while any of its dependencies is open
require_dependencies_complete = true
"#;
            fs::write(&config_path, default_config)
                .with_context(|| format!("Failed to write config: {}", config_path.display()))?;
        }

        let gitignore_path = todo_dir.join(".gitignore");
        if !gitignore_path.exists() {
            let gitignore = r#"# SQLite write-ahead log and shared memory files
todo.db-wal
todo.db-shm
"#;
            fs::write(&gitignore_path, gitignore).with_context(|| {
                format!("Failed to write .gitignore: {}", gitignore_path.display())
            })?;
        }

        let workspace = Self::open(root)?;
        // Creates the schema up front
        workspace.open_database()?;
        info!(root = %workspace.root.display(), "initialized workspace");

        Ok(workspace)
    }

    /// Returns the workspace root path
    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Returns the .todo directory path
    pub fn todo_dir(&self) -> PathBuf {
        self.root.join(WORKSPACE_DIR)
    }

    /// Returns the configuration
    pub fn config(&self) -> &Config {
        &self.config
    }

    pub fn database_path(&self) -> PathBuf {
        self.todo_dir().join(DATABASE_FILE)
    }

    /// Opens the workspace database
    pub fn open_database(&self) -> Result<Database> {
        Database::open(&self.database_path())
    }
}
