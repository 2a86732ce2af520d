//! SQLite database handle
//!
//! The database lives in `.todo/todo.db` and is the source of truth for all
//! records. It is opened once per command and lent to every repository.

use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;

use anyhow::{Context, Result};
use rusqlite::{Connection, OptionalExtension};
use tracing::debug;

use super::repository::{StorageError, StorageResult};

const BUSY_TIMEOUT: Duration = Duration::from_secs(5);

const SCHEMA: &str = "
    CREATE TABLE IF NOT EXISTS projects (
        id TEXT PRIMARY KEY,
        name TEXT NOT NULL,
        description TEXT,
        created_at TEXT NOT NULL,
        updated_at TEXT NOT NULL
    );

    CREATE TABLE IF NOT EXISTS todos (
        id TEXT PRIMARY KEY,
        title TEXT NOT NULL,
        description TEXT,
        status TEXT NOT NULL,
        work_state TEXT NOT NULL,
        total_work_time INTEGER NOT NULL DEFAULT 0,
        last_state_change_at TEXT,
        priority TEXT NOT NULL,
        project_id TEXT REFERENCES projects(id) ON DELETE SET NULL,
        due_date TEXT,
        created_at TEXT NOT NULL,
        updated_at TEXT NOT NULL,
        completed_at TEXT
    );

    CREATE TABLE IF NOT EXISTS todo_dependencies (
        todo_id TEXT NOT NULL REFERENCES todos(id) ON DELETE CASCADE,
        dependency_id TEXT NOT NULL REFERENCES todos(id) ON DELETE CASCADE,
        PRIMARY KEY (todo_id, dependency_id),
        CHECK (todo_id <> dependency_id)
    );

    CREATE TABLE IF NOT EXISTS tags (
        id TEXT PRIMARY KEY,
        name TEXT NOT NULL UNIQUE,
        color TEXT,
        created_at TEXT NOT NULL
    );

    CREATE TABLE IF NOT EXISTS todo_tags (
        todo_id TEXT NOT NULL REFERENCES todos(id) ON DELETE CASCADE,
        tag_id TEXT NOT NULL REFERENCES tags(id) ON DELETE CASCADE,
        PRIMARY KEY (todo_id, tag_id)
    );

    CREATE TABLE IF NOT EXISTS subtasks (
        id TEXT PRIMARY KEY,
        todo_id TEXT NOT NULL REFERENCES todos(id) ON DELETE CASCADE,
        title TEXT NOT NULL,
        completed INTEGER NOT NULL DEFAULT 0,
        position INTEGER NOT NULL,
        created_at TEXT NOT NULL,
        updated_at TEXT NOT NULL
    );

    CREATE TABLE IF NOT EXISTS todo_activities (
        id TEXT PRIMARY KEY,
        todo_id TEXT NOT NULL REFERENCES todos(id) ON DELETE CASCADE,
        kind TEXT NOT NULL,
        detail TEXT,
        created_at TEXT NOT NULL
    );

    CREATE INDEX IF NOT EXISTS idx_todos_status ON todos(status);
    CREATE INDEX IF NOT EXISTS idx_todos_project ON todos(project_id);
    CREATE INDEX IF NOT EXISTS idx_deps_dependency ON todo_dependencies(dependency_id);
    CREATE INDEX IF NOT EXISTS idx_todo_tags_tag ON todo_tags(tag_id);
    CREATE INDEX IF NOT EXISTS idx_subtasks_todo ON subtasks(todo_id, position);
    CREATE INDEX IF NOT EXISTS idx_activities_todo ON todo_activities(todo_id);
";

/// Open SQLite connection with the todo schema applied
pub struct Database {
    conn: Connection,

    /// `None` for in-memory databases
    path: Option<PathBuf>,
}

impl Database {
    /// Schema version, stored in `PRAGMA user_version`
    pub const SCHEMA_VERSION: i32 = 1;

    /// Opens (or creates) the database file at `path`
    pub fn open(path: &Path) -> Result<Self> {
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).with_context(|| {
                format!("Failed to create database directory: {}", parent.display())
            })?;
        }

        let conn = Connection::open(path)
            .with_context(|| format!("Failed to open database: {}", path.display()))?;

        // WAL mode for concurrent access from several processes
        conn.execute_batch("PRAGMA journal_mode=WAL; PRAGMA synchronous=NORMAL;")?;

        let db = Self::configure(conn, Some(path.to_path_buf()))
            .with_context(|| format!("Failed to initialize database: {}", path.display()))?;
        debug!(path = %path.display(), "opened database");
        Ok(db)
    }

    /// Opens a private in-memory database
    pub fn open_in_memory() -> StorageResult<Self> {
        Self::configure(Connection::open_in_memory()?, None)
    }

    fn configure(conn: Connection, path: Option<PathBuf>) -> StorageResult<Self> {
        conn.execute_batch("PRAGMA foreign_keys=ON;")?;
        conn.busy_timeout(BUSY_TIMEOUT)?;

        let db = Self { conn, path };
        db.ensure_schema()?;
        Ok(db)
    }

    fn ensure_schema(&self) -> StorageResult<()> {
        let current = self.schema_version()?;

        if current > Self::SCHEMA_VERSION {
            return Err(StorageError::UnsupportedSchema {
                found: current,
                supported: Self::SCHEMA_VERSION,
            });
        }

        if current < Self::SCHEMA_VERSION {
            debug!(from = current, to = Self::SCHEMA_VERSION, "migrating schema");
            let tx = self.conn.unchecked_transaction()?;
            tx.execute_batch(SCHEMA)?;
            tx.execute_batch(&format!("PRAGMA user_version = {}", Self::SCHEMA_VERSION))?;
            tx.commit()?;
        }

        Ok(())
    }

    /// Current `user_version`
    pub fn schema_version(&self) -> StorageResult<i32> {
        let version: Option<i32> = self
            .conn
            .query_row("PRAGMA user_version", [], |row| row.get(0))
            .optional()?;
        Ok(version.unwrap_or(0))
    }

    pub fn conn(&self) -> &Connection {
        &self.conn
    }

    /// Path of the database file, `None` when in memory
    pub fn path(&self) -> Option<&Path> {
        self.path.as_deref()
    }
}
