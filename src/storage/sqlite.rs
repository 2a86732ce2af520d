//! SQLite repository implementations
//!
//! Every repository borrows the shared [`Database`] handle. Rows are read
//! into plain `*Row` structs first and then converted, so malformed stored
//! values surface as [`StorageError::InvalidData`] instead of panics.

use std::fmt::Display;
use std::str::FromStr;

use chrono::{DateTime, Utc};
use rusqlite::types::Value;
use rusqlite::{params, params_from_iter, Connection, OptionalExtension, Row};
use tracing::debug;

use super::database::Database;
use super::repository::{
    ActivityRepository, ProjectRepository, StorageError, StorageResult, SubtaskRepository,
    TagRepository, TodoRepository,
};
use crate::domain::{
    Project, ProjectId, ProjectPatch, Subtask, SubtaskId, Tag, TagId, Todo, TodoActivity,
    TodoFilter, TodoId, TodoPatch,
};

fn to_text(value: DateTime<Utc>) -> String {
    value.to_rfc3339()
}

fn parse_field<T>(column: &str, raw: &str) -> StorageResult<T>
where
    T: FromStr,
    T::Err: Display,
{
    raw.parse()
        .map_err(|e| StorageError::InvalidData(format!("invalid value `{raw}` in {column}: {e}")))
}

fn parse_opt_field<T>(column: &str, raw: Option<String>) -> StorageResult<Option<T>>
where
    T: FromStr,
    T::Err: Display,
{
    raw.map(|value| parse_field(column, &value)).transpose()
}

fn parse_time(column: &str, raw: &str) -> StorageResult<DateTime<Utc>> {
    DateTime::parse_from_rfc3339(raw)
        .map(|value| value.with_timezone(&Utc))
        .map_err(|e| StorageError::InvalidData(format!("invalid timestamp `{raw}` in {column}: {e}")))
}

fn parse_opt_time(column: &str, raw: Option<String>) -> StorageResult<Option<DateTime<Utc>>> {
    raw.map(|value| parse_time(column, &value)).transpose()
}

fn seconds_to_sql(seconds: u64) -> StorageResult<i64> {
    i64::try_from(seconds)
        .map_err(|_| StorageError::InvalidData(format!("work time {seconds} out of range")))
}

fn ids<T>(conn: &Connection, sql: &str, key: &str, column: &str) -> StorageResult<Vec<T>>
where
    T: FromStr,
    T::Err: Display,
{
    let mut stmt = conn.prepare(sql)?;
    let raw: Vec<String> = stmt
        .query_map(params![key], |row| row.get(0))?
        .collect::<Result<Vec<_>, _>>()?;
    raw.iter().map(|value| parse_field(column, value)).collect()
}

// --- todos -----------------------------------------------------------------

const TODO_COLUMNS: &str = "id, title, description, status, work_state, total_work_time, \
    last_state_change_at, priority, project_id, due_date, created_at, updated_at, completed_at";

struct TodoRow {
    id: String,
    title: String,
    description: Option<String>,
    status: String,
    work_state: String,
    total_work_time: i64,
    last_state_change_at: Option<String>,
    priority: String,
    project_id: Option<String>,
    due_date: Option<String>,
    created_at: String,
    updated_at: String,
    completed_at: Option<String>,
}

impl TodoRow {
    fn from_row(row: &Row<'_>) -> rusqlite::Result<Self> {
        Ok(Self {
            id: row.get("id")?,
            title: row.get("title")?,
            description: row.get("description")?,
            status: row.get("status")?,
            work_state: row.get("work_state")?,
            total_work_time: row.get("total_work_time")?,
            last_state_change_at: row.get("last_state_change_at")?,
            priority: row.get("priority")?,
            project_id: row.get("project_id")?,
            due_date: row.get("due_date")?,
            created_at: row.get("created_at")?,
            updated_at: row.get("updated_at")?,
            completed_at: row.get("completed_at")?,
        })
    }

    fn into_todo(self) -> StorageResult<Todo> {
        let total_work_time = u64::try_from(self.total_work_time).map_err(|_| {
            StorageError::InvalidData(format!(
                "negative work time {} in todos.total_work_time",
                self.total_work_time
            ))
        })?;

        Ok(Todo {
            id: parse_field("todos.id", &self.id)?,
            title: self.title,
            description: self.description,
            status: parse_field("todos.status", &self.status)?,
            work_state: parse_field("todos.work_state", &self.work_state)?,
            total_work_time,
            last_state_change_at: parse_opt_time(
                "todos.last_state_change_at",
                self.last_state_change_at,
            )?,
            priority: parse_field("todos.priority", &self.priority)?,
            project_id: parse_opt_field("todos.project_id", self.project_id)?,
            due_date: parse_opt_time("todos.due_date", self.due_date)?,
            tags: Vec::new(),
            dependencies: Vec::new(),
            dependents: Vec::new(),
            created_at: parse_time("todos.created_at", &self.created_at)?,
            updated_at: parse_time("todos.updated_at", &self.updated_at)?,
            completed_at: parse_opt_time("todos.completed_at", self.completed_at)?,
        })
    }
}

#[derive(Clone, Copy)]
pub struct SqliteTodoRepository<'db> {
    db: &'db Database,
}

impl<'db> SqliteTodoRepository<'db> {
    pub fn new(db: &'db Database) -> Self {
        Self { db }
    }

    fn conn(&self) -> &Connection {
        self.db.conn()
    }

    fn tags_of(&self, todo_id: &TodoId) -> StorageResult<Vec<TagId>> {
        ids(
            self.conn(),
            "SELECT tag_id FROM todo_tags WHERE todo_id = ?1 ORDER BY rowid",
            todo_id.as_str(),
            "todo_tags.tag_id",
        )
    }

    /// Fills in edges and tags for a row-only todo
    fn hydrate(&self, mut todo: Todo) -> StorageResult<Todo> {
        todo.dependencies = self.find_dependencies(&todo.id)?;
        todo.dependents = self.find_dependents(&todo.id)?;
        todo.tags = self.tags_of(&todo.id)?;
        Ok(todo)
    }

    fn write_row(&self, todo: &Todo) -> StorageResult<usize> {
        let changed = self.conn().execute(
            "UPDATE todos SET
                title = ?2,
                description = ?3,
                status = ?4,
                work_state = ?5,
                total_work_time = ?6,
                last_state_change_at = ?7,
                priority = ?8,
                project_id = ?9,
                due_date = ?10,
                updated_at = ?11,
                completed_at = ?12
             WHERE id = ?1",
            params![
                todo.id.as_str(),
                todo.title,
                todo.description,
                todo.status.as_str(),
                todo.work_state.as_str(),
                seconds_to_sql(todo.total_work_time)?,
                todo.last_state_change_at.map(to_text),
                todo.priority.as_str(),
                todo.project_id.as_ref().map(ProjectId::as_str),
                todo.due_date.map(to_text),
                to_text(todo.updated_at),
                todo.completed_at.map(to_text),
            ],
        )?;
        Ok(changed)
    }

    /// Row, edges and tag links of a new todo
    fn insert(&self, todo: &Todo) -> StorageResult<()> {
        let conn = self.conn();

        conn.execute(
            &format!(
                "INSERT INTO todos ({TODO_COLUMNS})
                 VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9, ?10, ?11, ?12, ?13)"
            ),
            params![
                todo.id.as_str(),
                todo.title,
                todo.description,
                todo.status.as_str(),
                todo.work_state.as_str(),
                seconds_to_sql(todo.total_work_time)?,
                todo.last_state_change_at.map(to_text),
                todo.priority.as_str(),
                todo.project_id.as_ref().map(ProjectId::as_str),
                todo.due_date.map(to_text),
                to_text(todo.created_at),
                to_text(todo.updated_at),
                todo.completed_at.map(to_text),
            ],
        )?;

        for dependency in &todo.dependencies {
            conn.execute(
                "INSERT OR IGNORE INTO todo_dependencies (todo_id, dependency_id) VALUES (?1, ?2)",
                params![todo.id.as_str(), dependency.as_str()],
            )?;
        }
        for dependent in &todo.dependents {
            conn.execute(
                "INSERT OR IGNORE INTO todo_dependencies (todo_id, dependency_id) VALUES (?1, ?2)",
                params![dependent.as_str(), todo.id.as_str()],
            )?;
        }
        for tag in &todo.tags {
            conn.execute(
                "INSERT OR IGNORE INTO todo_tags (todo_id, tag_id) VALUES (?1, ?2)",
                params![todo.id.as_str(), tag.as_str()],
            )?;
        }

        Ok(())
    }
}

impl TodoRepository for SqliteTodoRepository<'_> {
    fn create(&self, todo: &Todo) -> StorageResult<()> {
        self.atomically(|| self.insert(todo))?;
        debug!(todo_id = %todo.id, "inserted todo");
        Ok(())
    }

    fn atomically<T, E, F>(&self, f: F) -> Result<T, E>
    where
        F: FnOnce() -> Result<T, E>,
        E: From<StorageError>,
    {
        // already inside an outer transaction, which owns the commit
        if !self.conn().is_autocommit() {
            return f();
        }

        let tx = self
            .conn()
            .unchecked_transaction()
            .map_err(StorageError::from)?;
        let value = f()?;
        tx.commit().map_err(StorageError::from)?;
        Ok(value)
    }

    fn find_by_id(&self, id: &TodoId) -> StorageResult<Option<Todo>> {
        let row = self
            .conn()
            .query_row(
                &format!("SELECT {TODO_COLUMNS} FROM todos WHERE id = ?1"),
                params![id.as_str()],
                TodoRow::from_row,
            )
            .optional()?;

        match row {
            Some(row) => Ok(Some(self.hydrate(row.into_todo()?)?)),
            None => Ok(None),
        }
    }

    fn find_all(&self, filter: &TodoFilter) -> StorageResult<Vec<Todo>> {
        let mut sql = format!("SELECT {TODO_COLUMNS} FROM todos WHERE 1 = 1");
        let mut bind_values: Vec<Value> = Vec::new();

        if let Some(status) = filter.status {
            sql.push_str(" AND status = ?");
            bind_values.push(Value::Text(status.as_str().to_string()));
        }
        if let Some(priority) = filter.priority {
            sql.push_str(" AND priority = ?");
            bind_values.push(Value::Text(priority.as_str().to_string()));
        }
        if let Some(project_id) = &filter.project_id {
            sql.push_str(" AND project_id = ?");
            bind_values.push(Value::Text(project_id.to_string()));
        }
        if let Some(tag_id) = &filter.tag_id {
            sql.push_str(
                " AND EXISTS (
                    SELECT 1 FROM todo_tags tt
                    WHERE tt.todo_id = todos.id AND tt.tag_id = ?
                )",
            );
            bind_values.push(Value::Text(tag_id.to_string()));
        }
        sql.push_str(" ORDER BY rowid");

        let mut stmt = self.conn().prepare(&sql)?;
        let rows = stmt
            .query_map(params_from_iter(bind_values), TodoRow::from_row)?
            .collect::<Result<Vec<_>, _>>()?;

        rows.into_iter()
            .map(|row| self.hydrate(row.into_todo()?))
            .collect()
    }

    fn update(
        &self,
        id: &TodoId,
        patch: &TodoPatch,
        now: DateTime<Utc>,
    ) -> StorageResult<Option<Todo>> {
        let Some(current) = self.find_by_id(id)? else {
            return Ok(None);
        };

        let next = current.apply(patch, now);
        self.write_row(&next)?;
        debug!(todo_id = %id, "updated todo");
        Ok(Some(next))
    }

    fn delete(&self, id: &TodoId) -> StorageResult<bool> {
        let changed = self
            .conn()
            .execute("DELETE FROM todos WHERE id = ?1", params![id.as_str()])?;
        Ok(changed > 0)
    }

    fn add_dependency(&self, todo_id: &TodoId, dependency_id: &TodoId) -> StorageResult<()> {
        self.conn().execute(
            "INSERT INTO todo_dependencies (todo_id, dependency_id) VALUES (?1, ?2)",
            params![todo_id.as_str(), dependency_id.as_str()],
        )?;
        Ok(())
    }

    fn remove_dependency(&self, todo_id: &TodoId, dependency_id: &TodoId) -> StorageResult<bool> {
        let changed = self.conn().execute(
            "DELETE FROM todo_dependencies WHERE todo_id = ?1 AND dependency_id = ?2",
            params![todo_id.as_str(), dependency_id.as_str()],
        )?;
        Ok(changed > 0)
    }

    fn has_dependency(&self, todo_id: &TodoId, dependency_id: &TodoId) -> StorageResult<bool> {
        let exists: bool = self.conn().query_row(
            "SELECT EXISTS (
                SELECT 1 FROM todo_dependencies WHERE todo_id = ?1 AND dependency_id = ?2
            )",
            params![todo_id.as_str(), dependency_id.as_str()],
            |row| row.get(0),
        )?;
        Ok(exists)
    }

    fn find_dependencies(&self, todo_id: &TodoId) -> StorageResult<Vec<TodoId>> {
        ids(
            self.conn(),
            "SELECT dependency_id FROM todo_dependencies WHERE todo_id = ?1 ORDER BY rowid",
            todo_id.as_str(),
            "todo_dependencies.dependency_id",
        )
    }

    fn find_dependents(&self, todo_id: &TodoId) -> StorageResult<Vec<TodoId>> {
        ids(
            self.conn(),
            "SELECT todo_id FROM todo_dependencies WHERE dependency_id = ?1 ORDER BY rowid",
            todo_id.as_str(),
            "todo_dependencies.todo_id",
        )
    }

    fn add_tag(&self, todo_id: &TodoId, tag_id: &TagId) -> StorageResult<bool> {
        let changed = self.conn().execute(
            "INSERT OR IGNORE INTO todo_tags (todo_id, tag_id) VALUES (?1, ?2)",
            params![todo_id.as_str(), tag_id.as_str()],
        )?;
        Ok(changed > 0)
    }

    fn remove_tag(&self, todo_id: &TodoId, tag_id: &TagId) -> StorageResult<bool> {
        let changed = self.conn().execute(
            "DELETE FROM todo_tags WHERE todo_id = ?1 AND tag_id = ?2",
            params![todo_id.as_str(), tag_id.as_str()],
        )?;
        Ok(changed > 0)
    }
}

// --- projects --------------------------------------------------------------

struct ProjectRow {
    id: String,
    name: String,
    description: Option<String>,
    created_at: String,
    updated_at: String,
}

impl ProjectRow {
    fn from_row(row: &Row<'_>) -> rusqlite::Result<Self> {
        Ok(Self {
            id: row.get("id")?,
            name: row.get("name")?,
            description: row.get("description")?,
            created_at: row.get("created_at")?,
            updated_at: row.get("updated_at")?,
        })
    }

    fn into_project(self) -> StorageResult<Project> {
        Ok(Project {
            id: parse_field("projects.id", &self.id)?,
            name: self.name,
            description: self.description,
            created_at: parse_time("projects.created_at", &self.created_at)?,
            updated_at: parse_time("projects.updated_at", &self.updated_at)?,
        })
    }
}

#[derive(Clone, Copy)]
pub struct SqliteProjectRepository<'db> {
    db: &'db Database,
}

impl<'db> SqliteProjectRepository<'db> {
    pub fn new(db: &'db Database) -> Self {
        Self { db }
    }

    fn find_one(&self, sql: &str, key: &str) -> StorageResult<Option<Project>> {
        self.db
            .conn()
            .query_row(sql, params![key], ProjectRow::from_row)
            .optional()?
            .map(ProjectRow::into_project)
            .transpose()
    }
}

impl ProjectRepository for SqliteProjectRepository<'_> {
    fn create(&self, project: &Project) -> StorageResult<()> {
        self.db.conn().execute(
            "INSERT INTO projects (id, name, description, created_at, updated_at)
             VALUES (?1, ?2, ?3, ?4, ?5)",
            params![
                project.id.as_str(),
                project.name,
                project.description,
                to_text(project.created_at),
                to_text(project.updated_at),
            ],
        )?;
        Ok(())
    }

    fn find_by_id(&self, id: &ProjectId) -> StorageResult<Option<Project>> {
        self.find_one(
            "SELECT id, name, description, created_at, updated_at FROM projects WHERE id = ?1",
            id.as_str(),
        )
    }

    fn find_by_name(&self, name: &str) -> StorageResult<Option<Project>> {
        self.find_one(
            "SELECT id, name, description, created_at, updated_at FROM projects
             WHERE name = ?1 COLLATE NOCASE ORDER BY rowid LIMIT 1",
            name.trim(),
        )
    }

    fn find_all(&self) -> StorageResult<Vec<Project>> {
        let mut stmt = self.db.conn().prepare(
            "SELECT id, name, description, created_at, updated_at FROM projects
             ORDER BY name COLLATE NOCASE, rowid",
        )?;
        let rows = stmt
            .query_map([], ProjectRow::from_row)?
            .collect::<Result<Vec<_>, _>>()?;
        rows.into_iter().map(ProjectRow::into_project).collect()
    }

    fn update(
        &self,
        id: &ProjectId,
        patch: &ProjectPatch,
        now: DateTime<Utc>,
    ) -> StorageResult<Option<Project>> {
        let Some(current) = self.find_by_id(id)? else {
            return Ok(None);
        };

        let next = current.apply(patch, now);
        self.db.conn().execute(
            "UPDATE projects SET name = ?2, description = ?3, updated_at = ?4 WHERE id = ?1",
            params![
                next.id.as_str(),
                next.name,
                next.description,
                to_text(next.updated_at),
            ],
        )?;
        Ok(Some(next))
    }

    fn delete(&self, id: &ProjectId) -> StorageResult<bool> {
        // todos.project_id is ON DELETE SET NULL
        let changed = self
            .db
            .conn()
            .execute("DELETE FROM projects WHERE id = ?1", params![id.as_str()])?;
        Ok(changed > 0)
    }
}

// --- tags ------------------------------------------------------------------

struct TagRow {
    id: String,
    name: String,
    color: Option<String>,
    created_at: String,
}

impl TagRow {
    fn from_row(row: &Row<'_>) -> rusqlite::Result<Self> {
        Ok(Self {
            id: row.get("id")?,
            name: row.get("name")?,
            color: row.get("color")?,
            created_at: row.get("created_at")?,
        })
    }

    fn into_tag(self) -> StorageResult<Tag> {
        Ok(Tag {
            id: parse_field("tags.id", &self.id)?,
            name: self.name,
            color: self.color,
            created_at: parse_time("tags.created_at", &self.created_at)?,
        })
    }
}

#[derive(Clone, Copy)]
pub struct SqliteTagRepository<'db> {
    db: &'db Database,
}

impl<'db> SqliteTagRepository<'db> {
    pub fn new(db: &'db Database) -> Self {
        Self { db }
    }

    fn find_one(&self, sql: &str, key: &str) -> StorageResult<Option<Tag>> {
        self.db
            .conn()
            .query_row(sql, params![key], TagRow::from_row)
            .optional()?
            .map(TagRow::into_tag)
            .transpose()
    }
}

impl TagRepository for SqliteTagRepository<'_> {
    fn create(&self, tag: &Tag) -> StorageResult<()> {
        self.db.conn().execute(
            "INSERT INTO tags (id, name, color, created_at) VALUES (?1, ?2, ?3, ?4)",
            params![tag.id.as_str(), tag.name, tag.color, to_text(tag.created_at)],
        )?;
        Ok(())
    }

    fn find_by_id(&self, id: &TagId) -> StorageResult<Option<Tag>> {
        self.find_one(
            "SELECT id, name, color, created_at FROM tags WHERE id = ?1",
            id.as_str(),
        )
    }

    fn find_by_name(&self, name: &str) -> StorageResult<Option<Tag>> {
        self.find_one(
            "SELECT id, name, color, created_at FROM tags WHERE name = ?1",
            &Tag::normalize(name),
        )
    }

    fn find_all(&self) -> StorageResult<Vec<Tag>> {
        let mut stmt = self
            .db
            .conn()
            .prepare("SELECT id, name, color, created_at FROM tags ORDER BY name")?;
        let rows = stmt
            .query_map([], TagRow::from_row)?
            .collect::<Result<Vec<_>, _>>()?;
        rows.into_iter().map(TagRow::into_tag).collect()
    }

    fn delete(&self, id: &TagId) -> StorageResult<bool> {
        let changed = self
            .db
            .conn()
            .execute("DELETE FROM tags WHERE id = ?1", params![id.as_str()])?;
        Ok(changed > 0)
    }
}

// --- subtasks --------------------------------------------------------------

struct SubtaskRow {
    id: String,
    todo_id: String,
    title: String,
    completed: bool,
    position: i64,
    created_at: String,
    updated_at: String,
}

impl SubtaskRow {
    fn from_row(row: &Row<'_>) -> rusqlite::Result<Self> {
        Ok(Self {
            id: row.get("id")?,
            todo_id: row.get("todo_id")?,
            title: row.get("title")?,
            completed: row.get("completed")?,
            position: row.get("position")?,
            created_at: row.get("created_at")?,
            updated_at: row.get("updated_at")?,
        })
    }

    fn into_subtask(self) -> StorageResult<Subtask> {
        let position = u32::try_from(self.position).map_err(|_| {
            StorageError::InvalidData(format!("invalid position {} in subtasks.position", self.position))
        })?;

        Ok(Subtask {
            id: parse_field("subtasks.id", &self.id)?,
            todo_id: parse_field("subtasks.todo_id", &self.todo_id)?,
            title: self.title,
            completed: self.completed,
            position,
            created_at: parse_time("subtasks.created_at", &self.created_at)?,
            updated_at: parse_time("subtasks.updated_at", &self.updated_at)?,
        })
    }
}

#[derive(Clone, Copy)]
pub struct SqliteSubtaskRepository<'db> {
    db: &'db Database,
}

impl<'db> SqliteSubtaskRepository<'db> {
    pub fn new(db: &'db Database) -> Self {
        Self { db }
    }
}

impl SubtaskRepository for SqliteSubtaskRepository<'_> {
    fn create(&self, subtask: &Subtask) -> StorageResult<()> {
        self.db.conn().execute(
            "INSERT INTO subtasks (id, todo_id, title, completed, position, created_at, updated_at)
             VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7)",
            params![
                subtask.id.as_str(),
                subtask.todo_id.as_str(),
                subtask.title,
                subtask.completed,
                subtask.position,
                to_text(subtask.created_at),
                to_text(subtask.updated_at),
            ],
        )?;
        Ok(())
    }

    fn find_by_id(&self, id: &SubtaskId) -> StorageResult<Option<Subtask>> {
        self.db
            .conn()
            .query_row(
                "SELECT id, todo_id, title, completed, position, created_at, updated_at
                 FROM subtasks WHERE id = ?1",
                params![id.as_str()],
                SubtaskRow::from_row,
            )
            .optional()?
            .map(SubtaskRow::into_subtask)
            .transpose()
    }

    fn find_by_todo(&self, todo_id: &TodoId) -> StorageResult<Vec<Subtask>> {
        let mut stmt = self.db.conn().prepare(
            "SELECT id, todo_id, title, completed, position, created_at, updated_at
             FROM subtasks WHERE todo_id = ?1 ORDER BY position, rowid",
        )?;
        let rows = stmt
            .query_map(params![todo_id.as_str()], SubtaskRow::from_row)?
            .collect::<Result<Vec<_>, _>>()?;
        rows.into_iter().map(SubtaskRow::into_subtask).collect()
    }

    fn save(&self, subtask: &Subtask) -> StorageResult<bool> {
        let changed = self.db.conn().execute(
            "UPDATE subtasks SET title = ?2, completed = ?3, position = ?4, updated_at = ?5
             WHERE id = ?1",
            params![
                subtask.id.as_str(),
                subtask.title,
                subtask.completed,
                subtask.position,
                to_text(subtask.updated_at),
            ],
        )?;
        Ok(changed > 0)
    }

    fn delete(&self, id: &SubtaskId) -> StorageResult<bool> {
        let changed = self
            .db
            .conn()
            .execute("DELETE FROM subtasks WHERE id = ?1", params![id.as_str()])?;
        Ok(changed > 0)
    }
}

// --- activities ------------------------------------------------------------

struct ActivityRow {
    id: String,
    todo_id: String,
    kind: String,
    detail: Option<String>,
    created_at: String,
}

impl ActivityRow {
    fn from_row(row: &Row<'_>) -> rusqlite::Result<Self> {
        Ok(Self {
            id: row.get("id")?,
            todo_id: row.get("todo_id")?,
            kind: row.get("kind")?,
            detail: row.get("detail")?,
            created_at: row.get("created_at")?,
        })
    }

    fn into_activity(self) -> StorageResult<TodoActivity> {
        Ok(TodoActivity {
            id: parse_field("todo_activities.id", &self.id)?,
            todo_id: parse_field("todo_activities.todo_id", &self.todo_id)?,
            kind: parse_field("todo_activities.kind", &self.kind)?,
            detail: self.detail,
            created_at: parse_time("todo_activities.created_at", &self.created_at)?,
        })
    }
}

#[derive(Clone, Copy)]
pub struct SqliteActivityRepository<'db> {
    db: &'db Database,
}

impl<'db> SqliteActivityRepository<'db> {
    pub fn new(db: &'db Database) -> Self {
        Self { db }
    }
}

impl ActivityRepository for SqliteActivityRepository<'_> {
    fn append(&self, activity: &TodoActivity) -> StorageResult<()> {
        self.db.conn().execute(
            "INSERT INTO todo_activities (id, todo_id, kind, detail, created_at)
             VALUES (?1, ?2, ?3, ?4, ?5)",
            params![
                activity.id.as_str(),
                activity.todo_id.as_str(),
                activity.kind.as_str(),
                activity.detail,
                to_text(activity.created_at),
            ],
        )?;
        Ok(())
    }

    fn find_by_todo(&self, todo_id: &TodoId) -> StorageResult<Vec<TodoActivity>> {
        // append-only, so rowid order is chronological
        let mut stmt = self.db.conn().prepare(
            "SELECT id, todo_id, kind, detail, created_at
             FROM todo_activities WHERE todo_id = ?1 ORDER BY rowid DESC",
        )?;
        let rows = stmt
            .query_map(params![todo_id.as_str()], ActivityRow::from_row)?
            .collect::<Result<Vec<_>, _>>()?;
        rows.into_iter().map(ActivityRow::into_activity).collect()
    }
}
