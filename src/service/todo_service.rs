//! Todo use cases
//!
//! CRUD, state transitions, tagging and the activity log for a single todo.
//! Every mutating operation appends one activity record.

use std::collections::HashSet;

use chrono::{DateTime, Utc};
use serde::Serialize;
use tracing::{debug, info};

use super::clock::{Clock, SystemClock};
use super::error::{ServiceError, ServiceResult};
use crate::domain::{
    format_duration, ActivityKind, DueFilter, Priority, ProjectId, TagId, Todo, TodoActivity,
    TodoFilter, TodoId, TodoPatch, Transition, WorkState,
};
use crate::storage::{ActivityRepository, ProjectRepository, TagRepository, TodoRepository};

/// Input for creating a todo
#[derive(Debug, Clone, Default)]
pub struct NewTodo {
    pub title: String,
    pub description: Option<String>,
    pub priority: Option<Priority>,
    pub project_id: Option<ProjectId>,
    pub due_date: Option<DateTime<Utc>>,
    pub tags: Vec<TagId>,
}

impl NewTodo {
    pub fn new(title: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            ..Self::default()
        }
    }
}

/// Work-time report for one todo
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct WorkTimeReport {
    pub id: TodoId,
    pub work_state: WorkState,
    /// Persisted seconds
    pub total_seconds: u64,
    /// Persisted plus running seconds
    pub current_seconds: u64,
    pub formatted: String,
}

pub struct TodoService<T, P, G, A, C = SystemClock> {
    todos: T,
    projects: P,
    tags: G,
    activities: A,
    clock: C,
    require_dependencies_complete: bool,
}

impl<T, P, G, A, C> TodoService<T, P, G, A, C>
where
    T: TodoRepository,
    P: ProjectRepository,
    G: TagRepository,
    A: ActivityRepository,
    C: Clock,
{
    pub fn new(todos: T, projects: P, tags: G, activities: A, clock: C) -> Self {
        Self {
            todos,
            projects,
            tags,
            activities,
            clock,
            require_dependencies_complete: true,
        }
    }

    /// Whether `complete` refuses todos with open dependencies (default on)
    pub fn with_dependency_gate(mut self, enabled: bool) -> Self {
        self.require_dependencies_complete = enabled;
        self
    }

    fn record(
        &self,
        todo_id: &TodoId,
        kind: ActivityKind,
        detail: Option<String>,
        now: DateTime<Utc>,
    ) -> ServiceResult<()> {
        self.activities
            .append(&TodoActivity::record(todo_id, kind, detail, now))?;
        Ok(())
    }

    fn ensure_project(&self, project_id: &ProjectId) -> ServiceResult<()> {
        if self.projects.find_by_id(project_id)?.is_none() {
            return Err(ServiceError::NotFound {
                entity: "Project",
                id: project_id.to_string(),
            });
        }
        Ok(())
    }

    fn ensure_tag(&self, tag_id: &TagId) -> ServiceResult<String> {
        match self.tags.find_by_id(tag_id)? {
            Some(tag) => Ok(tag.name),
            None => Err(ServiceError::NotFound {
                entity: "Tag",
                id: tag_id.to_string(),
            }),
        }
    }

    pub fn get(&self, id: &TodoId) -> ServiceResult<Todo> {
        self.todos
            .find_by_id(id)?
            .ok_or_else(|| ServiceError::todo_not_found(id))
    }

    pub fn create(&self, input: NewTodo) -> ServiceResult<Todo> {
        let now = self.clock.now();
        let title = input.title.trim().to_string();

        let mut todo = Todo::new(TodoId::generate(&title, now), title, now)
            .with_priority(input.priority.unwrap_or_default());
        todo.description = input.description.filter(|d| !d.trim().is_empty());
        todo.due_date = input.due_date;
        todo.validate()?;

        if let Some(project_id) = input.project_id {
            self.ensure_project(&project_id)?;
            todo.project_id = Some(project_id);
        }
        for tag_id in input.tags {
            self.ensure_tag(&tag_id)?;
            if !todo.tags.contains(&tag_id) {
                todo.tags.push(tag_id);
            }
        }

        self.todos.atomically(|| -> ServiceResult<()> {
            self.todos.create(&todo)?;
            self.record(&todo.id, ActivityKind::Created, None, now)
        })?;
        info!(todo_id = %todo.id, "created todo");
        Ok(todo)
    }

    /// Lists todos matching the column filter and, if given, a due-date filter
    pub fn list(&self, filter: &TodoFilter, due: Option<DueFilter>) -> ServiceResult<Vec<Todo>> {
        let todos = self.todos.find_all(filter)?;
        let Some(due) = due else {
            return Ok(todos);
        };

        let now = self.clock.now();
        Ok(todos.into_iter().filter(|todo| due.matches(todo, now)).collect())
    }

    /// Applies a descriptive patch (title, description, priority, project, due date)
    pub fn update(&self, id: &TodoId, patch: TodoPatch) -> ServiceResult<Todo> {
        let fields = patch.changed_fields();
        if fields.is_empty() {
            return Err(ServiceError::Validation("Nothing to update".to_string()));
        }

        let mut patch = patch;
        if let Some(title) = &patch.title {
            let title = title.trim();
            if title.is_empty() {
                return Err(ServiceError::Validation(
                    "Todo title must not be empty".to_string(),
                ));
            }
            patch.title = Some(title.to_string());
        }
        if let Some(Some(project_id)) = &patch.project_id {
            self.ensure_project(project_id)?;
        }

        let now = self.clock.now();
        let updated = self.todos.atomically(|| -> ServiceResult<Todo> {
            let updated = self
                .todos
                .update(id, &patch, now)?
                .ok_or_else(|| ServiceError::todo_not_found(id))?;
            self.record(id, ActivityKind::Updated, Some(fields.join(",")), now)?;
            Ok(updated)
        })?;
        debug!(todo_id = %id, fields = ?fields, "updated todo");
        Ok(updated)
    }

    /// Deletes a todo with its edges, tag links, subtasks and activity
    pub fn delete(&self, id: &TodoId) -> ServiceResult<()> {
        if !self.todos.delete(id)? {
            return Err(ServiceError::todo_not_found(id));
        }
        info!(todo_id = %id, "deleted todo");
        Ok(())
    }

    pub fn start(&self, id: &TodoId) -> ServiceResult<Todo> {
        self.transition(id, Transition::Start)
    }

    pub fn pause(&self, id: &TodoId) -> ServiceResult<Todo> {
        self.transition(id, Transition::Pause)
    }

    pub fn resume(&self, id: &TodoId) -> ServiceResult<Todo> {
        self.transition(id, Transition::Resume)
    }

    pub fn complete(&self, id: &TodoId) -> ServiceResult<Todo> {
        self.transition(id, Transition::Complete)
    }

    pub fn reopen(&self, id: &TodoId) -> ServiceResult<Todo> {
        self.transition(id, Transition::Reopen)
    }

    /// Dependencies of `todo` that are not completed yet
    fn open_dependencies(&self, todo: &Todo) -> ServiceResult<Vec<TodoId>> {
        let mut completed = HashSet::new();
        for dep_id in &todo.dependencies {
            if let Some(dep) = self.todos.find_by_id(dep_id)? {
                if dep.status.is_complete() {
                    completed.insert(dep.id);
                }
            }
        }
        Ok(todo.pending_dependencies(&completed))
    }

    fn transition(&self, id: &TodoId, transition: Transition) -> ServiceResult<Todo> {
        let todo = self.get(id)?;
        let now = self.clock.now();

        let next = match transition {
            Transition::Start => todo.start(now)?,
            Transition::Pause => todo.pause(now)?,
            Transition::Resume => todo.resume(now)?,
            Transition::Complete => {
                if todo.status.is_complete() {
                    return Err(ServiceError::AlreadyCompleted(id.clone()));
                }
                if self.require_dependencies_complete {
                    let pending = self.open_dependencies(&todo)?;
                    if !pending.is_empty() {
                        return Err(ServiceError::IncompleteDependencies {
                            id: id.clone(),
                            pending,
                        });
                    }
                }
                todo.complete(now)?
            }
            Transition::Reopen => {
                if !todo.status.is_complete() {
                    return Err(ServiceError::NotCompleted(id.clone()));
                }
                todo.reopen(now)?
            }
        };

        let saved = self.todos.atomically(|| -> ServiceResult<Todo> {
            let saved = self
                .todos
                .update(id, &TodoPatch::work_state_of(&next), now)?
                .ok_or_else(|| ServiceError::todo_not_found(id))?;
            self.record(id, transition.into(), None, now)?;
            Ok(saved)
        })?;
        info!(
            todo_id = %id,
            transition = %transition,
            work_state = %saved.work_state,
            total_work_time = saved.total_work_time,
            "todo transitioned"
        );
        Ok(saved)
    }

    /// Current work time, including the running interval when active
    pub fn work_time(&self, id: &TodoId) -> ServiceResult<WorkTimeReport> {
        let todo = self.get(id)?;
        let current = todo.current_work_time(self.clock.now());

        Ok(WorkTimeReport {
            id: todo.id,
            work_state: todo.work_state,
            total_seconds: todo.total_work_time,
            current_seconds: current,
            formatted: format_duration(current),
        })
    }

    /// Links a tag. Returns false if it was already linked.
    pub fn attach_tag(&self, id: &TodoId, tag_id: &TagId) -> ServiceResult<bool> {
        self.get(id)?;
        let name = self.ensure_tag(tag_id)?;

        let added = self.todos.atomically(|| -> ServiceResult<bool> {
            let added = self.todos.add_tag(id, tag_id)?;
            if added {
                self.record(id, ActivityKind::Tagged, Some(name), self.clock.now())?;
            }
            Ok(added)
        })?;
        if added {
            debug!(todo_id = %id, tag_id = %tag_id, "tagged todo");
        }
        Ok(added)
    }

    /// Unlinks a tag. Returns false if it was not linked.
    pub fn detach_tag(&self, id: &TodoId, tag_id: &TagId) -> ServiceResult<bool> {
        self.get(id)?;
        let name = self.ensure_tag(tag_id)?;

        let removed = self.todos.atomically(|| -> ServiceResult<bool> {
            let removed = self.todos.remove_tag(id, tag_id)?;
            if removed {
                self.record(id, ActivityKind::Untagged, Some(name), self.clock.now())?;
            }
            Ok(removed)
        })?;
        if removed {
            debug!(todo_id = %id, tag_id = %tag_id, "untagged todo");
        }
        Ok(removed)
    }

    /// Activity log of a todo, newest first
    pub fn activities(&self, id: &TodoId) -> ServiceResult<Vec<TodoActivity>> {
        self.get(id)?;
        Ok(self.activities.find_by_todo(id)?)
    }
}
