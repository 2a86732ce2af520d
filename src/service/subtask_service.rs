//! Subtask use cases

use tracing::debug;

use super::clock::{Clock, SystemClock};
use super::error::{ServiceError, ServiceResult};
use crate::domain::{Subtask, SubtaskId, TodoId};
use crate::storage::{SubtaskRepository, TodoRepository};

pub struct SubtaskService<S, T, C = SystemClock> {
    subtasks: S,
    todos: T,
    clock: C,
}

impl<S, T, C> SubtaskService<S, T, C>
where
    S: SubtaskRepository,
    T: TodoRepository,
    C: Clock,
{
    pub fn new(subtasks: S, todos: T, clock: C) -> Self {
        Self {
            subtasks,
            todos,
            clock,
        }
    }

    fn valid_title(title: &str) -> ServiceResult<String> {
        let title = title.trim();
        if title.is_empty() {
            return Err(ServiceError::Validation(
                "Subtask title must not be empty".to_string(),
            ));
        }
        Ok(title.to_string())
    }

    fn ensure_todo(&self, todo_id: &TodoId) -> ServiceResult<()> {
        if self.todos.find_by_id(todo_id)?.is_none() {
            return Err(ServiceError::todo_not_found(todo_id));
        }
        Ok(())
    }

    pub fn get(&self, id: &SubtaskId) -> ServiceResult<Subtask> {
        self.subtasks
            .find_by_id(id)?
            .ok_or_else(|| ServiceError::NotFound {
                entity: "Subtask",
                id: id.to_string(),
            })
    }

    /// Adds a subtask after the existing ones
    pub fn add(&self, todo_id: &TodoId, title: &str) -> ServiceResult<Subtask> {
        let title = Self::valid_title(title)?;
        self.ensure_todo(todo_id)?;

        let position = self
            .subtasks
            .find_by_todo(todo_id)?
            .iter()
            .map(|s| s.position + 1)
            .max()
            .unwrap_or(0);

        let now = self.clock.now();
        let subtask = Subtask::new(
            SubtaskId::generate(&title, now),
            todo_id.clone(),
            title,
            position,
            now,
        );
        self.subtasks.create(&subtask)?;

        debug!(todo_id = %todo_id, subtask_id = %subtask.id, position, "added subtask");
        Ok(subtask)
    }

    /// Subtasks of a todo by position
    pub fn list(&self, todo_id: &TodoId) -> ServiceResult<Vec<Subtask>> {
        self.ensure_todo(todo_id)?;
        Ok(self.subtasks.find_by_todo(todo_id)?)
    }

    pub fn toggle(&self, id: &SubtaskId) -> ServiceResult<Subtask> {
        let subtask = self.get(id)?.toggled(self.clock.now());
        self.save(subtask)
    }

    pub fn rename(&self, id: &SubtaskId, title: &str) -> ServiceResult<Subtask> {
        let title = Self::valid_title(title)?;
        let subtask = self.get(id)?.renamed(title, self.clock.now());
        self.save(subtask)
    }

    fn save(&self, subtask: Subtask) -> ServiceResult<Subtask> {
        if !self.subtasks.save(&subtask)? {
            return Err(ServiceError::NotFound {
                entity: "Subtask",
                id: subtask.id.to_string(),
            });
        }
        debug!(subtask_id = %subtask.id, completed = subtask.completed, "saved subtask");
        Ok(subtask)
    }

    pub fn delete(&self, id: &SubtaskId) -> ServiceResult<()> {
        if !self.subtasks.delete(id)? {
            return Err(ServiceError::NotFound {
                entity: "Subtask",
                id: id.to_string(),
            });
        }
        Ok(())
    }
}
