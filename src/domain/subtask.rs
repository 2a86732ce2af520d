//! Subtask domain model
//!
//! Subtasks are checklist items owned by a todo. They have no state machine
//! of their own and do not take part in the dependency graph.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::id::{SubtaskId, TodoId};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Subtask {
    pub id: SubtaskId,

    /// Owning todo
    pub todo_id: TodoId,

    pub title: String,

    pub completed: bool,

    /// Zero-based position within the owning todo
    pub position: u32,

    pub created_at: DateTime<Utc>,

    pub updated_at: DateTime<Utc>,
}

impl Subtask {
    pub fn new(
        id: SubtaskId,
        todo_id: TodoId,
        title: impl Into<String>,
        position: u32,
        now: DateTime<Utc>,
    ) -> Self {
        Self {
            id,
            todo_id,
            title: title.into(),
            completed: false,
            position,
            created_at: now,
            updated_at: now,
        }
    }

    pub fn toggled(&self, now: DateTime<Utc>) -> Self {
        let mut next = self.clone();
        next.completed = !self.completed;
        next.updated_at = now;
        next
    }

    pub fn renamed(&self, title: impl Into<String>, now: DateTime<Utc>) -> Self {
        let mut next = self.clone();
        next.title = title.into();
        next.updated_at = now;
        next
    }
}
