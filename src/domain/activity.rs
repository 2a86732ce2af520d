//! Todo activity log
//!
//! Every mutating use case on a todo appends one [`TodoActivity`]. The log is
//! append-only and is removed together with its todo.

use std::fmt;
use std::str::FromStr;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::id::{ActivityId, TodoId};
use super::todo::{ParseEnumError, Transition};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ActivityKind {
    Created,
    Updated,
    Started,
    Paused,
    Resumed,
    Completed,
    Reopened,
    DependencyAdded,
    DependencyRemoved,
    Tagged,
    Untagged,
}

impl ActivityKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            ActivityKind::Created => "created",
            ActivityKind::Updated => "updated",
            ActivityKind::Started => "started",
            ActivityKind::Paused => "paused",
            ActivityKind::Resumed => "resumed",
            ActivityKind::Completed => "completed",
            ActivityKind::Reopened => "reopened",
            ActivityKind::DependencyAdded => "dependency_added",
            ActivityKind::DependencyRemoved => "dependency_removed",
            ActivityKind::Tagged => "tagged",
            ActivityKind::Untagged => "untagged",
        }
    }
}

impl From<Transition> for ActivityKind {
    fn from(transition: Transition) -> Self {
        match transition {
            Transition::Start => ActivityKind::Started,
            Transition::Pause => ActivityKind::Paused,
            Transition::Resume => ActivityKind::Resumed,
            Transition::Complete => ActivityKind::Completed,
            Transition::Reopen => ActivityKind::Reopened,
        }
    }
}

impl fmt::Display for ActivityKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.pad(self.as_str())
    }
}

impl FromStr for ActivityKind {
    type Err = ParseEnumError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let kind = match s.trim() {
            "created" => ActivityKind::Created,
            "updated" => ActivityKind::Updated,
            "started" => ActivityKind::Started,
            "paused" => ActivityKind::Paused,
            "resumed" => ActivityKind::Resumed,
            "completed" => ActivityKind::Completed,
            "reopened" => ActivityKind::Reopened,
            "dependency_added" => ActivityKind::DependencyAdded,
            "dependency_removed" => ActivityKind::DependencyRemoved,
            "tagged" => ActivityKind::Tagged,
            "untagged" => ActivityKind::Untagged,
            other => {
                return Err(ParseEnumError {
                    kind: "activity kind",
                    value: other.to_string(),
                    expected: "created, updated, started, paused, resumed, completed, reopened, \
                               dependency_added, dependency_removed, tagged, untagged",
                })
            }
        };
        Ok(kind)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TodoActivity {
    pub id: ActivityId,

    pub todo_id: TodoId,

    pub kind: ActivityKind,

    /// Free-form context, e.g. the other end of a dependency edge
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub detail: Option<String>,

    pub created_at: DateTime<Utc>,
}

impl TodoActivity {
    pub fn record(
        todo_id: &TodoId,
        kind: ActivityKind,
        detail: Option<String>,
        now: DateTime<Utc>,
    ) -> Self {
        Self {
            id: ActivityId::generate(todo_id.as_str(), now),
            todo_id: todo_id.clone(),
            kind,
            detail,
            created_at: now,
        }
    }
}
