//! Todo domain model
//!
//! A todo carries two independent state dimensions: its completion `status`
//! and its activity-tracking `work_state`. Both change only through the
//! transition methods below, which never mutate the receiver. Each returns
//! the next value and leaves persisting it to the caller.

use std::collections::HashSet;
use std::fmt;
use std::str::FromStr;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use thiserror::Error;

use super::id::{ProjectId, TagId, TodoId};
use super::work_time;

#[derive(Debug, Error, PartialEq)]
pub enum TodoError {
    #[error("Cannot {transition} todo {id}: status is {status}, work state is {work_state}")]
    InvalidStateTransition {
        id: TodoId,
        transition: Transition,
        status: TodoStatus,
        work_state: WorkState,
    },

    #[error("Todo {0} cannot depend on itself")]
    SelfDependency(TodoId),

    #[error("Todo title must not be empty")]
    EmptyTitle,
}

/// Error returned when parsing one of the todo enums from text
#[derive(Debug, Error, PartialEq)]
#[error("Invalid {kind} '{value}' (expected one of: {expected})")]
pub struct ParseEnumError {
    pub kind: &'static str,
    pub value: String,
    pub expected: &'static str,
}

/// Completion status of a todo
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum TodoStatus {
    #[default]
    Pending,
    InProgress,
    Completed,
}

impl TodoStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            TodoStatus::Pending => "pending",
            TodoStatus::InProgress => "in_progress",
            TodoStatus::Completed => "completed",
        }
    }

    /// Returns true if this status represents completion
    pub fn is_complete(&self) -> bool {
        matches!(self, TodoStatus::Completed)
    }
}

impl fmt::Display for TodoStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.pad(self.as_str())
    }
}

impl FromStr for TodoStatus {
    type Err = ParseEnumError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim() {
            "pending" => Ok(TodoStatus::Pending),
            "in_progress" | "in-progress" => Ok(TodoStatus::InProgress),
            "completed" => Ok(TodoStatus::Completed),
            other => Err(ParseEnumError {
                kind: "status",
                value: other.to_string(),
                expected: "pending, in_progress, completed",
            }),
        }
    }
}

/// Activity-tracking state of a todo
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum WorkState {
    #[default]
    Idle,
    Active,
    Paused,
    Completed,
}

impl WorkState {
    pub fn as_str(&self) -> &'static str {
        match self {
            WorkState::Idle => "idle",
            WorkState::Active => "active",
            WorkState::Paused => "paused",
            WorkState::Completed => "completed",
        }
    }
}

impl fmt::Display for WorkState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.pad(self.as_str())
    }
}

impl FromStr for WorkState {
    type Err = ParseEnumError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim() {
            "idle" => Ok(WorkState::Idle),
            "active" => Ok(WorkState::Active),
            "paused" => Ok(WorkState::Paused),
            "completed" => Ok(WorkState::Completed),
            other => Err(ParseEnumError {
                kind: "work state",
                value: other.to_string(),
                expected: "idle, active, paused, completed",
            }),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum Priority {
    Low,
    #[default]
    Medium,
    High,
}

impl Priority {
    pub fn as_str(&self) -> &'static str {
        match self {
            Priority::Low => "low",
            Priority::Medium => "medium",
            Priority::High => "high",
        }
    }
}

impl fmt::Display for Priority {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.pad(self.as_str())
    }
}

impl FromStr for Priority {
    type Err = ParseEnumError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim() {
            "low" => Ok(Priority::Low),
            "medium" => Ok(Priority::Medium),
            "high" => Ok(Priority::High),
            other => Err(ParseEnumError {
                kind: "priority",
                value: other.to_string(),
                expected: "low, medium, high",
            }),
        }
    }
}

/// A named state-machine transition
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Transition {
    Start,
    Pause,
    Resume,
    Complete,
    Reopen,
}

impl Transition {
    pub fn as_str(&self) -> &'static str {
        match self {
            Transition::Start => "start",
            Transition::Pause => "pause",
            Transition::Resume => "resume",
            Transition::Complete => "complete",
            Transition::Reopen => "reopen",
        }
    }
}

impl fmt::Display for Transition {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.pad(self.as_str())
    }
}

/// Partial update for a todo.
///
/// `None` leaves a field untouched. For clearable fields the inner `Option`
/// is the new value, so `Some(None)` clears it.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct TodoPatch {
    pub title: Option<String>,
    pub description: Option<Option<String>>,
    pub priority: Option<Priority>,
    pub project_id: Option<Option<ProjectId>>,
    pub due_date: Option<Option<DateTime<Utc>>>,
    pub status: Option<TodoStatus>,
    pub work_state: Option<WorkState>,
    pub total_work_time: Option<u64>,
    pub last_state_change_at: Option<Option<DateTime<Utc>>>,
    pub completed_at: Option<Option<DateTime<Utc>>>,
}

impl TodoPatch {
    /// Patch carrying every work-tracking field of `todo`.
    ///
    /// Used to persist the result of a state transition.
    pub fn work_state_of(todo: &Todo) -> Self {
        Self {
            status: Some(todo.status),
            work_state: Some(todo.work_state),
            total_work_time: Some(todo.total_work_time),
            last_state_change_at: Some(todo.last_state_change_at),
            completed_at: Some(todo.completed_at),
            ..Self::default()
        }
    }

    /// Returns true if the patch changes nothing
    pub fn is_empty(&self) -> bool {
        *self == Self::default()
    }

    /// Names of the fields this patch touches, for activity records
    pub fn changed_fields(&self) -> Vec<&'static str> {
        let mut fields = Vec::new();
        if self.title.is_some() {
            fields.push("title");
        }
        if self.description.is_some() {
            fields.push("description");
        }
        if self.priority.is_some() {
            fields.push("priority");
        }
        if self.project_id.is_some() {
            fields.push("project");
        }
        if self.due_date.is_some() {
            fields.push("due_date");
        }
        fields
    }
}

/// A todo item
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Todo {
    /// Unique identifier
    pub id: TodoId,

    /// Human-readable title
    pub title: String,

    /// Optional description
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,

    /// Completion status
    pub status: TodoStatus,

    /// Activity-tracking state
    pub work_state: WorkState,

    /// Accumulated work time in whole seconds
    pub total_work_time: u64,

    /// When the work state last changed
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub last_state_change_at: Option<DateTime<Utc>>,

    pub priority: Priority,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub project_id: Option<ProjectId>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub due_date: Option<DateTime<Utc>>,

    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub tags: Vec<TagId>,

    /// Todos this one depends on, in insertion order
    #[serde(default)]
    pub dependencies: Vec<TodoId>,

    /// Todos depending on this one, in insertion order
    #[serde(default)]
    pub dependents: Vec<TodoId>,

    pub created_at: DateTime<Utc>,

    pub updated_at: DateTime<Utc>,

    /// When the todo was completed (if completed)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub completed_at: Option<DateTime<Utc>>,
}

impl Todo {
    /// Creates a pending, idle todo with no edges
    pub fn new(id: TodoId, title: impl Into<String>, now: DateTime<Utc>) -> Self {
        Self {
            id,
            title: title.into(),
            description: None,
            status: TodoStatus::Pending,
            work_state: WorkState::Idle,
            total_work_time: 0,
            last_state_change_at: None,
            priority: Priority::default(),
            project_id: None,
            due_date: None,
            tags: Vec::new(),
            dependencies: Vec::new(),
            dependents: Vec::new(),
            created_at: now,
            updated_at: now,
            completed_at: None,
        }
    }

    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    pub fn with_priority(mut self, priority: Priority) -> Self {
        self.priority = priority;
        self
    }

    pub fn with_project(mut self, project_id: ProjectId) -> Self {
        self.project_id = Some(project_id);
        self
    }

    pub fn with_due_date(mut self, due_date: DateTime<Utc>) -> Self {
        self.due_date = Some(due_date);
        self
    }

    /// Checks field-level invariants before persistence.
    pub fn validate(&self) -> Result<(), TodoError> {
        if self.title.trim().is_empty() {
            return Err(TodoError::EmptyTitle);
        }
        if self.dependencies.contains(&self.id) || self.dependents.contains(&self.id) {
            return Err(TodoError::SelfDependency(self.id.clone()));
        }
        Ok(())
    }

    fn invalid(&self, transition: Transition) -> TodoError {
        TodoError::InvalidStateTransition {
            id: self.id.clone(),
            transition,
            status: self.status,
            work_state: self.work_state,
        }
    }

    /// Seconds accrued since the last state change, if currently active
    fn running_seconds(&self, now: DateTime<Utc>) -> u64 {
        match (self.work_state, self.last_state_change_at) {
            (WorkState::Active, Some(since)) => work_time::elapsed_seconds(since, now),
            _ => 0,
        }
    }

    /// Begins work. Allowed unless completed or already active.
    pub fn start(&self, now: DateTime<Utc>) -> Result<Self, TodoError> {
        if self.status.is_complete() || self.work_state == WorkState::Active {
            return Err(self.invalid(Transition::Start));
        }

        let mut next = self.clone();
        next.status = TodoStatus::InProgress;
        next.work_state = WorkState::Active;
        next.last_state_change_at = Some(now);
        next.updated_at = now;
        Ok(next)
    }

    /// Pauses active work and banks the elapsed whole seconds.
    pub fn pause(&self, now: DateTime<Utc>) -> Result<Self, TodoError> {
        if self.work_state != WorkState::Active {
            return Err(self.invalid(Transition::Pause));
        }

        let mut next = self.clone();
        next.total_work_time = self.total_work_time.saturating_add(self.running_seconds(now));
        next.work_state = WorkState::Paused;
        next.last_state_change_at = Some(now);
        next.updated_at = now;
        Ok(next)
    }

    /// Resumes paused work. Status is left unchanged.
    pub fn resume(&self, now: DateTime<Utc>) -> Result<Self, TodoError> {
        if self.work_state != WorkState::Paused {
            return Err(self.invalid(Transition::Resume));
        }

        let mut next = self.clone();
        next.work_state = WorkState::Active;
        next.last_state_change_at = Some(now);
        next.updated_at = now;
        Ok(next)
    }

    /// Completes the todo, banking running time first if active.
    pub fn complete(&self, now: DateTime<Utc>) -> Result<Self, TodoError> {
        if self.status.is_complete() {
            return Err(self.invalid(Transition::Complete));
        }

        let mut next = self.clone();
        next.total_work_time = self.total_work_time.saturating_add(self.running_seconds(now));
        next.status = TodoStatus::Completed;
        next.work_state = WorkState::Completed;
        next.last_state_change_at = Some(now);
        next.completed_at = Some(now);
        next.updated_at = now;
        Ok(next)
    }

    /// Reopens a completed todo as pending and idle.
    ///
    /// Accumulated work time is kept.
    pub fn reopen(&self, now: DateTime<Utc>) -> Result<Self, TodoError> {
        if !self.status.is_complete() {
            return Err(self.invalid(Transition::Reopen));
        }

        let mut next = self.clone();
        next.status = TodoStatus::Pending;
        next.work_state = WorkState::Idle;
        next.last_state_change_at = Some(now);
        next.completed_at = None;
        next.updated_at = now;
        Ok(next)
    }

    /// Applies a partial update
    pub fn apply(&self, patch: &TodoPatch, now: DateTime<Utc>) -> Self {
        let mut next = self.clone();
        if let Some(title) = &patch.title {
            next.title = title.clone();
        }
        if let Some(description) = &patch.description {
            next.description = description.clone();
        }
        if let Some(priority) = patch.priority {
            next.priority = priority;
        }
        if let Some(project_id) = &patch.project_id {
            next.project_id = project_id.clone();
        }
        if let Some(due_date) = patch.due_date {
            next.due_date = due_date;
        }
        if let Some(status) = patch.status {
            next.status = status;
        }
        if let Some(work_state) = patch.work_state {
            next.work_state = work_state;
        }
        if let Some(total) = patch.total_work_time {
            next.total_work_time = total;
        }
        if let Some(last) = patch.last_state_change_at {
            next.last_state_change_at = last;
        }
        if let Some(completed_at) = patch.completed_at {
            next.completed_at = completed_at;
        }
        next.updated_at = now;
        next
    }

    /// Returns a copy depending on `dependency`. Already-present ids are kept once.
    pub fn with_dependency(&self, dependency: TodoId) -> Result<Self, TodoError> {
        if dependency == self.id {
            return Err(TodoError::SelfDependency(self.id.clone()));
        }
        let mut next = self.clone();
        if !next.dependencies.contains(&dependency) {
            next.dependencies.push(dependency);
        }
        Ok(next)
    }

    /// Returns a copy without `dependency`
    pub fn without_dependency(&self, dependency: &TodoId) -> Self {
        let mut next = self.clone();
        next.dependencies.retain(|id| id != dependency);
        next
    }

    /// Returns a copy listing `dependent` as depending on this todo
    pub fn with_dependent(&self, dependent: TodoId) -> Result<Self, TodoError> {
        if dependent == self.id {
            return Err(TodoError::SelfDependency(self.id.clone()));
        }
        let mut next = self.clone();
        if !next.dependents.contains(&dependent) {
            next.dependents.push(dependent);
        }
        Ok(next)
    }

    /// Returns a copy no longer listing `dependent`
    pub fn without_dependent(&self, dependent: &TodoId) -> Self {
        let mut next = self.clone();
        next.dependents.retain(|id| id != dependent);
        next
    }

    /// True iff every dependency is in `completed`. Vacuously true without dependencies.
    pub fn can_be_completed(&self, completed: &HashSet<TodoId>) -> bool {
        self.dependencies.iter().all(|id| completed.contains(id))
    }

    /// Dependencies not yet in `completed`, in dependency order
    pub fn pending_dependencies(&self, completed: &HashSet<TodoId>) -> Vec<TodoId> {
        self.dependencies
            .iter()
            .filter(|id| !completed.contains(*id))
            .cloned()
            .collect()
    }

    /// Accumulated plus running work time
    pub fn current_work_time(&self, now: DateTime<Utc>) -> u64 {
        work_time::current_work_time(self, now)
    }

    /// True if the due date has passed and the todo is still open
    pub fn is_overdue(&self, now: DateTime<Utc>) -> bool {
        !self.status.is_complete() && self.due_date.is_some_and(|due| due < now)
    }

    pub fn has_tag(&self, tag_id: &TagId) -> bool {
        self.tags.contains(tag_id)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{Duration, TimeZone};

    fn t0() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2025, 1, 1, 12, 0, 0).unwrap()
    }

    fn make_todo(title: &str) -> Todo {
        Todo::new(TodoId::generate(title, t0()), title, t0())
    }

    #[test]
    fn new_todo_defaults() {
        let todo = make_todo("Design");
        assert_eq!(todo.status, TodoStatus::Pending);
        assert_eq!(todo.work_state, WorkState::Idle);
        assert_eq!(todo.priority, Priority::Medium);
        assert_eq!(todo.total_work_time, 0);
        assert!(todo.dependencies.is_empty());
        assert!(todo.dependents.is_empty());
        assert!(todo.last_state_change_at.is_none());
    }

    #[test]
    fn start_sets_active_and_in_progress() {
        let todo = make_todo("Design");
        let started = todo.start(t0()).unwrap();

        assert_eq!(started.status, TodoStatus::InProgress);
        assert_eq!(started.work_state, WorkState::Active);
        assert_eq!(started.last_state_change_at, Some(t0()));
        // receiver untouched
        assert_eq!(todo.work_state, WorkState::Idle);
    }

    #[test]
    fn start_rejected_when_active_or_completed() {
        let active = make_todo("Design").start(t0()).unwrap();
        assert!(matches!(
            active.start(t0()),
            Err(TodoError::InvalidStateTransition {
                transition: Transition::Start,
                ..
            })
        ));

        let done = make_todo("Design").complete(t0()).unwrap();
        assert!(done.start(t0()).is_err());
    }

    #[test]
    fn pause_accrues_whole_seconds() {
        let active = make_todo("Design").start(t0()).unwrap();
        let paused = active.pause(t0() + Duration::seconds(42)).unwrap();

        assert_eq!(paused.work_state, WorkState::Paused);
        assert_eq!(paused.status, TodoStatus::InProgress);
        assert_eq!(paused.total_work_time, 42);
        assert_eq!(paused.last_state_change_at, Some(t0() + Duration::seconds(42)));
    }

    #[test]
    fn pause_floors_at_second_boundary() {
        let active = make_todo("Design").start(t0()).unwrap();
        let paused = active.pause(t0() + Duration::milliseconds(999)).unwrap();
        assert_eq!(paused.total_work_time, 0);

        let active = make_todo("Design").start(t0()).unwrap();
        let paused = active.pause(t0() + Duration::milliseconds(1999)).unwrap();
        assert_eq!(paused.total_work_time, 1);
    }

    #[test]
    fn pause_requires_active() {
        let todo = make_todo("Design");
        assert!(matches!(
            todo.pause(t0()),
            Err(TodoError::InvalidStateTransition {
                transition: Transition::Pause,
                work_state: WorkState::Idle,
                ..
            })
        ));
    }

    #[test]
    fn resume_keeps_status_and_accumulates_again() {
        let paused = make_todo("Design")
            .start(t0())
            .unwrap()
            .pause(t0() + Duration::seconds(10))
            .unwrap();

        let resumed = paused.resume(t0() + Duration::seconds(100)).unwrap();
        assert_eq!(resumed.work_state, WorkState::Active);
        assert_eq!(resumed.status, TodoStatus::InProgress);

        let paused_again = resumed.pause(t0() + Duration::seconds(130)).unwrap();
        assert_eq!(paused_again.total_work_time, 40);
    }

    #[test]
    fn resume_requires_paused() {
        let active = make_todo("Design").start(t0()).unwrap();
        assert!(active.resume(t0()).is_err());
        assert!(make_todo("Design").resume(t0()).is_err());
    }

    #[test]
    fn complete_from_active_banks_time() {
        let active = make_todo("Design").start(t0()).unwrap();
        let done = active.complete(t0() + Duration::seconds(3660)).unwrap();

        assert_eq!(done.status, TodoStatus::Completed);
        assert_eq!(done.work_state, WorkState::Completed);
        assert_eq!(done.total_work_time, 3660);
        assert_eq!(done.completed_at, Some(t0() + Duration::seconds(3660)));
    }

    #[test]
    fn complete_from_paused_does_not_double_count() {
        let paused = make_todo("Design")
            .start(t0())
            .unwrap()
            .pause(t0() + Duration::seconds(30))
            .unwrap();
        let done = paused.complete(t0() + Duration::seconds(500)).unwrap();

        assert_eq!(done.total_work_time, 30);
    }

    #[test]
    fn complete_twice_rejected() {
        let done = make_todo("Design").complete(t0()).unwrap();
        assert!(matches!(
            done.complete(t0()),
            Err(TodoError::InvalidStateTransition {
                transition: Transition::Complete,
                ..
            })
        ));
    }

    #[test]
    fn reopen_resets_to_pending_idle() {
        let done = make_todo("Design")
            .start(t0())
            .unwrap()
            .complete(t0() + Duration::seconds(5))
            .unwrap();
        let reopened = done.reopen(t0() + Duration::seconds(6)).unwrap();

        assert_eq!(reopened.status, TodoStatus::Pending);
        assert_eq!(reopened.work_state, WorkState::Idle);
        assert!(reopened.completed_at.is_none());
        assert_eq!(reopened.total_work_time, 5);
    }

    #[test]
    fn reopen_requires_completed() {
        let todo = make_todo("Design");
        assert!(matches!(
            todo.reopen(t0()),
            Err(TodoError::InvalidStateTransition {
                transition: Transition::Reopen,
                ..
            })
        ));
    }

    #[test]
    fn self_dependency_rejected() {
        let todo = make_todo("Design");
        assert_eq!(
            todo.with_dependency(todo.id.clone()),
            Err(TodoError::SelfDependency(todo.id.clone()))
        );
        assert!(todo.with_dependent(todo.id.clone()).is_err());
    }

    #[test]
    fn dependency_lists_stay_unique() {
        let a = make_todo("A");
        let b = make_todo("B");

        let b = b
            .with_dependency(a.id.clone())
            .unwrap()
            .with_dependency(a.id.clone())
            .unwrap();
        assert_eq!(b.dependencies, vec![a.id.clone()]);

        let b = b.without_dependency(&a.id);
        assert!(b.dependencies.is_empty());
    }

    #[test]
    fn can_be_completed_semantics() {
        let a = make_todo("A");
        let b = make_todo("B");
        let c = make_todo("C")
            .with_dependency(a.id.clone())
            .unwrap()
            .with_dependency(b.id.clone())
            .unwrap();

        assert!(a.can_be_completed(&HashSet::new()));
        assert!(!c.can_be_completed(&HashSet::new()));

        let only_a: HashSet<_> = [a.id.clone()].into_iter().collect();
        assert!(!c.can_be_completed(&only_a));
        assert_eq!(c.pending_dependencies(&only_a), vec![b.id.clone()]);

        let both: HashSet<_> = [a.id.clone(), b.id.clone()].into_iter().collect();
        assert!(c.can_be_completed(&both));
    }

    #[test]
    fn apply_patch_touches_only_given_fields() {
        let todo = make_todo("Design").with_description("old");
        let patch = TodoPatch {
            title: Some("Design v2".into()),
            description: Some(None),
            priority: Some(Priority::High),
            ..TodoPatch::default()
        };

        let later = t0() + Duration::minutes(1);
        let next = todo.apply(&patch, later);
        assert_eq!(next.title, "Design v2");
        assert!(next.description.is_none());
        assert_eq!(next.priority, Priority::High);
        assert_eq!(next.status, TodoStatus::Pending);
        assert_eq!(next.updated_at, later);
        assert_eq!(patch.changed_fields(), vec!["title", "description", "priority"]);
    }

    #[test]
    fn validate_rejects_blank_title() {
        let todo = make_todo("   ");
        assert_eq!(todo.validate(), Err(TodoError::EmptyTitle));
    }

    #[test]
    fn overdue_only_when_open() {
        let todo = make_todo("Ship").with_due_date(t0());
        assert!(todo.is_overdue(t0() + Duration::hours(1)));
        assert!(!todo.is_overdue(t0() - Duration::hours(1)));

        let done = todo.complete(t0()).unwrap();
        assert!(!done.is_overdue(t0() + Duration::hours(1)));
    }

    #[test]
    fn enum_text_roundtrip() {
        assert_eq!("in_progress".parse::<TodoStatus>(), Ok(TodoStatus::InProgress));
        assert_eq!("paused".parse::<WorkState>(), Ok(WorkState::Paused));
        assert_eq!("high".parse::<Priority>(), Ok(Priority::High));
        assert!("urgent".parse::<Priority>().is_err());
        assert_eq!(TodoStatus::Completed.to_string(), "completed");
    }
}
