//! Todo list filters
//!
//! [`TodoFilter`] holds the column filters a repository can evaluate on its
//! own. [`DueFilter`] depends on the current time and is applied by the
//! service layer on top of the repository result.

use chrono::{DateTime, Duration, Utc};

use super::id::{ProjectId, TagId};
use super::todo::{Priority, Todo, TodoStatus};

/// Column filters for listing todos
#[derive(Debug, Clone, Default, PartialEq)]
pub struct TodoFilter {
    pub status: Option<TodoStatus>,
    pub priority: Option<Priority>,
    pub project_id: Option<ProjectId>,
    pub tag_id: Option<TagId>,
}

impl TodoFilter {
    pub fn matches(&self, todo: &Todo) -> bool {
        self.status.map_or(true, |s| todo.status == s)
            && self.priority.map_or(true, |p| todo.priority == p)
            && self
                .project_id
                .as_ref()
                .map_or(true, |p| todo.project_id.as_ref() == Some(p))
            && self.tag_id.as_ref().map_or(true, |t| todo.has_tag(t))
    }
}

/// Due-date filter, evaluated against a reference time
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DueFilter {
    /// Due before now and not completed
    Overdue,
    /// Due within the current UTC day
    DueToday,
    /// Due between now and now + the given number of days
    DueWithin(u32),
}

impl DueFilter {
    pub fn matches(&self, todo: &Todo, now: DateTime<Utc>) -> bool {
        let Some(due) = todo.due_date else {
            return false;
        };

        match self {
            DueFilter::Overdue => todo.is_overdue(now),
            DueFilter::DueToday => due.date_naive() == now.date_naive(),
            DueFilter::DueWithin(days) => {
                // a window reaching past the last representable date is unbounded
                let end = Duration::try_days(i64::from(*days))
                    .and_then(|window| now.checked_add_signed(window));
                due >= now && end.map_or(true, |end| due <= end)
            }
        }
    }
}
