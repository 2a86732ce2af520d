//! # Services
//!
//! Use cases over the repository traits. Each service owns the repositories
//! it needs (cheap `Copy` handles) and a [`Clock`], checks every precondition
//! before writing, and reports failures as [`ServiceError`].
//!
//! | Service | Covers |
//! |---------|--------|
//! | [`TodoService`] | CRUD, state transitions, work time, tagging, activity log |
//! | [`DependencyService`] | Edges, cycle checks, trees, ready/blocked/order |
//! | [`ProjectService`] | Projects and per-status counts |
//! | [`TagService`] | Tag CRUD |
//! | [`SubtaskService`] | Checklist items of a todo |

mod clock;
mod dependency_service;
mod error;
mod project_service;
mod subtask_service;
mod tag_service;
mod todo_service;

pub use clock::{Clock, ManualClock, SystemClock};
pub use dependency_service::{BlockedTodo, DependencyService};
pub use error::{ServiceError, ServiceResult};
pub use project_service::{ProjectService, ProjectSummary};
pub use subtask_service::SubtaskService;
pub use tag_service::TagService;
pub use todo_service::{NewTodo, TodoService, WorkTimeReport};
