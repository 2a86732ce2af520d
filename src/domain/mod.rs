//! Domain models for todo-cli

mod activity;
mod filter;
mod graph;
mod id;
mod project;
mod subtask;
mod tag;
mod todo;
mod tree;
pub mod work_time;

pub use activity::{ActivityKind, TodoActivity};
pub use filter::{DueFilter, TodoFilter};
pub use graph::{path_exists, DependencyGraph, GraphError};
pub use id::{ActivityId, IdError, ProjectId, SubtaskId, TagId, TodoId};
pub use project::{Project, ProjectPatch, StatusCounts};
pub use subtask::Subtask;
pub use tag::Tag;
pub use todo::{
    ParseEnumError, Priority, Todo, TodoError, TodoPatch, TodoStatus, Transition, WorkState,
};
pub use tree::{build_tree, DependencyTreeNode, DEFAULT_MAX_DEPTH};
pub use work_time::{current_work_time, format_duration};
