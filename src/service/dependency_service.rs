//! Dependency use cases
//!
//! Edge edits go through the repository one at a time and are checked for
//! cycles against the stored graph. Whole-graph queries (ready, blocked,
//! order) load every todo into a [`DependencyGraph`].

use std::collections::{HashMap, HashSet};

use serde::Serialize;
use tracing::{debug, info};

use super::clock::{Clock, SystemClock};
use super::error::{ServiceError, ServiceResult};
use crate::domain::{
    build_tree, ActivityKind, DependencyGraph, DependencyTreeNode, Todo, TodoActivity,
    TodoFilter, TodoId, TodoStatus,
};
use crate::storage::{ActivityRepository, StorageError, TodoRepository};

/// A todo together with the open dependencies holding it back
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct BlockedTodo {
    pub todo: Todo,
    pub blocked_by: Vec<TodoId>,
}

pub struct DependencyService<T, A, C = SystemClock> {
    todos: T,
    activities: A,
    clock: C,
}

impl<T, A, C> DependencyService<T, A, C>
where
    T: TodoRepository,
    A: ActivityRepository,
    C: Clock,
{
    pub fn new(todos: T, activities: A, clock: C) -> Self {
        Self {
            todos,
            activities,
            clock,
        }
    }

    fn require(&self, id: &TodoId) -> ServiceResult<Todo> {
        self.todos
            .find_by_id(id)?
            .ok_or_else(|| ServiceError::todo_not_found(id))
    }

    /// Makes `todo_id` depend on `dependency_id`
    pub fn add_dependency(&self, todo_id: &TodoId, dependency_id: &TodoId) -> ServiceResult<()> {
        if todo_id == dependency_id {
            return Err(ServiceError::SelfDependency(todo_id.clone()));
        }
        self.require(todo_id)?;
        self.require(dependency_id)?;

        if self.todos.has_dependency(todo_id, dependency_id)? {
            return Err(ServiceError::DependencyExists {
                todo_id: todo_id.clone(),
                dependency_id: dependency_id.clone(),
            });
        }
        if self.todos.would_create_cycle(todo_id, dependency_id)? {
            return Err(ServiceError::DependencyCycle {
                todo_id: todo_id.clone(),
                dependency_id: dependency_id.clone(),
            });
        }

        self.todos.atomically(|| -> ServiceResult<()> {
            self.todos.add_dependency(todo_id, dependency_id)?;
            self.activities.append(&TodoActivity::record(
                todo_id,
                ActivityKind::DependencyAdded,
                Some(dependency_id.to_string()),
                self.clock.now(),
            ))?;
            Ok(())
        })?;

        info!(todo_id = %todo_id, dependency_id = %dependency_id, "added dependency");
        Ok(())
    }

    pub fn remove_dependency(
        &self,
        todo_id: &TodoId,
        dependency_id: &TodoId,
    ) -> ServiceResult<()> {
        self.require(todo_id)?;

        self.todos.atomically(|| -> ServiceResult<()> {
            if !self.todos.remove_dependency(todo_id, dependency_id)? {
                return Err(ServiceError::DependencyNotFound {
                    todo_id: todo_id.clone(),
                    dependency_id: dependency_id.clone(),
                });
            }
            self.activities.append(&TodoActivity::record(
                todo_id,
                ActivityKind::DependencyRemoved,
                Some(dependency_id.to_string()),
                self.clock.now(),
            ))?;
            Ok(())
        })?;

        info!(todo_id = %todo_id, dependency_id = %dependency_id, "removed dependency");
        Ok(())
    }

    /// Todos that `todo_id` depends on, in the order they were added
    pub fn dependencies(&self, todo_id: &TodoId) -> ServiceResult<Vec<Todo>> {
        let todo = self.require(todo_id)?;
        self.resolve(&todo.dependencies)
    }

    /// Todos that depend on `todo_id`
    pub fn dependents(&self, todo_id: &TodoId) -> ServiceResult<Vec<Todo>> {
        let todo = self.require(todo_id)?;
        self.resolve(&todo.dependents)
    }

    fn resolve(&self, ids: &[TodoId]) -> ServiceResult<Vec<Todo>> {
        let mut todos = Vec::with_capacity(ids.len());
        for id in ids {
            if let Some(todo) = self.todos.find_by_id(id)? {
                todos.push(todo);
            }
        }
        Ok(todos)
    }

    /// True if adding the edge would close a cycle. A self edge counts as one.
    pub fn would_create_cycle(
        &self,
        todo_id: &TodoId,
        dependency_id: &TodoId,
    ) -> ServiceResult<bool> {
        if todo_id == dependency_id {
            return Ok(true);
        }
        Ok(self.todos.would_create_cycle(todo_id, dependency_id)?)
    }

    /// True when every dependency of `todo_id` is completed
    pub fn can_be_completed(&self, todo_id: &TodoId) -> ServiceResult<bool> {
        let todo = self.require(todo_id)?;

        let mut completed = HashSet::new();
        for dependency in self.resolve(&todo.dependencies)? {
            if dependency.status.is_complete() {
                completed.insert(dependency.id);
            }
        }
        Ok(todo.can_be_completed(&completed))
    }

    /// Dependency tree rooted at `todo_id`, expanded at most `max_depth` levels
    pub fn tree(&self, todo_id: &TodoId, max_depth: usize) -> ServiceResult<DependencyTreeNode> {
        let root = self.require(todo_id)?;
        let tree = build_tree(&root, max_depth, |id| self.todos.find_by_id(id))?;

        debug!(
            todo_id = %todo_id,
            nodes = tree.node_count(),
            height = tree.height(),
            "built dependency tree"
        );
        Ok(tree)
    }

    fn load_graph(&self) -> ServiceResult<(Vec<Todo>, DependencyGraph)> {
        let todos = self.todos.find_all(&TodoFilter::default())?;
        let graph = DependencyGraph::from_todos(&todos)?;
        Ok((todos, graph))
    }

    fn statuses(todos: &[Todo]) -> HashMap<TodoId, TodoStatus> {
        todos
            .iter()
            .map(|todo| (todo.id.clone(), todo.status))
            .collect()
    }

    /// Open todos whose dependencies are all completed, in creation order
    pub fn ready(&self) -> ServiceResult<Vec<Todo>> {
        let (todos, graph) = self.load_graph()?;
        let ready: HashSet<TodoId> = graph
            .ready_todos(&Self::statuses(&todos))
            .into_iter()
            .collect();

        Ok(todos
            .into_iter()
            .filter(|todo| ready.contains(&todo.id))
            .collect())
    }

    /// Open todos with at least one open dependency, in creation order
    pub fn blocked(&self) -> ServiceResult<Vec<BlockedTodo>> {
        let (todos, graph) = self.load_graph()?;
        let mut blocked: HashMap<TodoId, Vec<TodoId>> = graph
            .blocked_todos(&Self::statuses(&todos))
            .into_iter()
            .collect();

        Ok(todos
            .into_iter()
            .filter_map(|todo| {
                blocked
                    .remove(&todo.id)
                    .map(|blocked_by| BlockedTodo { todo, blocked_by })
            })
            .collect())
    }

    /// Every todo, dependencies before dependents
    pub fn order(&self) -> ServiceResult<Vec<Todo>> {
        let (todos, graph) = self.load_graph()?;
        let mut by_id: HashMap<TodoId, Todo> = todos
            .into_iter()
            .map(|todo| (todo.id.clone(), todo))
            .collect();

        graph
            .topological_order()?
            .into_iter()
            .map(|id| {
                by_id.remove(&id).ok_or_else(|| {
                    ServiceError::Storage(StorageError::InvalidData(format!(
                        "dependency graph references unknown todo {id}"
                    )))
                })
            })
            .collect()
    }
}
