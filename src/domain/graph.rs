//! Dependency graph for todos
//!
//! Two pieces live here:
//!
//! - [`path_exists`], a storage-agnostic breadth-first walk that repositories
//!   use to answer "would this edge close a cycle?" against their own edge
//!   tables.
//! - [`DependencyGraph`], an in-memory petgraph view over a set of todos for
//!   whole-graph queries (ready, blocked, topological order).

use std::collections::{HashMap, HashSet, VecDeque};

use petgraph::algo::{has_path_connecting, toposort};
use petgraph::graph::{DiGraph, NodeIndex};
use thiserror::Error;

use super::id::TodoId;
use super::todo::{Todo, TodoStatus};

#[derive(Debug, Error, PartialEq)]
pub enum GraphError {
    #[error("Adding dependency would create a cycle: {0} -> {1}")]
    CycleDetected(TodoId, TodoId),

    #[error("Dependency graph contains a cycle through {0}")]
    CycleThrough(String),

    #[error("Todo not found: {0}")]
    TodoNotFound(TodoId),

    #[error("Self-dependency not allowed: {0}")]
    SelfDependency(TodoId),
}

/// Returns true if `target` is reachable from `start` by following `neighbors`.
///
/// Each node is expanded at most once, so corrupted (cyclic) edge data cannot
/// loop forever. `start == target` counts as reachable.
pub fn path_exists<F, E>(start: &TodoId, target: &TodoId, mut neighbors: F) -> Result<bool, E>
where
    F: FnMut(&TodoId) -> Result<Vec<TodoId>, E>,
{
    let mut visited: HashSet<TodoId> = HashSet::new();
    let mut queue = VecDeque::from([start.clone()]);

    while let Some(current) = queue.pop_front() {
        if &current == target {
            return Ok(true);
        }
        if !visited.insert(current.clone()) {
            continue;
        }
        for next in neighbors(&current)? {
            if !visited.contains(&next) {
                queue.push_back(next);
            }
        }
    }

    Ok(false)
}

/// A dependency graph for todos
#[derive(Debug, Default)]
pub struct DependencyGraph {
    /// Edge direction is dependency -> dependent
    graph: DiGraph<TodoId, ()>,

    node_map: HashMap<TodoId, NodeIndex>,
}

impl DependencyGraph {
    pub fn new() -> Self {
        Self {
            graph: DiGraph::new(),
            node_map: HashMap::new(),
        }
    }

    /// Builds a graph from a collection of todos using their dependency lists.
    ///
    /// Edges pointing at todos outside the collection are ignored.
    pub fn from_todos<'a>(todos: impl IntoIterator<Item = &'a Todo>) -> Result<Self, GraphError> {
        let mut graph = Self::new();

        let todos: Vec<_> = todos.into_iter().collect();
        for todo in &todos {
            graph.add_todo(todo.id.clone());
        }

        for todo in &todos {
            for dep_id in &todo.dependencies {
                if graph.contains(dep_id) {
                    graph.add_dependency(&todo.id, dep_id)?;
                }
            }
        }

        Ok(graph)
    }

    pub fn add_todo(&mut self, todo_id: TodoId) {
        if !self.node_map.contains_key(&todo_id) {
            let idx = self.graph.add_node(todo_id.clone());
            self.node_map.insert(todo_id, idx);
        }
    }

    fn index(&self, todo_id: &TodoId) -> Result<NodeIndex, GraphError> {
        self.node_map
            .get(todo_id)
            .copied()
            .ok_or_else(|| GraphError::TodoNotFound(todo_id.clone()))
    }

    /// Returns true if `todo` depending on `depends_on` would close a cycle
    pub fn would_create_cycle(&self, todo: &TodoId, depends_on: &TodoId) -> Result<bool, GraphError> {
        if todo == depends_on {
            return Ok(true);
        }
        let todo_idx = self.index(todo)?;
        let dep_idx = self.index(depends_on)?;

        // A path todo -> ... -> depends_on means depends_on already (transitively)
        // depends on todo.
        Ok(has_path_connecting(&self.graph, todo_idx, dep_idx, None))
    }

    /// Adds a dependency edge: `todo` depends on `depends_on`.
    ///
    /// The cycle check runs before the edge is inserted.
    pub fn add_dependency(&mut self, todo: &TodoId, depends_on: &TodoId) -> Result<(), GraphError> {
        if todo == depends_on {
            return Err(GraphError::SelfDependency(todo.clone()));
        }

        let todo_idx = self.index(todo)?;
        let dep_idx = self.index(depends_on)?;

        if self.would_create_cycle(todo, depends_on)? {
            return Err(GraphError::CycleDetected(todo.clone(), depends_on.clone()));
        }

        if self.graph.find_edge(dep_idx, todo_idx).is_none() {
            self.graph.add_edge(dep_idx, todo_idx, ());
        }
        Ok(())
    }

    pub fn remove_dependency(&mut self, todo: &TodoId, depends_on: &TodoId) -> bool {
        let (Ok(todo_idx), Ok(dep_idx)) = (self.index(todo), self.index(depends_on)) else {
            return false;
        };

        if let Some(edge) = self.graph.find_edge(dep_idx, todo_idx) {
            self.graph.remove_edge(edge);
            true
        } else {
            false
        }
    }

    /// Open todos whose dependencies are all completed
    pub fn ready_todos(&self, statuses: &HashMap<TodoId, TodoStatus>) -> Vec<TodoId> {
        let mut ready: Vec<TodoId> = self
            .node_map
            .keys()
            .filter(|todo_id| {
                let status = statuses.get(*todo_id).copied().unwrap_or_default();
                if status.is_complete() {
                    return false;
                }

                self.dependencies(todo_id)
                    .iter()
                    .all(|dep_id| statuses.get(dep_id).is_some_and(|s| s.is_complete()))
            })
            .cloned()
            .collect();
        ready.sort();
        ready
    }

    /// Open todos with at least one open dependency, paired with those blockers
    pub fn blocked_todos(&self, statuses: &HashMap<TodoId, TodoStatus>) -> Vec<(TodoId, Vec<TodoId>)> {
        let mut blocked: Vec<(TodoId, Vec<TodoId>)> = self
            .node_map
            .keys()
            .filter(|todo_id| {
                !statuses
                    .get(*todo_id)
                    .copied()
                    .unwrap_or_default()
                    .is_complete()
            })
            .filter_map(|todo_id| {
                let mut blockers: Vec<TodoId> = self
                    .dependencies(todo_id)
                    .into_iter()
                    .filter(|dep_id| !statuses.get(dep_id).is_some_and(|s| s.is_complete()))
                    .collect();
                if blockers.is_empty() {
                    None
                } else {
                    blockers.sort();
                    Some((todo_id.clone(), blockers))
                }
            })
            .collect();
        blocked.sort_by(|a, b| a.0.cmp(&b.0));
        blocked
    }

    /// Direct dependencies of a todo
    pub fn dependencies(&self, todo_id: &TodoId) -> Vec<TodoId> {
        let Ok(idx) = self.index(todo_id) else {
            return vec![];
        };

        self.graph
            .neighbors_directed(idx, petgraph::Direction::Incoming)
            .filter_map(|idx| self.graph.node_weight(idx).cloned())
            .collect()
    }

    /// Direct dependents of a todo (todos that depend on it)
    pub fn dependents(&self, todo_id: &TodoId) -> Vec<TodoId> {
        let Ok(idx) = self.index(todo_id) else {
            return vec![];
        };

        self.graph
            .neighbors_directed(idx, petgraph::Direction::Outgoing)
            .filter_map(|idx| self.graph.node_weight(idx).cloned())
            .collect()
    }

    /// All todos in topological order (dependencies before dependents)
    pub fn topological_order(&self) -> Result<Vec<TodoId>, GraphError> {
        match toposort(&self.graph, None) {
            Ok(order) => Ok(order
                .into_iter()
                .filter_map(|idx| self.graph.node_weight(idx).cloned())
                .collect()),
            Err(cycle) => Err(GraphError::CycleThrough(
                self.graph
                    .node_weight(cycle.node_id())
                    .map(ToString::to_string)
                    .unwrap_or_default(),
            )),
        }
    }

    pub fn contains(&self, todo_id: &TodoId) -> bool {
        self.node_map.contains_key(todo_id)
    }

    pub fn len(&self) -> usize {
        self.node_map.len()
    }

    pub fn is_empty(&self) -> bool {
        self.node_map.is_empty()
    }
}
