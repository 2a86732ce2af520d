//! Dependency tree projection
//!
//! Expands a todo's dependencies recursively into a bounded-depth tree. Each
//! branch carries its own visited set (the path from the root), so a todo
//! reached again on the same branch becomes a leaf instead of recursing,
//! while the same todo reached through a sibling branch is still expanded.

use std::collections::HashSet;

use serde::Serialize;

use super::id::TodoId;
use super::todo::{Priority, Todo, TodoStatus};

/// Default maximum expansion depth
pub const DEFAULT_MAX_DEPTH: usize = 10;

/// A node in a dependency tree. Built on demand, never persisted.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DependencyTreeNode {
    pub id: TodoId,
    pub title: String,
    pub status: TodoStatus,
    pub priority: Priority,
    pub dependencies: Vec<DependencyTreeNode>,
}

impl DependencyTreeNode {
    fn leaf(todo: &Todo) -> Self {
        Self {
            id: todo.id.clone(),
            title: todo.title.clone(),
            status: todo.status,
            priority: todo.priority,
            dependencies: Vec::new(),
        }
    }

    /// Number of nodes in this subtree, including this one
    pub fn node_count(&self) -> usize {
        1 + self
            .dependencies
            .iter()
            .map(DependencyTreeNode::node_count)
            .sum::<usize>()
    }

    /// Number of levels below this node
    pub fn height(&self) -> usize {
        self.dependencies
            .iter()
            .map(|child| child.height() + 1)
            .max()
            .unwrap_or(0)
    }
}

/// Builds the dependency tree rooted at `root`.
///
/// `lookup` resolves dependency ids; ids it cannot resolve are skipped.
/// At `max_depth == 0` the root comes back without children.
pub fn build_tree<F, E>(root: &Todo, max_depth: usize, mut lookup: F) -> Result<DependencyTreeNode, E>
where
    F: FnMut(&TodoId) -> Result<Option<Todo>, E>,
{
    let visited = HashSet::from([root.id.clone()]);
    expand(root, max_depth, &visited, &mut lookup)
}

fn expand<F, E>(
    todo: &Todo,
    depth: usize,
    visited: &HashSet<TodoId>,
    lookup: &mut F,
) -> Result<DependencyTreeNode, E>
where
    F: FnMut(&TodoId) -> Result<Option<Todo>, E>,
{
    let mut node = DependencyTreeNode::leaf(todo);
    if depth == 0 {
        return Ok(node);
    }

    for dep_id in &todo.dependencies {
        let Some(dependency) = lookup(dep_id)? else {
            continue;
        };

        if visited.contains(dep_id) {
            node.dependencies.push(DependencyTreeNode::leaf(&dependency));
            continue;
        }

        let mut branch = visited.clone();
        branch.insert(dep_id.clone());
        node.dependencies
            .push(expand(&dependency, depth - 1, &branch, lookup)?);
    }

    Ok(node)
}
