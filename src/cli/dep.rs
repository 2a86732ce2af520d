//! Dependency CLI commands

use anyhow::Result;
use clap::Subcommand;

use super::output::Output;
use super::session::Session;
use crate::domain::{DependencyTreeNode, TodoId};

#[derive(Subcommand)]
pub enum DepCommands {
    /// Make TODO depend on DEPENDENCY
    Add {
        /// Todo that will be blocked
        todo: TodoId,

        /// Todo that must be completed first
        dependency: TodoId,
    },

    /// Remove a dependency
    #[command(alias = "remove")]
    Rm { todo: TodoId, dependency: TodoId },

    /// List direct dependencies and dependents of a todo
    List { id: TodoId },

    /// Show the dependency tree of a todo
    Tree {
        id: TodoId,

        /// Levels to expand (defaults to the workspace setting)
        #[arg(long)]
        depth: Option<usize>,
    },

    /// Check whether adding a dependency would create a cycle
    Check { todo: TodoId, dependency: TodoId },

    /// Show open todos whose dependencies are all completed
    Ready,

    /// Show open todos waiting on dependencies
    Blocked,

    /// Show all todos, dependencies first
    Order,
}

pub fn run(cmd: DepCommands, output: &Output) -> Result<()> {
    let session = Session::open()?;
    let deps = session.dependencies();

    match cmd {
        DepCommands::Add { todo, dependency } => {
            deps.add_dependency(&todo, &dependency)?;
            if output.is_json() {
                output.data(&serde_json::json!({ "todo": todo, "dependency": dependency }));
            } else {
                output.success(&format!("{} now depends on {}", todo, dependency));
            }
        }

        DepCommands::Rm { todo, dependency } => {
            deps.remove_dependency(&todo, &dependency)?;
            if output.is_json() {
                output.data(&serde_json::json!({
                    "todo": todo,
                    "dependency": dependency,
                    "removed": true,
                }));
            } else {
                output.success(&format!("{} no longer depends on {}", todo, dependency));
            }
        }

        DepCommands::List { id } => {
            let dependencies = deps.dependencies(&id)?;
            let dependents = deps.dependents(&id)?;

            if output.is_json() {
                output.data(&serde_json::json!({
                    "id": id,
                    "dependencies": dependencies,
                    "dependents": dependents,
                }));
            } else {
                println!("Depends on ({}):", dependencies.len());
                for todo in &dependencies {
                    println!("  {:<12} {:<12} {}", todo.id, todo.status, todo.title);
                }
                println!("Depended on by ({}):", dependents.len());
                for todo in &dependents {
                    println!("  {:<12} {:<12} {}", todo.id, todo.status, todo.title);
                }
            }
        }

        DepCommands::Tree { id, depth } => {
            let depth = depth.unwrap_or(session.config().tree_max_depth);
            let tree = deps.tree(&id, depth)?;

            if output.is_json() {
                output.data(&tree);
            } else {
                let mut lines = Vec::new();
                render_tree(&tree, "", true, true, &mut lines);
                for line in lines {
                    println!("{}", line);
                }
            }
        }

        DepCommands::Check { todo, dependency } => {
            let cycle = deps.would_create_cycle(&todo, &dependency)?;
            if output.is_json() {
                output.data(&serde_json::json!({
                    "todo": todo,
                    "dependency": dependency,
                    "would_create_cycle": cycle,
                }));
            } else if cycle {
                println!(
                    "Adding {} as a dependency of {} would create a cycle",
                    dependency, todo
                );
            } else {
                println!("{} can depend on {}", todo, dependency);
            }
        }

        DepCommands::Ready => {
            let ready = deps.ready()?;
            if output.is_json() {
                output.data(&ready);
            } else if ready.is_empty() {
                println!("No todos ready to work on.");
            } else {
                println!("Ready todos ({}):", ready.len());
                println!("{:<12} {:<8} TITLE", "ID", "PRIORITY");
                println!("{}", "-".repeat(60));
                for todo in ready {
                    println!("{:<12} {:<8} {}", todo.id, todo.priority, todo.title);
                }
            }
        }

        DepCommands::Blocked => {
            let blocked = deps.blocked()?;
            if output.is_json() {
                output.data(&blocked);
            } else if blocked.is_empty() {
                println!("No blocked todos.");
            } else {
                println!("Blocked todos ({}):", blocked.len());
                println!("{:<12} {:<30} BLOCKED BY", "ID", "TITLE");
                println!("{}", "-".repeat(70));
                for entry in blocked {
                    let blockers: Vec<&str> =
                        entry.blocked_by.iter().map(TodoId::as_str).collect();
                    println!(
                        "{:<12} {:<30} {}",
                        entry.todo.id,
                        entry.todo.title,
                        blockers.join(", ")
                    );
                }
            }
        }

        DepCommands::Order => {
            let order = deps.order()?;
            if output.is_json() {
                output.data(&order);
            } else {
                for (position, todo) in order.iter().enumerate() {
                    println!(
                        "{:>3}. {:<12} {:<12} {}",
                        position + 1,
                        todo.id,
                        todo.status,
                        todo.title
                    );
                }
            }
        }
    }

    Ok(())
}

/// Renders a tree with box-drawing connectors, one line per node
fn render_tree(
    node: &DependencyTreeNode,
    prefix: &str,
    is_root: bool,
    is_last: bool,
    lines: &mut Vec<String>,
) {
    let label = format!("{} [{}] {}", node.id, node.status, node.title);
    let child_prefix = if is_root {
        lines.push(label);
        String::new()
    } else {
        let connector = if is_last { "└── " } else { "├── " };
        lines.push(format!("{}{}{}", prefix, connector, label));
        format!("{}{}", prefix, if is_last { "    " } else { "│   " })
    };

    let count = node.dependencies.len();
    for (i, child) in node.dependencies.iter().enumerate() {
        render_tree(child, &child_prefix, false, i + 1 == count, lines);
    }
}
