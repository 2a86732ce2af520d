//! Subtask CLI commands

use anyhow::Result;
use clap::Subcommand;

use super::output::Output;
use super::session::Session;
use crate::domain::{SubtaskId, TodoId};

#[derive(Subcommand)]
pub enum SubtaskCommands {
    /// Add a subtask at the end of a todo's checklist
    Add { todo: TodoId, title: String },

    /// List the subtasks of a todo
    List { todo: TodoId },

    /// Flip a subtask between done and not done
    Toggle { id: SubtaskId },

    Rename { id: SubtaskId, title: String },

    Delete { id: SubtaskId },
}

pub fn run(cmd: SubtaskCommands, output: &Output) -> Result<()> {
    let session = Session::open()?;
    let subtasks = session.subtasks();

    match cmd {
        SubtaskCommands::Add { todo, title } => {
            let subtask = subtasks.add(&todo, &title)?;
            if output.is_json() {
                output.data(&subtask);
            } else {
                output.success(&format!("Added subtask: {} - {}", subtask.id, subtask.title));
            }
        }

        SubtaskCommands::List { todo } => {
            let all = subtasks.list(&todo)?;
            if output.is_json() {
                output.data(&all);
            } else if all.is_empty() {
                println!("No subtasks for {}", todo);
            } else {
                let done = all.iter().filter(|s| s.completed).count();
                println!("Subtasks ({}/{} done):", done, all.len());
                for subtask in all {
                    let mark = if subtask.completed { "x" } else { " " };
                    println!("  [{}] {:<12} {}", mark, subtask.id, subtask.title);
                }
            }
        }

        SubtaskCommands::Toggle { id } => {
            let subtask = subtasks.toggle(&id)?;
            if output.is_json() {
                output.data(&subtask);
            } else {
                let state = if subtask.completed { "done" } else { "not done" };
                output.success(&format!("Subtask {} marked {}", subtask.id, state));
            }
        }

        SubtaskCommands::Rename { id, title } => {
            let subtask = subtasks.rename(&id, &title)?;
            if output.is_json() {
                output.data(&subtask);
            } else {
                output.success(&format!("Renamed subtask: {} - {}", subtask.id, subtask.title));
            }
        }

        SubtaskCommands::Delete { id } => {
            subtasks.delete(&id)?;
            if output.is_json() {
                output.data(&serde_json::json!({ "id": id, "deleted": true }));
            } else {
                output.success(&format!("Deleted subtask: {}", id));
            }
        }
    }

    Ok(())
}
