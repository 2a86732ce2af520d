//! Tag CLI commands

use anyhow::Result;
use clap::Subcommand;

use super::output::Output;
use super::session::Session;
use crate::domain::TodoId;

#[derive(Subcommand)]
pub enum TagCommands {
    /// Create a tag
    Add {
        name: String,

        #[arg(long)]
        color: Option<String>,
    },

    /// List tags
    List,

    /// Delete a tag and unlink it from every todo
    Delete {
        /// Tag name or ID
        tag: String,
    },

    /// Attach a tag to a todo
    Attach {
        todo: TodoId,

        /// Tag name or ID
        tag: String,
    },

    /// Detach a tag from a todo
    Detach {
        todo: TodoId,

        /// Tag name or ID
        tag: String,
    },
}

pub fn run(cmd: TagCommands, output: &Output) -> Result<()> {
    let session = Session::open()?;
    let tags = session.tags();

    match cmd {
        TagCommands::Add { name, color } => {
            let tag = tags.create(&name, color)?;
            if output.is_json() {
                output.data(&tag);
            } else {
                output.success(&format!("Created tag: {} - {}", tag.id, tag.name));
            }
        }

        TagCommands::List => {
            let all = tags.list()?;
            if output.is_json() {
                output.data(&all);
            } else if all.is_empty() {
                println!("No tags");
            } else {
                for tag in all {
                    match &tag.color {
                        Some(color) => println!("{:<12} {} ({})", tag.id, tag.name, color),
                        None => println!("{:<12} {}", tag.id, tag.name),
                    }
                }
            }
        }

        TagCommands::Delete { tag } => {
            let deleted = tags.delete(&tag)?;
            if output.is_json() {
                output.data(&serde_json::json!({ "id": deleted.id, "deleted": true }));
            } else {
                output.success(&format!("Deleted tag: {}", deleted.name));
            }
        }

        TagCommands::Attach { todo, tag } => {
            let tag = tags.resolve(&tag)?;
            let changed = session.todos().attach_tag(&todo, &tag.id)?;
            if output.is_json() {
                output.data(&serde_json::json!({
                    "todo": todo,
                    "tag": tag.id,
                    "changed": changed,
                }));
            } else if changed {
                output.success(&format!("Tagged {} with {}", todo, tag.name));
            } else {
                output.success(&format!("{} already tagged with {}", todo, tag.name));
            }
        }

        TagCommands::Detach { todo, tag } => {
            let tag = tags.resolve(&tag)?;
            let changed = session.todos().detach_tag(&todo, &tag.id)?;
            if output.is_json() {
                output.data(&serde_json::json!({
                    "todo": todo,
                    "tag": tag.id,
                    "changed": changed,
                }));
            } else if changed {
                output.success(&format!("Removed tag {} from {}", tag.name, todo));
            } else {
                output.success(&format!("{} was not tagged with {}", todo, tag.name));
            }
        }
    }

    Ok(())
}
