//! Project CLI commands

use anyhow::Result;
use clap::Subcommand;

use super::output::Output;
use super::session::Session;
use crate::domain::ProjectPatch;

#[derive(Subcommand)]
pub enum ProjectCommands {
    /// Create a project
    Add {
        name: String,

        #[arg(long, short = 'd')]
        description: Option<String>,
    },

    /// List projects
    List,

    /// Show a project with todo counts
    Show {
        /// Project name or ID
        project: String,
    },

    /// Rename a project and optionally change its description
    Rename {
        /// Project name or ID
        project: String,

        /// New name
        name: String,

        #[arg(long, short = 'd')]
        description: Option<String>,
    },

    /// Delete a project. Its todos are kept.
    Delete {
        /// Project name or ID
        project: String,
    },
}

pub fn run(cmd: ProjectCommands, output: &Output) -> Result<()> {
    let session = Session::open()?;
    let projects = session.projects();

    match cmd {
        ProjectCommands::Add { name, description } => {
            let project = projects.create(&name, description)?;
            if output.is_json() {
                output.data(&project);
            } else {
                output.success(&format!("Created project: {} - {}", project.id, project.name));
            }
        }

        ProjectCommands::List => {
            let all = projects.list()?;
            if output.is_json() {
                output.data(&all);
            } else if all.is_empty() {
                println!("No projects");
            } else {
                println!("{:<12} NAME", "ID");
                println!("{}", "-".repeat(40));
                for project in all {
                    println!("{:<12} {}", project.id, project.name);
                }
            }
        }

        ProjectCommands::Show { project } => {
            let summary = projects.get(&project)?;
            if output.is_json() {
                output.data(&summary);
            } else {
                println!("Project: {}", summary.project.id);
                println!("Name: {}", summary.project.name);
                if let Some(desc) = &summary.project.description {
                    println!("Description: {}", desc);
                }
                println!(
                    "Todos: {} total, {} pending, {} in progress, {} completed",
                    summary.counts.total(),
                    summary.counts.pending,
                    summary.counts.in_progress,
                    summary.counts.completed
                );
            }
        }

        ProjectCommands::Rename {
            project,
            name,
            description,
        } => {
            let patch = ProjectPatch {
                name: Some(name),
                description: description.map(Some),
            };
            let updated = projects.update(&project, patch)?;
            if output.is_json() {
                output.data(&updated);
            } else {
                output.success(&format!("Renamed project {} to {}", updated.id, updated.name));
            }
        }

        ProjectCommands::Delete { project } => {
            let deleted = projects.delete(&project)?;
            if output.is_json() {
                output.data(&serde_json::json!({ "id": deleted.id, "deleted": true }));
            } else {
                output.success(&format!("Deleted project: {} - {}", deleted.id, deleted.name));
            }
        }
    }

    Ok(())
}
