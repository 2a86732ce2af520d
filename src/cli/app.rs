//! Main CLI application structure

use std::env;
use std::path::PathBuf;
use std::process::ExitCode;

use anyhow::Result;
use clap::{Parser, Subcommand};
use tracing::{debug, warn};
use tracing_subscriber::prelude::*;
use tracing_subscriber::{fmt, EnvFilter};

use super::output::Output;
use super::{dep, project, subtask, tag, todo};
use crate::domain::{IdError, TodoId, Transition};
use crate::service::ServiceError;
use crate::storage::{Config, OutputFormat, Workspace};

#[derive(Parser)]
#[command(name = "todo")]
#[command(author, version, about = "Local todo tracker with dependencies and work timing")]
#[command(propagate_version = true)]
pub struct Cli {
    /// Output format (defaults to the global config, then text)
    #[arg(long, short = 'f', global = true)]
    pub format: Option<OutputFormat>,

    /// Enable debug logging on stderr
    #[arg(long, short = 'v', global = true)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Initialize a todo workspace
    Init {
        /// Path to initialize (defaults to current directory)
        #[arg(default_value = ".")]
        path: PathBuf,
    },

    /// Add a todo
    Add(todo::AddArgs),

    /// List todos
    List(todo::ListArgs),

    /// Show todo details
    Show { id: TodoId },

    /// Change a todo's title, description, priority, project or due date
    Update(todo::UpdateArgs),

    /// Delete a todo with its dependencies, subtasks and activity
    Delete { id: TodoId },

    /// Start working on a todo
    Start { id: TodoId },

    /// Pause active work
    Pause { id: TodoId },

    /// Resume paused work
    Resume { id: TodoId },

    /// Mark a todo as completed
    #[command(alias = "complete")]
    Done { id: TodoId },

    /// Reopen a completed todo
    Reopen { id: TodoId },

    /// Show tracked work time
    Time { id: TodoId },

    /// Show the activity log of a todo, newest first
    Activity { id: TodoId },

    /// Manage dependencies between todos
    #[command(subcommand)]
    Dep(dep::DepCommands),

    /// Manage projects
    #[command(subcommand)]
    Project(project::ProjectCommands),

    /// Manage tags
    #[command(subcommand)]
    Tag(tag::TagCommands),

    /// Manage subtasks
    #[command(subcommand)]
    Subtask(subtask::SubtaskCommands),
}

fn init_tracing(verbose: bool) {
    let filter = EnvFilter::try_from_env("TODO_LOG").unwrap_or_else(|_| {
        EnvFilter::new(if verbose {
            "todo_cli=debug"
        } else {
            "todo_cli=warn"
        })
    });

    let format = env::var("TODO_LOG_FORMAT").unwrap_or_else(|_| "compact".to_string());

    let registry = tracing_subscriber::registry().with(filter);

    match format.as_str() {
        "json" => {
            registry
                .with(fmt::layer().json().with_ansi(false).with_writer(std::io::stderr))
                .init();
        }
        _ => {
            registry
                .with(fmt::layer().compact().with_writer(std::io::stderr))
                .init();
        }
    }
}

/// `--format` wins, then the global config, then text
fn resolve_format(flag: Option<OutputFormat>) -> OutputFormat {
    if let Some(format) = flag {
        return format;
    }

    match Config::load_global() {
        Ok(global) => global.default_format,
        Err(e) => {
            warn!(error = ?e, "ignoring unreadable global config");
            OutputFormat::default()
        }
    }
}

/// Exit code for a failed command
pub fn exit_code(err: &anyhow::Error) -> u8 {
    if let Some(service) = err.downcast_ref::<ServiceError>() {
        return service.exit_code();
    }
    if err.downcast_ref::<IdError>().is_some() {
        return 2;
    }
    1
}

/// Main entry point for the CLI
pub fn run() -> ExitCode {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    let output = Output::new(resolve_format(cli.format));

    match execute(cli.command, &output) {
        Ok(()) => {
            debug!("command completed");
            ExitCode::SUCCESS
        }
        Err(err) => {
            output.error(&err);
            ExitCode::from(exit_code(&err))
        }
    }
}

fn execute(command: Commands, output: &Output) -> Result<()> {
    match command {
        Commands::Init { path } => {
            let workspace = Workspace::init(path)?;
            output.success(&format!(
                "Initialized todo workspace at {}",
                workspace.root().display()
            ));
            Ok(())
        }

        Commands::Add(args) => todo::add(output, args),
        Commands::List(args) => todo::list(output, args),
        Commands::Show { id } => todo::show(output, &id),
        Commands::Update(args) => todo::update(output, args),
        Commands::Delete { id } => todo::delete(output, &id),

        Commands::Start { id } => todo::transition(output, &id, Transition::Start),
        Commands::Pause { id } => todo::transition(output, &id, Transition::Pause),
        Commands::Resume { id } => todo::transition(output, &id, Transition::Resume),
        Commands::Done { id } => todo::transition(output, &id, Transition::Complete),
        Commands::Reopen { id } => todo::transition(output, &id, Transition::Reopen),

        Commands::Time { id } => todo::time(output, &id),
        Commands::Activity { id } => todo::activity(output, &id),

        Commands::Dep(cmd) => dep::run(cmd, output),
        Commands::Project(cmd) => project::run(cmd, output),
        Commands::Tag(cmd) => tag::run(cmd, output),
        Commands::Subtask(cmd) => subtask::run(cmd, output),
    }
}
