//! Todo CLI commands

use anyhow::Result;
use chrono::{DateTime, NaiveDate, Utc};
use clap::Args;

use super::output::Output;
use super::session::Session;
use crate::domain::{
    ActivityKind, DueFilter, Priority, TagId, Todo, TodoFilter, TodoId, TodoPatch, TodoStatus,
    Transition,
};
use crate::service::{NewTodo, ServiceResult};

/// Parses `YYYY-MM-DD` (end of that day, UTC) or an RFC 3339 timestamp
pub(crate) fn parse_due(raw: &str) -> Result<DateTime<Utc>, String> {
    if let Ok(at) = DateTime::parse_from_rfc3339(raw) {
        return Ok(at.with_timezone(&Utc));
    }

    NaiveDate::parse_from_str(raw, "%Y-%m-%d")
        .ok()
        .and_then(|date| date.and_hms_opt(23, 59, 59))
        .map(|at| at.and_utc())
        .ok_or_else(|| format!("invalid date '{raw}': expected YYYY-MM-DD or RFC 3339"))
}

#[derive(Args)]
pub struct AddArgs {
    /// Todo title
    title: String,

    #[arg(long, short = 'd')]
    description: Option<String>,

    /// low, medium or high (defaults to the workspace setting)
    #[arg(long, short = 'p')]
    priority: Option<Priority>,

    /// Project name or ID
    #[arg(long)]
    project: Option<String>,

    /// Due date (YYYY-MM-DD or RFC 3339)
    #[arg(long, value_parser = parse_due)]
    due: Option<DateTime<Utc>>,

    /// Tag name or ID (repeatable)
    #[arg(long = "tag", short = 't')]
    tags: Vec<String>,
}

#[derive(Args)]
pub struct ListArgs {
    #[arg(long)]
    status: Option<TodoStatus>,

    #[arg(long)]
    priority: Option<Priority>,

    /// Project name or ID
    #[arg(long)]
    project: Option<String>,

    /// Tag name or ID
    #[arg(long)]
    tag: Option<String>,

    /// Only open todos past their due date
    #[arg(long, conflicts_with_all = ["due_today", "due_within"])]
    overdue: bool,

    /// Only todos due today (UTC)
    #[arg(long, conflicts_with = "due_within")]
    due_today: bool,

    /// Only todos due in the next DAYS days
    #[arg(long, value_name = "DAYS")]
    due_within: Option<u32>,
}

impl ListArgs {
    fn due_filter(&self) -> Option<DueFilter> {
        if self.overdue {
            Some(DueFilter::Overdue)
        } else if self.due_today {
            Some(DueFilter::DueToday)
        } else {
            self.due_within.map(DueFilter::DueWithin)
        }
    }
}

#[derive(Args)]
pub struct UpdateArgs {
    id: TodoId,

    #[arg(long)]
    title: Option<String>,

    #[arg(long, conflicts_with = "clear_description")]
    description: Option<String>,

    #[arg(long)]
    clear_description: bool,

    #[arg(long)]
    priority: Option<Priority>,

    /// Project name or ID
    #[arg(long, conflicts_with = "no_project")]
    project: Option<String>,

    /// Detach from its project
    #[arg(long)]
    no_project: bool,

    /// Due date (YYYY-MM-DD or RFC 3339)
    #[arg(long, value_parser = parse_due, conflicts_with = "clear_due")]
    due: Option<DateTime<Utc>>,

    #[arg(long)]
    clear_due: bool,
}

fn resolve_tags(session: &Session, keys: &[String]) -> ServiceResult<Vec<TagId>> {
    let tags = session.tags();
    keys.iter()
        .map(|key| tags.resolve(key).map(|tag| tag.id))
        .collect()
}

fn due_label(todo: &Todo) -> String {
    todo.due_date
        .map(|due| due.format("%Y-%m-%d").to_string())
        .unwrap_or_else(|| "-".to_string())
}

pub fn add(output: &Output, args: AddArgs) -> Result<()> {
    let session = Session::open()?;

    let project_id = match args.project.as_deref() {
        Some(key) => Some(session.projects().resolve(key)?.id),
        None => None,
    };
    let tags = resolve_tags(&session, &args.tags)?;

    let todo = session.todos().create(NewTodo {
        title: args.title,
        description: args.description,
        priority: Some(args.priority.unwrap_or(session.config().default_priority)),
        project_id,
        due_date: args.due,
        tags,
    })?;

    if output.is_json() {
        output.data(&todo);
    } else {
        output.success(&format!("Created todo: {} - {}", todo.id, todo.title));
    }

    Ok(())
}

pub fn list(output: &Output, args: ListArgs) -> Result<()> {
    let session = Session::open()?;

    let filter = TodoFilter {
        status: args.status,
        priority: args.priority,
        project_id: match args.project.as_deref() {
            Some(key) => Some(session.projects().resolve(key)?.id),
            None => None,
        },
        tag_id: match args.tag.as_deref() {
            Some(key) => Some(session.tags().resolve(key)?.id),
            None => None,
        },
    };
    let todos = session.todos().list(&filter, args.due_filter())?;

    if output.is_json() {
        output.data(&todos);
    } else if todos.is_empty() {
        println!("No todos");
    } else {
        println!(
            "{:<12} {:<12} {:<8} {:<10} TITLE",
            "ID", "STATUS", "PRIORITY", "DUE"
        );
        println!("{}", "-".repeat(70));
        for todo in todos {
            println!(
                "{:<12} {:<12} {:<8} {:<10} {}",
                todo.id,
                todo.status,
                todo.priority,
                due_label(&todo),
                todo.title
            );
        }
    }

    Ok(())
}

pub fn show(output: &Output, id: &TodoId) -> Result<()> {
    let session = Session::open()?;
    let todos = session.todos();

    let todo = todos.get(id)?;
    let work_time = todos.work_time(id)?;
    let subtasks = session.subtasks().list(id)?;
    let dependencies = session.dependencies().dependencies(id)?;
    let can_be_completed = session.dependencies().can_be_completed(id)?;

    if output.is_json() {
        output.data(&serde_json::json!({
            "todo": todo,
            "work_time": work_time,
            "subtasks": subtasks,
            "can_be_completed": can_be_completed,
        }));
        return Ok(());
    }

    println!("Todo: {}", todo.id);
    println!("Title: {}", todo.title);
    println!("Status: {} ({})", todo.status, todo.work_state);
    println!("Priority: {}", todo.priority);
    if let Some(project_id) = &todo.project_id {
        println!("Project: {}", project_id);
    }
    if let Some(due) = todo.due_date {
        println!("Due: {}", due.format("%Y-%m-%d %H:%M"));
    }
    println!("Work time: {}", work_time.formatted);
    println!("Created: {}", todo.created_at.format("%Y-%m-%d %H:%M"));
    if let Some(completed) = todo.completed_at {
        println!("Completed: {}", completed.format("%Y-%m-%d %H:%M"));
    }

    if !dependencies.is_empty() {
        println!("\nDepends on:");
        for dep in &dependencies {
            println!("  {} ({}) {}", dep.id, dep.status, dep.title);
        }
    }

    if !subtasks.is_empty() {
        println!("\nSubtasks:");
        for subtask in &subtasks {
            let mark = if subtask.completed { "x" } else { " " };
            println!("  [{}] {} {}", mark, subtask.id, subtask.title);
        }
    }

    if let Some(desc) = &todo.description {
        println!("\nDescription:");
        println!("{}", desc);
    }

    if !todo.status.is_complete() && !can_be_completed {
        println!("\nBLOCKED (waiting on dependencies)");
    }

    Ok(())
}

pub fn update(output: &Output, args: UpdateArgs) -> Result<()> {
    let session = Session::open()?;

    let project_id = if args.no_project {
        Some(None)
    } else {
        match args.project.as_deref() {
            Some(key) => Some(Some(session.projects().resolve(key)?.id)),
            None => None,
        }
    };

    let patch = TodoPatch {
        title: args.title,
        description: if args.clear_description {
            Some(None)
        } else {
            args.description.map(Some)
        },
        priority: args.priority,
        project_id,
        due_date: if args.clear_due {
            Some(None)
        } else {
            args.due.map(Some)
        },
        ..TodoPatch::default()
    };

    let todo = session.todos().update(&args.id, patch)?;

    if output.is_json() {
        output.data(&todo);
    } else {
        output.success(&format!("Updated todo: {} - {}", todo.id, todo.title));
    }

    Ok(())
}

pub fn delete(output: &Output, id: &TodoId) -> Result<()> {
    let session = Session::open()?;
    session.todos().delete(id)?;

    if output.is_json() {
        output.data(&serde_json::json!({ "id": id, "deleted": true }));
    } else {
        output.success(&format!("Deleted todo: {}", id));
    }

    Ok(())
}

pub fn transition(output: &Output, id: &TodoId, transition: Transition) -> Result<()> {
    let session = Session::open()?;
    let todos = session.todos();

    let todo = match transition {
        Transition::Start => todos.start(id)?,
        Transition::Pause => todos.pause(id)?,
        Transition::Resume => todos.resume(id)?,
        Transition::Complete => todos.complete(id)?,
        Transition::Reopen => todos.reopen(id)?,
    };

    if output.is_json() {
        output.data(&todo);
    } else {
        output.success(&format!(
            "Todo {} {} ({})",
            todo.id,
            ActivityKind::from(transition),
            todo.work_state
        ));
    }

    Ok(())
}

pub fn time(output: &Output, id: &TodoId) -> Result<()> {
    let session = Session::open()?;
    let report = session.todos().work_time(id)?;

    if output.is_json() {
        output.data(&report);
    } else {
        println!("{}: {} ({})", report.id, report.formatted, report.work_state);
    }

    Ok(())
}

pub fn activity(output: &Output, id: &TodoId) -> Result<()> {
    let session = Session::open()?;
    let activities = session.todos().activities(id)?;

    if output.is_json() {
        output.data(&activities);
    } else if activities.is_empty() {
        println!("No activity for {}", id);
    } else {
        for activity in activities {
            println!(
                "{}  {:<18} {}",
                activity.created_at.format("%Y-%m-%d %H:%M:%S"),
                activity.kind,
                activity.detail.as_deref().unwrap_or("")
            );
        }
    }

    Ok(())
}
