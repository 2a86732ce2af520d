//! # Command-Line Interface
//!
//! User-facing CLI commands and output formatting.
//!
//! ## Command Groups
//!
//! | Group | Purpose | Examples |
//! |-------|---------|----------|
//! | Core | Workspace setup | `init` |
//! | Todo | Todo lifecycle | `add`, `list`, `start`, `pause`, `done`, `time` |
//! | Dependency | Edges and graph queries | `dep add`, `dep tree`, `dep ready`, `dep order` |
//! | Organizing | Projects, tags, checklists | `project add`, `tag attach`, `subtask toggle` |
//!
//! ## Output Formats
//!
//! All commands support the `--format` flag:
//! - `text` (default) - Human-readable output
//! - `json` - Machine-parseable JSON
//!
//! The default comes from `default_format` in the global config.
//!
//! ## Exit Codes
//!
//! | Code | Meaning |
//! |------|---------|
//! | 0 | Success |
//! | 2 | Invalid input or state transition |
//! | 3 | Not found |
//! | 4 | Conflict (duplicate, cycle, open dependencies) |
//! | 1 | Anything else |
//!
//! ## Logging
//!
//! `--verbose` (or `-v`) enables debug logs on stderr. `TODO_LOG` takes an
//! `EnvFilter` directive and `TODO_LOG_FORMAT=json` switches to JSON lines:
//! ```bash
//! TODO_LOG=todo_cli=trace todo dep ready
//! ```
//!
//! ## Entry Point
//!
//! Call [`run()`] to parse arguments and execute the appropriate command.

mod app;
mod dep;
mod output;
mod project;
mod session;
mod subtask;
mod tag;
mod todo;

pub use app::{exit_code, run, Cli, Commands};
pub use output::Output;
