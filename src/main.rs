//! todo - Local todo tracker with dependencies and work timing

use std::process::ExitCode;

fn main() -> ExitCode {
    todo_cli::cli::run()
}
