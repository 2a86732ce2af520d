//! Output formatting for CLI commands

use serde::Serialize;

use crate::service::ServiceError;
use crate::storage::OutputFormat;

/// Output helper for consistent formatting
pub struct Output {
    format: OutputFormat,
}

impl Output {
    pub fn new(format: OutputFormat) -> Self {
        Self { format }
    }

    /// Prints a success message
    pub fn success(&self, message: &str) {
        match self.format {
            OutputFormat::Text => println!("{}", message),
            OutputFormat::Json => {
                println!(
                    "{}",
                    serde_json::json!({
                        "success": true,
                        "message": message
                    })
                );
            }
        }
    }

    /// Prints an error to stderr. JSON errors carry `status` and `kind`.
    pub fn error(&self, err: &anyhow::Error) {
        match self.format {
            OutputFormat::Text => eprintln!("Error: {:#}", err),
            OutputFormat::Json => {
                let (status, kind) = match err.downcast_ref::<ServiceError>() {
                    Some(service) => (service.http_status(), service.kind()),
                    None => (500, "internal"),
                };
                eprintln!(
                    "{}",
                    serde_json::json!({
                        "success": false,
                        "error": format!("{:#}", err),
                        "status": status,
                        "kind": kind,
                    })
                );
            }
        }
    }

    /// Prints structured data as a single JSON line
    pub fn data<T: Serialize>(&self, data: &T) {
        if let Ok(json) = serde_json::to_string(data) {
            println!("{}", json);
        }
    }

    /// Returns true if using JSON format
    pub fn is_json(&self) -> bool {
        self.format == OutputFormat::Json
    }
}
