//! Opaque identifiers for todos and their satellite records
//!
//! ID Format:
//! - Todo IDs: `td-{7-char-hash}` (e.g., `td-7f2b4c1`)
//! - Project IDs: `p-{7-char-hash}`
//! - Tag IDs: `tg-{7-char-hash}`
//! - Subtask IDs: `st-{7-char-hash}`
//! - Activity IDs: `ac-{7-char-hash}`
//!
//! Hash is derived from a seed (usually the title), the creation timestamp and
//! a process-local counter. Generated IDs carry a prefix, but IDs are opaque:
//! any non-empty string without whitespace parses, so records created by other
//! tools keep working.

use std::fmt;
use std::str::FromStr;
use std::sync::atomic::{AtomicU64, Ordering};

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use thiserror::Error;

#[derive(Debug, Error, PartialEq)]
pub enum IdError {
    #[error("ID must not be empty")]
    Empty,

    #[error("Invalid ID '{0}': IDs must not contain whitespace")]
    Whitespace(String),
}

static SEQUENCE: AtomicU64 = AtomicU64::new(0);

/// Generates a 7-character hash from seed, timestamp and a process-local sequence
fn generate_hash(seed: &str, timestamp: DateTime<Utc>) -> String {
    let seq = SEQUENCE.fetch_add(1, Ordering::Relaxed);
    let input = format!(
        "{}{}{}",
        seed,
        timestamp.timestamp_nanos_opt().unwrap_or(0),
        seq
    );
    let hash = blake3::hash(input.as_bytes());
    let hex = hash.to_hex();
    hex[..7].to_string()
}

fn validate(raw: &str) -> Result<String, IdError> {
    let s = raw.trim();
    if s.is_empty() {
        return Err(IdError::Empty);
    }
    if s.chars().any(char::is_whitespace) {
        return Err(IdError::Whitespace(s.to_string()));
    }
    Ok(s.to_string())
}

macro_rules! opaque_id {
    ($(#[$meta:meta])* $name:ident, $prefix:literal) => {
        $(#[$meta])*
        #[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
        #[serde(try_from = "String", into = "String")]
        pub struct $name(String);

        impl $name {
            /// Prefix used for generated IDs
            pub const PREFIX: &'static str = $prefix;

            /// Generates a fresh ID from a seed and timestamp
            pub fn generate(seed: &str, timestamp: DateTime<Utc>) -> Self {
                Self(format!("{}-{}", $prefix, generate_hash(seed, timestamp)))
            }

            /// Returns the ID as a string slice
            pub fn as_str(&self) -> &str {
                &self.0
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.pad(&self.0)
            }
        }

        impl FromStr for $name {
            type Err = IdError;

            fn from_str(s: &str) -> Result<Self, Self::Err> {
                validate(s).map(Self)
            }
        }

        impl TryFrom<String> for $name {
            type Error = IdError;

            fn try_from(value: String) -> Result<Self, Self::Error> {
                value.parse()
            }
        }

        impl From<$name> for String {
            fn from(id: $name) -> Self {
                id.0
            }
        }
    };
}

opaque_id!(
    /// Identifier of a todo
    TodoId,
    "td"
);

opaque_id!(
    /// Identifier of a project
    ProjectId,
    "p"
);

opaque_id!(
    /// Identifier of a tag
    TagId,
    "tg"
);

opaque_id!(
    /// Identifier of a subtask
    SubtaskId,
    "st"
);

opaque_id!(
    /// Identifier of an activity record
    ActivityId,
    "ac"
);
