//! Tag domain model

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::id::TagId;

/// A label that can be attached to any number of todos. Names are unique.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Tag {
    pub id: TagId,

    pub name: String,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub color: Option<String>,

    pub created_at: DateTime<Utc>,
}

impl Tag {
    /// Creates a tag with a normalized name (trimmed, lowercase)
    pub fn new(id: TagId, name: &str, now: DateTime<Utc>) -> Self {
        Self {
            id,
            name: Self::normalize(name),
            color: None,
            created_at: now,
        }
    }

    pub fn with_color(mut self, color: impl Into<String>) -> Self {
        self.color = Some(color.into());
        self
    }

    pub fn normalize(name: &str) -> String {
        name.trim().to_lowercase()
    }
}
