//! Flat todo records.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// One entry in the flat todo list.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Todo {
    /// Trimmed, non-empty display text.
    pub text: String,
    pub completed: bool,
    /// Serialized as `date` to stay readable by earlier blobs. A record
    /// without one reads as created at load time.
    #[serde(rename = "date", alias = "createdAt", default = "Utc::now")]
    pub created_at: DateTime<Utc>,
}

impl Todo {
    /// Creates a pending todo from already-validated text.
    pub fn new(text: impl Into<String>, created_at: DateTime<Utc>) -> Self {
        Self {
            text: text.into(),
            completed: false,
            created_at,
        }
    }

    /// Flips the completion flag.
    pub fn toggle(&mut self) {
        self.completed = !self.completed;
    }
}
