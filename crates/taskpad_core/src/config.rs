//! Session configuration for the tracker service.

use crate::service::notes::NOTES_DEBOUNCE;
use std::time::Duration;

/// Tunables for one tracker session.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TrackerConfig {
    /// Idle window before an edited notes pad is persisted.
    pub notes_debounce: Duration,
}

impl Default for TrackerConfig {
    fn default() -> Self {
        Self {
            notes_debounce: NOTES_DEBOUNCE,
        }
    }
}

impl TrackerConfig {
    pub fn with_notes_debounce(mut self, delay: Duration) -> Self {
        self.notes_debounce = delay;
        self
    }
}
