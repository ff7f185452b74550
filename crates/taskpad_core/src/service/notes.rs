//! Single-slot deferred save for the notes pad.
//!
//! # Invariants
//! - At most one save is outstanding at any time.
//! - Scheduling replaces (cancels) any unfired prior save.
//! - Firing clears the slot; firing an empty slot does nothing.

use std::time::{Duration, Instant};

/// Default idle window before an edited notes pad is persisted.
pub const NOTES_DEBOUNCE: Duration = Duration::from_secs(2);

/// Restartable timer modelled as an explicit slot. The host event loop owns
/// the clock and passes `now` in.
#[derive(Debug, Clone)]
pub struct DeferredSave {
    delay: Duration,
    due_at: Option<Instant>,
}

impl DeferredSave {
    pub fn new(delay: Duration) -> Self {
        Self {
            delay,
            due_at: None,
        }
    }

    /// Starts or restarts the window at `now`.
    pub fn schedule(&mut self, now: Instant) {
        self.due_at = Some(now + self.delay);
    }

    pub fn cancel(&mut self) {
        self.due_at = None;
    }

    pub fn is_pending(&self) -> bool {
        self.due_at.is_some()
    }

    pub fn due_at(&self) -> Option<Instant> {
        self.due_at
    }

    /// Clears the slot and returns `true` when the window has elapsed.
    pub fn fire_if_due(&mut self, now: Instant) -> bool {
        match self.due_at {
            Some(due_at) if now >= due_at => {
                self.due_at = None;
                true
            }
            _ => false,
        }
    }

    /// Clears the slot regardless of time; returns whether a save was pending.
    pub fn take(&mut self) -> bool {
        self.due_at.take().is_some()
    }
}

impl Default for DeferredSave {
    fn default() -> Self {
        Self::new(NOTES_DEBOUNCE)
    }
}
