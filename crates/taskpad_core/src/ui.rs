//! Host-facing interaction seam.
//!
//! # Responsibility
//! - Receive full frames after every committed change.
//! - Answer confirmations and prompts, and show notifications.
//!
//! # Invariants
//! - `prompt` returning `None` means the user cancelled.
//! - Implementations never mutate tracker state directly.

use crate::view::Frame;
use std::fmt::{Display, Formatter};

/// User-visible notification raised by the tracker service.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Notice {
    /// Project add or edit attempted with an empty title.
    ProjectTitleRequired,
    /// Explicit notes save went through.
    NotesSaved,
    /// Persistence failed; in-memory state was kept.
    StorageFailed {
        collection: &'static str,
        reason: String,
    },
}

impl Display for Notice {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::ProjectTitleRequired => write!(f, "Please enter a project title"),
            Self::NotesSaved => write!(f, "Notes saved successfully!"),
            Self::StorageFailed { collection, reason } => write!(
                f,
                "Could not save {collection} ({reason}); changes are kept for this session"
            ),
        }
    }
}

/// Rendering plus interactive input, provided by the host.
pub trait UserInterface {
    /// Replaces every view region with `frame`.
    fn render(&mut self, frame: &Frame);
    /// Asks a yes/no question; `false` cancels.
    fn confirm(&mut self, message: &str) -> bool;
    /// Asks for a line of text pre-filled with `initial`.
    fn prompt(&mut self, message: &str, initial: &str) -> Option<String>;
    fn notify(&mut self, notice: &Notice);
}

impl<U: UserInterface + ?Sized> UserInterface for &mut U {
    fn render(&mut self, frame: &Frame) {
        (**self).render(frame);
    }

    fn confirm(&mut self, message: &str) -> bool {
        (**self).confirm(message)
    }

    fn prompt(&mut self, message: &str, initial: &str) -> Option<String> {
        (**self).prompt(message, initial)
    }

    fn notify(&mut self, notice: &Notice) {
        (**self).notify(notice);
    }
}
