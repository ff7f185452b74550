//! View rendering: pure mapping from state to display frames.
//!
//! # Responsibility
//! - Build a complete `Frame` (todos, projects, notes, summary) from state.
//! - Provide a plain-text rendering for terminal hosts.
//!
//! # Invariants
//! - Every render produces a full replacement frame; nothing is patched.
//! - Empty collections render a placeholder distinct per collection.

pub mod frame;
mod text;

pub use frame::{
    render_frame, CommentRow, EmptyState, Frame, ProjectCard, Region, SummaryView, TaskRow,
    TodoRow,
};
