//! Summary aggregation over current entity state.
//!
//! # Invariants
//! - `pending_count + completed_count` equals todos plus all project tasks.
//! - `percent_complete` is 0 when there is nothing to count.
//! - Pure: recomputed from scratch on every call.

use crate::model::project::Project;
use crate::model::todo::Todo;

/// Derived counters shown next to the three views.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Summary {
    pub project_count: usize,
    pub pending_count: usize,
    pub completed_count: usize,
    /// Rounded half-up, in `0..=100`.
    pub percent_complete: u8,
}

impl Summary {
    pub fn total_count(&self) -> usize {
        self.pending_count + self.completed_count
    }
}

/// Computes the summary for the given collections.
pub fn summarize(todos: &[Todo], projects: &[Project]) -> Summary {
    let (project_total, project_completed) =
        projects.iter().fold((0, 0), |(total, completed), project| {
            (
                total + project.tasks.len(),
                completed + project.completed_task_count(),
            )
        });

    let total = project_total + todos.len();
    let completed = project_completed + todos.iter().filter(|todo| todo.completed).count();

    Summary {
        project_count: projects.len(),
        pending_count: total - completed,
        completed_count: completed,
        percent_complete: percent(completed, total),
    }
}

fn percent(completed: usize, total: usize) -> u8 {
    if total == 0 {
        return 0;
    }
    // floor(100 * c / t + 1/2) without going through floats.
    let rounded = (200 * completed + total) / (2 * total);
    u8::try_from(rounded).unwrap_or(100)
}
