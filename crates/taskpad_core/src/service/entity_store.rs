//! In-memory entity store.
//!
//! # Responsibility
//! - Hold the todo list, the projects and the notes text for one session.
//! - Own every mutation rule (validation, bounds checks, defaults).
//!
//! # Invariants
//! - Out-of-range indices never panic; they yield `Mutation::Skipped`.
//! - A skipped mutation leaves every collection untouched.
//! - `Mutation::Applied` names the one top-level collection that changed.

use crate::model::project::{Comment, Project, ProjectStatus, Task, TaskRef};
use crate::model::todo::Todo;
use crate::repo::state_repo::LoadedState;
use chrono::{DateTime, Utc};
use std::fmt::{Display, Formatter};

/// Top-level persisted collection touched by a mutation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Collection {
    Todos,
    Projects,
}

impl Collection {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Todos => "todos",
            Self::Projects => "projects",
        }
    }
}

/// Why a mutation left state unchanged.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SkipReason {
    /// Todo, task or comment text was empty.
    EmptyText,
    /// Project title was empty; this one is surfaced to the user.
    EmptyTitle,
    OutOfRange {
        collection: &'static str,
        index: usize,
        len: usize,
    },
}

impl Display for SkipReason {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::EmptyText => write!(f, "empty text"),
            Self::EmptyTitle => write!(f, "empty project title"),
            Self::OutOfRange {
                collection,
                index,
                len,
            } => write!(f, "{collection} index {index} out of range (len {len})"),
        }
    }
}

/// Result of one entity store mutation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Mutation {
    Applied(Collection),
    Skipped(SkipReason),
}

impl Mutation {
    pub fn is_applied(self) -> bool {
        matches!(self, Self::Applied(_))
    }
}

/// Session-scoped holder of all mutable tracker state.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct EntityStore {
    todos: Vec<Todo>,
    projects: Vec<Project>,
    notes: String,
}

impl EntityStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_loaded(state: LoadedState) -> Self {
        Self {
            todos: state.todos,
            projects: state.projects,
            notes: state.notes,
        }
    }

    pub fn todos(&self) -> &[Todo] {
        &self.todos
    }

    pub fn projects(&self) -> &[Project] {
        &self.projects
    }

    pub fn project(&self, index: usize) -> Option<&Project> {
        self.projects.get(index)
    }

    pub fn notes(&self) -> &str {
        &self.notes
    }

    /// Appends a pending todo with trimmed text.
    pub fn add_todo(&mut self, text: &str, now: DateTime<Utc>) -> Mutation {
        let text = text.trim();
        if text.is_empty() {
            return Mutation::Skipped(SkipReason::EmptyText);
        }
        self.todos.push(Todo::new(text, now));
        Mutation::Applied(Collection::Todos)
    }

    pub fn toggle_todo(&mut self, index: usize) -> Mutation {
        let len = self.todos.len();
        match self.todos.get_mut(index) {
            Some(todo) => {
                todo.toggle();
                Mutation::Applied(Collection::Todos)
            }
            None => out_of_range("todos", index, len),
        }
    }

    /// Removes the todo at `index`; later todos shift down by one.
    pub fn delete_todo(&mut self, index: usize) -> Mutation {
        if index >= self.todos.len() {
            return out_of_range("todos", index, self.todos.len());
        }
        self.todos.remove(index);
        Mutation::Applied(Collection::Todos)
    }

    /// Appends a project. Only the empty string is rejected as a title;
    /// whitespace-only titles are kept as typed.
    pub fn add_project(
        &mut self,
        title: &str,
        description: &str,
        status: ProjectStatus,
        now: DateTime<Utc>,
    ) -> Mutation {
        if title.is_empty() {
            return Mutation::Skipped(SkipReason::EmptyTitle);
        }
        self.projects
            .push(Project::new(title, description, status, now));
        Mutation::Applied(Collection::Projects)
    }

    /// Removes the project at `index` together with its tasks and comments.
    pub fn delete_project(&mut self, index: usize) -> Mutation {
        if index >= self.projects.len() {
            return out_of_range("projects", index, self.projects.len());
        }
        self.projects.remove(index);
        Mutation::Applied(Collection::Projects)
    }

    /// Rewrites title and description together.
    pub fn edit_project(&mut self, index: usize, title: &str, description: &str) -> Mutation {
        let len = self.projects.len();
        let Some(project) = self.projects.get_mut(index) else {
            return out_of_range("projects", index, len);
        };
        if title.is_empty() {
            return Mutation::Skipped(SkipReason::EmptyTitle);
        }
        project.title = title.to_string();
        project.description = description.to_string();
        Mutation::Applied(Collection::Projects)
    }

    /// Appends a medium-priority task to the project at `project_index`.
    pub fn add_task(&mut self, project_index: usize, text: &str) -> Mutation {
        let len = self.projects.len();
        let Some(project) = self.projects.get_mut(project_index) else {
            return out_of_range("projects", project_index, len);
        };
        if text.is_empty() {
            return Mutation::Skipped(SkipReason::EmptyText);
        }
        project.tasks.push(Task::new(text));
        Mutation::Applied(Collection::Projects)
    }

    pub fn toggle_task(&mut self, task_ref: TaskRef) -> Mutation {
        let len = self.projects.len();
        let Some(project) = self.projects.get_mut(task_ref.project) else {
            return out_of_range("projects", task_ref.project, len);
        };
        let task_len = project.tasks.len();
        match project.tasks.get_mut(task_ref.task) {
            Some(task) => {
                task.completed = !task.completed;
                Mutation::Applied(Collection::Projects)
            }
            None => out_of_range("tasks", task_ref.task, task_len),
        }
    }

    pub fn add_comment(&mut self, project_index: usize, text: &str, now: DateTime<Utc>) -> Mutation {
        let len = self.projects.len();
        let Some(project) = self.projects.get_mut(project_index) else {
            return out_of_range("projects", project_index, len);
        };
        if text.is_empty() {
            return Mutation::Skipped(SkipReason::EmptyText);
        }
        project.comments.push(Comment {
            text: text.to_string(),
            created_at: now,
        });
        Mutation::Applied(Collection::Projects)
    }

    /// Replaces the notes text wholesale. Persistence is driven by the caller.
    pub fn set_notes(&mut self, text: impl Into<String>) {
        self.notes = text.into();
    }
}

fn out_of_range(collection: &'static str, index: usize, len: usize) -> Mutation {
    Mutation::Skipped(SkipReason::OutOfRange {
        collection,
        index,
        len,
    })
}
