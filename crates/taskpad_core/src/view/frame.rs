//! Frame model and the pure render function.

use crate::model::project::{Project, ProjectStatus, TaskPriority, TaskRef};
use crate::model::todo::Todo;
use crate::service::summary::{summarize, Summary};
use chrono::{DateTime, Utc};

/// Placeholder shown in place of an empty collection.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EmptyState {
    Todos,
    Projects,
    Tasks,
    Comments,
}

impl EmptyState {
    pub fn message(self) -> &'static str {
        match self {
            Self::Todos => "No tasks yet",
            Self::Projects => "No projects yet. Add your first project!",
            Self::Tasks => "No tasks yet",
            Self::Comments => "No comments yet",
        }
    }
}

/// Display region: either a placeholder or the rendered rows.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Region<T> {
    Empty(EmptyState),
    Items(Vec<T>),
}

impl<T> Region<T> {
    fn build(rows: Vec<T>, empty: EmptyState) -> Self {
        if rows.is_empty() {
            Self::Empty(empty)
        } else {
            Self::Items(rows)
        }
    }

    pub fn items(&self) -> &[T] {
        match self {
            Self::Empty(_) => &[],
            Self::Items(rows) => rows,
        }
    }

    pub fn is_empty(&self) -> bool {
        matches!(self, Self::Empty(_))
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TodoRow {
    /// Position in the todo list at render time.
    pub index: usize,
    pub text: String,
    pub completed: bool,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TaskRow {
    /// Composite key carried by toggle events raised from this row.
    pub task_ref: TaskRef,
    pub text: String,
    pub completed: bool,
    pub priority: TaskPriority,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CommentRow {
    pub text: String,
    pub posted_at: DateTime<Utc>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProjectCard {
    pub index: usize,
    pub title: String,
    pub description: String,
    pub status: ProjectStatus,
    pub status_label: &'static str,
    pub created_at: DateTime<Utc>,
    pub tasks: Region<TaskRow>,
    pub comments: Region<CommentRow>,
}

/// Summary counters plus their display form.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SummaryView {
    pub summary: Summary,
    /// Percentage suffixed with `%`.
    pub progress_label: String,
}

/// One complete render of every view.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Frame {
    pub todos: Region<TodoRow>,
    pub projects: Region<ProjectCard>,
    pub notes: String,
    pub summary: SummaryView,
}

/// Renders the full frame. The summary is recomputed here, never cached.
pub fn render_frame(todos: &[Todo], projects: &[Project], notes: &str) -> Frame {
    let todo_rows = todos
        .iter()
        .enumerate()
        .map(|(index, todo)| TodoRow {
            index,
            text: todo.text.clone(),
            completed: todo.completed,
        })
        .collect();

    let cards = projects
        .iter()
        .enumerate()
        .map(|(index, project)| render_project(index, project))
        .collect();

    let summary = summarize(todos, projects);
    Frame {
        todos: Region::build(todo_rows, EmptyState::Todos),
        projects: Region::build(cards, EmptyState::Projects),
        notes: notes.to_string(),
        summary: SummaryView {
            summary,
            progress_label: format!("{}%", summary.percent_complete),
        },
    }
}

fn render_project(index: usize, project: &Project) -> ProjectCard {
    let tasks = project
        .tasks
        .iter()
        .enumerate()
        .map(|(task_index, task)| TaskRow {
            task_ref: TaskRef::new(index, task_index),
            text: task.text.clone(),
            completed: task.completed,
            priority: task.priority,
        })
        .collect();

    let comments = project
        .comments
        .iter()
        .map(|comment| CommentRow {
            text: comment.text.clone(),
            posted_at: comment.created_at,
        })
        .collect();

    ProjectCard {
        index,
        title: project.title.clone(),
        description: project.description.clone(),
        status: project.status,
        status_label: project.status.label(),
        created_at: project.created_at,
        tasks: Region::build(tasks, EmptyState::Tasks),
        comments: Region::build(comments, EmptyState::Comments),
    }
}
