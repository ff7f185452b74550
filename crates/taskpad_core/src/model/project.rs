//! Project records with their nested tasks and comments.
//!
//! # Responsibility
//! - Define `Project`, `Task`, `Comment` and their enums.
//! - Provide the composite `TaskRef` key used to address nested tasks.
//!
//! # Invariants
//! - `title` is non-empty for every project created through the store.
//! - Missing `tasks`/`comments` in stored blobs read back as empty.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::error::Error;
use std::fmt::{Display, Formatter};
use std::str::FromStr;

/// Project lifecycle state.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ProjectStatus {
    #[default]
    Planning,
    /// Serialized as `progress` for compatibility with earlier blobs.
    #[serde(rename = "progress", alias = "in-progress", alias = "in_progress")]
    InProgress,
    Completed,
}

impl ProjectStatus {
    /// Human-readable label used by the renderer.
    pub fn label(self) -> &'static str {
        match self {
            Self::Planning => "Planning",
            Self::InProgress => "In Progress",
            Self::Completed => "Completed",
        }
    }
}

/// Error returned when parsing an unknown status or priority name.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParseEnumError {
    kind: &'static str,
    value: String,
}

impl Display for ParseEnumError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "unknown {} `{}`", self.kind, self.value)
    }
}

impl Error for ParseEnumError {}

impl FromStr for ProjectStatus {
    type Err = ParseEnumError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value.trim().to_ascii_lowercase().as_str() {
            "planning" => Ok(Self::Planning),
            "progress" | "in-progress" | "in_progress" => Ok(Self::InProgress),
            "completed" => Ok(Self::Completed),
            other => Err(ParseEnumError {
                kind: "project status",
                value: other.to_string(),
            }),
        }
    }
}

/// Task priority. Tasks created by the store always start at `Medium`.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TaskPriority {
    Low,
    #[default]
    Medium,
    High,
}

impl TaskPriority {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Low => "low",
            Self::Medium => "medium",
            Self::High => "high",
        }
    }
}

impl FromStr for TaskPriority {
    type Err = ParseEnumError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value.trim().to_ascii_lowercase().as_str() {
            "low" => Ok(Self::Low),
            "medium" => Ok(Self::Medium),
            "high" => Ok(Self::High),
            other => Err(ParseEnumError {
                kind: "task priority",
                value: other.to_string(),
            }),
        }
    }
}

/// Actionable item nested in a project.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Task {
    pub text: String,
    #[serde(default)]
    pub completed: bool,
    #[serde(default)]
    pub priority: TaskPriority,
}

impl Task {
    pub fn new(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            completed: false,
            priority: TaskPriority::default(),
        }
    }
}

/// Immutable comment nested in a project.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Comment {
    pub text: String,
    #[serde(rename = "date", alias = "createdAt", default = "Utc::now")]
    pub created_at: DateTime<Utc>,
}

/// Project with exclusively owned tasks and comments.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Project {
    pub title: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub status: ProjectStatus,
    #[serde(rename = "date", alias = "createdAt", default = "Utc::now")]
    pub created_at: DateTime<Utc>,
    #[serde(default)]
    pub tasks: Vec<Task>,
    #[serde(default)]
    pub comments: Vec<Comment>,
}

impl Project {
    /// Creates a project with empty task and comment collections.
    pub fn new(
        title: impl Into<String>,
        description: impl Into<String>,
        status: ProjectStatus,
        created_at: DateTime<Utc>,
    ) -> Self {
        Self {
            title: title.into(),
            description: description.into(),
            status,
            created_at,
            tasks: Vec::new(),
            comments: Vec::new(),
        }
    }

    /// Number of tasks marked completed.
    pub fn completed_task_count(&self) -> usize {
        self.tasks.iter().filter(|task| task.completed).count()
    }
}

/// Composite key addressing one task inside one project.
///
/// Both halves are positional; resolve them from current state right
/// before use.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct TaskRef {
    pub project: usize,
    pub task: usize,
}

impl TaskRef {
    pub fn new(project: usize, task: usize) -> Self {
        Self { project, task }
    }
}

impl Display for TaskRef {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}/{}", self.project, self.task)
    }
}

#[cfg(test)]
mod tests {
    use super::{Project, ProjectStatus, TaskPriority};

    #[test]
    fn legacy_project_without_nested_collections_reads_as_empty() {
        let json = r#"{"title":"Launch","status":"progress","date":"2024-01-02T03:04:05Z"}"#;
        let project: Project = serde_json::from_str(json).unwrap();
        assert_eq!(project.status, ProjectStatus::InProgress);
        assert!(project.description.is_empty());
        assert!(project.tasks.is_empty());
        assert!(project.comments.is_empty());
    }

    #[test]
    fn task_without_priority_defaults_to_medium() {
        let json = r#"{"title":"p","date":"2024-01-02T03:04:05Z","tasks":[{"text":"t","completed":false}]}"#;
        let project: Project = serde_json::from_str(json).unwrap();
        assert_eq!(project.tasks[0].priority, TaskPriority::Medium);
    }

    #[test]
    fn in_progress_status_serializes_as_progress() {
        let encoded = serde_json::to_string(&ProjectStatus::InProgress).unwrap();
        assert_eq!(encoded, "\"progress\"");
    }

    #[test]
    fn status_parses_from_cli_spellings() {
        assert_eq!(
            "In-Progress".parse::<ProjectStatus>().unwrap(),
            ProjectStatus::InProgress
        );
        assert_eq!(
            "planning".parse::<ProjectStatus>().unwrap(),
            ProjectStatus::Planning
        );
        let err = "archived".parse::<ProjectStatus>().unwrap_err();
        assert!(err.to_string().contains("archived"));
    }
}
