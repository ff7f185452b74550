//! Core domain logic for Taskpad: todos, projects with nested tasks and
//! comments, a notes pad, and the summary kept in sync with them.
//! This crate is the single source of truth for state and mutation rules.

pub mod config;
pub mod db;
pub mod logging;
pub mod model;
pub mod repo;
pub mod service;
pub mod storage;
pub mod ui;
pub mod view;

pub use config::TrackerConfig;
pub use logging::{default_log_level, init_logging, logging_status, LoggingError};
pub use model::project::{
    Comment, ParseEnumError, Project, ProjectStatus, Task, TaskPriority, TaskRef,
};
pub use model::todo::Todo;
pub use repo::state_repo::{LoadedState, RepoError, RepoResult, StateRepository};
pub use service::entity_store::{Collection, EntityStore, Mutation, SkipReason};
pub use service::notes::{DeferredSave, NOTES_DEBOUNCE};
pub use service::summary::{summarize, Summary};
pub use service::tracker_service::{Outcome, TrackerService};
pub use storage::{
    KvStore, MemoryKvStore, SqliteKvStore, StoreError, StoreResult, NOTES_KEY, PROJECTS_KEY,
    TODOS_KEY,
};
pub use ui::{Notice, UserInterface};
pub use view::{render_frame, EmptyState, Frame, Region};

/// Returns the core crate version.
pub fn core_version() -> &'static str {
    env!("CARGO_PKG_VERSION")
}
