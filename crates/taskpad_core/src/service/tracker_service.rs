//! Tracker session service.
//!
//! # Responsibility
//! - Own the session lifecycle: load once, mutate, flush on close.
//! - Run the mutate -> persist -> render cycle for every user action.
//! - Drive confirmation and two-step edit prompts through `UserInterface`.
//!
//! # Invariants
//! - Only committed mutations persist and re-render.
//! - Cancelled or skipped actions leave state, storage and display untouched.
//! - A failed save keeps in-memory state and still re-renders.
//! - Persisted writes are full-collection overwrites of the touched collection.

use crate::config::TrackerConfig;
use crate::model::project::{ProjectStatus, TaskRef};
use crate::repo::state_repo::StateRepository;
use crate::service::entity_store::{Collection, EntityStore, Mutation, SkipReason};
use crate::service::notes::DeferredSave;
use crate::service::summary::{summarize, Summary};
use crate::storage::KvStore;
use crate::ui::{Notice, UserInterface};
use crate::view::{render_frame, Frame};
use chrono::Utc;
use log::{debug, error, info};
use std::time::Instant;

const DELETE_PROJECT_CONFIRM: &str = "Are you sure you want to delete this project?";
const EDIT_TITLE_PROMPT: &str = "Edit project title:";
const EDIT_DESCRIPTION_PROMPT: &str = "Edit project description:";

/// What a user action ended up doing.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Outcome {
    /// State changed and a frame was rendered. `persisted` is `false` when
    /// the storage write failed.
    Committed { persisted: bool },
    /// Validation or bounds check rejected the action.
    Skipped(SkipReason),
    /// The user declined a confirmation or cancelled a prompt.
    Cancelled,
}

impl Outcome {
    pub fn is_committed(self) -> bool {
        matches!(self, Self::Committed { .. })
    }
}

/// One tracker session over a key-value store and a host UI.
pub struct TrackerService<S: KvStore, U: UserInterface> {
    entities: EntityStore,
    repo: StateRepository<S>,
    ui: U,
    notes_save: DeferredSave,
}

impl<S: KvStore, U: UserInterface> TrackerService<S, U> {
    /// Loads state from `store` and renders the first frame.
    pub fn open(store: S, ui: U, config: TrackerConfig) -> Self {
        let repo = StateRepository::new(store);
        let entities = EntityStore::from_loaded(repo.load());
        info!(
            "event=session_open module=service status=ok todos={} projects={} notes_bytes={}",
            entities.todos().len(),
            entities.projects().len(),
            entities.notes().len()
        );

        let mut service = Self {
            entities,
            repo,
            ui,
            notes_save: DeferredSave::new(config.notes_debounce),
        };
        service.render();
        service
    }

    pub fn entities(&self) -> &EntityStore {
        &self.entities
    }

    pub fn summary(&self) -> Summary {
        summarize(self.entities.todos(), self.entities.projects())
    }

    pub fn frame(&self) -> Frame {
        render_frame(
            self.entities.todos(),
            self.entities.projects(),
            self.entities.notes(),
        )
    }

    pub fn ui(&self) -> &U {
        &self.ui
    }

    pub fn ui_mut(&mut self) -> &mut U {
        &mut self.ui
    }

    pub fn add_todo(&mut self, text: &str) -> Outcome {
        let mutation = self.entities.add_todo(text, Utc::now());
        self.finish("add_todo", mutation)
    }

    pub fn toggle_todo(&mut self, index: usize) -> Outcome {
        let mutation = self.entities.toggle_todo(index);
        self.finish("toggle_todo", mutation)
    }

    pub fn delete_todo(&mut self, index: usize) -> Outcome {
        let mutation = self.entities.delete_todo(index);
        self.finish("delete_todo", mutation)
    }

    pub fn add_project(&mut self, title: &str, description: &str, status: ProjectStatus) -> Outcome {
        let mutation = self
            .entities
            .add_project(title, description, status, Utc::now());
        self.finish("add_project", mutation)
    }

    /// Deletes a project after the user confirms.
    pub fn delete_project(&mut self, index: usize) -> Outcome {
        if let Some(skipped) = self.missing_project(index) {
            return self.finish("delete_project", skipped);
        }
        if !self.ui.confirm(DELETE_PROJECT_CONFIRM) {
            return cancelled("delete_project");
        }
        let mutation = self.entities.delete_project(index);
        self.finish("delete_project", mutation)
    }

    /// Prompts for a new title, then a new description; commits only when
    /// both prompts are answered.
    pub fn edit_project(&mut self, index: usize) -> Outcome {
        let Some(project) = self.entities.project(index) else {
            let len = self.entities.projects().len();
            return self.finish("edit_project", project_out_of_range(index, len));
        };
        let current_title = project.title.clone();
        let current_description = project.description.clone();

        let Some(title) = self.ui.prompt(EDIT_TITLE_PROMPT, &current_title) else {
            return cancelled("edit_project");
        };
        let Some(description) = self.ui.prompt(EDIT_DESCRIPTION_PROMPT, &current_description)
        else {
            return cancelled("edit_project");
        };

        let mutation = self.entities.edit_project(index, &title, &description);
        self.finish("edit_project", mutation)
    }

    pub fn add_task(&mut self, project_index: usize, text: &str) -> Outcome {
        let mutation = self.entities.add_task(project_index, text);
        self.finish("add_task", mutation)
    }

    pub fn toggle_task(&mut self, task_ref: TaskRef) -> Outcome {
        let mutation = self.entities.toggle_task(task_ref);
        self.finish("toggle_task", mutation)
    }

    pub fn add_comment(&mut self, project_index: usize, text: &str) -> Outcome {
        let mutation = self
            .entities
            .add_comment(project_index, text, Utc::now());
        self.finish("add_comment", mutation)
    }

    /// Records a notes edit and (re)starts the deferred save window.
    pub fn edit_notes(&mut self, text: impl Into<String>, now: Instant) {
        self.entities.set_notes(text);
        self.notes_save.schedule(now);
    }

    /// Fires the deferred notes save when its window has elapsed.
    ///
    /// Returns `true` when a save was attempted.
    pub fn tick(&mut self, now: Instant) -> bool {
        if !self.notes_save.fire_if_due(now) {
            return false;
        }
        self.persist_notes("notes_autosave");
        true
    }

    /// Deadline of the pending deferred save, if any.
    pub fn next_deadline(&self) -> Option<Instant> {
        self.notes_save.due_at()
    }

    /// Saves the notes immediately and confirms to the user.
    pub fn save_notes(&mut self) -> Outcome {
        self.notes_save.cancel();
        let persisted = self.persist_notes("notes_save");
        if persisted {
            self.ui.notify(&Notice::NotesSaved);
        }
        Outcome::Committed { persisted }
    }

    /// Ends the session: flushes a pending notes save and hands the store
    /// back.
    pub fn close(mut self) -> S {
        if self.notes_save.take() {
            self.persist_notes("notes_flush");
        }
        info!("event=session_close module=service status=ok");
        self.repo.into_store()
    }

    fn finish(&mut self, op: &'static str, mutation: Mutation) -> Outcome {
        match mutation {
            Mutation::Applied(collection) => {
                let persisted = self.persist(collection);
                self.render();
                info!(
                    "event=mutation module=service status=ok op={op} collection={} persisted={persisted}",
                    collection.as_str()
                );
                Outcome::Committed { persisted }
            }
            Mutation::Skipped(reason) => {
                if reason == SkipReason::EmptyTitle {
                    self.ui.notify(&Notice::ProjectTitleRequired);
                }
                debug!("event=mutation module=service status=skipped op={op} reason={reason}");
                Outcome::Skipped(reason)
            }
        }
    }

    fn persist(&mut self, collection: Collection) -> bool {
        let result = match collection {
            Collection::Todos => self.repo.save_todos(self.entities.todos()),
            Collection::Projects => self.repo.save_projects(self.entities.projects()),
        };
        match result {
            Ok(()) => true,
            Err(err) => {
                error!(
                    "event=state_save module=service status=error collection={} error={err}",
                    collection.as_str()
                );
                self.ui.notify(&Notice::StorageFailed {
                    collection: collection.as_str(),
                    reason: err.to_string(),
                });
                false
            }
        }
    }

    fn persist_notes(&mut self, op: &'static str) -> bool {
        match self.repo.save_notes(self.entities.notes()) {
            Ok(()) => {
                debug!("event={op} module=service status=ok");
                true
            }
            Err(err) => {
                error!("event={op} module=service status=error error={err}");
                self.ui.notify(&Notice::StorageFailed {
                    collection: "notes",
                    reason: err.to_string(),
                });
                false
            }
        }
    }

    fn render(&mut self) {
        let frame = self.frame();
        self.ui.render(&frame);
    }

    fn missing_project(&self, index: usize) -> Option<Mutation> {
        let len = self.entities.projects().len();
        (index >= len).then(|| project_out_of_range(index, len))
    }
}

fn project_out_of_range(index: usize, len: usize) -> Mutation {
    Mutation::Skipped(SkipReason::OutOfRange {
        collection: "projects",
        index,
        len,
    })
}

fn cancelled(op: &'static str) -> Outcome {
    info!("event=mutation module=service status=cancelled op={op}");
    Outcome::Cancelled
}
