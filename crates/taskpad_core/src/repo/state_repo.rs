//! State repository over a `KvStore`.

use crate::model::project::Project;
use crate::model::todo::Todo;
use crate::storage::{KvStore, StoreError, NOTES_KEY, PROJECTS_KEY, TODOS_KEY};
use log::{debug, warn};
use serde::de::DeserializeOwned;
use serde::Serialize;
use std::error::Error;
use std::fmt::{Display, Formatter};

pub type RepoResult<T> = Result<T, RepoError>;

/// Error for typed state persistence.
#[derive(Debug)]
pub enum RepoError {
    Store(StoreError),
    Encode(serde_json::Error),
}

impl Display for RepoError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Store(err) => write!(f, "{err}"),
            Self::Encode(err) => write!(f, "failed to encode state: {err}"),
        }
    }
}

impl Error for RepoError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Store(err) => Some(err),
            Self::Encode(err) => Some(err),
        }
    }
}

impl From<StoreError> for RepoError {
    fn from(value: StoreError) -> Self {
        Self::Store(value)
    }
}

impl From<serde_json::Error> for RepoError {
    fn from(value: serde_json::Error) -> Self {
        Self::Encode(value)
    }
}

/// Everything read from storage at session start.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct LoadedState {
    pub todos: Vec<Todo>,
    pub projects: Vec<Project>,
    pub notes: String,
}

/// Typed load/save of the three persisted blobs.
pub struct StateRepository<S: KvStore> {
    store: S,
}

impl<S: KvStore> StateRepository<S> {
    pub fn new(store: S) -> Self {
        Self { store }
    }

    /// Loads all collections, substituting empty values for anything
    /// missing, unreadable or malformed.
    pub fn load(&self) -> LoadedState {
        LoadedState {
            todos: self.load_collection(TODOS_KEY),
            projects: self.load_collection(PROJECTS_KEY),
            notes: self.load_notes(),
        }
    }

    pub fn load_todos(&self) -> Vec<Todo> {
        self.load_collection(TODOS_KEY)
    }

    pub fn load_projects(&self) -> Vec<Project> {
        self.load_collection(PROJECTS_KEY)
    }

    pub fn load_notes(&self) -> String {
        match self.store.get(NOTES_KEY) {
            Ok(value) => value.unwrap_or_default(),
            Err(err) => {
                warn!("event=state_load module=repo status=error key={NOTES_KEY} error={err}");
                String::new()
            }
        }
    }

    pub fn save_todos(&mut self, todos: &[Todo]) -> RepoResult<()> {
        self.save_collection(TODOS_KEY, todos)
    }

    pub fn save_projects(&mut self, projects: &[Project]) -> RepoResult<()> {
        self.save_collection(PROJECTS_KEY, projects)
    }

    /// Stores notes verbatim, without any encoding.
    pub fn save_notes(&mut self, notes: &str) -> RepoResult<()> {
        self.store.set(NOTES_KEY, notes)?;
        debug!(
            "event=state_save module=repo status=ok key={NOTES_KEY} bytes={}",
            notes.len()
        );
        Ok(())
    }

    /// Returns the underlying adapter.
    pub fn store(&self) -> &S {
        &self.store
    }

    pub fn into_store(self) -> S {
        self.store
    }

    fn load_collection<T: DeserializeOwned>(&self, key: &str) -> Vec<T> {
        let raw = match self.store.get(key) {
            Ok(Some(raw)) => raw,
            Ok(None) => return Vec::new(),
            Err(err) => {
                warn!("event=state_load module=repo status=error key={key} error={err}");
                return Vec::new();
            }
        };

        match serde_json::from_str::<Option<Vec<serde_json::Value>>>(&raw) {
            Ok(records) => decode_records(key, records.unwrap_or_default()),
            Err(err) => {
                // Error text carries only position info, never the blob.
                warn!(
                    "event=state_load module=repo status=corrupt key={key} bytes={} line={} column={}",
                    raw.len(),
                    err.line(),
                    err.column()
                );
                Vec::new()
            }
        }
    }

    fn save_collection<T: Serialize>(&mut self, key: &str, items: &[T]) -> RepoResult<()> {
        let encoded = serde_json::to_string(items)?;
        self.store.set(key, &encoded)?;
        debug!(
            "event=state_save module=repo status=ok key={key} items={} bytes={}",
            items.len(),
            encoded.len()
        );
        Ok(())
    }
}

/// Decodes each record on its own; unreadable records are dropped so one
/// bad row does not empty the whole collection.
fn decode_records<T: DeserializeOwned>(key: &str, records: Vec<serde_json::Value>) -> Vec<T> {
    let total = records.len();
    let mut items = Vec::with_capacity(total);
    for (index, record) in records.into_iter().enumerate() {
        match serde_json::from_value::<T>(record) {
            Ok(item) => items.push(item),
            Err(err) => warn!(
                "event=state_load module=repo status=skipped key={key} index={index} total={total} category={:?}",
                err.classify()
            ),
        }
    }
    items
}

#[cfg(test)]
mod tests {
    use super::StateRepository;
    use crate::model::todo::Todo;
    use crate::storage::{KvStore, MemoryKvStore, PROJECTS_KEY, TODOS_KEY};
    use chrono::Utc;

    #[test]
    fn missing_keys_load_as_empty() {
        let repo = StateRepository::new(MemoryKvStore::new());
        let state = repo.load();
        assert!(state.todos.is_empty());
        assert!(state.projects.is_empty());
        assert_eq!(state.notes, "");
    }

    #[test]
    fn malformed_blob_fails_closed() {
        let mut store = MemoryKvStore::new();
        store.set(TODOS_KEY, "{not json").unwrap();
        store.set(PROJECTS_KEY, "[{\"title\": 3}]").unwrap();
        let repo = StateRepository::new(store);
        assert!(repo.load_todos().is_empty());
        assert!(repo.load_projects().is_empty());
    }

    #[test]
    fn unreadable_record_is_dropped_and_the_rest_survive() {
        let mut store = MemoryKvStore::new();
        store
            .set(
                TODOS_KEY,
                r#"[
                    {"text":"keep","completed":false,"date":"2024-03-01T10:00:00Z"},
                    {"text":"bad date","completed":false,"date":"yesterday"},
                    {"text":"undated","completed":true}
                ]"#,
            )
            .unwrap();
        let repo = StateRepository::new(store);

        let todos = repo.load_todos();
        let texts: Vec<&str> = todos.iter().map(|todo| todo.text.as_str()).collect();
        assert_eq!(texts, vec!["keep", "undated"]);
        assert!(todos[1].completed);
    }

    #[test]
    fn json_null_reads_as_empty() {
        let mut store = MemoryKvStore::new();
        store.set(TODOS_KEY, "null").unwrap();
        let repo = StateRepository::new(store);
        assert!(repo.load_todos().is_empty());
    }

    #[test]
    fn saved_todos_are_a_json_array() {
        let mut repo = StateRepository::new(MemoryKvStore::new());
        repo.save_todos(&[Todo::new("a", Utc::now())]).unwrap();
        let raw = repo.store().raw(TODOS_KEY).unwrap();
        assert!(raw.starts_with('['));
        assert!(raw.contains("\"text\":\"a\""));
        assert!(raw.contains("\"date\""));
    }
}
