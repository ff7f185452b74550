//! Persistence adapter: opaque string-keyed load/save.
//!
//! # Responsibility
//! - Define the `KvStore` contract consumed by the state repository.
//! - Provide in-memory and SQLite-backed implementations.
//!
//! # Invariants
//! - Values are opaque strings; adapters never inspect or encode them.
//! - `set` overwrites the whole value for a key.

pub mod kv;

pub use kv::{
    KvStore, MemoryKvStore, SqliteKvStore, StoreError, StoreResult, NOTES_KEY, PROJECTS_KEY,
    TODOS_KEY,
};
