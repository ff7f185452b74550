//! Typed persistence on top of the key-value adapter.
//!
//! # Responsibility
//! - Encode/decode the todo and project collections as JSON blobs.
//! - Isolate storage keys and formats from the service layer.
//!
//! # Invariants
//! - Writes are full-collection overwrites, never deltas.
//! - Loads fail closed: absent or malformed blobs read as empty.
//! - A single unreadable record is dropped; the rest of its collection loads.

pub mod state_repo;
