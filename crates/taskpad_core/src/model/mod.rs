//! Domain model for the todo list, projects and their nested records.
//!
//! # Responsibility
//! - Define the records held by the entity store and serialized to storage.
//! - Keep the serialized shape readable by older blobs (`date` timestamps,
//!   missing nested collections).
//!
//! # Invariants
//! - Every collection is addressed by position; a structural mutation
//!   invalidates indices captured before it.
//! - Projects own their tasks and comments exclusively.

pub mod project;
pub mod todo;
