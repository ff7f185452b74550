//! Core use-case services.
//!
//! # Responsibility
//! - Hold session state and its mutation rules (`entity_store`).
//! - Derive summary counters (`summary`).
//! - Debounce notes persistence (`notes`).
//! - Orchestrate mutate/persist/render per user action (`tracker_service`).

pub mod entity_store;
pub mod notes;
pub mod summary;
pub mod tracker_service;
