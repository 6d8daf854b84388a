//! Persistence for the roster and bout lists
//!
//! This module provides a small key-value abstraction with in-memory and
//! JSON-file backends, plus typed state that saves on every change.

pub mod state;
pub mod store;

// Re-export commonly used types
pub use state::PersistentState;
pub use store::{InMemoryStore, JsonFileStore, KeyValueStore};
