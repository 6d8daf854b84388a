//! Typed values persisted through a [`KeyValueStore`]
//!
//! A `PersistentState` loads once, falling back to a default when the stored
//! value is missing or unreadable, and saves after every change. Storage
//! failures are logged and never propagated to the caller.

use crate::storage::store::KeyValueStore;
use serde::de::DeserializeOwned;
use serde::Serialize;
use std::sync::Arc;
use tracing::{error, warn};

/// Read `key` from the store, or `None` if it is missing or corrupt
pub fn get<T: DeserializeOwned>(store: &dyn KeyValueStore, key: &str) -> Option<T> {
    let raw = match store.read(key) {
        Ok(Some(raw)) => raw,
        Ok(None) => return None,
        Err(e) => {
            warn!(key, "Error reading stored value: {:#}", e);
            return None;
        }
    };

    match serde_json::from_str(&raw) {
        Ok(value) => Some(value),
        Err(e) => {
            warn!(key, "Stored value is corrupt, ignoring it: {}", e);
            None
        }
    }
}

/// Serialize `value` and write it under `key`, logging any failure
pub fn set<T: Serialize>(store: &dyn KeyValueStore, key: &str, value: &T) {
    let serialized = match serde_json::to_string(value) {
        Ok(serialized) => serialized,
        Err(e) => {
            error!(key, "Error serializing value: {}", e);
            return;
        }
    };

    if let Err(e) = store.write(key, &serialized) {
        error!(key, "Error writing stored value: {:#}", e);
    }
}

/// A value mirrored to a key in a store
pub struct PersistentState<T> {
    key: String,
    value: T,
    store: Arc<dyn KeyValueStore>,
}

impl<T> PersistentState<T>
where
    T: Serialize + DeserializeOwned,
{
    /// Load `key` from the store, falling back to `default`
    pub fn load(store: Arc<dyn KeyValueStore>, key: impl Into<String>, default: T) -> Self {
        let key = key.into();
        let value = get(store.as_ref(), &key).unwrap_or(default);
        let state = Self { key, value, store };
        state.save();
        state
    }

    pub fn get(&self) -> &T {
        &self.value
    }

    /// Replace the value and save it
    pub fn set(&mut self, value: T) {
        self.value = value;
        self.save();
    }

    /// Modify the value in place and save it
    pub fn update<R>(&mut self, f: impl FnOnce(&mut T) -> R) -> R {
        let result = f(&mut self.value);
        self.save();
        result
    }

    fn save(&self) {
        set(self.store.as_ref(), &self.key, &self.value);
    }
}

impl<T: std::fmt::Debug> std::fmt::Debug for PersistentState<T> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("PersistentState")
            .field("key", &self.key)
            .field("value", &self.value)
            .finish()
    }
}
