//! Key-value storage interface and implementations
//!
//! Values are stored as serialized JSON strings under a string key, with an
//! in-memory implementation for tests and a file-backed one for the CLI.

use crate::error::LadderError;
use std::collections::HashMap;
use std::path::PathBuf;
use std::sync::RwLock;
use tracing::debug;

/// Trait for raw key-value storage operations
pub trait KeyValueStore: Send + Sync {
    /// Read the raw value stored under `key`, if any
    fn read(&self, key: &str) -> crate::error::Result<Option<String>>;

    /// Store `value` under `key`, replacing any previous value
    fn write(&self, key: &str, value: &str) -> crate::error::Result<()>;
}

/// In-memory key-value store
#[derive(Debug, Default)]
pub struct InMemoryStore {
    values: RwLock<HashMap<String, String>>,
}

impl InMemoryStore {
    /// Create an empty in-memory store
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of keys currently stored
    pub fn len(&self) -> usize {
        self.values.read().map(|values| values.len()).unwrap_or(0)
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl KeyValueStore for InMemoryStore {
    fn read(&self, key: &str) -> crate::error::Result<Option<String>> {
        let values = self.values.read().map_err(|_| LadderError::Storage {
            key: key.to_string(),
            message: "Failed to acquire store read lock".to_string(),
        })?;

        Ok(values.get(key).cloned())
    }

    fn write(&self, key: &str, value: &str) -> crate::error::Result<()> {
        let mut values = self.values.write().map_err(|_| LadderError::Storage {
            key: key.to_string(),
            message: "Failed to acquire store write lock".to_string(),
        })?;

        values.insert(key.to_string(), value.to_string());
        Ok(())
    }
}

/// File-backed store keeping one `<key>.json` file per key in a directory
#[derive(Debug, Clone)]
pub struct JsonFileStore {
    dir: PathBuf,
}

impl JsonFileStore {
    /// Create a store rooted at `dir`. The directory is created on first write.
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    fn path_for(&self, key: &str) -> PathBuf {
        self.dir.join(format!("{}.json", key))
    }
}

impl KeyValueStore for JsonFileStore {
    fn read(&self, key: &str) -> crate::error::Result<Option<String>> {
        let path = self.path_for(key);
        match std::fs::read_to_string(&path) {
            Ok(contents) => Ok(Some(contents)),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(None),
            Err(e) => Err(LadderError::Storage {
                key: key.to_string(),
                message: format!("Failed to read {}: {}", path.display(), e),
            }
            .into()),
        }
    }

    fn write(&self, key: &str, value: &str) -> crate::error::Result<()> {
        std::fs::create_dir_all(&self.dir).map_err(|e| LadderError::Storage {
            key: key.to_string(),
            message: format!("Failed to create {}: {}", self.dir.display(), e),
        })?;

        // Write to a sibling file first so a crash never leaves a half-written value
        let path = self.path_for(key);
        let tmp = self.dir.join(format!("{}.json.tmp", key));
        std::fs::write(&tmp, value)
            .and_then(|_| std::fs::rename(&tmp, &path))
            .map_err(|e| LadderError::Storage {
                key: key.to_string(),
                message: format!("Failed to write {}: {}", path.display(), e),
            })?;

        debug!(key, path = %path.display(), bytes = value.len(), "Saved value");
        Ok(())
    }
}
