//! Key-value persistence collaborator
//!
//! The host persists whole serialized blobs under a handful of string keys.
//! The analytics never touch a store directly.

use std::collections::HashMap;
use std::path::PathBuf;
use std::sync::RwLock;

use crate::error::SpendError;

use super::file_io::{read_optional, write_atomic};

/// A string-keyed blob store
pub trait KeyValueStore {
    /// Fetch the value stored under `key`, if any
    fn get(&self, key: &str) -> Result<Option<String>, SpendError>;

    /// Store `value` under `key`, replacing any previous value
    fn set(&self, key: &str, value: &str) -> Result<(), SpendError>;
}

/// Stores each key as `<dir>/<key>.json`
#[derive(Debug, Clone)]
pub struct FileStore {
    dir: PathBuf,
}

impl FileStore {
    pub fn new(dir: PathBuf) -> Self {
        Self { dir }
    }

    fn path_for(&self, key: &str) -> Result<PathBuf, SpendError> {
        let valid = !key.is_empty()
            && key
                .chars()
                .all(|c| c.is_ascii_alphanumeric() || c == '-' || c == '_');
        if !valid {
            return Err(SpendError::Storage(format!("Invalid storage key: {:?}", key)));
        }
        Ok(self.dir.join(format!("{}.json", key)))
    }
}

impl KeyValueStore for FileStore {
    fn get(&self, key: &str) -> Result<Option<String>, SpendError> {
        read_optional(self.path_for(key)?)
    }

    fn set(&self, key: &str, value: &str) -> Result<(), SpendError> {
        let path = self.path_for(key)?;
        tracing::debug!(key, path = %path.display(), bytes = value.len(), "writing store key");
        write_atomic(path, value.as_bytes())
    }
}

/// In-memory store, mostly for tests and dry runs
#[derive(Debug, Default)]
pub struct MemoryStore {
    data: RwLock<HashMap<String, String>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }
}

impl KeyValueStore for MemoryStore {
    fn get(&self, key: &str) -> Result<Option<String>, SpendError> {
        let data = self.data.read().map_err(|e| {
            SpendError::Storage(format!("Failed to acquire read lock: {}", e))
        })?;
        Ok(data.get(key).cloned())
    }

    fn set(&self, key: &str, value: &str) -> Result<(), SpendError> {
        let mut data = self.data.write().map_err(|e| {
            SpendError::Storage(format!("Failed to acquire write lock: {}", e))
        })?;
        data.insert(key.to_string(), value.to_string());
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_file_store_round_trip() {
        let temp_dir = TempDir::new().unwrap();
        let store = FileStore::new(temp_dir.path().to_path_buf());

        assert!(store.get("budget-limit").unwrap().is_none());
        store.set("budget-limit", "2000.00").unwrap();
        assert_eq!(store.get("budget-limit").unwrap().as_deref(), Some("2000.00"));
        assert!(temp_dir.path().join("budget-limit.json").exists());
    }

    #[test]
    fn test_file_store_rejects_path_like_keys() {
        let temp_dir = TempDir::new().unwrap();
        let store = FileStore::new(temp_dir.path().to_path_buf());

        assert!(store.set("../escape", "x").is_err());
        assert!(store.get("").is_err());
    }

    #[test]
    fn test_memory_store_overwrites() {
        let store = MemoryStore::new();
        store.set("k", "one").unwrap();
        store.set("k", "two").unwrap();
        assert_eq!(store.get("k").unwrap().as_deref(), Some("two"));
        assert!(store.get("other").unwrap().is_none());
    }
}
