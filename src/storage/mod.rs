//! Persistent key-value storage for generator settings
//!
//! A minimal capability interface over one string record per key. The
//! settings store treats every failure here as recoverable: in-memory
//! state stays authoritative for the session.

use std::collections::HashMap;
use std::fs;
use std::io;
use std::path::{Path, PathBuf};
use std::sync::{Arc, Mutex};
use tracing::debug;

/// Storage failure conditions
#[derive(Debug, thiserror::Error)]
pub enum StorageError {
    #[error("Storage unavailable: {0}")]
    Unavailable(String),

    #[error("Failed to read key '{key}': {source}")]
    Read {
        key: String,
        #[source]
        source: io::Error,
    },

    #[error("Failed to write key '{key}': {source}")]
    Write {
        key: String,
        #[source]
        source: io::Error,
    },

    #[error("Failed to delete key '{key}': {source}")]
    Delete {
        key: String,
        #[source]
        source: io::Error,
    },
}

/// Capability interface for raw settings persistence
pub trait SettingsStorage: Send + Sync {
    /// Read the record stored under `key`, if any
    fn read_raw(&self, key: &str) -> Result<Option<String>, StorageError>;

    /// Write `value` under `key`, replacing any previous record
    fn write_raw(&self, key: &str, value: &str) -> Result<(), StorageError>;

    /// Remove the record stored under `key`; missing records are not an error
    fn delete_raw(&self, key: &str) -> Result<(), StorageError>;
}

/// File-backed storage: one JSON document per key under a root directory
#[derive(Debug, Clone)]
pub struct FileStorage {
    root: PathBuf,
}

impl FileStorage {
    /// Create a store rooted at the given directory
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    /// The default storage root under the user's config directory
    pub fn default_root() -> Result<PathBuf, StorageError> {
        let config_dir = dirs::config_dir()
            .ok_or_else(|| StorageError::Unavailable("Could not determine config directory".to_string()))?
            .join("typegen");

        Ok(config_dir)
    }

    /// The storage root directory
    pub fn root(&self) -> &Path {
        &self.root
    }

    fn path_for(&self, key: &str) -> PathBuf {
        self.root.join(format!("{key}.json"))
    }
}

impl SettingsStorage for FileStorage {
    fn read_raw(&self, key: &str) -> Result<Option<String>, StorageError> {
        let path = self.path_for(key);
        match fs::read_to_string(&path) {
            Ok(content) => Ok(Some(content)),
            Err(e) if e.kind() == io::ErrorKind::NotFound => Ok(None),
            Err(e) => Err(StorageError::Read {
                key: key.to_string(),
                source: e,
            }),
        }
    }

    fn write_raw(&self, key: &str, value: &str) -> Result<(), StorageError> {
        fs::create_dir_all(&self.root).map_err(|e| StorageError::Write {
            key: key.to_string(),
            source: e,
        })?;

        let path = self.path_for(key);
        debug!("Writing settings record to {:?}", path);
        fs::write(&path, value).map_err(|e| StorageError::Write {
            key: key.to_string(),
            source: e,
        })
    }

    fn delete_raw(&self, key: &str) -> Result<(), StorageError> {
        let path = self.path_for(key);
        match fs::remove_file(&path) {
            Ok(()) => Ok(()),
            Err(e) if e.kind() == io::ErrorKind::NotFound => Ok(()),
            Err(e) => Err(StorageError::Delete {
                key: key.to_string(),
                source: e,
            }),
        }
    }
}

/// In-memory storage for tests and ephemeral sessions
///
/// Clones share the same underlying map, so a clone handed to one store
/// instance observes writes made through another.
#[derive(Debug, Clone, Default)]
pub struct MemoryStorage {
    entries: Arc<Mutex<HashMap<String, String>>>,
}

impl MemoryStorage {
    pub fn new() -> Self {
        Self::default()
    }

    fn entries(&self) -> std::sync::MutexGuard<'_, HashMap<String, String>> {
        self.entries.lock().unwrap_or_else(|e| e.into_inner())
    }
}

impl SettingsStorage for MemoryStorage {
    fn read_raw(&self, key: &str) -> Result<Option<String>, StorageError> {
        Ok(self.entries().get(key).cloned())
    }

    fn write_raw(&self, key: &str, value: &str) -> Result<(), StorageError> {
        self.entries().insert(key.to_string(), value.to_string());
        Ok(())
    }

    fn delete_raw(&self, key: &str) -> Result<(), StorageError> {
        self.entries().remove(key);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_file_storage_round_trip() {
        let temp_dir = TempDir::new().unwrap();
        let storage = FileStorage::new(temp_dir.path());

        assert!(storage.read_raw("settings").unwrap().is_none());

        storage.write_raw("settings", "{\"a\":1}").unwrap();
        assert_eq!(
            storage.read_raw("settings").unwrap().as_deref(),
            Some("{\"a\":1}")
        );

        storage.delete_raw("settings").unwrap();
        assert!(storage.read_raw("settings").unwrap().is_none());
    }

    #[test]
    fn test_file_storage_creates_root_on_write() {
        let temp_dir = TempDir::new().unwrap();
        let root = temp_dir.path().join("nested").join("store");
        let storage = FileStorage::new(&root);

        storage.write_raw("settings", "{}").unwrap();
        assert!(root.join("settings.json").exists());
    }

    #[test]
    fn test_file_storage_delete_is_idempotent() {
        let temp_dir = TempDir::new().unwrap();
        let storage = FileStorage::new(temp_dir.path());

        storage.delete_raw("missing").unwrap();
        storage.delete_raw("missing").unwrap();
    }

    #[test]
    fn test_memory_storage_clones_share_state() {
        let storage = MemoryStorage::new();
        let clone = storage.clone();

        storage.write_raw("settings", "shared").unwrap();
        assert_eq!(clone.read_raw("settings").unwrap().as_deref(), Some("shared"));

        clone.delete_raw("settings").unwrap();
        assert!(storage.read_raw("settings").unwrap().is_none());
    }
}
