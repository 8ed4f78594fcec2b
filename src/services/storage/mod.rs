//! Small key-value persistence used for settings and the recent-URL list.
//!
//! The store mirrors the get / set / save shape of a UI settings store: values
//! are JSON, mutations stay in memory until [`KeyValueStore::save`] persists them.

pub mod recent;

use std::collections::BTreeMap;
use std::fs;
use std::path::{Path, PathBuf};

use directories::ProjectDirs;
use log::{debug, warn};
use parking_lot::Mutex;
use serde_json::Value;

use crate::errors::{AppError, AppResult};

pub use recent::RecentUrls;

pub const STORE_FILE_NAME: &str = "settings.json";

pub trait KeyValueStore: Send + Sync {
    fn get(&self, key: &str) -> Option<Value>;
    fn set(&self, key: &str, value: Value);
    fn save(&self) -> AppResult<()>;
}

/// Default location of the settings file in the per-user data directory.
pub fn default_store_path() -> Option<PathBuf> {
    let dirs = ProjectDirs::from("com", "xcaption", "xcaption")?;
    Some(dirs.data_dir().join(STORE_FILE_NAME))
}

/// JSON object persisted as a single file.
pub struct JsonFileStore {
    path: PathBuf,
    entries: Mutex<BTreeMap<String, Value>>,
}

impl JsonFileStore {
    /// Opens the store at `path`. A missing or unreadable file yields an empty
    /// store; it is created on the first `save`.
    pub fn open(path: impl Into<PathBuf>) -> Self {
        let path = path.into();
        let entries = Self::read_entries(&path);
        debug!("Opened store {} with {} keys", path.display(), entries.len());
        Self {
            path,
            entries: Mutex::new(entries),
        }
    }

    fn read_entries(path: &Path) -> BTreeMap<String, Value> {
        let contents = match fs::read_to_string(path) {
            Ok(contents) => contents,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => return BTreeMap::new(),
            Err(e) => {
                warn!("Failed to read store {}: {}", path.display(), e);
                return BTreeMap::new();
            }
        };

        match serde_json::from_str::<BTreeMap<String, Value>>(&contents) {
            Ok(entries) => entries,
            Err(e) => {
                warn!("Store {} is corrupt, starting empty: {}", path.display(), e);
                BTreeMap::new()
            }
        }
    }
}

impl KeyValueStore for JsonFileStore {
    fn get(&self, key: &str) -> Option<Value> {
        self.entries.lock().get(key).cloned()
    }

    fn set(&self, key: &str, value: Value) {
        self.entries.lock().insert(key.to_string(), value);
    }

    fn save(&self) -> AppResult<()> {
        let contents = {
            let entries = self.entries.lock();
            serde_json::to_string_pretty(&*entries)?
        };

        if let Some(parent) = self.path.parent() {
            if !parent.as_os_str().is_empty() {
                fs::create_dir_all(parent).map_err(|e| {
                    AppError::StorageError(format!(
                        "Failed to create store directory {}: {}",
                        parent.display(),
                        e
                    ))
                })?;
            }
        }

        fs::write(&self.path, contents).map_err(|e| {
            AppError::StorageError(format!("Failed to persist store {}: {}", self.path.display(), e))
        })?;
        debug!("Saved store {}", self.path.display());
        Ok(())
    }
}

/// Non-persistent store, used when no data directory is available and in tests.
#[derive(Default)]
pub struct MemoryStore {
    entries: Mutex<BTreeMap<String, Value>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }
}

impl KeyValueStore for MemoryStore {
    fn get(&self, key: &str) -> Option<Value> {
        self.entries.lock().get(key).cloned()
    }

    fn set(&self, key: &str, value: Value) {
        self.entries.lock().insert(key.to_string(), value);
    }

    fn save(&self) -> AppResult<()> {
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;
    use tempfile::tempdir;

    #[test]
    fn test_file_store_round_trip() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("nested").join(STORE_FILE_NAME);

        let store = JsonFileStore::open(&path);
        assert!(store.get("recent-urls").is_none());
        store.set("recent-urls", json!(["https://youtu.be/abc"]));
        store.save().unwrap();

        let reopened = JsonFileStore::open(&path);
        assert_eq!(reopened.get("recent-urls"), Some(json!(["https://youtu.be/abc"])));
    }

    #[test]
    fn test_corrupt_file_opens_empty() {
        let dir = tempdir().unwrap();
        let path = dir.path().join(STORE_FILE_NAME);
        fs::write(&path, "{not json").unwrap();

        let store = JsonFileStore::open(&path);
        assert!(store.get("anything").is_none());
        store.set("k", json!(1));
        store.save().unwrap();
        assert_eq!(JsonFileStore::open(&path).get("k"), Some(json!(1)));
    }
}
