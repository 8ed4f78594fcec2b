use std::sync::Arc;

use log::{debug, warn};
use serde_json::Value;

use super::KeyValueStore;
use crate::errors::AppResult;

pub const RECENT_URLS_KEY: &str = "recent-urls";
pub const DEFAULT_RECENT_LIMIT: usize = 10;

/// Most-recently-used video URLs, most recent first, without duplicates.
pub struct RecentUrls {
    store: Arc<dyn KeyValueStore>,
    limit: usize,
}

impl RecentUrls {
    pub fn new(store: Arc<dyn KeyValueStore>) -> Self {
        Self::with_limit(store, DEFAULT_RECENT_LIMIT)
    }

    pub fn with_limit(store: Arc<dyn KeyValueStore>, limit: usize) -> Self {
        Self {
            store,
            limit: limit.max(1),
        }
    }

    pub fn list(&self) -> Vec<String> {
        self.load()
    }

    /// Moves `url` to the front (inserting it if new) and persists the list.
    pub fn add(&self, url: &str) -> AppResult<Vec<String>> {
        let url = url.trim();
        if url.is_empty() {
            return Ok(self.load());
        }

        let entries = push_front(self.load(), url, self.limit);
        self.save(&entries)?;
        debug!("Recorded recent URL {} ({} entries)", url, entries.len());
        Ok(entries)
    }

    pub fn remove(&self, url: &str) -> AppResult<Vec<String>> {
        let mut entries = self.load();
        let before = entries.len();
        entries.retain(|entry| entry != url.trim());
        if entries.len() != before {
            self.save(&entries)?;
        }
        Ok(entries)
    }

    pub fn clear(&self) -> AppResult<()> {
        self.save(&[])
    }

    fn load(&self) -> Vec<String> {
        let Some(value) = self.store.get(RECENT_URLS_KEY) else {
            return Vec::new();
        };

        match serde_json::from_value::<Vec<String>>(value) {
            Ok(mut entries) => {
                entries.truncate(self.limit);
                entries
            }
            Err(e) => {
                warn!("Ignoring corrupt recent URL list: {}", e);
                Vec::new()
            }
        }
    }

    fn save(&self, entries: &[String]) -> AppResult<()> {
        let value = Value::from(entries.to_vec());
        self.store.set(RECENT_URLS_KEY, value);
        self.store.save()
    }
}

fn push_front(mut entries: Vec<String>, url: &str, limit: usize) -> Vec<String> {
    entries.retain(|entry| entry != url);
    entries.insert(0, url.to_string());
    entries.truncate(limit);
    entries
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::services::storage::{JsonFileStore, MemoryStore};
    use serde_json::json;

    fn recent() -> (Arc<MemoryStore>, RecentUrls) {
        let store = Arc::new(MemoryStore::new());
        let recent = RecentUrls::new(store.clone());
        (store, recent)
    }

    #[test]
    fn test_add_moves_existing_entry_to_front() {
        let (_, recent) = recent();
        recent.add("https://youtu.be/a").unwrap();
        recent.add("https://youtu.be/b").unwrap();
        let entries = recent.add("https://youtu.be/a").unwrap();
        assert_eq!(entries, vec!["https://youtu.be/a", "https://youtu.be/b"]);
    }

    #[test]
    fn test_list_is_capped() {
        let (_, recent) = recent();
        for i in 0..15 {
            recent.add(&format!("https://youtu.be/{i}")).unwrap();
        }
        let entries = recent.list();
        assert_eq!(entries.len(), DEFAULT_RECENT_LIMIT);
        assert_eq!(entries[0], "https://youtu.be/14");
        assert_eq!(entries[9], "https://youtu.be/5");
    }

    #[test]
    fn test_remove_single_entry() {
        let (_, recent) = recent();
        recent.add("https://youtu.be/a").unwrap();
        recent.add("https://youtu.be/b").unwrap();
        let entries = recent.remove("https://youtu.be/a").unwrap();
        assert_eq!(entries, vec!["https://youtu.be/b"]);
    }

    #[test]
    fn test_corrupt_value_degrades_to_empty() {
        let (store, recent) = recent();
        store.set(RECENT_URLS_KEY, json!({"not": "a list"}));
        assert!(recent.list().is_empty());
        let entries = recent.add("https://youtu.be/a").unwrap();
        assert_eq!(entries, vec!["https://youtu.be/a"]);
    }

    #[test]
    fn test_blank_url_is_ignored() {
        let (_, recent) = recent();
        assert!(recent.add("   ").unwrap().is_empty());
    }

    #[test]
    fn test_persists_across_reopen() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("settings.json");

        let recent = RecentUrls::new(Arc::new(JsonFileStore::open(&path)));
        recent.add("https://youtu.be/a").unwrap();
        recent.add("https://youtu.be/b").unwrap();

        let reopened = RecentUrls::new(Arc::new(JsonFileStore::open(&path)));
        assert_eq!(reopened.list(), vec!["https://youtu.be/b", "https://youtu.be/a"]);
    }
}
