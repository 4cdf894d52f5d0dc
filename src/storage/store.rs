//! Key-value store interface and implementations
//!
//! The leaderboard core only needs a synchronous, string-keyed get/set
//! store. This module defines that contract together with an in-memory
//! implementation, a JSON-file implementation used by the CLI, and a mock
//! that records writes for tests.

use crate::error::{LeaderboardError, Result};
use std::collections::{BTreeMap, HashMap};
use std::path::{Path, PathBuf};
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Mutex, RwLock};
use tracing::{debug, warn};

/// Trait for string-keyed storage operations
pub trait KeyValueStore: Send + Sync {
    /// Read the value stored under `key`
    fn get(&self, key: &str) -> Result<Option<String>>;

    /// Store `value` under `key`, replacing any previous value
    fn set(&self, key: &str, value: &str) -> Result<()>;

    /// Remove `key`, returning whether it was present
    fn remove(&self, key: &str) -> Result<bool>;
}

fn lock_error(kind: &str) -> LeaderboardError {
    LeaderboardError::StorageError {
        message: format!("Failed to acquire store {} lock", kind),
    }
}

/// In-memory key-value store
#[derive(Debug, Default)]
pub struct InMemoryStore {
    entries: RwLock<HashMap<String, String>>,
}

impl InMemoryStore {
    /// Create an empty in-memory store
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of keys currently held
    pub fn len(&self) -> usize {
        self.entries.read().map(|e| e.len()).unwrap_or(0)
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl KeyValueStore for InMemoryStore {
    fn get(&self, key: &str) -> Result<Option<String>> {
        let entries = self.entries.read().map_err(|_| lock_error("read"))?;
        Ok(entries.get(key).cloned())
    }

    fn set(&self, key: &str, value: &str) -> Result<()> {
        let mut entries = self.entries.write().map_err(|_| lock_error("write"))?;
        entries.insert(key.to_string(), value.to_string());
        Ok(())
    }

    fn remove(&self, key: &str) -> Result<bool> {
        let mut entries = self.entries.write().map_err(|_| lock_error("write"))?;
        Ok(entries.remove(key).is_some())
    }
}

/// Key-value store persisted as a single JSON object on disk
///
/// Every call re-reads the file; writes go to a sibling temp file that is
/// renamed over the original so a crash never leaves a half-written store.
#[derive(Debug)]
pub struct FileStore {
    path: PathBuf,
    guard: Mutex<()>,
}

impl FileStore {
    /// Open (or lazily create) the store at `path`
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            guard: Mutex::new(()),
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn read_entries(&self) -> Result<BTreeMap<String, String>> {
        if !self.path.exists() {
            return Ok(BTreeMap::new());
        }

        let contents = std::fs::read_to_string(&self.path).map_err(|e| {
            LeaderboardError::StorageError {
                message: format!("Failed to read {}: {}", self.path.display(), e),
            }
        })?;

        if contents.trim().is_empty() {
            return Ok(BTreeMap::new());
        }

        serde_json::from_str(&contents).map_err(|e| {
            LeaderboardError::StorageError {
                message: format!("Corrupt store file {}: {}", self.path.display(), e),
            }
            .into()
        })
    }

    fn write_entries(&self, entries: &BTreeMap<String, String>) -> Result<()> {
        if let Some(parent) = self.path.parent() {
            if !parent.as_os_str().is_empty() {
                std::fs::create_dir_all(parent).map_err(|e| LeaderboardError::StorageError {
                    message: format!("Failed to create {}: {}", parent.display(), e),
                })?;
            }
        }

        let serialized = serde_json::to_string_pretty(entries)?;
        let tmp_path = self.path.with_extension("tmp");
        std::fs::write(&tmp_path, serialized).map_err(|e| LeaderboardError::StorageError {
            message: format!("Failed to write {}: {}", tmp_path.display(), e),
        })?;
        std::fs::rename(&tmp_path, &self.path).map_err(|e| LeaderboardError::StorageError {
            message: format!("Failed to replace {}: {}", self.path.display(), e),
        })?;

        debug!("Wrote {} keys to {}", entries.len(), self.path.display());
        Ok(())
    }

    /// Load entries for a write, starting over if the existing file is unreadable
    fn entries_for_write(&self) -> BTreeMap<String, String> {
        match self.read_entries() {
            Ok(entries) => entries,
            Err(e) => {
                warn!("Discarding unreadable store contents: {}", e);
                BTreeMap::new()
            }
        }
    }
}

impl KeyValueStore for FileStore {
    fn get(&self, key: &str) -> Result<Option<String>> {
        let _guard = self.guard.lock().map_err(|_| lock_error("file"))?;
        Ok(self.read_entries()?.remove(key))
    }

    fn set(&self, key: &str, value: &str) -> Result<()> {
        let _guard = self.guard.lock().map_err(|_| lock_error("file"))?;
        let mut entries = self.entries_for_write();
        entries.insert(key.to_string(), value.to_string());
        self.write_entries(&entries)
    }

    fn remove(&self, key: &str) -> Result<bool> {
        let _guard = self.guard.lock().map_err(|_| lock_error("file"))?;
        let mut entries = self.entries_for_write();
        let removed = entries.remove(key).is_some();
        if removed {
            self.write_entries(&entries)?;
        }
        Ok(removed)
    }
}

/// Mock key-value store for testing
#[derive(Debug, Default)]
pub struct MockStore {
    entries: RwLock<HashMap<String, String>>,
    set_calls: RwLock<Vec<(String, String)>>,
    fail_reads: AtomicBool,
    fail_writes: AtomicBool,
}

impl MockStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Get all set calls made (for testing)
    pub fn get_set_calls(&self) -> Vec<(String, String)> {
        self.set_calls
            .read()
            .map(|calls| calls.clone())
            .unwrap_or_default()
    }

    /// Clear recorded set calls (for testing)
    pub fn clear_set_calls(&self) {
        if let Ok(mut calls) = self.set_calls.write() {
            calls.clear();
        }
    }

    /// Preset a raw value without recording a set call
    pub fn preset(&self, key: &str, value: &str) {
        if let Ok(mut entries) = self.entries.write() {
            entries.insert(key.to_string(), value.to_string());
        }
    }

    /// Make every subsequent `get` fail
    pub fn set_fail_reads(&self, fail: bool) {
        self.fail_reads.store(fail, Ordering::SeqCst);
    }

    /// Make every subsequent `set` fail
    pub fn set_fail_writes(&self, fail: bool) {
        self.fail_writes.store(fail, Ordering::SeqCst);
    }
}

impl KeyValueStore for MockStore {
    fn get(&self, key: &str) -> Result<Option<String>> {
        if self.fail_reads.load(Ordering::SeqCst) {
            return Err(LeaderboardError::StorageError {
                message: "Simulated read failure".to_string(),
            }
            .into());
        }

        let entries = self.entries.read().map_err(|_| lock_error("read"))?;
        Ok(entries.get(key).cloned())
    }

    fn set(&self, key: &str, value: &str) -> Result<()> {
        if self.fail_writes.load(Ordering::SeqCst) {
            return Err(LeaderboardError::StorageError {
                message: "Simulated write failure".to_string(),
            }
            .into());
        }

        // Record the call for testing
        if let Ok(mut calls) = self.set_calls.write() {
            calls.push((key.to_string(), value.to_string()));
        }

        let mut entries = self.entries.write().map_err(|_| lock_error("write"))?;
        entries.insert(key.to_string(), value.to_string());
        Ok(())
    }

    fn remove(&self, key: &str) -> Result<bool> {
        let mut entries = self.entries.write().map_err(|_| lock_error("write"))?;
        Ok(entries.remove(key).is_some())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_in_memory_store_basic_operations() {
        let store = InMemoryStore::new();
        assert!(store.get("missing").unwrap().is_none());

        store.set("key", "value").unwrap();
        assert_eq!(store.get("key").unwrap().as_deref(), Some("value"));

        store.set("key", "other").unwrap();
        assert_eq!(store.get("key").unwrap().as_deref(), Some("other"));
        assert_eq!(store.len(), 1);

        assert!(store.remove("key").unwrap());
        assert!(!store.remove("key").unwrap());
        assert!(store.is_empty());
    }

    #[test]
    fn test_file_store_persists_across_instances() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nested").join("store.json");

        let store = FileStore::new(&path);
        assert!(store.get("a").unwrap().is_none());
        store.set("a", "[1,2,3]").unwrap();
        store.set("b", "hello").unwrap();

        let reopened = FileStore::new(&path);
        assert_eq!(reopened.get("a").unwrap().as_deref(), Some("[1,2,3]"));
        assert_eq!(reopened.get("b").unwrap().as_deref(), Some("hello"));

        assert!(reopened.remove("a").unwrap());
        assert!(store.get("a").unwrap().is_none());
    }

    #[test]
    fn test_file_store_corrupt_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("store.json");
        std::fs::write(&path, "{ not json").unwrap();

        let store = FileStore::new(&path);
        assert!(store.get("a").is_err());

        // A write starts over from an empty map
        store.set("a", "1").unwrap();
        assert_eq!(store.get("a").unwrap().as_deref(), Some("1"));
    }

    #[test]
    fn test_mock_store_records_and_fails() {
        let store = MockStore::new();
        store.set("k", "v").unwrap();

        let calls = store.get_set_calls();
        assert_eq!(calls, vec![("k".to_string(), "v".to_string())]);

        store.set_fail_writes(true);
        assert!(store.set("k", "w").is_err());
        assert_eq!(store.get("k").unwrap().as_deref(), Some("v"));

        store.set_fail_reads(true);
        assert!(store.get("k").is_err());

        store.clear_set_calls();
        assert!(store.get_set_calls().is_empty());
    }
}
