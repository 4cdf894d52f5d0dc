//! Recently used player names and arcade-style initials

use crate::error::Result;
use crate::storage::KeyValueStore;
use std::sync::Arc;
use tracing::{debug, warn};

/// Maximum length of arcade initials
pub const MAX_INITIALS: usize = 3;

/// Upper-case `input` and keep at most three ASCII letters
pub fn normalize_initials(input: &str) -> String {
    input
        .chars()
        .filter(|c| c.is_ascii_alphabetic())
        .map(|c| c.to_ascii_uppercase())
        .take(MAX_INITIALS)
        .collect()
}

/// Whether `input` is already a full set of initials
pub fn is_complete_initials(input: &str) -> bool {
    input.len() == MAX_INITIALS && input.chars().all(|c| c.is_ascii_uppercase())
}

/// Most-recent-first list of distinct player names, persisted as a JSON array
pub struct NameHistory {
    store: Arc<dyn KeyValueStore>,
    key: String,
    limit: usize,
}

impl std::fmt::Debug for NameHistory {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("NameHistory")
            .field("key", &self.key)
            .field("limit", &self.limit)
            .finish()
    }
}

impl NameHistory {
    pub fn new(store: Arc<dyn KeyValueStore>, key: impl Into<String>, limit: usize) -> Self {
        Self {
            store,
            key: key.into(),
            limit,
        }
    }

    /// Stored names, or an empty list when nothing readable is stored
    pub fn load(&self) -> Vec<String> {
        let raw = match self.store.get(&self.key) {
            Ok(Some(raw)) => raw,
            Ok(None) => return Vec::new(),
            Err(e) => {
                warn!("Failed to read name history: {}", e);
                return Vec::new();
            }
        };

        match serde_json::from_str::<Vec<String>>(&raw) {
            Ok(names) => names,
            Err(e) => {
                warn!("Ignoring corrupt name history under {}: {}", self.key, e);
                Vec::new()
            }
        }
    }

    /// Move `name` (upper-cased) to the front, dropping the oldest past the limit
    pub fn remember(&self, name: &str) -> Result<Vec<String>> {
        let name = name.trim().to_uppercase();
        let mut names = self.load();
        if name.is_empty() {
            return Ok(names);
        }

        names.retain(|existing| existing != &name);
        names.insert(0, name);
        names.truncate(self.limit);

        self.store.set(&self.key, &serde_json::to_string(&names)?)?;
        debug!("Name history now holds {} names", names.len());
        Ok(names)
    }

    /// Stored names other than `exclude`, for picking the second player
    pub fn available(&self, exclude: Option<&str>) -> Vec<String> {
        let exclude = exclude.map(|n| n.trim().to_uppercase());
        self.load()
            .into_iter()
            .filter(|name| Some(name) != exclude.as_ref())
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::storage::{InMemoryStore, MockStore};

    fn create_test_history(limit: usize) -> NameHistory {
        NameHistory::new(Arc::new(InMemoryStore::new()), "tictactoe_player_names", limit)
    }

    #[test]
    fn test_normalize_initials() {
        assert_eq!(normalize_initials("abc"), "ABC");
        assert_eq!(normalize_initials("a1b-c d"), "ABC");
        assert_eq!(normalize_initials("zoltan"), "ZOL");
        assert_eq!(normalize_initials("42"), "");

        assert!(is_complete_initials("ABC"));
        assert!(!is_complete_initials("AB"));
        assert!(!is_complete_initials("abc"));
    }

    #[test]
    fn test_remember_orders_and_dedupes() {
        let history = create_test_history(10);
        history.remember("alice").unwrap();
        history.remember("bob").unwrap();
        history.remember(" Alice ").unwrap();

        assert_eq!(history.load(), vec!["ALICE", "BOB"]);
    }

    #[test]
    fn test_remember_respects_limit() {
        let history = create_test_history(3);
        for name in ["a", "b", "c", "d"] {
            history.remember(name).unwrap();
        }
        assert_eq!(history.load(), vec!["D", "C", "B"]);
    }

    #[test]
    fn test_blank_names_not_remembered() {
        let history = create_test_history(10);
        history.remember("amy").unwrap();
        assert_eq!(history.remember("   ").unwrap(), vec!["AMY"]);
    }

    #[test]
    fn test_available_excludes_current_player() {
        let history = create_test_history(10);
        history.remember("one").unwrap();
        history.remember("two").unwrap();

        assert_eq!(history.available(Some("two")), vec!["ONE"]);
        assert_eq!(history.available(None).len(), 2);
    }

    #[test]
    fn test_corrupt_history_reads_empty() {
        let store = Arc::new(MockStore::new());
        store.preset("tictactoe_player_names", "{not json");
        let history = NameHistory::new(store.clone(), "tictactoe_player_names", 10);
        assert!(history.load().is_empty());

        store.set_fail_reads(true);
        assert!(history.load().is_empty());
    }
}
