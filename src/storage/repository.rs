//! Persistence adapter for the leaderboard collection
//!
//! The whole collection is stored as one JSON array under a single key.
//! Reads always re-fetch the full collection and every mutation is a full
//! read-modify-write, which is sufficient for a single local writer.

use crate::error::{LeaderboardError, Result};
use crate::storage::store::KeyValueStore;
use crate::types::Leaderboard;
use crate::utils::current_millis;
use std::collections::HashSet;
use std::sync::Arc;
use tracing::{debug, info, warn};

/// Result of a conditional update
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Mutation<R> {
    /// The leaderboard was modified and must be saved
    Changed(R),
    /// Nothing to save
    Unchanged(R),
}

/// Read/write access to the persisted list of leaderboards
#[derive(Clone)]
pub struct LeaderboardRepository {
    store: Arc<dyn KeyValueStore>,
    key: String,
}

impl std::fmt::Debug for LeaderboardRepository {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("LeaderboardRepository")
            .field("key", &self.key)
            .finish()
    }
}

impl LeaderboardRepository {
    /// Create a repository over `store`, keeping the collection under `key`
    pub fn new(store: Arc<dyn KeyValueStore>, key: impl Into<String>) -> Self {
        Self {
            store,
            key: key.into(),
        }
    }

    /// The underlying store, shared with other components
    pub fn store(&self) -> Arc<dyn KeyValueStore> {
        self.store.clone()
    }

    /// Load every leaderboard
    ///
    /// A failed read or unparseable data yields an empty collection so the
    /// application can always start.
    pub fn load_all(&self) -> Vec<Leaderboard> {
        let raw = match self.store.get(&self.key) {
            Ok(Some(raw)) => raw,
            Ok(None) => return Vec::new(),
            Err(e) => {
                warn!("Failed to read leaderboards, starting empty: {}", e);
                return Vec::new();
            }
        };

        match serde_json::from_str::<Vec<Leaderboard>>(&raw) {
            Ok(leaderboards) => leaderboards,
            Err(e) => {
                warn!("Stored leaderboards are corrupt, starting empty: {}", e);
                Vec::new()
            }
        }
    }

    /// Replace the whole persisted collection
    pub fn save_all(&self, leaderboards: &[Leaderboard]) -> Result<()> {
        let serialized = serde_json::to_string(leaderboards)?;
        self.store.set(&self.key, &serialized)?;
        debug!("Saved {} leaderboards", leaderboards.len());
        Ok(())
    }

    /// Get a single leaderboard by id
    pub fn get(&self, id: &str) -> Option<Leaderboard> {
        self.load_all().into_iter().find(|lb| lb.id == id)
    }

    /// Append a new leaderboard
    pub fn insert(&self, leaderboard: Leaderboard) -> Result<()> {
        let mut leaderboards = self.load_all();
        leaderboards.push(leaderboard);
        self.save_all(&leaderboards)
    }

    /// Apply `mutate` to the leaderboard with `id`, bump its `updated_at`,
    /// and persist the collection
    ///
    /// Nothing is written when `mutate` returns an error.
    pub fn update<R>(
        &self,
        id: &str,
        mutate: impl FnOnce(&mut Leaderboard) -> Result<R>,
    ) -> Result<(Leaderboard, R)> {
        self.update_if(id, |lb| mutate(lb).map(Mutation::Changed))
    }

    /// Like [`update`](Self::update), but `mutate` decides on the freshly
    /// loaded leaderboard whether anything changed
    ///
    /// [`Mutation::Unchanged`] skips the write and leaves `updated_at` alone.
    pub fn update_if<R>(
        &self,
        id: &str,
        mutate: impl FnOnce(&mut Leaderboard) -> Result<Mutation<R>>,
    ) -> Result<(Leaderboard, R)> {
        let mut leaderboards = self.load_all();
        let leaderboard = leaderboards
            .iter_mut()
            .find(|lb| lb.id == id)
            .ok_or_else(|| LeaderboardError::LeaderboardNotFound {
                leaderboard_id: id.to_string(),
            })?;

        let result = match mutate(leaderboard)? {
            Mutation::Unchanged(result) => return Ok((leaderboard.clone(), result)),
            Mutation::Changed(result) => result,
        };
        leaderboard.touch(current_millis());
        let updated = leaderboard.clone();

        self.save_all(&leaderboards)?;
        Ok((updated, result))
    }

    /// Remove the leaderboard with `id`, returning whether it existed
    pub fn remove(&self, id: &str) -> Result<bool> {
        let mut leaderboards = self.load_all();
        let before = leaderboards.len();
        leaderboards.retain(|lb| lb.id != id);

        if leaderboards.len() == before {
            return Ok(false);
        }

        self.save_all(&leaderboards)?;
        Ok(true)
    }

    /// Serialize the full collection as a human-readable JSON document
    pub fn export_json(&self) -> Result<String> {
        let leaderboards = self.load_all();
        info!("Exporting {} leaderboards", leaderboards.len());
        Ok(serde_json::to_string_pretty(&leaderboards)?)
    }

    /// Replace the collection with the leaderboards in `document`
    ///
    /// The document is fully validated before anything is written. If the
    /// write itself fails the previous raw value is put back, so the stored
    /// collection is either entirely the old one or entirely the new one.
    pub fn import_json(&self, document: &str) -> Result<usize> {
        let imported = parse_import(document)?;

        let backup = self.store.get(&self.key).ok().flatten();

        if let Err(e) = self.save_all(&imported) {
            warn!("Import write failed, restoring previous data: {}", e);
            let restored = match &backup {
                Some(raw) => self.store.set(&self.key, raw),
                None => self.store.remove(&self.key).map(|_| ()),
            };
            if let Err(restore_err) = restored {
                warn!("Failed to restore previous data: {}", restore_err);
            }
            return Err(e);
        }

        info!("Imported {} leaderboards", imported.len());
        Ok(imported.len())
    }
}

/// Parse and validate an import document without touching storage
pub fn parse_import(document: &str) -> Result<Vec<Leaderboard>> {
    let invalid = |reason: String| LeaderboardError::InvalidImport { reason };

    let value: serde_json::Value =
        serde_json::from_str(document).map_err(|e| invalid(format!("not valid JSON: {}", e)))?;

    let records = value
        .as_array()
        .ok_or_else(|| invalid("expected a list of leaderboards".to_string()))?;

    let mut leaderboards = Vec::with_capacity(records.len());
    let mut seen_ids = HashSet::new();

    for (index, record) in records.iter().enumerate() {
        let id = record.get("id").and_then(|v| v.as_str()).unwrap_or("");
        let name = record.get("name").and_then(|v| v.as_str()).unwrap_or("");
        let has_players = record
            .get("players")
            .map(|v| v.is_array())
            .unwrap_or(false);

        if id.is_empty() || name.trim().is_empty() || !has_players {
            return Err(invalid(format!(
                "record {} must have an id, a name and a players list",
                index
            ))
            .into());
        }

        if !seen_ids.insert(id.to_string()) {
            return Err(invalid(format!("duplicate leaderboard id {}", id)).into());
        }

        let leaderboard: Leaderboard = serde_json::from_value(record.clone())
            .map_err(|e| invalid(format!("record {}: {}", index, e)))?;
        leaderboards.push(leaderboard);
    }

    Ok(leaderboards)
}
