//! Leaderboard manager implementation
//!
//! This module provides the LeaderboardManager that drives the lifecycle of
//! a leaderboard record: creation, player add/edit/remove, score updates,
//! reset and deletion. Every operation is a full read-modify-write of the
//! persisted collection through [`LeaderboardRepository`].

use crate::error::{LeaderboardError, Result};
use crate::leaderboard::score::{apply_win_delta, ScoreUpdate};
use crate::storage::LeaderboardRepository;
use crate::types::{Leaderboard, Player, ScoreMode, SortOrder};
use crate::utils::{clean_name, generate_time_id, names_match};
use serde::{Deserialize, Serialize};
use tracing::{debug, info};

/// Avatars offered when adding a player
pub const AVATARS: [&str; 16] = [
    "👑", "👻", "🚀", "⚔️", "⭐", "❤️", "💎", "🛡️", "🎮", "🏆", "🎯", "🎨", "🎪", "🎭", "🎸", "🎺",
];

/// Avatar used when none is given
pub const DEFAULT_AVATAR: &str = AVATARS[0];

/// Input for creating a leaderboard
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct NewLeaderboard {
    pub name: String,
    pub description: Option<String>,
    pub score_mode: ScoreMode,
    pub sort_order: SortOrder,
}

impl NewLeaderboard {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            ..Default::default()
        }
    }

    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    pub fn with_score_mode(mut self, score_mode: ScoreMode) -> Self {
        self.score_mode = score_mode;
        self
    }

    pub fn with_sort_order(mut self, sort_order: SortOrder) -> Self {
        self.sort_order = sort_order;
        self
    }
}

/// Manages user leaderboards on top of the repository
#[derive(Debug, Clone)]
pub struct LeaderboardManager {
    repository: LeaderboardRepository,
}

impl LeaderboardManager {
    /// Create a new leaderboard manager
    pub fn new(repository: LeaderboardRepository) -> Self {
        Self { repository }
    }

    pub fn repository(&self) -> &LeaderboardRepository {
        &self.repository
    }

    /// All leaderboards in storage order
    pub fn list(&self) -> Vec<Leaderboard> {
        self.repository.load_all()
    }

    /// Get a leaderboard, failing if it does not exist
    pub fn get(&self, id: &str) -> Result<Leaderboard> {
        self.repository.get(id).ok_or_else(|| {
            LeaderboardError::LeaderboardNotFound {
                leaderboard_id: id.to_string(),
            }
            .into()
        })
    }

    /// Create and persist a new, empty leaderboard
    pub fn create(&self, request: NewLeaderboard) -> Result<Leaderboard> {
        let name = clean_name(&request.name)
            .ok_or_else(|| LeaderboardError::invalid_name("leaderboard name is required"))?;

        let existing = self.repository.load_all();
        let last_id = existing.iter().filter_map(|lb| lb.id.parse::<i64>().ok()).max();
        let (id, now) = generate_time_id(last_id);

        let leaderboard = Leaderboard {
            id,
            name,
            description: request.description.as_deref().and_then(clean_name),
            score_mode: request.score_mode,
            sort_order: request.sort_order,
            players: Vec::new(),
            created_at: now,
            updated_at: now,
        };

        self.repository.insert(leaderboard.clone())?;
        info!(
            "Created leaderboard {} ({}, {})",
            leaderboard.id, leaderboard.score_mode, leaderboard.sort_order
        );
        Ok(leaderboard)
    }

    /// Change the name and/or description of a leaderboard
    ///
    /// An empty description clears it.
    pub fn update_details(
        &self,
        id: &str,
        name: Option<&str>,
        description: Option<&str>,
    ) -> Result<Leaderboard> {
        let name = match name {
            Some(raw) => Some(
                clean_name(raw)
                    .ok_or_else(|| LeaderboardError::invalid_name("leaderboard name is required"))?,
            ),
            None => None,
        };

        let (updated, _) = self.repository.update(id, |lb| {
            if let Some(name) = name {
                lb.name = name;
            }
            if let Some(description) = description {
                lb.description = clean_name(description);
            }
            Ok(())
        })?;
        Ok(updated)
    }

    /// Add a player with score 0
    pub fn add_player(&self, id: &str, name: &str, avatar: &str) -> Result<(Leaderboard, Player)> {
        let name = clean_name(name)
            .ok_or_else(|| LeaderboardError::invalid_name("player name is required"))?;
        let avatar = pick_avatar(avatar);

        let (updated, player) = self.repository.update(id, |lb| {
            ensure_unique_name(lb, &name, None)?;

            let last_id = lb.players.iter().filter_map(|p| p.id.parse::<i64>().ok()).max();
            let (player_id, _) = generate_time_id(last_id);
            let player = Player::new(player_id, name, avatar);
            lb.players.push(player.clone());
            Ok(player)
        })?;

        debug!("Added player {} to leaderboard {}", player.id, id);
        Ok((updated, player))
    }

    /// Rename a player and/or change its avatar
    pub fn edit_player(
        &self,
        id: &str,
        player_id: &str,
        name: &str,
        avatar: &str,
    ) -> Result<Leaderboard> {
        let name = clean_name(name)
            .ok_or_else(|| LeaderboardError::invalid_name("player name is required"))?;
        let avatar = pick_avatar(avatar);

        let (updated, _) = self.repository.update(id, |lb| {
            ensure_unique_name(lb, &name, Some(player_id))?;
            let player = find_player(lb, player_id)?;
            player.name = name;
            player.avatar = avatar;
            Ok(())
        })?;
        Ok(updated)
    }

    /// Remove a player from a leaderboard
    pub fn remove_player(&self, id: &str, player_id: &str) -> Result<Leaderboard> {
        let (updated, _) = self.repository.update(id, |lb| {
            let before = lb.players.len();
            lb.players.retain(|p| p.id != player_id);
            if lb.players.len() == before {
                return Err(LeaderboardError::PlayerNotFound {
                    player_id: player_id.to_string(),
                }
                .into());
            }
            Ok(())
        })?;

        debug!("Removed player {} from leaderboard {}", player_id, id);
        Ok(updated)
    }

    /// Apply a set/add/subtract update to a player's score
    pub fn update_score(&self, id: &str, player_id: &str, update: ScoreUpdate) -> Result<Player> {
        let (_, player) = self.repository.update(id, |lb| {
            let player = find_player(lb, player_id)?;
            player.score = update.apply(player.score);
            Ok(player.clone())
        })?;

        debug!(
            "Score for {} on {} is now {} after {:?}",
            player.name, id, player.score, update
        );
        Ok(player)
    }

    /// ±N win shortcut for `win_count` leaderboards, clamped at zero
    pub fn increment_wins(&self, id: &str, player_id: &str, delta: i64) -> Result<Player> {
        let (_, player) = self.repository.update(id, |lb| {
            if lb.score_mode != ScoreMode::WinCount {
                return Err(LeaderboardError::UnsupportedOperation {
                    reason: "win shortcuts are only available on win_count leaderboards"
                        .to_string(),
                }
                .into());
            }
            let player = find_player(lb, player_id)?;
            player.score = apply_win_delta(player.score, delta);
            Ok(player.clone())
        })?;
        Ok(player)
    }

    /// Set every player's score to zero
    pub fn reset_scores(&self, id: &str) -> Result<Leaderboard> {
        let (updated, _) = self.repository.update(id, |lb| {
            for player in &mut lb.players {
                player.score = 0;
            }
            Ok(())
        })?;

        info!("Reset scores on leaderboard {}", id);
        Ok(updated)
    }

    /// Permanently delete a leaderboard
    pub fn delete(&self, id: &str) -> Result<()> {
        if !self.repository.remove(id)? {
            return Err(LeaderboardError::LeaderboardNotFound {
                leaderboard_id: id.to_string(),
            }
            .into());
        }

        info!("Deleted leaderboard {}", id);
        Ok(())
    }

    /// Delete every leaderboard
    pub fn clear_all(&self) -> Result<usize> {
        let count = self.repository.load_all().len();
        self.repository.save_all(&[])?;
        info!("Cleared {} leaderboards", count);
        Ok(count)
    }
}

fn pick_avatar(avatar: &str) -> String {
    let avatar = avatar.trim();
    if avatar.is_empty() {
        DEFAULT_AVATAR.to_string()
    } else {
        avatar.to_string()
    }
}

fn find_player<'a>(lb: &'a mut Leaderboard, player_id: &str) -> Result<&'a mut Player> {
    lb.player_mut(player_id).ok_or_else(|| {
        LeaderboardError::PlayerNotFound {
            player_id: player_id.to_string(),
        }
        .into()
    })
}

fn ensure_unique_name(lb: &Leaderboard, name: &str, except: Option<&str>) -> Result<()> {
    let taken = lb
        .players
        .iter()
        .any(|p| names_match(&p.name, name) && Some(p.id.as_str()) != except);

    if taken {
        return Err(LeaderboardError::DuplicatePlayerName {
            name: name.to_string(),
        }
        .into());
    }
    Ok(())
}
