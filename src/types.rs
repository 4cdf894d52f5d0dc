//! Common types used throughout the leaderboard core
//!
//! The serialized shape (camelCase fields, snake_case enum values) is the
//! persisted and exported format, so renames here are format changes.

use serde::{Deserialize, Serialize};

/// Opaque identifier for players, unique within a leaderboard
pub type PlayerId = String;

/// Globally unique identifier for leaderboards
pub type LeaderboardId = String;

/// Milliseconds since the Unix epoch
pub type Timestamp = i64;

/// How scores on a leaderboard are meant to be updated
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ScoreMode {
    /// Increment-style scoring (one point per win)
    #[default]
    WinCount,
    /// Arbitrary numeric scores
    TotalPoints,
}

impl std::fmt::Display for ScoreMode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ScoreMode::WinCount => write!(f, "win_count"),
            ScoreMode::TotalPoints => write!(f, "total_points"),
        }
    }
}

impl std::str::FromStr for ScoreMode {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "win_count" | "wins" => Ok(ScoreMode::WinCount),
            "total_points" | "points" => Ok(ScoreMode::TotalPoints),
            other => Err(anyhow::anyhow!(
                "Invalid score mode '{}'. Use 'win_count' or 'total_points'",
                other
            )),
        }
    }
}

/// Which end of the score range ranks best
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SortOrder {
    /// Higher score ranks better
    #[default]
    Highest,
    /// Lower score ranks better
    Lowest,
}

impl std::fmt::Display for SortOrder {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            SortOrder::Highest => write!(f, "highest"),
            SortOrder::Lowest => write!(f, "lowest"),
        }
    }
}

impl std::str::FromStr for SortOrder {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "highest" => Ok(SortOrder::Highest),
            "lowest" => Ok(SortOrder::Lowest),
            other => Err(anyhow::anyhow!(
                "Invalid sort order '{}'. Use 'highest' or 'lowest'",
                other
            )),
        }
    }
}

/// A participant on a leaderboard
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Player {
    pub id: PlayerId,
    pub name: String,
    #[serde(default)]
    pub avatar: String,
    #[serde(default)]
    pub score: u64,
}

impl Player {
    pub fn new(id: impl Into<PlayerId>, name: impl Into<String>, avatar: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            avatar: avatar.into(),
            score: 0,
        }
    }

    pub fn with_score(mut self, score: u64) -> Self {
        self.score = score;
        self
    }
}

/// A named collection of players with a scoring mode and sort order
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Leaderboard {
    pub id: LeaderboardId,
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(default)]
    pub score_mode: ScoreMode,
    #[serde(default)]
    pub sort_order: SortOrder,
    pub players: Vec<Player>,
    #[serde(default)]
    pub created_at: Timestamp,
    #[serde(default)]
    pub updated_at: Timestamp,
}

impl Leaderboard {
    /// Find a player by id
    pub fn player(&self, player_id: &str) -> Option<&Player> {
        self.players.iter().find(|p| p.id == player_id)
    }

    /// Find a player by id for mutation
    pub fn player_mut(&mut self, player_id: &str) -> Option<&mut Player> {
        self.players.iter_mut().find(|p| p.id == player_id)
    }

    /// Sum of every player's score
    pub fn total_score(&self) -> u64 {
        self.players
            .iter()
            .fold(0u64, |total, p| total.saturating_add(p.score))
    }

    /// Advance `updated_at` to `now`, or by one millisecond when the clock
    /// has not moved past the previous mutation.
    pub fn touch(&mut self, now: Timestamp) {
        self.updated_at = now.max(self.updated_at.saturating_add(1));
    }
}
