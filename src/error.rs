//! Error types for the leaderboard core
//!
//! Operations return `anyhow::Result` for propagation; the rejection signals a
//! caller may want to surface (validation failures, unknown ids, bad imports)
//! are carried as [`LeaderboardError`] and can be recovered with
//! `err.downcast_ref::<LeaderboardError>()`.

/// Result type alias for convenience
pub type Result<T> = anyhow::Result<T>;

/// Custom error types for specific leaderboard scenarios
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum LeaderboardError {
    #[error("Invalid name: {reason}")]
    InvalidName { reason: String },

    #[error("Player name already in use: {name}")]
    DuplicatePlayerName { name: String },

    #[error("Leaderboard not found: {leaderboard_id}")]
    LeaderboardNotFound { leaderboard_id: String },

    #[error("Player not found: {player_id}")]
    PlayerNotFound { player_id: String },

    #[error("Invalid import data: {reason}")]
    InvalidImport { reason: String },

    #[error("Invalid score update: {reason}")]
    InvalidScoreUpdate { reason: String },

    #[error("Unsupported operation: {reason}")]
    UnsupportedOperation { reason: String },

    #[error("Nothing to save: {reason}")]
    NothingToSave { reason: String },

    #[error("Invalid move: {reason}")]
    InvalidMove { reason: String },

    #[error("Storage error: {message}")]
    StorageError { message: String },

    #[error("Configuration error: {message}")]
    ConfigurationError { message: String },
}

impl LeaderboardError {
    /// Shorthand used by the validation paths
    pub fn invalid_name(reason: impl Into<String>) -> Self {
        Self::InvalidName {
            reason: reason.into(),
        }
    }

    pub fn invalid_move(reason: impl Into<String>) -> Self {
        Self::InvalidMove {
            reason: reason.into(),
        }
    }
}
