//! Universal Leaderboard - local scoreboards and bundled mini-games
//!
//! This crate keeps user-defined leaderboards in a string-keyed local store,
//! ranks and shares them, and feeds results from a set of small games
//! (Snake, Memory, Tic-Tac-Toe, Connect Four, Battleship) into per-game
//! leaderboards.

pub mod config;
pub mod error;
pub mod games;
pub mod leaderboard;
pub mod ranking;
pub mod stats;
pub mod storage;
pub mod types;
pub mod utils;

// Re-export commonly used types and traits
pub use error::{LeaderboardError, Result};
pub use types::*;

// Re-export key components
pub use games::{GameKind, GameResultRecorder, ResultOutcome};
pub use leaderboard::{LeaderboardManager, NewLeaderboard, ScoreUpdate};
pub use storage::{FileStore, InMemoryStore, KeyValueStore, LeaderboardRepository};

/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
