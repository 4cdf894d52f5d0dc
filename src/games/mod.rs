//! Bundled mini-games and their leaderboards
//!
//! Each game engine is a pure state machine driven by the caller. Results
//! reach the per-game leaderboards through [`GameResultRecorder`], either as
//! a computed score (Snake, Memory) or as session win counts (Tic-Tac-Toe,
//! Connect Four, Battleship).

pub mod battleship;
pub mod connect_four;
pub mod memory;
pub mod names;
pub mod results;
pub mod scoring;
pub mod session;
pub mod snake;
pub mod tictactoe;

use serde::{Deserialize, Serialize};

// Re-export commonly used types
pub use results::{GameResultRecorder, ResultOutcome};
pub use scoring::{memory_score, snake_score, snake_tick_interval, MemoryDifficulty};
pub use session::{PlayerNames, SessionTally};

/// The games bundled with the application
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum GameKind {
    Snake,
    Memory,
    TicTacToe,
    ConnectFour,
    Battleship,
}

impl GameKind {
    pub const ALL: [GameKind; 5] = [
        GameKind::Snake,
        GameKind::Memory,
        GameKind::TicTacToe,
        GameKind::ConnectFour,
        GameKind::Battleship,
    ];

    /// Short id used in the `game_<id>` leaderboard id
    pub fn slug(&self) -> &'static str {
        match self {
            GameKind::Snake => "snake",
            GameKind::Memory => "memory",
            GameKind::TicTacToe => "tictactoe",
            GameKind::ConnectFour => "connectfour",
            GameKind::Battleship => "battleship",
        }
    }

    pub fn display_name(&self) -> &'static str {
        match self {
            GameKind::Snake => "SNAKE",
            GameKind::Memory => "MEMORY",
            GameKind::TicTacToe => "INFINITE TIC TAC TOE",
            GameKind::ConnectFour => "CONNECT FOUR",
            GameKind::Battleship => "BATTLESHIP",
        }
    }

    /// Avatar given to players entered through this game
    pub fn avatar(&self) -> &'static str {
        match self {
            GameKind::Snake => "🐍",
            GameKind::Memory => "🧠",
            GameKind::TicTacToe => "❌",
            GameKind::ConnectFour => "🔴",
            GameKind::Battleship => "⚓",
        }
    }

    /// Whether results are session win counts rather than computed points
    pub fn is_win_count(&self) -> bool {
        matches!(
            self,
            GameKind::TicTacToe | GameKind::ConnectFour | GameKind::Battleship
        )
    }
}

impl std::fmt::Display for GameKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.slug())
    }
}

impl std::str::FromStr for GameKind {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let normalized: String = s
            .trim()
            .to_lowercase()
            .chars()
            .filter(|c| c.is_ascii_alphanumeric())
            .collect();

        GameKind::ALL
            .into_iter()
            .find(|kind| kind.slug() == normalized)
            .ok_or_else(|| anyhow::anyhow!("Unknown game '{}'", s))
    }
}

/// The two sides of the turn-based games
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Mark {
    X,
    O,
}

impl Mark {
    pub fn opponent(&self) -> Mark {
        match self {
            Mark::X => Mark::O,
            Mark::O => Mark::X,
        }
    }
}

impl std::fmt::Display for Mark {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Mark::X => write!(f, "X"),
            Mark::O => write!(f, "O"),
        }
    }
}
