//! User leaderboards
//!
//! Creation, player management and manual score editing for leaderboards
//! that users set up themselves.

pub mod manager;
pub mod score;

// Re-export commonly used types
pub use manager::{LeaderboardManager, NewLeaderboard, AVATARS, DEFAULT_AVATAR};
pub use score::{apply_win_delta, ScoreUpdate};
