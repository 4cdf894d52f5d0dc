//! Ranking and presentation of leaderboards
//!
//! Sorting, rank assignment, top-N truncation and share-text formatting.
//! Everything here is a pure function of its inputs.

pub mod engine;
pub mod share;

// Re-export commonly used types
pub use engine::{high_score, rank_players, sort_players, top_player, truncate_ranked, RankedPlayer};
pub use share::{share_text, share_url};
