//! Local persistence for leaderboards
//!
//! This module provides the string-keyed store contract, its
//! implementations, and the repository that reads and writes the
//! leaderboard collection through it.

pub mod repository;
pub mod store;

// Re-export commonly used types
pub use repository::{parse_import, LeaderboardRepository, Mutation};
pub use store::{FileStore, InMemoryStore, KeyValueStore, MockStore};
