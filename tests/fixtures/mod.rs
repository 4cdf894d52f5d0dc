//! Test fixtures and mock implementations for integration testing

#![allow(dead_code)]

use mockall::mock;
use std::sync::Arc;
use universal_leaderboard::config::{GameSettings, MergePolicy};
use universal_leaderboard::error::Result;
use universal_leaderboard::storage::{KeyValueStore, LeaderboardRepository, MockStore};
use universal_leaderboard::types::{Leaderboard, Player, ScoreMode, SortOrder};
use universal_leaderboard::{GameResultRecorder, LeaderboardManager};

pub const LEADERBOARDS_KEY: &str = "universal_leaderboards";

mock! {
    /// Store whose every call is scripted by the test
    pub ScriptedStore {}

    impl KeyValueStore for ScriptedStore {
        fn get(&self, key: &str) -> Result<Option<String>>;
        fn set(&self, key: &str, value: &str) -> Result<()>;
        fn remove(&self, key: &str) -> Result<bool>;
    }
}

/// Manager, recorder and the shared store behind them
pub struct TestSystem {
    pub store: Arc<MockStore>,
    pub manager: LeaderboardManager,
    pub recorder: GameResultRecorder,
}

pub fn create_test_system(policy: MergePolicy) -> TestSystem {
    let store = Arc::new(MockStore::new());
    let repository = LeaderboardRepository::new(store.clone(), LEADERBOARDS_KEY);
    let manager = LeaderboardManager::new(repository.clone());
    let recorder = GameResultRecorder::new(
        repository,
        GameSettings {
            merge_policy: policy,
            ..GameSettings::default()
        },
    );

    TestSystem {
        store,
        manager,
        recorder,
    }
}

pub fn repository_over(store: Arc<dyn KeyValueStore>) -> LeaderboardRepository {
    LeaderboardRepository::new(store, LEADERBOARDS_KEY)
}

/// A leaderboard with fixed ids and timestamps
pub fn sample_leaderboard(id: &str, sort_order: SortOrder, scores: &[(&str, u64)]) -> Leaderboard {
    Leaderboard {
        id: id.to_string(),
        name: format!("Board {}", id),
        description: None,
        score_mode: ScoreMode::TotalPoints,
        sort_order,
        players: scores
            .iter()
            .enumerate()
            .map(|(i, (name, score))| Player::new(format!("{}-p{}", id, i), *name, "🎯").with_score(*score))
            .collect(),
        created_at: 1_700_000_000_000,
        updated_at: 1_700_000_000_000,
    }
}
