//! Property-based tests for ranking, scoring and result ingestion
//!
//! Uses `proptest` to check the ordering, clamping and capping rules under
//! random inputs.

mod fixtures;

use proptest::prelude::*;
use std::sync::Arc;

use universal_leaderboard::config::{GameSettings, MergePolicy};
use universal_leaderboard::games::scoring::{memory_score, snake_tick_interval};
use universal_leaderboard::leaderboard::ScoreUpdate;
use universal_leaderboard::ranking::{rank_players, sort_players};
use universal_leaderboard::storage::{InMemoryStore, LeaderboardRepository};
use universal_leaderboard::types::{Leaderboard, Player, ScoreMode, SortOrder};
use universal_leaderboard::GameResultRecorder;

use fixtures::{sample_leaderboard, LEADERBOARDS_KEY};

fn arb_sort_order() -> impl Strategy<Value = SortOrder> {
    prop_oneof![Just(SortOrder::Highest), Just(SortOrder::Lowest)]
}

fn arb_scores() -> impl Strategy<Value = Vec<u64>> {
    prop::collection::vec(0u64..50, 0..30)
}

fn arb_score_mode() -> impl Strategy<Value = ScoreMode> {
    prop_oneof![Just(ScoreMode::WinCount), Just(ScoreMode::TotalPoints)]
}

fn arb_name() -> impl Strategy<Value = String> {
    "[A-Za-z0-9Éü🏆]\\PC{0,12}"
}

fn arb_avatar() -> impl Strategy<Value = String> {
    prop_oneof![
        prop::sample::select(vec!["👑", "🎯", "🐍", "⚓", ""]).prop_map(String::from),
        "\\PC{0,3}",
    ]
}

fn arb_player() -> impl Strategy<Value = Player> {
    ("\\PC{1,16}", arb_name(), arb_avatar(), any::<u64>())
        .prop_map(|(id, name, avatar, score)| Player::new(id, name, avatar).with_score(score))
}

fn arb_leaderboards() -> impl Strategy<Value = Vec<Leaderboard>> {
    let board = (
        arb_name(),
        prop::option::of("\\PC{0,24}"),
        arb_score_mode(),
        arb_sort_order(),
        prop::collection::vec(arb_player(), 0..6),
        any::<i64>(),
        any::<i64>(),
    );
    prop::collection::vec(board, 0..5).prop_map(|boards| {
        boards
            .into_iter()
            .enumerate()
            .map(
                |(i, (name, description, score_mode, sort_order, players, created_at, updated_at))| {
                    Leaderboard {
                        id: format!("{}-{}", i, name),
                        name,
                        description,
                        score_mode,
                        sort_order,
                        players,
                        created_at,
                        updated_at,
                    }
                },
            )
            .collect()
    })
}

fn players_from(scores: &[u64]) -> Vec<Player> {
    scores
        .iter()
        .enumerate()
        .map(|(i, score)| Player::new(i.to_string(), format!("P{}", i), "🎯").with_score(*score))
        .collect()
}

fn create_recorder(policy: MergePolicy, cap: usize) -> GameResultRecorder {
    let repository = LeaderboardRepository::new(Arc::new(InMemoryStore::new()), LEADERBOARDS_KEY);
    GameResultRecorder::new(
        repository,
        GameSettings {
            merge_policy: policy,
            max_game_entries: cap,
            ..GameSettings::default()
        },
    )
}

// ---------------------------------------------------------------------------
// Ranking
// ---------------------------------------------------------------------------

proptest! {
    #[test]
    fn sorted_players_are_ordered_and_stable(scores in arb_scores(), order in arb_sort_order()) {
        let sorted = sort_players(&players_from(&scores), order);
        prop_assert_eq!(sorted.len(), scores.len());

        for pair in sorted.windows(2) {
            let (a, b) = (&pair[0], &pair[1]);
            match order {
                SortOrder::Highest => prop_assert!(a.score >= b.score),
                SortOrder::Lowest => prop_assert!(a.score <= b.score),
            }
            // Ids are insertion indexes, so ties must keep ascending ids
            if a.score == b.score {
                let (ia, ib): (usize, usize) = (a.id.parse().unwrap(), b.id.parse().unwrap());
                prop_assert!(ia < ib);
            }
        }
    }

    #[test]
    fn ranks_are_one_based_positions(scores in arb_scores(), order in arb_sort_order()) {
        let pairs: Vec<(String, u64)> = scores.iter().enumerate().map(|(i, s)| (format!("P{}", i), *s)).collect();
        let refs: Vec<(&str, u64)> = pairs.iter().map(|(n, s)| (n.as_str(), *s)).collect();
        let lb = sample_leaderboard("1", order, &refs);

        let ranked = rank_players(&lb);
        for (i, entry) in ranked.iter().enumerate() {
            prop_assert_eq!(entry.rank, i + 1);
        }
    }
}

// ---------------------------------------------------------------------------
// Score updates
// ---------------------------------------------------------------------------

proptest! {
    #[test]
    fn subtract_never_goes_below_zero(current in 0u64..1_000, delta in -1_000i64..1_000) {
        let result = ScoreUpdate::Subtract(delta).apply(current);
        prop_assert!(result <= current);
        if delta > 0 {
            prop_assert_eq!(result, current.saturating_sub(delta as u64));
        }
    }

    #[test]
    fn add_ignores_negative_deltas(current in 0u64..1_000, delta in -1_000i64..1_000) {
        let result = ScoreUpdate::Add(delta).apply(current);
        prop_assert!(result >= current);
        if delta <= 0 {
            prop_assert_eq!(result, current);
        }
    }

    #[test]
    fn set_is_rounded_and_non_negative(value in -1_000.0..1_000.0f64) {
        let result = ScoreUpdate::Set(value).apply(7);
        if value <= 0.0 {
            prop_assert_eq!(result, 0);
        } else {
            prop_assert_eq!(result, value.round() as u64);
        }
    }
}

// ---------------------------------------------------------------------------
// Score formulas
// ---------------------------------------------------------------------------

proptest! {
    #[test]
    fn memory_score_bounded_by_double_base(
        pairs in 1u32..20,
        moves in 0u32..200,
        seconds in 0.0..600.0f64,
        level in 0.5..3.0f64,
    ) {
        let score = memory_score(pairs, moves, seconds, level);
        prop_assert!(score as f64 <= 2000.0 * level);
        if moves <= pairs && seconds <= 10.0 {
            prop_assert!(score as f64 >= 1000.0 * level - 1.0);
        }
    }

    #[test]
    fn snake_interval_never_below_floor(level in 0u8..=255) {
        prop_assert!(snake_tick_interval(level).as_millis() >= 80);
        prop_assert!(snake_tick_interval(level.saturating_add(1)) <= snake_tick_interval(level));
    }
}

// ---------------------------------------------------------------------------
// Result ingestion
// ---------------------------------------------------------------------------

proptest! {
    #![proptest_config(ProptestConfig::with_cases(32))]

    #[test]
    fn game_boards_respect_cap_and_order(
        results in prop::collection::vec((0usize..6, 0u64..500), 1..40),
        cap in 1usize..10,
        append in any::<bool>(),
    ) {
        let policy = if append { MergePolicy::AlwaysAppend } else { MergePolicy::MergeIfHigher };
        let recorder = create_recorder(policy, cap);

        for (name, score) in &results {
            recorder.add_result("snake", &format!("N{}", name), *score).unwrap();
        }

        let lb = recorder.game_leaderboard("snake").unwrap();
        prop_assert!(lb.players.len() <= cap);
        for pair in lb.players.windows(2) {
            prop_assert!(pair[0].score >= pair[1].score);
        }
    }

    #[test]
    fn merge_keeps_best_score_per_name(results in prop::collection::vec((0usize..4, 0u64..500), 1..30)) {
        let recorder = create_recorder(MergePolicy::MergeIfHigher, 100);
        for (name, score) in &results {
            recorder.add_result("memory", &format!("N{}", name), *score).unwrap();
        }

        let lb = recorder.game_leaderboard("memory").unwrap();
        for player in &lb.players {
            let best = results
                .iter()
                .filter(|(name, _)| format!("N{}", name) == player.name)
                .map(|(_, score)| *score)
                .max()
                .unwrap();
            prop_assert_eq!(player.score, best);
        }

        let distinct: std::collections::HashSet<_> = results.iter().map(|(n, _)| n).collect();
        prop_assert_eq!(lb.players.len(), distinct.len());
    }
}

// ---------------------------------------------------------------------------
// Export / import
// ---------------------------------------------------------------------------

proptest! {
    #![proptest_config(ProptestConfig::with_cases(64))]

    #[test]
    fn import_of_export_restores_collection(boards in arb_leaderboards()) {
        let source = LeaderboardRepository::new(Arc::new(InMemoryStore::new()), LEADERBOARDS_KEY);
        source.save_all(&boards).unwrap();
        let exported = source.export_json().unwrap();

        let target = LeaderboardRepository::new(Arc::new(InMemoryStore::new()), LEADERBOARDS_KEY);
        prop_assert_eq!(target.import_json(&exported).unwrap(), boards.len());
        prop_assert_eq!(target.load_all(), boards.clone());

        // Importing into the same repository is also lossless
        prop_assert_eq!(source.import_json(&exported).unwrap(), boards.len());
        prop_assert_eq!(source.load_all(), boards);
    }
}
