//! Performance benchmarks for ranking and result ingestion

use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};
use std::sync::Arc;
use universal_leaderboard::config::{GameSettings, MergePolicy};
use universal_leaderboard::games::scoring::{memory_score, snake_tick_interval};
use universal_leaderboard::ranking::{rank_players, share_text, sort_players};
use universal_leaderboard::stats::StatsReport;
use universal_leaderboard::types::{Leaderboard, Player, ScoreMode, SortOrder};
use universal_leaderboard::{GameResultRecorder, InMemoryStore, LeaderboardRepository};

fn create_bench_leaderboard(id: usize, size: usize) -> Leaderboard {
    Leaderboard {
        id: format!("bench-{}", id),
        name: format!("Bench {}", id),
        description: Some("benchmark board".to_string()),
        score_mode: ScoreMode::TotalPoints,
        sort_order: SortOrder::Highest,
        players: (0..size)
            .map(|i| Player::new(format!("p{}", i), format!("Player{}", i), "🎯").with_score((i as u64 * 7919) % 1000))
            .collect(),
        created_at: 1_700_000_000_000,
        updated_at: 1_700_000_000_000,
    }
}

fn create_bench_recorder(policy: MergePolicy) -> GameResultRecorder {
    let repository = LeaderboardRepository::new(Arc::new(InMemoryStore::new()), "bench_leaderboards");
    GameResultRecorder::new(
        repository,
        GameSettings {
            merge_policy: policy,
            ..GameSettings::default()
        },
    )
}

fn bench_ranking(c: &mut Criterion) {
    let mut group = c.benchmark_group("ranking");

    for size in [10, 100, 1000] {
        let lb = create_bench_leaderboard(0, size);

        group.bench_with_input(BenchmarkId::new("sort_players", size), &lb, |b, lb| {
            b.iter(|| sort_players(black_box(&lb.players), SortOrder::Lowest))
        });

        group.bench_with_input(BenchmarkId::new("rank_players", size), &lb, |b, lb| {
            b.iter(|| rank_players(black_box(lb)))
        });
    }

    let lb = create_bench_leaderboard(0, 100);
    group.bench_function("share_text", |b| {
        b.iter(|| share_text(black_box(&lb), "https://bench.local"))
    });

    group.finish();
}

fn bench_score_formulas(c: &mut Criterion) {
    c.bench_function("memory_score", |b| {
        b.iter(|| memory_score(black_box(8), black_box(14), black_box(31.5), black_box(1.5)))
    });

    c.bench_function("snake_tick_interval", |b| {
        b.iter(|| {
            for level in 1..=10u8 {
                black_box(snake_tick_interval(black_box(level)));
            }
        })
    });
}

fn bench_add_result(c: &mut Criterion) {
    let mut group = c.benchmark_group("add_result");

    for (label, policy) in [
        ("merge", MergePolicy::MergeIfHigher),
        ("append", MergePolicy::AlwaysAppend),
    ] {
        group.bench_function(label, |b| {
            let recorder = create_bench_recorder(policy);
            let mut round = 0u64;
            b.iter(|| {
                round += 1;
                let name = format!("P{}", round % 25);
                recorder
                    .add_result("snake", black_box(&name), black_box(round % 500))
                    .unwrap()
            })
        });
    }

    group.finish();
}

fn bench_stats(c: &mut Criterion) {
    let boards: Vec<Leaderboard> = (0..20).map(|i| create_bench_leaderboard(i, 50)).collect();

    c.bench_function("stats_report", |b| b.iter(|| StatsReport::build(black_box(&boards))));
}

criterion_group!(
    benches,
    bench_ranking,
    bench_score_formulas,
    bench_add_result,
    bench_stats
);
criterion_main!(benches);
