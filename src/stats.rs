//! Aggregate statistics and activity history across all leaderboards
//!
//! Everything here is a pure function of a loaded collection and, for the
//! history views, the current time in milliseconds.

use crate::ranking::top_player;
use crate::types::{Leaderboard, Player, ScoreMode, Timestamp};
use crate::utils::{fold_name, millis_to_datetime};
use serde::Serialize;
use std::collections::HashMap;

pub const TOP_PLAYERS_LIMIT: usize = 10;
pub const MOST_ACTIVE_LIMIT: usize = 5;

const MINUTE_MS: i64 = 60 * 1000;
const HOUR_MS: i64 = 60 * MINUTE_MS;
const DAY_MS: i64 = 24 * HOUR_MS;

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Totals {
    pub leaderboards: usize,
    pub players: usize,
    pub score: u64,
}

/// A player's combined standing across every board their name appears on
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PlayerTotal {
    pub name: String,
    pub avatar: String,
    pub total_score: u64,
    pub boards: usize,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct BoardActivity {
    pub id: String,
    pub name: String,
    pub total_score: u64,
    pub player_count: usize,
    pub leader: Option<Player>,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ModeCounts {
    pub win_count: usize,
    pub total_points: usize,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct StatsReport {
    pub totals: Totals,
    pub top_players: Vec<PlayerTotal>,
    pub most_active: Vec<BoardActivity>,
    pub modes: ModeCounts,
}

impl StatsReport {
    pub fn build(leaderboards: &[Leaderboard]) -> Self {
        Self {
            totals: totals(leaderboards),
            top_players: top_players(leaderboards, TOP_PLAYERS_LIMIT),
            most_active: most_active(leaderboards, MOST_ACTIVE_LIMIT),
            modes: mode_counts(leaderboards),
        }
    }
}

pub fn totals(leaderboards: &[Leaderboard]) -> Totals {
    Totals {
        leaderboards: leaderboards.len(),
        players: leaderboards.iter().map(|lb| lb.players.len()).sum(),
        score: leaderboards
            .iter()
            .fold(0u64, |total, lb| total.saturating_add(lb.total_score())),
    }
}

/// Best combined scores, grouping entries by case-folded name
///
/// The first entry seen for a name supplies its display name and avatar.
pub fn top_players(leaderboards: &[Leaderboard], limit: usize) -> Vec<PlayerTotal> {
    let mut order: Vec<String> = Vec::new();
    let mut totals: HashMap<String, PlayerTotal> = HashMap::new();

    for player in leaderboards.iter().flat_map(|lb| lb.players.iter()) {
        let key = fold_name(&player.name);
        let entry = totals.entry(key.clone()).or_insert_with(|| {
            order.push(key);
            PlayerTotal {
                name: player.name.clone(),
                avatar: player.avatar.clone(),
                total_score: 0,
                boards: 0,
            }
        });
        entry.total_score = entry.total_score.saturating_add(player.score);
        entry.boards += 1;
    }

    let mut ranked: Vec<PlayerTotal> = order
        .into_iter()
        .filter_map(|key| totals.remove(&key))
        .collect();
    ranked.sort_by(|a, b| b.total_score.cmp(&a.total_score));
    ranked.truncate(limit);
    ranked
}

/// Boards with the highest summed score
pub fn most_active(leaderboards: &[Leaderboard], limit: usize) -> Vec<BoardActivity> {
    let mut boards: Vec<BoardActivity> = leaderboards
        .iter()
        .map(|lb| BoardActivity {
            id: lb.id.clone(),
            name: lb.name.clone(),
            total_score: lb.total_score(),
            player_count: lb.players.len(),
            leader: top_player(lb).cloned(),
        })
        .collect();
    boards.sort_by(|a, b| b.total_score.cmp(&a.total_score));
    boards.truncate(limit);
    boards
}

pub fn mode_counts(leaderboards: &[Leaderboard]) -> ModeCounts {
    leaderboards
        .iter()
        .fold(ModeCounts::default(), |mut counts, lb| {
            match lb.score_mode {
                ScoreMode::WinCount => counts.win_count += 1,
                ScoreMode::TotalPoints => counts.total_points += 1,
            }
            counts
        })
}

/// Leaderboards ordered by last activity, with rolling windows
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct History {
    pub recent: Vec<Leaderboard>,
    pub last_7_days: usize,
    pub last_30_days: usize,
}

impl History {
    pub fn build(leaderboards: &[Leaderboard], now: Timestamp) -> Self {
        let recent = sorted_by_activity(leaderboards);
        let updated_since = |days: i64| {
            let cutoff = now.saturating_sub(days.saturating_mul(DAY_MS));
            recent.iter().filter(|lb| lb.updated_at >= cutoff).count()
        };

        Self {
            last_7_days: updated_since(7),
            last_30_days: updated_since(30),
            recent,
        }
    }

    /// Boards updated within the last `days` days
    pub fn within(&self, days: i64, now: Timestamp) -> impl Iterator<Item = &Leaderboard> {
        let cutoff = now.saturating_sub(days.saturating_mul(DAY_MS));
        self.recent.iter().filter(move |lb| lb.updated_at >= cutoff)
    }
}

/// Most recently updated first
pub fn sorted_by_activity(leaderboards: &[Leaderboard]) -> Vec<Leaderboard> {
    let mut sorted = leaderboards.to_vec();
    sorted.sort_by(|a, b| b.updated_at.cmp(&a.updated_at));
    sorted
}

/// Human label for how long ago `timestamp` was
pub fn relative_time(timestamp: Timestamp, now: Timestamp) -> String {
    let diff = now.saturating_sub(timestamp).max(0);
    let minutes = diff / MINUTE_MS;
    let hours = diff / HOUR_MS;
    let days = diff / DAY_MS;

    if minutes < 1 {
        "just now".to_string()
    } else if minutes < 60 {
        plural(minutes, "minute")
    } else if hours < 24 {
        plural(hours, "hour")
    } else if days < 7 {
        plural(days, "day")
    } else {
        format_date(timestamp)
    }
}

/// `dd Mon yyyy, HH:MM` in UTC
pub fn format_date(timestamp: Timestamp) -> String {
    match millis_to_datetime(timestamp) {
        Some(dt) => dt.format("%d %b %Y, %H:%M").to_string(),
        None => "-".to_string(),
    }
}

fn plural(count: i64, unit: &str) -> String {
    if count == 1 {
        format!("1 {} ago", unit)
    } else {
        format!("{} {}s ago", count, unit)
    }
}
