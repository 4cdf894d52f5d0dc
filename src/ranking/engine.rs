//! Ranking engine
//!
//! Presentation order is always derived from the stored players and the
//! leaderboard's sort order; it is never persisted.

use crate::types::{Leaderboard, Player, SortOrder};
use serde::{Deserialize, Serialize};

/// A player together with its 1-based rank
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RankedPlayer {
    pub rank: usize,
    pub player: Player,
}

/// Order players best-first for `sort_order`
///
/// The sort is stable, so tied players keep their insertion order.
pub fn sort_players(players: &[Player], sort_order: SortOrder) -> Vec<Player> {
    let mut sorted = players.to_vec();
    match sort_order {
        SortOrder::Highest => sorted.sort_by(|a, b| b.score.cmp(&a.score)),
        SortOrder::Lowest => sorted.sort_by(|a, b| a.score.cmp(&b.score)),
    }
    sorted
}

/// Ranked view of a leaderboard; rank 1 is always the best entry
pub fn rank_players(leaderboard: &Leaderboard) -> Vec<RankedPlayer> {
    sort_players(&leaderboard.players, leaderboard.sort_order)
        .into_iter()
        .enumerate()
        .map(|(index, player)| RankedPlayer {
            rank: index + 1,
            player,
        })
        .collect()
}

/// The rank-1 player, if any
pub fn top_player(leaderboard: &Leaderboard) -> Option<&Player> {
    let players = leaderboard.players.iter();
    // min_by_key/max_by_key resolve ties differently, so pick explicitly to
    // keep the first-inserted player on top
    players.fold(None, |best: Option<&Player>, candidate| match best {
        None => Some(candidate),
        Some(current) => {
            let better = match leaderboard.sort_order {
                SortOrder::Highest => candidate.score > current.score,
                SortOrder::Lowest => candidate.score < current.score,
            };
            if better {
                Some(candidate)
            } else {
                Some(current)
            }
        }
    })
}

/// Score of the rank-1 player, or 0 for an empty leaderboard
pub fn high_score(leaderboard: &Leaderboard) -> u64 {
    top_player(leaderboard).map(|p| p.score).unwrap_or(0)
}

/// Keep only the best `limit` players, dropping the least-ranked
///
/// Players are re-sorted in place for `sort_order` first.
pub fn truncate_ranked(players: &mut Vec<Player>, sort_order: SortOrder, limit: usize) {
    *players = sort_players(players, sort_order);
    players.truncate(limit);
}
