//! Plain-text leaderboard summaries for sharing

use crate::ranking::engine::rank_players;
use crate::types::Leaderboard;
use std::fmt::Write;

/// Link to a leaderboard under `base_url`
pub fn share_url(leaderboard: &Leaderboard, base_url: &str) -> String {
    format!(
        "{}/leaderboard/{}",
        base_url.trim_end_matches('/'),
        leaderboard.id
    )
}

/// Ranked plain-text summary of `leaderboard` ending with its link
pub fn share_text(leaderboard: &Leaderboard, base_url: &str) -> String {
    let mut text = format!("🏆 {}\n\n", leaderboard.name);

    if let Some(description) = leaderboard
        .description
        .as_deref()
        .filter(|d| !d.trim().is_empty())
    {
        text.push_str(description);
        text.push_str("\n\n");
    }

    text.push_str("📊 LEADERBOARD:\n");
    for ranked in rank_players(leaderboard) {
        // Writing to a String cannot fail
        let _ = writeln!(
            text,
            "{}. {} {}: {}",
            ranked.rank, ranked.player.avatar, ranked.player.name, ranked.player.score
        );
    }

    let _ = write!(text, "\n🔗 {}", share_url(leaderboard, base_url));
    text
}
