//! Utility functions for the leaderboard core

use crate::types::{PlayerId, Timestamp};
use chrono::{DateTime, TimeZone, Utc};
use uuid::Uuid;

/// Prefix of the leaderboards created lazily for bundled games
pub const GAME_LEADERBOARD_PREFIX: &str = "game_";

/// Get the current UTC timestamp
pub fn current_timestamp() -> DateTime<Utc> {
    Utc::now()
}

/// Current time as milliseconds since the Unix epoch
pub fn current_millis() -> Timestamp {
    current_timestamp().timestamp_millis()
}

/// Convert stored milliseconds back into a UTC datetime
pub fn millis_to_datetime(millis: Timestamp) -> Option<DateTime<Utc>> {
    Utc.timestamp_millis_opt(millis).single()
}

/// Generate a time-based id that is strictly greater than `previous`
///
/// User-created leaderboards and manually added players use the creation
/// time as their id; bumping past the last issued value keeps two ids made
/// within the same millisecond distinct. When `previous` is already
/// `i64::MAX` an opaque uuid is issued instead, stamped with the current time.
pub fn generate_time_id(previous: Option<Timestamp>) -> (String, Timestamp) {
    let now = current_millis();
    match previous {
        Some(prev) if prev >= now => match prev.checked_add(1) {
            Some(value) => (value.to_string(), value),
            None => (generate_player_id(), now),
        },
        _ => (now.to_string(), now),
    }
}

/// Generate a new opaque player id
pub fn generate_player_id() -> PlayerId {
    Uuid::new_v4().to_string()
}

/// Id of the leaderboard backing a bundled game
pub fn game_leaderboard_id(game_id: &str) -> String {
    format!("{}{}", GAME_LEADERBOARD_PREFIX, game_id.trim().to_lowercase())
}

/// Trim a user supplied name, rejecting empty and whitespace-only input
pub fn clean_name(name: &str) -> Option<String> {
    let trimmed = name.trim();
    if trimmed.is_empty() {
        None
    } else {
        Some(trimmed.to_string())
    }
}

/// Case-folded form used for name uniqueness checks
pub fn fold_name(name: &str) -> String {
    name.trim().to_lowercase()
}

/// Check whether two names are the same player per the folding rule
pub fn names_match(a: &str, b: &str) -> bool {
    fold_name(a) == fold_name(b)
}
