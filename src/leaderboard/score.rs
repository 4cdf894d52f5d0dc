//! Manual score update operations

use crate::error::{LeaderboardError, Result};
use serde::{Deserialize, Serialize};

/// A change requested against a player's current score
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(tag = "mode", content = "value", rename_all = "snake_case")]
pub enum ScoreUpdate {
    /// Replace the score with `max(0, round(value))`
    Set(f64),
    /// Add a non-negative delta; negative deltas count as zero
    Add(i64),
    /// Subtract a non-negative delta, clamping the result at zero
    Subtract(i64),
}

impl ScoreUpdate {
    /// Build an update from a mode name and raw user input
    ///
    /// Input that is not a number counts as 0. Only the mode name can be
    /// rejected.
    pub fn parse(mode: &str, input: &str) -> Result<Self> {
        let value = lenient_number(input);
        match mode.trim().to_lowercase().as_str() {
            "set" => Ok(ScoreUpdate::Set(value)),
            "add" => Ok(ScoreUpdate::Add(value.trunc() as i64)),
            "subtract" | "sub" => Ok(ScoreUpdate::Subtract(value.trunc() as i64)),
            other => Err(LeaderboardError::InvalidScoreUpdate {
                reason: format!("unknown mode '{}', use set, add or subtract", other),
            }
            .into()),
        }
    }

    /// Resulting score when applied to `current`
    pub fn apply(&self, current: u64) -> u64 {
        match *self {
            ScoreUpdate::Set(value) => {
                if value.is_finite() && value > 0.0 {
                    value.round() as u64
                } else {
                    0
                }
            }
            ScoreUpdate::Add(delta) => current.saturating_add(delta.max(0) as u64),
            ScoreUpdate::Subtract(delta) => current.saturating_sub(delta.max(0) as u64),
        }
    }
}

/// Apply a ±N win shortcut, clamping at zero
pub fn apply_win_delta(current: u64, delta: i64) -> u64 {
    if delta >= 0 {
        current.saturating_add(delta as u64)
    } else {
        current.saturating_sub(delta.unsigned_abs())
    }
}

fn lenient_number(input: &str) -> f64 {
    input
        .trim()
        .parse::<f64>()
        .ok()
        .filter(|v| v.is_finite())
        .unwrap_or(0.0)
}
