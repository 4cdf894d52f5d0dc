//! Per-game score formulas
//!
//! Pure, deterministic functions of the numeric inputs only, so they can be
//! tested and reused independently of any game state.

use serde::{Deserialize, Serialize};
use std::time::Duration;

/// Lowest selectable Snake level
pub const MIN_SNAKE_LEVEL: u8 = 1;
/// Highest selectable Snake level
pub const MAX_SNAKE_LEVEL: u8 = 10;
/// Points per food item before the level multiplier
pub const SNAKE_POINTS_PER_FOOD: u64 = 10;

const SNAKE_BASE_TICK_MS: u64 = 300;
const SNAKE_TICK_STEP_MS: u64 = 22;
const SNAKE_MIN_TICK_MS: u64 = 80;

/// Clamp a requested level into the selectable range
pub fn clamp_snake_level(level: u8) -> u8 {
    level.clamp(MIN_SNAKE_LEVEL, MAX_SNAKE_LEVEL)
}

/// Score multiplier for a Snake level (1-10, one-to-one with the level)
pub fn snake_level_multiplier(level: u8) -> u64 {
    u64::from(clamp_snake_level(level))
}

/// Points awarded for each food item at `level`
pub fn snake_points_per_food(level: u8) -> u64 {
    SNAKE_POINTS_PER_FOOD * snake_level_multiplier(level)
}

/// Total Snake score after eating `food_eaten` items at `level`
pub fn snake_score(level: u8, food_eaten: u64) -> u64 {
    food_eaten.saturating_mul(snake_points_per_food(level))
}

/// Movement interval for a Snake level: `max(80ms, 300ms - (level - 1) * 22ms)`
pub fn snake_tick_interval(level: u8) -> Duration {
    let steps = u64::from(clamp_snake_level(level) - 1);
    let millis = SNAKE_BASE_TICK_MS
        .saturating_sub(steps * SNAKE_TICK_STEP_MS)
        .max(SNAKE_MIN_TICK_MS);
    Duration::from_millis(millis)
}

/// Memory game score
///
/// ```text
/// efficiency      = min(1, pairs / max(1, moves))
/// base            = floor(efficiency * 1000)
/// optimal_time    = max(pairs * 1.5, 10)
/// time_multiplier = min(2, optimal_time / max(1, seconds))
/// score           = floor((base + base * (time_multiplier - 1)) * level_multiplier)
/// ```
///
/// A slow finish (time multiplier below 1) makes the time bonus negative.
pub fn memory_score(
    pair_count: u32,
    actual_moves: u32,
    actual_time_secs: f64,
    level_multiplier: f64,
) -> u64 {
    if !(level_multiplier > 0.0) || !level_multiplier.is_finite() {
        return 0;
    }

    let pairs = f64::from(pair_count);
    let moves = f64::from(actual_moves.max(1));
    let seconds = actual_time_secs.max(1.0);

    let efficiency = (pairs / moves).min(1.0);
    let base = (efficiency * 1000.0).floor();

    let optimal_time = (pairs * 1.5).max(10.0);
    let time_multiplier = (optimal_time / seconds).min(2.0);
    let time_bonus = base * (time_multiplier - 1.0);

    let score = ((base + time_bonus) * level_multiplier).floor();
    if score > 0.0 {
        score as u64
    } else {
        0
    }
}

/// Memory board sizes
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MemoryDifficulty {
    #[default]
    Easy,
    Medium,
    Hard,
}

impl MemoryDifficulty {
    pub const ALL: [MemoryDifficulty; 3] = [
        MemoryDifficulty::Easy,
        MemoryDifficulty::Medium,
        MemoryDifficulty::Hard,
    ];

    pub fn pairs(&self) -> u32 {
        match self {
            MemoryDifficulty::Easy => 8,
            MemoryDifficulty::Medium => 12,
            MemoryDifficulty::Hard => 16,
        }
    }

    /// Columns of the card grid
    pub fn columns(&self) -> u32 {
        match self {
            MemoryDifficulty::Easy => 4,
            MemoryDifficulty::Medium => 6,
            MemoryDifficulty::Hard => 8,
        }
    }

    pub fn level_multiplier(&self) -> f64 {
        match self {
            MemoryDifficulty::Easy => 1.0,
            MemoryDifficulty::Medium => 1.5,
            MemoryDifficulty::Hard => 2.0,
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            MemoryDifficulty::Easy => "EASY",
            MemoryDifficulty::Medium => "MEDIUM",
            MemoryDifficulty::Hard => "HARD",
        }
    }
}

impl std::str::FromStr for MemoryDifficulty {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "easy" => Ok(MemoryDifficulty::Easy),
            "medium" => Ok(MemoryDifficulty::Medium),
            "hard" => Ok(MemoryDifficulty::Hard),
            other => Err(anyhow::anyhow!(
                "Invalid difficulty '{}'. Use easy, medium or hard",
                other
            )),
        }
    }
}
