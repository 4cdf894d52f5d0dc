//! Game result configuration

use serde::{Deserialize, Serialize};

/// How a game result is folded into an existing game leaderboard
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MergePolicy {
    /// Keep one entry per case-folded name, replacing its score only when
    /// the new result is strictly higher
    #[default]
    MergeIfHigher,
    /// Always add a new entry, even when the name repeats
    AlwaysAppend,
}

impl std::fmt::Display for MergePolicy {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            MergePolicy::MergeIfHigher => write!(f, "merge_if_higher"),
            MergePolicy::AlwaysAppend => write!(f, "always_append"),
        }
    }
}

impl std::str::FromStr for MergePolicy {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().replace('-', "_").as_str() {
            "merge_if_higher" | "merge" => Ok(MergePolicy::MergeIfHigher),
            "always_append" | "append" => Ok(MergePolicy::AlwaysAppend),
            other => Err(anyhow::anyhow!(
                "Invalid merge policy '{}'. Use 'merge_if_higher' or 'always_append'",
                other
            )),
        }
    }
}

/// Settings for the bundled mini-games and their leaderboards
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct GameSettings {
    /// Policy applied when a result name already exists
    pub merge_policy: MergePolicy,
    /// Maximum players kept on an auto-created game leaderboard
    pub max_game_entries: usize,
    /// How many recent player names are remembered for quick entry
    pub recent_names_limit: usize,
}

impl Default for GameSettings {
    fn default() -> Self {
        Self {
            merge_policy: MergePolicy::MergeIfHigher,
            max_game_entries: 100,
            recent_names_limit: 10,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_merge_policy_parsing() {
        assert_eq!(
            "merge_if_higher".parse::<MergePolicy>().unwrap(),
            MergePolicy::MergeIfHigher
        );
        assert_eq!(
            "Always-Append".parse::<MergePolicy>().unwrap(),
            MergePolicy::AlwaysAppend
        );
        assert!("sometimes".parse::<MergePolicy>().is_err());
    }

    #[test]
    fn test_merge_policy_display_matches_parse() {
        for policy in [MergePolicy::MergeIfHigher, MergePolicy::AlwaysAppend] {
            assert_eq!(policy.to_string().parse::<MergePolicy>().unwrap(), policy);
        }
    }
}
