//! Game result ingestion
//!
//! Results land on a `game_<id>` leaderboard that is created on first use.
//! Whether a repeated name updates its entry or adds another one is decided
//! by the configured [`MergePolicy`]. After every change the list is sorted
//! best-first and capped, evicting the least-ranked entries.

use crate::config::{GameSettings, MergePolicy};
use crate::error::{LeaderboardError, Result};
use crate::games::GameKind;
use crate::ranking::truncate_ranked;
use crate::storage::{LeaderboardRepository, Mutation};
use crate::types::{Leaderboard, Player, ScoreMode, SortOrder};
use crate::utils::{clean_name, current_millis, game_leaderboard_id, generate_player_id, names_match};
use serde::{Deserialize, Serialize};
use tracing::{debug, info};

/// What happened to a submitted result
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum ResultOutcome {
    /// A new entry was created
    Inserted { player: Player },
    /// An existing entry's score was raised
    Improved { player: Player, previous: u64 },
    /// An existing entry already had an equal or better score
    Unchanged { existing: Player },
    /// The new entry ranked below the cap and was dropped immediately
    Evicted { score: u64 },
}

/// Writes game results into per-game leaderboards
#[derive(Debug, Clone)]
pub struct GameResultRecorder {
    repository: LeaderboardRepository,
    settings: GameSettings,
}

impl GameResultRecorder {
    pub fn new(repository: LeaderboardRepository, settings: GameSettings) -> Self {
        Self {
            repository,
            settings,
        }
    }

    pub fn merge_policy(&self) -> MergePolicy {
        self.settings.merge_policy
    }

    /// The leaderboard for `game_id`, if any result was ever saved
    pub fn game_leaderboard(&self, game_id: &str) -> Option<Leaderboard> {
        self.repository.get(&game_leaderboard_id(game_id))
    }

    /// The leaderboard for `game_id`, creating and persisting it when absent
    pub fn get_or_create_game_leaderboard(&self, game_id: &str) -> Result<Leaderboard> {
        let id = game_leaderboard_id(game_id);
        if id.len() == crate::utils::GAME_LEADERBOARD_PREFIX.len() {
            return Err(LeaderboardError::invalid_name("game id is required").into());
        }

        if let Some(existing) = self.repository.get(&id) {
            return Ok(existing);
        }

        let now = current_millis();
        let leaderboard = Leaderboard {
            id: id.clone(),
            name: game_display_name(game_id),
            description: None,
            score_mode: ScoreMode::TotalPoints,
            sort_order: SortOrder::Highest,
            players: Vec::new(),
            created_at: now,
            updated_at: now,
        };

        self.repository.insert(leaderboard.clone())?;
        info!("Created game leaderboard {}", id);
        Ok(leaderboard)
    }

    /// Save a result for `player_name` on the leaderboard of `game_id`
    pub fn add_result(&self, game_id: &str, player_name: &str, score: u64) -> Result<ResultOutcome> {
        let name = clean_name(player_name)
            .ok_or_else(|| LeaderboardError::invalid_name("player name is required"))?;
        let leaderboard = self.get_or_create_game_leaderboard(game_id)?;

        let policy = self.settings.merge_policy;
        let cap = self.settings.max_game_entries;
        let avatar = game_avatar(game_id);

        let (_, outcome) = self.repository.update_if(&leaderboard.id, |lb| {
            let existing = match policy {
                MergePolicy::MergeIfHigher => lb.players.iter_mut().find(|p| names_match(&p.name, &name)),
                MergePolicy::AlwaysAppend => None,
            };

            let (player_id, previous) = match existing {
                Some(player) if score <= player.score => {
                    debug!(
                        "Keeping {} at {} on {} (submitted {})",
                        player.name, player.score, lb.id, score
                    );
                    return Ok(Mutation::Unchanged(ResultOutcome::Unchanged {
                        existing: player.clone(),
                    }));
                }
                Some(player) => {
                    let previous = player.score;
                    player.score = score;
                    (player.id.clone(), Some(previous))
                }
                None => {
                    let player = Player::new(generate_player_id(), name, avatar).with_score(score);
                    let id = player.id.clone();
                    lb.players.push(player);
                    (id, None)
                }
            };

            truncate_ranked(&mut lb.players, SortOrder::Highest, cap);

            let outcome = match (lb.player(&player_id), previous) {
                (Some(player), Some(previous)) => ResultOutcome::Improved {
                    player: player.clone(),
                    previous,
                },
                (Some(player), None) => ResultOutcome::Inserted {
                    player: player.clone(),
                },
                (None, _) => ResultOutcome::Evicted { score },
            };
            Ok(Mutation::Changed(outcome))
        })?;

        debug!("Recorded {} on {}: {:?}", score, leaderboard.id, outcome);
        Ok(outcome)
    }
}

/// Display name of a game leaderboard
pub fn game_display_name(game_id: &str) -> String {
    match game_id.parse::<GameKind>() {
        Ok(kind) => kind.display_name().to_string(),
        Err(_) => game_id.trim().to_uppercase(),
    }
}

fn game_avatar(game_id: &str) -> &'static str {
    game_id
        .parse::<GameKind>()
        .map(|kind| kind.avatar())
        .unwrap_or("🎮")
}
