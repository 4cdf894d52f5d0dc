//! Session win tallies for the two-sided games
//!
//! Tic-Tac-Toe, Connect Four and Battleship count wins per side for as long
//! as a session lasts. Saving the session hands each side's count to the
//! [`GameResultRecorder`] under the name entered for that side.

use crate::error::{LeaderboardError, Result};
use crate::games::{GameResultRecorder, Mark, ResultOutcome};
use serde::{Deserialize, Serialize};
use tracing::{info, warn};

/// Names entered for each side of a session
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PlayerNames {
    pub x: Option<String>,
    pub o: Option<String>,
}

impl PlayerNames {
    pub fn new(x: impl Into<String>, o: impl Into<String>) -> Self {
        Self {
            x: Some(x.into()),
            o: Some(o.into()),
        }
    }

    pub fn name_for(&self, mark: Mark) -> Option<&str> {
        let name = match mark {
            Mark::X => self.x.as_deref(),
            Mark::O => self.o.as_deref(),
        };
        name.filter(|n| !n.trim().is_empty())
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SessionTally {
    wins_x: u64,
    wins_o: u64,
}

impl SessionTally {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn record_win(&mut self, mark: Mark) {
        match mark {
            Mark::X => self.wins_x = self.wins_x.saturating_add(1),
            Mark::O => self.wins_o = self.wins_o.saturating_add(1),
        }
    }

    pub fn wins(&self, mark: Mark) -> u64 {
        match mark {
            Mark::X => self.wins_x,
            Mark::O => self.wins_o,
        }
    }

    pub fn total(&self) -> u64 {
        self.wins_x.saturating_add(self.wins_o)
    }

    pub fn reset(&mut self) {
        *self = Self::default();
    }

    fn clear(&mut self, mark: Mark) {
        match mark {
            Mark::X => self.wins_x = 0,
            Mark::O => self.wins_o = 0,
        }
    }

    /// Save every side with at least one win, then start a fresh tally
    ///
    /// Fails without writing anything when no game was won or when a side
    /// with wins has no name. If a write fails part way, the sides already
    /// saved are cleared and only the unsaved wins remain for a retry.
    pub fn commit(
        &mut self,
        recorder: &GameResultRecorder,
        game_id: &str,
        names: &PlayerNames,
    ) -> Result<Vec<(Mark, ResultOutcome)>> {
        if self.total() == 0 {
            return Err(LeaderboardError::NothingToSave {
                reason: "no games won this session".to_string(),
            }
            .into());
        }

        let mut pending = Vec::new();
        for mark in [Mark::X, Mark::O] {
            let wins = self.wins(mark);
            if wins == 0 {
                continue;
            }
            let name = names.name_for(mark).ok_or_else(|| {
                LeaderboardError::invalid_name(format!("a name for player {} is required", mark))
            })?;
            pending.push((mark, name, wins));
        }

        let mut outcomes = Vec::with_capacity(pending.len());
        for (mark, name, wins) in pending {
            match recorder.add_result(game_id, name, wins) {
                Ok(outcome) => outcomes.push((mark, outcome)),
                Err(e) => {
                    for (saved, _) in &outcomes {
                        self.clear(*saved);
                    }
                    warn!(
                        "Saving {} session stopped at player {}; {} side(s) saved",
                        game_id,
                        mark,
                        outcomes.len()
                    );
                    return Err(e);
                }
            }
        }

        info!(
            "Saved {} session for {} side(s), {} win(s) total",
            game_id,
            outcomes.len(),
            self.total()
        );
        self.reset();
        Ok(outcomes)
    }

    /// Save one side's running win count under `name`
    ///
    /// Used by Tic-Tac-Toe, where the winner is asked for a name right after
    /// each game. The tally keeps counting so the next save carries the
    /// higher total.
    pub fn commit_winner(
        &self,
        recorder: &GameResultRecorder,
        game_id: &str,
        mark: Mark,
        name: &str,
    ) -> Result<ResultOutcome> {
        let wins = self.wins(mark);
        if wins == 0 {
            return Err(LeaderboardError::NothingToSave {
                reason: format!("player {} has no wins this session", mark),
            }
            .into());
        }

        recorder.add_result(game_id, name, wins)
    }
}
