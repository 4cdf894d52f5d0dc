//! Connect Four

use crate::error::{LeaderboardError, Result};
use crate::games::{Mark, SessionTally};
use tracing::info;

pub const ROWS: usize = 6;
pub const COLS: usize = 7;
pub const WIN_LENGTH: usize = 4;

/// (row, column) with row 0 at the top
pub type Cell = (usize, usize);

/// Row and column steps scanned for four in a row
const DIRECTIONS: [(isize, isize); 4] = [(0, 1), (1, 0), (1, 1), (1, -1)];

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DropOutcome {
    Placed { row: usize },
    Won { winner: Mark, cells: Vec<Cell> },
    Draw,
}

#[derive(Debug, Clone)]
pub struct ConnectFourGame {
    board: [[Option<Mark>; COLS]; ROWS],
    current: Mark,
    winner: Option<Mark>,
    over: bool,
    tally: SessionTally,
}

impl Default for ConnectFourGame {
    fn default() -> Self {
        Self::new()
    }
}

impl ConnectFourGame {
    pub fn new() -> Self {
        Self {
            board: [[None; COLS]; ROWS],
            current: Mark::X,
            winner: None,
            over: false,
            tally: SessionTally::new(),
        }
    }

    pub fn board(&self) -> &[[Option<Mark>; COLS]; ROWS] {
        &self.board
    }

    pub fn current_player(&self) -> Mark {
        self.current
    }

    pub fn winner(&self) -> Option<Mark> {
        self.winner
    }

    pub fn is_over(&self) -> bool {
        self.over
    }

    pub fn tally(&self) -> &SessionTally {
        &self.tally
    }

    pub fn tally_mut(&mut self) -> &mut SessionTally {
        &mut self.tally
    }

    /// Drop the current player's disc into `col`
    pub fn drop_piece(&mut self, col: usize) -> Result<DropOutcome> {
        if self.over {
            return Err(LeaderboardError::invalid_move("the game is over").into());
        }
        if col >= COLS {
            return Err(LeaderboardError::invalid_move(format!("no column {}", col)).into());
        }

        let row = (0..ROWS)
            .rev()
            .find(|&row| self.board[row][col].is_none())
            .ok_or_else(|| LeaderboardError::invalid_move(format!("column {} is full", col)))?;

        let mark = self.current;
        self.board[row][col] = Some(mark);

        if let Some(cells) = self.find_line(mark) {
            self.winner = Some(mark);
            self.over = true;
            self.tally.record_win(mark);
            info!("Connect four won by {}", mark);
            return Ok(DropOutcome::Won {
                winner: mark,
                cells,
            });
        }

        if self.board[0].iter().all(Option::is_some) {
            self.over = true;
            info!("Connect four ended in a draw");
            return Ok(DropOutcome::Draw);
        }

        self.current = mark.opponent();
        Ok(DropOutcome::Placed { row })
    }

    fn find_line(&self, mark: Mark) -> Option<Vec<Cell>> {
        for (dr, dc) in DIRECTIONS {
            for row in 0..ROWS {
                for col in 0..COLS {
                    let cells: Option<Vec<Cell>> = (0..WIN_LENGTH as isize)
                        .map(|step| {
                            let r = row.checked_add_signed(dr * step)?;
                            let c = col.checked_add_signed(dc * step)?;
                            (r < ROWS && c < COLS && self.board[r][c] == Some(mark)).then_some((r, c))
                        })
                        .collect();
                    if cells.is_some() {
                        return cells;
                    }
                }
            }
        }
        None
    }

    /// Clear the board for another game; the last winner moves first
    pub fn reset(&mut self) {
        let starter = self.winner.unwrap_or(Mark::X);
        let tally = self.tally;
        *self = Self::new();
        self.current = starter;
        self.tally = tally;
    }

    /// Clear the board and the session wins
    pub fn reset_all(&mut self) {
        *self = Self::new();
    }
}
