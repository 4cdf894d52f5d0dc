//! Infinite Tic-Tac-Toe
//!
//! Each side keeps at most three pieces on the board. Placing a fourth
//! removes that side's oldest piece first, so a game only ends with a line.

use crate::error::{LeaderboardError, Result};
use crate::games::{Mark, SessionTally};
use std::collections::VecDeque;
use tracing::info;

pub const BOARD_CELLS: usize = 9;
/// Pieces a side may have on the board at once
pub const MAX_PIECES: usize = 3;

pub const WIN_LINES: [[usize; 3]; 8] = [
    [0, 1, 2],
    [3, 4, 5],
    [6, 7, 8],
    [0, 3, 6],
    [1, 4, 7],
    [2, 5, 8],
    [0, 4, 8],
    [2, 4, 6],
];

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PlaceOutcome {
    /// The piece was placed; `removed` is the cell freed by the FIFO rule
    Placed { removed: Option<usize> },
    Won { winner: Mark, line: [usize; 3] },
}

#[derive(Debug, Clone)]
pub struct TicTacToeGame {
    board: [Option<Mark>; BOARD_CELLS],
    current: Mark,
    history_x: VecDeque<usize>,
    history_o: VecDeque<usize>,
    winner: Option<Mark>,
    tally: SessionTally,
}

impl Default for TicTacToeGame {
    fn default() -> Self {
        Self::new()
    }
}

impl TicTacToeGame {
    pub fn new() -> Self {
        Self {
            board: [None; BOARD_CELLS],
            current: Mark::X,
            history_x: VecDeque::with_capacity(MAX_PIECES),
            history_o: VecDeque::with_capacity(MAX_PIECES),
            winner: None,
            tally: SessionTally::new(),
        }
    }

    pub fn board(&self) -> &[Option<Mark>; BOARD_CELLS] {
        &self.board
    }

    pub fn current_player(&self) -> Mark {
        self.current
    }

    pub fn winner(&self) -> Option<Mark> {
        self.winner
    }

    pub fn tally(&self) -> &SessionTally {
        &self.tally
    }

    pub fn tally_mut(&mut self) -> &mut SessionTally {
        &mut self.tally
    }

    fn history(&self, mark: Mark) -> &VecDeque<usize> {
        match mark {
            Mark::X => &self.history_x,
            Mark::O => &self.history_o,
        }
    }

    fn history_mut(&mut self, mark: Mark) -> &mut VecDeque<usize> {
        match mark {
            Mark::X => &mut self.history_x,
            Mark::O => &mut self.history_o,
        }
    }

    /// The piece `mark` would lose on its next move, if it has a full set
    pub fn oldest_piece(&self, mark: Mark) -> Option<usize> {
        let history = self.history(mark);
        if history.len() == MAX_PIECES {
            history.front().copied()
        } else {
            None
        }
    }

    /// Place the current player's piece on `cell`
    pub fn place(&mut self, cell: usize) -> Result<PlaceOutcome> {
        if self.winner.is_some() {
            return Err(LeaderboardError::invalid_move("the game is over").into());
        }
        if cell >= BOARD_CELLS {
            return Err(LeaderboardError::invalid_move(format!("no cell {}", cell)).into());
        }

        let mark = self.current;
        if self.oldest_piece(mark) == Some(cell) {
            return Err(LeaderboardError::invalid_move("cannot place on your oldest piece").into());
        }
        if self.board[cell].is_some() {
            return Err(LeaderboardError::invalid_move(format!("cell {} is taken", cell)).into());
        }

        let removed = if self.history(mark).len() == MAX_PIECES {
            let oldest = self.history_mut(mark).pop_front();
            if let Some(oldest) = oldest {
                self.board[oldest] = None;
            }
            oldest
        } else {
            None
        };

        self.board[cell] = Some(mark);
        self.history_mut(mark).push_back(cell);

        if let Some(line) = self.winning_line(mark) {
            self.winner = Some(mark);
            self.tally.record_win(mark);
            info!("Tic-tac-toe won by {} on {:?}", mark, line);
            return Ok(PlaceOutcome::Won { winner: mark, line });
        }

        self.current = mark.opponent();
        Ok(PlaceOutcome::Placed { removed })
    }

    fn winning_line(&self, mark: Mark) -> Option<[usize; 3]> {
        WIN_LINES
            .iter()
            .find(|line| line.iter().all(|&i| self.board[i] == Some(mark)))
            .copied()
    }

    /// Clear the board for another game, keeping session wins
    pub fn reset(&mut self) {
        let tally = self.tally;
        *self = Self::new();
        self.tally = tally;
    }

    /// Clear the board and the session wins
    pub fn reset_all(&mut self) {
        *self = Self::new();
    }
}
