//! Snake rules
//!
//! The caller owns the timer: call [`SnakeGame::tick`] every
//! [`SnakeGame::tick_interval`] while the game runs. Ticks are no-ops while
//! paused or after a crash.

use crate::games::scoring::{clamp_snake_level, snake_score, snake_tick_interval};
use rand::rngs::StdRng;
use rand::seq::SliceRandom;
use rand::SeedableRng;
use serde::{Deserialize, Serialize};
use std::collections::VecDeque;
use std::time::Duration;
use tracing::{debug, info};

/// Width and height of the square board
pub const GRID_SIZE: i32 = 20;

const START: Position = Position { x: 10, y: 10 };
const START_FOOD: Position = Position { x: 15, y: 15 };

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Position {
    pub x: i32,
    pub y: i32,
}

impl Position {
    pub fn new(x: i32, y: i32) -> Self {
        Self { x, y }
    }

    fn step(self, direction: Direction) -> Self {
        let (dx, dy) = direction.delta();
        Self {
            x: self.x + dx,
            y: self.y + dy,
        }
    }

    fn in_bounds(self) -> bool {
        (0..GRID_SIZE).contains(&self.x) && (0..GRID_SIZE).contains(&self.y)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Direction {
    Up,
    Down,
    Left,
    Right,
}

impl Direction {
    fn delta(self) -> (i32, i32) {
        match self {
            Direction::Up => (0, -1),
            Direction::Down => (0, 1),
            Direction::Left => (-1, 0),
            Direction::Right => (1, 0),
        }
    }

    pub fn opposite(self) -> Direction {
        match self {
            Direction::Up => Direction::Down,
            Direction::Down => Direction::Up,
            Direction::Left => Direction::Right,
            Direction::Right => Direction::Left,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum SnakeStatus {
    Running,
    Paused,
    GameOver,
}

/// Result of a single tick
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TickOutcome {
    /// Paused or already over
    Idle,
    Moved,
    Ate { score: u64 },
    Crashed { score: u64 },
}

#[derive(Debug, Clone)]
pub struct SnakeGame {
    body: VecDeque<Position>,
    /// Direction of the last completed move
    heading: Direction,
    /// Direction the next tick will use
    direction: Direction,
    food: Option<Position>,
    food_eaten: u64,
    level: u8,
    status: SnakeStatus,
    rng: StdRng,
}

impl SnakeGame {
    pub fn new(level: u8) -> Self {
        Self::with_rng(level, StdRng::from_entropy())
    }

    /// A game whose food placement is reproducible
    pub fn with_seed(level: u8, seed: u64) -> Self {
        Self::with_rng(level, StdRng::seed_from_u64(seed))
    }

    fn with_rng(level: u8, rng: StdRng) -> Self {
        Self {
            body: VecDeque::from([START]),
            heading: Direction::Right,
            direction: Direction::Right,
            food: Some(START_FOOD),
            food_eaten: 0,
            level: clamp_snake_level(level),
            status: SnakeStatus::Running,
            rng,
        }
    }

    pub fn level(&self) -> u8 {
        self.level
    }

    pub fn status(&self) -> SnakeStatus {
        self.status
    }

    pub fn head(&self) -> Position {
        self.body.front().copied().unwrap_or(START)
    }

    /// Segments from head to tail
    pub fn body(&self) -> impl Iterator<Item = &Position> {
        self.body.iter()
    }

    pub fn len(&self) -> usize {
        self.body.len()
    }

    pub fn is_empty(&self) -> bool {
        self.body.is_empty()
    }

    pub fn food(&self) -> Option<Position> {
        self.food
    }

    pub fn food_eaten(&self) -> u64 {
        self.food_eaten
    }

    pub fn score(&self) -> u64 {
        snake_score(self.level, self.food_eaten)
    }

    pub fn tick_interval(&self) -> Duration {
        snake_tick_interval(self.level)
    }

    /// Queue a turn for the next tick; reversing onto the neck is ignored
    pub fn set_direction(&mut self, direction: Direction) -> bool {
        if self.status != SnakeStatus::Running || direction == self.heading.opposite() {
            return false;
        }
        self.direction = direction;
        true
    }

    pub fn pause(&mut self) {
        if self.status == SnakeStatus::Running {
            self.status = SnakeStatus::Paused;
        }
    }

    pub fn resume(&mut self) {
        if self.status == SnakeStatus::Paused {
            self.status = SnakeStatus::Running;
        }
    }

    pub fn restart(&mut self) {
        let rng = std::mem::replace(&mut self.rng, StdRng::seed_from_u64(0));
        *self = Self::with_rng(self.level, rng);
    }

    /// Advance the snake one cell
    pub fn tick(&mut self) -> TickOutcome {
        if self.status != SnakeStatus::Running {
            return TickOutcome::Idle;
        }

        let next = self.head().step(self.direction);
        self.heading = self.direction;

        // The tail still occupies its cell when the head arrives
        if !next.in_bounds() || self.body.contains(&next) {
            return self.crash();
        }

        self.body.push_front(next);

        if self.food == Some(next) {
            self.food_eaten += 1;
            self.place_food();
            debug!("Snake ate food #{} at level {}", self.food_eaten, self.level);
            if self.food.is_none() {
                return self.crash();
            }
            return TickOutcome::Ate {
                score: self.score(),
            };
        }

        self.body.pop_back();
        TickOutcome::Moved
    }

    /// Drop food on a random free cell, or none when the board is full
    pub fn place_food(&mut self) -> Option<Position> {
        let free: Vec<Position> = (0..GRID_SIZE)
            .flat_map(|y| (0..GRID_SIZE).map(move |x| Position::new(x, y)))
            .filter(|cell| !self.body.contains(cell))
            .collect();

        self.food = free.choose(&mut self.rng).copied();
        self.food
    }

    fn crash(&mut self) -> TickOutcome {
        self.status = SnakeStatus::GameOver;
        let score = self.score();
        info!(
            "Snake game over at level {} with {} points ({} food)",
            self.level, score, self.food_eaten
        );
        TickOutcome::Crashed { score }
    }
}
