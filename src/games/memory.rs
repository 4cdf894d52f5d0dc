//! Memory (concentration) rules

use crate::error::{LeaderboardError, Result};
use crate::games::scoring::{memory_score, MemoryDifficulty};
use rand::rngs::StdRng;
use rand::seq::SliceRandom;
use rand::SeedableRng;
use serde::Serialize;
use tracing::info;

/// Symbols dealt in pairs, enough for the largest board
pub const CARD_SYMBOLS: [&str; 16] = [
    "🎮", "🎯", "🎲", "🎪", "🎨", "🎭", "🎸", "🎺", "🚀", "🌟", "🍕", "🐙", "🎃", "🌈", "🍩", "🦄",
];

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Card {
    pub symbol: &'static str,
    pub face_up: bool,
    pub matched: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FlipOutcome {
    FirstCard,
    Match { first: usize, second: usize },
    /// Both cards are turned face down again
    Mismatch { first: usize, second: usize },
    Won { moves: u32 },
}

#[derive(Debug, Clone)]
pub struct MemoryGame {
    difficulty: MemoryDifficulty,
    cards: Vec<Card>,
    first_flipped: Option<usize>,
    moves: u32,
    matches: u32,
    rng: StdRng,
}

impl MemoryGame {
    pub fn new(difficulty: MemoryDifficulty) -> Self {
        Self::with_rng(difficulty, StdRng::from_entropy())
    }

    pub fn with_seed(difficulty: MemoryDifficulty, seed: u64) -> Self {
        Self::with_rng(difficulty, StdRng::seed_from_u64(seed))
    }

    fn with_rng(difficulty: MemoryDifficulty, rng: StdRng) -> Self {
        let mut game = Self {
            difficulty,
            cards: Vec::new(),
            first_flipped: None,
            moves: 0,
            matches: 0,
            rng,
        };
        game.deal();
        game
    }

    /// Shuffle a fresh deck and clear progress
    pub fn deal(&mut self) {
        let pairs = self.difficulty.pairs() as usize;
        let mut cards: Vec<Card> = CARD_SYMBOLS
            .iter()
            .copied()
            .take(pairs)
            .flat_map(|symbol| {
                let card = Card {
                    symbol,
                    face_up: false,
                    matched: false,
                };
                [card.clone(), card]
            })
            .collect();
        cards.shuffle(&mut self.rng);

        self.cards = cards;
        self.first_flipped = None;
        self.moves = 0;
        self.matches = 0;
    }

    pub fn difficulty(&self) -> MemoryDifficulty {
        self.difficulty
    }

    pub fn cards(&self) -> &[Card] {
        &self.cards
    }

    /// Completed two-card attempts
    pub fn moves(&self) -> u32 {
        self.moves
    }

    pub fn matches(&self) -> u32 {
        self.matches
    }

    pub fn is_won(&self) -> bool {
        self.matches == self.difficulty.pairs()
    }

    /// Turn over the card at `index`
    pub fn flip(&mut self, index: usize) -> Result<FlipOutcome> {
        if self.is_won() {
            return Err(LeaderboardError::invalid_move("the game is already won").into());
        }
        let card = self
            .cards
            .get(index)
            .ok_or_else(|| LeaderboardError::invalid_move(format!("no card at {}", index)))?;
        if card.matched || card.face_up {
            return Err(LeaderboardError::invalid_move(format!("card {} is already showing", index)).into());
        }

        let first = match self.first_flipped.take() {
            None => {
                self.cards[index].face_up = true;
                self.first_flipped = Some(index);
                return Ok(FlipOutcome::FirstCard);
            }
            Some(first) => first,
        };

        self.moves += 1;
        self.cards[first].face_up = false;

        if self.cards[first].symbol != self.cards[index].symbol {
            return Ok(FlipOutcome::Mismatch {
                first,
                second: index,
            });
        }

        self.cards[first].matched = true;
        self.cards[index].matched = true;
        self.matches += 1;

        if self.is_won() {
            info!(
                "Memory {} cleared in {} moves",
                self.difficulty.label(),
                self.moves
            );
            return Ok(FlipOutcome::Won { moves: self.moves });
        }
        Ok(FlipOutcome::Match {
            first,
            second: index,
        })
    }

    /// Final score for a won game, given the seconds it took
    pub fn score(&self, elapsed_secs: f64) -> Option<u64> {
        if !self.is_won() {
            return None;
        }
        Some(memory_score(
            self.difficulty.pairs(),
            self.moves,
            elapsed_secs,
            self.difficulty.level_multiplier(),
        ))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn partner_of(game: &MemoryGame, index: usize) -> usize {
        let symbol = game.cards()[index].symbol;
        game.cards()
            .iter()
            .enumerate()
            .position(|(i, c)| i != index && c.symbol == symbol)
            .unwrap()
    }

    fn non_partner_of(game: &MemoryGame, index: usize) -> usize {
        let symbol = game.cards()[index].symbol;
        game.cards()
            .iter()
            .position(|c| c.symbol != symbol && !c.matched)
            .unwrap()
    }

    #[test]
    fn test_deal_has_pairs() {
        for difficulty in MemoryDifficulty::ALL {
            let game = MemoryGame::with_seed(difficulty, 1);
            assert_eq!(game.cards().len(), difficulty.pairs() as usize * 2);
            for card in game.cards() {
                let count = game.cards().iter().filter(|c| c.symbol == card.symbol).count();
                assert_eq!(count, 2);
            }
        }
    }

    #[test]
    fn test_mismatch_turns_cards_back() {
        let mut game = MemoryGame::with_seed(MemoryDifficulty::Easy, 3);
        let other = non_partner_of(&game, 0);

        assert_eq!(game.flip(0).unwrap(), FlipOutcome::FirstCard);
        assert!(game.cards()[0].face_up);
        assert_eq!(
            game.flip(other).unwrap(),
            FlipOutcome::Mismatch {
                first: 0,
                second: other
            }
        );
        assert_eq!(game.moves(), 1);
        assert!(game.cards().iter().all(|c| !c.face_up && !c.matched));
    }

    #[test]
    fn test_flipping_same_card_twice_rejected() {
        let mut game = MemoryGame::with_seed(MemoryDifficulty::Easy, 3);
        game.flip(0).unwrap();
        let err = game.flip(0).unwrap_err();
        assert!(matches!(
            err.downcast_ref::<LeaderboardError>(),
            Some(LeaderboardError::InvalidMove { .. })
        ));
        assert!(game.flip(99).is_err());
    }

    #[test]
    fn test_perfect_game_wins() {
        let mut game = MemoryGame::with_seed(MemoryDifficulty::Easy, 11);
        assert_eq!(game.score(10.0), None);

        let mut last = FlipOutcome::FirstCard;
        while !game.is_won() {
            let first = game.cards().iter().position(|c| !c.matched).unwrap();
            let second = partner_of(&game, first);
            game.flip(first).unwrap();
            last = game.flip(second).unwrap();
        }

        assert_eq!(last, FlipOutcome::Won { moves: 8 });
        assert_eq!(game.score(12.0), Some(1000));
        assert!(game.flip(0).is_err());

        game.deal();
        assert_eq!(game.moves(), 0);
        assert!(!game.is_won());
    }
}
