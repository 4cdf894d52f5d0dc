//! Two-player Battleship on a shared screen
//!
//! Both players place the full fleet during setup, then take turns firing at
//! the other's grid. A hit keeps the turn, a miss passes it.

use crate::error::{LeaderboardError, Result};
use crate::games::{Mark, SessionTally};
use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use tracing::{debug, info};

pub const GRID_SIZE: usize = 10;

/// (row, column)
pub type Cell = (usize, usize);

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ShipKind {
    Carrier,
    Battleship,
    Cruiser,
    Submarine,
    Destroyer,
}

/// Ships each player places, in placement order
pub const FLEET: [ShipKind; 5] = [
    ShipKind::Carrier,
    ShipKind::Battleship,
    ShipKind::Cruiser,
    ShipKind::Submarine,
    ShipKind::Destroyer,
];

impl ShipKind {
    pub fn size(&self) -> usize {
        match self {
            ShipKind::Carrier => 5,
            ShipKind::Battleship => 4,
            ShipKind::Cruiser | ShipKind::Submarine => 3,
            ShipKind::Destroyer => 2,
        }
    }

    pub fn name(&self) -> &'static str {
        match self {
            ShipKind::Carrier => "Carrier",
            ShipKind::Battleship => "Battleship",
            ShipKind::Cruiser => "Cruiser",
            ShipKind::Submarine => "Submarine",
            ShipKind::Destroyer => "Destroyer",
        }
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum Orientation {
    #[default]
    Horizontal,
    Vertical,
}

impl Orientation {
    pub fn toggled(self) -> Self {
        match self {
            Orientation::Horizontal => Orientation::Vertical,
            Orientation::Vertical => Orientation::Horizontal,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum BattlePhase {
    Setup,
    Playing,
    GameOver,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ShotOutcome {
    Miss,
    Hit,
    Sunk { ship: ShipKind },
    /// The last enemy ship went down
    FleetDestroyed { ship: ShipKind, winner: Mark },
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Ship {
    pub kind: ShipKind,
    pub cells: Vec<Cell>,
}

/// One player's ships and the shots fired at them
#[derive(Debug, Clone, Default)]
pub struct Fleet {
    ships: Vec<Ship>,
    shots: HashSet<Cell>,
}

impl Fleet {
    pub fn ships(&self) -> &[Ship] {
        &self.ships
    }

    pub fn was_shot(&self, cell: Cell) -> bool {
        self.shots.contains(&cell)
    }

    pub fn is_sunk(&self, ship: &Ship) -> bool {
        ship.cells.iter().all(|cell| self.shots.contains(cell))
    }

    pub fn all_sunk(&self) -> bool {
        self.ships.len() == FLEET.len() && self.ships.iter().all(|ship| self.is_sunk(ship))
    }

    fn ship_at(&self, cell: Cell) -> Option<&Ship> {
        self.ships.iter().find(|ship| ship.cells.contains(&cell))
    }

    fn next_unplaced(&self) -> Option<ShipKind> {
        FLEET.get(self.ships.len()).copied()
    }
}

#[derive(Debug, Clone)]
pub struct BattleshipGame {
    fleet_x: Fleet,
    fleet_o: Fleet,
    phase: BattlePhase,
    starter: Mark,
    setup_player: Mark,
    current: Mark,
    winner: Option<Mark>,
    tally: SessionTally,
}

impl Default for BattleshipGame {
    fn default() -> Self {
        Self::new(Mark::X)
    }
}

impl BattleshipGame {
    pub fn new(starter: Mark) -> Self {
        Self {
            fleet_x: Fleet::default(),
            fleet_o: Fleet::default(),
            phase: BattlePhase::Setup,
            starter,
            setup_player: starter,
            current: starter,
            winner: None,
            tally: SessionTally::new(),
        }
    }

    pub fn phase(&self) -> BattlePhase {
        self.phase
    }

    pub fn setup_player(&self) -> Mark {
        self.setup_player
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

    pub fn fleet(&self, mark: Mark) -> &Fleet {
        match mark {
            Mark::X => &self.fleet_x,
            Mark::O => &self.fleet_o,
        }
    }

    fn fleet_mut(&mut self, mark: Mark) -> &mut Fleet {
        match mark {
            Mark::X => &mut self.fleet_x,
            Mark::O => &mut self.fleet_o,
        }
    }

    /// The ship the setup player places next
    pub fn next_unplaced_ship(&self) -> Option<ShipKind> {
        if self.phase != BattlePhase::Setup {
            return None;
        }
        self.fleet(self.setup_player).next_unplaced()
    }

    /// Place the setup player's next ship with its bow at (`row`, `col`)
    pub fn place_ship(&mut self, row: usize, col: usize, orientation: Orientation) -> Result<ShipKind> {
        let kind = self
            .next_unplaced_ship()
            .ok_or_else(|| LeaderboardError::invalid_move("ships can only be placed during setup"))?;

        let cells: Vec<Cell> = (0..kind.size())
            .map(|i| match orientation {
                Orientation::Horizontal => (row, col + i),
                Orientation::Vertical => (row + i, col),
            })
            .collect();

        if cells.iter().any(|&(r, c)| r >= GRID_SIZE || c >= GRID_SIZE) {
            return Err(LeaderboardError::invalid_move(format!("{} does not fit there", kind.name())).into());
        }
        let fleet = self.fleet(self.setup_player);
        if cells.iter().any(|&cell| fleet.ship_at(cell).is_some()) {
            return Err(LeaderboardError::invalid_move(format!("{} overlaps another ship", kind.name())).into());
        }

        let player = self.setup_player;
        self.fleet_mut(player).ships.push(Ship { kind, cells });
        debug!("Player {} placed {}", player, kind.name());

        if self.fleet(player).next_unplaced().is_none() {
            if player == self.starter {
                self.setup_player = player.opponent();
            } else {
                self.phase = BattlePhase::Playing;
                self.current = self.starter;
                info!("Battleship setup complete, {} fires first", self.starter);
            }
        }
        Ok(kind)
    }

    /// Fire the current player's shot at the opponent's grid
    pub fn fire(&mut self, row: usize, col: usize) -> Result<ShotOutcome> {
        if self.phase != BattlePhase::Playing {
            return Err(LeaderboardError::invalid_move("the battle is not in progress").into());
        }
        if row >= GRID_SIZE || col >= GRID_SIZE {
            return Err(LeaderboardError::invalid_move(format!("({}, {}) is off the grid", row, col)).into());
        }

        let shooter = self.current;
        let target = self.fleet_mut(shooter.opponent());
        if !target.shots.insert((row, col)) {
            return Err(LeaderboardError::invalid_move(format!("({}, {}) was already shot", row, col)).into());
        }

        let hit = target
            .ship_at((row, col))
            .map(|ship| (ship.kind, target.is_sunk(ship)));
        let fleet_destroyed = target.all_sunk();

        let (kind, sunk) = match hit {
            Some(hit) => hit,
            None => {
                self.current = shooter.opponent();
                return Ok(ShotOutcome::Miss);
            }
        };

        if !sunk {
            return Ok(ShotOutcome::Hit);
        }

        if fleet_destroyed {
            self.phase = BattlePhase::GameOver;
            self.winner = Some(shooter);
            self.tally.record_win(shooter);
            info!("Battleship won by {}", shooter);
            return Ok(ShotOutcome::FleetDestroyed {
                ship: kind,
                winner: shooter,
            });
        }

        Ok(ShotOutcome::Sunk { ship: kind })
    }

    /// New battle started by `starter`, keeping session wins
    pub fn reset(&mut self, starter: Mark) {
        let tally = self.tally;
        *self = Self::new(starter);
        self.tally = tally;
    }
}
