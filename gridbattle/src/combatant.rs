// Copyright 2020 Zachary Stewart
//
// Licensed under the Apache License, Version 2.0 (the "License");
// you may not use this file except in compliance with the License.
// You may obtain a copy of the License at
//
//     http://www.apache.org/licenses/LICENSE-2.0
//
// Unless required by applicable law or agreed to in writing, software
// distributed under the License is distributed on an "AS IS" BASIS,
// WITHOUT WARRANTIES OR CONDITIONS OF ANY KIND, either express or implied.
// See the License for the specific language governing permissions and
// limitations under the License.

//! The two sides of a match.
//!
//! The state a side owns ([`Forces`]: its fleet, its targeting board and its tally of
//! destroyed enemy ships) is kept apart from the [`Commander`] that decides what the side
//! does on its turns. The match hands the commander a [`TurnContext`] with the side's own
//! forces and the opposing fleet whenever it needs to act.

use enumflags2::BitFlags;
use log::debug;

use crate::{
    board::{Coordinate, PlacementBoard, Shot, ShotError, Side, TargetBoard},
    game::{Command, CommandError, Event, Expecting, TurnKind},
    ships::{PlacementRejected, Rotation, Ship, ShipType, MAX_FLEET_SIZE},
};

pub use self::{automated::Automated, human::Human};

mod automated;
mod human;

/// Result of firing at a single cell of the opposing fleet.
#[derive(Debug, Copy, Clone, Eq, PartialEq, Hash)]
pub enum ShotOutcome {
    /// Nothing was there.
    Miss,
    /// The given ship was hit but is still afloat.
    Hit(ShipType),
    /// The given ship was hit and has no health left.
    Sunk(ShipType),
}

impl ShotOutcome {
    /// The ship that was hit, if any.
    pub fn ship(self) -> Option<ShipType> {
        match self {
            ShotOutcome::Miss => None,
            ShotOutcome::Hit(ship) | ShotOutcome::Sunk(ship) => Some(ship),
        }
    }

    /// Returns true if a ship was hit.
    pub fn is_hit(self) -> bool {
        self.ship().is_some()
    }

    /// Returns true if the shot destroyed a ship.
    pub fn is_sunk(self) -> bool {
        match self {
            ShotOutcome::Sunk(_) => true,
            _ => false,
        }
    }

    fn shot(self) -> Shot {
        if self.is_hit() {
            Shot::Hit
        } else {
            Shot::Miss
        }
    }
}

/// A side's ships and the board they sit on.
#[derive(Debug)]
pub struct Fleet {
    board: PlacementBoard,

    /// Ships in placement order. Only the last one can be unconfirmed.
    ships: Vec<Ship>,

    /// Chosen fleet size, once known.
    size: Option<usize>,
}

impl Fleet {
    /// Create an empty fleet for the given side.
    pub fn new(side: Side) -> Self {
        Self {
            board: PlacementBoard::new(side),
            ships: Vec::with_capacity(MAX_FLEET_SIZE),
            size: None,
        }
    }

    /// The side this fleet belongs to.
    pub fn side(&self) -> Side {
        self.board.id().side
    }

    pub fn board(&self) -> &PlacementBoard {
        &self.board
    }

    /// Ships created so far, in placement order.
    pub fn ships(&self) -> &[Ship] {
        &self.ships
    }

    /// Get the ship of the given type, if it was created.
    pub fn ship(&self, kind: ShipType) -> Option<&Ship> {
        self.ships.iter().find(|ship| ship.kind() == kind)
    }

    /// The chosen fleet size, if any.
    pub fn size(&self) -> Option<usize> {
        self.size
    }

    /// Choose the number of ships in this fleet. Can only be done once.
    pub fn set_size(&mut self, size: usize) -> Result<(), CommandError> {
        if self.size.is_some() || size < 1 || size > MAX_FLEET_SIZE {
            return Err(CommandError::InvalidFleetSize(size));
        }
        debug!("{} fleet size set to {}", self.side(), size);
        self.size = Some(size);
        Ok(())
    }

    /// Number of ships confirmed so far.
    pub fn placed(&self) -> usize {
        self.ships.iter().filter(|ship| ship.locked()).count()
    }

    /// Returns true once every ship of the chosen size is confirmed.
    pub fn fully_deployed(&self) -> bool {
        self.size == Some(self.placed())
    }

    /// The ship currently being placed, if any.
    pub fn pending(&self) -> Option<&Ship> {
        self.ships.last().filter(|ship| !ship.locked())
    }

    fn pending_mut(&mut self) -> Result<(&mut Ship, &mut PlacementBoard), PlacementRejected> {
        let board = &mut self.board;
        match self.ships.last_mut() {
            Some(ship) if !ship.locked() => Ok((ship, board)),
            _ => Err(PlacementRejected::Locked),
        }
    }

    /// Create the next ship at the default anchor. The `n`th ship has length `n`.
    /// Returns `None` if a ship is still being placed or the fleet is complete.
    pub fn start_next_ship(&mut self) -> Option<ShipType> {
        if self.pending().is_some() {
            return None;
        }
        let count = self.ships.len();
        if count >= self.size? {
            return None;
        }
        let kind = ShipType::from_len(count + 1)?;
        let ship = Ship::create(self.board.id(), kind, &mut self.board);
        self.ships.push(ship);
        Some(kind)
    }

    /// Move the pending ship by `dx` columns and `dy` rows.
    pub fn translate_pending(&mut self, dx: isize, dy: isize) -> Result<(), PlacementRejected> {
        let (ship, board) = self.pending_mut()?;
        ship.translate(dx, dy, board)
    }

    /// Turn the pending ship a quarter around its origin.
    pub fn rotate_pending(&mut self, rotation: Rotation) -> Result<(), PlacementRejected> {
        let (ship, board) = self.pending_mut()?;
        ship.rotate(rotation, board)
    }

    /// Confirm the pending ship where it is. Returns the type of the ship confirmed.
    pub fn confirm_pending(&mut self) -> Result<ShipType, PlacementRejected> {
        let (ship, board) = self.pending_mut()?;
        ship.confirm(board)?;
        Ok(ship.kind())
    }

    /// Resolve an enemy shot at `coord`.
    pub fn receive_fire(&mut self, coord: Coordinate) -> Result<ShotOutcome, ShotError> {
        let kind = match self.board.receive_shot(coord)? {
            Some(kind) => kind,
            None => return Ok(ShotOutcome::Miss),
        };
        let sunk = self
            .ships
            .iter_mut()
            .find(|ship| ship.kind() == kind)
            .map_or(false, Ship::decrement_health);
        Ok(if sunk {
            ShotOutcome::Sunk(kind)
        } else {
            ShotOutcome::Hit(kind)
        })
    }
}

/// Everything one side owns.
#[derive(Debug)]
pub struct Forces {
    fleet: Fleet,
    targets: TargetBoard,

    /// Opposing ship types this side has sunk.
    destroyed: BitFlags<ShipType>,
}

impl Forces {
    pub fn new(side: Side) -> Self {
        Self {
            fleet: Fleet::new(side),
            targets: TargetBoard::new(side),
            destroyed: BitFlags::empty(),
        }
    }

    pub fn side(&self) -> Side {
        self.fleet.side()
    }

    pub fn fleet(&self) -> &Fleet {
        &self.fleet
    }

    pub(crate) fn fleet_mut(&mut self) -> &mut Fleet {
        &mut self.fleet
    }

    /// Board recording the shots this side fired.
    pub fn targets(&self) -> &TargetBoard {
        &self.targets
    }

    /// Opposing ship types this side has destroyed.
    pub fn destroyed(&self) -> BitFlags<ShipType> {
        self.destroyed
    }

    pub fn destroyed_count(&self) -> usize {
        self.destroyed.iter().count()
    }

    /// Fire at `coord` on the `enemy` fleet and record the result.
    pub fn fire_at(&mut self, coord: Coordinate, enemy: &mut Fleet) -> Result<ShotOutcome, CommandError> {
        if self.targets.fired_at(coord) {
            return Err(ShotError::new(coord).into());
        }
        let outcome = enemy.receive_fire(coord)?;
        self.targets.record(coord, outcome.shot())?;
        if let ShotOutcome::Sunk(kind) = outcome {
            self.destroyed.insert(kind);
        }
        debug!("{} fired at {}: {:?}", self.side(), coord, outcome);
        Ok(outcome)
    }
}

/// Whether a side is done with its current turn.
#[derive(Debug, Copy, Clone, Eq, PartialEq)]
pub enum TurnStatus {
    /// More commands are needed.
    InProgress,
    /// The turn is over and the opponent should get the next one.
    Complete,
}

/// What a [`Commander`] may touch while it acts.
pub struct TurnContext<'a> {
    /// The acting side.
    pub own: &'a mut Forces,
    /// The fleet of the other side.
    pub enemy: &'a mut Fleet,
    /// Notices for the presentation layer.
    pub events: &'a mut Vec<Event>,
}

/// Decides what a side does on its turns.
pub trait Commander {
    /// Start a new turn. Automated commanders play the whole turn here and return
    /// [`TurnStatus::Complete`].
    fn begin_turn(&mut self, kind: TurnKind, ctx: TurnContext) -> TurnStatus;

    /// Apply a single externally supplied command to the current turn. A rejected command
    /// changes nothing.
    fn command(&mut self, command: Command, ctx: TurnContext) -> Result<TurnStatus, CommandError>;

    /// The input this commander is waiting for.
    fn expecting(&self) -> Expecting;

    /// Returns true if this commander never takes external commands.
    fn automated(&self) -> bool {
        false
    }
}

/// A side of the match: its forces and who commands them.
pub struct Combatant {
    forces: Forces,
    commander: Box<dyn Commander>,
}

impl Combatant {
    pub(crate) fn new(side: Side, commander: Box<dyn Commander>) -> Self {
        Self {
            forces: Forces::new(side),
            commander,
        }
    }

    pub fn side(&self) -> Side {
        self.forces.side()
    }

    pub fn forces(&self) -> &Forces {
        &self.forces
    }

    pub(crate) fn forces_mut(&mut self) -> &mut Forces {
        &mut self.forces
    }

    pub fn expecting(&self) -> Expecting {
        self.commander.expecting()
    }

    pub fn automated(&self) -> bool {
        self.commander.automated()
    }

    /// Split into the forces and the commander so both can be borrowed mutably.
    pub(crate) fn parts(&mut self) -> (&mut Forces, &mut dyn Commander) {
        (&mut self.forces, &mut *self.commander)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn deployed(side: Side, size: usize) -> Fleet {
        let mut fleet = Fleet::new(side);
        fleet.set_size(size).unwrap();
        let mut row = 0;
        while fleet.start_next_ship().is_some() {
            fleet.translate_pending(0, row).unwrap();
            fleet.confirm_pending().unwrap();
            row += 1;
        }
        fleet
    }

    #[test]
    fn fleet_size_is_validated() {
        let mut fleet = Fleet::new(Side::P1);
        assert_eq!(fleet.set_size(0), Err(CommandError::InvalidFleetSize(0)));
        assert_eq!(fleet.set_size(6), Err(CommandError::InvalidFleetSize(6)));
        assert_eq!(fleet.start_next_ship(), None);
        assert_eq!(fleet.set_size(2), Ok(()));
        assert_eq!(fleet.set_size(3), Err(CommandError::InvalidFleetSize(3)));
        assert_eq!(fleet.size(), Some(2));
    }

    #[test]
    fn ships_come_in_length_order() {
        let mut fleet = Fleet::new(Side::P2);
        fleet.set_size(3).unwrap();
        assert_eq!(fleet.start_next_ship(), Some(ShipType::PatrolBoat));
        // Still pending.
        assert_eq!(fleet.start_next_ship(), None);
        assert_eq!(fleet.confirm_pending(), Ok(ShipType::PatrolBoat));
        assert_eq!(fleet.confirm_pending(), Err(PlacementRejected::Locked));

        assert_eq!(fleet.start_next_ship(), Some(ShipType::Cruiser));
        // Overlaps the patrol boat at a0.
        assert_eq!(fleet.confirm_pending(), Err(PlacementRejected::Overlapping));
        fleet.translate_pending(0, 1).unwrap();
        fleet.confirm_pending().unwrap();
        assert!(!fleet.fully_deployed());

        assert_eq!(fleet.start_next_ship(), Some(ShipType::Destroyer));
        fleet.translate_pending(0, 2).unwrap();
        fleet.confirm_pending().unwrap();
        assert!(fleet.fully_deployed());
        assert_eq!(fleet.start_next_ship(), None);
        assert_eq!(fleet.placed(), 3);
    }

    #[test]
    fn fire_resolves_against_enemy_fleet() {
        let mut attacker = Forces::new(Side::P1);
        let mut enemy = deployed(Side::P2, 2);

        let water = Coordinate::new(9, 9);
        assert_eq!(attacker.fire_at(water, &mut enemy), Ok(ShotOutcome::Miss));
        assert_eq!(
            attacker.fire_at(water, &mut enemy),
            Err(CommandError::AlreadyTargeted(ShotError::new(water)))
        );

        let cruiser = Coordinate::new(1, 0);
        let first = attacker.fire_at(cruiser, &mut enemy).unwrap();
        assert_eq!(first, ShotOutcome::Hit(ShipType::Cruiser));
        assert!(first.is_hit() && !first.is_sunk());
        let second = attacker.fire_at(Coordinate::new(1, 1), &mut enemy).unwrap();
        assert_eq!(second, ShotOutcome::Sunk(ShipType::Cruiser));
        assert!(second.is_sunk());
        assert_eq!(enemy.ship(ShipType::PatrolBoat).map(Ship::health), Some(1));
        assert_eq!(attacker.destroyed_count(), 1);
        assert!(attacker.destroyed().contains(ShipType::Cruiser));

        let ship = enemy.ship(ShipType::Cruiser).unwrap();
        assert!(ship.destroyed());
        assert_eq!(ship.times_hit(), 2);
        assert_eq!(attacker.targets().shots_fired(), 3);
        assert_eq!(attacker.targets().get(cruiser), Some(Shot::Hit));
    }
}
