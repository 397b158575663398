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

//! Messages exchanged between a match and its presentation layer.
use std::fmt;

use crate::{
    board::{GridAddress, Side},
    combatant::ShotOutcome,
    ships::{PlacementRejected, Rotation, ShipType},
};

/// Input a presentation layer submits on behalf of a side.
#[derive(Debug, Copy, Clone, Eq, PartialEq)]
pub enum Command {
    /// Choose how many ships to field, 1 to 5.
    SetFleetSize(usize),
    /// Move the ship being placed by `dx` columns and `dy` rows.
    Translate { dx: isize, dy: isize },
    /// Turn the ship being placed a quarter around its origin.
    Rotate(Rotation),
    /// Confirm the ship being placed where it is.
    Confirm,
    /// Fire at a cell of the opponent.
    FireAt(GridAddress),
    /// Acknowledge the result of a shot and pass the turn.
    EndTurn,
}

impl fmt::Display for Command {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            Command::SetFleetSize(n) => write!(f, "choose a fleet of {}", n),
            Command::Translate { .. } => f.write_str("move a ship"),
            Command::Rotate(_) => f.write_str("rotate a ship"),
            Command::Confirm => f.write_str("confirm a placement"),
            Command::FireAt(address) => write!(f, "fire at {}", address),
            Command::EndTurn => f.write_str("end the turn"),
        }
    }
}

/// The two kinds of turn a side can be granted.
#[derive(Debug, Copy, Clone, Eq, PartialEq, Hash)]
pub enum TurnKind {
    /// The side's first turn, where it chooses its fleet size and places its fleet.
    Setup,
    /// Every later turn, where it fires once.
    Targeting,
}

/// What input a side is waiting for.
#[derive(Debug, Copy, Clone, Eq, PartialEq)]
pub enum Expecting {
    /// Not this side's turn, or the side takes no input.
    Nothing,
    FleetSize,
    /// Moves and confirmation of the given ship.
    Placement(ShipType),
    Target,
    /// Acknowledgement of the shot just fired.
    EndTurn,
}

impl fmt::Display for Expecting {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            Expecting::Nothing => f.write_str("no input"),
            Expecting::FleetSize => f.write_str("a fleet size"),
            Expecting::Placement(ship) => write!(f, "placement of the {}", ship),
            Expecting::Target => f.write_str("a target"),
            Expecting::EndTurn => f.write_str("the end of the turn"),
        }
    }
}

/// Notices for the presentation layer, in the order things happened.
#[derive(Debug, Copy, Clone, Eq, PartialEq)]
pub enum Event {
    /// `side` was granted its `turn`th turn.
    TurnGranted {
        side: Side,
        turn: u32,
        kind: TurnKind,
    },
    /// `side` must choose a fleet size.
    FleetSizeRequested { side: Side },
    FleetSizeChosen { side: Side, size: usize },
    /// `side` is now placing `ship`, currently at the default anchor.
    PlacementStarted { side: Side, ship: ShipType },
    /// A move or confirmation of `ship` was refused. Nothing changed.
    MoveRejected {
        side: Side,
        ship: ShipType,
        reason: PlacementRejected,
    },
    PlacementConfirmed { side: Side, ship: ShipType },
    /// `attacker` fired at `address` on the defender's placement board.
    FireResolved {
        attacker: Side,
        address: GridAddress,
        outcome: ShotOutcome,
    },
    TurnEnded { side: Side },
    GameOver { winner: Side },
}
