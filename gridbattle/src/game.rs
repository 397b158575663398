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

//! Turn orchestration.
//!
//! A [`Match`] owns both sides and is the only thing that grants turns. Each side's first
//! turn is a setup turn, so both fleets are placed before any shot is fired. After that
//! the sides alternate targeting turns until one of them has destroyed as many ships as
//! its opponent fielded.
use log::info;

use crate::{
    board::{BoardRole, CellView, GridAddress, Side},
    combatant::{Combatant, Commander, TurnContext, TurnStatus},
};

pub use self::{
    errors::CommandError,
    protocol::{Command, Event, Expecting, TurnKind},
};

mod errors;
mod protocol;

/// Stage of a match.
#[derive(Debug, Copy, Clone, Eq, PartialEq)]
pub enum Phase {
    /// Created but not started.
    Ready,
    /// The given side is placing its fleet.
    Setup(Side),
    /// The given side is firing.
    Targeting(Side),
    /// The match is decided. No further turns are granted.
    GameOver { winner: Side },
}

impl Phase {
    /// The side whose turn it is, if any.
    pub fn active(self) -> Option<Side> {
        match self {
            Phase::Setup(side) | Phase::Targeting(side) => Some(side),
            Phase::Ready | Phase::GameOver { .. } => None,
        }
    }
}

/// A match between two sides.
pub struct Match {
    combatants: [Combatant; 2],

    /// Turns granted to each side so far.
    turns: [u32; 2],

    phase: Phase,
}

impl Match {
    /// Create a match between the given commanders. Side 1 moves first once the match is
    /// started.
    pub fn new(p1: Box<dyn Commander>, p2: Box<dyn Commander>) -> Self {
        Self {
            combatants: [Combatant::new(Side::P1, p1), Combatant::new(Side::P2, p2)],
            turns: [0; 2],
            phase: Phase::Ready,
        }
    }

    /// Grant side 1 its first turn. Automated sides play until a human is needed or the
    /// match is over. Does nothing if the match was already started.
    pub fn start(&mut self) -> Vec<Event> {
        let mut events = Vec::new();
        if self.phase == Phase::Ready {
            self.run(Side::P1, &mut events);
        }
        events
    }

    /// Apply a command on behalf of `side`.
    pub fn submit(&mut self, side: Side, command: Command) -> Result<Vec<Event>, CommandError> {
        if self.combatants[side.index()].automated() {
            return Err(CommandError::Automated(side));
        }
        match self.phase {
            Phase::Ready => return Err(CommandError::NotStarted),
            Phase::GameOver { .. } => return Err(CommandError::GameOver),
            Phase::Setup(active) | Phase::Targeting(active) if active != side => {
                return Err(CommandError::OutOfTurn(side));
            }
            _ => {}
        }

        let mut events = Vec::new();
        let status = {
            let (own, enemy) = self.split(side);
            let (forces, commander) = own.parts();
            let ctx = TurnContext {
                own: forces,
                enemy: enemy.forces_mut().fleet_mut(),
                events: &mut events,
            };
            commander.command(command, ctx)?
        };
        if !self.check_victory(side, &mut events) && status == TurnStatus::Complete {
            events.push(Event::TurnEnded { side });
            self.run(side.opponent(), &mut events);
        }
        Ok(events)
    }

    /// Grant turns starting with `side` for as long as they complete on their own.
    fn run(&mut self, mut side: Side, events: &mut Vec<Event>) {
        loop {
            let turn = {
                let count = &mut self.turns[side.index()];
                *count += 1;
                *count
            };
            let kind = if turn == 1 {
                TurnKind::Setup
            } else {
                TurnKind::Targeting
            };
            self.phase = match kind {
                TurnKind::Setup => Phase::Setup(side),
                TurnKind::Targeting => Phase::Targeting(side),
            };
            info!("{} granted turn {} ({:?})", side, turn, kind);
            events.push(Event::TurnGranted { side, turn, kind });

            let status = {
                let (own, enemy) = self.split(side);
                let (forces, commander) = own.parts();
                let ctx = TurnContext {
                    own: forces,
                    enemy: enemy.forces_mut().fleet_mut(),
                    events: &mut *events,
                };
                commander.begin_turn(kind, ctx)
            };
            if self.check_victory(side, events) || status == TurnStatus::InProgress {
                return;
            }
            events.push(Event::TurnEnded { side });
            side = side.opponent();
        }
    }

    /// End the match if `attacker` has destroyed the whole opposing fleet.
    fn check_victory(&mut self, attacker: Side, events: &mut Vec<Event>) -> bool {
        if self.phase != Phase::Targeting(attacker) {
            return false;
        }
        let destroyed = self.combatants[attacker.index()].forces().destroyed_count();
        let fielded = self.combatants[attacker.opponent().index()]
            .forces()
            .fleet()
            .size();
        if fielded != Some(destroyed) {
            return false;
        }
        info!("{} wins", attacker);
        self.phase = Phase::GameOver { winner: attacker };
        events.push(Event::GameOver { winner: attacker });
        true
    }

    /// Borrow `side` and its opponent at the same time.
    fn split(&mut self, side: Side) -> (&mut Combatant, &mut Combatant) {
        let [p1, p2] = &mut self.combatants;
        match side {
            Side::P1 => (p1, p2),
            Side::P2 => (p2, p1),
        }
    }

    pub fn phase(&self) -> Phase {
        self.phase
    }

    /// The side whose turn it is, if any.
    pub fn active(&self) -> Option<Side> {
        self.phase.active()
    }

    pub fn winner(&self) -> Option<Side> {
        match self.phase {
            Phase::GameOver { winner } => Some(winner),
            _ => None,
        }
    }

    pub fn is_over(&self) -> bool {
        self.winner().is_some()
    }

    /// Number of turns granted to `side` so far.
    pub fn turns(&self, side: Side) -> u32 {
        self.turns[side.index()]
    }

    pub fn combatant(&self, side: Side) -> &Combatant {
        &self.combatants[side.index()]
    }

    /// What input `side` must submit next.
    pub fn expecting(&self, side: Side) -> Expecting {
        if self.active() == Some(side) {
            self.combatant(side).expecting()
        } else {
            Expecting::Nothing
        }
    }

    /// The view of the cell named by `address`.
    pub fn cell(&self, address: GridAddress) -> CellView {
        let forces = self.combatant(address.board.side).forces();
        match address.board.role {
            BoardRole::Placement => forces.fleet().board().view(address.coord),
            BoardRole::Targeting => forces.targets().view(address.coord),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{board::BoardId, combatant::Human, ships::ShipType, Coordinate};

    fn hot_seat() -> Match {
        Match::new(Box::new(Human::new()), Box::new(Human::new()))
    }

    #[test]
    fn commands_before_start_are_refused() {
        let mut game = hot_seat();
        assert_eq!(game.phase(), Phase::Ready);
        assert_eq!(
            game.submit(Side::P1, Command::SetFleetSize(1)),
            Err(CommandError::NotStarted)
        );
    }

    #[test]
    fn start_grants_side_one_a_setup_turn() {
        let mut game = hot_seat();
        let events = game.start();
        assert_eq!(
            events,
            [
                Event::TurnGranted {
                    side: Side::P1,
                    turn: 1,
                    kind: TurnKind::Setup,
                },
                Event::FleetSizeRequested { side: Side::P1 },
            ]
        );
        assert_eq!(game.phase(), Phase::Setup(Side::P1));
        assert_eq!(game.expecting(Side::P1), Expecting::FleetSize);
        assert_eq!(game.expecting(Side::P2), Expecting::Nothing);
        assert!(game.start().is_empty());
        assert_eq!(
            game.submit(Side::P2, Command::SetFleetSize(1)),
            Err(CommandError::OutOfTurn(Side::P2))
        );
    }

    #[test]
    fn setup_passes_to_the_other_side() {
        let mut game = hot_seat();
        game.start();
        game.submit(Side::P1, Command::SetFleetSize(1)).unwrap();
        let address = BoardId::placement(Side::P1).at(Coordinate::new(0, 0));
        assert_eq!(game.cell(address), CellView::Ship);

        let events = game.submit(Side::P1, Command::Confirm).unwrap();
        assert_eq!(game.cell(address), CellView::Locked(ShipType::PatrolBoat));
        assert_eq!(
            events,
            [
                Event::PlacementConfirmed {
                    side: Side::P1,
                    ship: ShipType::PatrolBoat,
                },
                Event::TurnEnded { side: Side::P1 },
                Event::TurnGranted {
                    side: Side::P2,
                    turn: 1,
                    kind: TurnKind::Setup,
                },
                Event::FleetSizeRequested { side: Side::P2 },
            ]
        );
        assert_eq!(game.phase(), Phase::Setup(Side::P2));
        assert_eq!(game.turns(Side::P1), 1);
    }
}
