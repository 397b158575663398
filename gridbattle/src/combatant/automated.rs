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

use log::{debug, trace, warn};
use rand::{Rng, RngCore};

use crate::{
    ai::HuntTarget,
    board::{Coordinate, BOARD_SIZE},
    combatant::{Commander, Fleet, TurnContext, TurnStatus},
    game::{Command, CommandError, Event, Expecting, TurnKind},
    ships::{Rotation, MAX_FLEET_SIZE},
};

/// Rounds of random moves tried for a ship before sweeping the board for a free spot.
const RANDOM_ATTEMPTS: usize = 64;

/// Most single-cell steps taken in each direction in one round of random moves.
const MAX_STEPS: usize = 8;

/// A side played by the computer. Every turn is played to completion as soon as it
/// begins.
pub struct Automated {
    rng: Box<dyn RngCore>,

    /// Fleet size used when the opponent has not chosen one yet.
    fleet_size: usize,

    strategy: HuntTarget,
}

impl Automated {
    /// Create a computer player with a full fleet, unless its opponent picks a smaller
    /// one first.
    pub fn new<R: RngCore + 'static>(rng: R) -> Self {
        Self::with_fleet_size(rng, MAX_FLEET_SIZE)
    }

    /// Create a computer player that fields `size` ships when it has to choose first.
    /// The size is clamped to the valid range.
    pub fn with_fleet_size<R: RngCore + 'static>(rng: R, size: usize) -> Self {
        Self {
            rng: Box::new(rng),
            fleet_size: size.max(1).min(MAX_FLEET_SIZE),
            strategy: HuntTarget::new(),
        }
    }

    /// The targeting strategy, for inspection.
    pub fn strategy(&self) -> &HuntTarget {
        &self.strategy
    }

    /// Apply a round of random moves to the pending ship. Moves that would leave the
    /// board are simply skipped.
    fn shuffle(&mut self, fleet: &mut Fleet) {
        for &(dx, dy) in &[(-1, 0), (1, 0), (0, -1), (0, 1)] {
            let steps = self.rng.gen_range(0, MAX_STEPS + 1);
            for _ in 0..steps {
                if fleet.translate_pending(dx, dy).is_err() {
                    break;
                }
            }
        }
        if self.rng.gen() {
            let rotation: Rotation = self.rng.gen();
            if let Err(reason) = fleet.rotate_pending(rotation) {
                trace!("random rotation rejected: {}", reason);
            }
        }
    }

    /// Try every origin in every orientation until the pending ship can be confirmed.
    fn sweep(fleet: &mut Fleet) -> bool {
        // Any ship fits around the center in any orientation, so rotating there always
        // succeeds.
        let center = Coordinate::new(BOARD_SIZE / 2 - 1, BOARD_SIZE / 2 - 1);
        for _ in 0..4 {
            for coord in Coordinate::all() {
                if Self::move_origin(fleet, coord) && fleet.confirm_pending().is_ok() {
                    return true;
                }
            }
            if !Self::move_origin(fleet, center) || fleet.rotate_pending(Rotation::Clockwise).is_err() {
                return false;
            }
        }
        false
    }

    /// Translate the pending ship so its origin lands on `coord`.
    fn move_origin(fleet: &mut Fleet, coord: Coordinate) -> bool {
        let origin = match fleet.pending() {
            Some(ship) => ship.origin(),
            None => return false,
        };
        let dx = coord.col() as isize - origin.col() as isize;
        let dy = coord.row() as isize - origin.row() as isize;
        fleet.translate_pending(dx, dy).is_ok()
    }

    /// Place and confirm the pending ship.
    fn place(&mut self, fleet: &mut Fleet) -> bool {
        for attempt in 0..RANDOM_ATTEMPTS {
            self.shuffle(fleet);
            if fleet.confirm_pending().is_ok() {
                trace!("placed after {} random attempts", attempt + 1);
                return true;
            }
        }
        debug!("random placement failed, sweeping the board");
        Self::sweep(fleet)
    }

    fn setup(&mut self, ctx: TurnContext) {
        let side = ctx.own.side();
        let fleet = &mut ctx.own.fleet;
        if fleet.size().is_none() {
            let size = ctx.enemy.size().unwrap_or(self.fleet_size);
            if fleet.set_size(size).is_ok() {
                ctx.events.push(Event::FleetSizeChosen { side, size });
            }
        }
        while let Some(ship) = fleet.start_next_ship() {
            ctx.events.push(Event::PlacementStarted { side, ship });
            if !self.place(fleet) {
                warn!("{} could not find room for its {}", side, ship);
                break;
            }
            ctx.events.push(Event::PlacementConfirmed { side, ship });
        }
    }

    fn fire(&mut self, ctx: TurnContext) {
        let side = ctx.own.side();
        let coord = match self.strategy.next_target(&mut *self.rng) {
            Some(coord) => coord,
            None => {
                warn!("{} has no cells left to fire at", side);
                return;
            }
        };
        match ctx.own.fire_at(coord, ctx.enemy) {
            Ok(outcome) => {
                self.strategy.record(coord, outcome);
                ctx.events.push(Event::FireResolved {
                    attacker: side,
                    address: ctx.enemy.board().id().at(coord),
                    outcome,
                });
            }
            Err(err) => warn!("{} could not fire at {}: {}", side, coord, err),
        }
    }
}

impl Commander for Automated {
    fn begin_turn(&mut self, kind: TurnKind, ctx: TurnContext) -> TurnStatus {
        match kind {
            TurnKind::Setup => self.setup(ctx),
            TurnKind::Targeting => self.fire(ctx),
        }
        TurnStatus::Complete
    }

    fn command(&mut self, _command: Command, ctx: TurnContext) -> Result<TurnStatus, CommandError> {
        Err(CommandError::Automated(ctx.own.side()))
    }

    fn expecting(&self) -> Expecting {
        Expecting::Nothing
    }

    fn automated(&self) -> bool {
        true
    }
}
