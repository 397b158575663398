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

use log::{debug, trace};

use crate::{
    board::Side,
    combatant::{Commander, TurnContext, TurnStatus},
    game::{Command, CommandError, Event, Expecting, TurnKind},
    ships::{PlacementRejected, ShipType},
};

/// Step of the turn a [`Human`] is in.
#[derive(Debug, Copy, Clone, Eq, PartialEq)]
enum Stage {
    /// Not our turn.
    Idle,
    ChoosingFleet,
    Placing(ShipType),
    Aiming,
    /// Fired, waiting for the turn to be ended.
    Reporting,
}

/// A side driven by commands from the presentation layer, one at a time.
#[derive(Debug)]
pub struct Human {
    stage: Stage,

    /// Fleet size chosen ahead of the match.
    preset: Option<usize>,
}

impl Human {
    /// A human who picks a fleet size when the first turn begins.
    pub fn new() -> Self {
        Self {
            stage: Stage::Idle,
            preset: None,
        }
    }

    /// A human whose fleet size was chosen up front. An out of range size is ignored and
    /// asked for again at the first turn.
    pub fn with_fleet_size(size: usize) -> Self {
        Self {
            stage: Stage::Idle,
            preset: Some(size),
        }
    }

    /// Put the next ship on the board, or finish the turn if the fleet is complete.
    fn next_ship(&mut self, ctx: TurnContext) -> TurnStatus {
        let side = ctx.own.side();
        match ctx.own.fleet.start_next_ship() {
            Some(ship) => {
                ctx.events.push(Event::PlacementStarted { side, ship });
                self.stage = Stage::Placing(ship);
                TurnStatus::InProgress
            }
            None => {
                self.stage = Stage::Idle;
                TurnStatus::Complete
            }
        }
    }

    /// Report the outcome of a placement move.
    fn placement_move(
        side: Side,
        ship: ShipType,
        result: Result<(), PlacementRejected>,
        ctx: TurnContext,
    ) -> TurnStatus {
        if let Err(reason) = result {
            trace!("{} move of {} rejected: {}", side, ship, reason);
            ctx.events.push(Event::MoveRejected { side, ship, reason });
        }
        TurnStatus::InProgress
    }
}

impl Default for Human {
    fn default() -> Self {
        Self::new()
    }
}

impl Commander for Human {
    fn begin_turn(&mut self, kind: TurnKind, ctx: TurnContext) -> TurnStatus {
        let side = ctx.own.side();
        match kind {
            TurnKind::Setup => {
                if let Some(size) = self.preset.take() {
                    match ctx.own.fleet.set_size(size) {
                        Ok(()) => {
                            ctx.events.push(Event::FleetSizeChosen { side, size });
                            return self.next_ship(ctx);
                        }
                        Err(err) => debug!("ignoring preset fleet size for {}: {}", side, err),
                    }
                }
                ctx.events.push(Event::FleetSizeRequested { side });
                self.stage = Stage::ChoosingFleet;
                TurnStatus::InProgress
            }
            TurnKind::Targeting => {
                self.stage = Stage::Aiming;
                TurnStatus::InProgress
            }
        }
    }

    fn command(&mut self, command: Command, ctx: TurnContext) -> Result<TurnStatus, CommandError> {
        let side = ctx.own.side();
        match (self.stage, command) {
            (Stage::ChoosingFleet, Command::SetFleetSize(size)) => {
                ctx.own.fleet.set_size(size)?;
                ctx.events.push(Event::FleetSizeChosen { side, size });
                Ok(self.next_ship(ctx))
            }
            (Stage::Placing(ship), Command::Translate { dx, dy }) => {
                let result = ctx.own.fleet.translate_pending(dx, dy);
                Ok(Self::placement_move(side, ship, result, ctx))
            }
            (Stage::Placing(ship), Command::Rotate(rotation)) => {
                let result = ctx.own.fleet.rotate_pending(rotation);
                Ok(Self::placement_move(side, ship, result, ctx))
            }
            (Stage::Placing(ship), Command::Confirm) => match ctx.own.fleet.confirm_pending() {
                Ok(_) => {
                    ctx.events.push(Event::PlacementConfirmed { side, ship });
                    Ok(self.next_ship(ctx))
                }
                Err(reason) => Ok(Self::placement_move(side, ship, Err(reason), ctx)),
            },
            (Stage::Aiming, Command::FireAt(address)) => {
                let defender = ctx.enemy.board().id();
                let own_targets = ctx.own.targets().id();
                if address.board != defender && address.board != own_targets {
                    return Err(CommandError::WrongBoard {
                        board: address.board,
                        side,
                    });
                }
                let outcome = ctx.own.fire_at(address.coord, ctx.enemy)?;
                ctx.events.push(Event::FireResolved {
                    attacker: side,
                    address: defender.at(address.coord),
                    outcome,
                });
                self.stage = Stage::Reporting;
                Ok(TurnStatus::InProgress)
            }
            (Stage::Reporting, Command::EndTurn) => {
                self.stage = Stage::Idle;
                Ok(TurnStatus::Complete)
            }
            (_, command) => Err(CommandError::WrongPhase {
                command,
                expecting: self.expecting(),
            }),
        }
    }

    fn expecting(&self) -> Expecting {
        match self.stage {
            Stage::Idle => Expecting::Nothing,
            Stage::ChoosingFleet => Expecting::FleetSize,
            Stage::Placing(ship) => Expecting::Placement(ship),
            Stage::Aiming => Expecting::Target,
            Stage::Reporting => Expecting::EndTurn,
        }
    }
}
