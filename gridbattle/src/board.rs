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

//! Types that make up the game boards.
//!
//! Every side owns two boards. The [`PlacementBoard`] holds the side's own fleet and the
//! shots the opponent fired at it. The [`TargetBoard`] records the shots the side fired
//! at its opponent, and what they hit.

use enumflags2::BitFlags;

use crate::ships::ShipType;

use self::grid::Grid;
pub use self::{
    address::{BoardId, BoardRole, GridAddress, Side},
    coordinate::{Coordinate, Position, BOARD_SIZE, CELL_COUNT},
    errors::{AddressError, MalformedReason, ShotError},
};

mod address;
mod coordinate;
mod errors;
mod grid;

/// Result of a shot at a single cell.
#[derive(Debug, Copy, Clone, Eq, PartialEq, Hash)]
pub enum Shot {
    Hit,
    Miss,
}

/// What a presentation layer should show for a single cell.
#[derive(Debug, Copy, Clone, Eq, PartialEq)]
pub enum CellView {
    /// Nothing here, or nothing known about this cell.
    Empty,
    /// Claimed by a single ship that is still being placed.
    Ship,
    /// Claimed by more than one ship. Only possible before confirmation.
    Overlap,
    /// Holds a confirmed ship of the given type.
    Locked(ShipType),
    /// Shot and something was hit.
    Hit,
    /// Shot and nothing was hit.
    Miss,
}

/// Narrow interface ships use to read and write board occupancy while they are placed.
///
/// Ships are identified by their [`ShipType`], which is unique within one board.
pub trait Occupancy {
    /// Returns true if a ship other than `ship` currently claims `coord`.
    fn claimed_by_other(&self, coord: Coordinate, ship: ShipType) -> bool;

    /// Record that `ship` occupies `coord`.
    fn claim(&mut self, coord: Coordinate, ship: ShipType);

    /// Withdraw the claim of `ship` on `coord`. Locked cells keep their owner.
    fn release(&mut self, coord: Coordinate, ship: ShipType);

    /// Permanently assign `coord` to `ship` for hit attribution.
    fn lock(&mut self, coord: Coordinate, ship: ShipType);
}

/// A single cell in a placement board.
#[derive(Debug)]
struct PlacementCell {
    /// Ships that currently claim this cell.
    claims: BitFlags<ShipType>,

    /// The ship this cell belongs to once that ship is confirmed.
    locked: Option<ShipType>,

    /// The opponent's shot on this cell, if any.
    shot: Option<Shot>,
}

impl Default for PlacementCell {
    fn default() -> Self {
        Self {
            claims: BitFlags::empty(),
            locked: None,
            shot: None,
        }
    }
}

/// Board holding a side's own ships.
#[derive(Debug)]
pub struct PlacementBoard {
    id: BoardId,
    grid: Grid<PlacementCell>,
}

impl PlacementBoard {
    /// Create an empty placement board for the given side.
    pub fn new(side: Side) -> Self {
        Self {
            id: BoardId::placement(side),
            grid: Grid::new(),
        }
    }

    /// Get the [`BoardId`] of this board.
    pub fn id(&self) -> BoardId {
        self.id
    }

    /// The confirmed ship at `coord`, if any.
    pub fn locked_ship(&self, coord: Coordinate) -> Option<ShipType> {
        self.grid[coord].locked
    }

    /// The opponent's shot at `coord`, if any.
    pub fn shot(&self, coord: Coordinate) -> Option<Shot> {
        self.grid[coord].shot
    }

    /// Number of cells claimed by at least one ship.
    pub fn occupied_cells(&self) -> usize {
        self.grid.count(|cell| !cell.claims.is_empty())
    }

    /// Resolve an incoming shot. Returns the ship hit, if any, or an error if the cell
    /// was already shot.
    pub(crate) fn receive_shot(&mut self, coord: Coordinate) -> Result<Option<ShipType>, ShotError> {
        let cell = &mut self.grid[coord];
        if cell.shot.is_some() {
            return Err(ShotError::new(coord));
        }
        let ship = cell.locked;
        cell.shot = Some(if ship.is_some() { Shot::Hit } else { Shot::Miss });
        Ok(ship)
    }

    /// Get the view of the cell at `coord`.
    pub fn view(&self, coord: Coordinate) -> CellView {
        let cell = &self.grid[coord];
        match (cell.shot, cell.locked) {
            (Some(Shot::Hit), _) => CellView::Hit,
            (Some(Shot::Miss), _) => CellView::Miss,
            (None, Some(ship)) if cell.claims.iter().count() < 2 => CellView::Locked(ship),
            _ => match cell.claims.iter().count() {
                0 => CellView::Empty,
                1 => CellView::Ship,
                _ => CellView::Overlap,
            },
        }
    }
}

impl Occupancy for PlacementBoard {
    fn claimed_by_other(&self, coord: Coordinate, ship: ShipType) -> bool {
        let mut others = self.grid[coord].claims;
        others.remove(ship);
        !others.is_empty()
    }

    fn claim(&mut self, coord: Coordinate, ship: ShipType) {
        self.grid[coord].claims.insert(ship);
    }

    fn release(&mut self, coord: Coordinate, ship: ShipType) {
        let cell = &mut self.grid[coord];
        if cell.locked != Some(ship) {
            cell.claims.remove(ship);
        }
    }

    fn lock(&mut self, coord: Coordinate, ship: ShipType) {
        let cell = &mut self.grid[coord];
        cell.claims.insert(ship);
        cell.locked = Some(ship);
    }
}

/// Board where a side records the shots it fired at its opponent.
#[derive(Debug)]
pub struct TargetBoard {
    id: BoardId,
    grid: Grid<Option<Shot>>,
}

impl TargetBoard {
    /// Create an empty targeting board for the given side.
    pub fn new(side: Side) -> Self {
        Self {
            id: BoardId::targeting(side),
            grid: Grid::new(),
        }
    }

    /// Get the [`BoardId`] of this board.
    pub fn id(&self) -> BoardId {
        self.id
    }

    /// The recorded result of firing at `coord`, if any.
    pub fn get(&self, coord: Coordinate) -> Option<Shot> {
        self.grid[coord]
    }

    /// Returns true if `coord` was already fired upon.
    pub fn fired_at(&self, coord: Coordinate) -> bool {
        self.grid[coord].is_some()
    }

    /// Record the result of a shot. Fails if the cell already has a result.
    pub(crate) fn record(&mut self, coord: Coordinate, shot: Shot) -> Result<(), ShotError> {
        let cell = &mut self.grid[coord];
        if cell.is_some() {
            return Err(ShotError::new(coord));
        }
        *cell = Some(shot);
        Ok(())
    }

    /// Number of shots fired so far.
    pub fn shots_fired(&self) -> usize {
        self.grid.count(Option::is_some)
    }

    /// Get the view of the cell at `coord`.
    pub fn view(&self, coord: Coordinate) -> CellView {
        match self.grid[coord] {
            None => CellView::Empty,
            Some(Shot::Hit) => CellView::Hit,
            Some(Shot::Miss) => CellView::Miss,
        }
    }
}
