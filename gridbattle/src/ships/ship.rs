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

//! Placement geometry and health of a single ship.
use log::{debug, trace};

use crate::{
    board::{BoardId, Coordinate, GridAddress, Occupancy, Position},
    ships::{Orientation, PlacementRejected, Rotation, ShipType},
};

/// A ship on a placement board.
///
/// While unlocked, a ship can be translated and rotated freely, including onto cells
/// claimed by other ships, which marks it invalid. Moves that would take any cell off
/// the board are refused as a whole. Once confirmed, the ship is locked and never moves
/// again.
#[derive(Debug)]
pub struct Ship {
    kind: ShipType,

    /// Board this ship is placed on.
    board: BoardId,

    /// Occupied cells. The first cell is the origin, which rotation pivots on.
    cells: Vec<Coordinate>,

    locked: bool,

    /// Whether any cell is also claimed by another ship.
    invalid: bool,

    health: usize,
}

impl Ship {
    /// Row and column of the first cell of a newly created ship.
    pub const ANCHOR: (usize, usize) = (0, 0);

    /// Create a ship of the given type at the default anchor, lying along the anchor's
    /// row, and claim its cells. If another ship already claims any of those cells the
    /// new ship starts out invalid.
    pub fn create<O: Occupancy + ?Sized>(board: BoardId, kind: ShipType, occupancy: &mut O) -> Self {
        let (row, col) = Self::ANCHOR;
        let cells: Vec<_> = (col..col + kind.len())
            .map(|col| Coordinate::new(row, col))
            .collect();
        let mut ship = Self {
            kind,
            board,
            cells: Vec::new(),
            locked: false,
            invalid: false,
            health: kind.len(),
        };
        ship.occupy(cells, occupancy);
        debug!("created {} on {} (invalid: {})", kind, board, ship.invalid);
        ship
    }

    /// Get the type of this ship.
    pub fn kind(&self) -> ShipType {
        self.kind
    }

    /// Get the length of this ship.
    pub fn len(&self) -> usize {
        self.cells.len()
    }

    /// The board this ship is placed on.
    pub fn board(&self) -> BoardId {
        self.board
    }

    /// Cells currently occupied, origin first.
    pub fn cells(&self) -> &[Coordinate] {
        &self.cells
    }

    /// The origin cell.
    pub fn origin(&self) -> Coordinate {
        // A ship always has at least one cell.
        self.cells[0]
    }

    /// Addresses of the occupied cells, origin first.
    pub fn addresses<'a>(&'a self) -> impl 'a + Iterator<Item = GridAddress> {
        let board = self.board;
        self.cells.iter().map(move |&coord| board.at(coord))
    }

    /// Whether the placement was confirmed.
    pub fn locked(&self) -> bool {
        self.locked
    }

    /// Whether the ship currently overlaps another ship.
    pub fn invalid(&self) -> bool {
        self.invalid
    }

    /// Remaining health.
    pub fn health(&self) -> usize {
        self.health
    }

    /// How many hits the ship has taken.
    pub fn times_hit(&self) -> usize {
        self.kind.len() - self.health
    }

    /// Returns true once health has reached zero.
    pub fn destroyed(&self) -> bool {
        self.health == 0
    }

    /// The axis the ship lies along: vertical when the last cell shares the origin's
    /// column. A single-cell ship counts as vertical.
    pub fn orientation(&self) -> Orientation {
        let origin = self.origin();
        match self.cells.last() {
            Some(last) if last.col() != origin.col() => Orientation::Horizontal,
            _ => Orientation::Vertical,
        }
    }

    /// Shift the ship by `dx` columns and `dy` rows.
    pub fn translate<O: Occupancy + ?Sized>(
        &mut self,
        dx: isize,
        dy: isize,
        occupancy: &mut O,
    ) -> Result<(), PlacementRejected> {
        if self.locked {
            return Err(PlacementRejected::Locked);
        }
        let moved = self.candidates(|pos| pos.offset(dx, dy))?;
        self.occupy(moved, occupancy);
        trace!("{} on {} moved by ({}, {})", self.kind, self.board, dx, dy);
        Ok(())
    }

    /// Rotate the ship a quarter turn about its origin.
    pub fn rotate<O: Occupancy + ?Sized>(
        &mut self,
        rotation: Rotation,
        occupancy: &mut O,
    ) -> Result<(), PlacementRejected> {
        if self.locked {
            return Err(PlacementRejected::Locked);
        }
        let origin = Position::from(self.origin());
        let rotated = self.candidates(|pos| {
            let (dx, dy) = (pos.x - origin.x, pos.y - origin.y);
            match rotation {
                Rotation::CounterClockwise => origin.offset(dy, -dx),
                Rotation::Clockwise => origin.offset(-dy, dx),
            }
        })?;
        self.occupy(rotated, occupancy);
        trace!("{} on {} rotated {:?}", self.kind, self.board, rotation);
        Ok(())
    }

    /// Confirm the current placement. Fails without change if the ship overlaps
    /// another. Confirming an already locked ship does nothing.
    pub fn confirm<O: Occupancy + ?Sized>(&mut self, occupancy: &mut O) -> Result<(), PlacementRejected> {
        if self.locked {
            return Ok(());
        }
        if self.invalid {
            return Err(PlacementRejected::Overlapping);
        }
        self.lock(occupancy);
        Ok(())
    }

    fn lock<O: Occupancy + ?Sized>(&mut self, occupancy: &mut O) {
        self.locked = true;
        for &coord in &self.cells {
            occupancy.lock(coord, self.kind);
        }
        debug!("locked {} on {} at {:?}", self.kind, self.board, self.cells);
    }

    /// Take one hit. Returns true if this destroyed the ship.
    pub fn decrement_health(&mut self) -> bool {
        self.health = self.health.saturating_sub(1);
        self.health == 0
    }

    /// Map every cell through `f`, failing if any result is off the board.
    fn candidates<F>(&self, f: F) -> Result<Vec<Coordinate>, PlacementRejected>
    where
        F: Fn(Position) -> Position,
    {
        self.cells
            .iter()
            .map(|&coord| f(Position::from(coord)).to_coordinate())
            .collect::<Option<Vec<_>>>()
            .ok_or(PlacementRejected::OutOfBounds)
    }

    /// Move onto `cells`. All previous claims are released before any new cell is
    /// claimed, so cells shared by the old and new position don't count as overlap.
    fn occupy<O: Occupancy + ?Sized>(&mut self, cells: Vec<Coordinate>, occupancy: &mut O) {
        for &coord in &self.cells {
            occupancy.release(coord, self.kind);
        }
        self.invalid = false;
        for &coord in &cells {
            if occupancy.claimed_by_other(coord, self.kind) {
                self.invalid = true;
            }
            occupancy.claim(coord, self.kind);
        }
        self.cells = cells;
    }
}

#[cfg(test)]
mod tests {
    use rand::{rngs::StdRng, Rng, SeedableRng};

    use super::*;
    use crate::board::{CellView, PlacementBoard, Side, BOARD_SIZE};

    fn coords(cells: &[(usize, usize)]) -> Vec<Coordinate> {
        cells.iter().map(|&(row, col)| Coordinate::new(row, col)).collect()
    }

    fn setup(kind: ShipType) -> (PlacementBoard, Ship) {
        let mut board = PlacementBoard::new(Side::P1);
        let ship = Ship::create(board.id(), kind, &mut board);
        (board, ship)
    }

    #[test]
    fn created_at_anchor() {
        let (board, ship) = setup(ShipType::Destroyer);
        assert_eq!(ship.cells(), &coords(&[(0, 0), (0, 1), (0, 2)])[..]);
        assert_eq!(ship.health(), 3);
        assert!(!ship.invalid());
        assert!(!ship.locked());
        assert_eq!(ship.orientation(), Orientation::Horizontal);
        assert_eq!(board.occupied_cells(), 3);
        let tokens: Vec<_> = ship.addresses().map(|a| a.to_string()).collect();
        assert_eq!(tokens, ["p1pa0", "p1pa1", "p1pa2"]);
    }

    #[test]
    fn translate_within_bounds() {
        let (mut board, mut ship) = setup(ShipType::Destroyer);
        ship.translate(1, 0, &mut board).unwrap();
        assert_eq!(ship.cells(), &coords(&[(0, 1), (0, 2), (0, 3)])[..]);

        assert_eq!(
            ship.translate(0, -1, &mut board),
            Err(PlacementRejected::OutOfBounds)
        );
        assert_eq!(ship.cells(), &coords(&[(0, 1), (0, 2), (0, 3)])[..]);
        assert_eq!(board.view(Coordinate::new(0, 0)), CellView::Empty);
        assert_eq!(board.view(Coordinate::new(0, 3)), CellView::Ship);
        assert_eq!(board.occupied_cells(), 3);
    }

    #[test]
    fn translate_off_board_keeps_overlap() {
        let mut board = PlacementBoard::new(Side::P1);
        let mut blocker = Ship::create(board.id(), ShipType::PatrolBoat, &mut board);
        blocker.confirm(&mut board).unwrap();
        let mut ship = Ship::create(board.id(), ShipType::Destroyer, &mut board);
        assert!(ship.invalid());

        let before = ship.cells().to_vec();
        for &(dx, dy) in [(0, -1), (-1, 0), (8, 0)].iter() {
            assert_eq!(
                ship.translate(dx, dy, &mut board),
                Err(PlacementRejected::OutOfBounds)
            );
            assert_eq!(ship.cells(), &before[..]);
            assert!(ship.invalid());
            assert_eq!(board.view(Coordinate::new(0, 0)), CellView::Overlap);
        }
        assert_eq!(ship.confirm(&mut board), Err(PlacementRejected::Overlapping));
    }

    #[test]
    fn translate_along_own_axis_is_not_overlap() {
        let (mut board, mut ship) = setup(ShipType::Carrier);
        ship.translate(1, 0, &mut board).unwrap();
        assert!(!ship.invalid());
        ship.translate(-1, 0, &mut board).unwrap();
        assert!(!ship.invalid());
    }

    #[test]
    fn translate_is_atomic_at_the_edge() {
        let (mut board, mut ship) = setup(ShipType::Battleship);
        for _ in 0..BOARD_SIZE {
            let _ = ship.translate(1, 0, &mut board);
        }
        // Stopped with the far end in the last column.
        assert_eq!(ship.cells().last(), Some(&Coordinate::new(0, BOARD_SIZE - 1)));
        assert_eq!(ship.origin(), Coordinate::new(0, BOARD_SIZE - 4));
        assert_eq!(board.occupied_cells(), 4);
    }

    #[test]
    fn overlap_blocks_confirmation() {
        let mut board = PlacementBoard::new(Side::P2);
        let mut first = Ship::create(board.id(), ShipType::Cruiser, &mut board);
        first.confirm(&mut board).unwrap();

        let mut second = Ship::create(board.id(), ShipType::Destroyer, &mut board);
        assert!(second.invalid());
        assert_eq!(board.view(Coordinate::new(0, 0)), CellView::Overlap);
        assert_eq!(second.confirm(&mut board), Err(PlacementRejected::Overlapping));
        assert!(!second.locked());

        second.translate(0, 1, &mut board).unwrap();
        assert!(!second.invalid());
        assert_eq!(
            board.view(Coordinate::new(0, 0)),
            CellView::Locked(ShipType::Cruiser)
        );
        second.confirm(&mut board).unwrap();
        assert!(second.locked());
        assert_eq!(board.locked_ship(Coordinate::new(1, 2)), Some(ShipType::Destroyer));
    }

    #[test]
    fn overlap_with_unconfirmed_ship_clears_when_moved_away() {
        let mut board = PlacementBoard::new(Side::P1);
        let mut first = Ship::create(board.id(), ShipType::Cruiser, &mut board);
        first.translate(0, 3, &mut board).unwrap();
        let mut second = Ship::create(board.id(), ShipType::Destroyer, &mut board);
        assert!(!second.invalid());
        second.translate(0, 3, &mut board).unwrap();
        assert!(second.invalid());
        second.translate(0, 1, &mut board).unwrap();
        assert!(!second.invalid());
        assert_eq!(board.view(Coordinate::new(3, 0)), CellView::Ship);
    }

    #[test]
    fn rotation_pivots_on_origin() {
        let (mut board, mut ship) = setup(ShipType::Destroyer);
        ship.translate(4, 4, &mut board).unwrap();
        // Origin e4, extending right.
        ship.rotate(Rotation::CounterClockwise, &mut board).unwrap();
        assert_eq!(ship.cells(), &coords(&[(4, 4), (3, 4), (2, 4)])[..]);
        assert_eq!(ship.orientation(), Orientation::Vertical);

        ship.rotate(Rotation::CounterClockwise, &mut board).unwrap();
        assert_eq!(ship.cells(), &coords(&[(4, 4), (4, 3), (4, 2)])[..]);

        ship.rotate(Rotation::Clockwise, &mut board).unwrap();
        ship.rotate(Rotation::Clockwise, &mut board).unwrap();
        assert_eq!(ship.cells(), &coords(&[(4, 4), (4, 5), (4, 6)])[..]);
        assert_eq!(board.occupied_cells(), 3);
    }

    #[test]
    fn rotation_off_board_is_rejected_and_keeps_invalid() {
        let mut board = PlacementBoard::new(Side::P1);
        let mut blocker = Ship::create(board.id(), ShipType::PatrolBoat, &mut board);
        blocker.confirm(&mut board).unwrap();
        let mut ship = Ship::create(board.id(), ShipType::Destroyer, &mut board);
        assert!(ship.invalid());

        // From row a, counter-clockwise would point up off the board.
        let before = ship.cells().to_vec();
        assert_eq!(
            ship.rotate(Rotation::CounterClockwise, &mut board),
            Err(PlacementRejected::OutOfBounds)
        );
        assert_eq!(ship.cells(), &before[..]);
        assert!(ship.invalid());

        // Clockwise points down along column 0, still over the blocker at the origin.
        ship.rotate(Rotation::Clockwise, &mut board).unwrap();
        assert_eq!(ship.cells(), &coords(&[(0, 0), (1, 0), (2, 0)])[..]);
        assert!(ship.invalid());
    }

    #[test]
    fn locked_ship_ignores_moves() {
        let (mut board, mut ship) = setup(ShipType::Cruiser);
        ship.confirm(&mut board).unwrap();
        let before = ship.cells().to_vec();
        assert_eq!(ship.translate(1, 1, &mut board), Err(PlacementRejected::Locked));
        assert_eq!(
            ship.rotate(Rotation::Clockwise, &mut board),
            Err(PlacementRejected::Locked)
        );
        assert_eq!(ship.confirm(&mut board), Ok(()));
        assert_eq!(ship.cells(), &before[..]);
        assert!(ship.locked());
    }

    #[test]
    fn health_runs_out_on_last_hit() {
        let (_, mut ship) = setup(ShipType::Carrier);
        for _ in 0..4 {
            assert!(!ship.decrement_health());
        }
        assert_eq!(ship.times_hit(), 4);
        assert!(ship.decrement_health());
        assert!(ship.destroyed());
        assert_eq!(ship.health(), 0);
    }

    /// The case-by-case rotation rule: pick a formula from the direction, whether the
    /// origin has the larger coordinate along the ship's axis, and the orientation.
    fn case_rotation(cells: &[Coordinate], ccw: bool) -> Vec<(isize, isize)> {
        let to_xy = |c: &Coordinate| (c.col() as isize, c.row() as isize);
        let (ox, oy) = to_xy(&cells[0]);
        let (lx, ly) = to_xy(cells.last().unwrap());
        let vertical = lx == ox;
        let origin_high = if vertical { oy > ly } else { ox > lx };
        cells
            .iter()
            .map(to_xy)
            .enumerate()
            .map(|(i, (x, y))| {
                if i == 0 {
                    return (ox, oy);
                }
                match (ccw, origin_high, vertical) {
                    (true, true, true) => (ox - (oy - y), oy),
                    (true, true, false) => (ox, oy + (ox - x)),
                    (true, false, true) => (ox + (y - oy), oy),
                    (true, false, false) => (ox, oy - (x - ox)),
                    (false, true, true) => (ox + (oy - y), oy),
                    (false, true, false) => (ox, oy - (ox - x)),
                    (false, false, true) => (ox - (y - oy), oy),
                    (false, false, false) => (ox, oy + (x - ox)),
                }
            })
            .collect()
    }

    #[test]
    fn rotation_matches_case_analysis() {
        // Corner and edge pivots reject some steps, the centre accepts all of them.
        let pivots = [(0, 0), (0, 6), (9, 0), (9, 6), (4, 4), (2, 5), (7, 1)];
        let mut accepted = 0;
        let mut rejected = 0;
        for seed in 0..4 {
            let mut rng = StdRng::seed_from_u64(seed);
            for &(row, col) in pivots.iter() {
                let (mut board, mut ship) = setup(ShipType::Battleship);
                ship.translate(col, row, &mut board).unwrap();
                for _ in 0..24 {
                    let rotation: Rotation = rng.gen();
                    let before = ship.cells().to_vec();
                    let expected =
                        case_rotation(&before, rotation == Rotation::CounterClockwise);
                    let fits = expected.iter().all(|&(x, y)| {
                        (0..BOARD_SIZE as isize).contains(&x)
                            && (0..BOARD_SIZE as isize).contains(&y)
                    });
                    if fits {
                        ship.rotate(rotation, &mut board).unwrap();
                        let actual: Vec<_> = ship
                            .cells()
                            .iter()
                            .map(|c| (c.col() as isize, c.row() as isize))
                            .collect();
                        assert_eq!(actual, expected, "seed {} pivot {:?}", seed, (row, col));
                        accepted += 1;
                    } else {
                        assert_eq!(
                            ship.rotate(rotation, &mut board),
                            Err(PlacementRejected::OutOfBounds)
                        );
                        assert_eq!(ship.cells(), &before[..]);
                        rejected += 1;
                    }
                    assert_eq!(board.occupied_cells(), 4);
                }
            }
        }
        assert!(accepted > 0);
        assert!(rejected > 0);
    }

    #[test]
    fn never_leaves_the_board() {
        let (mut board, mut ship) = setup(ShipType::Carrier);
        let moves: [(isize, isize); 6] = [(3, 0), (0, 2), (-1, 0), (0, -1), (5, 5), (-4, 7)];
        for (i, &(dx, dy)) in moves.iter().cycle().take(60).enumerate() {
            let _ = ship.translate(dx, dy, &mut board);
            let rotation = if i % 3 == 0 {
                Rotation::Clockwise
            } else {
                Rotation::CounterClockwise
            };
            let _ = ship.rotate(rotation, &mut board);
            assert_eq!(ship.len(), 5);
            assert!(ship
                .cells()
                .iter()
                .all(|c| c.row() < BOARD_SIZE && c.col() < BOARD_SIZE));
            assert_eq!(board.occupied_cells(), 5);
        }
    }
}
