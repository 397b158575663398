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

//! Cell coordinates on the fixed 10x10 board.
use std::fmt;

/// Number of rows and of columns on every board.
pub const BOARD_SIZE: usize = 10;

/// Total number of cells on a board.
pub const CELL_COUNT: usize = BOARD_SIZE * BOARD_SIZE;

/// Letters used to name rows, in order.
pub(crate) const ROW_LETTERS: [char; BOARD_SIZE] = ['a', 'b', 'c', 'd', 'e', 'f', 'g', 'h', 'i', 'j'];

/// The coordinates of a cell in a board. Always in bounds.
#[derive(Debug, Copy, Clone, Eq, PartialEq, Hash, PartialOrd, Ord)]
pub struct Coordinate {
    row: usize,
    col: usize,
}

impl Coordinate {
    /// Construct a [`Coordinate`] from the given `row` and `col`.
    /// Panics if either is outside `0..BOARD_SIZE`.
    pub fn new(row: usize, col: usize) -> Self {
        match Self::try_new(row, col) {
            Some(coord) => coord,
            None => panic!(
                "cell ({}, {}) is outside the {}x{} board",
                row, col, BOARD_SIZE, BOARD_SIZE
            ),
        }
    }

    /// Construct a [`Coordinate`], returning `None` if `row` or `col` is out of bounds.
    pub fn try_new(row: usize, col: usize) -> Option<Self> {
        if row < BOARD_SIZE && col < BOARD_SIZE {
            Some(Self { row, col })
        } else {
            None
        }
    }

    /// Row index, `0` being row `a`.
    pub fn row(self) -> usize {
        self.row
    }

    /// Column index.
    pub fn col(self) -> usize {
        self.col
    }

    /// Letter naming this coordinate's row.
    pub fn row_letter(self) -> char {
        ROW_LETTERS[self.row]
    }

    /// Convert to a linear index in `0..CELL_COUNT`, row-major.
    pub(crate) fn linearize(self) -> usize {
        self.row * BOARD_SIZE + self.col
    }

    /// Get an iterator over rows of the board. Each row is an iterator over the
    /// coordinates of that row.
    pub fn rows() -> impl Iterator<Item = impl Iterator<Item = Coordinate>> {
        (0..BOARD_SIZE).map(|row| (0..BOARD_SIZE).map(move |col| Coordinate { row, col }))
    }

    /// Get an iterator over every coordinate of the board, row-major.
    pub fn all() -> impl Iterator<Item = Coordinate> {
        Self::rows().flatten()
    }
}

impl fmt::Display for Coordinate {
    /// Formats as row letter followed by column digit, e.g. `c7`.
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{}{}", self.row_letter(), self.col)
    }
}

/// A signed cell position which may lie off the board. Used for candidate positions
/// that still have to be bounds checked.
///
/// `x` is the column and `y` the row, growing downwards.
#[derive(Debug, Copy, Clone, Eq, PartialEq, Hash)]
pub struct Position {
    pub x: isize,
    pub y: isize,
}

impl Position {
    /// Construct a [`Position`] from the given `x` (column) and `y` (row).
    pub fn new(x: isize, y: isize) -> Self {
        Self { x, y }
    }

    /// This position shifted by `dx` columns and `dy` rows.
    pub fn offset(self, dx: isize, dy: isize) -> Self {
        Self::new(self.x + dx, self.y + dy)
    }

    /// The four orthogonal neighbors, in the order left, right, up, down. Positions off
    /// the board are included.
    pub fn neighbors(self) -> [Position; 4] {
        [
            self.offset(-1, 0),
            self.offset(1, 0),
            self.offset(0, -1),
            self.offset(0, 1),
        ]
    }

    /// Convert to a [`Coordinate`] if this position is on the board.
    pub fn to_coordinate(self) -> Option<Coordinate> {
        if self.x < 0 || self.y < 0 {
            None
        } else {
            Coordinate::try_new(self.y as usize, self.x as usize)
        }
    }
}

impl From<Coordinate> for Position {
    fn from(coord: Coordinate) -> Self {
        Self::new(coord.col as isize, coord.row as isize)
    }
}
