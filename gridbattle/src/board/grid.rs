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

//! Storage shared by the placement and targeting boards.

use std::ops::{Index, IndexMut};

use crate::board::{Coordinate, CELL_COUNT};

/// Fixed-size cell storage indexed by [`Coordinate`].
#[derive(Debug)]
pub(super) struct Grid<C> {
    /// Cells that make up this board, row-major.
    cells: Box<[C]>,
}

impl<C: Default> Grid<C> {
    pub(super) fn new() -> Self {
        let cells = (0..CELL_COUNT).map(|_| Default::default()).collect();
        Self { cells }
    }
}

impl<C> Grid<C> {
    /// Count the cells that satisfy `pred`.
    pub(super) fn count<F: Fn(&C) -> bool>(&self, pred: F) -> usize {
        self.cells.iter().filter(|cell| pred(cell)).count()
    }
}

// Coordinates are always in bounds, so indexing never fails.
impl<C> Index<Coordinate> for Grid<C> {
    type Output = C;

    fn index(&self, coord: Coordinate) -> &Self::Output {
        &self.cells[coord.linearize()]
    }
}

impl<C> IndexMut<Coordinate> for Grid<C> {
    fn index_mut(&mut self, coord: Coordinate) -> &mut Self::Output {
        &mut self.cells[coord.linearize()]
    }
}
