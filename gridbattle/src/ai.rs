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

//! Hunt/target selection of cells to fire at.
//!
//! While nothing is being chased, targets are drawn uniformly at random from the cells
//! not yet selected. A hit queues the four orthogonal neighbors of the hit cell, which
//! are then tried in order before random hunting resumes. Sinking a ship drops whatever
//! is still queued.
use std::collections::{HashSet, VecDeque};

use log::trace;
use once_cell::sync::Lazy;
use rand::{distributions::Uniform, Rng};

use crate::{
    board::{Coordinate, Position, BOARD_SIZE, CELL_COUNT},
    combatant::ShotOutcome,
};

/// Range of valid row and column indexes.
static INDEX_RANGE: Lazy<Uniform<usize>> = Lazy::new(|| Uniform::new(0, BOARD_SIZE));

/// Which rule picks the next target.
#[derive(Debug, Copy, Clone, Eq, PartialEq)]
pub enum Mode {
    /// Random search.
    Hunt,
    /// Working through the neighbors of earlier hits.
    Target,
}

/// State of the hunt/target strategy for one attacker.
#[derive(Debug, Default)]
pub struct HuntTarget {
    /// Every cell selected so far.
    seen: HashSet<Coordinate>,

    /// Neighbors of hits still to try, possibly off the board or already seen.
    queue: VecDeque<Position>,
}

impl HuntTarget {
    pub fn new() -> Self {
        Self::default()
    }

    /// Current selection mode.
    pub fn mode(&self) -> Mode {
        if self.queue.is_empty() {
            Mode::Hunt
        } else {
            Mode::Target
        }
    }

    /// Queued follow-up positions, front first.
    pub fn pending(&self) -> impl Iterator<Item = &Position> {
        self.queue.iter()
    }

    /// Returns true if `coord` was already selected.
    pub fn seen(&self, coord: Coordinate) -> bool {
        self.seen.contains(&coord)
    }

    /// Number of cells selected so far.
    pub fn selected(&self) -> usize {
        self.seen.len()
    }

    /// Pick the next cell to fire at. Never returns the same cell twice. Returns `None`
    /// only once every cell of the board was selected.
    pub fn next_target<R: Rng + ?Sized>(&mut self, rng: &mut R) -> Option<Coordinate> {
        while let Some(pos) = self.queue.pop_front() {
            match pos.to_coordinate() {
                Some(coord) if self.seen.insert(coord) => {
                    trace!("following up at {}", coord);
                    return Some(coord);
                }
                _ => trace!("discarding follow-up {:?}", pos),
            }
        }
        self.hunt(rng)
    }

    /// Draw random cells until one not seen before comes up.
    fn hunt<R: Rng + ?Sized>(&mut self, rng: &mut R) -> Option<Coordinate> {
        if self.seen.len() >= CELL_COUNT {
            return None;
        }
        loop {
            let row = rng.sample(&*INDEX_RANGE);
            let col = rng.sample(&*INDEX_RANGE);
            let coord = Coordinate::new(row, col);
            if self.seen.insert(coord) {
                trace!("hunting at {}", coord);
                return Some(coord);
            }
        }
    }

    /// Update the strategy with the outcome of firing at `coord`.
    pub fn record(&mut self, coord: Coordinate, outcome: ShotOutcome) {
        match outcome {
            ShotOutcome::Miss => {}
            ShotOutcome::Hit(_) => {
                let neighbors = Position::from(coord).neighbors();
                self.queue.extend(neighbors.iter().copied());
            }
            ShotOutcome::Sunk(_) => self.queue.clear(),
        }
    }
}

#[cfg(test)]
mod tests {
    use rand::{rngs::StdRng, SeedableRng};

    use super::*;
    use crate::ships::ShipType;

    #[test]
    fn miss_leaves_queue_alone() {
        let mut ai = HuntTarget::new();
        ai.record(Coordinate::new(4, 3), ShotOutcome::Miss);
        assert_eq!(ai.mode(), Mode::Hunt);
        assert_eq!(ai.pending().count(), 0);
    }

    #[test]
    fn hit_queues_neighbors_in_order() {
        let mut rng = StdRng::seed_from_u64(4);
        let mut ai = HuntTarget::new();
        let hit = Coordinate::new(5, 5);
        ai.record(hit, ShotOutcome::Hit(ShipType::Carrier));
        assert_eq!(ai.mode(), Mode::Target);
        let queued: Vec<_> = ai.pending().copied().collect();
        assert_eq!(
            queued,
            [
                Position::new(4, 5),
                Position::new(6, 5),
                Position::new(5, 4),
                Position::new(5, 6),
            ]
        );

        assert_eq!(ai.next_target(&mut rng), Some(Coordinate::new(5, 4)));
        assert_eq!(ai.next_target(&mut rng), Some(Coordinate::new(5, 6)));
        assert_eq!(ai.next_target(&mut rng), Some(Coordinate::new(4, 5)));
        assert_eq!(ai.next_target(&mut rng), Some(Coordinate::new(6, 5)));
        assert_eq!(ai.mode(), Mode::Hunt);
    }

    #[test]
    fn follow_ups_skip_off_board_and_seen_cells() {
        let mut rng = StdRng::seed_from_u64(9);
        let mut ai = HuntTarget::new();
        ai.record(Coordinate::new(0, 1), ShotOutcome::Hit(ShipType::Cruiser));
        assert_eq!(ai.next_target(&mut rng), Some(Coordinate::new(0, 0)));

        // Queue is now a2, off, b1, off, a1, off, b0.
        ai.record(Coordinate::new(0, 0), ShotOutcome::Hit(ShipType::Cruiser));
        assert_eq!(ai.next_target(&mut rng), Some(Coordinate::new(0, 2)));
        assert_eq!(ai.next_target(&mut rng), Some(Coordinate::new(1, 1)));
        assert_eq!(ai.next_target(&mut rng), Some(Coordinate::new(0, 1)));
        assert_eq!(ai.next_target(&mut rng), Some(Coordinate::new(1, 0)));
        assert_eq!(ai.mode(), Mode::Hunt);
    }

    #[test]
    fn sinking_clears_the_queue() {
        let mut ai = HuntTarget::new();
        ai.record(Coordinate::new(2, 2), ShotOutcome::Hit(ShipType::Destroyer));
        ai.record(Coordinate::new(2, 3), ShotOutcome::Hit(ShipType::Destroyer));
        assert_eq!(ai.pending().count(), 8);
        ai.record(Coordinate::new(2, 4), ShotOutcome::Sunk(ShipType::Destroyer));
        assert_eq!(ai.mode(), Mode::Hunt);
        assert_eq!(ai.pending().count(), 0);
    }

    #[test]
    fn never_repeats_and_covers_the_board() {
        let mut rng = StdRng::seed_from_u64(77);
        let mut ai = HuntTarget::new();
        let mut picked = HashSet::new();
        for i in 0..CELL_COUNT {
            let coord = ai.next_target(&mut rng).unwrap();
            assert!(picked.insert(coord), "{} selected twice", coord);
            if i % 7 == 0 {
                ai.record(coord, ShotOutcome::Hit(ShipType::Carrier));
            }
        }
        assert_eq!(ai.selected(), CELL_COUNT);
        assert_eq!(ai.next_target(&mut rng), None);
    }
}
