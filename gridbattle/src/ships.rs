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

//! Types used for defining ships and their placement.
use std::fmt;

use enumflags2::BitFlags;
use rand::{
    distributions::{Distribution, Standard},
    Rng,
};

pub use self::{errors::PlacementRejected, ship::Ship};

mod errors;
mod ship;

/// Largest number of ships a side may field.
pub const MAX_FLEET_SIZE: usize = 5;

/// The fixed fleet table. Each type has a distinct length, from 1 to 5.
#[derive(BitFlags, Copy, Clone, Debug, Eq, PartialEq, Hash)]
#[repr(u8)]
pub enum ShipType {
    /// Length 1.
    PatrolBoat = 0b00001,
    /// Length 2.
    Cruiser = 0b00010,
    /// Length 3.
    Destroyer = 0b00100,
    /// Length 4.
    Battleship = 0b01000,
    /// Length 5.
    Carrier = 0b10000,
}

impl ShipType {
    /// Every ship type, in placement order.
    pub const ALL: &'static [ShipType] = &[
        ShipType::PatrolBoat,
        ShipType::Cruiser,
        ShipType::Destroyer,
        ShipType::Battleship,
        ShipType::Carrier,
    ];

    /// Get the ship type with the given length.
    pub fn from_len(len: usize) -> Option<Self> {
        len.checked_sub(1).and_then(|i| Self::ALL.get(i)).copied()
    }

    /// Get the length of this ship type.
    pub fn len(self) -> usize {
        match self {
            ShipType::PatrolBoat => 1,
            ShipType::Cruiser => 2,
            ShipType::Destroyer => 3,
            ShipType::Battleship => 4,
            ShipType::Carrier => 5,
        }
    }

    /// Display name of this ship type.
    pub fn name(self) -> &'static str {
        match self {
            ShipType::PatrolBoat => "Patrol Boat",
            ShipType::Cruiser => "Cruiser",
            ShipType::Destroyer => "Destroyer",
            ShipType::Battleship => "Battleship",
            ShipType::Carrier => "Carrier",
        }
    }

    /// The ship types fielded by a fleet of the given size: the `size` shortest.
    pub fn fleet(size: usize) -> BitFlags<ShipType> {
        let mut fleet = BitFlags::empty();
        for &ship in Self::ALL.iter().take(size) {
            fleet.insert(ship);
        }
        fleet
    }
}

impl fmt::Display for ShipType {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.pad(self.name())
    }
}

/// Direction of a quarter turn, as seen on a board whose rows grow downwards.
#[derive(Debug, Copy, Clone, Eq, PartialEq, Hash)]
pub enum Rotation {
    Clockwise,
    CounterClockwise,
}

impl Distribution<Rotation> for Standard {
    fn sample<R: Rng + ?Sized>(&self, rng: &mut R) -> Rotation {
        if rng.gen() {
            Rotation::Clockwise
        } else {
            Rotation::CounterClockwise
        }
    }
}

/// Axis a ship lies along.
#[derive(Debug, Copy, Clone, Eq, PartialEq)]
pub enum Orientation {
    Horizontal,
    Vertical,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn fleet_table() {
        for (i, ship) in ShipType::ALL.iter().enumerate() {
            assert_eq!(ship.len(), i + 1);
            assert_eq!(ShipType::from_len(i + 1), Some(*ship));
        }
        assert_eq!(ShipType::from_len(0), None);
        assert_eq!(ShipType::from_len(6), None);
        assert_eq!(ShipType::Carrier.to_string(), "Carrier");
    }

    #[test]
    fn fleet_by_size() {
        let fleet = ShipType::fleet(3);
        assert!(fleet.contains(ShipType::PatrolBoat));
        assert!(fleet.contains(ShipType::Destroyer));
        assert!(!fleet.contains(ShipType::Battleship));
        assert_eq!(fleet.iter().count(), 3);
        assert_eq!(ShipType::fleet(MAX_FLEET_SIZE), BitFlags::all());
    }
}
