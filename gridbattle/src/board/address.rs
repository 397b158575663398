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

//! Address tokens shared with the presentation layer.
//!
//! A token names one cell of one board in five ASCII characters:
//!
//! ```text
//! p 1 p a 0
//! | | | | `- column digit, 0-9
//! | | | `--- row letter, a-j
//! | | `----- board role: p (placement) or t (targeting)
//! `-+------- side: p1 or p2
//! ```
use std::{fmt, str::FromStr};

use rand::{
    distributions::{Distribution, Standard},
    Rng,
};

use crate::board::{coordinate::ROW_LETTERS, AddressError, Coordinate, MalformedReason};

/// One of the two parties of a match. Side 1 always takes the first turn.
#[derive(Debug, Copy, Clone, Eq, PartialEq, Hash)]
pub enum Side {
    P1,
    P2,
}

impl Side {
    /// Get the opponent of this side.
    pub fn opponent(self) -> Self {
        match self {
            Side::P1 => Side::P2,
            Side::P2 => Side::P1,
        }
    }

    /// The 1-based number of this side.
    pub fn number(self) -> u8 {
        match self {
            Side::P1 => 1,
            Side::P2 => 2,
        }
    }

    /// Index of this side in a two-element array.
    pub(crate) fn index(self) -> usize {
        match self {
            Side::P1 => 0,
            Side::P2 => 1,
        }
    }
}

impl fmt::Display for Side {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "Player {}", self.number())
    }
}

impl Distribution<Side> for Standard {
    fn sample<R: Rng + ?Sized>(&self, rng: &mut R) -> Side {
        if rng.gen() {
            Side::P1
        } else {
            Side::P2
        }
    }
}

/// Which of a side's two boards a token refers to.
#[derive(Debug, Copy, Clone, Eq, PartialEq, Hash)]
pub enum BoardRole {
    /// The board holding the side's own fleet.
    Placement,
    /// The board where the side records shots fired at its opponent.
    Targeting,
}

impl BoardRole {
    fn code(self) -> char {
        match self {
            BoardRole::Placement => 'p',
            BoardRole::Targeting => 't',
        }
    }
}

/// Identifies a single board: the owning side and the role it serves. Displays as the
/// three character token prefix, e.g. `p2t`.
#[derive(Debug, Copy, Clone, Eq, PartialEq, Hash)]
pub struct BoardId {
    pub side: Side,
    pub role: BoardRole,
}

impl BoardId {
    pub fn new(side: Side, role: BoardRole) -> Self {
        Self { side, role }
    }

    /// The placement board of the given side.
    pub fn placement(side: Side) -> Self {
        Self::new(side, BoardRole::Placement)
    }

    /// The targeting board of the given side.
    pub fn targeting(side: Side) -> Self {
        Self::new(side, BoardRole::Targeting)
    }

    /// Address of the given cell on this board.
    pub fn at(self, coord: Coordinate) -> GridAddress {
        GridAddress::new(self, coord)
    }
}

impl fmt::Display for BoardId {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "p{}{}", self.side.number(), self.role.code())
    }
}

/// A single cell of a single board.
#[derive(Debug, Copy, Clone, Eq, PartialEq, Hash)]
pub struct GridAddress {
    pub board: BoardId,
    pub coord: Coordinate,
}

impl GridAddress {
    /// Length of an encoded token.
    pub const TOKEN_LEN: usize = 5;

    pub fn new(board: BoardId, coord: Coordinate) -> Self {
        Self { board, coord }
    }

    /// Encode the board prefix, row and column into a token. Panics if `row` or `col`
    /// is out of bounds.
    pub fn encode(board: BoardId, row: usize, col: usize) -> String {
        Self::new(board, Coordinate::new(row, col)).to_string()
    }

    /// Decode a token into its board and cell.
    pub fn decode(token: &str) -> Result<Self, AddressError> {
        let err = |reason| -> Result<Self, AddressError> { Err(AddressError::new(reason, token)) };
        let bytes = token.as_bytes();
        if bytes.len() != Self::TOKEN_LEN {
            return err(MalformedReason::Length);
        }
        let side = match &bytes[..2] {
            b"p1" => Side::P1,
            b"p2" => Side::P2,
            _ => return err(MalformedReason::Side),
        };
        let role = match bytes[2] {
            b'p' => BoardRole::Placement,
            b't' => BoardRole::Targeting,
            _ => return err(MalformedReason::Role),
        };
        let row = match ROW_LETTERS.iter().position(|&l| l as u8 == bytes[3]) {
            Some(row) => row,
            None => return err(MalformedReason::Row),
        };
        let col = match bytes[4] {
            digit @ b'0'..=b'9' => (digit - b'0') as usize,
            _ => return err(MalformedReason::Column),
        };
        Ok(Self::new(BoardId::new(side, role), Coordinate::new(row, col)))
    }
}

impl fmt::Display for GridAddress {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{}{}", self.board, self.coord)
    }
}

impl FromStr for GridAddress {
    type Err = AddressError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::decode(s)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn encode_tokens() {
        assert_eq!(GridAddress::encode(BoardId::placement(Side::P1), 0, 0), "p1pa0");
        assert_eq!(GridAddress::encode(BoardId::targeting(Side::P2), 9, 7), "p2tj7");
        assert_eq!(BoardId::targeting(Side::P1).at(Coordinate::new(3, 4)).to_string(), "p1td4");
    }

    #[test]
    fn decode_tokens() {
        let addr: GridAddress = "p2pc5".parse().unwrap();
        assert_eq!(addr.board, BoardId::placement(Side::P2));
        assert_eq!(addr.coord, Coordinate::new(2, 5));

        let addr = GridAddress::decode("p1tj0").unwrap();
        assert_eq!(addr.board, BoardId::targeting(Side::P1));
        assert_eq!(addr.coord, Coordinate::new(9, 0));
    }

    #[test]
    fn decode_every_cell() {
        for side in [Side::P1, Side::P2].iter() {
            for coord in Coordinate::all() {
                let addr = BoardId::placement(*side).at(coord);
                assert_eq!(GridAddress::decode(&addr.to_string()).unwrap(), addr);
            }
        }
    }

    #[test]
    fn decode_malformed() {
        let reason = |token: &str| GridAddress::decode(token).unwrap_err().reason();
        assert_eq!(reason(""), MalformedReason::Length);
        assert_eq!(reason("p1pa10"), MalformedReason::Length);
        assert_eq!(reason("p3pa0"), MalformedReason::Side);
        assert_eq!(reason("q1pa0"), MalformedReason::Side);
        assert_eq!(reason("p1xa0"), MalformedReason::Role);
        assert_eq!(reason("p1pk0"), MalformedReason::Row);
        assert_eq!(reason("p1pA0"), MalformedReason::Row);
        assert_eq!(reason("p1pax"), MalformedReason::Column);
        assert_eq!(GridAddress::decode("p1p\u{e9}").unwrap_err().token(), "p1p\u{e9}");
    }

    #[test]
    fn opponent_is_involution() {
        assert_eq!(Side::P1.opponent(), Side::P2);
        assert_eq!(Side::P2.opponent().opponent(), Side::P2);
    }
}
