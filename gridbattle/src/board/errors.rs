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

//! Errors used by the boards and the address codec.

use thiserror::Error;

use crate::board::Coordinate;

/// The part of an address token that could not be decoded.
#[derive(Debug, Error, Copy, Clone, Eq, PartialEq)]
pub enum MalformedReason {
    #[error("token must be exactly 5 characters")]
    Length,
    #[error("token must start with p1 or p2")]
    Side,
    #[error("board role must be p or t")]
    Role,
    #[error("row must be a letter from a to j")]
    Row,
    #[error("column must be a digit")]
    Column,
}

/// Error returned when decoding a malformed address token.
#[derive(Debug, Error)]
#[error("malformed address {token:?}: {reason}")]
pub struct AddressError {
    reason: MalformedReason,
    token: String,
}

impl AddressError {
    pub(super) fn new(reason: MalformedReason, token: &str) -> Self {
        Self {
            reason,
            token: token.to_owned(),
        }
    }

    /// Get the reason decoding failed.
    pub fn reason(&self) -> MalformedReason {
        self.reason
    }

    /// Get the token that failed to decode.
    pub fn token(&self) -> &str {
        &self.token
    }
}

/// Error returned when a cell that was already shot is shot again.
#[derive(Debug, Error, Copy, Clone, Eq, PartialEq)]
#[error("cell {coord} was already shot")]
pub struct ShotError {
    coord: Coordinate,
}

impl ShotError {
    pub(crate) fn new(coord: Coordinate) -> Self {
        Self { coord }
    }

    /// Get the coordinate of the shot cell.
    pub fn coord(&self) -> Coordinate {
        self.coord
    }
}
