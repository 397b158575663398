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

use thiserror::Error;

use crate::{
    board::{BoardId, ShotError, Side},
    game::{Command, Expecting},
};

/// Reason a submitted command was refused. A refused command changes nothing.
#[derive(Debug, Error, Copy, Clone, Eq, PartialEq)]
pub enum CommandError {
    /// The match has not been started.
    #[error("the match has not started yet")]
    NotStarted,
    /// The match already has a winner.
    #[error("the match is over")]
    GameOver,
    /// The side submitting is not the one whose turn it is.
    #[error("it is not {0}'s turn")]
    OutOfTurn(Side),
    /// The side is played by the computer.
    #[error("{0} is played by the computer")]
    Automated(Side),
    /// The command does not fit the current stage of the turn.
    #[error("cannot {command} while waiting for {expecting}")]
    WrongPhase { command: Command, expecting: Expecting },
    /// The fleet size is out of range, or was already chosen.
    #[error("fleet size must be between 1 and 5, got {0}")]
    InvalidFleetSize(usize),
    /// The cell was already fired upon.
    #[error(transparent)]
    AlreadyTargeted(#[from] ShotError),
    /// The address is not on a board the side can fire at.
    #[error("{board} is not a board {side} can fire at")]
    WrongBoard { board: BoardId, side: Side },
}
