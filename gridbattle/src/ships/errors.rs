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

/// Reason a move or confirmation of a ship was refused. The ship is left exactly as it
/// was.
#[derive(Debug, Error, Copy, Clone, Eq, PartialEq)]
pub enum PlacementRejected {
    /// The ship was already confirmed and can no longer change.
    #[error("ship placement is already locked")]
    Locked,
    /// At least one cell would leave the board.
    #[error("the move would take the ship off the board")]
    OutOfBounds,
    /// The ship overlaps another ship and cannot be confirmed.
    #[error("the ship overlaps another ship")]
    Overlapping,
}
