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

//! Game-logic engine for a two-party game of Battleship.
//!
//! Each side picks a fleet size, places that many ships on its own 10x10 board, and then
//! the sides alternate firing at cells of the other side's board until one of them has
//! destroyed the whole opposing fleet.
//!
//! The engine renders nothing and reads no input. A presentation layer drives a
//! [`Match`][game::Match] by submitting [`Command`][game::Command]s on behalf of the
//! side whose turn it is, and reflects the [`Event`][game::Event]s it gets back. Cells
//! are shared with the presentation layer through [`GridAddress`][board::GridAddress]
//! tokens such as `p1pa0`.
//!
//! Either side may be played by a [`Human`][combatant::Human], which waits for commands,
//! or by an [`Automated`][combatant::Automated] opponent, which places its fleet at
//! random and hunts with [`HuntTarget`][ai::HuntTarget].

pub mod ai;
pub mod board;
pub mod combatant;
pub mod game;
pub mod ships;

pub use crate::{
    board::{BoardId, BoardRole, Coordinate, GridAddress, Side},
    combatant::{Automated, Commander, Human},
    game::{Command, CommandError, Event, Match, Phase},
    ships::{Rotation, Ship, ShipType},
};
