/*
movement.rs

Copyright 2025 Hervé Quatremain

This file is part of Jumpgrid.

Jumpgrid is free software: you can redistribute it and/or modify it under the
terms of the GNU General Public License as published by the Free Software
Foundation, either version 3 of the License, or (at your option) any later
version.

Jumpgrid is distributed in the hope that it will be useful, but WITHOUT ANY
WARRANTY; without even the implied warranty of MERCHANTABILITY or FITNESS FOR
A PARTICULAR PURPOSE. See the GNU General Public License for more details.

You should have received a copy of the GNU General Public License along with
Jumpgrid. If not, see <https://www.gnu.org/licenses/>.

SPDX-License-Identifier: GPL-3.0-or-later
*/

//! Movement models and candidate jumps.
//!
//! A movement model maps a cell and a movement parameter (the value stored in that cell) to the
//! cells reachable in one jump.
//! Two families are available:
//!
//! * [`super::distance::DistanceModel`]: the cell stores a distance `d` and the player jumps
//!   exactly `d` cells up, down, left, or right.
//! * [`super::pieces::PieceModel`]: the cell stores a chess piece label and the player jumps like
//!   that piece, sliding pieces moving exactly `stride` cells.
//!
//! A board uses one family only.

use clap::ValueEnum;
use rand::Rng;
use rand::seq::SliceRandom;
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use std::error::Error;
use std::fmt;
use std::hash::Hash;
use std::str::FromStr;

use super::cell::{Cell, Offset};

/// Error raised when parsing an invalid movement parameter.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ParseParamError {
    /// The label is empty.
    Empty,

    /// The first character of the label is not a known piece category.
    UnknownCategory(char),

    /// The stride of a sliding piece is missing, not a number, or out of range.
    InvalidStride(String),

    /// The distance is not a positive integer.
    InvalidDistance(String),
}

impl fmt::Display for ParseParamError {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            ParseParamError::Empty => write!(f, "empty movement parameter"),
            ParseParamError::UnknownCategory(c) => write!(f, "unknown piece category '{c}'"),
            ParseParamError::InvalidStride(s) => write!(f, "invalid piece label '{s}'"),
            ParseParamError::InvalidDistance(s) => write!(f, "invalid jump distance '{s}'"),
        }
    }
}

impl Error for ParseParamError {}

/// Extra rule used by the path generator to reject suspicious jumps.
#[derive(Serialize, Deserialize, Debug, Copy, Clone, PartialEq, Eq, Hash, ValueEnum)]
#[serde(rename_all = "kebab-case")]
pub enum ShortcutRule {
    /// Only reject destinations that the path can already reach.
    Basic,

    /// Also reject a destination that is not the goal when the jump length equals the remaining
    /// Manhattan distance to the goal.
    GoalDistance,
}

/// Movement model shared by the generator, the filler, and the verifier.
pub trait MovementModel {
    /// Movement parameter stored in the board cells.
    type Param: Copy
        + Eq
        + Hash
        + fmt::Debug
        + fmt::Display
        + FromStr<Err = ParseParamError>
        + Serialize
        + DeserializeOwned;

    /// Number of rows on the board.
    fn rows(&self) -> usize;

    /// Number of columns on the board.
    fn cols(&self) -> usize;

    /// Every parameter the model can assign, always in the same order.
    fn parameters(&self) -> Vec<Self::Param>;

    /// Jump offsets for the given parameter, before dropping the ones that leave the board.
    fn offsets(&self, param: Self::Param) -> Vec<Offset>;

    /// Shortcut rule to use when the configuration does not provide one.
    fn default_shortcut_rule(&self) -> ShortcutRule;

    /// Top-left cell, where every path starts.
    fn start(&self) -> Cell {
        Cell::new(0, 0)
    }

    /// Bottom-right cell, where every path ends.
    fn goal(&self) -> Cell {
        Cell::new(self.rows().saturating_sub(1), self.cols().saturating_sub(1))
    }

    /// Cells reachable in one jump from `cell` when it holds `param`.
    ///
    /// Offsets leading outside the board are dropped.
    fn moves(&self, cell: Cell, param: Self::Param) -> Vec<Cell> {
        self.offsets(param)
            .into_iter()
            .filter_map(|o| cell.offset(o, self.rows(), self.cols()))
            .collect()
    }
}

/// A jump that a cell could be assigned.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub struct Candidate<P> {
    /// Parameter to store in the source cell.
    pub param: P,

    /// Destination of the jump.
    pub destination: Cell,

    /// Manhattan length of the jump.
    pub length: usize,
}

/// Return every jump that `cell` could be assigned.
///
/// Canonical jumps (toward the bottom-right corner) are always included.
/// Each reverse jump is included with the `difficulty_bias` probability. A bias of `1.0` offers
/// every jump, and a bias of `0.0` only offers canonical jumps.
/// Jumps that leave the board are dropped after the bias draw.
pub fn candidates<M: MovementModel, R: Rng>(
    model: &M,
    cell: Cell,
    difficulty_bias: f64,
    shuffled: bool,
    rng: &mut R,
) -> Vec<Candidate<M::Param>> {
    let mut out: Vec<Candidate<M::Param>> = Vec::new();

    for param in model.parameters() {
        for offset in model.offsets(param) {
            if !offset.is_canonical() && rng.random::<f64>() >= difficulty_bias {
                continue;
            }
            if let Some(destination) = cell.offset(offset, model.rows(), model.cols()) {
                out.push(Candidate {
                    param,
                    destination,
                    length: offset.length(),
                });
            }
        }
    }

    if shuffled {
        out.shuffle(rng);
    }
    out
}
