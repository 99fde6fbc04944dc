/*
distance.rs

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

//! Single-distance movement.
//!
//! A cell holding the distance `d` lets the player jump exactly `d` cells up, down, left, or
//! right.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use super::cell::Offset;
use super::movement::{MovementModel, ParseParamError, ShortcutRule};

/// Jump distance stored in a cell. Always at least 1.
#[derive(Serialize, Deserialize, Debug, Copy, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[serde(try_from = "u8", into = "u8")]
pub struct Distance(u8);

impl Distance {
    /// Create a [`Distance`] object.
    pub fn new(distance: u8) -> Result<Self, ParseParamError> {
        if distance == 0 {
            Err(ParseParamError::InvalidDistance(distance.to_string()))
        } else {
            Ok(Self(distance))
        }
    }

    /// Return the distance as an integer.
    pub fn get(&self) -> u8 {
        self.0
    }
}

impl TryFrom<u8> for Distance {
    type Error = ParseParamError;

    fn try_from(value: u8) -> Result<Self, Self::Error> {
        Distance::new(value)
    }
}

impl From<Distance> for u8 {
    fn from(value: Distance) -> Self {
        value.get()
    }
}

impl fmt::Display for Distance {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl FromStr for Distance {
    type Err = ParseParamError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        if s.is_empty() {
            return Err(ParseParamError::Empty);
        }
        match s.parse::<u8>() {
            Ok(d) if d > 0 => Ok(Self(d)),
            _ => Err(ParseParamError::InvalidDistance(String::from(s))),
        }
    }
}

/// Default maximum jump distance for a board of the given size.
pub fn default_max_distance(rows: usize, cols: usize) -> usize {
    ((rows + cols) / 2).saturating_sub(2).max(1)
}

/// Single-distance movement model.
#[derive(Debug, Clone, PartialEq)]
pub struct DistanceModel {
    rows: usize,
    cols: usize,

    /// Largest distance that can be stored in a cell.
    max_distance: u8,
}

impl DistanceModel {
    /// Create a [`DistanceModel`] object.
    ///
    /// Without `max_distance`, the [`default_max_distance`] for the board size is used.
    pub fn new(rows: usize, cols: usize, max_distance: Option<usize>) -> Self {
        let rows: usize = rows.max(1);
        let cols: usize = cols.max(1);
        let max_distance: usize = max_distance
            .unwrap_or_else(|| default_max_distance(rows, cols))
            .clamp(1, u8::MAX as usize);

        Self {
            rows,
            cols,
            max_distance: max_distance as u8,
        }
    }

    /// Return the largest distance that can be stored in a cell.
    pub fn max_distance(&self) -> u8 {
        self.max_distance
    }
}

impl MovementModel for DistanceModel {
    type Param = Distance;

    fn rows(&self) -> usize {
        self.rows
    }

    fn cols(&self) -> usize {
        self.cols
    }

    fn parameters(&self) -> Vec<Distance> {
        (1..=self.max_distance).map(Distance).collect()
    }

    fn offsets(&self, param: Distance) -> Vec<Offset> {
        let d: isize = param.get() as isize;
        vec![
            Offset::new(-d, 0),
            Offset::new(0, -d),
            Offset::new(d, 0),
            Offset::new(0, d),
        ]
    }

    fn default_shortcut_rule(&self) -> ShortcutRule {
        ShortcutRule::Basic
    }
}
