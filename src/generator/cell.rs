/*
cell.rs

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

//! Board coordinates and jump offsets.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Coordinates of a board cell.
///
/// The top-left cell is `(0, 0)`. Rows grow downward and columns grow to the right.
#[derive(
    Serialize, Deserialize, Debug, Copy, Clone, Default, PartialEq, Eq, Hash, PartialOrd, Ord,
)]
pub struct Cell {
    pub row: usize,
    pub col: usize,
}

impl Cell {
    /// Create a [`Cell`] object.
    pub const fn new(row: usize, col: usize) -> Self {
        Self { row, col }
    }

    /// Return the cell reached by applying `offset`, or None if that cell is outside a board of
    /// `rows` by `cols` cells.
    pub fn offset(&self, offset: Offset, rows: usize, cols: usize) -> Option<Cell> {
        let row: usize = self.row.checked_add_signed(offset.row)?;
        let col: usize = self.col.checked_add_signed(offset.col)?;
        if row < rows && col < cols {
            Some(Cell { row, col })
        } else {
            None
        }
    }

    /// Manhattan distance between two cells.
    pub fn manhattan(&self, other: Cell) -> usize {
        self.row.abs_diff(other.row) + self.col.abs_diff(other.col)
    }
}

impl fmt::Display for Cell {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "({}, {})", self.row, self.col)
    }
}

/// Relative jump between two cells.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash)]
pub struct Offset {
    pub row: isize,
    pub col: isize,
}

impl Offset {
    /// Create an [`Offset`] object.
    pub const fn new(row: isize, col: isize) -> Self {
        Self { row, col }
    }

    /// Multiply the offset by the given stride.
    pub const fn scale(self, stride: isize) -> Self {
        Self {
            row: self.row * stride,
            col: self.col * stride,
        }
    }

    /// Whether the jump progresses toward the bottom-right corner.
    ///
    /// Canonical jumps are always offered to the path generator. The other (reverse) jumps are
    /// only offered with the difficulty bias probability.
    pub const fn is_canonical(&self) -> bool {
        self.row + self.col > 0
    }

    /// Manhattan length of the jump.
    pub const fn length(&self) -> usize {
        self.row.unsigned_abs() + self.col.unsigned_abs()
    }
}
