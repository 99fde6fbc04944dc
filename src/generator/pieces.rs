/*
pieces.rs

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

//! Chess piece movement.
//!
//! A cell holds a piece label such as `p`, `k`, `r3`, `b2`, or `q5`:
//!
//! * `p` (pawn) jumps one cell up, down, left, or right.
//! * `k` (knight) jumps in an L shape.
//! * `r` (rook) jumps exactly `stride` cells along a row or a column.
//! * `b` (bishop) jumps exactly `stride` cells along a diagonal.
//! * `q` (queen) combines the rook and the bishop jumps.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use super::cell::Offset;
use super::movement::{MovementModel, ParseParamError, ShortcutRule};

/// Largest stride for sliding pieces.
pub const MAX_STRIDE: u8 = 6;

const ORTHOGONAL: [Offset; 4] = [
    Offset::new(1, 0),
    Offset::new(-1, 0),
    Offset::new(0, 1),
    Offset::new(0, -1),
];

const DIAGONAL: [Offset; 4] = [
    Offset::new(1, 1),
    Offset::new(-1, -1),
    Offset::new(1, -1),
    Offset::new(-1, 1),
];

const KNIGHT: [Offset; 8] = [
    Offset::new(1, 2),
    Offset::new(-1, 2),
    Offset::new(1, -2),
    Offset::new(-1, -2),
    Offset::new(2, 1),
    Offset::new(-2, 1),
    Offset::new(2, -1),
    Offset::new(-2, -1),
];

/// Jump length of a sliding piece, between 1 and [`MAX_STRIDE`].
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Stride(u8);

impl Stride {
    /// Create a [`Stride`] object.
    pub fn new(stride: u8) -> Result<Self, ParseParamError> {
        if (1..=MAX_STRIDE).contains(&stride) {
            Ok(Self(stride))
        } else {
            Err(ParseParamError::InvalidStride(stride.to_string()))
        }
    }
}

/// Piece stored in a cell.
#[derive(Serialize, Deserialize, Debug, Copy, Clone, PartialEq, Eq, Hash)]
#[serde(try_from = "String", into = "String")]
pub enum Piece {
    Pawn,
    Knight,
    Rook(Stride),
    Bishop(Stride),
    Queen(Stride),
}

impl Piece {
    /// Return the jump offsets of the piece.
    pub fn offsets(&self) -> Vec<Offset> {
        match self {
            Piece::Pawn => ORTHOGONAL.to_vec(),
            Piece::Knight => KNIGHT.to_vec(),
            Piece::Rook(s) => ORTHOGONAL.iter().map(|o| o.scale(s.0 as isize)).collect(),
            Piece::Bishop(s) => DIAGONAL.iter().map(|o| o.scale(s.0 as isize)).collect(),
            Piece::Queen(s) => ORTHOGONAL
                .iter()
                .chain(DIAGONAL.iter())
                .map(|o| o.scale(s.0 as isize))
                .collect(),
        }
    }
}

impl fmt::Display for Piece {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            Piece::Pawn => write!(f, "p"),
            Piece::Knight => write!(f, "k"),
            Piece::Rook(s) => write!(f, "r{}", s.0),
            Piece::Bishop(s) => write!(f, "b{}", s.0),
            Piece::Queen(s) => write!(f, "q{}", s.0),
        }
    }
}

impl FromStr for Piece {
    type Err = ParseParamError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let mut chars = s.chars();
        let category: char = chars.next().ok_or(ParseParamError::Empty)?;
        let stride: &str = chars.as_str();

        let parse_stride = || -> Result<Stride, ParseParamError> {
            stride
                .parse::<u8>()
                .ok()
                .and_then(|v| Stride::new(v).ok())
                .ok_or_else(|| ParseParamError::InvalidStride(String::from(s)))
        };

        match category {
            'p' | 'k' if !stride.is_empty() => Err(ParseParamError::InvalidStride(String::from(s))),
            'p' => Ok(Piece::Pawn),
            'k' => Ok(Piece::Knight),
            'r' => Ok(Piece::Rook(parse_stride()?)),
            'b' => Ok(Piece::Bishop(parse_stride()?)),
            'q' => Ok(Piece::Queen(parse_stride()?)),
            c => Err(ParseParamError::UnknownCategory(c)),
        }
    }
}

impl TryFrom<String> for Piece {
    type Error = ParseParamError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl From<Piece> for String {
    fn from(value: Piece) -> Self {
        value.to_string()
    }
}

/// Chess piece movement model.
#[derive(Debug, Clone, PartialEq)]
pub struct PieceModel {
    rows: usize,
    cols: usize,

    /// Largest stride offered to sliding pieces on this board.
    max_stride: u8,
}

impl PieceModel {
    /// Create a [`PieceModel`] object.
    ///
    /// Strides longer than the board are useless, so the largest stride is the board size minus
    /// one, capped at [`MAX_STRIDE`].
    pub fn new(rows: usize, cols: usize) -> Self {
        let rows: usize = rows.max(1);
        let cols: usize = cols.max(1);
        let max_stride: usize = (rows.max(cols) - 1).clamp(1, MAX_STRIDE as usize);

        Self {
            rows,
            cols,
            max_stride: max_stride as u8,
        }
    }

    /// Return the largest stride offered to sliding pieces.
    pub fn max_stride(&self) -> u8 {
        self.max_stride
    }
}

impl MovementModel for PieceModel {
    type Param = Piece;

    fn rows(&self) -> usize {
        self.rows
    }

    fn cols(&self) -> usize {
        self.cols
    }

    fn parameters(&self) -> Vec<Piece> {
        let mut out: Vec<Piece> = vec![Piece::Pawn, Piece::Knight];
        for s in 1..=self.max_stride {
            let stride: Stride = Stride(s);
            out.push(Piece::Rook(stride));
            out.push(Piece::Bishop(stride));
            out.push(Piece::Queen(stride));
        }
        out
    }

    fn offsets(&self, param: Piece) -> Vec<Offset> {
        param.offsets()
    }

    fn default_shortcut_rule(&self) -> ShortcutRule {
        ShortcutRule::GoalDistance
    }
}

#[cfg(test)]
mod tests {
    use super::super::cell::Cell;
    use super::*;

    #[test]
    fn test_labels() {
        for label in ["p", "k", "r1", "b2", "q6", "r6"] {
            let piece: Piece = label.parse().unwrap();
            assert_eq!(piece.to_string(), label);
        }
        assert_eq!("b4".parse::<Piece>(), Ok(Piece::Bishop(Stride(4))));
    }

    #[test]
    fn test_invalid_labels() {
        assert_eq!("".parse::<Piece>(), Err(ParseParamError::Empty));
        assert_eq!(
            "z3".parse::<Piece>(),
            Err(ParseParamError::UnknownCategory('z'))
        );
        assert_eq!(
            "r".parse::<Piece>(),
            Err(ParseParamError::InvalidStride(String::from("r")))
        );
        assert_eq!(
            "q7".parse::<Piece>(),
            Err(ParseParamError::InvalidStride(String::from("q7")))
        );
        assert_eq!(
            "b0".parse::<Piece>(),
            Err(ParseParamError::InvalidStride(String::from("b0")))
        );
        assert_eq!(
            "rx".parse::<Piece>(),
            Err(ParseParamError::InvalidStride(String::from("rx")))
        );
        assert_eq!(
            "p2".parse::<Piece>(),
            Err(ParseParamError::InvalidStride(String::from("p2")))
        );
    }

    #[test]
    fn test_moves_from_corner() {
        let model = PieceModel::new(8, 8);
        let corner = Cell::new(0, 0);

        assert_eq!(
            model.moves(corner, Piece::Pawn),
            vec![Cell::new(1, 0), Cell::new(0, 1)]
        );
        assert_eq!(
            model.moves(corner, Piece::Knight),
            vec![Cell::new(1, 2), Cell::new(2, 1)]
        );
        assert_eq!(
            model.moves(corner, Piece::Queen(Stride(3))),
            vec![Cell::new(3, 0), Cell::new(0, 3), Cell::new(3, 3)]
        );
        assert_eq!(
            model.moves(corner, Piece::Bishop(Stride(6))),
            vec![Cell::new(6, 6)]
        );
        assert!(model.moves(Cell::new(4, 4), Piece::Rook(Stride(6))).is_empty());
    }

    #[test]
    fn test_offset_counts() {
        assert_eq!(Piece::Pawn.offsets().len(), 4);
        assert_eq!(Piece::Knight.offsets().len(), 8);
        assert_eq!(Piece::Rook(Stride(2)).offsets().len(), 4);
        assert_eq!(Piece::Bishop(Stride(2)).offsets().len(), 4);
        assert_eq!(Piece::Queen(Stride(2)).offsets().len(), 8);
    }

    #[test]
    fn test_parameters() {
        assert_eq!(PieceModel::new(8, 8).max_stride(), 6);
        assert_eq!(PieceModel::new(8, 8).parameters().len(), 20);
        assert_eq!(PieceModel::new(3, 4).max_stride(), 3);
        assert_eq!(PieceModel::new(1, 1).max_stride(), 1);
        assert_eq!(PieceModel::new(2, 2).parameters().len(), 5);
    }

    #[test]
    fn test_serde_uses_labels() {
        let json: String = serde_json::to_string(&vec![Piece::Knight, Piece::Rook(Stride(3))])
            .unwrap();
        assert_eq!(json, r#"["k","r3"]"#);

        let back: Vec<Piece> = serde_json::from_str(&json).unwrap();
        assert_eq!(back, vec![Piece::Knight, Piece::Rook(Stride(3))]);
        assert!(serde_json::from_str::<Piece>(r#""q9""#).is_err());
    }
}
