/*
board.rs

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

//! Jump puzzle board.

use serde::{Deserialize, Serialize};
use std::error::Error;
use std::fmt;
use std::str::FromStr;

use super::cell::Cell;
use super::movement::ParseParamError;

/// Label of the goal cell.
pub const GOAL_LABEL: &str = "X";

/// Content of a board cell.
///
/// - An `Empty` cell has not been assigned yet.
/// - A `Param` cell stores a movement parameter.
/// - A `Dud` cell stores a movement parameter that could not avoid jumping onto the solution
///   path. The parameter keeps its meaning; the tag is a debugging aid.
/// - The `Goal` cell is the bottom-right cell.
#[derive(Serialize, Deserialize, Debug, Copy, Clone, PartialEq, Eq)]
pub enum CellValue<P> {
    Empty,
    Param(P),
    Dud(P),
    Goal,
}

impl<P> Default for CellValue<P> {
    fn default() -> Self {
        CellValue::Empty
    }
}

impl<P: Copy> CellValue<P> {
    /// Return the movement parameter of the cell, if any.
    pub fn param(&self) -> Option<P> {
        match self {
            CellValue::Param(p) | CellValue::Dud(p) => Some(*p),
            CellValue::Empty | CellValue::Goal => None,
        }
    }
}

impl<P: fmt::Display> fmt::Display for CellValue<P> {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        // Use pad() so that width and alignment flags apply to the whole label
        match self {
            CellValue::Empty => f.pad("0"),
            CellValue::Param(p) => f.pad(&p.to_string()),
            CellValue::Dud(p) => f.pad(&format!("{p}{GOAL_LABEL}")),
            CellValue::Goal => f.pad(GOAL_LABEL),
        }
    }
}

impl<P: FromStr<Err = ParseParamError>> FromStr for CellValue<P> {
    type Err = ParseParamError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        if s == GOAL_LABEL {
            Ok(CellValue::Goal)
        } else if s == "0" {
            Ok(CellValue::Empty)
        } else if let Some(label) = s.strip_suffix(GOAL_LABEL) {
            Ok(CellValue::Dud(label.parse()?))
        } else {
            Ok(CellValue::Param(s.parse()?))
        }
    }
}

/// Errors raised when building a board from rows of cells.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum BoardError {
    /// The board has no rows or no columns.
    Empty,

    /// A row does not have the same length as the first row.
    RowLength {
        row: usize,
        expected: usize,
        found: usize,
    },

    /// The bottom-right cell is not the goal.
    MissingGoal,

    /// A goal cell is found away from the bottom-right corner.
    MisplacedGoal(Cell),

    /// A cell has not been assigned.
    Incomplete(Cell),
}

impl fmt::Display for BoardError {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            BoardError::Empty => write!(f, "the board is empty"),
            BoardError::RowLength {
                row,
                expected,
                found,
            } => write!(
                f,
                "row {row} has {found} cells instead of {expected}"
            ),
            BoardError::MissingGoal => write!(f, "the bottom-right cell is not the goal"),
            BoardError::MisplacedGoal(c) => write!(f, "unexpected goal cell at {c}"),
            BoardError::Incomplete(c) => write!(f, "cell {c} has no value"),
        }
    }
}

impl Error for BoardError {}

/// Rectangular board of `rows` by `cols` cells.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct Board<P> {
    rows: usize,
    cols: usize,
    cells: Vec<Vec<CellValue<P>>>,
}

impl<P: Copy> Board<P> {
    /// Create a [`Board`] object where all the cells are empty.
    pub fn new(rows: usize, cols: usize) -> Self {
        Self {
            rows,
            cols,
            cells: vec![vec![CellValue::Empty; cols]; rows],
        }
    }

    /// Create a complete [`Board`] object from its rows.
    ///
    /// # Errors
    ///
    /// The method returns an error if the rows do not form a rectangle, if a cell is empty, or if
    /// the goal cell is not the one and only goal at the bottom-right corner.
    pub fn from_rows(cells: Vec<Vec<CellValue<P>>>) -> Result<Self, BoardError> {
        let rows: usize = cells.len();
        let cols: usize = cells.first().map_or(0, |r| r.len());
        if rows == 0 || cols == 0 {
            return Err(BoardError::Empty);
        }

        for (i, r) in cells.iter().enumerate() {
            if r.len() != cols {
                return Err(BoardError::RowLength {
                    row: i,
                    expected: cols,
                    found: r.len(),
                });
            }
        }

        let goal: Cell = Cell::new(rows - 1, cols - 1);
        let board: Board<P> = Self { rows, cols, cells };
        for (cell, value) in board.iter() {
            if matches!(value, CellValue::Goal) && cell != goal {
                return Err(BoardError::MisplacedGoal(cell));
            }
        }
        if !matches!(board.get(goal), Some(CellValue::Goal)) {
            return Err(BoardError::MissingGoal);
        }
        if let Some(cell) = board.empty_cells().first() {
            return Err(BoardError::Incomplete(*cell));
        }
        Ok(board)
    }

    /// Number of rows.
    pub fn rows(&self) -> usize {
        self.rows
    }

    /// Number of columns.
    pub fn cols(&self) -> usize {
        self.cols
    }

    /// Bottom-right cell.
    pub fn goal(&self) -> Cell {
        Cell::new(self.rows.saturating_sub(1), self.cols.saturating_sub(1))
    }

    /// Return the content of a cell, or None if the cell is outside the board.
    pub fn get(&self, cell: Cell) -> Option<CellValue<P>> {
        self.cells.get(cell.row)?.get(cell.col).copied()
    }

    /// Return the movement parameter stored in a cell, including dud cells.
    pub fn param(&self, cell: Cell) -> Option<P> {
        self.get(cell)?.param()
    }

    /// Set the content of a cell. Cells outside the board are ignored.
    pub fn set(&mut self, cell: Cell, value: CellValue<P>) {
        if let Some(c) = self
            .cells
            .get_mut(cell.row)
            .and_then(|r| r.get_mut(cell.col))
        {
            *c = value;
        }
    }

    /// Return the cells that are not assigned yet, in row-major order.
    pub fn empty_cells(&self) -> Vec<Cell> {
        self.iter()
            .filter(|(_, v)| matches!(v, CellValue::Empty))
            .map(|(c, _)| c)
            .collect()
    }

    /// Return the cells tagged as duds, in row-major order.
    pub fn duds(&self) -> Vec<Cell> {
        self.iter()
            .filter(|(_, v)| matches!(v, CellValue::Dud(_)))
            .map(|(c, _)| c)
            .collect()
    }

    /// Iterate over the cells in row-major order.
    pub fn iter(&self) -> impl Iterator<Item = (Cell, CellValue<P>)> + '_ {
        self.cells.iter().enumerate().flat_map(|(row, r)| {
            r.iter()
                .enumerate()
                .map(move |(col, v)| (Cell::new(row, col), *v))
        })
    }
}

impl<P: fmt::Display> fmt::Display for Board<P> {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        for (i, row) in self.cells.iter().enumerate() {
            if i > 0 {
                writeln!(f)?;
            }
            let line: Vec<String> = row.iter().map(|v| format!("{v:<5}")).collect();
            write!(f, "{}", line.join(" ").trim_end())?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::super::distance::Distance;
    use super::super::pieces::Piece;
    use super::*;

    fn d(v: u8) -> CellValue<Distance> {
        CellValue::Param(Distance::new(v).unwrap())
    }

    #[test]
    fn test_cell_value_labels() {
        assert_eq!("X".parse::<CellValue<Distance>>(), Ok(CellValue::Goal));
        assert_eq!("0".parse::<CellValue<Distance>>(), Ok(CellValue::Empty));
        assert_eq!("4".parse::<CellValue<Distance>>(), Ok(d(4)));
        assert_eq!(
            "3X".parse::<CellValue<Distance>>(),
            Ok(CellValue::Dud(Distance::new(3).unwrap()))
        );
        assert_eq!(
            "r2X".parse::<CellValue<Piece>>().map(|v| v.to_string()),
            Ok(String::from("r2X"))
        );
        assert!("kk".parse::<CellValue<Piece>>().is_err());
        assert!("-2".parse::<CellValue<Distance>>().is_err());
        assert_eq!(format!("[{:<3}]", CellValue::<Piece>::Goal), "[X  ]");
    }

    #[test]
    fn test_from_rows() {
        let board = Board::from_rows(vec![vec![d(1), d(1)], vec![d(2), CellValue::Goal]]).unwrap();
        assert_eq!(board.rows(), 2);
        assert_eq!(board.cols(), 2);
        assert_eq!(board.param(Cell::new(1, 0)), Distance::new(2).ok());
        assert_eq!(board.param(Cell::new(1, 1)), None);
        assert_eq!(board.get(Cell::new(2, 0)), None);
        assert!(board.empty_cells().is_empty());
    }

    #[test]
    fn test_from_rows_errors() {
        assert_eq!(
            Board::<Distance>::from_rows(Vec::new()),
            Err(BoardError::Empty)
        );
        assert_eq!(
            Board::from_rows(vec![vec![d(1), d(1)], vec![CellValue::Goal]]),
            Err(BoardError::RowLength {
                row: 1,
                expected: 2,
                found: 1
            })
        );
        assert_eq!(
            Board::from_rows(vec![vec![d(1), d(1)], vec![d(1), d(1)]]),
            Err(BoardError::MissingGoal)
        );
        assert_eq!(
            Board::from_rows(vec![vec![d(1), CellValue::Goal], vec![d(1), CellValue::Goal]]),
            Err(BoardError::MisplacedGoal(Cell::new(0, 1)))
        );
        assert_eq!(
            Board::from_rows(vec![
                vec![d(1), CellValue::Empty, d(2)],
                vec![CellValue::Empty, d(1), CellValue::Goal]
            ]),
            Err(BoardError::Incomplete(Cell::new(0, 1)))
        );
    }

    #[test]
    fn test_empty_cells_and_duds() {
        let mut board: Board<Distance> = Board::new(2, 3);
        assert_eq!(board.empty_cells().len(), 6);

        board.set(Cell::new(0, 0), d(2));
        board.set(Cell::new(1, 1), CellValue::Dud(Distance::new(1).unwrap()));
        board.set(Cell::new(1, 2), CellValue::Goal);
        board.set(Cell::new(5, 5), d(1));

        assert_eq!(
            board.empty_cells(),
            vec![Cell::new(0, 1), Cell::new(0, 2), Cell::new(1, 0)]
        );
        assert_eq!(board.duds(), vec![Cell::new(1, 1)]);
    }

    #[test]
    fn test_display() {
        let board = Board::from_rows(vec![
            vec![CellValue::Param(Piece::Knight), CellValue::Param(Piece::Pawn)],
            vec![
                CellValue::Dud(Piece::Pawn),
                CellValue::Goal,
            ],
        ])
        .unwrap();
        assert_eq!(board.to_string(), "k     p\npX    X");
    }
}
