/*
filler.rs

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

//! Fill the cells outside the solution path.
//!
//! Each remaining cell gets a random parameter whose jumps all land outside the path, so that a
//! player who leaves the path can never come back to it.

use log::debug;
use rand::Rng;
use rand::seq::SliceRandom;
use serde::{Deserialize, Serialize};
use std::error::Error;
use std::fmt;

use super::board::{Board, CellValue};
use super::cell::Cell;
use super::movement::MovementModel;
use super::path::Path;

/// What to do with a cell for which every parameter jumps onto the path.
#[derive(Serialize, Deserialize, Debug, Copy, Clone, Default, PartialEq, Eq)]
#[serde(rename_all = "kebab-case")]
pub enum FillPolicy {
    /// Give up on the board so that a new one is generated.
    #[default]
    Regenerate,

    /// Assign a random parameter and tag the cell as a dud.
    MarkDuds,
}

/// Type of errors.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FillError {
    /// The cell cannot get a parameter that avoids the path.
    Unfillable(Cell),
}

impl fmt::Display for FillError {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            FillError::Unfillable(c) => write!(f, "every parameter for cell {c} jumps onto the path"),
        }
    }
}

impl Error for FillError {}

/// [`BoardFiller`] object.
pub struct BoardFiller<'a, M: MovementModel> {
    model: &'a M,
    policy: FillPolicy,
}

impl<'a, M: MovementModel> BoardFiller<'a, M> {
    /// Create the object.
    pub fn new(model: &'a M, policy: FillPolicy) -> Self {
        Self { model, policy }
    }

    /// Stamp the goal and assign a parameter to every other cell outside the path.
    ///
    /// Return the list of the cells tagged as duds, which is always empty with
    /// [`FillPolicy::Regenerate`].
    ///
    /// # Errors
    ///
    /// With [`FillPolicy::Regenerate`], the method returns an error for the first cell that cannot
    /// avoid the path. The board is then partially filled and must be discarded.
    pub fn fill<R: Rng>(
        &self,
        board: &mut Board<M::Param>,
        path: &Path,
        rng: &mut R,
    ) -> Result<Vec<Cell>, FillError> {
        board.set(board.goal(), CellValue::Goal);

        let mut duds: Vec<Cell> = Vec::new();
        let mut params: Vec<M::Param> = self.model.parameters();

        for cell in board.empty_cells() {
            if path.contains(cell) {
                continue;
            }
            params.shuffle(rng);

            let safe: Option<M::Param> = params.iter().copied().find(|p| {
                self.model
                    .moves(cell, *p)
                    .iter()
                    .all(|dest| !path.contains(*dest))
            });

            match (safe, self.policy) {
                (Some(p), _) => board.set(cell, CellValue::Param(p)),
                (None, FillPolicy::MarkDuds) if !params.is_empty() => {
                    let p: M::Param = params[0];
                    debug!("Cell {cell} cannot avoid the path: dud {p}");
                    board.set(cell, CellValue::Dud(p));
                    duds.push(cell);
                }
                (None, _) => {
                    debug!("Cell {cell} cannot avoid the path");
                    return Err(FillError::Unfillable(cell));
                }
            }
        }
        Ok(duds)
    }
}

#[cfg(test)]
mod tests {
    use super::super::distance::DistanceModel;
    use super::super::pieces::{Piece, PieceModel};
    use super::*;
    use rand::SeedableRng;
    use rand::rngs::StdRng;

    /// Straight path along the first column and the last row.
    fn l_path(rows: usize, cols: usize) -> Path {
        let mut path = Path::new(rows + cols);
        for row in 0..rows {
            path.push(Cell::new(row, 0));
        }
        for col in 1..cols {
            path.push(Cell::new(rows - 1, col));
        }
        path
    }

    #[test]
    fn test_fill_avoids_path() {
        let model = PieceModel::new(6, 6);
        let path: Path = l_path(6, 6);
        let mut board: Board<Piece> = Board::new(6, 6);
        for c in path.get() {
            board.set(*c, CellValue::Param(Piece::Pawn));
        }
        let mut rng = StdRng::seed_from_u64(1);

        let duds = BoardFiller::new(&model, FillPolicy::Regenerate)
            .fill(&mut board, &path, &mut rng)
            .unwrap();

        assert!(duds.is_empty());
        assert!(board.empty_cells().is_empty());
        assert_eq!(board.get(board.goal()), Some(CellValue::Goal));
        for (cell, value) in board.iter() {
            if path.contains(cell) {
                continue;
            }
            let p: Piece = value.param().unwrap();
            for dest in model.moves(cell, p) {
                assert!(!path.contains(dest), "{cell} with {p} jumps onto {dest}");
            }
        }
    }

    #[test]
    fn test_unfillable_cell() {
        // On a 2x2 board with distance 1, the off-path corner always touches the path
        let model = DistanceModel::new(2, 2, None);
        let path = Path::from_slice(&[Cell::new(0, 0), Cell::new(1, 0), Cell::new(1, 1)]);
        let mut rng = StdRng::seed_from_u64(2);

        let mut board = Board::new(2, 2);
        assert_eq!(
            BoardFiller::new(&model, FillPolicy::Regenerate).fill(&mut board, &path, &mut rng),
            Err(FillError::Unfillable(Cell::new(0, 1)))
        );

        let mut board = Board::new(2, 2);
        let duds = BoardFiller::new(&model, FillPolicy::MarkDuds)
            .fill(&mut board, &path, &mut rng)
            .unwrap();
        assert_eq!(duds, vec![Cell::new(0, 1)]);
        assert_eq!(board.duds(), duds);
        assert!(matches!(board.get(Cell::new(0, 1)), Some(CellValue::Dud(_))));
    }
}
