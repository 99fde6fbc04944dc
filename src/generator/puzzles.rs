/*
puzzles.rs

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

//! Generate complete jump puzzles.
//!
//! A puzzle is generated in two phases: [`random_path::RandomPath`] builds the solution path,
//! and [`filler::BoardFiller`] assigns the remaining cells.
//! When the filler cannot complete the board with [`FillPolicy::Regenerate`], both phases start
//! again.

use log::{debug, info};
use rand::Rng;
use serde::{Deserialize, Serialize};
use std::error::Error;
use std::fmt;

use super::board::{Board, CellValue};
use super::cell::Cell;
use super::filler::{self, FillError, FillPolicy};
use super::movement::{MovementModel, ShortcutRule};
use super::path::Path;
use super::random_path::{self, SynthesisError};

/// Generation parameters.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
#[serde(default)]
pub struct GeneratorConfig {
    /// Probability of offering reverse jumps to the path generator, between 0 and 1.
    /// Lower values give easier, more monotonic puzzles.
    pub difficulty_bias: f64,

    /// Shortcut rule. When not set, the movement model default is used.
    pub shortcut_rule: Option<ShortcutRule>,

    /// What to do with cells that cannot avoid the path.
    pub fill_policy: FillPolicy,

    /// Number of path search restarts before giving up.
    pub max_restarts: usize,

    /// Number of search steps in one path search attempt before restarting.
    pub max_steps: usize,

    /// Time budget in seconds for generating one path.
    pub max_duration: Option<f64>,

    /// Number of boards to try before giving up, when cells cannot be filled.
    pub max_board_attempts: usize,
}

impl Default for GeneratorConfig {
    fn default() -> Self {
        Self {
            difficulty_bias: 0.25,
            shortcut_rule: None,
            fill_policy: FillPolicy::Regenerate,
            max_restarts: 1000,
            max_steps: 100_000,
            max_duration: None,
            max_board_attempts: 100,
        }
    }
}

/// Type of errors.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum GenerateError {
    /// The path generation failed.
    Synthesis(SynthesisError),

    /// No board could be filled. The last unfillable cell is provided.
    AttemptsExhausted(usize, FillError),
}

impl fmt::Display for GenerateError {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            GenerateError::Synthesis(e) => write!(f, "{e}"),
            GenerateError::AttemptsExhausted(n, e) => {
                write!(f, "no board could be completed in {n} attempts ({e})")
            }
        }
    }
}

impl Error for GenerateError {}

impl From<SynthesisError> for GenerateError {
    fn from(err: SynthesisError) -> Self {
        GenerateError::Synthesis(err)
    }
}

/// Generated puzzle.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
#[serde(bound(
    serialize = "P: Serialize",
    deserialize = "P: Deserialize<'de>"
))]
pub struct JumpPuzzle<P> {
    /// Complete board.
    pub board: Board<P>,

    /// Solution path, from the top-left cell to the goal.
    pub path: Path,

    /// Parameters of the path cells, in path order.
    pub parameters: Vec<P>,

    /// Cells tagged as duds.
    pub duds: Vec<Cell>,

    /// Number of boards generated to get this one.
    pub attempts: usize,
}

/// [`PuzzleGenerator`] object.
pub struct PuzzleGenerator<'a, M: MovementModel> {
    model: &'a M,
    config: GeneratorConfig,

    /// Number of path search steps for the last puzzle, over all the attempts.
    pub iteration: usize,

    /// Number of path search restarts for the last puzzle.
    pub restarts: usize,

    /// Number of backtracks for the last puzzle.
    pub backtracks: usize,

    /// Duration in seconds of the path searches for the last puzzle.
    pub duration: f32,
}

impl<'a, M: MovementModel> PuzzleGenerator<'a, M> {
    /// Create the object.
    pub fn new(model: &'a M, config: GeneratorConfig) -> Self {
        Self {
            model,
            config,
            iteration: 0,
            restarts: 0,
            backtracks: 0,
            duration: 0.0,
        }
    }

    /// Generate and return a puzzle.
    ///
    /// # Errors
    ///
    /// The method returns an error if a path cannot be generated, or if no board could be
    /// completed within the configured number of attempts.
    pub fn generate<R: Rng>(&mut self, rng: &mut R) -> Result<JumpPuzzle<M::Param>, GenerateError> {
        self.iteration = 0;
        self.restarts = 0;
        self.backtracks = 0;
        self.duration = 0.0;

        let mut path_generator = random_path::RandomPath::new(self.model, &self.config);
        let board_filler = filler::BoardFiller::new(self.model, self.config.fill_policy);
        let mut last_error: FillError = FillError::Unfillable(self.model.goal());

        for attempt in 1..=self.config.max_board_attempts {
            let solution = path_generator.generate(rng);
            self.iteration += path_generator.iteration;
            self.restarts += path_generator.restarts;
            self.backtracks += path_generator.backtracks;
            self.duration += path_generator.duration;
            let solution = solution?;

            let mut board: Board<M::Param> = Board::new(self.model.rows(), self.model.cols());
            for (cell, param) in solution.path.get().iter().zip(&solution.parameters) {
                board.set(*cell, CellValue::Param(*param));
            }

            match board_filler.fill(&mut board, &solution.path, rng) {
                Ok(duds) => {
                    info!(
                        "Puzzle generated after {attempt} attempt(s), path length {}",
                        solution.path.len()
                    );
                    return Ok(JumpPuzzle {
                        board,
                        path: solution.path,
                        parameters: solution.parameters,
                        duds,
                        attempts: attempt,
                    });
                }
                Err(e) => {
                    debug!("Attempt {attempt}: {e}, generating a new board");
                    last_error = e;
                }
            }
        }
        Err(GenerateError::AttemptsExhausted(
            self.config.max_board_attempts,
            last_error,
        ))
    }
}

#[cfg(test)]
mod tests {
    use super::super::distance::DistanceModel;
    use super::super::pieces::PieceModel;
    use super::*;
    use crate::solver::PathVerifier;
    use rand::SeedableRng;
    use rand::rngs::StdRng;

    /// Check that the board has a single solution, equal to the generated path, and that no
    /// cell outside the path jumps onto it.
    fn check_unique<M: MovementModel>(model: &M, puzzle: &JumpPuzzle<M::Param>) {
        assert!(puzzle.board.empty_cells().is_empty());
        assert!(puzzle.duds.is_empty());

        for (i, cell) in puzzle.path.get().iter().enumerate() {
            if i < puzzle.parameters.len() {
                assert_eq!(puzzle.board.param(*cell), Some(puzzle.parameters[i]));
            }
        }
        for (cell, value) in puzzle.board.iter() {
            if puzzle.path.contains(cell) {
                continue;
            }
            let p = value.param().unwrap();
            assert!(
                model
                    .moves(cell, p)
                    .iter()
                    .all(|dest| !puzzle.path.contains(*dest))
            );
        }

        let verifier = PathVerifier::new(model, &puzzle.board);
        assert!(verifier.is_reachable());
        assert_eq!(verifier.paths_dfs(), vec![puzzle.path.get().to_vec()]);
        assert_eq!(verifier.paths_bfs(), vec![puzzle.path.get().to_vec()]);
    }

    #[test]
    fn test_distance_puzzles() {
        for (size, bias, seed) in [(6, 0.2, 1), (6, 1.0, 2), (8, 0.25, 3), (8, 0.0, 4)] {
            let model = DistanceModel::new(size, size, None);
            let config = GeneratorConfig {
                difficulty_bias: bias,
                max_board_attempts: 500,
                ..GeneratorConfig::default()
            };
            let mut rng = StdRng::seed_from_u64(seed);

            let puzzle = PuzzleGenerator::new(&model, config).generate(&mut rng).unwrap();
            check_unique(&model, &puzzle);
        }
    }

    #[test]
    fn test_piece_puzzles() {
        for (bias, seed) in [(0.0, 5), (0.25, 6), (1.0, 7)] {
            let model = PieceModel::new(8, 8);
            let config = GeneratorConfig {
                difficulty_bias: bias,
                max_board_attempts: 500,
                ..GeneratorConfig::default()
            };
            let mut rng = StdRng::seed_from_u64(seed);

            let puzzle = PuzzleGenerator::new(&model, config).generate(&mut rng).unwrap();
            check_unique(&model, &puzzle);
        }
    }

    #[test]
    fn test_same_seed_same_puzzle() {
        let model = DistanceModel::new(6, 6, None);
        let config = GeneratorConfig {
            max_board_attempts: 500,
            ..GeneratorConfig::default()
        };

        let first = PuzzleGenerator::new(&model, config.clone())
            .generate(&mut StdRng::seed_from_u64(99))
            .unwrap();
        let second = PuzzleGenerator::new(&model, config)
            .generate(&mut StdRng::seed_from_u64(99))
            .unwrap();
        assert_eq!(first, second);
    }

    #[test]
    fn test_two_by_two_with_duds() {
        let model = DistanceModel::new(2, 2, None);
        let config = GeneratorConfig {
            difficulty_bias: 1.0,
            fill_policy: FillPolicy::MarkDuds,
            ..GeneratorConfig::default()
        };
        let mut rng = StdRng::seed_from_u64(12);

        let puzzle = PuzzleGenerator::new(&model, config).generate(&mut rng).unwrap();
        assert_eq!(puzzle.path.len(), 3);
        assert_eq!(puzzle.duds.len(), 1);
        assert!(puzzle.board.empty_cells().is_empty());
        assert!(PathVerifier::new(&model, &puzzle.board).is_reachable());
    }

    #[test]
    fn test_two_by_two_cannot_be_strict() {
        let model = DistanceModel::new(2, 2, None);
        let config = GeneratorConfig {
            max_board_attempts: 5,
            ..GeneratorConfig::default()
        };
        let mut rng = StdRng::seed_from_u64(13);
        let mut generator = PuzzleGenerator::new(&model, config);

        assert!(matches!(
            generator.generate(&mut rng),
            Err(GenerateError::AttemptsExhausted(5, FillError::Unfillable(_)))
        ));
    }

    #[test]
    fn test_synthesis_error_is_forwarded() {
        let model = PieceModel::new(4, 4);
        let config = GeneratorConfig {
            difficulty_bias: 2.0,
            ..GeneratorConfig::default()
        };
        let mut rng = StdRng::seed_from_u64(0);

        assert_eq!(
            PuzzleGenerator::new(&model, config).generate(&mut rng),
            Err(GenerateError::Synthesis(SynthesisError::InvalidBias))
        );
    }
}
