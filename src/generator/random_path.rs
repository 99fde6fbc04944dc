/*
random_path.rs

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

//! Generate a random solution path.
//!
//! The path grows from the top-left cell by randomized depth-first search.
//! Each step picks a jump for the head cell among the candidates returned by
//! [`movement::candidates`], and rejects destinations that:
//!
//! * were already rejected from the same head cell (bad squares),
//! * are already in the path,
//! * can already be reached in one jump from a cell of the path (the jump would be a shortcut),
//! * with [`ShortcutRule::GoalDistance`], are not the goal but sit at a jump length equal to the
//!   remaining Manhattan distance to the goal.
//!
//! When no destination is left, the search backtracks one cell. When the starting cell itself
//! runs out of destinations, the search restarts from scratch with the next random numbers.

use log::{Level, debug, log_enabled};
use rand::Rng;
use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::error::Error;
use std::fmt;
use std::time::{Duration, Instant};

use super::cell::Cell;
use super::movement::{self, Candidate, MovementModel, ShortcutRule};
use super::path::Path;
use super::puzzles::GeneratorConfig;

/// Type of errors.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SynthesisError {
    /// The difficulty bias is not a probability.
    InvalidBias,

    /// The search restarted too many times without reaching the goal.
    RestartsExhausted(usize),

    /// No path found before the timeout.
    DurationExceeded,
}

impl fmt::Display for SynthesisError {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            SynthesisError::InvalidBias => {
                write!(f, "the difficulty bias must be between 0 and 1")
            }
            SynthesisError::RestartsExhausted(n) => {
                write!(f, "no path found after {n} restarts")
            }
            SynthesisError::DurationExceeded => write!(f, "no path found before the timeout"),
        }
    }
}

impl Error for SynthesisError {}

/// Solution path and the parameters stored along it.
///
/// `parameters[i]` is the parameter of `path[i]`. The goal, last in the path, has no parameter.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct Solution<P> {
    pub path: Path,
    pub parameters: Vec<P>,
}

/// Jump committed from a path cell.
struct Exit<P> {
    /// Parameter chosen for the cell.
    param: P,

    /// Every cell reachable with that parameter.
    affected: Vec<Cell>,
}

/// One cell of the path being built.
///
/// The last frame is the head of the path. All the other frames have an exit, so the path, the
/// parameters, and the affected cells always stay in step.
struct Frame<P> {
    cell: Cell,

    /// Destinations already rejected while this cell was the head (bad squares).
    rejected: HashSet<Cell>,

    exit: Option<Exit<P>>,
}

impl<P> Frame<P> {
    fn new(cell: Cell) -> Self {
        Self {
            cell,
            rejected: HashSet::new(),
            exit: None,
        }
    }
}

/// [`RandomPath`] object.
pub struct RandomPath<'a, M: MovementModel> {
    /// Movement model of the board.
    model: &'a M,

    /// Probability of offering reverse jumps.
    difficulty_bias: f64,

    shortcut_rule: ShortcutRule,

    /// Number of restarts before giving up.
    max_restarts: usize,

    /// Number of search steps in one attempt before restarting.
    max_steps: usize,

    /// Time budget for the whole generation.
    max_duration: Option<Duration>,

    /// Number of search steps it took to generate the last path, over all the attempts.
    pub iteration: usize,

    /// Number of backtracks it took to generate the last path.
    pub backtracks: usize,

    /// Number of restarts it took to generate the last path.
    pub restarts: usize,

    /// Duration in seconds it took to generate the last path.
    pub duration: f32,

    /// Time when the path generation started. Used to compute the [`RandomPath::duration`].
    start: Instant,
}

impl<'a, M: MovementModel> RandomPath<'a, M> {
    /// Create the object.
    pub fn new(model: &'a M, config: &GeneratorConfig) -> Self {
        Self {
            model,
            difficulty_bias: config.difficulty_bias,
            shortcut_rule: config
                .shortcut_rule
                .unwrap_or_else(|| model.default_shortcut_rule()),
            max_restarts: config.max_restarts,
            max_steps: config.max_steps,
            max_duration: config.max_duration.map(Duration::from_secs_f64),
            iteration: 0,
            backtracks: 0,
            restarts: 0,
            duration: 0.0,
            start: Instant::now(),
        }
    }

    /// Generate and return a random path from the top-left cell to the bottom-right cell.
    ///
    /// # Errors
    ///
    /// The method returns an error if the difficulty bias is not between 0 and 1, if the search
    /// restarted more than the configured number of times, or if it takes too long to produce a
    /// path.
    pub fn generate<R: Rng>(&mut self, rng: &mut R) -> Result<Solution<M::Param>, SynthesisError> {
        if !(0.0..=1.0).contains(&self.difficulty_bias) {
            return Err(SynthesisError::InvalidBias);
        }

        self.iteration = 0;
        self.backtracks = 0;
        self.restarts = 0;
        self.duration = 0.0;
        self.start = Instant::now();

        let res: Result<Solution<M::Param>, SynthesisError> = loop {
            match self.attempt(rng) {
                Ok(Some(solution)) => break Ok(solution),
                Ok(None) => {
                    self.restarts += 1;
                    if self.restarts > self.max_restarts {
                        break Err(SynthesisError::RestartsExhausted(self.max_restarts));
                    }
                    debug!("== Restarting the search (restart {})", self.restarts);
                }
                Err(e) => break Err(e),
            }
        };

        self.duration = self.start.elapsed().as_secs_f32();
        debug!(
            "Iterations = {}  Backtracks = {}  Restarts = {}  Duration = {}",
            self.iteration, self.backtracks, self.restarts, self.duration
        );
        res
    }

    /// Run one search from the starting cell.
    ///
    /// Return None when the starting cell runs out of destinations or when the step budget is
    /// spent.
    fn attempt<R: Rng>(
        &mut self,
        rng: &mut R,
    ) -> Result<Option<Solution<M::Param>>, SynthesisError> {
        let goal: Cell = self.model.goal();
        let mut frames: Vec<Frame<M::Param>> = vec![Frame::new(self.model.start())];
        let mut steps: usize = 0;

        loop {
            let current: Cell = match frames.last() {
                Some(f) => f.cell,
                None => return Ok(None),
            };
            if current == goal {
                break;
            }

            steps += 1;
            self.iteration += 1;
            if steps > self.max_steps {
                debug!("    Giving up after {} steps", self.max_steps);
                return Ok(None);
            }
            if let Some(max) = self.max_duration
                && self.start.elapsed() >= max
            {
                return Err(SynthesisError::DurationExceeded);
            }

            let next: Option<Candidate<M::Param>> = movement::candidates(
                self.model,
                current,
                self.difficulty_bias,
                true,
                rng,
            )
            .into_iter()
            .find(|c| self.is_eligible(&frames, current, goal, c));

            match next {
                Some(c) => {
                    debug!(
                        "    Jump {current} -> {} with {}",
                        c.destination, c.param
                    );
                    let affected: Vec<Cell> = self.model.moves(current, c.param);
                    if let Some(head) = frames.last_mut() {
                        head.exit = Some(Exit {
                            param: c.param,
                            affected,
                        });
                    }
                    frames.push(Frame::new(c.destination));
                }
                None => {
                    if frames.len() == 1 {
                        debug!("    Back: no eligible jump from the starting cell");
                        return Ok(None);
                    }
                    debug!("    Back: no eligible jump from {current}");
                    self.backtracks += 1;
                    frames.pop();
                    if let Some(head) = frames.last_mut() {
                        head.exit = None;
                        head.rejected.insert(current);
                    }
                }
            }
        }

        let mut path: Path = Path::new(frames.len());
        let mut parameters: Vec<M::Param> = Vec::with_capacity(frames.len());
        for frame in frames {
            path.push(frame.cell);
            if let Some(exit) = frame.exit {
                parameters.push(exit.param);
            }
        }

        if log_enabled!(Level::Debug) {
            debug!("Path = {:?}", path.get());
            let p: Vec<String> = parameters.iter().map(|p| p.to_string()).collect();
            debug!("Parameters = {p:?}");
        }
        Ok(Some(Solution { path, parameters }))
    }

    /// Whether the candidate jump can extend the path.
    fn is_eligible(
        &self,
        frames: &[Frame<M::Param>],
        current: Cell,
        goal: Cell,
        candidate: &Candidate<M::Param>,
    ) -> bool {
        let dest: Cell = candidate.destination;

        if frames.last().is_some_and(|h| h.rejected.contains(&dest)) {
            return false;
        }
        if frames.iter().any(|f| f.cell == dest) {
            return false;
        }

        // No cell of the path may already reach the destination, otherwise the player could skip
        // part of the path
        if frames
            .iter()
            .filter_map(|f| f.exit.as_ref())
            .any(|e| e.affected.contains(&dest))
        {
            return false;
        }

        !(self.shortcut_rule == ShortcutRule::GoalDistance
            && dest != goal
            && candidate.length == current.manhattan(goal))
    }
}
