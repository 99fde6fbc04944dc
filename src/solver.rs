/*
solver.rs

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

//! Find the paths from the top-left cell to the goal on a complete board.
//!
//! The verifier jumps from cell to cell using the parameter stored in each cell.
//! A path never visits the same cell twice, but two paths may share cells.
//! Both search orders, breadth-first and depth-first, return the same set of paths.

use clap::ValueEnum;
use log::debug;
use std::collections::{HashMap, HashSet, VecDeque};

use crate::generator::board::Board;
use crate::generator::cell::Cell;
use crate::generator::movement::MovementModel;
use crate::generator::path::Path;

/// Result of a verification.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Verification {
    /// Whether the goal can be reached from the top-left cell.
    pub reachable: bool,

    /// Start-to-goal paths, sorted.
    pub paths: Vec<Vec<Cell>>,
}

impl Verification {
    /// Whether the board has exactly one solution.
    pub fn is_unique(&self) -> bool {
        self.paths.len() == 1
    }
}

/// Search order used to collect the paths.
#[derive(Debug, Copy, Clone, Default, PartialEq, Eq, ValueEnum)]
pub enum SearchOrder {
    /// Depth-first search.
    #[default]
    #[value(name = "dfs")]
    DepthFirst,

    /// Breadth-first search. Shorter paths are found first.
    #[value(name = "bfs")]
    BreadthFirst,
}

/// [`PathVerifier`] object.
pub struct PathVerifier<'a, M: MovementModel> {
    model: &'a M,
    board: &'a Board<M::Param>,

    /// Stop collecting paths once this number is reached.
    limit: Option<usize>,

    search: SearchOrder,
}

impl<'a, M: MovementModel> PathVerifier<'a, M> {
    /// Create the object.
    pub fn new(model: &'a M, board: &'a Board<M::Param>) -> Self {
        Self {
            model,
            board,
            limit: None,
            search: SearchOrder::DepthFirst,
        }
    }

    /// Stop collecting paths after `limit` paths.
    pub fn with_limit(mut self, limit: usize) -> Self {
        self.limit = Some(limit);
        self
    }

    /// Select the search used by [`PathVerifier::verify`].
    pub fn with_search(mut self, search: SearchOrder) -> Self {
        self.search = search;
        self
    }

    fn start(&self) -> Cell {
        Cell::new(0, 0)
    }

    fn goal(&self) -> Cell {
        self.board.goal()
    }

    /// Return the cells reachable in one jump from the given cell.
    ///
    /// The goal and the empty cells have no parameter and therefore no moves.
    pub fn neighbors(&self, cell: Cell) -> Vec<Cell> {
        match self.board.param(cell) {
            Some(p) => self.model.moves(cell, p),
            None => Vec::new(),
        }
    }

    fn is_full(&self, paths: &[Vec<Cell>]) -> bool {
        self.limit.is_some_and(|l| paths.len() >= l)
    }

    /// Whether the goal can be reached from the top-left cell.
    pub fn is_reachable(&self) -> bool {
        let mut visited: HashSet<Cell> = HashSet::from([self.start()]);
        let mut queue: VecDeque<Cell> = VecDeque::from([self.start()]);

        while let Some(cell) = queue.pop_front() {
            if cell == self.goal() {
                return true;
            }
            for n in self.neighbors(cell) {
                if visited.insert(n) {
                    queue.push_back(n);
                }
            }
        }
        false
    }

    /// Return the cells from which the goal can be reached.
    ///
    /// The path searches never expand the other cells. This does not change the resulting paths
    /// but avoids walking through the dead ends of the board.
    fn goal_reachers(&self) -> HashSet<Cell> {
        let mut predecessors: HashMap<Cell, Vec<Cell>> = HashMap::new();
        for (cell, _) in self.board.iter() {
            for n in self.neighbors(cell) {
                predecessors.entry(n).or_default().push(cell);
            }
        }

        let mut reachers: HashSet<Cell> = HashSet::from([self.goal()]);
        let mut queue: VecDeque<Cell> = VecDeque::from([self.goal()]);
        while let Some(cell) = queue.pop_front() {
            for p in predecessors.get(&cell).into_iter().flatten() {
                if reachers.insert(*p) {
                    queue.push_back(*p);
                }
            }
        }
        reachers
    }

    /// Return all the start-to-goal paths, using a breadth-first search.
    pub fn paths_bfs(&self) -> Vec<Vec<Cell>> {
        let reachers: HashSet<Cell> = self.goal_reachers();
        let mut paths: Vec<Vec<Cell>> = Vec::new();
        if !reachers.contains(&self.start()) {
            return paths;
        }

        let mut queue: VecDeque<Path> = VecDeque::from([Path::from_slice(&[self.start()])]);
        while let Some(path) = queue.pop_front() {
            let Some(cell) = path.get_last() else {
                continue;
            };
            if cell == self.goal() {
                paths.push(path.get().to_vec());
                if self.is_full(&paths) {
                    break;
                }
                continue;
            }
            for n in self.neighbors(cell) {
                if reachers.contains(&n) && !path.contains(n) {
                    let mut new_path: Path = path.clone();
                    new_path.push(n);
                    queue.push_back(new_path);
                }
            }
        }
        paths.sort();
        paths
    }

    /// Return all the start-to-goal paths, using a depth-first search.
    pub fn paths_dfs(&self) -> Vec<Vec<Cell>> {
        let reachers: HashSet<Cell> = self.goal_reachers();
        let mut paths: Vec<Vec<Cell>> = Vec::new();
        if reachers.contains(&self.start()) {
            let mut path = Path::new(self.board.rows() * self.board.cols());
            path.push(self.start());
            self.dfs(&reachers, &mut path, &mut paths);
        }
        paths.sort();
        paths
    }

    fn dfs(&self, reachers: &HashSet<Cell>, path: &mut Path, paths: &mut Vec<Vec<Cell>>) {
        let Some(cell) = path.get_last() else {
            return;
        };
        if cell == self.goal() {
            paths.push(path.get().to_vec());
            return;
        }
        for n in self.neighbors(cell) {
            if self.is_full(paths) {
                return;
            }
            if reachers.contains(&n) && !path.contains(n) {
                path.push(n);
                self.dfs(reachers, path, paths);
                path.pop();
            }
        }
    }

    /// Whether the given cells form a start-to-goal path on the board.
    pub fn is_solution(&self, cells: &[Cell]) -> bool {
        if cells.first() != Some(&self.start()) || cells.last() != Some(&self.goal()) {
            return false;
        }
        let unique: HashSet<&Cell> = cells.iter().collect();
        unique.len() == cells.len()
            && cells
                .windows(2)
                .all(|w| self.neighbors(w[0]).contains(&w[1]))
    }

    /// Check the board.
    pub fn verify(&self) -> Verification {
        let reachable: bool = self.is_reachable();
        let paths: Vec<Vec<Cell>> = match (reachable, self.search) {
            (false, _) => Vec::new(),
            (true, SearchOrder::DepthFirst) => self.paths_dfs(),
            (true, SearchOrder::BreadthFirst) => self.paths_bfs(),
        };
        debug!(
            "Verification: goal {}reachable, {} path(s)",
            if reachable { "" } else { "not " },
            paths.len()
        );
        Verification { reachable, paths }
    }
}
