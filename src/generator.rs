/*
generator.rs

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

//! Generate random jump puzzles.
//!
//! A jump puzzle is a rectangular [`board::Board`] where each cell stores a movement parameter.
//! From a cell, the player jumps to one of the cells that the parameter reaches.
//! The goal is to go from the top-left cell to the bottom-right cell.
//!
//! Two families of movement parameters are available, both implementing the
//! [`movement::MovementModel`] trait:
//!
//! * [`distance::DistanceModel`]: the cell stores a distance, and the player jumps exactly that
//!   many cells up, down, left, or right.
//! * [`pieces::PieceModel`]: the cell stores a chess piece, and the player moves like that piece.
//!
//! A puzzle is created in two phases:
//!
//! * A random path is built by a [`random_path::RandomPath`] object.
//!   While the path grows, no cell of the path may reach a cell further down the path, so that
//!   the player cannot skip a part of it.
//! * The other cells are filled by a [`filler::BoardFiller`] object.
//!   Their parameters never jump onto the path, so that a player who leaves the path cannot come
//!   back.
//!
//! Together, the two phases give puzzles with a single solution.
//! The [`puzzles::PuzzleGenerator`] object runs both phases.

pub mod board;
pub mod cell;
pub mod distance;
pub mod filler;
pub mod movement;
pub mod path;
pub mod pieces;
pub mod puzzles;
pub mod random_path;
