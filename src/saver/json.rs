/*
json.rs

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

//! Archive generated puzzles in JSON format.
//!
//! The saved object is a serialization of the [`SavedPuzzle`] object by using [`serde`].
//! Besides the puzzle, it records the seed and the parameters used to generate it, so that the
//! puzzle can be generated again.

use log::debug;
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use std::error::Error;
use std::fs::File;
use std::io::{BufReader, BufWriter, ErrorKind, Write};
use std::path::PathBuf;

use crate::generator::puzzles::{GeneratorConfig, JumpPuzzle};

/// Archived puzzle.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
#[serde(bound(
    serialize = "P: Serialize",
    deserialize = "P: Deserialize<'de>"
))]
pub struct SavedPuzzle<P> {
    /// Seed of the random number generator used for the batch.
    pub seed: u64,

    /// Generation parameters.
    pub config: GeneratorConfig,

    /// Generated puzzle.
    pub puzzle: JumpPuzzle<P>,
}

/// Object to save and restore an archived puzzle.
pub struct SaverPuzzle {
    /// Path to the save file.
    save_file: PathBuf,
}

impl SaverPuzzle {
    /// Create a [`SaverPuzzle`] object.
    ///
    /// The provided [`PathBuf`] is the path to the directory where the puzzle must be saved.
    /// The `index` is the position of the puzzle in the batch.
    pub fn new(mut data_dir: PathBuf, index: usize) -> Self {
        data_dir.push(format!("puzzle_{index}.json"));
        Self::from_file(data_dir)
    }

    /// Create a [`SaverPuzzle`] object for the given archive file.
    pub fn from_file(save_file: PathBuf) -> Self {
        debug!("Puzzle archive file: {save_file:?}");
        Self { save_file }
    }

    /// Retrieve the archived puzzle.
    ///
    /// Return the [`SavedPuzzle`] object or None if the archive file does not exist.
    pub fn load_puzzle<P: DeserializeOwned>(
        &self,
    ) -> Result<Option<SavedPuzzle<P>>, Box<dyn Error>> {
        let file: File;
        match File::open(&self.save_file) {
            Ok(f) => file = f,
            Err(error) => match error.kind() {
                ErrorKind::NotFound => return Ok(None),
                _ => return Err(Box::new(error)),
            },
        }
        let reader: BufReader<File> = BufReader::new(file);
        let saved: SavedPuzzle<P> = serde_json::from_reader(reader)?;
        Ok(Some(saved))
    }

    /// Save the provided [`SavedPuzzle`] object.
    pub fn save_puzzle<P: Serialize>(&self, saved: &SavedPuzzle<P>) -> Result<(), Box<dyn Error>> {
        let file: File = File::create(&self.save_file)?;
        let mut writer: BufWriter<File> = BufWriter::new(file);

        serde_json::to_writer_pretty(&mut writer, saved)?;
        writer.flush()?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::generator::distance::{Distance, DistanceModel};
    use crate::generator::pieces::{Piece, PieceModel};
    use crate::generator::puzzles::PuzzleGenerator;
    use rand::SeedableRng;
    use rand::rngs::StdRng;
    use std::env;
    use std::fs;

    fn temp_dir(name: &str) -> PathBuf {
        let dir = env::temp_dir().join(format!("jumpgrid-{name}-{}", std::process::id()));
        fs::create_dir_all(&dir).unwrap();
        dir
    }

    #[test]
    fn test_save_load_distance_puzzle() {
        let dir = temp_dir("json-distance");
        let model = DistanceModel::new(6, 6, None);
        let config = GeneratorConfig {
            max_board_attempts: 500,
            ..GeneratorConfig::default()
        };
        let puzzle = PuzzleGenerator::new(&model, config.clone())
            .generate(&mut StdRng::seed_from_u64(3))
            .unwrap();
        let saved = SavedPuzzle {
            seed: 3,
            config,
            puzzle,
        };

        let saver = SaverPuzzle::new(dir.clone(), 1);
        assert_eq!(saver.load_puzzle::<Distance>().unwrap(), None);
        saver.save_puzzle(&saved).unwrap();
        assert_eq!(saver.load_puzzle::<Distance>().unwrap(), Some(saved));

        fs::remove_dir_all(&dir).unwrap();
    }

    #[test]
    fn test_save_load_piece_puzzle() {
        let dir = temp_dir("json-piece");
        let model = PieceModel::new(6, 6);
        let config = GeneratorConfig {
            max_board_attempts: 500,
            ..GeneratorConfig::default()
        };
        let puzzle = PuzzleGenerator::new(&model, config.clone())
            .generate(&mut StdRng::seed_from_u64(8))
            .unwrap();
        let saved = SavedPuzzle {
            seed: 8,
            config,
            puzzle,
        };

        let saver = SaverPuzzle::new(dir.clone(), 2);
        saver.save_puzzle(&saved).unwrap();
        let loaded: SavedPuzzle<Piece> = saver.load_puzzle().unwrap().unwrap();
        assert!(loaded.puzzle.path.contains(loaded.puzzle.board.goal()));
        assert_eq!(loaded, saved);

        // Pieces are stored with their labels
        let start: Piece = loaded.puzzle.parameters[0];
        let json = fs::read_to_string(dir.join("puzzle_2.json")).unwrap();
        assert!(json.contains(&format!("\"{start}\"")));

        fs::remove_dir_all(&dir).unwrap();
    }

    #[test]
    fn test_corrupted_file() {
        let dir = temp_dir("json-corrupted");
        fs::write(dir.join("puzzle_0.json"), "{ not json").unwrap();

        let saver = SaverPuzzle::new(dir.clone(), 0);
        assert!(saver.load_puzzle::<Distance>().is_err());

        fs::remove_dir_all(&dir).unwrap();
    }
}
