/*
config.rs

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

//! Package constants and batch settings.
//!
//! The batch settings can be stored in a JSON file and loaded with the `--config` option.
//! Missing fields take their default values:
//!
//! ```json
//! {
//!     "rows": 8,
//!     "cols": 8,
//!     "family": "piece",
//!     "count": 20,
//!     "difficulty_bias": 0.1,
//!     "bias_step": 0.05,
//!     "fill_policy": "mark-duds"
//! }
//! ```

use clap::ValueEnum;
use log::debug;
use serde::{Deserialize, Serialize};
use std::error::Error;
use std::fmt;
use std::fs::File;
use std::io::BufReader;
use std::path::Path;

use crate::generator::puzzles::GeneratorConfig;

pub const COPYRIGHT_NOTICE: &str = concat!(
    env!("CARGO_PKG_VERSION"),
    "

Copyright 2025 Hervé Quatremain
License GPLv3+: GNU GPL version 3 or later <https://gnu.org/licenses/gpl.html>.
This is free software: you are free to change and redistribute it.
There is NO WARRANTY, to the extent permitted by law."
);

/// Movement parameter family used on the boards.
#[derive(Serialize, Deserialize, Debug, Copy, Clone, Default, PartialEq, Eq, ValueEnum)]
#[serde(rename_all = "kebab-case")]
pub enum Family {
    /// Each cell stores a jump distance along a row or a column.
    #[default]
    Distance,

    /// Each cell stores a chess piece.
    Piece,
}

impl fmt::Display for Family {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            Family::Distance => write!(f, "distance"),
            Family::Piece => write!(f, "piece"),
        }
    }
}

/// Batch settings.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
#[serde(default)]
pub struct Settings {
    /// Number of rows of the boards.
    pub rows: usize,

    /// Number of columns of the boards.
    pub cols: usize,

    pub family: Family,

    /// Largest jump distance for the distance family.
    pub max_distance: Option<usize>,

    /// Number of boards to generate.
    pub count: usize,

    /// Seed of the random number generator. A random seed is used when not set.
    pub seed: Option<u64>,

    /// Difficulty bias increment between two consecutive boards of the batch.
    pub bias_step: f64,

    #[serde(flatten)]
    pub generator: GeneratorConfig,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            rows: 8,
            cols: 8,
            family: Family::Distance,
            max_distance: None,
            count: 1,
            seed: None,
            bias_step: 0.0,
            generator: GeneratorConfig::default(),
        }
    }
}

impl Settings {
    /// Load the settings from a JSON file.
    pub fn load(file_name: &Path) -> Result<Self, Box<dyn Error>> {
        debug!("Loading settings from {file_name:?}");
        let reader: BufReader<File> = BufReader::new(File::open(file_name)?);
        let settings: Settings = serde_json::from_reader(reader)?;
        Ok(settings)
    }

    /// Return the difficulty bias for the board at the given position in the batch.
    ///
    /// The bias increases by [`Settings::bias_step`] for each board and is capped at 1.
    pub fn bias_for(&self, index: usize) -> f64 {
        let bias: f64 = self.generator.difficulty_bias + self.bias_step * index as f64;
        if (0.0..=1.0).contains(&self.generator.difficulty_bias) {
            bias.clamp(0.0, 1.0)
        } else {
            // Out of range: let the generator report it
            bias
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::generator::filler::FillPolicy;
    use crate::generator::movement::ShortcutRule;
    use std::env;
    use std::fs;

    #[test]
    fn test_partial_settings() {
        let settings: Settings = serde_json::from_str(
            r#"{
                "rows": 6,
                "family": "piece",
                "difficulty_bias": 0.5,
                "shortcut_rule": "goal-distance",
                "fill_policy": "mark-duds"
            }"#,
        )
        .unwrap();

        assert_eq!(settings.rows, 6);
        assert_eq!(settings.cols, 8);
        assert_eq!(settings.family, Family::Piece);
        assert_eq!(settings.count, 1);
        assert_eq!(settings.generator.difficulty_bias, 0.5);
        assert_eq!(
            settings.generator.shortcut_rule,
            Some(ShortcutRule::GoalDistance)
        );
        assert_eq!(settings.generator.fill_policy, FillPolicy::MarkDuds);
        assert_eq!(settings.generator.max_restarts, 1000);
    }

    #[test]
    fn test_bias_ramp() {
        let settings = Settings {
            bias_step: 0.25,
            generator: GeneratorConfig {
                difficulty_bias: 0.5,
                ..GeneratorConfig::default()
            },
            ..Settings::default()
        };

        assert_eq!(settings.bias_for(0), 0.5);
        assert_eq!(settings.bias_for(1), 0.75);
        assert_eq!(settings.bias_for(5), 1.0);
    }

    #[test]
    fn test_load() {
        let file_name = env::temp_dir().join(format!("jumpgrid-settings-{}.json", std::process::id()));
        fs::write(&file_name, r#"{"count": 4, "seed": 42}"#).unwrap();

        let settings = Settings::load(&file_name).unwrap();
        assert_eq!(settings.count, 4);
        assert_eq!(settings.seed, Some(42));
        assert_eq!(settings.generator, GeneratorConfig::default());

        fs::write(&file_name, r#"{"count": "four"}"#).unwrap();
        assert!(Settings::load(&file_name).is_err());

        fs::remove_file(&file_name).unwrap();
        assert!(Settings::load(&file_name).is_err());
    }
}
