/*
cli_options.rs

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

//! Process command-line options.
//!
//! # Examples
//!
//! Generate a 6x6 board with jump distances and print it with its solution:
//!
//! ```
//! $ jumpgrid -m 6 -n 6 --seed 7
//! Board 0 (bias 0.25)
//! 2     3     1     4     2     1
//! ...
//! ```
//!
//! Generate 20 chess piece boards of increasing difficulty, check them, and store them in the
//! `out` directory:
//!
//! ```
//! $ jumpgrid -f piece -c 20 -b 0 --bias-step 0.05 --verify -o out --json --summary
//! ```
//!
//! Verify a stored board, list its solutions, and check that a stored path solves it:
//!
//! ```
//! $ jumpgrid -f piece --check out/board_3.txt --path out/path_3.txt
//! ```
//!
//! JSON archives can be checked too. The archived path is then checked against the board:
//!
//! ```
//! $ jumpgrid -f piece --check out/puzzle_3.json --search bfs
//! ```

use clap::Parser;
use log::{Level, debug, error, info, log_enabled, warn};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use serde::de::DeserializeOwned;
use std::env;
use std::error::Error;
use std::fmt;
use std::fs;
use std::io::{self, Write};
use std::path::{Path, PathBuf};
use std::str::FromStr;

use crate::config::{COPYRIGHT_NOTICE, Family, Settings};
use crate::generator::board::Board;
use crate::generator::distance::{Distance, DistanceModel};
use crate::generator::filler::FillPolicy;
use crate::generator::movement::{MovementModel, ParseParamError, ShortcutRule};
use crate::generator::path;
use crate::generator::pieces::{Piece, PieceModel};
use crate::generator::puzzles::{GeneratorConfig, JumpPuzzle, PuzzleGenerator};
use crate::saver::json::{SavedPuzzle, SaverPuzzle};
use crate::saver::text;
use crate::solver::{PathVerifier, SearchOrder, Verification};

/// Generate jump puzzles with a single solution.
#[derive(Parser, Debug)]
#[command(about, long_about = None, version, long_version = COPYRIGHT_NOTICE)]
struct Args {
    /// Number of rows of the boards [default: 8]
    #[arg(short = 'm', long)]
    rows: Option<usize>,

    /// Number of columns of the boards [default: 8]
    #[arg(short = 'n', long)]
    cols: Option<usize>,

    /// Movement parameters stored in the cells [default: distance]
    #[arg(value_enum, short, long)]
    family: Option<Family>,

    /// Largest jump distance for the distance family [default: (rows + cols) / 2 - 2].
    /// Below 3, boards can rarely be completed without --show-duds
    #[arg(long)]
    max_distance: Option<usize>,

    /// Probability of offering reverse jumps when building the path, between 0 and 1
    #[arg(short, long)]
    bias: Option<f64>,

    /// Bias increment between two consecutive boards
    #[arg(long)]
    bias_step: Option<f64>,

    /// Extra rule to reject the jumps that would land on the goal distance
    #[arg(value_enum, long)]
    shortcut_rule: Option<ShortcutRule>,

    /// Number of boards to generate
    #[arg(short, long)]
    count: Option<usize>,

    /// Seed of the random number generator
    #[arg(long)]
    seed: Option<u64>,

    /// Directory where the boards and paths are written, instead of the standard output
    #[arg(short, long, value_name = "DIR")]
    output: Option<PathBuf>,

    /// Keep boards with cells that jump onto the path, and tag these cells
    #[arg(long, default_value_t = false)]
    show_duds: bool,

    /// Also archive each puzzle in JSON format
    #[arg(long, default_value_t = false, requires = "output")]
    json: bool,

    /// Verify that each generated board has a single solution
    #[arg(long, default_value_t = false)]
    verify: bool,

    /// Verify a stored board, or a JSON archive, and list its solutions
    #[arg(long, value_name = "FILE")]
    check: Option<PathBuf>,

    /// Path file to check against the board given with --check
    #[arg(long, value_name = "FILE", requires = "check")]
    path: Option<PathBuf>,

    /// Search order used to collect the solutions [default: dfs]
    #[arg(value_enum, long)]
    search: Option<SearchOrder>,

    /// Read the settings from a JSON file. Command-line options take precedence
    #[arg(long, value_name = "FILE")]
    config: Option<PathBuf>,

    /// Print some statistics after generating the boards
    #[arg(short, long, default_value_t = false)]
    summary: bool,

    /// Enable debug messages
    #[arg(short, long, default_value_t = false)]
    debug: bool,
}

impl Args {
    /// Override the settings with the options from the command line.
    fn apply(&self, settings: &mut Settings) {
        if let Some(v) = self.rows {
            settings.rows = v;
        }
        if let Some(v) = self.cols {
            settings.cols = v;
        }
        if let Some(v) = self.family {
            settings.family = v;
        }
        if self.max_distance.is_some() {
            settings.max_distance = self.max_distance;
        }
        if let Some(v) = self.bias {
            settings.generator.difficulty_bias = v;
        }
        if let Some(v) = self.bias_step {
            settings.bias_step = v;
        }
        if self.shortcut_rule.is_some() {
            settings.generator.shortcut_rule = self.shortcut_rule;
        }
        if let Some(v) = self.count {
            settings.count = v;
        }
        if self.seed.is_some() {
            settings.seed = self.seed;
        }
        if self.show_duds {
            settings.generator.fill_policy = FillPolicy::MarkDuds;
        }
    }
}

/// Where and how to store the generated boards.
struct Output {
    /// Destination directory. The standard output is used when not set.
    dir: Option<PathBuf>,

    /// Also archive the puzzles in JSON format.
    json: bool,

    /// Verify each generated board.
    verify: bool,

    search: SearchOrder,
}

/// Result of checking a stored board.
#[derive(Debug, PartialEq)]
struct CheckReport {
    verification: Verification,

    /// Whether the stored path solves the board, when a path is available.
    is_solution: Option<bool>,

    /// Number of cells tagged as duds.
    duds: usize,
}

/// Statistics for a batch of boards.
#[derive(Debug, Default, PartialEq)]
struct Summary {
    generated: usize,
    total: f32,
    max: f32,
    iterations: usize,
    restarts: usize,
    backtracks: usize,
    attempts: usize,
    errors: usize,
    failed_checks: usize,
}

impl Summary {
    fn print(&self, seed: u64) {
        let n: usize = self.generated.max(1);
        println!(
            "
              seed = {}
            boards = {}
        total time = {}s
      average time = {}s
          max time = {}s
average iterations = {}
  average restarts = {}
average backtracks = {}
  average attempts = {}
            errors = {}
     failed checks = {}",
            seed,
            self.generated,
            self.total,
            self.total / n as f32,
            self.max,
            self.iterations / n,
            self.restarts / n,
            self.backtracks / n,
            self.attempts / n,
            self.errors,
            self.failed_checks
        );
    }
}

/// Parse and process command-line options.
///
/// Return the exit code of the program.
pub fn parse() -> u8 {
    let args: Args = Args::parse();

    if args.debug {
        unsafe {
            env::set_var("RUST_LOG", "debug");
        }
    }
    env_logger::init();

    let mut settings: Settings = match &args.config {
        Some(f) => match Settings::load(f) {
            Ok(s) => s,
            Err(e) => {
                eprintln!("Cannot read the settings from {}: {e}", f.display());
                return 2;
            }
        },
        None => Settings::default(),
    };
    args.apply(&mut settings);

    //
    // Verify a stored board
    //
    let search: SearchOrder = args.search.unwrap_or_default();
    if let Some(file_name) = &args.check {
        return match check_file(&settings, file_name, args.path.as_deref(), search) {
            Ok(report) => {
                print_report(&report);
                if report.verification.reachable && report.is_solution != Some(false) {
                    0
                } else {
                    1
                }
            }
            Err(e) => {
                eprintln!("{}: {e}", file_name.display());
                2
            }
        };
    }

    if settings.rows == 0 || settings.cols == 0 {
        eprintln!("The boards must have at least one row and one column");
        return 2;
    }

    if let Some(dir) = &args.output
        && let Err(e) = fs::create_dir_all(dir)
    {
        eprintln!("Cannot create the {} directory: {e}", dir.display());
        return 2;
    }

    let seed: u64 = settings.seed.unwrap_or_else(|| rand::rng().random());
    info!("Seed: {seed}");
    let mut rng: StdRng = StdRng::seed_from_u64(seed);

    let output = Output {
        dir: args.output.clone(),
        json: args.json,
        verify: args.verify,
        search,
    };

    let summary: Summary = match settings.family {
        Family::Distance => {
            let model = DistanceModel::new(settings.rows, settings.cols, settings.max_distance);
            debug!("Jump distances up to {}", model.max_distance());
            if let Some(msg) = distance_warning(&settings, &model) {
                eprintln!("Warning: {msg}");
            }
            run(&model, &settings, &output, seed, &mut rng)
        }
        Family::Piece => {
            let model = PieceModel::new(settings.rows, settings.cols);
            debug!("Piece strides up to {}", model.max_stride());
            run(&model, &settings, &output, seed, &mut rng)
        }
    };

    if args.summary {
        summary.print(seed);
    }
    if summary.errors > 0 || summary.failed_checks > 0 {
        1
    } else {
        0
    }
}

/// Return a warning when short jump distances make strict boards nearly impossible to fill.
///
/// With distances below 3, most cells off the path can only jump onto it.
fn distance_warning(settings: &Settings, model: &DistanceModel) -> Option<String> {
    if model.max_distance() >= 3
        || settings.rows < 3
        || settings.cols < 3
        || settings.generator.fill_policy == FillPolicy::MarkDuds
    {
        return None;
    }
    Some(format!(
        "with jump distances up to {}, {}x{} boards can rarely be completed; \
         use --max-distance 3 or more, or --show-duds",
        model.max_distance(),
        settings.rows,
        settings.cols
    ))
}

/// Generate, verify, and store a batch of boards.
fn run<M: MovementModel, R: Rng>(
    model: &M,
    settings: &Settings,
    output: &Output,
    seed: u64,
    rng: &mut R,
) -> Summary {
    let mut summary = Summary::default();

    for i in 0..settings.count {
        debug!("Board {i}");

        let config = GeneratorConfig {
            difficulty_bias: settings.bias_for(i),
            ..settings.generator.clone()
        };
        let mut generator = PuzzleGenerator::new(model, config.clone());
        let ret = generator.generate(rng);

        summary.total += generator.duration;
        summary.max = summary.max.max(generator.duration);
        summary.iterations += generator.iteration;
        summary.restarts += generator.restarts;
        summary.backtracks += generator.backtracks;

        let puzzle = match ret {
            Ok(p) => p,
            Err(e) => {
                // The generator gave up
                summary.errors += 1;
                warn!("Board {i}: {e}");
                continue;
            }
        };
        summary.generated += 1;
        summary.attempts += puzzle.attempts;

        if output.verify {
            let verifier = PathVerifier::new(model, &puzzle.board)
                .with_limit(2)
                .with_search(output.search);
            let verification: Verification = verifier.verify();
            if !verifier.is_solution(puzzle.path.get()) {
                error!("Board {i}: the generated path is not a solution");
                summary.failed_checks += 1;
            } else if !verification.is_unique() {
                if puzzle.duds.is_empty() {
                    error!("Board {i}: the board has more than one solution");
                    summary.failed_checks += 1;
                } else {
                    warn!(
                        "Board {i}: more than one solution because of {} dud cell(s)",
                        puzzle.duds.len()
                    );
                }
            }
        }

        let ret: Result<(), Box<dyn Error>> = match &output.dir {
            Some(dir) => {
                if log_enabled!(Level::Debug) {
                    debug!("Board {i}:\n{}", puzzle.board);
                }
                store(dir, i, seed, &config, &puzzle, output.json)
            }
            None => print_puzzle(i, config.difficulty_bias, &puzzle.board, &puzzle.path),
        };
        if let Err(e) = ret {
            error!("Board {i}: {e}");
            summary.errors += 1;
        }
    }
    summary
}

/// Write the board, the path, and optionally the JSON archive in the given directory.
fn store<P: fmt::Display + serde::Serialize + Copy>(
    dir: &Path,
    index: usize,
    seed: u64,
    config: &GeneratorConfig,
    puzzle: &JumpPuzzle<P>,
    json: bool,
) -> Result<(), Box<dyn Error>> {
    text::save_board(&puzzle.board, &dir.join(format!("board_{index}.txt")))?;
    text::save_path(&puzzle.path, &dir.join(format!("path_{index}.txt")))?;
    if json {
        let saved = SavedPuzzle {
            seed,
            config: config.clone(),
            puzzle: puzzle.clone(),
        };
        SaverPuzzle::new(dir.to_path_buf(), index).save_puzzle(&saved)?;
    }
    Ok(())
}

/// Print the board and its path on the standard output.
fn print_puzzle<P: fmt::Display>(
    index: usize,
    bias: f64,
    board: &Board<P>,
    solution: &path::Path,
) -> Result<(), Box<dyn Error>> {
    let stdout = io::stdout();
    let mut out = stdout.lock();

    writeln!(out, "Board {index} (bias {bias:.2})")?;
    text::write_board(board, &mut out)?;
    writeln!(out, "Path {index}")?;
    text::write_path(solution, &mut out)?;
    writeln!(out)?;
    Ok(())
}

/// Read a stored board and look for its solutions.
///
/// The board is read from a text file, or from a JSON archive when the file name ends with
/// `.json`. The path from `path_file`, or else the archived path, is checked against the board.
fn check_file(
    settings: &Settings,
    file_name: &Path,
    path_file: Option<&Path>,
    search: SearchOrder,
) -> Result<CheckReport, Box<dyn Error>> {
    match settings.family {
        Family::Distance => {
            let (board, recorded): (Board<Distance>, Option<path::Path>) = load_checked(file_name)?;
            let model = DistanceModel::new(board.rows(), board.cols(), settings.max_distance);
            check_board(&model, &board, recorded, path_file, search)
        }
        Family::Piece => {
            let (board, recorded): (Board<Piece>, Option<path::Path>) = load_checked(file_name)?;
            let model = PieceModel::new(board.rows(), board.cols());
            check_board(&model, &board, recorded, path_file, search)
        }
    }
}

/// Load a board, and its path for JSON archives.
fn load_checked<P>(file_name: &Path) -> Result<(Board<P>, Option<path::Path>), Box<dyn Error>>
where
    P: Copy + FromStr<Err = ParseParamError> + DeserializeOwned,
{
    if file_name.extension().is_some_and(|e| e == "json") {
        let saved: SavedPuzzle<P> = SaverPuzzle::from_file(file_name.to_path_buf())
            .load_puzzle()?
            .ok_or_else(|| String::from("no such file"))?;
        Ok((saved.puzzle.board, Some(saved.puzzle.path)))
    } else {
        Ok((text::load_board(file_name)?, None))
    }
}

fn check_board<M: MovementModel>(
    model: &M,
    board: &Board<M::Param>,
    recorded: Option<path::Path>,
    path_file: Option<&Path>,
    search: SearchOrder,
) -> Result<CheckReport, Box<dyn Error>> {
    let solution: Option<path::Path> = match path_file {
        Some(f) => Some(text::load_path(f)?),
        None => recorded,
    };
    let verifier = PathVerifier::new(model, board).with_search(search);

    Ok(CheckReport {
        verification: verifier.verify(),
        is_solution: solution.map(|p| verifier.is_solution(p.get())),
        duds: board.duds().len(),
    })
}

fn print_report(report: &CheckReport) {
    if report.duds > 0 {
        println!("{} dud cell(s)", report.duds);
    }
    match report.is_solution {
        Some(true) => println!("The path is a solution"),
        Some(false) => println!("The path is not a solution"),
        None => (),
    }

    let verification: &Verification = &report.verification;
    if !verification.reachable {
        println!("The goal cannot be reached");
        return;
    }
    println!("{} solution(s)", verification.paths.len());
    for p in &verification.paths {
        let cells: Vec<String> = p.iter().map(|c| c.to_string()).collect();
        println!("{}", cells.join(" "));
    }
}
