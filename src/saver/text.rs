/*
text.rs

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

//! Board and path text files.
//!
//! A board file has one line per row, with the cell labels separated by white spaces:
//!
//! ```text
//! 2     1     3
//! 1     2X    1
//! 2     1     X
//! ```
//!
//! A path file has one `row col` pair per line, from the top-left cell to the goal.
//! Blank lines are ignored in both formats.

use log::debug;
use std::error::Error;
use std::fmt;
use std::fs::File;
use std::io::{self, BufRead, BufReader, BufWriter, Write};
use std::str::FromStr;

use crate::generator::board::{Board, BoardError, CellValue};
use crate::generator::cell::Cell;
use crate::generator::movement::ParseParamError;
use crate::generator::path::Path;

/// Errors raised when reading a board or a path.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ReadError {
    /// The input has no content.
    InvalidFormat,

    /// A token cannot be parsed. Line numbers start at 1.
    InvalidValue { line: usize, token: String },

    /// A line does not have the expected number of tokens.
    RowLength {
        line: usize,
        expected: usize,
        found: usize,
    },

    /// The board does not have the goal at the bottom-right corner.
    Board(BoardError),

    /// The input cannot be read.
    Io(io::ErrorKind),
}

impl fmt::Display for ReadError {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            ReadError::InvalidFormat => write!(f, "no data to read"),
            ReadError::InvalidValue { line, token } => {
                write!(f, "line {line}: invalid value `{token}`")
            }
            ReadError::RowLength {
                line,
                expected,
                found,
            } => write!(f, "line {line}: {found} values instead of {expected}"),
            ReadError::Board(e) => write!(f, "{e}"),
            ReadError::Io(kind) => write!(f, "read error: {kind}"),
        }
    }
}

impl Error for ReadError {}

impl From<io::Error> for ReadError {
    fn from(err: io::Error) -> Self {
        ReadError::Io(err.kind())
    }
}

impl From<BoardError> for ReadError {
    fn from(err: BoardError) -> Self {
        ReadError::Board(err)
    }
}

/// Iterate over the non-blank lines, with their line numbers.
fn valid_lines<T: BufRead>(reader: T) -> impl Iterator<Item = Result<(usize, String), ReadError>> {
    reader
        .lines()
        .enumerate()
        .filter_map(|(i, line)| match line {
            Ok(l) if l.trim().is_empty() => None,
            Ok(l) => Some(Ok((i + 1, l))),
            Err(e) => Some(Err(ReadError::from(e))),
        })
}

/// Write the board, one row per line.
pub fn write_board<P: fmt::Display, W: Write>(board: &Board<P>, writer: &mut W) -> io::Result<()> {
    writeln!(writer, "{board}")
}

/// Read a complete board.
///
/// # Errors
///
/// The function returns an error if a label is not valid, if the rows do not have the same
/// length, if a cell is empty (`0`), or if the goal is not the bottom-right cell.
pub fn read_board<P, T>(reader: T) -> Result<Board<P>, ReadError>
where
    P: Copy + FromStr<Err = ParseParamError>,
    T: BufRead,
{
    let mut rows: Vec<Vec<CellValue<P>>> = Vec::new();

    for line in valid_lines(reader) {
        let (line_num, content) = line?;
        let row: Vec<CellValue<P>> = content
            .split_whitespace()
            .map(|token| {
                token.parse().map_err(|_| ReadError::InvalidValue {
                    line: line_num,
                    token: token.to_string(),
                })
            })
            .collect::<Result<_, _>>()?;

        if let Some(first) = rows.first()
            && first.len() != row.len()
        {
            return Err(ReadError::RowLength {
                line: line_num,
                expected: first.len(),
                found: row.len(),
            });
        }
        rows.push(row);
    }

    if rows.is_empty() {
        return Err(ReadError::InvalidFormat);
    }
    Ok(Board::from_rows(rows)?)
}

/// Write the path, one `row col` pair per line.
pub fn write_path<W: Write>(path: &Path, writer: &mut W) -> io::Result<()> {
    for cell in path.get() {
        writeln!(writer, "{} {}", cell.row, cell.col)?;
    }
    Ok(())
}

/// Read a path.
///
/// # Errors
///
/// The function returns an error if a line does not contain exactly two coordinates.
pub fn read_path<T: BufRead>(reader: T) -> Result<Path, ReadError> {
    let mut cells: Vec<Cell> = Vec::new();

    for line in valid_lines(reader) {
        let (line_num, content) = line?;
        let coords: Vec<usize> = content
            .split_whitespace()
            .map(|token| {
                token.parse().map_err(|_| ReadError::InvalidValue {
                    line: line_num,
                    token: token.to_string(),
                })
            })
            .collect::<Result<_, _>>()?;

        match coords[..] {
            [row, col] => cells.push(Cell::new(row, col)),
            _ => {
                return Err(ReadError::RowLength {
                    line: line_num,
                    expected: 2,
                    found: coords.len(),
                });
            }
        }
    }

    if cells.is_empty() {
        return Err(ReadError::InvalidFormat);
    }
    Ok(Path::from(cells))
}

/// Write the board to a file.
pub fn save_board<P: fmt::Display>(
    board: &Board<P>,
    file_name: &std::path::Path,
) -> Result<(), Box<dyn Error>> {
    debug!("Writing board to {file_name:?}");
    let mut writer: BufWriter<File> = BufWriter::new(File::create(file_name)?);
    write_board(board, &mut writer)?;
    writer.flush()?;
    Ok(())
}

/// Read a board from a file.
pub fn load_board<P>(file_name: &std::path::Path) -> Result<Board<P>, Box<dyn Error>>
where
    P: Copy + FromStr<Err = ParseParamError>,
{
    debug!("Reading board from {file_name:?}");
    let reader: BufReader<File> = BufReader::new(File::open(file_name)?);
    Ok(read_board(reader)?)
}

/// Write the path to a file.
pub fn save_path(path: &Path, file_name: &std::path::Path) -> Result<(), Box<dyn Error>> {
    debug!("Writing path to {file_name:?}");
    let mut writer: BufWriter<File> = BufWriter::new(File::create(file_name)?);
    write_path(path, &mut writer)?;
    writer.flush()?;
    Ok(())
}

/// Read a path from a file.
pub fn load_path(file_name: &std::path::Path) -> Result<Path, Box<dyn Error>> {
    debug!("Reading path from {file_name:?}");
    let reader: BufReader<File> = BufReader::new(File::open(file_name)?);
    Ok(read_path(reader)?)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::generator::distance::Distance;
    use crate::generator::pieces::Piece;
    use std::env;
    use std::fs;

    #[test]
    fn test_read_board() {
        let input: &[u8] = b"p  k   r2\n\nb1X q3  X\n";
        let board: Board<Piece> = read_board(input).unwrap();

        assert_eq!(board.rows(), 2);
        assert_eq!(board.cols(), 3);
        assert_eq!(board.get(Cell::new(0, 1)), Some(CellValue::Param(Piece::Knight)));
        assert_eq!(board.duds(), vec![Cell::new(1, 0)]);
        assert_eq!(board.get(Cell::new(1, 2)), Some(CellValue::Goal));
    }

    #[test]
    fn test_read_board_errors() {
        assert_eq!(
            read_board::<Distance, _>(&b"\n  \n"[..]),
            Err(ReadError::InvalidFormat)
        );
        assert_eq!(
            read_board::<Distance, _>(&b"1 2\n3 z\n"[..]),
            Err(ReadError::InvalidValue {
                line: 2,
                token: String::from("z")
            })
        );
        assert_eq!(
            read_board::<Distance, _>(&b"1 2\n\n3 4 X\n"[..]),
            Err(ReadError::RowLength {
                line: 3,
                expected: 2,
                found: 3
            })
        );
        assert_eq!(
            read_board::<Distance, _>(&b"1 2\n3 4\n"[..]),
            Err(ReadError::Board(BoardError::MissingGoal))
        );
        assert_eq!(
            read_board::<Distance, _>(&b"1 0\n2 X\n"[..]),
            Err(ReadError::Board(BoardError::Incomplete(Cell::new(0, 1))))
        );
        assert!(read_board::<Piece, _>(&b"p k7\nk X\n"[..]).is_err());
    }

    #[test]
    fn test_write_read_board() {
        let input: &str = "1     2     3\n3X    1     X\n";
        let board: Board<Distance> = read_board(input.as_bytes()).unwrap();

        let mut output: Vec<u8> = Vec::new();
        write_board(&board, &mut output).unwrap();
        assert_eq!(String::from_utf8(output).unwrap(), input);
    }

    #[test]
    fn test_path() {
        let path = read_path(&b"0 0\n0 2\n\n1 2\n"[..]).unwrap();
        assert_eq!(
            path.get(),
            &[Cell::new(0, 0), Cell::new(0, 2), Cell::new(1, 2)]
        );

        let mut output: Vec<u8> = Vec::new();
        write_path(&path, &mut output).unwrap();
        assert_eq!(output, b"0 0\n0 2\n1 2\n");

        assert_eq!(
            read_path(&b"0 0\n1\n"[..]),
            Err(ReadError::RowLength {
                line: 2,
                expected: 2,
                found: 1
            })
        );
        assert_eq!(
            read_path(&b"0 -1\n"[..]),
            Err(ReadError::InvalidValue {
                line: 1,
                token: String::from("-1")
            })
        );
        assert_eq!(read_path(&b""[..]), Err(ReadError::InvalidFormat));
    }

    #[test]
    fn test_files() {
        let dir = env::temp_dir().join(format!("jumpgrid-text-{}", std::process::id()));
        fs::create_dir_all(&dir).unwrap();
        let board_file = dir.join("board.txt");
        let path_file = dir.join("path.txt");

        let board: Board<Piece> = read_board(&b"k p\nq2 X\n"[..]).unwrap();
        let path = Path::from_slice(&[Cell::new(0, 0), Cell::new(1, 1)]);
        save_board(&board, &board_file).unwrap();
        save_path(&path, &path_file).unwrap();

        assert_eq!(load_board::<Piece>(&board_file).unwrap(), board);
        assert_eq!(load_path(&path_file).unwrap(), path);
        assert!(load_path(&dir.join("missing.txt")).is_err());

        fs::remove_dir_all(&dir).unwrap();
    }
}
