use std::fmt;
use std::fs;
use std::path::Path;
use std::str::FromStr;

use ndarray::Array2;
use rand::distributions::WeightedIndex;
use rand::seq::SliceRandom;
use rand::Rng;
use serde::{Serialize, Serializer};

use super::error::{BoggleError, BoggleResult};
use super::util::{Position, QU_TILE};

/// Read-only view of a letter grid. A `Q` cell is the compound "QU" tile.
pub trait LetterGrid {
    fn rows(&self) -> usize;
    fn cols(&self) -> usize;
    fn letter(&self, row: usize, col: usize) -> char;

    /// Tiles as strings, with the compound tile written "Qu"
    fn to_rows(&self) -> Vec<Vec<String>> {
        (0..self.rows())
            .map(|r| (0..self.cols()).map(|c| tile_str(self.letter(r, c))).collect())
            .collect()
    }
}

fn tile_str(letter: char) -> String {
    if letter == QU_TILE {
        "Qu".to_string()
    } else {
        letter.to_string()
    }
}

/// The 16 dice of the 4x4 retail game
const HASBRO_DICE: [&str; 16] = [
    "AAEEGN", "ABBJOO", "ACHOPS", "AFFKPS", "AOOTTW", "CIMOTU", "DEILRX", "DELRVY", "DISTTY",
    "EEGHNW", "EEINSU", "EHRTVW", "EIOSST", "ELRTTY", "HIMNQU", "HLNNRZ",
];

/// Relative frequency of each letter A-Z in English text, in hundredths of a percent
const LETTER_FREQUENCIES: [u32; 26] = [
    817, 149, 278, 425, 1270, 223, 202, 609, 697, 15, 77, 403, 241, 675, 751, 193, 10, 599, 633,
    906, 276, 98, 236, 15, 197, 7,
];

/// Immutable rows x columns grid of uppercase letters
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Board {
    state: Array2<char>,
}

impl Board {
    /// Builds a board from rows of tiles. Each tile is a single letter or "Qu",
    /// in any case.
    pub fn new<R, T>(rows: R) -> BoggleResult<Self>
    where
        R: IntoIterator,
        R::Item: IntoIterator<Item = T>,
        T: AsRef<str>,
    {
        let mut letters = Vec::new();
        let mut n_cols = None;
        let mut n_rows = 0;
        for (row, tiles) in rows.into_iter().enumerate() {
            let before = letters.len();
            for (col, tile) in tiles.into_iter().enumerate() {
                letters.push(Self::parse_tile(tile.as_ref(), Position::new(row, col))?);
            }
            let found = letters.len() - before;
            match n_cols {
                None => n_cols = Some(found),
                Some(expected) if expected != found => {
                    return Err(BoggleError::RaggedRow {
                        row,
                        found,
                        expected,
                    })
                }
                _ => {}
            }
            n_rows += 1;
        }

        let n_cols = n_cols.unwrap_or(0);
        if n_rows == 0 || n_cols == 0 {
            return Err(BoggleError::EmptyBoard);
        }
        Ok(Self::from_letters(n_rows, n_cols, letters))
    }

    /// Loads a board from disk. Files ending in `.json` hold an array of rows of
    /// tile strings, anything else uses the text format.
    pub fn from_file<P: AsRef<Path>>(path: P) -> BoggleResult<Self> {
        let path = path.as_ref();
        let data = fs::read_to_string(path)?;
        if path.extension().map_or(false, |e| e.eq_ignore_ascii_case("json")) {
            Self::from_json(&data)
        } else {
            data.parse()
        }
    }

    pub fn from_json(data: &str) -> BoggleResult<Self> {
        let raw_board: Vec<Vec<String>> = serde_json::from_str(data)?;
        Self::new(raw_board)
    }

    /// Random board where every cell is drawn from English letter frequencies
    pub fn random<R: Rng + ?Sized>(rows: usize, cols: usize, rng: &mut R) -> BoggleResult<Self> {
        if rows == 0 || cols == 0 {
            return Err(BoggleError::EmptyBoard);
        }
        let n_cells = rows
            .checked_mul(cols)
            .ok_or(BoggleError::TooLarge { rows, cols })?;
        let dist = match WeightedIndex::new(LETTER_FREQUENCIES) {
            Ok(dist) => dist,
            Err(_) => unreachable!("letter frequencies are all positive"),
        };
        let letters = (0..n_cells)
            .map(|_| (b'A' + rng.sample(&dist) as u8) as char)
            .collect();
        Ok(Self::from_letters(rows, cols, letters))
    }

    /// Shakes the 16 retail dice into a 4x4 board
    pub fn hasbro<R: Rng + ?Sized>(rng: &mut R) -> Self {
        let mut dice = HASBRO_DICE;
        dice.shuffle(rng);
        let letters = dice
            .iter()
            .map(|die| {
                let faces = die.as_bytes();
                faces[rng.gen_range(0..faces.len())] as char
            })
            .collect();
        Self::from_letters(4, 4, letters)
    }

    fn from_letters(rows: usize, cols: usize, letters: Vec<char>) -> Self {
        match Array2::from_shape_vec((rows, cols), letters) {
            Ok(state) => Self { state },
            Err(e) => unreachable!("board shape was checked: {}", e),
        }
    }

    fn parse_tile(tile: &str, pos: Position) -> BoggleResult<char> {
        let upper = tile.trim().to_ascii_uppercase();
        let mut chars = upper.chars();
        match (chars.next(), chars.next(), chars.next()) {
            (Some(c), None, _) if c.is_ascii_uppercase() => Ok(c),
            (Some(QU_TILE), Some('U'), None) => Ok(QU_TILE),
            _ => Err(BoggleError::InvalidTile {
                tile: tile.to_string(),
                pos,
            }),
        }
    }
}

impl LetterGrid for Board {
    fn rows(&self) -> usize {
        self.state.nrows()
    }

    fn cols(&self) -> usize {
        self.state.ncols()
    }

    fn letter(&self, row: usize, col: usize) -> char {
        self.state[[row, col]]
    }
}

impl std::ops::Index<Position> for Board {
    type Output = char;

    fn index(&self, index: Position) -> &Self::Output {
        &self.state[[index.row, index.col]]
    }
}

/// Serializes as the same array of rows of tiles that `from_json` reads
impl Serialize for Board {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        self.to_rows().serialize(serializer)
    }
}

/// Text format: a "rows cols" header followed by one line of tiles per row
impl FromStr for Board {
    type Err = BoggleError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let mut lines = s.lines().map(str::trim).filter(|l| !l.is_empty());
        let header = lines.next().ok_or(BoggleError::EmptyBoard)?;
        let dims = header
            .split_whitespace()
            .map(|d| d.parse::<usize>())
            .collect::<Result<Vec<_>, _>>()
            .map_err(|e| BoggleError::BadHeader(format!("{:?}: {}", header, e)))?;
        let (rows, cols) = match dims[..] {
            [rows, cols] => (rows, cols),
            _ => return Err(BoggleError::BadHeader(format!("{:?}", header))),
        };

        let grid = lines
            .map(|l| l.split_whitespace().collect::<Vec<_>>())
            .collect::<Vec<_>>();
        if grid.len() != rows {
            return Err(BoggleError::BadHeader(format!(
                "header says {} rows, found {}",
                rows,
                grid.len()
            )));
        }
        let board = Self::new(grid)?;
        if board.cols() != cols {
            return Err(BoggleError::BadHeader(format!(
                "header says {} columns, found {}",
                cols,
                board.cols()
            )));
        }
        Ok(board)
    }
}

impl fmt::Display for Board {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        writeln!(f, "{} {}", self.rows(), self.cols())?;
        for row in self.state.rows() {
            let tiles = row
                .iter()
                .map(|&c| format!("{:<2}", tile_str(c)))
                .collect::<Vec<_>>();
            writeln!(f, "{}", tiles.join(" ").trim_end())?;
        }
        Ok(())
    }
}
