use crate::error::Error;
use crate::tiles::N;
use std::fmt;
use std::ops::Deref;
use std::str::FromStr;

const Q: usize = 1 + N / 2;

// The standard premium layout is symmetric in both axes, so one quarter
// (with the centre square in its corner) describes the whole board.
const DEFAULT_QUARTER_GRID: [&str; Q] = [
    "3w -- -- 2l -- -- -- 3w",
    "-- 2w -- -- -- 3l -- --",
    "-- -- 2w -- -- -- 2l --",
    "2l -- -- 2w -- -- -- 2l",
    "-- -- -- -- 2w -- -- --",
    "-- 3l -- -- -- 3l -- --",
    "-- -- 2l -- -- -- 2l --",
    "3w -- -- 2l -- -- -- 2w",
];

/// Premium value of a board square.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum Multiplier {
    None,
    DoubleLetter,
    TripleLetter,
    DoubleWord,
    TripleWord,
}

impl Multiplier {
    /// Factor applied to the value of a newly placed tile on this square.
    pub fn letter_factor(self) -> u32 {
        match self {
            Multiplier::DoubleLetter => 2,
            Multiplier::TripleLetter => 3,
            _ => 1,
        }
    }

    /// Factor this square contributes to a word covering it.
    pub fn word_factor(self) -> u32 {
        match self {
            Multiplier::DoubleWord => 2,
            Multiplier::TripleWord => 3,
            _ => 1,
        }
    }
}

use Multiplier::{DoubleLetter, DoubleWord, TripleLetter, TripleWord};

impl fmt::Display for Multiplier {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            Multiplier::None => write!(f, "--"),
            DoubleLetter => write!(f, "2l"),
            TripleLetter => write!(f, "3l"),
            DoubleWord => write!(f, "2w"),
            TripleWord => write!(f, "3w"),
        }
    }
}

impl FromStr for Multiplier {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "--" => Ok(Multiplier::None),
            "2l" => Ok(DoubleLetter),
            "3l" => Ok(TripleLetter),
            "2w" => Ok(DoubleWord),
            "3w" => Ok(TripleWord),
            _ => Err(Error::GridParseError(String::from(s))),
        }
    }
}

type Inner = [[Multiplier; N]; N];

/// The immutable 15x15 map of premium squares.
///
/// The default grid is the standard scrabble layout: triple/double word and
/// triple/double letter squares, with the centre square a double word.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PremiumGrid(Inner);

impl Deref for PremiumGrid {
    type Target = Inner;
    fn deref(&self) -> &Self::Target {
        &self.0
    }
}

impl fmt::Display for PremiumGrid {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{}", self.to_strings().join("\n"))
    }
}

impl Default for PremiumGrid {
    fn default() -> PremiumGrid {
        PremiumGrid::expand_quarter_grid(&DEFAULT_QUARTER_GRID)
    }
}

impl PremiumGrid {
    fn empty() -> PremiumGrid {
        PremiumGrid([[Multiplier::None; N]; N])
    }

    /// Create a symmetrical grid by mirroring a quarter grid horizontally
    /// and vertically.
    fn expand_quarter_grid(qg: &[&str; Q]) -> PremiumGrid {
        let mut grid = PremiumGrid::empty();
        for (i, row) in qg.iter().enumerate() {
            let row = row.split(' ').collect::<Vec<&str>>();
            assert!(row.len() == Q);
            for (j, c) in row.iter().enumerate() {
                let val = c.parse().unwrap();
                grid.0[i][j] = val;
                grid.0[N - i - 1][j] = val;
                grid.0[i][N - j - 1] = val;
                grid.0[N - i - 1][N - j - 1] = val;
            }
        }
        grid
    }

    /// Get grid cells as a vec of 15 strings.
    pub fn to_strings(&self) -> Vec<String> {
        self.iter()
            .map(|row| {
                row.iter()
                    .map(Multiplier::to_string)
                    .collect::<Vec<String>>()
                    .join(" ")
            })
            .collect::<Vec<_>>()
    }

    /// Create a `PremiumGrid` from strings.
    /// Parameter `grid` must have 15 rows, each row consisting of 15
    /// space-separated cell tokens (`--`, `2l`, `3l`, `2w`, `3w`).
    /// ## Errors
    /// If `grid` has wrong dimensions, or a token can not be parsed.
    pub fn from_strings<S: AsRef<str>>(grid: &[S]) -> Result<PremiumGrid, Error> {
        if grid.len() != N {
            return Err(Error::InvalidRowCount(grid.len()));
        }
        let mut premiums = PremiumGrid::empty();
        for (i, row) in grid.iter().enumerate() {
            let row: Vec<&str> = row.as_ref().split(' ').collect();
            if row.len() != N {
                return Err(Error::InvalidRowLength(
                    String::from(grid[i].as_ref()),
                    row.len(),
                ));
            }
            for (j, &cell) in row.iter().enumerate() {
                premiums.0[i][j] = cell.parse()?;
            }
        }
        Ok(premiums)
    }
}
