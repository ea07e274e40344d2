use crate::error::Error;
use crate::grid::{Multiplier, PremiumGrid};
use crate::tiles::{Position, Tile, N};
use std::fmt;

/// The centre square, which the first move must cover.
pub const CENTER: Position = Position { row: 7, col: 7 };

/// Represents the state of a scrabble board: a grid of 15x15 squares, each
/// empty or holding a [`Tile`](crate::Tile), plus the immutable premium map.
///
/// The board is treated as read-only for the duration of an analysis; the
/// generator and scorer only read it.
#[derive(Debug, Clone)]
pub struct Board {
    tiles: [[Option<Tile>; N]; N],
    premiums: PremiumGrid,
    tile_count: usize,
}

impl Default for Board {
    fn default() -> Self {
        Board::new()
    }
}

/// Display the board state as 15 lines of 15 squares.
/// Empty squares show as ".", blanks as lowercase letters.
impl fmt::Display for Board {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        let repr = self
            .tiles
            .iter()
            .map(|row| {
                row.iter()
                    .map(|cell| match cell {
                        Some(tile) => tile.to_string(),
                        None => String::from("."),
                    })
                    .collect::<String>()
            })
            .collect::<Vec<String>>()
            .join("\n");
        write!(f, "{}", repr)
    }
}

impl Board {
    /// Create a new empty board with the standard premium squares.
    pub fn new() -> Board {
        Board {
            tiles: [[None; N]; N],
            premiums: PremiumGrid::default(),
            tile_count: 0,
        }
    }

    /// Use a custom premium grid, and return the modified board.
    pub fn with_premiums(mut self, premiums: PremiumGrid) -> Board {
        self.premiums = premiums;
        self
    }

    /// Parse board state from 15 strings of 15 characters and return the
    /// modified board. `.` or space is an empty square, `A`..`Z` a regular
    /// tile, `a`..`z` a blank assigned to that letter.
    ///
    /// ## Errors
    /// If the rows have wrong dimensions or hold characters outside the
    /// alphabet.
    ///
    /// ## Examples
    /// ```
    /// # use scrabble_analyzer::{Board, Error};
    /// let board = Board::new().with_rows(&[
    ///     "...............",
    ///     "...............",
    ///     "...............",
    ///     "...............",
    ///     "...............",
    ///     "...............",
    ///     "...............",
    ///     ".......CAT.....",
    ///     "...............",
    ///     "...............",
    ///     "...............",
    ///     "...............",
    ///     "...............",
    ///     "...............",
    ///     "...............",
    /// ])?;
    /// assert!(!board.is_empty(7, 7));
    /// # Ok::<(), Error>(())
    /// ```
    pub fn with_rows<S: AsRef<str>>(mut self, rows: &[S]) -> Result<Board, Error> {
        self.set_rows(rows)?;
        Ok(self)
    }

    /// Set board state from strings. Mutates the board. See
    /// [`with_rows`](Board::with_rows) for the format.
    pub fn set_rows<S: AsRef<str>>(&mut self, rows: &[S]) -> Result<(), Error> {
        if rows.len() != N {
            return Err(Error::InvalidRowCount(rows.len()));
        }
        let mut tiles = [[None; N]; N];
        let mut tile_count = 0;
        for (row, line) in rows.iter().enumerate() {
            let line = line.as_ref();
            if line.chars().count() != N {
                return Err(Error::InvalidRowLength(
                    String::from(line),
                    line.chars().count(),
                ));
            }
            for (col, c) in line.chars().enumerate() {
                tiles[row][col] = match c {
                    '.' | ' ' => None,
                    'a'..='z' => Some(Tile::blank_as(c)?),
                    _ => Some(Tile::new(c)?),
                };
                if tiles[row][col].is_some() {
                    tile_count += 1;
                }
            }
        }
        self.tiles = tiles;
        self.tile_count = tile_count;
        Ok(())
    }

    /// Return tile at (row, col), or None for an empty square or a
    /// position outside the board.
    pub fn tile_at(&self, row: usize, col: usize) -> Option<Tile> {
        if row < N && col < N {
            self.tiles[row][col]
        } else {
            None
        }
    }

    /// Put a tile on a square.
    /// ## Errors
    /// If the position lies outside the board.
    pub fn set_tile(&mut self, row: usize, col: usize, tile: Tile) -> Result<(), Error> {
        if row >= N || col >= N {
            return Err(Error::InvalidPosition { row, col });
        }
        if self.tiles[row][col].is_none() {
            self.tile_count += 1;
        }
        self.tiles[row][col] = Some(tile);
        Ok(())
    }

    /// Check if the square at (row, col) is empty. Positions outside the
    /// board count as empty.
    pub fn is_empty(&self, row: usize, col: usize) -> bool {
        self.tile_at(row, col).is_none()
    }

    /// True while no tile has been played.
    pub fn is_completely_empty(&self) -> bool {
        self.tile_count == 0
    }

    /// The premium multiplier on a square. Outside the board: no premium.
    pub fn multiplier(&self, row: usize, col: usize) -> Multiplier {
        if row < N && col < N {
            self.premiums[row][col]
        } else {
            Multiplier::None
        }
    }

    /// An anchor is an empty square where a move can hook on: the centre
    /// square while the board is empty, or any empty square orthogonally
    /// adjacent to a tile.
    pub fn is_anchor(&self, row: usize, col: usize) -> bool {
        if row >= N || col >= N || !self.is_empty(row, col) {
            return false;
        }
        if self.is_completely_empty() {
            return (row, col) == (CENTER.row, CENTER.col);
        }
        (row > 0 && !self.is_empty(row - 1, col))
            || !self.is_empty(row + 1, col)
            || (col > 0 && !self.is_empty(row, col - 1))
            || !self.is_empty(row, col + 1)
    }

    /// True if the square at `pos` has at least one occupied orthogonal
    /// neighbour.
    pub fn has_neighbor(&self, pos: Position) -> bool {
        let (row, col) = (pos.row, pos.col);
        (row > 0 && !self.is_empty(row - 1, col))
            || !self.is_empty(row + 1, col)
            || (col > 0 && !self.is_empty(row, col - 1))
            || !self.is_empty(row, col + 1)
    }

    /// All anchor squares in row-major order.
    pub fn anchors(&self) -> Vec<Position> {
        let mut anchors = Vec::new();
        for row in 0..N {
            for col in 0..N {
                if self.is_anchor(row, col) {
                    anchors.push(Position { row, col });
                }
            }
        }
        anchors
    }
}
