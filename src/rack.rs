use crate::error::Error;
use crate::tiles::{index_letter, letter_index, Tile, BLANK};

/// The maximum number of tiles on a rack.
pub const RACK_SIZE: usize = 7;

/// A player's rack as a letter multiset: a count per letter A..Z plus the
/// number of unassigned blanks. Consuming and restoring a tile is O(1),
/// which the generator relies on while backtracking.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Rack {
    counts: [u8; 26],
    blanks: u8,
}

impl Rack {
    /// Build a rack from tiles. Blank tiles count as blanks.
    /// ## Errors
    /// If there are more than 7 tiles, or a non-blank tile has a letter
    /// outside A..Z.
    pub fn new(tiles: &[Tile]) -> Result<Rack, Error> {
        if tiles.len() > RACK_SIZE {
            return Err(Error::RackTooLarge(tiles.len()));
        }
        let mut rack = Rack::default();
        for tile in tiles {
            if tile.is_blank {
                rack.blanks += 1;
            } else {
                let i = letter_index(tile.letter).ok_or(Error::InvalidLetter(tile.letter))?;
                rack.counts[i] += 1;
            }
        }
        Ok(rack)
    }

    /// Parse a rack from letters, with `?` for a blank.
    ///
    /// ## Examples
    /// ```
    /// # use scrabble_analyzer::{Rack, Error};
    /// let rack = Rack::from_letters("carts?")?;
    /// assert_eq!(rack.len(), 6);
    /// # Ok::<(), Error>(())
    /// ```
    pub fn from_letters(letters: &str) -> Result<Rack, Error> {
        let tiles = letters
            .chars()
            .map(|c| {
                if c == BLANK {
                    Ok(Tile::blank())
                } else {
                    Tile::new(c)
                }
            })
            .collect::<Result<Vec<Tile>, Error>>()?;
        Rack::new(&tiles)
    }

    /// Total number of tiles, blanks included.
    pub fn len(&self) -> usize {
        self.counts.iter().map(|&c| c as usize).sum::<usize>() + self.blanks as usize
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// The rack as tiles, letters in alphabetical order, blanks last.
    pub fn tiles(&self) -> Vec<Tile> {
        let mut tiles = Vec::with_capacity(self.len());
        for (i, &count) in self.counts.iter().enumerate() {
            for _ in 0..count {
                // counts only hold letters validated on the way in
                tiles.push(Tile {
                    letter: index_letter(i),
                    value: crate::tiles::letter_value(index_letter(i)),
                    is_blank: false,
                });
            }
        }
        for _ in 0..self.blanks {
            tiles.push(Tile::blank());
        }
        tiles
    }

    pub(crate) fn count(&self, index: usize) -> u8 {
        self.counts[index]
    }

    pub(crate) fn blanks(&self) -> u8 {
        self.blanks
    }

    pub(crate) fn take(&mut self, index: usize) {
        debug_assert!(self.counts[index] > 0);
        self.counts[index] -= 1;
    }

    pub(crate) fn put(&mut self, index: usize) {
        self.counts[index] += 1;
    }

    pub(crate) fn take_blank(&mut self) {
        debug_assert!(self.blanks > 0);
        self.blanks -= 1;
    }

    pub(crate) fn put_blank(&mut self) {
        self.blanks += 1;
    }
}
