use crate::board::Board;
use crate::tiles::{Tile, BLANK, N};
use multiset::HashMultiSet;
use std::iter::FromIterator;
use std::ops::Deref;
use std::ops::Sub;

/// Number of each letter in the standard english tile set, A..Z.
const STANDARD_COUNTS: [usize; 26] = [
    9, 2, 2, 4, 12, 2, 3, 2, 9, 1, 1, 4, 2, 6, 8, 2, 1, 6, 4, 6, 4, 2, 2, 1, 2, 1,
];

const STANDARD_BLANKS: usize = 2;

/// Keeps track of tiles by letter, with `?` for blanks. Used for the
/// distribution of unseen tiles (bag plus opponent racks) that drives the
/// evaluator's game-stage weighting.
#[derive(Debug, Clone)]
pub struct TileBag(HashMultiSet<char>);

impl Deref for TileBag {
    type Target = HashMultiSet<char>;

    fn deref(&self) -> &Self::Target {
        &self.0
    }
}

impl Default for TileBag {
    fn default() -> Self {
        TileBag::new()
    }
}

impl Sub for TileBag {
    type Output = Self;
    fn sub(self, other: Self) -> Self::Output {
        Self(self.0 - other.0)
    }
}

impl TileBag {
    /// An empty bag.
    pub fn new() -> Self {
        Self(HashMultiSet::new())
    }

    /// The full standard english set: 98 letters plus two blanks.
    pub fn standard() -> Self {
        let mut bag = HashMultiSet::new();
        for (index, &count) in STANDARD_COUNTS.iter().enumerate() {
            bag.insert_times((b'A' + index as u8) as char, count);
        }
        bag.insert_times(BLANK, STANDARD_BLANKS);
        Self(bag)
    }

    /// Build a bag from per-letter counts.
    pub fn from_counts<I: IntoIterator<Item = (char, usize)>>(counts: I) -> Self {
        let mut bag = HashMultiSet::new();
        for (letter, count) in counts {
            bag.insert_times(letter.to_ascii_uppercase(), count);
        }
        Self(bag)
    }

    /// Total number of tiles in the bag, blanks included.
    pub fn total(&self) -> usize {
        self.0.len()
    }
}

impl FromIterator<char> for TileBag {
    fn from_iter<I: IntoIterator<Item = char>>(iter: I) -> Self {
        let mut bag = HashMultiSet::new();
        for letter in iter {
            bag.insert(letter.to_ascii_uppercase());
        }
        Self(bag)
    }
}

/// The tiles not yet seen by the player: the standard set minus the board
/// and the player's own rack. Blanks on the board count as blanks.
pub fn remaining_tiles(board: &Board, rack: &[Tile]) -> TileBag {
    let mut used = HashMultiSet::new();
    for row in 0..N {
        for col in 0..N {
            if let Some(tile) = board.tile_at(row, col) {
                used.insert(if tile.is_blank { BLANK } else { tile.letter });
            }
        }
    }
    for tile in rack {
        used.insert(if tile.is_blank { BLANK } else { tile.letter });
    }
    TileBag(TileBag::standard().0 - used)
}
