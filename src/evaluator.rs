use crate::rack::RACK_SIZE;
use crate::tilebag::TileBag;
use crate::tiles::{index_letter, is_vowel, letter_index, Direction, Move, PlacedTile, Tile, BLANK};
use std::cmp::Ordering;

/// Weights for the utility terms of a move.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Weights {
    /// Raw score weight
    pub score: f64,
    /// Rack leave quality weight
    pub leave: f64,
    /// Board position weight
    pub position: f64,
    /// Defensive play weight
    pub defense: f64,
    /// Board volatility weight
    pub volatility: f64,
}

impl Default for Weights {
    fn default() -> Weights {
        Weights {
            score: 1.0,
            leave: 0.3,
            position: 0.2,
            defense: 0.15,
            volatility: 0.1,
        }
    }
}

/// Baseline value of holding a tile on the rack after the move.
fn leave_baseline(letter: char) -> f64 {
    match letter {
        BLANK => 25.0,
        'S' | 'X' | 'Z' => 8.0,
        'E' => 7.0,
        'A' | 'I' => 6.5,
        'R' | 'N' | 'T' => 6.0,
        'L' => 5.5,
        'O' => 5.0,
        'D' => 4.5,
        'J' => 3.0,
        'U' | 'K' => 2.0,
        'V' | 'W' => 1.0,
        'Q' => -8.0,
        _ => 0.0,
    }
}

/// Re-ranks scored moves by a weighted utility: raw score, the quality of
/// the rack leave, how central the word sits, how much of the board it
/// blocks, and how many dangerous tiles it unloads. The weighting shifts
/// with the stage of the game, read off the remaining-tiles distribution.
#[derive(Debug, Clone)]
pub struct Evaluator {
    weights: Weights,
    remaining: TileBag,
}

impl Evaluator {
    /// An evaluator with the default weights. `remaining` is the
    /// distribution of tiles the player has not seen: bag plus opponent
    /// racks.
    pub fn new(remaining: TileBag) -> Evaluator {
        Evaluator {
            weights: Weights::default(),
            remaining,
        }
    }

    /// An evaluator with custom weights.
    pub fn with_weights(remaining: TileBag, weights: Weights) -> Evaluator {
        Evaluator { weights, remaining }
    }

    /// The `top_n` moves in descending utility order. Fills in each move's
    /// leave from `rack`. Ties break on (row, col, direction, word), so the
    /// result is a deterministic permutation of the input.
    pub fn top_moves(&self, moves: Vec<Move>, rack: &[Tile], top_n: usize) -> Vec<Move> {
        let total_remaining = self.remaining.total();
        let mut evaluated: Vec<(f64, Move)> = moves
            .into_iter()
            .map(|mut mv| {
                mv.leave = leave_after(rack, &mv.tiles_placed);
                let utility = self.utility(&mv, total_remaining);
                (utility, mv)
            })
            .collect();
        evaluated.sort_by(|(utility_a, a), (utility_b, b)| {
            utility_b
                .partial_cmp(utility_a)
                .unwrap_or(Ordering::Equal)
                .then_with(|| {
                    (a.position, a.direction, &a.word).cmp(&(b.position, b.direction, &b.word))
                })
        });
        evaluated
            .into_iter()
            .take(top_n)
            .map(|(_, mv)| mv)
            .collect()
    }

    fn utility(&self, mv: &Move, total_remaining: usize) -> f64 {
        let weights = self.stage_weights(total_remaining);
        let mut utility = f64::from(mv.score) * weights.score;
        // a leave is worthless once the bag and the opponent racks are out
        if total_remaining > 0 {
            utility += leave_value(&mv.leave) * weights.leave;
        }
        utility += position_value(mv) * weights.position;
        utility += defense_value(mv) * weights.defense;
        utility += volatility_value(mv) * weights.volatility;
        utility
    }

    fn stage_weights(&self, total_remaining: usize) -> Weights {
        let mut weights = self.weights;
        if total_remaining == 0 {
            // endgame: only points and blocking matter
            weights = Weights {
                score: 1.0,
                leave: 0.0,
                position: 0.1,
                defense: 0.2,
                volatility: 0.0,
            };
        } else if total_remaining < RACK_SIZE {
            weights.leave *= 0.5;
            weights.score *= 1.2;
        } else if total_remaining > 80 {
            weights.position *= 1.3;
            weights.leave *= 1.2;
        }
        weights
    }
}

/// The rack tiles left over after playing `tiles_placed`. Placed blanks use
/// up rack blanks first; remaining blanks keep the `?` marker.
pub fn leave_after(rack: &[Tile], tiles_placed: &[PlacedTile]) -> Vec<Tile> {
    let mut placed_counts = [0u8; 26];
    let mut blanks_placed = 0;
    for placed in tiles_placed {
        if placed.tile.is_blank {
            blanks_placed += 1;
        } else if let Some(index) = letter_index(placed.tile.letter) {
            placed_counts[index] += 1;
        }
    }

    let mut leave = Vec::new();
    let mut blanks_used = 0;
    for tile in rack {
        if tile.is_blank {
            if blanks_used < blanks_placed {
                blanks_used += 1;
            } else {
                leave.push(*tile);
            }
        } else {
            match letter_index(tile.letter) {
                Some(index) if placed_counts[index] > 0 => placed_counts[index] -= 1,
                _ => leave.push(*tile),
            }
        }
    }
    leave
}

/// Value of the tiles kept back: per-tile baselines, synergy bonuses, and
/// penalties for vowel imbalance and duplication.
pub fn leave_value(leave: &[Tile]) -> f64 {
    if leave.is_empty() {
        return 0.0;
    }

    let mut value: f64 = leave.iter().map(|tile| leave_baseline(tile.letter)).sum();
    value += synergy_bonus(leave);

    let vowels = leave
        .iter()
        .filter(|tile| !tile.is_blank && is_vowel(tile.letter))
        .count();
    let vowel_ratio = vowels as f64 / leave.len() as f64;
    if vowel_ratio > 0.6 || vowel_ratio < 0.2 {
        value -= 5.0;
    }

    let mut duplicates = [0u8; 26];
    for tile in leave {
        if !tile.is_blank {
            if let Some(index) = letter_index(tile.letter) {
                duplicates[index] += 1;
            }
        }
    }
    for (index, &count) in duplicates.iter().enumerate() {
        // spare tiles clog the rack, except for the S
        if count > 1 && index_letter(index) != 'S' {
            value -= f64::from(count - 1) * 2.0;
        }
    }

    value
}

fn synergy_bonus(leave: &[Tile]) -> f64 {
    let mut present = [false; 26];
    for tile in leave {
        if !tile.is_blank {
            if let Some(index) = letter_index(tile.letter) {
                present[index] = true;
            }
        }
    }
    let has = |letter: char| present[(letter as u8 - b'A') as usize];

    let mut bonus = 0.0;
    if has('Q') && has('U') {
        bonus += 10.0;
    }
    if has('E') && has('R') {
        bonus += 2.0;
    }
    if has('I') && has('N') && has('G') {
        bonus += 3.0;
    }
    if has('E') && has('D') {
        bonus += 2.0;
    }
    if has('E') && has('S') {
        bonus += 2.0;
    }
    bonus
}

/// How well the word sits on the board: close to the centre is worth more,
/// and ends hanging within two squares of an edge give the opponent the
/// premium lanes.
fn position_value(mv: &Move) -> f64 {
    let len = mv.word.chars().count();
    let (mut center_row, mut center_col) = (mv.position.row, mv.position.col);
    let (mut end_row, mut end_col) = (mv.position.row, mv.position.col);
    match mv.direction {
        Direction::Horizontal => {
            center_col += len / 2;
            end_col += len.saturating_sub(1);
        }
        Direction::Vertical => {
            center_row += len / 2;
            end_row += len.saturating_sub(1);
        }
    }

    let center_distance =
        (center_row as f64 - 7.0).abs() + (center_col as f64 - 7.0).abs();
    let mut value = (14.0 - center_distance) * 0.5;

    let near_edge = |x: usize| x <= 2 || x >= 12;
    if near_edge(mv.position.row)
        || near_edge(mv.position.col)
        || near_edge(end_row)
        || near_edge(end_col)
    {
        value -= 3.0;
    }
    value
}

/// Longer words block more of the board.
fn defense_value(mv: &Move) -> f64 {
    mv.word.chars().count() as f64 * 0.5
}

/// Unloading high-value tiles lowers the swing the board can produce.
fn volatility_value(mv: &Move) -> f64 {
    let high_tiles = mv
        .tiles_placed
        .iter()
        .filter(|placed| placed.tile.value >= 4)
        .count();
    2.0 * high_tiles as f64
}
