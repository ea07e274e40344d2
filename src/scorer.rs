use crate::board::{Board, CENTER};
use crate::tiles::{Direction, Move, PlacedTile, Position, N};

/// Bonus for playing all seven rack tiles in one move.
pub const BINGO_BONUS: u32 = 50;

/// Number of placed tiles that makes a move a bingo.
pub const BINGO_SIZE: usize = 7;

/// Computes the full score of a move against a board, and proves the move
/// connects to the game.
///
/// Premium squares only apply to newly placed tiles: squares under existing
/// tiles were consumed by the move that covered them. Every cross-word a
/// placed tile completes is scored as its own word, with the word premium of
/// the placed square scaling the whole cross-word. A move that violates the
/// connectivity rule scores 0 and is to be rejected by the caller.
#[derive(Debug)]
pub struct Scorer<'a> {
    board: &'a Board,
}

impl<'a> Scorer<'a> {
    pub fn new(board: &'a Board) -> Scorer<'a> {
        Scorer { board }
    }

    /// Score `mv`, or 0 when the move does not connect.
    ///
    /// On an empty board the word span must cover the centre square. On a
    /// nonempty board the move must traverse an existing tile, form a
    /// cross-word, or put a tile orthogonally next to one.
    pub fn score(&self, mv: &Move) -> u32 {
        let board_empty = self.board.is_completely_empty();
        let mut word_points = 0;
        let mut word_multiplier = 1;
        let mut uses_existing = false;
        let mut covers_center = false;

        for (i, _) in mv.word.chars().enumerate() {
            let pos = match mv.direction.offset(mv.position, i) {
                Some(pos) => pos,
                // word would cross the edge of the board
                None => return 0,
            };
            if pos == CENTER {
                covers_center = true;
            }
            if let Some(tile) = self.board.tile_at(pos.row, pos.col) {
                word_points += tile.value;
                uses_existing = true;
            } else {
                let value = mv
                    .tiles_placed
                    .iter()
                    .find(|placed| placed.position == pos)
                    .map_or(0, |placed| placed.tile.value);
                let multiplier = self.board.multiplier(pos.row, pos.col);
                word_points += value * multiplier.letter_factor();
                word_multiplier *= multiplier.word_factor();
            }
        }

        let mut score = word_points * word_multiplier;
        if mv.tiles_placed.len() == BINGO_SIZE {
            score += BINGO_BONUS;
        }
        let (cross_points, forms_cross_word) = self.cross_word_points(mv);
        score += cross_points;

        if board_empty {
            if covers_center {
                score
            } else {
                0
            }
        } else if uses_existing
            || forms_cross_word
            || mv
                .tiles_placed
                .iter()
                .any(|placed| self.board.has_neighbor(placed.position))
        {
            score
        } else {
            0
        }
    }

    /// Total points from the cross-words completed by the placed tiles, and
    /// whether any cross-word of length >= 2 was formed at all.
    fn cross_word_points(&self, mv: &Move) -> (u32, bool) {
        let crossing = mv.direction.crossing();
        let mut total = 0;
        let mut formed = false;
        for placed in &mv.tiles_placed {
            let start = self.run_start(placed.position, crossing);
            let end = self.run_end(placed.position, crossing);
            if start == end {
                continue;
            }
            formed = true;
            total += self.one_cross_word(placed, crossing, start, end);
        }
        (total, formed)
    }

    fn one_cross_word(
        &self,
        placed: &PlacedTile,
        crossing: Direction,
        start: Position,
        end: Position,
    ) -> u32 {
        let multiplier = self.board.multiplier(placed.position.row, placed.position.col);
        let mut points = 0;
        let mut pos = start;
        loop {
            if pos == placed.position {
                points += placed.tile.value * multiplier.letter_factor();
            } else if let Some(tile) = self.board.tile_at(pos.row, pos.col) {
                points += tile.value;
            }
            if pos == end {
                break;
            }
            pos = match crossing {
                Direction::Horizontal => Position::new(pos.row, pos.col + 1),
                Direction::Vertical => Position::new(pos.row + 1, pos.col),
            };
        }
        points * multiplier.word_factor()
    }

    /// First square of the maximal occupied run through `pos` in `dir`.
    fn run_start(&self, pos: Position, dir: Direction) -> Position {
        let mut cur = pos;
        loop {
            let prev = match dir {
                Direction::Horizontal if cur.col > 0 => Position::new(cur.row, cur.col - 1),
                Direction::Vertical if cur.row > 0 => Position::new(cur.row - 1, cur.col),
                _ => break,
            };
            if self.board.is_empty(prev.row, prev.col) {
                break;
            }
            cur = prev;
        }
        cur
    }

    /// Last square of the maximal occupied run through `pos` in `dir`.
    fn run_end(&self, pos: Position, dir: Direction) -> Position {
        let mut cur = pos;
        loop {
            let next = match dir {
                Direction::Horizontal if cur.col + 1 < N => Position::new(cur.row, cur.col + 1),
                Direction::Vertical if cur.row + 1 < N => Position::new(cur.row + 1, cur.col),
                _ => break,
            };
            if self.board.is_empty(next.row, next.col) {
                break;
            }
            cur = next;
        }
        cur
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::board::Board;
    use crate::tiles::{Direction, Move, PlacedTile, Position, Tile};

    const CAT_ROWS: &[&str] = &[
        "...............",
        "...............",
        "...............",
        "...............",
        "...............",
        "...............",
        "...............",
        ".......CAT.....",
        "...............",
        "...............",
        "...............",
        "...............",
        "...............",
        "...............",
        "...............",
    ];

    fn placed(row: usize, col: usize, tile: Tile) -> PlacedTile {
        PlacedTile {
            position: Position::new(row, col),
            tile,
        }
    }

    fn mv(
        word: &str,
        row: usize,
        col: usize,
        direction: Direction,
        tiles_placed: Vec<PlacedTile>,
    ) -> Move {
        Move {
            word: String::from(word),
            position: Position::new(row, col),
            direction,
            score: 0,
            tiles_placed,
            leave: vec![],
        }
    }

    #[test]
    fn test_extend_existing_word() {
        // CATS by hooking an S on CAT: 3+1+1+1, no premium at (7,10)
        let board = Board::new().with_rows(CAT_ROWS).unwrap();
        let scorer = Scorer::new(&board);
        let mv = mv(
            "CATS",
            7,
            7,
            Direction::Horizontal,
            vec![placed(7, 10, Tile::new('S').unwrap())],
        );
        assert_eq!(scorer.score(&mv), 6);
    }

    #[test]
    fn test_letter_premium_applies_to_new_tile_only() {
        // TA down through the existing A: T lands on the (6,8) double letter
        let board = Board::new().with_rows(CAT_ROWS).unwrap();
        let scorer = Scorer::new(&board);
        let mv = mv(
            "TA",
            6,
            8,
            Direction::Vertical,
            vec![placed(6, 8, Tile::new('T').unwrap())],
        );
        assert_eq!(scorer.score(&mv), 3);
    }

    #[test]
    fn test_cross_word_points() {
        // AB under CAT: main word 2 + 3 = 5 (A doubled on (8,6)),
        // cross word CB = 3 + 3 through the placed B
        let board = Board::new().with_rows(CAT_ROWS).unwrap();
        let scorer = Scorer::new(&board);
        let mv = mv(
            "AB",
            8,
            6,
            Direction::Horizontal,
            vec![
                placed(8, 6, Tile::new('A').unwrap()),
                placed(8, 7, Tile::new('B').unwrap()),
            ],
        );
        assert_eq!(scorer.score(&mv), 11);
    }

    #[test]
    fn test_cross_word_premium_scales_whole_cross_word() {
        // S on the (8,8) double letter under the A of CAT: main word
        // "AS" = 1 + 1x2, cross word "AS" = 1 + 1x2 as well
        let board = Board::new().with_rows(CAT_ROWS).unwrap();
        let scorer = Scorer::new(&board);
        let mv = mv(
            "AS",
            8,
            7,
            Direction::Horizontal,
            vec![
                placed(8, 7, Tile::new('A').unwrap()),
                placed(8, 8, Tile::new('S').unwrap()),
            ],
        );
        // main AS: A(8,7)=1, S(8,8)=1x2 -> 3; cross at (8,8): A(7,8)+Sx2 -> 3;
        // cross at (8,7): C(7,7)+A -> 4
        assert_eq!(scorer.score(&mv), 10);
    }

    #[test]
    fn test_blank_scores_zero_under_multiplier() {
        // CATS with a blank S: the blank is worth 0 wherever it lands
        let board = Board::new().with_rows(CAT_ROWS).unwrap();
        let scorer = Scorer::new(&board);
        let mv = mv(
            "CATS",
            7,
            7,
            Direction::Horizontal,
            vec![placed(7, 10, Tile::blank_as('S').unwrap())],
        );
        assert_eq!(scorer.score(&mv), 5);
    }

    #[test]
    fn test_opening_bingo() {
        // STARING at (7,4): 8 points doubled on the centre star, plus 50
        let board = Board::new();
        let scorer = Scorer::new(&board);
        let tiles: Vec<PlacedTile> = "STARING"
            .chars()
            .enumerate()
            .map(|(i, c)| placed(7, 4 + i, Tile::new(c).unwrap()))
            .collect();
        let mv = mv("STARING", 7, 4, Direction::Horizontal, tiles);
        assert_eq!(scorer.score(&mv), 66);
    }

    #[test]
    fn test_opening_bingo_over_double_letter() {
        // the same word one square further left also covers the (7,3)
        // double letter under its A
        let board = Board::new();
        let scorer = Scorer::new(&board);
        let tiles: Vec<PlacedTile> = "STARING"
            .chars()
            .enumerate()
            .map(|(i, c)| placed(7, 1 + i, Tile::new(c).unwrap()))
            .collect();
        let mv = mv("STARING", 7, 1, Direction::Horizontal, tiles);
        assert_eq!(scorer.score(&mv), 68);
    }

    #[test]
    fn test_first_move_must_cover_center() {
        let board = Board::new();
        let scorer = Scorer::new(&board);
        let mv = mv(
            "AT",
            0,
            0,
            Direction::Horizontal,
            vec![
                placed(0, 0, Tile::new('A').unwrap()),
                placed(0, 1, Tile::new('T').unwrap()),
            ],
        );
        assert_eq!(scorer.score(&mv), 0);
    }

    #[test]
    fn test_detached_move_is_rejected() {
        let board = Board::new().with_rows(CAT_ROWS).unwrap();
        let scorer = Scorer::new(&board);
        let mv = mv(
            "AT",
            0,
            0,
            Direction::Horizontal,
            vec![
                placed(0, 0, Tile::new('A').unwrap()),
                placed(0, 1, Tile::new('T').unwrap()),
            ],
        );
        assert_eq!(scorer.score(&mv), 0);
    }

    #[test]
    fn test_adjacent_placement_connects() {
        // TO above the C of CAT: the O at (6,7) completes OC downwards
        let board = Board::new().with_rows(CAT_ROWS).unwrap();
        let scorer = Scorer::new(&board);
        let mv = mv(
            "TO",
            6,
            6,
            Direction::Horizontal,
            vec![
                placed(6, 6, Tile::new('T').unwrap()),
                placed(6, 7, Tile::new('O').unwrap()),
            ],
        );
        // main: T on (6,6) double letter = 2, O = 1 -> 3;
        // cross word OC at (6,7): 1 + 3 = 4
        assert_eq!(scorer.score(&mv), 7);
    }

    #[test]
    fn test_score_is_deterministic() {
        let board = Board::new().with_rows(CAT_ROWS).unwrap();
        let scorer = Scorer::new(&board);
        let mv = mv(
            "CATS",
            7,
            7,
            Direction::Horizontal,
            vec![placed(7, 10, Tile::new('S').unwrap())],
        );
        assert_eq!(scorer.score(&mv), scorer.score(&mv));
    }
}
