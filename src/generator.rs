use crate::board::Board;
use crate::letterset::LetterSet;
use crate::lexicon::{Lexicon, NodeId};
use crate::rack::Rack;
use crate::scorer::Scorer;
use crate::tiles::{
    index_letter, letter_index, letter_value, Direction, Move, PlacedTile, Position, Tile, N,
};
use std::collections::HashSet;
use tinyvec::ArrayVec;

type CrossCheckGrid = [[LetterSet; N]; N];

/// Enumerates every legal move for a rack on a board.
///
/// The search is anchor driven: for each empty square adjacent to the game
/// (or the centre square on an empty board) and each direction, the lexicon
/// graph is traversed with the anchor square as the entry letter. The
/// traversal first grows the word backwards from the anchor along the
/// reversed-prefix edges, consuming any tiles already on the board, then
/// crosses the separator and grows the suffix forwards. A tile may only be
/// placed on a square if the perpendicular word it completes is in the
/// lexicon; candidate words are emitted at terminal nodes when both ends of
/// the span border an empty square or the edge of the board.
///
/// # Basic usage
/// ```
/// # use scrabble_analyzer::{Board, Generator, Lexicon, Rack, Error};
/// let lexicon = Lexicon::from_words(&["cat", "cats", "at", "as"])?;
/// let board = Board::new();
/// let rack = Rack::from_letters("cats")?;
/// let moves = Generator::new(&lexicon, &board).moves(&rack);
/// assert!(moves.iter().any(|m| m.word == "CATS"));
/// # Ok::<(), Error>(())
/// ```
#[derive(Debug)]
pub struct Generator<'a> {
    lexicon: &'a Lexicon,
    board: &'a Board,
    // allowed letters per empty square, indexed by main direction
    cross_checks: [CrossCheckGrid; 2],
}

impl<'a> Generator<'a> {
    pub fn new(lexicon: &'a Lexicon, board: &'a Board) -> Generator<'a> {
        let cross_checks = [
            cross_checks(lexicon, board, Direction::Horizontal),
            cross_checks(lexicon, board, Direction::Vertical),
        ];
        Generator {
            lexicon,
            board,
            cross_checks,
        }
    }

    /// All legal moves for `rack`, deduplicated, scored, and in the
    /// deterministic order of the anchor scan (row-major, horizontal before
    /// vertical, depth-first within a traversal).
    pub fn moves(&self, rack: &Rack) -> Vec<Move> {
        let mut candidates = Vec::new();
        for anchor in self.board.anchors() {
            for &dir in &[Direction::Horizontal, Direction::Vertical] {
                let mut traversal = Traversal {
                    lexicon: self.lexicon,
                    board: self.board,
                    checks: &self.cross_checks[dir as usize],
                    dir,
                    rack: rack.clone(),
                    left: ArrayVec::new(),
                    right: ArrayVec::new(),
                    placed: Vec::new(),
                    out: Vec::new(),
                };
                traversal.extend_left(
                    self.lexicon.root(),
                    anchor.row as i32,
                    anchor.col as i32,
                    anchor,
                );
                candidates.append(&mut traversal.out);
            }
        }

        let scorer = Scorer::new(self.board);
        let mut seen: HashSet<(usize, usize, Direction, String)> = HashSet::new();
        let mut moves = Vec::new();
        for candidate in candidates {
            let key = (
                candidate.position.row,
                candidate.position.col,
                candidate.direction,
                candidate.word.clone(),
            );
            if !seen.insert(key) {
                continue;
            }
            let mut mv = Move {
                word: candidate.word,
                position: candidate.position,
                direction: candidate.direction,
                score: 0,
                tiles_placed: candidate.tiles_placed,
                leave: vec![],
            };
            let score = scorer.score(&mv);
            if score == 0 {
                continue;
            }
            mv.score = score;
            moves.push(mv);
        }
        moves
    }
}

/// Allowed letters for each empty square when the main word runs in `dir`:
/// the letters whose perpendicular run through the square is in the lexicon.
/// Unconstrained squares (no perpendicular neighbours) allow everything.
fn cross_checks(lexicon: &Lexicon, board: &Board, dir: Direction) -> CrossCheckGrid {
    let crossing = dir.crossing();
    let mut checks = [[LetterSet::new(); N]; N];
    for row in 0..N {
        for col in 0..N {
            if !board.is_empty(row, col) {
                continue;
            }
            checks[row][col] = check_set(lexicon, board, Position::new(row, col), crossing);
        }
    }
    checks
}

fn check_set(lexicon: &Lexicon, board: &Board, pos: Position, crossing: Direction) -> LetterSet {
    let mut prefix = String::new();
    let (mut row, mut col) = (pos.row as i32, pos.col as i32);
    loop {
        let (r, c) = step_back(crossing, row, col);
        match tile_letter(board, r, c) {
            Some(letter) => {
                prefix.insert(0, letter);
                row = r;
                col = c;
            }
            None => break,
        }
    }
    let mut suffix = String::new();
    let (mut row, mut col) = (pos.row as i32, pos.col as i32);
    loop {
        let (r, c) = step_ahead(crossing, row, col);
        match tile_letter(board, r, c) {
            Some(letter) => {
                suffix.push(letter);
                row = r;
                col = c;
            }
            None => break,
        }
    }
    if prefix.is_empty() && suffix.is_empty() {
        return LetterSet::all();
    }
    let mut set = LetterSet::new();
    for i in 0..26 {
        let run = format!("{}{}{}", prefix, index_letter(i), suffix);
        if lexicon.contains(&run) {
            set.insert(i);
        }
    }
    set
}

fn tile_letter(board: &Board, row: i32, col: i32) -> Option<char> {
    if in_bounds(row, col) {
        board.tile_at(row as usize, col as usize).map(|t| t.letter)
    } else {
        None
    }
}

fn in_bounds(row: i32, col: i32) -> bool {
    row >= 0 && row < N as i32 && col >= 0 && col < N as i32
}

fn step_back(dir: Direction, row: i32, col: i32) -> (i32, i32) {
    match dir {
        Direction::Horizontal => (row, col - 1),
        Direction::Vertical => (row - 1, col),
    }
}

fn step_ahead(dir: Direction, row: i32, col: i32) -> (i32, i32) {
    match dir {
        Direction::Horizontal => (row, col + 1),
        Direction::Vertical => (row + 1, col),
    }
}

#[derive(Debug)]
struct Candidate {
    word: String,
    position: Position,
    direction: Direction,
    tiles_placed: Vec<PlacedTile>,
}

// The traversal context threaded through the recursion: lexicon cursor and
// board position live in the call frames, everything else in here. Rack
// mutations are balanced around every recursive call, so the rack reads the
// same before and after each branch.
#[derive(Debug)]
struct Traversal<'a> {
    lexicon: &'a Lexicon,
    board: &'a Board,
    checks: &'a CrossCheckGrid,
    dir: Direction,
    rack: Rack,
    // prefix letters in consumption order (right to left on the board)
    left: ArrayVec<[char; N]>,
    // suffix letters in board order
    right: ArrayVec<[char; N]>,
    placed: Vec<PlacedTile>,
    out: Vec<Candidate>,
}

impl<'a> Traversal<'a> {
    /// Grow the reversed prefix at (row, col), moving backwards. The first
    /// call is on the anchor square itself, so every branch covers its
    /// anchor. The separator may only be taken once the square holding the
    /// prefix's left boundary is empty or off the board; an occupied square
    /// there must be consumed into the word instead.
    fn extend_left(&mut self, node: NodeId, row: i32, col: i32, anchor: Position) {
        if in_bounds(row, col) {
            if let Some(tile) = self.board.tile_at(row as usize, col as usize) {
                if let Some(index) = letter_index(tile.letter) {
                    if let Some(next) = self.lexicon.letter_edge(node, index) {
                        self.left.push(tile.letter);
                        let (r, c) = step_back(self.dir, row, col);
                        self.extend_left(next, r, c, anchor);
                        self.left.pop();
                    }
                }
                return;
            }
        }
        if let Some(next) = self.lexicon.separator_edge(node) {
            // the word span starts one square ahead of where the prefix ended
            let (r, c) = step_ahead(self.dir, row, col);
            let start = Position::new(r as usize, c as usize);
            let (r, c) = step_ahead(self.dir, anchor.row as i32, anchor.col as i32);
            self.extend_right(next, r, c, start);
        }
        if in_bounds(row, col) {
            for (next, tile) in self.placements(node, row as usize, col as usize) {
                self.consume(tile);
                self.left.push(tile.letter);
                self.placed.push(PlacedTile {
                    position: Position::new(row as usize, col as usize),
                    tile,
                });
                let (r, c) = step_back(self.dir, row, col);
                self.extend_left(next, r, c, anchor);
                self.placed.pop();
                self.left.pop();
                self.restore(tile);
            }
        }
    }

    /// Grow the suffix at (row, col), moving forwards, emitting a candidate
    /// whenever the node is terminal and the square ahead does not continue
    /// the word.
    fn extend_right(&mut self, node: NodeId, row: i32, col: i32, start: Position) {
        if !in_bounds(row, col) {
            self.emit(node, start);
            return;
        }
        if let Some(tile) = self.board.tile_at(row as usize, col as usize) {
            if let Some(index) = letter_index(tile.letter) {
                if let Some(next) = self.lexicon.letter_edge(node, index) {
                    self.right.push(tile.letter);
                    let (r, c) = step_ahead(self.dir, row, col);
                    self.extend_right(next, r, c, start);
                    self.right.pop();
                }
            }
            return;
        }
        self.emit(node, start);
        for (next, tile) in self.placements(node, row as usize, col as usize) {
            self.consume(tile);
            self.right.push(tile.letter);
            self.placed.push(PlacedTile {
                position: Position::new(row as usize, col as usize),
                tile,
            });
            let (r, c) = step_ahead(self.dir, row, col);
            self.extend_right(next, r, c, start);
            self.placed.pop();
            self.right.pop();
            self.restore(tile);
        }
    }

    /// The ways a rack tile can legally land on the empty square at
    /// (row, col): for every rack letter passing the square's cross-check
    /// and present as an edge, and again for every letter a blank could
    /// stand in for. Letters come out in A..Z order, rack tiles before
    /// blanks, which keeps the whole search deterministic.
    fn placements(&self, node: NodeId, row: usize, col: usize) -> Vec<(NodeId, Tile)> {
        let checks = self.checks[row][col];
        let mut out = Vec::new();
        for index in 0..26 {
            if self.rack.count(index) > 0 && checks.contains(index) {
                if let Some(next) = self.lexicon.letter_edge(node, index) {
                    let letter = index_letter(index);
                    out.push((
                        next,
                        Tile {
                            letter,
                            value: letter_value(letter),
                            is_blank: false,
                        },
                    ));
                }
            }
        }
        if self.rack.blanks() > 0 {
            for index in 0..26 {
                if checks.contains(index) {
                    if let Some(next) = self.lexicon.letter_edge(node, index) {
                        out.push((
                            next,
                            Tile {
                                letter: index_letter(index),
                                value: 0,
                                is_blank: true,
                            },
                        ));
                    }
                }
            }
        }
        out
    }

    fn consume(&mut self, tile: Tile) {
        if tile.is_blank {
            self.rack.take_blank();
        } else if let Some(index) = letter_index(tile.letter) {
            self.rack.take(index);
        }
    }

    fn restore(&mut self, tile: Tile) {
        if tile.is_blank {
            self.rack.put_blank();
        } else if let Some(index) = letter_index(tile.letter) {
            self.rack.put(index);
        }
    }

    fn emit(&mut self, node: NodeId, start: Position) {
        if !self.lexicon.is_terminal(node) || self.placed.is_empty() {
            return;
        }
        let word: String = self.left.iter().rev().chain(self.right.iter()).collect();
        debug_assert!(self.lexicon.contains(&word));
        let mut tiles_placed = self.placed.clone();
        tiles_placed.sort_by_key(|placed| placed.position);
        self.out.push(Candidate {
            word,
            position: start,
            direction: self.dir,
            tiles_placed,
        });
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::board::CENTER;

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

    fn lexicon(words: &[&str]) -> Lexicon {
        Lexicon::from_words(words).unwrap()
    }

    fn covers(mv: &Move, pos: Position) -> bool {
        (0..mv.word.chars().count())
            .filter_map(|i| mv.direction.offset(mv.position, i))
            .any(|p| p == pos)
    }

    fn find<'m>(moves: &'m [Move], word: &str, row: usize, col: usize, dir: Direction) -> Option<&'m Move> {
        moves
            .iter()
            .find(|m| m.word == word && m.position == Position::new(row, col) && m.direction == dir)
    }

    // every perpendicular run of length >= 2 through a placed tile must be
    // in the lexicon once the move is played
    fn assert_cross_words_valid(lexicon: &Lexicon, board: &Board, mv: &Move) {
        let mut played = board.clone();
        for placed in &mv.tiles_placed {
            played
                .set_tile(placed.position.row, placed.position.col, placed.tile)
                .unwrap();
        }
        let crossing = mv.direction.crossing();
        for placed in &mv.tiles_placed {
            let mut run = String::new();
            let (mut row, mut col) = (placed.position.row as i32, placed.position.col as i32);
            loop {
                let (r, c) = step_back(crossing, row, col);
                if tile_letter(&played, r, c).is_none() {
                    break;
                }
                row = r;
                col = c;
            }
            loop {
                if let Some(letter) = tile_letter(&played, row, col) {
                    run.push(letter);
                } else {
                    break;
                }
                let (r, c) = step_ahead(crossing, row, col);
                row = r;
                col = c;
            }
            assert!(
                run.chars().count() < 2 || lexicon.contains(&run),
                "move {} forms invalid cross word {}",
                mv,
                run
            );
        }
    }

    #[test]
    fn test_opening_moves_cover_center() {
        let lexicon = lexicon(&["CAT", "CATS", "AT", "AS"]);
        let board = Board::new();
        let rack = Rack::from_letters("cats").unwrap();
        let moves = Generator::new(&lexicon, &board).moves(&rack);
        assert!(!moves.is_empty());
        for mv in &moves {
            assert!(covers(mv, CENTER), "{} does not cover the centre", mv);
            assert!(lexicon.contains(&mv.word));
        }
        assert!(find(&moves, "CAT", 7, 7, Direction::Horizontal).is_some());
        assert!(find(&moves, "CATS", 7, 7, Direction::Horizontal).is_some());
        assert!(find(&moves, "AT", 7, 7, Direction::Horizontal).is_some());
        assert!(find(&moves, "CAT", 7, 7, Direction::Vertical).is_some());
        assert!(find(&moves, "CATS", 7, 7, Direction::Vertical).is_some());
        assert!(find(&moves, "AT", 7, 7, Direction::Vertical).is_some());
        // a word can also end on the centre square
        assert!(find(&moves, "CAT", 7, 5, Direction::Horizontal).is_some());
    }

    #[test]
    fn test_single_hook() {
        let lexicon = lexicon(&["CAT", "CATS"]);
        let board = Board::new().with_rows(CAT_ROWS).unwrap();
        let rack = Rack::from_letters("s").unwrap();
        let moves = Generator::new(&lexicon, &board).moves(&rack);
        assert_eq!(moves.len(), 1);
        let mv = &moves[0];
        assert_eq!(mv.word, "CATS");
        assert_eq!(mv.position, Position::new(7, 7));
        assert_eq!(mv.direction, Direction::Horizontal);
        assert_eq!(mv.score, 6);
        assert_eq!(mv.tiles_placed.len(), 1);
        assert_eq!(mv.tiles_placed[0].position, Position::new(7, 10));
        assert_eq!(mv.tiles_placed[0].tile.letter, 'S');
    }

    #[test]
    fn test_prefix_and_suffix_extension() {
        let lexicon = lexicon(&["CAT", "CATS", "SCAT", "CARS", "CAR", "ARCS"]);
        let board = Board::new().with_rows(CAT_ROWS).unwrap();
        let rack = Rack::from_letters("scar").unwrap();
        let moves = Generator::new(&lexicon, &board).moves(&rack);
        assert!(find(&moves, "SCAT", 7, 6, Direction::Horizontal).is_some());
        assert!(find(&moves, "CATS", 7, 7, Direction::Horizontal).is_some());
        for mv in &moves {
            assert!(lexicon.contains(&mv.word), "invalid word {}", mv.word);
            assert_cross_words_valid(&lexicon, &board, mv);
        }
    }

    #[test]
    fn test_opening_bingo_move() {
        let lexicon = lexicon(&["STARING"]);
        let board = Board::new();
        let rack = Rack::from_letters("staring").unwrap();
        let moves = Generator::new(&lexicon, &board).moves(&rack);
        // 8 base points doubled on the centre star, plus the 50 point bonus
        let mv = find(&moves, "STARING", 7, 4, Direction::Horizontal).expect("bingo at (7,4)");
        assert_eq!(mv.score, 66);
        assert_eq!(mv.tiles_placed.len(), 7);
        // every placement of the word is a 7-tile move through the centre
        for mv in &moves {
            assert_eq!(mv.tiles_placed.len(), 7);
            assert!(covers(mv, CENTER));
        }
    }

    #[test]
    fn test_blank_stands_in_for_missing_letter() {
        let lexicon = lexicon(&["QUIT"]);
        let board = Board::new();
        let rack = Rack::from_letters("qit?abc").unwrap();
        let moves = Generator::new(&lexicon, &board).moves(&rack);
        let quits: Vec<&Move> = moves.iter().filter(|m| m.word == "QUIT").collect();
        assert!(!quits.is_empty());
        for mv in quits {
            let blank = mv
                .tiles_placed
                .iter()
                .find(|p| p.tile.is_blank)
                .expect("the U can only come from the blank");
            assert_eq!(blank.tile.letter, 'U');
            assert_eq!(blank.tile.value, 0);
        }
    }

    #[test]
    fn test_tile_conservation() {
        let lexicon = lexicon(&["CAT", "CATS", "SCAT", "AT", "AS", "TA", "ACT", "CAST"]);
        let board = Board::new().with_rows(CAT_ROWS).unwrap();
        let rack = Rack::from_letters("scat?").unwrap();
        let moves = Generator::new(&lexicon, &board).moves(&rack);
        assert!(!moves.is_empty());
        for mv in &moves {
            let mut counts = [0u8; 26];
            let mut blanks = 0;
            for placed in &mv.tiles_placed {
                if placed.tile.is_blank {
                    blanks += 1;
                } else {
                    counts[letter_index(placed.tile.letter).unwrap()] += 1;
                }
            }
            assert!(blanks <= rack.blanks());
            for (index, &count) in counts.iter().enumerate() {
                assert!(
                    count <= rack.count(index),
                    "{} uses more {} tiles than the rack holds",
                    mv,
                    index_letter(index)
                );
            }
        }
    }

    #[test]
    fn test_rack_restored_after_traversal() {
        let lexicon = lexicon(&["CAT", "CATS", "SCAT", "AT", "AS"]);
        let board = Board::new().with_rows(CAT_ROWS).unwrap();
        let rack = Rack::from_letters("scat?").unwrap();
        let generator = Generator::new(&lexicon, &board);
        for anchor in board.anchors() {
            for &dir in &[Direction::Horizontal, Direction::Vertical] {
                let mut traversal = Traversal {
                    lexicon: &lexicon,
                    board: &board,
                    checks: &generator.cross_checks[dir as usize],
                    dir,
                    rack: rack.clone(),
                    left: ArrayVec::new(),
                    right: ArrayVec::new(),
                    placed: Vec::new(),
                    out: Vec::new(),
                };
                traversal.extend_left(lexicon.root(), anchor.row as i32, anchor.col as i32, anchor);
                assert_eq!(traversal.rack, rack);
                assert!(traversal.left.is_empty());
                assert!(traversal.placed.is_empty());
            }
        }
    }

    #[test]
    fn test_no_duplicates() {
        let lexicon = lexicon(&["CAT", "CATS", "SCAT", "AT", "AS", "TA", "ACT", "CAST"]);
        let board = Board::new().with_rows(CAT_ROWS).unwrap();
        let rack = Rack::from_letters("scat").unwrap();
        let moves = Generator::new(&lexicon, &board).moves(&rack);
        let mut seen = HashSet::new();
        for mv in &moves {
            assert!(
                seen.insert((mv.position, mv.direction, mv.word.clone())),
                "duplicate move {}",
                mv
            );
        }
    }

    #[test]
    fn test_deterministic_output() {
        let lexicon = lexicon(&["CAT", "CATS", "SCAT", "AT", "AS", "TA", "ACT", "CAST"]);
        let board = Board::new().with_rows(CAT_ROWS).unwrap();
        let rack = Rack::from_letters("scat?").unwrap();
        let generator = Generator::new(&lexicon, &board);
        let first = generator.moves(&rack);
        let second = generator.moves(&rack);
        assert_eq!(first, second);
    }

    #[test]
    fn test_empty_rack_no_moves() {
        let lexicon = lexicon(&["CAT"]);
        let board = Board::new().with_rows(CAT_ROWS).unwrap();
        let rack = Rack::from_letters("").unwrap();
        let moves = Generator::new(&lexicon, &board).moves(&rack);
        assert!(moves.is_empty());
    }

    #[test]
    fn test_cross_check_blocks_bad_perpendicular_word() {
        // placing under the A of CAT vertically forms A?; only AT is legal
        let lexicon = lexicon(&["CAT", "AT", "AB"]);
        let board = Board::new().with_rows(CAT_ROWS).unwrap();
        let rack = Rack::from_letters("tb").unwrap();
        let moves = Generator::new(&lexicon, &board).moves(&rack);
        for mv in &moves {
            assert_cross_words_valid(&lexicon, &board, mv);
        }
        assert!(find(&moves, "AT", 7, 8, Direction::Vertical).is_some());
        assert!(find(&moves, "AB", 7, 8, Direction::Vertical).is_some());
        // nothing hangs a T or B off the C or T columns
        assert!(moves
            .iter()
            .all(|m| m.position.col == 8 && m.direction == Direction::Vertical));
    }
}
