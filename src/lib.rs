#![deny(clippy::used_underscore_binding, clippy::map_unwrap_or,
   clippy::int_plus_one, clippy::string_add_assign, clippy::if_not_else,
   clippy::invalid_upcast_comparisons,
   clippy::mutex_integer, clippy::mut_mut, clippy::items_after_statements,
   clippy::print_stdout, clippy::mem_forget, clippy::maybe_infinite_iter)]

//! A scrabble analysis library for Rust.
//! <br>
//! This crate takes a partially played scrabble board and a rack and returns
//! a ranked list of legal moves with full scores. Move generation walks a
//! GADDAG built from the dictionary, so every placement honours the
//! dictionary, the cross-word rule and the premium squares; a weighted
//! evaluator then reorders the raw scores by rack leave, board position and
//! game stage. Analyzing a position takes on the order of a millisecond once
//! the dictionary is built.
//!
//! # How to use `scrabble_analyzer`
//! Build a [`Lexicon`] from a word list (one word per line, A..Z), set up a
//! [`Board`] and a [`Rack`], and run the [`Generator`]; feed the result to an
//! [`Evaluator`] for the final ranking. Hosts that speak JSON can use the
//! [`api`] module, which wraps the whole pipeline behind the wire contract
//! and caches lexicons per dictionary name.
//!
//! # Basic usage
//!  ```
//! # use scrabble_analyzer::{Board, Evaluator, Generator, Lexicon, Rack, TileBag, Error};
//! let lexicon = Lexicon::from_words(&["cat", "cats", "scat", "at"])?;
//! let board = Board::new().with_rows(&[
//!     "...............",
//!     "...............",
//!     "...............",
//!     "...............",
//!     "...............",
//!     "...............",
//!     "...............",
//!     ".......CAT.....",
//!     "...............",
//!     "...............",
//!     "...............",
//!     "...............",
//!     "...............",
//!     "...............",
//!     "...............",
//! ])?;
//! let rack = Rack::from_letters("s")?;
//! let moves = Generator::new(&lexicon, &board).moves(&rack);
//! let best = Evaluator::new(TileBag::standard()).top_moves(moves, &rack.tiles(), 10);
//! assert_eq!(best[0].word, "CATS");
//! assert_eq!(best[0].score, 6);
//! # Ok::<(), Error>(())
//! ```
pub mod api;
mod board;
pub mod dictionary;
mod error;
mod evaluator;
mod generator;
mod grid;
mod letterset;
mod lexicon;
mod rack;
mod scorer;
mod tilebag;
mod tiles;

pub use crate::board::{Board, CENTER};
pub use crate::error::Error;
pub use crate::evaluator::{leave_after, leave_value, Evaluator, Weights};
pub use crate::generator::Generator;
pub use crate::grid::{Multiplier, PremiumGrid};
pub use crate::letterset::LetterSet;
pub use crate::lexicon::{Lexicon, NodeId};
pub use crate::rack::{Rack, RACK_SIZE};
pub use crate::scorer::{Scorer, BINGO_BONUS, BINGO_SIZE};
pub use crate::tilebag::{remaining_tiles, TileBag};
pub use crate::tiles::{
    letter_value, Direction, Move, PlacedTile, Position, Tile, BLANK, N,
};
