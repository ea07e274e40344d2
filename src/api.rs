//! The JSON contract between the core and an embedding host: analysis
//! requests in, ranked moves out, plus batch word validation.

use crate::board::Board;
use crate::dictionary;
use crate::error::Error;
use crate::evaluator::Evaluator;
use crate::generator::Generator;
use crate::lexicon::Lexicon;
use crate::rack::Rack;
use crate::tilebag::TileBag;
use crate::tiles::{Move, Tile, N};
use log::error;
#[cfg(feature = "rayon")]
use rayon::prelude::*;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::path::Path;

/// Number of ranked moves an analysis returns.
pub const DEFAULT_TOP_N: usize = 10;

/// A tile as it crosses the host boundary. An empty `letter` is an empty
/// board cell; a blank rack tile has letter `""` or `"?"`.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct TileJson {
    pub letter: String,
    pub value: u32,
    pub is_blank: bool,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AnalysisRequest {
    /// 15 rows of 15 cells
    pub board: Vec<Vec<TileJson>>,
    /// Up to 7 tiles
    pub rack: Vec<TileJson>,
    /// Unseen tile distribution, `?` for blanks
    #[serde(default)]
    pub remaining_tiles: HashMap<String, usize>,
    pub dictionary: String,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AnalysisResponse {
    pub moves: Vec<MoveJson>,
    #[serde(skip_serializing_if = "Option::is_none", default)]
    pub error: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PositionJson {
    pub row: usize,
    pub col: usize,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PlacedTileJson {
    pub position: PositionJson,
    pub tile: TileJson,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MoveJson {
    pub word: String,
    pub position: PositionJson,
    /// `"H"` or `"V"`
    pub direction: String,
    pub score: u32,
    pub tiles_placed: Vec<PlacedTileJson>,
    pub leave: Vec<TileJson>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ValidationRequest {
    pub words: Vec<String>,
    pub dictionary: String,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ValidationResponse {
    pub results: Vec<WordValidation>,
    pub all_valid: bool,
    #[serde(skip_serializing_if = "Vec::is_empty", default)]
    pub invalid_words: Vec<String>,
    #[serde(skip_serializing_if = "Option::is_none", default)]
    pub error: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WordValidation {
    pub word: String,
    pub is_valid: bool,
}

/// Analyze a position with an already-built lexicon and return the ranked
/// moves. An empty rack yields an empty move list and no error; any failure
/// is reported in the `error` field with no partial results.
pub fn analyze(request: &AnalysisRequest, lexicon: &Lexicon) -> AnalysisResponse {
    match analyze_moves(request, lexicon) {
        Ok(moves) => AnalysisResponse { moves, error: None },
        Err(err) => {
            error!("analysis failed: {}", err);
            AnalysisResponse {
                moves: vec![],
                error: Some(err.to_string()),
            }
        }
    }
}

/// Like [`analyze`], resolving `request.dictionary` through the process-wide
/// [`dictionary`](crate::dictionary) store with word lists in
/// `dictionary_dir`.
pub fn analyze_request(request: &AnalysisRequest, dictionary_dir: &Path) -> AnalysisResponse {
    match dictionary::load(&request.dictionary, dictionary_dir) {
        Ok(lexicon) => analyze(request, &lexicon),
        Err(err) => {
            error!("dictionary {} unavailable: {}", request.dictionary, err);
            AnalysisResponse {
                moves: vec![],
                error: Some(err.to_string()),
            }
        }
    }
}

/// String-level adapter around [`analyze`] for hosts that hand over raw
/// JSON. Parse failures come back in the response's `error` field.
pub fn analyze_json(json: &str, lexicon: &Lexicon) -> String {
    let response = match serde_json::from_str::<AnalysisRequest>(json) {
        Ok(request) => analyze(&request, lexicon),
        Err(err) => AnalysisResponse {
            moves: vec![],
            error: Some(format!("failed to parse request: {}", err)),
        },
    };
    to_json(&response)
}

fn analyze_moves(request: &AnalysisRequest, lexicon: &Lexicon) -> Result<Vec<MoveJson>, Error> {
    if request.rack.is_empty() {
        return Ok(vec![]);
    }
    let board = board_from(&request.board)?;
    let rack_tiles = request
        .rack
        .iter()
        .map(rack_tile)
        .collect::<Result<Vec<Tile>, Error>>()?;
    let rack = Rack::new(&rack_tiles)?;
    let remaining = TileBag::from_counts(
        request
            .remaining_tiles
            .iter()
            .filter_map(|(letter, &count)| letter.chars().next().map(|c| (c, count))),
    );

    let moves = Generator::new(lexicon, &board).moves(&rack);
    let best = Evaluator::new(remaining).top_moves(moves, &rack_tiles, DEFAULT_TOP_N);
    Ok(best.iter().map(move_json).collect())
}

/// Validate words against the lexicon. Lowercase letters denote blank
/// assignments and are folded before lookup.
pub fn validate_words(request: &ValidationRequest, lexicon: &Lexicon) -> ValidationResponse {
    if request.words.is_empty() {
        return ValidationResponse {
            error: Some(String::from("no words to validate")),
            ..ValidationResponse::default()
        };
    }

    let words = &request.words;
    let iter_words;
    #[cfg(not(feature = "rayon"))]
    {
        iter_words = words.iter();
    }
    #[cfg(feature = "rayon")]
    {
        iter_words = words.par_iter();
    }
    let results: Vec<WordValidation> = iter_words
        .map(|word| WordValidation {
            word: word.clone(),
            is_valid: lexicon.contains(word),
        })
        .collect();

    let invalid_words: Vec<String> = results
        .iter()
        .filter(|result| !result.is_valid)
        .map(|result| result.word.clone())
        .collect();
    ValidationResponse {
        all_valid: invalid_words.is_empty(),
        results,
        invalid_words,
        error: None,
    }
}

/// String-level adapter around [`validate_words`].
pub fn validate_words_json(json: &str, lexicon: &Lexicon) -> String {
    let response = match serde_json::from_str::<ValidationRequest>(json) {
        Ok(request) => validate_words(&request, lexicon),
        Err(err) => ValidationResponse {
            error: Some(format!("failed to parse request: {}", err)),
            ..ValidationResponse::default()
        },
    };
    to_json(&response)
}

fn to_json<T: Serialize>(value: &T) -> String {
    serde_json::to_string(value)
        .unwrap_or_else(|err| format!(r#"{{"moves":[],"error":"{}"}}"#, err))
}

fn board_from(rows: &[Vec<TileJson>]) -> Result<Board, Error> {
    if rows.len() != N {
        return Err(Error::InvalidRowCount(rows.len()));
    }
    let mut board = Board::new();
    for (row, cells) in rows.iter().enumerate() {
        if cells.len() != N {
            return Err(Error::InvalidRowLength(format!("row {}", row), cells.len()));
        }
        for (col, cell) in cells.iter().enumerate() {
            if cell.letter.is_empty() {
                continue;
            }
            let letter = first_char(&cell.letter)?;
            let tile = if cell.is_blank {
                Tile::blank_as(letter)?
            } else {
                Tile::new(letter)?
            };
            board.set_tile(row, col, tile)?;
        }
    }
    Ok(board)
}

fn rack_tile(tile: &TileJson) -> Result<Tile, Error> {
    if tile.letter.is_empty() || tile.letter == "?" || tile.is_blank {
        return Ok(Tile::blank());
    }
    Tile::new(first_char(&tile.letter)?)
}

fn first_char(s: &str) -> Result<char, Error> {
    s.chars().next().ok_or(Error::InvalidLetter(' '))
}

fn tile_json(tile: &Tile) -> TileJson {
    TileJson {
        letter: tile.letter.to_string(),
        value: tile.value,
        is_blank: tile.is_blank,
    }
}

fn move_json(mv: &Move) -> MoveJson {
    MoveJson {
        word: mv.word.clone(),
        position: PositionJson {
            row: mv.position.row,
            col: mv.position.col,
        },
        direction: mv.direction.to_string(),
        score: mv.score,
        tiles_placed: mv
            .tiles_placed
            .iter()
            .map(|placed| PlacedTileJson {
                position: PositionJson {
                    row: placed.position.row,
                    col: placed.position.col,
                },
                tile: tile_json(&placed.tile),
            })
            .collect(),
        leave: mv.leave.iter().map(tile_json).collect(),
    }
}
