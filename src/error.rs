use thiserror::Error;

#[derive(Error, Debug)]
/// Errors that can be returned
pub enum Error {
    /// Error reading a word list
    #[error("Wordfile \"{path}\" could not be read")]
    ReadError {
        path: String,
        source: std::io::Error,
    },

    /// Dictionary name not in the registry
    #[error("Unknown dictionary \"{0}\"")]
    UnknownDictionary(String),

    /// A letter outside A..Z (or the blank marker where one is allowed)
    #[error("Invalid letter '{0}'")]
    InvalidLetter(char),

    /// Error parsing board state from strings
    #[error("Invalid number of rows {0} (expect 15)")]
    InvalidRowCount(usize),

    /// Parsing a row on the board needs 15 cells
    #[error("Invalid row \"{0}\": length {1} (expect 15)")]
    InvalidRowLength(String, usize),

    /// Error parsing a premium grid cell
    #[error("Invalid grid cell: \"{0}\"")]
    GridParseError(String),

    /// Attempt to place a tile outside the board
    #[error("Position ({row},{col}) is outside the board")]
    InvalidPosition { row: usize, col: usize },

    /// A rack holds at most 7 tiles
    #[error("Rack with {0} tiles exceeds the maximum of 7")]
    RackTooLarge(usize),
}
