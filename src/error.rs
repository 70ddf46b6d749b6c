//! Error types for the tally crate

use thiserror::Error;

/// Main error type for the tally crate
#[derive(Error, Debug)]
#[non_exhaustive]
pub enum Error {
    #[error("invalid configuration: {message}")]
    InvalidConfiguration { message: String },

    #[error("player {player} has no available states and the position was not reported as a draw")]
    NoAvailableStates { player: usize },

    #[error("candidate weight {value} must be non-negative and finite")]
    InvalidWeight { value: f64 },

    #[error("all {candidates} candidate weights are zero; cannot sample a move")]
    SamplingExhausted { candidates: usize },

    #[error("malformed record row at line {line}: {message}")]
    MalformedRecordRow { line: usize, message: String },

    #[error("failed to {operation}: {source}")]
    Io {
        operation: String,
        #[source]
        source: std::io::Error,
    },

    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    #[error("failed to {operation}: {message}")]
    SerializationContext { operation: String, message: String },

    #[error("progress bar template error: {message}")]
    ProgressBarTemplate { message: String },

    #[error("board string too short: expected {expected} cells, got {got} in '{context}'")]
    InvalidBoardLength {
        expected: usize,
        got: usize,
        context: String,
    },

    #[error("invalid character '{character}' at position {position} in '{context}'")]
    InvalidCellCharacter {
        character: char,
        position: usize,
        context: String,
    },
}

/// Convenience type alias for Results using the crate's Error type
pub type Result<T> = std::result::Result<T, Error>;
