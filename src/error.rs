//! Error types for the tictactoe-rl crate

use thiserror::Error;

/// Main error type for the tictactoe-rl crate
#[derive(Error, Debug)]
#[non_exhaustive]
pub enum Error {
    #[error("no valid moves available")]
    NoValidMoves,

    #[error("invalid state encoding: expected {expected} cells, got {got} in '{context}'")]
    InvalidEncoding {
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

    #[error("invalid action ({row}, {col}): {reason}")]
    InvalidAction {
        row: usize,
        col: usize,
        reason: String,
    },

    #[error("invalid configuration: {message}")]
    InvalidConfiguration { message: String },

    #[error("failed to {operation}: {source}")]
    Io {
        operation: String,
        #[source]
        source: std::io::Error,
    },

    #[error("serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("failed to parse configuration: {0}")]
    ConfigParse(#[from] toml::de::Error),

    #[error("progress bar template error: {message}")]
    ProgressBarTemplate { message: String },
}

/// Convenience type alias for Results using the crate's Error type
pub type Result<T> = std::result::Result<T, Error>;

impl From<std::io::Error> for Error {
    fn from(source: std::io::Error) -> Self {
        Error::Io {
            operation: "IO operation".to_string(),
            source,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn invalid_action_display() {
        let err = Error::InvalidAction {
            row: 3,
            col: 1,
            reason: "out of bounds".to_string(),
        };
        assert_eq!(err.to_string(), "invalid action (3, 1): out of bounds");
    }

    #[test]
    fn io_error_converts_with_generic_operation() {
        let err: Error = std::io::Error::other("disk full").into();
        assert!(err.to_string().starts_with("failed to IO operation"));
    }
}
