//! Errors for malformed coordinate and move text.

use thiserror::Error;

/// Errors raised while parsing squares, files, ranks, move ids or SAN text.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ParseError {
    #[error("invalid square: '{0}'")]
    InvalidSquare(String),

    #[error("invalid file: '{0}'")]
    InvalidFile(char),

    #[error("invalid rank: '{0}'")]
    InvalidRank(char),

    #[error("invalid SAN '{text}': {reason}")]
    InvalidSan { text: String, reason: String },

    #[error("invalid move id: {0:#06x}")]
    InvalidMoveId(u16),
}

impl ParseError {
    /// Builds a [`ParseError::InvalidSan`] for `text`.
    pub fn invalid_san(text: &str, reason: impl Into<String>) -> Self {
        ParseError::InvalidSan {
            text: text.to_string(),
            reason: reason.into(),
        }
    }
}
