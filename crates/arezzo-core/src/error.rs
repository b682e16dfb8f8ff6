//! Error types for the arezzo-core library.

use thiserror::Error;

/// Main error type for the arezzo library.
#[derive(Error, Debug)]
pub enum ArezzoError {
    /// Document could not be read as XML.
    #[error("parse error: {0}")]
    Parse(#[from] ParseError),

    /// I/O error.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Configuration error.
    #[error("configuration error: {0}")]
    Config(String),
}

/// Errors raised while reading a document.
#[derive(Error, Debug)]
pub enum ParseError {
    /// The input is not well-formed XML.
    #[error("malformed XML at byte {position}: {message}")]
    Malformed { position: u64, message: String },
}

impl ParseError {
    pub(crate) fn malformed(position: u64, message: impl Into<String>) -> Self {
        ParseError::Malformed {
            position,
            message: message.into(),
        }
    }
}

/// Result type for the arezzo library.
pub type Result<T> = std::result::Result<T, ArezzoError>;
