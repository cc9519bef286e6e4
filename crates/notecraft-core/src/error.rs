//! Error types for the core engine.
//!
//! Defines `CoreError` as the primary error type for all operations
//! within `notecraft-core`.

use thiserror::Error;

/// Error type for notecraft-core operations.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum CoreError {
    /// An error from the phrase book.
    #[error("Phrase error: {0}")]
    PhraseError(#[from] notecraft_phrases::PhraseError),

    /// A wrap width of zero columns.
    #[error("Invalid width: {0} (must be at least 1 column)")]
    InvalidWidth(usize),

    /// An indent that leaves no room for content on its line.
    #[error("Indent {indent:?} leaves no room within {max_width} columns")]
    IndentTooWide { indent: String, max_width: usize },

    /// A character wider than the columns left after the indent.
    #[error("Character {ch:?} is {width} columns wide but only {available} fit after the indent")]
    CharTooWide {
        ch: char,
        width: usize,
        available: usize,
    },

    /// An I/O error from file system operations.
    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    /// A configuration error (invalid or unreadable config).
    #[error("Config error: {0}")]
    ConfigError(String),
}
