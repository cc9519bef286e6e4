//! Error types for the phrase book.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum PhraseError {
    #[error("Invalid trigger '{0}': expected '/' followed by letters, digits or '_'")]
    InvalidTrigger(String),

    #[error("Duplicate trigger: {0}")]
    DuplicateTrigger(String),

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),
}
