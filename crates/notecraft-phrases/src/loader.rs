//! Phrase loader for custom `.phrase` files.
//!
//! Recursively walks a directory and turns every `.phrase` file into a
//! [`PhraseEntry`]. The trigger is the file stem with a leading `/`;
//! sub-directories only group files and do not appear in the trigger.

use std::collections::HashSet;
use std::path::Path;

use crate::{PhraseEntry, PhraseError};

/// File extension recognised by the loader.
pub const PHRASE_EXTENSION: &str = "phrase";

/// Recursively loads all `.phrase` files from the given directory.
///
/// The file content is the phrase body, minus a single trailing newline
/// (`\n` or `\r\n`) if present.
///
/// # Examples
///
/// Given a directory structure:
/// ```text
/// phrases/
/// ├── cardio/
/// │   └── chf.phrase
/// └── chest.phrase
/// ```
///
/// This produces phrases triggered by `/chf` and `/chest`.
///
/// # Errors
///
/// Returns `PhraseError::IoError` if the directory cannot be read,
/// `PhraseError::InvalidTrigger` if a file stem is not a valid trigger
/// name, or `PhraseError::DuplicateTrigger` if two files share a stem.
pub fn load_phrases_from_dir(dir: &Path) -> Result<Vec<PhraseEntry>, PhraseError> {
    let mut phrases = Vec::new();
    load_phrases_recursive(dir, &mut phrases)?;

    let mut seen = HashSet::new();
    for phrase in &phrases {
        if !seen.insert(phrase.trigger.as_str()) {
            return Err(PhraseError::DuplicateTrigger(phrase.trigger.clone()));
        }
    }
    Ok(phrases)
}

fn load_phrases_recursive(current: &Path, phrases: &mut Vec<PhraseEntry>) -> Result<(), PhraseError> {
    let mut entries = std::fs::read_dir(current)?.collect::<Result<Vec<_>, _>>()?;
    // read_dir order is platform dependent
    entries.sort_by_key(std::fs::DirEntry::path);

    for entry in entries {
        let path = entry.path();
        if path.is_dir() {
            load_phrases_recursive(&path, phrases)?;
        } else if path.extension().and_then(|e| e.to_str()) == Some(PHRASE_EXTENSION) {
            let stem = path
                .file_stem()
                .map(|s| s.to_string_lossy().into_owned())
                .unwrap_or_default();
            let content = std::fs::read_to_string(&path)?;
            phrases.push(PhraseEntry::new(format!("/{stem}"), strip_trailing_newline(&content))?);
        }
    }
    Ok(())
}

fn strip_trailing_newline(content: &str) -> &str {
    content
        .strip_suffix("\r\n")
        .or_else(|| content.strip_suffix('\n'))
        .unwrap_or(content)
}
