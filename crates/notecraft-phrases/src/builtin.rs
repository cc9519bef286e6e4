//! Built-in clinical phrases embedded at compile time.
//!
//! All `.phrase` files under `crates/notecraft-phrases/phrases/` are
//! compiled into the binary via [`include_str!`], so the standard set is
//! available no matter where the binary runs from.
//!
//! When adding or removing `.phrase` files, update [`builtin_phrases`] and
//! [`BUILTIN_PHRASE_COUNT`] accordingly.

use crate::{PhraseEntry, PhraseError};

/// The total number of built-in phrases.
pub const BUILTIN_PHRASE_COUNT: usize = 14;

const BUILTIN_SOURCES: [(&str, &str); BUILTIN_PHRASE_COUNT] = [
    ("/dm2", include_str!("../phrases/dm2.phrase")),
    ("/htn", include_str!("../phrases/htn.phrase")),
    ("/copd", include_str!("../phrases/copd.phrase")),
    ("/epn", include_str!("../phrases/epn.phrase")),
    ("/abx", include_str!("../phrases/abx.phrase")),
    ("/plan", include_str!("../phrases/plan.phrase")),
    ("/embolieFR", include_str!("../phrases/embolieFR.phrase")),
    ("/embolieHR", include_str!("../phrases/embolieHR.phrase")),
    (
        "/embolieInstable",
        include_str!("../phrases/embolieInstable.phrase"),
    ),
    ("/eampoc", include_str!("../phrases/eampoc.phrase")),
    ("/ICStable", include_str!("../phrases/ICStable.phrase")),
    ("/ICInstable", include_str!("../phrases/ICInstable.phrase")),
    ("/DRS", include_str!("../phrases/DRS.phrase")),
    ("/date", include_str!("../phrases/date.phrase")),
];

/// Returns all built-in phrases, compiled into the binary.
///
/// # Examples
///
/// ```
/// use notecraft_phrases::builtin::{builtin_phrases, BUILTIN_PHRASE_COUNT};
///
/// let phrases = builtin_phrases().unwrap();
/// assert_eq!(phrases.len(), BUILTIN_PHRASE_COUNT);
/// assert!(phrases.iter().any(|p| p.trigger == "/abx"));
/// ```
///
/// # Errors
///
/// Returns `PhraseError::InvalidTrigger` if a built-in trigger is malformed.
pub fn builtin_phrases() -> Result<Vec<PhraseEntry>, PhraseError> {
    BUILTIN_SOURCES
        .iter()
        .map(|(trigger, body)| PhraseEntry::new(*trigger, *body))
        .collect()
}
