//! Phrase entry data structure and trigger syntax.
//!
//! Contains `PhraseEntry`, the pairing of a slash trigger with its raw
//! template body, plus the helpers that recognise triggers in free text.

use std::ops::Range;
use std::sync::LazyLock;

use regex::Regex;
use serde::{Deserialize, Serialize};

use crate::PhraseError;

/// A whole, valid trigger: `/` followed by one or more word characters.
static TRIGGER_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^/[A-Za-z0-9_]+$").expect("trigger pattern is valid"));

/// A partially typed trigger ending at the end of the haystack.
static TRAILING_TRIGGER_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"/[A-Za-z0-9_]*$").expect("trailing trigger pattern is valid"));

/// A slash trigger paired with its raw template body.
///
/// The body is stored verbatim: choice groups such as `[[a|b]]` are not
/// interpreted here.
///
/// # Examples
///
/// ```
/// use notecraft_phrases::PhraseEntry;
///
/// let entry = PhraseEntry::new("/abx", "Start [[Tazocin|Meropenem]].").unwrap();
/// assert_eq!(entry.trigger, "/abx");
/// assert!(entry.body.contains("[[Tazocin"));
///
/// assert!(PhraseEntry::new("abx", "missing slash").is_err());
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PhraseEntry {
    /// Case-sensitive trigger (e.g., `"/abx"`, `"/ICStable"`).
    pub trigger: String,

    /// Raw template body with literal text and choice groups.
    pub body: String,
}

impl PhraseEntry {
    /// Creates a new entry after validating the trigger.
    ///
    /// # Errors
    ///
    /// Returns `PhraseError::InvalidTrigger` if `trigger` is not a slash
    /// followed by ASCII letters, digits or underscores.
    pub fn new(trigger: impl Into<String>, body: impl Into<String>) -> Result<Self, PhraseError> {
        let trigger = trigger.into();
        validate_trigger(&trigger)?;
        Ok(Self {
            trigger,
            body: body.into(),
        })
    }
}

/// Checks that `trigger` has the `/name` shape used for phrase lookup.
///
/// # Errors
///
/// Returns `PhraseError::InvalidTrigger` when the shape does not match.
pub fn validate_trigger(trigger: &str) -> Result<(), PhraseError> {
    if TRIGGER_RE.is_match(trigger) {
        Ok(())
    } else {
        Err(PhraseError::InvalidTrigger(trigger.to_string()))
    }
}

/// A slash phrase found immediately before the cursor.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TriggerSpan {
    /// The phrase text, including the leading `/`. May be just `"/"`.
    pub phrase: String,

    /// Byte range of the phrase within the searched text.
    pub range: Range<usize>,
}

/// Finds the slash phrase that ends exactly at byte offset `cursor`.
///
/// Returns `None` when there is no phrase at the cursor, or when `cursor`
/// is past the end of `text` or not on a character boundary.
///
/// # Examples
///
/// ```
/// use notecraft_phrases::trigger_at_cursor;
///
/// let text = "Plan: /ab and more";
/// let span = trigger_at_cursor(text, 9).unwrap();
/// assert_eq!(span.phrase, "/ab");
/// assert_eq!(span.range, 6..9);
///
/// assert!(trigger_at_cursor(text, 4).is_none());
/// ```
pub fn trigger_at_cursor(text: &str, cursor: usize) -> Option<TriggerSpan> {
    let before = text.get(..cursor)?;
    let found = TRAILING_TRIGGER_RE.find(before)?;
    Some(TriggerSpan {
        phrase: found.as_str().to_string(),
        range: found.range(),
    })
}
