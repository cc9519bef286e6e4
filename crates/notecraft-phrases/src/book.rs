//! Phrase book implementation.
//!
//! A `PhraseBookBuilder` collects entries from the built-in set and from
//! custom phrase directories; `build` freezes them into a read-only
//! `PhraseBook` that can be shared freely between threads.

use std::collections::HashMap;
use std::path::Path;

use tracing::debug;

use crate::builtin::builtin_phrases;
use crate::loader::load_phrases_from_dir;
use crate::{PhraseEntry, PhraseError};

/// Read-only mapping from trigger to template body.
///
/// Construct one at start-up through [`PhraseBookBuilder`] (or
/// [`with_builtin_phrases`](Self::with_builtin_phrases)) and pass it by
/// reference to whatever needs lookups.
#[derive(Clone, Default)]
pub struct PhraseBook {
    entries: HashMap<String, PhraseEntry>,
}

impl PhraseBook {
    /// Starts an empty builder.
    pub fn builder() -> PhraseBookBuilder {
        PhraseBookBuilder::default()
    }

    /// Returns a phrase book containing only the built-in phrases.
    ///
    /// # Errors
    ///
    /// Returns `PhraseError` if a built-in phrase is invalid, which would
    /// indicate a packaging bug.
    pub fn with_builtin_phrases() -> Result<Self, PhraseError> {
        Ok(PhraseBookBuilder::with_builtin_phrases()?.build())
    }

    /// Looks up the template body for an exact, case-sensitive trigger.
    ///
    /// Unknown triggers are an ordinary outcome and yield `None`, which is
    /// distinct from a phrase whose body is empty.
    ///
    /// # Examples
    ///
    /// ```
    /// use notecraft_phrases::{PhraseBook, PhraseEntry};
    ///
    /// let mut builder = PhraseBook::builder();
    /// builder.add_entry(PhraseEntry::new("/blank", "").unwrap()).unwrap();
    /// let book = builder.build();
    ///
    /// assert_eq!(book.lookup("/blank"), Some(""));
    /// assert_eq!(book.lookup("/unknown"), None);
    /// assert_eq!(book.lookup("/BLANK"), None);
    /// ```
    pub fn lookup(&self, trigger: &str) -> Option<&str> {
        self.entries.get(trigger).map(|e| e.body.as_str())
    }

    /// Returns the entry registered under `trigger`, if any.
    pub fn get(&self, trigger: &str) -> Option<&PhraseEntry> {
        self.entries.get(trigger)
    }

    /// Returns triggers starting with `prefix`, ignoring case, sorted.
    ///
    /// This backs autocomplete; [`lookup`](Self::lookup) stays exact.
    ///
    /// # Examples
    ///
    /// ```
    /// use notecraft_phrases::PhraseBook;
    ///
    /// let book = PhraseBook::with_builtin_phrases().unwrap();
    /// assert_eq!(book.suggest("/emb"), vec!["/embolieFR", "/embolieHR", "/embolieInstable"]);
    /// ```
    pub fn suggest(&self, prefix: &str) -> Vec<&str> {
        let prefix = prefix.to_lowercase();
        let mut matches: Vec<&str> = self
            .entries
            .keys()
            .filter(|t| t.to_lowercase().starts_with(&prefix))
            .map(String::as_str)
            .collect();
        matches.sort_unstable();
        matches
    }

    /// Returns every trigger, sorted.
    pub fn triggers(&self) -> Vec<&str> {
        let mut triggers: Vec<&str> = self.entries.keys().map(String::as_str).collect();
        triggers.sort_unstable();
        triggers
    }

    /// Returns the number of phrases.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Returns `true` if the book holds no phrases.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl std::fmt::Debug for PhraseBook {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("PhraseBook")
            .field("phrase_count", &self.entries.len())
            .field("triggers", &self.triggers())
            .finish()
    }
}

/// Mutable staging area for a [`PhraseBook`].
#[derive(Debug, Default)]
pub struct PhraseBookBuilder {
    entries: HashMap<String, PhraseEntry>,
}

impl PhraseBookBuilder {
    /// Starts a builder pre-loaded with the built-in phrases.
    ///
    /// # Errors
    ///
    /// Returns `PhraseError` if the built-in set contains an invalid or
    /// duplicate trigger.
    pub fn with_builtin_phrases() -> Result<Self, PhraseError> {
        let mut builder = Self::default();
        for entry in builtin_phrases()? {
            builder.add_entry(entry)?;
        }
        Ok(builder)
    }

    /// Registers a new phrase.
    ///
    /// # Errors
    ///
    /// Returns `PhraseError::DuplicateTrigger` if the trigger is already
    /// registered.
    pub fn add_entry(&mut self, entry: PhraseEntry) -> Result<(), PhraseError> {
        if self.entries.contains_key(&entry.trigger) {
            return Err(PhraseError::DuplicateTrigger(entry.trigger));
        }
        self.entries.insert(entry.trigger.clone(), entry);
        Ok(())
    }

    /// Registers a phrase, replacing any existing one with the same trigger.
    ///
    /// Returns the replaced entry.
    pub fn override_entry(&mut self, entry: PhraseEntry) -> Option<PhraseEntry> {
        let replaced = self.entries.insert(entry.trigger.clone(), entry);
        if let Some(old) = &replaced {
            debug!(trigger = %old.trigger, "Phrase overridden");
        }
        replaced
    }

    /// Loads all `.phrase` files under `dir`, overriding existing triggers.
    ///
    /// # Errors
    ///
    /// Returns `PhraseError::IoError` if the directory cannot be read, or
    /// `PhraseError::InvalidTrigger`/`DuplicateTrigger` for bad file names.
    pub fn load_from_dir(&mut self, dir: &Path) -> Result<usize, PhraseError> {
        let entries = load_phrases_from_dir(dir)?;
        let count = entries.len();
        for entry in entries {
            self.override_entry(entry);
        }
        Ok(count)
    }

    /// Returns `true` if `trigger` is already staged.
    pub fn contains(&self, trigger: &str) -> bool {
        self.entries.contains_key(trigger)
    }

    /// Freezes the staged phrases.
    pub fn build(self) -> PhraseBook {
        PhraseBook {
            entries: self.entries,
        }
    }
}

#[cfg(test)]
mod tests {
    use std::fs;

    use super::*;

    fn entry(trigger: &str, body: &str) -> PhraseEntry {
        PhraseEntry::new(trigger, body).unwrap()
    }

    #[test]
    fn test_should_reject_duplicate_trigger() {
        let mut builder = PhraseBook::builder();
        builder.add_entry(entry("/htn", "Hypertension")).unwrap();
        let err = builder.add_entry(entry("/htn", "HTA")).unwrap_err();
        assert!(matches!(err, PhraseError::DuplicateTrigger(t) if t == "/htn"));
    }

    #[test]
    fn test_should_treat_triggers_as_case_sensitive() {
        let mut builder = PhraseBook::builder();
        builder.add_entry(entry("/htn", "lower")).unwrap();
        builder.add_entry(entry("/HTN", "upper")).unwrap();
        let book = builder.build();
        assert_eq!(book.lookup("/htn"), Some("lower"));
        assert_eq!(book.lookup("/HTN"), Some("upper"));
    }

    #[test]
    fn test_should_return_replaced_entry_on_override() {
        let mut builder = PhraseBook::builder();
        builder.add_entry(entry("/htn", "Hypertension")).unwrap();
        let old = builder.override_entry(entry("/htn", "HTA essentielle"));
        assert_eq!(old.map(|e| e.body), Some("Hypertension".to_string()));
        assert_eq!(builder.build().lookup("/htn"), Some("HTA essentielle"));
    }

    #[test]
    fn test_should_not_do_prefix_matching_in_lookup() {
        let book = PhraseBook::with_builtin_phrases().unwrap();
        assert!(book.lookup("/ab").is_none());
        assert!(book.lookup("/abx").is_some());
    }

    #[test]
    fn test_should_suggest_case_insensitively() {
        let book = PhraseBook::with_builtin_phrases().unwrap();
        assert_eq!(book.suggest("/ics"), vec!["/ICStable"]);
        assert_eq!(book.suggest("/IC"), vec!["/ICInstable", "/ICStable"]);
        assert!(book.suggest("/zzz").is_empty());
    }

    #[test]
    fn test_should_suggest_everything_for_bare_slash() {
        let book = PhraseBook::with_builtin_phrases().unwrap();
        assert_eq!(book.suggest("/").len(), book.len());
    }

    #[test]
    fn test_should_override_builtins_from_directory() {
        let dir = tempfile::tempdir().unwrap();
        fs::write(dir.path().join("htn.phrase"), "HTA [[grade 1|grade 2]]\n").unwrap();
        fs::write(dir.path().join("chest.phrase"), "Chest clear").unwrap();

        let mut builder = PhraseBookBuilder::with_builtin_phrases().unwrap();
        let loaded = builder.load_from_dir(dir.path()).unwrap();
        let book = builder.build();

        assert_eq!(loaded, 2);
        assert_eq!(book.lookup("/htn"), Some("HTA [[grade 1|grade 2]]"));
        assert_eq!(book.lookup("/chest"), Some("Chest clear"));
        assert_eq!(book.lookup("/copd"), Some("Chronic Obstructive Pulmonary Disease"));
    }

    #[test]
    fn test_should_share_book_across_threads() {
        let book = std::sync::Arc::new(PhraseBook::with_builtin_phrases().unwrap());
        let handles: Vec<_> = (0..4)
            .map(|_| {
                let book = std::sync::Arc::clone(&book);
                std::thread::spawn(move || book.lookup("/abx").map(str::to_string))
            })
            .collect();
        for handle in handles {
            assert!(handle.join().unwrap().is_some());
        }
    }
}
