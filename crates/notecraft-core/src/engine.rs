//! Note engine: configuration plus phrase book, wired together.
//!
//! The engine is built once at start-up. It owns the frozen
//! [`PhraseBook`] and hands out borrowing helpers ([`Expander`],
//! [`SectionFormatter`]) configured from [`NoteConfig`].

use std::path::{Path, PathBuf};

use notecraft_phrases::{PhraseBook, PhraseBookBuilder};
use tracing::{info, warn};

use crate::expand::{Expander, Selections};
use crate::section::SectionFormatter;
use crate::wrap::{Indent, WrapOptions, wrap_paragraphs};
use crate::{CoreError, NoteConfig};

/// Expansion and formatting for one project.
#[derive(Debug, Clone)]
pub struct NoteEngine {
    project_root: PathBuf,
    config: NoteConfig,
    book: PhraseBook,
}

impl NoteEngine {
    /// Creates an engine for the given project root.
    ///
    /// Loads `.notecraft/config.yml` (falling back to defaults), then the
    /// built-in phrases if enabled, then every configured extra phrase
    /// directory that exists, in order.
    ///
    /// # Errors
    ///
    /// Returns `CoreError` if configuration parsing fails or a phrase
    /// directory contains invalid phrase files.
    pub fn new(project_root: PathBuf) -> Result<Self, CoreError> {
        let config = NoteConfig::load(&project_root)?;

        let mut builder = if config.phrases.include_builtin {
            PhraseBookBuilder::with_builtin_phrases()?
        } else {
            PhraseBook::builder()
        };

        for extra_dir in &config.phrases.extra_dirs {
            let dir = project_root.join(extra_dir);
            if dir.is_dir() {
                let count = builder.load_from_dir(&dir)?;
                info!(dir = %dir.display(), phrase_count = count, "Loaded custom phrases");
            } else if dir.exists() {
                warn!(dir = %dir.display(), "Phrase path is not a directory, skipping");
            }
        }

        let book = builder.build();
        info!(phrase_count = book.len(), "Phrase book ready");

        Ok(Self {
            project_root,
            config,
            book,
        })
    }

    /// Creates an engine from already-built parts.
    ///
    /// # Errors
    ///
    /// Returns `CoreError::ConfigError` if `config` fails validation.
    pub fn from_parts(
        project_root: PathBuf,
        config: NoteConfig,
        book: PhraseBook,
    ) -> Result<Self, CoreError> {
        config.validate()?;
        Ok(Self {
            project_root,
            config,
            book,
        })
    }

    /// Returns the project root directory.
    pub fn project_root(&self) -> &Path {
        &self.project_root
    }

    /// Returns the loaded configuration.
    pub fn config(&self) -> &NoteConfig {
        &self.config
    }

    /// Returns the phrase book.
    pub fn book(&self) -> &PhraseBook {
        &self.book
    }

    /// Returns an expander borrowing this engine's phrase book.
    pub fn expander(&self) -> Expander<'_> {
        Expander::new(&self.book)
    }

    /// Expands `trigger`, or returns `None` if it is unknown.
    pub fn expand_trigger(&self, trigger: &str, selections: &Selections) -> Option<String> {
        self.expander().expand_trigger(trigger, selections)
    }

    /// Wrap options at the configured width with the given indents.
    pub fn wrap_options(
        &self,
        first_line_indent: impl Into<Indent>,
        continuation_indent: impl Into<Indent>,
    ) -> WrapOptions {
        WrapOptions::new(self.config.format.max_width)
            .first_line_indent(first_line_indent)
            .continuation_indent(continuation_indent)
    }

    /// Wraps `text` at the configured width, keeping hard line breaks.
    ///
    /// # Errors
    ///
    /// Returns `CoreError::IndentTooWide` if an indent fills the line.
    pub fn wrap(
        &self,
        text: &str,
        first_line_indent: impl Into<Indent>,
        continuation_indent: impl Into<Indent>,
    ) -> Result<String, CoreError> {
        let opts = self.wrap_options(first_line_indent, continuation_indent);
        Ok(wrap_paragraphs(text, &opts)?.join("\n"))
    }

    /// Returns a section formatter at the configured width.
    pub fn section_formatter(&self) -> SectionFormatter {
        SectionFormatter::new(self.config.format.max_width)
    }

    /// Formats a section with the configured width and indent.
    ///
    /// # Errors
    ///
    /// Returns `CoreError` if the configured indent is unusable.
    pub fn format_section(&self, header: &str, content: &str) -> Result<String, CoreError> {
        self.section_formatter()
            .section(header, content, self.config.format.section_indent)
    }
}

#[cfg(test)]
mod tests {
    use std::fs;

    use chrono::NaiveDate;

    use super::*;
    use crate::config::{CONFIG_DIR, CONFIG_FILE};

    fn project(config_yaml: Option<&str>) -> tempfile::TempDir {
        let dir = tempfile::tempdir().unwrap();
        let config_dir = dir.path().join(CONFIG_DIR);
        fs::create_dir_all(&config_dir).unwrap();
        if let Some(yaml) = config_yaml {
            fs::write(config_dir.join(CONFIG_FILE), yaml).unwrap();
        }
        dir
    }

    #[test]
    fn test_should_load_builtins_by_default() {
        let dir = project(None);
        let engine = NoteEngine::new(dir.path().to_path_buf()).unwrap();
        assert_eq!(
            engine.book().len(),
            notecraft_phrases::builtin::BUILTIN_PHRASE_COUNT
        );
        assert_eq!(engine.config().format.max_width, 75);
    }

    #[test]
    fn test_should_override_builtin_with_project_phrase() {
        let dir = project(None);
        let phrases = dir.path().join(CONFIG_DIR).join("phrases");
        fs::create_dir_all(&phrases).unwrap();
        fs::write(phrases.join("abx.phrase"), "Start [[Pip-tazo|Cefazolin]].\n").unwrap();

        let engine = NoteEngine::new(dir.path().to_path_buf()).unwrap();
        let today = NaiveDate::from_ymd_opt(2024, 5, 1).unwrap();
        let out = engine
            .expander()
            .expand_trigger_on("/abx", &Selections::new().select(0, 1), today);
        assert_eq!(out.as_deref(), Some("Start Cefazolin."));
    }

    #[test]
    fn test_should_skip_builtins_when_disabled() {
        let dir = project(Some("phrases:\n  include_builtin: false\n  extra_dirs: []\n"));
        let engine = NoteEngine::new(dir.path().to_path_buf()).unwrap();
        assert!(engine.book().is_empty());
        assert!(engine.expand_trigger("/abx", &Selections::new()).is_none());
    }

    #[test]
    fn test_should_fail_on_invalid_phrase_file() {
        let dir = project(None);
        let phrases = dir.path().join(CONFIG_DIR).join("phrases");
        fs::create_dir_all(&phrases).unwrap();
        fs::write(phrases.join("not valid.phrase"), "x").unwrap();

        let err = NoteEngine::new(dir.path().to_path_buf()).unwrap_err();
        assert!(matches!(err, CoreError::PhraseError(_)));
    }

    #[test]
    fn test_should_format_with_configured_width_and_indent() {
        let dir = project(Some("format:\n  max_width: 12\n  section_indent: 2\n"));
        let engine = NoteEngine::new(dir.path().to_path_buf()).unwrap();
        let text = engine.format_section("Plan", "Lasix 40 IV BID").unwrap();
        assert_eq!(text, "Plan:\n  Lasix 40\n  IV BID");
    }

    #[test]
    fn test_should_expand_then_wrap_multiline_phrase() {
        let dir = project(Some("format:\n  max_width: 30\n"));
        let engine = NoteEngine::new(dir.path().to_path_buf()).unwrap();
        let today = NaiveDate::from_ymd_opt(2024, 5, 1).unwrap();
        let body = engine
            .expander()
            .expand_trigger_on("/eampoc", &Selections::new().select(0, 2), today)
            .unwrap();
        let text = engine.wrap(&body, 0usize, 2usize).unwrap();
        let lines: Vec<&str> = text.lines().collect();
        assert_eq!(lines[0], "Admission USI");
        assert_eq!(lines[1], "Sat 88-92%");
        assert!(lines.iter().all(|l| l.chars().count() <= 30));
    }

    #[test]
    fn test_should_reject_invalid_config_in_from_parts() {
        let mut config = NoteConfig::default();
        config.format.max_width = 0;
        let err = NoteEngine::from_parts(PathBuf::from("."), config, PhraseBook::default())
            .unwrap_err();
        assert!(matches!(err, CoreError::ConfigError(_)));
    }
}
