//! Note section formatting.
//!
//! Thin helpers over [`crate::wrap`] that put a `Header:` line above
//! wrapped content, wrap enumerated findings, and lay out the numbered
//! clinical-impression block.

use unicode_width::UnicodeWidthStr;

use crate::CoreError;
use crate::wrap::{DEFAULT_MAX_WIDTH, WrapOptions, wrap_lines, wrap_paragraphs};

/// First-line prefix of an impression sub-entry.
pub const SUB_ENTRY_INDENT: &str = "     - ";

/// Continuation prefix of an impression sub-entry.
pub const SUB_ENTRY_CONTINUATION: &str = "       ";

/// One numbered clinical impression with its supporting sub-entries.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Impression {
    /// The impression itself (e.g., `"Community-acquired pneumonia"`).
    pub main: String,

    /// Supporting details listed under the impression.
    pub sub_entries: Vec<String>,
}

impl Impression {
    /// Creates an impression without sub-entries.
    pub fn new(main: impl Into<String>) -> Self {
        Self {
            main: main.into(),
            sub_entries: Vec::new(),
        }
    }

    /// Adds a sub-entry.
    pub fn with_sub_entry(mut self, entry: impl Into<String>) -> Self {
        self.sub_entries.push(entry.into());
        self
    }
}

/// Formats note sections at a fixed column width.
///
/// # Examples
///
/// ```
/// use notecraft_core::section::SectionFormatter;
///
/// let fmt = SectionFormatter::new(20);
/// let text = fmt.section("Plan", "Admission étage with telemetry", 2).unwrap();
/// assert_eq!(text, "Plan:\n  Admission étage\n  with telemetry");
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SectionFormatter {
    max_width: usize,
}

impl Default for SectionFormatter {
    fn default() -> Self {
        Self::new(DEFAULT_MAX_WIDTH)
    }
}

impl SectionFormatter {
    /// Creates a formatter wrapping at `max_width` columns.
    pub fn new(max_width: usize) -> Self {
        Self { max_width }
    }

    /// Returns the column width.
    pub fn max_width(&self) -> usize {
        self.max_width
    }

    /// Builds `"<header>:\n<wrapped content>"`.
    ///
    /// Every content line is indented by `indent` spaces, continuation
    /// lines included, so the block stays aligned under the header. Hard
    /// line breaks inside `content` are kept. Empty content still yields the
    /// header, as `"<header>:\n"`.
    ///
    /// # Errors
    ///
    /// Returns `CoreError` if the width or indent is unusable.
    pub fn section(&self, header: &str, content: &str, indent: usize) -> Result<String, CoreError> {
        if content.is_empty() {
            return Ok(format!("{header}:\n"));
        }
        let opts = WrapOptions::new(self.max_width).indent(indent);
        let wrapped = wrap_paragraphs(content, &opts)?;
        Ok(format!("{header}:\n{}", wrapped.join("\n")))
    }

    /// Wraps each item on its own and joins them with line breaks.
    ///
    /// As in [`section`](Self::section), `indent` applies to every line of
    /// an item, not only its first.
    ///
    /// # Errors
    ///
    /// Returns `CoreError` if the width or indent is unusable.
    pub fn list<S: AsRef<str>>(&self, items: &[S], indent: usize) -> Result<String, CoreError> {
        let opts = WrapOptions::new(self.max_width).indent(indent);
        let mut blocks = Vec::with_capacity(items.len());
        for item in items {
            blocks.push(wrap_lines(item.as_ref(), &opts)?.join("\n"));
        }
        Ok(blocks.join("\n"))
    }

    /// Lays out numbered impressions under `header`.
    ///
    /// Blank impressions and blank sub-entries are skipped and numbering
    /// counts only the impressions that remain. Each impression hangs under
    /// its `"N. "` prefix; sub-entries use [`SUB_ENTRY_INDENT`] and
    /// [`SUB_ENTRY_CONTINUATION`].
    ///
    /// # Errors
    ///
    /// Returns `CoreError` if the width is too small for the prefixes.
    ///
    /// # Examples
    ///
    /// ```
    /// use notecraft_core::section::{Impression, SectionFormatter};
    ///
    /// let impressions = vec![
    ///     Impression::new("Pneumonie").with_sub_entry("Ceftriaxone"),
    ///     Impression::new("  "),
    ///     Impression::new("HTA"),
    /// ];
    /// let text = SectionFormatter::default()
    ///     .impressions("IMPRESSION CLINIQUE", &impressions)
    ///     .unwrap();
    /// assert_eq!(text, "IMPRESSION CLINIQUE:\n1. Pneumonie\n     - Ceftriaxone\n2. HTA");
    /// ```
    pub fn impressions(&self, header: &str, impressions: &[Impression]) -> Result<String, CoreError> {
        let mut lines = Vec::new();
        let filled = impressions.iter().filter(|i| !i.main.trim().is_empty());
        for (idx, impression) in filled.enumerate() {
            let number = format!("{}. ", idx + 1);
            let opts = WrapOptions::new(self.max_width)
                .continuation_indent(number.width())
                .first_line_indent(number);
            lines.extend(wrap_lines(&impression.main, &opts)?);

            let sub_opts = WrapOptions::new(self.max_width)
                .first_line_indent(SUB_ENTRY_INDENT)
                .continuation_indent(SUB_ENTRY_CONTINUATION);
            for entry in impression.sub_entries.iter().filter(|e| !e.trim().is_empty()) {
                lines.extend(wrap_lines(entry, &sub_opts)?);
            }
        }

        if lines.is_empty() {
            return Ok(format!("{header}:\n"));
        }
        Ok(format!("{header}:\n{}", lines.join("\n")))
    }

    /// Formats several `(header, content)` sections separated by a blank
    /// line, all with the same content indent.
    ///
    /// # Errors
    ///
    /// Returns `CoreError` if the width or indent is unusable.
    pub fn note(&self, sections: &[(&str, &str)], indent: usize) -> Result<String, CoreError> {
        let mut blocks = Vec::with_capacity(sections.len());
        for (header, content) in sections {
            let block = self.section(header, content, indent)?;
            blocks.push(block.trim_end_matches('\n').to_string());
        }
        Ok(blocks.join("\n\n"))
    }
}

/// [`SectionFormatter::section`] at the default width.
///
/// # Errors
///
/// Returns `CoreError` if `indent` leaves no room on the line.
///
/// # Examples
///
/// ```
/// use notecraft_core::section::format_section;
///
/// assert_eq!(format_section("Plan", "", 2).unwrap(), "Plan:\n");
/// assert_eq!(format_section("Dx", "HTA", 0).unwrap(), "Dx:\nHTA");
/// ```
pub fn format_section(header: &str, content: &str, indent: usize) -> Result<String, CoreError> {
    SectionFormatter::default().section(header, content, indent)
}

/// [`SectionFormatter::list`] at the default width.
///
/// # Errors
///
/// Returns `CoreError` if `indent` leaves no room on the line.
pub fn format_list<S: AsRef<str>>(items: &[S], indent: usize) -> Result<String, CoreError> {
    SectionFormatter::default().list(items, indent)
}
