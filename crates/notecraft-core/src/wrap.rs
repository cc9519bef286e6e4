//! Fixed-width line wrapping with independent indents.
//!
//! Text is split on single spaces and packed greedily into lines of at
//! most `max_width` columns. The first line starts with the first-line
//! indent, every later line with the continuation indent. A word is only
//! cut when it is wider than a whole line on its own; cut lines are
//! filled up to `max_width` columns. Trailing whitespace is trimmed from
//! every emitted line.
//!
//! Widths are terminal columns as measured by `unicode-width`.

use unicode_width::{UnicodeWidthChar, UnicodeWidthStr};

use crate::CoreError;

/// Column budget used when none is configured.
pub const DEFAULT_MAX_WIDTH: usize = 75;

/// Indentation for a wrapped line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Indent {
    /// This many space characters.
    Spaces(usize),
    /// A literal prefix such as `"     - "`.
    Literal(String),
}

impl Indent {
    /// Normalizes the indent to the string that prefixes a line.
    pub fn render(&self) -> String {
        match self {
            Self::Spaces(n) => " ".repeat(*n),
            Self::Literal(s) => s.clone(),
        }
    }
}

impl Default for Indent {
    fn default() -> Self {
        Self::Spaces(0)
    }
}

impl From<usize> for Indent {
    fn from(n: usize) -> Self {
        Self::Spaces(n)
    }
}

impl From<&str> for Indent {
    fn from(s: &str) -> Self {
        Self::Literal(s.to_string())
    }
}

impl From<String> for Indent {
    fn from(s: String) -> Self {
        Self::Literal(s)
    }
}

/// Parameters for [`wrap_lines`].
///
/// # Examples
///
/// ```
/// use notecraft_core::wrap::{Indent, WrapOptions, DEFAULT_MAX_WIDTH};
///
/// let opts = WrapOptions::default()
///     .first_line_indent("     - ")
///     .continuation_indent(7usize);
/// assert_eq!(opts.max_width, DEFAULT_MAX_WIDTH);
/// assert_eq!(opts.continuation_indent, Indent::Spaces(7));
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WrapOptions {
    /// Maximum columns per line, indent included.
    pub max_width: usize,

    /// Prefix of the first output line.
    pub first_line_indent: Indent,

    /// Prefix of every following line.
    pub continuation_indent: Indent,
}

impl WrapOptions {
    /// Options with the given width and no indentation.
    pub fn new(max_width: usize) -> Self {
        Self {
            max_width,
            first_line_indent: Indent::default(),
            continuation_indent: Indent::default(),
        }
    }

    /// Sets the first-line indent.
    pub fn first_line_indent(mut self, indent: impl Into<Indent>) -> Self {
        self.first_line_indent = indent.into();
        self
    }

    /// Sets the continuation indent.
    pub fn continuation_indent(mut self, indent: impl Into<Indent>) -> Self {
        self.continuation_indent = indent.into();
        self
    }

    /// Uses the same indent for the first and continuation lines.
    pub fn indent(self, indent: impl Into<Indent>) -> Self {
        let indent = indent.into();
        self.first_line_indent(indent.clone())
            .continuation_indent(indent)
    }
}

impl Default for WrapOptions {
    fn default() -> Self {
        Self::new(DEFAULT_MAX_WIDTH)
    }
}

/// Which indent governs the line being built.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum LineState {
    BuildingFirstLine,
    BuildingContinuationLine,
}

struct LineBuilder {
    max_width: usize,
    first: String,
    continuation: String,
    state: LineState,
    line: String,
    indent_len: usize,
    lines: Vec<String>,
}

impl LineBuilder {
    fn new(max_width: usize, first: String, continuation: String) -> Self {
        Self {
            max_width,
            line: first.clone(),
            indent_len: first.len(),
            first,
            continuation,
            state: LineState::BuildingFirstLine,
            lines: Vec::new(),
        }
    }

    fn indent(&self) -> &str {
        match self.state {
            LineState::BuildingFirstLine => &self.first,
            LineState::BuildingContinuationLine => &self.continuation,
        }
    }

    fn available(&self) -> usize {
        self.max_width - self.indent().width()
    }

    fn has_content(&self) -> bool {
        self.line.len() > self.indent_len
    }

    /// Emits the current line without trailing whitespace and moves on to a
    /// continuation line. A line holding only whitespace is dropped and the
    /// current indent is kept.
    fn flush(&mut self) {
        let mut line = std::mem::take(&mut self.line);
        if line[self.indent_len..].trim().is_empty() {
            self.line = self.indent().to_string();
            return;
        }
        line.truncate(line.trim_end().len());
        self.lines.push(line);
        self.state = LineState::BuildingContinuationLine;
        self.line = self.continuation.clone();
        self.indent_len = self.continuation.len();
    }

    fn push_word(&mut self, word: &str) -> Result<(), CoreError> {
        let mut word = word;
        loop {
            let fits_alone = word.width() <= self.available();
            if self.has_content() {
                if fits_alone && self.line.width() + 1 + word.width() <= self.max_width {
                    self.line.push(' ');
                    self.line.push_str(word);
                    return Ok(());
                }
                self.flush();
            } else if fits_alone {
                self.line.push_str(word);
                return Ok(());
            } else {
                let available = self.available();
                let Some((head, tail)) = split_at_width(word, available) else {
                    let ch = word.chars().next().unwrap_or(' ');
                    return Err(CoreError::CharTooWide {
                        ch,
                        width: ch.width().unwrap_or(0),
                        available,
                    });
                };
                self.line.push_str(head);
                self.flush();
                word = tail;
            }
        }
    }

    fn finish(mut self) -> Vec<String> {
        self.flush();
        self.lines
    }
}

/// Splits `word` after as many characters as fit in `columns`.
///
/// Returns `None` when not even the first character fits.
fn split_at_width(word: &str, columns: usize) -> Option<(&str, &str)> {
    let mut used = 0;
    let mut end = 0;
    for (idx, ch) in word.char_indices() {
        let w = ch.width().unwrap_or(0);
        if used + w > columns {
            break;
        }
        used += w;
        end = idx + ch.len_utf8();
    }
    (end > 0).then(|| word.split_at(end))
}

fn validate(opts: &WrapOptions, first: &str, continuation: &str) -> Result<(), CoreError> {
    if opts.max_width == 0 {
        return Err(CoreError::InvalidWidth(opts.max_width));
    }
    for indent in [first, continuation] {
        if indent.width() >= opts.max_width {
            return Err(CoreError::IndentTooWide {
                indent: indent.to_string(),
                max_width: opts.max_width,
            });
        }
    }
    Ok(())
}

/// Wraps one paragraph of text into lines.
///
/// Consecutive spaces are kept as they are; embedded newlines are not
/// treated specially (see [`wrap_paragraphs`] for multi-line text). Empty
/// text produces no lines.
///
/// # Errors
///
/// Returns `CoreError::InvalidWidth` for a zero width,
/// `CoreError::IndentTooWide` if an indent is as wide as the line, and
/// `CoreError::CharTooWide` if a word must be cut where not even its next
/// character fits after the indent.
///
/// # Examples
///
/// ```
/// use notecraft_core::wrap::{wrap_lines, WrapOptions};
///
/// let lines = wrap_lines("aaaa bbbb cccc", &WrapOptions::new(10)).unwrap();
/// assert_eq!(lines, vec!["aaaa bbbb", "cccc"]);
///
/// let lines = wrap_lines("supercalifragilisticexpialidocious", &WrapOptions::new(10)).unwrap();
/// assert_eq!(lines, vec!["supercalif", "ragilistic", "expialidoc", "ious"]);
/// ```
pub fn wrap_lines(text: &str, opts: &WrapOptions) -> Result<Vec<String>, CoreError> {
    let first = opts.first_line_indent.render();
    let continuation = opts.continuation_indent.render();
    validate(opts, &first, &continuation)?;

    if text.is_empty() {
        return Ok(Vec::new());
    }

    let mut builder = LineBuilder::new(opts.max_width, first, continuation);
    for word in text.split(' ') {
        builder.push_word(word)?;
    }
    Ok(builder.finish())
}

/// Wraps one paragraph and joins the lines with `\n`.
///
/// # Errors
///
/// Same as [`wrap_lines`].
pub fn wrap(text: &str, opts: &WrapOptions) -> Result<String, CoreError> {
    Ok(wrap_lines(text, opts)?.join("\n"))
}

/// Wraps each `\n`-separated paragraph independently, keeping hard breaks.
///
/// Every paragraph starts over with the first-line indent. Empty
/// paragraphs become empty lines.
///
/// # Errors
///
/// Same as [`wrap_lines`].
///
/// # Examples
///
/// ```
/// use notecraft_core::wrap::{wrap_paragraphs, WrapOptions};
///
/// let lines = wrap_paragraphs("Assessment: stable\n\nPlan: home", &WrapOptions::new(20)).unwrap();
/// assert_eq!(lines, vec!["Assessment: stable", "", "Plan: home"]);
/// ```
pub fn wrap_paragraphs(text: &str, opts: &WrapOptions) -> Result<Vec<String>, CoreError> {
    if text.is_empty() {
        return wrap_lines(text, opts);
    }
    let mut lines = Vec::new();
    for paragraph in text.split('\n') {
        let paragraph = paragraph.strip_suffix('\r').unwrap_or(paragraph);
        let wrapped = wrap_lines(paragraph, opts)?;
        if wrapped.is_empty() {
            lines.push(String::new());
        } else {
            lines.extend(wrapped);
        }
    }
    Ok(lines)
}

#[cfg(test)]
mod tests {
    use super::*;

    const NOTE: &str = "En raison de la stabilité clinique, du faible risque de complication et \
                        du contrôle adéquat des symptômes, traitement ambulatoire avec suivi \
                        rapproché par le médecin de famille dans les sept prochains jours.";

    fn width_of(line: &str) -> usize {
        line.width()
    }

    #[test]
    fn test_should_wrap_at_word_boundaries() {
        let lines = wrap_lines("aaaa bbbb cccc", &WrapOptions::new(10)).unwrap();
        assert_eq!(lines, vec!["aaaa bbbb", "cccc"]);
    }

    #[test]
    fn test_should_hard_split_overlong_word() {
        let lines = wrap_lines("supercalifragilisticexpialidocious", &WrapOptions::new(10)).unwrap();
        assert_eq!(lines.len(), 4);
        for line in &lines[..3] {
            assert_eq!(line.len(), 10);
        }
        assert_eq!(lines[3], "ious");
        assert!(lines.iter().all(|l| !l.contains(' ')));
    }

    #[test]
    fn test_should_flush_current_line_before_hard_split() {
        let lines = wrap_lines("ab abcdefghijklmno cd", &WrapOptions::new(8)).unwrap();
        assert_eq!(lines, vec!["ab", "abcdefgh", "ijklmno", "cd"]);
    }

    #[test]
    fn test_should_continue_after_split_remainder() {
        let lines = wrap_lines("abcdefghijk xy", &WrapOptions::new(8)).unwrap();
        assert_eq!(lines, vec!["abcdefgh", "ijk xy"]);
    }

    #[test]
    fn test_should_apply_first_and_continuation_indents() {
        let opts = WrapOptions::new(20)
            .first_line_indent("     - ")
            .continuation_indent("       ");
        let lines = wrap_lines("Lasix 40 IV BID with daily weights", &opts).unwrap();
        assert_eq!(
            lines,
            vec!["     - Lasix 40 IV", "       BID with", "       daily weights"]
        );
    }

    #[test]
    fn test_should_not_add_separator_after_literal_indent() {
        let opts = WrapOptions::new(20).first_line_indent("- ");
        assert_eq!(wrap("one", &opts).unwrap(), "- one");
    }

    #[test]
    fn test_should_prefix_split_chunks_with_governing_indent() {
        let opts = WrapOptions::new(8).first_line_indent(2usize).continuation_indent(4usize);
        let lines = wrap_lines("abcdefghijklmn", &opts).unwrap();
        assert_eq!(lines, vec!["  abcdef", "    ghij", "    klmn"]);
        assert!(lines.iter().all(|l| l.len() <= 8));
    }

    #[test]
    fn test_should_return_nothing_for_empty_text() {
        assert!(wrap_lines("", &WrapOptions::new(10)).unwrap().is_empty());
        assert_eq!(wrap("", &WrapOptions::default()).unwrap(), "");
    }

    #[test]
    fn test_should_not_emit_whitespace_only_lines() {
        let opts = WrapOptions::new(10).indent(2usize);
        assert!(wrap_lines(" ", &opts).unwrap().is_empty());
        assert!(wrap_lines("   ", &opts).unwrap().is_empty());
    }

    #[test]
    fn test_should_preserve_internal_runs_of_spaces() {
        let lines = wrap_lines("a  b", &WrapOptions::new(10)).unwrap();
        assert_eq!(lines, vec!["a  b"]);
    }

    #[test]
    fn test_should_reject_zero_width() {
        let err = wrap_lines("text", &WrapOptions::new(0)).unwrap_err();
        assert!(matches!(err, CoreError::InvalidWidth(0)));
    }

    #[test]
    fn test_should_reject_indent_filling_the_line() {
        let opts = WrapOptions::new(4).continuation_indent("    ");
        let err = wrap_lines("a b c", &opts).unwrap_err();
        assert!(matches!(err, CoreError::IndentTooWide { max_width: 4, .. }));
    }

    #[test]
    fn test_should_allow_width_of_one() {
        let lines = wrap_lines("ab c", &WrapOptions::new(1)).unwrap();
        assert_eq!(lines, vec!["a", "b", "c"]);
    }

    #[test]
    fn test_should_keep_every_line_within_width() {
        for max_width in [8, 13, 20, 41, 75] {
            let opts = WrapOptions::new(max_width)
                .first_line_indent(3usize)
                .continuation_indent(5usize);
            for line in wrap_lines(NOTE, &opts).unwrap() {
                assert!(width_of(&line) <= max_width, "{line:?} exceeds {max_width}");
            }
        }
    }

    #[test]
    fn test_should_not_split_words_that_fit() {
        let opts = WrapOptions::new(30).indent(2usize);
        let lines = wrap_lines(NOTE, &opts).unwrap();
        let rejoined: Vec<&str> = lines.iter().flat_map(|l| l.split_whitespace()).collect();
        let original: Vec<&str> = NOTE.split_whitespace().collect();
        assert_eq!(rejoined, original);
    }

    #[test]
    fn test_should_be_idempotent_under_rewrap() {
        let opts = WrapOptions::new(33);
        let first = wrap_lines(NOTE, &opts).unwrap();
        let second = wrap_lines(&first.join(" "), &opts).unwrap();
        assert_eq!(first, second);

        let indented = WrapOptions::new(33).first_line_indent(4usize).continuation_indent(2usize);
        let first = wrap_lines(NOTE, &indented).unwrap();
        let rejoined: Vec<&str> = first.iter().map(|l| l.trim_start()).collect();
        let second = wrap_lines(&rejoined.join(" "), &indented).unwrap();
        assert_eq!(first, second);
    }

    #[test]
    fn test_should_measure_accented_text_in_columns() {
        let lines = wrap_lines("détresse éruption", &WrapOptions::new(9)).unwrap();
        assert_eq!(lines, vec!["détresse", "éruption"]);
    }

    #[test]
    fn test_should_split_wide_characters_without_exceeding_width() {
        // Each CJK character is two columns wide.
        let lines = wrap_lines("病病病病病", &WrapOptions::new(5)).unwrap();
        assert_eq!(lines, vec!["病病", "病病", "病"]);
    }

    #[test]
    fn test_should_keep_first_indent_after_whitespace_only_line() {
        let opts = WrapOptions::new(10).first_line_indent(2usize).continuation_indent(0usize);
        let lines = wrap_lines("\t abcdefghijklm", &opts).unwrap();
        assert_eq!(lines, vec!["  abcdefgh", "klm"]);
    }

    #[test]
    fn test_should_trim_trailing_space_before_break() {
        let lines = wrap_lines("aaaa  bbbbbb", &WrapOptions::new(10)).unwrap();
        assert_eq!(lines, vec!["aaaa", "bbbbbb"]);
    }

    #[test]
    fn test_should_reject_wide_character_that_cannot_fit() {
        let err = wrap_lines("病", &WrapOptions::new(1)).unwrap_err();
        assert!(matches!(
            err,
            CoreError::CharTooWide {
                ch: '病',
                width: 2,
                available: 1
            }
        ));

        let err = wrap_lines("病病", &WrapOptions::new(5).indent(4usize)).unwrap_err();
        assert!(matches!(err, CoreError::CharTooWide { available: 1, .. }));
    }

    #[test]
    fn test_should_accept_wide_character_on_roomier_first_line() {
        let opts = WrapOptions::new(5).continuation_indent(4usize);
        assert_eq!(wrap_lines("病", &opts).unwrap(), vec!["病"]);
    }

    #[test]
    fn test_should_keep_hard_breaks_between_paragraphs() {
        let opts = WrapOptions::new(12).indent(1usize);
        let lines = wrap_paragraphs("Sat 88-92%\r\nVNI PRN au besoin\n", &opts).unwrap();
        assert_eq!(lines, vec![" Sat 88-92%", " VNI PRN au", " besoin", ""]);
    }
}
