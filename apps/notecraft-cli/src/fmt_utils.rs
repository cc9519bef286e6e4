//! Shared formatting utilities for the notecraft CLI.

use unicode_width::{UnicodeWidthChar, UnicodeWidthStr};

/// Returns the first line of `s` without its line terminator.
pub fn first_line(s: &str) -> &str {
    s.lines().next().unwrap_or("")
}

/// Pads `s` with spaces up to `width` display columns.
pub fn pad_to_width(s: &str, width: usize) -> String {
    let pad = width.saturating_sub(s.width());
    format!("{s}{}", " ".repeat(pad))
}

/// Truncates a string to fit within `max_width` display columns, appending
/// `…` if needed.
///
/// Counts terminal columns rather than bytes, so accented and wide
/// characters never split or overflow.
pub fn truncate_str(s: &str, max_width: usize) -> String {
    if s.width() <= max_width {
        return s.to_string();
    }
    let budget = max_width.saturating_sub(1);
    let mut used = 0;
    let mut truncated = String::new();
    for ch in s.chars() {
        let w = ch.width().unwrap_or(0);
        if used + w > budget {
            break;
        }
        used += w;
        truncated.push(ch);
    }
    format!("{truncated}\u{2026}")
}
