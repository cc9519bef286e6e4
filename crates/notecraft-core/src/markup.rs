//! Choice-group markup parsing.
//!
//! Template bodies mix literal text with groups written as
//! `[[option|option|...]]`. A group's content is at least one character
//! and never contains `]`; groups do not nest. Anything that does not form
//! a complete group, such as a stray `]]` or an unterminated `[[`, stays in
//! the output as literal text.

use std::ops::Range;

/// Opening delimiter of a choice group.
pub const OPEN: &str = "[[";

/// Closing delimiter of a choice group.
pub const CLOSE: &str = "]]";

/// Separator between options inside a group.
pub const SEPARATOR: char = '|';

/// Sole option of a group that is replaced by a date instead of chosen.
pub const DATE_SENTINEL: &str = "DATE";

/// What a group stands for.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GroupKind {
    /// The author picks one of the listed options.
    Choice,
    /// `[[DATE]]`, substituted with a date at expansion time.
    Date,
}

/// One `[[...]]` group within a template body.
///
/// # Examples
///
/// ```
/// use notecraft_core::markup::{parse, GroupKind};
///
/// let parsed = parse("Lasix [[20|40|60|80]] IV BID");
/// let group = parsed.groups().next().unwrap();
/// assert_eq!(group.options, vec!["20", "40", "60", "80"]);
/// assert_eq!(group.kind, GroupKind::Choice);
/// assert_eq!(group.span, 6..21);
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ChoiceGroup<'a> {
    /// Options in source order. Never empty; an option may be `""`.
    pub options: Vec<&'a str>,

    /// Whether this is an author choice or a date token.
    pub kind: GroupKind,

    /// Byte range of the whole group, delimiters included.
    pub span: Range<usize>,
}

impl<'a> ChoiceGroup<'a> {
    fn from_content(content: &'a str, span: Range<usize>) -> Self {
        let options: Vec<&str> = content.split(SEPARATOR).collect();
        let kind = if options == [DATE_SENTINEL] {
            GroupKind::Date
        } else {
            GroupKind::Choice
        };
        Self {
            options,
            kind,
            span,
        }
    }

    /// The built-in default, option 0.
    pub fn default_option(&self) -> &'a str {
        self.options[0]
    }

    /// Returns the index after `current`, wrapping back to the default.
    ///
    /// # Examples
    ///
    /// ```
    /// use notecraft_core::markup::parse;
    ///
    /// let parsed = parse("[[étage|soins inter.|USI]]");
    /// let group = parsed.groups().next().unwrap();
    /// assert_eq!(group.cycle(0), 1);
    /// assert_eq!(group.cycle(2), 0);
    /// ```
    pub fn cycle(&self, current: usize) -> usize {
        (current + 1) % self.options.len()
    }

    /// Returns `true` for a `[[DATE]]` token group.
    pub fn is_date(&self) -> bool {
        self.kind == GroupKind::Date
    }
}

/// A piece of a parsed template body.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Segment<'a> {
    /// Text copied to the output unchanged, line breaks included.
    Literal(&'a str),
    /// A choice group or date token.
    Group(ChoiceGroup<'a>),
}

/// A template body split into literal runs and groups, in source order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ParsedBody<'a> {
    segments: Vec<Segment<'a>>,
}

impl<'a> ParsedBody<'a> {
    /// All segments in source order.
    pub fn segments(&self) -> &[Segment<'a>] {
        &self.segments
    }

    /// Groups in source order; the position in this iterator is the
    /// group's ordinal.
    pub fn groups(&self) -> impl Iterator<Item = &ChoiceGroup<'a>> {
        self.segments.iter().filter_map(|s| match s {
            Segment::Group(g) => Some(g),
            Segment::Literal(_) => None,
        })
    }

    /// Returns `true` if the body contains at least one group.
    pub fn has_groups(&self) -> bool {
        self.groups().next().is_some()
    }
}

/// Splits `body` into literal runs and choice groups.
///
/// # Examples
///
/// ```
/// use notecraft_core::markup::{parse, Segment};
///
/// let parsed = parse("Admission [[étage|USI]]\nTélémétrie [[");
/// let segments = parsed.segments();
/// assert_eq!(segments.len(), 3);
/// assert_eq!(segments[0], Segment::Literal("Admission "));
/// assert_eq!(segments[2], Segment::Literal("\nTélémétrie [["));
/// ```
pub fn parse(body: &str) -> ParsedBody<'_> {
    let mut segments = Vec::new();
    let mut literal_start = 0;
    let mut search = 0;

    while let Some(rel) = body[search..].find(OPEN) {
        let open = search + rel;
        let content_start = open + OPEN.len();
        let rest = &body[content_start..];

        match rest.find(']') {
            Some(len) if len > 0 && rest[len..].starts_with(CLOSE) => {
                let content_end = content_start + len;
                let group_end = content_end + CLOSE.len();
                if literal_start < open {
                    segments.push(Segment::Literal(&body[literal_start..open]));
                }
                segments.push(Segment::Group(ChoiceGroup::from_content(
                    &body[content_start..content_end],
                    open..group_end,
                )));
                literal_start = group_end;
                search = group_end;
            }
            // Not a group starting here; a later `[[` may still be one.
            _ => search = open + 1,
        }
    }

    if literal_start < body.len() {
        segments.push(Segment::Literal(&body[literal_start..]));
    }
    ParsedBody { segments }
}
