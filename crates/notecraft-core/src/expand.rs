//! Template expansion.
//!
//! Turns a template body plus the author's [`Selections`] into literal
//! note text. Selections are resolved against the parsed groups up front,
//! so the fallback for a bad index lives in exactly one place
//! ([`Selections::resolve`]).

use std::collections::BTreeMap;

use chrono::{Local, NaiveDate};
use notecraft_phrases::PhraseBook;
use tracing::{debug, warn};

use crate::markup::{self, ChoiceGroup, GroupKind, Segment};

/// Format used when a `[[DATE]]` token is substituted.
pub const DATE_FORMAT: &str = "%Y-%m-%d";

/// The author's decision for one group.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Selection {
    /// Pick the option at this index.
    Option(usize),
    /// Insert this text instead of any listed option.
    Custom(String),
}

/// Ordered mapping from group ordinal to the author's [`Selection`].
///
/// Ordinals count every group in the body from left to right, date tokens
/// included. Groups without an entry use their default option.
///
/// # Examples
///
/// ```
/// use notecraft_core::expand::{Selection, Selections};
///
/// let selections = Selections::new().select(0, 1).custom(1, "14 days");
/// assert_eq!(selections.get(0), Some(&Selection::Option(1)));
/// assert_eq!(selections.get(2), None);
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Selections {
    by_group: BTreeMap<usize, Selection>,
}

/// A selection after validation against a concrete group.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Resolved<'s> {
    /// Emit the option at this index; always in range.
    Option(usize),
    /// Emit this text verbatim.
    Custom(&'s str),
    /// Emit the expansion date.
    Date,
}

impl Selections {
    /// Creates an empty set of selections (every group uses its default).
    pub fn new() -> Self {
        Self::default()
    }

    /// Chooses option `index` for group `ordinal`.
    pub fn select(mut self, ordinal: usize, index: usize) -> Self {
        self.insert(ordinal, Selection::Option(index));
        self
    }

    /// Replaces group `ordinal` with free text.
    pub fn custom(mut self, ordinal: usize, text: impl Into<String>) -> Self {
        self.insert(ordinal, Selection::Custom(text.into()));
        self
    }

    /// Sets the selection for group `ordinal`, returning the previous one.
    pub fn insert(&mut self, ordinal: usize, selection: Selection) -> Option<Selection> {
        self.by_group.insert(ordinal, selection)
    }

    /// Returns the selection for group `ordinal`, if any.
    pub fn get(&self, ordinal: usize) -> Option<&Selection> {
        self.by_group.get(&ordinal)
    }

    /// Returns `true` if no group has an explicit selection.
    pub fn is_empty(&self) -> bool {
        self.by_group.is_empty()
    }

    /// Validates the selections against `groups`, one result per group.
    ///
    /// - Custom text wins for any group, date tokens included.
    /// - Date tokens otherwise resolve to the date; option indices are
    ///   ignored for them.
    /// - An index outside a group's options falls back to option 0.
    ///
    /// # Examples
    ///
    /// ```
    /// use notecraft_core::expand::{Resolved, Selections};
    /// use notecraft_core::markup::parse;
    ///
    /// let parsed = parse("[[a|b]] [[DATE]] [[c|d]]");
    /// let groups: Vec<_> = parsed.groups().collect();
    /// let selections = Selections::new().select(0, 1).select(1, 1).select(2, 9);
    /// assert_eq!(
    ///     selections.resolve(&groups),
    ///     vec![Resolved::Option(1), Resolved::Date, Resolved::Option(0)]
    /// );
    /// ```
    pub fn resolve(&self, groups: &[&ChoiceGroup<'_>]) -> Vec<Resolved<'_>> {
        if let Some((&ordinal, _)) = self.by_group.range(groups.len()..).next() {
            debug!(
                ordinal,
                group_count = groups.len(),
                "Ignoring selections for groups not present in the template"
            );
        }

        groups
            .iter()
            .enumerate()
            .map(|(ordinal, group)| match (group.kind, self.by_group.get(&ordinal)) {
                (_, Some(Selection::Custom(text))) => Resolved::Custom(text.as_str()),
                (GroupKind::Date, _) => Resolved::Date,
                (GroupKind::Choice, Some(Selection::Option(index))) => {
                    if *index < group.options.len() {
                        Resolved::Option(*index)
                    } else {
                        warn!(
                            ordinal,
                            index,
                            option_count = group.options.len(),
                            "Selection out of range, using default option"
                        );
                        Resolved::Option(0)
                    }
                }
                (GroupKind::Choice, None) => Resolved::Option(0),
            })
            .collect()
    }
}

impl FromIterator<(usize, usize)> for Selections {
    fn from_iter<I: IntoIterator<Item = (usize, usize)>>(iter: I) -> Self {
        Self {
            by_group: iter
                .into_iter()
                .map(|(ordinal, index)| (ordinal, Selection::Option(index)))
                .collect(),
        }
    }
}

/// Expands `body` using today's local date for `[[DATE]]` tokens.
///
/// The date is captured once per call, so every token in the body gets
/// the same value.
pub fn expand(body: &str, selections: &Selections) -> String {
    expand_on(body, selections, Local::now().date_naive())
}

/// Expands `body`, substituting `today` for `[[DATE]]` tokens.
///
/// Literal runs, including their line breaks, are copied unchanged; a body
/// without groups comes back as-is.
///
/// # Examples
///
/// ```
/// use chrono::NaiveDate;
/// use notecraft_core::expand::{expand_on, Selections};
///
/// let body = "Treat with [[Tazocin|Ceftriaxone|Meropenem]].";
/// let today = NaiveDate::from_ymd_opt(2024, 3, 9).unwrap();
///
/// assert_eq!(expand_on(body, &Selections::new(), today), "Treat with Tazocin.");
/// assert_eq!(
///     expand_on(body, &Selections::new().select(0, 1), today),
///     "Treat with Ceftriaxone."
/// );
/// assert_eq!(expand_on("Vu le [[DATE]]", &Selections::new(), today), "Vu le 2024-03-09");
/// ```
pub fn expand_on(body: &str, selections: &Selections, today: NaiveDate) -> String {
    let parsed = markup::parse(body);
    let groups: Vec<&ChoiceGroup<'_>> = parsed.groups().collect();
    let resolved = selections.resolve(&groups);
    let date = today.format(DATE_FORMAT).to_string();

    let mut out = String::with_capacity(body.len());
    let mut ordinal = 0;
    for segment in parsed.segments() {
        match segment {
            Segment::Literal(text) => out.push_str(text),
            Segment::Group(group) => {
                match resolved[ordinal] {
                    Resolved::Option(index) => out.push_str(group.options[index]),
                    Resolved::Custom(text) => out.push_str(text),
                    Resolved::Date => out.push_str(&date),
                }
                ordinal += 1;
            }
        }
    }
    out
}

/// Groups the author still has to decide on, paired with their ordinals.
///
/// Date tokens are filled automatically and are left out.
///
/// # Examples
///
/// ```
/// use notecraft_core::expand::pending_groups;
///
/// let pending = pending_groups("[[DATE]]: Lasix [[20|40]] IV");
/// assert_eq!(pending.len(), 1);
/// assert_eq!(pending[0].0, 1);
/// ```
pub fn pending_groups(body: &str) -> Vec<(usize, ChoiceGroup<'_>)> {
    markup::parse(body)
        .groups()
        .enumerate()
        .filter(|(_, g)| !g.is_date())
        .map(|(ordinal, g)| (ordinal, g.clone()))
        .collect()
}

/// Expands triggers through a borrowed [`PhraseBook`].
#[derive(Debug, Clone, Copy)]
pub struct Expander<'b> {
    book: &'b PhraseBook,
}

impl<'b> Expander<'b> {
    /// Creates an expander over `book`.
    pub fn new(book: &'b PhraseBook) -> Self {
        Self { book }
    }

    /// Looks up `trigger` and expands its body with today's date.
    ///
    /// Returns `None` for an unknown trigger.
    pub fn expand_trigger(&self, trigger: &str, selections: &Selections) -> Option<String> {
        self.expand_trigger_on(trigger, selections, Local::now().date_naive())
    }

    /// Looks up `trigger` and expands its body with the given date.
    ///
    /// # Examples
    ///
    /// ```
    /// use chrono::NaiveDate;
    /// use notecraft_core::expand::{Expander, Selections};
    /// use notecraft_phrases::PhraseBook;
    ///
    /// let book = PhraseBook::with_builtin_phrases().unwrap();
    /// let expander = Expander::new(&book);
    /// let today = NaiveDate::from_ymd_opt(2025, 1, 31).unwrap();
    ///
    /// assert_eq!(
    ///     expander.expand_trigger_on("/date", &Selections::new(), today).as_deref(),
    ///     Some("2025-01-31")
    /// );
    /// assert!(expander.expand_trigger_on("/nope", &Selections::new(), today).is_none());
    /// ```
    pub fn expand_trigger_on(
        &self,
        trigger: &str,
        selections: &Selections,
        today: NaiveDate,
    ) -> Option<String> {
        let Some(body) = self.book.lookup(trigger) else {
            debug!(trigger, "Unknown trigger");
            return None;
        };
        debug!(trigger, "Expanding phrase");
        Some(expand_on(body, selections, today))
    }
}
