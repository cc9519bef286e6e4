//! Application layer for the notecraft CLI.
//!
//! Owns the [`NoteEngine`] for the current project and implements each
//! subcommand on top of it.

use std::io::{self, Read};

use anyhow::{Context, Result, bail};
use notecraft_core::expand::{expand, pending_groups};
use notecraft_core::{Indent, NoteEngine, Selection, Selections, WrapOptions, wrap_paragraphs};
use tracing::debug;
use unicode_width::UnicodeWidthStr;

use crate::fmt_utils::{first_line, pad_to_width, truncate_str};

/// Columns of body preview shown by `list`.
const PREVIEW_WIDTH: usize = 50;

/// Arguments of the `expand` command.
#[derive(Debug, Clone, Default)]
pub struct ExpandArgs {
    pub trigger: String,
    pub selections: Vec<(usize, usize)>,
    pub customs: Vec<(usize, String)>,
    pub indent: usize,
    pub continuation: usize,
    pub width: Option<usize>,
    pub raw: bool,
}

impl ExpandArgs {
    /// Collects option picks and custom text into [`Selections`].
    ///
    /// A custom value replaces an option pick for the same group.
    pub fn to_selections(&self) -> Selections {
        let mut selections: Selections = self.selections.iter().copied().collect();
        for (ordinal, text) in &self.customs {
            selections.insert(*ordinal, Selection::Custom(text.clone()));
        }
        selections
    }
}

/// An indent given either as a space count or a literal prefix.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum IndentArg {
    #[default]
    None,
    Spaces(usize),
    Literal(String),
}

impl IndentArg {
    /// Combines the `--x` and `--x-str` flags; the literal wins if both are set.
    pub fn from_parts(spaces: Option<usize>, literal: Option<String>) -> Self {
        match (spaces, literal) {
            (_, Some(literal)) => Self::Literal(literal),
            (Some(spaces), None) => Self::Spaces(spaces),
            (None, None) => Self::None,
        }
    }

    fn into_indent(self) -> Indent {
        match self {
            Self::None => Indent::Spaces(0),
            Self::Spaces(n) => Indent::Spaces(n),
            Self::Literal(s) => Indent::Literal(s),
        }
    }
}

/// Arguments of the `wrap` command.
#[derive(Debug, Clone, Default)]
pub struct WrapArgs {
    pub text: Option<String>,
    pub first_line: IndentArg,
    pub continuation: IndentArg,
    pub width: Option<usize>,
}

pub struct App {
    engine: NoteEngine,
}

impl App {
    /// Loads the engine for the enclosing project, or for the current
    /// directory when no project marker is found.
    pub fn new() -> Result<Self> {
        let root = match notecraft_core::find_project_root() {
            Ok(root) => root,
            Err(e) => {
                debug!(error = %e, "No project root found, using current directory");
                std::env::current_dir().context("Cannot determine current directory")?
            }
        };
        let engine = NoteEngine::new(root).context("Failed to load notecraft project")?;
        Ok(Self { engine })
    }

    #[cfg(test)]
    pub fn with_engine(engine: NoteEngine) -> Self {
        Self { engine }
    }

    pub fn expand(&self, args: &ExpandArgs) -> Result<()> {
        println!("{}", self.render_expand(args)?);
        Ok(())
    }

    pub fn wrap(&self, args: &WrapArgs) -> Result<()> {
        let text = match &args.text {
            Some(text) => text.clone(),
            None => read_stdin()?,
        };
        println!("{}", self.render_wrap(&text, args)?);
        Ok(())
    }

    pub fn section(&self, header: &str, content: Option<String>, indent: Option<usize>) -> Result<()> {
        let content = match content {
            Some(content) => content,
            None => read_stdin()?,
        };
        let indent = indent.unwrap_or(self.engine.config().format.section_indent);
        let text = self
            .engine
            .section_formatter()
            .section(header, content.trim_end_matches(['\r', '\n']), indent)?;
        print!("{text}");
        if !text.ends_with('\n') {
            println!();
        }
        Ok(())
    }

    pub fn list(&self, prefix: Option<&str>) -> Result<()> {
        let rows = self.render_list(prefix);
        if rows.is_empty() {
            match prefix {
                Some(prefix) => println!("No phrases match '{prefix}'."),
                None => println!("No phrases loaded."),
            }
            return Ok(());
        }
        for row in rows {
            println!("{row}");
        }
        Ok(())
    }

    pub fn groups(&self, trigger: &str) -> Result<()> {
        for line in self.render_groups(trigger)? {
            println!("{line}");
        }
        Ok(())
    }

    fn body(&self, trigger: &str) -> Result<&str> {
        if let Some(body) = self.engine.book().lookup(trigger) {
            return Ok(body);
        }
        let suggestions = self.engine.book().suggest(trigger);
        if suggestions.is_empty() {
            bail!("Unknown phrase trigger '{trigger}'");
        }
        bail!(
            "Unknown phrase trigger '{trigger}'. Did you mean: {}?",
            suggestions.join(", ")
        )
    }

    fn render_expand(&self, args: &ExpandArgs) -> Result<String> {
        let body = self.body(&args.trigger)?;
        let expanded = expand(body, &args.to_selections());
        debug!(trigger = %args.trigger, "Expanded phrase");
        if args.raw {
            return Ok(expanded);
        }
        let width = args.width.unwrap_or(self.engine.config().format.max_width);
        let opts = WrapOptions::new(width)
            .first_line_indent(args.indent)
            .continuation_indent(args.continuation);
        Ok(wrap_paragraphs(&expanded, &opts)?.join("\n"))
    }

    fn render_wrap(&self, text: &str, args: &WrapArgs) -> Result<String> {
        let width = args.width.unwrap_or(self.engine.config().format.max_width);
        let opts = WrapOptions::new(width)
            .first_line_indent(args.first_line.clone().into_indent())
            .continuation_indent(args.continuation.clone().into_indent());
        let text = text.trim_end_matches(['\r', '\n']);
        Ok(wrap_paragraphs(text, &opts)?.join("\n"))
    }

    fn render_list(&self, prefix: Option<&str>) -> Vec<String> {
        let book = self.engine.book();
        let triggers = match prefix {
            Some(prefix) => book.suggest(prefix),
            None => book.triggers(),
        };
        let column = triggers.iter().map(|t| t.width()).max().unwrap_or(0);
        triggers
            .into_iter()
            .map(|trigger| {
                let preview = book.lookup(trigger).map(first_line).unwrap_or_default();
                format!(
                    "{}  {}",
                    pad_to_width(trigger, column),
                    truncate_str(preview, PREVIEW_WIDTH)
                )
            })
            .collect()
    }

    fn render_groups(&self, trigger: &str) -> Result<Vec<String>> {
        let body = self.body(trigger)?;
        let pending = pending_groups(body);
        if pending.is_empty() {
            return Ok(vec![format!("{trigger} has no choice groups.")]);
        }
        Ok(pending
            .into_iter()
            .map(|(ordinal, group)| {
                let options: Vec<String> = group
                    .options
                    .iter()
                    .enumerate()
                    .map(|(idx, option)| {
                        let label = if option.is_empty() { "(empty)" } else { option };
                        format!("{idx}={label}")
                    })
                    .collect();
                format!("[{ordinal}] {}", options.join(" | "))
            })
            .collect())
    }
}

fn read_stdin() -> Result<String> {
    let mut buf = String::new();
    io::stdin()
        .read_to_string(&mut buf)
        .context("Failed to read from stdin")?;
    Ok(buf)
}
