//! CLI argument parsing.
//!
//! Defines the command-line interface for notecraft using clap.
//! Supports five subcommands: `expand`, `wrap`, `section`, `list`, and
//! `groups`.

use anyhow::Result;
use clap::{Parser, Subcommand};

use crate::app::{App, ExpandArgs, IndentArg, WrapArgs};

/// notecraft - dot-phrase expansion and note formatting
#[derive(Parser)]
#[command(name = "notecraft")]
#[command(
    author,
    version,
    about = "notecraft - dot-phrase expansion and note formatting"
)]
pub struct Cli {
    /// Subcommand to execute.
    #[command(subcommand)]
    command: Commands,
}

/// Available notecraft commands.
#[derive(Subcommand)]
pub enum Commands {
    /// Expand a phrase trigger into note text.
    Expand {
        /// Phrase trigger (e.g., "/abx").
        trigger: String,

        /// Pick option I of choice group N, as `N=I` (both zero-based).
        #[arg(long = "select", value_name = "N=I", value_parser = parse_selection)]
        selections: Vec<(usize, usize)>,

        /// Replace choice group N with free text, as `N=TEXT`.
        #[arg(long = "custom", value_name = "N=TEXT", value_parser = parse_custom)]
        customs: Vec<(usize, String)>,

        /// Spaces before the first line.
        #[arg(long, default_value_t = 0)]
        indent: usize,

        /// Spaces before continuation lines.
        #[arg(long, default_value_t = 0)]
        continuation: usize,

        /// Maximum line width (defaults to the configured width).
        #[arg(long)]
        width: Option<usize>,

        /// Print the expansion without wrapping.
        #[arg(long)]
        raw: bool,
    },

    /// Wrap text to the note width (reads stdin when TEXT is omitted).
    Wrap {
        /// Text to wrap.
        text: Option<String>,

        /// Spaces before the first line.
        #[arg(long, conflicts_with = "indent_str")]
        indent: Option<usize>,

        /// Literal prefix for the first line (e.g., "1. ").
        #[arg(long)]
        indent_str: Option<String>,

        /// Spaces before continuation lines.
        #[arg(long, conflicts_with = "continuation_str")]
        continuation: Option<usize>,

        /// Literal prefix for continuation lines.
        #[arg(long)]
        continuation_str: Option<String>,

        /// Maximum line width (defaults to the configured width).
        #[arg(long)]
        width: Option<usize>,
    },

    /// Format a `Header:` section (reads stdin when CONTENT is omitted).
    Section {
        /// Section header, without the trailing colon.
        header: String,

        /// Section content.
        content: Option<String>,

        /// Spaces before every content line (defaults to the configured indent).
        #[arg(long)]
        indent: Option<usize>,
    },

    /// List phrase triggers, optionally filtered by prefix.
    List {
        /// Trigger prefix (e.g., "/emb").
        prefix: Option<String>,
    },

    /// Show the choice groups of a phrase with their ordinals.
    Groups {
        /// Phrase trigger (e.g., "/eampoc").
        trigger: String,
    },
}

impl Cli {
    /// Executes the parsed CLI command.
    pub fn run(self) -> Result<()> {
        let app = App::new()?;

        match self.command {
            Commands::Expand {
                trigger,
                selections,
                customs,
                indent,
                continuation,
                width,
                raw,
            } => app.expand(&ExpandArgs {
                trigger,
                selections,
                customs,
                indent,
                continuation,
                width,
                raw,
            }),
            Commands::Wrap {
                text,
                indent,
                indent_str,
                continuation,
                continuation_str,
                width,
            } => app.wrap(&WrapArgs {
                text,
                first_line: IndentArg::from_parts(indent, indent_str),
                continuation: IndentArg::from_parts(continuation, continuation_str),
                width,
            }),
            Commands::Section {
                header,
                content,
                indent,
            } => app.section(&header, content, indent),
            Commands::List { prefix } => app.list(prefix.as_deref()),
            Commands::Groups { trigger } => app.groups(&trigger),
        }
    }
}

fn split_pair(raw: &str) -> Result<(usize, &str), String> {
    let (ordinal, value) = raw
        .split_once('=')
        .ok_or_else(|| format!("expected N=VALUE, got '{raw}'"))?;
    let ordinal = ordinal
        .trim()
        .parse::<usize>()
        .map_err(|e| format!("invalid group number '{ordinal}': {e}"))?;
    Ok((ordinal, value))
}

/// Parses `N=I` into a group ordinal and option index.
fn parse_selection(raw: &str) -> Result<(usize, usize), String> {
    let (ordinal, value) = split_pair(raw)?;
    let index = value
        .trim()
        .parse::<usize>()
        .map_err(|e| format!("invalid option index '{value}': {e}"))?;
    Ok((ordinal, index))
}

/// Parses `N=TEXT` into a group ordinal and replacement text.
fn parse_custom(raw: &str) -> Result<(usize, String), String> {
    let (ordinal, value) = split_pair(raw)?;
    Ok((ordinal, value.to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_should_parse_selection_pair() {
        assert_eq!(parse_selection("2=1"), Ok((2, 1)));
        assert_eq!(parse_selection(" 0 = 3 "), Ok((0, 3)));
    }

    #[test]
    fn test_should_reject_malformed_selection() {
        assert!(parse_selection("2").is_err());
        assert!(parse_selection("a=1").is_err());
        assert!(parse_selection("1=-1").is_err());
    }

    #[test]
    fn test_should_keep_custom_text_verbatim() {
        assert_eq!(
            parse_custom("1=Lasix 80 IV = BID"),
            Ok((1, "Lasix 80 IV = BID".to_string()))
        );
        assert_eq!(parse_custom("0="), Ok((0, String::new())));
    }

    #[test]
    fn test_should_parse_expand_command() {
        let cli = Cli::try_parse_from([
            "notecraft", "expand", "/abx", "--select", "0=2", "--custom", "1=PO", "--indent", "2",
        ])
        .unwrap();
        match cli.command {
            Commands::Expand {
                trigger,
                selections,
                customs,
                indent,
                raw,
                ..
            } => {
                assert_eq!(trigger, "/abx");
                assert_eq!(selections, vec![(0, 2)]);
                assert_eq!(customs, vec![(1, "PO".to_string())]);
                assert_eq!(indent, 2);
                assert!(!raw);
            }
            _ => panic!("expected expand"),
        }
    }

    #[test]
    fn test_should_reject_conflicting_indent_flags() {
        let result = Cli::try_parse_from([
            "notecraft",
            "wrap",
            "text",
            "--indent",
            "2",
            "--indent-str",
            "1. ",
        ]);
        assert!(result.is_err());
    }
}
