//! notecraft core
//!
//! Turns slash-triggered phrase templates into formatted clinical note
//! text.
//!
//! # Architecture
//!
//! - [`markup`] splits a template body into literal runs and `[[a|b]]`
//!   choice groups
//! - [`expand`] resolves the author's [`Selections`] into literal text
//! - [`wrap`] reflows text into fixed-width lines with first-line and
//!   continuation indents
//! - [`section`] puts headers above wrapped content
//! - [`NoteEngine`] ties a [`NoteConfig`] (from `.notecraft/config.yml`)
//!   to a [`PhraseBook`](notecraft_phrases::PhraseBook)
//!
//! # Usage
//!
//! ```
//! use notecraft_core::expand::{expand, Selections};
//! use notecraft_core::wrap::{wrap, WrapOptions};
//!
//! let text = expand("Treat with [[Tazocin|Ceftriaxone|Meropenem]].", &Selections::new().select(0, 2));
//! assert_eq!(text, "Treat with Meropenem.");
//!
//! let wrapped = wrap(&text, &WrapOptions::new(12)).unwrap();
//! assert_eq!(wrapped, "Treat with\nMeropenem.");
//! ```

pub mod config;
mod engine;
mod error;
pub mod expand;
pub mod markup;
pub mod project;
pub mod section;
pub mod wrap;

pub use config::NoteConfig;
pub use engine::NoteEngine;
pub use error::CoreError;
pub use expand::{Expander, Selection, Selections, expand};
pub use project::find_project_root;
pub use section::{Impression, SectionFormatter, format_list, format_section};
pub use wrap::{DEFAULT_MAX_WIDTH, Indent, WrapOptions, wrap, wrap_lines, wrap_paragraphs};
