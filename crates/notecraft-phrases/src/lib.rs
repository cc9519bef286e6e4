//! notecraft phrase book
//!
//! Maps slash triggers (e.g. `/abx`) to the raw template bodies they expand
//! to. Bodies are stored as-is; interpreting their `[[a|b]]` choice groups
//! is the job of `notecraft-core`.
//!
//! # Usage
//!
//! ```
//! use notecraft_phrases::{PhraseBook, PhraseEntry};
//!
//! let mut builder = PhraseBook::builder();
//! builder.add_entry(PhraseEntry::new("/htn", "Hypertension").unwrap()).unwrap();
//! let book = builder.build();
//!
//! assert_eq!(book.lookup("/htn"), Some("Hypertension"));
//! assert_eq!(book.lookup("/unknown"), None);
//! ```

mod book;
pub mod builtin;
mod error;
pub mod loader;
mod phrase;

pub use book::{PhraseBook, PhraseBookBuilder};
pub use error::PhraseError;
pub use phrase::{PhraseEntry, TriggerSpan, trigger_at_cursor, validate_trigger};
