//! Streaming transliteration of CoNLL-U annotation files.
//!
//! The crate rewrites the script of word forms and/or lemmas into a target
//! (typically Latin) script using a language-keyed, ordered chain of
//! pattern-substitution rules, and injects the result into the per-token
//! MISC column (`Translit=`, `LTranslit=`) and/or a `# translit` sentence
//! comment — preserving every other byte of the input.
//!
//! Typical library use:
//!
//! ```
//! use conllu_translit::{RuleTable, Transliterator};
//!
//! let table = RuleTable::bundled();
//! let engine = Transliterator::new(table, "rus").unwrap();
//! assert_eq!(engine.transliterate_word("Москва"), "Moskva");
//! ```

mod annotate;
pub mod conllu;
mod engine;
mod error;
mod table;

pub use annotate::{AnnotateOptions, annotate_sentence};
pub use engine::Transliterator;
pub use error::{Result, TranslitError};
pub use table::{RuleEntry, RuleTable};
