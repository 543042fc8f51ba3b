//! CoNLL-U stream model.
//!
//! This module is the structural half of the crate: reading the annotation
//! format sentence by sentence, holding it in a form that round-trips
//! byte-faithfully, and writing it back out. The transliteration engine only
//! ever touches the pieces this module hands it (forms, lemmas, the MISC
//! column, one sentence comment); everything else is carried through opaque.
//!
//! ## How the parts work together
//!
//! ```text
//! raw lines ── Reader::read_sentence ── Sentence { comments, records }
//!                    │                       │
//!                    │ Diagnostic            │ annotate (src/annotate.rs)
//!                    v (side channel)        v
//!                 stderr            write_sentence ── output
//! ```
//!
//! ## Responsibilities by module
//!
//! - `sentence.rs`: the `Sentence`/`Comment`/`Record`/`Token` data model.
//!   Comments and pass-through records keep their original line text so an
//!   untouched sentence serializes back byte-for-byte.
//! - `misc.rs`: the ordered, duplicate-tolerant MISC sub-field map.
//! - `reader.rs`: the line state machine. Malformed records become
//!   `Diagnostic`s plus verbatim pass-through lines, never hard errors.
//! - `spacing.rs`: best-effort reconstruction of inter-token spacing from
//!   `SpaceAfter`/`SpacesAfter` hints, used for whole-sentence
//!   transliteration.
//! - `writer.rs`: serialization back to the output stream.
//!
//! ## Invariants
//!
//! - Comment order and duplicate comment keys round-trip exactly.
//! - A record the engine did not mutate is emitted byte-identical to its
//!   input line, including malformed ones.
//! - The final sentence of a file without a trailing blank line is emitted
//!   without one.

mod misc;
mod reader;
mod sentence;
mod spacing;
mod writer;

pub use misc::MiscMap;
pub use reader::{Diagnostic, Reader};
pub use sentence::{Comment, MIN_COLUMNS, Record, Sentence, Token};
pub use spacing::{separator_after, surface_text};
pub use writer::write_sentence;
