//! Crate error types.
//!
//! Only *fatal* conditions live here: anything that should abort a run before
//! (or instead of) producing output. Per-line problems in the input stream are
//! deliberately not errors — the reader reports them as
//! [`Diagnostic`](crate::conllu::Diagnostic) values on a side channel and keeps
//! going, so a single bad record can never truncate a batch job.

use thiserror::Error;

/// The primary error type for all fatal operations in this crate.
#[derive(Debug, Error)]
pub enum TranslitError {
    /// An error originating from I/O operations.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// The rule resource file exists but could not be parsed.
    #[error("rule resource {path}: {message}")]
    Resource { path: String, message: String },

    /// The rule resource parsed as JSON but does not have the expected shape
    /// (a key must map to an object of pattern/replacement pairs or to an
    /// alias string).
    #[error("invalid rule resource: {0}")]
    InvalidResource(String),

    /// The requested language/script key is not present in the rule table.
    #[error("unknown language/script key '{key}'; available: {}", .available.join(", "))]
    UnknownKey { key: String, available: Vec<String> },

    /// An alias entry does not lead to a concrete rule sequence in one hop.
    #[error("alias '{key}' points to '{target}', which is not a concrete rule sequence")]
    BrokenAlias { key: String, target: String },

    /// A rule pattern in the resolved chain failed to compile.
    #[error("bad pattern for '{key}': /{pattern}/: {source}")]
    BadPattern {
        key: String,
        pattern: String,
        source: regex::Error,
    },
}

/// A convenience `Result` type alias using the crate's `TranslitError` type.
pub type Result<T> = std::result::Result<T, TranslitError>;
