//! Sentence, comment, and record types.
//!
//! The model is deliberately conservative about what it parses: a token keeps
//! *all* of its columns as opaque strings and only the MISC column gets a
//! structured view, because MISC is the only column this toolkit writes.
//! Span and malformed records keep their whole line. That is what makes the
//! writer byte-faithful without any re-escaping logic.

use super::misc::MiscMap;
use std::fmt;

/// Minimum column count for a parsable record line.
pub const MIN_COLUMNS: usize = 10;

/// Column indices we actually read or write.
const FORM: usize = 1;
const LEMMA: usize = 2;
const MISC: usize = 9;

/// One `#`-prefixed metadata line.
///
/// The original line is kept verbatim and wins during serialization; the
/// parsed key/value pair exists for lookups and for comments set
/// programmatically (which have no original line).
#[derive(Debug, Clone)]
pub struct Comment {
    raw: Option<String>,
    pub key: String,
    pub value: Option<String>,
}

impl Comment {
    /// Parse a raw comment line, splitting on the first `=`.
    ///
    /// Without `=`, the whole trimmed line is the key and there is no value.
    pub(crate) fn parse(line: &str) -> Self {
        match line.split_once('=') {
            Some((key, value)) => Comment {
                raw: Some(line.to_string()),
                key: key.trim().to_string(),
                value: Some(value.trim().to_string()),
            },
            None => Comment {
                raw: Some(line.to_string()),
                key: line.trim().to_string(),
                value: None,
            },
        }
    }

    fn composed(key: &str, value: &str) -> Self {
        Comment {
            raw: None,
            key: key.to_string(),
            value: Some(value.to_string()),
        }
    }
}

impl fmt::Display for Comment {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match (&self.raw, &self.value) {
            (Some(raw), _) => f.write_str(raw),
            (None, Some(value)) => write!(f, "{} = {}", self.key, value),
            (None, None) => f.write_str(&self.key),
        }
    }
}

/// One non-comment line of a sentence block.
#[derive(Debug, Clone)]
pub enum Record {
    /// Multiword span line (identifier contains `-`); passed through verbatim.
    Span(String),
    /// Line with too few columns; passed through verbatim. The reader has
    /// already emitted a diagnostic for it.
    Malformed(String),
    /// An ordinary token line.
    Token(Token),
}

/// A parsed token record.
///
/// All columns are kept as read; `misc` is the structured view of column 10.
#[derive(Debug, Clone)]
pub struct Token {
    columns: Vec<String>,
    pub misc: MiscMap,
}

impl Token {
    /// Requires `columns.len() >= MIN_COLUMNS`; the reader guarantees this.
    pub(crate) fn from_columns(columns: Vec<String>) -> Self {
        let misc = MiscMap::parse(&columns[MISC]);
        Token { columns, misc }
    }

    pub fn id(&self) -> &str {
        &self.columns[0]
    }

    pub fn form(&self) -> &str {
        &self.columns[FORM]
    }

    pub fn lemma(&self) -> &str {
        &self.columns[LEMMA]
    }
}

impl fmt::Display for Token {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (idx, column) in self.columns.iter().enumerate() {
            if idx > 0 {
                f.write_str("\t")?;
            }
            if idx == MISC {
                f.write_str(&self.misc.encode())?;
            } else {
                f.write_str(column)?;
            }
        }
        Ok(())
    }
}

/// One sentence block: comments, then records.
#[derive(Debug, Clone)]
pub struct Sentence {
    pub comments: Vec<Comment>,
    pub records: Vec<Record>,
    /// Whether the input block ended with a blank line. The writer mirrors
    /// this so a final sentence without one round-trips.
    pub(crate) terminated: bool,
}

impl Sentence {
    pub(crate) fn new() -> Self {
        Sentence {
            comments: Vec::new(),
            records: Vec::new(),
            terminated: false,
        }
    }

    pub fn is_empty(&self) -> bool {
        self.comments.is_empty() && self.records.is_empty()
    }

    /// The token records, in order (spans and malformed lines skipped).
    pub fn tokens(&self) -> impl Iterator<Item = &Token> {
        self.records.iter().filter_map(|record| match record {
            Record::Token(token) => Some(token),
            _ => None,
        })
    }

    pub fn has_comment(&self, key: &str) -> bool {
        self.comments.iter().any(|comment| comment.key == key)
    }

    /// The value of the first comment with `key`, if any.
    pub fn comment_value(&self, key: &str) -> Option<&str> {
        self.comments
            .iter()
            .find(|comment| comment.key == key)
            .and_then(|comment| comment.value.as_deref())
    }

    /// Set a comment value: updates the first comment with `key` in place
    /// (re-rendering it in composed form), or appends a new comment after the
    /// existing ones.
    pub fn set_comment(&mut self, key: &str, value: &str) {
        match self.comments.iter_mut().find(|comment| comment.key == key) {
            Some(comment) => *comment = Comment::composed(key, value),
            None => self.comments.push(Comment::composed(key, value)),
        }
    }
}
