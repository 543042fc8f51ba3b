//! Rule table loading and alias resolution.
//!
//! A rule table maps a language/script key to an *ordered* sequence of
//! pattern→replacement rules. It is read once from a JSON resource (the
//! bundled one, or a file given on the command line) and is immutable for the
//! rest of the run; compilation of the patterns happens later, in
//! [`Transliterator::new`](crate::Transliterator::new).
//!
//! The resource format, per key:
//!
//! ```text
//! "cyril": { "Щ": "Šč", "щ": "šč", ... }   concrete: ordered rules
//! "rus":   "@cyril"                        alias: first char is a marker,
//!                                          the rest is the target key
//! ```
//!
//! ## Invariants
//!
//! - Rule order inside a key is the JSON object order and is never reordered
//!   or deduplicated (`serde_json`'s `preserve_order` feature carries it
//!   through). Later rules see the output of earlier ones.
//! - An alias is followed exactly once. An alias pointing to itself, to a
//!   missing key, or to another alias fails with `BrokenAlias` — the loader
//!   can never loop on a malformed table.

use crate::error::{Result, TranslitError};
use once_cell::sync::Lazy;
use serde::Deserialize;
use serde_json::Value;
use std::fs;
use std::path::Path;

/// A single pattern→replacement rule.
///
/// `pattern` is uncompiled regex source; `replacement` may use the `regex`
/// crate's `$group` expansion syntax.
#[derive(Debug, Clone)]
pub struct RuleEntry {
    pub pattern: String,
    pub replacement: String,
}

/// A rule-table entry: either a concrete ordered rule sequence or an alias
/// redirecting to another key.
#[derive(Debug, Clone)]
enum TableEntry {
    Concrete(Vec<RuleEntry>),
    Alias(String),
}

/// Raw JSON shape of one entry, before validation.
#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum RawEntry {
    Alias(String),
    Rules(serde_json::Map<String, Value>),
}

/// The loaded, immutable language→rules mapping.
///
/// Stored as an ordered association list: lookups are linear, but tables hold
/// a few dozen keys at most, and keeping the list form preserves the resource
/// order for error listings.
#[derive(Debug)]
pub struct RuleTable {
    entries: Vec<(String, TableEntry)>,
}

static BUNDLED_JSON: &str = include_str!("../data/translit.json");

static BUNDLED: Lazy<RuleTable> =
    Lazy::new(|| RuleTable::parse(BUNDLED_JSON).expect("bundled rule resource is valid"));

impl RuleTable {
    /// Parse a rule table from JSON text.
    pub fn parse(json: &str) -> Result<Self> {
        let root: serde_json::Map<String, Value> = serde_json::from_str(json)
            .map_err(|err| TranslitError::InvalidResource(err.to_string()))?;

        let mut entries = Vec::with_capacity(root.len());
        for (key, value) in root {
            let raw: RawEntry = serde_json::from_value(value).map_err(|_| {
                TranslitError::InvalidResource(format!(
                    "key '{key}': expected an object of rules or an alias string"
                ))
            })?;
            let entry = match raw {
                RawEntry::Alias(target) => TableEntry::Alias(target),
                RawEntry::Rules(rules) => {
                    let mut chain = Vec::with_capacity(rules.len());
                    for (pattern, replacement) in rules {
                        let Value::String(replacement) = replacement else {
                            return Err(TranslitError::InvalidResource(format!(
                                "key '{key}', pattern /{pattern}/: replacement must be a string"
                            )));
                        };
                        chain.push(RuleEntry { pattern, replacement });
                    }
                    TableEntry::Concrete(chain)
                }
            };
            entries.push((key, entry));
        }
        Ok(RuleTable { entries })
    }

    /// Load a rule table from a file path.
    pub fn load(path: &Path) -> Result<Self> {
        let text = fs::read_to_string(path)?;
        Self::parse(&text).map_err(|err| match err {
            TranslitError::InvalidResource(message) => TranslitError::Resource {
                path: path.display().to_string(),
                message,
            },
            other => other,
        })
    }

    /// The rule table bundled into the binary, parsed on first use.
    pub fn bundled() -> &'static RuleTable {
        &BUNDLED
    }

    /// All keys, in resource order (concrete and alias alike).
    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.entries.iter().map(|(key, _)| key.as_str())
    }

    fn get(&self, key: &str) -> Option<&TableEntry> {
        self.entries
            .iter()
            .find(|(k, _)| k == key)
            .map(|(_, entry)| entry)
    }

    /// Resolve `key` to its concrete rule sequence, following at most one
    /// alias hop.
    pub fn resolve(&self, key: &str) -> Result<&[RuleEntry]> {
        let entry = self.get(key).ok_or_else(|| TranslitError::UnknownKey {
            key: key.to_string(),
            available: self.keys().map(str::to_string).collect(),
        })?;

        match entry {
            TableEntry::Concrete(rules) => Ok(rules),
            TableEntry::Alias(raw) => {
                let target = alias_target(raw);
                // A self-referential alias must fail fast, not loop.
                if target.is_empty() || target == key {
                    return Err(broken(key, target));
                }
                match self.get(target) {
                    Some(TableEntry::Concrete(rules)) => Ok(rules),
                    // Only one redirection level is supported.
                    Some(TableEntry::Alias(_)) | None => Err(broken(key, target)),
                }
            }
        }
    }
}

/// The first character of an alias value is only a marker; the target key is
/// everything after it.
fn alias_target(raw: &str) -> &str {
    let mut chars = raw.chars();
    chars.next();
    chars.as_str()
}

fn broken(key: &str, target: &str) -> TranslitError {
    TranslitError::BrokenAlias {
        key: key.to_string(),
        target: target.to_string(),
    }
}
