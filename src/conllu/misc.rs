//! The MISC sub-field map.
//!
//! MISC is a `|`-separated list of `Key=Value` pairs, with the single value
//! `_` standing for an empty list. The map here is an ordered association
//! list, not a deduplicating container: duplicate keys and entry order are
//! part of the column's identity and must survive a round trip.
//!
//! The decoded source string is cached so that a map nobody mutated encodes
//! back byte-for-byte — whatever oddities the input had. Only after a `set`
//! does encoding re-join the entries.

/// Ordered key → optional-value map for one token's MISC column.
#[derive(Debug, Clone)]
pub struct MiscMap {
    raw: String,
    entries: Vec<(String, Option<String>)>,
    modified: bool,
    malformed: bool,
}

impl MiscMap {
    /// Decode a MISC column.
    ///
    /// An entry lacking `=` is kept with no value and flags the map as
    /// malformed; decoding never fails.
    pub fn parse(raw: &str) -> Self {
        let mut entries = Vec::new();
        let mut malformed = false;
        if raw != "_" {
            for part in raw.split('|') {
                match part.split_once('=') {
                    Some((key, value)) => {
                        entries.push((key.to_string(), Some(value.to_string())));
                    }
                    None => {
                        entries.push((part.to_string(), None));
                        malformed = true;
                    }
                }
            }
        }
        MiscMap {
            raw: raw.to_string(),
            entries,
            modified: false,
            malformed,
        }
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Whether `key` is present at all, valued or not.
    pub fn contains(&self, key: &str) -> bool {
        self.entries.iter().any(|(k, _)| k == key)
    }

    /// The value of the first entry with `key`, if it has one.
    pub fn get(&self, key: &str) -> Option<&str> {
        self.entries
            .iter()
            .find(|(k, _)| k == key)
            .and_then(|(_, value)| value.as_deref())
    }

    /// Set `key` to `value`: rewrites the first matching entry in place,
    /// keeping its position, or appends a new entry at the end.
    pub fn set(&mut self, key: &str, value: &str) {
        match self.entries.iter_mut().find(|(k, _)| k == key) {
            Some((_, slot)) => *slot = Some(value.to_string()),
            None => self
                .entries
                .push((key.to_string(), Some(value.to_string()))),
        }
        self.modified = true;
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, Option<&str>)> {
        self.entries
            .iter()
            .map(|(key, value)| (key.as_str(), value.as_deref()))
    }

    /// Whether any decoded entry lacked a `=` separator.
    pub(crate) fn is_malformed(&self) -> bool {
        self.malformed
    }

    /// Re-encode the column.
    ///
    /// An untouched map reproduces its source exactly; a mutated one re-joins
    /// the entries in their current order.
    pub fn encode(&self) -> String {
        if !self.modified {
            return self.raw.clone();
        }
        if self.entries.is_empty() {
            return "_".to_string();
        }
        let parts: Vec<String> = self
            .entries
            .iter()
            .map(|(key, value)| match value {
                Some(value) => format!("{key}={value}"),
                None => key.clone(),
            })
            .collect();
        parts.join("|")
    }
}
