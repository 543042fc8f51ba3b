//! The transliteration engine.
//!
//! A [`Transliterator`] binds one language/script key to its resolved,
//! pattern-compiled rule chain. Construction does all the expensive work
//! (alias resolution, regex compilation); after that the engine is immutable
//! and every call is a pure function over its input:
//!
//! ```text
//! resource ── RuleTable::parse ── resolve(key) ── compile each pattern
//!                                                        │
//!                                                        v
//! text ── rule 1 ── rule 2 ── ... ── rule n ── transliterated text
//!         (each rule: global substitution over the *current* text)
//! ```
//!
//! ## Key concepts
//!
//! - **Sequential substitution**: the output of rule *i* is the input to rule
//!   *i+1*. This is what lets a generic diacritic-stripping rule follow a
//!   language-specific digraph rule, and it is why rule order in the resource
//!   is significant.
//! - **Global substitution**: every non-overlapping match is replaced, not
//!   just the first. A replacement that re-matches its own pattern can only
//!   loop inside the `regex` crate's single `replace_all` pass, never across
//!   rules, so the engine itself always terminates.
//! - **Word padding**: per-token calls go through [`transliterate_word`],
//!   which appends one space before applying the chain and trims trailing
//!   whitespace after. Boundary-sensitive rules (Greek final sigma and the
//!   like) thereby see an end-of-word context even for a lone word.
//!
//! [`transliterate_word`]: Transliterator::transliterate_word
//!
//! ## Debugging
//!
//! Set `CONLLU_TRANSLIT_DEBUG=1` to print each rule application that changed
//! the text.

use crate::error::{Result, TranslitError};
use crate::table::RuleTable;
use regex::Regex;

/// One compiled rule of a chain.
#[derive(Debug)]
struct CompiledRule {
    pattern: Regex,
    replacement: String,
}

/// A transliteration engine for a single language/script key.
///
/// Immutable after construction; safe to share across threads.
#[derive(Debug)]
pub struct Transliterator {
    key: String,
    chain: Vec<CompiledRule>,
}

impl Transliterator {
    /// Resolve `key` in `table` and compile its rule chain.
    ///
    /// Fails with `UnknownKey`/`BrokenAlias` if the key does not lead to a
    /// concrete rule sequence, or `BadPattern` if any pattern in the chain
    /// does not compile.
    pub fn new(table: &RuleTable, key: &str) -> Result<Self> {
        let rules = table.resolve(key)?;
        let mut chain = Vec::with_capacity(rules.len());
        for rule in rules {
            let pattern =
                Regex::new(&rule.pattern).map_err(|source| TranslitError::BadPattern {
                    key: key.to_string(),
                    pattern: rule.pattern.clone(),
                    source,
                })?;
            chain.push(CompiledRule {
                pattern,
                replacement: rule.replacement.clone(),
            });
        }
        Ok(Transliterator {
            key: key.to_string(),
            chain,
        })
    }

    /// The key this engine was constructed for.
    pub fn key(&self) -> &str {
        &self.key
    }

    /// Apply the whole rule chain to `text`.
    ///
    /// Empty input yields empty output; text not matched by any rule passes
    /// through unchanged.
    pub fn transliterate(&self, text: &str) -> String {
        let debug = std::env::var_os("CONLLU_TRANSLIT_DEBUG").is_some();
        let mut text = text.to_string();
        for rule in &self.chain {
            if rule.pattern.is_match(&text) {
                text = rule
                    .pattern
                    .replace_all(&text, rule.replacement.as_str())
                    .into_owned();
                if debug {
                    eprintln!("[apply] /{}/ -> \"{}\"", rule.pattern.as_str(), text);
                }
            }
        }
        text
    }

    /// Transliterate a single word with an end-of-word context.
    ///
    /// Pads the word with one trailing space so that rules anchored on a
    /// following space can fire, then trims trailing whitespace from the
    /// result.
    pub fn transliterate_word(&self, word: &str) -> String {
        let mut padded = String::with_capacity(word.len() + 1);
        padded.push_str(word);
        padded.push(' ');
        let out = self.transliterate(&padded);
        out.trim_end().to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn engine(json: &str, key: &str) -> Transliterator {
        let table = RuleTable::parse(json).unwrap();
        Transliterator::new(&table, key).unwrap()
    }

    #[test]
    fn rules_apply_sequentially_in_stored_order() {
        // (a→b) then (b→c): the second rule sees the first rule's output.
        let tl = engine(r#"{ "xx": { "a": "b", "b": "c" } }"#, "xx");
        assert_eq!(tl.transliterate("a"), "c");

        // Reversed order: "a" becomes "b" and stays there.
        let tl = engine(r#"{ "xx": { "b": "c", "a": "b" } }"#, "xx");
        assert_eq!(tl.transliterate("a"), "b");
    }

    #[test]
    fn substitution_is_global_within_a_rule() {
        let tl = engine(r#"{ "xx": { "c": "k" } }"#, "xx");
        assert_eq!(tl.transliterate("cacao count"), "kakao kount");
    }

    #[test]
    fn empty_input_yields_empty_output() {
        let tl = engine(r#"{ "xx": { "a": "b" } }"#, "xx");
        assert_eq!(tl.transliterate(""), "");
    }

    #[test]
    fn unmatched_text_passes_through() {
        let tl = engine(r#"{ "xx": { "q": "k" } }"#, "xx");
        assert_eq!(tl.transliterate("plain text"), "plain text");
    }

    #[test]
    fn alias_key_behaves_like_its_target() {
        let json = r#"{ "xx": { "a": "b" }, "yy": "@xx" }"#;
        let direct = engine(json, "xx");
        let aliased = engine(json, "yy");
        assert_eq!(direct.transliterate("aaa"), aliased.transliterate("aaa"));
    }

    #[test]
    fn bad_pattern_reports_key_and_source() {
        let table = RuleTable::parse(r#"{ "xx": { "(": "k" } }"#).unwrap();
        let err = Transliterator::new(&table, "xx").unwrap_err();
        match err {
            TranslitError::BadPattern { key, pattern, .. } => {
                assert_eq!(key, "xx");
                assert_eq!(pattern, "(");
            }
            other => panic!("expected BadPattern, got {other:?}"),
        }
    }

    #[test]
    fn word_padding_gives_boundary_context() {
        // Rule only fires at end of word, marked by the padding space.
        let tl = engine(r#"{ "xx": { "s ": "ç " } }"#, "xx");
        assert_eq!(tl.transliterate_word("las"), "laç");
        // The padding itself never leaks into the output.
        assert_eq!(tl.transliterate_word("la"), "la");
    }

    #[test]
    fn replacement_supports_group_expansion() {
        let tl = engine(r#"{ "xx": { "(^|\\s)o": "${1}vo" } }"#, "xx");
        assert_eq!(tl.transliterate("ola bola"), "vola bola");
    }

    #[test]
    fn engine_is_send_and_sync() {
        fn assert_send_sync<T: Send + Sync>() {}
        assert_send_sync::<Transliterator>();
    }

    #[test]
    fn cyrillic_sample_cases() {
        let table = RuleTable::bundled();
        let tl = Transliterator::new(table, "rus").unwrap();

        // Array of (expected, input)
        let cases: Vec<(&str, &str)> = vec![
            ("Moskva", "Москва"),
            ("ščuka", "щука"),
            ("Čexov", "Чехов"),
            ("jazyk", "язык"),
            ("podʺezd", "подъезд"),
            ("žiznʹ", "жизнь"),
        ];
        for (expected, input) in cases {
            assert_eq!(tl.transliterate_word(input), expected, "input: {input}");
        }
    }
}
