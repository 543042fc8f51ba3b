//! Applying the engine to parsed sentences.
//!
//! This is the policy layer between the pure engine and the stream model:
//! which fields get transliterated, under which MISC keys the results land,
//! and when an existing value is respected versus replaced.

use crate::conllu::{Record, Sentence, surface_text};
use crate::engine::Transliterator;

/// MISC key for the transliterated form.
const TRANSLIT: &str = "Translit";
/// MISC key for the transliterated lemma.
const LEMMA_TRANSLIT: &str = "LTranslit";
/// Comment key for the whole-sentence transliteration.
const SENTENCE_TRANSLIT: &str = "# translit";

/// What to transliterate, and whether existing values are replaced.
#[derive(Debug, Clone)]
pub struct AnnotateOptions {
    /// Write `Translit=` from the FORM column.
    pub forms: bool,
    /// Write `LTranslit=` from the LEMMA column.
    pub lemmas: bool,
    /// Replace values that are already present.
    pub overwrite: bool,
    /// Add a `# translit` comment with the whole-sentence transliteration.
    pub sentence: bool,
}

impl Default for AnnotateOptions {
    fn default() -> Self {
        AnnotateOptions {
            forms: true,
            lemmas: false,
            overwrite: false,
            sentence: false,
        }
    }
}

/// Transliterate the selected fields of `sentence` in place.
///
/// A field whose target key already exists is left byte-identical unless
/// `overwrite` is set. Span and malformed records are never touched.
pub fn annotate_sentence(
    engine: &Transliterator,
    sentence: &mut Sentence,
    options: &AnnotateOptions,
) {
    for record in &mut sentence.records {
        let Record::Token(token) = record else {
            continue;
        };
        if options.forms && (options.overwrite || !token.misc.contains(TRANSLIT)) {
            let translit = engine.transliterate_word(token.form());
            token.misc.set(TRANSLIT, &translit);
        }
        if options.lemmas && (options.overwrite || !token.misc.contains(LEMMA_TRANSLIT)) {
            let translit = engine.transliterate_word(token.lemma());
            token.misc.set(LEMMA_TRANSLIT, &translit);
        }
    }

    if options.sentence && (options.overwrite || !sentence.has_comment(SENTENCE_TRANSLIT)) {
        let translit = engine.transliterate_word(&surface_text(sentence.tokens()));
        sentence.set_comment(SENTENCE_TRANSLIT, &translit);
    }
}
