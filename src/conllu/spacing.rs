//! Inter-token spacing reconstruction.
//!
//! Whole-sentence transliteration needs the sentence's surface text, which
//! CoNLL-U does not store directly. The best available signal is per-token:
//! `SpaceAfter=No` (no separator) and `SpacesAfter=...` (an escaped literal
//! separator). Everything else gets a single space. True original spacing is
//! only partially recoverable from these hints — this is explicitly a
//! best-effort reconstruction.

use super::sentence::Token;

/// The literal separator to append after `token` when concatenating forms.
///
/// `SpaceAfter` suppresses the separator on presence alone, whatever its
/// value.
pub fn separator_after(token: &Token) -> String {
    if token.misc.contains("SpaceAfter") {
        return String::new();
    }
    if let Some(value) = token.misc.get("SpacesAfter") {
        return decode_escapes(value);
    }
    " ".to_string()
}

/// Decode a `SpacesAfter` value: `\s` → space, `\t` → tab. `\n` is flattened
/// to a single space so the reconstructed sentence stays on one line; the
/// exact shape of multi-line gaps is lost, and that loss is accepted.
fn decode_escapes(value: &str) -> String {
    value.replace("\\s", " ").replace("\\t", "\t").replace("\\n", " ")
}

/// Concatenate token forms with their reconstructed separators.
///
/// The last token's separator is included too; callers that feed the result
/// to the engine trim trailing whitespace afterwards.
pub fn surface_text<'a, I>(tokens: I) -> String
where
    I: IntoIterator<Item = &'a Token>,
{
    let mut text = String::new();
    for token in tokens {
        text.push_str(token.form());
        text.push_str(&separator_after(token));
    }
    text
}
