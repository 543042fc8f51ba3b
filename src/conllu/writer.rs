//! Sentence serialization.
//!
//! Comments first, records second, blank line last (only if the input block
//! had one). Everything the engine did not touch is written exactly as it
//! was read; the `Display` impls on `Comment` and `Token` carry that
//! guarantee.

use super::sentence::{Record, Sentence};
use crate::error::Result;
use std::io::Write;

/// Serialize one sentence to `out`.
pub fn write_sentence<W: Write>(out: &mut W, sentence: &Sentence) -> Result<()> {
    for comment in &sentence.comments {
        writeln!(out, "{comment}")?;
    }
    for record in &sentence.records {
        match record {
            Record::Span(line) | Record::Malformed(line) => writeln!(out, "{line}")?,
            Record::Token(token) => writeln!(out, "{token}")?,
        }
    }
    if sentence.terminated {
        writeln!(out)?;
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::conllu::Reader;

    fn round_trip(input: &str) -> String {
        let mut reader = Reader::new(input.as_bytes());
        let mut out = Vec::new();
        while let Some(sentence) = reader.read_sentence().unwrap() {
            write_sentence(&mut out, &sentence).unwrap();
        }
        String::from_utf8(out).unwrap()
    }

    #[test]
    fn untouched_input_round_trips_byte_for_byte() {
        let input = "\
# sent_id = s1
# text with no separator
1-2\tau\t_\t_\t_\t_\t_\t_\t_\t_
1\tà\tà\tADP\t_\t_\t3\tcase\t_\t_
2\tle\tle\tDET\t_\t_\t3\tdet\t_\tSpaceAfter=No
short\tline

# sent_id = s2
1\tfin\tfin\tNOUN\t_\t_\t0\troot\t_\tTranslit=fin
";
        assert_eq!(round_trip(input), input);
    }

    #[test]
    fn final_sentence_without_blank_line_stays_unterminated() {
        let input = "1\ta\ta\tX\t_\t_\t0\troot\t_\t_";
        assert_eq!(round_trip(input), input.to_string() + "\n");
    }

    #[test]
    fn comment_spacing_quirks_survive() {
        // No spaces around '=' in the source: the raw line wins.
        let input = "# sent_id=s1\n1\ta\ta\tX\t_\t_\t0\troot\t_\t_\n\n";
        assert_eq!(round_trip(input), input);
    }
}
