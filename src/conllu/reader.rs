//! Streaming sentence reader.
//!
//! A small state machine over raw lines:
//!
//! ```text
//!                    blank line
//!   BetweenSentences ─────────── (consume)
//!        │  '#' line                 ^
//!        v                           │ blank line: emit Sentence
//!    InComments ── other line ── InRecords
//! ```
//!
//! End of input while mid-sentence still emits the accumulated sentence — the
//! boundary is "end of comments+records", not strictly "blank line", so the
//! final sentence of a file lacking a trailing newline is not dropped.
//!
//! Structural problems (too few columns, a MISC entry without `=`) become
//! [`Diagnostic`]s on a side channel and the line is carried through
//! verbatim; only I/O failures propagate as errors.

use super::sentence::{Comment, MIN_COLUMNS, Record, Sentence, Token};
use crate::error::Result;
use std::fmt;
use std::io::BufRead;

/// A recoverable per-line problem, reported but never fatal.
#[derive(Debug, Clone)]
pub struct Diagnostic {
    /// 1-based input line number.
    pub line: usize,
    pub message: String,
}

impl fmt::Display for Diagnostic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.line, self.message)
    }
}

/// Incremental sentence reader over any buffered input.
pub struct Reader<R> {
    input: R,
    line_no: usize,
    diagnostics: Vec<Diagnostic>,
}

impl<R: BufRead> Reader<R> {
    pub fn new(input: R) -> Self {
        Reader {
            input,
            line_no: 0,
            diagnostics: Vec::new(),
        }
    }

    /// Diagnostics accumulated since the last call, oldest first.
    pub fn take_diagnostics(&mut self) -> Vec<Diagnostic> {
        std::mem::take(&mut self.diagnostics)
    }

    /// Read the next sentence, or `None` at end of input.
    pub fn read_sentence(&mut self) -> Result<Option<Sentence>> {
        let mut sentence = Sentence::new();
        let mut line = String::new();

        loop {
            line.clear();
            if self.input.read_line(&mut line)? == 0 {
                // EOF mid-sentence: emit what we have, unterminated.
                return Ok(if sentence.is_empty() {
                    None
                } else {
                    Some(sentence)
                });
            }
            self.line_no += 1;
            while line.ends_with('\n') || line.ends_with('\r') {
                line.pop();
            }

            if line.trim().is_empty() {
                if sentence.is_empty() {
                    // Extra blank lines between sentences.
                    continue;
                }
                sentence.terminated = true;
                return Ok(Some(sentence));
            }

            if line.starts_with('#') {
                sentence.comments.push(Comment::parse(&line));
                continue;
            }

            let columns: Vec<String> = line.split('\t').map(str::to_string).collect();
            if columns.len() < MIN_COLUMNS {
                self.diagnostics.push(Diagnostic {
                    line: self.line_no,
                    message: format!(
                        "malformed record: {} columns (expected at least {MIN_COLUMNS})",
                        columns.len()
                    ),
                });
                sentence.records.push(Record::Malformed(line.clone()));
                continue;
            }

            if columns[0].contains('-') {
                sentence.records.push(Record::Span(line.clone()));
                continue;
            }

            let token = Token::from_columns(columns);
            if token.misc.is_malformed() {
                self.diagnostics.push(Diagnostic {
                    line: self.line_no,
                    message: format!("MISC entry without '=': '{}'", token.misc.encode()),
                });
            }
            sentence.records.push(Record::Token(token));
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn reader(text: &str) -> Reader<&[u8]> {
        Reader::new(text.as_bytes())
    }

    const TWO_SENTENCES: &str = "\
# sent_id = s1
# text = le chat
1\tle\tle\tDET\t_\t_\t2\tdet\t_\tSpaceAfter=No
2\tchat\tchat\tNOUN\t_\t_\t0\troot\t_\t_

# sent_id = s2
1\tdort\tdormir\tVERB\t_\t_\t0\troot\t_\t_
";

    #[test]
    fn reads_sentences_and_comments_in_order() {
        let mut r = reader(TWO_SENTENCES);

        let first = r.read_sentence().unwrap().unwrap();
        assert_eq!(first.comments.len(), 2);
        assert_eq!(first.comments[0].key, "# sent_id");
        assert_eq!(first.comments[0].value.as_deref(), Some("s1"));
        assert_eq!(first.tokens().count(), 2);
        let forms: Vec<&str> = first.tokens().map(|t| t.form()).collect();
        assert_eq!(forms, ["le", "chat"]);

        let second = r.read_sentence().unwrap().unwrap();
        assert_eq!(second.comment_value("# sent_id"), Some("s2"));
        assert_eq!(second.tokens().next().unwrap().lemma(), "dormir");

        assert!(r.read_sentence().unwrap().is_none());
        assert!(r.take_diagnostics().is_empty());
    }

    #[test]
    fn comment_without_separator_keeps_whole_line_as_key() {
        let mut r = reader("# newdoc\n1\ta\ta\tX\t_\t_\t0\troot\t_\t_\n");
        let sentence = r.read_sentence().unwrap().unwrap();
        assert_eq!(sentence.comments[0].key, "# newdoc");
        assert_eq!(sentence.comments[0].value, None);
    }

    #[test]
    fn span_lines_pass_through_verbatim() {
        let input = "1-2\tdu\t_\t_\t_\t_\t_\t_\t_\t_\n\
                     1\tde\tde\tADP\t_\t_\t3\tcase\t_\t_\n\
                     2\tle\tle\tDET\t_\t_\t3\tdet\t_\t_\n";
        let mut r = reader(input);
        let sentence = r.read_sentence().unwrap().unwrap();
        assert_eq!(sentence.records.len(), 3);
        match &sentence.records[0] {
            Record::Span(line) => assert!(line.starts_with("1-2\t")),
            other => panic!("expected span, got {other:?}"),
        }
        // Span forms are not part of the token stream.
        assert_eq!(sentence.tokens().count(), 2);
    }

    #[test]
    fn short_record_yields_diagnostic_and_passes_through() {
        let input = "1\tok\tok\tX\t_\t_\t0\troot\t_\t_\n\
                     2\tbad\tline\twith\tsix\tcolumns\n\
                     3\talso\tok\tX\t_\t_\t0\troot\t_\t_\n";
        let mut r = reader(input);
        let sentence = r.read_sentence().unwrap().unwrap();

        // Processing did not stop at the malformed line.
        assert_eq!(sentence.records.len(), 3);
        assert_eq!(sentence.tokens().count(), 2);
        match &sentence.records[1] {
            Record::Malformed(line) => assert_eq!(line, "2\tbad\tline\twith\tsix\tcolumns"),
            other => panic!("expected malformed, got {other:?}"),
        }

        let diags = r.take_diagnostics();
        assert_eq!(diags.len(), 1);
        assert_eq!(diags[0].line, 2);
        assert!(diags[0].message.contains("6 columns"));
        assert_eq!(diags[0].to_string(), format!("2: {}", diags[0].message));
    }

    #[test]
    fn malformed_misc_entry_is_reported_not_fatal() {
        let mut r = reader("1\ta\ta\tX\t_\t_\t0\troot\t_\tNoEquals\n");
        let sentence = r.read_sentence().unwrap().unwrap();
        assert_eq!(sentence.tokens().count(), 1);
        let diags = r.take_diagnostics();
        assert_eq!(diags.len(), 1);
        assert!(diags[0].message.contains("NoEquals"));
    }

    #[test]
    fn eof_mid_sentence_still_emits_the_sentence() {
        // No trailing blank line, no trailing newline.
        let mut r = reader("1\tfin\tfin\tNOUN\t_\t_\t0\troot\t_\t_");
        let sentence = r.read_sentence().unwrap().unwrap();
        assert_eq!(sentence.tokens().count(), 1);
        assert!(!sentence.terminated);
        assert!(r.read_sentence().unwrap().is_none());
    }

    #[test]
    fn leading_blank_lines_are_consumed() {
        let mut r = reader("\n\n1\ta\ta\tX\t_\t_\t0\troot\t_\t_\n\n");
        let sentence = r.read_sentence().unwrap().unwrap();
        assert_eq!(sentence.tokens().count(), 1);
        assert!(sentence.terminated);
        assert!(r.read_sentence().unwrap().is_none());
    }

    #[test]
    fn line_numbers_count_from_one_across_sentences() {
        let input = "1\ta\ta\tX\t_\t_\t0\troot\t_\t_\n\n\nshort\tline\n";
        let mut r = reader(input);
        r.read_sentence().unwrap().unwrap();
        r.read_sentence().unwrap().unwrap();
        let diags = r.take_diagnostics();
        assert_eq!(diags.len(), 1);
        assert_eq!(diags[0].line, 4);
    }
}
