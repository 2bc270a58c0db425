//! Segmentation of input text into word and non-word runs.
//!
//! Every character of the input belongs to exactly one segment, so
//! concatenating the segments in order reproduces the input verbatim.

pub mod case_handling;

/// Classification of a text segment.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SegmentKind {
    /// One or more letters, optionally with a single internal hyphen
    /// joining two letter runs.
    Word,
    /// A run of whitespace characters.
    Whitespace,
    /// A run of characters that are neither letters nor whitespace.
    Other,
}

/// A contiguous slice of the input text with its classification.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Segment<'a> {
    /// What kind of run this is.
    pub kind: SegmentKind,
    /// The verbatim text of the run.
    pub text: &'a str,
}

/// Lazy iterator over the segments of a string.
pub struct Segments<'a> {
    text: &'a str,
    cursor: usize,
}

impl<'a> Segments<'a> {
    fn new(text: &'a str) -> Segments<'a> {
        Segments { text, cursor: 0 }
    }
}

fn run_len(s: &str, pred: impl Fn(char) -> bool) -> usize {
    s.char_indices()
        .find(|&(_, c)| !pred(c))
        .map(|(i, _)| i)
        .unwrap_or(s.len())
}

impl<'a> Iterator for Segments<'a> {
    type Item = Segment<'a>;

    fn next(&mut self) -> Option<Segment<'a>> {
        let rest = &self.text[self.cursor..];
        let first = rest.chars().next()?;

        let (kind, len) = if first.is_whitespace() {
            (SegmentKind::Whitespace, run_len(rest, char::is_whitespace))
        } else if first.is_alphabetic() {
            let mut len = run_len(rest, char::is_alphabetic);
            // A hyphen is part of the word only when letters follow it.
            if let Some(tail) = rest[len..].strip_prefix('-') {
                let tail_len = run_len(tail, char::is_alphabetic);
                if tail_len > 0 {
                    len += '-'.len_utf8() + tail_len;
                }
            }
            (SegmentKind::Word, len)
        } else {
            (
                SegmentKind::Other,
                run_len(rest, |c| !c.is_whitespace() && !c.is_alphabetic()),
            )
        };

        self.cursor += len;
        Some(Segment {
            kind,
            text: &rest[..len],
        })
    }
}

/// Extension trait providing segmentation on string slices.
pub trait Tokenize {
    /// Iterates over the word, whitespace and other segments of `self`.
    fn segments(&self) -> Segments;
}

impl Tokenize for str {
    fn segments(&self) -> Segments {
        Segments::new(self)
    }
}

#[cfg(test)]
mod tests {
    use super::SegmentKind::*;
    use super::*;

    fn collect(text: &str) -> Vec<(SegmentKind, &str)> {
        text.segments().map(|s| (s.kind, s.text)).collect()
    }

    #[test]
    fn basic() {
        assert_eq!(
            collect("Thiss is a tst."),
            vec![
                (Word, "Thiss"),
                (Whitespace, " "),
                (Word, "is"),
                (Whitespace, " "),
                (Word, "a"),
                (Whitespace, " "),
                (Word, "tst"),
                (Other, "."),
            ]
        );
    }

    #[test]
    fn punctuation_and_digits_are_other() {
        assert_eq!(
            collect("12:30, ok?!"),
            vec![
                (Other, "12:30,"),
                (Whitespace, " "),
                (Word, "ok"),
                (Other, "?!"),
            ]
        );
    }

    #[test]
    fn hyphen_joins_two_letter_runs() {
        assert_eq!(collect("well-known"), vec![(Word, "well-known")]);
        assert_eq!(
            collect("a-b-c"),
            vec![(Word, "a-b"), (Other, "-"), (Word, "c")]
        );
        assert_eq!(collect("trailing- x"), vec![
            (Word, "trailing"),
            (Other, "-"),
            (Whitespace, " "),
            (Word, "x"),
        ]);
        assert_eq!(collect("--"), vec![(Other, "--")]);
    }

    #[test]
    fn unicode_letters_are_words() {
        assert_eq!(
            collect("caffè però—sì"),
            vec![
                (Word, "caffè"),
                (Whitespace, " "),
                (Word, "però"),
                (Other, "—"),
                (Word, "sì"),
            ]
        );
        assert_eq!(collect("доброе утро"), vec![
            (Word, "доброе"),
            (Whitespace, " "),
            (Word, "утро"),
        ]);
    }

    #[test]
    fn segments_cover_input_exactly() {
        let text = "  Ünë-phrase, 42 mots\t(environ)…\nfin ";
        let rebuilt: String = text.segments().map(|s| s.text).collect();
        assert_eq!(rebuilt, text);
    }

    #[test]
    fn empty_input_has_no_segments() {
        assert_eq!(collect(""), vec![]);
    }
}
