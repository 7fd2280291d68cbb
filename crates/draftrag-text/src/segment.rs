//! Sentence segmentation with character spans.
//!
//! Boundaries are placed after `.`, `!` or `?` when followed by whitespace;
//! the whitespace run belongs to neither neighbour. `\r\n` is treated as a
//! single `\n` while splitting, but reported offsets always refer to the text
//! the caller passed in.

use std::borrow::Cow;

use draftrag_core::Sentence;

use crate::normalize::collapse_whitespace;

pub const DEFAULT_MIN_SENTENCE_CHARS: usize = 60;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Segmenter {
    min_chars: usize,
}

impl Default for Segmenter {
    fn default() -> Self {
        Self { min_chars: DEFAULT_MIN_SENTENCE_CHARS }
    }
}

impl Segmenter {
    /// Sentences whose normalized text is shorter than `min_chars`
    /// characters are dropped as fragments. The threshold is at least 1, so
    /// empty candidates never become sentences.
    pub fn new(min_chars: usize) -> Self {
        Self { min_chars: min_chars.max(1) }
    }

    pub fn min_chars(&self) -> usize {
        self.min_chars
    }

    pub fn segment(&self, text: &str) -> Vec<Sentence> {
        let (src, origin) = normalize_line_endings(text);
        let to_caller = |c: usize| origin.as_ref().map_or(c, |o| o[c]);

        let mut out = Vec::new();
        let mut cursor = 0usize;
        let mut offsets = CharOffsets::new(&src);

        for part in split_candidates(&src) {
            // Search from the cursor so repeated sentences resolve to their own occurrence.
            let Some(found) = src[cursor..].find(part) else {
                continue;
            };
            let start = cursor + found;
            let end = start + part.len();
            cursor = end;

            let normalized = collapse_whitespace(part);
            if normalized.chars().count() < self.min_chars {
                continue;
            }

            let start_char = to_caller(offsets.at(start));
            let end_char = to_caller(offsets.at(end));
            out.push(Sentence { text: normalized, start_char, end_char });
        }
        out
    }
}

/// Segment with the default fragment threshold.
pub fn segment(text: &str) -> Vec<Sentence> {
    Segmenter::default().segment(text)
}

/// Split at `[.!?]` followed by a whitespace run, consuming the run.
fn split_candidates(src: &str) -> Vec<&str> {
    let mut parts = Vec::new();
    let mut part_start = 0;
    let mut chars = src.char_indices().peekable();

    while let Some((i, c)) = chars.next() {
        if !matches!(c, '.' | '!' | '?') {
            continue;
        }
        let part_end = i + c.len_utf8();
        let mut next_start = part_end;
        while let Some(&(j, w)) = chars.peek() {
            if !w.is_whitespace() {
                break;
            }
            next_start = j + w.len_utf8();
            chars.next();
        }
        if next_start > part_end {
            parts.push(&src[part_start..part_end]);
            part_start = next_start;
        }
    }
    parts.push(&src[part_start..]);
    parts
}

/// Replace `\r\n` with `\n`. When anything was replaced, also return a map
/// from each character offset of the new text (plus its end) to the offset
/// in the original.
fn normalize_line_endings(text: &str) -> (Cow<'_, str>, Option<Vec<usize>>) {
    if !text.contains("\r\n") {
        return (Cow::Borrowed(text), None);
    }

    let mut src = String::with_capacity(text.len());
    let mut origin = Vec::with_capacity(text.len() + 1);
    let mut chars = text.chars().enumerate().peekable();
    while let Some((i, c)) = chars.next() {
        origin.push(i);
        if c == '\r' && matches!(chars.peek(), Some((_, '\n'))) {
            chars.next();
            src.push('\n');
        } else {
            src.push(c);
        }
    }
    origin.push(text.chars().count());
    (Cow::Owned(src), Some(origin))
}

/// Converts increasing byte offsets into character offsets without
/// rescanning from the start each time.
struct CharOffsets<'a> {
    src: &'a str,
    byte: usize,
    chars: usize,
}

impl<'a> CharOffsets<'a> {
    fn new(src: &'a str) -> Self {
        Self { src, byte: 0, chars: 0 }
    }

    fn at(&mut self, byte: usize) -> usize {
        debug_assert!(byte >= self.byte, "offsets must be requested in order");
        self.chars += self.src[self.byte..byte].chars().count();
        self.byte = byte;
        self.chars
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const LONG_A: &str = "The deposition chamber was cleaned before every single production run.";
    const LONG_B: &str = "Operators logged each anomaly in the shared maintenance notebook daily!";

    fn slice_chars(text: &str, start: usize, end: usize) -> String {
        text.chars().skip(start).take(end - start).collect()
    }

    #[test]
    fn splits_on_terminal_punctuation_followed_by_whitespace() {
        let text = format!("{LONG_A}  {LONG_B}\nShort one? Yes.");
        let sents = segment(&text);

        assert_eq!(sents.len(), 2);
        assert_eq!(sents[0].text, LONG_A);
        assert_eq!(sents[0].start_char, 0);
        assert_eq!(sents[0].end_char, LONG_A.chars().count());
        assert_eq!(sents[1].text, LONG_B);
        assert_eq!(slice_chars(&text, sents[1].start_char, sents[1].end_char), LONG_B);
    }

    #[test]
    fn punctuation_without_whitespace_is_not_a_boundary() {
        let text = "Version 2.5 of the controller firmware shipped with the e.g.notation bug intact.";
        let sents = segment(text);
        assert_eq!(sents.len(), 1);
        assert_eq!(sents[0].end_char, text.chars().count());
    }

    #[test]
    fn duplicate_sentences_get_distinct_spans() {
        let text = format!("{LONG_A} {LONG_A}");
        let sents = segment(&text);

        assert_eq!(sents.len(), 2);
        assert_eq!(sents[0].start_char, 0);
        assert_eq!(sents[1].start_char, LONG_A.chars().count() + 1);
        assert_eq!(sents[0].text, sents[1].text);
    }

    #[test]
    fn short_fragments_do_not_take_index_slots() {
        let text = format!("Intro. {LONG_A} Heading! {LONG_B}");
        let sents = segment(&text);
        assert_eq!(sents.len(), 2);
        assert_eq!(sents[0].text, LONG_A);
        assert_eq!(sents[1].text, LONG_B);
    }

    #[test]
    fn internal_whitespace_is_normalized_but_spans_cover_the_raw_text() {
        let raw = "The deposition   chamber was\ncleaned before every\tsingle production run.";
        let sents = segment(raw);
        assert_eq!(sents.len(), 1);
        assert_eq!(sents[0].text, LONG_A);
        assert_eq!(sents[0].end_char, raw.chars().count());
    }

    #[test]
    fn crlf_offsets_refer_to_the_original_text() {
        let text = format!("{LONG_A}\r\n{LONG_B}\r\n");
        let sents = segment(&text);

        assert_eq!(sents.len(), 2);
        let second = &sents[1];
        assert_eq!(second.start_char, LONG_A.chars().count() + 2);
        assert_eq!(slice_chars(&text, second.start_char, second.end_char), LONG_B);
    }

    #[test]
    fn multibyte_text_uses_character_offsets() {
        let first = "Épaisseur de la couche mesurée après dépôt sur chaque plaquette du lot.";
        let text = format!("{first} {LONG_B}");
        let sents = segment(&text);

        assert_eq!(sents.len(), 2);
        assert_eq!(sents[0].end_char, first.chars().count());
        assert_eq!(sents[1].start_char, first.chars().count() + 1);
    }

    #[test]
    fn no_terminal_punctuation_yields_at_most_one_sentence() {
        let text = "a long run of words without any terminal punctuation at all in this text";
        assert_eq!(segment(text).len(), 1);
        assert!(segment("too short").is_empty());
        assert!(segment("").is_empty());
    }

    #[test]
    fn custom_threshold() {
        let sents = Segmenter::new(5).segment("Tiny. Small one here. Ok.");
        let texts: Vec<&str> = sents.iter().map(|s| s.text.as_str()).collect();
        assert_eq!(texts, vec!["Tiny.", "Small one here."]);
    }

    #[test]
    fn zero_threshold_never_yields_empty_sentences() {
        let segmenter = Segmenter::new(0);
        assert_eq!(segmenter.min_chars(), 1);

        let sents = segmenter.segment("Hello there.  ");
        assert_eq!(sents.len(), 1);
        assert_eq!(sents[0].text, "Hello there.");
        assert_eq!((sents[0].start_char, sents[0].end_char), (0, 12));
    }
}
