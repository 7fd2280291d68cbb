//! Evidence selection: the sentences of a document that best match a query.

use draftrag_core::{EvidenceSelection, Span};

use crate::normalize::truncate_with_ellipsis;
use crate::score::score;
use crate::segment::Segmenter;

pub const DEFAULT_MAX_EVIDENCE_CHARS: usize = 600;

#[derive(Debug, Clone, Copy)]
pub struct EvidenceSelector {
    segmenter: Segmenter,
    max_chars: usize,
}

impl Default for EvidenceSelector {
    fn default() -> Self {
        Self { segmenter: Segmenter::default(), max_chars: DEFAULT_MAX_EVIDENCE_CHARS }
    }
}

impl EvidenceSelector {
    pub fn new(segmenter: Segmenter, max_chars: usize) -> Self {
        Self { segmenter, max_chars }
    }

    /// Pick up to `max_sentences` sentences with a positive score, best
    /// first. Equal scores keep document order.
    pub fn select<S: AsRef<str>>(
        &self,
        text: &str,
        tokens: &[S],
        max_sentences: usize,
    ) -> EvidenceSelection {
        let sentences = self.segmenter.segment(text);

        let mut scored: Vec<(usize, u64)> = sentences
            .iter()
            .enumerate()
            .map(|(i, s)| (i, score(&s.text, tokens)))
            .filter(|&(_, sc)| sc > 0)
            .collect();
        scored.sort_by(|a, b| b.1.cmp(&a.1));
        scored.truncate(max_sentences);

        if scored.is_empty() {
            return EvidenceSelection::default();
        }

        let sentence_indices: Vec<usize> = scored.iter().map(|&(i, _)| i).collect();
        let texts: Vec<String> = sentence_indices.iter().map(|&i| sentences[i].text.clone()).collect();
        let sentence_spans: Vec<Span> = sentence_indices.iter().map(|&i| sentences[i].span()).collect();

        let span = bounding_span(&sentence_spans);
        let snippet = truncate_with_ellipsis(&texts.join(" "), self.max_chars);

        EvidenceSelection { sentences: texts, snippet, sentence_indices, sentence_spans, span }
    }
}

/// Select with the default segmenter and snippet length.
pub fn select_evidence<S: AsRef<str>>(
    text: &str,
    tokens: &[S],
    max_sentences: usize,
) -> EvidenceSelection {
    EvidenceSelector::default().select(text, tokens, max_sentences)
}

fn bounding_span(spans: &[Span]) -> Option<Span> {
    let start = spans.iter().map(|s| s.start).min()?;
    let end = spans.iter().map(|s| s.end).max()?;
    Some(Span::new(start, end))
}
