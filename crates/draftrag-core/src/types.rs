//! Domain types shared by the retrieval engine and its callers.

use serde::{Deserialize, Serialize};
use std::fmt;

pub type DocId = String;

/// One corpus entry: an identifier (usually the file name) and its raw text.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Document {
    pub id: DocId,
    pub text: String,
}

/// An insertion-ordered snapshot of documents.
///
/// Behaves like a map from id to text: inserting an id that is already
/// present replaces its text but keeps its original position. Iteration
/// order is the tie-break order used when ranking.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Corpus {
    docs: Vec<Document>,
}

impl Corpus {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, id: impl Into<String>, text: impl Into<String>) {
        let id = id.into();
        let text = text.into();
        match self.docs.iter_mut().find(|d| d.id == id) {
            Some(existing) => existing.text = text,
            None => self.docs.push(Document { id, text }),
        }
    }

    pub fn get(&self, id: &str) -> Option<&str> {
        self.docs.iter().find(|d| d.id == id).map(|d| d.text.as_str())
    }

    pub fn len(&self) -> usize {
        self.docs.len()
    }

    pub fn is_empty(&self) -> bool {
        self.docs.is_empty()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Document> {
        self.docs.iter()
    }
}

impl<K, V> FromIterator<(K, V)> for Corpus
where
    K: Into<String>,
    V: Into<String>,
{
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        let mut corpus = Corpus::new();
        for (id, text) in iter {
            corpus.insert(id, text);
        }
        corpus
    }
}

impl<'a> IntoIterator for &'a Corpus {
    type Item = &'a Document;
    type IntoIter = std::slice::Iter<'a, Document>;

    fn into_iter(self) -> Self::IntoIter {
        self.docs.iter()
    }
}

/// Half-open range of character offsets, serialized as `[start, end]`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "(usize, usize)", into = "(usize, usize)")]
pub struct Span {
    pub start: usize,
    pub end: usize,
}

impl Span {
    pub fn new(start: usize, end: usize) -> Self {
        Self { start, end }
    }

    pub fn len(&self) -> usize {
        self.end.saturating_sub(self.start)
    }

    pub fn is_empty(&self) -> bool {
        self.end <= self.start
    }
}

impl From<(usize, usize)> for Span {
    fn from((start, end): (usize, usize)) -> Self {
        Self { start, end }
    }
}

impl From<Span> for (usize, usize) {
    fn from(span: Span) -> Self {
        (span.start, span.end)
    }
}

/// A sentence located in a document.
///
/// `start_char`/`end_char` are character (not byte) offsets into the
/// document text as handed to the segmenter. `text` is the trimmed,
/// single-spaced form of that slice.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Sentence {
    pub text: String,
    pub start_char: usize,
    pub end_char: usize,
}

impl Sentence {
    pub fn span(&self) -> Span {
        Span::new(self.start_char, self.end_char)
    }
}

/// The sentences picked as evidence for one document.
///
/// `span` is the bounding range `(min start, max end)` of the picked
/// sentences. When they are not adjacent it also covers the text between
/// them, so slicing the document with it does not reproduce `snippet`.
/// Use `sentence_spans` for exact locations.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct EvidenceSelection {
    pub sentences: Vec<String>,
    pub snippet: String,
    pub sentence_indices: Vec<usize>,
    pub sentence_spans: Vec<Span>,
    pub span: Option<Span>,
}

impl EvidenceSelection {
    pub fn is_empty(&self) -> bool {
        self.sentences.is_empty()
    }
}

/// Outcome tag carried by every hit.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum HitStatus {
    Ok,
    EmptyCorpus,
    EmptyQuery,
    NoHit,
}

impl HitStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            HitStatus::Ok => "ok",
            HitStatus::EmptyCorpus => "empty_corpus",
            HitStatus::EmptyQuery => "empty_query",
            HitStatus::NoHit => "no_hit",
        }
    }

    /// Explanation attached to sentinel hits. `None` for `Ok`.
    pub fn sentinel_message(&self) -> Option<&'static str> {
        match self {
            HitStatus::Ok => None,
            HitStatus::EmptyCorpus => Some(
                "No corpus files found. Please add at least one .txt file to the corpus directory to enable retrieval.",
            ),
            HitStatus::EmptyQuery => Some("Query is empty or too short to retrieve relevant passages."),
            HitStatus::NoHit => Some("No retrieval result matched the current query."),
        }
    }
}

impl fmt::Display for HitStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One retrieval result record.
///
/// Either a sentinel (non-`Ok` status, `message` set, everything else
/// empty) or a per-document match (`Ok`, `filename` set, `message` absent).
/// `evidence_span` is a bounding range; see [`EvidenceSelection`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Hit {
    pub status: HitStatus,
    pub message: Option<String>,
    pub filename: Option<DocId>,
    pub score: u64,
    pub style_snippet: String,
    pub evidence_snippet: String,
    pub evidence_sentences: Vec<String>,
    pub evidence_sentence_indices: Vec<usize>,
    pub evidence_sentence_spans: Vec<Span>,
    pub evidence_span: Option<Span>,
}

impl Hit {
    /// Placeholder hit reporting a non-matching outcome.
    pub fn sentinel(status: HitStatus) -> Self {
        Self {
            status,
            message: status.sentinel_message().map(str::to_string),
            filename: None,
            score: 0,
            style_snippet: String::new(),
            evidence_snippet: String::new(),
            evidence_sentences: Vec::new(),
            evidence_sentence_indices: Vec::new(),
            evidence_sentence_spans: Vec::new(),
            evidence_span: None,
        }
    }

    pub fn matched(
        filename: impl Into<String>,
        score: u64,
        style_snippet: String,
        evidence: EvidenceSelection,
    ) -> Self {
        Self {
            status: HitStatus::Ok,
            message: None,
            filename: Some(filename.into()),
            score,
            style_snippet,
            evidence_snippet: evidence.snippet,
            evidence_sentences: evidence.sentences,
            evidence_sentence_indices: evidence.sentence_indices,
            evidence_sentence_spans: evidence.sentence_spans,
            evidence_span: evidence.span,
        }
    }

    pub fn is_ok(&self) -> bool {
        self.status == HitStatus::Ok
    }
}
