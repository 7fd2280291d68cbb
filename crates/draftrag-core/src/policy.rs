//! Filter policy for style sentences.
//!
//! Separates reusable writing style from factual content: anything that
//! looks like a citation, a number, a metric, an experiment setup or a
//! strong claim is kept out of style snippets. The lists are plain data so
//! they can be overridden from configuration and swapped in tests.

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct SanitizerPolicy {
    /// Regex patterns removed from the raw text before segmentation.
    pub citation_patterns: Vec<String>,
    /// Evaluation metric names.
    pub metric_keywords: Vec<String>,
    /// Dataset and experiment setup vocabulary.
    pub setup_keywords: Vec<String>,
    /// Result claims that must not be echoed.
    pub claim_phrases: Vec<String>,
    /// Longer sentences are cut to this many characters plus `...`.
    pub max_sentence_chars: usize,
    /// Upper bound on sentences returned per document.
    pub max_sentences: usize,
}

impl Default for SanitizerPolicy {
    fn default() -> Self {
        Self {
            citation_patterns: strings(&[r"\[[0-9,\s]+\]", r"\([^)]*\d{4}[^)]*\)"]),
            metric_keywords: strings(&["accuracy", "f1", "auc", "mape", "rmse", "precision", "recall", "map@"]),
            setup_keywords: strings(&["dataset", "benchmark", "hyperparameter", "learning rate", "epochs", "batch size"]),
            claim_phrases: strings(&["we achieve", "we outperform", "significant improvement", "state-of-the-art"]),
            max_sentence_chars: 220,
            max_sentences: 12,
        }
    }
}

impl SanitizerPolicy {
    /// All deny-list entries, lower-cased, in declaration order.
    pub fn banned_terms(&self) -> Vec<String> {
        self.metric_keywords
            .iter()
            .chain(&self.setup_keywords)
            .chain(&self.claim_phrases)
            .map(|k| k.to_lowercase())
            .collect()
    }
}

fn strings(items: &[&str]) -> Vec<String> {
    items.iter().map(|s| s.to_string()).collect()
}
