//! Style sanitizer.
//!
//! Turns a document into sentences that only carry tone and structure.
//! Pipeline: drop citation markers, segment, strip numbers and `%`, reject
//! sentences that still look factual, truncate, dedupe, cap.

use std::collections::HashSet;

use regex::Regex;

use draftrag_core::{Error, Result, SanitizerPolicy};

use crate::normalize::truncate_with_ellipsis;
use crate::segment::Segmenter;

pub struct StyleSanitizer {
    policy: SanitizerPolicy,
    citations: Vec<Regex>,
    numbers: Regex,
    digit: Regex,
    spaces: Regex,
    banned: Vec<String>,
    segmenter: Segmenter,
}

impl StyleSanitizer {
    pub fn new(policy: SanitizerPolicy, segmenter: Segmenter) -> Result<Self> {
        let citations = policy
            .citation_patterns
            .iter()
            .map(|p| compile(p))
            .collect::<Result<Vec<_>>>()?;
        let banned = policy.banned_terms();
        Ok(Self {
            citations,
            numbers: compile(r"\b\d+(?:\.\d+)?\b")?,
            digit: compile(r"\d")?,
            spaces: compile(r"\s{2,}")?,
            banned,
            segmenter,
            policy,
        })
    }

    pub fn with_defaults() -> Result<Self> {
        Self::new(SanitizerPolicy::default(), Segmenter::default())
    }

    pub fn policy(&self) -> &SanitizerPolicy {
        &self.policy
    }

    /// Style-safe sentences of `text`, at most `policy.max_sentences`.
    pub fn sanitize(&self, text: &str) -> Vec<String> {
        let cleaned = self.remove_citations(text);

        let mut seen = HashSet::new();
        let mut out = Vec::new();
        for sentence in self.segmenter.segment(&cleaned) {
            let stripped = self.remove_numbers(&sentence.text);
            if stripped.is_empty() || self.is_too_specific(&stripped) {
                continue;
            }
            let kept = truncate_with_ellipsis(&stripped, self.policy.max_sentence_chars);
            if seen.insert(kept.to_lowercase()) {
                out.push(kept);
            }
        }
        out.truncate(self.policy.max_sentences);
        out
    }

    /// First `count` sanitized sentences joined by single spaces.
    pub fn style_snippet(&self, text: &str, count: usize) -> String {
        let sentences = self.sanitize(text);
        sentences[..count.min(sentences.len())].join(" ")
    }

    /// True when a sentence still carries digits, metrics, setup details or
    /// result claims.
    pub fn is_too_specific(&self, sentence: &str) -> bool {
        if self.digit.is_match(sentence) {
            return true;
        }
        let low = sentence.to_lowercase();
        self.banned.iter().any(|k| low.contains(k.as_str()))
    }

    fn remove_citations(&self, text: &str) -> String {
        let mut out = text.to_string();
        for re in &self.citations {
            out = re.replace_all(&out, "").into_owned();
        }
        out
    }

    fn remove_numbers(&self, sentence: &str) -> String {
        let no_numbers = self.numbers.replace_all(sentence, "");
        let no_percent = no_numbers.replace('%', "");
        self.spaces.replace_all(&no_percent, " ").trim().to_string()
    }
}

fn compile(pattern: &str) -> Result<Regex> {
    Regex::new(pattern).map_err(|e| Error::InvalidConfig(format!("invalid sanitizer pattern '{}': {}", pattern, e)))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sanitizer() -> StyleSanitizer {
        StyleSanitizer::with_defaults().unwrap()
    }

    const PLAIN: &str = "Process engineers often describe variation in terms of the tools that introduce it.";

    #[test]
    fn keeps_plain_style_sentences() {
        assert_eq!(sanitizer().sanitize(PLAIN), vec![PLAIN]);
    }

    #[test]
    fn removes_bracket_and_author_year_citations() {
        let text = "Prior studies frame yield loss as a spatial phenomenon across the wafer [3, 12]. \
                    This framing has shaped most of the later work on defect clustering (Kim et al., 2019).";
        let out = sanitizer().sanitize(text);
        assert_eq!(
            out,
            vec![
                "Prior studies frame yield loss as a spatial phenomenon across the wafer .",
                "This framing has shaped most of the later work on defect clustering .",
            ]
        );
    }

    #[test]
    fn strips_standalone_numbers_then_rejects_leftover_digits() {
        let s = sanitizer();
        // "3.5" and "%" vanish, nothing numeric remains
        assert_eq!(
            s.sanitize("Throughput rose by 3.5 % once the revised dispatching rule replaced the legacy one."),
            vec!["Throughput rose by once the revised dispatching rule replaced the legacy one."]
        );
        // "G2" is not a standalone number, so a digit survives and the sentence is rejected
        assert!(s.sanitize("The G2 line kept running while the neighbouring lines were fully stopped.").is_empty());
    }

    #[test]
    fn rejects_metric_setup_and_claim_vocabulary() {
        let s = sanitizer();
        for sentence in [
            "The proposed model reaches a much higher ACCURACY than the earlier baseline approach.",
            "The public dataset used here covers several fabs and a wide range of product types.",
            "We outperform every competing approach on the considered process monitoring task.",
            "Our approach is state-of-the-art for the considered wafer map classification problem.",
            "Model quality was summarized with the mAP@ metric across all considered defect classes.",
        ] {
            assert!(s.sanitize(sentence).is_empty(), "should reject: {sentence}");
            assert!(s.is_too_specific(sentence));
        }
        assert!(!s.is_too_specific(PLAIN));
    }

    #[test]
    fn truncates_long_sentences() {
        let long = format!("{} ends here.", "word ".repeat(60));
        let out = sanitizer().sanitize(&long);
        assert_eq!(out.len(), 1);
        assert!(out[0].ends_with("..."));
        assert_eq!(out[0].chars().count(), 219 + 3, "trailing space before the cut is trimmed");
    }

    #[test]
    fn dedupes_case_insensitively_in_first_seen_order() {
        let text = format!("{PLAIN} {} {PLAIN}", PLAIN.to_uppercase());
        assert_eq!(sanitizer().sanitize(&text), vec![PLAIN]);
    }

    #[test]
    fn caps_sentence_count() {
        let text: String = (0..20)
            .map(|i| format!("Sentence variant {} keeps a purely descriptive tone about the process flow.", "x".repeat(i + 1)))
            .collect::<Vec<_>>()
            .join(" ");
        let out = sanitizer().sanitize(&text);
        assert_eq!(out.len(), 12);
        assert!(out[0].contains("variant x "));
    }

    #[test]
    fn style_snippet_joins_first_sentences() {
        let second = "Such descriptions tend to emphasise mechanisms rather than specific outcomes.";
        let text = format!("{PLAIN} {second}");
        let s = sanitizer();
        assert_eq!(s.style_snippet(&text, 1), PLAIN);
        assert_eq!(s.style_snippet(&text, 6), format!("{PLAIN} {second}"));
        assert_eq!(s.style_snippet("", 6), "");
    }

    #[test]
    fn custom_policy_is_honoured() {
        let policy = SanitizerPolicy { claim_phrases: vec!["tools".into()], ..SanitizerPolicy::default() };
        let s = StyleSanitizer::new(policy, Segmenter::default()).unwrap();
        assert!(s.sanitize(PLAIN).is_empty());
    }

    #[test]
    fn invalid_pattern_is_a_config_error() {
        let policy = SanitizerPolicy { citation_patterns: vec!["(".into()], ..SanitizerPolicy::default() };
        assert!(matches!(StyleSanitizer::new(policy, Segmenter::default()), Err(Error::InvalidConfig(_))));
    }
}
