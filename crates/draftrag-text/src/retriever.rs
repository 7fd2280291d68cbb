use draftrag_core::{
    Config, Corpus, Hit, HitStatus, Result, RetrievalConfig, Retriever, SanitizerPolicy,
};

use crate::evidence::EvidenceSelector;
use crate::sanitize::StyleSanitizer;
use crate::score::score;
use crate::segment::Segmenter;
use crate::tokenize::tokenize;

/// Lexical corpus retriever.
///
/// Holds only immutable settings and compiled patterns, so one instance can
/// serve concurrent calls.
pub struct LexicalRetriever {
    config: RetrievalConfig,
    sanitizer: StyleSanitizer,
    evidence: EvidenceSelector,
}

impl LexicalRetriever {
    pub fn new(config: RetrievalConfig, policy: SanitizerPolicy) -> Result<Self> {
        config.validate()?;
        let segmenter = Segmenter::new(config.min_sentence_chars);
        let sanitizer = StyleSanitizer::new(policy, segmenter)?;
        let evidence = EvidenceSelector::new(segmenter, config.max_evidence_chars);
        Ok(Self { config, sanitizer, evidence })
    }

    pub fn with_defaults() -> Result<Self> {
        Self::new(RetrievalConfig::default(), SanitizerPolicy::default())
    }

    pub fn from_config(config: &Config) -> Result<Self> {
        config.validate()?;
        Self::new(config.retrieval()?, config.sanitizer()?)
    }

    pub fn config(&self) -> &RetrievalConfig {
        &self.config
    }

    pub fn sanitizer(&self) -> &StyleSanitizer {
        &self.sanitizer
    }

    /// Search with the configured `top_k`.
    pub fn search_default(&self, corpus: &Corpus, query: &str) -> Vec<Hit> {
        self.search(corpus, query, self.config.top_k)
    }

    /// Rank `corpus` against `query`.
    ///
    /// Checks run in a fixed order and the first that applies decides the
    /// whole result: empty corpus, then empty query, then no usable match.
    /// Otherwise returns `ok` hits by descending score (corpus order on
    /// ties), at most `top_k` of them; `top_k == 0` returns all.
    pub fn search(&self, corpus: &Corpus, query: &str, top_k: usize) -> Vec<Hit> {
        if corpus.is_empty() {
            tracing::debug!("corpus is empty");
            return vec![Hit::sentinel(HitStatus::EmptyCorpus)];
        }

        let tokens = tokenize(query);
        if tokens.is_empty() {
            tracing::debug!(query, "query has no usable tokens");
            return vec![Hit::sentinel(HitStatus::EmptyQuery)];
        }

        let mut hits = Vec::new();
        for doc in corpus {
            let doc_score = score(&doc.text, &tokens);
            if doc_score == 0 {
                continue;
            }

            let style_snippet = self.sanitizer.style_snippet(&doc.text, self.config.style_sentences);
            let evidence = self.evidence.select(&doc.text, &tokens, self.config.evidence_sentences);
            if style_snippet.is_empty() && evidence.snippet.is_empty() {
                tracing::debug!(doc = %doc.id, score = doc_score, "matched but produced no snippets");
                continue;
            }
            hits.push(Hit::matched(doc.id.as_str(), doc_score, style_snippet, evidence));
        }

        if hits.is_empty() {
            tracing::debug!(documents = corpus.len(), tokens = tokens.len(), "no document matched");
            return vec![Hit::sentinel(HitStatus::NoHit)];
        }

        hits.sort_by(|a, b| b.score.cmp(&a.score));
        if top_k > 0 {
            hits.truncate(top_k);
        }
        tracing::debug!(documents = corpus.len(), returned = hits.len(), "retrieval finished");
        hits
    }
}

impl Retriever for LexicalRetriever {
    fn search(&self, corpus: &Corpus, query: &str, top_k: usize) -> Vec<Hit> {
        LexicalRetriever::search(self, corpus, query, top_k)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use draftrag_core::Error;

    fn retriever() -> LexicalRetriever {
        LexicalRetriever::with_defaults().unwrap()
    }

    #[test]
    fn empty_corpus_wins_over_empty_query() {
        let hits = retriever().search(&Corpus::new(), "", 5);
        assert_eq!(hits, vec![Hit::sentinel(HitStatus::EmptyCorpus)]);
    }

    #[test]
    fn positive_score_without_snippets_is_dropped() {
        // "wafer" occurs, but the text is a fragment with no sentence.
        let corpus: Corpus = [("note.txt", "wafer list")].into_iter().collect();
        let hits = retriever().search(&corpus, "wafer", 5);
        assert_eq!(hits[0].status, HitStatus::NoHit);
    }

    #[test]
    fn evidence_only_hit_is_kept() {
        // Every sentence is too specific for style, but still valid evidence.
        let text = "The wafer dataset was split into folds before any of the models were trained.";
        let corpus: Corpus = [("d.txt", text)].into_iter().collect();
        let hits = retriever().search(&corpus, "wafer", 5);

        assert_eq!(hits.len(), 1);
        assert!(hits[0].is_ok());
        assert_eq!(hits[0].style_snippet, "");
        assert_eq!(hits[0].evidence_sentences, vec![text]);
    }

    #[test]
    fn style_sentence_count_is_configurable() {
        let config = RetrievalConfig { style_sentences: 1, ..RetrievalConfig::default() };
        let r = LexicalRetriever::new(config, SanitizerPolicy::default()).unwrap();
        let text = "Wafer handling is described here in a deliberately plain and general way. \
                    A second wafer sentence continues in the same plain and general register.";
        let corpus: Corpus = [("d.txt", text)].into_iter().collect();
        let hits = r.search(&corpus, "wafer", 5);

        assert_eq!(hits[0].style_snippet, "Wafer handling is described here in a deliberately plain and general way.");
        assert_eq!(hits[0].evidence_sentences.len(), 2);
    }

    #[test]
    fn zero_length_knobs_are_rejected() {
        for config in [
            RetrievalConfig { max_evidence_chars: 0, ..RetrievalConfig::default() },
            RetrievalConfig { min_sentence_chars: 0, ..RetrievalConfig::default() },
            RetrievalConfig { evidence_sentences: 0, ..RetrievalConfig::default() },
        ] {
            let err = LexicalRetriever::new(config, SanitizerPolicy::default()).err();
            assert!(matches!(err, Some(Error::InvalidConfig(_))), "{:?}", err);
        }
    }

    #[test]
    fn from_config_validates_unchecked_figments() {
        use figment::{
            providers::{Format, Toml},
            Figment,
        };

        let figment = Figment::from(Toml::string("[retrieval]\nevidence_sentences = 0\n"));
        let config = Config::from_figment(figment);
        match LexicalRetriever::from_config(&config) {
            Err(Error::InvalidConfig(msg)) => assert!(msg.contains("evidence_sentences")),
            Err(other) => panic!("unexpected error: {other}"),
            Ok(_) => panic!("zero evidence sentences must be rejected"),
        }
    }

    #[test]
    fn works_through_the_trait_object() {
        let r: Box<dyn Retriever> = Box::new(retriever());
        let hits = r.search(&Corpus::new(), "anything", 5);
        assert_eq!(hits[0].status, HitStatus::EmptyCorpus);
    }
}
