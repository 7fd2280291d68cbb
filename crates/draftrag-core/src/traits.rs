use crate::error::Result;
use crate::types::{Corpus, Hit};

/// Supplies a read-only corpus snapshot. Owns any I/O or caching.
pub trait CorpusProvider: Send + Sync {
    fn load(&self) -> Result<Corpus>;
}

/// Ranks a corpus against a query.
///
/// Implementations never fail: outcomes that are not matches are reported
/// through a single sentinel [`Hit`]. The returned list is never empty.
pub trait Retriever: Send + Sync {
    fn search(&self, corpus: &Corpus, query: &str, top_k: usize) -> Vec<Hit>;
}
