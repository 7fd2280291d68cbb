//! draftrag-text
//!
//! Lexical retrieval over a small plain-text corpus: tokenization,
//! term-frequency scoring, sentence segmentation with character spans,
//! style sanitization and evidence selection, orchestrated by
//! [`LexicalRetriever`]. `augment` holds the helpers that turn hits into
//! prompt-ready text.

pub mod augment;
pub mod evidence;
pub mod normalize;
pub mod retriever;
pub mod sanitize;
pub mod score;
pub mod segment;
pub mod tokenize;

pub use augment::{compose_query_seed, format_style_block, RagStatus, RetrievalSummary};
pub use evidence::{select_evidence, EvidenceSelector};
pub use retriever::LexicalRetriever;
pub use sanitize::StyleSanitizer;
pub use score::score;
pub use segment::{segment, Segmenter};
pub use tokenize::tokenize;
