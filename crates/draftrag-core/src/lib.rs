#![deny(warnings)]
#![deny(dead_code)]
#![deny(unused_variables)]
#![deny(unused_imports)]

pub mod config;
pub mod corpus;
pub mod error;
pub mod policy;
pub mod traits;
pub mod types;

pub use config::{Config, RetrievalConfig};
pub use corpus::DirectoryCorpus;
pub use error::{Error, Result};
pub use policy::SanitizerPolicy;
pub use traits::{CorpusProvider, Retriever};
pub use types::{Corpus, Document, EvidenceSelection, Hit, HitStatus, Sentence, Span};
