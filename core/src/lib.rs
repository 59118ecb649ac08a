//! In-memory vector-space retrieval over a static document corpus.
//!
//! The index is built once from a [`Corpus`] and is read-only afterwards, so an
//! [`IrSystem`] can be shared freely between threads answering queries.

pub mod boolean;
pub mod corpus;
pub mod engine;
pub mod error;
pub mod index;
pub mod persist;
pub mod query;
pub mod ranked;
pub mod stats;
pub mod tokenizer;
pub mod weights;

pub use corpus::{load_corpus, Corpus, Document, LoadOptions};
pub use engine::IrSystem;
pub use error::SearchError;
pub use index::{DocId, InvertedIndex};
pub use query::{Query, QueryMode};
pub use ranked::ScoredDoc;
pub use stats::TermStatistics;
pub use weights::TfIdfTable;
