//! # logsift-retrieval
//!
//! Hybrid retrieval over historical log excerpts:
//! query expansion → concurrent dense + BM25 retrieval → prefix
//! deduplication → feature rescoring → optional cross-encoder rerank.
//!
//! [`RetrievalEngine`] is the entry point; the stages are public so they
//! can be tested and reused on their own.

pub mod analysis;
pub mod engine;
pub mod expansion;
mod fanout;
pub mod ranking;
pub mod search;
pub mod tokenize;

pub use engine::{RetrievalEngine, RetrievalEngineBuilder};
pub use expansion::QueryExpander;
pub use ranking::{CrossEncoderReranker, Deduplicator, FeatureReranker};
pub use search::{DenseRetriever, SparseHit, SparseRetriever};
