//! Candidate gathering: semantic (dense) and lexical (BM25) retrieval.

pub mod bm25;
pub mod dense;
pub mod sparse;

pub use bm25::Bm25Index;
pub use dense::DenseRetriever;
pub use sparse::{SparseHit, SparseRetriever};
