//! Ranking: deduplicate → feature rerank → sort → optional cross-encoder.

pub mod deduplication;
pub mod reranker;
pub mod scorer;

use logsift_core::models::Candidate;

pub use deduplication::Deduplicator;
pub use reranker::CrossEncoderReranker;
pub use scorer::{FeatureReranker, FeatureWeights, ScoreBreakdown};

/// Stable sort by `rerank_score`, highest first. Equal scores keep input order.
pub fn sort_by_score(mut candidates: Vec<Candidate>) -> Vec<Candidate> {
    candidates.sort_by(|a, b| b.rerank_score.total_cmp(&a.rerank_score));
    candidates
}
