//! Retrieval metrics.

pub mod retrieval_metrics;

pub use retrieval_metrics::RetrievalMetrics;
