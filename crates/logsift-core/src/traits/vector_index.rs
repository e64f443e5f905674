use crate::errors::LogsiftResult;

/// Semantic vector index over log excerpts.
///
/// Implementations are shared read-only across concurrent retrievals.
pub trait VectorIndex: Send + Sync {
    /// Top-`top_k` nearest excerpts as `(content, similarity)`, best first.
    /// Similarity is expected in `[0, 1]`, higher is better.
    fn search(&self, query_text: &str, top_k: usize) -> LogsiftResult<Vec<(String, f64)>>;

    /// Whether the index holds no documents.
    fn is_empty(&self) -> bool;
}
