use crate::errors::LogsiftResult;

/// Pairwise (query, document) relevance model.
pub trait CrossEncoderModel: Send + Sync {
    /// Relevance of `content` to `query`, higher is better.
    fn score(&self, query: &str, content: &str) -> LogsiftResult<f64>;

    /// Score many documents against one query.
    ///
    /// The default scores pairs one at a time; models with batched
    /// inference should override it. Output order matches `contents`.
    fn score_batch(&self, query: &str, contents: &[&str]) -> LogsiftResult<Vec<f64>> {
        contents
            .iter()
            .map(|content| self.score(query, content))
            .collect()
    }

    /// Human-readable model name.
    fn name(&self) -> &str;
}
