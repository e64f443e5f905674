//! Semantic retrieval over an injected vector index.

use std::fmt;
use std::sync::Arc;

use logsift_core::errors::LogsiftResult;
use logsift_core::models::Candidate;
use logsift_core::traits::VectorIndex;
use logsift_observability::tracing_setup::events;
use tracing::debug;

pub const BACKEND_NAME: &str = "dense";

/// Wraps a shared [`VectorIndex`] and turns its hits into candidates.
#[derive(Clone)]
pub struct DenseRetriever {
    index: Arc<dyn VectorIndex>,
}

impl fmt::Debug for DenseRetriever {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("DenseRetriever")
            .field("empty", &self.index.is_empty())
            .finish()
    }
}

impl DenseRetriever {
    pub fn new(index: Arc<dyn VectorIndex>) -> Self {
        Self { index }
    }

    pub fn is_empty(&self) -> bool {
        self.index.is_empty()
    }

    /// Search, propagating backend errors.
    ///
    /// Scores are clamped to `[0, 1]`; NaN hits are dropped. An empty index
    /// is not queried.
    pub fn try_search(&self, text: &str, top_k: usize) -> LogsiftResult<Vec<Candidate>> {
        if top_k == 0 || self.index.is_empty() {
            return Ok(Vec::new());
        }

        let hits = self.index.search(text, top_k)?;
        let total = hits.len();
        let candidates: Vec<Candidate> = hits
            .into_iter()
            .filter(|(_, score)| !score.is_nan())
            .map(|(content, score)| Candidate::dense(content, score.clamp(0.0, 1.0)))
            .collect();

        if candidates.len() < total {
            debug!(
                dropped = total - candidates.len(),
                "dropped dense hits with NaN similarity"
            );
        }
        Ok(candidates)
    }

    /// Search, absorbing backend errors into an empty list.
    pub fn search(&self, text: &str, top_k: usize) -> Vec<Candidate> {
        match self.try_search(text, top_k) {
            Ok(candidates) => candidates,
            Err(e) => {
                events::backend_call_failed(BACKEND_NAME, text, &e.to_string());
                Vec::new()
            }
        }
    }
}
