//! Optional lexical retrieval. Either active over a BM25 index, or disabled
//! for the lifetime of the engine.

use std::sync::Arc;

use logsift_core::errors::LogsiftResult;
use logsift_core::models::Candidate;
use logsift_core::traits::CorpusProvider;
use tracing::debug;

use super::bm25::Bm25Index;

pub const BACKEND_NAME: &str = "sparse";

/// A BM25 hit: position in the corpus plus score.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SparseHit {
    pub index: usize,
    pub score: f64,
}

#[derive(Debug, Clone)]
pub struct SparseCorpus {
    index: Bm25Index,
    documents: Vec<String>,
}

#[derive(Debug, Clone)]
pub enum SparseRetriever {
    Active(Arc<SparseCorpus>),
    Disabled { reason: String },
}

impl SparseRetriever {
    /// Index `documents`. Fails when no index can be built.
    pub fn try_build(documents: Vec<String>) -> LogsiftResult<Self> {
        let index = Bm25Index::build(&documents)?;
        debug!(documents = documents.len(), "built BM25 index");
        Ok(Self::Active(Arc::new(SparseCorpus { index, documents })))
    }

    /// Index `documents`, degrading to `Disabled` when that fails.
    pub fn build(documents: Vec<String>) -> Self {
        Self::try_build(documents).unwrap_or_else(|e| Self::disabled(e.to_string()))
    }

    /// Load and index every document the provider lists.
    pub fn try_from_corpus(provider: &dyn CorpusProvider) -> LogsiftResult<Self> {
        Self::try_build(provider.list_documents()?)
    }

    pub fn from_corpus(provider: &dyn CorpusProvider) -> Self {
        Self::try_from_corpus(provider).unwrap_or_else(|e| Self::disabled(e.to_string()))
    }

    pub fn disabled(reason: impl Into<String>) -> Self {
        Self::Disabled {
            reason: reason.into(),
        }
    }

    pub fn is_available(&self) -> bool {
        matches!(self, Self::Active(_))
    }

    pub fn disabled_reason(&self) -> Option<&str> {
        match self {
            Self::Active(_) => None,
            Self::Disabled { reason } => Some(reason),
        }
    }

    /// Indexed corpus size; zero when disabled.
    pub fn len(&self) -> usize {
        match self {
            Self::Active(corpus) => corpus.documents.len(),
            Self::Disabled { .. } => 0,
        }
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    pub fn document(&self, index: usize) -> Option<&str> {
        match self {
            Self::Active(corpus) => corpus.documents.get(index).map(String::as_str),
            Self::Disabled { .. } => None,
        }
    }

    /// Best `top_k` hits by BM25 score. Empty when disabled.
    pub fn query(&self, text: &str, top_k: usize) -> Vec<SparseHit> {
        let Self::Active(corpus) = self else {
            return Vec::new();
        };
        corpus
            .index
            .top_k(text, top_k)
            .into_iter()
            .map(|(index, score)| SparseHit { index, score })
            .collect()
    }

    /// Hits with a positive score, resolved to sparse candidates.
    pub fn candidates(&self, text: &str, top_k: usize) -> Vec<Candidate> {
        self.query(text, top_k)
            .into_iter()
            .filter(|hit| hit.score > 0.0)
            .filter_map(|hit| {
                self.document(hit.index)
                    .map(|content| Candidate::sparse(content, hit.score))
            })
            .collect()
    }
}
