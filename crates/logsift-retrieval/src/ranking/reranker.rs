//! Optional cross-encoder reranking.
//!
//! When no model is available the stage is a passthrough that only
//! truncates. Scoring failures never propagate: the un-reranked input is
//! returned instead.

use std::fmt;
use std::sync::Arc;

use logsift_core::errors::{LogsiftError, LogsiftResult};
use logsift_core::models::Candidate;
use logsift_core::traits::CrossEncoderModel;
use logsift_observability::tracing_setup::events;
use tracing::debug;

use super::sort_by_score;

pub const BACKEND_NAME: &str = "cross_encoder";

#[derive(Clone)]
pub enum CrossEncoderReranker {
    Active(Arc<dyn CrossEncoderModel>),
    Disabled { reason: String },
}

impl fmt::Debug for CrossEncoderReranker {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Active(model) => f.debug_tuple("Active").field(&model.name()).finish(),
            Self::Disabled { reason } => {
                f.debug_struct("Disabled").field("reason", reason).finish()
            }
        }
    }
}

impl CrossEncoderReranker {
    pub fn new(model: Arc<dyn CrossEncoderModel>) -> Self {
        Self::Active(model)
    }

    pub fn disabled(reason: impl Into<String>) -> Self {
        Self::Disabled {
            reason: reason.into(),
        }
    }

    /// Run `loader` once; a load failure disables the stage.
    pub fn load<F>(loader: F) -> Self
    where
        F: FnOnce() -> LogsiftResult<Arc<dyn CrossEncoderModel>>,
    {
        match loader() {
            Ok(model) => Self::Active(model),
            Err(e) => Self::disabled(e.to_string()),
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

    pub fn model_name(&self) -> Option<&str> {
        match self {
            Self::Active(model) => Some(model.name()),
            Self::Disabled { .. } => None,
        }
    }

    /// Rescore with the model, sort, and keep `top_k`.
    ///
    /// Errors when the model fails, returns the wrong number of scores, or
    /// returns NaN.
    pub fn try_rerank(
        &self,
        query: &str,
        mut candidates: Vec<Candidate>,
        top_k: usize,
    ) -> LogsiftResult<Vec<Candidate>> {
        let Self::Active(model) = self else {
            candidates.truncate(top_k);
            return Ok(candidates);
        };
        if candidates.is_empty() {
            return Ok(candidates);
        }

        let contents: Vec<&str> = candidates.iter().map(Candidate::content).collect();
        let scores = model.score_batch(query, &contents)?;
        if scores.len() != candidates.len() {
            return Err(LogsiftError::call_failed(
                BACKEND_NAME,
                format!("{} scores for {} candidates", scores.len(), candidates.len()),
            ));
        }
        if scores.iter().any(|s| s.is_nan()) {
            return Err(LogsiftError::call_failed(BACKEND_NAME, "model returned NaN"));
        }

        for (candidate, score) in candidates.iter_mut().zip(scores) {
            candidate.rerank_score = score;
        }
        let mut ranked = sort_by_score(candidates);
        ranked.truncate(top_k);
        debug!(model = model.name(), kept = ranked.len(), "cross-encoder rerank applied");
        Ok(ranked)
    }

    /// Like [`try_rerank`](Self::try_rerank), but falls back to the input
    /// truncated to `top_k` on any failure.
    pub fn rerank(&self, query: &str, candidates: Vec<Candidate>, top_k: usize) -> Vec<Candidate> {
        let mut fallback = candidates.clone();
        fallback.truncate(top_k);
        match self.try_rerank(query, candidates, top_k) {
            Ok(ranked) => ranked,
            Err(e) => {
                events::backend_call_failed(BACKEND_NAME, query, &e.to_string());
                fallback
            }
        }
    }
}
