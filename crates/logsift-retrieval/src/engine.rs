//! RetrievalEngine: one retrieval pass per query.
//!
//! validate → expand → concurrent dense/sparse search per variant →
//! deduplicate → feature rerank → sort → optional cross-encoder → truncate.

use std::fmt;
use std::sync::{Arc, Mutex};
use std::time::Instant;

use logsift_core::config::RetrievalConfig;
use logsift_core::errors::{LogsiftError, LogsiftResult};
use logsift_core::models::{
    Candidate, DegradationEvent, Query, QueryAnalysis, RankedResult, RetrievalReport,
    RetrievalStats,
};
use logsift_core::traits::{CorpusProvider, CrossEncoderModel, VectorIndex};
use logsift_observability::tracing_setup::events;
use logsift_observability::RetrievalMetrics;
use tokio::time::timeout;
use tracing::{debug, Instrument};

use crate::analysis;
use crate::expansion::QueryExpander;
use crate::fanout::{self, FanOutLimits};
use crate::ranking::{
    reranker, sort_by_score, CrossEncoderReranker, Deduplicator, FeatureReranker, FeatureWeights,
};
use crate::search::{dense, sparse, DenseRetriever, SparseRetriever};

type CrossEncoderLoader = Box<dyn FnOnce() -> LogsiftResult<Arc<dyn CrossEncoderModel>> + Send>;

enum CrossEncoderSource {
    Absent,
    Model(Arc<dyn CrossEncoderModel>),
    Loader(CrossEncoderLoader),
}

/// Assembles a [`RetrievalEngine`], resolving optional backends once.
pub struct RetrievalEngineBuilder {
    index: Arc<dyn VectorIndex>,
    config: RetrievalConfig,
    corpus: Option<Arc<dyn CorpusProvider>>,
    cross_encoder: CrossEncoderSource,
    expander: Option<QueryExpander>,
    weights: FeatureWeights,
}

impl RetrievalEngineBuilder {
    pub fn new(index: Arc<dyn VectorIndex>) -> Self {
        Self {
            index,
            config: RetrievalConfig::default(),
            corpus: None,
            cross_encoder: CrossEncoderSource::Absent,
            expander: None,
            weights: FeatureWeights::default(),
        }
    }

    pub fn config(mut self, config: RetrievalConfig) -> Self {
        self.config = config;
        self
    }

    /// Documents for lexical retrieval. Without one, sparse search is disabled.
    pub fn corpus(mut self, corpus: Arc<dyn CorpusProvider>) -> Self {
        self.corpus = Some(corpus);
        self
    }

    pub fn cross_encoder(mut self, model: Arc<dyn CrossEncoderModel>) -> Self {
        self.cross_encoder = CrossEncoderSource::Model(model);
        self
    }

    /// Load the cross-encoder at build time; a load error disables it.
    pub fn cross_encoder_loader<F>(mut self, loader: F) -> Self
    where
        F: FnOnce() -> LogsiftResult<Arc<dyn CrossEncoderModel>> + Send + 'static,
    {
        self.cross_encoder = CrossEncoderSource::Loader(Box::new(loader));
        self
    }

    /// Use this expander instead of one derived from the config.
    pub fn expander(mut self, expander: QueryExpander) -> Self {
        self.expander = Some(expander);
        self
    }

    pub fn feature_weights(mut self, weights: FeatureWeights) -> Self {
        self.weights = weights;
        self
    }

    /// Validate the config and resolve every optional backend.
    ///
    /// Only configuration problems fail the build; unavailable backends are
    /// recorded as degradations.
    pub fn build(self) -> LogsiftResult<RetrievalEngine> {
        self.config.validate()?;
        let expander = match self.expander {
            Some(expander) => expander,
            None => QueryExpander::from_config(&self.config)?,
        };

        let mut degradations = Vec::new();

        let sparse = if !self.config.sparse_enabled {
            SparseRetriever::disabled("disabled by configuration")
        } else {
            match &self.corpus {
                None => SparseRetriever::disabled("no corpus provider"),
                Some(corpus) => SparseRetriever::from_corpus(corpus.as_ref()),
            }
        };
        if let Some(reason) = sparse.disabled_reason() {
            degradations.push(degrade(sparse::BACKEND_NAME, reason, "dense retrieval only"));
        }

        let cross_encoder = if !self.config.cross_encoder_enabled {
            CrossEncoderReranker::disabled("disabled by configuration")
        } else {
            match self.cross_encoder {
                CrossEncoderSource::Absent => CrossEncoderReranker::disabled("no model supplied"),
                CrossEncoderSource::Model(model) => CrossEncoderReranker::new(model),
                CrossEncoderSource::Loader(loader) => CrossEncoderReranker::load(loader),
            }
        };
        if let Some(reason) = cross_encoder.disabled_reason() {
            degradations.push(degrade(reranker::BACKEND_NAME, reason, "feature ranking only"));
        }

        Ok(RetrievalEngine {
            dense: DenseRetriever::new(self.index),
            sparse,
            cross_encoder,
            expander,
            deduplicator: Deduplicator::new(self.config.dedup_prefix_chars),
            feature_reranker: FeatureReranker::new(self.weights),
            config: self.config,
            degradations,
            metrics: Mutex::new(RetrievalMetrics::new()),
        })
    }
}

fn degrade(component: &str, reason: &str, fallback: &str) -> DegradationEvent {
    events::backend_unavailable(component, reason, fallback);
    DegradationEvent::now(component, reason, fallback)
}

/// Hybrid log retrieval over a vector index and an optional BM25 corpus.
///
/// Shared read-only; concurrent `retrieve` calls are independent.
pub struct RetrievalEngine {
    dense: DenseRetriever,
    sparse: SparseRetriever,
    cross_encoder: CrossEncoderReranker,
    expander: QueryExpander,
    deduplicator: Deduplicator,
    feature_reranker: FeatureReranker,
    config: RetrievalConfig,
    degradations: Vec<DegradationEvent>,
    metrics: Mutex<RetrievalMetrics>,
}

impl fmt::Debug for RetrievalEngine {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("RetrievalEngine")
            .field("dense", &self.dense)
            .field("sparse_available", &self.sparse.is_available())
            .field("cross_encoder", &self.cross_encoder)
            .field("config", &self.config)
            .finish()
    }
}

impl RetrievalEngine {
    pub fn builder(index: Arc<dyn VectorIndex>) -> RetrievalEngineBuilder {
        RetrievalEngineBuilder::new(index)
    }

    pub fn config(&self) -> &RetrievalConfig {
        &self.config
    }

    pub fn sparse_available(&self) -> bool {
        self.sparse.is_available()
    }

    pub fn cross_encoder_available(&self) -> bool {
        self.cross_encoder.is_available()
    }

    /// Backends found unavailable at construction.
    pub fn degradation_events(&self) -> &[DegradationEvent] {
        &self.degradations
    }

    /// Counters accumulated over every retrieval served so far.
    pub fn metrics(&self) -> RetrievalMetrics {
        self.metrics
            .lock()
            .map(|m| m.clone())
            .unwrap_or_else(|poisoned| poisoned.into_inner().clone())
    }

    pub fn analyze(&self, query_text: &str) -> QueryAnalysis {
        analysis::analyze(&Query::new(query_text), &self.expander)
    }

    /// Ranked log excerpts for `query_text`, at most `top_k` of them.
    ///
    /// Fails with `InvalidArgument` for a blank query or `top_k < 1`, and with
    /// `SystemicRetrievalFailure` when nothing came back from a non-empty
    /// corpus and at least one call failed, timed out or was abandoned.
    /// Individual backend failures are otherwise absorbed.
    pub async fn retrieve(&self, query_text: &str, top_k: i64) -> LogsiftResult<RankedResult> {
        Ok(self.retrieve_with_report(query_text, top_k).await?.results)
    }

    /// Same as [`retrieve`](Self::retrieve), with the query analysis and
    /// pipeline counters.
    pub async fn retrieve_with_report(
        &self,
        query_text: &str,
        top_k: i64,
    ) -> LogsiftResult<RetrievalReport> {
        let span = logsift_observability::retrieval_span!(query_text, top_k);
        self.run(query_text, top_k).instrument(span).await
    }

    async fn run(&self, query_text: &str, top_k: i64) -> LogsiftResult<RetrievalReport> {
        let top_k = validate_top_k(top_k)?;
        let query = Query::new(query_text);
        if query.is_blank() {
            return Err(LogsiftError::invalid_argument("query must not be blank"));
        }

        let started = Instant::now();
        let analysis = analysis::analyze(&query, &self.expander);
        debug!(
            variants = analysis.expanded_queries.len(),
            query_type = analysis.query_type.name(),
            "query analyzed"
        );

        let limits = FanOutLimits {
            per_call_top_k: top_k.saturating_mul(self.config.oversample_factor),
            backend_timeout: self.config.backend_timeout(),
            deadline: self.config.retrieval_deadline(),
            max_concurrency: self.config.max_concurrency,
        };
        let fan_in =
            fanout::gather(&self.dense, &self.sparse, &analysis.expanded_queries, limits).await;

        let mut stats = RetrievalStats {
            variants: analysis.expanded_queries.len(),
            backend_calls: fan_in.calls,
            failed_calls: fan_in.failed,
            timed_out_calls: fan_in.timed_out,
            abandoned_calls: fan_in.abandoned,
            candidates_before_dedup: fan_in.lists.iter().map(Vec::len).sum(),
            ..RetrievalStats::default()
        };

        let merged = self.deduplicator.merge(fan_in.lists);
        stats.candidates_after_dedup = merged.len();

        if merged.is_empty() && self.corpus_non_empty() && stats.faulted_calls() > 0 {
            let backends = self.active_backends();
            events::systemic_failure(&backends, stats.backend_calls, stats.failed_calls);
            self.with_metrics(|m| m.record_systemic_failure(analysis.query_type));
            return Err(LogsiftError::SystemicRetrievalFailure { backends });
        }

        let ranked = sort_by_score(self.feature_reranker.rerank(query.as_str(), merged));
        let (final_candidates, cross_encoder_applied) =
            self.cross_encode(query.as_str(), ranked, top_k).await;

        stats.cross_encoder_applied = cross_encoder_applied;
        stats.elapsed_ms = started.elapsed().as_millis() as u64;
        events::retrieval_completed(
            final_candidates.len(),
            stats.candidates_after_dedup,
            stats.elapsed_ms,
        );

        let report = RetrievalReport {
            results: RankedResult::new(final_candidates),
            analysis,
            stats,
        };
        self.with_metrics(|m| m.record_report(&report));
        Ok(report)
    }

    fn with_metrics(&self, record: impl FnOnce(&mut RetrievalMetrics)) {
        match self.metrics.lock() {
            Ok(mut metrics) => record(&mut metrics),
            Err(poisoned) => record(&mut poisoned.into_inner()),
        }
    }

    /// Cross-encoder pass on the blocking pool, bounded by the backend
    /// timeout. Any failure returns the input truncated to `top_k`.
    async fn cross_encode(
        &self,
        query: &str,
        mut candidates: Vec<Candidate>,
        top_k: usize,
    ) -> (Vec<Candidate>, bool) {
        if !self.cross_encoder.is_available() || candidates.is_empty() {
            candidates.truncate(top_k);
            return (candidates, false);
        }

        let mut fallback = candidates.clone();
        fallback.truncate(top_k);

        let stage = self.cross_encoder.clone();
        let owned_query = query.to_owned();
        let work =
            tokio::task::spawn_blocking(move || stage.try_rerank(&owned_query, candidates, top_k));

        match timeout(self.config.backend_timeout(), work).await {
            Ok(Ok(Ok(ranked))) => (ranked, true),
            Ok(Ok(Err(e))) => {
                events::backend_call_failed(reranker::BACKEND_NAME, query, &e.to_string());
                (fallback, false)
            }
            Ok(Err(join_error)) => {
                events::backend_call_failed(
                    reranker::BACKEND_NAME,
                    query,
                    &format!("cross-encoder panicked: {join_error}"),
                );
                (fallback, false)
            }
            Err(_) => {
                events::backend_timed_out(
                    reranker::BACKEND_NAME,
                    query,
                    self.config.backend_timeout_ms,
                );
                (fallback, false)
            }
        }
    }

    fn corpus_non_empty(&self) -> bool {
        !self.dense.is_empty() || !self.sparse.is_empty()
    }

    fn active_backends(&self) -> Vec<String> {
        let mut backends = vec![dense::BACKEND_NAME.to_string()];
        if self.sparse.is_available() {
            backends.push(sparse::BACKEND_NAME.to_string());
        }
        backends
    }
}

fn validate_top_k(top_k: i64) -> LogsiftResult<usize> {
    usize::try_from(top_k)
        .ok()
        .filter(|k| *k >= 1)
        .ok_or_else(|| {
            LogsiftError::invalid_argument(format!("top_k must be at least 1, got {top_k}"))
        })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn top_k_validation() {
        assert_eq!(validate_top_k(3).unwrap(), 3);
        assert!(matches!(validate_top_k(0), Err(LogsiftError::InvalidArgument { .. })));
        assert!(matches!(validate_top_k(-4), Err(LogsiftError::InvalidArgument { .. })));
    }
}
