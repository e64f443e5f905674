use std::time::Duration;

use serde::{Deserialize, Serialize};

use super::defaults;
use crate::errors::{ConfigError, LogsiftResult};

/// Retrieval pipeline configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct RetrievalConfig {
    /// Multiplier applied to top_k for every backend call.
    pub oversample_factor: usize,
    /// Content prefix length that identifies a candidate for deduplication.
    pub dedup_prefix_chars: usize,
    /// Upper bound for a single backend call.
    pub backend_timeout_ms: u64,
    /// Upper bound for the whole retrieval fan-out.
    pub retrieval_deadline_ms: u64,
    /// Maximum backend calls in flight per invocation.
    pub max_concurrency: usize,
    /// Enable synonym query expansion.
    pub query_expansion: bool,
    /// Enable BM25 lexical retrieval.
    pub sparse_enabled: bool,
    /// Enable cross-encoder reranking when a model is supplied.
    pub cross_encoder_enabled: bool,
    /// Path to a TOML synonym table replacing the built-in one.
    pub synonyms_path: Option<String>,
}

impl Default for RetrievalConfig {
    fn default() -> Self {
        Self {
            oversample_factor: defaults::DEFAULT_OVERSAMPLE_FACTOR,
            dedup_prefix_chars: defaults::DEFAULT_DEDUP_PREFIX_CHARS,
            backend_timeout_ms: defaults::DEFAULT_BACKEND_TIMEOUT_MS,
            retrieval_deadline_ms: defaults::DEFAULT_RETRIEVAL_DEADLINE_MS,
            max_concurrency: defaults::DEFAULT_MAX_CONCURRENCY,
            query_expansion: defaults::DEFAULT_QUERY_EXPANSION,
            sparse_enabled: defaults::DEFAULT_SPARSE_ENABLED,
            cross_encoder_enabled: defaults::DEFAULT_CROSS_ENCODER_ENABLED,
            synonyms_path: None,
        }
    }
}

impl RetrievalConfig {
    /// Reject values the pipeline cannot run with.
    pub fn validate(&self) -> LogsiftResult<()> {
        let zero_checks = [
            ("retrieval.oversample_factor", self.oversample_factor == 0),
            ("retrieval.dedup_prefix_chars", self.dedup_prefix_chars == 0),
            ("retrieval.backend_timeout_ms", self.backend_timeout_ms == 0),
            ("retrieval.retrieval_deadline_ms", self.retrieval_deadline_ms == 0),
            ("retrieval.max_concurrency", self.max_concurrency == 0),
        ];
        for (field, is_zero) in zero_checks {
            if is_zero {
                return Err(ConfigError::InvalidValue {
                    field: field.to_string(),
                    reason: "must be greater than zero".to_string(),
                }
                .into());
            }
        }
        Ok(())
    }

    pub fn backend_timeout(&self) -> Duration {
        Duration::from_millis(self.backend_timeout_ms)
    }

    pub fn retrieval_deadline(&self) -> Duration {
        Duration::from_millis(self.retrieval_deadline_ms)
    }
}
