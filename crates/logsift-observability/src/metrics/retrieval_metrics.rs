//! Per-query-type hit rate, backend health, dedup ratio, cross-encoder usage.

use std::collections::HashMap;

use logsift_core::models::{QueryType, RetrievalReport};
use serde::{Deserialize, Serialize};

/// Tracks retrieval effectiveness across many invocations.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct RetrievalMetrics {
    /// Per-query-type query counts.
    pub queries_by_type: HashMap<String, u64>,
    /// Per-query-type counts of queries that returned at least one result.
    pub hits_by_type: HashMap<String, u64>,
    pub backend_calls: u64,
    pub failed_calls: u64,
    pub timed_out_calls: u64,
    pub abandoned_calls: u64,
    pub candidates_before_dedup: u64,
    pub candidates_after_dedup: u64,
    /// Queries whose results were reordered by the cross-encoder.
    pub cross_encoder_applied: u64,
    /// Queries rejected with a systemic retrieval failure.
    pub systemic_failures: u64,
    pub total_elapsed_ms: u64,
}

impl RetrievalMetrics {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record a completed retrieval.
    pub fn record_report(&mut self, report: &RetrievalReport) {
        let key = report.analysis.query_type.name().to_string();
        *self.queries_by_type.entry(key.clone()).or_default() += 1;
        if !report.results.is_empty() {
            *self.hits_by_type.entry(key).or_default() += 1;
        }

        let stats = &report.stats;
        self.backend_calls += stats.backend_calls as u64;
        self.failed_calls += stats.failed_calls as u64;
        self.timed_out_calls += stats.timed_out_calls as u64;
        self.abandoned_calls += stats.abandoned_calls as u64;
        self.candidates_before_dedup += stats.candidates_before_dedup as u64;
        self.candidates_after_dedup += stats.candidates_after_dedup as u64;
        if stats.cross_encoder_applied {
            self.cross_encoder_applied += 1;
        }
        self.total_elapsed_ms += stats.elapsed_ms;
    }

    /// Record a query that ended in a systemic retrieval failure.
    pub fn record_systemic_failure(&mut self, query_type: QueryType) {
        *self
            .queries_by_type
            .entry(query_type.name().to_string())
            .or_default() += 1;
        self.systemic_failures += 1;
    }

    pub fn total_queries(&self) -> u64 {
        self.queries_by_type.values().sum()
    }

    /// Hit rate for a specific query type.
    pub fn hit_rate(&self, query_type: QueryType) -> f64 {
        let key = query_type.name();
        let queries = self.queries_by_type.get(key).copied().unwrap_or(0);
        if queries == 0 {
            return 0.0;
        }
        let hits = self.hits_by_type.get(key).copied().unwrap_or(0);
        hits as f64 / queries as f64
    }

    /// Fraction of backend calls that failed or timed out.
    pub fn backend_failure_rate(&self) -> f64 {
        if self.backend_calls == 0 {
            return 0.0;
        }
        (self.failed_calls + self.timed_out_calls) as f64 / self.backend_calls as f64
    }

    /// Fraction of gathered candidates dropped as duplicates.
    pub fn dedup_ratio(&self) -> f64 {
        if self.candidates_before_dedup == 0 {
            return 0.0;
        }
        let removed = self
            .candidates_before_dedup
            .saturating_sub(self.candidates_after_dedup);
        removed as f64 / self.candidates_before_dedup as f64
    }

    /// Mean latency over completed retrievals.
    pub fn mean_latency_ms(&self) -> f64 {
        let completed = self.total_queries().saturating_sub(self.systemic_failures);
        if completed == 0 {
            return 0.0;
        }
        self.total_elapsed_ms as f64 / completed as f64
    }

    /// Serialise to JSON for export.
    pub fn to_json(&self) -> serde_json::Result<String> {
        serde_json::to_string(self)
    }
}
