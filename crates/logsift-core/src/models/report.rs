use serde::{Deserialize, Serialize};

use super::{QueryAnalysis, RankedResult};

/// Counters collected during one retrieval invocation.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct RetrievalStats {
    /// Query variants searched (original included).
    pub variants: usize,
    /// Backend calls issued.
    pub backend_calls: usize,
    /// Calls that returned an error or panicked.
    pub failed_calls: usize,
    /// Calls that exceeded the per-backend timeout.
    pub timed_out_calls: usize,
    /// Calls still running when the retrieval deadline elapsed.
    pub abandoned_calls: usize,
    pub candidates_before_dedup: usize,
    pub candidates_after_dedup: usize,
    pub cross_encoder_applied: bool,
    pub elapsed_ms: u64,
}

impl RetrievalStats {
    /// Calls that failed, timed out or were abandoned.
    pub fn faulted_calls(&self) -> usize {
        self.failed_calls + self.timed_out_calls + self.abandoned_calls
    }

    /// Calls that produced a usable (possibly empty) list.
    pub fn successful_calls(&self) -> usize {
        self.backend_calls.saturating_sub(self.faulted_calls())
    }

    /// Fraction of gathered candidates removed as duplicates.
    pub fn dedup_ratio(&self) -> f64 {
        if self.candidates_before_dedup == 0 {
            return 0.0;
        }
        let removed = self.candidates_before_dedup - self.candidates_after_dedup;
        removed as f64 / self.candidates_before_dedup as f64
    }
}

/// Ranked results plus the analysis and counters that produced them.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RetrievalReport {
    pub results: RankedResult,
    pub analysis: QueryAnalysis,
    pub stats: RetrievalStats,
}
