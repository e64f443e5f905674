//! Structured log events for the retrieval pipeline.
//!
//! Each function emits a `tracing` event with structured fields.

/// An optional backend could not be initialised and was replaced by a fallback.
pub fn backend_unavailable(backend: &str, reason: &str, fallback: &str) {
    tracing::warn!(
        event = "backend_unavailable",
        backend = %backend,
        reason = %reason,
        fallback = %fallback,
        "backend unavailable"
    );
}

/// A single backend call failed; the call contributes no candidates.
pub fn backend_call_failed(backend: &str, variant: &str, reason: &str) {
    tracing::warn!(
        event = "backend_call_failed",
        backend = %backend,
        variant = %variant,
        reason = %reason,
        "backend call failed"
    );
}

/// A single backend call exceeded its timeout.
pub fn backend_timed_out(backend: &str, variant: &str, timeout_ms: u64) {
    tracing::warn!(
        event = "backend_timed_out",
        backend = %backend,
        variant = %variant,
        timeout_ms = timeout_ms,
        "backend call timed out"
    );
}

/// The retrieval deadline elapsed with calls still outstanding.
pub fn deadline_elapsed(outstanding: usize, deadline_ms: u64) {
    tracing::warn!(
        event = "deadline_elapsed",
        outstanding = outstanding,
        deadline_ms = deadline_ms,
        "retrieval deadline elapsed, abandoning outstanding calls"
    );
}

/// Every backend came back empty even though the corpus holds documents.
pub fn systemic_failure(backends: &[String], calls: usize, failed: usize) {
    tracing::error!(
        event = "systemic_failure",
        backends = ?backends,
        calls = calls,
        failed = failed,
        "no candidates despite a non-empty corpus"
    );
}

/// A retrieval finished.
pub fn retrieval_completed(results: usize, candidates: usize, elapsed_ms: u64) {
    tracing::info!(
        event = "retrieval_completed",
        results = results,
        candidates = candidates,
        elapsed_ms = elapsed_ms,
        "retrieval completed"
    );
}
