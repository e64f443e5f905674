//! Span definitions per pipeline operation.

/// Create a span covering one retrieval invocation.
#[macro_export]
macro_rules! retrieval_span {
    ($query:expr, $top_k:expr) => {
        tracing::info_span!("logsift.retrieval", query = %$query, top_k = $top_k)
    };
}

/// Create a span covering one backend call.
#[macro_export]
macro_rules! backend_span {
    ($backend:expr, $variant:expr) => {
        tracing::debug_span!("logsift.backend", backend = %$backend, variant = %$variant)
    };
}

/// Span names as constants for programmatic use.
pub mod names {
    pub const RETRIEVAL: &str = "logsift.retrieval";
    pub const BACKEND: &str = "logsift.backend";
}
