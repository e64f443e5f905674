//! # logsift-observability
//!
//! Structured tracing setup with span and event definitions for the
//! retrieval pipeline, plus serialisable retrieval metrics fed from
//! per-query reports.

pub mod metrics;
pub mod tracing_setup;

pub use metrics::RetrievalMetrics;
