use logsift_core::models::{
    Candidate, Complexity, QueryAnalysis, QueryType, RankedResult, RetrievalReport, RetrievalStats,
};
use logsift_observability::metrics::RetrievalMetrics;
use logsift_observability::tracing_setup::{events, spans};

fn report(query_type: QueryType, hits: usize, stats: RetrievalStats) -> RetrievalReport {
    let results = (0..hits)
        .map(|i| Candidate::dense(format!("log line {i}"), 0.5))
        .collect();
    RetrievalReport {
        results: RankedResult::new(results),
        analysis: QueryAnalysis {
            original_query: "db timeout".into(),
            technical_terms: vec![],
            query_type,
            complexity: Complexity::Low,
            expanded_queries: vec!["db timeout".into()],
        },
        stats,
    }
}

#[test]
fn empty_metrics_report_zero_rates() {
    let metrics = RetrievalMetrics::new();
    assert_eq!(metrics.total_queries(), 0);
    assert_eq!(metrics.hit_rate(QueryType::General), 0.0);
    assert_eq!(metrics.backend_failure_rate(), 0.0);
    assert_eq!(metrics.dedup_ratio(), 0.0);
    assert_eq!(metrics.mean_latency_ms(), 0.0);
}

#[test]
fn hit_rate_is_tracked_per_query_type() {
    let mut metrics = RetrievalMetrics::new();
    metrics.record_report(&report(QueryType::Solution, 3, RetrievalStats::default()));
    metrics.record_report(&report(QueryType::Solution, 0, RetrievalStats::default()));
    metrics.record_report(&report(QueryType::Diagnosis, 1, RetrievalStats::default()));

    assert_eq!(metrics.total_queries(), 3);
    assert!((metrics.hit_rate(QueryType::Solution) - 0.5).abs() < 1e-9);
    assert!((metrics.hit_rate(QueryType::Diagnosis) - 1.0).abs() < 1e-9);
    assert_eq!(metrics.hit_rate(QueryType::Explanation), 0.0);
}

#[test]
fn backend_counters_accumulate() {
    let mut metrics = RetrievalMetrics::new();
    let stats = RetrievalStats {
        variants: 2,
        backend_calls: 4,
        failed_calls: 1,
        timed_out_calls: 1,
        candidates_before_dedup: 10,
        candidates_after_dedup: 6,
        cross_encoder_applied: true,
        elapsed_ms: 40,
        ..Default::default()
    };
    metrics.record_report(&report(QueryType::General, 2, stats.clone()));
    metrics.record_report(&report(QueryType::General, 2, stats));

    assert_eq!(metrics.backend_calls, 8);
    assert!((metrics.backend_failure_rate() - 0.5).abs() < 1e-9);
    assert!((metrics.dedup_ratio() - 0.4).abs() < 1e-9);
    assert_eq!(metrics.cross_encoder_applied, 2);
    assert!((metrics.mean_latency_ms() - 40.0).abs() < 1e-9);
}

#[test]
fn systemic_failures_count_as_queries_without_latency() {
    let mut metrics = RetrievalMetrics::new();
    metrics.record_systemic_failure(QueryType::Diagnosis);
    assert_eq!(metrics.total_queries(), 1);
    assert_eq!(metrics.systemic_failures, 1);
    assert_eq!(metrics.hit_rate(QueryType::Diagnosis), 0.0);
    assert_eq!(metrics.mean_latency_ms(), 0.0);
}

#[test]
fn metrics_serialize_to_json() {
    let mut metrics = RetrievalMetrics::new();
    metrics.record_report(&report(QueryType::Explanation, 1, RetrievalStats::default()));
    let json = metrics.to_json().unwrap();
    assert!(json.contains("\"explanation\""));

    let back: RetrievalMetrics = serde_json::from_str(&json).unwrap();
    assert_eq!(back.total_queries(), 1);
}

#[test]
fn events_and_spans_emit_without_subscriber() {
    let span = logsift_observability::retrieval_span!("db timeout", 5);
    let _guard = span.enter();
    events::backend_unavailable("sparse", "empty corpus", "dense-only");
    events::backend_call_failed("dense", "db timeout", "connection reset");
    events::backend_timed_out("dense", "db timeout", 250);
    events::deadline_elapsed(2, 1_000);
    events::systemic_failure(&["dense".to_string()], 2, 2);
    events::retrieval_completed(5, 12, 30);
    let call = logsift_observability::backend_span!("sparse", "db timeout");
    let _call_guard = call.enter();
    assert_eq!(spans::names::RETRIEVAL, "logsift.retrieval");
    assert_eq!(spans::names::BACKEND, "logsift.backend");
}
