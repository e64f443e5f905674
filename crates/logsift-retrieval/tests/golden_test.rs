//! Golden log-corpus tests.
//!
//! The dense side is an in-memory token-Jaccard index, so expectations are
//! lexical; they pin the full rank pipeline (expansion, dedup, feature
//! rescoring) rather than any embedding model.

use std::sync::Arc;

use logsift_retrieval::RetrievalEngineBuilder;
use test_fixtures::{golden_corpus, InMemoryVectorIndex, StaticCorpus};

#[tokio::test]
async fn golden_cases_rank_expected_excerpt_first() {
    let corpus = golden_corpus();
    let engine = RetrievalEngineBuilder::new(Arc::new(InMemoryVectorIndex::new(
        corpus.documents.clone(),
    )))
    .build()
    .unwrap();

    for case in &corpus.cases {
        let result = engine.retrieve(&case.query, case.top_k).await.unwrap();
        assert!(
            result.len() as i64 <= case.top_k,
            "{}: {} results for top_k {}",
            case.name,
            result.len(),
            case.top_k
        );
        let first = result
            .first()
            .unwrap_or_else(|| panic!("{}: no results", case.name));
        assert!(
            first.content().contains(&case.expected_first),
            "{}: first result was {:?}",
            case.name,
            first.content()
        );
    }
}

#[tokio::test]
async fn golden_cases_with_sparse_return_bounded_nonempty_results() {
    let corpus = golden_corpus();
    let engine = RetrievalEngineBuilder::new(Arc::new(InMemoryVectorIndex::new(
        corpus.documents.clone(),
    )))
    .corpus(Arc::new(StaticCorpus::new(corpus.documents.clone())))
    .build()
    .unwrap();
    assert!(engine.sparse_available());

    for case in &corpus.cases {
        let report = engine
            .retrieve_with_report(&case.query, case.top_k)
            .await
            .unwrap();
        assert!(!report.results.is_empty(), "{}: empty", case.name);
        assert!(report.results.len() as i64 <= case.top_k, "{}", case.name);
        assert_eq!(report.stats.backend_calls, 2 * report.stats.variants);
        assert_eq!(report.stats.failed_calls, 0);

        // Sorted by final score.
        let scores: Vec<f64> = report.results.iter().map(|c| c.score()).collect();
        assert!(scores.windows(2).all(|w| w[0] >= w[1]), "{}", case.name);
    }
}

#[tokio::test]
async fn golden_analysis_matches_expected_types() {
    let corpus = golden_corpus();
    let engine = RetrievalEngineBuilder::new(Arc::new(InMemoryVectorIndex::new(
        corpus.documents,
    )))
    .build()
    .unwrap();

    let analysis = engine.analyze("mysql connection timeout");
    assert_eq!(analysis.technical_terms.len(), 3);
    assert_eq!(analysis.complexity, logsift_core::models::Complexity::High);
    assert_eq!(analysis.expanded_queries.len(), 4);
}
