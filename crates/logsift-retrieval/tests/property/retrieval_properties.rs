use logsift_core::models::{Candidate, Query};
use logsift_retrieval::ranking::{
    sort_by_score, CrossEncoderReranker, Deduplicator, FeatureReranker,
};
use logsift_retrieval::QueryExpander;
use proptest::prelude::*;

fn candidate_strategy() -> impl Strategy<Value = Candidate> {
    ("[a-c ]{0,12}", 0.0f64..1.0, any::<bool>()).prop_map(|(content, score, dense)| {
        if dense {
            Candidate::dense(content, score)
        } else {
            Candidate::sparse(content, score)
        }
    })
}

fn lists_strategy() -> impl Strategy<Value = Vec<Vec<Candidate>>> {
    prop::collection::vec(prop::collection::vec(candidate_strategy(), 0..8), 0..4)
}

// ── Deduplication ─────────────────────────────────────────────────────────

proptest! {
    #[test]
    fn merge_is_idempotent(lists in lists_strategy(), prefix in 1usize..6) {
        let dedup = Deduplicator::new(prefix);
        let once = dedup.merge(lists);
        let twice = dedup.merge(vec![once.clone()]);
        prop_assert_eq!(once, twice);
    }

    #[test]
    fn merge_leaves_unique_prefixes(lists in lists_strategy(), prefix in 1usize..6) {
        let merged = Deduplicator::new(prefix).merge(lists);
        let mut seen = std::collections::HashSet::new();
        for c in &merged {
            prop_assert!(seen.insert(c.content_prefix(prefix).to_string()));
        }
    }

    #[test]
    fn merge_keeps_first_occurrence(lists in lists_strategy()) {
        let flat: Vec<Candidate> = lists.iter().flatten().cloned().collect();
        let merged = Deduplicator::new(100).merge(lists);
        for c in &merged {
            let first = flat.iter().find(|f| f.content == c.content).unwrap();
            prop_assert_eq!(first, c);
        }
    }
}

// ── Feature reranking ─────────────────────────────────────────────────────

proptest! {
    #[test]
    fn overlap_bonus_is_bounded(overlap in 0usize..1000) {
        let bonus = FeatureReranker::default().term_overlap_bonus(overlap);
        prop_assert!((0.0..=0.3).contains(&bonus));
    }

    #[test]
    fn rerank_preserves_order_and_length(
        query in "[a-z ]{0,20}",
        candidates in prop::collection::vec(candidate_strategy(), 0..10)
    ) {
        let before: Vec<String> = candidates.iter().map(|c| c.content.clone()).collect();
        let out = FeatureReranker::default().rerank(&query, candidates);
        let after: Vec<String> = out.iter().map(|c| c.content.clone()).collect();
        prop_assert_eq!(before, after);
    }

    #[test]
    fn rerank_never_lowers_below_penalised_base(
        query in "[a-z ]{0,20}",
        candidate in candidate_strategy()
    ) {
        let base = candidate.rerank_score;
        let out = FeatureReranker::default().rerank(&query, vec![candidate]);
        prop_assert!(out[0].rerank_score >= base * 0.8 - 1e-12);
        prop_assert!(out[0].rerank_score <= base * 2.0);
    }
}

// ── Sorting and passthrough ───────────────────────────────────────────────

proptest! {
    #[test]
    fn sort_is_stable_for_equal_scores(labels in prop::collection::vec("[a-z]{1,4}", 0..12)) {
        let candidates: Vec<Candidate> = labels
            .iter()
            .enumerate()
            .map(|(i, l)| Candidate::dense(format!("{i}:{l}"), 0.5))
            .collect();
        let expected = candidates.clone();
        prop_assert_eq!(sort_by_score(candidates), expected);
    }

    #[test]
    fn sort_is_descending(candidates in prop::collection::vec(candidate_strategy(), 0..12)) {
        let sorted = sort_by_score(candidates);
        prop_assert!(sorted.windows(2).all(|w| w[0].rerank_score >= w[1].rerank_score));
    }

    #[test]
    fn disabled_cross_encoder_is_truncation(
        candidates in prop::collection::vec(candidate_strategy(), 0..12),
        top_k in 1usize..15
    ) {
        let mut expected = candidates.clone();
        expected.truncate(top_k);
        let out = CrossEncoderReranker::disabled("none").rerank("q", candidates, top_k);
        prop_assert_eq!(out, expected);
    }
}

// ── Expansion ─────────────────────────────────────────────────────────────

proptest! {
    #[test]
    fn expansion_starts_with_original_and_has_no_duplicates(text in "[a-zA-Z ]{1,30}") {
        let query = Query::new(text.clone());
        let variants = QueryExpander::builtin().expand(&query);
        prop_assert_eq!(variants[0].text(), text.as_str());
        let mut seen = std::collections::HashSet::new();
        for v in &variants {
            prop_assert!(seen.insert(v.text().to_string()));
        }
    }
}
