//! Feature reranker: boosts candidates by lexical overlap with the query and
//! by domain-error vocabulary, and penalises unusually long or short content.
//!
//! rerank = base × (1 + term_overlap_bonus + domain_term_bonus) × length_penalty

use std::collections::HashSet;

use logsift_core::constants::{
    DOMAIN_TERM_BONUS, LONG_CONTENT_CHARS, LONG_CONTENT_PENALTY, MAX_TERM_OVERLAP_BONUS,
    SHORT_CONTENT_CHARS, SHORT_CONTENT_PENALTY, TERM_OVERLAP_STEP,
};
use logsift_core::models::{Candidate, DomainTerm};
use serde::Serialize;

use crate::analysis::{count_hits, extract_terms};
use crate::tokenize::token_set;

/// Feature coefficients.
#[derive(Debug, Clone, PartialEq)]
pub struct FeatureWeights {
    pub overlap_step: f64,
    pub max_overlap_bonus: f64,
    pub domain_term_bonus: f64,
    pub long_content_chars: usize,
    pub short_content_chars: usize,
    pub long_content_penalty: f64,
    pub short_content_penalty: f64,
}

impl Default for FeatureWeights {
    fn default() -> Self {
        Self {
            overlap_step: TERM_OVERLAP_STEP,
            max_overlap_bonus: MAX_TERM_OVERLAP_BONUS,
            domain_term_bonus: DOMAIN_TERM_BONUS,
            long_content_chars: LONG_CONTENT_CHARS,
            short_content_chars: SHORT_CONTENT_CHARS,
            long_content_penalty: LONG_CONTENT_PENALTY,
            short_content_penalty: SHORT_CONTENT_PENALTY,
        }
    }
}

/// Per-factor view of one rerank computation.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ScoreBreakdown {
    pub base: f64,
    pub overlapping_tokens: usize,
    pub term_overlap_bonus: f64,
    pub domain_term_hits: usize,
    pub domain_term_bonus: f64,
    pub length_penalty: f64,
    pub rerank_score: f64,
}

/// Query-side features, computed once per rerank pass.
struct QueryFeatures {
    tokens: HashSet<String>,
    domain_terms: Vec<DomainTerm>,
}

impl QueryFeatures {
    fn new(query: &str) -> Self {
        Self {
            tokens: token_set(query),
            domain_terms: extract_terms(query),
        }
    }
}

#[derive(Debug, Clone, Default)]
pub struct FeatureReranker {
    weights: FeatureWeights,
}

impl FeatureReranker {
    pub fn new(weights: FeatureWeights) -> Self {
        Self { weights }
    }

    pub fn weights(&self) -> &FeatureWeights {
        &self.weights
    }

    /// Rescore every candidate against `query`. Order is unchanged; sorting
    /// is the caller's step.
    pub fn rerank(&self, query: &str, mut candidates: Vec<Candidate>) -> Vec<Candidate> {
        if candidates.is_empty() {
            return candidates;
        }
        let features = QueryFeatures::new(query);
        for candidate in &mut candidates {
            candidate.rerank_score = self.breakdown_with(&features, candidate).rerank_score;
        }
        candidates
    }

    /// Factor breakdown for one candidate, without modifying it.
    pub fn explain(&self, query: &str, candidate: &Candidate) -> ScoreBreakdown {
        self.breakdown_with(&QueryFeatures::new(query), candidate)
    }

    pub fn term_overlap_bonus(&self, overlapping_tokens: usize) -> f64 {
        (self.weights.overlap_step * overlapping_tokens as f64).min(self.weights.max_overlap_bonus)
    }

    pub fn length_penalty(&self, char_len: usize) -> f64 {
        if char_len > self.weights.long_content_chars {
            self.weights.long_content_penalty
        } else if char_len < self.weights.short_content_chars {
            self.weights.short_content_penalty
        } else {
            1.0
        }
    }

    fn breakdown_with(&self, features: &QueryFeatures, candidate: &Candidate) -> ScoreBreakdown {
        let base = candidate.rerank_score;
        let content_lower = candidate.content().to_lowercase();

        let overlapping_tokens = token_set(&content_lower)
            .intersection(&features.tokens)
            .count();
        let term_overlap_bonus = self.term_overlap_bonus(overlapping_tokens);

        let domain_term_hits = count_hits(&features.domain_terms, &content_lower);
        let domain_term_bonus = self.weights.domain_term_bonus * domain_term_hits as f64;

        let length_penalty = self.length_penalty(candidate.char_len());

        ScoreBreakdown {
            base,
            overlapping_tokens,
            term_overlap_bonus,
            domain_term_hits,
            domain_term_bonus,
            length_penalty,
            rerank_score: base * (1.0 + term_overlap_bonus + domain_term_bonus) * length_penalty,
        }
    }
}
