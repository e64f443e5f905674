//! Query classification by keyword, and complexity by domain-term count.

use logsift_core::models::{Complexity, Query, QueryAnalysis, QueryType};

use super::domain_terms::extract_terms;
use crate::expansion::QueryExpander;

const SOLUTION_KEYWORDS: &[&str] = &[
    "怎么", "如何", "解决", "修复", "how to", "how do", "fix", "resolve", "solve",
];
const DIAGNOSIS_KEYWORDS: &[&str] = &["原因", "为什么", "为何", "why", "cause", "reason"];
const EXPLANATION_KEYWORDS: &[&str] = &[
    "是什么", "解释", "说明", "what is", "explain", "meaning",
];

/// First matching keyword family wins, checked solution → diagnosis → explanation.
pub fn classify(query: &str) -> QueryType {
    let lower = query.to_lowercase();
    let has_any = |keywords: &[&str]| keywords.iter().any(|k| lower.contains(k));

    if has_any(SOLUTION_KEYWORDS) {
        QueryType::Solution
    } else if has_any(DIAGNOSIS_KEYWORDS) {
        QueryType::Diagnosis
    } else if has_any(EXPLANATION_KEYWORDS) {
        QueryType::Explanation
    } else {
        QueryType::General
    }
}

pub fn assess_complexity(query: &str) -> Complexity {
    match extract_terms(query).len() {
        0 => Complexity::Low,
        1 | 2 => Complexity::Medium,
        _ => Complexity::High,
    }
}

/// Full analysis, with variants from `expander`.
pub fn analyze(query: &Query, expander: &QueryExpander) -> QueryAnalysis {
    let text = query.as_str();
    QueryAnalysis {
        original_query: text.to_string(),
        technical_terms: extract_terms(text),
        query_type: classify(text),
        complexity: assess_complexity(text),
        expanded_queries: expander
            .expand(query)
            .into_iter()
            .map(|v| v.text().to_string())
            .collect(),
    }
}
