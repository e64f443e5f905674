//! Query analysis: domain-error vocabulary, query type, and complexity.

pub mod domain_terms;
pub mod query_analyzer;

pub use domain_terms::{count_hits, extract_terms};
pub use query_analyzer::{analyze, assess_complexity, classify};
