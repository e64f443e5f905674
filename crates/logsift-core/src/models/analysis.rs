use serde::{Deserialize, Serialize};

/// Vocabulary family of a domain-error term.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DomainCategory {
    ErrorCode,
    Timeout,
    Connection,
    Memory,
    Database,
    Network,
}

impl DomainCategory {
    pub const ALL: [DomainCategory; 6] = [
        Self::ErrorCode,
        Self::Timeout,
        Self::Connection,
        Self::Memory,
        Self::Database,
        Self::Network,
    ];

    pub fn name(self) -> &'static str {
        match self {
            Self::ErrorCode => "error_code",
            Self::Timeout => "timeout",
            Self::Connection => "connection",
            Self::Memory => "memory",
            Self::Database => "database",
            Self::Network => "network",
        }
    }
}

/// A domain-error term matched in a query, with the text as written.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DomainTerm {
    pub category: DomainCategory,
    pub text: String,
}

/// What the caller is asking for.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum QueryType {
    Solution,
    Diagnosis,
    Explanation,
    General,
}

impl QueryType {
    pub fn name(self) -> &'static str {
        match self {
            Self::Solution => "solution",
            Self::Diagnosis => "diagnosis",
            Self::Explanation => "explanation",
            Self::General => "general",
        }
    }
}

/// Rough difficulty, by number of domain terms.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Complexity {
    Low,
    Medium,
    High,
}

/// Everything the analyzer knows about a query.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct QueryAnalysis {
    pub original_query: String,
    pub technical_terms: Vec<DomainTerm>,
    pub query_type: QueryType,
    pub complexity: Complexity,
    pub expanded_queries: Vec<String>,
}
