use std::fmt;

use serde::{Deserialize, Serialize};

/// Which backend produced a candidate.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CandidateSource {
    Dense,
    Sparse,
}

impl CandidateSource {
    pub fn name(self) -> &'static str {
        match self {
            Self::Dense => "dense",
            Self::Sparse => "sparse",
        }
    }
}

impl fmt::Display for CandidateSource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// One retrieved log excerpt with its scores.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Candidate {
    pub content: String,
    /// Score reported by the retrieving backend.
    pub source_score: f64,
    pub source: CandidateSource,
    /// Score after reranking. Starts equal to `source_score`.
    pub rerank_score: f64,
}

impl Candidate {
    pub fn new(content: impl Into<String>, source_score: f64, source: CandidateSource) -> Self {
        Self {
            content: content.into(),
            source_score,
            source,
            rerank_score: source_score,
        }
    }

    pub fn dense(content: impl Into<String>, score: f64) -> Self {
        Self::new(content, score, CandidateSource::Dense)
    }

    pub fn sparse(content: impl Into<String>, score: f64) -> Self {
        Self::new(content, score, CandidateSource::Sparse)
    }

    pub fn content(&self) -> &str {
        &self.content
    }

    /// Final relevance score exposed to callers.
    pub fn score(&self) -> f64 {
        self.rerank_score
    }

    pub fn source(&self) -> CandidateSource {
        self.source
    }

    /// The first `chars` characters of the content, case preserved.
    pub fn content_prefix(&self, chars: usize) -> &str {
        match self.content.char_indices().nth(chars) {
            Some((end, _)) => &self.content[..end],
            None => &self.content,
        }
    }

    /// Content length in characters.
    pub fn char_len(&self) -> usize {
        self.content.chars().count()
    }
}

/// Ordered, truncated output of one retrieval.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct RankedResult {
    candidates: Vec<Candidate>,
}

impl RankedResult {
    pub fn new(candidates: Vec<Candidate>) -> Self {
        Self { candidates }
    }

    pub fn empty() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.candidates.len()
    }

    pub fn is_empty(&self) -> bool {
        self.candidates.is_empty()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Candidate> {
        self.candidates.iter()
    }

    pub fn as_slice(&self) -> &[Candidate] {
        &self.candidates
    }

    pub fn first(&self) -> Option<&Candidate> {
        self.candidates.first()
    }

    pub fn contents(&self) -> Vec<&str> {
        self.candidates.iter().map(Candidate::content).collect()
    }

    pub fn into_vec(self) -> Vec<Candidate> {
        self.candidates
    }
}

impl IntoIterator for RankedResult {
    type Item = Candidate;
    type IntoIter = std::vec::IntoIter<Candidate>;

    fn into_iter(self) -> Self::IntoIter {
        self.candidates.into_iter()
    }
}

impl<'a> IntoIterator for &'a RankedResult {
    type Item = &'a Candidate;
    type IntoIter = std::slice::Iter<'a, Candidate>;

    fn into_iter(self) -> Self::IntoIter {
        self.candidates.iter()
    }
}
