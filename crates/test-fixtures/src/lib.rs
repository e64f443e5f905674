//! Test fixtures for logsift: golden log corpus loading and in-memory
//! doubles for the vector index, corpus provider, and cross-encoder.

use std::collections::HashSet;
use std::path::PathBuf;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Mutex;
use std::time::Duration;

use logsift_core::errors::{LogsiftError, LogsiftResult};
use logsift_core::traits::{CorpusProvider, CrossEncoderModel, VectorIndex};
use serde::de::DeserializeOwned;
use serde::Deserialize;

/// Root directory of the golden data shipped with this crate.
fn fixtures_root() -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR")).join("golden")
}

/// Load and deserialize a JSON fixture file.
///
/// # Panics
/// Panics if the file doesn't exist or can't be deserialized.
pub fn load_fixture<T: DeserializeOwned>(relative_path: &str) -> T {
    let path = fixtures_root().join(relative_path);
    let content = std::fs::read_to_string(&path)
        .unwrap_or_else(|e| panic!("Failed to read fixture {}: {}", path.display(), e));
    serde_json::from_str(&content)
        .unwrap_or_else(|e| panic!("Failed to parse fixture {}: {}", path.display(), e))
}

pub fn fixture_path(relative_path: &str) -> PathBuf {
    fixtures_root().join(relative_path)
}

/// One expected retrieval over the golden corpus.
#[derive(Debug, Clone, Deserialize)]
pub struct GoldenCase {
    pub name: String,
    pub query: String,
    pub top_k: i64,
    /// Substring the first result must contain.
    pub expected_first: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct GoldenCorpus {
    pub documents: Vec<String>,
    pub cases: Vec<GoldenCase>,
}

pub fn golden_corpus() -> GoldenCorpus {
    load_fixture("log_corpus.json")
}

fn tokens(text: &str) -> HashSet<String> {
    text.to_lowercase()
        .split_whitespace()
        .map(str::to_owned)
        .collect()
}

/// Jaccard similarity of lowercase whitespace tokens, in `[0, 1]`.
pub fn jaccard(a: &str, b: &str) -> f64 {
    let (a, b) = (tokens(a), tokens(b));
    let union = a.union(&b).count();
    if union == 0 {
        return 0.0;
    }
    a.intersection(&b).count() as f64 / union as f64
}

enum Scoring {
    Jaccard(Vec<String>),
    Fixed(Vec<(String, f64)>),
}

/// Vector index double. Either scores documents by token Jaccard similarity
/// or returns a fixed hit list regardless of the query.
pub struct InMemoryVectorIndex {
    scoring: Scoring,
    calls: AtomicUsize,
}

impl InMemoryVectorIndex {
    pub fn new(documents: Vec<String>) -> Self {
        Self {
            scoring: Scoring::Jaccard(documents),
            calls: AtomicUsize::new(0),
        }
    }

    pub fn from_strs(documents: &[&str]) -> Self {
        Self::new(documents.iter().map(|d| d.to_string()).collect())
    }

    /// Always return `hits` (best first), truncated to `top_k`.
    pub fn with_fixed_hits(hits: Vec<(&str, f64)>) -> Self {
        Self {
            scoring: Scoring::Fixed(hits.into_iter().map(|(c, s)| (c.to_string(), s)).collect()),
            calls: AtomicUsize::new(0),
        }
    }

    pub fn empty() -> Self {
        Self::new(Vec::new())
    }

    /// Number of `search` calls served.
    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

impl VectorIndex for InMemoryVectorIndex {
    fn search(&self, query_text: &str, top_k: usize) -> LogsiftResult<Vec<(String, f64)>> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        let mut hits = match &self.scoring {
            Scoring::Fixed(hits) => hits.clone(),
            Scoring::Jaccard(documents) => {
                let mut scored: Vec<(String, f64)> = documents
                    .iter()
                    .map(|d| (d.clone(), jaccard(query_text, d)))
                    .collect();
                scored.sort_by(|a, b| b.1.total_cmp(&a.1));
                scored
            }
        };
        hits.truncate(top_k);
        Ok(hits)
    }

    fn is_empty(&self) -> bool {
        match &self.scoring {
            Scoring::Jaccard(documents) => documents.is_empty(),
            Scoring::Fixed(hits) => hits.is_empty(),
        }
    }
}

/// Non-empty index whose every search fails.
#[derive(Debug, Default)]
pub struct FailingVectorIndex;

impl VectorIndex for FailingVectorIndex {
    fn search(&self, _query_text: &str, _top_k: usize) -> LogsiftResult<Vec<(String, f64)>> {
        Err(LogsiftError::call_failed("dense", "vector store connection refused"))
    }

    fn is_empty(&self) -> bool {
        false
    }
}

/// Wraps an index and sleeps before answering queries containing `marker`
/// (or every query when no marker is set).
pub struct SlowVectorIndex<I> {
    inner: I,
    delay: Duration,
    marker: Option<String>,
}

impl<I: VectorIndex> SlowVectorIndex<I> {
    pub fn new(inner: I, delay: Duration) -> Self {
        Self {
            inner,
            delay,
            marker: None,
        }
    }

    pub fn only_for(mut self, marker: impl Into<String>) -> Self {
        self.marker = Some(marker.into());
        self
    }
}

impl<I: VectorIndex> VectorIndex for SlowVectorIndex<I> {
    fn search(&self, query_text: &str, top_k: usize) -> LogsiftResult<Vec<(String, f64)>> {
        let slow = self
            .marker
            .as_deref()
            .map_or(true, |m| query_text.contains(m));
        if slow {
            std::thread::sleep(self.delay);
        }
        self.inner.search(query_text, top_k)
    }

    fn is_empty(&self) -> bool {
        self.inner.is_empty()
    }
}

/// Wraps an index and records the `top_k` of every search it serves.
pub struct RecordingVectorIndex<I> {
    inner: I,
    requested: Mutex<Vec<usize>>,
}

impl<I: VectorIndex> RecordingVectorIndex<I> {
    pub fn new(inner: I) -> Self {
        Self {
            inner,
            requested: Mutex::new(Vec::new()),
        }
    }

    /// `top_k` values received so far, in arrival order.
    pub fn requested_top_k(&self) -> Vec<usize> {
        self.requested
            .lock()
            .map(|r| r.clone())
            .unwrap_or_else(|poisoned| poisoned.into_inner().clone())
    }
}

impl<I: VectorIndex> VectorIndex for RecordingVectorIndex<I> {
    fn search(&self, query_text: &str, top_k: usize) -> LogsiftResult<Vec<(String, f64)>> {
        match self.requested.lock() {
            Ok(mut requested) => requested.push(top_k),
            Err(poisoned) => poisoned.into_inner().push(top_k),
        }
        self.inner.search(query_text, top_k)
    }

    fn is_empty(&self) -> bool {
        self.inner.is_empty()
    }
}

/// Corpus provider over a fixed document list.
#[derive(Debug, Clone, Default)]
pub struct StaticCorpus {
    documents: Vec<String>,
}

impl StaticCorpus {
    pub fn new(documents: Vec<String>) -> Self {
        Self { documents }
    }

    pub fn from_strs(documents: &[&str]) -> Self {
        Self::new(documents.iter().map(|d| d.to_string()).collect())
    }
}

impl CorpusProvider for StaticCorpus {
    fn list_documents(&self) -> LogsiftResult<Vec<String>> {
        Ok(self.documents.clone())
    }
}

#[derive(Debug, Default)]
pub struct FailingCorpus;

impl CorpusProvider for FailingCorpus {
    fn list_documents(&self) -> LogsiftResult<Vec<String>> {
        Err(LogsiftError::call_failed("corpus", "log archive unreachable"))
    }
}

/// Cross-encoder ranking longer contents higher.
#[derive(Debug, Default)]
pub struct LengthCrossEncoder;

impl CrossEncoderModel for LengthCrossEncoder {
    fn score(&self, _query: &str, content: &str) -> LogsiftResult<f64> {
        Ok(content.chars().count() as f64)
    }

    fn name(&self) -> &str {
        "length"
    }
}

#[derive(Debug, Default)]
pub struct FailingCrossEncoder;

impl CrossEncoderModel for FailingCrossEncoder {
    fn score(&self, _query: &str, _content: &str) -> LogsiftResult<f64> {
        Err(LogsiftError::call_failed("cross_encoder", "inference session crashed"))
    }

    fn name(&self) -> &str {
        "failing"
    }
}

/// Cross-encoder that sleeps before scoring.
#[derive(Debug)]
pub struct SlowCrossEncoder {
    pub delay: Duration,
}

impl CrossEncoderModel for SlowCrossEncoder {
    fn score(&self, _query: &str, _content: &str) -> LogsiftResult<f64> {
        std::thread::sleep(self.delay);
        Ok(1.0)
    }

    fn name(&self) -> &str {
        "slow"
    }
}
