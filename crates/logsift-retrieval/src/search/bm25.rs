//! In-memory BM25 Okapi index.
//!
//! idf(t) = ln(N - n(t) + 0.5) - ln(n(t) + 0.5), where terms present in more
//! than half the corpus get a negative idf that is floored at
//! `epsilon * mean(idf)`.

use std::collections::HashMap;

use logsift_core::constants::{BM25_B, BM25_EPSILON, BM25_K1};
use logsift_core::errors::{LogsiftError, LogsiftResult};

use crate::tokenize::tokenize;

/// Tunable BM25 parameters.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Bm25Params {
    pub k1: f64,
    pub b: f64,
    pub epsilon: f64,
}

impl Default for Bm25Params {
    fn default() -> Self {
        Self {
            k1: BM25_K1,
            b: BM25_B,
            epsilon: BM25_EPSILON,
        }
    }
}

#[derive(Debug, Clone)]
pub struct Bm25Index {
    params: Bm25Params,
    /// Term frequencies per document, in corpus order.
    term_freqs: Vec<HashMap<String, usize>>,
    doc_lens: Vec<usize>,
    avg_doc_len: f64,
    idf: HashMap<String, f64>,
}

impl Bm25Index {
    /// Build over `documents` with default parameters. Fails on an empty corpus.
    pub fn build(documents: &[String]) -> LogsiftResult<Self> {
        Self::with_params(documents, Bm25Params::default())
    }

    pub fn with_params(documents: &[String], params: Bm25Params) -> LogsiftResult<Self> {
        if documents.is_empty() {
            return Err(LogsiftError::unavailable(
                "sparse",
                "cannot build BM25 over an empty corpus",
            ));
        }

        let mut term_freqs = Vec::with_capacity(documents.len());
        let mut doc_lens = Vec::with_capacity(documents.len());
        let mut doc_freq: HashMap<String, usize> = HashMap::new();

        for doc in documents {
            let tokens = tokenize(doc);
            doc_lens.push(tokens.len());
            let mut freqs: HashMap<String, usize> = HashMap::new();
            for token in tokens {
                *freqs.entry(token).or_insert(0) += 1;
            }
            for term in freqs.keys() {
                *doc_freq.entry(term.clone()).or_insert(0) += 1;
            }
            term_freqs.push(freqs);
        }

        let total_len: usize = doc_lens.iter().sum();
        let avg_doc_len = total_len as f64 / documents.len() as f64;
        let idf = compute_idf(&doc_freq, documents.len(), params.epsilon);

        Ok(Self {
            params,
            term_freqs,
            doc_lens,
            avg_doc_len,
            idf,
        })
    }

    /// Number of indexed documents.
    pub fn len(&self) -> usize {
        self.doc_lens.len()
    }

    pub fn is_empty(&self) -> bool {
        self.doc_lens.is_empty()
    }

    pub fn idf(&self, term: &str) -> f64 {
        self.idf.get(term).copied().unwrap_or(0.0)
    }

    /// Score every document against `query`, in corpus order.
    ///
    /// Repeated query tokens contribute once per occurrence; unknown tokens
    /// contribute nothing.
    pub fn scores(&self, query: &str) -> Vec<f64> {
        let Bm25Params { k1, b, .. } = self.params;
        let avg_doc_len = self.avg_doc_len.max(f64::EPSILON);
        let query_tokens = tokenize(query);

        self.term_freqs
            .iter()
            .zip(&self.doc_lens)
            .map(|(freqs, &doc_len)| {
                let norm = k1 * (1.0 - b + b * doc_len as f64 / avg_doc_len);
                query_tokens
                    .iter()
                    .map(|token| {
                        let tf = freqs.get(token).copied().unwrap_or(0) as f64;
                        if tf == 0.0 {
                            return 0.0;
                        }
                        self.idf(token) * tf * (k1 + 1.0) / (tf + norm)
                    })
                    .sum()
            })
            .collect()
    }

    /// `(document index, score)` for the best `top_k` documents, highest
    /// first, ties in corpus order.
    pub fn top_k(&self, query: &str, top_k: usize) -> Vec<(usize, f64)> {
        let mut ranked: Vec<(usize, f64)> = self.scores(query).into_iter().enumerate().collect();
        ranked.sort_by(|a, b| b.1.total_cmp(&a.1));
        ranked.truncate(top_k);
        ranked
    }
}

fn compute_idf(
    doc_freq: &HashMap<String, usize>,
    corpus_size: usize,
    epsilon: f64,
) -> HashMap<String, f64> {
    let n = corpus_size as f64;
    let mut idf: HashMap<String, f64> = doc_freq
        .iter()
        .map(|(term, &df)| {
            let df = df as f64;
            (term.clone(), (n - df + 0.5).ln() - (df + 0.5).ln())
        })
        .collect();

    if idf.is_empty() {
        return idf;
    }

    // Summed in sorted order so the floor does not depend on map iteration.
    let mut values: Vec<f64> = idf.values().copied().collect();
    values.sort_by(f64::total_cmp);
    let average_idf = values.iter().sum::<f64>() / values.len() as f64;
    let floor = epsilon * average_idf;
    for value in idf.values_mut() {
        if *value < 0.0 {
            *value = floor;
        }
    }
    idf
}
