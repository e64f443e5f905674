//! Prefix-based deduplication across backends and query variants.

use std::collections::HashSet;

use logsift_core::config::defaults::DEFAULT_DEDUP_PREFIX_CHARS;
use logsift_core::models::Candidate;

/// Collapses candidates whose content shares the same leading characters.
#[derive(Debug, Clone, Copy)]
pub struct Deduplicator {
    prefix_chars: usize,
}

impl Deduplicator {
    pub fn new(prefix_chars: usize) -> Self {
        Self { prefix_chars }
    }

    pub fn prefix_chars(&self) -> usize {
        self.prefix_chars
    }

    /// Concatenate `lists` in order, keeping the first candidate per prefix.
    pub fn merge<I>(&self, lists: I) -> Vec<Candidate>
    where
        I: IntoIterator<Item = Vec<Candidate>>,
    {
        let mut seen: HashSet<String> = HashSet::new();
        let mut unique = Vec::new();
        for candidate in lists.into_iter().flatten() {
            if seen.insert(candidate.content_prefix(self.prefix_chars).to_owned()) {
                unique.push(candidate);
            }
        }
        unique
    }
}

impl Default for Deduplicator {
    fn default() -> Self {
        Self::new(DEFAULT_DEDUP_PREFIX_CHARS)
    }
}
