//! Lowercase + whitespace tokenization shared by BM25 and the feature scorer.

use std::collections::HashSet;

/// Lowercase `text` and split on Unicode whitespace.
pub fn tokenize(text: &str) -> Vec<String> {
    text.to_lowercase()
        .split_whitespace()
        .map(str::to_owned)
        .collect()
}

/// Distinct tokens of `text`.
pub fn token_set(text: &str) -> HashSet<String> {
    tokenize(text).into_iter().collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn lowercases_and_splits_on_any_whitespace() {
        assert_eq!(
            tokenize("ERROR 500\tDB\nTimeout"),
            vec!["error", "500", "db", "timeout"]
        );
    }

    #[test]
    fn punctuation_stays_attached() {
        assert_eq!(tokenize("timeout: pool"), vec!["timeout:", "pool"]);
    }

    #[test]
    fn blank_text_has_no_tokens() {
        assert!(tokenize("  \n ").is_empty());
        assert!(token_set("").is_empty());
    }

    #[test]
    fn token_set_drops_repeats() {
        assert_eq!(token_set("db DB db").len(), 1);
    }
}
