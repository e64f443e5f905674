use std::sync::LazyLock;

use logsift_core::models::{DomainCategory, DomainTerm};
use regex::Regex;

macro_rules! domain_pattern {
    ($name:ident, $regex_str:expr) => {
        static $name: LazyLock<Option<Regex>> = LazyLock::new(|| Regex::new($regex_str).ok());
    };
}

domain_pattern!(RE_ERROR_CODE, r"(?i)ERROR\s+\d+|error\s+code\s+\d+");
domain_pattern!(RE_TIMEOUT, r"(?i)timeout|time\s+out|响应超时|连接超时");
domain_pattern!(RE_CONNECTION, r"(?i)connection|connect|连接|链接");
domain_pattern!(RE_MEMORY, r"(?i)memory|内存|OOM|out of memory");
domain_pattern!(RE_DATABASE, r"(?i)database|db|mysql|oracle|数据库");
domain_pattern!(RE_NETWORK, r"(?i)network|网络|ping|telnet");

fn pattern_for(category: DomainCategory) -> &'static LazyLock<Option<Regex>> {
    match category {
        DomainCategory::ErrorCode => &RE_ERROR_CODE,
        DomainCategory::Timeout => &RE_TIMEOUT,
        DomainCategory::Connection => &RE_CONNECTION,
        DomainCategory::Memory => &RE_MEMORY,
        DomainCategory::Database => &RE_DATABASE,
        DomainCategory::Network => &RE_NETWORK,
    }
}

/// All domain-error terms in `query`, grouped by category in fixed order,
/// then by position. Repeated matches are kept.
pub fn extract_terms(query: &str) -> Vec<DomainTerm> {
    let mut terms = Vec::new();
    for category in DomainCategory::ALL {
        // A pattern that failed to compile yields no matches.
        let Some(re) = pattern_for(category).as_ref() else {
            continue;
        };
        terms.extend(re.find_iter(query).map(|m| DomainTerm {
            category,
            text: m.as_str().to_string(),
        }));
    }
    terms
}

/// Number of terms whose lowercase text occurs in `content_lower`.
pub fn count_hits(terms: &[DomainTerm], content_lower: &str) -> usize {
    terms
        .iter()
        .filter(|t| content_lower.contains(&t.text.to_lowercase()))
        .count()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn texts(query: &str) -> Vec<String> {
        extract_terms(query).into_iter().map(|t| t.text).collect()
    }

    #[test]
    fn error_codes_match_both_forms() {
        assert_eq!(texts("got ERROR 1045 then error code 17"), vec!["ERROR 1045", "error code 17"]);
    }

    #[test]
    fn matching_ignores_case_and_keeps_original_text() {
        let terms = extract_terms("Connection TIMEOUT");
        assert_eq!(terms.len(), 2);
        assert_eq!(terms[0].category, DomainCategory::Timeout);
        assert_eq!(terms[0].text, "TIMEOUT");
        assert_eq!(terms[1].category, DomainCategory::Connection);
        assert_eq!(terms[1].text, "Connection");
    }

    #[test]
    fn chinese_terms_are_recognized() {
        assert_eq!(texts("数据库连接超时"), vec!["连接超时", "连接", "数据库"]);
    }

    #[test]
    fn repeated_terms_are_counted_twice() {
        assert_eq!(texts("ping ping"), vec!["ping", "ping"]);
    }

    #[test]
    fn no_terms_in_plain_text() {
        assert!(extract_terms("the quick brown fox").is_empty());
    }

    #[test]
    fn hits_are_case_insensitive_substrings() {
        let terms = extract_terms("MySQL timeout");
        assert_eq!(count_hits(&terms, "mysql server has gone away"), 1);
        assert_eq!(count_hits(&terms, "mysql read timeout"), 2);
        assert_eq!(count_hits(&terms, "nothing relevant"), 0);
    }
}
