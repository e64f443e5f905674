//! Synonym substitution, log-vocabulary aware.
//!
//! Each table key found in the query (case-insensitive) yields one variant
//! per alternative, with the first occurrence of the key replaced.
//! E.g., "database timeout" → "数据库 timeout", "DB timeout", ...
//! Default entries are hardcoded; can be overridden via a TOML file.

use std::collections::BTreeMap;
use std::path::Path;
use std::sync::LazyLock;

use logsift_core::config::RetrievalConfig;
use logsift_core::errors::{ConfigError, LogsiftResult};
use logsift_core::models::{Query, QueryVariant};
use regex::Regex;
use serde::Deserialize;

const DEFAULT_SYNONYMS: &[(&str, &[&str])] = &[
    ("timeout", &["响应超时", "连接超时", "执行超时"]),
    ("error", &["错误", "异常", "故障"]),
    ("memory", &["内存", "RAM"]),
    ("database", &["数据库", "DB"]),
];

static BUILTIN_TABLE: LazyLock<SynonymTable> = LazyLock::new(|| {
    let entries = DEFAULT_SYNONYMS
        .iter()
        .filter_map(|(key, alternatives)| {
            SynonymEntry::new(*key, alternatives.iter().map(|a| a.to_string()).collect()).ok()
        })
        .collect();
    SynonymTable { entries }
});

/// One key and its replacements, with a compiled case-insensitive matcher.
#[derive(Debug, Clone)]
pub struct SynonymEntry {
    key: String,
    alternatives: Vec<String>,
    matcher: Regex,
}

impl SynonymEntry {
    pub fn new(key: impl Into<String>, alternatives: Vec<String>) -> LogsiftResult<Self> {
        let key = key.into();
        if key.trim().is_empty() {
            return Err(ConfigError::InvalidValue {
                field: "synonyms".to_string(),
                reason: "synonym key must not be blank".to_string(),
            }
            .into());
        }
        let matcher = Regex::new(&format!("(?i){}", regex::escape(&key))).map_err(|e| {
            ConfigError::InvalidValue {
                field: format!("synonyms.{key}"),
                reason: e.to_string(),
            }
        })?;
        Ok(Self {
            key,
            alternatives,
            matcher,
        })
    }

    pub fn key(&self) -> &str {
        &self.key
    }

    pub fn alternatives(&self) -> &[String] {
        &self.alternatives
    }

    /// Replace the first case-insensitive occurrence of the key with `alternative`.
    /// `None` when the key does not occur.
    fn substitute(&self, text: &str, alternative: &str) -> Option<String> {
        let found = self.matcher.find(text)?;
        let mut rewritten = String::with_capacity(text.len() + alternative.len());
        rewritten.push_str(&text[..found.start()]);
        rewritten.push_str(alternative);
        rewritten.push_str(&text[found.end()..]);
        Some(rewritten)
    }
}

#[derive(Deserialize)]
struct SynonymFile {
    #[serde(default)]
    synonyms: BTreeMap<String, Vec<String>>,
}

/// Ordered synonym table. Entry order decides variant order.
#[derive(Debug, Clone)]
pub struct SynonymTable {
    entries: Vec<SynonymEntry>,
}

impl SynonymTable {
    /// The built-in log vocabulary, compiled once per process.
    pub fn builtin() -> &'static SynonymTable {
        &BUILTIN_TABLE
    }

    pub fn new(entries: Vec<SynonymEntry>) -> Self {
        Self { entries }
    }

    /// Parse a `[synonyms]` TOML table. Keys are applied in sorted order.
    pub fn from_toml(toml_str: &str) -> LogsiftResult<Self> {
        let file: SynonymFile = toml::from_str(toml_str).map_err(|e| ConfigError::ParseFailed {
            source_name: "synonym table".to_string(),
            reason: e.to_string(),
        })?;
        let entries = file
            .synonyms
            .into_iter()
            .map(|(key, alternatives)| SynonymEntry::new(key, alternatives))
            .collect::<LogsiftResult<Vec<_>>>()?;
        Ok(Self { entries })
    }

    pub fn from_file(path: impl AsRef<Path>) -> LogsiftResult<Self> {
        let content = std::fs::read_to_string(path.as_ref())?;
        Self::from_toml(&content)
    }

    pub fn entries(&self) -> &[SynonymEntry] {
        &self.entries
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

/// Produces query variants from a synonym table.
#[derive(Debug, Clone)]
pub struct QueryExpander {
    table: SynonymTable,
    enabled: bool,
}

impl QueryExpander {
    pub fn new(table: SynonymTable) -> Self {
        Self {
            table,
            enabled: true,
        }
    }

    /// Expander over the built-in table.
    pub fn builtin() -> Self {
        Self::new(SynonymTable::builtin().clone())
    }

    /// Expander honoring `query_expansion` and `synonyms_path`.
    pub fn from_config(config: &RetrievalConfig) -> LogsiftResult<Self> {
        let table = match &config.synonyms_path {
            Some(path) => SynonymTable::from_file(path)?,
            None => SynonymTable::builtin().clone(),
        };
        Ok(Self::new(table).with_enabled(config.query_expansion))
    }

    /// When disabled, `expand` returns only the original query.
    pub fn with_enabled(mut self, enabled: bool) -> Self {
        self.enabled = enabled;
        self
    }

    pub fn is_enabled(&self) -> bool {
        self.enabled
    }

    pub fn table(&self) -> &SynonymTable {
        &self.table
    }

    /// Expand a query into its variants.
    ///
    /// The original query is always first and unmodified. Variants with the
    /// same final text are kept once, in first-produced order.
    pub fn expand<'q>(&self, query: &'q Query) -> Vec<QueryVariant<'q>> {
        let mut variants = vec![QueryVariant::original(query)];
        if !self.enabled {
            return variants;
        }

        let text = query.as_str();
        for entry in &self.table.entries {
            for alternative in &entry.alternatives {
                let Some(rewritten) = entry.substitute(text, alternative) else {
                    break;
                };
                if !variants.iter().any(|v| v.text() == rewritten) {
                    variants.push(QueryVariant::new(rewritten, query));
                }
            }
        }

        variants
    }
}

impl Default for QueryExpander {
    fn default() -> Self {
        Self::builtin()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn texts(expander: &QueryExpander, query: &str) -> Vec<String> {
        let query = Query::new(query);
        expander
            .expand(&query)
            .iter()
            .map(|v| v.text().to_string())
            .collect()
    }

    #[test]
    fn no_key_yields_only_original() {
        let out = texts(&QueryExpander::builtin(), "disk quota exceeded");
        assert_eq!(out, vec!["disk quota exceeded"]);
    }

    #[test]
    fn one_variant_per_alternative() {
        let out = texts(&QueryExpander::builtin(), "memory leak in worker");
        assert_eq!(
            out,
            vec![
                "memory leak in worker",
                "内存 leak in worker",
                "RAM leak in worker",
            ]
        );
    }

    #[test]
    fn matching_is_case_insensitive_and_replaces_first_occurrence_only() {
        let out = texts(&QueryExpander::builtin(), "Database down, database locked");
        assert_eq!(out[0], "Database down, database locked");
        assert_eq!(out[1], "数据库 down, database locked");
        assert_eq!(out[2], "DB down, database locked");
    }

    #[test]
    fn multiple_keys_follow_table_order() {
        let out = texts(&QueryExpander::builtin(), "error after timeout");
        assert_eq!(out.len(), 1 + 3 + 3);
        assert_eq!(out[1], "error after 响应超时");
        assert_eq!(out[4], "错误 after timeout");
    }

    #[test]
    fn key_inside_a_longer_word_still_matches() {
        let out = texts(&QueryExpander::builtin(), "errors everywhere");
        assert!(out.contains(&"错误s everywhere".to_string()));
    }

    #[test]
    fn duplicate_variants_are_removed() {
        let table = SynonymTable::new(vec![
            SynonymEntry::new("oom", vec!["out of memory".into(), "out of memory".into()]).unwrap(),
        ]);
        let out = texts(&QueryExpander::new(table), "oom killer");
        assert_eq!(out, vec!["oom killer", "out of memory killer"]);
    }

    #[test]
    fn disabled_expander_returns_original_only() {
        let expander = QueryExpander::builtin().with_enabled(false);
        assert_eq!(texts(&expander, "database timeout"), vec!["database timeout"]);
    }

    #[test]
    fn variants_reference_their_origin() {
        let query = Query::new("memory spike");
        let variants = QueryExpander::builtin().expand(&query);
        assert!(variants[0].is_original());
        assert!(variants.iter().all(|v| v.origin() == &query));
        assert!(!variants[1].is_original());
    }

    #[test]
    fn toml_table_replaces_builtin() {
        let table = SynonymTable::from_toml(
            r#"
[synonyms]
refused = ["rejected", "denied"]
"#,
        )
        .unwrap();
        assert_eq!(table.len(), 1);
        let out = texts(&QueryExpander::new(table), "connection REFUSED");
        assert_eq!(
            out,
            vec!["connection REFUSED", "connection rejected", "connection denied"]
        );
    }

    #[test]
    fn malformed_toml_is_config_error() {
        let err = SynonymTable::from_toml("[synonyms\nbad").unwrap_err();
        assert!(matches!(err, logsift_core::LogsiftError::ConfigError(_)));
    }

    #[test]
    fn from_config_respects_expansion_switch() {
        let config = RetrievalConfig {
            query_expansion: false,
            ..RetrievalConfig::default()
        };
        let expander = QueryExpander::from_config(&config).unwrap();
        assert!(!expander.is_enabled());
        assert_eq!(expander.table().len(), 4);
    }

    #[test]
    fn from_config_missing_synonym_file_is_io_error() {
        let config = RetrievalConfig {
            synonyms_path: Some("/nonexistent/logsift/synonyms.toml".to_string()),
            ..RetrievalConfig::default()
        };
        let err = QueryExpander::from_config(&config).unwrap_err();
        assert!(matches!(err, logsift_core::LogsiftError::Io(_)));
    }

    #[test]
    fn blank_key_is_rejected() {
        assert!(SynonymEntry::new("  ", vec!["x".into()]).is_err());
    }

    #[test]
    fn regex_metacharacters_in_keys_are_literal() {
        let table =
            SynonymTable::new(vec![SynonymEntry::new("c++", vec!["cpp".into()]).unwrap()]);
        let out = texts(&QueryExpander::new(table), "c++ segfault");
        assert_eq!(out, vec!["c++ segfault", "cpp segfault"]);
    }
}
