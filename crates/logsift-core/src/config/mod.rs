pub mod defaults;
mod observability_config;
mod retrieval_config;

use std::path::Path;

use serde::{Deserialize, Serialize};

pub use observability_config::ObservabilityConfig;
pub use retrieval_config::RetrievalConfig;

use crate::errors::{ConfigError, LogsiftResult};

/// Top-level configuration. Every section falls back to its defaults.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct LogsiftConfig {
    pub retrieval: RetrievalConfig,
    pub observability: ObservabilityConfig,
}

impl LogsiftConfig {
    /// Parse a TOML document. Missing sections and fields keep their defaults.
    pub fn from_toml(toml_str: &str) -> LogsiftResult<Self> {
        let config: Self = toml::from_str(toml_str).map_err(|e| ConfigError::ParseFailed {
            source_name: "config".to_string(),
            reason: e.to_string(),
        })?;
        config.validate()?;
        Ok(config)
    }

    /// Read and parse a TOML file.
    pub fn from_file(path: impl AsRef<Path>) -> LogsiftResult<Self> {
        let content = std::fs::read_to_string(path.as_ref())?;
        Self::from_toml(&content)
    }

    /// Reject values the pipeline cannot run with.
    pub fn validate(&self) -> LogsiftResult<()> {
        self.retrieval.validate()
    }
}
