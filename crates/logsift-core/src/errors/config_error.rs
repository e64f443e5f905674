/// Configuration loading errors.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("failed to parse {source_name}: {reason}")]
    ParseFailed { source_name: String, reason: String },

    #[error("invalid value for {field}: {reason}")]
    InvalidValue { field: String, reason: String },
}
