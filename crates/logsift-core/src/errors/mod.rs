mod config_error;

pub use config_error::ConfigError;

/// Convenience alias used across every logsift crate.
pub type LogsiftResult<T> = Result<T, LogsiftError>;

/// Top-level error for the retrieval pipeline.
///
/// Only `InvalidArgument` and `SystemicRetrievalFailure` ever leave
/// `RetrievalEngine::retrieve`; backend errors are absorbed at the call site.
#[derive(Debug, thiserror::Error)]
pub enum LogsiftError {
    #[error("invalid argument: {reason}")]
    InvalidArgument { reason: String },

    #[error("backend unavailable: {backend}: {reason}")]
    BackendUnavailable { backend: String, reason: String },

    #[error("backend call failed: {backend}: {reason}")]
    BackendCallFailed { backend: String, reason: String },

    #[error(
        "systemic retrieval failure: no candidates from [{}] despite a non-empty corpus",
        .backends.join(", ")
    )]
    SystemicRetrievalFailure { backends: Vec<String> },

    #[error("config error: {0}")]
    ConfigError(#[from] ConfigError),

    #[error("io error: {0}")]
    Io(#[from] std::io::Error),
}

impl LogsiftError {
    pub fn invalid_argument(reason: impl Into<String>) -> Self {
        Self::InvalidArgument {
            reason: reason.into(),
        }
    }

    pub fn call_failed(backend: impl Into<String>, reason: impl Into<String>) -> Self {
        Self::BackendCallFailed {
            backend: backend.into(),
            reason: reason.into(),
        }
    }

    pub fn unavailable(backend: impl Into<String>, reason: impl Into<String>) -> Self {
        Self::BackendUnavailable {
            backend: backend.into(),
            reason: reason.into(),
        }
    }

    /// Whether retrying the same request could succeed.
    ///
    /// Caller mistakes and permanent degradations are not retryable;
    /// infrastructure faults are.
    pub fn is_retryable(&self) -> bool {
        matches!(
            self,
            Self::BackendCallFailed { .. } | Self::SystemicRetrievalFailure { .. } | Self::Io(_)
        )
    }
}
