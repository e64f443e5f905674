use logsift_core::errors::*;

#[test]
fn invalid_argument_carries_reason() {
    let err = LogsiftError::invalid_argument("top_k must be positive, got 0");
    assert!(err.to_string().contains("top_k must be positive"));
    assert!(!err.is_retryable());
}

#[test]
fn backend_unavailable_carries_backend_and_reason() {
    let err = LogsiftError::unavailable("cross_encoder", "model file missing");
    let msg = err.to_string();
    assert!(msg.contains("cross_encoder"));
    assert!(msg.contains("model file missing"));
    assert!(!err.is_retryable());
}

#[test]
fn backend_call_failed_is_retryable() {
    let err = LogsiftError::call_failed("dense", "connection reset");
    assert!(err.to_string().contains("connection reset"));
    assert!(err.is_retryable());
}

#[test]
fn systemic_failure_lists_backends() {
    let err = LogsiftError::SystemicRetrievalFailure {
        backends: vec!["dense".into(), "sparse".into()],
    };
    let msg = err.to_string();
    assert!(msg.contains("dense, sparse"));
    assert!(err.is_retryable());
}

// --- From impls ---

#[test]
fn config_error_converts_to_logsift_error() {
    let cfg_err = ConfigError::InvalidValue {
        field: "retrieval.max_concurrency".into(),
        reason: "must be greater than zero".into(),
    };
    let err: LogsiftError = cfg_err.into();
    assert!(matches!(err, LogsiftError::ConfigError(_)));
    assert!(err.to_string().contains("retrieval.max_concurrency"));
}

#[test]
fn io_error_converts_to_logsift_error() {
    let io_err = std::io::Error::new(std::io::ErrorKind::NotFound, "missing.toml");
    let err: LogsiftError = io_err.into();
    assert!(matches!(err, LogsiftError::Io(_)));
}
