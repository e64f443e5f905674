// Single source of truth for all default values.

// --- Retrieval ---
pub const DEFAULT_OVERSAMPLE_FACTOR: usize = 2;
pub const DEFAULT_DEDUP_PREFIX_CHARS: usize = 100;
pub const DEFAULT_BACKEND_TIMEOUT_MS: u64 = 5_000;
pub const DEFAULT_RETRIEVAL_DEADLINE_MS: u64 = 15_000;
pub const DEFAULT_MAX_CONCURRENCY: usize = 8;
pub const DEFAULT_QUERY_EXPANSION: bool = true;
pub const DEFAULT_SPARSE_ENABLED: bool = true;
pub const DEFAULT_CROSS_ENCODER_ENABLED: bool = true;

// --- Observability ---
pub const DEFAULT_LOG_LEVEL: &str = "info";
pub const DEFAULT_JSON_LOGS: bool = true;
