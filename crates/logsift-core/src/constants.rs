/// logsift version.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Upper bound of the term-overlap bonus.
pub const MAX_TERM_OVERLAP_BONUS: f64 = 0.3;

/// Bonus per overlapping query/content token.
pub const TERM_OVERLAP_STEP: f64 = 0.1;

/// Bonus per domain-error term found in the content.
pub const DOMAIN_TERM_BONUS: f64 = 0.05;

/// Contents longer than this (in chars) are penalised.
pub const LONG_CONTENT_CHARS: usize = 1000;

/// Contents shorter than this (in chars) are penalised.
pub const SHORT_CONTENT_CHARS: usize = 100;

/// Multiplier applied to long contents.
pub const LONG_CONTENT_PENALTY: f64 = 0.8;

/// Multiplier applied to short contents.
pub const SHORT_CONTENT_PENALTY: f64 = 0.9;

/// BM25 term-frequency saturation.
pub const BM25_K1: f64 = 1.5;

/// BM25 document-length normalisation.
pub const BM25_B: f64 = 0.75;

/// Floor for negative IDFs, as a fraction of the average IDF.
pub const BM25_EPSILON: f64 = 0.25;
