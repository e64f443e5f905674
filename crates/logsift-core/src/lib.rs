//! # logsift-core
//!
//! Foundation crate for the logsift retrieval pipeline.
//! Defines the data model, collaborator traits, errors, config, and constants.
//! Every other crate in the workspace depends on this.

pub mod config;
pub mod constants;
pub mod errors;
pub mod models;
pub mod traits;

// Re-export the most commonly used types at the crate root.
pub use config::LogsiftConfig;
pub use errors::{LogsiftError, LogsiftResult};
pub use models::{Candidate, CandidateSource, Query, QueryVariant, RankedResult};
