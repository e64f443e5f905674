mod analysis;
mod candidate;
mod degradation_event;
mod query;
mod report;

pub use analysis::{Complexity, DomainCategory, DomainTerm, QueryAnalysis, QueryType};
pub use candidate::{Candidate, CandidateSource, RankedResult};
pub use degradation_event::DegradationEvent;
pub use query::{Query, QueryVariant};
pub use report::{RetrievalReport, RetrievalStats};
