use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// An optional backend that was found unavailable and replaced by a fallback.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DegradationEvent {
    pub component: String,
    pub failure: String,
    pub fallback: String,
    pub timestamp: DateTime<Utc>,
}

impl DegradationEvent {
    pub fn now(
        component: impl Into<String>,
        failure: impl Into<String>,
        fallback: impl Into<String>,
    ) -> Self {
        Self {
            component: component.into(),
            failure: failure.into(),
            fallback: fallback.into(),
            timestamp: Utc::now(),
        }
    }
}
