use chrono::{DateTime, Utc};
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

/// An interview referenced from a process entry.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema, PartialEq, Eq)]
pub struct Interview {
    pub id: String,
    pub interviewer: Option<String>,
    pub location: Option<String>,
    pub notes: Option<String>,
    pub url: Option<String>,
    /// Owning opportunity id. `None` only inside an uncommitted attach.
    pub parent: Option<String>,
    pub created_at: DateTime<Utc>,
}
