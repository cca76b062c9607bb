use chrono::{DateTime, Utc};
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

/// A submitted application referenced from a process entry.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema, PartialEq, Eq)]
pub struct Application {
    pub id: String,
    pub status: String,
    /// Owning opportunity id. `None` only inside an uncommitted attach.
    pub parent: Option<String>,
    pub created_at: DateTime<Utc>,
}
