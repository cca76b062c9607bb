use chrono::{DateTime, Utc};
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use super::{DocumentRef, Process};

/// A job application target owned by one applicant, with a timeline of processes.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema, PartialEq, Eq)]
pub struct Opportunity {
    pub id: String,
    pub applicant: String,
    pub company: String,
    pub position: String,
    pub description: Option<String>,
    /// Timeline in insertion order.
    pub processes: Vec<Process>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Opportunity {
    /// Find the process entry pointing at `document`.
    #[must_use]
    pub fn process_for(&self, document: &DocumentRef) -> Option<&Process> {
        self.processes.iter().find(|p| &p.document == document)
    }
}
