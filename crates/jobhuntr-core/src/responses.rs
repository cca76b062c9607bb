//! Response types returned to callers.
//!
//! `OpportunitySummary` is the list representation:
//! `{id, company, position, processes: [{date, document: {…}, type}]}` where the
//! document is `{id, status}` for applications and
//! `{id, interviewer, location, notes, url}` for interviews.

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use crate::entities::{Application, Document, DocumentRef, Interview, Opportunity};
use crate::enums::DocumentType;

/// List representation of an application.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema, PartialEq, Eq)]
pub struct ApplicationView {
    pub id: String,
    pub status: String,
}

/// List representation of an interview. Unset fields render as `null`.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema, PartialEq, Eq)]
pub struct InterviewView {
    pub id: String,
    pub interviewer: Option<String>,
    pub location: Option<String>,
    pub notes: Option<String>,
    pub url: Option<String>,
}

/// Resolved document as shown in a process entry. The sibling `type` field
/// on [`ProcessView`] says which shape this is.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema, PartialEq, Eq)]
#[serde(untagged)]
pub enum DocumentView {
    Application(ApplicationView),
    Interview(InterviewView),
}

impl From<&Application> for DocumentView {
    fn from(a: &Application) -> Self {
        Self::Application(ApplicationView {
            id: a.id.clone(),
            status: a.status.clone(),
        })
    }
}

impl From<&Interview> for DocumentView {
    fn from(i: &Interview) -> Self {
        Self::Interview(InterviewView {
            id: i.id.clone(),
            interviewer: i.interviewer.clone(),
            location: i.location.clone(),
            notes: i.notes.clone(),
            url: i.url.clone(),
        })
    }
}

impl From<&Document> for DocumentView {
    fn from(doc: &Document) -> Self {
        match doc {
            Document::Application(a) => a.into(),
            Document::Interview(i) => i.into(),
        }
    }
}

/// One timeline entry in the list representation.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema, PartialEq, Eq)]
pub struct ProcessView {
    pub date: String,
    pub document: DocumentView,
    #[serde(rename = "type")]
    pub document_type: DocumentType,
}

/// One opportunity in the list representation.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema, PartialEq, Eq)]
pub struct OpportunitySummary {
    pub id: String,
    pub company: String,
    pub position: String,
    pub processes: Vec<ProcessView>,
}

impl OpportunitySummary {
    /// Build a summary from an opportunity and its already-resolved processes.
    #[must_use]
    pub fn new(opportunity: &Opportunity, processes: Vec<ProcessView>) -> Self {
        Self {
            id: opportunity.id.clone(),
            company: opportunity.company.clone(),
            position: opportunity.position.clone(),
            processes,
        }
    }
}

/// Short human-readable confirmation for a successful mutation.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema, PartialEq, Eq)]
pub struct Confirmation {
    pub message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
}

impl Confirmation {
    #[must_use]
    pub fn new(message: impl Into<String>, id: Option<String>) -> Self {
        Self {
            message: message.into(),
            id,
        }
    }

    #[must_use]
    pub fn opportunity_created(id: &str) -> Self {
        Self::new("successfully created opportunity", Some(id.to_string()))
    }

    #[must_use]
    pub fn opportunity_updated(id: &str) -> Self {
        Self::new("successfully updated opportunity", Some(id.to_string()))
    }

    #[must_use]
    pub fn opportunity_deleted(id: &str) -> Self {
        Self::new(
            "opportunity and all processes have been deleted",
            Some(id.to_string()),
        )
    }

    #[must_use]
    pub fn document_attached(document: &DocumentRef) -> Self {
        Self::new(
            format!("successfully created {}", document.document_type()),
            Some(document.id().to_string()),
        )
    }

    #[must_use]
    pub fn document_detached(document: &DocumentRef) -> Self {
        Self::new(
            format!(
                "Successfully deleted {} and associated process",
                document.document_type()
            ),
            Some(document.id().to_string()),
        )
    }
}

/// A process entry whose document no longer resolves.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema, PartialEq, Eq)]
pub struct DanglingProcess {
    pub opportunity_id: String,
    pub document: DocumentRef,
}

/// A document whose `parent` disagrees with the process that references it.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema, PartialEq, Eq)]
pub struct ParentMismatch {
    pub document: DocumentRef,
    pub recorded_parent: Option<String>,
    pub owning_opportunity: String,
}

/// Outcome of a reconciliation pass over the forward and back references.
#[derive(Debug, Clone, Default, Serialize, Deserialize, JsonSchema, PartialEq, Eq)]
pub struct ReconcileReport {
    pub dry_run: bool,
    /// Documents no process refers to.
    pub orphaned_documents: Vec<DocumentRef>,
    pub dangling_processes: Vec<DanglingProcess>,
    pub parent_mismatches: Vec<ParentMismatch>,
}

impl ReconcileReport {
    #[must_use]
    pub fn is_clean(&self) -> bool {
        self.orphaned_documents.is_empty()
            && self.dangling_processes.is_empty()
            && self.parent_mismatches.is_empty()
    }
}
