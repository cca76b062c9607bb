use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use super::DocumentRef;
use crate::enums::DocumentType;

/// A dated, typed entry in an opportunity's timeline.
///
/// Has no identity of its own; it lives and dies with its opportunity.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema, PartialEq, Eq)]
pub struct Process {
    /// Owning opportunity id.
    pub parent: String,
    /// Free-form date string, kept exactly as supplied.
    pub date: String,
    pub document: DocumentRef,
}

impl Process {
    #[must_use]
    pub const fn document_type(&self) -> DocumentType {
        self.document.document_type()
    }
}
