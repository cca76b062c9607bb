use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use std::fmt;

use super::{Application, Interview};
use crate::enums::DocumentType;

/// Typed pointer from a process entry to a referenced document.
///
/// Serialized as `{"type": "application", "id": "app-…"}`. Resolving it to a
/// [`Document`] is an explicit store call; nothing is loaded implicitly.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize, JsonSchema)]
#[serde(tag = "type", content = "id", rename_all = "snake_case")]
pub enum DocumentRef {
    Application(String),
    Interview(String),
}

impl DocumentRef {
    #[must_use]
    pub fn new(document_type: DocumentType, id: impl Into<String>) -> Self {
        match document_type {
            DocumentType::Application => Self::Application(id.into()),
            DocumentType::Interview => Self::Interview(id.into()),
        }
    }

    #[must_use]
    pub const fn document_type(&self) -> DocumentType {
        match self {
            Self::Application(_) => DocumentType::Application,
            Self::Interview(_) => DocumentType::Interview,
        }
    }

    #[must_use]
    pub fn id(&self) -> &str {
        match self {
            Self::Application(id) | Self::Interview(id) => id,
        }
    }
}

impl fmt::Display for DocumentRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {}", self.document_type(), self.id())
    }
}

/// A resolved referenced document.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum Document {
    Application(Application),
    Interview(Interview),
}

impl Document {
    #[must_use]
    pub fn reference(&self) -> DocumentRef {
        match self {
            Self::Application(a) => DocumentRef::Application(a.id.clone()),
            Self::Interview(i) => DocumentRef::Interview(i.id.clone()),
        }
    }

    /// Back-reference to the owning opportunity.
    #[must_use]
    pub fn parent(&self) -> Option<&str> {
        match self {
            Self::Application(a) => a.parent.as_deref(),
            Self::Interview(i) => i.parent.as_deref(),
        }
    }
}
