//! Cross-cutting error types for jobhuntr.
//!
//! Storage errors (`DatabaseError`) live in `jobhuntr-db` and wrap `CoreError`
//! so the domain taxonomy survives up to the transport.

use thiserror::Error;

/// Errors that can be raised by any jobhuntr crate.
#[derive(Debug, Error)]
pub enum CoreError {
    /// A required field was missing or empty. Raised before any write.
    #[error("{0}")]
    Validation(String),

    /// A referenced id does not resolve to a live record.
    #[error("{entity_type} not found: {id}")]
    NotFound { entity_type: String, id: String },

    /// Forward process list and document back-reference have drifted apart.
    #[error("{0}")]
    Consistency(String),

    /// Catch-all for unexpected errors.
    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

impl CoreError {
    #[must_use]
    pub fn validation(message: impl Into<String>) -> Self {
        Self::Validation(message.into())
    }

    #[must_use]
    pub fn not_found(entity_type: impl Into<String>, id: impl Into<String>) -> Self {
        Self::NotFound {
            entity_type: entity_type.into(),
            id: id.into(),
        }
    }

    #[must_use]
    pub fn consistency(message: impl Into<String>) -> Self {
        Self::Consistency(message.into())
    }

    /// Failure status reported alongside the message.
    #[must_use]
    pub const fn kind(&self) -> FailureKind {
        match self {
            Self::Validation(_) => FailureKind::Validation,
            Self::NotFound { .. } => FailureKind::NotFound,
            Self::Consistency(_) => FailureKind::Consistency,
            Self::Other(_) => FailureKind::Internal,
        }
    }
}

/// Coarse failure status for transports (exit codes, HTTP statuses).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FailureKind {
    Validation,
    NotFound,
    Consistency,
    Internal,
}

impl FailureKind {
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Validation => "validation",
            Self::NotFound => "not_found",
            Self::Consistency => "consistency",
            Self::Internal => "internal",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn not_found_message_names_entity() {
        let err = CoreError::not_found("opportunity", "opp-00000001");
        assert_eq!(err.to_string(), "opportunity not found: opp-00000001");
        assert_eq!(err.kind(), FailureKind::NotFound);
    }

    #[test]
    fn validation_message_is_verbatim() {
        let err = CoreError::validation("company must be defined");
        assert_eq!(err.to_string(), "company must be defined");
        assert_eq!(err.kind().as_str(), "validation");
    }
}
