//! Database error types for jobhuntr-db.

use std::time::Duration;

use jobhuntr_core::errors::{CoreError, FailureKind};
use thiserror::Error;

/// Errors from database operations.
#[derive(Debug, Error)]
pub enum DatabaseError {
    /// Domain failure: validation, not-found or reference drift.
    #[error(transparent)]
    Core(#[from] CoreError),

    /// A SQL query failed.
    #[error("Query failed: {0}")]
    Query(String),

    /// Schema migration failed.
    #[error("Migration failed: {0}")]
    Migration(String),

    /// Expected a result row but none was returned.
    #[error("No result returned")]
    NoResult,

    /// Invalid state encountered (e.g., bad data in DB).
    #[error("Invalid state: {0}")]
    InvalidState(String),

    /// A multi-step mutation did not finish in time and was rolled back.
    #[error("{operation} timed out after {after:?}; changes rolled back")]
    Timeout {
        operation: &'static str,
        after: Duration,
    },

    /// Filesystem error preparing the database location.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Underlying libSQL error.
    #[error("libSQL error: {0}")]
    LibSql(#[from] libsql::Error),

    /// Catch-all for unexpected errors.
    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

impl DatabaseError {
    /// Failure status for transports.
    #[must_use]
    pub const fn kind(&self) -> FailureKind {
        match self {
            Self::Core(err) => err.kind(),
            _ => FailureKind::Internal,
        }
    }

    #[must_use]
    pub const fn is_not_found(&self) -> bool {
        matches!(self.kind(), FailureKind::NotFound)
    }

    #[must_use]
    pub const fn is_validation(&self) -> bool {
        matches!(self.kind(), FailureKind::Validation)
    }

    #[must_use]
    pub const fn is_consistency(&self) -> bool {
        matches!(self.kind(), FailureKind::Consistency)
    }
}
