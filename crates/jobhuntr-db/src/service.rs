//! Service layer serializing mutations and bounding them in time.
//!
//! `HuntService` wraps `HuntDb`. All repo methods are implemented as
//! `impl HuntService` blocks in `crate::repos`.
//!
//! Every mutation method follows this protocol:
//! 1. Validate the request (no store access)
//! 2. Acquire the write gate
//! 3. Begin transaction
//! 4. Run the SQL steps under `operation_timeout`
//! 5. Commit, or roll back on error or timeout
//!
//! Reads take the same gate (without a transaction). The timeout only fires
//! when a step actually yields; embedded libSQL steps usually complete in a
//! single poll.

use std::path::Path;
use std::time::Duration;

use jobhuntr_config::HuntConfig;
use tokio::sync::{Mutex, MutexGuard};
use tokio::time::error::Elapsed;

use crate::HuntDb;
use crate::error::DatabaseError;

/// Orchestrates lifecycle operations over the three stores.
pub struct HuntService {
    db: HuntDb,
    write_gate: Mutex<()>,
    operation_timeout: Duration,
}

/// Write gate held for the lifetime of one mutation transaction.
pub(crate) type WriteGuard<'a> = MutexGuard<'a, ()>;

impl HuntService {
    /// Create a new service wrapping a local database.
    ///
    /// # Arguments
    ///
    /// * `db_path` - Path to the libSQL database file, or `":memory:"` for tests.
    /// * `operation_timeout` - Upper bound for each multi-step mutation.
    ///
    /// # Errors
    ///
    /// Returns `DatabaseError` if the database cannot be opened.
    pub async fn new_local(
        db_path: &str,
        operation_timeout: Duration,
    ) -> Result<Self, DatabaseError> {
        let db = HuntDb::open_local(db_path).await?;
        Ok(Self::from_db(db, operation_timeout))
    }

    /// Create a service from loaded configuration, creating the database
    /// directory when needed.
    ///
    /// # Errors
    ///
    /// Returns `DatabaseError` if the directory cannot be created or the
    /// database cannot be opened.
    pub async fn from_config(config: &HuntConfig) -> Result<Self, DatabaseError> {
        let timeout = config.service.operation_timeout();
        if config.database.is_in_memory() {
            return Self::new_local(jobhuntr_config::IN_MEMORY, timeout).await;
        }

        let path = config.database.resolved_path();
        if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
            std::fs::create_dir_all(parent)?;
        }
        tracing::debug!(path = %path.display(), "opening database");
        Self::new_local(&path_str(&path)?, timeout).await
    }

    /// Create from an existing `HuntDb` (for testing).
    #[must_use]
    pub fn from_db(db: HuntDb, operation_timeout: Duration) -> Self {
        Self {
            db,
            write_gate: Mutex::new(()),
            operation_timeout,
        }
    }

    /// Access the underlying database handle.
    #[must_use]
    pub const fn db(&self) -> &HuntDb {
        &self.db
    }

    #[must_use]
    pub const fn operation_timeout(&self) -> Duration {
        self.operation_timeout
    }

    /// Acquire the write gate and open a transaction.
    pub(crate) async fn begin(
        &self,
    ) -> Result<(WriteGuard<'_>, libsql::Transaction), DatabaseError> {
        let gate = self.write_gate.lock().await;
        let tx = self.db.conn().transaction().await?;
        Ok((gate, tx))
    }

    /// Wait out any in-flight mutation so reads never observe uncommitted rows.
    pub(crate) async fn read_gate(&self) -> WriteGuard<'_> {
        self.write_gate.lock().await
    }

    /// Commit on success, roll back on failure or timeout.
    ///
    /// `outcome` is the result of running the transaction body under
    /// `tokio::time::timeout(self.operation_timeout(), ..)`.
    pub(crate) async fn settle<T>(
        &self,
        operation: &'static str,
        tx: libsql::Transaction,
        outcome: Result<Result<T, DatabaseError>, Elapsed>,
    ) -> Result<T, DatabaseError> {
        let err = match outcome {
            Ok(Ok(value)) => {
                tx.commit().await?;
                return Ok(value);
            }
            Ok(Err(err)) => err,
            Err(_) => DatabaseError::Timeout {
                operation,
                after: self.operation_timeout,
            },
        };

        tracing::warn!(operation, error = %err, "rolling back");
        if let Err(rollback) = tx.rollback().await {
            tracing::error!(operation, error = %rollback, "rollback failed");
        }
        Err(err)
    }
}

fn path_str(path: &Path) -> Result<String, DatabaseError> {
    path.to_str().map(String::from).ok_or_else(|| {
        DatabaseError::InvalidState(format!(
            "database path is not valid UTF-8: {}",
            path.display()
        ))
    })
}
