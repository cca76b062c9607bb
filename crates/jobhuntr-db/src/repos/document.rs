//! Referenced document store: applications and interviews keyed by id.
//!
//! A `DocumentRef` is resolved only on request; the store supports create,
//! fetch, delete, and rewriting the `parent` back-reference.

use chrono::{DateTime, Utc};
use libsql::Connection;

use jobhuntr_core::entities::{Application, Document, DocumentRef, Interview};
use jobhuntr_core::enums::DocumentType;
use jobhuntr_core::errors::CoreError;
use jobhuntr_core::requests::{AttachInterview, non_blank};

use crate::error::DatabaseError;
use crate::generate_id;
use crate::helpers::{document_table, get_opt_string, parse_datetime};
use crate::service::HuntService;

fn row_to_application(row: &libsql::Row) -> Result<Application, DatabaseError> {
    Ok(Application {
        id: row.get::<String>(0)?,
        status: row.get::<String>(1)?,
        parent: get_opt_string(row, 2)?,
        created_at: parse_datetime(&row.get::<String>(3)?)?,
    })
}

fn row_to_interview(row: &libsql::Row) -> Result<Interview, DatabaseError> {
    Ok(Interview {
        id: row.get::<String>(0)?,
        interviewer: get_opt_string(row, 1)?,
        location: get_opt_string(row, 2)?,
        notes: get_opt_string(row, 3)?,
        url: get_opt_string(row, 4)?,
        parent: get_opt_string(row, 5)?,
        created_at: parse_datetime(&row.get::<String>(6)?)?,
    })
}

/// Insert an application with no parent yet.
pub(crate) async fn insert_application(
    conn: &Connection,
    status: &str,
    now: DateTime<Utc>,
) -> Result<Application, DatabaseError> {
    let id = generate_id(conn, DocumentType::Application.id_prefix()).await?;
    conn.execute(
        "INSERT INTO applications (id, status, parent_id, created_at) VALUES (?1, ?2, NULL, ?3)",
        libsql::params![id.as_str(), status, now.to_rfc3339()],
    )
    .await?;
    tracing::debug!(application_id = %id, "inserted application");

    Ok(Application {
        id,
        status: status.to_string(),
        parent: None,
        created_at: now,
    })
}

/// Insert an interview with no parent yet. Blank optional fields are stored as NULL.
pub(crate) async fn insert_interview(
    conn: &Connection,
    req: &AttachInterview,
    now: DateTime<Utc>,
) -> Result<Interview, DatabaseError> {
    let id = generate_id(conn, DocumentType::Interview.id_prefix()).await?;
    let interviewer = non_blank(req.interviewer.clone());
    let location = non_blank(req.location.clone());
    let notes = non_blank(req.notes.clone());
    let url = non_blank(req.url.clone());

    conn.execute(
        "INSERT INTO interviews (id, interviewer, location, notes, url, parent_id, created_at)
         VALUES (?1, ?2, ?3, ?4, ?5, NULL, ?6)",
        libsql::params![
            id.as_str(),
            interviewer.as_deref(),
            location.as_deref(),
            notes.as_deref(),
            url.as_deref(),
            now.to_rfc3339()
        ],
    )
    .await?;
    tracing::debug!(interview_id = %id, "inserted interview");

    Ok(Interview {
        id,
        interviewer,
        location,
        notes,
        url,
        parent: None,
        created_at: now,
    })
}

pub(crate) async fn fetch_application(
    conn: &Connection,
    id: &str,
) -> Result<Option<Application>, DatabaseError> {
    let mut rows = conn
        .query(
            "SELECT id, status, parent_id, created_at FROM applications WHERE id = ?1",
            [id],
        )
        .await?;
    match rows.next().await? {
        Some(row) => Ok(Some(row_to_application(&row)?)),
        None => Ok(None),
    }
}

pub(crate) async fn fetch_interview(
    conn: &Connection,
    id: &str,
) -> Result<Option<Interview>, DatabaseError> {
    let mut rows = conn
        .query(
            "SELECT id, interviewer, location, notes, url, parent_id, created_at
             FROM interviews WHERE id = ?1",
            [id],
        )
        .await?;
    match rows.next().await? {
        Some(row) => Ok(Some(row_to_interview(&row)?)),
        None => Ok(None),
    }
}

/// Dereference `document`. `None` if it no longer exists.
pub(crate) async fn fetch_document(
    conn: &Connection,
    document: &DocumentRef,
) -> Result<Option<Document>, DatabaseError> {
    Ok(match document {
        DocumentRef::Application(id) => fetch_application(conn, id)
            .await?
            .map(Document::Application),
        DocumentRef::Interview(id) => fetch_interview(conn, id).await?.map(Document::Interview),
    })
}

/// Delete `document`. Returns whether a row was removed.
pub(crate) async fn delete_document(
    conn: &Connection,
    document: &DocumentRef,
) -> Result<bool, DatabaseError> {
    let table = document_table(document.document_type());
    let removed = conn
        .execute(&format!("DELETE FROM {table} WHERE id = ?1"), [document.id()])
        .await?;
    tracing::debug!(%document, removed, "deleted document");
    Ok(removed > 0)
}

/// Point `document` back at `parent`.
pub(crate) async fn set_parent(
    conn: &Connection,
    document: &DocumentRef,
    parent: &str,
) -> Result<(), DatabaseError> {
    let table = document_table(document.document_type());
    let updated = conn
        .execute(
            &format!("UPDATE {table} SET parent_id = ?1 WHERE id = ?2"),
            [parent, document.id()],
        )
        .await?;
    if updated == 0 {
        return Err(DatabaseError::InvalidState(format!(
            "cannot set parent: {document} does not exist"
        )));
    }
    tracing::debug!(%document, parent, "set document parent");
    Ok(())
}

impl HuntService {
    /// Resolve a process's document reference.
    ///
    /// # Errors
    ///
    /// Returns `CoreError::NotFound` if the document does not exist.
    pub async fn resolve(&self, document: &DocumentRef) -> Result<Document, DatabaseError> {
        let _gate = self.read_gate().await;
        fetch_document(self.db().conn(), document)
            .await?
            .ok_or_else(|| {
                CoreError::not_found(document.document_type().as_str(), document.id()).into()
            })
    }

    /// # Errors
    ///
    /// Returns `CoreError::NotFound` if no application has this id.
    pub async fn get_application(&self, id: &str) -> Result<Application, DatabaseError> {
        let _gate = self.read_gate().await;
        fetch_application(self.db().conn(), id)
            .await?
            .ok_or_else(|| CoreError::not_found("application", id).into())
    }

    /// # Errors
    ///
    /// Returns `CoreError::NotFound` if no interview has this id.
    pub async fn get_interview(&self, id: &str) -> Result<Interview, DatabaseError> {
        let _gate = self.read_gate().await;
        fetch_interview(self.db().conn(), id)
            .await?
            .ok_or_else(|| CoreError::not_found("interview", id).into())
    }
}
