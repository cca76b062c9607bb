//! Link and unlink steps shared by the application and interview lifecycles.
//!
//! Both run inside the caller's transaction. Attach order is: document
//! inserted (by the caller) → process appended → parent set. Detach order is:
//! process removed → document deleted.

use chrono::Utc;
use libsql::Connection;

use jobhuntr_core::entities::{Document, DocumentRef};
use jobhuntr_core::errors::CoreError;

use crate::error::DatabaseError;
use crate::repos::document::{delete_document, fetch_document, set_parent};
use crate::repos::opportunity::{fetch_opportunity, require_opportunity, touch};

/// Append a process for `document` to the end of the opportunity's list.
pub(crate) async fn append_process(
    conn: &Connection,
    opportunity_id: &str,
    date: &str,
    document: &DocumentRef,
) -> Result<i64, DatabaseError> {
    let mut rows = conn
        .query(
            "SELECT COALESCE(MAX(seq), 0) + 1 FROM processes WHERE opportunity_id = ?1",
            [opportunity_id],
        )
        .await?;
    let seq = rows
        .next()
        .await?
        .ok_or(DatabaseError::NoResult)?
        .get::<i64>(0)?;

    conn.execute(
        "INSERT INTO processes (opportunity_id, seq, date, document_type, document_id)
         VALUES (?1, ?2, ?3, ?4, ?5)",
        libsql::params![
            opportunity_id,
            seq,
            date,
            document.document_type().as_str(),
            document.id()
        ],
    )
    .await?;
    tracing::debug!(opportunity_id, seq, %document, "appended process");
    Ok(seq)
}

/// Remove the process that points at `document` from `opportunity_id`'s list.
pub(crate) async fn remove_process(
    conn: &Connection,
    opportunity_id: &str,
    document: &DocumentRef,
) -> Result<bool, DatabaseError> {
    let removed = conn
        .execute(
            "DELETE FROM processes
             WHERE opportunity_id = ?1 AND document_type = ?2 AND document_id = ?3",
            [
                opportunity_id,
                document.document_type().as_str(),
                document.id(),
            ],
        )
        .await?;
    tracing::debug!(opportunity_id, %document, removed, "removed process");
    Ok(removed > 0)
}

/// Reference a freshly inserted document from `opportunity_id` and point it back.
///
/// Fails with `NotFound` if the opportunity does not exist; the caller's
/// transaction then discards the inserted document.
pub(crate) async fn link(
    conn: &Connection,
    opportunity_id: &str,
    date: &str,
    document: &DocumentRef,
) -> Result<(), DatabaseError> {
    require_opportunity(conn, opportunity_id).await?;
    append_process(conn, opportunity_id, date, document).await?;
    touch(conn, opportunity_id, Utc::now()).await?;
    set_parent(conn, document, opportunity_id).await
}

/// Remove `document` and its process entry.
///
/// Returns the id of the opportunity the document was detached from.
pub(crate) async fn unlink(
    conn: &Connection,
    document: &DocumentRef,
) -> Result<String, DatabaseError> {
    let resolved = fetch_document(conn, document)
        .await?
        .ok_or_else(|| CoreError::not_found(document.document_type().as_str(), document.id()))?;

    let parent = parent_of(&resolved)?;
    let opportunity = fetch_opportunity(conn, &parent).await?.ok_or_else(|| {
        CoreError::consistency(format!(
            "{document} refers to missing opportunity {parent}"
        ))
    })?;

    if opportunity.process_for(document).is_none()
        || !remove_process(conn, &opportunity.id, document).await?
    {
        return Err(CoreError::consistency("Unable to find associated process").into());
    }

    delete_document(conn, document).await?;
    touch(conn, &opportunity.id, Utc::now()).await?;
    Ok(opportunity.id)
}

fn parent_of(document: &Document) -> Result<String, CoreError> {
    document.parent().map(String::from).ok_or_else(|| {
        CoreError::consistency(format!("{} has no parent opportunity", document.reference()))
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::repos::document::insert_application;
    use crate::test_support::helpers::{count_rows, create_test_opportunity, test_service};
    use jobhuntr_core::enums::DocumentType;

    #[tokio::test]
    async fn append_process_assigns_increasing_seq() {
        let svc = test_service().await;
        let opp = create_test_opportunity(&svc).await;
        let conn = svc.db().conn();

        let first = DocumentRef::new(DocumentType::Application, "app-00000001");
        let second = DocumentRef::new(DocumentType::Interview, "int-00000002");
        assert_eq!(append_process(conn, &opp.id, "d1", &first).await.unwrap(), 1);
        assert_eq!(append_process(conn, &opp.id, "d2", &second).await.unwrap(), 2);

        assert!(remove_process(conn, &opp.id, &first).await.unwrap());
        let third = DocumentRef::new(DocumentType::Interview, "int-00000003");
        assert_eq!(append_process(conn, &opp.id, "d3", &third).await.unwrap(), 3);
    }

    #[tokio::test]
    async fn remove_process_scoped_to_opportunity() {
        let svc = test_service().await;
        let opp = create_test_opportunity(&svc).await;
        let conn = svc.db().conn();
        let doc = DocumentRef::new(DocumentType::Application, "app-00000001");
        append_process(conn, &opp.id, "d1", &doc).await.unwrap();

        assert!(!remove_process(conn, "opp-deadbeef", &doc).await.unwrap());
        assert_eq!(count_rows(&svc, "processes").await, 1);
    }

    #[tokio::test]
    async fn unlink_without_parent_is_consistency_error() {
        let svc = test_service().await;
        let conn = svc.db().conn();
        let app = insert_application(conn, "applied", Utc::now()).await.unwrap();

        let err = unlink(conn, &DocumentRef::Application(app.id))
            .await
            .unwrap_err();
        assert!(err.is_consistency());
    }

    #[tokio::test]
    async fn unlink_with_missing_parent_is_consistency_error() {
        let svc = test_service().await;
        let conn = svc.db().conn();
        let app = insert_application(conn, "applied", Utc::now()).await.unwrap();
        let reference = DocumentRef::Application(app.id);
        set_parent(conn, &reference, "opp-deadbeef").await.unwrap();

        let err = unlink(conn, &reference).await.unwrap_err();
        assert!(err.is_consistency());
        assert_eq!(count_rows(&svc, "applications").await, 1);
    }
}
