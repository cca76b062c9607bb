//! Reconciliation of forward process entries and document back-references.
//!
//! Three drift classes are detected per document kind:
//! - orphaned documents: no process refers to them (deleted on repair)
//! - dangling processes: the document is gone (process removed on repair)
//! - parent mismatches: `parent_id` differs from the owning opportunity
//!   (`parent_id` rewritten on repair)

use libsql::Connection;

use jobhuntr_core::entities::DocumentRef;
use jobhuntr_core::enums::DocumentType;
use jobhuntr_core::responses::{DanglingProcess, ParentMismatch, ReconcileReport};

use crate::error::DatabaseError;
use crate::helpers::{document_table, get_opt_string};
use crate::repos::document::{delete_document, set_parent};
use crate::repos::lifecycle::remove_process;
use crate::service::HuntService;

async fn orphaned(conn: &Connection, kind: DocumentType) -> Result<Vec<DocumentRef>, DatabaseError> {
    let table = document_table(kind);
    let mut rows = conn
        .query(
            &format!(
                "SELECT id FROM {table}
                 WHERE id NOT IN (SELECT document_id FROM processes WHERE document_type = ?1)
                 ORDER BY rowid"
            ),
            [kind.as_str()],
        )
        .await?;

    let mut found = Vec::new();
    while let Some(row) = rows.next().await? {
        found.push(DocumentRef::new(kind, row.get::<String>(0)?));
    }
    Ok(found)
}

async fn dangling(
    conn: &Connection,
    kind: DocumentType,
) -> Result<Vec<DanglingProcess>, DatabaseError> {
    let table = document_table(kind);
    let mut rows = conn
        .query(
            &format!(
                "SELECT p.opportunity_id, p.document_id FROM processes p
                 WHERE p.document_type = ?1
                   AND p.document_id NOT IN (SELECT id FROM {table})
                 ORDER BY p.opportunity_id, p.seq"
            ),
            [kind.as_str()],
        )
        .await?;

    let mut found = Vec::new();
    while let Some(row) = rows.next().await? {
        found.push(DanglingProcess {
            opportunity_id: row.get::<String>(0)?,
            document: DocumentRef::new(kind, row.get::<String>(1)?),
        });
    }
    Ok(found)
}

async fn mismatched(
    conn: &Connection,
    kind: DocumentType,
) -> Result<Vec<ParentMismatch>, DatabaseError> {
    let table = document_table(kind);
    let mut rows = conn
        .query(
            &format!(
                "SELECT d.id, d.parent_id, p.opportunity_id FROM {table} d
                 JOIN processes p ON p.document_type = ?1 AND p.document_id = d.id
                 WHERE d.parent_id IS NULL OR d.parent_id != p.opportunity_id
                 ORDER BY d.rowid"
            ),
            [kind.as_str()],
        )
        .await?;

    let mut found = Vec::new();
    while let Some(row) = rows.next().await? {
        found.push(ParentMismatch {
            document: DocumentRef::new(kind, row.get::<String>(0)?),
            recorded_parent: get_opt_string(&row, 1)?,
            owning_opportunity: row.get::<String>(2)?,
        });
    }
    Ok(found)
}

async fn reconcile_tx(conn: &Connection, dry_run: bool) -> Result<ReconcileReport, DatabaseError> {
    let mut report = ReconcileReport {
        dry_run,
        ..ReconcileReport::default()
    };
    for kind in DocumentType::ALL {
        report.orphaned_documents.extend(orphaned(conn, kind).await?);
        report.dangling_processes.extend(dangling(conn, kind).await?);
        report.parent_mismatches.extend(mismatched(conn, kind).await?);
    }
    if dry_run {
        return Ok(report);
    }

    for document in &report.orphaned_documents {
        tracing::warn!(%document, "deleting orphaned document");
        delete_document(conn, document).await?;
    }
    for process in &report.dangling_processes {
        tracing::warn!(
            opportunity_id = %process.opportunity_id,
            document = %process.document,
            "removing dangling process"
        );
        remove_process(conn, &process.opportunity_id, &process.document).await?;
    }
    for mismatch in &report.parent_mismatches {
        tracing::warn!(
            document = %mismatch.document,
            recorded = mismatch.recorded_parent.as_deref().unwrap_or("<none>"),
            owner = %mismatch.owning_opportunity,
            "repairing parent reference"
        );
        set_parent(conn, &mismatch.document, &mismatch.owning_opportunity).await?;
    }
    Ok(report)
}

impl HuntService {
    /// Detect reference drift and, unless `dry_run`, repair it.
    ///
    /// # Errors
    ///
    /// Returns `DatabaseError` if a query fails; repairs are rolled back as a
    /// unit.
    pub async fn reconcile(&self, dry_run: bool) -> Result<ReconcileReport, DatabaseError> {
        let (_gate, tx) = self.begin().await?;
        let outcome = tokio::time::timeout(self.operation_timeout(), reconcile_tx(&tx, dry_run)).await;
        let report = self.settle("reconcile", tx, outcome).await?;

        tracing::info!(
            dry_run,
            orphaned = report.orphaned_documents.len(),
            dangling = report.dangling_processes.len(),
            mismatched = report.parent_mismatches.len(),
            "reconciled references"
        );
        Ok(report)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::helpers::{count_rows, create_test_opportunity, test_service};
    use chrono::Utc;
    use jobhuntr_core::requests::{AttachApplication, AttachInterview};
    use pretty_assertions::assert_eq;

    #[tokio::test]
    async fn clean_store_reports_nothing() {
        let svc = test_service().await;
        let opp = create_test_opportunity(&svc).await;
        svc.attach_interview(&AttachInterview::new(&opp.id, "2024-01-10"))
            .await
            .unwrap();

        let report = svc.reconcile(false).await.unwrap();
        assert!(report.is_clean());
        assert!(!report.dry_run);
    }

    #[tokio::test]
    async fn dry_run_reports_without_repairing() {
        let svc = test_service().await;
        crate::repos::document::insert_application(svc.db().conn(), "applied", Utc::now())
            .await
            .unwrap();

        let report = svc.reconcile(true).await.unwrap();
        assert_eq!(report.orphaned_documents.len(), 1);
        assert_eq!(count_rows(&svc, "applications").await, 1);
    }

    #[tokio::test]
    async fn repairs_all_drift_classes() {
        let svc = test_service().await;
        let conn = svc.db().conn();
        let opp = create_test_opportunity(&svc).await;

        let orphan = crate::repos::document::insert_application(conn, "applied", Utc::now())
            .await
            .unwrap();
        let gone = svc
            .attach_interview(&AttachInterview::new(&opp.id, "2024-01-10"))
            .await
            .unwrap();
        conn.execute("DELETE FROM interviews WHERE id = ?1", [gone.id.as_str()])
            .await
            .unwrap();
        let stray = svc
            .attach_application(&AttachApplication::new(&opp.id, "2024-01-11", "applied"))
            .await
            .unwrap();
        conn.execute(
            "UPDATE applications SET parent_id = NULL WHERE id = ?1",
            [stray.id.as_str()],
        )
        .await
        .unwrap();

        let report = svc.reconcile(false).await.unwrap();
        assert_eq!(
            report.orphaned_documents,
            vec![DocumentRef::Application(orphan.id.clone())]
        );
        assert_eq!(
            report.dangling_processes,
            vec![DanglingProcess {
                opportunity_id: opp.id.clone(),
                document: DocumentRef::Interview(gone.id),
            }]
        );
        assert_eq!(
            report.parent_mismatches,
            vec![ParentMismatch {
                document: DocumentRef::Application(stray.id.clone()),
                recorded_parent: None,
                owning_opportunity: opp.id.clone(),
            }]
        );

        assert!(svc.get_application(&orphan.id).await.unwrap_err().is_not_found());
        let repaired = svc.get_application(&stray.id).await.unwrap();
        assert_eq!(repaired.parent.as_deref(), Some(opp.id.as_str()));
        assert_eq!(svc.get_opportunity(&opp.id).await.unwrap().processes.len(), 1);

        assert!(svc.reconcile(true).await.unwrap().is_clean());
    }
}
