//! Application lifecycle: attach to and detach from an opportunity.

use chrono::Utc;
use libsql::Connection;

use jobhuntr_core::entities::{Application, DocumentRef};
use jobhuntr_core::requests::{AttachApplication, require};

use crate::error::DatabaseError;
use crate::repos::document::insert_application;
use crate::repos::lifecycle::{link, unlink};
use crate::service::HuntService;

async fn attach_tx(
    conn: &Connection,
    req: &AttachApplication,
) -> Result<Application, DatabaseError> {
    let mut application = insert_application(conn, &req.status, Utc::now()).await?;
    let reference = DocumentRef::Application(application.id.clone());
    link(conn, &req.opportunity_id, &req.date, &reference).await?;
    application.parent = Some(req.opportunity_id.clone());
    Ok(application)
}

impl HuntService {
    /// Create an application and append it to the opportunity's timeline.
    ///
    /// # Errors
    ///
    /// Returns `CoreError::Validation` for a blank date, opportunity id or
    /// status, `CoreError::NotFound` if the opportunity does not exist. No
    /// application is left behind on failure.
    pub async fn attach_application(
        &self,
        req: &AttachApplication,
    ) -> Result<Application, DatabaseError> {
        req.validate()?;

        let (_gate, tx) = self.begin().await?;
        let outcome = tokio::time::timeout(self.operation_timeout(), attach_tx(&tx, req)).await;
        let application = self.settle("attach application", tx, outcome).await?;

        tracing::info!(
            application_id = %application.id,
            opportunity_id = %req.opportunity_id,
            "attached application"
        );
        Ok(application)
    }

    /// Delete an application and its process entry.
    ///
    /// # Errors
    ///
    /// Returns `CoreError::Validation` for a blank id, `CoreError::NotFound`
    /// if the application does not exist, `CoreError::Consistency` if its
    /// parent no longer lists it.
    pub async fn detach_application(&self, id: &str) -> Result<(), DatabaseError> {
        require(id, "application id is required")?;
        let reference = DocumentRef::Application(id.to_string());

        let (_gate, tx) = self.begin().await?;
        let outcome = tokio::time::timeout(self.operation_timeout(), unlink(&tx, &reference)).await;
        let opportunity_id = self.settle("detach application", tx, outcome).await?;

        tracing::info!(application_id = id, %opportunity_id, "detached application");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::helpers::{count_rows, create_test_opportunity, test_service};
    use jobhuntr_core::entities::Document;
    use pretty_assertions::assert_eq;

    #[tokio::test]
    async fn attach_links_both_directions() {
        let svc = test_service().await;
        let opp = create_test_opportunity(&svc).await;

        let app = svc
            .attach_application(&AttachApplication::new(&opp.id, "2024-01-05", "applied"))
            .await
            .unwrap();
        assert_eq!(app.parent.as_deref(), Some(opp.id.as_str()));

        let opp = svc.get_opportunity(&opp.id).await.unwrap();
        assert_eq!(opp.processes.len(), 1);
        let process = &opp.processes[0];
        assert_eq!(process.date, "2024-01-05");
        assert_eq!(process.document, DocumentRef::Application(app.id.clone()));

        let resolved = svc.resolve(&process.document).await.unwrap();
        assert_eq!(resolved, Document::Application(app));
    }

    #[tokio::test]
    async fn attach_to_missing_opportunity_leaves_nothing() {
        let svc = test_service().await;
        let err = svc
            .attach_application(&AttachApplication::new("opp-deadbeef", "2024-01-05", "applied"))
            .await
            .unwrap_err();

        assert!(err.is_not_found());
        assert_eq!(count_rows(&svc, "applications").await, 0);
        assert_eq!(count_rows(&svc, "processes").await, 0);
    }

    #[tokio::test]
    async fn attach_validates_before_writing() {
        let svc = test_service().await;
        let err = svc
            .attach_application(&AttachApplication::new("", "", "applied"))
            .await
            .unwrap_err();
        assert_eq!(err.to_string(), "date is required");
        assert_eq!(count_rows(&svc, "applications").await, 0);
    }

    #[tokio::test]
    async fn detach_restores_process_list() {
        let svc = test_service().await;
        let opp = create_test_opportunity(&svc).await;
        svc.attach_application(&AttachApplication::new(&opp.id, "2024-01-01", "applied"))
            .await
            .unwrap();
        let before = svc.get_opportunity(&opp.id).await.unwrap().processes;

        let app = svc
            .attach_application(&AttachApplication::new(&opp.id, "2024-01-05", "screening"))
            .await
            .unwrap();
        svc.detach_application(&app.id).await.unwrap();

        let after = svc.get_opportunity(&opp.id).await.unwrap().processes;
        assert_eq!(after, before);
        assert!(svc.get_application(&app.id).await.unwrap_err().is_not_found());
    }

    #[tokio::test]
    async fn detach_errors() {
        let svc = test_service().await;
        let err = svc.detach_application("").await.unwrap_err();
        assert_eq!(err.to_string(), "application id is required");

        let err = svc.detach_application("app-deadbeef").await.unwrap_err();
        assert!(err.is_not_found());
        assert_eq!(err.to_string(), "application not found: app-deadbeef");
    }

    #[tokio::test]
    async fn detach_with_drifted_list_is_consistency_error() {
        let svc = test_service().await;
        let opp = create_test_opportunity(&svc).await;
        let app = svc
            .attach_application(&AttachApplication::new(&opp.id, "2024-01-05", "applied"))
            .await
            .unwrap();
        svc.db()
            .conn()
            .execute("DELETE FROM processes WHERE document_id = ?1", [app.id.as_str()])
            .await
            .unwrap();

        let err = svc.detach_application(&app.id).await.unwrap_err();
        assert!(err.is_consistency());
        assert_eq!(err.to_string(), "Unable to find associated process");
        assert_eq!(count_rows(&svc, "applications").await, 1);
    }
}
