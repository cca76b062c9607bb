//! Interview lifecycle. Mirrors the application lifecycle with optional fields.

use chrono::Utc;
use libsql::Connection;

use jobhuntr_core::entities::{DocumentRef, Interview};
use jobhuntr_core::requests::{AttachInterview, require};

use crate::error::DatabaseError;
use crate::repos::document::insert_interview;
use crate::repos::lifecycle::{link, unlink};
use crate::service::HuntService;

async fn attach_tx(conn: &Connection, req: &AttachInterview) -> Result<Interview, DatabaseError> {
    let mut interview = insert_interview(conn, req, Utc::now()).await?;
    let reference = DocumentRef::Interview(interview.id.clone());
    link(conn, &req.opportunity_id, &req.date, &reference).await?;
    interview.parent = Some(req.opportunity_id.clone());
    Ok(interview)
}

impl HuntService {
    /// Create an interview and append it to the opportunity's timeline.
    ///
    /// # Errors
    ///
    /// Returns `CoreError::Validation` for a blank opportunity id or date,
    /// `CoreError::NotFound` if the opportunity does not exist.
    pub async fn attach_interview(&self, req: &AttachInterview) -> Result<Interview, DatabaseError> {
        req.validate()?;

        let (_gate, tx) = self.begin().await?;
        let outcome = tokio::time::timeout(self.operation_timeout(), attach_tx(&tx, req)).await;
        let interview = self.settle("attach interview", tx, outcome).await?;

        tracing::info!(
            interview_id = %interview.id,
            opportunity_id = %req.opportunity_id,
            "attached interview"
        );
        Ok(interview)
    }

    /// Delete an interview and its process entry.
    ///
    /// # Errors
    ///
    /// Returns `CoreError::Validation` for a blank id, `CoreError::NotFound`
    /// if the interview does not exist, `CoreError::Consistency` if its
    /// parent no longer lists it.
    pub async fn detach_interview(&self, id: &str) -> Result<(), DatabaseError> {
        require(id, "interview id is required")?;
        let reference = DocumentRef::Interview(id.to_string());

        let (_gate, tx) = self.begin().await?;
        let outcome = tokio::time::timeout(self.operation_timeout(), unlink(&tx, &reference)).await;
        let opportunity_id = self.settle("detach interview", tx, outcome).await?;

        tracing::info!(interview_id = id, %opportunity_id, "detached interview");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::helpers::{count_rows, create_test_opportunity, test_service};
    use jobhuntr_core::enums::DocumentType;
    use jobhuntr_core::requests::AttachApplication;

    #[tokio::test]
    async fn attach_with_only_required_fields() {
        let svc = test_service().await;
        let opp = create_test_opportunity(&svc).await;

        let interview = svc
            .attach_interview(&AttachInterview::new(&opp.id, "2024-01-10"))
            .await
            .unwrap();
        assert!(interview.interviewer.is_none());
        assert_eq!(interview.parent.as_deref(), Some(opp.id.as_str()));

        let fetched = svc.get_interview(&interview.id).await.unwrap();
        assert_eq!(fetched, interview);
    }

    #[tokio::test]
    async fn processes_keep_insertion_order() {
        let svc = test_service().await;
        let opp = create_test_opportunity(&svc).await;
        svc.attach_application(&AttachApplication::new(&opp.id, "2024-01-05", "applied"))
            .await
            .unwrap();
        svc.attach_interview(&AttachInterview::new(&opp.id, "2024-01-01").interviewer("Bob"))
            .await
            .unwrap();

        let opp = svc.get_opportunity(&opp.id).await.unwrap();
        let kinds: Vec<DocumentType> = opp.processes.iter().map(|p| p.document_type()).collect();
        assert_eq!(kinds, vec![DocumentType::Application, DocumentType::Interview]);
    }

    #[tokio::test]
    async fn attach_missing_opportunity_id_reported_first() {
        let svc = test_service().await;
        let err = svc
            .attach_interview(&AttachInterview::new("", ""))
            .await
            .unwrap_err();
        assert_eq!(err.to_string(), "opportunity id is required");
    }

    #[tokio::test]
    async fn attach_to_missing_opportunity_rolls_back() {
        let svc = test_service().await;
        let err = svc
            .attach_interview(&AttachInterview::new("opp-deadbeef", "2024-01-10"))
            .await
            .unwrap_err();
        assert!(err.is_not_found());
        assert_eq!(count_rows(&svc, "interviews").await, 0);
    }

    #[tokio::test]
    async fn detach_removes_interview_and_process() {
        let svc = test_service().await;
        let opp = create_test_opportunity(&svc).await;
        let interview = svc
            .attach_interview(&AttachInterview::new(&opp.id, "2024-01-10"))
            .await
            .unwrap();

        svc.detach_interview(&interview.id).await.unwrap();

        assert!(svc.get_opportunity(&opp.id).await.unwrap().processes.is_empty());
        assert_eq!(count_rows(&svc, "interviews").await, 0);
        let err = svc.detach_interview(&interview.id).await.unwrap_err();
        assert!(err.is_not_found());
    }

    #[tokio::test]
    async fn detach_blank_id() {
        let svc = test_service().await;
        let err = svc.detach_interview(" ").await.unwrap_err();
        assert_eq!(err.to_string(), "interview id is required");
    }
}
