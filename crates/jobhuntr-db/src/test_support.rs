//! Shared test utilities for jobhuntr-db unit tests.

pub(crate) mod helpers {
    use std::time::Duration;

    use jobhuntr_core::entities::Opportunity;
    use jobhuntr_core::requests::CreateOpportunity;

    use crate::HuntDb;
    use crate::service::HuntService;

    /// Create an in-memory HuntService with a generous timeout.
    pub async fn test_service() -> HuntService {
        let db = HuntDb::open_local(":memory:").await.unwrap();
        HuntService::from_db(db, Duration::from_secs(5))
    }

    /// Create alice's Acme opportunity (convenience for tests that need a parent).
    pub async fn create_test_opportunity(svc: &HuntService) -> Opportunity {
        svc.create_opportunity(&CreateOpportunity::new("alice", "Acme", "Engineer"))
            .await
            .unwrap()
    }

    /// Count rows in `table`.
    pub async fn count_rows(svc: &HuntService, table: &str) -> i64 {
        let mut rows = svc
            .db()
            .conn()
            .query(&format!("SELECT COUNT(*) FROM {table}"), ())
            .await
            .unwrap();
        rows.next().await.unwrap().unwrap().get::<i64>(0).unwrap()
    }
}
