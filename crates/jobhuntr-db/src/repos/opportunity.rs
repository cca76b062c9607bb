//! Opportunity aggregate: list, create, get, update, and cascading delete.

use chrono::{DateTime, Utc};
use libsql::Connection;

use jobhuntr_core::entities::{DocumentRef, Opportunity, Process};
use jobhuntr_core::errors::CoreError;
use jobhuntr_core::ids::PREFIX_OPPORTUNITY;
use jobhuntr_core::requests::{CreateOpportunity, non_blank, require};
use jobhuntr_core::responses::{OpportunitySummary, ProcessView};

use crate::error::DatabaseError;
use crate::generate_id;
use crate::helpers::{get_opt_string, parse_datetime, parse_enum};
use crate::repos::document::{delete_document, fetch_document};
use crate::service::HuntService;
use crate::updates::opportunity::OpportunityUpdate;

const OPPORTUNITY_COLUMNS: &str =
    "id, applicant, company, position, description, created_at, updated_at";

fn row_to_opportunity(row: &libsql::Row) -> Result<Opportunity, DatabaseError> {
    Ok(Opportunity {
        id: row.get::<String>(0)?,
        applicant: row.get::<String>(1)?,
        company: row.get::<String>(2)?,
        position: row.get::<String>(3)?,
        description: get_opt_string(row, 4)?,
        processes: Vec::new(),
        created_at: parse_datetime(&row.get::<String>(5)?)?,
        updated_at: parse_datetime(&row.get::<String>(6)?)?,
    })
}

/// Load the process list of `opportunity_id` in timeline order.
pub(crate) async fn load_processes(
    conn: &Connection,
    opportunity_id: &str,
) -> Result<Vec<Process>, DatabaseError> {
    let mut rows = conn
        .query(
            "SELECT date, document_type, document_id FROM processes
             WHERE opportunity_id = ?1 ORDER BY seq",
            [opportunity_id],
        )
        .await?;

    let mut processes = Vec::new();
    while let Some(row) = rows.next().await? {
        processes.push(Process {
            parent: opportunity_id.to_string(),
            date: row.get::<String>(0)?,
            document: DocumentRef::new(
                parse_enum(&row.get::<String>(1)?)?,
                row.get::<String>(2)?,
            ),
        });
    }
    Ok(processes)
}

pub(crate) async fn fetch_opportunity(
    conn: &Connection,
    id: &str,
) -> Result<Option<Opportunity>, DatabaseError> {
    let mut rows = conn
        .query(
            &format!("SELECT {OPPORTUNITY_COLUMNS} FROM opportunities WHERE id = ?1"),
            [id],
        )
        .await?;
    let Some(row) = rows.next().await? else {
        return Ok(None);
    };
    let mut opportunity = row_to_opportunity(&row)?;
    opportunity.processes = load_processes(conn, id).await?;
    Ok(Some(opportunity))
}

/// Fetch `id` or fail with `NotFound`.
pub(crate) async fn require_opportunity(
    conn: &Connection,
    id: &str,
) -> Result<Opportunity, DatabaseError> {
    fetch_opportunity(conn, id)
        .await?
        .ok_or_else(|| CoreError::not_found("opportunity", id).into())
}

/// Bump `updated_at` after the process list changed.
pub(crate) async fn touch(
    conn: &Connection,
    id: &str,
    now: DateTime<Utc>,
) -> Result<(), DatabaseError> {
    conn.execute(
        "UPDATE opportunities SET updated_at = ?1 WHERE id = ?2",
        [now.to_rfc3339().as_str(), id],
    )
    .await?;
    Ok(())
}

async fn create_tx(
    conn: &Connection,
    req: &CreateOpportunity,
) -> Result<Opportunity, DatabaseError> {
    let now = Utc::now();
    let id = generate_id(conn, PREFIX_OPPORTUNITY).await?;
    let description = non_blank(req.description.clone());

    conn.execute(
        "INSERT INTO opportunities (id, applicant, company, position, description, created_at, updated_at)
         VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7)",
        libsql::params![
            id.as_str(),
            req.applicant.as_str(),
            req.company.as_str(),
            req.position.as_str(),
            description.as_deref(),
            now.to_rfc3339(),
            now.to_rfc3339()
        ],
    )
    .await?;

    Ok(Opportunity {
        id,
        applicant: req.applicant.clone(),
        company: req.company.clone(),
        position: req.position.clone(),
        description,
        processes: Vec::new(),
        created_at: now,
        updated_at: now,
    })
}

async fn update_tx(
    conn: &Connection,
    id: &str,
    update: &OpportunityUpdate,
) -> Result<Opportunity, DatabaseError> {
    let current = require_opportunity(conn, id).await?;
    let changes = update.changes_from(&current);
    if changes.is_empty() {
        return Ok(current);
    }

    let mut sets = Vec::new();
    let mut params: Vec<libsql::Value> = Vec::new();
    let mut idx = 1;

    if let Some(ref applicant) = changes.applicant {
        sets.push(format!("applicant = ?{idx}"));
        params.push(applicant.as_str().into());
        idx += 1;
    }
    if let Some(ref company) = changes.company {
        sets.push(format!("company = ?{idx}"));
        params.push(company.as_str().into());
        idx += 1;
    }
    if let Some(ref position) = changes.position {
        sets.push(format!("position = ?{idx}"));
        params.push(position.as_str().into());
        idx += 1;
    }
    if let Some(ref description) = changes.description {
        sets.push(format!("description = ?{idx}"));
        params.push(description.as_deref().into());
        idx += 1;
    }

    sets.push(format!("updated_at = ?{idx}"));
    params.push(Utc::now().to_rfc3339().into());
    idx += 1;

    params.push(id.into());
    let sql = format!(
        "UPDATE opportunities SET {} WHERE id = ?{idx}",
        sets.join(", ")
    );
    conn.execute(&sql, libsql::params_from_iter(params)).await?;
    tracing::debug!(opportunity_id = id, fields = sets.len() - 1, "patched opportunity");

    require_opportunity(conn, id).await
}

async fn delete_tx(conn: &Connection, id: &str) -> Result<usize, DatabaseError> {
    let opportunity = require_opportunity(conn, id).await?;

    for process in &opportunity.processes {
        if !delete_document(conn, &process.document).await? {
            tracing::warn!(
                opportunity_id = id,
                document = %process.document,
                "referenced document already missing"
            );
        }
    }

    conn.execute("DELETE FROM processes WHERE opportunity_id = ?1", [id])
        .await?;
    conn.execute("DELETE FROM opportunities WHERE id = ?1", [id])
        .await?;
    Ok(opportunity.processes.len())
}

impl HuntService {
    /// Every opportunity of `applicant`, with processes resolved to their
    /// documents' list representation.
    ///
    /// A process whose document no longer resolves is skipped and logged.
    /// A blank applicant is rejected rather than answered with an empty list,
    /// so a dropped filter never reads as "no opportunities".
    ///
    /// # Errors
    ///
    /// Returns `CoreError::Validation` if `applicant` is blank.
    pub async fn list_opportunities(
        &self,
        applicant: &str,
    ) -> Result<Vec<OpportunitySummary>, DatabaseError> {
        require(applicant, "applicant must be defined")?;
        let _gate = self.read_gate().await;
        let conn = self.db().conn();

        let mut rows = conn
            .query(
                &format!(
                    "SELECT {OPPORTUNITY_COLUMNS} FROM opportunities WHERE applicant = ?1 ORDER BY rowid"
                ),
                [applicant],
            )
            .await?;
        let mut opportunities = Vec::new();
        while let Some(row) = rows.next().await? {
            opportunities.push(row_to_opportunity(&row)?);
        }

        let mut summaries = Vec::with_capacity(opportunities.len());
        for opportunity in opportunities {
            let mut views = Vec::new();
            for process in load_processes(conn, &opportunity.id).await? {
                match fetch_document(conn, &process.document).await? {
                    Some(doc) => views.push(ProcessView {
                        date: process.date,
                        document: (&doc).into(),
                        document_type: process.document.document_type(),
                    }),
                    None => tracing::warn!(
                        opportunity_id = %opportunity.id,
                        document = %process.document,
                        "skipping process with dangling document"
                    ),
                }
            }
            summaries.push(OpportunitySummary::new(&opportunity, views));
        }
        Ok(summaries)
    }

    /// Create an opportunity with an empty process list.
    ///
    /// # Errors
    ///
    /// Returns `CoreError::Validation` before any write if a required field
    /// is blank.
    pub async fn create_opportunity(
        &self,
        req: &CreateOpportunity,
    ) -> Result<Opportunity, DatabaseError> {
        req.validate()?;

        let (_gate, tx) = self.begin().await?;
        let outcome = tokio::time::timeout(self.operation_timeout(), create_tx(&tx, req)).await;
        let opportunity = self.settle("create opportunity", tx, outcome).await?;

        tracing::info!(opportunity_id = %opportunity.id, applicant = %opportunity.applicant, "created opportunity");
        Ok(opportunity)
    }

    /// # Errors
    ///
    /// Returns `CoreError::NotFound` if no opportunity has this id.
    pub async fn get_opportunity(&self, id: &str) -> Result<Opportunity, DatabaseError> {
        let _gate = self.read_gate().await;
        require_opportunity(self.db().conn(), id).await
    }

    /// Apply the fields of `update` that differ from the stored values.
    ///
    /// A patch equal to the current state performs no write.
    ///
    /// # Errors
    ///
    /// Returns `CoreError::Validation` for a blank id or a blanked required
    /// field, `CoreError::NotFound` if the opportunity does not exist.
    pub async fn update_opportunity(
        &self,
        id: &str,
        update: OpportunityUpdate,
    ) -> Result<Opportunity, DatabaseError> {
        require(id, "opportunity id must be defined")?;
        update.validate()?;

        let (_gate, tx) = self.begin().await?;
        let outcome =
            tokio::time::timeout(self.operation_timeout(), update_tx(&tx, id, &update)).await;
        let opportunity = self.settle("update opportunity", tx, outcome).await?;

        tracing::info!(opportunity_id = id, "updated opportunity");
        Ok(opportunity)
    }

    /// Delete an opportunity together with every document its processes
    /// reference.
    ///
    /// # Errors
    ///
    /// Returns `CoreError::Validation` for a blank id, `CoreError::NotFound`
    /// if the opportunity does not exist.
    pub async fn delete_opportunity(&self, id: &str) -> Result<(), DatabaseError> {
        require(id, "opportunity id must be defined")?;

        let (_gate, tx) = self.begin().await?;
        let outcome = tokio::time::timeout(self.operation_timeout(), delete_tx(&tx, id)).await;
        let removed = self.settle("delete opportunity", tx, outcome).await?;

        tracing::info!(opportunity_id = id, documents = removed, "deleted opportunity");
        Ok(())
    }
}
