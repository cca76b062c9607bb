use jobhuntr_core::errors::CoreError;
use jobhuntr_core::requests::CreateOpportunity;
use jobhuntr_core::responses::Confirmation;
use jobhuntr_db::updates::opportunity::{OpportunityUpdate, OpportunityUpdateBuilder};

use crate::cli::GlobalFlags;
use crate::cli::subcommands::OpportunityCommands;
use crate::context::AppContext;
use crate::output::output;

/// Handle `jobhuntr opportunity`.
pub async fn handle(
    action: &OpportunityCommands,
    ctx: &AppContext,
    flags: &GlobalFlags,
) -> anyhow::Result<()> {
    match action {
        OpportunityCommands::List { applicant } => {
            let summaries = ctx.service.list_opportunities(applicant).await?;
            output(&summaries, flags.format)
        }
        OpportunityCommands::Create {
            applicant,
            company,
            position,
            description,
        } => {
            let req = CreateOpportunity {
                applicant: applicant.clone(),
                company: company.clone(),
                position: position.clone(),
                description: description.clone(),
            };
            let opportunity = ctx.service.create_opportunity(&req).await?;
            output(&Confirmation::opportunity_created(&opportunity.id), flags.format)
        }
        OpportunityCommands::Get { id } => {
            let opportunity = ctx.service.get_opportunity(id).await?;
            output(&opportunity, flags.format)
        }
        OpportunityCommands::Update {
            id,
            applicant,
            company,
            position,
            description,
            clear_description,
            patch,
        } => {
            let update = match patch {
                Some(raw) => parse_patch(raw)?,
                None => build_update(
                    applicant.as_deref(),
                    company.as_deref(),
                    position.as_deref(),
                    description.as_deref(),
                    *clear_description,
                ),
            };
            let opportunity = ctx.service.update_opportunity(id, update).await?;
            output(&Confirmation::opportunity_updated(&opportunity.id), flags.format)
        }
        OpportunityCommands::Delete { id } => {
            ctx.service.delete_opportunity(id).await?;
            output(&Confirmation::opportunity_deleted(id), flags.format)
        }
    }
}

/// Malformed JSON is a validation failure, like an unknown key.
fn parse_patch(raw: &str) -> Result<OpportunityUpdate, CoreError> {
    let value: serde_json::Value = serde_json::from_str(raw)
        .map_err(|e| CoreError::validation(format!("--patch is not valid JSON: {e}")))?;
    OpportunityUpdate::from_json(value)
}

fn build_update(
    applicant: Option<&str>,
    company: Option<&str>,
    position: Option<&str>,
    description: Option<&str>,
    clear_description: bool,
) -> OpportunityUpdate {
    let mut builder = OpportunityUpdateBuilder::new();
    if let Some(applicant) = applicant {
        builder = builder.applicant(applicant);
    }
    if let Some(company) = company {
        builder = builder.company(company);
    }
    if let Some(position) = position {
        builder = builder.position(position);
    }
    if clear_description {
        builder = builder.description(None);
    } else if let Some(description) = description {
        builder = builder.description(Some(description.to_string()));
    }
    builder.build()
}
