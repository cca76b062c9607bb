use jobhuntr_core::entities::DocumentRef;
use jobhuntr_core::requests::AttachInterview;
use jobhuntr_core::responses::Confirmation;

use crate::cli::GlobalFlags;
use crate::cli::subcommands::InterviewCommands;
use crate::context::AppContext;
use crate::output::output;

/// Handle `jobhuntr interview`.
pub async fn handle(
    action: &InterviewCommands,
    ctx: &AppContext,
    flags: &GlobalFlags,
) -> anyhow::Result<()> {
    match action {
        InterviewCommands::Attach {
            opportunity_id,
            date,
            interviewer,
            location,
            notes,
            url,
        } => {
            let req = AttachInterview {
                opportunity_id: opportunity_id.clone(),
                date: date.clone(),
                interviewer: interviewer.clone(),
                location: location.clone(),
                notes: notes.clone(),
                url: url.clone(),
            };
            let interview = ctx.service.attach_interview(&req).await?;
            let reference = DocumentRef::Interview(interview.id);
            output(&Confirmation::document_attached(&reference), flags.format)
        }
        InterviewCommands::Detach { id } => {
            ctx.service.detach_interview(id).await?;
            let reference = DocumentRef::Interview(id.clone());
            output(&Confirmation::document_detached(&reference), flags.format)
        }
        InterviewCommands::Get { id } => {
            let interview = ctx.service.get_interview(id).await?;
            output(&interview, flags.format)
        }
    }
}
