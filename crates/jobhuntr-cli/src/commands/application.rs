use jobhuntr_core::entities::DocumentRef;
use jobhuntr_core::requests::AttachApplication;
use jobhuntr_core::responses::Confirmation;

use crate::cli::GlobalFlags;
use crate::cli::subcommands::ApplicationCommands;
use crate::context::AppContext;
use crate::output::output;

/// Handle `jobhuntr application`.
pub async fn handle(
    action: &ApplicationCommands,
    ctx: &AppContext,
    flags: &GlobalFlags,
) -> anyhow::Result<()> {
    match action {
        ApplicationCommands::Attach {
            opportunity_id,
            date,
            status,
        } => {
            let req = AttachApplication::new(opportunity_id, date, status);
            let application = ctx.service.attach_application(&req).await?;
            let reference = DocumentRef::Application(application.id);
            output(&Confirmation::document_attached(&reference), flags.format)
        }
        ApplicationCommands::Detach { id } => {
            ctx.service.detach_application(id).await?;
            let reference = DocumentRef::Application(id.clone());
            output(&Confirmation::document_detached(&reference), flags.format)
        }
        ApplicationCommands::Get { id } => {
            let application = ctx.service.get_application(id).await?;
            output(&application, flags.format)
        }
    }
}
