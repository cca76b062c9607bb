use crate::cli::GlobalFlags;
use crate::cli::root_commands::Commands;
use crate::commands;
use crate::context::AppContext;

/// Dispatch a parsed command to the corresponding handler module.
pub async fn dispatch(command: Commands, ctx: &AppContext, flags: &GlobalFlags) -> anyhow::Result<()> {
    match command {
        Commands::Opportunity { action } => commands::opportunity::handle(&action, ctx, flags).await,
        Commands::Application { action } => commands::application::handle(&action, ctx, flags).await,
        Commands::Interview { action } => commands::interview::handle(&action, ctx, flags).await,
        Commands::Reconcile { dry_run } => commands::reconcile::handle(dry_run, ctx, flags).await,
    }
}
