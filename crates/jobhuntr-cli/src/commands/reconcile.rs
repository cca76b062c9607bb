use crate::cli::GlobalFlags;
use crate::context::AppContext;
use crate::output::output;

/// Handle `jobhuntr reconcile`.
pub async fn handle(dry_run: bool, ctx: &AppContext, flags: &GlobalFlags) -> anyhow::Result<()> {
    let report = ctx.service.reconcile(dry_run).await?;
    if !report.is_clean() && dry_run {
        tracing::warn!("reference drift found; rerun without --dry-run to repair");
    }
    output(&report, flags.format)
}
