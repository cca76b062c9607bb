use clap::Subcommand;

use crate::cli::subcommands::{ApplicationCommands, InterviewCommands, OpportunityCommands};

/// Top-level command tree.
#[derive(Clone, Debug, Subcommand)]
pub enum Commands {
    /// Opportunities and their timelines.
    Opportunity {
        #[command(subcommand)]
        action: OpportunityCommands,
    },
    /// Applications attached to an opportunity.
    Application {
        #[command(subcommand)]
        action: ApplicationCommands,
    },
    /// Interviews attached to an opportunity.
    Interview {
        #[command(subcommand)]
        action: InterviewCommands,
    },
    /// Detect and repair drift between processes and documents.
    Reconcile {
        /// Report only; change nothing.
        #[arg(long)]
        dry_run: bool,
    },
}
