use clap::Subcommand;

/// Opportunity commands.
#[derive(Clone, Debug, Subcommand)]
pub enum OpportunityCommands {
    /// List an applicant's opportunities with resolved processes.
    List {
        #[arg(long, default_value = "")]
        applicant: String,
    },
    /// Create an opportunity.
    Create {
        #[arg(long, default_value = "")]
        applicant: String,
        #[arg(long, default_value = "")]
        company: String,
        #[arg(long, default_value = "")]
        position: String,
        #[arg(long)]
        description: Option<String>,
    },
    /// Get an opportunity by ID.
    Get { id: String },
    /// Update fields of an opportunity.
    Update {
        id: String,
        #[arg(long)]
        applicant: Option<String>,
        #[arg(long)]
        company: Option<String>,
        #[arg(long)]
        position: Option<String>,
        #[arg(long, conflicts_with = "clear_description")]
        description: Option<String>,
        #[arg(long)]
        clear_description: bool,
        /// JSON object of fields to change.
        #[arg(
            long,
            conflicts_with_all = ["applicant", "company", "position", "description", "clear_description"]
        )]
        patch: Option<String>,
    },
    /// Delete an opportunity and every attached document.
    Delete { id: String },
}
