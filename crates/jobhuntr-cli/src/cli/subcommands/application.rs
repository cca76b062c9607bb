use clap::Subcommand;

/// Application commands.
#[derive(Clone, Debug, Subcommand)]
pub enum ApplicationCommands {
    /// Attach a new application to an opportunity.
    Attach {
        #[arg(long = "opportunity", default_value = "")]
        opportunity_id: String,
        #[arg(long, default_value = "")]
        date: String,
        #[arg(long, default_value = "")]
        status: String,
    },
    /// Detach and delete an application.
    Detach { id: String },
    /// Get an application by ID.
    Get { id: String },
}
