use clap::Subcommand;

/// Interview commands.
#[derive(Clone, Debug, Subcommand)]
pub enum InterviewCommands {
    /// Attach a new interview to an opportunity.
    Attach {
        #[arg(long = "opportunity", default_value = "")]
        opportunity_id: String,
        #[arg(long, default_value = "")]
        date: String,
        #[arg(long)]
        interviewer: Option<String>,
        #[arg(long)]
        location: Option<String>,
        #[arg(long)]
        notes: Option<String>,
        #[arg(long)]
        url: Option<String>,
    },
    /// Detach and delete an interview.
    Detach { id: String },
    /// Get an interview by ID.
    Get { id: String },
}
