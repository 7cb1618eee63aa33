use clap::Subcommand;

/// Contact form commands.
#[derive(Clone, Debug, Subcommand)]
pub enum ContactCommands {
    /// Record a submission.
    Submit {
        #[arg(long)]
        name: String,
        #[arg(long)]
        email: String,
        #[arg(long)]
        company: Option<String>,
        #[arg(long)]
        message: String,
        /// Extra form fields as a JSON object
        #[arg(long)]
        extra: Option<String>,
    },
    /// List submissions, newest first.
    List,
}
