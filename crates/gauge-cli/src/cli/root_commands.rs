use std::path::PathBuf;

use clap::{Args, Subcommand};

use crate::cli::subcommands::{ContactCommands, UserCommands};

/// Top-level command tree.
#[derive(Clone, Debug, Subcommand)]
pub enum Commands {
    /// Analyze a document and store its scorecard.
    Analyze(AnalyzeArgs),
    /// Probe every external dependency.
    Health,
    /// Document count and average score for a user.
    Stats(UserArgs),
    /// A user's documents, newest first.
    Documents(UserArgs),
    /// A user's recent activity.
    Activities(ActivitiesArgs),
    /// User accounts.
    User {
        #[command(subcommand)]
        action: UserCommands,
    },
    /// Contact form submissions.
    Contact {
        #[command(subcommand)]
        action: ContactCommands,
    },
}

#[derive(Clone, Debug, Args)]
pub struct AnalyzeArgs {
    /// Text file to analyze (`-` reads stdin)
    pub file: PathBuf,
    #[arg(long)]
    pub title: String,
    /// business_plan, pitch_deck, financial_statement, market_analysis or other
    #[arg(long = "type", default_value = "other")]
    pub document_type: String,
    #[arg(long)]
    pub user: i64,
}

#[derive(Clone, Debug, Args)]
pub struct UserArgs {
    #[arg(long)]
    pub user: i64,
}

#[derive(Clone, Debug, Args)]
pub struct ActivitiesArgs {
    #[arg(long)]
    pub user: i64,
    #[arg(long)]
    pub limit: Option<u32>,
}
