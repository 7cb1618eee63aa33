use clap::Subcommand;

/// User account commands.
#[derive(Clone, Debug, Subcommand)]
pub enum UserCommands {
    /// Register a user.
    Create {
        #[arg(long)]
        username: String,
        /// Read from GAUGE_PASSWORD when omitted
        #[arg(long)]
        password: Option<String>,
        #[arg(long, default_value = "founder")]
        user_type: String,
    },
    /// Check a username/password pair.
    Login {
        #[arg(long)]
        username: String,
        /// Read from GAUGE_PASSWORD when omitted
        #[arg(long)]
        password: Option<String>,
    },
}
