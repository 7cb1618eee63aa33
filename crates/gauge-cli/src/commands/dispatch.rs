use crate::cli::GlobalFlags;
use crate::cli::root_commands::Commands;
use crate::commands;
use crate::context::AppContext;

/// Dispatch a parsed command to the corresponding handler module.
pub async fn dispatch(command: Commands, ctx: &AppContext, flags: &GlobalFlags) -> anyhow::Result<()> {
    match command {
        Commands::Analyze(args) => commands::analyze::handle(&args, ctx, flags).await,
        Commands::Stats(args) => commands::stats::handle(&args, ctx, flags).await,
        Commands::Documents(args) => commands::documents::handle(&args, ctx, flags).await,
        Commands::Activities(args) => commands::activities::handle(&args, ctx, flags).await,
        Commands::User { action } => commands::user::handle(&action, ctx, flags).await,
        Commands::Contact { action } => commands::contact::handle(&action, ctx, flags).await,
        Commands::Health => unreachable!("health is pre-dispatched in main"),
    }
}
