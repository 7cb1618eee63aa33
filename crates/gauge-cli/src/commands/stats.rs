use gauge_store::compute_stats;

use crate::cli::GlobalFlags;
use crate::cli::root_commands::UserArgs;
use crate::context::AppContext;
use crate::output::output;

/// Handle `gauge stats`.
pub async fn handle(args: &UserArgs, ctx: &AppContext, flags: &GlobalFlags) -> anyhow::Result<()> {
    let stats = compute_stats(ctx.store(), args.user).await?;
    output(&stats, flags.format)
}
