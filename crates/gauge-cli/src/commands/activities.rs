use gauge_core::entities::Activity;
use gauge_store::EntityStore;
use serde::Serialize;

use crate::cli::GlobalFlags;
use crate::cli::root_commands::ActivitiesArgs;
use crate::context::AppContext;
use crate::output::output;

#[derive(Debug, Serialize)]
struct ActivityListResponse {
    activities: Vec<Activity>,
}

/// Handle `gauge activities`.
pub async fn handle(
    args: &ActivitiesArgs,
    ctx: &AppContext,
    flags: &GlobalFlags,
) -> anyhow::Result<()> {
    let limit = args
        .limit
        .or(flags.limit)
        .unwrap_or(ctx.config.general.default_limit);
    let activities = ctx.store().get_activities(args.user, limit).await?;
    output(&ActivityListResponse { activities }, flags.format)
}
