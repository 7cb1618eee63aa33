use gauge_core::entities::Document;
use gauge_store::EntityStore;
use serde::Serialize;

use crate::cli::GlobalFlags;
use crate::cli::root_commands::UserArgs;
use crate::context::AppContext;
use crate::output::output;

#[derive(Debug, Serialize)]
struct DocumentListResponse {
    documents: Vec<Document>,
}

/// Handle `gauge documents`.
pub async fn handle(args: &UserArgs, ctx: &AppContext, flags: &GlobalFlags) -> anyhow::Result<()> {
    let mut documents = ctx.store().get_documents_by_user_id(args.user).await?;
    if let Some(limit) = flags.limit {
        documents.truncate(usize::try_from(limit)?);
    }
    output(&DocumentListResponse { documents }, flags.format)
}
