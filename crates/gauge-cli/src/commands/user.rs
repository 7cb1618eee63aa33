use anyhow::bail;
use gauge_core::entities::NewUser;
use gauge_store::EntityStore;
use serde_json::json;

use crate::cli::GlobalFlags;
use crate::cli::subcommands::UserCommands;
use crate::commands::shared::password::resolve_password;
use crate::context::AppContext;
use crate::output::output;

/// Handle `gauge user`.
pub async fn handle(
    action: &UserCommands,
    ctx: &AppContext,
    flags: &GlobalFlags,
) -> anyhow::Result<()> {
    match action {
        UserCommands::Create {
            username,
            password,
            user_type,
        } => {
            let password = resolve_password(password.as_deref())?;
            let user = ctx
                .store()
                .create_user(NewUser {
                    username: username.clone(),
                    password,
                    user_type: user_type.clone(),
                })
                .await?;
            output(&json!({ "user": user }), flags.format)
        }
        UserCommands::Login { username, password } => {
            let password = resolve_password(password.as_deref())?;
            let Some(user) = ctx.store().authenticate(username, &password).await? else {
                bail!("invalid username or password");
            };
            output(
                &json!({ "authenticated": true, "user": user }),
                flags.format,
            )
        }
    }
}
