use anyhow::Context;
use gauge_core::entities::NewContactSubmission;
use gauge_store::EntityStore;
use serde_json::{Value, json};

use crate::cli::GlobalFlags;
use crate::cli::subcommands::ContactCommands;
use crate::context::AppContext;
use crate::output::output;

/// Handle `gauge contact`.
pub async fn handle(
    action: &ContactCommands,
    ctx: &AppContext,
    flags: &GlobalFlags,
) -> anyhow::Result<()> {
    match action {
        ContactCommands::Submit {
            name,
            email,
            company,
            message,
            extra,
        } => {
            let submission = ctx
                .store()
                .create_contact_submission(NewContactSubmission {
                    name: name.clone(),
                    email: email.clone(),
                    company: company.clone(),
                    message: message.clone(),
                    extra: parse_extra(extra.as_deref())?,
                })
                .await?;
            output(&json!({ "submission": submission }), flags.format)
        }
        ContactCommands::List => {
            let submissions = ctx.store().get_contact_submissions().await?;
            output(&json!({ "submissions": submissions }), flags.format)
        }
    }
}

fn parse_extra(raw: Option<&str>) -> anyhow::Result<Value> {
    let Some(raw) = raw else {
        return Ok(json!({}));
    };
    let value: Value = serde_json::from_str(raw).context("--extra must be valid JSON")?;
    if !value.is_object() {
        anyhow::bail!("--extra must be a JSON object");
    }
    Ok(value)
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::parse_extra;

    #[test]
    fn missing_extra_is_empty_object() {
        assert_eq!(parse_extra(None).unwrap(), json!({}));
    }

    #[test]
    fn extra_must_be_an_object() {
        assert_eq!(
            parse_extra(Some(r#"{"source":"landing"}"#)).unwrap(),
            json!({"source": "landing"})
        );
        assert!(parse_extra(Some("[1,2]")).is_err());
        assert!(parse_extra(Some("not json")).is_err());
    }
}
