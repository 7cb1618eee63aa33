use std::io::Read;
use std::path::Path;

use anyhow::Context;
use gauge_analysis::Attempt;
use gauge_core::entities::Document;
use gauge_core::enums::ProviderKind;
use gauge_core::scorecard::Scorecard;
use serde::Serialize;

use crate::cli::GlobalFlags;
use crate::cli::root_commands::AnalyzeArgs;
use crate::context::AppContext;
use crate::output::output;

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct AnalyzeResponse {
    scorecard: Scorecard,
    provider: ProviderKind,
    attempts: Vec<Attempt>,
    document: Option<Document>,
}

/// Handle `gauge analyze`.
pub async fn handle(args: &AnalyzeArgs, ctx: &AppContext, flags: &GlobalFlags) -> anyhow::Result<()> {
    let content = read_content(&args.file)?;

    let analyzed = ctx
        .service
        .analyze_document_detailed(&args.title, &content, &args.document_type, args.user)
        .await;

    if analyzed.document.is_none() {
        tracing::warn!("scorecard produced but not stored");
    }

    output(
        &AnalyzeResponse {
            scorecard: analyzed.outcome.scorecard,
            provider: analyzed.outcome.provider,
            attempts: analyzed.outcome.attempts,
            document: analyzed.document,
        },
        flags.format,
    )
}

fn read_content(path: &Path) -> anyhow::Result<String> {
    if path.as_os_str() == "-" {
        let mut content = String::new();
        std::io::stdin()
            .read_to_string(&mut content)
            .context("failed to read document from stdin")?;
        return Ok(content);
    }
    std::fs::read_to_string(path).with_context(|| format!("failed to read {}", path.display()))
}

#[cfg(test)]
mod tests {
    use super::read_content;

    #[test]
    fn reads_document_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("plan.md");
        std::fs::write(&path, "We sell shovels.").unwrap();
        assert_eq!(read_content(&path).unwrap(), "We sell shovels.");
    }

    #[test]
    fn missing_file_names_the_path() {
        let err = read_content(std::path::Path::new("/nonexistent/plan.md")).unwrap_err();
        assert!(err.to_string().contains("/nonexistent/plan.md"));
    }
}
