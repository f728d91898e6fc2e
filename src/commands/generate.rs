//! Generate Command
//!
//! Runs one content request and formats the outcome for the terminal.

use crate::cli::GenerateArgs;
use crate::models::outcome::RunOutcome;
use crate::services::content::describe_pipeline;
use crate::state::AppContext;
use crate::utils::error::AppResult;

/// Run the request described by `args`. Never fails.
pub async fn generate(context: &AppContext, args: &GenerateArgs) -> RunOutcome {
    context
        .content()
        .create_content(
            &args.topic,
            &args.content_type,
            &args.length,
            &args.tone,
            !args.no_research,
        )
        .await
}

/// Text printed to stdout for an outcome.
pub fn render_outcome(outcome: &RunOutcome, json: bool, show_pipeline: bool) -> AppResult<String> {
    if json {
        return Ok(serde_json::to_string_pretty(outcome)?);
    }
    if show_pipeline && !outcome.pipeline.is_empty() {
        return Ok(format!(
            "{}\n\n{}",
            outcome.final_output.trim_end(),
            describe_pipeline(&outcome.pipeline)
        ));
    }
    Ok(outcome.final_output.clone())
}

/// Warning printed to stderr when the fallback pipeline produced the outcome.
pub fn fallback_warning(outcome: &RunOutcome) -> Option<String> {
    outcome.used_fallback().then(|| {
        format!(
            "warning: agent crew failed, content came from the fallback pipeline ({})",
            outcome.error.as_deref().unwrap_or("unknown error")
        )
    })
}
