//! Health Check Commands
//!
//! Checks that every configured model answers with the configured key.

use crate::models::response::{HealthReport, ModelHealth};
use crate::state::AppContext;

/// Get the health status of every model in the chain
pub async fn check_health(context: &AppContext) -> HealthReport {
    let models = context
        .check_models()
        .await
        .into_iter()
        .map(|(model, result)| ModelHealth {
            model,
            ok: result.is_ok(),
            error: result.err().map(|e| e.to_string()),
        })
        .collect();
    HealthReport::from_models(models)
}

/// Human-readable health report, one line per model.
pub fn render_health(report: &HealthReport) -> String {
    let mut lines = vec![format!(
        "{} {}: {}",
        report.service, report.version, report.status
    )];
    for model in &report.models {
        match &model.error {
            None => lines.push(format!("  ok    {}", model.model)),
            Some(err) => lines.push(format!("  FAIL  {}: {}", model.model, err)),
        }
    }
    lines.join("\n")
}
