//! Content Service
//!
//! The entry point for content generation. Tries the orchestration layer
//! first and falls back to the direct pipeline on any failure, so callers
//! always get content back.

use std::sync::Arc;
use std::time::Instant;

use tracing::{info, warn};

use content_cascade_core::{GenerationRequest, PipelineResult};

use crate::models::outcome::{RunOutcome, RunPath};
use crate::services::fallback::FallbackPipeline;
use crate::services::orchestrator::{ContentOrchestrator, OrchestrationOutput};
use crate::utils::error::{AppError, AppResult};

/// Content generation entry point
#[derive(Clone)]
pub struct ContentService {
    orchestrator: Arc<dyn ContentOrchestrator>,
    fallback: FallbackPipeline,
}

impl ContentService {
    pub fn new(orchestrator: Arc<dyn ContentOrchestrator>, fallback: FallbackPipeline) -> Self {
        Self {
            orchestrator,
            fallback,
        }
    }

    /// Generate content for the given parameters. Never fails.
    pub async fn create_content(
        &self,
        topic: &str,
        content_type: &str,
        length: &str,
        tone: &str,
        use_research: bool,
    ) -> RunOutcome {
        let request = GenerationRequest::new(topic, content_type, length, tone);
        self.create(&request, use_research).await
    }

    /// Generate content for `request`. Never fails.
    pub async fn create(&self, request: &GenerationRequest, use_research: bool) -> RunOutcome {
        let started_at = chrono::Utc::now().to_rfc3339();
        let start = Instant::now();

        let (request, result) = match request.validate() {
            Ok(valid) => {
                let result = self.orchestrate(&valid, use_research).await;
                (valid, result)
            }
            Err(e) => (request.with_defaults(), Err(AppError::from(e))),
        };

        let (success, final_output, pipeline, error, path) = match result {
            Ok(output) => {
                info!(
                    "{} completed '{}'",
                    self.orchestrator.name(),
                    request.topic
                );
                (true, output.final_output, output.pipeline, None, RunPath::Orchestrated)
            }
            Err(e) => {
                let error = e.to_string();
                warn!("Orchestration failed, running fallback pipeline: {}", error);
                let (final_output, pipeline) = self.fallback.run(&request, use_research).await;
                (false, final_output, pipeline, Some(error), RunPath::Fallback)
            }
        };

        RunOutcome {
            success,
            final_output,
            pipeline,
            error,
            path,
            started_at,
            duration_ms: start.elapsed().as_millis() as u64,
        }
    }

    async fn orchestrate(
        &self,
        request: &GenerationRequest,
        use_research: bool,
    ) -> AppResult<OrchestrationOutput> {
        let output = self.orchestrator.run(request, use_research).await?;
        if output.final_output.trim().is_empty() {
            return Err(AppError::orchestration(format!(
                "{} returned an empty final output",
                self.orchestrator.name()
            )));
        }
        Ok(output)
    }
}

/// Per-stage outputs of a run, for display.
pub fn describe_pipeline(pipeline: &PipelineResult) -> String {
    pipeline
        .iter()
        .map(|(stage, output)| format!("== {} ==\n{}", stage.agent_name(), output.trim_end()))
        .collect::<Vec<_>>()
        .join("\n\n")
}
