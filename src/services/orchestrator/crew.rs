//! Agent crew: four role agents run in sequence on the primary model.

use std::sync::Arc;
use std::time::Instant;

use async_trait::async_trait;
use tracing::{debug, info};

use content_cascade_core::{GenerationRequest, PipelineResult, PipelineStage};
use content_cascade_llm::{LlmProvider, LlmRequestOptions, Message};

use super::roles::{crew_tasks, CrewTask};
use super::{ContentOrchestrator, OrchestrationOutput};
use crate::services::fallback::RESEARCH_DISABLED;
use crate::services::search::{research_blob, ResearchClient};
use crate::utils::error::{AppError, AppResult};

/// Sequential crew of research, writer, editor and SEO agents.
///
/// Calls go to a single provider with no model substitution, and search
/// errors are not swallowed; any failure aborts the run.
pub struct AgentCrew {
    provider: Arc<dyn LlmProvider>,
    research: ResearchClient,
}

impl AgentCrew {
    pub fn new(provider: Arc<dyn LlmProvider>, research: ResearchClient) -> Self {
        Self { provider, research }
    }

    async fn run_task(
        &self,
        task: &CrewTask,
        context: &[(PipelineStage, String)],
        research: Option<&str>,
    ) -> AppResult<String> {
        let start = Instant::now();
        let response = self
            .provider
            .send_message(
                vec![Message::user(task.prompt(context, research))],
                Some(task.agent.system_prompt()),
                LlmRequestOptions::default(),
            )
            .await
            .map_err(|e| {
                AppError::orchestration(format!("{} failed: {}", task.agent.stage.agent_name(), e))
            })?;

        let text = response.text().map(str::to_string).ok_or_else(|| {
            AppError::orchestration(format!(
                "{} returned no content",
                task.agent.stage.agent_name()
            ))
        })?;

        debug!(
            "{} finished in {}ms ({} chars)",
            task.agent.name,
            start.elapsed().as_millis(),
            text.chars().count()
        );
        Ok(text)
    }
}

#[async_trait]
impl ContentOrchestrator for AgentCrew {
    fn name(&self) -> &str {
        "agent-crew"
    }

    async fn run(&self, request: &GenerationRequest, use_research: bool) -> AppResult<OrchestrationOutput> {
        info!(
            "Crew started for '{}' on model {}",
            request.topic,
            self.provider.model()
        );

        // agent outputs passed on as context; the disabled research stage is not one
        let mut outputs: Vec<(PipelineStage, String)> = Vec::with_capacity(4);
        let mut pipeline = PipelineResult::builder();
        for task in crew_tasks(request) {
            let research = if task.agent.stage == PipelineStage::Research {
                if !use_research {
                    debug!("Research disabled, skipping {}", task.agent.name);
                    pipeline = pipeline.stage(PipelineStage::Research, RESEARCH_DISABLED);
                    continue;
                }
                let records = self.research.try_search(&request.topic).await.map_err(|e| {
                    AppError::orchestration(format!("ResearchAgent search failed: {}", e))
                })?;
                Some(research_blob(&records))
            } else {
                None
            };

            let text = self.run_task(&task, &outputs, research.as_deref()).await?;
            pipeline = pipeline.stage(task.agent.stage, text.clone());
            outputs.push((task.agent.stage, text));
        }

        let final_output = outputs
            .iter()
            .find(|(stage, _)| *stage == PipelineStage::Editor)
            .map(|(_, text)| text.clone())
            .unwrap_or_default();
        let pipeline = pipeline.build();

        info!("Crew finished for '{}'", request.topic);
        Ok(OrchestrationOutput {
            final_output,
            pipeline,
        })
    }
}
