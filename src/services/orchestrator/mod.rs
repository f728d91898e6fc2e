//! Orchestration Layer
//!
//! The multi-agent path of content generation. `ContentOrchestrator` is the
//! seam the content service calls; `AgentCrew` is the shipped implementation.

mod crew;
mod roles;

use async_trait::async_trait;

use content_cascade_core::{GenerationRequest, PipelineResult};

use crate::utils::error::AppResult;

pub use crew::AgentCrew;
pub use roles::{crew_tasks, CrewTask, RoleAgent, CREW};

/// What a successful orchestration run produced
#[derive(Debug, Clone)]
pub struct OrchestrationOutput {
    /// The final artifact
    pub final_output: String,
    /// Per-task outputs
    pub pipeline: PipelineResult,
}

/// A multi-agent backend that can turn a request into content.
#[async_trait]
pub trait ContentOrchestrator: Send + Sync {
    /// Name for logs
    fn name(&self) -> &str;

    /// Run the whole workflow. Any error sends the caller to the fallback
    /// pipeline.
    async fn run(&self, request: &GenerationRequest, use_research: bool) -> AppResult<OrchestrationOutput>;
}
