//! Sequential fallback pipeline: research, draft, polish, keywords.

use std::sync::Arc;
use std::time::Instant;

use tracing::{debug, info};

use content_cascade_core::{GenerationRequest, PipelineResult, PipelineStage};
use content_cascade_llm::TextGenerator;

use super::keywords::{extract_keywords, KeywordStrategy};
use super::prompts::{draft_prompt, polish_prompt};
use crate::services::search::{research_blob, ResearchClient};

/// Research stage output when the search returned nothing.
pub const NO_RESEARCH: &str = "No research available";
/// Research stage output when research was switched off for the run.
pub const RESEARCH_DISABLED: &str = "Research disabled for this run";

/// Runs the four content stages directly against the model chain.
///
/// Every stage always produces text: search failures become an empty blob
/// and the generator never fails, so `run` cannot error.
#[derive(Clone)]
pub struct FallbackPipeline {
    generator: Arc<dyn TextGenerator>,
    research: ResearchClient,
    keyword_strategy: KeywordStrategy,
    keyword_limit: usize,
}

impl FallbackPipeline {
    pub fn new(generator: Arc<dyn TextGenerator>, research: ResearchClient) -> Self {
        Self {
            generator,
            research,
            keyword_strategy: KeywordStrategy::default(),
            keyword_limit: 10,
        }
    }

    /// Set how keywords are selected and how many are kept.
    pub fn with_keywords(mut self, strategy: KeywordStrategy, limit: usize) -> Self {
        self.keyword_strategy = strategy;
        self.keyword_limit = limit.max(1);
        self
    }

    /// Run all stages for `request`.
    ///
    /// Returns the polished text and the per-stage outputs; the polished
    /// text is always the Editor stage output.
    pub async fn run(&self, request: &GenerationRequest, use_research: bool) -> (String, PipelineResult) {
        let start = Instant::now();
        info!("Fallback pipeline started for '{}'", request.topic);

        let (research_stage, research_section) = if use_research {
            let records = self.research.search(&request.topic).await;
            let blob = research_blob(&records);
            debug!("Research blob: {} records, {} bytes", records.len(), blob.len());
            let stage = if blob.is_empty() {
                NO_RESEARCH.to_string()
            } else {
                blob.clone()
            };
            (stage, Some(blob))
        } else {
            debug!("Research skipped for '{}'", request.topic);
            (RESEARCH_DISABLED.to_string(), None)
        };

        let draft = self
            .generator
            .generate(&draft_prompt(request, research_section.as_deref()))
            .await;
        debug!("Draft ready ({} chars)", draft.chars().count());

        let polished = self.generator.generate(&polish_prompt(&draft)).await;
        debug!("Polish ready ({} chars)", polished.chars().count());

        let keywords = extract_keywords(&polished, self.keyword_strategy, self.keyword_limit);

        let pipeline = PipelineResult::builder()
            .stage(PipelineStage::Research, research_stage)
            .stage(PipelineStage::Writer, draft)
            .stage(PipelineStage::Editor, polished.clone())
            .stage(PipelineStage::Seo, keywords)
            .build();

        info!(
            "Fallback pipeline finished in {}ms",
            start.elapsed().as_millis()
        );
        (polished, pipeline)
    }
}
