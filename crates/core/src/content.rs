//! Content Model
//!
//! The request a caller hands to the content pipeline and the ordered,
//! per-stage record the pipeline hands back.

use serde::ser::SerializeMap;
use serde::{Deserialize, Serialize, Serializer};

use crate::error::{CoreError, CoreResult};

const DEFAULT_CONTENT_TYPE: &str = "blog post";
const DEFAULT_LENGTH: &str = "800 words";
const DEFAULT_TONE: &str = "informative";

/// Immutable input to one content-generation run.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GenerationRequest {
    pub topic: String,
    pub content_type: String,
    pub length: String,
    pub tone: String,
}

impl GenerationRequest {
    pub fn new(
        topic: impl Into<String>,
        content_type: impl Into<String>,
        length: impl Into<String>,
        tone: impl Into<String>,
    ) -> Self {
        Self {
            topic: topic.into(),
            content_type: content_type.into(),
            length: length.into(),
            tone: tone.into(),
        }
    }

    /// Check the request and return a copy with blank optional fields defaulted.
    ///
    /// Only the topic is mandatory.
    pub fn validate(&self) -> CoreResult<Self> {
        if self.topic.trim().is_empty() {
            return Err(CoreError::validation("topic must not be empty"));
        }
        Ok(self.with_defaults())
    }

    /// Fill blank fields with defaults without checking the topic.
    pub fn with_defaults(&self) -> Self {
        fn or_default(value: &str, default: &str) -> String {
            let trimmed = value.trim();
            if trimmed.is_empty() {
                default.to_string()
            } else {
                trimmed.to_string()
            }
        }

        Self {
            topic: self.topic.trim().to_string(),
            content_type: or_default(&self.content_type, DEFAULT_CONTENT_TYPE),
            length: or_default(&self.length, DEFAULT_LENGTH),
            tone: or_default(&self.tone, DEFAULT_TONE),
        }
    }
}

/// The four roles of the content pipeline, in execution order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum PipelineStage {
    #[serde(rename = "ResearchAgent")]
    Research,
    #[serde(rename = "WriterAgent")]
    Writer,
    #[serde(rename = "EditorAgent")]
    Editor,
    #[serde(rename = "SEOAgent")]
    Seo,
}

impl PipelineStage {
    /// All stages in execution order.
    pub const ALL: [PipelineStage; 4] = [
        PipelineStage::Research,
        PipelineStage::Writer,
        PipelineStage::Editor,
        PipelineStage::Seo,
    ];

    /// Name used as the key in pipeline output.
    pub fn agent_name(&self) -> &'static str {
        match self {
            PipelineStage::Research => "ResearchAgent",
            PipelineStage::Writer => "WriterAgent",
            PipelineStage::Editor => "EditorAgent",
            PipelineStage::Seo => "SEOAgent",
        }
    }

    /// Look up a stage by its agent name.
    pub fn from_agent_name(name: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|s| s.agent_name() == name)
    }
}

impl std::fmt::Display for PipelineStage {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.agent_name())
    }
}

/// Per-stage outputs of one run, kept in execution order.
///
/// Built once through [`PipelineResultBuilder`]; there is no mutable access
/// afterwards.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PipelineResult {
    stages: Vec<(PipelineStage, String)>,
}

impl PipelineResult {
    pub fn builder() -> PipelineResultBuilder {
        PipelineResultBuilder::default()
    }

    pub fn get(&self, stage: PipelineStage) -> Option<&str> {
        self.stages
            .iter()
            .find(|(s, _)| *s == stage)
            .map(|(_, output)| output.as_str())
    }

    /// Look up a stage output by agent name, e.g. `"EditorAgent"`.
    pub fn get_named(&self, name: &str) -> Option<&str> {
        PipelineStage::from_agent_name(name).and_then(|stage| self.get(stage))
    }

    pub fn iter(&self) -> impl Iterator<Item = (PipelineStage, &str)> {
        self.stages.iter().map(|(s, o)| (*s, o.as_str()))
    }

    pub fn stage_names(&self) -> Vec<&'static str> {
        self.stages.iter().map(|(s, _)| s.agent_name()).collect()
    }

    pub fn len(&self) -> usize {
        self.stages.len()
    }

    pub fn is_empty(&self) -> bool {
        self.stages.is_empty()
    }
}

impl Serialize for PipelineResult {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.stages.len()))?;
        for (stage, output) in &self.stages {
            map.serialize_entry(stage.agent_name(), output)?;
        }
        map.end()
    }
}

/// Accumulates stage outputs in the order they are recorded.
#[derive(Debug, Default)]
pub struct PipelineResultBuilder {
    stages: Vec<(PipelineStage, String)>,
}

impl PipelineResultBuilder {
    /// Record a stage output. Recording a stage twice keeps its original
    /// position and replaces the text.
    pub fn stage(mut self, stage: PipelineStage, output: impl Into<String>) -> Self {
        let output = output.into();
        match self.stages.iter_mut().find(|(s, _)| *s == stage) {
            Some(entry) => entry.1 = output,
            None => self.stages.push((stage, output)),
        }
        self
    }

    pub fn build(self) -> PipelineResult {
        PipelineResult {
            stages: self.stages,
        }
    }
}
