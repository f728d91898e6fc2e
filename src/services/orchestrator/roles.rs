//! Crew personas and task table.

use content_cascade_core::{GenerationRequest, PipelineStage};

/// A crew member persona
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RoleAgent {
    pub stage: PipelineStage,
    pub name: &'static str,
    pub role: &'static str,
    pub goal: &'static str,
    pub backstory: &'static str,
}

impl RoleAgent {
    /// System instruction sent with every call this agent makes.
    pub fn system_prompt(&self) -> String {
        format!(
            "You are {}, a {}.\n{}\n\nYour goal: {}",
            self.name, self.role, self.backstory, self.goal
        )
    }
}

/// The four crew members, in execution order.
pub const CREW: [RoleAgent; 4] = [
    RoleAgent {
        stage: PipelineStage::Research,
        name: "Research Agent",
        role: "Research Specialist",
        goal: "Collect verified information using Tavily search.",
        backstory: "A professional researcher who extracts the most relevant details.",
    },
    RoleAgent {
        stage: PipelineStage::Writer,
        name: "Writer Agent",
        role: "Content Writer",
        goal: "Write high-quality structured content.",
        backstory: "A professional writer with strong SEO knowledge.",
    },
    RoleAgent {
        stage: PipelineStage::Editor,
        name: "Editor Agent",
        role: "Editor",
        goal: "Refine, improve clarity, and polish writing.",
        backstory: "A grammar-driven expert editor.",
    },
    RoleAgent {
        stage: PipelineStage::Seo,
        name: "SEO Agent",
        role: "SEO Specialist",
        goal: "Generate SEO-friendly keywords, tags, and metadata.",
        backstory: "Expert in making content rank on search engines.",
    },
];

/// One unit of crew work
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CrewTask {
    pub agent: RoleAgent,
    pub description: String,
    pub expected_output: &'static str,
}

impl CrewTask {
    /// User prompt for this task, given earlier task outputs and any
    /// research material gathered for it.
    pub fn prompt(&self, context: &[(PipelineStage, String)], research: Option<&str>) -> String {
        let mut prompt = format!(
            "Task: {}\nExpected output: {}\n",
            self.description, self.expected_output
        );
        if let Some(research) = research {
            prompt.push_str("\nSearch results:\n");
            prompt.push_str(research);
            prompt.push('\n');
        }
        for (stage, output) in context {
            prompt.push_str(&format!("\nOutput of {}:\n{}\n", stage.agent_name(), output));
        }
        prompt
    }
}

/// Build the task list for a request, one task per crew member.
pub fn crew_tasks(request: &GenerationRequest) -> Vec<CrewTask> {
    CREW.iter()
        .map(|agent| {
            let (description, expected_output) = match agent.stage {
                PipelineStage::Research => (
                    format!("Research the topic '{}'.", request.topic),
                    "Detailed research summary.",
                ),
                PipelineStage::Writer => (
                    format!(
                        "Write a {} about '{}', length {}, tone {}.",
                        request.content_type, request.topic, request.length, request.tone
                    ),
                    "Structured content draft.",
                ),
                PipelineStage::Editor => (
                    "Polish and edit the draft.".to_string(),
                    "Refined content.",
                ),
                PipelineStage::Seo => (
                    "Generate SEO keywords and metadata.".to_string(),
                    "SEO suggestions.",
                ),
            };
            CrewTask {
                agent: *agent,
                description,
                expected_output,
            }
        })
        .collect()
}
