//! Prompt templates for the fallback pipeline.

use content_cascade_core::GenerationRequest;

const STRUCTURE: &str = "Structure it with:
- Title
- Meta description
- Introduction
- 4–6 subheadings
- Conclusion
- SEO keywords
";

/// Build the drafting prompt.
///
/// `research` is `None` when research is disabled for the run; the research
/// section is then left out entirely. An empty blob keeps the section.
pub fn draft_prompt(request: &GenerationRequest, research: Option<&str>) -> String {
    let mut prompt = format!(
        "\nWrite a {} on the topic: {}\nTone: {}\nLength: {}\n\n",
        request.content_type, request.topic, request.tone, request.length
    );
    if let Some(research) = research {
        prompt.push_str("Use this research if available:\n\n");
        prompt.push_str(research);
        prompt.push_str("\n\n");
    }
    prompt.push_str(STRUCTURE);
    prompt
}

/// Build the polishing prompt for a draft.
pub fn polish_prompt(draft: &str) -> String {
    format!("Polish and refine this content:\n\n{}", draft)
}
