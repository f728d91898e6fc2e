//! Fallback Content Pipeline
//!
//! Produces content without the agent crew when orchestration fails.

mod keywords;
mod pipeline;
mod prompts;

pub use keywords::{extract_keywords, KeywordStrategy, DEFAULT_KEYWORDS};
pub use pipeline::{FallbackPipeline, NO_RESEARCH, RESEARCH_DISABLED};
pub use prompts::{draft_prompt, polish_prompt};
