//! Services
//!
//! Business logic: search, the agent crew, the fallback pipeline and the
//! content entry point that ties them together.

pub mod content;
pub mod fallback;
pub mod orchestrator;
pub mod search;

pub use content::{describe_pipeline, ContentService};
pub use fallback::{FallbackPipeline, KeywordStrategy};
pub use orchestrator::{AgentCrew, ContentOrchestrator, OrchestrationOutput};
pub use search::{ResearchClient, SearchError, SearchProvider, TavilyProvider};
