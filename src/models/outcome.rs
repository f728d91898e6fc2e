//! Run Outcome
//!
//! What one call to the content entry point returns.

use serde::Serialize;

use content_cascade_core::PipelineResult;

/// Which path produced the content
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum RunPath {
    /// The orchestration layer completed
    Orchestrated,
    /// The orchestration layer failed and the fallback pipeline ran
    Fallback,
}

impl std::fmt::Display for RunPath {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            RunPath::Orchestrated => write!(f, "orchestrated"),
            RunPath::Fallback => write!(f, "fallback"),
        }
    }
}

/// Result of one content-generation run.
///
/// `final_output` is never empty.
#[derive(Debug, Clone, Serialize)]
pub struct RunOutcome {
    pub success: bool,
    pub final_output: String,
    pub pipeline: PipelineResult,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
    pub path: RunPath,
    pub started_at: String,
    pub duration_ms: u64,
}

impl RunOutcome {
    /// Whether the fallback pipeline produced this outcome
    pub fn used_fallback(&self) -> bool {
        self.path == RunPath::Fallback
    }
}
