//! Response Types
//!
//! Reports printed by the CLI commands.

use serde::{Deserialize, Serialize};

/// Reachability of one configured model
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ModelHealth {
    pub model: String,
    pub ok: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

/// Health check response
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HealthReport {
    pub status: String,
    pub version: String,
    pub service: String,
    pub models: Vec<ModelHealth>,
}

impl HealthReport {
    /// Build a report; the status is `healthy` only if every model answered.
    pub fn from_models(models: Vec<ModelHealth>) -> Self {
        let status = if !models.is_empty() && models.iter().all(|m| m.ok) {
            "healthy"
        } else {
            "degraded"
        };
        Self {
            status: status.to_string(),
            version: env!("CARGO_PKG_VERSION").to_string(),
            service: "content-cascade".to_string(),
            models,
        }
    }

    pub fn is_healthy(&self) -> bool {
        self.status == "healthy"
    }
}
