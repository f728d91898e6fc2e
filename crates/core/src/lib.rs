//! Content Cascade Core
//!
//! Foundational data model and error types for the Content Cascade workspace.
//! This crate has no dependencies on network clients or the async runtime, so
//! the LLM crate and the application crate can both build on it.
//!
//! ## Module Organization
//!
//! - `error` - Core error types (`CoreError`, `CoreResult`)
//! - `content` - Generation request, pipeline stages and the ordered pipeline result
//! - `proxy` - Proxy configuration shared by every outbound HTTP client

pub mod content;
pub mod error;
pub mod proxy;

// ── Error Types ────────────────────────────────────────────────────────
pub use error::{CoreError, CoreResult};

// ── Content Model ──────────────────────────────────────────────────────
pub use content::{GenerationRequest, PipelineResult, PipelineResultBuilder, PipelineStage};

// ── Proxy Types ────────────────────────────────────────────────────────
pub use proxy::{ProxyConfig, ProxyProtocol};
