//! Content Cascade
//!
//! Generates written content with a crew of role agents and falls back to a
//! direct four-stage pipeline when the crew fails. It includes:
//! - Content entry point, agent crew, fallback pipeline and search services
//! - CLI definition and command handlers
//! - Settings storage and data models

pub mod cli;
pub mod commands;
pub mod models;
pub mod services;
pub mod state;
pub mod storage;
pub mod utils;

pub use models::outcome::{RunOutcome, RunPath};
pub use models::settings::{AppConfig, Credentials, SettingsUpdate};
pub use services::content::ContentService;
pub use state::AppContext;
pub use utils::error::{AppError, AppResult};
