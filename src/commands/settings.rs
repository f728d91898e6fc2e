//! Settings Commands
//!
//! Commands for reading and creating the settings file.

use std::path::Path;

use serde_json::json;

use crate::models::settings::{redact, AppConfig, Credentials, SettingsUpdate};
use crate::storage::ConfigService;
use crate::utils::error::AppResult;

/// Load settings and apply command-line overrides.
pub fn load_settings(config: Option<&Path>, update: SettingsUpdate) -> AppResult<AppConfig> {
    let mut service = ConfigService::load(config)?;
    service.apply_overrides(update)?;
    Ok(service.get_config_clone())
}

/// Resolved settings as pretty JSON, with the source file and redacted keys.
pub fn show_settings(service: &ConfigService, creds: Option<&Credentials>) -> AppResult<String> {
    let source = service
        .source()
        .map(|p| p.display().to_string())
        .unwrap_or_else(|| "built-in defaults".to_string());
    let credentials = match creds {
        Some(c) => json!({
            "gemini_api_key": redact(&c.gemini_api_key),
            "tavily_api_key": redact(&c.tavily_api_key),
        }),
        None => json!("not set"),
    };
    let view = json!({
        "source": source,
        "settings": service.get_config(),
        "credentials": credentials,
    });
    Ok(serde_json::to_string_pretty(&view)?)
}

/// Write the default settings file and report where it went.
pub fn init_settings(path: Option<&Path>, force: bool) -> AppResult<String> {
    let written = ConfigService::write_default(path, force)?;
    Ok(format!("Wrote default settings to {}", written.display()))
}
