//! JSON Configuration Management
//!
//! Handles reading and writing the application settings file.

use std::fs;
use std::path::{Path, PathBuf};

use tracing::debug;

use crate::models::settings::{AppConfig, SettingsUpdate};
use crate::utils::error::{AppError, AppResult};
use crate::utils::paths::{config_path, ensure_parent_dir};

/// Configuration service for managing app settings
#[derive(Debug)]
pub struct ConfigService {
    /// File the settings were loaded from, if any
    config_path: Option<PathBuf>,
    config: AppConfig,
}

impl ConfigService {
    /// Load settings.
    ///
    /// An explicit path must exist. Without one, the default file is used
    /// when present and built-in defaults otherwise; nothing is written.
    pub fn load(explicit: Option<&Path>) -> AppResult<Self> {
        let (config_path, config) = match explicit {
            Some(path) => {
                if !path.exists() {
                    return Err(AppError::config(format!(
                        "settings file {} does not exist",
                        path.display()
                    )));
                }
                (Some(path.to_path_buf()), Self::load_from_file(path)?)
            }
            None => {
                let default_path = config_path()?;
                if default_path.exists() {
                    let config = Self::load_from_file(&default_path)?;
                    (Some(default_path), config)
                } else {
                    debug!("No settings file at {}, using defaults", default_path.display());
                    (None, AppConfig::default())
                }
            }
        };

        Ok(Self {
            config_path,
            config,
        })
    }

    /// Load configuration from a file
    fn load_from_file(path: &Path) -> AppResult<AppConfig> {
        let content = fs::read_to_string(path)?;
        let config: AppConfig = serde_json::from_str(&content).map_err(|e| {
            AppError::config(format!("invalid settings file {}: {}", path.display(), e))
        })?;
        config.validate().map_err(AppError::validation)?;
        debug!("Loaded settings from {}", path.display());
        Ok(config)
    }

    /// Save configuration to a file with pretty formatting
    fn save_to_file(path: &Path, config: &AppConfig) -> AppResult<()> {
        config.validate().map_err(AppError::validation)?;
        ensure_parent_dir(path)?;
        let content = serde_json::to_string_pretty(config)?;
        fs::write(path, content)?;
        Ok(())
    }

    /// Write the default settings to `path` (or the default location).
    ///
    /// Refuses to overwrite an existing file unless `force` is set.
    pub fn write_default(path: Option<&Path>, force: bool) -> AppResult<PathBuf> {
        let path = match path {
            Some(p) => p.to_path_buf(),
            None => config_path()?,
        };
        if path.exists() && !force {
            return Err(AppError::config(format!(
                "{} already exists (use --force to overwrite)",
                path.display()
            )));
        }
        Self::save_to_file(&path, &AppConfig::default())?;
        Ok(path)
    }

    /// Get the current configuration
    pub fn get_config(&self) -> &AppConfig {
        &self.config
    }

    /// Get a clone of the current configuration
    pub fn get_config_clone(&self) -> AppConfig {
        self.config.clone()
    }

    /// File the settings came from, `None` for built-in defaults
    pub fn source(&self) -> Option<&Path> {
        self.config_path.as_deref()
    }

    /// Apply command-line overrides in memory; the file is left untouched.
    pub fn apply_overrides(&mut self, update: SettingsUpdate) -> AppResult<&AppConfig> {
        let mut candidate = self.config.clone();
        candidate.apply_update(update);
        candidate.validate().map_err(AppError::validation)?;
        self.config = candidate;
        Ok(&self.config)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::services::fallback::KeywordStrategy;
    use std::io::Write;
    use tempfile::NamedTempFile;

    #[test]
    fn test_load_config_from_file() {
        let mut file = NamedTempFile::new().unwrap();
        file.write_all(br#"{"models": ["gemini-2.0-flash"], "search_max_results": 3}"#)
            .unwrap();

        let service = ConfigService::load(Some(file.path())).unwrap();
        assert_eq!(service.get_config().models, vec!["gemini-2.0-flash"]);
        assert_eq!(service.get_config().search_max_results, 3);
        assert_eq!(service.source(), Some(file.path()));
    }

    #[test]
    fn test_missing_explicit_file_is_config_error() {
        let dir = tempfile::tempdir().unwrap();
        let err = ConfigService::load(Some(&dir.path().join("nope.json"))).unwrap_err();
        assert!(matches!(err, AppError::Config(_)));
    }

    #[test]
    fn test_invalid_values_are_rejected() {
        let mut file = NamedTempFile::new().unwrap();
        file.write_all(br#"{"models": []}"#).unwrap();
        let err = ConfigService::load(Some(file.path())).unwrap_err();
        assert!(matches!(err, AppError::Validation(_)));

        let mut file = NamedTempFile::new().unwrap();
        file.write_all(b"not json").unwrap();
        let err = ConfigService::load(Some(file.path())).unwrap_err();
        assert!(matches!(err, AppError::Config(_)));
    }

    #[test]
    fn test_write_default_and_reload() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nested").join("config.json");

        let written = ConfigService::write_default(Some(&path), false).unwrap();
        assert_eq!(written, path);

        let loaded = ConfigService::load(Some(&path)).unwrap();
        assert_eq!(loaded.get_config_clone(), AppConfig::default());

        assert!(ConfigService::write_default(Some(&path), false).is_err());
        assert!(ConfigService::write_default(Some(&path), true).is_ok());
    }

    #[test]
    fn test_apply_overrides_validates() {
        let dir = tempfile::tempdir().unwrap();
        let path = ConfigService::write_default(Some(&dir.path().join("c.json")), false).unwrap();
        let mut service = ConfigService::load(Some(&path)).unwrap();

        let config = service
            .apply_overrides(SettingsUpdate {
                keyword_strategy: Some(KeywordStrategy::Frequency),
                ..Default::default()
            })
            .unwrap();
        assert_eq!(config.keyword_strategy, KeywordStrategy::Frequency);

        let err = service
            .apply_overrides(SettingsUpdate {
                models: Some(Vec::new()),
                ..Default::default()
            })
            .unwrap_err();
        assert!(matches!(err, AppError::Validation(_)));
        // rejected overrides leave the previous settings in place
        assert_eq!(service.get_config().models.len(), 3);
    }
}
