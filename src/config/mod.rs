pub mod types;

pub use types::*;

use crate::error::AppError;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use tracing::{info, warn};

/// Main application configuration
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct AppConfig {
    /// Recognized extensions
    #[serde(default)]
    pub extensions: ExtensionConfig,
    /// External tools
    #[serde(default)]
    pub probe: ProbeConfig,
    /// Report output
    #[serde(default)]
    pub report: ReportConfig,
}

impl AppConfig {
    /// Load configuration from the default TOML file, or create it with
    /// defaults if not found
    pub fn load() -> Self {
        let config_path = Self::config_path();

        if config_path.exists() {
            match Self::load_from_file(&config_path) {
                Ok(config) => {
                    info!("Loaded config from {}", config_path.display());
                    return config;
                }
                Err(e) => {
                    warn!("Failed to load config: {}. Using defaults.", e);
                    return Self::default();
                }
            }
        }

        let config = Self::default();
        // Save default config for future editing
        if let Err(e) = config.save_to(&config_path) {
            warn!("Failed to save default config: {}", e);
        }
        config
    }

    /// Save configuration to a TOML file
    pub fn save_to(&self, config_path: &Path) -> Result<(), AppError> {
        if let Some(parent) = config_path.parent() {
            std::fs::create_dir_all(parent).map_err(|e| {
                AppError::Config(format!("Failed to create config directory: {}", e))
            })?;
        }

        let toml_string = toml::to_string_pretty(self)?;
        std::fs::write(config_path, toml_string)
            .map_err(|e| AppError::Config(format!("Failed to write config file: {}", e)))?;

        info!("Saved config to {}", config_path.display());
        Ok(())
    }

    /// Load configuration from a specific file
    pub fn load_from_file(path: &Path) -> Result<Self, AppError> {
        let content = std::fs::read_to_string(path)
            .map_err(|e| AppError::Config(format!("Failed to read config file: {}", e)))?;
        let config: AppConfig = toml::from_str(&content)?;
        Ok(config)
    }

    /// Get the default configuration file path
    pub fn config_path() -> PathBuf {
        dirs::config_dir()
            .unwrap_or_else(|| PathBuf::from("."))
            .join("clipaudit")
            .join("config.toml")
    }

    /// Validate configuration values
    pub fn validate(&self) -> Result<(), AppError> {
        if self.probe.timeout_secs == 0 {
            return Err(AppError::Config(
                "Tool timeout must be at least one second".to_string(),
            ));
        }
        if self.probe.jobs == 0 {
            return Err(AppError::Config("Job count must be at least 1".to_string()));
        }
        if self.report.file_name.trim().is_empty() {
            return Err(AppError::Config(
                "Report file name must not be empty".to_string(),
            ));
        }

        let ext = &self.extensions;
        let all = ext
            .video
            .iter()
            .chain(ext.raw.iter())
            .chain(std::iter::once(&ext.raw_container));
        for entry in all {
            if !entry.starts_with('.') || entry.len() < 2 {
                return Err(AppError::Config(format!(
                    "Extension '{}' must start with a dot",
                    entry
                )));
            }
        }
        Ok(())
    }
}
