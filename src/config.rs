//! Configuration management for Filmdesk
//!
//! This module handles loading, parsing, validating, and managing
//! configuration from files, environment variables, and CLI overrides.

use crate::error::{FilmdeskError, Result};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// Main configuration structure for Filmdesk
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Config {
    /// Service identity settings
    #[serde(default)]
    pub service: ServiceConfig,
    /// Catalog settings
    #[serde(default)]
    pub catalog: CatalogConfig,
    /// Logging settings
    #[serde(default)]
    pub log: LogConfig,
}

/// Service identity configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServiceConfig {
    /// Name the service introduces itself with
    #[serde(default = "default_service_name")]
    pub name: String,
}

fn default_service_name() -> String {
    "Filmdesk".to_string()
}

impl Default for ServiceConfig {
    fn default() -> Self {
        Self {
            name: default_service_name(),
        }
    }
}

/// Catalog configuration
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct CatalogConfig {
    /// Optional YAML file of entries loaded into the catalog at startup
    #[serde(default)]
    pub seed_path: Option<PathBuf>,
}

/// Logging configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LogConfig {
    /// File the inbound message log is appended to
    #[serde(default = "default_message_log")]
    pub message_log: PathBuf,
}

fn default_message_log() -> PathBuf {
    PathBuf::from("messages.log")
}

impl Default for LogConfig {
    fn default() -> Self {
        Self {
            message_log: default_message_log(),
        }
    }
}

impl Config {
    /// Load configuration: file, then environment variables, then CLI
    /// overrides, in increasing precedence. A missing file falls back to
    /// defaults with a warning.
    pub fn load(path: &str, cli: &crate::cli::Cli) -> Result<Self> {
        let mut config = if Path::new(path).exists() {
            Self::from_file(path)?
        } else {
            tracing::warn!("Config file not found at {}, using defaults", path);
            Self::default()
        };

        config.apply_env_vars();
        config.apply_cli_overrides(cli);

        Ok(config)
    }

    fn from_file(path: &str) -> Result<Self> {
        let contents = std::fs::read_to_string(path)
            .map_err(|e| FilmdeskError::Config(format!("Failed to read config file: {}", e)))?;
        serde_yaml::from_str(&contents)
            .map_err(|e| FilmdeskError::Config(format!("Failed to parse config: {}", e)).into())
    }

    fn apply_env_vars(&mut self) {
        if let Ok(name) = std::env::var("FILMDESK_SERVICE_NAME") {
            self.service.name = name;
        }
        if let Ok(seed) = std::env::var("FILMDESK_SEED_PATH") {
            self.catalog.seed_path = Some(PathBuf::from(seed));
        }
        if let Ok(log) = std::env::var("FILMDESK_MESSAGE_LOG") {
            self.log.message_log = PathBuf::from(log);
        }
    }

    fn apply_cli_overrides(&mut self, cli: &crate::cli::Cli) {
        if let Some(seed) = &cli.seed {
            self.catalog.seed_path = Some(seed.clone());
        }
    }

    /// Validate the configuration
    pub fn validate(&self) -> Result<()> {
        if self.service.name.trim().is_empty() {
            return Err(FilmdeskError::Config("service.name must not be empty".into()).into());
        }
        if let Some(seed) = &self.catalog.seed_path {
            if !seed.exists() {
                return Err(FilmdeskError::Config(format!(
                    "catalog.seed_path does not exist: {}",
                    seed.display()
                ))
                .into());
            }
        }
        Ok(())
    }
}
