//! Configuration loader
//!
//! Loads and validates the YAML project file.

use anyhow::{Context, Result};
use std::path::{Path, PathBuf};
use tracing::info;

use super::types::ProjectConfig;

/// File name looked up inside the config directory
pub const PROJECT_FILE: &str = "project.yaml";

pub struct ConfigLoader {
    config_dir: String,
}

impl ConfigLoader {
    pub fn new(config_dir: impl Into<String>) -> Self {
        Self {
            config_dir: config_dir.into(),
        }
    }

    /// Create loader from FISHER_CONFIG_DIR env var or default to "config"
    ///
    /// Path resolution order:
    /// 1. FISHER_CONFIG_DIR environment variable (explicit override)
    /// 2. Relative "config" path (works when running from the project root)
    /// 3. Current directory, if it holds a project file itself
    pub fn from_env() -> Self {
        if let Ok(dir) = std::env::var("FISHER_CONFIG_DIR") {
            return Self::new(dir);
        }

        if Path::new("config").join(PROJECT_FILE).exists() {
            return Self::new("config");
        }

        if Path::new(PROJECT_FILE).exists() {
            return Self::new(".");
        }

        // Last resort - return "config" and let it fail with clear error
        Self::new("config")
    }

    /// Get the config directory path as string slice
    pub fn config_dir_str(&self) -> &str {
        &self.config_dir
    }

    /// Get the config directory as PathBuf
    pub fn config_dir(&self) -> PathBuf {
        PathBuf::from(&self.config_dir)
    }

    /// Load and validate the project configuration
    pub fn load_project(&self) -> Result<ProjectConfig> {
        let path = self.config_dir().join(PROJECT_FILE);
        info!("Loading project configuration from {}", path.display());

        let content = std::fs::read_to_string(&path)
            .with_context(|| format!("Failed to read {}", path.display()))?;

        let config = Self::parse_project(&content)
            .with_context(|| format!("Invalid project configuration in {}", path.display()))?;

        info!(
            "Loaded project '{}' (canonical {}, fhir versions {:?})",
            config.id,
            config.canonical_base(),
            config.fhir_version
        );

        Ok(config)
    }

    /// Parse and validate project YAML without touching the filesystem
    pub fn parse_project(content: &str) -> Result<ProjectConfig> {
        let mut config: ProjectConfig =
            serde_yaml::from_str(content).context("Failed to parse project YAML")?;

        // Name defaults to the id when omitted
        if config.name.trim().is_empty() {
            config.name = config.id.clone();
        }

        config.validate()?;
        Ok(config)
    }
}
