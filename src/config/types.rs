//! Project configuration types
//!
//! Mirrors the YAML project file the compiler reads before a run. Only the
//! fields the resolver consults are typed; everything else is ignored.

use serde::{Deserialize, Serialize};
use url::Url;

use crate::error::ConfigError;

/// Project-level settings shared by the output package and the source catalog.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProjectConfig {
    #[serde(default)]
    pub id: String,
    #[serde(default)]
    pub name: String,
    /// Base URL that exported definitions are published under.
    #[serde(default)]
    pub canonical: String,
    #[serde(default)]
    pub version: Option<String>,
    #[serde(default)]
    pub status: Option<String>,
    /// Structural versions the project targets, preferred first.
    #[serde(default)]
    pub fhir_version: Vec<String>,
}

impl ProjectConfig {
    pub fn new(id: impl Into<String>, canonical: impl Into<String>) -> Self {
        let id = id.into();
        Self {
            name: id.clone(),
            id,
            canonical: canonical.into(),
            ..Default::default()
        }
    }

    pub fn with_fhir_version(mut self, version: impl Into<String>) -> Self {
        self.fhir_version.push(version.into());
        self
    }

    /// Canonical base without a trailing slash
    pub fn canonical_base(&self) -> &str {
        self.canonical.trim_end_matches('/')
    }

    /// First listed structural version, if any
    pub fn primary_fhir_version(&self) -> Option<&str> {
        self.fhir_version.first().map(String::as_str)
    }

    /// Check the fields the resolver depends on
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.id.trim().is_empty() {
            return Err(ConfigError::EmptyField("id"));
        }
        if self.name.trim().is_empty() {
            return Err(ConfigError::EmptyField("name"));
        }
        if self.canonical.trim().is_empty() {
            return Err(ConfigError::MissingCanonical);
        }
        Url::parse(self.canonical_base())
            .map_err(|e| ConfigError::InvalidCanonical(self.canonical.clone(), e.to_string()))?;
        for version in &self.fhir_version {
            if !is_semver_like(version) {
                return Err(ConfigError::UnsupportedFhirVersion(version.clone()));
            }
        }
        Ok(())
    }
}

/// `MAJOR.MINOR.PATCH` with an optional `-label` suffix
fn is_semver_like(version: &str) -> bool {
    let core = version.split('-').next().unwrap_or_default();
    let parts: Vec<&str> = core.split('.').collect();
    parts.len() == 3
        && parts
            .iter()
            .all(|p| !p.is_empty() && p.chars().all(|c| c.is_ascii_digit()))
}
