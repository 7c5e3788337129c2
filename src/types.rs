//! Core record types shared by every catalog and the resolver.
//!
//! These are plain data: no lookup logic lives here. Catalogs build
//! `Metadata` fresh for every query and the resolver returns new records
//! rather than patching the ones a catalog handed it.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::diagnostics::SourceSpan;

// =============================================================================
// DEFINITION KINDS
// =============================================================================

/// Kind of definition a lookup may be restricted to.
///
/// An empty filter slice means "any kind".
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum DefinitionKind {
    Resource,
    Type,
    Profile,
    Extension,
    Logical,
    ValueSet,
    CodeSystem,
    Instance,
    Invariant,
    RuleSet,
    Mapping,
}

impl DefinitionKind {
    /// Kinds that a `parent` or instance-of reference may name.
    pub const STRUCTURE_DEFINITIONS: &'static [DefinitionKind] = &[
        DefinitionKind::Resource,
        DefinitionKind::Type,
        DefinitionKind::Profile,
        DefinitionKind::Extension,
        DefinitionKind::Logical,
    ];

    /// True if this kind describes a structure definition
    pub fn is_structure_definition(self) -> bool {
        Self::STRUCTURE_DEFINITIONS.contains(&self)
    }

    /// Check a kind against a lookup filter (empty filter allows everything)
    pub fn allowed_by(self, kinds: &[DefinitionKind]) -> bool {
        kinds.is_empty() || kinds.contains(&self)
    }
}

impl fmt::Display for DefinitionKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            Self::Resource => "Resource",
            Self::Type => "Type",
            Self::Profile => "Profile",
            Self::Extension => "Extension",
            Self::Logical => "Logical",
            Self::ValueSet => "ValueSet",
            Self::CodeSystem => "CodeSystem",
            Self::Instance => "Instance",
            Self::Invariant => "Invariant",
            Self::RuleSet => "RuleSet",
            Self::Mapping => "Mapping",
        };
        f.write_str(s)
    }
}

// =============================================================================
// INSTANCE USAGE
// =============================================================================

/// How an instance is meant to be used.
///
/// `Inline` instances live inside another resource and are not independently
/// addressable, so they never get a synthesized URL.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum InstanceUsage {
    #[default]
    Example,
    Definition,
    Inline,
}

impl InstanceUsage {
    pub fn is_inline(self) -> bool {
        matches!(self, Self::Inline)
    }
}

// =============================================================================
// METADATA
// =============================================================================

/// Normalized summary of a definition.
///
/// Equality is structural over every field; the resolver relies on that to
/// drop duplicates from multi-catalog answers.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Metadata {
    pub id: String,
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub url: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub parent: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub sd_type: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub resource_type: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub instance_usage: Option<InstanceUsage>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub version: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub is_abstract: Option<bool>,
}

impl Metadata {
    pub fn new(id: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            ..Default::default()
        }
    }

    pub fn with_url(mut self, url: impl Into<String>) -> Self {
        self.url = Some(url.into());
        self
    }

    pub fn with_parent(mut self, parent: impl Into<String>) -> Self {
        self.parent = Some(parent.into());
        self
    }

    pub fn with_sd_type(mut self, sd_type: impl Into<String>) -> Self {
        self.sd_type = Some(sd_type.into());
        self
    }

    pub fn with_resource_type(mut self, resource_type: impl Into<String>) -> Self {
        self.resource_type = Some(resource_type.into());
        self
    }

    pub fn with_instance_usage(mut self, usage: InstanceUsage) -> Self {
        self.instance_usage = Some(usage);
        self
    }

    pub fn with_version(mut self, version: impl Into<String>) -> Self {
        self.version = Some(version.into());
        self
    }

    /// Does this record answer to `item` as an id, name, or url?
    pub fn matches(&self, item: &str) -> bool {
        self.id == item || self.name == item || self.url.as_deref() == Some(item)
    }

    /// Identity used when checking a parent chain for repeats.
    ///
    /// The canonical URL when present, otherwise `id|name`.
    pub fn chain_key(&self) -> String {
        match &self.url {
            Some(url) => url.clone(),
            None => format!("{}|{}", self.id, self.name),
        }
    }
}

// =============================================================================
// RAW DEFINITIONS
// =============================================================================

/// Full content of a definition, opaque to the resolver.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct RawDefinition(pub serde_json::Value);

impl RawDefinition {
    pub fn new(value: serde_json::Value) -> Self {
        Self(value)
    }

    pub fn as_json(&self) -> &serde_json::Value {
        &self.0
    }

    pub fn into_json(self) -> serde_json::Value {
        self.0
    }
}

impl From<serde_json::Value> for RawDefinition {
    fn from(value: serde_json::Value) -> Self {
        Self(value)
    }
}

// =============================================================================
// SOURCE ARTIFACTS
// =============================================================================

/// Source-form view of an authored artifact.
///
/// Only the fields the resolver needs: identity, kind, the instance-of
/// reference used to backfill `resource_type`, and where it was written.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct SourceArtifact {
    pub id: String,
    pub name: String,
    pub kind: DefinitionKind,
    #[serde(default)]
    pub instance_of: Option<String>,
    #[serde(default)]
    pub usage: Option<InstanceUsage>,
    #[serde(default)]
    pub location: Option<SourceSpan>,
}

impl SourceArtifact {
    pub fn new(id: impl Into<String>, name: impl Into<String>, kind: DefinitionKind) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            kind,
            instance_of: None,
            usage: None,
            location: None,
        }
    }

    pub fn with_instance_of(mut self, instance_of: impl Into<String>) -> Self {
        self.instance_of = Some(instance_of.into());
        self
    }

    pub fn with_usage(mut self, usage: InstanceUsage) -> Self {
        self.usage = Some(usage);
        self
    }

    pub fn with_location(mut self, location: SourceSpan) -> Self {
        self.location = Some(location);
        self
    }

    pub fn matches(&self, item: &str) -> bool {
        self.id == item || self.name == item
    }
}
