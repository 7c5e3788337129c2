//! In-memory catalogs
//!
//! Small indexed implementations of the catalog traits. Useful for embedding
//! the resolver without a real package store and for tests. Lookups match an
//! entry's id, name, or url and return entries in insertion order.

use std::collections::HashMap;

use crate::catalog::{Catalog, PackageCatalog, SourceCatalog, StandardCatalog};
use crate::config::types::ProjectConfig;
use crate::types::{DefinitionKind, Metadata, RawDefinition, SourceArtifact};

#[derive(Debug, Clone)]
struct Entry {
    kind: DefinitionKind,
    metadata: Metadata,
    definition: RawDefinition,
}

/// Insertion-ordered list of definitions with id/name/url matching.
#[derive(Debug, Clone, Default)]
pub struct MemoryIndex {
    entries: Vec<Entry>,
}

impl MemoryIndex {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a definition with explicit content
    pub fn insert(&mut self, kind: DefinitionKind, metadata: Metadata, definition: RawDefinition) {
        self.entries.push(Entry {
            kind,
            metadata,
            definition,
        });
    }

    /// Add a definition whose content is its own metadata
    pub fn insert_metadata(&mut self, kind: DefinitionKind, metadata: Metadata) {
        let definition = RawDefinition::new(serde_json::json!({
            "kind": kind.to_string(),
            "id": metadata.id,
            "name": metadata.name,
            "url": metadata.url,
        }));
        self.insert(kind, metadata, definition);
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    fn matching<'a>(
        &'a self,
        item: &'a str,
        kinds: &'a [DefinitionKind],
    ) -> impl Iterator<Item = &'a Entry> + 'a {
        self.entries
            .iter()
            .filter(move |e| e.kind.allowed_by(kinds) && e.metadata.matches(item))
    }
}

impl Catalog for MemoryIndex {
    fn lookup_definition(&self, item: &str, kinds: &[DefinitionKind]) -> Option<RawDefinition> {
        self.matching(item, kinds)
            .next()
            .map(|e| e.definition.clone())
    }

    fn lookup_metadata(&self, item: &str, kinds: &[DefinitionKind]) -> Option<Metadata> {
        self.matching(item, kinds).next().map(|e| e.metadata.clone())
    }

    fn lookup_all_metadata(&self, item: &str, kinds: &[DefinitionKind]) -> Vec<Metadata> {
        self.matching(item, kinds)
            .map(|e| e.metadata.clone())
            .collect()
    }
}

// =============================================================================
// OUTPUT PACKAGE
// =============================================================================

/// Definitions exported during the current run.
#[derive(Debug, Clone)]
pub struct MemoryPackage {
    config: ProjectConfig,
    index: MemoryIndex,
}

impl MemoryPackage {
    pub fn new(config: ProjectConfig) -> Self {
        Self {
            config,
            index: MemoryIndex::new(),
        }
    }

    pub fn with_definition(
        mut self,
        kind: DefinitionKind,
        metadata: Metadata,
        definition: RawDefinition,
    ) -> Self {
        self.index.insert(kind, metadata, definition);
        self
    }

    pub fn with_metadata(mut self, kind: DefinitionKind, metadata: Metadata) -> Self {
        self.index.insert_metadata(kind, metadata);
        self
    }
}

impl Catalog for MemoryPackage {
    fn lookup_definition(&self, item: &str, kinds: &[DefinitionKind]) -> Option<RawDefinition> {
        self.index.lookup_definition(item, kinds)
    }

    fn lookup_metadata(&self, item: &str, kinds: &[DefinitionKind]) -> Option<Metadata> {
        self.index.lookup_metadata(item, kinds)
    }

    fn lookup_all_metadata(&self, item: &str, kinds: &[DefinitionKind]) -> Vec<Metadata> {
        self.index.lookup_all_metadata(item, kinds)
    }
}

impl PackageCatalog for MemoryPackage {
    fn config(&self) -> &ProjectConfig {
        &self.config
    }
}

// =============================================================================
// SOURCE CATALOG
// =============================================================================

/// Author-written definitions, their aliases, and their source artifacts.
#[derive(Debug, Clone)]
pub struct MemorySourceCatalog {
    config: ProjectConfig,
    index: MemoryIndex,
    aliases: HashMap<String, String>,
    artifacts: Vec<SourceArtifact>,
}

impl MemorySourceCatalog {
    pub fn new(config: ProjectConfig) -> Self {
        Self {
            config,
            index: MemoryIndex::new(),
            aliases: HashMap::new(),
            artifacts: Vec::new(),
        }
    }

    pub fn with_metadata(mut self, kind: DefinitionKind, metadata: Metadata) -> Self {
        self.index.insert_metadata(kind, metadata);
        self
    }

    pub fn with_alias(mut self, alias: impl Into<String>, target: impl Into<String>) -> Self {
        self.aliases.insert(alias.into(), target.into());
        self
    }

    pub fn with_artifact(mut self, artifact: SourceArtifact) -> Self {
        self.artifacts.push(artifact);
        self
    }
}

impl Catalog for MemorySourceCatalog {
    fn lookup_definition(&self, item: &str, kinds: &[DefinitionKind]) -> Option<RawDefinition> {
        self.index.lookup_definition(item, kinds)
    }

    fn lookup_metadata(&self, item: &str, kinds: &[DefinitionKind]) -> Option<Metadata> {
        self.index.lookup_metadata(item, kinds)
    }

    fn lookup_all_metadata(&self, item: &str, kinds: &[DefinitionKind]) -> Vec<Metadata> {
        self.index.lookup_all_metadata(item, kinds)
    }
}

impl SourceCatalog for MemorySourceCatalog {
    fn resolve_alias(&self, item: &str) -> Option<String> {
        self.aliases.get(item).cloned()
    }

    fn lookup_all_definitions(&self, item: &str, kinds: &[DefinitionKind]) -> Vec<SourceArtifact> {
        self.artifacts
            .iter()
            .filter(|a| a.kind.allowed_by(kinds) && a.matches(item))
            .cloned()
            .collect()
    }

    fn config(&self) -> &ProjectConfig {
        &self.config
    }
}

// =============================================================================
// STANDARD CATALOG
// =============================================================================

/// Pre-published definitions plus the well-known fast-path index.
#[derive(Debug, Clone, Default)]
pub struct MemoryStandardCatalog {
    index: MemoryIndex,
    predefined: MemoryIndex,
    version: Option<String>,
}

impl MemoryStandardCatalog {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_version(mut self, version: impl Into<String>) -> Self {
        self.version = Some(version.into());
        self
    }

    pub fn with_definition(
        mut self,
        kind: DefinitionKind,
        metadata: Metadata,
        definition: RawDefinition,
    ) -> Self {
        self.index.insert(kind, metadata, definition);
        self
    }

    pub fn with_metadata(mut self, kind: DefinitionKind, metadata: Metadata) -> Self {
        self.index.insert_metadata(kind, metadata);
        self
    }

    /// Add to the fast-path index only
    pub fn with_predefined(
        mut self,
        kind: DefinitionKind,
        metadata: Metadata,
        definition: RawDefinition,
    ) -> Self {
        self.predefined.insert(kind, metadata, definition);
        self
    }
}

impl Catalog for MemoryStandardCatalog {
    fn lookup_definition(&self, item: &str, kinds: &[DefinitionKind]) -> Option<RawDefinition> {
        self.index.lookup_definition(item, kinds)
    }

    fn lookup_metadata(&self, item: &str, kinds: &[DefinitionKind]) -> Option<Metadata> {
        self.index.lookup_metadata(item, kinds)
    }

    fn lookup_all_metadata(&self, item: &str, kinds: &[DefinitionKind]) -> Vec<Metadata> {
        self.index.lookup_all_metadata(item, kinds)
    }
}

impl StandardCatalog for MemoryStandardCatalog {
    fn lookup_predefined_definition(
        &self,
        item: &str,
        kinds: &[DefinitionKind],
    ) -> Option<RawDefinition> {
        self.predefined.lookup_definition(item, kinds)
    }

    fn lookup_predefined_metadata(&self, item: &str, kinds: &[DefinitionKind]) -> Option<Metadata> {
        self.predefined.lookup_metadata(item, kinds)
    }

    fn lookup_all_predefined_metadata(
        &self,
        item: &str,
        kinds: &[DefinitionKind],
    ) -> Vec<Metadata> {
        self.predefined.lookup_all_metadata(item, kinds)
    }

    fn default_version(&self) -> Option<String> {
        self.version.clone()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn patient() -> Metadata {
        Metadata::new("Patient", "Patient")
            .with_url("http://hl7.org/fhir/StructureDefinition/Patient")
            .with_sd_type("Patient")
    }

    #[test]
    fn test_index_matches_id_name_and_url() {
        let mut index = MemoryIndex::new();
        index.insert_metadata(DefinitionKind::Resource, patient());

        assert!(index.lookup_metadata("Patient", &[]).is_some());
        assert!(index
            .lookup_metadata("http://hl7.org/fhir/StructureDefinition/Patient", &[])
            .is_some());
        assert!(index.lookup_metadata("Observation", &[]).is_none());
    }

    #[test]
    fn test_index_respects_kind_filter() {
        let mut index = MemoryIndex::new();
        index.insert_metadata(DefinitionKind::Resource, patient());

        assert!(index
            .lookup_metadata("Patient", &[DefinitionKind::Resource])
            .is_some());
        assert!(index
            .lookup_metadata("Patient", &[DefinitionKind::ValueSet])
            .is_none());
    }

    #[test]
    fn test_index_returns_all_matches_in_order() {
        let mut index = MemoryIndex::new();
        index.insert_metadata(DefinitionKind::Profile, Metadata::new("dup", "First"));
        index.insert_metadata(DefinitionKind::Profile, Metadata::new("dup", "Second"));

        let all = index.lookup_all_metadata("dup", &[]);
        assert_eq!(all.len(), 2);
        assert_eq!(all[0].name, "First");
        assert_eq!(index.lookup_metadata("dup", &[]).unwrap().name, "First");
    }

    #[test]
    fn test_source_catalog_aliases() {
        let source = MemorySourceCatalog::new(ProjectConfig::new("demo", "http://example.org"))
            .with_alias("$pat", "http://hl7.org/fhir/StructureDefinition/Patient");

        assert_eq!(
            source.resolve_alias("$pat").as_deref(),
            Some("http://hl7.org/fhir/StructureDefinition/Patient")
        );
        assert_eq!(source.resolve_alias("Patient"), None);
    }

    #[test]
    fn test_source_catalog_artifacts_filter_by_kind() {
        let source = MemorySourceCatalog::new(ProjectConfig::new("demo", "http://example.org"))
            .with_artifact(
                SourceArtifact::new("pat-1", "pat-1", DefinitionKind::Instance)
                    .with_instance_of("Patient"),
            );

        assert_eq!(
            source
                .lookup_all_definitions("pat-1", &[DefinitionKind::Instance])
                .len(),
            1
        );
        assert!(source
            .lookup_all_definitions("pat-1", &[DefinitionKind::Profile])
            .is_empty());
    }

    #[test]
    fn test_standard_catalog_keeps_fast_path_separate() {
        let standard = MemoryStandardCatalog::new().with_predefined(
            DefinitionKind::Resource,
            patient(),
            RawDefinition::new(serde_json::json!({ "resourceType": "StructureDefinition" })),
        );

        assert!(standard.lookup_predefined_metadata("Patient", &[]).is_some());
        assert!(standard.lookup_metadata("Patient", &[]).is_none());
    }
}
