//! Priority-ordered resolution across catalogs
//!
//! ## Lookup order
//!
//! ```text
//! identifier
//!     │  alias (source catalog)
//!     ▼
//! standard fast path ──hit──► return as-is
//!     │
//!     ▼
//! package ─► source ─► standard        first match wins
//!     │
//!     ▼
//! source origin?  ── yes ─► repair (parent walk, resource type, url)
//!                 ── no  ─► url synthesis only
//! ```
//!
//! `lookup_definition` differs in one respect: a definition that exists in
//! source form but has not been exported yet resolves to nothing, never to a
//! standard definition of the same name.

mod parent_chain;
mod repair;

use std::sync::Arc;

use tracing::debug;

use crate::catalog::{
    Catalog, CatalogOrigin, PackageCatalog, SourceCatalog, StandardCatalog, Tagged,
};
use crate::diagnostics::{DiagnosticSink, TracingSink};
use crate::types::{DefinitionKind, Metadata, RawDefinition};

/// Composes the output package, the source catalog and the standard library
/// into one lookup surface.
///
/// Generic over the three catalogs, so it is `Send`/`Sync` exactly when they
/// are. It holds no mutable state of its own.
pub struct Resolver<P, S, L> {
    package: P,
    source: S,
    standard: L,
    sink: Arc<dyn DiagnosticSink>,
    default_version: Option<String>,
}

impl<P, S, L> Resolver<P, S, L>
where
    P: PackageCatalog,
    S: SourceCatalog,
    L: StandardCatalog,
{
    /// Build a resolver that reports diagnostics through `tracing`
    pub fn new(package: P, source: S, standard: L) -> Self {
        Self::with_sink(package, source, standard, Arc::new(TracingSink))
    }

    /// Build a resolver that reports diagnostics to `sink`
    pub fn with_sink(package: P, source: S, standard: L, sink: Arc<dyn DiagnosticSink>) -> Self {
        let default_version = standard
            .default_version()
            .or_else(|| source.config().primary_fhir_version().map(str::to_string));
        debug!(default_version = ?default_version, "resolver initialised");

        Self {
            package,
            source,
            standard,
            sink,
            default_version,
        }
    }

    /// Structural version in effect, fixed at construction
    pub fn default_version(&self) -> Option<&str> {
        self.default_version.as_deref()
    }

    pub fn package(&self) -> &P {
        &self.package
    }

    pub fn source(&self) -> &S {
        &self.source
    }

    pub fn standard(&self) -> &L {
        &self.standard
    }

    /// Replace an alias with its target; anything else comes back unchanged
    pub fn resolve_alias(&self, item: &str) -> String {
        match self.source.resolve_alias(item) {
            Some(target) => {
                debug!(alias = %item, target = %target, "alias resolved");
                target
            }
            None => item.to_string(),
        }
    }

    /// Full content of a definition
    pub fn lookup_definition(&self, item: &str, kinds: &[DefinitionKind]) -> Option<RawDefinition> {
        let item = self.resolve_alias(item);

        if let Some(definition) = self.standard.lookup_predefined_definition(&item, kinds) {
            debug!(item = %item, origin = %CatalogOrigin::Predefined, "definition resolved");
            return Some(definition);
        }

        if let Some(definition) = self.package.lookup_definition(&item, kinds) {
            debug!(item = %item, origin = %CatalogOrigin::Package, "definition resolved");
            return Some(definition);
        }

        // Present in source but not exported yet: handing back a standard
        // definition of the same name would disagree with lookup_metadata.
        if self.source.lookup_definition(&item, kinds).is_some() {
            debug!(item = %item, "definition not exported yet");
            return None;
        }

        let definition = self.standard.lookup_definition(&item, kinds);
        if definition.is_some() {
            debug!(item = %item, origin = %CatalogOrigin::Standard, "definition resolved");
        }
        definition
    }

    /// Metadata from the highest-priority catalog that knows `item`
    pub fn lookup_metadata(&self, item: &str, kinds: &[DefinitionKind]) -> Option<Metadata> {
        let item = self.resolve_alias(item);

        if let Some(metadata) = self.standard.lookup_predefined_metadata(&item, kinds) {
            debug!(item = %item, origin = %CatalogOrigin::Predefined, "metadata resolved");
            return Some(metadata);
        }

        let found = self.first_metadata(&item, kinds)?;
        debug!(item = %item, origin = %found.origin, "metadata resolved");
        Some(self.finish(found))
    }

    /// Metadata from every catalog that knows `item`, without duplicates
    pub fn lookup_all_metadata(&self, item: &str, kinds: &[DefinitionKind]) -> Vec<Metadata> {
        let item = self.resolve_alias(item);

        let mut gathered = self.standard.lookup_all_predefined_metadata(&item, kinds);
        for (origin, catalog) in self.tiers() {
            for metadata in catalog.lookup_all_metadata(&item, kinds) {
                if origin.needs_repair() {
                    gathered.push(self.repair(metadata));
                } else {
                    gathered.push(metadata);
                }
            }
        }

        let total = gathered.len();
        let unique = dedup_metadata(gathered);
        debug!(item = %item, total, unique = unique.len(), "all metadata resolved");
        unique
    }

    /// Catalogs in priority order, without the fast path
    fn tiers(&self) -> [(CatalogOrigin, &dyn Catalog); 3] {
        [
            (CatalogOrigin::Package, &self.package as &dyn Catalog),
            (CatalogOrigin::Source, &self.source as &dyn Catalog),
            (CatalogOrigin::Standard, &self.standard as &dyn Catalog),
        ]
    }

    fn first_metadata(&self, item: &str, kinds: &[DefinitionKind]) -> Option<Tagged<Metadata>> {
        self.tiers().into_iter().find_map(|(origin, catalog)| {
            catalog
                .lookup_metadata(item, kinds)
                .map(|metadata| Tagged::new(origin, metadata))
        })
    }

    fn finish(&self, found: Tagged<Metadata>) -> Metadata {
        if found.origin.needs_repair() {
            self.repair(found.value)
        } else {
            self.synthesize_url(found.value)
        }
    }
}

impl<P, S, L> Catalog for Resolver<P, S, L>
where
    P: PackageCatalog,
    S: SourceCatalog,
    L: StandardCatalog,
{
    fn lookup_definition(&self, item: &str, kinds: &[DefinitionKind]) -> Option<RawDefinition> {
        Resolver::lookup_definition(self, item, kinds)
    }

    fn lookup_metadata(&self, item: &str, kinds: &[DefinitionKind]) -> Option<Metadata> {
        Resolver::lookup_metadata(self, item, kinds)
    }

    fn lookup_all_metadata(&self, item: &str, kinds: &[DefinitionKind]) -> Vec<Metadata> {
        Resolver::lookup_all_metadata(self, item, kinds)
    }
}

/// Drop structurally equal records, keeping first occurrences in order
fn dedup_metadata(records: Vec<Metadata>) -> Vec<Metadata> {
    let mut unique: Vec<Metadata> = Vec::with_capacity(records.len());
    for record in records {
        if !unique.contains(&record) {
            unique.push(record);
        }
    }
    unique
}
