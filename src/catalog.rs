//! Catalog port traits
//!
//! The resolver depends only on these traits. Storage, parsing and indexing
//! of definitions belong to whoever implements them.
//!
//! ```text
//!   Catalog                      lookup_definition / lookup_metadata / lookup_all_metadata
//!     ├── PackageCatalog         + project config (canonical base)
//!     ├── SourceCatalog          + aliases, source artifacts, project config
//!     └── StandardCatalog        + predefined fast path, default version
//! ```

use crate::config::types::ProjectConfig;
use crate::types::{DefinitionKind, Metadata, RawDefinition, SourceArtifact};

/// Lookup capability shared by every catalog.
///
/// `item` may be a name, an id, or a canonical URL. An empty `kinds` slice
/// means any kind. Not finding something is never an error.
pub trait Catalog {
    fn lookup_definition(&self, item: &str, kinds: &[DefinitionKind]) -> Option<RawDefinition>;

    fn lookup_metadata(&self, item: &str, kinds: &[DefinitionKind]) -> Option<Metadata>;

    fn lookup_all_metadata(&self, item: &str, kinds: &[DefinitionKind]) -> Vec<Metadata>;
}

/// Definitions the compiler has already produced in this run.
pub trait PackageCatalog: Catalog {
    fn config(&self) -> &ProjectConfig;
}

/// Definitions that exist only in author-written source form.
///
/// This catalog cannot see the standard library, so the metadata it returns
/// generally lacks `sd_type`.
pub trait SourceCatalog: Catalog {
    /// Target of `item` if it is an alias
    fn resolve_alias(&self, item: &str) -> Option<String>;

    /// Source-form artifacts answering to `item`
    fn lookup_all_definitions(&self, item: &str, kinds: &[DefinitionKind]) -> Vec<SourceArtifact>;

    fn config(&self) -> &ProjectConfig;
}

/// Immutable library of pre-published definitions.
pub trait StandardCatalog: Catalog {
    /// Fast path for a small set of well-known identifiers
    fn lookup_predefined_definition(
        &self,
        item: &str,
        kinds: &[DefinitionKind],
    ) -> Option<RawDefinition>;

    fn lookup_predefined_metadata(&self, item: &str, kinds: &[DefinitionKind]) -> Option<Metadata>;

    fn lookup_all_predefined_metadata(&self, item: &str, kinds: &[DefinitionKind])
        -> Vec<Metadata>;

    /// Structural version this library was published for
    fn default_version(&self) -> Option<String>;
}

/// Which catalog produced a match.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum CatalogOrigin {
    /// Standard library fast-path index
    Predefined,
    Package,
    Source,
    Standard,
}

impl CatalogOrigin {
    /// Only source-form metadata needs the cross-catalog repair step
    pub fn needs_repair(self) -> bool {
        matches!(self, Self::Source)
    }
}

impl std::fmt::Display for CatalogOrigin {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let s = match self {
            Self::Predefined => "predefined",
            Self::Package => "package",
            Self::Source => "source",
            Self::Standard => "standard",
        };
        f.write_str(s)
    }
}

/// A lookup result tagged with the catalog it came from.
#[derive(Clone, Debug, PartialEq)]
pub struct Tagged<T> {
    pub origin: CatalogOrigin,
    pub value: T,
}

impl<T> Tagged<T> {
    pub fn new(origin: CatalogOrigin, value: T) -> Self {
        Self { origin, value }
    }
}
