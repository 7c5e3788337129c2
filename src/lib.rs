//! fisher-core: priority-ordered definition lookup for the compiler
//!
//! Resolves one identifier (name, id, or canonical URL) against three
//! catalogs and gives later compiler stages one consistent answer:
//! - Output package: definitions exported during the current run
//! - Source catalog: definitions still in author-written form, plus aliases
//! - Standard catalog: the immutable standard library, with a fast path
//!   for well-known identifiers
//!
//! The resolver repairs metadata the source catalog cannot compute on its
//! own (structural type, resource type, URL), reports circular parent
//! chains through a diagnostic sink, and deduplicates multi-catalog answers.
//!
//! Catalog storage lives behind the traits in [`catalog`]; [`memory`] has
//! simple in-memory implementations.

pub mod catalog;
pub mod config;
pub mod diagnostics;
pub mod error;
pub mod memory;
pub mod resolver;
pub mod types;

// Re-export commonly used types
pub use catalog::{
    Catalog, CatalogOrigin, PackageCatalog, SourceCatalog, StandardCatalog, Tagged,
};
pub use config::loader::ConfigLoader;
pub use config::types::ProjectConfig;
pub use diagnostics::{
    CollectingSink, Diagnostic, DiagnosticCode, DiagnosticSink, Severity, SourceSpan, TracingSink,
};
pub use error::ConfigError;
pub use memory::{MemoryIndex, MemoryPackage, MemorySourceCatalog, MemoryStandardCatalog};
pub use resolver::Resolver;
pub use types::{DefinitionKind, InstanceUsage, Metadata, RawDefinition, SourceArtifact};
