//! Shared fixtures for resolver integration tests

#![allow(dead_code)]

use std::sync::Arc;

use fisher_core::{
    CollectingSink, DefinitionKind, MemoryPackage, MemorySourceCatalog, MemoryStandardCatalog,
    Metadata, ProjectConfig, Resolver,
};

pub const CANONICAL: &str = "http://example.org";

pub type TestResolver = Resolver<MemoryPackage, MemorySourceCatalog, MemoryStandardCatalog>;

/// Route resolver logs to the test writer; RUST_LOG controls the level
pub fn init_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .with_test_writer()
        .try_init();
}

pub fn config() -> ProjectConfig {
    ProjectConfig::new("demo", CANONICAL).with_fhir_version("4.0.1")
}

pub fn fhir_url(name: &str) -> String {
    format!("http://hl7.org/fhir/StructureDefinition/{}", name)
}

pub fn local_url(name: &str) -> String {
    format!("{}/StructureDefinition/{}", CANONICAL, name)
}

/// A base resource as the standard library publishes it
pub fn standard_resource(name: &str) -> Metadata {
    Metadata::new(name, name)
        .with_url(fhir_url(name))
        .with_sd_type(name)
}

/// A profile authored in source: no structural type yet
pub fn source_profile(name: &str, parent: &str) -> Metadata {
    Metadata::new(name, name)
        .with_url(local_url(name))
        .with_parent(parent)
}

pub fn package() -> MemoryPackage {
    MemoryPackage::new(config())
}

pub fn source() -> MemorySourceCatalog {
    MemorySourceCatalog::new(config())
}

/// Standard library with a handful of base resources
pub fn standard() -> MemoryStandardCatalog {
    MemoryStandardCatalog::new()
        .with_version("4.0.1")
        .with_metadata(DefinitionKind::Resource, standard_resource("Patient"))
        .with_metadata(DefinitionKind::Resource, standard_resource("Observation"))
        .with_metadata(DefinitionKind::Resource, standard_resource("Practitioner"))
}

pub fn build(
    package: MemoryPackage,
    source: MemorySourceCatalog,
    standard: MemoryStandardCatalog,
) -> (TestResolver, Arc<CollectingSink>) {
    init_tracing();
    let sink = Arc::new(CollectingSink::new());
    let resolver = Resolver::with_sink(package, source, standard, sink.clone());
    (resolver, sink)
}
