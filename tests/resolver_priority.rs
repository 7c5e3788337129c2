//! Catalog priority, alias handling and fast-path behaviour
//!
//! Run with: cargo test --test resolver_priority

mod common;

use common::*;
use fisher_core::{
    Catalog, DefinitionKind, MemoryStandardCatalog, Metadata, ProjectConfig, RawDefinition,
};
use pretty_assertions::assert_eq;
use serde_json::json;

// =============================================================================
// PRIORITY
// =============================================================================

#[test]
fn test_package_wins_over_standard_for_definition() {
    let package = package().with_definition(
        DefinitionKind::Profile,
        Metadata::new("shared", "Shared").with_url(local_url("Shared")),
        RawDefinition::new(json!({ "from": "package" })),
    );
    let standard = standard().with_definition(
        DefinitionKind::Profile,
        Metadata::new("shared", "Shared").with_url(fhir_url("Shared")),
        RawDefinition::new(json!({ "from": "standard" })),
    );
    let (resolver, _) = build(package, source(), standard);

    let definition = resolver.lookup_definition("Shared", &[]).unwrap();
    assert_eq!(definition.as_json(), &json!({ "from": "package" }));
}

#[test]
fn test_package_wins_over_standard_for_metadata() {
    let package = package().with_metadata(
        DefinitionKind::Profile,
        Metadata::new("shared", "Shared")
            .with_url(local_url("Shared"))
            .with_sd_type("Patient"),
    );
    let standard = standard().with_metadata(
        DefinitionKind::Profile,
        Metadata::new("shared", "Shared")
            .with_url(fhir_url("Shared"))
            .with_sd_type("Patient"),
    );
    let (resolver, _) = build(package, source(), standard);

    let metadata = resolver.lookup_metadata("shared", &[]).unwrap();
    assert_eq!(metadata.url, Some(local_url("Shared")));
}

#[test]
fn test_standard_answers_when_nobody_else_does() {
    let (resolver, _) = build(package(), source(), standard());

    let metadata = resolver.lookup_metadata("Observation", &[]).unwrap();
    assert_eq!(metadata, standard_resource("Observation"));
    assert!(resolver.lookup_definition("Observation", &[]).is_some());
}

#[test]
fn test_unknown_identifier_is_silently_absent() {
    let (resolver, sink) = build(package(), source(), standard());

    assert!(resolver.lookup_definition("Nope", &[]).is_none());
    assert!(resolver.lookup_metadata("Nope", &[]).is_none());
    assert!(resolver.lookup_all_metadata("Nope", &[]).is_empty());
    assert!(sink.diagnostics().is_empty());
}

#[test]
fn test_kind_filter_is_passed_to_catalogs() {
    let (resolver, _) = build(package(), source(), standard());

    assert!(resolver
        .lookup_metadata("Patient", &[DefinitionKind::Resource])
        .is_some());
    assert!(resolver
        .lookup_metadata("Patient", &[DefinitionKind::ValueSet])
        .is_none());
}

// =============================================================================
// UNEXPORTED SOURCE DEFINITIONS
// =============================================================================

#[test]
fn test_source_only_definition_does_not_fall_through_to_standard() {
    let source = source().with_metadata(
        DefinitionKind::Profile,
        source_profile("Observation", "Observation"),
    );
    let (resolver, _) = build(package(), source, standard());

    assert!(resolver.lookup_definition("Observation", &[]).is_none());
}

#[test]
fn test_exported_definition_is_returned_even_when_also_in_source() {
    let package = package().with_definition(
        DefinitionKind::Profile,
        source_profile("MyPatient", "Patient").with_sd_type("Patient"),
        RawDefinition::new(json!({ "id": "MyPatient" })),
    );
    let source = source().with_metadata(
        DefinitionKind::Profile,
        source_profile("MyPatient", "Patient"),
    );
    let (resolver, _) = build(package, source, standard());

    let definition = resolver.lookup_definition("MyPatient", &[]).unwrap();
    assert_eq!(definition.as_json(), &json!({ "id": "MyPatient" }));
}

// =============================================================================
// ALIASES
// =============================================================================

#[test]
fn test_alias_resolution_is_idempotent() {
    let source = source().with_alias("$pat", fhir_url("Patient"));
    let (resolver, _) = build(package(), source, standard());

    let once = resolver.resolve_alias("$pat");
    let twice = resolver.resolve_alias(&once);
    assert_eq!(once, fhir_url("Patient"));
    assert_eq!(twice, once);
    assert_eq!(resolver.resolve_alias("Patient"), "Patient");
}

#[test]
fn test_lookups_resolve_aliases_first() {
    let source = source().with_alias("$obs", fhir_url("Observation"));
    let (resolver, _) = build(package(), source, standard());

    assert_eq!(
        resolver.lookup_metadata("$obs", &[]),
        Some(standard_resource("Observation"))
    );
    assert!(resolver.lookup_definition("$obs", &[]).is_some());
    assert_eq!(resolver.lookup_all_metadata("$obs", &[]).len(), 1);
}

// =============================================================================
// FAST PATH
// =============================================================================

#[test]
fn test_fast_path_is_consulted_before_package() {
    let predefined = Metadata::new("Bundle", "Bundle")
        .with_url(fhir_url("Bundle"))
        .with_sd_type("Bundle");
    let standard = standard().with_predefined(
        DefinitionKind::Resource,
        predefined.clone(),
        RawDefinition::new(json!({ "from": "predefined" })),
    );
    let package = package().with_definition(
        DefinitionKind::Profile,
        Metadata::new("Bundle", "Bundle").with_url(local_url("Bundle")),
        RawDefinition::new(json!({ "from": "package" })),
    );
    let (resolver, _) = build(package, source(), standard);

    let definition = resolver.lookup_definition("Bundle", &[]).unwrap();
    assert_eq!(definition.as_json(), &json!({ "from": "predefined" }));
    assert_eq!(resolver.lookup_metadata("Bundle", &[]), Some(predefined));
}

// =============================================================================
// CONSTRUCTION
// =============================================================================

#[test]
fn test_default_version_prefers_standard_catalog() {
    let source = fisher_core::MemorySourceCatalog::new(
        ProjectConfig::new("demo", CANONICAL).with_fhir_version("5.0.0"),
    );
    let (resolver, _) = build(package(), source, standard());
    assert_eq!(resolver.default_version(), Some("4.0.1"));
}

#[test]
fn test_default_version_falls_back_to_source_config() {
    let source = fisher_core::MemorySourceCatalog::new(
        ProjectConfig::new("demo", CANONICAL).with_fhir_version("5.0.0"),
    );
    let (resolver, _) = build(package(), source, MemoryStandardCatalog::new());
    assert_eq!(resolver.default_version(), Some("5.0.0"));
}

#[test]
fn test_default_version_absent_everywhere() {
    let source =
        fisher_core::MemorySourceCatalog::new(ProjectConfig::new("demo", CANONICAL));
    let (resolver, _) = build(package(), source, MemoryStandardCatalog::new());
    assert_eq!(resolver.default_version(), None);
}

#[test]
fn test_resolver_is_itself_a_catalog() {
    fn names<C: Catalog>(catalog: &C, item: &str) -> Vec<String> {
        catalog
            .lookup_all_metadata(item, &[])
            .into_iter()
            .map(|m| m.name)
            .collect()
    }

    let (resolver, _) = build(package(), source(), standard());
    assert_eq!(names(&resolver, "Patient"), vec!["Patient".to_string()]);
    assert!(Catalog::lookup_metadata(&resolver, "Patient", &[]).is_some());
}

#[test]
fn test_resolver_is_send_and_sync_with_memory_catalogs() {
    fn assert_send_sync<T: Send + Sync>() {}
    assert_send_sync::<TestResolver>();
}
