//! Structural type derivation by walking `parent` references.
//!
//! The walk is a loop over an explicit history so the full chain is
//! available when a cycle has to be reported.

use tracing::trace;

use super::Resolver;
use crate::catalog::{CatalogOrigin, PackageCatalog, SourceCatalog, StandardCatalog, Tagged};
use crate::diagnostics::{circular_parent_error, prefer_canonical_fix, RelatedInfo, SourceSpan};
use crate::types::{DefinitionKind, Metadata};

impl<P, S, L> Resolver<P, S, L>
where
    P: PackageCatalog,
    S: SourceCatalog,
    L: StandardCatalog,
{
    /// Follow parents until one carries a known `sd_type`.
    ///
    /// Returns `None` when a parent cannot be found or the chain loops; only
    /// the loop is reported.
    pub(super) fn derive_sd_type(&self, start: &Metadata, origin: CatalogOrigin) -> Option<String> {
        let mut history = vec![Tagged::new(origin, start.clone())];
        let mut sd_type = start.sd_type.clone();
        let mut parent = start.parent.clone();

        while sd_type.is_none() {
            let Some(parent_ref) = parent.take() else {
                break;
            };
            let parent_ref = self.resolve_alias(&parent_ref);

            let Some(found) = self.find_parent(&parent_ref) else {
                trace!(parent = %parent_ref, "parent not found, type unknown");
                return None;
            };
            trace!(parent = %parent_ref, origin = %found.origin, "parent matched");

            let key = found.value.chain_key();
            if history.iter().any(|h| h.value.chain_key() == key) {
                self.report_cycle(&history, &found.value, &parent_ref);
                return None;
            }

            sd_type = found.value.sd_type.clone();
            parent = found.value.parent.clone();
            history.push(found);
        }

        sd_type
    }

    /// First catalog in priority order that knows the parent
    fn find_parent(&self, parent_ref: &str) -> Option<Tagged<Metadata>> {
        self.first_metadata(parent_ref, DefinitionKind::STRUCTURE_DEFINITIONS)
    }

    fn report_cycle(&self, history: &[Tagged<Metadata>], repeated: &Metadata, parent_ref: &str) {
        let chain: Vec<String> = history
            .iter()
            .map(|h| display_name(&h.value))
            .chain(std::iter::once(display_name(repeated)))
            .collect();
        let mut diagnostic = circular_parent_error(&chain);

        let standard_url = self
            .standard
            .lookup_metadata(parent_ref, DefinitionKind::STRUCTURE_DEFINITIONS)
            .filter(|m| m.name == parent_ref || m.id == parent_ref)
            .and_then(|m| m.url);
        if let Some(url) = standard_url {
            diagnostic = diagnostic.with_fix(prefer_canonical_fix(parent_ref, &url));
        }

        // Primary location is the first definition; the rest of the source
        // chain is attached as related locations.
        for (position, entry) in history.iter().enumerate() {
            if entry.origin != CatalogOrigin::Source {
                continue;
            }
            let Some(span) = self.source_location(&entry.value) else {
                continue;
            };
            if position == 0 {
                diagnostic = diagnostic.with_span(span);
            } else {
                diagnostic = diagnostic.with_related(RelatedInfo {
                    message: format!("{} is defined here", display_name(&entry.value)),
                    span,
                });
            }
        }

        self.sink.emit(diagnostic);
    }

    /// Where the source artifact behind `metadata` was written
    fn source_location(&self, metadata: &Metadata) -> Option<SourceSpan> {
        self.source
            .lookup_all_definitions(&metadata.id, &[])
            .into_iter()
            .find(|a| a.id == metadata.id && a.name == metadata.name)
            .and_then(|a| a.location)
    }
}

fn display_name(metadata: &Metadata) -> String {
    if metadata.name.is_empty() {
        metadata.id.clone()
    } else {
        metadata.name.clone()
    }
}
