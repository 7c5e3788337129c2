//! Metadata repair for source-form matches.
//!
//! The source catalog cannot see the standard library, so its records arrive
//! without a structural type, often without a resource type for instances,
//! and without a URL. Each gap is filled here from the other catalogs.

use tracing::debug;

use super::Resolver;
use crate::catalog::{CatalogOrigin, PackageCatalog, SourceCatalog, StandardCatalog};
use crate::types::{DefinitionKind, InstanceUsage, Metadata};

impl<P, S, L> Resolver<P, S, L>
where
    P: PackageCatalog,
    S: SourceCatalog,
    L: StandardCatalog,
{
    /// Fill `sd_type`, `resource_type` and `url` on a source-origin record
    pub(super) fn repair(&self, metadata: Metadata) -> Metadata {
        let sd_type = metadata
            .sd_type
            .clone()
            .or_else(|| self.derive_sd_type(&metadata, CatalogOrigin::Source));
        let resource_type = metadata
            .resource_type
            .clone()
            .or_else(|| self.backfill_resource_type(&metadata));

        let repaired = Metadata {
            sd_type,
            resource_type,
            ..metadata
        };
        self.synthesize_url(repaired)
    }

    /// Resource type of an instance, taken from the type it is an instance of
    fn backfill_resource_type(&self, metadata: &Metadata) -> Option<String> {
        let artifact = self
            .source
            .lookup_all_definitions(&metadata.id, &[DefinitionKind::Instance])
            .into_iter()
            .find(|a| a.id == metadata.id && a.name == metadata.name)?;
        let instance_of = artifact.instance_of?;

        let resource_type = self
            .lookup_metadata(&instance_of, DefinitionKind::STRUCTURE_DEFINITIONS)?
            .sd_type;
        debug!(
            instance = %metadata.id,
            instance_of = %instance_of,
            resource_type = ?resource_type,
            "resource type backfilled"
        );
        resource_type
    }

    /// `<canonical>/<resource_type>/<id>` when no URL is present.
    ///
    /// Inline instances are not addressable and keep no URL. Without a
    /// resource type there is nothing to build a URL from.
    pub(super) fn synthesize_url(&self, metadata: Metadata) -> Metadata {
        let inline = metadata
            .instance_usage
            .is_some_and(InstanceUsage::is_inline);
        if metadata.url.is_some() || inline {
            return metadata;
        }
        let Some(resource_type) = metadata.resource_type.as_deref() else {
            return metadata;
        };

        let url = format!(
            "{}/{}/{}",
            self.package.config().canonical_base(),
            resource_type,
            metadata.id
        );
        Metadata {
            url: Some(url),
            ..metadata
        }
    }
}
