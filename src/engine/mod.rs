//! Host engine surface
//!
//! The migration engine itself is an external collaborator. This module
//! defines the data model and traits the adapter layer consumes from it:
//! content references, migration items, the manifest and plan handles,
//! the per-scope service lookup primitive, cancellation, reference
//! finders, and the XML document model for two-phase transformers.

mod cancel;
mod content;
mod manifest;
mod plan;
mod reference;
mod scope;
mod xml;

pub use cancel::CancellationToken;
pub use content::{
    ContentLocation, ContentReference, ItemPostPublishContext, MappingContext, MigrationItem,
    PublishedItem,
};
pub use manifest::{ManifestEntry, MigrationManifest, MigrationStatus};
pub use plan::{ActionResult, BatchSummary, MigrationPlan, MigrationStartInfo};
pub use reference::{
    DestinationFinderFactory, ReferenceFinder, ReferenceFinderFactory, SourceFinderFactory,
};
pub use scope::{ServiceMap, ServiceScope};
pub use xml::{XmlDocument, XmlElement};
