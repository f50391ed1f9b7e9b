//! Reference finders
//!
//! Hosts expose finder factories that map a source-side reference to its
//! counterpart on either endpoint. The adapter layer resolves a finder by
//! host content type and delegates; it never caches finders across scopes.

use super::content::ContentReference;
use std::any::TypeId;
use std::sync::Arc;

/// Looks up the counterpart of a content reference on one endpoint.
pub trait ReferenceFinder: Send + Sync {
    fn find(&self, reference: &ContentReference) -> Option<ContentReference>;
}

/// Resolves a finder for a host content type. `None` means the host has
/// no finder for that type on this endpoint.
pub trait ReferenceFinderFactory: Send + Sync {
    fn finder_for(&self, host_type: TypeId) -> Option<Arc<dyn ReferenceFinder>>;
}

/// Scope-service key for the source-endpoint finder factory.
pub struct SourceFinderFactory(pub Arc<dyn ReferenceFinderFactory>);

/// Scope-service key for the destination-endpoint finder factory.
pub struct DestinationFinderFactory(pub Arc<dyn ReferenceFinderFactory>);
