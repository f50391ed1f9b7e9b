//! Hook adapter layer
//!
//! Registration flows in one direction: user code registers extensions
//! on a builder, the builder synthesizes per-scope adapter factories,
//! `build()` hands the host an immutable collection, and the host
//! creates one adapter per scope and invokes it through the interface it
//! queried for. Adapters wrap host payloads into extension wrappers on
//! the way in and unwrap results on the way out.

mod builders;
mod collection;
mod filter;
mod lifecycle;
mod mapping;
mod post_publish;
mod traits;
mod transformer;
mod types;
mod xml;

#[cfg(test)]
mod tests;

pub use builders::{
    FilterBuilder, LifecycleBuilder, MappingBuilder, PostPublishBuilder, TransformerBuilder,
};
pub use collection::{HookFactory, HookFactoryCollection};
pub use filter::FilterAdapter;
pub use lifecycle::{ActionCompletedAdapter, BatchCompletedAdapter, InitializeMigrationAdapter};
pub use mapping::{CloudUsernameAdapter, MappingAdapter};
pub use post_publish::{BulkPostPublishAdapter, ItemPostPublishAdapter};
pub use traits::{
    ActionCompletedHook, BatchCompletedHook, BoxedActionCompletedHook, BoxedBatchCompletedHook,
    BoxedBulkPostPublishHook, BoxedFilterHook, BoxedInitializeMigrationHook,
    BoxedItemPostPublishHook, BoxedMappingHook, BoxedTransformerHook, BoxedXmlTransformerHook,
    BulkPostPublishHook, CloudUsernameMarker, FilterHook, HookError, HookResult,
    InitializeMigrationHook, ItemPostPublishHook, MappingHook, TransformerHook,
    XmlTransformerHook,
};
pub use transformer::TransformerAdapter;
pub use types::{HookKind, InterfaceId};
pub use xml::{run_xml_transform, DocumentStore, XmlPhase, XmlTransformerAdapter};
