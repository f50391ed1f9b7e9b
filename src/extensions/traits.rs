//! Extension traits, one per hook category

use crate::engine::{
    ActionResult, BatchSummary, ItemPostPublishContext, MappingContext, MigrationItem,
    MigrationStartInfo, PublishedItem, XmlDocument,
};
use crate::hooks::HookResult;
use crate::wrappers::ContentWrapper;

/// Selects which items of one content type continue through the
/// pipeline. Returns the kept items in their original relative order.
pub trait ContentFilter<C: ContentWrapper>: Send + Sync {
    fn filter(&self, items: Vec<MigrationItem<C>>) -> HookResult<Vec<MigrationItem<C>>>;
}

/// Maps an item's destination location. Returns a new context; the
/// input context is consumed, never mutated in place.
pub trait ContentMapping<C: ContentWrapper>: Send + Sync {
    fn map(&self, ctx: MappingContext<C>) -> HookResult<MappingContext<C>>;
}

/// Transforms one content item before publish, in place or by
/// replacement.
pub trait ContentTransformer<C: ContentWrapper>: Send + Sync {
    fn transform(&self, item: C) -> HookResult<C>;
}

/// Two-phase transformer over file-backed XML content.
///
/// `needs_transforming` runs before the host loads the backing document
/// and defaults to `true`; return `false` to skip the load entirely.
pub trait XmlContentTransformer<C: ContentWrapper>: Send + Sync {
    fn needs_transforming(&self, _item: &C) -> bool {
        true
    }

    fn transform(&self, item: &C, document: &mut XmlDocument) -> HookResult<()>;
}

/// Observes all items of one content type after they were published.
pub trait BulkPostPublish<C: ContentWrapper>: Send + Sync {
    fn after_publish(&self, items: &[PublishedItem<C>]) -> HookResult<()>;
}

/// Observes a single published item with its destination counterpart.
pub trait ItemPostPublish<C: ContentWrapper>: Send + Sync {
    fn after_item_publish(&self, ctx: &ItemPostPublishContext<C>) -> HookResult<()>;
}

/// Observes the outcome of a migration action.
pub trait ActionCompleted: Send + Sync {
    fn on_action_completed(&self, result: &ActionResult) -> HookResult<()>;
}

/// Observes each completed batch.
pub trait BatchCompleted: Send + Sync {
    fn on_batch_completed(&self, summary: &BatchSummary) -> HookResult<()>;
}

/// Observes the start of a migration run, before the first batch.
pub trait InitializeMigration: Send + Sync {
    fn on_migration_start(&self, info: &MigrationStartInfo) -> HookResult<()>;
}
