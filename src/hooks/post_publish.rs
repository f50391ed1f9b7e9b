//! Post-publish adapters
//!
//! Fire-and-observe hooks invoked after items reach the destination.
//! Bulk sees the whole published batch for a content type; per-item sees
//! one (published, destination, manifest entry) triple at a time. The
//! host ignores return values beyond the error check.

use super::traits::{BulkPostPublishHook, HookResult, ItemPostPublishHook};
use crate::engine::{ItemPostPublishContext, PublishedItem};
use crate::extensions::{BulkPostPublish, ItemPostPublish, ObserverFn};
use crate::services::ScopedServices;
use crate::wrappers::ContentWrapper;

pub(crate) type BulkPostPublishFn<C> = ObserverFn<[PublishedItem<C>]>;
pub(crate) type ItemPostPublishFn<C> = ObserverFn<ItemPostPublishContext<C>>;

enum BulkSource<C: ContentWrapper> {
    Instance(Box<dyn BulkPostPublish<C>>),
    Callback(BulkPostPublishFn<C>),
}

pub struct BulkPostPublishAdapter<C: ContentWrapper> {
    source: BulkSource<C>,
    services: ScopedServices,
}

impl<C: ContentWrapper> BulkPostPublishAdapter<C> {
    pub(crate) fn from_instance(
        extension: impl BulkPostPublish<C> + 'static,
        services: ScopedServices,
    ) -> Self {
        Self {
            source: BulkSource::Instance(Box::new(extension)),
            services,
        }
    }

    pub(crate) fn from_callback(callback: BulkPostPublishFn<C>, services: ScopedServices) -> Self {
        Self {
            source: BulkSource::Callback(callback),
            services,
        }
    }
}

impl<C: ContentWrapper> BulkPostPublishHook<C::Host> for BulkPostPublishAdapter<C> {
    fn execute(&self, items: &[PublishedItem<C::Host>]) -> HookResult<()> {
        let wrapped: Vec<PublishedItem<C>> = items
            .iter()
            .map(|item| item.clone().map(C::wrap))
            .collect();
        match &self.source {
            BulkSource::Instance(hook) => hook.after_publish(&wrapped),
            BulkSource::Callback(callback) => callback(&wrapped, &self.services),
        }
    }
}

enum ItemSource<C: ContentWrapper> {
    Instance(Box<dyn ItemPostPublish<C>>),
    Callback(ItemPostPublishFn<C>),
}

pub struct ItemPostPublishAdapter<C: ContentWrapper> {
    source: ItemSource<C>,
    services: ScopedServices,
}

impl<C: ContentWrapper> ItemPostPublishAdapter<C> {
    pub(crate) fn from_instance(
        extension: impl ItemPostPublish<C> + 'static,
        services: ScopedServices,
    ) -> Self {
        Self {
            source: ItemSource::Instance(Box::new(extension)),
            services,
        }
    }

    pub(crate) fn from_callback(callback: ItemPostPublishFn<C>, services: ScopedServices) -> Self {
        Self {
            source: ItemSource::Callback(callback),
            services,
        }
    }
}

impl<C: ContentWrapper> ItemPostPublishHook<C::Host> for ItemPostPublishAdapter<C> {
    fn execute(&self, ctx: &ItemPostPublishContext<C::Host>) -> HookResult<()> {
        let wrapped = ctx.clone().map(C::wrap);
        match &self.source {
            ItemSource::Instance(hook) => hook.after_item_publish(&wrapped),
            ItemSource::Callback(callback) => callback(&wrapped, &self.services),
        }
    }
}
