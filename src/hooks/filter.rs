//! Filter adapter
//!
//! Bridges a `ContentFilter<C>` extension (or callback) to the host's
//! `FilterHook<C::Host>` shape: host items are wrapped on the way in,
//! kept items unwrapped on the way out, original relative order
//! preserved by the extension contract.

use super::traits::{FilterHook, HookResult};
use crate::engine::MigrationItem;
use crate::extensions::{ContentFilter, TransformFn};
use crate::services::ScopedServices;
use crate::wrappers::ContentWrapper;

pub(crate) type FilterFn<C> = TransformFn<Vec<MigrationItem<C>>, Vec<MigrationItem<C>>>;

enum FilterSource<C: ContentWrapper> {
    Instance(Box<dyn ContentFilter<C>>),
    Callback(FilterFn<C>),
}

pub struct FilterAdapter<C: ContentWrapper> {
    source: FilterSource<C>,
    services: ScopedServices,
}

impl<C: ContentWrapper> FilterAdapter<C> {
    pub(crate) fn from_instance(
        extension: impl ContentFilter<C> + 'static,
        services: ScopedServices,
    ) -> Self {
        Self {
            source: FilterSource::Instance(Box::new(extension)),
            services,
        }
    }

    pub(crate) fn from_callback(callback: FilterFn<C>, services: ScopedServices) -> Self {
        Self {
            source: FilterSource::Callback(callback),
            services,
        }
    }
}

impl<C: ContentWrapper> FilterHook<C::Host> for FilterAdapter<C> {
    fn execute(
        &self,
        items: Vec<MigrationItem<C::Host>>,
    ) -> HookResult<Vec<MigrationItem<C::Host>>> {
        let wrapped: Vec<MigrationItem<C>> =
            items.into_iter().map(|item| item.map(C::wrap)).collect();
        let kept = match &self.source {
            FilterSource::Instance(filter) => filter.filter(wrapped)?,
            FilterSource::Callback(callback) => callback(wrapped, &self.services)?,
        };
        Ok(kept.into_iter().map(|item| item.map(C::into_host)).collect())
    }
}
