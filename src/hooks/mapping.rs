//! Mapping adapters
//!
//! The mapping adapter bridges a `ContentMapping<C>` extension to the
//! host's async `MappingHook<C::Host>` shape. User mapping code is
//! synchronous; the async entry point completes as soon as it returns.
//! The cloud-username variant wraps the same machinery and additionally
//! carries the marker interface the host distinguishes it by.

use super::traits::{CloudUsernameMarker, HookResult, MappingHook};
use crate::engine::{CancellationToken, MappingContext};
use crate::extensions::{ContentMapping, TransformFn};
use crate::services::ScopedServices;
use crate::wrappers::{ContentWrapper, UserContent};
use async_trait::async_trait;

pub(crate) type MappingFn<C> = TransformFn<MappingContext<C>, MappingContext<C>>;

enum MappingSource<C: ContentWrapper> {
    Instance(Box<dyn ContentMapping<C>>),
    Callback(MappingFn<C>),
}

pub struct MappingAdapter<C: ContentWrapper> {
    source: MappingSource<C>,
    services: ScopedServices,
}

impl<C: ContentWrapper> MappingAdapter<C> {
    pub(crate) fn from_instance(
        extension: impl ContentMapping<C> + 'static,
        services: ScopedServices,
    ) -> Self {
        Self {
            source: MappingSource::Instance(Box::new(extension)),
            services,
        }
    }

    pub(crate) fn from_callback(callback: MappingFn<C>, services: ScopedServices) -> Self {
        Self {
            source: MappingSource::Callback(callback),
            services,
        }
    }

    fn run(&self, ctx: MappingContext<C::Host>) -> HookResult<MappingContext<C::Host>> {
        let wrapped = ctx.map_item(C::wrap);
        let mapped = match &self.source {
            MappingSource::Instance(mapping) => mapping.map(wrapped)?,
            MappingSource::Callback(callback) => callback(wrapped, &self.services)?,
        };
        Ok(mapped.map_item(C::into_host))
    }
}

#[async_trait]
impl<C: ContentWrapper> MappingHook<C::Host> for MappingAdapter<C> {
    async fn execute(
        &self,
        ctx: MappingContext<C::Host>,
        _cancel: &CancellationToken,
    ) -> HookResult<MappingContext<C::Host>> {
        // User code is synchronous; the future resolves immediately.
        self.run(ctx)
    }
}

/// Mapping adapter for the fixed "user" content type, distinguishable by
/// the host through [`CloudUsernameMarker`].
pub struct CloudUsernameAdapter<C: UserContent> {
    inner: MappingAdapter<C>,
}

impl<C: UserContent> CloudUsernameAdapter<C> {
    pub(crate) fn from_instance(
        extension: impl ContentMapping<C> + 'static,
        services: ScopedServices,
    ) -> Self {
        Self {
            inner: MappingAdapter::from_instance(extension, services),
        }
    }

    pub(crate) fn from_callback(callback: MappingFn<C>, services: ScopedServices) -> Self {
        Self {
            inner: MappingAdapter::from_callback(callback, services),
        }
    }
}

#[async_trait]
impl<C: UserContent> MappingHook<C::Host> for CloudUsernameAdapter<C> {
    async fn execute(
        &self,
        ctx: MappingContext<C::Host>,
        _cancel: &CancellationToken,
    ) -> HookResult<MappingContext<C::Host>> {
        self.inner.run(ctx)
    }
}

impl<C: UserContent> CloudUsernameMarker for CloudUsernameAdapter<C> {}
