//! Transformer adapter (plain, single-phase)
//!
//! Bridges a `ContentTransformer<C>` extension to the host's async
//! `TransformerHook<C::Host>` shape. For the two-phase XML variant see
//! [`xml`](super::xml).

use super::traits::{HookResult, TransformerHook};
use crate::engine::CancellationToken;
use crate::extensions::{ContentTransformer, TransformFn};
use crate::services::ScopedServices;
use crate::wrappers::ContentWrapper;
use async_trait::async_trait;

pub(crate) type TransformerFn<C> = TransformFn<C, C>;

enum TransformerSource<C: ContentWrapper> {
    Instance(Box<dyn ContentTransformer<C>>),
    Callback(TransformerFn<C>),
}

pub struct TransformerAdapter<C: ContentWrapper> {
    source: TransformerSource<C>,
    services: ScopedServices,
}

impl<C: ContentWrapper> TransformerAdapter<C> {
    pub(crate) fn from_instance(
        extension: impl ContentTransformer<C> + 'static,
        services: ScopedServices,
    ) -> Self {
        Self {
            source: TransformerSource::Instance(Box::new(extension)),
            services,
        }
    }

    pub(crate) fn from_callback(callback: TransformerFn<C>, services: ScopedServices) -> Self {
        Self {
            source: TransformerSource::Callback(callback),
            services,
        }
    }
}

#[async_trait]
impl<C: ContentWrapper> TransformerHook<C::Host> for TransformerAdapter<C> {
    async fn execute(&self, item: C::Host, _cancel: &CancellationToken) -> HookResult<C::Host> {
        let wrapped = C::wrap(item);
        let transformed = match &self.source {
            TransformerSource::Instance(transformer) => transformer.transform(wrapped)?,
            TransformerSource::Callback(callback) => callback(wrapped, &self.services)?,
        };
        Ok(transformed.into_host())
    }
}
