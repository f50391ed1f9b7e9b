//! Hook builders — the registration surface
//!
//! One builder per hook category. A builder accumulates registrations in
//! order; `build()` returns an immutable snapshot, so later mutation of
//! the builder never leaks into collections already handed to the host.
//! Class-based, explicit-factory, and callback registrations all land in
//! the same factory form.

use super::collection::{HookFactory, HookFactoryCollection};
use super::filter::FilterAdapter;
use super::lifecycle::{
    ActionCompletedAdapter, BatchCompletedAdapter, InitializeMigrationAdapter,
};
use super::mapping::{CloudUsernameAdapter, MappingAdapter};
use super::post_publish::{BulkPostPublishAdapter, ItemPostPublishAdapter};
use super::traits::{
    BoxedActionCompletedHook, BoxedBatchCompletedHook, BoxedBulkPostPublishHook,
    BoxedFilterHook, BoxedInitializeMigrationHook, BoxedItemPostPublishHook, BoxedMappingHook,
    BoxedTransformerHook, BoxedXmlTransformerHook,
};
use super::transformer::TransformerAdapter;
use super::types::InterfaceId;
use super::xml::XmlTransformerAdapter;
use crate::engine::{
    ActionResult, BatchSummary, ItemPostPublishContext, MappingContext, MigrationItem,
    MigrationStartInfo, PublishedItem,
};
use crate::extensions::{
    ActionCompleted, BatchCompleted, BulkPostPublish, ContentFilter, ContentMapping,
    ContentTransformer, FromServices, InitializeMigration, IntoObserverFn, IntoTransformFn,
    IntoXmlTransformFn, ItemPostPublish, XmlContentTransformer,
};
use crate::services::ScopedServices;
use crate::wrappers::{ContentWrapper, UserContent, WrapperRegistry};
use std::collections::BTreeMap;
use std::sync::Arc;
use tracing::debug;

/// Ordered registration list shared by every builder.
struct Registrations {
    wrappers: Arc<WrapperRegistry>,
    entries: Vec<HookFactory>,
}

impl Registrations {
    fn new(wrappers: Arc<WrapperRegistry>) -> Self {
        Self {
            wrappers,
            entries: Vec::new(),
        }
    }

    fn push<T: Send + Sync + 'static>(
        &mut self,
        interface: InterfaceId,
        make: impl Fn(ScopedServices) -> T + Send + Sync + 'static,
    ) {
        self.entries
            .push(HookFactory::new(interface, self.wrappers.clone(), make));
    }

    fn clear(&mut self) {
        self.entries.clear();
    }

    fn by_content_type(&self) -> BTreeMap<&'static str, Vec<HookFactory>> {
        let mut grouped: BTreeMap<&'static str, Vec<HookFactory>> = BTreeMap::new();
        for factory in &self.entries {
            if let Some(name) = factory.interface().content_name() {
                grouped.entry(name).or_default().push(factory.clone());
            }
        }
        grouped
    }

    fn build(&self, category: &'static str) -> HookFactoryCollection {
        debug!(category, registrations = self.entries.len(), "built hook collection");
        HookFactoryCollection::from_registrations(&self.entries)
    }
}

/// Builder for filter hooks.
pub struct FilterBuilder {
    inner: Registrations,
}

impl FilterBuilder {
    pub fn new(wrappers: Arc<WrapperRegistry>) -> Self {
        Self {
            inner: Registrations::new(wrappers),
        }
    }

    /// Register a filter type; the per-scope factory constructs it with
    /// [`FromServices`].
    pub fn add<C, E>(&mut self) -> &mut Self
    where
        C: ContentWrapper,
        E: ContentFilter<C> + FromServices + 'static,
    {
        self.inner.push(
            InterfaceId::filter::<C>(),
            |services: ScopedServices| -> BoxedFilterHook<C::Host> {
                let extension = E::from_services(&services);
                Box::new(FilterAdapter::<C>::from_instance(extension, services))
            },
        );
        self
    }

    /// Register a filter type with an explicit per-scope factory.
    pub fn add_with<C, E>(
        &mut self,
        factory: impl Fn(&ScopedServices) -> E + Send + Sync + 'static,
    ) -> &mut Self
    where
        C: ContentWrapper,
        E: ContentFilter<C> + 'static,
    {
        self.inner.push(
            InterfaceId::filter::<C>(),
            move |services: ScopedServices| -> BoxedFilterHook<C::Host> {
                let extension = factory(&services);
                Box::new(FilterAdapter::<C>::from_instance(extension, services))
            },
        );
        self
    }

    /// Register a plain callback. One-argument callbacks receive the
    /// item list; two-argument callbacks additionally receive the scoped
    /// services.
    pub fn add_fn<C, M>(
        &mut self,
        callback: impl IntoTransformFn<Vec<MigrationItem<C>>, Vec<MigrationItem<C>>, M>,
    ) -> &mut Self
    where
        C: ContentWrapper,
    {
        let callback = callback.into_transform_fn();
        self.inner.push(
            InterfaceId::filter::<C>(),
            move |services: ScopedServices| -> BoxedFilterHook<C::Host> {
                Box::new(FilterAdapter::<C>::from_callback(callback.clone(), services))
            },
        );
        self
    }

    pub fn clear(&mut self) -> &mut Self {
        self.inner.clear();
        self
    }

    /// Registrations grouped by content type name, for host-side
    /// batch grouping.
    pub fn by_content_type(&self) -> BTreeMap<&'static str, Vec<HookFactory>> {
        self.inner.by_content_type()
    }

    pub fn build(&self) -> HookFactoryCollection {
        self.inner.build("filter")
    }
}

/// Builder for mapping hooks, including the cloud-username variant.
pub struct MappingBuilder {
    inner: Registrations,
}

impl MappingBuilder {
    pub fn new(wrappers: Arc<WrapperRegistry>) -> Self {
        Self {
            inner: Registrations::new(wrappers),
        }
    }

    pub fn add<C, E>(&mut self) -> &mut Self
    where
        C: ContentWrapper,
        E: ContentMapping<C> + FromServices + 'static,
    {
        self.inner.push(
            InterfaceId::mapping::<C>(),
            |services: ScopedServices| -> BoxedMappingHook<C::Host> {
                let extension = E::from_services(&services);
                Box::new(MappingAdapter::<C>::from_instance(extension, services))
            },
        );
        self
    }

    pub fn add_with<C, E>(
        &mut self,
        factory: impl Fn(&ScopedServices) -> E + Send + Sync + 'static,
    ) -> &mut Self
    where
        C: ContentWrapper,
        E: ContentMapping<C> + 'static,
    {
        self.inner.push(
            InterfaceId::mapping::<C>(),
            move |services: ScopedServices| -> BoxedMappingHook<C::Host> {
                let extension = factory(&services);
                Box::new(MappingAdapter::<C>::from_instance(extension, services))
            },
        );
        self
    }

    pub fn add_fn<C, M>(
        &mut self,
        callback: impl IntoTransformFn<MappingContext<C>, MappingContext<C>, M>,
    ) -> &mut Self
    where
        C: ContentWrapper,
    {
        let callback = callback.into_transform_fn();
        self.inner.push(
            InterfaceId::mapping::<C>(),
            move |services: ScopedServices| -> BoxedMappingHook<C::Host> {
                Box::new(MappingAdapter::<C>::from_callback(callback.clone(), services))
            },
        );
        self
    }

    /// Register a cloud-username mapping. The adapter is registered
    /// under its own interface and carries the marker the host
    /// distinguishes it by; the content type must be the site user.
    pub fn add_cloud_username<C, E>(&mut self) -> &mut Self
    where
        C: UserContent,
        E: ContentMapping<C> + FromServices + 'static,
    {
        self.inner.push(
            InterfaceId::cloud_username_mapping::<C>(),
            |services: ScopedServices| -> BoxedMappingHook<C::Host> {
                let extension = E::from_services(&services);
                Box::new(CloudUsernameAdapter::<C>::from_instance(extension, services))
            },
        );
        self
    }

    pub fn add_cloud_username_with<C, E>(
        &mut self,
        factory: impl Fn(&ScopedServices) -> E + Send + Sync + 'static,
    ) -> &mut Self
    where
        C: UserContent,
        E: ContentMapping<C> + 'static,
    {
        self.inner.push(
            InterfaceId::cloud_username_mapping::<C>(),
            move |services: ScopedServices| -> BoxedMappingHook<C::Host> {
                let extension = factory(&services);
                Box::new(CloudUsernameAdapter::<C>::from_instance(extension, services))
            },
        );
        self
    }

    pub fn add_cloud_username_fn<C, M>(
        &mut self,
        callback: impl IntoTransformFn<MappingContext<C>, MappingContext<C>, M>,
    ) -> &mut Self
    where
        C: UserContent,
    {
        let callback = callback.into_transform_fn();
        self.inner.push(
            InterfaceId::cloud_username_mapping::<C>(),
            move |services: ScopedServices| -> BoxedMappingHook<C::Host> {
                Box::new(CloudUsernameAdapter::<C>::from_callback(
                    callback.clone(),
                    services,
                ))
            },
        );
        self
    }

    pub fn clear(&mut self) -> &mut Self {
        self.inner.clear();
        self
    }

    pub fn by_content_type(&self) -> BTreeMap<&'static str, Vec<HookFactory>> {
        self.inner.by_content_type()
    }

    pub fn build(&self) -> HookFactoryCollection {
        self.inner.build("mapping")
    }
}

/// Builder for transformer hooks, plain and two-phase XML.
pub struct TransformerBuilder {
    inner: Registrations,
}

impl TransformerBuilder {
    pub fn new(wrappers: Arc<WrapperRegistry>) -> Self {
        Self {
            inner: Registrations::new(wrappers),
        }
    }

    pub fn add<C, E>(&mut self) -> &mut Self
    where
        C: ContentWrapper,
        E: ContentTransformer<C> + FromServices + 'static,
    {
        self.inner.push(
            InterfaceId::transformer::<C>(),
            |services: ScopedServices| -> BoxedTransformerHook<C::Host> {
                let extension = E::from_services(&services);
                Box::new(TransformerAdapter::<C>::from_instance(extension, services))
            },
        );
        self
    }

    pub fn add_with<C, E>(
        &mut self,
        factory: impl Fn(&ScopedServices) -> E + Send + Sync + 'static,
    ) -> &mut Self
    where
        C: ContentWrapper,
        E: ContentTransformer<C> + 'static,
    {
        self.inner.push(
            InterfaceId::transformer::<C>(),
            move |services: ScopedServices| -> BoxedTransformerHook<C::Host> {
                let extension = factory(&services);
                Box::new(TransformerAdapter::<C>::from_instance(extension, services))
            },
        );
        self
    }

    pub fn add_fn<C, M>(&mut self, callback: impl IntoTransformFn<C, C, M>) -> &mut Self
    where
        C: ContentWrapper,
    {
        let callback = callback.into_transform_fn();
        self.inner.push(
            InterfaceId::transformer::<C>(),
            move |services: ScopedServices| -> BoxedTransformerHook<C::Host> {
                Box::new(TransformerAdapter::<C>::from_callback(
                    callback.clone(),
                    services,
                ))
            },
        );
        self
    }

    /// Register a two-phase XML transformer type instead of a plain one.
    pub fn add_xml<C, E>(&mut self) -> &mut Self
    where
        C: ContentWrapper,
        E: XmlContentTransformer<C> + FromServices + 'static,
    {
        self.inner.push(
            InterfaceId::xml_transformer::<C>(),
            |services: ScopedServices| -> BoxedXmlTransformerHook<C::Host> {
                let extension = E::from_services(&services);
                Box::new(XmlTransformerAdapter::<C>::from_instance(extension, services))
            },
        );
        self
    }

    pub fn add_xml_with<C, E>(
        &mut self,
        factory: impl Fn(&ScopedServices) -> E + Send + Sync + 'static,
    ) -> &mut Self
    where
        C: ContentWrapper,
        E: XmlContentTransformer<C> + 'static,
    {
        self.inner.push(
            InterfaceId::xml_transformer::<C>(),
            move |services: ScopedServices| -> BoxedXmlTransformerHook<C::Host> {
                let extension = factory(&services);
                Box::new(XmlTransformerAdapter::<C>::from_instance(extension, services))
            },
        );
        self
    }

    /// Register an XML transform callback. Callback registrations have
    /// no probe phase and always transform.
    pub fn add_xml_fn<C, M>(&mut self, callback: impl IntoXmlTransformFn<C, M>) -> &mut Self
    where
        C: ContentWrapper,
    {
        let callback = callback.into_xml_transform_fn();
        self.inner.push(
            InterfaceId::xml_transformer::<C>(),
            move |services: ScopedServices| -> BoxedXmlTransformerHook<C::Host> {
                Box::new(XmlTransformerAdapter::<C>::from_callback(
                    callback.clone(),
                    services,
                ))
            },
        );
        self
    }

    pub fn clear(&mut self) -> &mut Self {
        self.inner.clear();
        self
    }

    pub fn by_content_type(&self) -> BTreeMap<&'static str, Vec<HookFactory>> {
        self.inner.by_content_type()
    }

    pub fn build(&self) -> HookFactoryCollection {
        self.inner.build("transformer")
    }
}

/// Builder for bulk and per-item post-publish hooks.
pub struct PostPublishBuilder {
    inner: Registrations,
}

impl PostPublishBuilder {
    pub fn new(wrappers: Arc<WrapperRegistry>) -> Self {
        Self {
            inner: Registrations::new(wrappers),
        }
    }

    pub fn add_bulk<C, E>(&mut self) -> &mut Self
    where
        C: ContentWrapper,
        E: BulkPostPublish<C> + FromServices + 'static,
    {
        self.inner.push(
            InterfaceId::bulk_post_publish::<C>(),
            |services: ScopedServices| -> BoxedBulkPostPublishHook<C::Host> {
                let extension = E::from_services(&services);
                Box::new(BulkPostPublishAdapter::<C>::from_instance(extension, services))
            },
        );
        self
    }

    pub fn add_bulk_with<C, E>(
        &mut self,
        factory: impl Fn(&ScopedServices) -> E + Send + Sync + 'static,
    ) -> &mut Self
    where
        C: ContentWrapper,
        E: BulkPostPublish<C> + 'static,
    {
        self.inner.push(
            InterfaceId::bulk_post_publish::<C>(),
            move |services: ScopedServices| -> BoxedBulkPostPublishHook<C::Host> {
                let extension = factory(&services);
                Box::new(BulkPostPublishAdapter::<C>::from_instance(extension, services))
            },
        );
        self
    }

    pub fn add_bulk_fn<C, M>(
        &mut self,
        callback: impl IntoObserverFn<[PublishedItem<C>], M>,
    ) -> &mut Self
    where
        C: ContentWrapper,
    {
        let callback = callback.into_observer_fn();
        self.inner.push(
            InterfaceId::bulk_post_publish::<C>(),
            move |services: ScopedServices| -> BoxedBulkPostPublishHook<C::Host> {
                Box::new(BulkPostPublishAdapter::<C>::from_callback(
                    callback.clone(),
                    services,
                ))
            },
        );
        self
    }

    pub fn add_item<C, E>(&mut self) -> &mut Self
    where
        C: ContentWrapper,
        E: ItemPostPublish<C> + FromServices + 'static,
    {
        self.inner.push(
            InterfaceId::item_post_publish::<C>(),
            |services: ScopedServices| -> BoxedItemPostPublishHook<C::Host> {
                let extension = E::from_services(&services);
                Box::new(ItemPostPublishAdapter::<C>::from_instance(extension, services))
            },
        );
        self
    }

    pub fn add_item_with<C, E>(
        &mut self,
        factory: impl Fn(&ScopedServices) -> E + Send + Sync + 'static,
    ) -> &mut Self
    where
        C: ContentWrapper,
        E: ItemPostPublish<C> + 'static,
    {
        self.inner.push(
            InterfaceId::item_post_publish::<C>(),
            move |services: ScopedServices| -> BoxedItemPostPublishHook<C::Host> {
                let extension = factory(&services);
                Box::new(ItemPostPublishAdapter::<C>::from_instance(extension, services))
            },
        );
        self
    }

    pub fn add_item_fn<C, M>(
        &mut self,
        callback: impl IntoObserverFn<ItemPostPublishContext<C>, M>,
    ) -> &mut Self
    where
        C: ContentWrapper,
    {
        let callback = callback.into_observer_fn();
        self.inner.push(
            InterfaceId::item_post_publish::<C>(),
            move |services: ScopedServices| -> BoxedItemPostPublishHook<C::Host> {
                Box::new(ItemPostPublishAdapter::<C>::from_callback(
                    callback.clone(),
                    services,
                ))
            },
        );
        self
    }

    pub fn clear(&mut self) -> &mut Self {
        self.inner.clear();
        self
    }

    pub fn by_content_type(&self) -> BTreeMap<&'static str, Vec<HookFactory>> {
        self.inner.by_content_type()
    }

    pub fn build(&self) -> HookFactoryCollection {
        self.inner.build("post_publish")
    }
}

/// Builder for the three lifecycle observer hooks.
pub struct LifecycleBuilder {
    inner: Registrations,
}

impl LifecycleBuilder {
    pub fn new(wrappers: Arc<WrapperRegistry>) -> Self {
        Self {
            inner: Registrations::new(wrappers),
        }
    }

    pub fn add_action_completed<E>(&mut self) -> &mut Self
    where
        E: ActionCompleted + FromServices + 'static,
    {
        self.inner.push(
            InterfaceId::action_completed(),
            |services: ScopedServices| -> BoxedActionCompletedHook {
                let extension = E::from_services(&services);
                Box::new(ActionCompletedAdapter::from_instance(extension, services))
            },
        );
        self
    }

    pub fn add_action_completed_with<E>(
        &mut self,
        factory: impl Fn(&ScopedServices) -> E + Send + Sync + 'static,
    ) -> &mut Self
    where
        E: ActionCompleted + 'static,
    {
        self.inner.push(
            InterfaceId::action_completed(),
            move |services: ScopedServices| -> BoxedActionCompletedHook {
                let extension = factory(&services);
                Box::new(ActionCompletedAdapter::from_instance(extension, services))
            },
        );
        self
    }

    pub fn add_action_completed_fn<M>(
        &mut self,
        callback: impl IntoObserverFn<ActionResult, M>,
    ) -> &mut Self {
        let callback = callback.into_observer_fn();
        self.inner.push(
            InterfaceId::action_completed(),
            move |services: ScopedServices| -> BoxedActionCompletedHook {
                Box::new(ActionCompletedAdapter::from_callback(callback.clone(), services))
            },
        );
        self
    }

    pub fn add_batch_completed<E>(&mut self) -> &mut Self
    where
        E: BatchCompleted + FromServices + 'static,
    {
        self.inner.push(
            InterfaceId::batch_completed(),
            |services: ScopedServices| -> BoxedBatchCompletedHook {
                let extension = E::from_services(&services);
                Box::new(BatchCompletedAdapter::from_instance(extension, services))
            },
        );
        self
    }

    pub fn add_batch_completed_with<E>(
        &mut self,
        factory: impl Fn(&ScopedServices) -> E + Send + Sync + 'static,
    ) -> &mut Self
    where
        E: BatchCompleted + 'static,
    {
        self.inner.push(
            InterfaceId::batch_completed(),
            move |services: ScopedServices| -> BoxedBatchCompletedHook {
                let extension = factory(&services);
                Box::new(BatchCompletedAdapter::from_instance(extension, services))
            },
        );
        self
    }

    pub fn add_batch_completed_fn<M>(
        &mut self,
        callback: impl IntoObserverFn<BatchSummary, M>,
    ) -> &mut Self {
        let callback = callback.into_observer_fn();
        self.inner.push(
            InterfaceId::batch_completed(),
            move |services: ScopedServices| -> BoxedBatchCompletedHook {
                Box::new(BatchCompletedAdapter::from_callback(callback.clone(), services))
            },
        );
        self
    }

    pub fn add_initialize_migration<E>(&mut self) -> &mut Self
    where
        E: InitializeMigration + FromServices + 'static,
    {
        self.inner.push(
            InterfaceId::initialize_migration(),
            |services: ScopedServices| -> BoxedInitializeMigrationHook {
                let extension = E::from_services(&services);
                Box::new(InitializeMigrationAdapter::from_instance(extension, services))
            },
        );
        self
    }

    pub fn add_initialize_migration_with<E>(
        &mut self,
        factory: impl Fn(&ScopedServices) -> E + Send + Sync + 'static,
    ) -> &mut Self
    where
        E: InitializeMigration + 'static,
    {
        self.inner.push(
            InterfaceId::initialize_migration(),
            move |services: ScopedServices| -> BoxedInitializeMigrationHook {
                let extension = factory(&services);
                Box::new(InitializeMigrationAdapter::from_instance(extension, services))
            },
        );
        self
    }

    pub fn add_initialize_migration_fn<M>(
        &mut self,
        callback: impl IntoObserverFn<MigrationStartInfo, M>,
    ) -> &mut Self {
        let callback = callback.into_observer_fn();
        self.inner.push(
            InterfaceId::initialize_migration(),
            move |services: ScopedServices| -> BoxedInitializeMigrationHook {
                Box::new(InitializeMigrationAdapter::from_callback(
                    callback.clone(),
                    services,
                ))
            },
        );
        self
    }

    pub fn clear(&mut self) -> &mut Self {
        self.inner.clear();
        self
    }

    pub fn build(&self) -> HookFactoryCollection {
        self.inner.build("lifecycle")
    }
}
