//! Scoped service accessor
//!
//! `ScopedServices` wraps the host's per-invocation scope handle and is
//! the only thing the adapter layer injects into extension code. One
//! accessor exists per adapter instance, which exists per scope; nothing
//! here is cached beyond the scope that created it.

use crate::engine::{
    DestinationFinderFactory, MigrationManifest, MigrationPlan, ReferenceFinder, ServiceScope,
    SourceFinderFactory,
};
use crate::hooks::{HookError, HookResult};
use crate::wrappers::{ContentWrapper, WrapperRegistry};
use std::any::TypeId;
use std::sync::Arc;
use tracing::warn;

/// Typed access to the host's per-scope services, plus the named
/// convenience accessors hooks reach for most.
#[derive(Clone)]
pub struct ScopedServices {
    scope: Arc<dyn ServiceScope>,
    wrappers: Arc<WrapperRegistry>,
}

impl ScopedServices {
    pub fn new(scope: Arc<dyn ServiceScope>, wrappers: Arc<WrapperRegistry>) -> Self {
        Self { scope, wrappers }
    }

    /// Typed scope lookup.
    ///
    /// When the scope has no `T` but `T` is a registered content wrapper
    /// and the scope holds its host type, the host service is wrapped on
    /// the way out.
    pub fn get<T: Send + Sync + 'static>(&self) -> HookResult<Arc<T>> {
        if let Some(service) = self.scope.get_service(TypeId::of::<T>()) {
            return service
                .downcast::<T>()
                .map_err(|_| HookError::ServiceNotFound(std::any::type_name::<T>()));
        }

        // Wrapper fallback: look up the host-side counterpart and wrap it.
        if let Some(entry) = self.wrappers.lookup_ext(TypeId::of::<T>()) {
            if let Some(host) = self.scope.get_service(entry.host_type()) {
                let wrapped = entry.wrap_any(host.as_ref())?;
                let wrapped = wrapped
                    .downcast::<T>()
                    .map_err(|_| HookError::ServiceNotFound(std::any::type_name::<T>()))?;
                return Ok(Arc::new(*wrapped));
            }
        }

        Err(HookError::ServiceNotFound(std::any::type_name::<T>()))
    }

    /// The migration manifest for the current run.
    pub fn manifest(&self) -> HookResult<Arc<MigrationManifest>> {
        self.get::<MigrationManifest>()
    }

    /// The plan under execution.
    pub fn plan(&self) -> HookResult<Arc<MigrationPlan>> {
        self.get::<MigrationPlan>()
    }

    /// A source-endpoint reference finder for the wrapper's content type.
    ///
    /// Returns `None` when the content type has no wrapper registration
    /// or the scope exposes no finder factory. The silent fallback is
    /// deliberate: an unregistered content type degrades to "no
    /// references found" rather than failing the hook.
    pub fn source_reference_finder<C: ContentWrapper>(&self) -> Option<Arc<dyn ReferenceFinder>> {
        self.reference_finder::<C>(true)
    }

    /// Destination-endpoint twin of
    /// [`source_reference_finder`](Self::source_reference_finder).
    pub fn destination_reference_finder<C: ContentWrapper>(
        &self,
    ) -> Option<Arc<dyn ReferenceFinder>> {
        self.reference_finder::<C>(false)
    }

    fn reference_finder<C: ContentWrapper>(&self, source: bool) -> Option<Arc<dyn ReferenceFinder>> {
        let Some(entry) = self.wrappers.lookup_ext(TypeId::of::<C>()) else {
            warn!(
                content = C::CONTENT_NAME,
                "reference finder lookup for unregistered content type, returning none"
            );
            return None;
        };
        let factory = if source {
            self.get::<SourceFinderFactory>().ok().map(|f| f.0.clone())
        } else {
            self.get::<DestinationFinderFactory>().ok().map(|f| f.0.clone())
        };
        let Some(factory) = factory else {
            warn!(
                content = C::CONTENT_NAME,
                source, "scope exposes no reference finder factory, returning none"
            );
            return None;
        };
        factory.finder_for(entry.host_type())
    }

    /// The wrapper registry this accessor wraps dynamic lookups with.
    pub fn wrappers(&self) -> &Arc<WrapperRegistry> {
        &self.wrappers
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::engine::{ContentLocation, ContentReference, ServiceMap};

    #[derive(Debug, Clone, PartialEq)]
    struct HostProject {
        name: String,
    }

    struct ProjectWrapper {
        host: HostProject,
    }

    impl ContentWrapper for ProjectWrapper {
        type Host = HostProject;
        const CONTENT_NAME: &'static str = "project";

        fn wrap(host: HostProject) -> Self {
            Self { host }
        }
        fn into_host(self) -> HostProject {
            self.host
        }
        fn host(&self) -> &HostProject {
            &self.host
        }
    }

    fn services_with(scope: ServiceMap, wrappers: WrapperRegistry) -> ScopedServices {
        ScopedServices::new(Arc::new(scope), Arc::new(wrappers))
    }

    #[test]
    fn typed_lookup_passes_through() {
        let scope = ServiceMap::new();
        scope.insert(MigrationPlan::new("plan", "src", "dst"));
        let services = services_with(scope, WrapperRegistry::new());

        assert_eq!(services.plan().unwrap().name, "plan");
    }

    #[test]
    fn missing_service_errors_with_type_name() {
        let services = services_with(ServiceMap::new(), WrapperRegistry::new());
        let err = services.manifest().unwrap_err();
        assert!(err.to_string().contains("MigrationManifest"));
    }

    #[test]
    fn wrapper_fallback_wraps_host_service() {
        let scope = ServiceMap::new();
        scope.insert(HostProject {
            name: "Default".into(),
        });
        let wrappers = WrapperRegistry::new();
        wrappers.register::<ProjectWrapper>().unwrap();
        let services = services_with(scope, wrappers);

        let wrapped = services.get::<ProjectWrapper>().unwrap();
        assert_eq!(wrapped.host().name, "Default");
    }

    #[test]
    fn unregistered_content_type_finder_is_silently_none() {
        // Deliberate fallback behavior, not an error: see reference_finder.
        let services = services_with(ServiceMap::new(), WrapperRegistry::new());
        assert!(services.source_reference_finder::<ProjectWrapper>().is_none());
        assert!(services
            .destination_reference_finder::<ProjectWrapper>()
            .is_none());
    }

    #[test]
    fn finder_resolves_through_factory() {
        struct OneFinder;
        impl ReferenceFinder for OneFinder {
            fn find(&self, reference: &ContentReference) -> Option<ContentReference> {
                Some(reference.clone())
            }
        }
        struct Factory;
        impl crate::engine::ReferenceFinderFactory for Factory {
            fn finder_for(&self, host_type: TypeId) -> Option<Arc<dyn ReferenceFinder>> {
                (host_type == TypeId::of::<HostProject>())
                    .then(|| Arc::new(OneFinder) as Arc<dyn ReferenceFinder>)
            }
        }

        let scope = ServiceMap::new();
        scope.insert(SourceFinderFactory(Arc::new(Factory)));
        let wrappers = WrapperRegistry::new();
        wrappers.register::<ProjectWrapper>().unwrap();
        let services = services_with(scope, wrappers);

        let finder = services.source_reference_finder::<ProjectWrapper>().unwrap();
        let reference =
            ContentReference::new("Default", ContentLocation::from_name("Default"));
        assert_eq!(finder.find(&reference), Some(reference));
    }
}
