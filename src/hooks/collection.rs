//! Hook factories and the built collection
//!
//! A factory produces one live adapter instance per scope; instances are
//! never reused across scopes. The built collection is an immutable
//! snapshot, queryable by target interface, with factories in
//! registration order.

use super::traits::{HookError, HookResult};
use super::types::InterfaceId;
use crate::engine::ServiceScope;
use crate::services::ScopedServices;
use crate::wrappers::WrapperRegistry;
use std::any::Any;
use std::collections::HashMap;
use std::sync::Arc;

type ErasedMake = Arc<dyn Fn(ScopedServices) -> Box<dyn Any + Send + Sync> + Send + Sync>;

/// A per-scope adapter factory for one registration.
///
/// The payload behind the type erasure is one of the boxed hook aliases
/// in [`traits`](super::traits), matching the factory's interface id.
#[derive(Clone)]
pub struct HookFactory {
    interface: InterfaceId,
    wrappers: Arc<WrapperRegistry>,
    make: ErasedMake,
}

impl HookFactory {
    pub(crate) fn new<T: Send + Sync + 'static>(
        interface: InterfaceId,
        wrappers: Arc<WrapperRegistry>,
        make: impl Fn(ScopedServices) -> T + Send + Sync + 'static,
    ) -> Self {
        Self {
            interface,
            wrappers,
            make: Arc::new(move |services| Box::new(make(services)) as Box<dyn Any + Send + Sync>),
        }
    }

    /// The interface shape this factory's adapters implement.
    pub fn interface(&self) -> &InterfaceId {
        &self.interface
    }

    /// Build a live adapter for one scope. Each call produces an
    /// independent object graph with a fresh [`ScopedServices`].
    pub fn create(&self, scope: &Arc<dyn ServiceScope>) -> Box<dyn Any + Send + Sync> {
        let services = ScopedServices::new(scope.clone(), self.wrappers.clone());
        (self.make)(services)
    }

    /// Build a live adapter and recover it through the interface the
    /// host intends to invoke.
    ///
    /// `I` is one of the boxed hook aliases, e.g.
    /// [`BoxedFilterHook`](super::traits::BoxedFilterHook). A mismatch
    /// means the probed adapter has no entry point for that interface;
    /// that is an invocation-path error, reported per the registration's
    /// actual interface.
    pub fn create_as<I: Send + Sync + 'static>(
        &self,
        scope: &Arc<dyn ServiceScope>,
    ) -> HookResult<I> {
        self.create(scope)
            .downcast::<I>()
            .map(|hook| *hook)
            .map_err(|_| HookError::MissingEntryPoint {
                interface: std::any::type_name::<I>(),
                provided: self.interface.to_string(),
            })
    }
}

impl std::fmt::Debug for HookFactory {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("HookFactory")
            .field("interface", &self.interface)
            .finish()
    }
}

/// Immutable query-by-interface snapshot produced by a builder.
#[derive(Debug, Clone, Default)]
pub struct HookFactoryCollection {
    hooks: HashMap<InterfaceId, Vec<HookFactory>>,
    len: usize,
}

impl HookFactoryCollection {
    pub(crate) fn from_registrations(registrations: &[HookFactory]) -> Self {
        let mut hooks: HashMap<InterfaceId, Vec<HookFactory>> = HashMap::new();
        for factory in registrations {
            hooks
                .entry(factory.interface.clone())
                .or_default()
                .push(factory.clone());
        }
        Self {
            hooks,
            len: registrations.len(),
        }
    }

    /// Factories registered for one interface, in registration order.
    /// Empty for interfaces nothing was registered under.
    pub fn get_hooks(&self, interface: &InterfaceId) -> &[HookFactory] {
        self.hooks.get(interface).map(Vec::as_slice).unwrap_or(&[])
    }

    /// Total registrations across all interfaces.
    pub fn len(&self) -> usize {
        self.len
    }

    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// The interfaces with at least one registration.
    pub fn interfaces(&self) -> impl Iterator<Item = &InterfaceId> {
        self.hooks.keys()
    }
}
