//! Per-invocation service scopes
//!
//! The host creates a scope around each hook invocation and destroys it
//! afterwards. The adapter layer only requests lookups; it never manages
//! the scope's lifetime.

use std::any::{Any, TypeId};
use std::sync::Arc;

/// The host's per-scope service lookup primitive.
///
/// Returns `None` when the type was never registered in this scope.
/// Implementations must be safe to call from concurrent hook invocations
/// that happen to share a scope object.
pub trait ServiceScope: Send + Sync {
    fn get_service(&self, ty: TypeId) -> Option<Arc<dyn Any + Send + Sync>>;
}

/// A plain map-backed scope. Hosts with a real DI container implement
/// [`ServiceScope`] over it; small hosts and tests use this directly.
#[derive(Debug, Default)]
pub struct ServiceMap {
    services: dashmap::DashMap<TypeId, Arc<dyn Any + Send + Sync>>,
}

impl ServiceMap {
    pub fn new() -> Self {
        Self {
            services: dashmap::DashMap::new(),
        }
    }

    /// Register a service, replacing any previous registration of `T`.
    pub fn insert<T: Send + Sync + 'static>(&self, service: T) {
        self.services.insert(TypeId::of::<T>(), Arc::new(service));
    }

    /// Register an already-shared service under its pointee type.
    pub fn insert_arc<T: Send + Sync + 'static>(&self, service: Arc<T>) {
        self.services.insert(TypeId::of::<T>(), service);
    }
}

impl ServiceScope for ServiceMap {
    fn get_service(&self, ty: TypeId) -> Option<Arc<dyn Any + Send + Sync>> {
        self.services.get(&ty).map(|r| r.clone())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn lookup_returns_registered_service() {
        let scope = ServiceMap::new();
        scope.insert(42u64);

        let found = scope.get_service(TypeId::of::<u64>()).unwrap();
        assert_eq!(*found.downcast::<u64>().unwrap(), 42);
    }

    #[test]
    fn lookup_misses_unregistered_type() {
        let scope = ServiceMap::new();
        assert!(scope.get_service(TypeId::of::<String>()).is_none());
    }

    #[test]
    fn insert_arc_shares_the_instance() {
        let scope = ServiceMap::new();
        let shared = Arc::new(String::from("manifest"));
        scope.insert_arc(shared.clone());

        let found = scope.get_service(TypeId::of::<String>()).unwrap();
        let found: Arc<String> = found.downcast().unwrap();
        assert!(Arc::ptr_eq(&found, &shared));
    }
}
