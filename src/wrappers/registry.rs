//! Wrapper registration table and memoized resolution
//!
//! Wrappers are registered explicitly at startup. The first resolution
//! for a host type walks the table; the result is cached for the process
//! lifetime and never invalidated (wrapper types are not redefined at
//! runtime). The cache is the only cross-invocation shared mutable state
//! in the crate: append-only, and deterministic under concurrent
//! population, since a redundant duplicate walk resolves to the same
//! entry.

use dashmap::DashMap;
use std::any::{Any, TypeId};
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, RwLock};
use thiserror::Error;
use tracing::debug;

/// An extension-side wrapper over one host content type.
///
/// The associated `Host` type is the static declared mapping from the
/// wrapper back to its host-side counterpart; adapters use it to resolve
/// hook generic parameters at compile time. `Host: Clone` because
/// adapters re-wrap borrowed host payloads for probe-style entry points.
pub trait ContentWrapper: Send + Sync + 'static {
    type Host: Clone + Send + Sync + 'static;

    /// The registered content type name, e.g. "user" or "workbook".
    const CONTENT_NAME: &'static str;

    fn wrap(host: Self::Host) -> Self;
    fn into_host(self) -> Self::Host;
    fn host(&self) -> &Self::Host;
}

/// Marker for wrappers whose content type is the site user. Required by
/// cloud-username mapping registration.
pub trait UserContent: ContentWrapper {}

#[derive(Debug, Error)]
pub enum WrapperError {
    /// No wrapper claims the host type. A programming error, not a
    /// retryable condition.
    #[error("no wrapper registered for host type {host_type}")]
    NoWrapperRegistered { host_type: &'static str },

    /// At most one wrapper type may claim a given host type.
    #[error("host type {host_type} is already claimed by {existing}, cannot register {attempted}")]
    DuplicateHostClaim {
        host_type: &'static str,
        existing: &'static str,
        attempted: &'static str,
    },

    /// A dynamic payload did not hold the host type the entry wraps.
    #[error("payload is not of host type {expected}")]
    PayloadType { expected: &'static str },
}

type WrapFn = fn(&(dyn Any + Send + Sync)) -> Option<Box<dyn Any + Send + Sync>>;

/// One registered host-type ⇄ wrapper-type correspondence.
pub struct WrapperEntry {
    host_type: TypeId,
    ext_type: TypeId,
    host_type_name: &'static str,
    ext_type_name: &'static str,
    content_name: &'static str,
    wrap_fn: WrapFn,
}

impl WrapperEntry {
    fn of<W: ContentWrapper>() -> Self {
        Self {
            host_type: TypeId::of::<W::Host>(),
            ext_type: TypeId::of::<W>(),
            host_type_name: std::any::type_name::<W::Host>(),
            ext_type_name: std::any::type_name::<W>(),
            content_name: W::CONTENT_NAME,
            wrap_fn: wrap_erased::<W>,
        }
    }

    pub fn host_type(&self) -> TypeId {
        self.host_type
    }

    pub fn ext_type(&self) -> TypeId {
        self.ext_type
    }

    pub fn content_name(&self) -> &'static str {
        self.content_name
    }

    /// Wrap a type-erased host payload into a boxed wrapper value.
    pub fn wrap_any(
        &self,
        payload: &(dyn Any + Send + Sync),
    ) -> Result<Box<dyn Any + Send + Sync>, WrapperError> {
        (self.wrap_fn)(payload).ok_or(WrapperError::PayloadType {
            expected: self.host_type_name,
        })
    }
}

impl std::fmt::Debug for WrapperEntry {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("WrapperEntry")
            .field("content", &self.content_name)
            .field("host", &self.host_type_name)
            .field("wrapper", &self.ext_type_name)
            .finish()
    }
}

fn wrap_erased<W: ContentWrapper>(
    payload: &(dyn Any + Send + Sync),
) -> Option<Box<dyn Any + Send + Sync>> {
    payload
        .downcast_ref::<W::Host>()
        .map(|host| Box::new(W::wrap(host.clone())) as Box<dyn Any + Send + Sync>)
}

/// The registration table plus its memoization cache.
#[derive(Debug, Default)]
pub struct WrapperRegistry {
    table: RwLock<Vec<Arc<WrapperEntry>>>,
    resolved: DashMap<TypeId, Arc<WrapperEntry>>,
    scan_count: AtomicUsize,
}

impl WrapperRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a wrapper type. Errors if another wrapper already claims
    /// the same host type — the claim is by exact runtime type, never by
    /// a compatible base.
    pub fn register<W: ContentWrapper>(&self) -> Result<(), WrapperError> {
        let entry = WrapperEntry::of::<W>();
        let mut table = self.table.write().unwrap_or_else(|e| e.into_inner());
        if let Some(existing) = table.iter().find(|e| e.host_type == entry.host_type) {
            // Re-registering the identical wrapper is a no-op.
            if existing.ext_type == entry.ext_type {
                return Ok(());
            }
            return Err(WrapperError::DuplicateHostClaim {
                host_type: entry.host_type_name,
                existing: existing.ext_type_name,
                attempted: entry.ext_type_name,
            });
        }
        debug!(
            content = entry.content_name,
            host = entry.host_type_name,
            wrapper = entry.ext_type_name,
            "registered content wrapper"
        );
        table.push(Arc::new(entry));
        Ok(())
    }

    /// Resolve the wrapper entry for a host type. First call for a host
    /// type walks the table; later calls hit the cache.
    pub fn resolve(&self, host_type: TypeId) -> Result<Arc<WrapperEntry>, WrapperError> {
        self.resolve_named(host_type, "<unknown host type>")
    }

    /// As [`resolve`](Self::resolve), with a host type name for the error.
    pub fn resolve_of<H: 'static>(&self) -> Result<Arc<WrapperEntry>, WrapperError> {
        self.resolve_named(TypeId::of::<H>(), std::any::type_name::<H>())
    }

    fn resolve_named(
        &self,
        host_type: TypeId,
        host_type_name: &'static str,
    ) -> Result<Arc<WrapperEntry>, WrapperError> {
        if let Some(entry) = self.resolved.get(&host_type) {
            return Ok(entry.clone());
        }

        self.scan_count.fetch_add(1, Ordering::Relaxed);
        let table = self.table.read().unwrap_or_else(|e| e.into_inner());
        let entry = table
            .iter()
            .find(|e| e.host_type == host_type)
            .cloned()
            .ok_or(WrapperError::NoWrapperRegistered {
                host_type: host_type_name,
            })?;
        drop(table);

        debug!(content = entry.content_name(), "resolved content wrapper");
        self.resolved.insert(host_type, entry.clone());
        Ok(entry)
    }

    /// Reverse direction: the entry registered for an extension wrapper
    /// type, if any.
    pub fn lookup_ext(&self, ext_type: TypeId) -> Option<Arc<WrapperEntry>> {
        let table = self.table.read().unwrap_or_else(|e| e.into_inner());
        table.iter().find(|e| e.ext_type == ext_type).cloned()
    }

    /// Whether a wrapper type has been registered.
    pub fn is_registered<W: ContentWrapper>(&self) -> bool {
        self.lookup_ext(TypeId::of::<W>()).is_some()
    }

    /// How many table walks have happened. Cached resolutions do not
    /// walk; tests use this to verify memoization.
    pub fn scan_count(&self) -> usize {
        self.scan_count.load(Ordering::Relaxed)
    }
}
