//! Two-phase XML transformer adapter and protocol driver
//!
//! Protocol: the host probes `needs_transforming` *before* loading the
//! backing document from storage. A `false` probe means the document is
//! never loaded and the transform phase never runs; a `true` probe means
//! the host loads the document, the adapter mutates it in place, and the
//! host persists it. The probe must never force a load — skipping the
//! file I/O is the point of the probe phase.

use super::traits::{HookResult, XmlTransformerHook};
use crate::engine::{CancellationToken, XmlDocument};
use crate::extensions::{XmlContentTransformer, XmlTransformFn};
use crate::services::ScopedServices;
use crate::wrappers::ContentWrapper;
use async_trait::async_trait;

enum XmlSource<C: ContentWrapper> {
    Instance(Box<dyn XmlContentTransformer<C>>),
    /// Callback registrations have no probe; they always transform.
    Callback(XmlTransformFn<C>),
}

pub struct XmlTransformerAdapter<C: ContentWrapper> {
    source: XmlSource<C>,
    services: ScopedServices,
}

impl<C: ContentWrapper> XmlTransformerAdapter<C> {
    pub(crate) fn from_instance(
        extension: impl XmlContentTransformer<C> + 'static,
        services: ScopedServices,
    ) -> Self {
        Self {
            source: XmlSource::Instance(Box::new(extension)),
            services,
        }
    }

    pub(crate) fn from_callback(callback: XmlTransformFn<C>, services: ScopedServices) -> Self {
        Self {
            source: XmlSource::Callback(callback),
            services,
        }
    }
}

#[async_trait]
impl<C: ContentWrapper> XmlTransformerHook<C::Host> for XmlTransformerAdapter<C> {
    fn needs_transforming(&self, item: &C::Host) -> bool {
        match &self.source {
            XmlSource::Instance(transformer) => {
                transformer.needs_transforming(&C::wrap(item.clone()))
            }
            XmlSource::Callback(_) => true,
        }
    }

    async fn execute(
        &self,
        item: &C::Host,
        document: &mut XmlDocument,
        _cancel: &CancellationToken,
    ) -> HookResult<()> {
        let wrapped = C::wrap(item.clone());
        match &self.source {
            XmlSource::Instance(transformer) => transformer.transform(&wrapped, document),
            XmlSource::Callback(callback) => callback(&wrapped, document, &self.services),
        }
    }
}

/// Host-implemented storage for one item's backing document.
pub trait DocumentStore: Send + Sync {
    fn load(&self) -> HookResult<XmlDocument>;
    fn persist(&self, document: &XmlDocument) -> HookResult<()>;
}

/// Terminal state of one two-phase invocation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum XmlPhase {
    /// Probe returned false; the document was never loaded.
    Skipped,
    /// The document was loaded, transformed, and persisted.
    Transformed,
}

/// Drive the two-phase protocol for one item.
///
/// Load happens only after a `true` probe; persist happens exactly once,
/// after the transform returns.
pub async fn run_xml_transform<H: Send + Sync + 'static>(
    hook: &dyn XmlTransformerHook<H>,
    item: &H,
    store: &dyn DocumentStore,
    cancel: &CancellationToken,
) -> HookResult<XmlPhase> {
    if !hook.needs_transforming(item) {
        return Ok(XmlPhase::Skipped);
    }
    let mut document = store.load()?;
    hook.execute(item, &mut document, cancel).await?;
    store.persist(&document)?;
    Ok(XmlPhase::Transformed)
}
