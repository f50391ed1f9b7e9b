//! Hook interfaces — the contracts the host engine invokes
//!
//! One trait per hook kind, generic over the host-side content type.
//! Filter, post-publish, and lifecycle hooks are synchronous; mapping and
//! transformer hooks are asynchronous per the host's execution protocol.
//! The async entry points wrap synchronous user code, so they complete
//! immediately and never suspend; they accept a cancellation token and
//! may ignore it.

use crate::engine::{
    ActionResult, BatchSummary, CancellationToken, ItemPostPublishContext, MappingContext,
    MigrationItem, MigrationStartInfo, PublishedItem, XmlDocument,
};
use crate::wrappers::WrapperError;
use async_trait::async_trait;
use thiserror::Error;

/// Errors crossing the adapter boundary. The layer never retries or
/// swallows; classification is the host's responsibility.
#[derive(Debug, Error)]
pub enum HookError {
    /// A typed scope lookup found nothing.
    #[error("service not registered in scope: {0}")]
    ServiceNotFound(&'static str),

    /// A factory's hook was requested through an interface its adapter
    /// does not implement. Raised on the invocation path, not at
    /// registration — the host may probe interfaces before invoking.
    #[error("no executable entry point for {interface}: factory provides {provided}")]
    MissingEntryPoint {
        interface: &'static str,
        provided: String,
    },

    #[error(transparent)]
    Wrapper(#[from] WrapperError),

    /// Backing-document load or persist failure reported by the host's
    /// document store.
    #[error("document store error: {0}")]
    Document(String),

    /// An error raised by user hook code, propagated unmodified.
    #[error("{0}")]
    User(String),
}

impl HookError {
    /// Convenience constructor for user hook code reporting a failure.
    pub fn user(message: impl Into<String>) -> Self {
        Self::User(message.into())
    }
}

pub type HookResult<T> = Result<T, HookError>;

/// Filters the batch of migration items for one content type, returning
/// the items that should continue through the pipeline in their original
/// relative order.
pub trait FilterHook<H: Send + Sync + 'static>: Send + Sync {
    fn execute(&self, items: Vec<MigrationItem<H>>) -> HookResult<Vec<MigrationItem<H>>>;
}

/// Maps an item to its destination location, returning a (possibly
/// updated) context. Contexts are values; the input is never mutated.
#[async_trait]
pub trait MappingHook<H: Send + Sync + 'static>: Send + Sync {
    async fn execute(
        &self,
        ctx: MappingContext<H>,
        cancel: &CancellationToken,
    ) -> HookResult<MappingContext<H>>;
}

impl<H: Send + Sync + 'static> std::fmt::Debug for dyn MappingHook<H> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str("MappingHook")
    }
}

/// Marker implemented by cloud-username mapping adapters so the host can
/// distinguish them from general mappings.
pub trait CloudUsernameMarker {}

/// Transforms a single content item in place or by replacement.
#[async_trait]
pub trait TransformerHook<H: Send + Sync + 'static>: Send + Sync {
    async fn execute(&self, item: H, cancel: &CancellationToken) -> HookResult<H>;
}

/// Two-phase XML transformer.
///
/// The host calls [`needs_transforming`](Self::needs_transforming)
/// before loading the backing document; when it returns `false` the
/// document must never be loaded and the transform phase never runs.
#[async_trait]
pub trait XmlTransformerHook<H: Send + Sync + 'static>: Send + Sync {
    /// Probe phase. Must not force document loading.
    fn needs_transforming(&self, item: &H) -> bool;

    /// Transform phase: mutate the parsed document in place. The host
    /// persists it afterwards.
    async fn execute(
        &self,
        item: &H,
        document: &mut XmlDocument,
        cancel: &CancellationToken,
    ) -> HookResult<()>;
}

/// Observes the full set of published items for one content type.
/// Fire-and-observe; the host ignores the return value beyond the error
/// check.
pub trait BulkPostPublishHook<H: Send + Sync + 'static>: Send + Sync {
    fn execute(&self, items: &[PublishedItem<H>]) -> HookResult<()>;
}

/// Observes a single published item alongside its destination-side
/// counterpart and manifest entry.
pub trait ItemPostPublishHook<H: Send + Sync + 'static>: Send + Sync {
    fn execute(&self, ctx: &ItemPostPublishContext<H>) -> HookResult<()>;
}

/// Terminal observer of one migration action's outcome.
pub trait ActionCompletedHook: Send + Sync {
    fn execute(&self, result: &ActionResult) -> HookResult<()>;
}

/// Terminal observer of one completed batch.
pub trait BatchCompletedHook: Send + Sync {
    fn execute(&self, summary: &BatchSummary) -> HookResult<()>;
}

/// Observer invoked once before the first batch of a migration run.
pub trait InitializeMigrationHook: Send + Sync {
    fn execute(&self, info: &MigrationStartInfo) -> HookResult<()>;
}

/// Boxed hook payload aliases, as stored behind [`HookFactory`]'s type
/// erasure and recovered by the host with `create_as`.
///
/// [`HookFactory`]: crate::hooks::HookFactory
pub type BoxedFilterHook<H> = Box<dyn FilterHook<H>>;
pub type BoxedMappingHook<H> = Box<dyn MappingHook<H>>;
pub type BoxedTransformerHook<H> = Box<dyn TransformerHook<H>>;
pub type BoxedXmlTransformerHook<H> = Box<dyn XmlTransformerHook<H>>;
pub type BoxedBulkPostPublishHook<H> = Box<dyn BulkPostPublishHook<H>>;
pub type BoxedItemPostPublishHook<H> = Box<dyn ItemPostPublishHook<H>>;
pub type BoxedActionCompletedHook = Box<dyn ActionCompletedHook>;
pub type BoxedBatchCompletedHook = Box<dyn BatchCompletedHook>;
pub type BoxedInitializeMigrationHook = Box<dyn InitializeMigrationHook>;
