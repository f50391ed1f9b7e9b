//! Extension surface — what user code implements
//!
//! Extensions are written against this lightweight object model: one
//! trait per hook category, generic over the content wrapper type the
//! extension declares. Plain callbacks are accepted everywhere a trait
//! is; the conversion traits in [`callbacks`] resolve callback arity
//! once, at registration time.

mod callbacks;
mod traits;

pub use callbacks::{
    ContextOnly, IntoObserverFn, IntoTransformFn, IntoXmlTransformFn, ObserverFn, TransformFn,
    WithServices, XmlTransformFn,
};
pub use traits::{
    ActionCompleted, BatchCompleted, BulkPostPublish, ContentFilter, ContentMapping,
    ContentTransformer, InitializeMigration, ItemPostPublish, XmlContentTransformer,
};

use crate::services::ScopedServices;

/// Construction injection point for class-based registrations: the
/// per-scope factory builds the extension with the scope's services in
/// hand.
pub trait FromServices: Sized {
    fn from_services(services: &ScopedServices) -> Self;
}
