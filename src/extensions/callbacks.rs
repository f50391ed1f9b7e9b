//! Callback arity resolution
//!
//! Callback registrations accept either a one-argument callback (the
//! context alone) or a two-argument callback (context plus scoped
//! services). The marker-parameterized conversion traits below normalize
//! both shapes into a single stored form, so arity is inspected exactly
//! once — when the registration is added, not per invocation.

use crate::engine::XmlDocument;
use crate::hooks::HookResult;
use crate::services::ScopedServices;
use std::sync::Arc;

/// Marker: the callback takes only the context.
pub struct ContextOnly;

/// Marker: the callback additionally takes `&ScopedServices`.
pub struct WithServices;

/// Normalized form of value-in, value-out callbacks (filters, mappings,
/// transformers).
pub type TransformFn<In, Out> = Arc<dyn Fn(In, &ScopedServices) -> HookResult<Out> + Send + Sync>;

pub trait IntoTransformFn<In, Out, M> {
    fn into_transform_fn(self) -> TransformFn<In, Out>;
}

impl<In, Out, F> IntoTransformFn<In, Out, ContextOnly> for F
where
    F: Fn(In) -> HookResult<Out> + Send + Sync + 'static,
{
    fn into_transform_fn(self) -> TransformFn<In, Out> {
        Arc::new(move |input, _services| (self)(input))
    }
}

impl<In, Out, F> IntoTransformFn<In, Out, WithServices> for F
where
    F: Fn(In, &ScopedServices) -> HookResult<Out> + Send + Sync + 'static,
{
    fn into_transform_fn(self) -> TransformFn<In, Out> {
        Arc::new(move |input, services| (self)(input, services))
    }
}

/// Normalized form of observe-only callbacks (post-publish and lifecycle
/// hooks). `Ctx: ?Sized` so slice contexts work unboxed.
pub type ObserverFn<Ctx> = Arc<dyn Fn(&Ctx, &ScopedServices) -> HookResult<()> + Send + Sync>;

pub trait IntoObserverFn<Ctx: ?Sized, M> {
    fn into_observer_fn(self) -> ObserverFn<Ctx>;
}

impl<Ctx: ?Sized, F> IntoObserverFn<Ctx, ContextOnly> for F
where
    F: Fn(&Ctx) -> HookResult<()> + Send + Sync + 'static,
{
    fn into_observer_fn(self) -> ObserverFn<Ctx> {
        Arc::new(move |ctx, _services| (self)(ctx))
    }
}

impl<Ctx: ?Sized, F> IntoObserverFn<Ctx, WithServices> for F
where
    F: Fn(&Ctx, &ScopedServices) -> HookResult<()> + Send + Sync + 'static,
{
    fn into_observer_fn(self) -> ObserverFn<Ctx> {
        Arc::new(move |ctx, services| (self)(ctx, services))
    }
}

/// Normalized form of XML transform callbacks: item, mutable document,
/// services.
pub type XmlTransformFn<C> =
    Arc<dyn Fn(&C, &mut XmlDocument, &ScopedServices) -> HookResult<()> + Send + Sync>;

pub trait IntoXmlTransformFn<C, M> {
    fn into_xml_transform_fn(self) -> XmlTransformFn<C>;
}

impl<C, F> IntoXmlTransformFn<C, ContextOnly> for F
where
    F: Fn(&C, &mut XmlDocument) -> HookResult<()> + Send + Sync + 'static,
{
    fn into_xml_transform_fn(self) -> XmlTransformFn<C> {
        Arc::new(move |item, document, _services| (self)(item, document))
    }
}

impl<C, F> IntoXmlTransformFn<C, WithServices> for F
where
    F: Fn(&C, &mut XmlDocument, &ScopedServices) -> HookResult<()> + Send + Sync + 'static,
{
    fn into_xml_transform_fn(self) -> XmlTransformFn<C> {
        Arc::new(move |item, document, services| (self)(item, document, services))
    }
}
