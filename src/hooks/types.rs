//! Hook interface identity
//!
//! The host queries built collections by target interface. An interface
//! is a hook kind plus (for content-typed kinds) the host content type
//! it is parameterized over.

use crate::wrappers::{ContentWrapper, UserContent};
use std::any::TypeId;

/// The closed set of hook kinds this layer can adapt to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum HookKind {
    Filter,
    Mapping,
    CloudUsernameMapping,
    Transformer,
    XmlTransformer,
    BulkPostPublish,
    ItemPostPublish,
    ActionCompleted,
    BatchCompleted,
    InitializeMigration,
}

impl HookKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Filter => "filter",
            Self::Mapping => "mapping",
            Self::CloudUsernameMapping => "cloud_username_mapping",
            Self::Transformer => "transformer",
            Self::XmlTransformer => "xml_transformer",
            Self::BulkPostPublish => "bulk_post_publish",
            Self::ItemPostPublish => "item_post_publish",
            Self::ActionCompleted => "action_completed",
            Self::BatchCompleted => "batch_completed",
            Self::InitializeMigration => "initialize_migration",
        }
    }
}

/// Identity of one host-invocable interface shape.
///
/// Lifecycle kinds carry no content type; all other kinds are keyed by
/// the host-side content type resolved from the wrapper's declaration.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct InterfaceId {
    kind: HookKind,
    content: Option<TypeId>,
    content_name: Option<&'static str>,
}

impl InterfaceId {
    fn content_typed(kind: HookKind, content: TypeId, content_name: &'static str) -> Self {
        Self {
            kind,
            content: Some(content),
            content_name: Some(content_name),
        }
    }

    fn lifecycle(kind: HookKind) -> Self {
        Self {
            kind,
            content: None,
            content_name: None,
        }
    }

    pub fn filter<C: ContentWrapper>() -> Self {
        Self::content_typed(HookKind::Filter, TypeId::of::<C::Host>(), C::CONTENT_NAME)
    }

    pub fn mapping<C: ContentWrapper>() -> Self {
        Self::content_typed(HookKind::Mapping, TypeId::of::<C::Host>(), C::CONTENT_NAME)
    }

    pub fn cloud_username_mapping<C: UserContent>() -> Self {
        Self::content_typed(
            HookKind::CloudUsernameMapping,
            TypeId::of::<C::Host>(),
            C::CONTENT_NAME,
        )
    }

    pub fn transformer<C: ContentWrapper>() -> Self {
        Self::content_typed(
            HookKind::Transformer,
            TypeId::of::<C::Host>(),
            C::CONTENT_NAME,
        )
    }

    pub fn xml_transformer<C: ContentWrapper>() -> Self {
        Self::content_typed(
            HookKind::XmlTransformer,
            TypeId::of::<C::Host>(),
            C::CONTENT_NAME,
        )
    }

    pub fn bulk_post_publish<C: ContentWrapper>() -> Self {
        Self::content_typed(
            HookKind::BulkPostPublish,
            TypeId::of::<C::Host>(),
            C::CONTENT_NAME,
        )
    }

    pub fn item_post_publish<C: ContentWrapper>() -> Self {
        Self::content_typed(
            HookKind::ItemPostPublish,
            TypeId::of::<C::Host>(),
            C::CONTENT_NAME,
        )
    }

    pub fn action_completed() -> Self {
        Self::lifecycle(HookKind::ActionCompleted)
    }

    pub fn batch_completed() -> Self {
        Self::lifecycle(HookKind::BatchCompleted)
    }

    pub fn initialize_migration() -> Self {
        Self::lifecycle(HookKind::InitializeMigration)
    }

    pub fn kind(&self) -> HookKind {
        self.kind
    }

    /// The registered content type name, for content-typed kinds.
    pub fn content_name(&self) -> Option<&'static str> {
        self.content_name
    }
}

impl std::fmt::Display for InterfaceId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self.content_name {
            Some(name) => write!(f, "{}<{}>", self.kind.as_str(), name),
            None => f.write_str(self.kind.as_str()),
        }
    }
}
