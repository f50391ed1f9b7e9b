//! Content references, locations, and the per-hook context types
//!
//! These are the payload envelopes hooks operate on. `MigrationItem`,
//! `PublishedItem`, and the context types are generic over the content
//! payload so the same envelope carries either a host-side concrete type
//! or its extension-side wrapper.

use super::manifest::ManifestEntry;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// A path-like location of a content item within a site, e.g.
/// `["Marketing", "Quarterly", "Q3 Report"]`.
///
/// The final segment is the item's name.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ContentLocation {
    segments: Vec<String>,
}

impl ContentLocation {
    pub fn new(segments: impl IntoIterator<Item = impl Into<String>>) -> Self {
        Self {
            segments: segments.into_iter().map(Into::into).collect(),
        }
    }

    /// A single-segment location.
    pub fn from_name(name: impl Into<String>) -> Self {
        Self {
            segments: vec![name.into()],
        }
    }

    pub fn segments(&self) -> &[String] {
        &self.segments
    }

    /// The item name: the last path segment, or "" for an empty location.
    pub fn name(&self) -> &str {
        self.segments.last().map(String::as_str).unwrap_or("")
    }

    /// Return a new location with the final segment replaced.
    ///
    /// Locations are immutable; renaming never mutates in place.
    pub fn rename(&self, name: impl Into<String>) -> Self {
        let mut segments = self.segments.clone();
        match segments.last_mut() {
            Some(last) => *last = name.into(),
            None => segments.push(name.into()),
        }
        Self { segments }
    }
}

impl std::fmt::Display for ContentLocation {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.segments.join("/"))
    }
}

/// A stable reference to a content item on the source or destination site.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ContentReference {
    pub id: Uuid,
    pub name: String,
    pub location: ContentLocation,
    /// Download URL for file-backed content, when the host exposes one.
    pub contents_url: Option<String>,
}

impl ContentReference {
    pub fn new(name: impl Into<String>, location: ContentLocation) -> Self {
        let name = name.into();
        Self {
            id: Uuid::new_v4(),
            name,
            location,
            contents_url: None,
        }
    }

    pub fn with_contents_url(mut self, url: impl Into<String>) -> Self {
        self.contents_url = Some(url.into());
        self
    }
}

/// One item moving through the pipeline: the payload plus its manifest
/// entry snapshot at the time the hook fires.
#[derive(Debug, Clone)]
pub struct MigrationItem<T> {
    pub item: T,
    pub manifest_entry: ManifestEntry,
}

impl<T> MigrationItem<T> {
    pub fn new(item: T, manifest_entry: ManifestEntry) -> Self {
        Self {
            item,
            manifest_entry,
        }
    }

    /// Re-type the payload, keeping the manifest entry. Adapters use this
    /// to move an item between the host-side and wrapper-side worlds.
    pub fn map<U>(self, f: impl FnOnce(T) -> U) -> MigrationItem<U> {
        MigrationItem {
            item: f(self.item),
            manifest_entry: self.manifest_entry,
        }
    }
}

/// Mapping context: an item together with the destination location it is
/// currently mapped to.
///
/// Contexts are value types. `map_to` consumes the context and returns a
/// new one; a mapping never mutates the context it was handed.
#[derive(Debug, Clone)]
pub struct MappingContext<T> {
    pub item: T,
    pub mapped_location: ContentLocation,
}

impl<T> MappingContext<T> {
    pub fn new(item: T, mapped_location: ContentLocation) -> Self {
        Self {
            item,
            mapped_location,
        }
    }

    /// Produce a new context mapped to `location`.
    pub fn map_to(self, location: ContentLocation) -> Self {
        Self {
            item: self.item,
            mapped_location: location,
        }
    }

    pub fn map_item<U>(self, f: impl FnOnce(T) -> U) -> MappingContext<U> {
        MappingContext {
            item: f(self.item),
            mapped_location: self.mapped_location,
        }
    }
}

/// An item that has been published to the destination.
#[derive(Debug, Clone)]
pub struct PublishedItem<T> {
    pub item: T,
    pub destination: ContentReference,
    pub manifest_entry: ManifestEntry,
}

impl<T> PublishedItem<T> {
    pub fn new(item: T, destination: ContentReference, manifest_entry: ManifestEntry) -> Self {
        Self {
            item,
            destination,
            manifest_entry,
        }
    }

    pub fn map<U>(self, f: impl FnOnce(T) -> U) -> PublishedItem<U> {
        PublishedItem {
            item: f(self.item),
            destination: self.destination,
            manifest_entry: self.manifest_entry,
        }
    }
}

/// Per-item post-publish context: the published source-side item, the
/// resulting destination-side item, and the manifest entry for the pair.
#[derive(Debug, Clone)]
pub struct ItemPostPublishContext<T> {
    pub published: T,
    pub destination: T,
    pub manifest_entry: ManifestEntry,
}

impl<T> ItemPostPublishContext<T> {
    pub fn new(published: T, destination: T, manifest_entry: ManifestEntry) -> Self {
        Self {
            published,
            destination,
            manifest_entry,
        }
    }

    pub fn map<U>(self, mut f: impl FnMut(T) -> U) -> ItemPostPublishContext<U> {
        ItemPostPublishContext {
            published: f(self.published),
            destination: f(self.destination),
            manifest_entry: self.manifest_entry,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::engine::manifest::MigrationStatus;

    fn entry() -> ManifestEntry {
        let location = ContentLocation::new(["Default", "doc"]);
        ManifestEntry::pending(ContentReference::new("doc", location.clone()), location)
    }

    #[test]
    fn location_name_is_last_segment() {
        let loc = ContentLocation::new(["Projects", "Finance", "Budget"]);
        assert_eq!(loc.name(), "Budget");
        assert_eq!(loc.to_string(), "Projects/Finance/Budget");
    }

    #[test]
    fn rename_returns_new_location() {
        let loc = ContentLocation::new(["Projects", "Budget"]);
        let renamed = loc.rename("Budget2");
        assert_eq!(loc.name(), "Budget");
        assert_eq!(renamed.name(), "Budget2");
        assert_eq!(renamed.segments()[0], "Projects");
    }

    #[test]
    fn empty_location_rename_sets_name() {
        let loc = ContentLocation::new(Vec::<String>::new());
        assert_eq!(loc.name(), "");
        assert_eq!(loc.rename("solo").name(), "solo");
    }

    #[test]
    fn map_to_keeps_item_and_replaces_location() {
        let ctx = MappingContext::new("payload", ContentLocation::from_name("alice"));
        let mapped = ctx.clone().map_to(ContentLocation::from_name("alice2"));
        assert_eq!(mapped.item, "payload");
        assert_eq!(mapped.mapped_location.name(), "alice2");
        // the original context we cloned from is untouched
        assert_eq!(ctx.mapped_location.name(), "alice");
    }

    #[test]
    fn migration_item_map_preserves_manifest_entry() {
        let item = MigrationItem::new(7u32, entry());
        let mapped = item.map(|n| n.to_string());
        assert_eq!(mapped.item, "7");
        assert_eq!(mapped.manifest_entry.status, MigrationStatus::Pending);
    }

    #[test]
    fn content_reference_serializes() {
        let r = ContentReference::new("doc", ContentLocation::from_name("doc"));
        let json = serde_json::to_string(&r).unwrap();
        let back: ContentReference = serde_json::from_str(&json).unwrap();
        assert_eq!(back, r);
    }
}
