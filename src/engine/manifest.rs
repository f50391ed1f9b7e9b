//! Migration manifest
//!
//! The manifest records where each source item is headed and how far it
//! got. The host owns persistence; hooks reach the manifest through the
//! scoped service accessor and treat it as an opaque entry store.

use super::content::{ContentLocation, ContentReference};
use chrono::{DateTime, Utc};
use dashmap::DashMap;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Where a manifest entry is in its lifecycle.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MigrationStatus {
    Pending,
    Migrated,
    Skipped,
    Errored,
}

/// One manifest row: a source item, where it is mapped to, and status.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ManifestEntry {
    pub source: ContentReference,
    pub mapped_location: ContentLocation,
    pub status: MigrationStatus,
    pub migrated_at: Option<DateTime<Utc>>,
}

impl ManifestEntry {
    /// A fresh entry mapped to its own source location.
    pub fn pending(source: ContentReference, mapped_location: ContentLocation) -> Self {
        Self {
            source,
            mapped_location,
            status: MigrationStatus::Pending,
            migrated_at: None,
        }
    }

    pub fn with_status(mut self, status: MigrationStatus) -> Self {
        if status == MigrationStatus::Migrated {
            self.migrated_at = Some(Utc::now());
        }
        self.status = status;
        self
    }
}

/// Concurrent manifest entry store, keyed by source item id.
///
/// Safe for concurrent hook invocations across scopes; hooks read and
/// update entries, the host persists the whole thing between runs.
#[derive(Debug, Default)]
pub struct MigrationManifest {
    entries: DashMap<Uuid, ManifestEntry>,
}

impl MigrationManifest {
    pub fn new() -> Self {
        Self {
            entries: DashMap::new(),
        }
    }

    pub fn entry_for(&self, source_id: &Uuid) -> Option<ManifestEntry> {
        self.entries.get(source_id).map(|r| r.clone())
    }

    pub fn set_entry(&self, entry: ManifestEntry) {
        self.entries.insert(entry.source.id, entry);
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Snapshot of all entries, in no particular order.
    pub fn entries(&self) -> Vec<ManifestEntry> {
        self.entries.iter().map(|r| r.clone()).collect()
    }
}
