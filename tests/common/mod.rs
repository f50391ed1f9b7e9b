//! Shared fixtures for integration tests

use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};
use trestle::engine::{
    ContentLocation, ContentReference, ManifestEntry, MigrationItem, ServiceMap, ServiceScope,
    XmlDocument, XmlElement,
};
use trestle::hooks::{DocumentStore, HookResult};
use trestle::wrappers::{ContentWrapper, UserContent, WrapperRegistry};

#[derive(Debug, Clone, PartialEq)]
pub struct HostUser {
    pub name: String,
}

impl HostUser {
    pub fn named(name: &str) -> Self {
        Self { name: name.into() }
    }
}

pub struct User(HostUser);

impl ContentWrapper for User {
    type Host = HostUser;
    const CONTENT_NAME: &'static str = "user";

    fn wrap(host: HostUser) -> Self {
        Self(host)
    }
    fn into_host(self) -> HostUser {
        self.0
    }
    fn host(&self) -> &HostUser {
        &self.0
    }
}

impl UserContent for User {}

#[derive(Debug, Clone, PartialEq)]
pub struct HostWorkbook {
    pub name: String,
    pub has_extracts: bool,
}

pub struct Workbook(HostWorkbook);

impl ContentWrapper for Workbook {
    type Host = HostWorkbook;
    const CONTENT_NAME: &'static str = "workbook";

    fn wrap(host: HostWorkbook) -> Self {
        Self(host)
    }
    fn into_host(self) -> HostWorkbook {
        self.0
    }
    fn host(&self) -> &HostWorkbook {
        &self.0
    }
}

pub fn entry_for(name: &str) -> ManifestEntry {
    let location = ContentLocation::from_name(name);
    ManifestEntry::pending(ContentReference::new(name, location.clone()), location)
}

pub fn user_item(name: &str) -> MigrationItem<HostUser> {
    MigrationItem::new(HostUser::named(name), entry_for(name))
}

/// Install a test subscriber so registration and resolve `debug!`
/// events show up under `--nocapture`. Safe to call from every test;
/// only the first install wins.
pub fn init_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_max_level(tracing::Level::DEBUG)
        .with_test_writer()
        .try_init();
}

pub fn registry() -> Arc<WrapperRegistry> {
    init_tracing();
    let wrappers = WrapperRegistry::new();
    wrappers.register::<User>().unwrap();
    wrappers.register::<Workbook>().unwrap();
    Arc::new(wrappers)
}

pub fn empty_scope() -> Arc<dyn ServiceScope> {
    Arc::new(ServiceMap::new())
}

/// Document store that counts loads and persists and records the last
/// persisted document.
pub struct CountingStore {
    document: XmlDocument,
    loads: AtomicUsize,
    persists: AtomicUsize,
    pub persisted: Mutex<Option<XmlDocument>>,
}

impl CountingStore {
    pub fn with_root(root: XmlElement) -> Self {
        Self {
            document: XmlDocument::new(root),
            loads: AtomicUsize::new(0),
            persists: AtomicUsize::new(0),
            persisted: Mutex::new(None),
        }
    }

    pub fn load_count(&self) -> usize {
        self.loads.load(Ordering::Relaxed)
    }

    pub fn persist_count(&self) -> usize {
        self.persists.load(Ordering::Relaxed)
    }
}

impl DocumentStore for CountingStore {
    fn load(&self) -> HookResult<XmlDocument> {
        self.loads.fetch_add(1, Ordering::Relaxed);
        Ok(self.document.clone())
    }

    fn persist(&self, document: &XmlDocument) -> HookResult<()> {
        self.persists.fetch_add(1, Ordering::Relaxed);
        *self.persisted.lock().unwrap() = Some(document.clone());
        Ok(())
    }
}
