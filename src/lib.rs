//! Trestle: hook adapter layer for content migration engines
//!
//! Extension code written against a lightweight object model (filters,
//! content mappings, transformers, lifecycle hooks) is adapted at
//! registration time into the statically-typed, generically-
//! parameterized hook interfaces a migration engine invokes through its
//! per-scope, dependency-injected execution protocol.
//!
//! # Core concepts
//!
//! - **Wrappers**: extension-side types exposing host content, with a
//!   registry for the dynamic host-type ⇄ wrapper-type correspondence
//! - **Builders**: per-category registration surfaces producing
//!   immutable, query-by-interface factory collections
//! - **Adapters**: synthesized per scope, bridging calling conventions
//!   and wrapping payloads both ways
//!
//! # Example
//!
//! ```
//! use std::sync::Arc;
//! use trestle::engine::MigrationItem;
//! use trestle::hooks::FilterBuilder;
//! use trestle::wrappers::{ContentWrapper, WrapperRegistry};
//!
//! #[derive(Debug, Clone)]
//! struct HostUser { name: String }
//!
//! struct User(HostUser);
//!
//! impl ContentWrapper for User {
//!     type Host = HostUser;
//!     const CONTENT_NAME: &'static str = "user";
//!     fn wrap(host: HostUser) -> Self { Self(host) }
//!     fn into_host(self) -> HostUser { self.0 }
//!     fn host(&self) -> &HostUser { &self.0 }
//! }
//!
//! let wrappers = Arc::new(WrapperRegistry::new());
//! wrappers.register::<User>().unwrap();
//!
//! let mut filters = FilterBuilder::new(wrappers);
//! filters.add_fn::<User, _>(|items: Vec<MigrationItem<User>>| {
//!     Ok(items.into_iter().filter(|i| i.item.host().name != "Test").collect())
//! });
//! let collection = filters.build();
//! assert_eq!(collection.len(), 1);
//! ```

pub mod engine;
pub mod extensions;
pub mod hooks;
pub mod services;
pub mod wrappers;

pub use engine::{CancellationToken, ServiceMap, ServiceScope};
pub use hooks::{HookError, HookFactory, HookFactoryCollection, HookResult, InterfaceId};
pub use services::ScopedServices;
pub use wrappers::{ContentWrapper, WrapperRegistry};

/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
