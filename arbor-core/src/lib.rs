//! # Arbor Core
//!
//! Convention-based filesystem loader: point it at one or more base
//! directories and a glob pattern set, and it folds the matching files into
//! nested namespace trees so application code can reference
//! `service.foo.Bar` without manual registration. Files exporting ORM
//! entity classes are additionally resolved to live repository handles:
//! a tree repository when the entity participates in a hierarchical
//! structure, a standard repository otherwise.
//!
//! ## Overview
//!
//! - **Name transform**: `foo_bar/baz-qux.js` → `["fooBar", "BazQux"]`;
//!   only the final segment is capitalized
//! - **Scanning**: synchronous walk of base directories, glob-filtered,
//!   regular files only
//! - **Module resolution**: the host injects a [`ModuleSource`] mapping
//!   paths to already-loaded values; nothing is ever executed from disk
//! - **Dual trees**: one pass produces the exports tree and the repository
//!   tree with identical shapes
//! - **Repository resolution**: an injected [`EntityRegistry`] decides
//!   tree vs standard repository per entity, scoped to a named connection
//!
//! The loader is a start-up path: single-threaded, blocking, fail-fast,
//! one directory snapshot per invocation.
//!
//! ## Example
//!
//! ```no_run
//! use std::convert::Infallible;
//!
//! use arbor_core::{EntityRegistry, Loader, StaticModules};
//!
//! #[derive(Clone)]
//! struct Entity(&'static str);
//!
//! struct Registry;
//!
//! impl EntityRegistry for Registry {
//!     type Entity = Entity;
//!     type Repository = String;
//!     type Error = Infallible;
//!
//!     fn is_tree_entity(&self, _entity: &Entity) -> bool {
//!         false
//!     }
//!
//!     fn repository(&self, entity: &Entity, connection: &str) -> Result<String, Infallible> {
//!         Ok(format!("{}@{}", entity.0, connection))
//!     }
//!
//!     fn tree_repository(&self, entity: &Entity, connection: &str) -> Result<String, Infallible> {
//!         Ok(format!("tree:{}@{}", entity.0, connection))
//!     }
//! }
//!
//! fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let mut modules = StaticModules::new();
//!     modules.insert("app/service/group/repository.js", Entity("group"));
//!
//!     let loader = Loader::new(["app/service"], ["**/*.js"]);
//!     let loaded = loader.load_default(&modules, &Registry)?;
//!     assert!(loaded.exports.leaf(&["group", "Repository"]).is_some());
//!     Ok(())
//! }
//! ```

#![cfg_attr(docsrs, feature(doc_cfg))]

/// Error types and the crate-wide result alias
pub mod error;

/// Loader entry points and item assembly
pub mod loader;

/// Module sources (host-injected path-to-export resolution)
pub mod modules;

/// Path-to-namespace name transformation
pub mod names;

/// Tagged namespace trees
pub mod namespace;

/// Entity registry port and repository resolution
pub mod ports;

/// Filesystem scanning
pub mod scanner;

pub use error::{LoaderError, Result};
pub use loader::{DEFAULT_CONNECTION, Loaded, LoadedItem, Loader, ScannedFile};
pub use modules::{ModuleRecord, ModuleSource, StaticModules};
pub use names::{NamespacePath, to_upper_camel};
pub use namespace::{NamespaceTree, Node};
pub use ports::{EntityRegistry, resolve_repository};
pub use scanner::{FileScanner, ScanMatch};
