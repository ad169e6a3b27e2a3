//! Loader entry points.
//!
//! A [`Loader`] combines the scanner, the name transform, and a host
//! [`ModuleSource`] into item lists and namespace trees. [`Loader::load`]
//! additionally resolves every exported entity to a repository handle via
//! an injected [`EntityRegistry`], producing the parallel repository tree.

use std::path::{Path, PathBuf};

use tracing::{debug, info};

use crate::error::Result;
use crate::modules::ModuleSource;
use crate::names::NamespacePath;
use crate::namespace::NamespaceTree;
use crate::ports::{EntityRegistry, resolve_repository};
use crate::scanner::FileScanner;

/// Connection name used when the caller does not pick one.
pub const DEFAULT_CONNECTION: &str = "default";

/// One discovered file, before module resolution.
#[derive(Debug, Clone)]
pub struct ScannedFile {
    pub namespace_path: NamespacePath,
    pub absolute_path: PathBuf,
    /// Root label plus dot-joined namespace path, e.g.
    /// `service.group.Repository`. Diagnostics only, never used for lookup.
    pub qualified_name: String,
}

/// A discovered file together with its default export.
#[derive(Debug, Clone)]
pub struct LoadedItem<T> {
    pub file: ScannedFile,
    pub export: T,
}

/// The two parallel trees produced by [`Loader::load`].
#[derive(Debug)]
pub struct Loaded<T, R> {
    pub exports: NamespaceTree<T>,
    pub repositories: NamespaceTree<R>,
}

/// Convention-based filesystem loader over base directories and glob
/// patterns.
#[derive(Debug, Clone)]
pub struct Loader {
    directories: Vec<PathBuf>,
    patterns: Vec<String>,
}

impl Loader {
    pub fn new<D, P>(directories: D, patterns: P) -> Self
    where
        D: IntoIterator,
        D::Item: Into<PathBuf>,
        P: IntoIterator,
        P::Item: Into<String>,
    {
        Self {
            directories: directories.into_iter().map(Into::into).collect(),
            patterns: patterns.into_iter().map(Into::into).collect(),
        }
    }

    /// Properties-only scan: namespace paths and file locations, with no
    /// module resolution at all.
    pub fn scan(&self) -> Result<Vec<ScannedFile>> {
        let scanner = FileScanner::new(self.directories.clone(), self.patterns.clone());
        let matches = scanner.scan()?;

        let mut files = Vec::with_capacity(matches.len());
        for found in matches {
            let namespace_path = NamespacePath::from_relative(&found.relative)?;
            let qualified_name =
                format!("{}.{}", root_label(&found.base), namespace_path);
            files.push(ScannedFile {
                namespace_path,
                absolute_path: found.base.join(&found.relative),
                qualified_name,
            });
        }
        Ok(files)
    }

    /// Scan and resolve default exports. Files whose module carries no
    /// default export are dropped.
    pub fn parse<S: ModuleSource>(&self, source: &S) -> Result<Vec<LoadedItem<S::Export>>> {
        let mut items = Vec::new();
        for file in self.scan()? {
            match source.default_export(&file.absolute_path) {
                Some(export) => items.push(LoadedItem { file, export }),
                None => {
                    debug!(path = %file.absolute_path.display(), "no default export, dropping");
                }
            }
        }
        Ok(items)
    }

    /// Build the exports tree and the repository tree in one pass.
    ///
    /// Every exported value is handed to the registry for repository
    /// resolution on `connection`; both trees are folded from the same item
    /// list and therefore share an identical shape.
    pub fn load<S, G>(
        &self,
        source: &S,
        registry: &G,
        connection: &str,
    ) -> Result<Loaded<S::Export, G::Repository>>
    where
        S: ModuleSource,
        G: EntityRegistry<Entity = S::Export>,
    {
        let items = self.parse(source)?;
        info!(items = items.len(), connection, "building namespace trees");

        let mut exports = NamespaceTree::new();
        let mut repositories = NamespaceTree::new();
        for item in items {
            let repository = resolve_repository(registry, &item.export, connection)?;
            repositories.insert(&item.file.namespace_path, repository)?;
            exports.insert(&item.file.namespace_path, item.export)?;
        }

        Ok(Loaded {
            exports,
            repositories,
        })
    }

    /// [`Loader::load`] on the `"default"` connection.
    pub fn load_default<S, G>(
        &self,
        source: &S,
        registry: &G,
    ) -> Result<Loaded<S::Export, G::Repository>>
    where
        S: ModuleSource,
        G: EntityRegistry<Entity = S::Export>,
    {
        self.load(source, registry, DEFAULT_CONNECTION)
    }
}

/// Last path component of a scan root, used as the qualified-name prefix.
fn root_label(base: &Path) -> String {
    base.components()
        .next_back()
        .map(|component| component.as_os_str().to_string_lossy().into_owned())
        .unwrap_or_default()
}
