//! Module resolution.
//!
//! The loader never executes file contents. The host supplies a
//! [`ModuleSource`] mapping absolute file paths to already-loaded values,
//! and the loader only asks it for default exports. [`StaticModules`] is
//! the in-memory implementation used by applications and tests alike.

use std::collections::HashMap;
use std::path::{Path, PathBuf};

/// A module as the host registered it.
///
/// The distinction matters: a module can be present on disk and loadable
/// while still not exposing a default export, in which case the loader
/// drops the file instead of producing an empty item.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ModuleRecord<T> {
    /// Module with an explicit default export.
    Default(T),
    /// Loadable module without a default export.
    Bare,
}

/// Capability the host injects to resolve file paths to exported values.
pub trait ModuleSource {
    type Export;

    /// Default export of the module at `path`, or `None` when the module is
    /// unknown or carries no default export.
    fn default_export(&self, path: &Path) -> Option<Self::Export>;
}

/// In-memory path-to-module registry.
#[derive(Debug, Clone)]
pub struct StaticModules<T> {
    modules: HashMap<PathBuf, ModuleRecord<T>>,
}

impl<T> StaticModules<T> {
    pub fn new() -> Self {
        Self {
            modules: HashMap::new(),
        }
    }

    /// Register a module with a default export.
    pub fn insert(&mut self, path: impl Into<PathBuf>, export: T) {
        self.modules
            .insert(path.into(), ModuleRecord::Default(export));
    }

    /// Register a module that exposes no default export. Files resolved to
    /// such modules are dropped by the loader.
    pub fn insert_bare(&mut self, path: impl Into<PathBuf>) {
        self.modules.insert(path.into(), ModuleRecord::Bare);
    }

    pub fn len(&self) -> usize {
        self.modules.len()
    }

    pub fn is_empty(&self) -> bool {
        self.modules.is_empty()
    }
}

impl<T> Default for StaticModules<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T: Clone> ModuleSource for StaticModules<T> {
    type Export = T;

    fn default_export(&self, path: &Path) -> Option<T> {
        match self.modules.get(path) {
            Some(ModuleRecord::Default(export)) => Some(export.clone()),
            Some(ModuleRecord::Bare) | None => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_export_is_returned() {
        let mut modules = StaticModules::new();
        modules.insert("/app/service/user.js", 7_u32);
        assert_eq!(
            modules.default_export(Path::new("/app/service/user.js")),
            Some(7)
        );
    }

    #[test]
    fn bare_module_resolves_to_none() {
        let mut modules: StaticModules<u32> = StaticModules::new();
        modules.insert_bare("/app/service/helper.js");
        assert_eq!(
            modules.default_export(Path::new("/app/service/helper.js")),
            None
        );
    }

    #[test]
    fn unknown_path_resolves_to_none() {
        let modules: StaticModules<u32> = StaticModules::new();
        assert_eq!(modules.default_export(Path::new("/app/missing.js")), None);
    }
}
