//! Entity registry port.
//!
//! The host owns entity metadata and repository construction; the loader
//! only queries. Injecting the capability keeps repository resolution
//! deterministic under test, with no process-wide registry involved.

use crate::error::{LoaderError, Result};

/// Read-only view over the host's entity metadata and repository factory.
///
/// `is_tree_entity` reflects the registry's state at call time; entity
/// classes are expected to be registered before the loader runs.
pub trait EntityRegistry: Send + Sync {
    type Entity;
    type Repository;
    type Error: std::error::Error + Send + Sync + 'static;

    /// Whether the entity participates in a hierarchical (tree) structure.
    fn is_tree_entity(&self, entity: &Self::Entity) -> bool;

    /// Standard repository handle for the entity on the named connection.
    fn repository(
        &self,
        entity: &Self::Entity,
        connection: &str,
    ) -> std::result::Result<Self::Repository, Self::Error>;

    /// Tree repository handle for the entity on the named connection.
    fn tree_repository(
        &self,
        entity: &Self::Entity,
        connection: &str,
    ) -> std::result::Result<Self::Repository, Self::Error>;
}

/// Resolve an exported entity to a repository handle on `connection`.
///
/// Tree entities get a tree repository, everything else a standard one.
/// Registry failures (an unregistered class, say) propagate untranslated as
/// the error source.
pub fn resolve_repository<G>(
    registry: &G,
    entity: &G::Entity,
    connection: &str,
) -> Result<G::Repository>
where
    G: EntityRegistry + ?Sized,
{
    let lookup = if registry.is_tree_entity(entity) {
        registry.tree_repository(entity, connection)
    } else {
        registry.repository(entity, connection)
    };
    lookup.map_err(|err| LoaderError::Repository(Box::new(err)))
}
