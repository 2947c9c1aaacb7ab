//! graph::traits
//!
//! The reflection contract the crawler is generic over.
//!
//! # Design
//!
//! The crawler never touches entities directly; it asks a [`Reflect`]
//! implementation for structural facts about them. The contract is
//! deliberately narrow: kind, child listings, attribute fetch, member
//! listing, defining-namespace metadata, source location, and namespace
//! resolution. Everything the walk needs, nothing more.
//!
//! Resolution may load a namespace on demand. Implementations memoize
//! successful loads so repeated resolution of the same identifier does not
//! load twice; failed loads are not cached and simply fail again.

use thiserror::Error;

use crate::core::types::{EntityId, EntityKind};

/// Errors from fetching a child attribute by name.
///
/// These are the only two failure kinds the crawler records.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum FetchError {
    /// The attribute references a namespace that cannot be located or
    /// loaded.
    #[error("unknown module '{0}'")]
    UnknownModule(String),

    /// The attribute is listed but cannot be retrieved.
    #[error("unaccessible attribute '{0}'")]
    Unaccessible(String),
}

/// A child-listing source failed as a whole.
///
/// Downgraded by the crawler to "no names from this source".
#[derive(Debug, Clone, Error, PartialEq, Eq)]
#[error("{0}")]
pub struct ListError(pub String);

/// Errors from resolving a namespace identifier.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum ResolveError {
    /// No namespace is registered under the identifier.
    #[error("namespace '{0}' not found")]
    NotFound(String),

    /// The namespace exists but loading it failed.
    #[error("failed to load namespace '{ident}': {message}")]
    LoadFailed { ident: String, message: String },
}

/// Structural reflection over the walked graph.
pub trait Reflect {
    /// The kind of an entity.
    fn kind(&self, entity: EntityId) -> EntityKind;

    /// The identifier of a namespace entity (e.g. `pkg.sub`).
    ///
    /// `None` for non-namespace entities.
    fn namespace_name(&self, entity: EntityId) -> Option<&str>;

    /// General child-name listing of a namespace.
    ///
    /// May fail as a whole; a failure carries no partial names.
    fn list_attrs(&self, namespace: EntityId) -> Result<Vec<String>, ListError>;

    /// Explicit export list of a namespace.
    ///
    /// Empty when the namespace declares none. May fail independently of
    /// [`Reflect::list_attrs`].
    fn list_exports(&self, namespace: EntityId) -> Result<Vec<String>, ListError>;

    /// Fetch a child entity of a namespace by name.
    fn fetch_attr(&self, namespace: EntityId, name: &str) -> Result<EntityId, FetchError>;

    /// Member names of a composite type.
    fn list_members(&self, composite: EntityId) -> Vec<String>;

    /// Identifier of the namespace an entity was defined in.
    ///
    /// `None` when the entity exposes no such metadata.
    fn defining_namespace(&self, entity: EntityId) -> Option<&str>;

    /// Source-location descriptor of a namespace.
    ///
    /// `None` covers all of: no location recorded, the descriptor is not a
    /// location string, or merely accessing it failed.
    fn source_location(&self, namespace: EntityId) -> Option<String>;

    /// Resolve a namespace identifier to a loaded namespace entity.
    ///
    /// May load the namespace as a side effect; successful loads are
    /// memoized.
    fn resolve_namespace(&self, ident: &str) -> Result<EntityId, ResolveError>;
}
