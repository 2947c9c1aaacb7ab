//! graph::store
//!
//! In-memory arena holding the namespace graph under inspection.
//!
//! # Design
//!
//! Entities live in a `Vec`; an [`EntityId`] is the stable arena index
//! assigned when the entity is first added. Deduplication during a crawl is
//! by id, so aliased and cyclic structure is expressed by binding the same
//! id in more than one place.
//!
//! The store doubles as the fixture builder for tests: bindings, phantom
//! listings, export lists, listing failures, inaccessible attributes,
//! unknown-module references, and forced load failures can all be assembled
//! programmatically.
//!
//! # Resolution cache
//!
//! `resolve_namespace` memoizes successful loads and records every actual
//! load attempt, so tests can assert that repeated resolution
//! of one identifier loads at most once. Failed loads are not cached.

use std::cell::RefCell;
use std::collections::HashMap;

use crate::core::types::{EntityId, EntityKind};

use super::traits::{FetchError, ListError, Reflect, ResolveError};

/// What a bound attribute name points at.
#[derive(Debug, Clone)]
enum AttrTarget {
    /// A real entity.
    Entity(EntityId),
    /// A reference to a namespace that cannot be located or loaded.
    UnknownModule(String),
    /// A name whose retrieval fails outright.
    Inaccessible(String),
}

#[derive(Debug, Default)]
struct NamespaceRecord {
    name: String,
    location: Option<String>,
    dir_names: Vec<String>,
    dir_error: Option<String>,
    exports: Vec<String>,
    exports_error: Option<String>,
    bindings: HashMap<String, AttrTarget>,
}

#[derive(Debug)]
struct CompositeRecord {
    defined_in: Option<String>,
    members: Vec<String>,
}

#[derive(Debug)]
struct LeafRecord {
    defined_in: Option<String>,
}

#[derive(Debug)]
enum EntityRecord {
    Namespace(NamespaceRecord),
    Composite(CompositeRecord),
    Leaf(LeafRecord),
}

/// In-memory namespace graph implementing [`Reflect`].
///
/// # Example
///
/// ```
/// use surfacer::graph::{GraphStore, Reflect};
/// use surfacer::core::types::EntityKind;
///
/// let mut store = GraphStore::new();
/// let root = store.add_namespace("pkg", Some("/site/pkg/__init__.py"));
/// let leaf = store.add_leaf(Some("pkg"));
/// store.bind(root, "answer", leaf);
///
/// assert_eq!(store.kind(root), EntityKind::Namespace);
/// assert_eq!(store.fetch_attr(root, "answer"), Ok(leaf));
/// assert_eq!(store.resolve_namespace("pkg"), Ok(root));
/// ```
#[derive(Debug, Default)]
pub struct GraphStore {
    entities: Vec<EntityRecord>,
    registry: HashMap<String, EntityId>,
    failing_loads: HashMap<String, String>,
    resolve_cache: RefCell<HashMap<String, EntityId>>,
    load_log: RefCell<Vec<String>>,
}

impl GraphStore {
    /// Create an empty store.
    pub fn new() -> Self {
        Self::default()
    }

    fn push(&mut self, record: EntityRecord) -> EntityId {
        let id = EntityId::from_index(self.entities.len());
        self.entities.push(record);
        id
    }

    fn record(&self, entity: EntityId) -> &EntityRecord {
        &self.entities[entity.index()]
    }

    fn namespace_mut(&mut self, entity: EntityId) -> &mut NamespaceRecord {
        match &mut self.entities[entity.index()] {
            EntityRecord::Namespace(ns) => ns,
            _ => panic!("entity {} is not a namespace", entity),
        }
    }

    /// Add a namespace entity and register it under its identifier.
    pub fn add_namespace(&mut self, ident: &str, location: Option<&str>) -> EntityId {
        let id = self.push(EntityRecord::Namespace(NamespaceRecord {
            name: ident.to_string(),
            location: location.map(str::to_string),
            ..NamespaceRecord::default()
        }));
        self.registry.insert(ident.to_string(), id);
        id
    }

    /// Add a composite type entity with the given member names.
    pub fn add_composite(&mut self, defined_in: Option<&str>, members: &[&str]) -> EntityId {
        self.push(EntityRecord::Composite(CompositeRecord {
            defined_in: defined_in.map(str::to_string),
            members: members.iter().map(|m| m.to_string()).collect(),
        }))
    }

    /// Add a leaf entity.
    pub fn add_leaf(&mut self, defined_in: Option<&str>) -> EntityId {
        self.push(EntityRecord::Leaf(LeafRecord {
            defined_in: defined_in.map(str::to_string),
        }))
    }

    /// Bind a child entity under a namespace and list it.
    ///
    /// # Panics
    ///
    /// Panics when `namespace` does not denote a namespace entity.
    pub fn bind(&mut self, namespace: EntityId, name: &str, child: EntityId) {
        let ns = self.namespace_mut(namespace);
        ns.dir_names.push(name.to_string());
        ns.bindings
            .insert(name.to_string(), AttrTarget::Entity(child));
    }

    /// Bind a name whose target namespace cannot be located or loaded.
    pub fn bind_unknown_module(&mut self, namespace: EntityId, name: &str, target: &str) {
        let ns = self.namespace_mut(namespace);
        ns.dir_names.push(name.to_string());
        ns.bindings
            .insert(name.to_string(), AttrTarget::UnknownModule(target.to_string()));
    }

    /// Bind a name whose retrieval fails.
    pub fn bind_inaccessible(&mut self, namespace: EntityId, name: &str, message: &str) {
        let ns = self.namespace_mut(namespace);
        ns.dir_names.push(name.to_string());
        ns.bindings
            .insert(name.to_string(), AttrTarget::Inaccessible(message.to_string()));
    }

    /// List a name without binding anything under it.
    ///
    /// Fetching such a name fails like any other missing attribute.
    pub fn add_listed_name(&mut self, namespace: EntityId, name: &str) {
        self.namespace_mut(namespace).dir_names.push(name.to_string());
    }

    /// Declare a name in the namespace's explicit export list.
    ///
    /// Exported names need not be listed or bound; fetching a phantom
    /// export fails.
    pub fn declare_export(&mut self, namespace: EntityId, name: &str) {
        self.namespace_mut(namespace).exports.push(name.to_string());
    }

    /// Make the general attribute listing of a namespace fail.
    pub fn fail_attr_listing(&mut self, namespace: EntityId, message: &str) {
        self.namespace_mut(namespace).dir_error = Some(message.to_string());
    }

    /// Make the export listing of a namespace fail.
    pub fn fail_export_listing(&mut self, namespace: EntityId, message: &str) {
        self.namespace_mut(namespace).exports_error = Some(message.to_string());
    }

    /// Make loading the given identifier fail, even if it is registered.
    pub fn fail_load(&mut self, ident: &str, message: &str) {
        self.failing_loads
            .insert(ident.to_string(), message.to_string());
    }

    /// Identifiers for which an actual load was attempted, in order.
    ///
    /// Cache hits do not appear here.
    pub fn recorded_loads(&self) -> Vec<String> {
        self.load_log.borrow().clone()
    }

    /// Number of entities in the arena.
    pub fn len(&self) -> usize {
        self.entities.len()
    }

    /// True when the arena is empty.
    pub fn is_empty(&self) -> bool {
        self.entities.is_empty()
    }
}

impl Reflect for GraphStore {
    fn kind(&self, entity: EntityId) -> EntityKind {
        match self.record(entity) {
            EntityRecord::Namespace(_) => EntityKind::Namespace,
            EntityRecord::Composite(_) => EntityKind::Composite,
            EntityRecord::Leaf(_) => EntityKind::Leaf,
        }
    }

    fn namespace_name(&self, entity: EntityId) -> Option<&str> {
        match self.record(entity) {
            EntityRecord::Namespace(ns) => Some(&ns.name),
            _ => None,
        }
    }

    fn list_attrs(&self, namespace: EntityId) -> Result<Vec<String>, ListError> {
        match self.record(namespace) {
            EntityRecord::Namespace(ns) => match &ns.dir_error {
                Some(message) => Err(ListError(message.clone())),
                None => Ok(ns.dir_names.clone()),
            },
            _ => Ok(Vec::new()),
        }
    }

    fn list_exports(&self, namespace: EntityId) -> Result<Vec<String>, ListError> {
        match self.record(namespace) {
            EntityRecord::Namespace(ns) => match &ns.exports_error {
                Some(message) => Err(ListError(message.clone())),
                None => Ok(ns.exports.clone()),
            },
            _ => Ok(Vec::new()),
        }
    }

    fn fetch_attr(&self, namespace: EntityId, name: &str) -> Result<EntityId, FetchError> {
        let ns = match self.record(namespace) {
            EntityRecord::Namespace(ns) => ns,
            _ => return Err(FetchError::Unaccessible(name.to_string())),
        };
        match ns.bindings.get(name) {
            Some(AttrTarget::Entity(id)) => Ok(*id),
            Some(AttrTarget::UnknownModule(target)) => {
                Err(FetchError::UnknownModule(target.clone()))
            }
            Some(AttrTarget::Inaccessible(message)) => {
                Err(FetchError::Unaccessible(message.clone()))
            }
            None => Err(FetchError::Unaccessible(format!(
                "'{}' has no attribute '{}'",
                ns.name, name
            ))),
        }
    }

    fn list_members(&self, composite: EntityId) -> Vec<String> {
        match self.record(composite) {
            EntityRecord::Composite(ty) => ty.members.clone(),
            _ => Vec::new(),
        }
    }

    fn defining_namespace(&self, entity: EntityId) -> Option<&str> {
        match self.record(entity) {
            EntityRecord::Namespace(_) => None,
            EntityRecord::Composite(ty) => ty.defined_in.as_deref(),
            EntityRecord::Leaf(leaf) => leaf.defined_in.as_deref(),
        }
    }

    fn source_location(&self, namespace: EntityId) -> Option<String> {
        match self.record(namespace) {
            EntityRecord::Namespace(ns) => ns.location.clone(),
            _ => None,
        }
    }

    fn resolve_namespace(&self, ident: &str) -> Result<EntityId, ResolveError> {
        if let Some(id) = self.resolve_cache.borrow().get(ident) {
            return Ok(*id);
        }

        self.load_log.borrow_mut().push(ident.to_string());

        if let Some(message) = self.failing_loads.get(ident) {
            return Err(ResolveError::LoadFailed {
                ident: ident.to_string(),
                message: message.clone(),
            });
        }

        match self.registry.get(ident) {
            Some(id) => {
                self.resolve_cache
                    .borrow_mut()
                    .insert(ident.to_string(), *id);
                Ok(*id)
            }
            None => Err(ResolveError::NotFound(ident.to_string())),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn arena_ids_are_stable_and_distinct() {
        let mut store = GraphStore::new();
        let a = store.add_leaf(None);
        let b = store.add_leaf(None);
        assert_ne!(a, b);
        assert_eq!(store.kind(a), EntityKind::Leaf);
        assert_eq!(store.len(), 2);
    }

    #[test]
    fn resolve_is_memoized_after_first_load() {
        let mut store = GraphStore::new();
        let ns = store.add_namespace("pkg", None);

        assert_eq!(store.resolve_namespace("pkg"), Ok(ns));
        assert_eq!(store.resolve_namespace("pkg"), Ok(ns));
        assert_eq!(store.resolve_namespace("pkg"), Ok(ns));

        assert_eq!(store.recorded_loads(), vec!["pkg".to_string()]);
    }

    #[test]
    fn failed_loads_are_not_cached() {
        let mut store = GraphStore::new();
        store.add_namespace("pkg.broken", None);
        store.fail_load("pkg.broken", "init raised");

        for _ in 0..2 {
            let err = store.resolve_namespace("pkg.broken").unwrap_err();
            assert!(matches!(err, ResolveError::LoadFailed { .. }));
        }

        // Every attempt went through the loader again.
        assert_eq!(store.recorded_loads().len(), 2);
    }

    #[test]
    fn unregistered_identifier_is_not_found() {
        let store = GraphStore::new();
        assert_eq!(
            store.resolve_namespace("ghost"),
            Err(ResolveError::NotFound("ghost".to_string()))
        );
    }

    #[test]
    fn fetch_of_unbound_name_is_unaccessible() {
        let mut store = GraphStore::new();
        let ns = store.add_namespace("pkg", None);
        store.add_listed_name(ns, "phantom");

        let err = store.fetch_attr(ns, "phantom").unwrap_err();
        assert!(matches!(err, FetchError::Unaccessible(_)));
    }

    #[test]
    fn unknown_module_binding_surfaces_on_fetch() {
        let mut store = GraphStore::new();
        let ns = store.add_namespace("pkg", None);
        store.bind_unknown_module(ns, "lazy", "pkg.lazy");

        assert_eq!(
            store.fetch_attr(ns, "lazy"),
            Err(FetchError::UnknownModule("pkg.lazy".to_string()))
        );
    }

    #[test]
    fn listing_failure_carries_the_message() {
        let mut store = GraphStore::new();
        let ns = store.add_namespace("pkg", None);
        store.fail_attr_listing(ns, "listing blew up");

        assert_eq!(
            store.list_attrs(ns),
            Err(ListError("listing blew up".to_string()))
        );
        // The export source is independent and still works.
        assert_eq!(store.list_exports(ns), Ok(Vec::new()));
    }

    #[test]
    fn defining_namespace_only_on_non_namespaces() {
        let mut store = GraphStore::new();
        let ns = store.add_namespace("pkg", None);
        let leaf = store.add_leaf(Some("pkg"));

        assert_eq!(store.defining_namespace(ns), None);
        assert_eq!(store.defining_namespace(leaf), Some("pkg"));
    }
}
