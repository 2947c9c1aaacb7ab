//! crawl::boundary
//!
//! Ownership filter: does a discovered entity belong to the namespace under
//! inspection, or to an external dependency?
//!
//! # Heuristic
//!
//! An entity is kept when its defining namespace's source-location
//! descriptor contains the root's name wrapped as a path segment
//! (`/name/`). This treats "the defining module's file path passes through
//! a directory named after the root" as a proxy for ownership. It is a
//! known approximation: a location string that happens to contain the
//! segment for unrelated reasons over-matches, and vendored layouts can
//! under-match. The quirks are part of the observable contract and are
//! preserved as-is.
//!
//! # When in doubt, keep
//!
//! Every case where ownership cannot be determined resolves to "do not
//! skip": missing defining-namespace metadata, failed resolution of that
//! identifier, and a missing or non-string location descriptor. Skipping
//! is only justified by positive evidence of foreign origin.

use crate::core::types::{EntityId, EntityKind};
use crate::graph::traits::Reflect;

/// Boundary filter fixed to one root namespace.
#[derive(Debug, Clone)]
pub struct BoundaryFilter {
    root: EntityId,
    segment: String,
}

impl BoundaryFilter {
    /// Build a filter for the given root namespace.
    pub fn for_root<R: Reflect>(graph: &R, root: EntityId) -> Self {
        let name = graph.namespace_name(root).unwrap_or_default();
        Self {
            root,
            segment: format!("/{}/", name),
        }
    }

    /// Whether the entity should be excluded from the crawl.
    ///
    /// Resolving the entity's defining namespace may load that namespace as
    /// a side effect; a load failure means ownership cannot be determined
    /// and the entity is kept.
    pub fn should_skip<R: Reflect>(&self, graph: &R, entity: EntityId) -> bool {
        let namespace = if graph.kind(entity) == EntityKind::Namespace {
            entity
        } else {
            let ident = match graph.defining_namespace(entity) {
                Some(ident) => ident,
                None => return false,
            };
            match graph.resolve_namespace(ident) {
                Ok(namespace) => namespace,
                Err(_) => return false,
            }
        };

        if namespace == self.root {
            return false;
        }

        match graph.source_location(namespace) {
            Some(location) => !location.contains(&self.segment),
            None => false,
        }
    }
}
