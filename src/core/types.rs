//! core::types
//!
//! Strong types for core domain concepts.
//!
//! # Types
//!
//! - [`EntityId`] - Stable identity of an entity in the walked graph
//! - [`EntityKind`] - Namespace, composite type, or leaf value
//! - [`ErrorReason`] - The fixed set of recoverable crawl failures
//! - [`CrawlError`] - A recorded failure: reason plus the path it occurred at
//! - [`CrawlResult`] - The output of one crawl: public, private, errors
//!
//! # Identity
//!
//! Entities in the walked graph may be unhashable or may alias each other,
//! so deduplication is by identity, not value. [`EntityId`] is the arena
//! index assigned by the graph store the first time an entity is observed;
//! two ids are equal exactly when they denote the same entity.

use std::collections::BTreeSet;
use std::fmt;

/// Stable identity of an entity in the walked graph.
///
/// Ids are minted by the [`crate::graph::GraphStore`] arena and are only
/// meaningful to the store that created them.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct EntityId(u32);

impl EntityId {
    /// Create an id from an arena index.
    pub(crate) fn from_index(index: usize) -> Self {
        Self(index as u32)
    }

    /// The arena index this id denotes.
    pub(crate) fn index(self) -> usize {
        self.0 as usize
    }
}

impl fmt::Display for EntityId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// The kind of a discovered entity.
///
/// The crawler dispatches on kind: namespaces are recursed into, composite
/// types are flattened one level, leaves are recorded as-is.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EntityKind {
    /// A container exposing named child entities.
    Namespace,
    /// A type-like entity describing a shape via named members.
    Composite,
    /// Anything else.
    Leaf,
}

/// The fixed set of failure kinds recorded during a crawl.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorReason {
    /// A fetched child referenced a namespace that cannot be located or
    /// loaded.
    UnknownModule,
    /// A listed child could not be retrieved from its parent.
    UnaccessibleAttribute,
}

impl fmt::Display for ErrorReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ErrorReason::UnknownModule => write!(f, "unknown module"),
            ErrorReason::UnaccessibleAttribute => write!(f, "unaccessible attribute"),
        }
    }
}

/// A recorded, non-fatal crawl failure.
///
/// The path is the dot-joined path of the namespace whose child failed, not
/// the failing child itself.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CrawlError {
    /// What went wrong.
    pub reason: ErrorReason,
    /// Where it went wrong.
    pub path: String,
}

impl CrawlError {
    /// Create a new error record.
    pub fn new(reason: ErrorReason, path: impl Into<String>) -> Self {
        Self {
            reason,
            path: path.into(),
        }
    }
}

impl fmt::Display for CrawlError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.reason, self.path)
    }
}

/// The result of one crawl.
///
/// Public and private paths are deduplicated and lexicographically sorted;
/// errors preserve discovery order and are not deduplicated.
///
/// # Example
///
/// ```
/// use surfacer::core::types::CrawlResult;
///
/// let result = CrawlResult::default();
/// assert!(result.public.is_empty());
/// assert!(result.is_clean());
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CrawlResult {
    /// Paths whose every segment is public.
    pub public: BTreeSet<String>,
    /// Paths with at least one private segment.
    pub private: BTreeSet<String>,
    /// Recoverable failures, in discovery order.
    pub errors: Vec<CrawlError>,
}

impl CrawlResult {
    /// True when the crawl recorded no failures.
    pub fn is_clean(&self) -> bool {
        self.errors.is_empty()
    }

    /// Total number of classified paths.
    pub fn len(&self) -> usize {
        self.public.len() + self.private.len()
    }

    /// True when nothing at all was recorded.
    pub fn is_empty(&self) -> bool {
        self.public.is_empty() && self.private.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn error_reason_display_is_stable() {
        assert_eq!(ErrorReason::UnknownModule.to_string(), "unknown module");
        assert_eq!(
            ErrorReason::UnaccessibleAttribute.to_string(),
            "unaccessible attribute"
        );
    }

    #[test]
    fn crawl_error_renders_reason_then_path() {
        let err = CrawlError::new(ErrorReason::UnknownModule, "pkg.sub");
        assert_eq!(err.to_string(), "unknown module: pkg.sub");
    }

    #[test]
    fn entity_ids_compare_by_index() {
        let a = EntityId::from_index(0);
        let b = EntityId::from_index(1);
        assert_ne!(a, b);
        assert_eq!(a, EntityId::from_index(0));
        assert!(a < b);
    }

    #[test]
    fn empty_result_is_clean_and_empty() {
        let result = CrawlResult::default();
        assert!(result.is_clean());
        assert!(result.is_empty());
        assert_eq!(result.len(), 0);
    }
}
