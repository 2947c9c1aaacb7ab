//! crawl::crawler
//!
//! Depth-first walk over the namespace graph.
//!
//! # Algorithm
//!
//! Starting from the root namespace, every node goes through the same
//! gauntlet: boundary filter first (pruning whole subtrees of
//! externally-defined entities), then the visited-set identity guard
//! (mark-before-descend, which is what makes self-referential graphs
//! terminate), then dispatch by kind:
//!
//! - **Namespace**: child names are the union of the general attribute
//!   listing and the explicit export list, deduplicated and sorted so that
//!   traversal order - and with it error-discovery order - is reproducible.
//!   The namespace's own path is recorded, then each child is fetched and
//!   visited. A fetch failure is recorded against the namespace's path and
//!   the walk moves on to the next sibling.
//! - **Composite type**: recorded, then flattened one level - every member
//!   name becomes a classified path, but member values are never walked.
//!   Type metadata expands without bound; the member list is treated as a
//!   flat leaf enumeration instead.
//! - **Leaf**: recorded, nothing to descend into.
//!
//! # Failure semantics
//!
//! Exactly two failure kinds are recorded: `unknown module` and
//! `unaccessible attribute`, both keyed by the dot-joined path of the
//! namespace whose child failed. A listing source that fails wholesale is
//! downgraded to "no names from this source" and reported only on the
//! diagnostic stream. Nothing aborts the crawl.

use std::collections::HashSet;

use crate::core::naming;
use crate::core::types::{CrawlError, CrawlResult, EntityId, EntityKind, ErrorReason};
use crate::graph::traits::{FetchError, Reflect};
use crate::ui::output::{self, Verbosity};

use super::boundary::BoundaryFilter;

/// Crawl the graph reachable from `root` and snapshot its surface.
///
/// `root` must be a namespace entity; it is recorded under its registered
/// identifier (e.g. `pkg.sub` yields paths starting with `pkg.sub`).
///
/// # Example
///
/// ```
/// use surfacer::crawl::crawl;
/// use surfacer::graph::GraphStore;
/// use surfacer::ui::output::Verbosity;
///
/// let mut store = GraphStore::new();
/// let root = store.add_namespace("m", Some("/site/m/__init__.py"));
/// let foo = store.add_leaf(Some("m"));
/// store.bind(root, "foo", foo);
///
/// let result = crawl(&store, root, Verbosity::Quiet);
/// assert!(result.public.contains("m.foo"));
/// assert!(result.is_clean());
/// ```
pub fn crawl<R: Reflect>(graph: &R, root: EntityId, verbosity: Verbosity) -> CrawlResult {
    let root_name = graph.namespace_name(root).unwrap_or_default().to_string();
    let mut walker = Walker {
        graph,
        filter: BoundaryFilter::for_root(graph, root),
        seen: HashSet::new(),
        out: Accumulator::default(),
        verbosity,
    };

    let mut path = Vec::new();
    walker.visit(root, &root_name, &mut path);
    walker.out.finish()
}

/// Classified paths and errors, accumulated during the walk and finished
/// into a [`CrawlResult`] (dedup + sort) at the end.
#[derive(Default)]
struct Accumulator {
    public: Vec<String>,
    private: Vec<String>,
    errors: Vec<CrawlError>,
}

impl Accumulator {
    fn add(&mut self, path: &[String], name: &str) {
        let full = naming::join_path(path, name);
        if naming::is_private_path(path, name) {
            self.private.push(full);
        } else {
            self.public.push(full);
        }
    }

    fn error(&mut self, reason: ErrorReason, path: String) {
        self.errors.push(CrawlError::new(reason, path));
    }

    fn finish(self) -> CrawlResult {
        CrawlResult {
            public: self.public.into_iter().collect(),
            private: self.private.into_iter().collect(),
            errors: self.errors,
        }
    }
}

struct Walker<'g, R: Reflect> {
    graph: &'g R,
    filter: BoundaryFilter,
    seen: HashSet<EntityId>,
    out: Accumulator,
    verbosity: Verbosity,
}

impl<R: Reflect> Walker<'_, R> {
    fn visit(&mut self, entity: EntityId, name: &str, path: &mut Vec<String>) {
        if self.filter.should_skip(self.graph, entity) {
            return;
        }

        // Mark before descending; a namespace that reaches itself again
        // stops here instead of recursing forever.
        if !self.seen.insert(entity) {
            return;
        }

        match self.graph.kind(entity) {
            EntityKind::Namespace => self.visit_namespace(entity, name, path),
            EntityKind::Composite => self.visit_composite(entity, name, path),
            EntityKind::Leaf => self.out.add(path, name),
        }
    }

    fn visit_namespace(&mut self, namespace: EntityId, name: &str, path: &mut Vec<String>) {
        let children = self.child_names(namespace);
        self.out.add(path, name);

        path.push(name.to_string());
        for child in &children {
            match self.graph.fetch_attr(namespace, child) {
                Ok(entity) => self.visit(entity, child, path),
                Err(err) => {
                    let reason = match err {
                        FetchError::UnknownModule(_) => ErrorReason::UnknownModule,
                        FetchError::Unaccessible(_) => ErrorReason::UnaccessibleAttribute,
                    };
                    let at = path.join(".");
                    output::debug(format!("{} (under {})", err, at), self.verbosity);
                    self.out.error(reason, at);
                }
            }
        }
        path.pop();
    }

    fn visit_composite(&mut self, composite: EntityId, name: &str, path: &mut Vec<String>) {
        self.out.add(path, name);

        path.push(name.to_string());
        for member in self.graph.list_members(composite) {
            self.out.add(path, &member);
        }
        path.pop();
    }

    /// Union of the two child-name sources, deduplicated and sorted.
    ///
    /// Either source may fail wholesale; the failure is diagnostic-only and
    /// contributes no names.
    fn child_names(&self, namespace: EntityId) -> Vec<String> {
        let label = self.graph.namespace_name(namespace).unwrap_or("?");
        let mut names = Vec::new();

        match self.graph.list_attrs(namespace) {
            Ok(mut attrs) => names.append(&mut attrs),
            Err(err) => output::warn(
                format!("attribute listing failed for '{}': {}", label, err),
                self.verbosity,
            ),
        }

        match self.graph.list_exports(namespace) {
            Ok(mut exports) => names.append(&mut exports),
            Err(err) => output::warn(
                format!("export listing failed for '{}': {}", label, err),
                self.verbosity,
            ),
        }

        names.sort();
        names.dedup();
        names
    }
}
