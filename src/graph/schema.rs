//! graph::schema
//!
//! The JSON graph document the CLI crawls.
//!
//! # Format
//!
//! A document is a map of namespace identifiers to namespace definitions.
//! Attribute definitions are tagged variants; namespaces reference each
//! other by identifier, which is how shared and cyclic structure is
//! expressed.
//!
//! ```json
//! {
//!   "namespaces": {
//!     "pkg": {
//!       "location": "/site-packages/pkg/__init__.py",
//!       "exports": ["run"],
//!       "attrs": {
//!         "run": { "kind": "leaf", "defined_in": "pkg" },
//!         "Config": { "kind": "type", "members": ["debug", "_state"] },
//!         "sub": { "kind": "namespace", "target": "pkg.sub" }
//!       }
//!     },
//!     "pkg.sub": { "location": "/site-packages/pkg/sub.py" }
//!   }
//! }
//! ```
//!
//! # Identity
//!
//! Inline `leaf` and `type` definitions mint fresh entities; `namespace`
//! references share the identity of the referenced namespace. A `namespace`
//! reference whose target is absent from the document becomes an
//! unknown-module binding: fetching it fails, and so does resolving it.
//!
//! # Validation
//!
//! Unknown fields are rejected so typos surface at load time instead of
//! silently shaping the crawl.

use std::collections::BTreeMap;
use std::fs;
use std::path::{Path, PathBuf};

use serde::Deserialize;
use thiserror::Error;

use super::store::GraphStore;

/// Errors from loading a graph document.
#[derive(Debug, Error)]
pub enum SchemaError {
    #[error("failed to read graph document '{path}': {source}")]
    ReadError {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("failed to parse graph document '{path}': {message}")]
    ParseError { path: PathBuf, message: String },
}

/// One attribute of a namespace.
#[derive(Debug, Clone, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum AttrDef {
    /// A plain value.
    Leaf {
        #[serde(default)]
        defined_in: Option<String>,
    },
    /// A composite type with named members.
    Type {
        #[serde(default)]
        defined_in: Option<String>,
        #[serde(default)]
        members: Vec<String>,
    },
    /// A reference to another namespace by identifier.
    Namespace { target: String },
    /// A name whose retrieval fails.
    Inaccessible {
        #[serde(default)]
        message: Option<String>,
    },
}

/// One namespace definition.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct NamespaceDef {
    /// Source-location descriptor; omit to model a namespace without one.
    pub location: Option<String>,

    /// Explicit export list; omit when the namespace declares none.
    pub exports: Option<Vec<String>>,

    /// Attribute name to definition.
    pub attrs: BTreeMap<String, AttrDef>,
}

/// A complete graph document.
#[derive(Debug, Clone, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct GraphDocument {
    /// Namespace identifier to definition.
    pub namespaces: BTreeMap<String, NamespaceDef>,
}

impl GraphDocument {
    /// Load and parse a graph document from disk.
    pub fn load(path: &Path) -> Result<Self, SchemaError> {
        let contents = fs::read_to_string(path).map_err(|source| SchemaError::ReadError {
            path: path.to_path_buf(),
            source,
        })?;
        Self::parse(&contents).map_err(|err| SchemaError::ParseError {
            path: path.to_path_buf(),
            message: err.to_string(),
        })
    }

    /// Parse a graph document from a JSON string.
    pub fn parse(contents: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(contents)
    }

    /// Build the in-memory store described by this document.
    ///
    /// Never fails: a dangling namespace reference is a legitimate graph
    /// shape (an unknown module), not a document error.
    pub fn build(&self) -> GraphStore {
        let mut store = GraphStore::new();
        let mut ids = BTreeMap::new();

        // First pass: mint every namespace so references can cross and
        // cycle freely.
        for (ident, def) in &self.namespaces {
            let id = store.add_namespace(ident, def.location.as_deref());
            ids.insert(ident.clone(), id);
        }

        // Second pass: exports and attribute bindings.
        for (ident, def) in &self.namespaces {
            let ns = ids[ident];

            if let Some(exports) = &def.exports {
                for name in exports {
                    store.declare_export(ns, name);
                }
            }

            for (name, attr) in &def.attrs {
                match attr {
                    AttrDef::Leaf { defined_in } => {
                        let leaf = store.add_leaf(defined_in.as_deref());
                        store.bind(ns, name, leaf);
                    }
                    AttrDef::Type {
                        defined_in,
                        members,
                    } => {
                        let member_refs: Vec<&str> =
                            members.iter().map(String::as_str).collect();
                        let ty = store.add_composite(defined_in.as_deref(), &member_refs);
                        store.bind(ns, name, ty);
                    }
                    AttrDef::Namespace { target } => match ids.get(target) {
                        Some(child) => store.bind(ns, name, *child),
                        None => store.bind_unknown_module(ns, name, target),
                    },
                    AttrDef::Inaccessible { message } => {
                        let message = message
                            .clone()
                            .unwrap_or_else(|| format!("attribute '{}' is unaccessible", name));
                        store.bind_inaccessible(ns, name, &message);
                    }
                }
            }
        }

        store
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::graph::traits::{FetchError, Reflect, ResolveError};

    fn parse(contents: &str) -> GraphDocument {
        GraphDocument::parse(contents).expect("document should parse")
    }

    #[test]
    fn minimal_document_builds_one_namespace() {
        let doc = parse(r#"{ "namespaces": { "pkg": {} } }"#);
        let store = doc.build();
        let root = store.resolve_namespace("pkg").unwrap();
        assert_eq!(store.namespace_name(root), Some("pkg"));
        assert_eq!(store.source_location(root), None);
    }

    #[test]
    fn attrs_and_exports_are_wired() {
        let doc = parse(
            r#"{
                "namespaces": {
                    "pkg": {
                        "location": "/site/pkg/__init__.py",
                        "exports": ["extra"],
                        "attrs": {
                            "value": { "kind": "leaf", "defined_in": "pkg" },
                            "Config": { "kind": "type", "members": ["a", "_b"] }
                        }
                    }
                }
            }"#,
        );
        let store = doc.build();
        let root = store.resolve_namespace("pkg").unwrap();

        let mut attrs = store.list_attrs(root).unwrap();
        attrs.sort();
        assert_eq!(attrs, vec!["Config".to_string(), "value".to_string()]);
        assert_eq!(store.list_exports(root), Ok(vec!["extra".to_string()]));

        let ty = store.fetch_attr(root, "Config").unwrap();
        assert_eq!(store.list_members(ty), vec!["a".to_string(), "_b".to_string()]);
    }

    #[test]
    fn namespace_references_share_identity_and_allow_cycles() {
        let doc = parse(
            r#"{
                "namespaces": {
                    "pkg": { "attrs": { "sub": { "kind": "namespace", "target": "pkg.sub" } } },
                    "pkg.sub": { "attrs": { "parent": { "kind": "namespace", "target": "pkg" } } }
                }
            }"#,
        );
        let store = doc.build();
        let root = store.resolve_namespace("pkg").unwrap();
        let sub = store.fetch_attr(root, "sub").unwrap();
        assert_eq!(store.resolve_namespace("pkg.sub"), Ok(sub));
        // The cycle closes back on the very same entity.
        assert_eq!(store.fetch_attr(sub, "parent"), Ok(root));
    }

    #[test]
    fn dangling_reference_becomes_unknown_module() {
        let doc = parse(
            r#"{
                "namespaces": {
                    "pkg": { "attrs": { "gone": { "kind": "namespace", "target": "pkg.gone" } } }
                }
            }"#,
        );
        let store = doc.build();
        let root = store.resolve_namespace("pkg").unwrap();
        assert_eq!(
            store.fetch_attr(root, "gone"),
            Err(FetchError::UnknownModule("pkg.gone".to_string()))
        );
        assert_eq!(
            store.resolve_namespace("pkg.gone"),
            Err(ResolveError::NotFound("pkg.gone".to_string()))
        );
    }

    #[test]
    fn inaccessible_attr_fails_on_fetch() {
        let doc = parse(
            r#"{
                "namespaces": {
                    "pkg": { "attrs": { "touchy": { "kind": "inaccessible" } } }
                }
            }"#,
        );
        let store = doc.build();
        let root = store.resolve_namespace("pkg").unwrap();
        assert!(matches!(
            store.fetch_attr(root, "touchy"),
            Err(FetchError::Unaccessible(_))
        ));
    }

    #[test]
    fn unknown_fields_are_rejected() {
        let err = GraphDocument::parse(
            r#"{ "namespaces": { "pkg": { "loaction": "/typo" } } }"#,
        )
        .unwrap_err();
        assert!(err.to_string().contains("loaction"));
    }

    #[test]
    fn load_reports_missing_file_with_path() {
        let err = GraphDocument::load(Path::new("/nonexistent/graph.json")).unwrap_err();
        assert!(matches!(err, SchemaError::ReadError { .. }));
        assert!(err.to_string().contains("/nonexistent/graph.json"));
    }
}
