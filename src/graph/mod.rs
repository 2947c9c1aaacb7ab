//! graph
//!
//! Single interface for the walked namespace graph.
//!
//! # Design
//!
//! Rust has no runtime reflection over an arbitrary object graph, so the
//! graph under inspection is modeled explicitly: entities live in an arena
//! ([`GraphStore`]) and the crawler only ever sees them through the narrow
//! [`Reflect`] contract. Tests assemble fixture graphs with the store's
//! builder methods; the CLI loads one from a JSON graph document
//! ([`schema`]).

pub mod schema;
pub mod store;
pub mod traits;

pub use schema::{GraphDocument, SchemaError};
pub use store::GraphStore;
pub use traits::{FetchError, ListError, Reflect, ResolveError};
