//! crawl
//!
//! The traversal engine: boundary filter and crawler.
//!
//! # Architecture
//!
//! [`boundary`] decides which discovered entities belong to the namespace
//! under inspection; [`crawler`] performs the depth-first walk, applying
//! the filter at every node, deduplicating by entity identity, classifying
//! each accepted path, and accumulating recoverable errors.
//!
//! # Invariants
//!
//! - The walk terminates on cyclic and self-referential graphs
//! - A skipped entity contributes nothing: no paths, no errors, no descent
//! - One failing child never aborts traversal of its siblings

pub mod boundary;
pub mod crawler;

pub use boundary::BoundaryFilter;
pub use crawler::crawl;
