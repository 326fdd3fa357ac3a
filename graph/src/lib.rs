//! Wayfinder Graph: the pure graph collaborator layer.
//!
//! This crate defines what the search layer is allowed to assume about a
//! graph: vertex identity bounds, the outgoing-edge carrier, and the
//! [`Graph`] collaborator trait, plus one concrete adjacency-list
//! implementation. It has no external dependencies and no search semantics.
//!
//! # Crate dependency graph
//!
//! ```text
//! wayfinder_graph  ←  wayfinder_search  ←  wayfinder_harness
//! (collaborator)      (frontier, engine)    (worlds, runner)
//! ```
//!
//! # Key types
//!
//! - [`Vertex`] — blanket bound for vertex identity types
//! - [`Edge`] — destination + non-negative weight carrier
//! - [`Graph`] — the outgoing-edge collaborator contract
//! - [`AdjacencyGraph`] — deterministic adjacency-list implementation

#![forbid(unsafe_code)]

pub mod adjacency;
pub mod edge;
pub mod vertex;

pub use adjacency::{AdjacencyGraph, Graph};
pub use edge::Edge;
pub use vertex::Vertex;
