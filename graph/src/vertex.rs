//! Vertex identity bound.

use std::fmt::Debug;
use std::hash::Hash;

/// Blanket bound for vertex identity types.
///
/// The search layer assumes no internal structure: a vertex is an opaque
/// identity. `Hash + Eq` back the per-search score maps, `Ord` lets every
/// serialization surface emit vertices in a total, platform-independent
/// order, and `Debug` is the rendering used in reports and errors.
pub trait Vertex: Clone + Eq + Ord + Hash + Debug {}

impl<T: Clone + Eq + Ord + Hash + Debug> Vertex for T {}
