//! `diamond`: four-vertex fixture whose heuristic is admissible but
//! inconsistent on the a → b edge.
//!
//! ```text
//!        1        1        1
//!   s ──────► a ──────► b ──────► t
//!   │                   ▲         ▲
//!   │         4         │    5    │
//!   └───────────────────┘  a ─────┘
//! ```
//!
//! Edges: s→a (1), s→b (4), a→b (1), a→t (5), b→t (1). True remaining
//! costs toward t: s=3, a=2, b=1, t=0. The fixture heuristic h(s)=1,
//! h(a)=2, h(b)=0, h(t)=0 stays at or below those, so it is admissible,
//! but h(a) = 2 > w(a,b) + h(b) = 1 violates consistency. Expanding a
//! under pathmax repair must raise h(b) to h(a) − w(a,b) = 1, which is
//! exactly the true remaining cost from b.

use wayfinder_graph::AdjacencyGraph;
use wayfinder_search::heuristic::TableHeuristic;

/// Start vertex.
pub const START: &str = "s";

/// Target vertex.
pub const TARGET: &str = "t";

/// Cost of the optimal path s → a → b → t.
pub const OPTIMAL_COST: f64 = 3.0;

/// The vertex where the successor-side raise must fire, and the value it
/// must raise h to.
pub const RAISED_VERTEX: &str = "b";
pub const RAISED_H: f64 = 1.0;

/// True remaining cost from the raised vertex; the raise must not exceed it.
pub const TRUE_REMAINING_FROM_RAISED: f64 = 1.0;

/// Build the diamond graph.
#[must_use]
pub fn graph() -> AdjacencyGraph<&'static str> {
    let mut g = AdjacencyGraph::new();
    g.add_edge("s", "a", 1.0);
    g.add_edge("s", "b", 4.0);
    g.add_edge("a", "b", 1.0);
    g.add_edge("a", "t", 5.0);
    g.add_edge("b", "t", 1.0);
    g
}

/// The admissible-but-inconsistent fixture heuristic.
#[must_use]
pub fn heuristic() -> TableHeuristic<&'static str> {
    TableHeuristic::new(0.0)
        .with("s", 1.0)
        .with("a", 2.0)
        .with("b", 0.0)
        .with("t", 0.0)
}

/// The expected optimal path.
#[must_use]
pub fn optimal_path() -> Vec<&'static str> {
    vec!["s", "a", "b", "t"]
}

/// True remaining cost toward the target for every vertex, for
/// admissibility assertions.
#[must_use]
pub fn true_remaining() -> Vec<(&'static str, f64)> {
    vec![("s", 3.0), ("a", 2.0), ("b", 1.0), ("t", 0.0)]
}
