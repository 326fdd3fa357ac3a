//! `detour`: fixture that forces a re-expansion, and on which pathmax
//! repair measurably reduces work.
//!
//! ```text
//!         5                10
//!   s ──────────► x ──────────► t
//!   │             ▲ │
//!   │ 1         1 │ │ 1
//!   └──────► y ───┘ └──► d   (d has no outgoing edges)
//! ```
//!
//! Heuristic: h(y) = 11 (the exact true remaining cost from y), all other
//! vertices 0. Admissible everywhere, but h(y) = 11 > w(y,x) + h(x) = 1
//! is badly inconsistent.
//!
//! Why it re-expands: x is reached directly at g = 5 and expanded
//! (f = 5), while the cheaper route through y hides behind f(y) = 12.
//! When y finally expands, x improves to g = 2 and must be reopened;
//! an engine that refuses to reopen closed vertices returns cost 15
//! instead of the optimal 12.
//!
//! Why repair saves work: expanding y raises h(x) to 10, so the reopened
//! x carries f = 12 and the decoy d is re-keyed to f = 12 as well, tied
//! with the target, and the target wins the tie on higher g. Without
//! repair the second visits of x and d both pop early at f = 2 and
//! f = 3. Expansion counts: 6 without repair, 5 with.

use wayfinder_graph::AdjacencyGraph;
use wayfinder_search::heuristic::TableHeuristic;

/// Start vertex.
pub const START: &str = "s";

/// Target vertex.
pub const TARGET: &str = "t";

/// Cost of the optimal path s → y → x → t.
pub const OPTIMAL_COST: f64 = 12.0;

/// The vertex that must be reopened after closing with a stale g.
pub const REOPENED_VERTEX: &str = "x";

/// Cost an engine returns when it (incorrectly) never reopens `x`.
pub const COST_WITHOUT_REOPENING: f64 = 15.0;

/// Build the detour graph.
#[must_use]
pub fn graph() -> AdjacencyGraph<&'static str> {
    let mut g = AdjacencyGraph::new();
    g.add_edge("s", "x", 5.0);
    g.add_edge("s", "y", 1.0);
    g.add_edge("y", "x", 1.0);
    g.add_edge("x", "t", 10.0);
    g.add_edge("x", "d", 1.0);
    g
}

/// The admissible-but-inconsistent fixture heuristic.
#[must_use]
pub fn heuristic() -> TableHeuristic<&'static str> {
    TableHeuristic::new(0.0).with("y", 11.0)
}

/// The expected optimal path.
#[must_use]
pub fn optimal_path() -> Vec<&'static str> {
    vec!["s", "y", "x", "t"]
}
