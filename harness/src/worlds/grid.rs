//! `grid`: 4-connected unit-weight grid world with blocked cells.
//!
//! Edge weights are symmetric (every passable neighbor pair is connected in
//! both directions at weight 1), which is what makes the landmark
//! differential heuristic and the expanded-side pathmax sweep valid here.

use std::collections::BTreeSet;

use wayfinder_graph::{Edge, Graph};
use wayfinder_search::heuristic::HeuristicProvider;

/// A cell position. Ordering is row-major (y, then x) via the derived
/// lexicographic order on the field order below.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct GridPos {
    pub y: u32,
    pub x: u32,
}

impl GridPos {
    /// Construct a position.
    #[must_use]
    pub fn new(x: u32, y: u32) -> Self {
        Self { y, x }
    }
}

/// A rectangular grid with blocked cells.
#[derive(Debug, Clone)]
pub struct GridWorld {
    width: u32,
    height: u32,
    blocked: BTreeSet<GridPos>,
}

impl GridWorld {
    /// An open grid of the given dimensions.
    #[must_use]
    pub fn open(width: u32, height: u32) -> Self {
        Self {
            width,
            height,
            blocked: BTreeSet::new(),
        }
    }

    /// Block a cell. Blocked cells have no edges in either direction.
    pub fn block(&mut self, pos: GridPos) {
        self.blocked.insert(pos);
    }

    /// Whether a position is inside the grid and not blocked.
    #[must_use]
    pub fn is_passable(&self, pos: GridPos) -> bool {
        pos.x < self.width && pos.y < self.height && !self.blocked.contains(&pos)
    }

    /// All passable positions in ascending (row-major) order.
    #[must_use]
    pub fn passable_positions(&self) -> Vec<GridPos> {
        let mut positions = Vec::new();
        for y in 0..self.height {
            for x in 0..self.width {
                let pos = GridPos::new(x, y);
                if self.is_passable(pos) {
                    positions.push(pos);
                }
            }
        }
        positions
    }
}

impl Graph<GridPos> for GridWorld {
    fn outgoing_edges(&self, v: &GridPos) -> Vec<Edge<GridPos>> {
        if !self.is_passable(*v) {
            return Vec::new();
        }
        // Fixed neighbor order: left, right, up, down.
        let mut edges = Vec::with_capacity(4);
        let push = |x: u32, y: u32, edges: &mut Vec<Edge<GridPos>>| {
            let n = GridPos::new(x, y);
            if self.is_passable(n) {
                edges.push(Edge::new(n, 1.0));
            }
        };
        if v.x > 0 {
            push(v.x - 1, v.y, &mut edges);
        }
        push(v.x + 1, v.y, &mut edges);
        if v.y > 0 {
            push(v.x, v.y - 1, &mut edges);
        }
        push(v.x, v.y + 1, &mut edges);
        edges
    }
}

/// Manhattan distance: consistent (and therefore admissible) on a
/// 4-connected unit-weight grid.
#[derive(Debug, Clone, Copy, Default)]
pub struct Manhattan;

impl HeuristicProvider<GridPos> for Manhattan {
    fn estimate(&self, v: &GridPos, target: &GridPos) -> f64 {
        let dx = v.x.abs_diff(target.x);
        let dy = v.y.abs_diff(target.y);
        f64::from(dx + dy)
    }
}
