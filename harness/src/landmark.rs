//! Landmark (ALT-style) differential heuristic.
//!
//! For a landmark L with precomputed exact distances, the triangle
//! inequality on a symmetric graph gives the lower bound
//! `|d(L, v) − d(L, target)| <= dist(v, target)`. The estimate takes the
//! max over the landmark tables a vertex consults.
//!
//! With [`LandmarkSelection::All`] every vertex consults every table; the
//! resulting maximum is consistent. With [`LandmarkSelection::Alternating`]
//! each vertex consults only the even- or odd-indexed tables depending on
//! its hash parity, so adjacent vertices see different bounds: still
//! admissible (every bound is), but no longer consistent. That is the
//! standard way inconsistency arises in practice (combining several lower
//! bounds with a per-vertex choice), and it is what the repair operations
//! exist to mitigate.

use std::collections::hash_map::DefaultHasher;
use std::collections::HashMap;
use std::hash::{Hash, Hasher};

use wayfinder_graph::{Graph, Vertex};
use wayfinder_search::baseline::dijkstra_distances;
use wayfinder_search::error::SearchError;
use wayfinder_search::heuristic::{HScoreMap, HeuristicProvider, HeuristicRepair};

/// Which landmark tables a vertex consults.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LandmarkSelection {
    /// Every table; the max is consistent on symmetric graphs.
    All,
    /// Even- or odd-indexed tables by vertex hash parity; admissible but
    /// deliberately inconsistent.
    Alternating,
}

/// Differential landmark heuristic over a symmetric-weight graph.
#[derive(Debug, Clone)]
pub struct LandmarkHeuristic<V: Vertex> {
    tables: Vec<HashMap<V, f64>>,
    selection: LandmarkSelection,
}

impl<V: Vertex> LandmarkHeuristic<V> {
    /// Precompute distance tables for the given landmarks.
    ///
    /// # Errors
    ///
    /// Propagates [`SearchError::NegativeEdgeWeight`] from table
    /// construction.
    pub fn build<G: Graph<V>>(
        graph: &G,
        landmarks: &[V],
        selection: LandmarkSelection,
    ) -> Result<Self, SearchError> {
        let tables = landmarks
            .iter()
            .map(|l| dijkstra_distances(graph, l))
            .collect::<Result<Vec<_>, _>>()?;
        Ok(Self { tables, selection })
    }

    /// Number of landmark tables.
    #[must_use]
    pub fn landmark_count(&self) -> usize {
        self.tables.len()
    }

    fn consults(&self, v: &V, table_index: usize) -> bool {
        match self.selection {
            LandmarkSelection::All => true,
            LandmarkSelection::Alternating => vertex_parity(v) == table_index % 2,
        }
    }
}

fn vertex_parity<V: Hash>(v: &V) -> usize {
    let mut hasher = DefaultHasher::new();
    v.hash(&mut hasher);
    (hasher.finish() % 2) as usize
}

impl<V: Vertex> HeuristicProvider<V> for LandmarkHeuristic<V> {
    fn estimate(&self, v: &V, target: &V) -> f64 {
        let mut best: f64 = 0.0;
        for (i, table) in self.tables.iter().enumerate() {
            if !self.consults(v, i) {
                continue;
            }
            // A landmark that cannot reach both endpoints contributes no
            // bound.
            let (Some(d_v), Some(d_t)) = (table.get(v), table.get(target)) else {
                continue;
            };
            let bound = (d_v - d_t).abs();
            if bound > best {
                best = bound;
            }
        }
        best
    }
}

impl<V: Vertex> HeuristicRepair<V> for LandmarkHeuristic<V> {
    fn update_expanded_heuristic(
        &self,
        expanded: &V,
        target: &V,
        h_scores: &mut HScoreMap<V>,
    ) -> f64 {
        h_scores.seed(expanded, self.estimate(expanded, target))
    }

    fn update_successor_heuristic(
        &self,
        successor: &V,
        target: &V,
        h_parent: f64,
        edge_weight: f64,
        h_scores: &mut HScoreMap<V>,
    ) -> bool {
        h_scores.seed(successor, self.estimate(successor, target));
        h_scores.raise(successor, h_parent - edge_weight)
    }

    fn is_consistent(&self, _graph: &dyn Graph<V>) -> bool {
        self.selection == LandmarkSelection::All
    }
}
