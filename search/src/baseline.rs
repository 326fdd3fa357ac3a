//! Exact uniform-cost baseline (Dijkstra).
//!
//! Serves three roles: the distance-table builder for landmark heuristics,
//! the optimality oracle in conformance tests, and the degenerate case the
//! engine must match under [`crate::heuristic::ZeroHeuristic`]. Kept
//! independent of the engine so cross-checks compare two implementations,
//! not one implementation with itself.

use std::cmp::Reverse;
use std::collections::{BinaryHeap, HashMap};

use wayfinder_graph::edge::weight_is_valid;
use wayfinder_graph::{Graph, Vertex};

use crate::error::SearchError;

/// Queue key ordered by distance, then insertion serial.
#[derive(Debug, Clone, Copy)]
struct QueueKey {
    dist: f64,
    serial: u64,
}

impl PartialEq for QueueKey {
    fn eq(&self, other: &Self) -> bool {
        self.cmp(other) == std::cmp::Ordering::Equal
    }
}

impl Eq for QueueKey {}

impl PartialOrd for QueueKey {
    fn partial_cmp(&self, other: &Self) -> Option<std::cmp::Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for QueueKey {
    fn cmp(&self, other: &Self) -> std::cmp::Ordering {
        self.dist
            .total_cmp(&other.dist)
            .then_with(|| self.serial.cmp(&other.serial))
    }
}

struct QueueEntry<V> {
    key: Reverse<QueueKey>,
    vertex: V,
}

impl<V> PartialEq for QueueEntry<V> {
    fn eq(&self, other: &Self) -> bool {
        self.key == other.key
    }
}

impl<V> Eq for QueueEntry<V> {}

impl<V> PartialOrd for QueueEntry<V> {
    fn partial_cmp(&self, other: &Self) -> Option<std::cmp::Ordering> {
        Some(self.cmp(other))
    }
}

impl<V> Ord for QueueEntry<V> {
    fn cmp(&self, other: &Self) -> std::cmp::Ordering {
        self.key.cmp(&other.key)
    }
}

/// Exact distances from `source` to every reachable vertex.
///
/// # Errors
///
/// Returns [`SearchError::NegativeEdgeWeight`] if the graph supplies an
/// invalid weight on a reachable edge.
#[allow(clippy::float_cmp)]
pub fn dijkstra_distances<V, G>(graph: &G, source: &V) -> Result<HashMap<V, f64>, SearchError>
where
    V: Vertex,
    G: Graph<V>,
{
    let mut dist: HashMap<V, f64> = HashMap::new();
    let mut heap: BinaryHeap<QueueEntry<V>> = BinaryHeap::new();
    let mut serial: u64 = 0;

    dist.insert(source.clone(), 0.0);
    heap.push(QueueEntry {
        key: Reverse(QueueKey { dist: 0.0, serial }),
        vertex: source.clone(),
    });

    while let Some(entry) = heap.pop() {
        let u = entry.vertex;
        let d = entry.key.0.dist;
        // Lazy deletion: superseded tickets carry an out-of-date distance.
        if dist.get(&u).copied().unwrap_or(f64::INFINITY) != d {
            continue;
        }
        for edge in graph.outgoing_edges(&u) {
            if !weight_is_valid(edge.weight) {
                return Err(SearchError::NegativeEdgeWeight {
                    from: format!("{u:?}"),
                    to: format!("{:?}", edge.to),
                    weight: edge.weight,
                });
            }
            let candidate = d + edge.weight;
            if candidate < dist.get(&edge.to).copied().unwrap_or(f64::INFINITY) {
                dist.insert(edge.to.clone(), candidate);
                serial += 1;
                heap.push(QueueEntry {
                    key: Reverse(QueueKey {
                        dist: candidate,
                        serial,
                    }),
                    vertex: edge.to,
                });
            }
        }
    }

    Ok(dist)
}

/// Exact shortest path from `source` to `target`, or `None` if unreachable.
///
/// # Errors
///
/// Returns [`SearchError::NegativeEdgeWeight`] if the graph supplies an
/// invalid weight on a reachable edge.
#[allow(clippy::float_cmp)]
pub fn shortest_path<V, G>(
    graph: &G,
    source: &V,
    target: &V,
) -> Result<Option<(Vec<V>, f64)>, SearchError>
where
    V: Vertex,
    G: Graph<V>,
{
    let mut dist: HashMap<V, f64> = HashMap::new();
    let mut parent: HashMap<V, V> = HashMap::new();
    let mut heap: BinaryHeap<QueueEntry<V>> = BinaryHeap::new();
    let mut serial: u64 = 0;

    dist.insert(source.clone(), 0.0);
    heap.push(QueueEntry {
        key: Reverse(QueueKey { dist: 0.0, serial }),
        vertex: source.clone(),
    });

    while let Some(entry) = heap.pop() {
        let u = entry.vertex;
        let d = entry.key.0.dist;
        if dist.get(&u).copied().unwrap_or(f64::INFINITY) != d {
            continue;
        }
        if u == *target {
            let mut vertices = Vec::new();
            let mut current = Some(u);
            while let Some(v) = current {
                current = parent.get(&v).cloned();
                vertices.push(v);
            }
            vertices.reverse();
            return Ok(Some((vertices, d)));
        }
        for edge in graph.outgoing_edges(&u) {
            if !weight_is_valid(edge.weight) {
                return Err(SearchError::NegativeEdgeWeight {
                    from: format!("{u:?}"),
                    to: format!("{:?}", edge.to),
                    weight: edge.weight,
                });
            }
            let candidate = d + edge.weight;
            if candidate < dist.get(&edge.to).copied().unwrap_or(f64::INFINITY) {
                dist.insert(edge.to.clone(), candidate);
                parent.insert(edge.to.clone(), u.clone());
                serial += 1;
                heap.push(QueueEntry {
                    key: Reverse(QueueKey {
                        dist: candidate,
                        serial,
                    }),
                    vertex: edge.to,
                });
            }
        }
    }

    Ok(None)
}
