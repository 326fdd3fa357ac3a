//! Search entry point and expansion loop.
//!
//! The loop is standard A* with two departures that make it correct under
//! admissible-but-inconsistent heuristics:
//!
//! - **Re-expansion**: a closed vertex whose g strictly improves is moved
//!   back to open and expanded again. The never-reexpand optimization is
//!   only sound for consistent heuristics.
//! - **Repair**: when the heuristic carries the repair capability, the
//!   engine invokes `update_expanded_heuristic` once per pop and
//!   `update_successor_heuristic` once per outgoing edge, letting the
//!   heuristic raise stored estimates via pathmax. A raise on an open
//!   vertex re-keys its frontier position (increase-key via a fresh
//!   ticket).
//!
//! Both key updates use lazy deletion: superseded tickets are recognized at
//! pop time (vertex not open, or recorded f no longer equal to g + h) and
//! skipped.

use std::collections::HashMap;

use wayfinder_graph::edge::weight_is_valid;
use wayfinder_graph::{Graph, Vertex};

use crate::error::SearchError;
use crate::frontier::{Frontier, TIE_BREAK_POLICY};
use crate::heuristic::{HScoreMap, Heuristic};
use crate::policy::{RepairModeV1, SearchPolicyV1};
use crate::report::{
    EdgeOutcomeV1, EdgeRecordV1, ExpandEventV1, HRaiseV1, PopKeyV1, SearchReportMetadata,
    SearchReportV1, TerminationReasonV1, VertexSummaryV1,
};
use crate::score::{ScoreTable, VertexStatus};

/// A found path: ordered vertices from start to target, plus total cost.
#[derive(Debug, Clone, PartialEq)]
pub struct PathV1<V> {
    pub vertices: Vec<V>,
    pub cost: f64,
}

/// Result of a search execution.
///
/// Always contains a complete [`SearchReportV1`] regardless of how the
/// search terminated; `path` is `Some` iff the target was reached. Check
/// `report.metadata.termination_reason` to distinguish true unreachability
/// from budget exhaustion.
#[derive(Debug)]
pub struct SearchResult<V> {
    /// The reconstructed path (if the target was reached).
    pub path: Option<PathV1<V>>,
    /// The complete search audit trail.
    pub report: SearchReportV1,
}

impl<V> SearchResult<V> {
    /// Returns `true` if the search terminated because the target was
    /// reached.
    #[must_use]
    pub fn is_goal_reached(&self) -> bool {
        matches!(
            self.report.metadata.termination_reason,
            TerminationReasonV1::GoalReached
        )
    }
}

/// Run the search from `start` toward a fixed `target`.
///
/// Score tables, the h-score map, and the frontier are created fresh for
/// this invocation and discarded on completion; the heuristic itself is
/// borrowed and must not carry state from a search with a different target
/// (the pre-flight probe rejects the common case of that mistake).
///
/// # Errors
///
/// - [`SearchError::TargetMismatch`] if `estimate(target, target)` is not
///   zero (pre-flight, before any expansion).
/// - [`SearchError::NegativeEdgeWeight`] if the graph supplies an edge
///   weight that is not finite and non-negative, surfaced before the weight
///   is used in any heuristic update or relaxation.
/// - [`SearchError::HeuristicRepairViolation`] if a repair call attempts to
///   lower a stored h value.
#[allow(clippy::too_many_lines, clippy::float_cmp)]
pub fn search<V, G>(
    start: &V,
    target: &V,
    graph: &G,
    heuristic: Heuristic<'_, V>,
    policy: &SearchPolicyV1,
) -> Result<SearchResult<V>, SearchError>
where
    V: Vertex,
    G: Graph<V>,
{
    // Pre-flight probe: a provider whose internal state was built for a
    // different target fails estimate(target, target) == 0.
    let self_estimate = heuristic.estimate(target, target);
    if self_estimate != 0.0 {
        return Err(SearchError::TargetMismatch {
            detail: format!(
                "estimate(target, target) must be 0, got {self_estimate} for {target:?}"
            ),
        });
    }

    let repair = match policy.repair_mode {
        RepairModeV1::Never => None,
        RepairModeV1::Always => heuristic.repair(),
        RepairModeV1::Auto => heuristic
            .repair()
            .filter(|r| !r.is_consistent(graph as &dyn Graph<V>)),
    };

    let mut scores: ScoreTable<V> = ScoreTable::new();
    let mut h_scores: HScoreMap<V> = HScoreMap::new();
    let mut frontier: Frontier<V> = Frontier::new();
    let mut times_expanded: HashMap<V, u64> = HashMap::new();
    let mut expansions: Vec<ExpandEventV1> = Vec::new();

    let mut expansion_count: u64 = 0;
    let mut total_relaxations: u64 = 0;
    let mut total_reexpansions: u64 = 0;
    let mut total_h_raises: u64 = 0;
    let mut stale_pops_skipped: u64 = 0;

    let h_start = h_scores.seed(start, heuristic.estimate(start, target));
    scores.relax(start, 0.0, None);
    scores.mark_open(start);
    frontier.push(start.clone(), h_start, 0.0);

    let termination_reason;

    loop {
        if frontier.is_empty() {
            termination_reason = TerminationReasonV1::FrontierExhausted;
            break;
        }
        // Budget check, once per iteration. Exhaustion here is reported
        // distinctly from true unreachability.
        if expansion_count >= policy.max_expansions {
            termination_reason = TerminationReasonV1::ExpansionBudgetExceeded;
            break;
        }

        let Some((u, key)) = frontier.pop() else {
            termination_reason = TerminationReasonV1::FrontierExhausted;
            break;
        };

        // Lazy deletion: a ticket is live iff its vertex is still open and
        // its recorded f matches the current g + h. A g improvement or an
        // h raise since push time leaves a newer ticket in the heap.
        let g_u = scores.g(&u);
        let h_u = h_scores.get(&u).unwrap_or(f64::INFINITY);
        if scores.status(&u) != VertexStatus::Open || key.f != g_u + h_u {
            stale_pops_skipped += 1;
            continue;
        }

        if u == *target {
            termination_reason = TerminationReasonV1::GoalReached;
            break;
        }

        scores.mark_closed(&u);
        let visits = times_expanded.entry(u.clone()).or_insert(0);
        *visits += 1;
        if *visits > 1 {
            total_reexpansions += 1;
        }
        let order = expansion_count;
        expansion_count += 1;

        // Expanded-side repair: the heuristic may raise h(u) from values
        // already recorded for its neighbors. u is about to be expanded
        // either way; the raise is persisted for successor updates and for
        // a correct f if u is ever reopened.
        let h_before = h_u;
        let h_after = if let Some(r) = repair {
            let _ = r.update_expanded_heuristic(&u, target, &mut h_scores);
            if let Some(v) = h_scores.take_violation() {
                return Err(SearchError::HeuristicRepairViolation {
                    vertex: v.vertex,
                    stored: v.stored,
                    attempted: v.attempted,
                });
            }
            let stored = h_scores.get(&u).unwrap_or(h_before);
            if stored > h_before {
                total_h_raises += 1;
            }
            stored
        } else {
            h_before
        };

        let mut edge_records: Vec<EdgeRecordV1> = Vec::new();
        for edge in graph.outgoing_edges(&u) {
            // Weight contract check comes first: an invalid weight must not
            // reach a heuristic update or a relaxation.
            if !weight_is_valid(edge.weight) {
                return Err(SearchError::NegativeEdgeWeight {
                    from: format!("{u:?}"),
                    to: format!("{:?}", edge.to),
                    weight: edge.weight,
                });
            }
            if edge.to == u {
                edge_records.push(EdgeRecordV1 {
                    to: format!("{:?}", edge.to),
                    weight: edge.weight,
                    h_raise: None,
                    outcome: EdgeOutcomeV1::SelfLoop,
                });
                continue;
            }
            let v = edge.to;

            if h_scores.get(&v).is_none() {
                let base = heuristic.estimate(&v, target);
                h_scores.seed(&v, base);
            }

            // Successor-side repair, using the parent's possibly-raised h.
            let mut h_raise = None;
            if let Some(r) = repair {
                let before = h_scores.get(&v).unwrap_or(f64::INFINITY);
                let changed =
                    r.update_successor_heuristic(&v, target, h_after, edge.weight, &mut h_scores);
                if let Some(violation) = h_scores.take_violation() {
                    return Err(SearchError::HeuristicRepairViolation {
                        vertex: violation.vertex,
                        stored: violation.stored,
                        attempted: violation.attempted,
                    });
                }
                let after = h_scores.get(&v).unwrap_or(before);
                if changed && after > before {
                    h_raise = Some(HRaiseV1 {
                        from: before,
                        to: after,
                    });
                    total_h_raises += 1;
                }
            }

            let candidate_g = g_u + edge.weight;
            let outcome = if scores.relax(&v, candidate_g, Some(&u)) {
                total_relaxations += 1;
                // Status check precedes mark_open: Closed here means this
                // relaxation reopens a previously expanded vertex.
                let reopened = scores.status(&v) == VertexStatus::Closed;
                scores.mark_open(&v);
                let f_v = candidate_g + h_scores.get(&v).unwrap_or(f64::INFINITY);
                frontier.push(v.clone(), f_v, candidate_g);
                EdgeOutcomeV1::Relaxed {
                    new_g: candidate_g,
                    reopened,
                }
            } else {
                // No g change, but a raised h on an open vertex still moves
                // its frontier position (increase-key).
                if h_raise.is_some() && scores.status(&v) == VertexStatus::Open {
                    let g_v = scores.g(&v);
                    let f_v = g_v + h_scores.get(&v).unwrap_or(f64::INFINITY);
                    frontier.push(v.clone(), f_v, g_v);
                }
                EdgeOutcomeV1::NotImproved
            };

            edge_records.push(EdgeRecordV1 {
                to: format!("{v:?}"),
                weight: edge.weight,
                h_raise,
                outcome,
            });
        }

        expansions.push(ExpandEventV1 {
            expansion_order: order,
            vertex: format!("{u:?}"),
            pop_key: PopKeyV1 {
                f: key.f,
                g: key.g,
                serial: key.serial,
            },
            h_before,
            h_after,
            edges: edge_records,
        });
    }

    let path = if termination_reason == TerminationReasonV1::GoalReached {
        Some(reconstruct_path(&scores, target))
    } else {
        None
    };

    let vertex_summaries: Vec<VertexSummaryV1> = scores
        .vertices_sorted()
        .into_iter()
        .map(|v| VertexSummaryV1 {
            vertex: format!("{v:?}"),
            g: scores.g(v),
            h: h_scores.get(v).unwrap_or(0.0),
            parent: scores.parent(v).map(|p| format!("{p:?}")),
            status: scores.status(v),
            times_expanded: times_expanded.get(v).copied().unwrap_or(0),
        })
        .collect();

    let report = SearchReportV1 {
        expansions,
        vertex_summaries,
        metadata: SearchReportMetadata {
            start: format!("{start:?}"),
            target: format!("{target:?}"),
            repair_invoked: repair.is_some(),
            repair_mode: policy.repair_mode.as_str().to_string(),
            max_expansions: policy.max_expansions,
            tie_break: TIE_BREAK_POLICY.to_string(),
            total_expansions: expansion_count,
            total_relaxations,
            total_reexpansions,
            total_h_raises,
            stale_pops_skipped,
            frontier_high_water: frontier.high_water(),
            termination_reason,
        },
    };

    Ok(SearchResult { path, report })
}

/// Follow parent pointers back from the target.
fn reconstruct_path<V: Vertex>(scores: &ScoreTable<V>, target: &V) -> PathV1<V> {
    let mut vertices = Vec::new();
    let mut current = Some(target.clone());
    while let Some(v) = current {
        current = scores.parent(&v).cloned();
        vertices.push(v);
    }
    vertices.reverse();
    PathV1 {
        vertices,
        cost: scores.g(target),
    }
}
