//! `SearchReportV1`: expansion-event audit log.
//!
//! The normative decision surface is the ordered list of [`ExpandEventV1`]
//! entries. Vertex summaries are a derived index emitted in sorted vertex
//! order. The report is the engine's observability artifact: identical
//! inputs produce byte-identical canonical serializations, and
//! [`SearchReportV1::digest`] content-addresses a run.

use sha2::{Digest, Sha256};

use crate::canon::{canonical_json_bytes, CanonError};
use crate::score::VertexStatus;

/// The complete search audit trail.
#[derive(Debug, Clone)]
pub struct SearchReportV1 {
    /// Ordered expansion events (normative decision surface).
    pub expansions: Vec<ExpandEventV1>,
    /// Derived per-vertex index sorted by vertex.
    pub vertex_summaries: Vec<VertexSummaryV1>,
    /// Aggregate metadata and counters.
    pub metadata: SearchReportMetadata,
}

/// A single frontier-pop + edge-relaxation event.
#[derive(Debug, Clone)]
pub struct ExpandEventV1 {
    /// Total order of effective (non-stale) frontier pops.
    pub expansion_order: u64,
    /// Rendered vertex being expanded.
    pub vertex: String,
    /// The frontier key at time of pop.
    pub pop_key: PopKeyV1,
    /// Stored h when the vertex was popped.
    pub h_before: f64,
    /// Stored h after the expanded-side repair call (equal to `h_before`
    /// when repair is off or found nothing to raise).
    pub h_after: f64,
    /// Ordered per-edge decision log.
    pub edges: Vec<EdgeRecordV1>,
}

/// The frontier ordering key recorded at pop time.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PopKeyV1 {
    pub f: f64,
    pub g: f64,
    pub serial: u64,
}

/// An outgoing edge with its outcome recorded during expansion.
#[derive(Debug, Clone)]
pub struct EdgeRecordV1 {
    /// Rendered destination vertex.
    pub to: String,
    /// Edge weight as supplied by the graph collaborator.
    pub weight: f64,
    /// The successor-side h raise, if the repair call changed the stored
    /// value.
    pub h_raise: Option<HRaiseV1>,
    /// What the relaxation decided.
    pub outcome: EdgeOutcomeV1,
}

/// A recorded h raise (old and new stored value).
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct HRaiseV1 {
    pub from: f64,
    pub to: f64,
}

/// Outcome of processing one outgoing edge.
#[derive(Debug, Clone, PartialEq)]
pub enum EdgeOutcomeV1 {
    /// Strict g improvement; successor (re)opened.
    Relaxed { new_g: f64, reopened: bool },
    /// Candidate g did not improve on the best known cost.
    NotImproved,
    /// Self-loop, ignored (zero gain).
    SelfLoop,
}

/// Derived per-vertex summary.
#[derive(Debug, Clone)]
pub struct VertexSummaryV1 {
    /// Rendered vertex.
    pub vertex: String,
    /// Final best known g.
    pub g: f64,
    /// Final stored h.
    pub h: f64,
    /// Rendered parent on the best known path.
    pub parent: Option<String>,
    /// Final lifecycle status.
    pub status: VertexStatus,
    /// How many times the vertex was expanded (> 1 means re-expansion).
    pub times_expanded: u64,
}

/// Why the search terminated.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TerminationReasonV1 {
    /// The target vertex was popped with an up-to-date ticket.
    GoalReached,
    /// Frontier emptied: the target is unreachable from the start.
    FrontierExhausted,
    /// `max_expansions` was hit before the target was reached. Distinct
    /// from `FrontierExhausted`: reachability is unknown.
    ExpansionBudgetExceeded,
}

impl TerminationReasonV1 {
    /// Stable lowercase name, used in serialized artifacts.
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::GoalReached => "goal_reached",
            Self::FrontierExhausted => "frontier_exhausted",
            Self::ExpansionBudgetExceeded => "expansion_budget_exceeded",
        }
    }
}

/// Aggregate metadata and counters.
#[derive(Debug, Clone)]
pub struct SearchReportMetadata {
    /// Rendered start vertex.
    pub start: String,
    /// Rendered target vertex.
    pub target: String,
    /// Whether repair calls were actually made this run.
    pub repair_invoked: bool,
    /// Policy echo: configured repair mode.
    pub repair_mode: String,
    /// Policy echo: expansion budget.
    pub max_expansions: u64,
    /// The fixed tie-break policy (see `frontier::TIE_BREAK_POLICY`).
    pub tie_break: String,

    // Counters
    pub total_expansions: u64,
    pub total_relaxations: u64,
    pub total_reexpansions: u64,
    pub total_h_raises: u64,
    pub stale_pops_skipped: u64,
    pub frontier_high_water: u64,
    pub termination_reason: TerminationReasonV1,
}

// ---------------------------------------------------------------------------
// Canonical JSON serialization
// ---------------------------------------------------------------------------

impl SearchReportV1 {
    /// Serialize the report to canonical JSON bytes.
    ///
    /// # Errors
    ///
    /// Returns [`CanonError`] if a non-finite number reaches the
    /// serializer (should be impossible for reports built by the engine).
    pub fn to_canonical_json_bytes(&self) -> Result<Vec<u8>, CanonError> {
        canonical_json_bytes(&self.to_json_value())
    }

    /// Content-address the report: `"sha256:<hex>"` over canonical bytes.
    ///
    /// # Errors
    ///
    /// Propagates [`CanonError`] from serialization.
    pub fn digest(&self) -> Result<String, CanonError> {
        let bytes = self.to_canonical_json_bytes()?;
        Ok(format!("sha256:{}", hex::encode(Sha256::digest(&bytes))))
    }

    /// Convert to a `serde_json::Value` for canonical serialization.
    #[must_use]
    fn to_json_value(&self) -> serde_json::Value {
        serde_json::json!({
            "expansions": self.expansions.iter().map(expand_event_to_json).collect::<Vec<_>>(),
            "metadata": metadata_to_json(&self.metadata),
            "vertex_summaries": self.vertex_summaries.iter().map(vertex_summary_to_json).collect::<Vec<_>>(),
        })
    }
}

fn expand_event_to_json(e: &ExpandEventV1) -> serde_json::Value {
    serde_json::json!({
        "edges": e.edges.iter().map(edge_record_to_json).collect::<Vec<_>>(),
        "expansion_order": e.expansion_order,
        "h_after": e.h_after,
        "h_before": e.h_before,
        "pop_key": {
            "f": e.pop_key.f,
            "g": e.pop_key.g,
            "serial": e.pop_key.serial,
        },
        "vertex": e.vertex,
    })
}

fn edge_record_to_json(r: &EdgeRecordV1) -> serde_json::Value {
    let mut obj = serde_json::json!({
        "outcome": edge_outcome_to_json(&r.outcome),
        "to": r.to,
        "weight": r.weight,
    });
    if let Some(raise) = &r.h_raise {
        obj["h_raise"] = serde_json::json!({"from": raise.from, "to": raise.to});
    } else {
        obj["h_raise"] = serde_json::Value::Null;
    }
    obj
}

fn edge_outcome_to_json(o: &EdgeOutcomeV1) -> serde_json::Value {
    match o {
        EdgeOutcomeV1::Relaxed { new_g, reopened } => {
            serde_json::json!({"new_g": new_g, "reopened": reopened, "type": "relaxed"})
        }
        EdgeOutcomeV1::NotImproved => serde_json::json!({"type": "not_improved"}),
        EdgeOutcomeV1::SelfLoop => serde_json::json!({"type": "self_loop"}),
    }
}

fn vertex_summary_to_json(s: &VertexSummaryV1) -> serde_json::Value {
    serde_json::json!({
        "g": s.g,
        "h": s.h,
        "parent": s.parent,
        "status": status_str(s.status),
        "times_expanded": s.times_expanded,
        "vertex": s.vertex,
    })
}

fn status_str(s: VertexStatus) -> &'static str {
    match s {
        VertexStatus::Unvisited => "unvisited",
        VertexStatus::Open => "open",
        VertexStatus::Closed => "closed",
    }
}

fn metadata_to_json(m: &SearchReportMetadata) -> serde_json::Value {
    serde_json::json!({
        "frontier_high_water": m.frontier_high_water,
        "max_expansions": m.max_expansions,
        "repair_invoked": m.repair_invoked,
        "repair_mode": m.repair_mode,
        "stale_pops_skipped": m.stale_pops_skipped,
        "start": m.start,
        "target": m.target,
        "termination_reason": m.termination_reason.as_str(),
        "tie_break": m.tie_break,
        "total_expansions": m.total_expansions,
        "total_h_raises": m.total_h_raises,
        "total_reexpansions": m.total_reexpansions,
        "total_relaxations": m.total_relaxations,
    })
}
