//! Typed search errors.
//!
//! `SearchError` covers collaborator contract violations only. Normal
//! terminal outcomes (goal reached, unreachable target, budget exhaustion)
//! are expressed via [`crate::report::TerminationReasonV1`] and always
//! produce a `SearchReportV1`. Contract violations abort the search with no
//! partial path: continuing past an admissibility violation would invalidate
//! the optimality guarantee for the rest of the run.

/// Typed failure for collaborator contract violations.
///
/// Vertices are carried in rendered (`Debug`) form so the error type stays
/// non-generic at the API boundary.
#[derive(Debug, Clone, PartialEq)]
pub enum SearchError {
    /// The graph collaborator supplied an edge weight that is not finite and
    /// non-negative. Surfaced before the weight is used in any relaxation or
    /// heuristic update.
    NegativeEdgeWeight {
        from: String,
        to: String,
        weight: f64,
    },
    /// A repair call attempted to decrease a stored h value. The prior
    /// (higher) value is kept and the search aborts.
    HeuristicRepairViolation {
        vertex: String,
        stored: f64,
        attempted: f64,
    },
    /// The heuristic provider failed the pre-flight self-estimate probe
    /// (`estimate(target, target)` must be zero). Typically a provider whose
    /// internal tables were built for a different target and reused across
    /// searches.
    TargetMismatch { detail: String },
}

impl std::fmt::Display for SearchError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::NegativeEdgeWeight { from, to, weight } => {
                write!(f, "invalid edge weight {weight} on {from} -> {to}")
            }
            Self::HeuristicRepairViolation {
                vertex,
                stored,
                attempted,
            } => {
                write!(
                    f,
                    "heuristic repair attempted to lower h({vertex}) from {stored} to {attempted}"
                )
            }
            Self::TargetMismatch { detail } => {
                write!(f, "heuristic target mismatch: {detail}")
            }
        }
    }
}

impl std::error::Error for SearchError {}
