//! Execute a search under a policy and package the outcome into an
//! on-disk run bundle.
//!
//! A bundle directory holds two canonical JSON artifacts:
//!
//! - `report.json` — the engine's full [`SearchReportV1`]
//! - `run.json` — the [`RunRecordV1`] summary, binding world and heuristic
//!   identifiers to the report digest

use std::fs;
use std::path::Path;

use wayfinder_graph::{Graph, Vertex};
use wayfinder_search::canon::{canonical_json_bytes, CanonError};
use wayfinder_search::engine::{search, SearchResult};
use wayfinder_search::error::SearchError;
use wayfinder_search::heuristic::Heuristic;
use wayfinder_search::policy::SearchPolicyV1;
use wayfinder_search::report::SearchReportV1;

/// Harness-level failure.
#[derive(Debug)]
pub enum RunnerError {
    /// The engine rejected a collaborator contract violation.
    Search(SearchError),
    /// Canonical serialization failed.
    Canon(CanonError),
    /// Bundle directory or file I/O failed.
    Io { detail: String },
}

impl std::fmt::Display for RunnerError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Search(e) => write!(f, "search failed: {e}"),
            Self::Canon(e) => write!(f, "canonical serialization failed: {e}"),
            Self::Io { detail } => write!(f, "bundle I/O failed: {detail}"),
        }
    }
}

impl std::error::Error for RunnerError {}

impl From<SearchError> for RunnerError {
    fn from(e: SearchError) -> Self {
        Self::Search(e)
    }
}

impl From<CanonError> for RunnerError {
    fn from(e: CanonError) -> Self {
        Self::Canon(e)
    }
}

/// Summary record of one search run.
#[derive(Debug, Clone)]
pub struct RunRecordV1 {
    /// World identifier supplied by the caller.
    pub world_id: String,
    /// Heuristic identifier supplied by the caller.
    pub heuristic_id: String,
    /// Policy echo: configured repair mode.
    pub repair_mode: String,
    /// Whether the target was reached.
    pub goal_reached: bool,
    /// Path cost when the target was reached.
    pub cost: Option<f64>,
    /// Rendered path vertices when the target was reached.
    pub path: Option<Vec<String>>,
    /// Engine expansion count.
    pub total_expansions: u64,
    /// Engine termination reason name.
    pub termination_reason: String,
    /// Content address of the full report.
    pub report_digest: String,
}

impl RunRecordV1 {
    fn to_json_value(&self) -> serde_json::Value {
        serde_json::json!({
            "cost": self.cost,
            "goal_reached": self.goal_reached,
            "heuristic_id": self.heuristic_id,
            "path": self.path,
            "repair_mode": self.repair_mode,
            "report_digest": self.report_digest,
            "termination_reason": self.termination_reason,
            "total_expansions": self.total_expansions,
            "world_id": self.world_id,
        })
    }
}

/// Run one search and build its summary record.
///
/// # Errors
///
/// Propagates engine contract violations and digest serialization failures.
pub fn run_search<V, G>(
    world_id: &str,
    heuristic_id: &str,
    start: &V,
    target: &V,
    graph: &G,
    heuristic: Heuristic<'_, V>,
    policy: &SearchPolicyV1,
) -> Result<(RunRecordV1, SearchResult<V>), RunnerError>
where
    V: Vertex,
    G: Graph<V>,
{
    let result = search(start, target, graph, heuristic, policy)?;
    let record = RunRecordV1 {
        world_id: world_id.to_string(),
        heuristic_id: heuristic_id.to_string(),
        repair_mode: result.report.metadata.repair_mode.clone(),
        goal_reached: result.is_goal_reached(),
        cost: result.path.as_ref().map(|p| p.cost),
        path: result
            .path
            .as_ref()
            .map(|p| p.vertices.iter().map(|v| format!("{v:?}")).collect()),
        total_expansions: result.report.metadata.total_expansions,
        termination_reason: result.report.metadata.termination_reason.as_str().to_string(),
        report_digest: result.report.digest()?,
    };
    Ok((record, result))
}

/// Write `run.json` and `report.json` into a bundle directory.
///
/// # Errors
///
/// Returns [`RunnerError::Io`] on filesystem failure and propagates
/// canonical serialization errors.
pub fn write_run_bundle(
    dir: &Path,
    record: &RunRecordV1,
    report: &SearchReportV1,
) -> Result<(), RunnerError> {
    fs::create_dir_all(dir).map_err(|e| RunnerError::Io {
        detail: format!("create {}: {e}", dir.display()),
    })?;

    let report_bytes = report.to_canonical_json_bytes()?;
    let report_path = dir.join("report.json");
    fs::write(&report_path, report_bytes).map_err(|e| RunnerError::Io {
        detail: format!("write {}: {e}", report_path.display()),
    })?;

    let record_bytes = canonical_json_bytes(&record.to_json_value())?;
    let record_path = dir.join("run.json");
    fs::write(&record_path, record_bytes).map_err(|e| RunnerError::Io {
        detail: format!("write {}: {e}", record_path.display()),
    })?;

    Ok(())
}
