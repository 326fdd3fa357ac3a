//! Wayfinder Search: A*-family shortest-path search under
//! admissible-but-inconsistent heuristics, with pathmax repair.
//!
//! This crate is the engine layer. It depends only on `wayfinder_graph`;
//! it does NOT depend on `wayfinder_harness`.
//!
//! # Crate dependency graph
//!
//! ```text
//! wayfinder_graph  ←  wayfinder_search  ←  wayfinder_harness
//! (collaborator)      (frontier, engine)    (worlds, runner)
//! ```
//!
//! # Key types
//!
//! - [`engine::search`] — the expansion loop; re-expands closed vertices
//!   when a cheaper path is discovered
//! - [`heuristic::HeuristicProvider`] / [`heuristic::HeuristicRepair`] —
//!   admissible estimator contract and the optional repair capability
//! - [`heuristic::HScoreMap`] — engine-owned vertex → h table, monotone
//!   non-decreasing per search
//! - [`frontier::Frontier`] — lazy-deletion min-f priority structure
//! - [`score::ScoreTable`] — g/parent/status table with strict relaxation
//! - [`report::SearchReportV1`] — canonical, digestable audit artifact
//! - [`baseline`] — independent Dijkstra oracle

#![forbid(unsafe_code)]

pub mod baseline;
pub mod canon;
pub mod engine;
pub mod error;
pub mod frontier;
pub mod heuristic;
pub mod policy;
pub mod report;
pub mod score;
