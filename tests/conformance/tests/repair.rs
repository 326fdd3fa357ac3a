//! Repair-specific properties: the successor raise, monotone h sequences,
//! admissibility preservation, re-expansion correctness, and the
//! work-reduction guarantee.

use std::collections::HashMap;

use conformance_tests::remaining_costs_symmetric;
use wayfinder_harness::landmark::{LandmarkHeuristic, LandmarkSelection};
use wayfinder_harness::worlds::grid::{GridPos, GridWorld};
use wayfinder_harness::worlds::{detour, diamond};
use wayfinder_search::baseline;
use wayfinder_search::engine::{search, SearchResult};
use wayfinder_search::heuristic::{Heuristic, Pathmax};
use wayfinder_search::policy::SearchPolicyV1;
use wayfinder_search::report::{EdgeOutcomeV1, SearchReportV1};

fn diamond_with_repair() -> SearchResult<&'static str> {
    let g = diamond::graph();
    let repair = Pathmax::new(diamond::heuristic());
    search(
        &diamond::START,
        &diamond::TARGET,
        &g,
        Heuristic::Repairing(&repair),
        &SearchPolicyV1::default(),
    )
    .unwrap()
}

fn detour_run(repair_on: bool) -> SearchResult<&'static str> {
    let g = detour::graph();
    let plain = detour::heuristic();
    let repairable = Pathmax::new(detour::heuristic());
    let heuristic = if repair_on {
        Heuristic::Repairing(&repairable)
    } else {
        Heuristic::Plain(&plain)
    };
    search(
        &detour::START,
        &detour::TARGET,
        &g,
        heuristic,
        &SearchPolicyV1::default(),
    )
    .unwrap()
}

/// Assert that every h value observed for a vertex over the report's
/// chronology is non-decreasing.
fn assert_monotone_h(report: &SearchReportV1) {
    let mut last: HashMap<String, f64> = HashMap::new();
    let mut observe = |vertex: &str, value: f64| {
        if let Some(prev) = last.get(vertex) {
            assert!(
                value >= *prev - 1e-12,
                "h({vertex}) decreased from {prev} to {value}"
            );
        }
        last.insert(vertex.to_string(), value);
    };
    for event in &report.expansions {
        observe(&event.vertex, event.h_before);
        observe(&event.vertex, event.h_after);
        for edge in &event.edges {
            if let Some(raise) = &edge.h_raise {
                observe(&edge.to, raise.from);
                observe(&edge.to, raise.to);
            }
        }
    }
}

#[test]
fn expanding_a_raises_the_successor_estimate_on_the_diamond() {
    let result = diamond_with_repair();
    let event_a = result
        .report
        .expansions
        .iter()
        .find(|e| e.vertex == "\"a\"")
        .expect("a is expanded");
    let edge_ab = event_a
        .edges
        .iter()
        .find(|e| e.to == format!("{:?}", diamond::RAISED_VERTEX))
        .expect("a -> b is examined");
    let raise = edge_ab.h_raise.as_ref().expect("h(b) must be raised");
    assert!((raise.to - diamond::RAISED_H).abs() < f64::EPSILON);
    assert!(
        raise.to <= diamond::TRUE_REMAINING_FROM_RAISED + 1e-12,
        "raise overshoots the true remaining cost"
    );
}

#[test]
fn h_sequences_are_monotone_under_repair() {
    assert_monotone_h(&diamond_with_repair().report);
    assert_monotone_h(&detour_run(true).report);
}

#[test]
fn h_sequences_are_monotone_for_inconsistent_landmarks() {
    let mut grid = GridWorld::open(7, 7);
    for y in 0..6 {
        grid.block(GridPos::new(2, y));
    }
    let landmarks = vec![GridPos::new(0, 6), GridPos::new(6, 0)];
    let heuristic =
        LandmarkHeuristic::build(&grid, &landmarks, LandmarkSelection::Alternating).unwrap();
    let result = search(
        &GridPos::new(0, 0),
        &GridPos::new(6, 6),
        &grid,
        Heuristic::Repairing(&heuristic),
        &SearchPolicyV1::default(),
    )
    .unwrap();
    assert!(result.is_goal_reached());
    assert_monotone_h(&result.report);
}

/// Assert that every summarized final h stays at or below the true
/// remaining cost toward `target`.
fn assert_admissible_summaries(
    graph: &wayfinder_graph::AdjacencyGraph<&'static str>,
    vertices: &[&'static str],
    target: &'static str,
    result: &SearchResult<&'static str>,
) {
    for v in vertices {
        let Some(summary) = result
            .report
            .vertex_summaries
            .iter()
            .find(|s| s.vertex == format!("{v:?}"))
        else {
            continue; // never touched by the search
        };
        let dist = baseline::dijkstra_distances(graph, v).unwrap();
        let true_remaining = dist.get(&target).copied().unwrap_or(f64::INFINITY);
        assert!(
            summary.h <= true_remaining + 1e-9,
            "final h({v}) = {} exceeds true remaining {true_remaining}",
            summary.h
        );
    }
}

#[test]
fn repaired_estimates_never_exceed_true_remaining_costs() {
    assert_admissible_summaries(
        &detour::graph(),
        &["s", "x", "y", "d", "t"],
        detour::TARGET,
        &detour_run(true),
    );
    assert_admissible_summaries(
        &diamond::graph(),
        &["s", "a", "b", "t"],
        diamond::TARGET,
        &diamond_with_repair(),
    );
}

#[test]
fn repaired_landmark_estimates_stay_admissible_on_the_grid() {
    let mut grid = GridWorld::open(7, 7);
    for y in 1..7 {
        grid.block(GridPos::new(4, y));
    }
    let landmarks = vec![GridPos::new(0, 0), GridPos::new(6, 6), GridPos::new(0, 6)];
    let heuristic =
        LandmarkHeuristic::build(&grid, &landmarks, LandmarkSelection::Alternating).unwrap();
    let target = GridPos::new(6, 0);
    let truth = remaining_costs_symmetric(&grid, &target);
    let rendered_truth: HashMap<String, f64> = truth
        .iter()
        .map(|(pos, d)| (format!("{pos:?}"), *d))
        .collect();

    let result = search(
        &GridPos::new(0, 3),
        &target,
        &grid,
        Heuristic::Repairing(&heuristic),
        &SearchPolicyV1::default(),
    )
    .unwrap();
    assert!(result.is_goal_reached());
    for summary in &result.report.vertex_summaries {
        let true_remaining = rendered_truth
            .get(&summary.vertex)
            .copied()
            .unwrap_or(f64::INFINITY);
        assert!(
            summary.h <= true_remaining + 1e-9,
            "final h({}) = {} exceeds true remaining {true_remaining}",
            summary.vertex,
            summary.h
        );
    }
}

#[test]
fn detour_reopens_the_prematurely_closed_vertex() {
    let result = detour_run(false);
    let path = result.path.expect("goal reached");
    assert!((path.cost - detour::OPTIMAL_COST).abs() < f64::EPSILON);
    assert!(
        (path.cost - detour::COST_WITHOUT_REOPENING).abs() > 1.0,
        "the returned cost must be the optimum, not the never-reopen answer"
    );

    let reopened = format!("{:?}", detour::REOPENED_VERTEX);
    let summary = result
        .report
        .vertex_summaries
        .iter()
        .find(|s| s.vertex == reopened)
        .expect("x is summarized");
    assert!(summary.times_expanded >= 2, "x must be expanded twice");
    assert!(result.report.metadata.total_reexpansions >= 1);

    let saw_reopen = result
        .report
        .expansions
        .iter()
        .flat_map(|e| e.edges.iter())
        .any(|r| matches!(r.outcome, EdgeOutcomeV1::Relaxed { reopened: true, .. }));
    assert!(saw_reopen, "some relaxation must reopen a closed vertex");
}

#[test]
fn repair_reduces_work_without_changing_the_answer() {
    let without = detour_run(false);
    let with = detour_run(true);

    let cost_without = without.path.expect("goal").cost;
    let cost_with = with.path.expect("goal").cost;
    assert!((cost_without - cost_with).abs() < f64::EPSILON);
    assert!((cost_with - detour::OPTIMAL_COST).abs() < f64::EPSILON);

    assert!(
        with.report.metadata.total_expansions <= without.report.metadata.total_expansions,
        "repair must never increase the expansion count on this fixture"
    );
    assert!(
        with.report.metadata.total_h_raises >= 1,
        "repair must actually fire on this fixture"
    );
}
