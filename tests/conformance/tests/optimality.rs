//! Optimality against the Dijkstra oracle, across heuristic regimes and
//! both fixture and grid worlds.

use conformance_tests::oracle_cost;
use wayfinder_harness::landmark::{LandmarkHeuristic, LandmarkSelection};
use wayfinder_harness::worlds::grid::{GridPos, GridWorld, Manhattan};
use wayfinder_harness::worlds::{detour, diamond};
use wayfinder_search::engine::search;
use wayfinder_search::heuristic::{Heuristic, Pathmax, ZeroHeuristic};
use wayfinder_search::policy::SearchPolicyV1;
use wayfinder_search::report::TerminationReasonV1;

fn blocked_grid() -> GridWorld {
    let mut grid = GridWorld::open(8, 8);
    for y in 0..7 {
        grid.block(GridPos::new(3, y));
    }
    for y in 2..8 {
        grid.block(GridPos::new(6, y));
    }
    grid
}

fn corner_landmarks(grid: &GridWorld) -> Vec<GridPos> {
    [
        GridPos::new(0, 0),
        GridPos::new(7, 0),
        GridPos::new(0, 7),
        GridPos::new(7, 7),
    ]
    .into_iter()
    .filter(|c| grid.is_passable(*c))
    .collect()
}

#[test]
fn diamond_is_optimal_under_every_regime() {
    let g = diamond::graph();
    let plain = diamond::heuristic();
    let repair = Pathmax::new(diamond::heuristic());
    let policy = SearchPolicyV1::default();

    for heuristic in [
        Heuristic::Plain(&ZeroHeuristic),
        Heuristic::Plain(&plain),
        Heuristic::Repairing(&repair),
    ] {
        let result = search(&diamond::START, &diamond::TARGET, &g, heuristic, &policy).unwrap();
        let path = result.path.expect("goal reached");
        assert!((path.cost - diamond::OPTIMAL_COST).abs() < f64::EPSILON);
        assert_eq!(path.vertices, diamond::optimal_path());
    }
}

#[test]
fn detour_is_optimal_with_and_without_repair() {
    let g = detour::graph();
    let plain = detour::heuristic();
    let repair = Pathmax::new(detour::heuristic());
    let policy = SearchPolicyV1::default();

    for heuristic in [Heuristic::Plain(&plain), Heuristic::Repairing(&repair)] {
        let result = search(&detour::START, &detour::TARGET, &g, heuristic, &policy).unwrap();
        let path = result.path.expect("goal reached");
        assert!((path.cost - detour::OPTIMAL_COST).abs() < f64::EPSILON);
        assert_eq!(path.vertices, detour::optimal_path());
    }
}

#[test]
fn grid_all_pairs_matches_the_oracle_under_manhattan() {
    let grid = blocked_grid();
    let policy = SearchPolicyV1::default();
    let positions = grid.passable_positions();
    // Row-major stride keeps the sweep affordable while still covering
    // unreachable pockets and both sides of the walls.
    for target in positions.iter().step_by(7) {
        for start in positions.iter().step_by(3) {
            let result = search(start, target, &grid, Heuristic::Plain(&Manhattan), &policy)
                .unwrap();
            match oracle_cost(&grid, start, target) {
                Some(expected) => {
                    let path = result.path.unwrap_or_else(|| {
                        panic!("engine missed a reachable pair {start:?} -> {target:?}")
                    });
                    assert!(
                        (path.cost - expected).abs() < 1e-9,
                        "suboptimal cost for {start:?} -> {target:?}"
                    );
                }
                None => assert!(result.path.is_none()),
            }
        }
    }
}

#[test]
fn inconsistent_landmarks_stay_optimal_with_repair() {
    let grid = blocked_grid();
    let landmarks = corner_landmarks(&grid);
    let heuristic =
        LandmarkHeuristic::build(&grid, &landmarks, LandmarkSelection::Alternating).unwrap();
    let policy = SearchPolicyV1::default();
    let positions = grid.passable_positions();
    for target in positions.iter().step_by(11) {
        for start in positions.iter().step_by(5) {
            let result = search(
                start,
                target,
                &grid,
                Heuristic::Repairing(&heuristic),
                &policy,
            )
            .unwrap();
            match oracle_cost(&grid, start, target) {
                Some(expected) => {
                    let path = result.path.expect("reachable pair");
                    assert!(
                        (path.cost - expected).abs() < 1e-9,
                        "suboptimal cost for {start:?} -> {target:?}"
                    );
                }
                None => assert!(result.path.is_none()),
            }
        }
    }
}

#[test]
fn consistent_landmarks_skip_repair_in_auto_mode() {
    let grid = blocked_grid();
    let landmarks = corner_landmarks(&grid);
    let heuristic = LandmarkHeuristic::build(&grid, &landmarks, LandmarkSelection::All).unwrap();
    let result = search(
        &GridPos::new(0, 0),
        &GridPos::new(7, 7),
        &grid,
        Heuristic::Repairing(&heuristic),
        &SearchPolicyV1::default(),
    )
    .unwrap();
    assert!(result.is_goal_reached());
    assert!(
        !result.report.metadata.repair_invoked,
        "Auto mode must honor a consistent declaration"
    );
    assert_eq!(result.report.metadata.total_h_raises, 0);
}

#[test]
fn unreachable_and_budget_exhaustion_are_distinct_outcomes() {
    let mut g = wayfinder_graph::AdjacencyGraph::new();
    g.add_edge("s", "a", 1.0);
    g.add_vertex("t");

    let unreachable = search(
        &"s",
        &"t",
        &g,
        Heuristic::Plain(&ZeroHeuristic),
        &SearchPolicyV1::default(),
    )
    .unwrap();
    assert_eq!(
        unreachable.report.metadata.termination_reason,
        TerminationReasonV1::FrontierExhausted
    );

    let exhausted = search(
        &"s",
        &"t",
        &g,
        Heuristic::Plain(&ZeroHeuristic),
        &SearchPolicyV1 {
            max_expansions: 0,
            ..SearchPolicyV1::default()
        },
    )
    .unwrap();
    assert_eq!(
        exhausted.report.metadata.termination_reason,
        TerminationReasonV1::ExpansionBudgetExceeded
    );
    assert!(exhausted.path.is_none());
}
