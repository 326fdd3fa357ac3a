//! Shared helpers for the wayfinder benchmark suites.

#![forbid(unsafe_code)]

use wayfinder_harness::landmark::{LandmarkHeuristic, LandmarkSelection};
use wayfinder_harness::worlds::grid::{GridPos, GridWorld};

/// A prepared grid regime: the world plus endpoints and landmark tables.
pub struct GridRegime {
    pub grid: GridWorld,
    pub start: GridPos,
    pub target: GridPos,
    pub consistent: LandmarkHeuristic<GridPos>,
    pub inconsistent: LandmarkHeuristic<GridPos>,
}

/// A corridor-heavy grid whose walls force long detours, with corner
/// landmark tables in both selection modes.
///
/// # Panics
///
/// Panics if landmark table construction fails. Benchmark setup failures
/// are fatal.
#[must_use]
pub fn corridor_regime(size: u32) -> GridRegime {
    let mut grid = GridWorld::open(size, size);
    // Vertical walls with alternating gaps at the top and bottom.
    for x in (2..size.saturating_sub(1)).step_by(3) {
        let gap = if (x / 3) % 2 == 0 { size - 1 } else { 0 };
        for y in 0..size {
            if y != gap {
                grid.block(GridPos::new(x, y));
            }
        }
    }
    let landmarks: Vec<GridPos> = [
        GridPos::new(0, 0),
        GridPos::new(size - 1, 0),
        GridPos::new(0, size - 1),
        GridPos::new(size - 1, size - 1),
    ]
    .into_iter()
    .filter(|c| grid.is_passable(*c))
    .collect();

    let consistent = LandmarkHeuristic::build(&grid, &landmarks, LandmarkSelection::All)
        .expect("landmark tables over a valid grid");
    let inconsistent = LandmarkHeuristic::build(&grid, &landmarks, LandmarkSelection::Alternating)
        .expect("landmark tables over a valid grid");

    GridRegime {
        start: GridPos::new(0, 0),
        target: GridPos::new(size - 1, size - 1),
        grid,
        consistent,
        inconsistent,
    }
}
