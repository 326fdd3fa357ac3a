//! Fixture worlds with known true costs.
//!
//! Each world states its optimal answers as constants so tests assert
//! against ground truth rather than recomputing it.

pub mod detour;
pub mod diamond;
pub mod grid;
