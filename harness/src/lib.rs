//! Wayfinder Harness: worlds, heuristic implementations, and the run
//! bundle writer.
//!
//! Everything here sits above the engine: fixture graphs with known true
//! costs, a grid world, a landmark (ALT-style) heuristic family, and a
//! runner that executes a search under a policy and packages the outcome
//! with its report digest into an on-disk bundle.

#![forbid(unsafe_code)]

pub mod landmark;
pub mod runner;
pub mod worlds;
