//! `vs-spread`: grid geometry and infection propagation.
//!
//! # Crate layout
//!
//! | Module        | Contents                                                      |
//! |---------------|---------------------------------------------------------------|
//! | [`grid`]      | `GridGeometry`, row-major index math and 3×3 neighbor scans   |
//! | [`propagate`] | `propagate`, `spread_from`, `SpreadParams`                    |
//!
//! # Design notes
//!
//! Everything here is pure: [`propagate`] reads a status slice and an RNG
//! and returns the set of members that become infected this tick.  It never
//! mutates the population.  `vs-sim` calls it while holding the population
//! lock and applies the result in the same critical section.

pub mod grid;
pub mod propagate;

#[cfg(test)]
mod tests;

pub use grid::{GridGeometry, MAX_NEIGHBORS};
pub use propagate::{SpreadParams, infected_seeds, propagate, spread_from};
