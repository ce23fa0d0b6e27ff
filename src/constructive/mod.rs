//! Constructive heuristics for building initial MC-VRPSD solutions.
//!
//! - [`nearest_neighbor_tour`] — Greedy nearest-neighbor giant tour, O(n²)
//! - [`nearest_insertion_tour`] — Nearest-insertion giant tour, O(n³)
//! - [`savings_merge`] — Stochastic Clarke-Wright savings (SCW) on expected cost

mod nearest_insertion;
mod nearest_neighbor;
mod savings;

pub use nearest_insertion::nearest_insertion_tour;
pub use nearest_neighbor::nearest_neighbor_tour;
pub use savings::{best_merge, savings_merge, savings_merge_from, Merge};
