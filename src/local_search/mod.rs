//! Local search operators for improving MC-VRPSD route sets.
//!
//! - [`stochastic_two_opt`] — Inter-route 2-opt re-partitioned by split,
//!   accepted on expected length

mod two_opt;

pub use two_opt::{stochastic_two_opt, stochastic_two_opt_with, LocalSearchConfig};
