//! Optimal partitioning of giant tours into feasible routes (S-split).
//!
//! - [`split`] — split a tour covering every customer
//! - [`RouteSplitter`] — reusable splitter for partial tours, used by local search

mod splitter;

pub use splitter::{split, RouteSplitter, SplitResult};
