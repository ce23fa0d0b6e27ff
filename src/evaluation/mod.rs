//! Route cost evaluation under stochastic demand.
//!
//! - [`CostModel`] — planned length, failure probabilities, expected length
//! - [`FailureTable`] — conditional failure probabilities per restock position
//! - [`standard_normal_cdf`] — Φ used by the failure model

mod cost;
mod normal;

pub use cost::{CostModel, FailureTable};
pub use normal::standard_normal_cdf;
