//! Domain model types for the multi-compartment VRP with stochastic demand.
//!
//! Provides the core abstractions: an immutable problem instance, routes as
//! depot-to-depot node sequences, route sets that partition the customers,
//! and giant tours awaiting a split.

mod instance;
mod route;
mod solution;
mod tour;

pub use instance::Instance;
pub use route::{Route, DEPOT};
pub use solution::RouteSet;
pub use tour::GiantTour;

pub(crate) use tour::check_distinct;
