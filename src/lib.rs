//! # u-routing-sd
//!
//! Multi-compartment vehicle routing with stochastic demand (MC-VRPSD).
//! Each vehicle carries one compartment per product; customer demands are
//! normally distributed with a common coefficient of variation. A route that
//! runs out of some product returns to the depot to restock, and the expected
//! length of those recourse trips is part of the objective.
//!
//! ## Modules
//!
//! - [`models`] — Domain model types (Instance, Route, RouteSet, GiantTour)
//! - [`distance`] — Distance matrix
//! - [`evaluation`] — Failure probabilities and expected route length
//! - [`constructive`] — Constructive heuristics (Nearest Neighbor, Nearest Insertion, stochastic savings)
//! - [`split`] — Optimal giant tour partitioning under expected cost (S-split)
//! - [`local_search`] — Stochastic inter-route 2-opt
//! - [`generator`] — Seeded random instances
//! - [`pipeline`] — Builder plus improvement chains
//!
//! ## Example
//!
//! ```
//! use u_routing_sd::distance::DistanceMatrix;
//! use u_routing_sd::models::Instance;
//! use u_routing_sd::evaluation::CostModel;
//! use u_routing_sd::{constructive, local_search, split};
//!
//! let dm = DistanceMatrix::from_points(&[
//!     (0.0, 0.0), (1.0, 5.0), (-1.0, 5.0), (1.0, -5.0), (-1.0, -5.0),
//! ]);
//! let inst = Instance::new(dm, vec![vec![10.0; 3]; 4], vec![25.0; 3], 0.1, 20.0).unwrap();
//! let cost = CostModel::new(&inst);
//!
//! let tour = constructive::nearest_neighbor_tour(&inst);
//! let routes = split::split(&inst, &tour).unwrap();
//! let improved = local_search::stochastic_two_opt(&inst, &routes).unwrap();
//!
//! assert!(cost.route_set_expected_length(&improved) <= cost.route_set_expected_length(&routes));
//! assert!(improved.routes().iter().all(|r| cost.is_feasible(r)));
//! ```

pub mod constructive;
pub mod distance;
pub mod error;
pub mod evaluation;
pub mod generator;
pub mod local_search;
pub mod models;
pub mod pipeline;
pub mod split;

#[cfg(test)]
mod testing;

pub use error::{RoutingError, RoutingResult};
