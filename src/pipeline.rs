//! Construction and improvement pipeline.
//!
//! Chains a constructive heuristic, the split procedure for giant-tour
//! builders, and optionally stochastic 2-opt.

use log::info;
use serde::{Deserialize, Serialize};

use crate::constructive::{nearest_insertion_tour, nearest_neighbor_tour, savings_merge};
use crate::error::RoutingResult;
use crate::evaluation::CostModel;
use crate::local_search::{stochastic_two_opt_with, LocalSearchConfig};
use crate::models::{Instance, RouteSet};
use crate::split::split;

/// Initial solution builder.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum Strategy {
    /// Stochastic savings merge.
    #[default]
    Savings,
    /// Nearest-neighbor giant tour followed by split.
    NearestNeighbor,
    /// Nearest-insertion giant tour followed by split.
    NearestInsertion,
}

impl Strategy {
    /// All strategies, in declaration order.
    pub const ALL: [Strategy; 3] = [Strategy::Savings, Strategy::NearestNeighbor, Strategy::NearestInsertion];

    /// Short name used in logs.
    pub fn name(self) -> &'static str {
        match self {
            Self::Savings => "SCW",
            Self::NearestNeighbor => "NN",
            Self::NearestInsertion => "NI",
        }
    }

    /// Builds an initial route set.
    ///
    /// # Errors
    ///
    /// [`RoutingError::InfeasibleSplit`](crate::RoutingError::InfeasibleSplit)
    /// if a giant tour cannot be split within the route bound.
    pub fn construct(self, instance: &Instance) -> RoutingResult<RouteSet> {
        match self {
            Self::Savings => Ok(savings_merge(instance)),
            Self::NearestNeighbor => split(instance, &nearest_neighbor_tour(instance)),
            Self::NearestInsertion => split(instance, &nearest_insertion_tour(instance)),
        }
    }
}

/// Builds a route set with `strategy`, then improves it with stochastic
/// 2-opt when `improve` is set.
///
/// # Examples
///
/// ```
/// use u_routing_sd::generator::{generate, GeneratorConfig};
/// use u_routing_sd::local_search::LocalSearchConfig;
/// use u_routing_sd::pipeline::{solve, Strategy};
///
/// let config = GeneratorConfig::new(8)
///     .with_tightness(3.0)
///     .with_bound_factor(6.0, 8.0)
///     .with_seed(5);
/// let inst = generate(&config).unwrap();
/// let routes = solve(&inst, Strategy::NearestNeighbor, true, &LocalSearchConfig::default()).unwrap();
/// assert!(routes.check_partition(8).is_ok());
/// ```
pub fn solve(
    instance: &Instance,
    strategy: Strategy,
    improve: bool,
    config: &LocalSearchConfig,
) -> RoutingResult<RouteSet> {
    let cost = CostModel::new(instance);
    info!(
        "solving {} customers with {}{}",
        instance.num_customers(),
        strategy.name(),
        if improve { " + 2-opt" } else { "" }
    );

    let mut routes = strategy.construct(instance)?;
    info!(
        "{}: {} routes, planned {:.2}, expected {:.2}",
        strategy.name(),
        routes.num_routes(),
        cost.route_set_planned_length(&routes),
        cost.route_set_expected_length(&routes)
    );

    if improve {
        routes = stochastic_two_opt_with(instance, &routes, config)?;
        info!(
            "{} + 2-opt: {} routes, planned {:.2}, expected {:.2}",
            strategy.name(),
            routes.num_routes(),
            cost.route_set_planned_length(&routes),
            cost.route_set_expected_length(&routes)
        );
    }

    Ok(routes)
}
