//! Inter-route stochastic 2-opt improvement.
//!
//! # Algorithm
//!
//! For each ordered pair of routes `(r, r')`, the two routes are chained into
//! one pseudo-tour `c = r[..-1] + r'[1..]` (the depot visit between them
//! dropped). Every classic 2-opt move on `c` reverses `c[i..j]`:
//!
//! ```text
//! delta = d(c[i-1], c[j-1]) + d(c[i], c[j]) - d(c[i-1], c[i]) - d(c[j-1], c[j])
//! ```
//!
//! Moves with delta < 0 are re-partitioned by the split procedure. If the
//! resulting routes have a smaller total expected length than `r` and `r'`
//! together, they replace both routes and the search restarts from the first
//! pair (first-improvement strategy). Moves whose pseudo-tour cannot be split
//! feasibly are skipped.
//!
//! # Complexity
//!
//! O(m² · k²) candidate moves per pass for m routes of up to k customers,
//! each accepted-candidate check costing one O(k³) split.
//!
//! # Reference
//!
//! Croes, G.A. (1958). "A method for solving traveling salesman problems",
//! *Operations Research* 6(6), 791-812.

use log::{debug, warn};
use serde::{Deserialize, Serialize};

use crate::distance::DistanceMatrix;
use crate::error::RoutingResult;
use crate::evaluation::CostModel;
use crate::models::{Instance, Route, RouteSet};
use crate::split::RouteSplitter;

/// Limits for the stochastic 2-opt search.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct LocalSearchConfig {
    /// Maximum number of accepted moves; `None` runs to a local optimum.
    pub max_moves: Option<usize>,
}

impl LocalSearchConfig {
    /// Creates an unbounded configuration.
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the accepted-move budget.
    pub fn with_max_moves(mut self, max_moves: usize) -> Self {
        self.max_moves = Some(max_moves);
        self
    }
}

/// Improves a route set with stochastic 2-opt until no move improves it.
///
/// # Errors
///
/// [`RoutingError::DegenerateTour`](crate::RoutingError::DegenerateTour) if
/// `routes` is not a partition of the instance's customers.
///
/// # Examples
///
/// ```
/// use u_routing_sd::distance::DistanceMatrix;
/// use u_routing_sd::models::{Instance, Route, RouteSet};
/// use u_routing_sd::evaluation::CostModel;
/// use u_routing_sd::local_search::stochastic_two_opt;
///
/// let dm = DistanceMatrix::from_points(&[(0.0, 0.0), (1.0, 0.0), (2.0, 0.0), (3.0, 0.0)]);
/// let inst = Instance::new(dm, vec![vec![10.0; 3]; 3], vec![1000.0; 3], 0.1, 100.0).unwrap();
///
/// let start = RouteSet::from_routes(vec![Route::from_customers(&[3, 1]), Route::round_trip(2)]);
/// let improved = stochastic_two_opt(&inst, &start).unwrap();
///
/// let cost = CostModel::new(&inst);
/// assert!(cost.route_set_expected_length(&improved) < cost.route_set_expected_length(&start));
/// ```
pub fn stochastic_two_opt(instance: &Instance, routes: &RouteSet) -> RoutingResult<RouteSet> {
    stochastic_two_opt_with(instance, routes, &LocalSearchConfig::default())
}

/// Stochastic 2-opt with an explicit configuration.
pub fn stochastic_two_opt_with(
    instance: &Instance,
    routes: &RouteSet,
    config: &LocalSearchConfig,
) -> RoutingResult<RouteSet> {
    routes.check_partition(instance.num_customers())?;

    let cost = CostModel::new(instance);
    let splitter = RouteSplitter::new(instance);
    let mut current = routes.routes().to_vec();
    let mut moves = 0usize;

    loop {
        if config.max_moves.is_some_and(|max| moves >= max) {
            warn!("stochastic 2-opt stopped after {} moves", moves);
            break;
        }
        let Some((a, b, replacement)) = find_improving_move(&cost, &splitter, &current) else {
            break;
        };

        current = current
            .into_iter()
            .enumerate()
            .filter(|&(idx, _)| idx != a && idx != b)
            .map(|(_, r)| r)
            .chain(replacement.into_routes())
            .collect();
        moves += 1;

        debug!(
            "2-opt move {} on routes {} and {}, expected length {:.3}",
            moves,
            a,
            b,
            current.iter().map(|r| cost.total_expected_length(r)).sum::<f64>()
        );
    }

    Ok(RouteSet::from_routes(current))
}

/// Returns the first improving move as (route a, route b, replacement routes).
fn find_improving_move(
    cost: &CostModel<'_>,
    splitter: &RouteSplitter<'_>,
    routes: &[Route],
) -> Option<(usize, usize, RouteSet)> {
    let distances = cost.instance().distances();
    let expected: Vec<f64> = routes.iter().map(|r| cost.total_expected_length(r)).collect();

    for (a, r) in routes.iter().enumerate() {
        for (b, r_apo) in routes.iter().enumerate() {
            if a == b {
                continue;
            }
            let original = expected[a] + expected[b];
            let chained = chain(r, r_apo);
            let len = chained.len();

            for i in 1..len.saturating_sub(2) {
                for j in i + 2..len {
                    if two_opt_delta(&chained, distances, i, j) >= 0.0 {
                        continue;
                    }
                    let mut candidate = chained.clone();
                    candidate[i..j].reverse();

                    let Ok(result) = splitter.split(&candidate[1..len - 1]) else {
                        continue;
                    };
                    if result.total_expected_length < original {
                        return Some((a, b, result.routes));
                    }
                }
            }
        }
    }
    None
}

/// Chains two routes into `depot → r → r' → depot`.
fn chain(first: &Route, second: &Route) -> Vec<usize> {
    let mut nodes = Vec::with_capacity(first.nodes().len() + second.nodes().len() - 2);
    nodes.extend_from_slice(&first.nodes()[..first.nodes().len() - 1]);
    nodes.extend_from_slice(&second.nodes()[1..]);
    nodes
}

/// Computes the planned length change from reversing `nodes[i..j]`.
///
/// Before: ...-nodes[i-1] - nodes[i] - ... - nodes[j-1] - nodes[j]-...
/// After:  ...-nodes[i-1] - nodes[j-1] - ... - nodes[i] - nodes[j]-...
fn two_opt_delta(nodes: &[usize], distances: &DistanceMatrix, i: usize, j: usize) -> f64 {
    let old_cost = distances.get(nodes[i - 1], nodes[i]) + distances.get(nodes[j - 1], nodes[j]);
    let new_cost = distances.get(nodes[i - 1], nodes[j - 1]) + distances.get(nodes[i], nodes[j]);
    new_cost - old_cost
}
