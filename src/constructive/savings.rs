//! Stochastic savings heuristic (SCW).
//!
//! # Algorithm
//!
//! Like the Clarke-Wright savings algorithm, SCW starts with one round trip
//! per customer and merges routes through their extreme customers (those
//! adjacent to the depot). Each iteration evaluates, for every ordered pair
//! of routes `(r, r')`, the four end-to-end concatenations of their
//! orientations, each in both travel directions, and scores the cheaper one
//! by
//!
//! ```text
//! s(r, r') = E(r) + D(r') - E(merged)
//! ```
//!
//! where `E` is the expected length and `D` the planned length. Only merged
//! routes within the bound `L` are considered. The single best merge over all
//! pairs is applied per iteration; the procedure stops when no merge has a
//! positive saving.
//!
//! # Complexity
//!
//! O(n² · k²) per iteration for routes of up to k customers, at most n - 1
//! iterations.
//!
//! # Reference
//!
//! Clarke, G. & Wright, J.W. (1964). "Scheduling of Vehicles from a Central
//! Depot to a Number of Delivery Points", *Operations Research* 12(4), 568-581.

use log::debug;

use crate::evaluation::CostModel;
use crate::models::{Instance, Route, RouteSet};

/// Orientation of (r, r') in the four extreme-vertex joins: `true` reverses.
const JOINS: [(bool, bool); 4] = [(true, false), (true, true), (false, false), (false, true)];

/// A candidate merge of two routes.
#[derive(Debug, Clone)]
pub struct Merge {
    /// Index of `r` in the route list.
    pub first: usize,
    /// Index of `r'` in the route list.
    pub second: usize,
    /// The merged route in its cheaper direction.
    pub route: Route,
    /// Saving `E(r) + D(r') - E(merged)`.
    pub saving: f64,
}

/// Finds the feasible merge with the largest saving.
///
/// Ties keep the first pair in scan order. Returns `None` if no pair can be
/// merged within the route bound.
pub fn best_merge(cost: &CostModel<'_>, routes: &[Route]) -> Option<Merge> {
    let bound = cost.instance().max_route_length();
    let expected: Vec<f64> = routes.iter().map(|r| cost.total_expected_length(r)).collect();
    let planned: Vec<f64> = routes.iter().map(|r| cost.planned_length(r)).collect();

    let mut best: Option<Merge> = None;
    for (a, r) in routes.iter().enumerate() {
        for (b, r_apo) in routes.iter().enumerate() {
            if a == b {
                continue;
            }
            let original = expected[a] + planned[b];

            for (rev_a, rev_b) in JOINS {
                let merged = join(r.customers(), rev_a, r_apo.customers(), rev_b);
                let mirrored = merged.reversed();
                let merged_cost = cost.total_expected_length(&merged);
                let mirrored_cost = cost.total_expected_length(&mirrored);
                let (route, merged_cost) = if mirrored_cost < merged_cost {
                    (mirrored, mirrored_cost)
                } else {
                    (merged, merged_cost)
                };
                if merged_cost > bound {
                    continue;
                }

                let saving = original - merged_cost;
                if best.as_ref().map_or(true, |m| saving > m.saving) {
                    best = Some(Merge {
                        first: a,
                        second: b,
                        route,
                        saving,
                    });
                }
            }
        }
    }
    best
}

/// Constructs a route set with the SCW heuristic from one round trip per
/// customer.
///
/// # Examples
///
/// ```
/// use u_routing_sd::distance::DistanceMatrix;
/// use u_routing_sd::models::Instance;
/// use u_routing_sd::constructive::savings_merge;
///
/// let dm = DistanceMatrix::from_points(&[(0.0, 0.0), (1.0, 0.0), (2.0, 0.0), (3.0, 0.0)]);
/// let inst = Instance::new(dm, vec![vec![10.0; 3]; 3], vec![1000.0; 3], 0.1, 100.0).unwrap();
///
/// let routes = savings_merge(&inst);
/// assert_eq!(routes.num_routes(), 1);
/// assert_eq!(routes.num_served(), 3);
/// ```
pub fn savings_merge(instance: &Instance) -> RouteSet {
    savings_merge_from(instance, RouteSet::round_trips(instance.num_customers()))
}

/// Runs SCW merging starting from an arbitrary route set.
pub fn savings_merge_from(instance: &Instance, initial: RouteSet) -> RouteSet {
    let cost = CostModel::new(instance);
    let mut routes = initial.into_routes();

    while let Some(merge) = best_merge(&cost, &routes) {
        if merge.saving <= 0.0 {
            break;
        }
        debug!(
            "merging routes {} and {} with saving {:.3}",
            merge.first, merge.second, merge.saving
        );
        routes = routes
            .into_iter()
            .enumerate()
            .filter(|&(idx, _)| idx != merge.first && idx != merge.second)
            .map(|(_, r)| r)
            .chain(std::iter::once(merge.route))
            .collect();
    }

    let routes = RouteSet::from_routes(routes);
    debug!(
        "savings merge finished with {} routes, expected length {:.3}",
        routes.num_routes(),
        cost.route_set_expected_length(&routes)
    );
    routes
}

/// Joins two customer sequences, optionally reversing either one.
fn join(first: &[usize], reverse_first: bool, second: &[usize], reverse_second: bool) -> Route {
    let mut customers = Vec::with_capacity(first.len() + second.len());
    if reverse_first {
        customers.extend(first.iter().rev());
    } else {
        customers.extend_from_slice(first);
    }
    if reverse_second {
        customers.extend(second.iter().rev());
    } else {
        customers.extend_from_slice(second);
    }
    Route::from_customers(&customers)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::{line_instance, point_instance};

    #[test]
    fn test_scw_line() {
        let inst = line_instance(3, &[10.0; 3], &[1000.0; 3], 0.1, 100.0);
        let routes = savings_merge(&inst);
        assert_eq!(routes.num_routes(), 1);
        assert!(routes.check_partition(3).is_ok());
        // 0→1→2→3→0 = 6.0
        let cost = CostModel::new(&inst);
        assert!((cost.route_set_planned_length(&routes) - 6.0).abs() < 1e-10);
    }

    #[test]
    fn test_scw_respects_bound() {
        // Any pair needs 17.07 > 12.
        let inst = point_instance(&[(0.0, 0.0), (5.0, 0.0), (0.0, 5.0), (-5.0, 0.0)], 10.0, 1000.0, 12.0);
        let routes = savings_merge(&inst);
        assert_eq!(routes.num_routes(), 3);
        assert!(best_merge(&CostModel::new(&inst), routes.routes()).is_none());
    }

    #[test]
    fn test_scw_stochastic_capacity() {
        // Three customers on one route almost surely fail.
        let inst = point_instance(&[(0.0, 0.0), (1.0, 0.0), (2.0, 0.0), (10.0, 0.0), (11.0, 0.0)], 10.0, 25.0, 23.0);
        let cost = CostModel::new(&inst);
        let routes = savings_merge(&inst);
        assert_eq!(routes.num_routes(), 2);
        assert!(routes.check_partition(4).is_ok());
        for r in routes.routes() {
            assert!(cost.is_feasible(r));
            let mut members = r.customers().to_vec();
            members.sort_unstable();
            assert!(members == vec![1, 2] || members == vec![3, 4]);
        }
    }

    #[test]
    fn test_scw_not_worse_than_round_trips() {
        let inst = point_instance(&[(0.0, 0.0), (3.0, 4.0), (6.0, 8.0), (-4.0, 3.0), (-8.0, 6.0)], 15.0, 40.0, 60.0);
        let cost = CostModel::new(&inst);
        let trivial = RouteSet::round_trips(4);
        let routes = savings_merge(&inst);
        assert!(routes.check_partition(4).is_ok());
        assert!(cost.route_set_expected_length(&routes) <= cost.route_set_expected_length(&trivial));
        assert!(routes.num_routes() < 4);
    }

    #[test]
    fn test_scw_idempotent() {
        let inst = point_instance(
            &[(50.0, 50.0), (10.0, 10.0), (90.0, 15.0), (20.0, 80.0), (70.0, 85.0), (45.0, 5.0), (5.0, 55.0)],
            20.0,
            45.0,
            260.0,
        );
        let cost = CostModel::new(&inst);
        let once = savings_merge(&inst);
        if let Some(m) = best_merge(&cost, once.routes()) {
            assert!(m.saving <= 0.0);
        }
        let twice = savings_merge_from(&inst, once.clone());
        assert_eq!(once, twice);
    }

    #[test]
    fn test_resplit_of_flattened_routes_not_worse() {
        let inst = point_instance(
            &[(50.0, 50.0), (10.0, 10.0), (90.0, 15.0), (20.0, 80.0), (70.0, 85.0), (45.0, 5.0), (5.0, 55.0)],
            20.0,
            45.0,
            260.0,
        );
        let cost = CostModel::new(&inst);
        let routes = savings_merge(&inst);
        let resplit = crate::split::split(&inst, &routes.flatten()).expect("SCW routes are feasible");
        assert!(cost.route_set_expected_length(&resplit) <= cost.route_set_expected_length(&routes) + 1e-9);
    }

    #[test]
    fn test_join_orientations() {
        let joined: Vec<Vec<usize>> = JOINS
            .iter()
            .map(|&(ra, rb)| join(&[1, 2], ra, &[3, 4], rb).customers().to_vec())
            .collect();
        assert_eq!(
            joined,
            vec![vec![2, 1, 3, 4], vec![2, 1, 4, 3], vec![1, 2, 3, 4], vec![1, 2, 4, 3]]
        );
    }

    #[test]
    fn test_scw_empty() {
        let inst = line_instance(0, &[10.0; 3], &[100.0; 3], 0.1, 100.0);
        assert!(savings_merge(&inst).is_empty());
    }
}
