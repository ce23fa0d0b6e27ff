//! Split procedure for partitioning a giant tour into feasible routes under
//! stochastic demand.
//!
//! # Algorithm
//!
//! Given a giant tour (sequence of customers), finds the partition into
//! consecutive sub-routes that minimizes the total expected length, such that
//! every sub-route's expected length stays within the bound `L`.
//!
//! Models the problem as a shortest-path problem on an auxiliary graph where
//! node i represents the boundary after customer i, and edge (i, j) represents
//! serving customers i+1..=j in one route, weighted by its expected length.
//!
//! Expected lengths are not monotone in j, so every edge out of i is
//! evaluated. Growth of j stops only once the planned path prefix
//! `depot → ... → customer j` alone exceeds `L`, which bounds every longer
//! sub-route from below.
//!
//! # Complexity
//!
//! O(n³) worst case: one O(n²) failure table per start position.
//!
//! # Reference
//!
//! Prins, C. (2004). "A simple and effective evolutionary algorithm for the
//! vehicle routing problem", *Computers & Operations Research* 31(12), 1985-2002.

use log::trace;

use crate::error::{RoutingError, RoutingResult};
use crate::evaluation::CostModel;
use crate::models::{check_distinct, GiantTour, Instance, Route, RouteSet, DEPOT};

/// Result of the split procedure.
#[derive(Debug, Clone)]
pub struct SplitResult {
    /// Feasible routes in tour order.
    pub routes: RouteSet,
    /// Total expected length of all routes.
    pub total_expected_length: f64,
}

/// Splits customer sequences into optimal feasible routes.
///
/// # Examples
///
/// ```
/// use u_routing_sd::distance::DistanceMatrix;
/// use u_routing_sd::models::Instance;
/// use u_routing_sd::split::RouteSplitter;
///
/// let dm = DistanceMatrix::from_points(&[(0.0, 0.0), (1.0, 0.0), (2.0, 0.0), (3.0, 0.0)]);
/// let inst = Instance::new(dm, vec![vec![10.0; 3]; 3], vec![1000.0; 3], 0.1, 100.0).unwrap();
///
/// let result = RouteSplitter::new(&inst).split(&[1, 2, 3]).unwrap();
/// assert_eq!(result.routes.num_routes(), 1);
/// assert!((result.total_expected_length - 6.0).abs() < 1e-10);
/// ```
#[derive(Debug, Clone, Copy)]
pub struct RouteSplitter<'a> {
    cost: CostModel<'a>,
}

impl<'a> RouteSplitter<'a> {
    /// Creates a splitter for the given instance.
    pub fn new(instance: &'a Instance) -> Self {
        Self {
            cost: CostModel::new(instance),
        }
    }

    /// Splits `tour` (distinct customers, depot excluded) into routes.
    ///
    /// # Errors
    ///
    /// [`RoutingError::DegenerateTour`] if the tour repeats a customer or
    /// names a non-customer; [`RoutingError::InfeasibleSplit`] if some
    /// position cannot be reached by any feasible sub-route.
    pub fn split(&self, tour: &[usize]) -> RoutingResult<SplitResult> {
        let instance = self.cost.instance();
        check_distinct(tour, instance.num_customers())?;

        let n = tour.len();
        let bound = instance.max_route_length();

        // cost[j] = minimum expected length to serve tour[0..j]
        // pred[j] = start of the last route ending at j
        let mut cost = vec![f64::INFINITY; n + 1];
        let mut pred = vec![0usize; n + 1];
        cost[0] = 0.0;

        for i in 0..n {
            if cost[i] == f64::INFINITY {
                continue;
            }

            let mut reach = i;
            let mut path = 0.0;
            let mut prev = DEPOT;
            while reach < n {
                path += instance.distance(prev, tour[reach]);
                if path > bound {
                    break;
                }
                prev = tour[reach];
                reach += 1;
            }

            let lengths = self.cost.prefix_expected_lengths(&tour[i..reach]);
            for (offset, &length) in lengths.iter().enumerate() {
                if length > bound {
                    continue;
                }
                let j = i + offset + 1;
                let new_cost = cost[i] + length;
                if new_cost < cost[j] {
                    cost[j] = new_cost;
                    pred[j] = i;
                }
            }
        }

        if cost[n] == f64::INFINITY {
            let position = (1..=n)
                .find(|&j| cost[j] == f64::INFINITY)
                .unwrap_or(n);
            return Err(RoutingError::InfeasibleSplit {
                position,
                customer: tour[position - 1],
            });
        }

        // Backtrack to find routes
        let mut routes = Vec::new();
        let mut j = n;
        while j > 0 {
            let i = pred[j];
            routes.push(Route::from_customers(&tour[i..j]));
            j = i;
        }
        routes.reverse();

        trace!(
            "split {} customers into {} routes, expected length {:.3}",
            n,
            routes.len(),
            cost[n]
        );

        Ok(SplitResult {
            routes: RouteSet::from_routes(routes),
            total_expected_length: cost[n],
        })
    }
}

/// Splits a giant tour covering every customer into the route set of
/// minimum total expected length.
///
/// # Errors
///
/// [`RoutingError::DegenerateTour`] if the tour omits or duplicates a
/// customer; [`RoutingError::InfeasibleSplit`] if a customer cannot be
/// served within the route bound even alone.
///
/// # Examples
///
/// ```
/// use u_routing_sd::distance::DistanceMatrix;
/// use u_routing_sd::models::{GiantTour, Instance};
/// use u_routing_sd::split::split;
///
/// let dm = DistanceMatrix::from_points(&[(0.0, 0.0), (5.0, 0.0), (0.0, 5.0)]);
/// let inst = Instance::new(dm, vec![vec![10.0; 3]; 2], vec![1000.0; 3], 0.1, 12.0).unwrap();
///
/// // Serving both in one route would take 17.07 > 12.
/// let routes = split(&inst, &GiantTour::new(vec![1, 2])).unwrap();
/// assert_eq!(routes.num_routes(), 2);
/// ```
pub fn split(instance: &Instance, tour: &GiantTour) -> RoutingResult<RouteSet> {
    tour.check_complete(instance.num_customers())?;
    Ok(RouteSplitter::new(instance).split(tour.customers())?.routes)
}
