//! Nearest-neighbor giant tour.
//!
//! Builds one tour greedily: starting from the depot, always visit the nearest
//! unvisited customer. Capacity and expected cost are ignored here; the tour
//! is partitioned into routes afterwards by [`split`](crate::split::split).
//!
//! # Complexity
//!
//! O(n²) where n = number of customers.

use crate::models::{GiantTour, Instance, DEPOT};

/// Constructs a giant tour using the nearest-neighbor heuristic.
///
/// Ties go to the customer with the lowest index.
///
/// # Examples
///
/// ```
/// use u_routing_sd::distance::DistanceMatrix;
/// use u_routing_sd::models::Instance;
/// use u_routing_sd::constructive::nearest_neighbor_tour;
///
/// let dm = DistanceMatrix::from_points(&[(0.0, 0.0), (10.0, 0.0), (1.0, 0.0), (2.0, 0.0)]);
/// let inst = Instance::new(dm, vec![vec![10.0; 3]; 3], vec![50.0; 3], 0.1, 100.0).unwrap();
///
/// let tour = nearest_neighbor_tour(&inst);
/// assert_eq!(tour.customers(), &[2, 3, 1]);
/// ```
pub fn nearest_neighbor_tour(instance: &Instance) -> GiantTour {
    let distances = instance.distances();
    let mut remaining: Vec<usize> = instance.customers().collect();
    let mut tour = Vec::with_capacity(remaining.len());
    let mut current = DEPOT;

    while let Some(next) = distances.nearest_neighbor(current, &remaining) {
        remaining.retain(|&c| c != next);
        tour.push(next);
        current = next;
    }

    GiantTour::new(tour)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::{line_instance, point_instance};

    #[test]
    fn test_nn_line() {
        let inst = line_instance(4, &[10.0; 3], &[100.0; 3], 0.1, 100.0);
        assert_eq!(nearest_neighbor_tour(&inst).customers(), &[1, 2, 3, 4]);
    }

    #[test]
    fn test_nn_visits_every_customer_once() {
        let inst = point_instance(
            &[(50.0, 50.0), (10.0, 10.0), (90.0, 15.0), (20.0, 80.0), (70.0, 85.0), (45.0, 5.0)],
            10.0,
            30.0,
            500.0,
        );
        let tour = nearest_neighbor_tour(&inst);
        assert!(tour.check_complete(5).is_ok());
    }

    #[test]
    fn test_nn_tie_breaks_to_first() {
        // Customers 1 and 2 are equidistant from the depot.
        let inst = point_instance(&[(0.0, 0.0), (0.0, 3.0), (3.0, 0.0), (0.0, 6.0)], 10.0, 30.0, 100.0);
        assert_eq!(nearest_neighbor_tour(&inst).customers(), &[1, 3, 2]);
    }

    #[test]
    fn test_nn_empty() {
        let inst = line_instance(0, &[10.0; 3], &[100.0; 3], 0.1, 100.0);
        assert!(nearest_neighbor_tour(&inst).is_empty());
    }
}
