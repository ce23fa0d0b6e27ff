//! Nearest-insertion giant tour.
//!
//! Starts from the round trip to the customer farthest from the depot and
//! repeatedly inserts the (customer, position) pair that yields the shortest
//! planned tour, until every customer is placed.
//!
//! # Complexity
//!
//! O(n³) where n = number of customers.

use crate::models::{GiantTour, Instance, DEPOT};

/// Constructs a giant tour using the nearest-insertion heuristic.
///
/// Ties go to the lowest customer index, then to the earliest position.
///
/// # Examples
///
/// ```
/// use u_routing_sd::distance::DistanceMatrix;
/// use u_routing_sd::models::Instance;
/// use u_routing_sd::constructive::nearest_insertion_tour;
///
/// let dm = DistanceMatrix::from_points(&[(0.0, 0.0), (1.0, 0.0), (3.0, 0.0), (2.0, 0.0)]);
/// let inst = Instance::new(dm, vec![vec![10.0; 3]; 3], vec![50.0; 3], 0.1, 100.0).unwrap();
///
/// let tour = nearest_insertion_tour(&inst);
/// assert_eq!(tour.len(), 3);
/// // starts from customer 2, the farthest one
/// assert_eq!(tour.customers(), &[1, 3, 2]);
/// ```
pub fn nearest_insertion_tour(instance: &Instance) -> GiantTour {
    let distances = instance.distances();
    let mut remaining: Vec<usize> = instance.customers().collect();

    let Some(first) = distances.farthest(DEPOT, &remaining) else {
        return GiantTour::new(Vec::new());
    };
    remaining.retain(|&c| c != first);
    let mut nodes = vec![DEPOT, first, DEPOT];

    while !remaining.is_empty() {
        // (customer, insert-before index, delta)
        let mut best: Option<(usize, usize, f64)> = None;
        for &c in &remaining {
            for pos in 1..nodes.len() {
                let prev = nodes[pos - 1];
                let next = nodes[pos];
                let delta = distances.get(prev, c) + distances.get(c, next) - distances.get(prev, next);
                if best.map_or(true, |(_, _, d)| delta < d) {
                    best = Some((c, pos, delta));
                }
            }
        }

        let Some((c, pos, _)) = best else { break };
        nodes.insert(pos, c);
        remaining.retain(|&r| r != c);
    }

    GiantTour::new(nodes[1..nodes.len() - 1].to_vec())
}
