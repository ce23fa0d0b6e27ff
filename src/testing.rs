//! Shared instance fixtures for unit tests.

use crate::distance::DistanceMatrix;
use crate::models::Instance;

/// Customers on a line at x = 1, 2, ..., n with the depot at the origin.
pub(crate) fn line_instance(
    n: usize,
    means: &[f64],
    capacities: &[f64],
    cv: f64,
    max_route_length: f64,
) -> Instance {
    let points: Vec<(f64, f64)> = (0..=n).map(|i| (i as f64, 0.0)).collect();
    let dm = DistanceMatrix::from_points(&points);
    Instance::new(dm, vec![means.to_vec(); n], capacities.to_vec(), cv, max_route_length)
        .expect("valid fixture")
}

/// Instance from explicit coordinates with uniform means.
pub(crate) fn point_instance(
    points: &[(f64, f64)],
    mean: f64,
    capacity: f64,
    max_route_length: f64,
) -> Instance {
    let dm = DistanceMatrix::from_points(points);
    let n = points.len() - 1;
    Instance::new(dm, vec![vec![mean; 3]; n], vec![capacity; 3], 0.1, max_route_length)
        .expect("valid fixture")
}
