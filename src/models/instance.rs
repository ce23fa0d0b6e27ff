//! Problem instance.

use serde::Serialize;

use crate::distance::DistanceMatrix;
use crate::error::{RoutingError, RoutingResult};

const SYMMETRY_TOLERANCE: f64 = 1e-9;

/// An immutable MC-VRPSD instance.
///
/// Node 0 is the depot and nodes `1..=n` are customers. Every vehicle carries
/// one compartment per product with the same capacities on every route.
/// Demand of customer `c` for product `p` is random with mean
/// `demand_mean(c, p)` and standard deviation `cv * demand_mean(c, p)`.
///
/// # Examples
///
/// ```
/// use u_routing_sd::distance::DistanceMatrix;
/// use u_routing_sd::models::Instance;
///
/// let dm = DistanceMatrix::from_points(&[(0.0, 0.0), (3.0, 4.0), (0.0, 8.0)]);
/// let means = vec![vec![10.0, 20.0], vec![15.0, 5.0]];
/// let instance = Instance::new(dm, means, vec![40.0, 40.0], 0.1, 100.0).unwrap();
///
/// assert_eq!(instance.num_customers(), 2);
/// assert_eq!(instance.num_products(), 2);
/// assert!((instance.demand_std(1, 1) - 2.0).abs() < 1e-12);
/// ```
#[derive(Debug, Clone, Serialize)]
pub struct Instance {
    distances: DistanceMatrix,
    demand_means: Vec<Vec<f64>>,
    capacities: Vec<f64>,
    cv: f64,
    max_route_length: f64,
}

impl Instance {
    /// Creates a validated instance.
    ///
    /// `demand_means[c - 1][p]` is the mean demand of customer `c` for
    /// product `p`; `distances` must cover the depot plus every customer.
    ///
    /// # Errors
    ///
    /// Returns [`RoutingError::InvalidInstance`] for a non-square,
    /// non-symmetric, negative or non-finite distance matrix, a non-zero
    /// diagonal, a non-positive capacity, mean, `cv` or route bound, or
    /// mismatched dimensions.
    pub fn new(
        distances: DistanceMatrix,
        demand_means: Vec<Vec<f64>>,
        capacities: Vec<f64>,
        cv: f64,
        max_route_length: f64,
    ) -> RoutingResult<Self> {
        let n = demand_means.len();
        if distances.size() != n + 1 {
            return Err(RoutingError::invalid_instance(format!(
                "distance matrix has {} locations, expected {}",
                distances.size(),
                n + 1
            )));
        }
        if capacities.is_empty() {
            return Err(RoutingError::invalid_instance("at least one product is required"));
        }
        if let Some(p) = capacities.iter().position(|&q| !(q.is_finite() && q > 0.0)) {
            return Err(RoutingError::invalid_instance(format!(
                "capacity of product {p} must be positive"
            )));
        }
        if !(cv.is_finite() && cv > 0.0) {
            return Err(RoutingError::invalid_instance("cv must be positive"));
        }
        if !(max_route_length.is_finite() && max_route_length > 0.0) {
            return Err(RoutingError::invalid_instance("route length bound must be positive"));
        }

        for (idx, means) in demand_means.iter().enumerate() {
            if means.len() != capacities.len() {
                return Err(RoutingError::invalid_instance(format!(
                    "customer {} has {} demand means, expected {}",
                    idx + 1,
                    means.len(),
                    capacities.len()
                )));
            }
            if let Some(p) = means.iter().position(|&m| !(m.is_finite() && m > 0.0)) {
                return Err(RoutingError::invalid_instance(format!(
                    "mean demand of customer {} for product {p} must be positive",
                    idx + 1
                )));
            }
        }

        for i in 0..distances.size() {
            if distances.get(i, i) != 0.0 {
                return Err(RoutingError::invalid_instance(format!(
                    "distance from {i} to itself must be zero"
                )));
            }
            for j in 0..distances.size() {
                let d = distances.get(i, j);
                if !(d.is_finite() && d >= 0.0) {
                    return Err(RoutingError::invalid_instance(format!(
                        "distance from {i} to {j} must be finite and non-negative"
                    )));
                }
            }
        }
        if !distances.is_symmetric(SYMMETRY_TOLERANCE) {
            return Err(RoutingError::invalid_instance("distance matrix must be symmetric"));
        }

        Ok(Self {
            distances,
            demand_means,
            capacities,
            cv,
            max_route_length,
        })
    }

    /// Number of customers (excluding depot).
    pub fn num_customers(&self) -> usize {
        self.demand_means.len()
    }

    /// Number of products (compartments per vehicle).
    pub fn num_products(&self) -> usize {
        self.capacities.len()
    }

    /// Customer indices `1..=n`.
    pub fn customers(&self) -> impl Iterator<Item = usize> {
        1..=self.num_customers()
    }

    /// Distance matrix over depot and customers.
    pub fn distances(&self) -> &DistanceMatrix {
        &self.distances
    }

    /// Travel distance between two nodes.
    pub fn distance(&self, from: usize, to: usize) -> f64 {
        self.distances.get(from, to)
    }

    /// Mean demand of `customer` (1-based) for `product`.
    pub fn demand_mean(&self, customer: usize, product: usize) -> f64 {
        self.demand_means[customer - 1][product]
    }

    /// Demand standard deviation of `customer` for `product`.
    pub fn demand_std(&self, customer: usize, product: usize) -> f64 {
        self.cv * self.demand_mean(customer, product)
    }

    /// Compartment capacity for `product`.
    pub fn capacity(&self, product: usize) -> f64 {
        self.capacities[product]
    }

    /// All compartment capacities.
    pub fn capacities(&self) -> &[f64] {
        &self.capacities
    }

    /// Coefficient of variation shared by every demand.
    pub fn cv(&self) -> f64 {
        self.cv
    }

    /// Maximum expected length of a single route (`L`).
    pub fn max_route_length(&self) -> f64 {
        self.max_route_length
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn line_distances() -> DistanceMatrix {
        DistanceMatrix::from_points(&[(0.0, 0.0), (1.0, 0.0), (2.0, 0.0)])
    }

    fn means() -> Vec<Vec<f64>> {
        vec![vec![10.0, 20.0, 30.0], vec![30.0, 20.0, 10.0]]
    }

    #[test]
    fn test_valid_instance() {
        let inst = Instance::new(line_distances(), means(), vec![50.0; 3], 0.1, 10.0)
            .expect("valid");
        assert_eq!(inst.num_customers(), 2);
        assert_eq!(inst.num_products(), 3);
        assert_eq!(inst.customers().collect::<Vec<_>>(), vec![1, 2]);
        assert_eq!(inst.demand_mean(2, 0), 30.0);
        assert!((inst.demand_std(2, 0) - 3.0).abs() < 1e-12);
        assert_eq!(inst.distance(0, 2), 2.0);
        assert_eq!(inst.max_route_length(), 10.0);
    }

    #[test]
    fn test_rejects_non_positive_parameters() {
        let bad_cv = Instance::new(line_distances(), means(), vec![50.0; 3], 0.0, 10.0);
        assert!(matches!(bad_cv, Err(RoutingError::InvalidInstance { .. })));

        let bad_cap = Instance::new(line_distances(), means(), vec![50.0, 0.0, 50.0], 0.1, 10.0);
        assert!(matches!(bad_cap, Err(RoutingError::InvalidInstance { .. })));

        let mut zero_mean = means();
        zero_mean[1][2] = 0.0;
        let bad_mean = Instance::new(line_distances(), zero_mean, vec![50.0; 3], 0.1, 10.0);
        assert!(matches!(bad_mean, Err(RoutingError::InvalidInstance { .. })));

        let bad_bound = Instance::new(line_distances(), means(), vec![50.0; 3], 0.1, -1.0);
        assert!(bad_bound.is_err());
    }

    #[test]
    fn test_rejects_bad_distances() {
        let asym = DistanceMatrix::from_rows(&[
            vec![0.0, 1.0, 2.0],
            vec![1.5, 0.0, 1.0],
            vec![2.0, 1.0, 0.0],
        ])
        .expect("square");
        assert!(Instance::new(asym, means(), vec![50.0; 3], 0.1, 10.0).is_err());

        let negative = DistanceMatrix::from_rows(&[
            vec![0.0, -1.0, 2.0],
            vec![-1.0, 0.0, 1.0],
            vec![2.0, 1.0, 0.0],
        ])
        .expect("square");
        assert!(Instance::new(negative, means(), vec![50.0; 3], 0.1, 10.0).is_err());

        let diagonal = DistanceMatrix::from_rows(&[
            vec![1.0, 1.0, 2.0],
            vec![1.0, 0.0, 1.0],
            vec![2.0, 1.0, 0.0],
        ])
        .expect("square");
        assert!(Instance::new(diagonal, means(), vec![50.0; 3], 0.1, 10.0).is_err());
    }

    #[test]
    fn test_rejects_dimension_mismatch() {
        let dm = DistanceMatrix::from_points(&[(0.0, 0.0), (1.0, 0.0)]);
        assert!(Instance::new(dm, means(), vec![50.0; 3], 0.1, 10.0).is_err());

        let short = vec![vec![10.0, 20.0], vec![30.0, 20.0]];
        assert!(Instance::new(line_distances(), short, vec![50.0; 3], 0.1, 10.0).is_err());
    }
}
