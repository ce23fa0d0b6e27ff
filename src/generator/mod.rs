//! Seeded random instance generation.
//!
//! Locations are drawn uniformly in a square, index 0 being the depot.
//! Per-product demand means come from a [`DemandDistribution`]. Capacities
//! are the total mean demand of each product divided by a tightness ratio,
//! so that about `tightness` routes are needed. The route bound `L` is a
//! random multiple of the largest customer-to-customer distance.
//!
//! All randomness flows through one explicitly seeded generator; the same
//! [`GeneratorConfig`] always yields the same instance.

use log::debug;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use serde::{Deserialize, Serialize};

use crate::distance::DistanceMatrix;
use crate::error::{RoutingError, RoutingResult};
use crate::models::Instance;

/// How per-product demand means are drawn.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum DemandDistribution {
    /// Uniform on `[10, 30]`.
    #[default]
    Uniform,
    /// 10 or 30 with equal probability.
    TwoPoint,
}

impl DemandDistribution {
    const LOW: f64 = 10.0;
    const HIGH: f64 = 30.0;

    fn sample<R: Rng>(self, rng: &mut R) -> f64 {
        match self {
            Self::Uniform => rng.random_range(Self::LOW..=Self::HIGH),
            Self::TwoPoint => {
                if rng.random_bool(0.5) {
                    Self::HIGH
                } else {
                    Self::LOW
                }
            }
        }
    }
}

/// Parameters for [`generate`].
///
/// # Examples
///
/// ```
/// use u_routing_sd::generator::{generate, DemandDistribution, GeneratorConfig};
///
/// let config = GeneratorConfig::new(20)
///     .with_cv(0.2)
///     .with_distribution(DemandDistribution::TwoPoint)
///     .with_seed(7);
/// let inst = generate(&config).unwrap();
/// assert_eq!(inst.num_customers(), 20);
/// assert_eq!(inst.num_products(), 3);
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GeneratorConfig {
    /// Number of customers.
    pub customers: usize,
    /// Number of products (compartments).
    pub products: usize,
    /// Coefficient of variation of every demand.
    pub cv: f64,
    /// Distribution of demand means.
    pub distribution: DemandDistribution,
    /// Side length of the square holding all locations.
    pub side: f64,
    /// Total mean demand per product divided by capacity.
    pub tightness: f64,
    /// Lower end of the route bound factor.
    pub bound_factor_min: f64,
    /// Upper end of the route bound factor.
    pub bound_factor_max: f64,
    /// Random seed.
    pub seed: u64,
}

impl Default for GeneratorConfig {
    fn default() -> Self {
        Self {
            customers: 50,
            products: 3,
            cv: 0.1,
            distribution: DemandDistribution::Uniform,
            side: 100.0,
            tightness: 10.0,
            bound_factor_min: 3.0,
            bound_factor_max: 4.0,
            seed: 0,
        }
    }
}

impl GeneratorConfig {
    /// Creates a configuration with `customers` customers and defaults
    /// elsewhere.
    pub fn new(customers: usize) -> Self {
        Self {
            customers,
            ..Self::default()
        }
    }

    /// Sets the number of products.
    pub fn with_products(mut self, products: usize) -> Self {
        self.products = products;
        self
    }

    /// Sets the coefficient of variation.
    pub fn with_cv(mut self, cv: f64) -> Self {
        self.cv = cv;
        self
    }

    /// Sets the demand mean distribution.
    pub fn with_distribution(mut self, distribution: DemandDistribution) -> Self {
        self.distribution = distribution;
        self
    }

    /// Sets the side length of the location square.
    pub fn with_side(mut self, side: f64) -> Self {
        self.side = side;
        self
    }

    /// Sets the tightness ratio.
    pub fn with_tightness(mut self, tightness: f64) -> Self {
        self.tightness = tightness;
        self
    }

    /// Sets the range of the route bound factor.
    pub fn with_bound_factor(mut self, min: f64, max: f64) -> Self {
        self.bound_factor_min = min;
        self.bound_factor_max = max;
        self
    }

    /// Sets the random seed.
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = seed;
        self
    }

    fn validate(&self) -> RoutingResult<()> {
        if self.customers < 2 {
            return Err(RoutingError::invalid_instance("at least two customers are required"));
        }
        if !(self.side.is_finite() && self.side > 0.0) {
            return Err(RoutingError::invalid_instance("side length must be positive"));
        }
        if !(self.tightness.is_finite() && self.tightness > 0.0) {
            return Err(RoutingError::invalid_instance("tightness ratio must be positive"));
        }
        let (lo, hi) = (self.bound_factor_min, self.bound_factor_max);
        if !(lo.is_finite() && hi.is_finite() && lo > 0.0 && lo <= hi) {
            return Err(RoutingError::invalid_instance(format!(
                "invalid route bound factor range {lo}..={hi}"
            )));
        }
        Ok(())
    }
}

/// Generates a validated random instance.
///
/// # Errors
///
/// [`RoutingError::InvalidInstance`] if the configuration cannot produce a
/// valid instance (fewer than two customers, no products, non-positive `cv`,
/// side, tightness or bound factors).
pub fn generate(config: &GeneratorConfig) -> RoutingResult<Instance> {
    config.validate()?;
    let mut rng = StdRng::seed_from_u64(config.seed);

    let points: Vec<(f64, f64)> = (0..=config.customers)
        .map(|_| {
            (
                rng.random_range(0.0..=config.side),
                rng.random_range(0.0..=config.side),
            )
        })
        .collect();
    let mut distances = DistanceMatrix::from_points(&points);
    for i in 0..distances.size() {
        for j in 0..distances.size() {
            distances.set(i, j, round2(distances.get(i, j)));
        }
    }

    let factor = rng.random_range(config.bound_factor_min..=config.bound_factor_max);
    let max_route_length = round2(factor * distances.max_customer_distance());

    let demand_means: Vec<Vec<f64>> = (0..config.customers)
        .map(|_| {
            (0..config.products)
                .map(|_| config.distribution.sample(&mut rng))
                .collect()
        })
        .collect();

    let capacities: Vec<f64> = (0..config.products)
        .map(|p| demand_means.iter().map(|m| m[p]).sum::<f64>() / config.tightness)
        .collect();

    debug!(
        "generated instance with {} customers, seed {}, route bound {:.2}",
        config.customers, config.seed, max_route_length
    );

    Instance::new(distances, demand_means, capacities, config.cv, max_route_length)
}

fn round2(x: f64) -> f64 {
    (x * 100.0).round() / 100.0
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = GeneratorConfig::default();
        assert_eq!(config.customers, 50);
        assert_eq!(config.products, 3);
        assert!((config.cv - 0.1).abs() < 1e-12);
        assert_eq!(config.distribution, DemandDistribution::Uniform);
    }

    #[test]
    fn test_generate_is_deterministic() {
        let config = GeneratorConfig::new(15).with_seed(42);
        let a = generate(&config).expect("valid config");
        let b = generate(&config).expect("valid config");
        assert_eq!(a.distances(), b.distances());
        assert_eq!(a.max_route_length(), b.max_route_length());
        for c in a.customers() {
            for p in 0..a.num_products() {
                assert_eq!(a.demand_mean(c, p), b.demand_mean(c, p));
            }
        }
    }

    #[test]
    fn test_seeds_differ() {
        let a = generate(&GeneratorConfig::new(15).with_seed(1)).expect("valid config");
        let b = generate(&GeneratorConfig::new(15).with_seed(2)).expect("valid config");
        assert_ne!(a.distances(), b.distances());
    }

    #[test]
    fn test_generated_structure() {
        let config = GeneratorConfig::new(30).with_products(4).with_tightness(5.0).with_seed(9);
        let inst = generate(&config).expect("valid config");
        assert_eq!(inst.num_customers(), 30);
        assert_eq!(inst.num_products(), 4);

        for p in 0..4 {
            let total: f64 = inst.customers().map(|c| inst.demand_mean(c, p)).sum();
            assert!((inst.capacity(p) - total / 5.0).abs() < 1e-9);
        }

        let max_d = inst.distances().max_customer_distance();
        assert!(inst.max_route_length() >= 3.0 * max_d - 0.01);
        assert!(inst.max_route_length() <= 4.0 * max_d + 0.01);

        for i in 0..=30 {
            for j in 0..=30 {
                let d = inst.distance(i, j);
                assert!((d * 100.0 - (d * 100.0).round()).abs() < 1e-6);
            }
        }
    }

    #[test]
    fn test_uniform_means_in_range() {
        let inst = generate(&GeneratorConfig::new(40).with_seed(3)).expect("valid config");
        for c in inst.customers() {
            for p in 0..3 {
                let m = inst.demand_mean(c, p);
                assert!((10.0..=30.0).contains(&m));
            }
        }
    }

    #[test]
    fn test_two_point_means() {
        let config = GeneratorConfig::new(40)
            .with_distribution(DemandDistribution::TwoPoint)
            .with_seed(3);
        let inst = generate(&config).expect("valid config");
        for c in inst.customers() {
            for p in 0..3 {
                let m = inst.demand_mean(c, p);
                assert!(m == 10.0 || m == 30.0);
            }
        }
    }

    #[test]
    fn test_invalid_configs() {
        let bad = [
            GeneratorConfig::new(1),
            GeneratorConfig::new(10).with_products(0),
            GeneratorConfig::new(10).with_cv(0.0),
            GeneratorConfig::new(10).with_side(-1.0),
            GeneratorConfig::new(10).with_tightness(0.0),
            GeneratorConfig::new(10).with_bound_factor(4.0, 3.0),
        ];
        for config in &bad {
            assert!(
                matches!(generate(config), Err(RoutingError::InvalidInstance { .. })),
                "{config:?} should be rejected"
            );
        }
    }

    #[test]
    fn test_config_serde_round_trip() {
        let config = GeneratorConfig::new(25)
            .with_distribution(DemandDistribution::TwoPoint)
            .with_seed(11);
        let json = serde_json::to_string(&config).expect("serialize");
        let back: GeneratorConfig = serde_json::from_str(&json).expect("deserialize");
        assert_eq!(config, back);
    }

    #[test]
    fn test_round2() {
        assert_eq!(round2(1.234), 1.23);
        assert_eq!(round2(1.235_1), 1.24);
        assert_eq!(round2(0.0), 0.0);
    }
}
