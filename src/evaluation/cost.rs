//! Expected route cost under stochastic multi-product demand.
//!
//! # Failure model
//!
//! A route fails at customer `i` when the cumulative demand of some product
//! since the last restock exceeds its compartment capacity. Cumulative demand
//! of a segment is approximated as normal with summed means and summed
//! variances, so the probability of surviving a segment is the product over
//! products of `Φ((Q_p - μ_p) / σ_p)`.
//!
//! Let `S_j(m)` be the probability of surviving customers `j+1..=m` after a
//! restock at position `j` (with `S_j(j) = 1`). The probability that a failure
//! is triggered at `i` given the last restock at `j` is
//! `S_j(i-1) - S_j(i)`, and by total probability
//!
//! ```text
//! Pr[0] = 1
//! Pr[i] = Σ_{j<i} Pr[j] · (S_j(i-1) - S_j(i))
//! ```
//!
//! Every failure costs a round trip from the failing customer to the depot.
//!
//! # Complexity
//!
//! O(k² · P) per route of k customers and P products, accumulating segment
//! sums incrementally for each restock position.

use crate::evaluation::normal::standard_normal_cdf;
use crate::models::{Instance, Route, RouteSet, DEPOT};

/// Dense table of conditional failure probabilities for one customer
/// sequence, indexed by (restock position, target position).
///
/// Positions are 1-based along the route's customers; position 0 is the
/// depot at the start of the route.
///
/// # Examples
///
/// ```
/// use u_routing_sd::distance::DistanceMatrix;
/// use u_routing_sd::evaluation::{standard_normal_cdf, FailureTable};
/// use u_routing_sd::models::Instance;
///
/// let dm = DistanceMatrix::from_points(&[(0.0, 0.0), (1.0, 0.0)]);
/// let inst = Instance::new(dm, vec![vec![10.0, 20.0]], vec![12.0, 25.0], 0.1, 100.0).unwrap();
///
/// let table = FailureTable::build(&inst, &[1]);
/// let survive = standard_normal_cdf(2.0 / 1.0) * standard_normal_cdf(5.0 / 2.0);
/// assert!((table.conditional(0, 1) - (1.0 - survive)).abs() < 1e-12);
/// ```
#[derive(Debug, Clone)]
pub struct FailureTable {
    size: usize,
    conditional: Vec<f64>,
}

impl FailureTable {
    /// Builds the table for customers served in the given order.
    pub fn build(instance: &Instance, customers: &[usize]) -> Self {
        let k = customers.len();
        let size = k + 1;
        let num_products = instance.num_products();
        let mut conditional = vec![0.0; size * size];

        let mut mean = vec![0.0; num_products];
        let mut variance = vec![0.0; num_products];

        for restock in 0..k {
            mean.fill(0.0);
            variance.fill(0.0);
            // Nothing has been served since the restock, so survival is certain.
            let mut survived = 1.0;

            for target in (restock + 1)..=k {
                let customer = customers[target - 1];
                let mut survives_target = 1.0;
                for p in 0..num_products {
                    let std = instance.demand_std(customer, p);
                    mean[p] += instance.demand_mean(customer, p);
                    variance[p] += std * std;
                    survives_target *=
                        standard_normal_cdf((instance.capacity(p) - mean[p]) / variance[p].sqrt());
                }
                conditional[restock * size + target] = survived - survives_target;
                survived = survives_target;
            }
        }

        Self { size, conditional }
    }

    /// Number of customers covered by the table.
    pub fn len(&self) -> usize {
        self.size - 1
    }

    /// Returns true if the table covers no customer.
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Probability that a failure is triggered at `target` given the last
    /// restock happened at `restock` (`restock < target`).
    pub fn conditional(&self, restock: usize, target: usize) -> f64 {
        self.conditional[restock * self.size + target]
    }

    /// Unconditional failure probabilities `Pr[1..=k]`.
    pub fn failure_probabilities(&self) -> Vec<f64> {
        let k = self.len();
        let mut pr = vec![0.0; k + 1];
        pr[0] = 1.0;
        for target in 1..=k {
            pr[target] = (0..target)
                .map(|restock| pr[restock] * self.conditional(restock, target))
                .sum();
        }
        pr.remove(0);
        pr
    }
}

/// Computes planned and expected lengths of routes for one instance.
///
/// All algorithms evaluate routes exclusively through this type.
///
/// # Examples
///
/// ```
/// use u_routing_sd::distance::DistanceMatrix;
/// use u_routing_sd::evaluation::CostModel;
/// use u_routing_sd::models::{Instance, Route};
///
/// let dm = DistanceMatrix::from_points(&[(0.0, 0.0), (1.0, 0.0), (2.0, 0.0)]);
/// let means = vec![vec![10.0; 3], vec![10.0; 3]];
/// let inst = Instance::new(dm, means, vec![100.0; 3], 0.1, 50.0).unwrap();
/// let cost = CostModel::new(&inst);
///
/// let route = Route::from_customers(&[1, 2]);
/// assert!((cost.planned_length(&route) - 4.0).abs() < 1e-10);
/// assert!(cost.total_expected_length(&route) >= cost.planned_length(&route));
/// assert!(cost.is_feasible(&route));
/// ```
#[derive(Debug, Clone, Copy)]
pub struct CostModel<'a> {
    instance: &'a Instance,
}

impl<'a> CostModel<'a> {
    /// Creates a cost model over the given instance.
    pub fn new(instance: &'a Instance) -> Self {
        Self { instance }
    }

    /// The instance being evaluated.
    pub fn instance(&self) -> &'a Instance {
        self.instance
    }

    /// Sum of consecutive distances along an arbitrary node sequence.
    pub fn path_length(&self, nodes: &[usize]) -> f64 {
        nodes
            .windows(2)
            .map(|w| self.instance.distance(w[0], w[1]))
            .sum()
    }

    /// Deterministic travel distance of a route.
    pub fn planned_length(&self, route: &Route) -> f64 {
        self.path_length(route.nodes())
    }

    /// Conditional failure table for a route.
    pub fn failure_table(&self, route: &Route) -> FailureTable {
        FailureTable::build(self.instance, route.customers())
    }

    /// Probability of a restocking trip triggered at each customer, in visit
    /// order.
    pub fn failure_probabilities(&self, route: &Route) -> Vec<f64> {
        self.failure_table(route).failure_probabilities()
    }

    /// Expected extra distance from restocking round trips.
    pub fn recourse_length(&self, route: &Route) -> f64 {
        self.recourse_of(route.customers(), &self.failure_probabilities(route))
    }

    /// Planned length plus expected recourse length.
    pub fn total_expected_length(&self, route: &Route) -> f64 {
        self.planned_length(route) + self.recourse_length(route)
    }

    /// Returns `true` if the route's expected length is within the bound `L`.
    pub fn is_feasible(&self, route: &Route) -> bool {
        self.total_expected_length(route) <= self.instance.max_route_length()
    }

    /// Total planned length of a route set.
    pub fn route_set_planned_length(&self, routes: &RouteSet) -> f64 {
        routes.routes().iter().map(|r| self.planned_length(r)).sum()
    }

    /// Total expected length of a route set.
    pub fn route_set_expected_length(&self, routes: &RouteSet) -> f64 {
        routes
            .routes()
            .iter()
            .map(|r| self.total_expected_length(r))
            .sum()
    }

    /// Expected lengths of the routes serving every prefix of `customers`.
    ///
    /// Element `t - 1` equals `total_expected_length` of the route serving
    /// `customers[..t]`. Failure probabilities of a position only depend on
    /// the customers before it, so one table serves all prefixes.
    pub fn prefix_expected_lengths(&self, customers: &[usize]) -> Vec<f64> {
        let pr = FailureTable::build(self.instance, customers).failure_probabilities();
        let mut lengths = Vec::with_capacity(customers.len());
        let mut path = 0.0;
        let mut recourse = 0.0;
        let mut prev = DEPOT;
        for (&c, &p) in customers.iter().zip(&pr) {
            path += self.instance.distance(prev, c);
            recourse += 2.0 * self.instance.distance(c, DEPOT) * p;
            lengths.push(path + self.instance.distance(c, DEPOT) + recourse);
            prev = c;
        }
        lengths
    }

    fn recourse_of(&self, customers: &[usize], pr: &[f64]) -> f64 {
        customers
            .iter()
            .zip(pr)
            .map(|(&c, &p)| 2.0 * self.instance.distance(c, DEPOT) * p)
            .sum()
    }
}
