//! Giant tour encoding.
//!
//! A giant tour lists customers in one sequence without intermediate depot
//! visits. The [`split`](crate::split) procedure converts it into routes.

use serde::{Deserialize, Serialize};

use super::route::DEPOT;
use crate::error::{RoutingError, RoutingResult};

/// A giant tour: customers in visit order, depot excluded.
///
/// # Examples
///
/// ```
/// use u_routing_sd::models::GiantTour;
///
/// let tour = GiantTour::new(vec![3, 1, 2]);
/// assert_eq!(tour.customers(), &[3, 1, 2]);
/// assert_eq!(tour.nodes(), vec![0, 3, 1, 2, 0]);
/// assert!(tour.check_complete(3).is_ok());
/// assert!(tour.check_complete(4).is_err());
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GiantTour {
    customers: Vec<usize>,
}

impl GiantTour {
    /// Creates a giant tour from a customer sequence.
    pub fn new(customers: Vec<usize>) -> Self {
        Self { customers }
    }

    /// Customers in tour order.
    pub fn customers(&self) -> &[usize] {
        &self.customers
    }

    /// Tour with the depot prepended and appended.
    pub fn nodes(&self) -> Vec<usize> {
        let mut nodes = Vec::with_capacity(self.customers.len() + 2);
        nodes.push(DEPOT);
        nodes.extend_from_slice(&self.customers);
        nodes.push(DEPOT);
        nodes
    }

    /// Number of customers in this tour.
    pub fn len(&self) -> usize {
        self.customers.len()
    }

    /// Returns true if the tour has no customers.
    pub fn is_empty(&self) -> bool {
        self.customers.is_empty()
    }

    /// Checks that every customer `1..=num_customers` appears exactly once.
    pub fn check_complete(&self, num_customers: usize) -> RoutingResult<()> {
        check_distinct(&self.customers, num_customers)?;
        if self.customers.len() != num_customers {
            return Err(RoutingError::degenerate_tour(format!(
                "tour visits {} of {} customers",
                self.customers.len(),
                num_customers
            )));
        }
        Ok(())
    }
}

impl From<Vec<usize>> for GiantTour {
    fn from(customers: Vec<usize>) -> Self {
        Self::new(customers)
    }
}

/// Checks that `customers` holds distinct indices in `1..=num_customers`.
pub(crate) fn check_distinct(customers: &[usize], num_customers: usize) -> RoutingResult<()> {
    let mut seen = vec![false; num_customers + 1];
    for &c in customers {
        if c == DEPOT || c > num_customers {
            return Err(RoutingError::degenerate_tour(format!(
                "{c} is not a customer index"
            )));
        }
        if seen[c] {
            return Err(RoutingError::degenerate_tour(format!(
                "customer {c} appears more than once"
            )));
        }
        seen[c] = true;
    }
    Ok(())
}
