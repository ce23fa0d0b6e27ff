//! Route type.

use serde::{Deserialize, Serialize};

use crate::error::RoutingError;

/// Depot node index.
pub const DEPOT: usize = 0;

/// A depot-to-depot route: `[0, c1, ..., ck, 0]`.
///
/// Routes are values compared by content. Structural changes (merge,
/// reversal, split) always produce new routes.
///
/// # Examples
///
/// ```
/// use u_routing_sd::models::Route;
///
/// let route = Route::from_customers(&[3, 1]);
/// assert_eq!(route.nodes(), &[0, 3, 1, 0]);
/// assert_eq!(route.customers(), &[3, 1]);
/// assert_eq!(route.reversed().customers(), &[1, 3]);
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "RawRoute")]
pub struct Route {
    nodes: Vec<usize>,
}

/// Unchecked serialized form of [`Route`].
#[derive(Deserialize)]
struct RawRoute {
    nodes: Vec<usize>,
}

impl TryFrom<RawRoute> for Route {
    type Error = RoutingError;

    fn try_from(raw: RawRoute) -> Result<Self, Self::Error> {
        let valid = matches!(
            raw.nodes.as_slice(),
            [DEPOT, customers @ .., DEPOT] if !customers.contains(&DEPOT)
        );
        if !valid {
            return Err(RoutingError::degenerate_tour(format!(
                "route {:?} must visit the depot only at both ends",
                raw.nodes
            )));
        }
        Ok(Self { nodes: raw.nodes })
    }
}

impl Route {
    /// Creates a route serving `customers` in order.
    pub fn from_customers(customers: &[usize]) -> Self {
        let mut nodes = Vec::with_capacity(customers.len() + 2);
        nodes.push(DEPOT);
        nodes.extend_from_slice(customers);
        nodes.push(DEPOT);
        Self { nodes }
    }

    /// Creates the round trip `[0, customer, 0]`.
    pub fn round_trip(customer: usize) -> Self {
        Self {
            nodes: vec![DEPOT, customer, DEPOT],
        }
    }

    /// Full node sequence including both depot visits.
    pub fn nodes(&self) -> &[usize] {
        &self.nodes
    }

    /// Customers in visit order (depot endpoints stripped).
    pub fn customers(&self) -> &[usize] {
        &self.nodes[1..self.nodes.len() - 1]
    }

    /// Number of customers served.
    pub fn len(&self) -> usize {
        self.nodes.len() - 2
    }

    /// Returns `true` if the route serves no customer.
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// The same customers served in the opposite direction.
    pub fn reversed(&self) -> Self {
        let mut nodes = self.nodes.clone();
        nodes.reverse();
        Self { nodes }
    }
}
