//! Route set type.

use serde::{Deserialize, Serialize};

use super::{GiantTour, Route};
use crate::error::{RoutingError, RoutingResult};

/// A set of routes that together serve every customer exactly once.
///
/// # Examples
///
/// ```
/// use u_routing_sd::models::{Route, RouteSet};
///
/// let set = RouteSet::from_routes(vec![Route::from_customers(&[2, 1]), Route::round_trip(3)]);
/// assert_eq!(set.num_routes(), 2);
/// assert_eq!(set.num_served(), 3);
/// assert_eq!(set.flatten().customers(), &[2, 1, 3]);
/// assert!(set.check_partition(3).is_ok());
/// ```
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct RouteSet {
    routes: Vec<Route>,
}

impl RouteSet {
    /// Creates an empty route set.
    pub fn new() -> Self {
        Self { routes: Vec::new() }
    }

    /// Wraps the given routes.
    pub fn from_routes(routes: Vec<Route>) -> Self {
        Self { routes }
    }

    /// One round trip `[0, c, 0]` per customer `1..=num_customers`.
    pub fn round_trips(num_customers: usize) -> Self {
        Self {
            routes: (1..=num_customers).map(Route::round_trip).collect(),
        }
    }

    /// Adds a route to this set.
    pub fn add_route(&mut self, route: Route) {
        self.routes.push(route);
    }

    /// Returns the routes in this set.
    pub fn routes(&self) -> &[Route] {
        &self.routes
    }

    /// Consumes the set, returning its routes.
    pub fn into_routes(self) -> Vec<Route> {
        self.routes
    }

    /// Returns the number of routes (vehicles used).
    pub fn num_routes(&self) -> usize {
        self.routes.len()
    }

    /// Returns `true` if the set holds no route.
    pub fn is_empty(&self) -> bool {
        self.routes.is_empty()
    }

    /// Total number of customers served across all routes.
    pub fn num_served(&self) -> usize {
        self.routes.iter().map(Route::len).sum()
    }

    /// Concatenates the routes' customers into one giant tour.
    pub fn flatten(&self) -> GiantTour {
        GiantTour::new(
            self.routes
                .iter()
                .flat_map(|r| r.customers().iter().copied())
                .collect(),
        )
    }

    /// Checks that the routes serve each customer `1..=num_customers`
    /// exactly once.
    pub fn check_partition(&self, num_customers: usize) -> RoutingResult<()> {
        if let Some(idx) = self.routes.iter().position(Route::is_empty) {
            return Err(RoutingError::degenerate_tour(format!("route {idx} serves no customer")));
        }
        self.flatten().check_complete(num_customers)
    }
}

impl FromIterator<Route> for RouteSet {
    fn from_iter<I: IntoIterator<Item = Route>>(iter: I) -> Self {
        Self::from_routes(iter.into_iter().collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty() {
        let set = RouteSet::new();
        assert!(set.is_empty());
        assert_eq!(set.num_served(), 0);
        assert!(set.check_partition(0).is_ok());
        assert_eq!(RouteSet::default(), set);
    }

    #[test]
    fn test_round_trips() {
        let set = RouteSet::round_trips(3);
        assert_eq!(set.num_routes(), 3);
        assert_eq!(set.routes()[2].nodes(), &[0, 3, 0]);
        assert!(set.check_partition(3).is_ok());
    }

    #[test]
    fn test_partition_violations() {
        let dup: RouteSet = vec![Route::from_customers(&[1, 2]), Route::round_trip(2)]
            .into_iter()
            .collect();
        assert!(dup.check_partition(2).is_err());

        let missing = RouteSet::from_routes(vec![Route::round_trip(1)]);
        assert!(missing.check_partition(2).is_err());

        let mut with_empty = RouteSet::round_trips(2);
        with_empty.add_route(Route::from_customers(&[]));
        assert!(with_empty.check_partition(2).is_err());
    }
}
