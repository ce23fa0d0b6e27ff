//! Error types.

use std::fmt;

/// Errors reported by instance validation and the routing algorithms.
///
/// All failures are deterministic functions of the input data.
#[derive(Debug, Clone, PartialEq)]
pub enum RoutingError {
    /// Instance data that would make the cost model undefined.
    InvalidInstance {
        /// What is wrong with the instance.
        reason: String,
    },
    /// No feasible partition of a giant tour exists.
    ///
    /// `position` is the first tour position (1-based) that cannot be reached
    /// by any feasible sub-route, `customer` is the customer at that position.
    InfeasibleSplit {
        /// Unreachable tour position.
        position: usize,
        /// Customer at that position.
        customer: usize,
    },
    /// A giant tour that omits, duplicates or misnames customers.
    DegenerateTour {
        /// What is wrong with the tour.
        reason: String,
    },
}

/// A type alias for results with [`RoutingError`].
pub type RoutingResult<T> = Result<T, RoutingError>;

impl RoutingError {
    pub(crate) fn invalid_instance(reason: impl Into<String>) -> Self {
        Self::InvalidInstance {
            reason: reason.into(),
        }
    }

    pub(crate) fn degenerate_tour(reason: impl Into<String>) -> Self {
        Self::DegenerateTour {
            reason: reason.into(),
        }
    }
}

impl fmt::Display for RoutingError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::InvalidInstance { reason } => write!(f, "invalid instance: {reason}"),
            Self::InfeasibleSplit { position, customer } => write!(
                f,
                "infeasible split: tour position {position} (customer {customer}) cannot be served within the route bound"
            ),
            Self::DegenerateTour { reason } => write!(f, "degenerate tour: {reason}"),
        }
    }
}

impl std::error::Error for RoutingError {}
