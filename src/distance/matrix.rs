//! Dense distance matrix.

use serde::{Deserialize, Serialize};

use crate::error::RoutingError;

/// A dense n×n distance matrix stored in row-major order.
///
/// Index 0 is the depot, `1..n` are customers.
///
/// # Examples
///
/// ```
/// use u_routing_sd::distance::DistanceMatrix;
///
/// let dm = DistanceMatrix::from_points(&[(0.0, 0.0), (3.0, 4.0), (0.0, 8.0)]);
/// assert!((dm.get(0, 1) - 5.0).abs() < 1e-10);
/// assert_eq!(dm.size(), 3);
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "RawMatrix")]
pub struct DistanceMatrix {
    data: Vec<f64>,
    size: usize,
}

/// Unchecked serialized form of [`DistanceMatrix`].
#[derive(Deserialize)]
struct RawMatrix {
    data: Vec<f64>,
    size: usize,
}

impl TryFrom<RawMatrix> for DistanceMatrix {
    type Error = RoutingError;

    fn try_from(raw: RawMatrix) -> Result<Self, Self::Error> {
        let len = raw.data.len();
        Self::from_data(raw.size, raw.data).ok_or_else(|| {
            RoutingError::invalid_instance(format!(
                "distance matrix of size {} holds {len} entries",
                raw.size
            ))
        })
    }
}

impl DistanceMatrix {
    /// Creates a distance matrix of the given size, initialized to zero.
    pub fn new(size: usize) -> Self {
        Self {
            data: vec![0.0; size * size],
            size,
        }
    }

    /// Computes a Euclidean distance matrix from planar coordinates.
    pub fn from_points(points: &[(f64, f64)]) -> Self {
        let n = points.len();
        let mut dm = Self::new(n);
        for i in 0..n {
            for j in (i + 1)..n {
                let dx = points[i].0 - points[j].0;
                let dy = points[i].1 - points[j].1;
                let d = (dx * dx + dy * dy).sqrt();
                dm.set(i, j, d);
                dm.set(j, i, d);
            }
        }
        dm
    }

    /// Creates a distance matrix from an explicit n×n grid in row-major order.
    ///
    /// Returns `None` if the data length doesn't match `size * size`.
    pub fn from_data(size: usize, data: Vec<f64>) -> Option<Self> {
        if size.checked_mul(size) != Some(data.len()) {
            return None;
        }
        Some(Self { data, size })
    }

    /// Creates a distance matrix from nested rows.
    ///
    /// Returns `None` if the rows do not form a square grid.
    pub fn from_rows(rows: &[Vec<f64>]) -> Option<Self> {
        let size = rows.len();
        if rows.iter().any(|row| row.len() != size) {
            return None;
        }
        Self::from_data(size, rows.concat())
    }

    /// Returns the distance from location `from` to location `to`.
    ///
    /// # Panics
    ///
    /// Panics if either index is out of bounds.
    pub fn get(&self, from: usize, to: usize) -> f64 {
        self.data[from * self.size + to]
    }

    /// Sets the distance from location `from` to location `to`.
    pub fn set(&mut self, from: usize, to: usize, distance: f64) {
        self.data[from * self.size + to] = distance;
    }

    /// Number of locations in this matrix.
    pub fn size(&self) -> usize {
        self.size
    }

    /// Returns `true` if the matrix is symmetric within the given tolerance.
    pub fn is_symmetric(&self, tol: f64) -> bool {
        for i in 0..self.size {
            for j in (i + 1)..self.size {
                if (self.get(i, j) - self.get(j, i)).abs() > tol {
                    return false;
                }
            }
        }
        true
    }

    /// Largest entry among pairs of non-depot locations.
    pub fn max_customer_distance(&self) -> f64 {
        (1..self.size)
            .flat_map(|i| (1..self.size).map(move |j| (i, j)))
            .map(|(i, j)| self.get(i, j))
            .fold(0.0, f64::max)
    }

    /// Returns the nearest location to `from` among the given candidates.
    ///
    /// Ties go to the candidate listed first. Returns `None` if `candidates`
    /// is empty.
    pub fn nearest_neighbor(&self, from: usize, candidates: &[usize]) -> Option<usize> {
        candidates
            .iter()
            .copied()
            .min_by(|&a, &b| self.get(from, a).total_cmp(&self.get(from, b)))
    }

    /// Returns the farthest location from `from` among the given candidates.
    ///
    /// Ties go to the candidate listed first. Returns `None` if `candidates`
    /// is empty.
    pub fn farthest(&self, from: usize, candidates: &[usize]) -> Option<usize> {
        // `min_by` keeps the first of equal elements, `max_by` the last.
        candidates
            .iter()
            .copied()
            .min_by(|&a, &b| self.get(from, b).total_cmp(&self.get(from, a)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_points() -> Vec<(f64, f64)> {
        vec![(0.0, 0.0), (3.0, 4.0), (0.0, 8.0)]
    }

    #[test]
    fn test_from_points() {
        let dm = DistanceMatrix::from_points(&sample_points());
        assert_eq!(dm.size(), 3);
        assert!((dm.get(0, 1) - 5.0).abs() < 1e-10);
        assert!((dm.get(0, 2) - 8.0).abs() < 1e-10);
        assert!((dm.get(0, 0)).abs() < 1e-10);
    }

    #[test]
    fn test_symmetric() {
        let dm = DistanceMatrix::from_points(&sample_points());
        assert!(dm.is_symmetric(1e-10));
    }

    #[test]
    fn test_from_data() {
        let dm = DistanceMatrix::from_data(2, vec![0.0, 5.0, 5.0, 0.0]).expect("valid");
        assert_eq!(dm.get(0, 1), 5.0);
        assert_eq!(dm.get(1, 0), 5.0);
        assert!(DistanceMatrix::from_data(2, vec![0.0, 1.0, 2.0]).is_none());
    }

    #[test]
    fn test_from_rows() {
        let dm = DistanceMatrix::from_rows(&[vec![0.0, 2.0], vec![3.0, 0.0]]).expect("square");
        assert_eq!(dm.get(0, 1), 2.0);
        assert_eq!(dm.get(1, 0), 3.0);
        assert!(!dm.is_symmetric(1e-10));
        assert!(DistanceMatrix::from_rows(&[vec![0.0, 2.0], vec![3.0]]).is_none());
    }

    #[test]
    fn test_deserialize_checks_dimensions() {
        let dm = DistanceMatrix::from_points(&sample_points());
        let json = serde_json::to_string(&dm).expect("serialize");
        let back: DistanceMatrix = serde_json::from_str(&json).expect("deserialize");
        assert_eq!(back, dm);

        let short = serde_json::from_str::<DistanceMatrix>(r#"{"data":[0.0],"size":3}"#);
        assert!(short.is_err());
        let overflow = serde_json::from_str::<DistanceMatrix>(
            r#"{"data":[],"size":18446744073709551615}"#,
        );
        assert!(overflow.is_err());
    }

    #[test]
    fn test_max_customer_distance_ignores_depot() {
        let dm = DistanceMatrix::from_points(&[(50.0, 0.0), (0.0, 0.0), (1.0, 0.0), (3.0, 0.0)]);
        assert!((dm.max_customer_distance() - 3.0).abs() < 1e-10);
    }

    #[test]
    fn test_nearest_neighbor() {
        let dm = DistanceMatrix::from_points(&sample_points());
        assert_eq!(dm.nearest_neighbor(0, &[1, 2]), Some(1));
        assert_eq!(dm.nearest_neighbor(0, &[2]), Some(2));
        assert_eq!(dm.nearest_neighbor(0, &[]), None);
    }

    #[test]
    fn test_ties_keep_first_candidate() {
        // 1 and 2 are both at distance 1 from the depot.
        let dm = DistanceMatrix::from_points(&[(0.0, 0.0), (1.0, 0.0), (-1.0, 0.0), (0.0, 5.0), (0.0, -5.0)]);
        assert_eq!(dm.nearest_neighbor(0, &[1, 2]), Some(1));
        assert_eq!(dm.nearest_neighbor(0, &[2, 1]), Some(2));
        assert_eq!(dm.farthest(0, &[1, 3, 4]), Some(3));
        assert_eq!(dm.farthest(0, &[4, 3]), Some(4));
    }
}
