//! Geometric equality oracle.
//!
//! Two points coincide when their Euclidean distance is **strictly** below the
//! tolerance; a pair exactly `tolerance` apart is distinct. The relation is not
//! transitive near the threshold, so the tolerance must be small relative to
//! the strut length of the lattice.
//!
//! ```rust
//! use lattice_sieve::geometry::equality::{nodes_equal, DEFAULT_TOLERANCE};
//!
//! assert!(nodes_equal(&[1.0, 0.0, 0.0], &[1.0 + 1e-9, 0.0, 0.0], DEFAULT_TOLERANCE));
//! assert!(!nodes_equal(&[0.0, 0.0, 0.0], &[0.5, 0.0, 0.0], 0.5));
//! ```

use crate::mesh_error::LatticeError;
use crate::topology::edge::Edge;

/// Default coincidence tolerance for node merging.
pub const DEFAULT_TOLERANCE: f64 = 1e-6;

/// A 3D coordinate.
pub type Point3 = [f64; 3];

#[inline]
pub(crate) fn sub(a: Point3, b: Point3) -> Point3 {
    [a[0] - b[0], a[1] - b[1], a[2] - b[2]]
}

#[inline]
pub(crate) fn norm(v: Point3) -> f64 {
    (v[0] * v[0] + v[1] * v[1] + v[2] * v[2]).sqrt()
}

/// Euclidean distance between two points.
#[inline]
pub fn distance(p: &Point3, q: &Point3) -> f64 {
    norm(sub(*p, *q))
}

/// `true` iff `p` and `q` are strictly closer than `tolerance`.
#[inline]
pub fn nodes_equal(p: &Point3, q: &Point3, tolerance: f64) -> bool {
    distance(p, q) < tolerance
}

/// Slice-based variant of [`nodes_equal`] for untyped input.
///
/// Fails with [`LatticeError::InvalidPointDimension`] unless both points have
/// exactly three coordinates.
pub fn try_nodes_equal(p: &[f64], q: &[f64], tolerance: f64) -> Result<bool, LatticeError> {
    let p = as_point(p)?;
    let q = as_point(q)?;
    Ok(nodes_equal(&p, &q, tolerance))
}

/// Convert a coordinate slice into a [`Point3`].
pub fn as_point(coords: &[f64]) -> Result<Point3, LatticeError> {
    <[f64; 3]>::try_from(coords).map_err(|_| LatticeError::InvalidPointDimension {
        found: coords.len(),
    })
}

/// `true` iff both edges connect the same unordered pair of nodes.
#[inline]
pub fn edges_equal(e1: &Edge, e2: &Edge) -> bool {
    e1.key() == e2.key()
}

/// Validate a coincidence tolerance.
pub fn check_tolerance(tolerance: f64) -> Result<f64, LatticeError> {
    if tolerance.is_finite() && tolerance > 0.0 {
        Ok(tolerance)
    } else {
        Err(LatticeError::InvalidTolerance(tolerance))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn identical_points_are_equal() {
        let p = [0.5, 0.5, 0.5];
        assert!(nodes_equal(&p, &p, DEFAULT_TOLERANCE));
    }

    #[test]
    fn distance_at_threshold_is_not_equal() {
        let p = [0.0, 0.0, 0.0];
        let q = [0.25, 0.0, 0.0];
        assert!(!nodes_equal(&p, &q, 0.25));
        assert!(nodes_equal(&p, &q, 0.250_001));
    }

    #[test]
    fn tolerance_is_euclidean_not_per_axis() {
        let p = [0.0, 0.0, 0.0];
        let q = [0.8e-6, 0.8e-6, 0.0];
        // each axis is inside the tolerance, the diagonal is not
        assert!(!nodes_equal(&p, &q, DEFAULT_TOLERANCE));
    }

    #[test]
    fn malformed_points_are_rejected() {
        let err = try_nodes_equal(&[0.0, 0.0], &[0.0, 0.0, 0.0], DEFAULT_TOLERANCE).unwrap_err();
        assert_eq!(err, LatticeError::InvalidPointDimension { found: 2 });
        let err =
            try_nodes_equal(&[0.0, 0.0, 0.0], &[0.0, 0.0, 0.0, 1.0], DEFAULT_TOLERANCE)
                .unwrap_err();
        assert_eq!(err, LatticeError::InvalidPointDimension { found: 4 });
        assert!(try_nodes_equal(&[1.0, 2.0, 3.0], &[1.0, 2.0, 3.0], DEFAULT_TOLERANCE).unwrap());
    }

    #[test]
    fn edge_equality_is_order_independent() {
        let e1 = Edge::from_raw(5, 1).unwrap();
        let e2 = Edge::from_raw(1, 5).unwrap();
        let e3 = Edge::from_raw(1, 6).unwrap();
        assert!(edges_equal(&e1, &e2));
        assert!(!edges_equal(&e1, &e3));
    }

    #[test]
    fn tolerance_validation() {
        assert_eq!(check_tolerance(1e-6), Ok(1e-6));
        assert!(check_tolerance(0.0).is_err());
        assert!(check_tolerance(-1.0).is_err());
        assert!(check_tolerance(f64::NAN).is_err());
        assert!(check_tolerance(f64::INFINITY).is_err());
    }
}
