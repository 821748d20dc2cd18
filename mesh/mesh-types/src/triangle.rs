//! Triangle type for volume calculations.

use nalgebra::{Point3, Vector3};

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// A triangle with concrete vertex positions.
///
/// Winding is **counter-clockwise (CCW) when viewed from the front**
/// (normal points toward viewer).
///
/// # Example
///
/// ```
/// use mesh_types::{Triangle, Point3};
///
/// let tri = Triangle::new(
///     Point3::new(0.0, 0.0, 0.0),
///     Point3::new(1.0, 0.0, 0.0),
///     Point3::new(0.0, 1.0, 0.0),
/// );
///
/// // Normal points in +Z direction
/// let normal = tri.normal().unwrap();
/// assert!((normal.z - 1.0).abs() < 1e-10);
/// ```
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Triangle {
    /// First vertex.
    pub v0: Point3<f64>,
    /// Second vertex.
    pub v1: Point3<f64>,
    /// Third vertex.
    pub v2: Point3<f64>,
}

impl Triangle {
    /// Create a new triangle from three points.
    #[inline]
    #[must_use]
    pub const fn new(v0: Point3<f64>, v1: Point3<f64>, v2: Point3<f64>) -> Self {
        Self { v0, v1, v2 }
    }

    /// Create a triangle from coordinate arrays.
    ///
    /// # Example
    ///
    /// ```
    /// use mesh_types::Triangle;
    ///
    /// let tri = Triangle::from_arrays(
    ///     [0.0, 0.0, 0.0],
    ///     [1.0, 0.0, 0.0],
    ///     [0.0, 1.0, 0.0],
    /// );
    /// assert!((tri.v1.x - 1.0).abs() < f64::EPSILON);
    /// ```
    #[inline]
    #[must_use]
    #[allow(clippy::missing_const_for_fn)] // Point3::new is not const in nalgebra
    pub fn from_arrays(v0: [f64; 3], v1: [f64; 3], v2: [f64; 3]) -> Self {
        Self {
            v0: Point3::new(v0[0], v0[1], v0[2]),
            v1: Point3::new(v1[0], v1[1], v1[2]),
            v2: Point3::new(v2[0], v2[1], v2[2]),
        }
    }

    /// Create a triangle from single-precision coordinates.
    ///
    /// STL stores vertices as `f32`; widening to `f64` is exact, so the
    /// volume terms are evaluated on the same values that were on disk.
    #[inline]
    #[must_use]
    pub fn from_f32(v0: [f32; 3], v1: [f32; 3], v2: [f32; 3]) -> Self {
        let widen = |v: [f32; 3]| Point3::new(f64::from(v[0]), f64::from(v[1]), f64::from(v[2]));
        Self {
            v0: widen(v0),
            v1: widen(v1),
            v2: widen(v2),
        }
    }

    /// Signed volume of the tetrahedron spanned by this triangle and the origin.
    ///
    /// This is one sixth of the determinant of the matrix whose rows are the
    /// three vertices, expanded into its six permutation terms:
    ///
    /// ```text
    /// vol = (-v321 + v231 + v312 - v132 - v213 + v123) / 6
    /// vABC = pA.x * pB.y * pC.z
    /// ```
    ///
    /// The sign follows the winding: CCW seen from outside a closed solid
    /// contributes positively. Summed over a closed, consistently wound mesh,
    /// the origin-dependent parts cancel and the total is the enclosed volume.
    ///
    /// # Example
    ///
    /// ```
    /// use mesh_types::Triangle;
    ///
    /// // Unit tetrahedron face opposite the origin
    /// let tri = Triangle::from_arrays([1.0, 0.0, 0.0], [0.0, 1.0, 0.0], [0.0, 0.0, 1.0]);
    /// assert!((tri.signed_volume() - 1.0 / 6.0).abs() < 1e-12);
    /// assert!((tri.reversed().signed_volume() + 1.0 / 6.0).abs() < 1e-12);
    /// ```
    #[must_use]
    pub fn signed_volume(&self) -> f64 {
        let (p1, p2, p3) = (&self.v0, &self.v1, &self.v2);

        let v321 = p3.x * p2.y * p1.z;
        let v231 = p2.x * p3.y * p1.z;
        let v312 = p3.x * p1.y * p2.z;
        let v132 = p1.x * p3.y * p2.z;
        let v213 = p2.x * p1.y * p3.z;
        let v123 = p1.x * p2.y * p3.z;

        (1.0 / 6.0) * (-v321 + v231 + v312 - v132 - v213 + v123)
    }

    /// Compute the (unnormalized) face normal via cross product.
    ///
    /// The direction follows the right-hand rule with CCW winding.
    /// The magnitude equals twice the triangle's area.
    #[inline]
    #[must_use]
    pub fn normal_unnormalized(&self) -> Vector3<f64> {
        let e1 = self.v1 - self.v0;
        let e2 = self.v2 - self.v0;
        e1.cross(&e2)
    }

    /// Compute the unit face normal.
    ///
    /// Returns `None` for degenerate triangles (zero area).
    #[must_use]
    pub fn normal(&self) -> Option<Vector3<f64>> {
        let n = self.normal_unnormalized();
        let len_sq = n.norm_squared();
        if len_sq > f64::EPSILON {
            Some(n / len_sq.sqrt())
        } else {
            None
        }
    }

    /// Get vertices as an array.
    #[inline]
    #[must_use]
    pub const fn vertices(&self) -> [Point3<f64>; 3] {
        [self.v0, self.v1, self.v2]
    }

    /// Create a new triangle with reversed winding (flipped normal).
    #[inline]
    #[must_use]
    pub const fn reversed(&self) -> Self {
        Self {
            v0: self.v0,
            v1: self.v2,
            v2: self.v1,
        }
    }

    /// Create a copy of this triangle moved by `offset`.
    #[inline]
    #[must_use]
    pub fn translated(&self, offset: Vector3<f64>) -> Self {
        Self {
            v0: self.v0 + offset,
            v1: self.v1 + offset,
            v2: self.v2 + offset,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn signed_volume_matches_determinant() {
        let tri = Triangle::from_arrays([1.0, 2.0, 3.0], [-4.0, 0.5, 2.0], [0.0, -1.0, 5.0]);
        let m = nalgebra::Matrix3::from_rows(&[
            tri.v0.coords.transpose(),
            tri.v1.coords.transpose(),
            tri.v2.coords.transpose(),
        ]);
        assert_relative_eq!(tri.signed_volume(), m.determinant() / 6.0, epsilon = 1e-12);
    }

    #[test]
    fn signed_volume_flips_with_winding() {
        let tri = Triangle::from_arrays([2.0, 0.0, 0.0], [0.0, 3.0, 0.0], [0.0, 0.0, 4.0]);
        assert_relative_eq!(tri.signed_volume(), 4.0);
        assert_relative_eq!(tri.reversed().signed_volume(), -4.0);
    }

    #[test]
    fn triangle_through_origin_has_no_volume() {
        let tri = Triangle::from_arrays([0.0, 0.0, 0.0], [1.0, 0.0, 0.0], [0.0, 1.0, 1.0]);
        assert_relative_eq!(tri.signed_volume(), 0.0);
    }

    #[test]
    #[allow(clippy::float_cmp)]
    fn from_f32_widens_exactly() {
        let tri = Triangle::from_f32([0.1, 0.2, 0.3], [1.0, 0.0, 0.0], [0.0, 1.0, 0.0]);
        assert_eq!(tri.v0.x, f64::from(0.1_f32));
        assert_eq!(tri.v0.z, f64::from(0.3_f32));
    }

    #[test]
    fn triangle_normal() {
        let tri = Triangle::from_arrays([0.0, 0.0, 0.0], [1.0, 0.0, 0.0], [0.0, 1.0, 0.0]);
        let n = tri.normal().unwrap_or_else(Vector3::zeros);
        assert_relative_eq!(n, Vector3::z(), epsilon = 1e-12);
    }

    #[test]
    fn degenerate_triangle_normal() {
        let tri = Triangle::from_arrays([0.0, 0.0, 0.0], [1.0, 0.0, 0.0], [2.0, 0.0, 0.0]);
        assert!(tri.normal().is_none());
    }

    #[test]
    fn translated_moves_every_vertex() {
        let tri = Triangle::from_arrays([0.0, 0.0, 0.0], [1.0, 0.0, 0.0], [0.0, 1.0, 0.0]);
        let moved = tri.translated(Vector3::new(1.0, 2.0, 3.0));
        for (a, b) in tri.vertices().iter().zip(moved.vertices().iter()) {
            assert_relative_eq!(b - a, Vector3::new(1.0, 2.0, 3.0));
        }
    }
}
