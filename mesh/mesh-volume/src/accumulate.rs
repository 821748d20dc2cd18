//! Signed-tetrahedron volume summation.
//!
//! Every triangle forms a tetrahedron with the origin. Summing the signed
//! volumes of those tetrahedra over a closed, consistently wound surface
//! cancels everything outside the solid (divergence theorem), leaving the
//! enclosed volume with a sign set by the winding. The reported volume is
//! the absolute value, so CW and CCW meshes measure the same.
//!
//! # Accuracy
//!
//! The result is only meaningful for closed, non-self-intersecting,
//! consistently oriented meshes. Open or inconsistently wound input gives
//! a wrong number, not an error.

use std::io::Read;

use mesh_io::BinaryStlReader;
use mesh_types::Triangle;
use tracing::debug;

use crate::error::VolumeResult;

/// Running sum of signed tetrahedron volumes.
///
/// # Example
///
/// ```
/// use mesh_types::cube;
/// use mesh_volume::VolumeAccumulator;
///
/// let mut acc = VolumeAccumulator::new();
/// for tri in cube(10.0).iter().map(|t| t.reversed()) {
///     acc.add(&tri);
/// }
/// assert!((acc.signed_sum() + 1000.0).abs() < 1e-9);
/// assert!((acc.volume() - 1000.0).abs() < 1e-9);
/// ```
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct VolumeAccumulator {
    sum: f64,
    triangles: u64,
}

impl VolumeAccumulator {
    /// Create an empty accumulator.
    #[must_use]
    pub const fn new() -> Self {
        Self {
            sum: 0.0,
            triangles: 0,
        }
    }

    /// Add one triangle's signed volume.
    pub fn add(&mut self, triangle: &Triangle) {
        self.sum += triangle.signed_volume();
        self.triangles += 1;
    }

    /// Signed sum so far. Positive for outward (CCW) winding.
    #[must_use]
    pub const fn signed_sum(&self) -> f64 {
        self.sum
    }

    /// Absolute enclosed volume.
    #[must_use]
    pub fn volume(&self) -> f64 {
        self.sum.abs()
    }

    /// Number of triangles added.
    #[must_use]
    pub const fn triangle_count(&self) -> u64 {
        self.triangles
    }
}

impl Extend<Triangle> for VolumeAccumulator {
    fn extend<I: IntoIterator<Item = Triangle>>(&mut self, iter: I) {
        for tri in iter {
            self.add(&tri);
        }
    }
}

impl<'a> Extend<&'a Triangle> for VolumeAccumulator {
    fn extend<I: IntoIterator<Item = &'a Triangle>>(&mut self, iter: I) {
        for tri in iter {
            self.add(tri);
        }
    }
}

/// Signed volume sum over `triangles`.
#[must_use]
pub fn signed_volume<'a, I>(triangles: I) -> f64
where
    I: IntoIterator<Item = &'a Triangle>,
{
    let mut acc = VolumeAccumulator::new();
    acc.extend(triangles);
    acc.signed_sum()
}

/// Absolute enclosed volume of `triangles`.
///
/// # Example
///
/// ```
/// use mesh_types::cube;
/// use mesh_volume::mesh_volume;
///
/// assert!((mesh_volume(&cube(2.0)) - 8.0).abs() < 1e-12);
/// ```
#[must_use]
pub fn mesh_volume<'a, I>(triangles: I) -> f64
where
    I: IntoIterator<Item = &'a Triangle>,
{
    signed_volume(triangles).abs()
}

/// Drain a binary STL reader and return the absolute volume.
///
/// Any read error aborts the pass; no partial sum is returned.
///
/// # Errors
///
/// Returns the first error produced by `reader`.
pub fn accumulate_binary<R: Read>(reader: BinaryStlReader<R>) -> VolumeResult<f64> {
    let mut acc = VolumeAccumulator::new();
    for facet in reader {
        acc.add(&facet?.triangle());
    }

    debug!(
        triangles = acc.triangle_count(),
        signed = acc.signed_sum(),
        "Accumulated binary STL volume"
    );

    Ok(acc.volume())
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use crate::error::VolumeError;
    use approx::assert_relative_eq;
    use mesh_io::write_stl_binary;
    use mesh_types::{Point3, Vector3, cube, cuboid};

    #[test]
    fn empty_accumulator_is_zero() {
        let acc = VolumeAccumulator::default();
        assert_relative_eq!(acc.volume(), 0.0);
        assert_eq!(acc.triangle_count(), 0);
    }

    #[test]
    fn cube_volume_independent_of_winding() {
        let tris = cube(10.0);
        let flipped: Vec<Triangle> = tris.iter().map(Triangle::reversed).collect();
        assert_relative_eq!(signed_volume(&tris), 1000.0, epsilon = 1e-9);
        assert_relative_eq!(signed_volume(&flipped), -1000.0, epsilon = 1e-9);
        assert_relative_eq!(mesh_volume(&flipped), 1000.0, epsilon = 1e-9);
    }

    #[test]
    fn two_disjoint_boxes_add() {
        let mut tris = cuboid(Point3::origin(), Vector3::new(1.0, 2.0, 3.0));
        tris.extend(cuboid(Point3::new(10.0, 10.0, 10.0), Vector3::new(2.0, 2.0, 2.0)));
        assert_relative_eq!(mesh_volume(&tris), 14.0, epsilon = 1e-9);
    }

    #[test]
    fn open_mesh_is_not_an_error() {
        // Drop one face: the number is wrong but still produced.
        let tris = cube(1.0);
        let open = &tris[..11];
        assert!(mesh_volume(open).is_finite());
    }

    #[test]
    fn accumulate_binary_cube() {
        let mut bytes = Vec::new();
        write_stl_binary(&cube(10.0), &mut bytes, None).unwrap();
        let reader = BinaryStlReader::new(bytes.as_slice()).unwrap();
        assert_relative_eq!(accumulate_binary(reader).unwrap(), 1000.0, epsilon = 1e-6);
    }

    #[test]
    fn accumulate_binary_discards_partial_sum() {
        let mut bytes = Vec::new();
        write_stl_binary(&cube(10.0), &mut bytes, None).unwrap();
        bytes.truncate(bytes.len() - 1);
        let reader = BinaryStlReader::new(bytes.as_slice()).unwrap();
        assert!(matches!(
            accumulate_binary(reader),
            Err(VolumeError::TruncatedRecord {
                index: 11,
                declared: 12
            })
        ));
    }
}
