//! Closed reference solids as triangle soups.

use nalgebra::{Point3, Vector3};

use crate::Triangle;

/// Corner-index triples for a box, two triangles per side, CCW from outside.
const BOX_FACES: [[usize; 3]; 12] = [
    // Bottom (z = min), -Z
    [0, 2, 1],
    [0, 3, 2],
    // Top (z = max), +Z
    [4, 5, 6],
    [4, 6, 7],
    // Front (y = min), -Y
    [0, 1, 5],
    [0, 5, 4],
    // Back (y = max), +Y
    [3, 7, 6],
    [3, 6, 2],
    // Left (x = min), -X
    [0, 4, 7],
    [0, 7, 3],
    // Right (x = max), +X
    [1, 2, 6],
    [1, 6, 5],
];

/// Create an axis-aligned box from `min` with extents `size`.
///
/// Returns 12 triangles with outward (CCW) winding, so the summed
/// signed volume is `size.x * size.y * size.z`.
///
/// # Example
///
/// ```
/// use mesh_types::{cuboid, Point3, Triangle, Vector3};
///
/// let tris = cuboid(Point3::new(-1.0, 0.0, 5.0), Vector3::new(2.0, 3.0, 4.0));
/// let volume: f64 = tris.iter().map(Triangle::signed_volume).sum();
/// assert!((volume - 24.0).abs() < 1e-9);
/// ```
#[must_use]
pub fn cuboid(min: Point3<f64>, size: Vector3<f64>) -> Vec<Triangle> {
    let max = min + size;
    let corners = [
        Point3::new(min.x, min.y, min.z),
        Point3::new(max.x, min.y, min.z),
        Point3::new(max.x, max.y, min.z),
        Point3::new(min.x, max.y, min.z),
        Point3::new(min.x, min.y, max.z),
        Point3::new(max.x, min.y, max.z),
        Point3::new(max.x, max.y, max.z),
        Point3::new(min.x, max.y, max.z),
    ];

    BOX_FACES
        .iter()
        .map(|&[a, b, c]| Triangle::new(corners[a], corners[b], corners[c]))
        .collect()
}

/// Create a cube with one corner at the origin and edge length `edge`.
///
/// # Example
///
/// ```
/// use mesh_types::cube;
///
/// assert_eq!(cube(10.0).len(), 12);
/// ```
#[must_use]
pub fn cube(edge: f64) -> Vec<Triangle> {
    cuboid(Point3::origin(), Vector3::new(edge, edge, edge))
}
