//! Geometric primitives for STL volume estimation.
//!
//! This crate provides the small set of types the volume pipeline needs:
//!
//! - [`Triangle`] - A triangle with concrete vertex positions and its
//!   signed-tetrahedron volume term
//! - [`cube`] / [`cuboid`] - Closed, outward-wound reference solids
//!
//! # Units
//!
//! This library is **unit-agnostic**. All coordinates are `f64`.
//! The STL volume pipeline built on top of it assumes millimeters.
//!
//! # Winding
//!
//! Face winding is **counter-clockwise (CCW) when viewed from outside**.
//! Summing [`Triangle::signed_volume`] over a closed mesh wound this way
//! gives a positive enclosed volume; the opposite winding gives the same
//! magnitude with a negative sign.
//!
//! # Example
//!
//! ```
//! use mesh_types::{cube, Triangle};
//!
//! let solid = cube(10.0);
//! let volume: f64 = solid.iter().map(Triangle::signed_volume).sum();
//! assert!((volume - 1000.0).abs() < 1e-9);
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![deny(clippy::unwrap_used)]
#![deny(clippy::expect_used)]

mod solid;
mod triangle;

pub use solid::{cube, cuboid};
pub use triangle::Triangle;

// Re-export nalgebra types for convenience
pub use nalgebra::{Point3, Vector3};
