//! Volume, weight and price estimation for STL meshes.
//!
//! A [`MeshModel`] wraps one STL source. Opening it classifies the data as
//! ASCII or binary; the first volume request streams the binary records once
//! and caches the result, and every later volume, weight or quote request is
//! derived from that cached value.
//!
//! - [`MeshModel`] - the per-mesh handle
//! - [`VolumeAccumulator`] / [`mesh_volume`] - signed-tetrahedron summation
//! - [`VolumeUnit`] - mm³, cm³ and in³ conversion
//! - [`Density`] / [`Material`] - weight estimation
//! - [`QuoteParams`] / [`Quote`] - pricing
//!
//! # Units
//!
//! STL coordinates are taken as millimeters. One cm³ is 1000 mm³ and
//! 0.0610237441 in³. Weight is always `volume_cm3 * density`.
//!
//! # Example
//!
//! ```
//! use mesh_types::{Point3, Vector3, cuboid};
//! use mesh_volume::{MeshModel, QuoteParams, VolumeUnit};
//!
//! let dir = tempfile::tempdir().unwrap();
//! let path = dir.path().join("block.stl");
//! let block = cuboid(Point3::origin(), Vector3::new(20.0, 10.0, 5.0));
//! mesh_io::save_stl(&block, &path).unwrap();
//!
//! let mut model = MeshModel::open(&path).unwrap();
//! assert!((model.volume(VolumeUnit::CubicCentimeters).unwrap() - 1.0).abs() < 1e-9);
//!
//! let quote = model.quote(&QuoteParams::default().with_rate(4.0)).unwrap();
//! assert_eq!(quote.rounded_price(), 4);
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![deny(clippy::unwrap_used)]
#![deny(clippy::expect_used)]

mod accumulate;
mod density;
mod error;
mod model;
mod quote;
mod units;

pub use accumulate::{VolumeAccumulator, accumulate_binary, mesh_volume, signed_volume};
pub use density::{Density, Material, weight};
pub use error::{VolumeError, VolumeResult};
pub use model::{MeshModel, ModelState, VolumeState};
pub use quote::{Quote, QuoteParams};
pub use units::{IN3_PER_CM3, MM3_PER_CM3, VolumeUnit, cm3_to_in3, mm3_to_cm3};
