//! Price quoting from volume and a per-cm³ rate.

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use crate::density::{Density, Material};
use crate::error::{VolumeError, VolumeResult};
use crate::units::{VolumeUnit, mm3_to_cm3};

/// Parameters for [`MeshModel::quote`](crate::MeshModel::quote).
///
/// # Example
///
/// ```
/// use mesh_volume::{Material, QuoteParams, VolumeUnit};
///
/// let params = QuoteParams::for_material(Material::Pla)
///     .with_rate(0.25)
///     .with_unit(VolumeUnit::CubicInches);
/// assert!(params.validate().is_ok());
/// ```
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct QuoteParams {
    /// Material density used for the weight.
    pub density: Density,

    /// Price per cubic centimeter. Always applied to cm³, whatever `unit` is.
    pub rate_per_cm3: f64,

    /// Unit the quoted volume is reported in.
    pub unit: VolumeUnit,
}

impl Default for QuoteParams {
    fn default() -> Self {
        Self {
            density: Density::DEFAULT,
            rate_per_cm3: 0.0,
            unit: VolumeUnit::CubicCentimeters,
        }
    }
}

impl QuoteParams {
    /// Create default parameters.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Defaults with the density of `material`.
    #[must_use]
    pub fn for_material(material: Material) -> Self {
        Self::default().with_density(material.density())
    }

    /// Set the density.
    #[must_use]
    pub const fn with_density(mut self, density: Density) -> Self {
        self.density = density;
        self
    }

    /// Set the price per cubic centimeter.
    #[must_use]
    pub const fn with_rate(mut self, rate_per_cm3: f64) -> Self {
        self.rate_per_cm3 = rate_per_cm3;
        self
    }

    /// Set the reporting unit.
    #[must_use]
    pub const fn with_unit(mut self, unit: VolumeUnit) -> Self {
        self.unit = unit;
        self
    }

    /// Validate the parameters.
    ///
    /// # Errors
    ///
    /// Returns [`VolumeError::InvalidRate`] if the rate is negative or not
    /// finite.
    pub fn validate(&self) -> VolumeResult<()> {
        if !self.rate_per_cm3.is_finite() || self.rate_per_cm3 < 0.0 {
            return Err(VolumeError::InvalidRate(self.rate_per_cm3));
        }
        Ok(())
    }
}

/// Result of pricing one model.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize))]
pub struct Quote {
    /// Declared triangle count (0 for ASCII).
    pub triangles: u32,
    /// Volume in [`unit`](Self::unit).
    pub volume: f64,
    /// Unit of [`volume`](Self::volume).
    pub unit: VolumeUnit,
    /// Volume in cm³, the basis for weight and price.
    pub volume_cm3: f64,
    /// Weight in grams.
    pub weight_g: f64,
    /// Unrounded price.
    pub price: f64,
}

impl Quote {
    pub(crate) fn from_volume(volume_mm3: f64, triangles: u32, params: &QuoteParams) -> Self {
        let volume_cm3 = mm3_to_cm3(volume_mm3);
        Self {
            triangles,
            volume: params.unit.from_mm3(volume_mm3),
            unit: params.unit,
            volume_cm3,
            weight_g: params.density.weight_of(volume_cm3),
            price: volume_cm3 * params.rate_per_cm3,
        }
    }

    /// Price rounded to the nearest whole amount, halves away from zero.
    #[must_use]
    #[allow(clippy::cast_possible_truncation)]
    pub fn rounded_price(&self) -> i64 {
        self.price.round() as i64
    }
}
