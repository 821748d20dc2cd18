//! Material density and weight estimation.

use std::fmt;
use std::str::FromStr;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use crate::error::{VolumeError, VolumeResult};

/// Material density in grams per cubic centimeter.
///
/// Always positive and finite; the only way to build one from a raw number
/// is [`Density::new`] (or `TryFrom<f64>`), which rejects anything else.
///
/// # Example
///
/// ```
/// use mesh_volume::Density;
///
/// let pla = Density::new(1.24).unwrap();
/// assert!((pla.weight_of(10.0) - 12.4).abs() < 1e-12);
///
/// assert!(Density::new(0.0).is_err());
/// assert!(Density::new(f64::NAN).is_err());
/// ```
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd)]
#[cfg_attr(
    feature = "serde",
    derive(Serialize, Deserialize),
    serde(try_from = "f64", into = "f64")
)]
pub struct Density(f64);

impl Density {
    /// Default density, 1.04 g/cm³ (ABS).
    pub const DEFAULT: Self = Self(1.04);

    /// Create a density from grams per cubic centimeter.
    ///
    /// # Errors
    ///
    /// Returns [`VolumeError::InvalidDensity`] unless the value is positive
    /// and finite.
    pub fn new(grams_per_cm3: f64) -> VolumeResult<Self> {
        if grams_per_cm3.is_finite() && grams_per_cm3 > 0.0 {
            Ok(Self(grams_per_cm3))
        } else {
            Err(VolumeError::InvalidDensity(grams_per_cm3))
        }
    }

    /// The value in grams per cubic centimeter.
    #[must_use]
    pub const fn grams_per_cm3(self) -> f64 {
        self.0
    }

    /// Weight in grams of `volume_cm3` of this material.
    #[must_use]
    pub fn weight_of(self, volume_cm3: f64) -> f64 {
        weight(volume_cm3, self)
    }
}

impl Default for Density {
    fn default() -> Self {
        Self::DEFAULT
    }
}

impl TryFrom<f64> for Density {
    type Error = VolumeError;

    fn try_from(value: f64) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl From<Density> for f64 {
    fn from(density: Density) -> Self {
        density.0
    }
}

impl From<Material> for Density {
    fn from(material: Material) -> Self {
        material.density()
    }
}

impl fmt::Display for Density {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} g/cm³", self.0)
    }
}

/// Weight in grams: `volume_cm3 * density`.
#[inline]
#[must_use]
pub fn weight(volume_cm3: f64, density: Density) -> f64 {
    volume_cm3 * density.grams_per_cm3()
}

/// Common printing materials with typical densities.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "lowercase"))]
pub enum Material {
    /// ABS, 1.04 g/cm³.
    Abs,
    /// PLA, 1.24 g/cm³.
    Pla,
    /// PETG, 1.27 g/cm³.
    Petg,
    /// Nylon (PA12), 1.01 g/cm³.
    Nylon,
    /// Standard photopolymer resin, 1.18 g/cm³.
    Resin,
}

impl Material {
    /// Typical density of the material.
    #[must_use]
    pub const fn density(&self) -> Density {
        match self {
            Self::Abs => Density::DEFAULT,
            Self::Pla => Density(1.24),
            Self::Petg => Density(1.27),
            Self::Nylon => Density(1.01),
            Self::Resin => Density(1.18),
        }
    }

    /// Lower-case material name.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Abs => "abs",
            Self::Pla => "pla",
            Self::Petg => "petg",
            Self::Nylon => "nylon",
            Self::Resin => "resin",
        }
    }
}

impl FromStr for Material {
    type Err = VolumeError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "abs" => Ok(Self::Abs),
            "pla" => Ok(Self::Pla),
            "petg" => Ok(Self::Petg),
            "nylon" | "pa12" => Ok(Self::Nylon),
            "resin" => Ok(Self::Resin),
            _ => Err(VolumeError::UnknownMaterial(s.to_string())),
        }
    }
}
