//! Volume unit conversion.
//!
//! Volumes are computed in cubic millimeters (STL coordinates are taken as
//! millimeters) and converted on the way out.

use std::fmt;
use std::str::FromStr;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::error::VolumeError;

/// Cubic millimeters in one cubic centimeter.
pub const MM3_PER_CM3: f64 = 1000.0;

/// Cubic inches in one cubic centimeter.
pub const IN3_PER_CM3: f64 = 0.061_023_744_1;

/// Convert cubic millimeters to cubic centimeters.
#[inline]
#[must_use]
pub fn mm3_to_cm3(volume_mm3: f64) -> f64 {
    volume_mm3 / MM3_PER_CM3
}

/// Convert cubic centimeters to cubic inches.
#[inline]
#[must_use]
pub fn cm3_to_in3(volume_cm3: f64) -> f64 {
    volume_cm3 * IN3_PER_CM3
}

/// Unit a volume is reported in.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum VolumeUnit {
    /// mm³, the native unit of the computation.
    #[cfg_attr(feature = "serde", serde(rename = "mm3"))]
    CubicMillimeters,
    /// cm³.
    #[default]
    #[cfg_attr(feature = "serde", serde(rename = "cm3"))]
    CubicCentimeters,
    /// in³.
    #[cfg_attr(feature = "serde", serde(rename = "in3"))]
    CubicInches,
}

impl VolumeUnit {
    /// Map a free-form unit token the lenient way.
    ///
    /// Exactly `"cm"` selects cubic centimeters; every other token selects
    /// cubic inches. Callers that want unknown tokens rejected should use
    /// [`str::parse`] instead.
    ///
    /// # Example
    ///
    /// ```
    /// use mesh_volume::VolumeUnit;
    ///
    /// assert_eq!(VolumeUnit::from_token("cm"), VolumeUnit::CubicCentimeters);
    /// assert_eq!(VolumeUnit::from_token("inch"), VolumeUnit::CubicInches);
    /// assert_eq!(VolumeUnit::from_token("mm"), VolumeUnit::CubicInches);
    /// ```
    #[must_use]
    pub fn from_token(token: &str) -> Self {
        if token == "cm" {
            Self::CubicCentimeters
        } else {
            if token != "in" {
                debug!(token, "Unit token is not \"cm\", reporting cubic inches");
            }
            Self::CubicInches
        }
    }

    /// Convert a volume given in cubic millimeters to this unit.
    #[must_use]
    pub fn from_mm3(self, volume_mm3: f64) -> f64 {
        match self {
            Self::CubicMillimeters => volume_mm3,
            Self::CubicCentimeters => mm3_to_cm3(volume_mm3),
            Self::CubicInches => cm3_to_in3(mm3_to_cm3(volume_mm3)),
        }
    }

    /// Short symbol, e.g. `"cm3"`.
    #[must_use]
    pub const fn symbol(&self) -> &'static str {
        match self {
            Self::CubicMillimeters => "mm3",
            Self::CubicCentimeters => "cm3",
            Self::CubicInches => "in3",
        }
    }
}

impl fmt::Display for VolumeUnit {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.symbol())
    }
}

impl FromStr for VolumeUnit {
    type Err = VolumeError;

    /// Strict parsing: only known spellings are accepted.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "mm" | "mm3" => Ok(Self::CubicMillimeters),
            "cm" | "cm3" | "cc" => Ok(Self::CubicCentimeters),
            "in" | "in3" | "inch" => Ok(Self::CubicInches),
            _ => Err(VolumeError::UnknownUnit(s.to_string())),
        }
    }
}
