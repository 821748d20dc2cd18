//! Error types for volume estimation.

use mesh_io::IoError;
use thiserror::Error;

/// Result type alias for volume operations.
pub type VolumeResult<T> = Result<T, VolumeError>;

/// Errors that can occur while measuring a mesh.
#[derive(Debug, Error)]
pub enum VolumeError {
    /// Opening, reading or classifying the underlying data failed.
    ///
    /// This includes a binary body shorter than the 84-byte preamble.
    #[error(transparent)]
    Io(IoError),

    /// The binary body ended before the declared number of records.
    #[error("truncated triangle record {index} of {declared} declared")]
    TruncatedRecord {
        /// Zero-based index of the incomplete record.
        index: u32,
        /// Triangle count declared in the header.
        declared: u32,
    },

    /// The model was closed before the operation.
    #[error("mesh model is closed")]
    Closed,

    /// Density must be positive and finite.
    #[error("invalid density: {0} g/cm³ (must be positive and finite)")]
    InvalidDensity(f64),

    /// Rate must be non-negative and finite.
    #[error("invalid rate: {0} per cm³ (must be non-negative and finite)")]
    InvalidRate(f64),

    /// Unit name not recognized by strict parsing.
    #[error("unknown volume unit: {0:?}")]
    UnknownUnit(String),

    /// Material name not recognized.
    #[error("unknown material: {0:?}")]
    UnknownMaterial(String),
}

impl VolumeError {
    /// Check whether this is an I/O-class failure.
    #[must_use]
    pub const fn is_io(&self) -> bool {
        matches!(self, Self::Io(_))
    }

    /// Check whether this is a truncated-record failure.
    #[must_use]
    pub const fn is_truncated(&self) -> bool {
        matches!(self, Self::TruncatedRecord { .. })
    }
}

impl From<IoError> for VolumeError {
    fn from(err: IoError) -> Self {
        match err {
            IoError::TruncatedRecord { index, declared } => Self::TruncatedRecord { index, declared },
            other => Self::Io(other),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn truncation_is_lifted_out_of_io() {
        let err = VolumeError::from(IoError::truncated(3, 4));
        assert!(err.is_truncated());
        assert!(!err.is_io());
        assert!(format!("{err}").contains("record 3 of 4"));
    }

    #[test]
    fn other_io_errors_stay_io() {
        let err = VolumeError::from(IoError::InvalidHeader {
            expected: 84,
            got: 10,
        });
        assert!(err.is_io());
        assert!(format!("{err}").contains("invalid STL header"));
    }

    #[test]
    fn test_error_display() {
        assert_eq!(format!("{}", VolumeError::Closed), "mesh model is closed");
        assert!(format!("{}", VolumeError::InvalidDensity(-1.0)).contains("-1"));
        assert!(format!("{}", VolumeError::UnknownUnit("ft".into())).contains("\"ft\""));
    }
}
