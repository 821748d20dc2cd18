//! The per-mesh handle: classification, lazy volume, weight.

use std::path::Path;
use std::sync::Arc;

use mesh_io::{BinaryStlReader, FileSource, MemorySource, StlFormat, StlSource, sniff};
use tracing::{debug, info, warn};

use crate::accumulate::accumulate_binary;
use crate::density::Density;
use crate::error::{VolumeError, VolumeResult};
use crate::quote::{Quote, QuoteParams};
use crate::units::VolumeUnit;

/// Memoized volume of a model.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub enum VolumeState {
    /// No successful pass over the triangles yet.
    #[default]
    NotComputed,
    /// Result of the one full pass, in cubic millimeters.
    Computed(f64),
}

impl VolumeState {
    /// The cached volume in cubic millimeters, if any.
    #[must_use]
    pub const fn get(&self) -> Option<f64> {
        match self {
            Self::NotComputed => None,
            Self::Computed(v) => Some(*v),
        }
    }
}

/// Lifecycle stage of a [`MeshModel`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ModelState {
    /// Opened and classified; volume not yet computed.
    Created,
    /// Volume computed and cached.
    VolumeComputed,
    /// Source released. Terminal.
    Closed,
}

/// One STL mesh with its format, cached volume and material density.
///
/// The format is decided once, when the model is created. The volume is
/// computed on the first request by a single forward pass over the binary
/// records and cached for the life of the model; later requests in any unit
/// are served from the cache without touching the source.
///
/// The source is only read while a sniff or a decode is running. Between
/// calls the model holds the source description, not an open stream.
///
/// # Concurrency
///
/// All reading operations take `&mut self`, so one model cannot be driven
/// from two places at once. Separate models share nothing and can run on
/// separate threads.
///
/// # Example
///
/// ```
/// use mesh_io::write_stl_binary;
/// use mesh_types::cube;
/// use mesh_volume::{MeshModel, VolumeUnit};
///
/// let mut bytes = Vec::new();
/// write_stl_binary(&cube(10.0), &mut bytes, None).unwrap();
///
/// let mut model = MeshModel::from_bytes(bytes).unwrap();
/// let cm3 = model.volume(VolumeUnit::CubicCentimeters).unwrap();
/// assert!((cm3 - 1.0).abs() < 1e-9);
/// assert!((model.weight().unwrap() - 1.04).abs() < 1e-9);
/// assert_eq!(model.triangle_count(), 12);
/// model.close();
/// ```
#[derive(Debug)]
pub struct MeshModel<S: StlSource = FileSource> {
    source: Option<S>,
    format: StlFormat,
    triangle_count: u32,
    volume: VolumeState,
    density: Density,
}

impl MeshModel<FileSource> {
    /// Open and classify the STL file at `path`.
    ///
    /// # Errors
    ///
    /// Returns [`VolumeError::Io`] if the file cannot be opened or read, or
    /// if it is empty.
    pub fn open<P: AsRef<Path>>(path: P) -> VolumeResult<Self> {
        Self::from_source(FileSource::new(path))
    }
}

impl MeshModel<MemorySource> {
    /// Classify an in-memory STL.
    ///
    /// # Errors
    ///
    /// Returns [`VolumeError::Io`] if `bytes` is empty.
    pub fn from_bytes(bytes: impl Into<Arc<[u8]>>) -> VolumeResult<Self> {
        Self::from_source(MemorySource::new(bytes))
    }
}

impl<S: StlSource> MeshModel<S> {
    /// Classify `source` and take ownership of it.
    ///
    /// # Errors
    ///
    /// Returns [`VolumeError::Io`] if the source cannot be read or is empty.
    pub fn from_source(source: S) -> VolumeResult<Self> {
        let format = sniff(&source)?;
        match format {
            StlFormat::Binary => debug!("Binary STL suspected"),
            StlFormat::Ascii => debug!("ASCII STL suspected"),
        }

        Ok(Self {
            source: Some(source),
            format,
            triangle_count: 0,
            volume: VolumeState::NotComputed,
            density: Density::DEFAULT,
        })
    }

    /// Format decided at creation.
    #[must_use]
    pub const fn format(&self) -> StlFormat {
        self.format
    }

    /// Current lifecycle stage.
    #[must_use]
    pub const fn state(&self) -> ModelState {
        match (&self.source, self.volume) {
            (None, _) => ModelState::Closed,
            (Some(_), VolumeState::NotComputed) => ModelState::Created,
            (Some(_), VolumeState::Computed(_)) => ModelState::VolumeComputed,
        }
    }

    /// Cached volume state.
    #[must_use]
    pub const fn volume_state(&self) -> VolumeState {
        self.volume
    }

    /// Triangle count declared by the binary header.
    ///
    /// Zero until a binary decode has read the header. Once read, it keeps
    /// its value even if the rest of the decode fails.
    #[must_use]
    pub const fn triangle_count(&self) -> u32 {
        self.triangle_count
    }

    /// Density used by [`weight`](Self::weight).
    #[must_use]
    pub const fn density(&self) -> Density {
        self.density
    }

    /// Replace the density. Affects later weight requests only.
    pub fn set_density(&mut self, density: Density) {
        self.density = density;
    }

    /// The source, unless the model is closed.
    #[must_use]
    pub const fn source(&self) -> Option<&S> {
        self.source.as_ref()
    }

    /// Check whether [`close`](Self::close) has been called.
    #[must_use]
    pub const fn is_closed(&self) -> bool {
        self.source.is_none()
    }

    /// Volume in cubic millimeters, computing it on first use.
    ///
    /// ASCII models report exactly zero: ASCII bodies are not decoded.
    ///
    /// # Errors
    ///
    /// - [`VolumeError::Closed`] after [`close`](Self::close)
    /// - [`VolumeError::Io`] if the binary preamble is incomplete or a read fails
    /// - [`VolumeError::TruncatedRecord`] if the body is shorter than declared
    ///
    /// On error nothing is cached; a later call repeats the full pass.
    pub fn volume_mm3(&mut self) -> VolumeResult<f64> {
        let Some(source) = self.source.as_ref() else {
            return Err(VolumeError::Closed);
        };

        if let VolumeState::Computed(v) = self.volume {
            return Ok(v);
        }

        let volume = match self.format {
            StlFormat::Binary => decode_binary_volume(source, &mut self.triangle_count)?,
            StlFormat::Ascii => {
                warn!("ASCII STL bodies are not decoded; reporting zero volume");
                0.0
            }
        };

        self.volume = VolumeState::Computed(volume);
        Ok(volume)
    }

    /// Volume in `unit`.
    ///
    /// # Errors
    ///
    /// Same as [`volume_mm3`](Self::volume_mm3).
    pub fn volume(&mut self, unit: VolumeUnit) -> VolumeResult<f64> {
        Ok(unit.from_mm3(self.volume_mm3()?))
    }

    /// Volume for a free-form unit token: `"cm"` gives cm³, anything else in³.
    ///
    /// # Errors
    ///
    /// Same as [`volume_mm3`](Self::volume_mm3).
    pub fn volume_for_token(&mut self, token: &str) -> VolumeResult<f64> {
        self.volume(VolumeUnit::from_token(token))
    }

    /// Weight in grams at the current density.
    ///
    /// Not cached: derived from the cached volume on every call.
    ///
    /// # Errors
    ///
    /// Same as [`volume_mm3`](Self::volume_mm3).
    pub fn weight(&mut self) -> VolumeResult<f64> {
        let volume_cm3 = self.volume(VolumeUnit::CubicCentimeters)?;
        Ok(self.density.weight_of(volume_cm3))
    }

    /// Price the model with `params`.
    ///
    /// Uses `params.density`, not the model's own density, and leaves the
    /// model's density unchanged.
    ///
    /// # Errors
    ///
    /// Returns [`VolumeError::InvalidRate`] for a bad rate, otherwise the
    /// errors of [`volume_mm3`](Self::volume_mm3).
    pub fn quote(&mut self, params: &QuoteParams) -> VolumeResult<Quote> {
        params.validate()?;
        let volume_mm3 = self.volume_mm3()?;
        Ok(Quote::from_volume(volume_mm3, self.triangle_count, params))
    }

    /// Release the source. Calling it again does nothing.
    pub fn close(&mut self) {
        if self.source.take().is_some() {
            debug!("Mesh model closed");
        }
    }
}

/// One full pass over a binary body. Records the declared count as soon as
/// the preamble has been read.
fn decode_binary_volume<S: StlSource>(source: &S, triangle_count: &mut u32) -> VolumeResult<f64> {
    let reader = BinaryStlReader::new(source.open()?)?;
    *triangle_count = reader.triangle_count();

    info!(triangles = *triangle_count, "Decoding binary STL");
    let volume = accumulate_binary(reader)?;
    info!(
        triangles = *triangle_count,
        volume_mm3 = volume,
        "Binary STL volume computed"
    );

    Ok(volume)
}
