//! Binary STL decoding and encoding.
//!
//! # Binary Format
//!
//! ```text
//! UINT8[80]    – Header (ignored, often contains file info)
//! UINT32       – Number of triangles
//! foreach triangle
//!     REAL32[3] – Normal vector (often not accurate)
//!     REAL32[3] – Vertex 1
//!     REAL32[3] – Vertex 2
//!     REAL32[3] – Vertex 3
//!     UINT16    – Attribute byte count (usually 0)
//! end
//! ```
//!
//! All values are little-endian and records are packed with no padding,
//! so a well-formed file is exactly `84 + 50 * count` bytes long.

use std::fs::File;
use std::io::{BufWriter, ErrorKind, Read, Write};
use std::path::Path;

use mesh_types::{Triangle, Vector3};

use crate::error::{IoError, IoResult};

/// STL binary header size in bytes.
pub const HEADER_SIZE: usize = 80;

/// Header plus the little-endian triangle count.
pub const PREAMBLE_SIZE: usize = HEADER_SIZE + 4;

/// Size of one triangle in binary STL (normal + 3 vertices + attribute).
pub const RECORD_SIZE: usize = 50;

/// Exact byte length of a binary STL declaring `count` triangles.
#[must_use]
pub const fn expected_binary_len(count: u32) -> u64 {
    PREAMBLE_SIZE as u64 + RECORD_SIZE as u64 * count as u64
}

/// One decoded binary STL record.
///
/// Values are kept at the file's single precision; use
/// [`triangle`](Self::triangle) to get `f64` geometry.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Facet {
    /// Stored facet normal. Not used for geometry; many exporters write zeros.
    pub normal: [f32; 3],
    /// The three vertices in file order.
    pub vertices: [[f32; 3]; 3],
    /// Attribute byte count. Read to keep records aligned, otherwise unused.
    pub attribute: u16,
}

impl Facet {
    /// Decode a facet from one 50-byte record.
    #[must_use]
    pub fn from_record(record: &[u8; RECORD_SIZE]) -> Self {
        Self {
            normal: read_vec3(record, 0),
            vertices: [
                read_vec3(record, 12),
                read_vec3(record, 24),
                read_vec3(record, 36),
            ],
            attribute: u16::from_le_bytes([record[48], record[49]]),
        }
    }

    /// Vertex geometry widened to `f64`.
    #[must_use]
    pub fn triangle(&self) -> Triangle {
        let [v0, v1, v2] = self.vertices;
        Triangle::from_f32(v0, v1, v2)
    }
}

/// Read three little-endian f32s starting at `offset`.
fn read_vec3(buf: &[u8; RECORD_SIZE], offset: usize) -> [f32; 3] {
    let f = |i: usize| {
        let at = offset + i * 4;
        f32::from_le_bytes([buf[at], buf[at + 1], buf[at + 2], buf[at + 3]])
    };
    [f(0), f(1), f(2)]
}

/// Fill `buf` from `reader`, stopping early only at end of stream.
///
/// Returns the number of bytes placed in `buf`.
fn read_full<R: Read>(reader: &mut R, buf: &mut [u8]) -> std::io::Result<usize> {
    let mut filled = 0;
    while filled < buf.len() {
        match reader.read(&mut buf[filled..]) {
            Ok(0) => break,
            Ok(n) => filled += n,
            Err(e) if e.kind() == ErrorKind::Interrupted => {}
            Err(e) => return Err(e),
        }
    }
    Ok(filled)
}

/// Sequential, forward-only reader over a binary STL stream.
///
/// Construction consumes the 84-byte preamble; each call to
/// [`next_facet`](Self::next_facet) consumes exactly one 50-byte record until
/// the declared count is reached. Nothing is buffered beyond the current
/// record, so memory use does not depend on the triangle count.
///
/// # Example
///
/// ```
/// use mesh_io::{BinaryStlReader, write_stl_binary};
/// use mesh_types::cube;
///
/// let mut bytes = Vec::new();
/// write_stl_binary(&cube(1.0), &mut bytes, None).unwrap();
///
/// let mut reader = BinaryStlReader::new(bytes.as_slice()).unwrap();
/// assert_eq!(reader.triangle_count(), 12);
///
/// let mut seen = 0;
/// while let Some(facet) = reader.next_facet().unwrap() {
///     assert_eq!(facet.attribute, 0);
///     seen += 1;
/// }
/// assert_eq!(seen, 12);
/// ```
#[derive(Debug)]
pub struct BinaryStlReader<R> {
    reader: R,
    header: [u8; HEADER_SIZE],
    declared: u32,
    next_index: u32,
}

impl<R: Read> BinaryStlReader<R> {
    /// Read the header and triangle count from the start of `reader`.
    ///
    /// # Errors
    ///
    /// Returns [`IoError::InvalidHeader`] if fewer than 84 bytes are
    /// available, or [`IoError::Io`] if reading fails.
    pub fn new(mut reader: R) -> IoResult<Self> {
        let mut preamble = [0u8; PREAMBLE_SIZE];
        let got = read_full(&mut reader, &mut preamble)?;
        if got < PREAMBLE_SIZE {
            return Err(IoError::InvalidHeader {
                expected: PREAMBLE_SIZE,
                got,
            });
        }

        let mut header = [0u8; HEADER_SIZE];
        header.copy_from_slice(&preamble[..HEADER_SIZE]);
        let declared = u32::from_le_bytes([
            preamble[HEADER_SIZE],
            preamble[HEADER_SIZE + 1],
            preamble[HEADER_SIZE + 2],
            preamble[HEADER_SIZE + 3],
        ]);

        Ok(Self {
            reader,
            header,
            declared,
            next_index: 0,
        })
    }

    /// The free-form 80-byte header.
    #[must_use]
    pub const fn header(&self) -> &[u8; HEADER_SIZE] {
        &self.header
    }

    /// Triangle count declared in the preamble.
    #[must_use]
    pub const fn triangle_count(&self) -> u32 {
        self.declared
    }

    /// Records not yet read.
    #[must_use]
    pub const fn remaining(&self) -> u32 {
        self.declared - self.next_index
    }

    /// Read the next record.
    ///
    /// Returns `Ok(None)` once all declared records have been read. Bytes
    /// after the last declared record are never touched.
    ///
    /// # Errors
    ///
    /// Returns [`IoError::TruncatedRecord`] if the stream ends inside or
    /// before a declared record. After any error the reader is exhausted.
    pub fn next_facet(&mut self) -> IoResult<Option<Facet>> {
        if self.next_index >= self.declared {
            return Ok(None);
        }

        let index = self.next_index;
        let mut record = [0u8; RECORD_SIZE];
        let result = read_full(&mut self.reader, &mut record);
        match result {
            Ok(RECORD_SIZE) => {
                self.next_index += 1;
                Ok(Some(Facet::from_record(&record)))
            }
            Ok(_) => {
                self.next_index = self.declared;
                Err(IoError::truncated(index, self.declared))
            }
            Err(e) => {
                self.next_index = self.declared;
                Err(IoError::Io(e))
            }
        }
    }

    /// Give back the underlying reader.
    pub fn into_inner(self) -> R {
        self.reader
    }
}

impl<R: Read> Iterator for BinaryStlReader<R> {
    type Item = IoResult<Facet>;

    fn next(&mut self) -> Option<Self::Item> {
        self.next_facet().transpose()
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        (0, Some(self.remaining() as usize))
    }
}

/// Write triangles as binary STL.
///
/// Normals are computed from the vertices (right-hand rule); degenerate
/// triangles get a zero normal. The attribute count is always 0.
///
/// # Arguments
///
/// * `triangles` - Triangles to write, in order
/// * `writer` - Destination
/// * `header_text` - Text for the 80-byte header, truncated or zero-padded
///
/// # Errors
///
/// Returns [`IoError::TooManyTriangles`] if the count does not fit in a
/// `u32`, or [`IoError::Io`] if writing fails.
pub fn write_stl_binary<W: Write>(
    triangles: &[Triangle],
    mut writer: W,
    header_text: Option<&str>,
) -> IoResult<()> {
    let count = u32::try_from(triangles.len()).map_err(|_| IoError::TooManyTriangles {
        count: triangles.len(),
    })?;

    let mut header = [0u8; HEADER_SIZE];
    if let Some(text) = header_text {
        let bytes = text.as_bytes();
        let n = bytes.len().min(HEADER_SIZE);
        header[..n].copy_from_slice(&bytes[..n]);
    }
    writer.write_all(&header)?;
    writer.write_all(&count.to_le_bytes())?;

    for tri in triangles {
        let normal = tri.normal().unwrap_or_else(Vector3::zeros);
        write_f64s_as_f32(&mut writer, &[normal.x, normal.y, normal.z])?;
        for v in tri.vertices() {
            write_f64s_as_f32(&mut writer, &[v.x, v.y, v.z])?;
        }
        writer.write_all(&0u16.to_le_bytes())?;
    }

    writer.flush()?;
    Ok(())
}

fn write_f64s_as_f32<W: Write>(writer: &mut W, values: &[f64]) -> IoResult<()> {
    for &value in values {
        #[allow(clippy::cast_possible_truncation)]
        // Truncation: f64 to f32 is intentional for STL format
        let value = value as f32;
        writer.write_all(&value.to_le_bytes())?;
    }
    Ok(())
}

/// Save triangles to a binary STL file.
///
/// # Errors
///
/// Returns an error if the file cannot be created or written.
pub fn save_stl<P: AsRef<Path>>(triangles: &[Triangle], path: P) -> IoResult<()> {
    let file = File::create(path)?;
    write_stl_binary(triangles, BufWriter::new(file), Some("binary STL"))
}
